use crate::pipe::{BindingResult, MethodArgumentNotValid, Pipe, PipeResult, Validate};
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use std::marker::PhantomData;

/// A pipe that runs a payload's [`Validate`] constraints
pub struct ValidationPipe<T> {
    _payload: PhantomData<fn() -> T>,
}

impl<T> Default for ValidationPipe<T> {
    fn default() -> Self {
        Self {
            _payload: PhantomData,
        }
    }
}

#[async_trait]
impl<T> Pipe for ValidationPipe<T>
where
    T: Validate + Send + 'static,
{
    type Input = T;
    type Output = T;

    async fn transform(&self, input: T) -> PipeResult<T> {
        let mut result = BindingResult::new(T::object_name());
        input.validate(&mut result);

        if result.has_errors() {
            Err(MethodArgumentNotValid::new(result))
        } else {
            Ok(input)
        }
    }
}

/// Reject a missing value. Returns the value when present.
pub fn check_required<'a, T>(
    result: &mut BindingResult,
    field: &str,
    value: &'a Option<T>,
) -> Option<&'a T> {
    if value.is_none() {
        result.reject_value(field, "null", "must not be null");
    }
    value.as_ref()
}

/// Reject an empty or whitespace-only string
pub fn check_not_blank(result: &mut BindingResult, field: &str, value: &str) -> bool {
    let ok = !value.trim().is_empty();
    if !ok {
        result.reject_value(field, value, "must not be blank");
    }
    ok
}

/// Reject a string whose character count falls outside `min..=max`
pub fn check_size(
    result: &mut BindingResult,
    field: &str,
    value: &str,
    min: usize,
    max: usize,
) -> bool {
    let len = value.chars().count();
    let ok = (min..=max).contains(&len);
    if !ok {
        result.reject_value(field, value, format!("size must be between {min} and {max}"));
    }
    ok
}

/// Reject a date that is not strictly before today (UTC)
pub fn check_past(result: &mut BindingResult, field: &str, value: NaiveDate) -> bool {
    check_past_at(result, field, value, Utc::now().date_naive())
}

pub fn check_past_at(
    result: &mut BindingResult,
    field: &str,
    value: NaiveDate,
    today: NaiveDate,
) -> bool {
    let ok = value < today;
    if !ok {
        result.reject_value(field, value, "must be a past date");
    }
    ok
}
