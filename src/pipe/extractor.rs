use crate::exception::Exception;
use crate::pipe::builtins::ValidationPipe;
use crate::pipe::{BindingResult, MethodArgumentNotValid, Pipe, Validate};
use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;

/// Axum extractor for validated JSON bodies
///
/// Deserializes the body and runs the payload's [`Validate`] constraints.
/// Any failure, including a body that cannot be deserialized, is raised as
/// [`MethodArgumentNotValid`].
///
/// # Example
/// ```rust,ignore
/// use restfault::prelude::*;
///
/// async fn create_user(ValidJson(input): ValidJson<UserInput>) -> Result<StatusCode, Exception> {
///     repository.save(input.into_user())?;
///     Ok(StatusCode::CREATED)
/// }
/// ```
pub struct ValidJson<T>(pub T);

impl<T> ValidJson<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<S, T> FromRequest<S> for ValidJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate + Send + 'static,
{
    type Rejection = Exception;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<T>::from_request(request, state)
            .await
            .map_err(|rejection| unreadable_body::<T>(&rejection))?;

        let payload = ValidationPipe::<T>::default().transform(payload).await?;
        Ok(Self(payload))
    }
}

fn unreadable_body<T: Validate>(rejection: &JsonRejection) -> MethodArgumentNotValid {
    let mut result = BindingResult::new(T::object_name());
    result.reject(rejection.body_text());
    MethodArgumentNotValid::new(result)
}

/// Deref implementation for convenient access to the payload
impl<T> std::ops::Deref for ValidJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
