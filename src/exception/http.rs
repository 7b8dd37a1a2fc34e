use crate::common::ErrorResponse;
use crate::exception::{ArgumentsHost, Exception, ExceptionFilter};
use crate::pipe::MethodArgumentNotValid;
use axum::http::StatusCode;
use std::error::Error;
use std::marker::PhantomData;

/// Fixed message of every validation failure
pub const VALIDATION_FAILED_MESSAGE: &str = "Validation failed";

/// Message used for 5xx responses when internal messages are hidden
pub const INTERNAL_SERVER_ERROR_MESSAGE: &str = "Internal Server Error";

/// Maps one error type to a fixed status code
///
/// The body carries the raised exception's message and the request description.
pub struct StatusFilter<E> {
    status: StatusCode,
    _error: PhantomData<fn() -> E>,
}

impl<E> StatusFilter<E> {
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            _error: PhantomData,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl<E> ExceptionFilter for StatusFilter<E>
where
    E: Error + Send + Sync + 'static,
{
    fn matches(&self, exception: &Exception) -> Option<usize> {
        exception.depth_of::<E>()
    }

    fn catch(&self, exception: &Exception, host: &ArgumentsHost) -> ErrorResponse {
        ErrorResponse::new(self.status, exception.message(), host.description())
    }
}

/// Handles request bodies that failed validation
///
/// Always `400 Bad Request` with the message `"Validation failed"`; the
/// details carry the rendered binding result.
#[derive(Default)]
pub struct ValidationFilter;

impl ExceptionFilter for ValidationFilter {
    fn matches(&self, exception: &Exception) -> Option<usize> {
        exception.depth_of::<MethodArgumentNotValid>()
    }

    fn catch(&self, exception: &Exception, host: &ArgumentsHost) -> ErrorResponse {
        let details = exception
            .find::<MethodArgumentNotValid>()
            .map(|error| error.binding_result().to_string())
            .unwrap_or_else(|| host.description());

        ErrorResponse::new(StatusCode::BAD_REQUEST, VALIDATION_FAILED_MESSAGE, details)
    }
}

/// Catch-all for exceptions no other filter claims
#[derive(Default)]
pub struct UnhandledExceptionFilter;

impl ExceptionFilter for UnhandledExceptionFilter {
    fn matches(&self, _exception: &Exception) -> Option<usize> {
        Some(usize::MAX)
    }

    fn catch(&self, exception: &Exception, host: &ArgumentsHost) -> ErrorResponse {
        ErrorResponse::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            exception.message(),
            host.description(),
        )
    }
}
