//! Exception Translation Module
//!
//! Handlers raise failures by returning `Err(Exception)`. The
//! [`ExceptionLayer`] wrapping the router hands every raised exception to an
//! [`ExceptionTranslator`], which picks the most specific [`ExceptionFilter`]
//! and renders its [`ErrorResponse`].
//!
//! # Example
//!
//! ```rust,ignore
//! use restfault::prelude::*;
//!
//! async fn get_user(Path(id): Path<u32>) -> Result<Json<User>, Exception> {
//!     let user = repository.find(id).ok_or_else(|| NotFound::new(format!("id-{id}")))?;
//!     Ok(Json(user))
//! }
//!
//! let app = Router::new()
//!     .route("/users/{id}", get(get_user))
//!     .layer(ExceptionLayer::new(ExceptionTranslator::default()));
//! ```

use crate::common::ErrorResponse;
use axum::{
    http::{Method, Request, Uri},
    response::{IntoResponse, Response},
};
use std::any::Any;
use std::error::Error;
use std::fmt;
use std::sync::{Arc, LazyLock};

pub mod http;
mod kinds;
mod layer;
mod translator;

pub use kinds::{HandlerPanicked, NotFound};
pub use layer::{ExceptionLayer, ExceptionMiddleware};
pub use translator::{ExceptionTranslator, ExceptionTranslatorBuilder};

/// Type-erased error produced by tower services
pub type BoxError = Box<dyn Error + Send + Sync>;

static DEFAULT_TRANSLATOR: LazyLock<ExceptionTranslator> =
    LazyLock::new(ExceptionTranslator::default);

/// A failure raised while handling a request
///
/// Any error convertible into [`anyhow::Error`] converts into an `Exception`
/// with `?`, so context attached with `anyhow::Context` is kept and the
/// original error stays reachable through the cause chain.
#[derive(Clone)]
pub struct Exception(Arc<anyhow::Error>);

impl Exception {
    pub fn new<E>(error: E) -> Self
    where
        E: Into<anyhow::Error>,
    {
        Self(Arc::new(error.into()))
    }

    /// Raise a plain message with no typed cause
    pub fn msg<M>(message: M) -> Self
    where
        M: fmt::Display + fmt::Debug + Send + Sync + 'static,
    {
        Self::new(anyhow::Error::msg(message))
    }

    /// Wrap an error returned by an inner tower service
    pub fn from_boxed(error: BoxError) -> Self {
        Self::new(ServiceError(error))
    }

    /// Wrap the payload of a caught panic
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(message) = payload.downcast_ref::<&str>() {
            (*message).to_string()
        } else if let Some(message) = payload.downcast_ref::<String>() {
            message.clone()
        } else {
            "request handler panicked".to_string()
        };
        Self::new(HandlerPanicked { message })
    }

    /// Display text of the outermost error
    pub fn message(&self) -> String {
        self.0.to_string()
    }

    pub fn error(&self) -> &anyhow::Error {
        &self.0
    }

    /// Find the first error of type `E`, either as attached context or in the cause chain
    pub fn find<E>(&self) -> Option<&E>
    where
        E: Error + Send + Sync + 'static,
    {
        self.0
            .downcast_ref::<E>()
            .or_else(|| self.0.chain().find_map(|cause| cause.downcast_ref::<E>()))
    }

    /// Position of `E` in the cause chain, 0 being the raised error itself
    pub fn depth_of<E>(&self) -> Option<usize>
    where
        E: Error + Send + Sync + 'static,
    {
        self.0
            .chain()
            .position(|cause| cause.is::<E>())
            .or_else(|| self.0.downcast_ref::<E>().map(|_| 0))
    }
}

impl<E> From<E> for Exception
where
    E: Into<anyhow::Error>,
{
    fn from(error: E) -> Self {
        Self::new(error)
    }
}

impl fmt::Debug for Exception {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl fmt::Display for Exception {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.0, f)
    }
}

impl IntoResponse for Exception {
    fn into_response(self) -> Response {
        // Rendered without request context; ExceptionLayer replaces it.
        let mut response = DEFAULT_TRANSLATOR
            .resolve(&self, &ArgumentsHost::unknown())
            .into_response();
        response.extensions_mut().insert(RaisedException(self));
        response
    }
}

/// Marks a response produced from a raised exception
#[derive(Clone)]
pub(crate) struct RaisedException(pub(crate) Exception);

#[derive(Debug)]
struct ServiceError(BoxError);

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(self.0.as_ref())
    }
}

/// Context for exception handling
///
/// Captured from the request before it is dispatched, so it is still
/// available once the handler has failed.
#[derive(Debug, Clone, Default)]
pub struct ArgumentsHost {
    method: Option<Method>,
    uri: Option<Uri>,
}

impl ArgumentsHost {
    pub fn new(method: Method, uri: Uri) -> Self {
        Self {
            method: Some(method),
            uri: Some(uri),
        }
    }

    pub fn from_request<B>(request: &Request<B>) -> Self {
        Self::new(request.method().clone(), request.uri().clone())
    }

    /// A host for exceptions rendered outside of any request
    pub fn unknown() -> Self {
        Self::default()
    }

    pub fn method(&self) -> Option<&Method> {
        self.method.as_ref()
    }

    pub fn uri(&self) -> Option<&Uri> {
        self.uri.as_ref()
    }

    /// Short request description used as `details`, e.g. `uri=/users/7`
    pub fn description(&self) -> String {
        match &self.uri {
            Some(uri) => format!("uri={}", uri.path()),
            None => "uri=<unknown>".to_string(),
        }
    }
}

/// The ExceptionFilter trait
///
/// Filters handle errors raised during request processing.
/// They must return a valid error body.
pub trait ExceptionFilter: Send + Sync + 'static {
    /// Depth in the exception's cause chain at which this filter applies,
    /// or `None` when it does not apply.
    fn matches(&self, exception: &Exception) -> Option<usize>;

    /// Catch an exception and build the error body
    fn catch(&self, exception: &Exception, host: &ArgumentsHost) -> ErrorResponse;
}
