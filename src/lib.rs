//! # Restfault
//!
//! Centralized exception-to-response translation for axum services.
//!
//! Request handlers raise failures by returning `Err(Exception)`. A single
//! [`ExceptionLayer`] registered on the router turns every raised exception,
//! inner-service error and handler panic into a JSON body:
//!
//! ```json
//! { "timestamp": "2026-10-18T09:30:00.123Z", "message": "id-7", "details": "uri=/users/7" }
//! ```
//!
//! ## Features
//!
//! - **Most-specific-first dispatch**: typed filters are matched against the
//!   exception's cause chain; the shallowest match wins
//! - **Built-in kinds**: [`NotFound`] → 404, validation failures → 400,
//!   everything else → 500
//! - **Validation pipe**: [`ValidJson`] runs a payload's [`Validate`] rules and
//!   reports every violated field
//! - **Configurable policy**: hide raw 5xx messages or switch timestamp format
//!   from the environment
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use restfault::prelude::*;
//! use axum::routing::get;
//!
//! async fn get_user(Path(id): Path<u32>) -> Result<Json<String>, Exception> {
//!     if id == 1 {
//!         Ok(Json("Adam".to_string()))
//!     } else {
//!         Err(NotFound::new(format!("id-{id}")).into())
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let translator = ExceptionTranslator::builder()
//!         .config(TranslatorConfig::from_env().unwrap())
//!         .build();
//!
//!     let app: Router = Router::new()
//!         .route("/users/{id}", get(get_user))
//!         .layer(ExceptionLayer::new(translator));
//!
//!     // Serve your app...
//! }
//! ```

pub mod common;
pub mod config;
pub mod error;
pub mod exception;
pub mod pipe;

// Re-export core types
pub use common::{ErrorResponse, TimestampFormat};
pub use config::{ConfigService, TranslatorConfig};
pub use error::{RestfaultError, Result};
pub use exception::{
    ArgumentsHost, Exception, ExceptionFilter, ExceptionLayer, ExceptionTranslator, NotFound,
};
pub use pipe::{BindingResult, MethodArgumentNotValid, ValidJson, Validate};

// Re-export commonly used types from dependencies
pub use async_trait::async_trait;
pub use axum;

/// Prelude module for convenient imports
///
/// ```
/// use restfault::prelude::*;
/// ```
pub mod prelude {
    pub use crate::common::{ErrorResponse, TimestampFormat};
    pub use crate::config::{ConfigService, TranslatorConfig};
    pub use crate::error::RestfaultError;
    pub use crate::exception::http::{StatusFilter, VALIDATION_FAILED_MESSAGE};
    pub use crate::exception::{
        ArgumentsHost, Exception, ExceptionFilter, ExceptionLayer, ExceptionTranslator,
        ExceptionTranslatorBuilder, HandlerPanicked, NotFound,
    };
    pub use crate::pipe::builtins::*;
    pub use crate::pipe::{
        BindingError, BindingResult, MethodArgumentNotValid, Pipe, PipeResult, ValidJson, Validate,
    };
    pub use async_trait::async_trait;
    pub use axum::{
        Json, Router,
        extract::{Path, Query, State},
        http::StatusCode,
        response::{IntoResponse, Response},
    };
    pub use std::sync::Arc;
}
