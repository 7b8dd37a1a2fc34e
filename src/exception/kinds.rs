use std::fmt::Display;
use thiserror::Error;

/// A requested entity does not exist
///
/// Translated to `404 Not Found` by the default translator.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct NotFound {
    message: String,
}

impl NotFound {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// `"<entity> <id> not found"`
    pub fn entity(entity: &str, id: impl Display) -> Self {
        Self::new(format!("{entity} {id} not found"))
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A request handler panicked while producing its response
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct HandlerPanicked {
    pub message: String,
}
