use std::fmt;
use thiserror::Error;

/// One violated constraint
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingError {
    /// A single field was rejected
    Field {
        field: String,
        rejected_value: String,
        message: String,
    },

    /// The payload as a whole was rejected
    Object { message: String },
}

impl BindingError {
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Field { field, .. } => Some(field.as_str()),
            Self::Object { .. } => None,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Field { message, .. } | Self::Object { message } => message,
        }
    }
}

/// Errors collected while validating one bound object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingResult {
    object_name: String,
    errors: Vec<BindingError>,
}

impl BindingResult {
    pub fn new(object_name: impl Into<String>) -> Self {
        Self {
            object_name: object_name.into(),
            errors: Vec::new(),
        }
    }

    pub fn object_name(&self) -> &str {
        &self.object_name
    }

    /// Reject a single field, keeping the offending value for the report
    pub fn reject_value(
        &mut self,
        field: impl Into<String>,
        rejected_value: impl fmt::Display,
        message: impl Into<String>,
    ) {
        self.errors.push(BindingError::Field {
            field: field.into(),
            rejected_value: rejected_value.to_string(),
            message: message.into(),
        });
    }

    /// Reject the payload as a whole
    pub fn reject(&mut self, message: impl Into<String>) {
        self.errors.push(BindingError::Object {
            message: message.into(),
        });
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn errors(&self) -> &[BindingError] {
        &self.errors
    }

    pub fn field_errors(&self) -> impl Iterator<Item = &BindingError> {
        self.errors.iter().filter(|error| error.field().is_some())
    }

    pub fn field_error(&self, field: &str) -> Option<&BindingError> {
        self.errors.iter().find(|error| error.field() == Some(field))
    }
}

impl fmt::Display for BindingResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BindingResult for object '{}': {} errors",
            self.object_name,
            self.errors.len()
        )?;

        for error in &self.errors {
            match error {
                BindingError::Field {
                    field,
                    rejected_value,
                    message,
                } => write!(
                    f,
                    "\nField error in object '{}' on field '{}': rejected value [{}]; default message [{}]",
                    self.object_name, field, rejected_value, message
                )?,
                BindingError::Object { message } => write!(
                    f,
                    "\nError in object '{}': default message [{}]",
                    self.object_name, message
                )?,
            }
        }
        Ok(())
    }
}

/// Raised when a request body fails validation
#[derive(Debug, Clone, Error)]
#[error("Validation failed for object '{}' with {} errors", .binding_result.object_name(), .binding_result.error_count())]
pub struct MethodArgumentNotValid {
    binding_result: BindingResult,
}

impl MethodArgumentNotValid {
    pub fn new(binding_result: BindingResult) -> Self {
        Self { binding_result }
    }

    pub fn binding_result(&self) -> &BindingResult {
        &self.binding_result
    }
}
