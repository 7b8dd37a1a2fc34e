use thiserror::Error;

pub type Result<T> = std::result::Result<T, RestfaultError>;

#[derive(Debug, Error)]
pub enum RestfaultError {
    #[error("Invalid configuration value for {key}: {value:?}")]
    InvalidConfig { key: String, value: String },
}

impl RestfaultError {
    pub fn invalid_config(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidConfig {
            key: key.into(),
            value: value.into(),
        }
    }
}
