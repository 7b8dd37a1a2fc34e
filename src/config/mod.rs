use crate::common::TimestampFormat;
use crate::error::{RestfaultError, Result};
use dashmap::DashMap;
use std::env;
use std::sync::Arc;

pub const EXPOSE_INTERNAL_MESSAGES_KEY: &str = "RESTFAULT_EXPOSE_INTERNAL_MESSAGES";
pub const TIMESTAMP_FORMAT_KEY: &str = "RESTFAULT_TIMESTAMP_FORMAT";

/// Configuration service
#[derive(Clone, Default)]
pub struct ConfigService {
    config: Arc<DashMap<String, String>>,
}

impl ConfigService {
    /// Create a service seeded with the process environment
    pub fn new() -> Self {
        let service = Self::default();
        for (key, value) in env::vars() {
            service.set(&key, &value);
        }
        service
    }

    /// Create a service with no entries
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.config.get(key).map(|v| v.clone())
    }

    pub fn get_or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }

    pub fn set(&self, key: &str, value: &str) {
        self.config.insert(key.to_string(), value.to_string());
    }

    /// Read a boolean flag. Accepts `true`/`false`, `1`/`0` and `yes`/`no`.
    pub fn get_bool(&self, key: &str) -> Result<Option<bool>> {
        let Some(raw) = self.get(key) else {
            return Ok(None);
        };
        match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(Some(true)),
            "false" | "0" | "no" => Ok(Some(false)),
            _ => Err(RestfaultError::invalid_config(key, raw)),
        }
    }
}

/// Settings that shape translated error responses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranslatorConfig {
    /// When false, 5xx responses carry a generic message instead of the raw error text.
    pub expose_internal_messages: bool,
    pub timestamp_format: TimestampFormat,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            expose_internal_messages: true,
            timestamp_format: TimestampFormat::Rfc3339,
        }
    }
}

impl TranslatorConfig {
    /// Load settings from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_service(&ConfigService::new())
    }

    pub fn from_service(config: &ConfigService) -> Result<Self> {
        let defaults = Self::default();

        let expose_internal_messages = config
            .get_bool(EXPOSE_INTERNAL_MESSAGES_KEY)?
            .unwrap_or(defaults.expose_internal_messages);

        let timestamp_format = match config.get(TIMESTAMP_FORMAT_KEY) {
            Some(raw) => raw
                .trim()
                .parse::<TimestampFormat>()
                .map_err(|_| RestfaultError::invalid_config(TIMESTAMP_FORMAT_KEY, raw))?,
            None => defaults.timestamp_format,
        };

        Ok(Self {
            expose_internal_messages,
            timestamp_format,
        })
    }
}
