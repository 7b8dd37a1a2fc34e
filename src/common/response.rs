use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use strum_macros::{Display, EnumString};

/// How the `timestamp` field of an error body is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum TimestampFormat {
    /// ISO-8601 with millisecond precision, e.g. `2026-10-18T09:30:00.123Z`
    #[default]
    #[strum(serialize = "rfc3339")]
    Rfc3339,

    /// Milliseconds since the Unix epoch
    #[strum(serialize = "epoch-millis")]
    EpochMillis,
}

/// The moment an error was captured
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timestamp {
    at: DateTime<Utc>,
    format: TimestampFormat,
}

impl Timestamp {
    pub fn now() -> Self {
        Self::at(Utc::now())
    }

    pub fn at(at: DateTime<Utc>) -> Self {
        Self {
            at,
            format: TimestampFormat::default(),
        }
    }

    pub fn with_format(self, format: TimestampFormat) -> Self {
        Self { format, ..self }
    }

    pub fn instant(&self) -> DateTime<Utc> {
        self.at
    }

    pub fn format(&self) -> TimestampFormat {
        self.format
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.format {
            TimestampFormat::Rfc3339 => {
                serializer.serialize_str(&self.at.to_rfc3339_opts(SecondsFormat::Millis, true))
            }
            TimestampFormat::EpochMillis => serializer.serialize_i64(self.at.timestamp_millis()),
        }
    }
}

/// Error body returned for every translated failure
///
/// All three serialized fields are always populated. The HTTP status is kept
/// alongside the body but is not part of the JSON.
///
/// # Example
/// ```
/// use restfault::common::ErrorResponse;
/// use axum::http::StatusCode;
///
/// let body = ErrorResponse::new(StatusCode::NOT_FOUND, "id-7", "uri=/users/7");
/// assert_eq!(body.status, StatusCode::NOT_FOUND);
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub timestamp: Timestamp,
    pub message: String,
    pub details: String,

    #[serde(skip)]
    pub status: StatusCode,
}

impl ErrorResponse {
    /// Create an error body stamped with the current time
    pub fn new(status: StatusCode, message: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            timestamp: Timestamp::now(),
            message: message.into(),
            details: details.into(),
            status,
        }
    }

    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp = self.timestamp.with_format(format);
        self
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}
