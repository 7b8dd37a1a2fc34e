pub mod response;

pub use response::{ErrorResponse, Timestamp, TimestampFormat};
