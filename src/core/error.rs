//! Error type system for Shelf Reader
//!
//! This module provides the error taxonomy shared by every component:
//! - Storage and I/O failures from the device-local key-value store
//! - Lookup failures surfaced to screens as a "not found" message
//! - Unsupported platform capabilities surfaced as a polite notification
//! - Error context chaining for initialization paths

use serde::{Deserialize, Serialize};
use std::fmt;

/// Main error type for the Shelf Reader core
#[derive(Debug, thiserror::Error)]
pub enum ShelfError {
    // System-level errors
    #[error("Initialization failed: {0}")]
    Initialization(String),

    #[error("Configuration error: {0}")]
    Config(String),

    // Storage errors
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Connection pool error: {0}")]
    Pool(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Data errors
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    // Platform errors
    #[error("Unsupported capability: {0}")]
    Unsupported(String),

    // Runtime errors
    #[error("Task error: {0}")]
    Task(String),

    #[error("Notification error: {0}")]
    Event(String),
}

impl ShelfError {
    /// Get the error type name
    pub fn error_type(&self) -> &'static str {
        match self {
            ShelfError::Initialization(_) => "Initialization",
            ShelfError::Config(_) => "Config",
            ShelfError::Storage(_) => "Storage",
            ShelfError::Pool(_) => "Pool",
            ShelfError::Io(_) => "Io",
            ShelfError::NotFound(_) => "NotFound",
            ShelfError::Serialization(_) => "Serialization",
            ShelfError::InvalidData(_) => "InvalidData",
            ShelfError::Unsupported(_) => "Unsupported",
            ShelfError::Task(_) => "Task",
            ShelfError::Event(_) => "Event",
        }
    }

    /// Message a screen may show to the user.
    ///
    /// Only lookup misses and missing platform capabilities are user-facing;
    /// everything else is logged and degraded silently.
    pub fn user_message(&self) -> Option<String> {
        match self {
            ShelfError::NotFound(_) => Some("The book could not be found.".to_string()),
            ShelfError::Unsupported(_) => {
                Some("Sharing is not supported on this device.".to_string())
            }
            _ => None,
        }
    }

    /// Check if this error is a lookup miss
    pub fn is_not_found(&self) -> bool {
        matches!(self, ShelfError::NotFound(_))
    }
}

impl From<serde_json::Error> for ShelfError {
    fn from(err: serde_json::Error) -> Self {
        ShelfError::Serialization(err.to_string())
    }
}

impl From<r2d2::Error> for ShelfError {
    fn from(err: r2d2::Error) -> Self {
        ShelfError::Pool(err.to_string())
    }
}

/// Error summary suitable for structured output
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorReport {
    /// Error type identifier
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Text safe to show on screen, when the error is user-facing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_message: Option<String>,
}

impl ErrorReport {
    pub fn from_error(error: &ShelfError) -> Self {
        Self {
            error: error.error_type().to_string(),
            message: error.to_string(),
            user_message: error.user_message(),
        }
    }
}

impl fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.user_message {
            Some(text) => write!(f, "{}", text),
            None => write!(f, "[{}] {}", self.error, self.message),
        }
    }
}

/// Result type alias for operations that can fail with ShelfError
pub type Result<T> = std::result::Result<T, ShelfError>;

/// Context extension trait for adding context to errors
pub trait ErrorContext<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context to an error using a closure
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| ShelfError::Initialization(format!("{}: {}", context.into(), e)))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| ShelfError::Initialization(format!("{}: {}", f(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_types() {
        assert_eq!(ShelfError::NotFound("book9".into()).error_type(), "NotFound");
        assert_eq!(
            ShelfError::Unsupported("share".into()).error_type(),
            "Unsupported"
        );
        assert_eq!(
            ShelfError::Storage(rusqlite::Error::InvalidQuery).error_type(),
            "Storage"
        );
    }

    #[test]
    fn test_only_lookup_and_capability_errors_are_user_facing() {
        assert!(ShelfError::NotFound("x".into()).user_message().is_some());
        assert!(ShelfError::Unsupported("share".into()).user_message().is_some());
        assert!(ShelfError::Serialization("bad".into()).user_message().is_none());
        assert!(ShelfError::Pool("busy".into()).user_message().is_none());
    }

    #[test]
    fn test_error_report_prefers_user_message() {
        let report = ErrorReport::from_error(&ShelfError::NotFound("book42".into()));
        assert_eq!(report.error, "NotFound");
        assert!(report.message.contains("book42"));
        assert_eq!(report.to_string(), "The book could not be found.");

        let report = ErrorReport::from_error(&ShelfError::Task("join failed".into()));
        assert_eq!(report.to_string(), "[Task] Task error: join failed");
    }

    #[test]
    fn test_serde_json_conversion() {
        let err: ShelfError = serde_json::from_str::<Vec<String>>("{oops")
            .unwrap_err()
            .into();
        assert!(matches!(err, ShelfError::Serialization(_)));
    }

    #[test]
    fn test_error_context() {
        let result: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "file not found",
        ));

        let err = result.context("Failed to read catalog seed").unwrap_err();
        assert!(err.to_string().contains("Failed to read catalog seed"));
        assert!(err.to_string().contains("file not found"));
    }
}
