// src/error.rs
//! Application error types with structured error handling.
//!
//! Two failures are fatal to a sync: the remote API misbehaving
//! ([`RemoteError`]) and missing configuration ([`ConfigError`]).
//! A malformed block is the only failure recovered in place; it exists
//! as a type ([`MalformedBlockError`]) so the warning it produces reads
//! the same wherever it is logged.

use crate::types::ValidationError;
use std::fmt;
use thiserror::Error;

/// Notion API error codes as a typed vocabulary.
///
/// Instead of matching against magic strings like `"rate_limited"`,
/// the domain vocabulary is encoded in the type system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotionErrorCode {
    /// API rate limit exceeded
    RateLimited,
    /// The requested object does not exist or is inaccessible
    ObjectNotFound,
    /// API key is invalid or expired
    Unauthorized,
    /// API key lacks permission for this resource
    RestrictedResource,
    /// Request body contains invalid JSON
    InvalidJson,
    /// Request parameters failed Notion's validation
    ValidationFailed,
    /// Conflict with current state of the resource
    Conflict,
    /// Notion internal server error
    InternalError,
    /// Notion is temporarily unavailable
    ServiceUnavailable,
    /// An error code this client doesn't recognize yet
    Unknown(String),
}

impl NotionErrorCode {
    /// Parse a Notion API error code string into the typed vocabulary.
    pub fn from_api_response(code: &str) -> Self {
        match code {
            "rate_limited" => Self::RateLimited,
            "object_not_found" => Self::ObjectNotFound,
            "unauthorized" => Self::Unauthorized,
            "restricted_resource" => Self::RestrictedResource,
            "invalid_json" => Self::InvalidJson,
            "validation_error" => Self::ValidationFailed,
            "conflict_error" => Self::Conflict,
            "internal_server_error" => Self::InternalError,
            "service_unavailable" => Self::ServiceUnavailable,
            other => Self::Unknown(other.to_string()),
        }
    }
}

impl fmt::Display for NotionErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RateLimited => write!(f, "rate_limited"),
            Self::ObjectNotFound => write!(f, "object_not_found"),
            Self::Unauthorized => write!(f, "unauthorized"),
            Self::RestrictedResource => write!(f, "restricted_resource"),
            Self::InvalidJson => write!(f, "invalid_json"),
            Self::ValidationFailed => write!(f, "validation_error"),
            Self::Conflict => write!(f, "conflict_error"),
            Self::InternalError => write!(f, "internal_server_error"),
            Self::ServiceUnavailable => write!(f, "service_unavailable"),
            Self::Unknown(code) => write!(f, "{}", code),
        }
    }
}

/// Any failure talking to the Notion API.
///
/// Covers transport failures (including timeouts), HTTP statuses of 400
/// and above, and bodies carrying `"object": "error"` whatever their status.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Notion API error ({}): {message}", describe_status(.status, .code))]
pub struct RemoteError {
    /// HTTP status, absent when the request never produced a response.
    pub status: Option<u16>,
    /// Notion's error code when the body carried one.
    pub code: Option<NotionErrorCode>,
    pub message: String,
}

impl RemoteError {
    /// Whether Notion reported the object as missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self.code, Some(NotionErrorCode::ObjectNotFound)) || self.status == Some(404)
    }
}

fn describe_status(status: &Option<u16>, code: &Option<NotionErrorCode>) -> String {
    match (status, code) {
        (Some(status), Some(code)) => format!("{} {}", status, code),
        (Some(status), None) => status.to_string(),
        (None, Some(code)) => code.to_string(),
        (None, None) => "transport".to_string(),
    }
}

impl From<reqwest::Error> for RemoteError {
    fn from(err: reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            format!("request timed out: {}", err)
        } else {
            err.to_string()
        };
        Self {
            status: err.status().map(|s| s.as_u16()),
            code: None,
            message,
        }
    }
}

/// Missing or unusable configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Missing configuration: {0}")]
    Missing(String),

    #[error("Invalid configuration for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// A block whose payload could not be read.
///
/// Never propagated: the converter logs it and emits an empty fragment.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Notion {block_type} block {block_id} is malformed: {reason}")]
pub struct MalformedBlockError {
    pub block_id: String,
    pub block_type: &'static str,
    pub reason: String,
}

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Filesystem IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Remote(err.into())
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Config(err.into())
    }
}
