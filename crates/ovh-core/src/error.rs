//! Error types for OVHcloud operations.
//!
//! This module provides the error type shared by every OVHcloud crate, including
//! HTTP status code mapping, request/context wrapping and structured error responses.

use serde::Serialize;
use thiserror::Error;

/// Main error type for OVHcloud operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// OVHcloud API is unavailable
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// HTTP transport failed
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Operation timed out
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Failed to parse an API response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Invalid endpoint
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// Non-success answer from the OVHcloud API that has no dedicated variant
    #[error("OVHcloud API error {status}: {message}")]
    ApiError {
        /// HTTP (or OVH specific) status code
        status: u16,
        /// Error message returned by the API
        message: String,
    },

    /// Asynchronous task ended in a failure state
    #[error("task {task_id} for {resource} ended with status `{status}`")]
    TaskFailed {
        /// Resource the task was operating on
        resource: String,
        /// Task identifier
        task_id: i64,
        /// Final task status
        status: String,
    },

    /// A request against a specific endpoint failed
    #[error("calling {method} {endpoint}: {source}")]
    Request {
        /// HTTP verb
        method: String,
        /// Endpoint path
        endpoint: String,
        /// Underlying failure
        source: Box<Error>,
    },

    /// An operation failed with additional context
    #[error("{context}: {source}")]
    Context {
        /// What was being done
        context: String,
        /// Underlying failure
        source: Box<Error>,
    },

    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Specialized result type for OVHcloud operations.
pub type Result<T> = std::result::Result<T, Error>;

/// OVH specific status answered when a service is already being terminated.
pub const STATUS_ALREADY_TERMINATING: u16 = 460;

/// Structured error response for serialization.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ErrorResponse {
    /// Error details
    pub error: ErrorDetail,
    /// Optional request ID for tracing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

/// Error detail structure.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ErrorDetail {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Additional error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl Error {
    /// Returns the error code for this error type.
    ///
    /// Wrapping variants report the code of the error they wrap.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self.root() {
            Self::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
            Self::ConfigError(_) => "CONFIG_ERROR",
            Self::HttpError(_) => "HTTP_ERROR",
            Self::Timeout(_) => "TIMEOUT",
            Self::NotFound(_) => "NOT_FOUND",
            Self::InvalidRequest(_) => "INVALID_REQUEST",
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::ParseError(_) => "PARSE_ERROR",
            Self::InvalidEndpoint(_) => "INVALID_ENDPOINT",
            Self::ApiError { .. } => "API_ERROR",
            Self::TaskFailed { .. } => "TASK_FAILED",
            Self::InternalError(_) | Self::Request { .. } | Self::Context { .. } => {
                "INTERNAL_ERROR"
            }
        }
    }

    /// Wrap this error with a description of the operation that failed.
    #[must_use]
    pub fn context(self, context: impl Into<String>) -> Self {
        Self::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Wrap this error with the HTTP verb and endpoint that produced it.
    #[must_use]
    pub fn for_request(self, method: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self::Request {
            method: method.into(),
            endpoint: endpoint.into(),
            source: Box::new(self),
        }
    }

    /// Follow request and context wrapping down to the original error.
    #[must_use]
    pub fn root(&self) -> &Self {
        let mut current = self;
        while let Self::Request { source, .. } | Self::Context { source, .. } = current {
            current = source.as_ref();
        }
        current
    }

    /// Status code of the underlying API answer, if the error came from one.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self.root() {
            Self::NotFound(_) => Some(404),
            Self::ApiError { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true if the underlying API answer was "not found".
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self.root(), Self::NotFound(_))
    }

    /// Converts the error into an `ErrorResponse`.
    #[must_use]
    pub fn into_error_response(self) -> ErrorResponse {
        self.into_error_response_with_id(None)
    }

    /// Converts the error into an `ErrorResponse` with a request ID.
    #[must_use]
    pub fn into_error_response_with_id(self, request_id: Option<String>) -> ErrorResponse {
        ErrorResponse {
            error: ErrorDetail {
                code: self.error_code().to_string(),
                message: self.to_string(),
                details: self.status_code().map(|status| serde_json::json!({ "status": status })),
            },
            request_id,
        }
    }

    /// Returns true if this error should be logged as a serious error.
    #[must_use]
    pub fn should_log(&self) -> bool {
        matches!(
            self.root(),
            Self::InternalError(_) | Self::ConfigError(_) | Self::TaskFailed { .. }
        )
    }
}

// Conversions from external error types
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_connect() {
            Self::ServiceUnavailable(err.to_string())
        } else {
            Self::HttpError(err.to_string())
        }
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidEndpoint(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::ParseError(err.to_string())
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::ValidationError(err.to_string())
    }
}
