//! Error types for the Porter client

use porter_core::dto::error::ErrorBody;
use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when using the Porter client
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// API returned an error status code
    #[error("API error (status {status}, {code}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error kind reported by the server (e.g. `invalid_job_state`)
        code: String,
        /// Reason code refining `code`, if any
        reason: Option<String>,
        /// Error message from the API
        message: String,
    },

    /// Failed to parse response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Invalid request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ClientError {
    /// Create an API error from status code and the raw response body
    ///
    /// Bodies that are not a server error document are kept verbatim as the message.
    pub fn api_error(status: u16, body: &str) -> Self {
        match serde_json::from_str::<ErrorBody>(body) {
            Ok(error) => Self::ApiError {
                status,
                code: error.code,
                reason: error.reason,
                message: error.error,
            },
            Err(_) => Self::ApiError {
                status,
                code: "unknown".to_string(),
                reason: None,
                message: body.to_string(),
            },
        }
    }

    /// Error kind reported by the server, if this is an API error
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::ApiError { code, .. } => Some(code),
            _ => None,
        }
    }

    /// Check if this error is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ApiError { status: 404, .. })
    }

    /// Check if the job was not in a state that allows the request
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::ApiError { status: 409, .. })
    }

    /// Check if this error is a client error (4xx status)
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::ApiError { status, .. } if *status >= 400 && *status < 500)
    }

    /// Check if this error is a server error (5xx status)
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::ApiError { status, .. } if *status >= 500)
    }
}
