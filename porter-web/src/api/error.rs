//! API Error Handling
//!
//! Unified error types and conversion for API responses. Every error body
//! carries a stable `code` so clients can tell failure kinds apart.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use porter_core::dto::error::ErrorBody;

use crate::repository::StoreError;
use crate::service::{ImportSetupError, InvalidStateReason};

/// API error type
#[derive(Debug)]
pub enum ApiError {
    InvalidToken(String),
    NotFound(String),
    InvalidJobState {
        reason: InvalidStateReason,
        message: String,
    },
    UnsupportedCapability(String),
    GeneratorFailed(String),
    PersistenceError(StoreError),
}

impl ApiError {
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::InvalidToken(_) => "invalid_token",
            ApiError::NotFound(_) => "job_not_found",
            ApiError::InvalidJobState { .. } => "invalid_job_state",
            ApiError::UnsupportedCapability(_) => "unsupported_capability",
            ApiError::GeneratorFailed(_) => "generator_failed",
            ApiError::PersistenceError(_) => "persistence_failed",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.code().to_string();
        let (status, message, reason) = match self {
            ApiError::InvalidToken(msg) => (StatusCode::BAD_REQUEST, msg, None),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
            ApiError::InvalidJobState { reason, message } => {
                (StatusCode::CONFLICT, message, Some(reason.code().to_string()))
            }
            ApiError::UnsupportedCapability(msg) => {
                tracing::error!("Capability missing: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg, None)
            }
            ApiError::GeneratorFailed(msg) => {
                tracing::error!("Generator error: {}", msg);
                (StatusCode::BAD_GATEWAY, msg, None)
            }
            ApiError::PersistenceError(err) => {
                tracing::error!("Job store error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    None,
                )
            }
        };

        let body = ErrorBody {
            error: message,
            code,
            reason,
        };
        (status, Json(body)).into_response()
    }
}

impl From<ImportSetupError> for ApiError {
    fn from(err: ImportSetupError) -> Self {
        let message = err.to_string();
        match err {
            ImportSetupError::InvalidToken(_) => ApiError::InvalidToken(message),
            ImportSetupError::JobNotFound(_) => ApiError::NotFound(message),
            ImportSetupError::InvalidJobState { reason, .. } => {
                ApiError::InvalidJobState { reason, message }
            }
            ImportSetupError::UnsupportedCapability { .. } => {
                ApiError::UnsupportedCapability(message)
            }
            ImportSetupError::DownstreamGenerator(_) => ApiError::GeneratorFailed(message),
            ImportSetupError::Persistence(err) => ApiError::PersistenceError(err),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
