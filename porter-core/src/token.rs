//! Job tokens
//!
//! A job token is the transport-safe form of a job id handed to the user agent
//! (in a cookie) and to authorization providers (as callback state). The
//! encoding is URL-safe base64 without padding over the hyphenated UUID.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use thiserror::Error;
use uuid::Uuid;

/// Failure to turn a token back into a job id
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("job token is empty")]
    Empty,

    #[error("job token is not valid base64")]
    Malformed,

    #[error("job token does not decode to text")]
    NotUtf8,

    #[error("job token decodes to an empty job id")]
    EmptyId,

    #[error("job token does not contain a valid job id")]
    InvalidId,
}

/// Encode a job id as a token
pub fn encode(job_id: Uuid) -> String {
    URL_SAFE_NO_PAD.encode(job_id.hyphenated().to_string())
}

/// Decode a token produced by [`encode`]
pub fn decode(token: &str) -> Result<Uuid, TokenError> {
    let token = token.trim();
    if token.is_empty() {
        return Err(TokenError::Empty);
    }

    let bytes = URL_SAFE_NO_PAD
        .decode(token)
        .map_err(|_| TokenError::Malformed)?;
    let id = String::from_utf8(bytes).map_err(|_| TokenError::NotUtf8)?;
    let id = id.trim();
    if id.is_empty() {
        return Err(TokenError::EmptyId);
    }

    Uuid::parse_str(id).map_err(|_| TokenError::InvalidId)
}
