//! Authorization data
//!
//! Credential and handshake material attached to a job for one side of the
//! transfer. The payload is opaque to Porter; only its stage matters.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Authorization material for one service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "stage", content = "data", rename_all = "snake_case")]
pub enum AuthData {
    /// Provisional handshake state stored before redirecting the user
    /// (e.g. a temporary credential pair).
    Initial(JsonValue),

    /// Credentials obtained once the user has granted access.
    Final(JsonValue),
}

impl AuthData {
    pub fn initial(data: impl Into<JsonValue>) -> Self {
        AuthData::Initial(data.into())
    }

    pub fn finalized(data: impl Into<JsonValue>) -> Self {
        AuthData::Final(data.into())
    }

    pub fn is_initial(&self) -> bool {
        matches!(self, AuthData::Initial(_))
    }

    /// The opaque payload regardless of stage
    pub fn payload(&self) -> &JsonValue {
        match self {
            AuthData::Initial(data) | AuthData::Final(data) => data,
        }
    }
}
