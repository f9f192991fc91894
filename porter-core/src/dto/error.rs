//! Error response body

use serde::{Deserialize, Serialize};

/// JSON body returned with every non-success response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human readable message
    pub error: String,
    /// Stable machine readable error kind (e.g. `invalid_job_state`)
    pub code: String,
    /// Reason code refining `code`, when the error kind has one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}
