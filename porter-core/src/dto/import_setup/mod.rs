//! Import setup DTOs

use serde::{Deserialize, Serialize};

/// Response to `GET /_/importSetup`
///
/// Everything the front-end needs to send the user to the import service's
/// consent page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSetupResponse {
    pub data_type: String,
    pub export_service: String,
    pub import_service: String,
    pub import_auth_url: String,
}
