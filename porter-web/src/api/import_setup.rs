//! Import Setup API Handler
//!
//! Entry point of the import authorization step, called by the front-end once
//! export authorization has completed.

use axum::{Json, extract::State};
use axum_extra::extract::CookieJar;
use porter_core::dto::import_setup::ImportSetupResponse;

use crate::api::AppState;
use crate::api::error::{ApiError, ApiResult};

/// GET /_/importSetup
/// Start import authorization for the job named by the id cookie
pub async fn import_setup(
    State(state): State<AppState>,
    jar: CookieJar,
) -> ApiResult<Json<ImportSetupResponse>> {
    let token = jar
        .get(&state.id_cookie)
        .map(|cookie| cookie.value().to_string())
        .ok_or_else(|| ApiError::InvalidToken(format!("missing '{}' cookie", state.id_cookie)))?;

    let response = state.import_setup.begin_import_auth(&token).await?;

    tracing::debug!("Import auth url sent to client for {}", response.import_service);

    Ok(Json(response))
}
