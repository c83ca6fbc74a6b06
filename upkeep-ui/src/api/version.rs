//! Version check endpoint

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use tracing::warn;
use upkeep_common::api::ErrorResponse;
use upkeep_common::events::ConsoleEvent;

use crate::AppState;

/// GET /api/version
///
/// Asks the release collaborator for the installed and latest published
/// version. Upstream failures surface as 502 and a WARN log line; the page
/// deliberately keeps a neutral card in that case, so the log is the only
/// place the failure shows up.
pub async fn get_version(State(state): State<AppState>) -> Response {
    match state.releases.check().await {
        Ok(info) => {
            state.events.emit_lossy(ConsoleEvent::VersionChecked {
                installed: info.version.clone(),
                available: info.update_available.clone(),
                timestamp: Utc::now(),
            });

            Json(info).into_response()
        }
        Err(e) => {
            warn!("Version check failed: {}", e);

            (
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse::new("version_check_failed", e.to_string())),
            )
                .into_response()
        }
    }
}
