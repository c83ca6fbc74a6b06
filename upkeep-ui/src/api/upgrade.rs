//! Upgrade trigger endpoint

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde_json::json;
use tracing::{info, warn};
use upkeep_common::api::ErrorResponse;
use upkeep_common::events::ConsoleEvent;

use crate::AppState;

/// POST /api/upgrade
///
/// Dispatches the upgrade workflow through the launcher collaborator.
/// Returns 202 once the dispatch is accepted; the workflow itself updates,
/// rebuilds, and swaps the application out of band. Failures come back as
/// 502 so the page can re-enable the action for a retry.
pub async fn trigger_upgrade(State(state): State<AppState>) -> Response {
    match state.launcher.dispatch().await {
        Ok(()) => {
            info!(workflow = %state.config.workflow, "Upgrade workflow triggered");

            state.events.emit_lossy(ConsoleEvent::UpgradeTriggered {
                workflow: state.config.workflow.clone(),
                timestamp: Utc::now(),
            });

            (
                StatusCode::ACCEPTED,
                Json(json!({
                    "status": "triggered",
                    "workflow": state.config.workflow,
                })),
            )
                .into_response()
        }
        Err(e) => {
            warn!("Upgrade trigger failed: {}", e);

            state.events.emit_lossy(ConsoleEvent::UpgradeFailed {
                message: e.to_string(),
                timestamp: Utc::now(),
            });

            (
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse::new("upgrade_trigger_failed", e.to_string())),
            )
                .into_response()
        }
    }
}
