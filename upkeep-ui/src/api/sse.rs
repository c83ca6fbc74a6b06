//! Server-Sent Events (SSE) for console events and connection status

use crate::AppState;
use axum::{
    extract::State,
    response::sse::{Event, Sse},
};
use futures::stream::Stream;
use std::convert::Infallible;

/// GET /api/events - SSE stream of console events
///
/// Streams events:
/// - ConnectionStatus (initial handshake plus heartbeats)
/// - VersionChecked / UpgradeTriggered / UpgradeFailed
pub async fn event_stream(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    upkeep_common::sse::create_event_sse_stream("upkeep-ui", &state.events)
}
