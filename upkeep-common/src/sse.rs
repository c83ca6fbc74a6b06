//! Server-Sent Events (SSE) utilities
//!
//! Shared SSE stream construction for Upkeep modules.

use crate::events::EventBus;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream::Stream;
use std::convert::Infallible;
use std::time::Duration;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(15);

/// Create an SSE stream carrying console events plus connection heartbeats
///
/// Sends an initial `ConnectionStatus: connected` event, then forwards every
/// [`crate::events::ConsoleEvent`] emitted on the bus. A heartbeat comment
/// goes out after 15 quiet seconds so proxies keep the connection open.
///
/// # Arguments
/// * `service_name` - Name of the service for logging (e.g., "upkeep-ui")
/// * `bus` - Event bus to forward events from
pub fn create_event_sse_stream(
    service_name: &'static str,
    bus: &EventBus,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    info!("New SSE client connected to {} events", service_name);

    let mut rx = bus.subscribe();

    let stream = async_stream::stream! {
        debug!("SSE: {} event stream started", service_name);

        // Send initial connected status
        yield Ok(Event::default()
            .event("ConnectionStatus")
            .data("connected"));

        loop {
            match tokio::time::timeout(HEARTBEAT_INTERVAL, rx.recv()).await {
                Ok(Ok(event)) => match serde_json::to_string(&event) {
                    Ok(payload) => {
                        yield Ok(Event::default()
                            .event(event.event_type())
                            .data(payload));
                    }
                    Err(e) => {
                        warn!("SSE: Failed to serialize {}: {}", event.event_type(), e);
                    }
                },
                Ok(Err(broadcast::error::RecvError::Lagged(skipped))) => {
                    warn!("SSE: Client lagged, skipped {} events", skipped);
                }
                Ok(Err(broadcast::error::RecvError::Closed)) => break,
                Err(_elapsed) => {
                    debug!("SSE: Sending heartbeat");
                    yield Ok(Event::default().comment("heartbeat"));
                }
            }
        }
    };

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(HEARTBEAT_INTERVAL)
            .text("heartbeat"),
    )
}
