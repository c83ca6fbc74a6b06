//! Event types for the Upkeep event system
//!
//! Events are broadcast via EventBus and serialized for SSE transmission,
//! so a second open copy of the console page stays current.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Console event types
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ConsoleEvent {
    /// A version check against the release feed completed
    VersionChecked {
        /// Installed application version
        installed: String,
        /// Newer published version, if one exists
        available: Option<String>,
        /// When the check completed
        timestamp: DateTime<Utc>,
    },

    /// The upgrade workflow was dispatched
    UpgradeTriggered {
        /// Workflow file that was dispatched
        workflow: String,
        /// When the dispatch was accepted
        timestamp: DateTime<Utc>,
    },

    /// The upgrade workflow dispatch failed
    UpgradeFailed {
        /// Upstream failure description
        message: String,
        /// When the dispatch failed
        timestamp: DateTime<Utc>,
    },
}

impl ConsoleEvent {
    /// Event type name used as the SSE event field
    pub fn event_type(&self) -> &'static str {
        match self {
            ConsoleEvent::VersionChecked { .. } => "VersionChecked",
            ConsoleEvent::UpgradeTriggered { .. } => "UpgradeTriggered",
            ConsoleEvent::UpgradeFailed { .. } => "UpgradeFailed",
        }
    }
}

/// Broadcast bus distributing ConsoleEvents to SSE clients
///
/// Cloning is cheap; all clones share the same channel.
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<ConsoleEvent>,
    capacity: usize,
}

impl EventBus {
    /// Create a new EventBus with the given channel capacity
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx, capacity }
    }

    /// Channel capacity the bus was created with
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Subscribe to all future events
    ///
    /// Events emitted before subscription are not received.
    pub fn subscribe(&self) -> broadcast::Receiver<ConsoleEvent> {
        self.tx.subscribe()
    }

    /// Emit an event to all subscribers
    ///
    /// Returns `Ok(subscriber_count)`, or `Err` if nobody is listening.
    #[allow(clippy::result_large_err)]
    pub fn emit(
        &self,
        event: ConsoleEvent,
    ) -> Result<usize, broadcast::error::SendError<ConsoleEvent>> {
        self.tx.send(event)
    }

    /// Emit an event, ignoring the case where no subscriber is listening
    pub fn emit_lossy(&self, event: ConsoleEvent) {
        if self.tx.send(event).is_err() {
            tracing::debug!("No subscribers for console event");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serialization_tags_type() {
        let event = ConsoleEvent::UpgradeTriggered {
            workflow: "upgrade-event-handler.yml".to_string(),
            timestamp: Utc::now(),
        };

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"UpgradeTriggered\""));
        assert!(json.contains("upgrade-event-handler.yml"));

        let back: ConsoleEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back.event_type(), "UpgradeTriggered");
    }

    #[test]
    fn test_event_type_names() {
        let checked = ConsoleEvent::VersionChecked {
            installed: "1.0.0".to_string(),
            available: None,
            timestamp: Utc::now(),
        };
        let failed = ConsoleEvent::UpgradeFailed {
            message: "boom".to_string(),
            timestamp: Utc::now(),
        };

        assert_eq!(checked.event_type(), "VersionChecked");
        assert_eq!(failed.event_type(), "UpgradeFailed");
    }

    #[tokio::test]
    async fn test_bus_delivers_to_subscriber() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();

        bus.emit(ConsoleEvent::UpgradeFailed {
            message: "denied".to_string(),
            timestamp: Utc::now(),
        })
        .unwrap();

        let event = rx.recv().await.unwrap();
        assert_eq!(event.event_type(), "UpgradeFailed");
    }

    #[test]
    fn test_emit_without_subscribers_errors_but_lossy_does_not_panic() {
        let bus = EventBus::new(16);
        assert_eq!(bus.capacity(), 16);

        let event = ConsoleEvent::VersionChecked {
            installed: "1.0.0".to_string(),
            available: Some("1.1.0".to_string()),
            timestamp: Utc::now(),
        };

        assert!(bus.emit(event.clone()).is_err());
        bus.emit_lossy(event);
    }
}
