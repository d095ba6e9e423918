//! Lifecycle event vocabulary and broadcast source.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Default broadcast capacity; lifecycle events are rare, this only matters
/// for a receiver that stops draining.
pub const DEFAULT_EVENT_CAPACITY: usize = 32;

/// A transition of the application's foreground surface, as reported by the
/// host environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleEvent {
    Create,
    Start,
    Resume,
    Pause,
    Stop,
    Destroy,
}

impl LifecycleEvent {
    /// Whether this event should trigger a state resolution.
    ///
    /// `Create` precedes any visible surface and carries no run-state
    /// information, so it is ignored.
    pub fn triggers_resolution(&self) -> bool {
        !matches!(self, LifecycleEvent::Create)
    }
}

/// Broadcast source of lifecycle events.
///
/// Cloneable handle; every subscriber sees every event emitted after its
/// subscription. Emitting with no subscribers is not an error.
#[derive(Clone)]
pub struct LifecycleEvents {
    tx: broadcast::Sender<LifecycleEvent>,
}

impl Default for LifecycleEvents {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_CAPACITY)
    }
}

impl LifecycleEvents {
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Emit an event to all current subscribers.
    ///
    /// Returns the number of subscribers that received it.
    pub fn emit(&self, event: LifecycleEvent) -> usize {
        match self.tx.send(event) {
            Ok(receivers) => receivers,
            Err(broadcast::error::SendError(_)) => {
                tracing::trace!(?event, "lifecycle event dropped, no subscribers");
                0
            }
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<LifecycleEvent> {
        self.tx.subscribe()
    }
}
