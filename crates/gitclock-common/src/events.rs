use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Which editor produced a durable layout write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommitOrigin {
    /// On-device gesture editor.
    Native,
    /// Browser editor through the HTTP bridge.
    Remote,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Event {
    ConfigReloaded,
    LayoutCommitted { origin: CommitOrigin },
    LayoutReloaded,
    LayoutReset,
    ScreenResized { width: u32, height: u32 },
    BridgeStarted { addr: String },
    BridgeStopped,
    Shutdown,
    #[serde(other)]
    Unknown,
}

pub struct EventBus {
    sender: broadcast::Sender<Event>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.sender.subscribe()
    }

    pub fn publish(&self, event: Event) -> usize {
        tracing::trace!(?event, "publishing event");
        self.sender.send(event).unwrap_or(0)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(64)
    }
}
