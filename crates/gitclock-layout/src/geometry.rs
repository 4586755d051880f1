//! Process-wide rendering surface size.

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::debug;

/// Size of the rendering surface in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenGeometry {
    pub width: u32,
    pub height: u32,
}

impl ScreenGeometry {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for ScreenGeometry {
    fn default() -> Self {
        Self::new(1920, 1080)
    }
}

/// Publishes the latest measured [`ScreenGeometry`] to both editors.
///
/// Backed by a `watch` channel: readers always see the most recent size,
/// and repeated measurements of the same size do not wake subscribers.
pub struct ScreenGeometryPublisher {
    tx: watch::Sender<ScreenGeometry>,
}

impl ScreenGeometryPublisher {
    pub fn new(initial: ScreenGeometry) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    /// Record a new measurement. Returns `true` if the size changed.
    pub fn publish(&self, width: u32, height: u32) -> bool {
        let next = ScreenGeometry::new(width, height);
        let changed = self.tx.send_if_modified(|current| {
            if *current == next {
                false
            } else {
                *current = next;
                true
            }
        });
        if changed {
            debug!(width, height, "screen geometry updated");
        }
        changed
    }

    pub fn current(&self) -> ScreenGeometry {
        *self.tx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<ScreenGeometry> {
        self.tx.subscribe()
    }
}

impl Default for ScreenGeometryPublisher {
    fn default() -> Self {
        Self::new(ScreenGeometry::default())
    }
}
