use serde::{Deserialize, Serialize};

use crate::model::Layout;
use crate::widget::WidgetId;

/// Allowed range for a widget's scale while pinching.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleLimits {
    pub min: f64,
    pub max: f64,
}

impl ScaleLimits {
    pub fn new(min: f64, max: f64) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    pub fn clamp(&self, scale: f64) -> f64 {
        scale.clamp(self.min, self.max)
    }
}

impl Default for ScaleLimits {
    fn default() -> Self {
        Self { min: 0.5, max: 3.0 }
    }
}

/// One continuous pan/pinch stream on a single widget.
///
/// Deltas accumulate against `start`, the layout captured when the
/// gesture began, so a remote commit landing mid-gesture does not shift
/// the widget under the user's finger.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveGesture {
    pub id: WidgetId,
    pub start: Layout,
    pub pan_x: f64,
    pub pan_y: f64,
    pub zoom: f64,
}

impl ActiveGesture {
    pub fn new(id: WidgetId, start: Layout) -> Self {
        Self {
            id,
            start,
            pan_x: 0.0,
            pan_y: 0.0,
            zoom: 1.0,
        }
    }

    /// Start layout with the accumulated deltas applied.
    pub fn current(&self, limits: ScaleLimits) -> Layout {
        Layout {
            x: self.start.x + self.pan_x,
            y: self.start.y + self.pan_y,
            scale: limits.clamp(self.start.scale * self.zoom),
            rotation: self.start.rotation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Editing { gesture: Option<ActiveGesture> },
}

impl SessionState {
    pub fn is_editing(&self) -> bool {
        matches!(self, SessionState::Editing { .. })
    }
}
