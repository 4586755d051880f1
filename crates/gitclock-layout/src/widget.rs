//! Widget identities and their static anchor metadata.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::model::Layout;

/// One positionable element on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WidgetId {
    Clock,
    Battery,
    Stats,
    CommitBoard,
}

impl WidgetId {
    pub const ALL: [WidgetId; 4] = [
        WidgetId::Clock,
        WidgetId::Battery,
        WidgetId::Stats,
        WidgetId::CommitBoard,
    ];

    /// Wire name used as the JSON key.
    pub fn as_str(self) -> &'static str {
        match self {
            WidgetId::Clock => "CLOCK",
            WidgetId::Battery => "BATTERY",
            WidgetId::Stats => "STATS",
            WidgetId::CommitBoard => "COMMIT_BOARD",
        }
    }

    pub fn anchor(self) -> AnchorSpec {
        match self {
            WidgetId::Battery => AnchorSpec {
                horizontal: Edge::Start,
                vertical: Edge::Start,
                size: WidgetSize::Fixed {
                    width: 200.0,
                    height: 80.0,
                },
            },
            WidgetId::Clock => AnchorSpec {
                horizontal: Edge::End,
                vertical: Edge::Start,
                size: WidgetSize::Fixed {
                    width: 300.0,
                    height: 150.0,
                },
            },
            WidgetId::Stats => AnchorSpec {
                horizontal: Edge::Center,
                vertical: Edge::End,
                size: WidgetSize::Fixed {
                    width: 350.0,
                    height: 70.0,
                },
            },
            WidgetId::CommitBoard => AnchorSpec {
                horizontal: Edge::Center,
                vertical: Edge::End,
                size: WidgetSize::SpanWidth {
                    inset: 40.0,
                    height_ratio: 0.072,
                },
            },
        }
    }

    /// Built-in offset used while the store has no entry for this widget.
    pub fn default_layout(self) -> Layout {
        let (x, y) = match self {
            WidgetId::Battery => (0.0, 0.0),
            WidgetId::Clock => (0.0, 200.0),
            WidgetId::Stats => (0.0, -210.0),
            WidgetId::CommitBoard => (0.0, 0.0),
        };
        Layout {
            x,
            y,
            ..Layout::default()
        }
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown widget: {0}")]
pub struct UnknownWidget(pub String);

impl FromStr for WidgetId {
    type Err = UnknownWidget;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WidgetId::ALL
            .into_iter()
            .find(|id| id.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownWidget(s.to_string()))
    }
}

/// Which side of an axis a widget is pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    Start,
    Center,
    End,
}

impl Edge {
    /// Fraction of the free space that sits before the widget (0, 0.5, 1).
    pub fn factor(self) -> f64 {
        match self {
            Edge::Start => 0.0,
            Edge::Center => 0.5,
            Edge::End => 1.0,
        }
    }
}

/// Nominal rendered size of a widget.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WidgetSize {
    Fixed { width: f64, height: f64 },
    /// Spans the screen width minus `inset`; height follows the width.
    SpanWidth { inset: f64, height_ratio: f64 },
}

/// Static per-widget placement metadata. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnchorSpec {
    pub horizontal: Edge,
    pub vertical: Edge,
    pub size: WidgetSize,
}

impl AnchorSpec {
    /// Rendered `(width, height)` on a screen of the given width.
    pub fn extent(&self, screen_width: f64) -> (f64, f64) {
        match self.size {
            WidgetSize::Fixed { width, height } => (width, height),
            WidgetSize::SpanWidth {
                inset,
                height_ratio,
            } => {
                let width = (screen_width - inset).max(0.0);
                (width, width * height_ratio)
            }
        }
    }
}
