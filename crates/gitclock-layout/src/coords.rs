//! Anchor-relative offset ↔ absolute pixel conversion.
//!
//! Every function here is pure and total: any finite input, including
//! negative offsets and zero-sized screens, yields a finite result.

use serde::{Deserialize, Serialize};

use crate::geometry::ScreenGeometry;
use crate::model::Layout;
use crate::widget::{AnchorSpec, Edge};

/// Top-left corner of a widget's unscaled box, in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub left: f64,
    pub top: f64,
}

/// Where and how large a widget is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    /// Applied around the box centre.
    pub scale: f64,
}

fn axis_origin(edge: Edge, screen: f64, extent: f64) -> f64 {
    (screen - extent) * edge.factor()
}

/// Resolve a stored offset against its anchor on a given screen.
pub fn to_absolute(layout: &Layout, anchor: &AnchorSpec, screen: ScreenGeometry) -> Position {
    let screen_w = f64::from(screen.width);
    let screen_h = f64::from(screen.height);
    let (w, h) = anchor.extent(screen_w);
    Position {
        left: axis_origin(anchor.horizontal, screen_w, w) + layout.x,
        top: axis_origin(anchor.vertical, screen_h, h) + layout.y,
    }
}

/// Inverse of [`to_absolute`]: the offset that puts the box at `position`.
pub fn to_offset(position: Position, anchor: &AnchorSpec, screen: ScreenGeometry) -> (f64, f64) {
    let screen_w = f64::from(screen.width);
    let screen_h = f64::from(screen.height);
    let (w, h) = anchor.extent(screen_w);
    (
        position.left - axis_origin(anchor.horizontal, screen_w, w),
        position.top - axis_origin(anchor.vertical, screen_h, h),
    )
}

pub fn placement(layout: &Layout, anchor: &AnchorSpec, screen: ScreenGeometry) -> Placement {
    let Position { left, top } = to_absolute(layout, anchor, screen);
    let (width, height) = anchor.extent(f64::from(screen.width));
    Placement {
        left,
        top,
        width,
        height,
        scale: layout.scale,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::{WidgetId, WidgetSize};

    fn layout(x: f64, y: f64) -> Layout {
        Layout {
            x,
            y,
            ..Layout::default()
        }
    }

    fn fixed(horizontal: Edge, vertical: Edge) -> AnchorSpec {
        AnchorSpec {
            horizontal,
            vertical,
            size: WidgetSize::Fixed {
                width: 100.0,
                height: 50.0,
            },
        }
    }

    #[test]
    fn start_anchor_uses_offset_directly() {
        let pos = to_absolute(
            &layout(12.0, 7.0),
            &fixed(Edge::Start, Edge::Start),
            ScreenGeometry::new(800, 600),
        );
        assert_eq!(pos, Position { left: 12.0, top: 7.0 });
    }

    #[test]
    fn end_anchor_subtracts_extent() {
        let pos = to_absolute(
            &layout(-10.0, 5.0),
            &fixed(Edge::End, Edge::End),
            ScreenGeometry::new(800, 600),
        );
        assert_eq!(pos, Position { left: 690.0, top: 555.0 });
    }

    #[test]
    fn center_anchor_halves_free_space() {
        let pos = to_absolute(
            &layout(3.0, 0.0),
            &fixed(Edge::Center, Edge::Center),
            ScreenGeometry::new(800, 600),
        );
        assert_eq!(pos, Position { left: 353.0, top: 275.0 });
    }

    #[test]
    fn anchor_invariance_across_screens() {
        let stored = layout(-25.0, 40.0);
        let g1 = ScreenGeometry::new(1920, 1080);
        let g2 = ScreenGeometry::new(1280, 800);

        for id in [WidgetId::Battery, WidgetId::Clock, WidgetId::Stats] {
            let anchor = id.anchor();
            let p1 = to_absolute(&stored, &anchor, g1);
            let p2 = to_absolute(&stored, &anchor, g2);

            let dw = f64::from(g1.width) - f64::from(g2.width);
            let dh = f64::from(g1.height) - f64::from(g2.height);
            assert!((p1.left - p2.left - dw * anchor.horizontal.factor()).abs() < 1e-9);
            assert!((p1.top - p2.top - dh * anchor.vertical.factor()).abs() < 1e-9);

            // The offset recovered on either screen is the stored one.
            assert_eq!(to_offset(p1, &anchor, g1), (stored.x, stored.y));
            assert_eq!(to_offset(p2, &anchor, g2), (stored.x, stored.y));
        }
    }

    #[test]
    fn degenerate_screen_is_finite() {
        for id in WidgetId::ALL {
            let pos = to_absolute(&layout(-1e6, 1e6), &id.anchor(), ScreenGeometry::new(0, 0));
            assert!(pos.left.is_finite());
            assert!(pos.top.is_finite());
        }
    }

    #[test]
    fn commit_board_spans_screen() {
        let p = placement(
            &WidgetId::CommitBoard.default_layout(),
            &WidgetId::CommitBoard.anchor(),
            ScreenGeometry::new(1040, 600),
        );
        assert!((p.width - 1000.0).abs() < 1e-9);
        assert!((p.left - 20.0).abs() < 1e-9);
        assert!((p.top - (600.0 - 72.0)).abs() < 1e-9);
    }

    #[test]
    fn placement_carries_scale() {
        let mut stored = layout(0.0, 0.0);
        stored.scale = 1.5;
        let p = placement(&stored, &WidgetId::Clock.anchor(), ScreenGeometry::new(800, 480));
        assert_eq!(p.scale, 1.5);
        assert_eq!((p.width, p.height), (300.0, 150.0));
        assert_eq!(p.left, 500.0);
    }
}
