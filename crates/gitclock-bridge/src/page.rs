//! The browser editor served at `/`.
//!
//! The page is static HTML with the anchor table, defaults, screen size and
//! scale bounds substituted in from the same Rust tables the device uses,
//! so both editors place widgets identically.

use gitclock_layout::{LayoutMap, ScaleLimits, ScreenGeometry, WidgetId, WidgetSize};
use serde_json::{json, Map, Value};

const TEMPLATE: &str = include_str!("../assets/editor.html");

pub fn render(geometry: ScreenGeometry, layout: &LayoutMap, limits: ScaleLimits) -> String {
    TEMPLATE
        .replace("__ANCHORS__", &anchors_json().to_string())
        .replace("__DEFAULTS__", &defaults_json().to_string())
        .replace("__LAYOUT__", &layout.to_json())
        .replace("__SCREEN_W__", &geometry.width.to_string())
        .replace("__SCREEN_H__", &geometry.height.to_string())
        .replace("__MIN_SCALE__", &limits.min.to_string())
        .replace("__MAX_SCALE__", &limits.max.to_string())
}

fn anchors_json() -> Value {
    let mut anchors = Map::new();
    for id in WidgetId::ALL {
        let anchor = id.anchor();
        let size = match anchor.size {
            WidgetSize::Fixed { width, height } => json!({ "w": width, "h": height }),
            WidgetSize::SpanWidth {
                inset,
                height_ratio,
            } => json!({ "inset": inset, "ratio": height_ratio }),
        };
        anchors.insert(
            id.as_str().to_string(),
            json!({
                "ax": anchor.horizontal.factor(),
                "ay": anchor.vertical.factor(),
                "size": size,
            }),
        );
    }
    Value::Object(anchors)
}

fn defaults_json() -> Value {
    let defaults: Map<String, Value> = WidgetId::ALL
        .into_iter()
        .map(|id| {
            let layout = id.default_layout();
            (
                id.as_str().to_string(),
                json!({ "x": layout.x, "y": layout.y, "scale": layout.scale, "rotation": layout.rotation }),
            )
        })
        .collect();
    Value::Object(defaults)
}
