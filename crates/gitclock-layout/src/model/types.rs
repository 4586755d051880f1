//! Per-widget layout values and the map keyed by widget.

use std::collections::btree_map;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::widget::WidgetId;

/// A widget's stored offset, scale, and rotation.
///
/// `x`/`y` are relative to the widget's anchor, not the canvas origin.
/// `rotation` is carried through untouched; no widget draws with it yet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Layout {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
    pub rotation: f64,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            scale: 1.0,
            rotation: 0.0,
        }
    }
}

impl Layout {
    pub fn new(x: f64, y: f64, scale: f64) -> Self {
        Self {
            x,
            y,
            scale,
            rotation: 0.0,
        }
    }

    /// Finite offsets and a positive finite scale.
    pub fn is_valid(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.rotation.is_finite()
            && self.scale.is_finite()
            && self.scale > 0.0
    }
}

/// All stored layouts, at most one per widget.
///
/// A missing entry means "use the widget's default", not "hidden".
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct LayoutMap {
    entries: BTreeMap<WidgetId, Layout>,
}

impl LayoutMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored entry, if any.
    pub fn entry(&self, id: WidgetId) -> Option<&Layout> {
        self.entries.get(&id)
    }

    /// Stored entry or the widget's built-in default.
    pub fn resolve(&self, id: WidgetId) -> Layout {
        self.entries
            .get(&id)
            .copied()
            .unwrap_or_else(|| id.default_layout())
    }

    pub fn insert(&mut self, id: WidgetId, layout: Layout) -> Option<Layout> {
        self.entries.insert(id, layout)
    }

    pub fn remove(&mut self, id: WidgetId) -> Option<Layout> {
        self.entries.remove(&id)
    }

    /// Overwrite this map's entries with every entry in `other`.
    pub fn merge(&mut self, other: &LayoutMap) {
        for (id, layout) in other.iter() {
            self.entries.insert(id, *layout);
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (WidgetId, &Layout)> {
        self.entries.iter().map(|(id, layout)| (*id, layout))
    }

    pub fn to_json(&self) -> String {
        // A BTreeMap of plain numbers always serializes.
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

impl FromIterator<(WidgetId, Layout)> for LayoutMap {
    fn from_iter<I: IntoIterator<Item = (WidgetId, Layout)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for LayoutMap {
    type Item = (WidgetId, Layout);
    type IntoIter = btree_map::IntoIter<WidgetId, Layout>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
