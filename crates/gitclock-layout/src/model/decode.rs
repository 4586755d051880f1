//! Schema-validated decoding of layout JSON.
//!
//! The top level must be an object. Keys that are not a known widget are
//! dropped and reported; a known key whose value is not a valid layout
//! rejects the whole document.

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use std::fmt;
use tracing::debug;

use crate::error::LayoutError;
use crate::widget::WidgetId;

use super::types::{Layout, LayoutMap};

/// Result of decoding: the accepted entries plus any keys that were dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodedLayout {
    pub map: LayoutMap,
    pub dropped: Vec<String>,
}

struct DecodedVisitor;

impl<'de> Visitor<'de> for DecodedVisitor {
    type Value = DecodedLayout;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an object mapping widget names to layouts")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut decoded = DecodedLayout::default();
        while let Some(key) = access.next_key::<String>()? {
            match key.parse::<WidgetId>() {
                Ok(id) => {
                    let layout: Layout = access.next_value()?;
                    if !layout.is_valid() {
                        return Err(de::Error::custom(format!(
                            "{id}: scale must be positive and values finite"
                        )));
                    }
                    decoded.map.insert(id, layout);
                }
                Err(_) => {
                    access.next_value::<de::IgnoredAny>()?;
                    decoded.dropped.push(key);
                }
            }
        }
        Ok(decoded)
    }
}

impl<'de> Deserialize<'de> for DecodedLayout {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(DecodedVisitor)
    }
}

impl<'de> Deserialize<'de> for LayoutMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(DecodedLayout::deserialize(deserializer)?.map)
    }
}

impl DecodedLayout {
    /// Decode a layout document, keeping known widgets and dropping the rest.
    pub fn from_json(json: &str) -> Result<Self, LayoutError> {
        let decoded: DecodedLayout =
            serde_json::from_str(json).map_err(|e| LayoutError::Decode(e.to_string()))?;
        if !decoded.dropped.is_empty() {
            debug!(dropped = ?decoded.dropped, "ignored unknown widget keys");
        }
        Ok(decoded)
    }
}
