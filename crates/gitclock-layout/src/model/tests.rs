//! Tests for the layout model and its decoding.

use super::*;
use crate::error::LayoutError;
use crate::widget::WidgetId;

#[test]
fn layout_defaults_to_unit_scale() {
    let layout = Layout::default();
    assert_eq!(layout, Layout::new(0.0, 0.0, 1.0));
}

#[test]
fn missing_fields_take_defaults() {
    let decoded = DecodedLayout::from_json(r#"{"CLOCK":{"x":10}}"#).unwrap();
    let clock = decoded.map.entry(WidgetId::Clock).unwrap();
    assert_eq!(*clock, Layout::new(10.0, 0.0, 1.0));
}

#[test]
fn extra_fields_on_a_layout_are_ignored() {
    // Older writers stored the widget id inside each entry.
    let decoded =
        DecodedLayout::from_json(r#"{"BATTERY":{"id":"BATTERY","x":1,"y":2,"scale":1.5,"rotation":0}}"#)
            .unwrap();
    assert_eq!(
        decoded.map.entry(WidgetId::Battery),
        Some(&Layout::new(1.0, 2.0, 1.5))
    );
}

#[test]
fn unknown_keys_are_dropped_and_reported() {
    let decoded =
        DecodedLayout::from_json(r#"{"CLOCK":{"x":1},"WEATHER":{"x":2},"NOTES":[1,2]}"#).unwrap();
    assert_eq!(decoded.map.len(), 1);
    assert_eq!(decoded.dropped, vec!["WEATHER".to_string(), "NOTES".to_string()]);
}

#[test]
fn non_object_top_level_is_rejected() {
    for json in ["[]", "42", "\"CLOCK\"", "null"] {
        assert!(
            matches!(DecodedLayout::from_json(json), Err(LayoutError::Decode(_))),
            "{json} should be rejected"
        );
    }
}

#[test]
fn corrupt_json_is_rejected() {
    assert!(DecodedLayout::from_json("{\"CLOCK\":").is_err());
    assert!(DecodedLayout::from_json("").is_err());
}

#[test]
fn invalid_value_for_known_key_rejects_document() {
    assert!(DecodedLayout::from_json(r#"{"CLOCK":{"x":"left"}}"#).is_err());
    assert!(DecodedLayout::from_json(r#"{"CLOCK":{"scale":0}}"#).is_err());
    assert!(DecodedLayout::from_json(r#"{"CLOCK":{"scale":-2}}"#).is_err());
    assert!(DecodedLayout::from_json(r#"{"CLOCK":null}"#).is_err());
}

#[test]
fn empty_object_is_an_empty_map() {
    let decoded = DecodedLayout::from_json("{}").unwrap();
    assert!(decoded.map.is_empty());
    assert!(decoded.dropped.is_empty());
}

#[test]
fn map_serializes_with_wire_names_and_all_fields() {
    let map: LayoutMap = [(WidgetId::CommitBoard, Layout::new(1.0, -2.0, 1.0))]
        .into_iter()
        .collect();
    assert_eq!(
        map.to_json(),
        r#"{"COMMIT_BOARD":{"x":1.0,"y":-2.0,"scale":1.0,"rotation":0.0}}"#
    );
}

#[test]
fn resolve_falls_back_to_default() {
    let map = LayoutMap::new();
    assert_eq!(map.resolve(WidgetId::Clock), WidgetId::Clock.default_layout());
}

#[test]
fn merge_overwrites_only_given_entries() {
    let mut base: LayoutMap = [
        (WidgetId::Clock, Layout::new(1.0, 1.0, 1.0)),
        (WidgetId::Stats, Layout::new(2.0, 2.0, 2.0)),
    ]
    .into_iter()
    .collect();
    let patch: LayoutMap = [(WidgetId::Clock, Layout::new(9.0, 9.0, 1.0))]
        .into_iter()
        .collect();

    base.merge(&patch);
    assert_eq!(base.entry(WidgetId::Clock), Some(&Layout::new(9.0, 9.0, 1.0)));
    assert_eq!(base.entry(WidgetId::Stats), Some(&Layout::new(2.0, 2.0, 2.0)));
}

#[test]
fn layout_map_deserializes_through_lenient_path() {
    let map: LayoutMap = serde_json::from_str(r#"{"STATS":{"y":-5},"BOGUS":{}}"#).unwrap();
    assert_eq!(map.len(), 1);
    assert_eq!(map.entry(WidgetId::Stats), Some(&Layout::new(0.0, -5.0, 1.0)));
}
