use std::sync::Arc;

use gitclock_platform::{MemoryPreferences, PreferenceStore};

use super::*;
use crate::error::SessionError;
use crate::model::{Layout, LayoutMap};
use crate::store::{LayoutStore, LAYOUT_KEY};
use crate::widget::WidgetId;

fn setup() -> (Arc<MemoryPreferences>, Arc<LayoutStore>, GestureSession) {
    let prefs = Arc::new(MemoryPreferences::new());
    let store = Arc::new(LayoutStore::open(prefs.clone()));
    let session = GestureSession::new(store.clone(), ScaleLimits::default());
    (prefs, store, session)
}

// =============================================================================
// State machine
// =============================================================================

#[test]
fn starts_idle() {
    let (_, _, session) = setup();
    assert_eq!(session.state(), SessionState::Idle);
}

#[test]
fn gestures_require_edit_mode() {
    let (_, _, mut session) = setup();
    assert!(matches!(
        session.begin_gesture(WidgetId::Clock),
        Err(SessionError::NotEditing)
    ));
    assert!(matches!(session.save(), Err(SessionError::NotEditing)));
    assert!(matches!(session.cancel(), Err(SessionError::NotEditing)));
}

#[test]
fn entering_twice_is_rejected() {
    let (_, _, mut session) = setup();
    session.enter_edit().unwrap();
    assert!(matches!(
        session.enter_edit(),
        Err(SessionError::AlreadyEditing)
    ));
}

#[test]
fn one_gesture_at_a_time() {
    let (_, _, mut session) = setup();
    session.enter_edit().unwrap();
    session.begin_gesture(WidgetId::Clock).unwrap();
    assert!(matches!(
        session.begin_gesture(WidgetId::Battery),
        Err(SessionError::GestureInProgress(WidgetId::Clock))
    ));
    session.end_gesture().unwrap();
    session.begin_gesture(WidgetId::Battery).unwrap();
}

#[test]
fn update_without_gesture_fails() {
    let (_, _, mut session) = setup();
    session.enter_edit().unwrap();
    assert!(matches!(
        session.update_gesture(1.0, 1.0, 1.0),
        Err(SessionError::NoActiveGesture)
    ));
}

// =============================================================================
// Delta accumulation
// =============================================================================

#[test]
fn pans_accumulate_from_start_position() {
    let (_, store, mut session) = setup();
    session.enter_edit().unwrap();
    session.begin_gesture(WidgetId::Clock).unwrap();
    session.update_gesture(5.0, -3.0, 1.0).unwrap();
    let layout = session.update_gesture(5.0, -3.0, 1.0).unwrap();

    let start = WidgetId::Clock.default_layout();
    assert_eq!(layout.x, start.x + 10.0);
    assert_eq!(layout.y, start.y - 6.0);
    assert_eq!(store.get(WidgetId::Clock), layout);
}

#[test]
fn pinch_is_clamped() {
    let (_, _, mut session) = setup();
    session.enter_edit().unwrap();
    session.begin_gesture(WidgetId::Stats).unwrap();
    let grown = session.update_gesture(0.0, 0.0, 10.0).unwrap();
    assert_eq!(grown.scale, 3.0);
    let shrunk = session.update_gesture(0.0, 0.0, 0.001).unwrap();
    assert_eq!(shrunk.scale, 0.5);
}

#[test]
fn invalid_input_is_ignored() {
    let (_, _, mut session) = setup();
    session.enter_edit().unwrap();
    session.begin_gesture(WidgetId::Battery).unwrap();
    let layout = session.update_gesture(f64::NAN, 1.0, -2.0).unwrap();
    assert_eq!(layout, WidgetId::Battery.default_layout());
}

#[test]
fn remote_commit_mid_gesture_keeps_baseline() {
    let (_, store, mut session) = setup();
    session.enter_edit().unwrap();
    session.begin_gesture(WidgetId::Clock).unwrap();
    session.update_gesture(10.0, 0.0, 1.0).unwrap();

    let remote: LayoutMap = [
        (WidgetId::Clock, Layout::new(-500.0, -500.0, 1.0)),
        (WidgetId::Battery, Layout::new(30.0, 40.0, 1.0)),
    ]
    .into_iter()
    .collect();
    store.commit_entries(&remote).unwrap();

    let layout = session.update_gesture(10.0, 0.0, 1.0).unwrap();
    assert_eq!(layout.x, WidgetId::Clock.default_layout().x + 20.0);
    // Other widgets reflect the remote change immediately.
    assert_eq!(store.get(WidgetId::Battery), Layout::new(30.0, 40.0, 1.0));
}

// =============================================================================
// Save and cancel
// =============================================================================

#[test]
fn save_commits_once() {
    let (prefs, store, mut session) = setup();
    session.enter_edit().unwrap();
    session.begin_gesture(WidgetId::Clock).unwrap();
    for _ in 0..100 {
        session.update_gesture(1.0, 1.0, 1.0).unwrap();
    }
    session.end_gesture().unwrap();
    assert_eq!(prefs.get(LAYOUT_KEY).unwrap(), None);

    session.save().unwrap();
    assert!(!session.is_editing());
    store.reload();
    assert_eq!(store.get(WidgetId::Clock).x, 100.0);
}

#[test]
fn drag_then_abandon_restores_committed_map() {
    let (_, store, mut session) = setup();
    store.upsert(WidgetId::Stats, 1.0, 2.0, 1.0);
    store.commit().unwrap();
    let before = store.snapshot();

    session.enter_edit().unwrap();
    session.begin_gesture(WidgetId::Stats).unwrap();
    session.update_gesture(40.0, 40.0, 2.0).unwrap();
    session.cancel().unwrap();

    assert_eq!(store.snapshot(), before);
    assert_eq!(store.committed(), before);
    assert_eq!(session.state(), SessionState::Idle);
}
