use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use gitclock_common::{Event, EventBus};
use gitclock_layout::{
    Layout, LayoutMap, LayoutStore, ScreenGeometry, ScreenGeometryPublisher, WidgetId,
};
use gitclock_platform::MemoryPreferences;
use tokio_util::sync::CancellationToken;

use super::*;
use crate::error::BridgeError;
use crate::routes::BridgeState;
use crate::server::{BridgeHandle, BridgeServer};

async fn start() -> (BridgeState, BridgeHandle, RemoteEditor) {
    let store = Arc::new(LayoutStore::open(Arc::new(MemoryPreferences::new())));
    let geometry = Arc::new(ScreenGeometryPublisher::new(ScreenGeometry::new(1024, 600)));
    let state = BridgeState::new(store, geometry);
    let addr: SocketAddr = "127.0.0.1:0".parse().unwrap();
    let handle = BridgeServer::start(addr, state.clone()).await.unwrap();
    let editor = RemoteEditor::new(handle.url()).unwrap();
    (state, handle, editor)
}

#[tokio::test]
async fn poll_mirrors_device_state() {
    let (state, handle, editor) = start().await;
    state.store.upsert(WidgetId::Clock, 12.0, 34.0, 1.0);
    state.store.commit().unwrap();

    assert_eq!(editor.poll_once().await.unwrap(), PollOutcome::Applied);
    let view = editor.view();
    assert_eq!(view.geometry, ScreenGeometry::new(1024, 600));
    assert_eq!(view.layout.resolve(WidgetId::Clock), Layout::new(12.0, 34.0, 1.0));
    handle.stop().await;
}

#[tokio::test]
async fn drag_suppresses_polled_layout() {
    let (state, handle, editor) = start().await;
    editor.begin_drag(WidgetId::Battery);
    editor.drag_by(10.0, 5.0);

    state.store.upsert(WidgetId::Clock, 1.0, 1.0, 1.0);
    state.store.commit().unwrap();
    state.geometry.publish(800, 480);

    assert_eq!(editor.poll_once().await.unwrap(), PollOutcome::Suppressed);
    let view = editor.view();
    assert!(view.layout.is_empty());
    assert_eq!(view.geometry, ScreenGeometry::new(800, 480));

    let dropped = editor.end_drag().await.unwrap().unwrap();
    assert_eq!(dropped, Layout::new(10.0, 5.0, 1.0));
    assert_eq!(editor.poll_once().await.unwrap(), PollOutcome::Applied);

    let committed = state.store.committed();
    assert_eq!(committed.resolve(WidgetId::Battery), Layout::new(10.0, 5.0, 1.0));
    assert_eq!(committed.resolve(WidgetId::Clock), Layout::new(1.0, 1.0, 1.0));
    handle.stop().await;
}

#[tokio::test]
async fn poll_issued_before_a_drag_does_not_undo_it() {
    let (state, handle, editor) = start().await;

    let issued = editor.generation();
    let stale = editor.fetch_state().await.unwrap();

    editor.begin_drag(WidgetId::Clock);
    editor.drag_by(-40.0, 25.0);
    let dropped = editor.end_drag().await.unwrap().unwrap();

    assert_eq!(editor.apply_poll(issued, stale), PollOutcome::Suppressed);
    assert_eq!(editor.view().layout.resolve(WidgetId::Clock), dropped);

    assert_eq!(editor.poll_once().await.unwrap(), PollOutcome::Applied);
    assert_eq!(editor.view().layout.resolve(WidgetId::Clock), dropped);
    assert_eq!(state.store.committed().resolve(WidgetId::Clock), dropped);
    handle.stop().await;
}

#[tokio::test]
async fn drag_without_begin_is_ignored() {
    let (_, handle, editor) = start().await;
    assert_eq!(editor.drag_by(1.0, 1.0), None);
    assert_eq!(editor.end_drag().await.unwrap(), None);
    handle.stop().await;
}

#[tokio::test]
async fn set_scale_submits_one_widget() {
    let (state, handle, editor) = start().await;
    let layout = editor.set_scale(WidgetId::Stats, 2.0).await.unwrap();
    assert_eq!(layout.scale, 2.0);
    assert_eq!(state.store.committed().len(), 1);
    assert_eq!(state.store.get(WidgetId::Stats).y, -210.0);
    handle.stop().await;
}

#[tokio::test]
async fn rejected_submission_surfaces_error() {
    let (_, handle, editor) = start().await;
    let bad: LayoutMap = [(WidgetId::Clock, Layout::new(0.0, 0.0, -1.0))]
        .into_iter()
        .collect();
    let err = editor.submit(&bad).await.unwrap_err();
    assert!(matches!(err, BridgeError::Rejected(_)));
    handle.stop().await;
}

#[tokio::test]
async fn reset_clears_device_and_view() {
    let (state, handle, editor) = start().await;
    editor.set_scale(WidgetId::Clock, 1.5).await.unwrap();
    editor.reset().await.unwrap();
    assert!(editor.view().layout.is_empty());
    assert!(state.store.committed().is_empty());
    handle.stop().await;
}

#[tokio::test]
async fn stopped_bridge_refuses_connections() {
    let (state, handle, editor) = start().await;
    handle.stop().await;
    assert!(matches!(
        editor.fetch_state().await,
        Err(BridgeError::Network(_))
    ));
    // The device side is unaffected.
    state.store.upsert(WidgetId::Clock, 1.0, 2.0, 1.0);
    state.store.commit().unwrap();
}

#[tokio::test]
async fn polling_task_stops_on_cancel() {
    let (state, handle, editor) = start().await;
    state.store.upsert(WidgetId::Battery, 9.0, 9.0, 1.0);
    state.store.commit().unwrap();

    let cancel = CancellationToken::new();
    let task = editor.spawn_polling(Duration::from_millis(20), cancel.clone());
    tokio::time::sleep(Duration::from_millis(150)).await;
    cancel.cancel();
    task.await.unwrap();

    assert_eq!(editor.view().layout.resolve(WidgetId::Battery).x, 9.0);
    handle.stop().await;
}

#[tokio::test]
async fn lifecycle_events_are_published() {
    let bus = Arc::new(EventBus::new(8));
    let mut rx = bus.subscribe();
    let store = Arc::new(LayoutStore::open(Arc::new(MemoryPreferences::new())));
    let state = BridgeState::new(store, Arc::new(ScreenGeometryPublisher::default()))
        .with_events(bus);
    let handle = BridgeServer::start("127.0.0.1:0".parse().unwrap(), state)
        .await
        .unwrap();
    let addr = handle.local_addr().to_string();
    handle.stop().await;

    assert!(matches!(rx.recv().await.unwrap(), Event::BridgeStarted { addr: a } if a == addr));
    assert!(matches!(rx.recv().await.unwrap(), Event::BridgeStopped));
}
