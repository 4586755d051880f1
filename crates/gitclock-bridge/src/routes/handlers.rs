use std::sync::PoisonError;

use axum::body::Bytes;
use axum::extract::rejection::FormRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use axum::{Form, Json};
use gitclock_layout::{DecodedLayout, LayoutError};
use gitclock_platform::DeviceSettings;
use tracing::{debug, info, warn};

use super::BridgeState;
use crate::page;
use crate::protocol::{Ack, SettingsForm, SettingsView, StateResponse};

pub(super) async fn index(State(state): State<BridgeState>) -> Html<String> {
    Html(page::render(
        state.geometry.current(),
        &state.store.committed(),
        state.limits,
    ))
}

pub(super) async fn state(State(state): State<BridgeState>) -> Json<StateResponse> {
    Json(StateResponse::new(
        state.geometry.current(),
        state.store.committed(),
    ))
}

pub(super) async fn submit_layout(
    State(state): State<BridgeState>,
    body: Bytes,
) -> (StatusCode, Json<Ack>) {
    let text = match std::str::from_utf8(&body) {
        Ok(text) => text,
        Err(_) => return rejected("body is not valid UTF-8".into()),
    };
    let decoded = match DecodedLayout::from_json(text) {
        Ok(decoded) => decoded,
        Err(e) => return rejected(e.to_string()),
    };
    if !decoded.dropped.is_empty() {
        warn!(keys = ?decoded.dropped, "ignoring unknown widgets in submission");
    }
    if decoded.map.is_empty() {
        debug!("empty layout submission");
        return (StatusCode::OK, Json(Ack::ok()));
    }

    let entries = decoded.map;
    let store = state.store.clone();
    let result = tokio::task::spawn_blocking(move || store.commit_entries(&entries)).await;
    finish(result, "layout submission")
}

pub(super) async fn reset_layout(State(state): State<BridgeState>) -> (StatusCode, Json<Ack>) {
    info!("remote reset requested");
    let store = state.store.clone();
    let result = tokio::task::spawn_blocking(move || store.reset()).await;
    finish(result, "layout reset")
}

pub(super) async fn settings(State(state): State<BridgeState>) -> Json<SettingsView> {
    let prefs = state.store.preferences().clone();
    let settings = tokio::task::spawn_blocking(move || DeviceSettings::load(prefs.as_ref()))
        .await
        .unwrap_or_else(|e| {
            warn!("settings read task failed: {e}");
            DeviceSettings::default()
        });
    Json(SettingsView::from(&settings))
}

pub(super) async fn save_settings(
    State(state): State<BridgeState>,
    form: Result<Form<SettingsForm>, FormRejection>,
) -> (StatusCode, Json<Ack>) {
    let Form(form) = match form {
        Ok(form) => form,
        Err(e) => return rejected(e.body_text()),
    };
    let prefs = state.store.preferences().clone();
    let lock = state.settings_lock.clone();
    let result = tokio::task::spawn_blocking(move || {
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut settings = DeviceSettings::load(prefs.as_ref());
        form.apply_to(&mut settings);
        settings.save(prefs.as_ref())?;
        info!("device settings updated");
        Ok::<(), LayoutError>(())
    })
    .await;
    finish(result, "settings update")
}

fn rejected(message: String) -> (StatusCode, Json<Ack>) {
    warn!("rejected submission: {message}");
    (StatusCode::BAD_REQUEST, Json(Ack::error(message)))
}

fn finish(
    result: Result<Result<(), LayoutError>, tokio::task::JoinError>,
    what: &str,
) -> (StatusCode, Json<Ack>) {
    match result {
        Ok(Ok(())) => (StatusCode::OK, Json(Ack::ok())),
        Ok(Err(e)) => {
            warn!("{what} failed: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, Json(Ack::error(e.to_string())))
        }
        Err(e) => {
            warn!("{what} task failed: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(Ack::error("internal error")),
            )
        }
    }
}
