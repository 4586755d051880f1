//! HTTP routes served to remote editors.
//!
//! The `/api/*` paths are kept for editor pages served by older builds.

mod handlers;


use std::sync::{Arc, Mutex};

use axum::routing::{get, post};
use axum::Router;
use gitclock_common::EventBus;
use gitclock_layout::{LayoutStore, ScaleLimits, ScreenGeometryPublisher};

/// Shared handles every request works against.
#[derive(Clone)]
pub struct BridgeState {
    pub store: Arc<LayoutStore>,
    pub geometry: Arc<ScreenGeometryPublisher>,
    pub events: Option<Arc<EventBus>>,
    pub limits: ScaleLimits,
    /// Serializes read-modify-write of the device settings.
    settings_lock: Arc<Mutex<()>>,
}

impl BridgeState {
    pub fn new(store: Arc<LayoutStore>, geometry: Arc<ScreenGeometryPublisher>) -> Self {
        Self {
            store,
            geometry,
            events: None,
            limits: ScaleLimits::default(),
            settings_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn with_events(mut self, events: Arc<EventBus>) -> Self {
        self.events = Some(events);
        self
    }

    pub fn with_limits(mut self, limits: ScaleLimits) -> Self {
        self.limits = limits;
        self
    }
}

pub fn router(state: BridgeState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/state", get(handlers::state))
        .route("/layout", post(handlers::submit_layout))
        .route("/reset", post(handlers::reset_layout))
        .route(
            "/settings",
            get(handlers::settings).post(handlers::save_settings),
        )
        .route("/api/state", get(handlers::state))
        .route("/api/layout", post(handlers::submit_layout))
        .route("/api/reset_layout", post(handlers::reset_layout))
        .with_state(state)
}
