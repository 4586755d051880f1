//! The on-device runtime: one store, one geometry publisher, one event bus.

use std::path::PathBuf;
use std::sync::Arc;

use gitclock_bridge::BridgeState;
use gitclock_common::{Event, EventBus, GitClockError};
use gitclock_config::GitClockConfig;
use gitclock_layout::{
    placement, GestureSession, LayoutMap, LayoutStore, Placement, ScaleLimits, ScreenGeometry,
    ScreenGeometryPublisher, WidgetId,
};
use gitclock_platform::{FilePreferences, PreferenceStore};
use tracing::info;

use crate::edit::Editor;

pub struct Device {
    pub store: Arc<LayoutStore>,
    pub geometry: Arc<ScreenGeometryPublisher>,
    pub events: Arc<EventBus>,
    pub prefs_path: Option<PathBuf>,
    pub limits: ScaleLimits,
}

impl Device {
    /// Open the preference file chosen by `prefs_override`, then config,
    /// then the platform data directory.
    pub fn open(config: &GitClockConfig, prefs_override: Option<PathBuf>) -> Result<Self, GitClockError> {
        let path = resolve_prefs_path(config, prefs_override)?;
        info!(path = %path.display(), "using preference file");
        Ok(Self::with_prefs(config, Arc::new(FilePreferences::open(path))))
    }

    pub fn with_prefs(config: &GitClockConfig, prefs: Arc<dyn PreferenceStore>) -> Self {
        let prefs_path = prefs.path().map(PathBuf::from);
        let events = Arc::new(EventBus::default());
        let store = Arc::new(LayoutStore::open(prefs).with_events(events.clone()));
        let geometry = Arc::new(ScreenGeometryPublisher::new(screen_of(config)));
        Self {
            store,
            geometry,
            events,
            prefs_path,
            limits: limits_of(config),
        }
    }

    /// Record a new surface measurement, announcing it if the size changed.
    pub fn resize(&self, width: u32, height: u32) -> bool {
        let changed = self.geometry.publish(width, height);
        if changed {
            self.events.publish(Event::ScreenResized { width, height });
        }
        changed
    }

    pub fn bridge_state(&self) -> BridgeState {
        BridgeState::new(self.store.clone(), self.geometry.clone())
            .with_events(self.events.clone())
            .with_limits(self.limits)
    }

    /// Gesture editor working on this device's store and geometry.
    pub fn editor(&self) -> Editor {
        let session = GestureSession::new(self.store.clone(), self.limits);
        Editor::new(session, self.geometry.clone())
    }

    /// Render pass over the working map at the current geometry.
    pub fn placements(&self) -> Vec<(WidgetId, Placement)> {
        render(&self.store.snapshot(), self.geometry.current())
    }
}

/// Absolute placement of every widget for `layout` on `screen`.
pub fn render(layout: &LayoutMap, screen: ScreenGeometry) -> Vec<(WidgetId, Placement)> {
    WidgetId::ALL
        .into_iter()
        .map(|id| (id, placement(&layout.resolve(id), &id.anchor(), screen)))
        .collect()
}

pub fn format_placements(placements: &[(WidgetId, Placement)]) -> String {
    let mut out = format!(
        "{:<14}{:>10}{:>10}{:>10}{:>10}{:>8}\n",
        "WIDGET", "LEFT", "TOP", "WIDTH", "HEIGHT", "SCALE"
    );
    for (id, p) in placements {
        out.push_str(&format!(
            "{:<14}{:>10.1}{:>10.1}{:>10.1}{:>10.1}{:>8.2}\n",
            id.as_str(),
            p.left,
            p.top,
            p.width,
            p.height,
            p.scale
        ));
    }
    out
}

pub fn screen_of(config: &GitClockConfig) -> ScreenGeometry {
    ScreenGeometry::new(config.screen.width, config.screen.height)
}

pub fn limits_of(config: &GitClockConfig) -> ScaleLimits {
    ScaleLimits::new(config.editor.min_scale, config.editor.max_scale)
}

fn resolve_prefs_path(
    config: &GitClockConfig,
    prefs_override: Option<PathBuf>,
) -> Result<PathBuf, GitClockError> {
    if let Some(path) = prefs_override {
        return Ok(path);
    }
    if !config.storage.prefs_file.is_empty() {
        return Ok(PathBuf::from(&config.storage.prefs_file));
    }
    Ok(gitclock_platform::prefs_file()?)
}
