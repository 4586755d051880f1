use std::sync::Arc;

use tracing::{debug, info};

use super::types::{ActiveGesture, ScaleLimits, SessionState};
use crate::error::SessionError;
use crate::model::Layout;
use crate::store::LayoutStore;
use crate::widget::WidgetId;

/// The native editor: Idle until edit mode is entered, then one gesture at a time.
pub struct GestureSession {
    store: Arc<LayoutStore>,
    limits: ScaleLimits,
    state: SessionState,
}

impl GestureSession {
    pub fn new(store: Arc<LayoutStore>, limits: ScaleLimits) -> Self {
        Self {
            store,
            limits,
            state: SessionState::Idle,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_editing(&self) -> bool {
        self.state.is_editing()
    }

    pub fn store(&self) -> &Arc<LayoutStore> {
        &self.store
    }

    pub fn limits(&self) -> ScaleLimits {
        self.limits
    }

    /// Idle → Editing.
    pub fn enter_edit(&mut self) -> Result<(), SessionError> {
        if self.state.is_editing() {
            return Err(SessionError::AlreadyEditing);
        }
        self.state = SessionState::Editing { gesture: None };
        info!("edit mode entered");
        Ok(())
    }

    /// Start a pan/pinch stream on `id`, snapshotting its current layout.
    pub fn begin_gesture(&mut self, id: WidgetId) -> Result<(), SessionError> {
        match &mut self.state {
            SessionState::Idle => Err(SessionError::NotEditing),
            SessionState::Editing {
                gesture: Some(active),
            } => Err(SessionError::GestureInProgress(active.id)),
            SessionState::Editing { gesture } => {
                let start = self.store.get(id);
                debug!(widget = %id, x = start.x, y = start.y, "gesture started");
                *gesture = Some(ActiveGesture::new(id, start));
                Ok(())
            }
        }
    }

    /// Apply one incremental gesture event and mirror it into the store.
    ///
    /// `pan_dx`/`pan_dy` are pixel deltas since the previous event and
    /// `zoom` is the multiplicative pinch factor since the previous event.
    /// Non-finite input is ignored.
    pub fn update_gesture(
        &mut self,
        pan_dx: f64,
        pan_dy: f64,
        zoom: f64,
    ) -> Result<Layout, SessionError> {
        let active = self.active_mut()?;
        if pan_dx.is_finite() && pan_dy.is_finite() {
            active.pan_x += pan_dx;
            active.pan_y += pan_dy;
        }
        if zoom.is_finite() && zoom > 0.0 {
            active.zoom *= zoom;
        }
        let active = *active;
        let layout = active.current(self.limits);
        self.store.upsert(active.id, layout.x, layout.y, layout.scale);
        Ok(layout)
    }

    /// Finish the current gesture. The result stays uncommitted.
    pub fn end_gesture(&mut self) -> Result<Layout, SessionError> {
        let active = *self.active_mut()?;
        self.state = SessionState::Editing { gesture: None };
        let layout = active.current(self.limits);
        debug!(widget = %active.id, x = layout.x, y = layout.y, scale = layout.scale, "gesture ended");
        Ok(layout)
    }

    /// Commit every edit made in this session and return to Idle.
    pub fn save(&mut self) -> Result<(), SessionError> {
        if !self.state.is_editing() {
            return Err(SessionError::NotEditing);
        }
        self.store.commit()?;
        self.state = SessionState::Idle;
        info!("edit mode saved");
        Ok(())
    }

    /// Discard every uncommitted edit and return to Idle.
    pub fn cancel(&mut self) -> Result<(), SessionError> {
        if !self.state.is_editing() {
            return Err(SessionError::NotEditing);
        }
        self.store.reload();
        self.state = SessionState::Idle;
        info!("edit mode cancelled");
        Ok(())
    }

    fn active_mut(&mut self) -> Result<&mut ActiveGesture, SessionError> {
        match &mut self.state {
            SessionState::Idle => Err(SessionError::NotEditing),
            SessionState::Editing { gesture: None } => Err(SessionError::NoActiveGesture),
            SessionState::Editing {
                gesture: Some(active),
            } => Ok(active),
        }
    }
}
