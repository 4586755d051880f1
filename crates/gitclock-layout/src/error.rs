use gitclock_common::{GitClockError, PlatformError};

/// Failures of the layout store and its decoding.
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("invalid layout document: {0}")]
    Decode(String),

    #[error(transparent)]
    Storage(#[from] PlatformError),
}

/// Misuse of the gesture editor's state machine, or a failed commit.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("edit mode is not active")]
    NotEditing,

    #[error("edit mode is already active")]
    AlreadyEditing,

    #[error("a gesture on {0} is already in progress")]
    GestureInProgress(crate::WidgetId),

    #[error("no gesture in progress")]
    NoActiveGesture,

    #[error(transparent)]
    Store(#[from] LayoutError),
}

impl From<LayoutError> for GitClockError {
    fn from(err: LayoutError) -> Self {
        match err {
            LayoutError::Storage(e) => GitClockError::Platform(e),
            other => GitClockError::Layout(other.to_string()),
        }
    }
}

impl From<SessionError> for GitClockError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Store(e) => e.into(),
            other => GitClockError::Layout(other.to_string()),
        }
    }
}
