//! Widget layout model and the state shared by both editors.
//!
//! Layouts are stored as offsets from per-widget anchors; [`coords`] turns
//! them into absolute positions for the current [`ScreenGeometry`].
//! [`LayoutStore`] is the single source of truth, mutated in memory by the
//! native [`GestureSession`] and written through by the remote bridge.

pub mod coords;
pub mod error;
pub mod geometry;
pub mod model;
pub mod session;
pub mod store;
pub mod widget;

pub use coords::{placement, to_absolute, to_offset, Placement, Position};
pub use error::{LayoutError, SessionError};
pub use geometry::{ScreenGeometry, ScreenGeometryPublisher};
pub use model::{DecodedLayout, Layout, LayoutMap};
pub use session::{GestureSession, ScaleLimits, SessionState};
pub use store::{LayoutStore, LAYOUT_KEY};
pub use widget::{AnchorSpec, Edge, UnknownWidget, WidgetId, WidgetSize};
