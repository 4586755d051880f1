//! On-device gesture editing.
//!
//! A [`GestureSession`] batches every drag and pinch into in-memory
//! `upsert`s on the shared [`LayoutStore`](crate::LayoutStore) and only
//! touches durable storage on [`GestureSession::save`].

mod editor;
mod types;

#[cfg(test)]
mod tests;

pub use editor::GestureSession;
pub use types::{ActiveGesture, ScaleLimits, SessionState};
