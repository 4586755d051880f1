//! Rust remote editor: the same polling and drag-suppression policy as
//! the browser page, usable from the CLI and from tests.

mod editor;

#[cfg(test)]
mod tests;

pub use editor::{PollOutcome, RemoteEditor, RemoteView};
