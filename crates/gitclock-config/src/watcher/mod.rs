//! File watcher for live reload.
//!
//! Uses the `notify` crate to watch a single file for changes,
//! with a 500ms debounce to avoid rapid reloads.

mod file_watcher;


pub use file_watcher::{FileWatcher, DEBOUNCE};
