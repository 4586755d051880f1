//! Durable key-value preference storage.
//!
//! The layout store keeps its serialized blob under a single key here, and
//! [`DeviceSettings`] keeps the remaining device preferences under another.
//! [`FilePreferences`] is the on-device backing; [`MemoryPreferences`]
//! serves tests and throwaway runs.

mod file;
mod memory;
mod settings;


use std::path::Path;

use gitclock_common::PlatformError;

pub use file::FilePreferences;
pub use memory::MemoryPreferences;
pub use settings::{DeviceSettings, SETTINGS_KEY};

/// A string-keyed store of string values that survives restarts.
///
/// Implementations must make `put` atomic with respect to concurrent `get`
/// calls: a reader sees either the old or the new value, never a torn one.
pub trait PreferenceStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, PlatformError>;

    fn put(&self, key: &str, value: &str) -> Result<(), PlatformError>;

    fn remove(&self, key: &str) -> Result<(), PlatformError>;

    /// Backing file, if the store lives on disk.
    fn path(&self) -> Option<&Path> {
        None
    }
}
