//! JSON-file preference store with atomic replace writes.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use gitclock_common::PlatformError;
use tracing::{debug, warn};

use super::PreferenceStore;

/// Preferences persisted as one flat JSON object on disk.
///
/// Every write is read-modify-write under a process-local mutex and lands
/// through a `.tmp` file plus rename, so readers in any process observe
/// either the previous or the next file, never a partial one.
pub struct FilePreferences {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FilePreferences {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, PlatformError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => {
                return Err(PlatformError::PrefsError(format!(
                    "failed to read {}: {e}",
                    self.path.display()
                )))
            }
        };

        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&content).map_err(|e| {
            PlatformError::PrefsError(format!("failed to parse {}: {e}", self.path.display()))
        })
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<(), PlatformError> {
        let json = serde_json::to_string_pretty(entries)
            .map_err(|e| PlatformError::PrefsError(format!("failed to serialize: {e}")))?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                PlatformError::PrefsError(format!(
                    "failed to create directory {}: {e}",
                    parent.display()
                ))
            })?;
        }

        let tmp_path = self.path.with_extension("json.tmp");
        std::fs::write(&tmp_path, &json).map_err(|e| {
            PlatformError::PrefsError(format!("failed to write {}: {e}", tmp_path.display()))
        })?;

        if let Err(e) = std::fs::rename(&tmp_path, &self.path) {
            if let Err(cleanup) = std::fs::remove_file(&tmp_path) {
                warn!(path = %tmp_path.display(), "failed to remove temp file: {cleanup}");
            }
            return Err(PlatformError::PrefsError(format!(
                "failed to replace {}: {e}",
                self.path.display()
            )));
        }

        debug!(path = %self.path.display(), "preferences saved");
        Ok(())
    }

    fn edit(
        &self,
        apply: impl FnOnce(&mut BTreeMap<String, String>),
    ) -> Result<(), PlatformError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        // An unreadable file is left as is; rewriting it would drop every other key.
        let mut entries = self.read_all()?;
        apply(&mut entries);
        self.write_all(&entries)
    }
}

impl PreferenceStore for FilePreferences {
    fn get(&self, key: &str) -> Result<Option<String>, PlatformError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(self.read_all()?.remove(key))
    }

    fn put(&self, key: &str, value: &str) -> Result<(), PlatformError> {
        self.edit(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<(), PlatformError> {
        self.edit(|entries| {
            entries.remove(key);
        })
    }

    fn path(&self) -> Option<&Path> {
        Some(&self.path)
    }
}
