//! Write GitClockConfig to TOML on disk.
//!
//! Supports atomic writes (write to `.tmp`, then rename) to prevent
//! corruption if the process crashes mid-write.

use std::path::Path;

use gitclock_common::ConfigError;

use crate::schema::GitClockConfig;
use crate::toml_loader::default_config_path;

// =============================================================================
// PUBLIC API
// =============================================================================

/// Write config to the platform default path (`~/.config/gitclock/config.toml`).
pub fn save_config(config: &GitClockConfig) -> Result<(), ConfigError> {
    let path = default_config_path()?;
    save_config_to_path(config, &path)
}

/// Write config to a specific path.
///
/// Creates parent directories if they don't exist. Uses atomic write
/// (write to `.tmp` file, then rename) to prevent partial writes.
pub fn save_config_to_path(config: &GitClockConfig, path: &Path) -> Result<(), ConfigError> {
    let toml_str = toml::to_string_pretty(config)
        .map_err(|e| ConfigError::WriteError(format!("failed to serialize config to TOML: {e}")))?;
    write_atomic(path, &toml_str)?;
    tracing::debug!(path = %path.display(), "Config saved to disk");
    Ok(())
}

/// Replace `path` with `contents` through a sibling `.tmp` file.
///
/// On failure the original file is untouched and the `.tmp` file removed.
pub(crate) fn write_atomic(path: &Path, contents: &str) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            ConfigError::WriteError(format!(
                "failed to create config directory {}: {e}",
                parent.display()
            ))
        })?;
    }

    let tmp_path = path.with_extension("toml.tmp");
    std::fs::write(&tmp_path, contents).map_err(|e| {
        ConfigError::WriteError(format!("failed to write {}: {e}", tmp_path.display()))
    })?;

    if let Err(e) = std::fs::rename(&tmp_path, path) {
        if let Err(cleanup) = std::fs::remove_file(&tmp_path) {
            tracing::warn!(path = %tmp_path.display(), "failed to remove temp file: {cleanup}");
        }
        return Err(ConfigError::WriteError(format!(
            "failed to replace {}: {e}",
            path.display()
        )));
    }
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
