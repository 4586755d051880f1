//! Core TOML config loading: read from path or platform default.

use std::path::{Path, PathBuf};

use gitclock_common::ConfigError;
use tracing::{info, warn};

use super::template::default_config_toml;
use crate::schema::GitClockConfig;
use crate::toml_writer::write_atomic;
use crate::validation;

/// The platform config file, `config.toml` in the GitClock config directory.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    Ok(gitclock_platform::config_file()?)
}

/// Write the commented default template to `path`.
pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
    write_atomic(path, &default_config_toml())?;
    info!("created default config at {}", path.display());
    Ok(())
}

/// Load config from a specific TOML file path.
///
/// Deserializes the file using serde defaults for any missing fields.
/// After loading, the config is validated; if validation fails, a warning
/// is logged and the parsed config is returned as-is.
pub fn load_from_path(path: &Path) -> Result<GitClockConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ConfigError::FileNotFound(path.to_path_buf())
        } else {
            ConfigError::ParseError(format!("failed to read {}: {e}", path.display()))
        }
    })?;

    let config: GitClockConfig = toml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))?;

    if let Err(e) = validation::validate(&config) {
        warn!("config validation warning: {e}; using parsed config with potentially invalid values");
    }

    info!("loaded config from {}", path.display());
    Ok(config)
}

/// Load config from the platform-specific default path.
///
/// On macOS: `~/Library/Application Support/gitclock/config.toml`
/// On Linux: `~/.config/gitclock/config.toml`
///
/// If the file does not exist, creates a default config file and returns defaults.
pub fn load_default() -> Result<GitClockConfig, ConfigError> {
    let path = default_config_path()?;
    load_or_create(&path)
}

/// Load config from `path`, writing the commented default template first
/// when the file is missing.
pub fn load_or_create(path: &Path) -> Result<GitClockConfig, ConfigError> {
    match load_from_path(path) {
        Ok(config) => Ok(config),
        Err(ConfigError::FileNotFound(_)) => {
            info!("no config found at {}, creating default", path.display());
            create_default_config(path)?;
            Ok(GitClockConfig::default())
        }
        Err(e) => Err(e),
    }
}
