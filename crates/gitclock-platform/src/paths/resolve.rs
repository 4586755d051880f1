use std::path::PathBuf;

use gitclock_common::PlatformError;

pub(super) const APP_NAME: &str = "gitclock";

/// Returns the platform-specific configuration directory for GitClock.
///
/// - macOS: `~/Library/Application Support/gitclock`
/// - Linux: `$XDG_CONFIG_HOME/gitclock` (defaults to `~/.config/gitclock`)
/// - Windows: `%APPDATA%\gitclock`
pub fn config_dir() -> Result<PathBuf, PlatformError> {
    Ok(dirs::config_dir()
        .ok_or_else(|| PlatformError::PathError("could not determine config directory".into()))?
        .join(APP_NAME))
}

/// Returns the platform-specific data directory for GitClock.
///
/// - macOS: `~/Library/Application Support/gitclock`
/// - Linux: `$XDG_DATA_HOME/gitclock` (defaults to `~/.local/share/gitclock`)
/// - Windows: `%APPDATA%\gitclock`
pub fn data_dir() -> Result<PathBuf, PlatformError> {
    Ok(dirs::data_dir()
        .ok_or_else(|| PlatformError::PathError("could not determine data directory".into()))?
        .join(APP_NAME))
}

/// Returns the path to the main configuration file.
///
/// Located at `config_dir()/config.toml`.
pub fn config_file() -> Result<PathBuf, PlatformError> {
    Ok(config_dir()?.join("config.toml"))
}

/// Returns the path to the durable preference store.
///
/// Located at `data_dir()/settings.json`.
pub fn prefs_file() -> Result<PathBuf, PlatformError> {
    Ok(data_dir()?.join("settings.json"))
}

/// Returns the path to the log directory.
///
/// Located at `data_dir()/logs`.
pub fn log_dir() -> Result<PathBuf, PlatformError> {
    Ok(data_dir()?.join("logs"))
}
