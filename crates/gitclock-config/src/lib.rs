//! GitClock configuration system.
//!
//! Provides TOML-based configuration with live reload and validation.
//! All config sections use defaults so partial configs work out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use gitclock_config::load_config;
//!
//! let config = load_config().expect("failed to load config");
//! println!("serving on port {}", config.server.port);
//! ```

pub mod reload;
pub mod schema;
pub mod toml_loader;
pub mod toml_writer;
pub mod validation;
pub mod watcher;

pub use reload::ReloadManager;
pub use schema::GitClockConfig;
pub use toml_writer::{save_config, save_config_to_path};
pub use watcher::FileWatcher;

use gitclock_common::ConfigError;
use std::path::Path;

/// Convenience function to load config from the platform default path.
///
/// Loads `config.toml` from the OS config directory, creates a default
/// if none exists, and validates the result.
pub fn load_config() -> Result<GitClockConfig, ConfigError> {
    let config = toml_loader::load_default()?;
    validation::validate(&config)?;
    Ok(config)
}

/// Load and validate config from an explicit path, creating it if missing.
pub fn load_config_from(path: &Path) -> Result<GitClockConfig, ConfigError> {
    let config = toml_loader::load_or_create(path)?;
    validation::validate(&config)?;
    Ok(config)
}
