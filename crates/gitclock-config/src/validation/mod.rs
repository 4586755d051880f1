//! Full configuration validation.
//!
//! Validates numeric ranges and cross-field constraints. Each domain has
//! its own submodule; this orchestrator calls them all and collects errors
//! into a single `ConfigError`.

mod editor;
mod helpers;
mod server;


use crate::schema::GitClockConfig;
use gitclock_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &GitClockConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    server::validate_server(&mut errors, config);
    editor::validate_editor(&mut errors, config);
    editor::validate_screen(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
