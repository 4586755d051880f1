//! Device preferences other than widget layout.

use gitclock_common::PlatformError;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::PreferenceStore;

/// Preference key holding the JSON-encoded [`DeviceSettings`].
pub const SETTINGS_KEY: &str = "device_settings";

/// Account and display preferences, stored as one JSON value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceSettings {
    /// Account whose contribution activity the board shows.
    pub username: Option<String>,
    pub token: String,
    pub session_active: bool,
    pub battery_style: i32,
    pub oled_mode: bool,
    pub keep_screen_on: bool,
}

impl Default for DeviceSettings {
    fn default() -> Self {
        Self {
            username: None,
            token: String::new(),
            session_active: false,
            battery_style: 0,
            oled_mode: false,
            keep_screen_on: true,
        }
    }
}

impl DeviceSettings {
    /// Stored settings, or defaults when absent or unreadable.
    pub fn load(prefs: &dyn PreferenceStore) -> Self {
        let raw = match prefs.get(SETTINGS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Self::default(),
            Err(e) => {
                warn!("failed to read device settings: {e}");
                return Self::default();
            }
        };
        serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!("stored device settings unusable ({e}), using defaults");
            Self::default()
        })
    }

    pub fn save(&self, prefs: &dyn PreferenceStore) -> Result<(), PlatformError> {
        let json = serde_json::to_string(self)
            .map_err(|e| PlatformError::PrefsError(format!("failed to serialize settings: {e}")))?;
        prefs.put(SETTINGS_KEY, &json)
    }

    /// Record credentials and mark the session active.
    pub fn sign_in(&mut self, username: &str, token: &str) {
        info!(username, "account credentials updated");
        self.username = Some(username.to_string());
        self.token = token.to_string();
        self.session_active = true;
    }

    pub fn has_token(&self) -> bool {
        !self.token.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::MemoryPreferences;

    #[test]
    fn defaults_keep_the_screen_on() {
        let settings = DeviceSettings::load(&MemoryPreferences::new());
        assert_eq!(settings, DeviceSettings::default());
        assert!(settings.keep_screen_on);
        assert!(!settings.session_active);
    }

    #[test]
    fn save_then_load() {
        let prefs = MemoryPreferences::new();
        let mut settings = DeviceSettings::default();
        settings.sign_in("octocat", "ghp_x");
        settings.oled_mode = true;
        settings.battery_style = 2;
        settings.save(&prefs).unwrap();

        let loaded = DeviceSettings::load(&prefs);
        assert_eq!(loaded, settings);
        assert!(loaded.has_token());
        assert!(loaded.session_active);
    }

    #[test]
    fn unusable_value_falls_back_to_defaults() {
        let prefs = MemoryPreferences::new();
        prefs.put(SETTINGS_KEY, "[1, 2").unwrap();
        assert_eq!(DeviceSettings::load(&prefs), DeviceSettings::default());
    }

    #[test]
    fn partial_value_fills_in_defaults() {
        let prefs = MemoryPreferences::new();
        prefs.put(SETTINGS_KEY, r#"{"oled_mode":true}"#).unwrap();
        let loaded = DeviceSettings::load(&prefs);
        assert!(loaded.oled_mode);
        assert!(loaded.keep_screen_on);
    }

    #[test]
    fn settings_and_layout_keys_do_not_collide() {
        let prefs = MemoryPreferences::new();
        prefs.put("layout_config", "{}").unwrap();
        DeviceSettings::default().save(&prefs).unwrap();
        assert_eq!(prefs.get("layout_config").unwrap().as_deref(), Some("{}"));
    }
}
