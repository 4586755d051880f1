//! JSON bodies exchanged with remote editors.

use gitclock_layout::{LayoutMap, ScreenGeometry};
use gitclock_platform::DeviceSettings;
use serde::{Deserialize, Serialize};

/// Body of `GET /state`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateResponse {
    pub width: u32,
    pub height: u32,
    pub layout: LayoutMap,
}

impl StateResponse {
    pub fn new(geometry: ScreenGeometry, layout: LayoutMap) -> Self {
        Self {
            width: geometry.width,
            height: geometry.height,
            layout,
        }
    }

    pub fn geometry(&self) -> ScreenGeometry {
        ScreenGeometry::new(self.width, self.height)
    }
}

/// Acknowledgment returned by every mutating endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Ack {
    pub fn ok() -> Self {
        Self {
            ok: true,
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: Some(message.into()),
        }
    }
}

/// Form fields posted to `POST /settings`. Checkboxes are on when present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsForm {
    pub username: Option<String>,
    pub token: Option<String>,
    pub battery_style: Option<String>,
    pub oled_mode: Option<String>,
    pub keep_screen_on: Option<String>,
}

impl SettingsForm {
    /// Fold the submitted fields into `settings`.
    ///
    /// A blank username leaves the credentials untouched, as does a blank
    /// token for the account already stored. An unparsable battery style
    /// keeps the current one.
    pub fn apply_to(&self, settings: &mut DeviceSettings) {
        let username = self.username.as_deref().map(str::trim).unwrap_or("");
        if !username.is_empty() {
            let token = self.token.as_deref().map(str::trim).unwrap_or("");
            let same_account = settings.username.as_deref() == Some(username);
            if token.is_empty() && same_account {
                let kept = settings.token.clone();
                settings.sign_in(username, &kept);
            } else {
                settings.sign_in(username, token);
            }
        }
        if let Some(style) = self
            .battery_style
            .as_deref()
            .and_then(|s| s.trim().parse().ok())
        {
            settings.battery_style = style;
        }
        settings.oled_mode = self.oled_mode.is_some();
        settings.keep_screen_on = self.keep_screen_on.is_some();
    }
}

/// Body of `GET /settings`. The token itself is never sent back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsView {
    pub username: Option<String>,
    pub has_token: bool,
    pub session_active: bool,
    pub battery_style: i32,
    pub oled_mode: bool,
    pub keep_screen_on: bool,
}

impl From<&DeviceSettings> for SettingsView {
    fn from(settings: &DeviceSettings) -> Self {
        Self {
            username: settings.username.clone(),
            has_token: settings.has_token(),
            session_active: settings.session_active,
            battery_style: settings.battery_style,
            oled_mode: settings.oled_mode,
            keep_screen_on: settings.keep_screen_on,
        }
    }
}
