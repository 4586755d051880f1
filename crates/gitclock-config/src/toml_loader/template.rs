//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# GitClock Configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[server]
# Browser layout editor at http://<device-ip>:<port>/
# enabled = false
# bind = "0.0.0.0"
# port = 8080

[editor]
# min_scale = 0.5            # 0.1-1.0
# max_scale = 3.0            # 1.0-10.0
# poll_interval_ms = 2000    # 100-60000

[screen]
# Used until the display is measured.
# width = 1920
# height = 1080

[storage]
# prefs_file = ""            # empty = platform data dir/settings.json

[logging]
# level = "INFO"             # DEBUG, INFO, WARNING, ERROR
"##
    .to_string()
}
