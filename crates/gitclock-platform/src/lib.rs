pub mod paths;
pub mod prefs;

pub use paths::{config_dir, config_file, data_dir, ensure_dirs, log_dir, prefs_file};
pub use prefs::{DeviceSettings, FilePreferences, MemoryPreferences, PreferenceStore, SETTINGS_KEY};
