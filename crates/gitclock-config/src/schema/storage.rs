use serde::{Deserialize, Serialize};

/// Where the durable preference store lives.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the preference file. Empty means the platform data directory.
    pub prefs_file: String,
}
