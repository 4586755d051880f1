//! Configuration schema types for GitClock.
//!
//! All structs use `serde(default)` so partial configs work correctly.
//! Missing fields are filled with the defaults the device ships with.

mod editor;
mod server;
mod storage;
mod system;

pub use editor::*;
pub use server::*;
pub use storage::*;
pub use system::*;

use serde::{Deserialize, Serialize};

/// Root configuration for GitClock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct GitClockConfig {
    pub server: ServerConfig,
    pub editor: EditorConfig,
    pub screen: ScreenConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

// =============================================================================
// Tests
// =============================================================================
