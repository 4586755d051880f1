pub mod errors;
pub mod events;

pub use errors::{ConfigError, GitClockError, PlatformError};
pub use events::{CommitOrigin, Event, EventBus};

pub type Result<T> = std::result::Result<T, GitClockError>;
