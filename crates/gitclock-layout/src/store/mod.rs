//! The authoritative layout state and its write-through to durable storage.

mod core;


pub use self::core::{LayoutStore, LAYOUT_KEY};
