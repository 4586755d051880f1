//! Remote Sync Bridge: the on-device HTTP editor endpoint and its Rust client.
//!
//! The server never keeps a copy of the layout of its own. `/state` reads
//! the store's committed map and `/layout` writes through to the same
//! store the native editor uses, committing once per request.

pub mod client;
pub mod error;
pub mod page;
pub mod protocol;
pub mod routes;
pub mod server;

pub use client::{PollOutcome, RemoteEditor, RemoteView};
pub use error::BridgeError;
pub use protocol::{Ack, SettingsForm, SettingsView, StateResponse};
pub use routes::{router, BridgeState};
pub use server::{BridgeHandle, BridgeServer};
