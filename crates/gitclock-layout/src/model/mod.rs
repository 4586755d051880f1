//! Layout data model and its JSON form.

mod decode;
mod types;

#[cfg(test)]
mod tests;

pub use decode::DecodedLayout;
pub use types::{Layout, LayoutMap};
