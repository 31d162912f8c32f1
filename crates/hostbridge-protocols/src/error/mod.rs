//! Error types for the HostBridge protocol layer.

mod extension;
mod host;

pub use extension::*;
pub use host::*;
