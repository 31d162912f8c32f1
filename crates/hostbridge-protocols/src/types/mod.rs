//! Host payload types.
//!
//! The core treats these as opaque pass-through data; they are forwarded
//! verbatim to each extension.

mod payload;

pub use payload::*;
