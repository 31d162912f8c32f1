//! Extension protocol definitions.
//!
//! Extensions are independently registered observers of host lifecycle
//! transitions. Every hook has a no-op default.

mod event;
mod traits;

pub use event::*;
pub use traits::*;
