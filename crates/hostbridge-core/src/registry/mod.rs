//! Ordered extension registry and broadcast primitives.

mod ordered;

pub use ordered::{BroadcastReport, ExtensionRegistry, Registerable};
