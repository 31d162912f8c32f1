//! # HostBridge Protocols
//!
//! Protocol definitions (traits and payloads) for the HostBridge framework.
//! Contains only interface definitions - no implementations.
//!
//! ## Core Traits
//!
//! - [`Extension`] - Activity-level lifecycle observer
//! - [`ApplicationExtension`] - Process-level lifecycle observer
//! - [`LifecycleSink`] - Inbound interface the host bootstrap drives
//! - [`HostShell`] - Outbound interface to host-specific behavior
//! - [`ApplicationShell`] - Outbound interface for the process-level host

pub mod error;
pub mod extension;
pub mod host;
pub mod types;

// Re-export core traits
pub use extension::{
    ApplicationExtension, ClaimPolarity, DefaultOrder, Extension, HookResult, LifecycleEvent,
};
pub use host::{ApplicationShell, HostShell, HostView, LifecycleSink};
pub use error::{ExtensionError, HostError};
pub use types::*;
