//! # HostBridge Core
//!
//! Lifecycle fan-out for an embedded native runtime.
//!
//! ## Components
//!
//! - [`HostActivity`] - Dispatches host component lifecycle events to extensions
//! - [`HostApplication`] - Process-level counterpart with its own extensions
//! - [`ExtensionRegistry`] - Ordered, identity-deduplicated extension list
//! - [`ProcessIdentity`] - Weak, process-wide "current instance" slot
//! - [`FaultSink`] - Receives isolated extension faults
//!
//! Work destined for the native runtime goes through the
//! [`ThreadRouter`](hostbridge_router::ThreadRouter) owned by the activity.

pub mod activity;
pub mod application;
pub mod builtin;
pub mod fault;
pub mod identity;
pub mod registry;

pub use activity::{ActivityState, HostActivity, HostActivityBuilder, DEFAULT_CONTENT_ROOT};
pub use application::HostApplication;
pub use builtin::TracingExtension;
pub use fault::{ExtensionFault, FaultSink, TracingFaultSink};
pub use identity::ProcessIdentity;
pub use registry::{BroadcastReport, ExtensionRegistry, Registerable};
