//! Extension fault isolation.
//!
//! A hook that returns an error or panics is reported here and then
//! skipped; remaining extensions still see the event.

use std::fmt;

use tracing::warn;

use hostbridge_protocols::{ExtensionError, LifecycleEvent};

/// A single failing hook invocation.
#[derive(Debug, Clone)]
pub struct ExtensionFault {
    pub extension: String,
    pub event: LifecycleEvent,
    pub error: ExtensionError,
}

impl ExtensionFault {
    pub fn new(extension: impl Into<String>, event: LifecycleEvent, error: ExtensionError) -> Self {
        Self {
            extension: extension.into(),
            event,
            error,
        }
    }
}

impl fmt::Display for ExtensionFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "extension `{}` failed on {}: {}",
            self.extension, self.event, self.error
        )
    }
}

/// Receives faults after each broadcast.
pub trait FaultSink: Send + Sync {
    fn report(&self, fault: &ExtensionFault);
}

impl<F> FaultSink for F
where
    F: Fn(&ExtensionFault) + Send + Sync,
{
    fn report(&self, fault: &ExtensionFault) {
        self(fault)
    }
}

/// Default sink: one structured warning per fault.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingFaultSink;

impl FaultSink for TracingFaultSink {
    fn report(&self, fault: &ExtensionFault) {
        warn!(
            extension = %fault.extension,
            event = %fault.event,
            error = %fault.error,
            "Extension hook failed"
        );
    }
}
