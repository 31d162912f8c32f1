//! Ordered, identity-deduplicated registry.
//!
//! Unlike keyed registries, dispatch order matters here: registration order
//! is the broadcast order for every lifecycle event.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use hostbridge_protocols::{ApplicationExtension, Extension, ExtensionError, LifecycleEvent};
use hostbridge_router::panic_message;

use crate::fault::ExtensionFault;

/// Trait for observers that can be stored in a registry.
pub trait Registerable: Send + Sync {
    /// Name used in logs and fault reports.
    fn registry_name(&self) -> &str;
}

impl Registerable for dyn Extension {
    fn registry_name(&self) -> &str {
        self.name()
    }
}

impl Registerable for dyn ApplicationExtension {
    fn registry_name(&self) -> &str {
        self.name()
    }
}

/// Outcome of one broadcast.
#[derive(Debug)]
pub struct BroadcastReport {
    pub event: LifecycleEvent,
    /// Number of extensions whose hook was invoked.
    pub invoked: usize,
    /// Extension that claimed a short-circuiting event, if any.
    pub claimed_by: Option<String>,
    /// Hook faults, in invocation order.
    pub faults: Vec<ExtensionFault>,
}

impl BroadcastReport {
    fn new(event: LifecycleEvent) -> Self {
        Self {
            event,
            invoked: 0,
            claimed_by: None,
            faults: Vec::new(),
        }
    }

    pub fn claimed(&self) -> bool {
        self.claimed_by.is_some()
    }

    pub fn is_clean(&self) -> bool {
        self.faults.is_empty()
    }
}

/// Ordered collection of extensions.
///
/// Registration must happen during single-threaded initialization.
/// Registering while a broadcast is in progress (for example from inside a
/// hook) is a programming error and panics.
pub struct ExtensionRegistry<E: ?Sized + Registerable> {
    entries: RwLock<Vec<Arc<E>>>,
    broadcasting: AtomicUsize,
}

impl<E: ?Sized + Registerable> ExtensionRegistry<E> {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
            broadcasting: AtomicUsize::new(0),
        }
    }

    /// Append an extension unless the same instance is already registered.
    ///
    /// Returns `true` when the extension was added. A duplicate is a silent
    /// no-op, never an error.
    pub fn register(&self, extension: Arc<E>) -> bool {
        assert!(
            self.broadcasting.load(Ordering::SeqCst) == 0,
            "extension `{}` registered during an in-progress broadcast",
            extension.registry_name()
        );

        let mut entries = self.entries.write();
        if entries.iter().any(|existing| same_instance(existing, &extension)) {
            debug!(
                "Extension {} already registered, ignoring",
                extension.registry_name()
            );
            return false;
        }

        debug!("Extension registered: {}", extension.registry_name());
        entries.push(extension);
        true
    }

    /// Check if this exact instance is registered.
    pub fn contains(&self, extension: &Arc<E>) -> bool {
        self.entries
            .read()
            .iter()
            .any(|existing| same_instance(existing, extension))
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Registered extension names, in dispatch order.
    pub fn names(&self) -> Vec<String> {
        self.entries
            .read()
            .iter()
            .map(|e| e.registry_name().to_string())
            .collect()
    }

    /// Registered extensions, in dispatch order.
    pub fn snapshot(&self) -> Vec<Arc<E>> {
        self.entries.read().clone()
    }

    /// Invoke `hook` on every extension in registration order.
    ///
    /// A failing or panicking hook is recorded in the report and the walk
    /// continues with the next extension.
    pub fn broadcast<F>(&self, event: LifecycleEvent, mut hook: F) -> BroadcastReport
    where
        F: FnMut(&E) -> Result<(), ExtensionError>,
    {
        self.broadcast_until(event, |extension| hook(extension).map(|()| false))
    }

    /// Invoke `hook` in registration order until one returns `Ok(true)`.
    ///
    /// A failing or panicking hook counts as "not claimed".
    pub fn broadcast_until<F>(&self, event: LifecycleEvent, mut hook: F) -> BroadcastReport
    where
        F: FnMut(&E) -> Result<bool, ExtensionError>,
    {
        let extensions = self.snapshot();
        let _guard = BroadcastGuard::enter(&self.broadcasting);
        let mut report = BroadcastReport::new(event);

        for extension in &extensions {
            report.invoked += 1;
            let name = extension.registry_name();
            let outcome = catch_unwind(AssertUnwindSafe(|| hook(extension.as_ref())))
                .unwrap_or_else(|payload| {
                    Err(ExtensionError::Panicked(panic_message(payload.as_ref())))
                });

            match outcome {
                Ok(true) => {
                    debug!("Extension {} claimed {}", name, event);
                    report.claimed_by = Some(name.to_string());
                    break;
                }
                Ok(false) => {}
                Err(error) => {
                    report.faults.push(ExtensionFault::new(name, event, error));
                }
            }
        }

        report
    }
}

impl<E: ?Sized + Registerable> Default for ExtensionRegistry<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Reference identity; compares the data pointer only so that the same
/// instance seen through different vtables is still one instance.
fn same_instance<E: ?Sized>(a: &Arc<E>, b: &Arc<E>) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

/// Marks a broadcast in progress for the lifetime of the guard.
struct BroadcastGuard<'a> {
    depth: &'a AtomicUsize,
}

impl<'a> BroadcastGuard<'a> {
    fn enter(depth: &'a AtomicUsize) -> Self {
        depth.fetch_add(1, Ordering::SeqCst);
        Self { depth }
    }
}

impl Drop for BroadcastGuard<'_> {
    fn drop(&mut self) {
        self.depth.fetch_sub(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
#[path = "ordered_tests.rs"]
mod tests;
