//! Process-wide "current host component" slot.
//!
//! The slot holds a weak reference so it never keeps a destroyed component
//! alive. Readers get `None` before creation and after destruction.

use std::sync::{Arc, Weak};

use parking_lot::RwLock;

/// A process-wide, non-owning handle to the live instance of `T`.
pub struct ProcessIdentity<T> {
    slot: RwLock<Option<Weak<T>>>,
}

impl<T> ProcessIdentity<T> {
    pub const fn new() -> Self {
        Self {
            slot: parking_lot::const_rwlock(None),
        }
    }

    /// Publish `instance` as the live component, replacing any previous one.
    pub fn install(&self, instance: &Arc<T>) {
        *self.slot.write() = Some(Arc::downgrade(instance));
    }

    /// The live component, if any.
    pub fn current(&self) -> Option<Arc<T>> {
        self.slot.read().as_ref().and_then(Weak::upgrade)
    }

    pub fn clear(&self) {
        *self.slot.write() = None;
    }

    /// Clear the slot only if it still points at `instance`.
    ///
    /// A newer component may already have installed itself.
    pub fn clear_if(&self, instance: &T) -> bool {
        let mut slot = self.slot.write();
        let matches = slot
            .as_ref()
            .is_some_and(|weak| std::ptr::eq(weak.as_ptr(), instance));
        if matches {
            *slot = None;
        }
        matches
    }

    pub fn is_live(&self) -> bool {
        self.current().is_some()
    }
}

impl<T> Default for ProcessIdentity<T> {
    fn default() -> Self {
        Self::new()
    }
}
