//! Channel-backed route target.
//!
//! A [`QueueTarget`] is the submitting half; the paired [`QueueReceiver`] is
//! owned by the context that executes the work. That context decides how to
//! drain: polling from its own loop, a dedicated thread, or a tokio task.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;

use tokio::sync::mpsc;
use tracing::{debug, error};

use crate::error::{RouteError, RouteResult};
use crate::route::{RouteTarget, WorkItem};

/// Create a named queue target and the receiver that drains it.
pub fn queue_target(name: impl Into<String>) -> (Arc<QueueTarget>, QueueReceiver) {
    let name = name.into();
    let (tx, rx) = mpsc::unbounded_channel();
    let target = Arc::new(QueueTarget {
        name: name.clone(),
        tx,
        accepted: AtomicU64::new(0),
    });
    let receiver = QueueReceiver {
        name,
        rx,
        executed: 0,
        panicked: 0,
    };
    (target, receiver)
}

/// Submitting half of a channel-backed target.
pub struct QueueTarget {
    name: String,
    tx: mpsc::UnboundedSender<WorkItem>,
    accepted: AtomicU64,
}

impl QueueTarget {
    /// Number of work items accepted so far.
    pub fn accepted(&self) -> u64 {
        self.accepted.load(Ordering::Relaxed)
    }
}

impl RouteTarget for QueueTarget {
    fn name(&self) -> &str {
        &self.name
    }

    fn submit(&self, work: WorkItem) -> RouteResult<()> {
        self.tx
            .send(work)
            .map_err(|_| RouteError::TargetClosed(self.name.clone()))?;
        self.accepted.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Executing half of a channel-backed target.
///
/// Work runs in submission order. A panicking work item is logged and does
/// not stop the drain.
pub struct QueueReceiver {
    name: String,
    rx: mpsc::UnboundedReceiver<WorkItem>,
    executed: u64,
    panicked: u64,
}

impl QueueReceiver {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of work items executed by this receiver.
    pub fn executed(&self) -> u64 {
        self.executed
    }

    /// Number of executed work items that panicked.
    pub fn panicked(&self) -> u64 {
        self.panicked
    }

    /// Run everything queued right now without waiting. Returns the count.
    pub fn drain_pending(&mut self) -> usize {
        let mut count = 0;
        while let Ok(work) = self.rx.try_recv() {
            self.execute(work);
            count += 1;
        }
        count
    }

    /// Stop accepting new work. Already queued items can still be drained.
    pub fn close(&mut self) {
        self.rx.close();
    }

    /// Drain until every submitting handle is gone.
    ///
    /// Blocks the calling thread; must not be called from inside an async
    /// runtime.
    pub fn run_blocking(mut self) -> u64 {
        while let Some(work) = self.rx.blocking_recv() {
            self.execute(work);
        }
        debug!("Queue {} drained ({} items)", self.name, self.executed);
        self.executed
    }

    /// Drain asynchronously until every submitting handle is gone.
    pub async fn run(mut self) -> u64 {
        while let Some(work) = self.rx.recv().await {
            self.execute(work);
        }
        debug!("Queue {} drained ({} items)", self.name, self.executed);
        self.executed
    }

    /// Drain on a dedicated, named OS thread.
    pub fn spawn_thread(self, thread_name: impl Into<String>) -> RouteResult<thread::JoinHandle<u64>> {
        let handle = thread::Builder::new()
            .name(thread_name.into())
            .spawn(move || self.run_blocking())?;
        Ok(handle)
    }

    /// Drain as a task on the given tokio runtime.
    pub fn spawn_on(self, handle: &tokio::runtime::Handle) -> tokio::task::JoinHandle<u64> {
        handle.spawn(self.run())
    }

    fn execute(&mut self, work: WorkItem) {
        if let Err(payload) = catch_unwind(AssertUnwindSafe(work)) {
            self.panicked += 1;
            error!(
                "Work item panicked on {}: {}",
                self.name,
                panic_message(payload.as_ref())
            );
        }
        self.executed += 1;
    }
}

/// Best-effort text of a panic payload.
pub fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

#[cfg(test)]
#[path = "queue_target_tests.rs"]
mod tests;
