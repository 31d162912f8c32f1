//! Router metrics collection.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

use crate::route::RouteName;

/// Router metrics.
#[derive(Debug, Default)]
pub struct RouterMetrics {
    /// Work accepted on the host route.
    pub host_submitted: AtomicU64,

    /// Work accepted on the default route.
    pub default_submitted: AtomicU64,

    /// Work accepted on the runloop route.
    pub runloop_submitted: AtomicU64,

    /// Submissions rejected by a closed target.
    pub rejected: AtomicU64,

    /// Successful rebinds, including runloop resets.
    pub rebinds: AtomicU64,
}

impl RouterMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record accepted work on a route.
    pub fn record_submitted(&self, route: RouteName) {
        let counter = match route {
            RouteName::Host => &self.host_submitted,
            RouteName::Default => &self.default_submitted,
            RouteName::Runloop => &self.runloop_submitted,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_rejected(&self) {
        self.rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_rebind(&self) {
        self.rebinds.fetch_add(1, Ordering::Relaxed);
    }

    /// Get a snapshot of the metrics.
    pub fn snapshot(&self) -> RouterMetricsSnapshot {
        RouterMetricsSnapshot {
            host_submitted: self.host_submitted.load(Ordering::Relaxed),
            default_submitted: self.default_submitted.load(Ordering::Relaxed),
            runloop_submitted: self.runloop_submitted.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
            rebinds: self.rebinds.load(Ordering::Relaxed),
        }
    }
}

/// Snapshot of router metrics at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RouterMetricsSnapshot {
    pub host_submitted: u64,
    pub default_submitted: u64,
    pub runloop_submitted: u64,
    pub rejected: u64,
    pub rebinds: u64,
}

impl RouterMetricsSnapshot {
    /// Total accepted submissions across all routes.
    pub fn total_submitted(&self) -> u64 {
        self.host_submitted + self.default_submitted + self.runloop_submitted
    }
}
