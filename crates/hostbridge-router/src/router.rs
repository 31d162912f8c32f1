//! Rebindable thread router.

use std::sync::Arc;

use arc_swap::ArcSwap;
use tracing::{debug, info, warn};

use crate::error::{RouteError, RouteResult};
use crate::metrics::RouterMetrics;
use crate::route::{RouteName, RouteTarget, WorkItem};

/// Current target of the default route.
struct Binding {
    target: Arc<dyn RouteTarget>,
}

/// Current state of the runloop route.
enum RunloopBinding {
    /// Resolve through the default route at submission time.
    FollowDefault,
    Bound(Arc<dyn RouteTarget>),
}

/// Swappable indirection between "submit work for the native runtime" and
/// "the context that currently serves that role".
///
/// Route slots are atomically swappable references: a submission loads the
/// slot once and enqueues on whatever target it observed, so a concurrent
/// rebind never splits, drops or duplicates a work item.
pub struct ThreadRouter {
    host: Arc<dyn RouteTarget>,
    default: ArcSwap<Binding>,
    runloop: ArcSwap<RunloopBinding>,
    metrics: Arc<RouterMetrics>,
}

impl ThreadRouter {
    /// Create a router whose default route starts out on the host context.
    pub fn new(host: Arc<dyn RouteTarget>) -> Self {
        let default = Arc::new(Binding {
            target: host.clone(),
        });
        Self {
            host,
            default: ArcSwap::new(default),
            runloop: ArcSwap::new(Arc::new(RunloopBinding::FollowDefault)),
            metrics: Arc::new(RouterMetrics::new()),
        }
    }

    /// Post work to the host UI context.
    pub fn route_host(&self, work: WorkItem) -> RouteResult<()> {
        let host = self.host.clone();
        self.submit_to(RouteName::Host, &host, work)
    }

    /// Post work to whatever context currently owns native-runtime
    /// communication.
    pub fn route_default(&self, work: WorkItem) -> RouteResult<()> {
        let target = self.default.load().target.clone();
        self.submit_to(RouteName::Default, &target, work)
    }

    /// Post work through the native main loop. Until the runloop route is
    /// rebound this is exactly [`route_default`](Self::route_default).
    pub fn route_runloop(&self, work: WorkItem) -> RouteResult<()> {
        let target = self.current_target(RouteName::Runloop);
        self.submit_to(RouteName::Runloop, &target, work)
    }

    /// Post work on a route chosen at runtime.
    pub fn route(&self, route: RouteName, work: WorkItem) -> RouteResult<()> {
        match route {
            RouteName::Host => self.route_host(work),
            RouteName::Default => self.route_default(work),
            RouteName::Runloop => self.route_runloop(work),
        }
    }

    /// Replace the target of a route. Takes effect for submissions made
    /// after this call returns; work already accepted stays where it is.
    pub fn rebind(&self, route: RouteName, target: Arc<dyn RouteTarget>) -> RouteResult<()> {
        if route == RouteName::Host {
            return Err(RouteError::NotRebindable(RouteName::Host));
        }
        if target.is_closed() {
            return Err(RouteError::TargetClosed(target.name().to_string()));
        }

        let previous = self.current_target(route);
        if route == RouteName::Default {
            self.default.store(Arc::new(Binding {
                target: target.clone(),
            }));
        } else {
            self.runloop
                .store(Arc::new(RunloopBinding::Bound(target.clone())));
        }

        self.metrics.record_rebind();
        info!(
            "Route {} rebound: {} -> {}",
            route,
            previous.name(),
            target.name()
        );
        Ok(())
    }

    /// Make the runloop route follow the default route again.
    pub fn reset_runloop(&self) {
        self.runloop.store(Arc::new(RunloopBinding::FollowDefault));
        self.metrics.record_rebind();
        info!("Route runloop follows default again");
    }

    /// Whether the runloop route has its own target.
    pub fn runloop_is_bound(&self) -> bool {
        matches!(**self.runloop.load(), RunloopBinding::Bound(_))
    }

    /// The target a submission on `route` would use right now.
    pub fn current_target(&self, route: RouteName) -> Arc<dyn RouteTarget> {
        match route {
            RouteName::Host => self.host.clone(),
            RouteName::Default => self.default.load().target.clone(),
            RouteName::Runloop => match &**self.runloop.load() {
                RunloopBinding::FollowDefault => self.default.load().target.clone(),
                RunloopBinding::Bound(target) => target.clone(),
            },
        }
    }

    /// Get the metrics.
    pub fn metrics(&self) -> &Arc<RouterMetrics> {
        &self.metrics
    }

    fn submit_to(
        &self,
        route: RouteName,
        target: &Arc<dyn RouteTarget>,
        work: WorkItem,
    ) -> RouteResult<()> {
        match target.submit(work) {
            Ok(()) => {
                self.metrics.record_submitted(route);
                debug!("Work routed via {} to {}", route, target.name());
                Ok(())
            }
            Err(e) => {
                self.metrics.record_rejected();
                warn!("Work rejected on route {}: {}", route, e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
#[path = "router_tests.rs"]
mod tests;
