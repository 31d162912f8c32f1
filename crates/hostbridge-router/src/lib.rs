//! # HostBridge Router
//!
//! Routing layer that hands a unit of work to "the context that owns
//! native-runtime communication", where the identity of that context can be
//! swapped at runtime without callers changing.
//!
//! ## Routes
//!
//! - [`RouteName::Host`]: the host UI context. Never rebindable.
//! - [`RouteName::Default`]: native-runtime communication. Starts out bound
//!   to the host context; typically rebound to a rendering thread.
//! - [`RouteName::Runloop`]: the native main loop. Follows the default route
//!   until explicitly rebound.
//!
//! ## Ordering
//!
//! Work submitted from one context to one route runs in FIFO order. There is
//! no ordering across routes. Rebinding only changes where *future*
//! submissions go; work already accepted by the previous target stays there.
//!
//! ## Example
//!
//! ```rust,no_run
//! use hostbridge_router::{queue_target, RouteName, ThreadRouter};
//!
//! let (host, mut host_rx) = queue_target("host-ui");
//! let router = ThreadRouter::new(host);
//!
//! let (render, render_rx) = queue_target("render");
//! let _render_thread = render_rx.spawn_thread("render").unwrap();
//!
//! router.route_runloop(Box::new(|| println!("on host ui"))).unwrap();
//! router.rebind(RouteName::Runloop, render).unwrap();
//! router.route_runloop(Box::new(|| println!("on render thread"))).unwrap();
//!
//! host_rx.drain_pending();
//! ```

pub mod error;
pub mod metrics;
pub mod queue_target;
pub mod route;
pub mod router;

pub use error::{RouteError, RouteResult};
pub use metrics::{RouterMetrics, RouterMetricsSnapshot};
pub use queue_target::{panic_message, queue_target, QueueReceiver, QueueTarget};
pub use route::{RouteName, RouteTarget, WorkItem};
pub use router::ThreadRouter;
