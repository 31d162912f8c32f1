//! Error types for the routing layer.

use thiserror::Error;

use crate::route::RouteName;

/// Errors that can occur while routing work.
#[derive(Debug, Error)]
pub enum RouteError {
    /// The target no longer accepts work.
    #[error("Route target closed: {0}")]
    TargetClosed(String),

    /// The route is fixed to its original target.
    #[error("Route {0} cannot be rebound")]
    NotRebindable(RouteName),

    /// Unknown route name.
    #[error("Unknown route: {0}")]
    UnknownRoute(String),

    /// Drain thread could not be spawned.
    #[error("Failed to spawn drain thread: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Result type for routing operations.
pub type RouteResult<T> = Result<T, RouteError>;
