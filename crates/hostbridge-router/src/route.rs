//! Route names, work items and the target abstraction.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{RouteError, RouteResult};

/// An opaque unit of deferred work.
pub type WorkItem = Box<dyn FnOnce() + Send + 'static>;

/// Logical name of a class of deferred work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteName {
    /// The host UI context.
    Host,
    /// The context that owns native-runtime communication.
    Default,
    /// The native application's main processing loop.
    Runloop,
}

impl RouteName {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Host => "host",
            Self::Default => "default",
            Self::Runloop => "runloop",
        }
    }
}

impl fmt::Display for RouteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RouteName {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "host" => Ok(Self::Host),
            "default" => Ok(Self::Default),
            "runloop" => Ok(Self::Runloop),
            other => Err(RouteError::UnknownRoute(other.to_string())),
        }
    }
}

/// A context that executes submitted work.
///
/// `submit` must not block: it enqueues and returns. Execution happens when
/// the owning context drains its queue.
pub trait RouteTarget: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &str;

    /// Enqueue work for execution on this target.
    fn submit(&self, work: WorkItem) -> RouteResult<()>;

    /// Whether the target stopped accepting work.
    fn is_closed(&self) -> bool {
        false
    }
}
