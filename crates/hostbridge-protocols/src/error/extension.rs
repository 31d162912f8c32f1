//! Extension hook errors.

use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum ExtensionError {
    #[error("Extension hook failed: {0}")]
    HookFailed(String),

    #[error("Extension panicked: {0}")]
    Panicked(String),

    #[error("Extension not ready: {0}")]
    NotReady(String),

    #[error("{0}")]
    Custom(String),
}
