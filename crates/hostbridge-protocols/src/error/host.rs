//! Host component errors.

use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum HostError {
    #[error("Window setup failed: {0}")]
    WindowSetup(String),

    #[error("Native library {library} failed to load: {message}")]
    LibraryLoad { library: String, message: String },

    #[error("Native runtime failed to start: {0}")]
    RuntimeStart(String),

    #[error("Host component already created")]
    AlreadyCreated,

    #[error("Host component creation is still running")]
    CreationInProgress,

    #[error("Host component is destroyed; {event} rejected")]
    Destroyed { event: String },

    #[error(
        "Callers should interact with the content root `{container}` instead of replacing the content view"
    )]
    ContentViewReplaced { container: String },
}
