//! Host-facing interfaces.
//!
//! The core never participates in the host's class hierarchy. Host bootstrap
//! code translates platform callbacks into [`LifecycleSink`] calls, and the
//! core calls back into host-specific behavior through [`HostShell`].

use crate::error::HostError;
use crate::extension::LifecycleEvent;
use crate::types::{ActivityResult, Configuration, Intent, KeyEvent, StateBundle, TrimLevel};

/// Inbound lifecycle interface implemented by the core's host component.
///
/// One call per host lifecycle transition. Payloads are forwarded verbatim
/// to every registered extension.
pub trait LifecycleSink: Send + Sync {
    fn on_create(&self, saved_state: Option<&StateBundle>) -> Result<(), HostError>;
    fn on_start(&self) -> Result<(), HostError>;
    fn on_restart(&self) -> Result<(), HostError>;
    fn on_resume(&self) -> Result<(), HostError>;
    fn on_pause(&self) -> Result<(), HostError>;
    fn on_stop(&self) -> Result<(), HostError>;
    fn on_destroy(&self) -> Result<(), HostError>;
    fn on_save_instance_state(&self, out_state: &mut StateBundle) -> Result<(), HostError>;
    fn on_low_memory(&self) -> Result<(), HostError>;
    fn on_trim_memory(&self, level: TrimLevel) -> Result<(), HostError>;
    fn on_new_intent(&self, intent: &Intent) -> Result<(), HostError>;
    fn on_configuration_changed(&self, config: &Configuration) -> Result<(), HostError>;

    /// Returns whether the host default consumed the key.
    fn on_key_down(&self, event: &KeyEvent) -> Result<bool, HostError>;

    /// Returns whether the host default consumed the key.
    fn on_key_up(&self, event: &KeyEvent) -> Result<bool, HostError>;

    /// Returns whether some extension claimed the result.
    fn on_activity_result(&self, result: &ActivityResult) -> Result<bool, HostError>;

    fn on_back_pressed(&self) -> Result<(), HostError>;
}

/// Outbound interface to host-specific behavior of the embedding component.
///
/// Window configuration, native library loading, runtime start and process
/// termination are external collaborators; the core only sequences them.
pub trait HostShell: Send + Sync {
    /// Window-feature setup (title bar, fullscreen flags).
    fn configure_window(&self) -> Result<(), HostError> {
        Ok(())
    }

    fn load_native_libraries(&self) -> Result<(), HostError> {
        Ok(())
    }

    /// Start the native runtime. Called exactly once, during creation.
    fn start_native_runtime(&self) -> Result<(), HostError>;

    /// The host's own behavior for an event with no dedicated default below.
    fn run_default(&self, _event: LifecycleEvent) {}

    /// Default handling of an activity result nobody claimed.
    fn default_activity_result(&self, _result: &ActivityResult) {}

    /// Default key handling. Returns whether the key was consumed.
    fn default_key(&self, _event: &KeyEvent) -> bool {
        false
    }

    /// Default back navigation, typically finishing the component.
    fn default_back_pressed(&self) {}

    /// The component is gone and the process should not linger.
    fn terminate_process(&self) {}
}

/// Outbound interface for the process-level host.
pub trait ApplicationShell: Send + Sync {
    fn run_default(&self, _event: LifecycleEvent) {}
}

/// A view published by an extension for lookup by other extensions.
pub trait HostView: Send + Sync {
    fn view_id(&self) -> &str;
}
