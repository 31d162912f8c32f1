//! Extension trait definitions.

use crate::error::ExtensionError;
use crate::types::{ActivityResult, Configuration, Intent, KeyEvent, StateBundle, TrimLevel};

/// Result type returned by every unconditional hook.
pub type HookResult = Result<(), ExtensionError>;

/// Activity-level lifecycle observer.
///
/// Each method corresponds to one host lifecycle transition and defaults to a
/// no-op, so an extension overrides only the hooks it cares about. Hooks take
/// `&self`; extensions that keep state use interior mutability.
///
/// Identity is reference identity: the same `Arc` registered twice is kept
/// once, while two distinct instances of the same type are both kept.
pub trait Extension: Send + Sync + 'static {
    /// Name used in logs and fault reports.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Called after the host finished its own initialization and the native
    /// runtime has been started.
    fn on_create(&self, _saved_state: Option<&StateBundle>) -> HookResult {
        Ok(())
    }

    fn on_start(&self) -> HookResult {
        Ok(())
    }

    /// Called when a stopped component is being displayed again.
    fn on_restart(&self) -> HookResult {
        Ok(())
    }

    fn on_resume(&self) -> HookResult {
        Ok(())
    }

    fn on_pause(&self) -> HookResult {
        Ok(())
    }

    fn on_stop(&self) -> HookResult {
        Ok(())
    }

    /// Final cleanup. Runs before the process identity is cleared.
    fn on_destroy(&self) -> HookResult {
        Ok(())
    }

    /// Called before the component may be killed. Every extension receives
    /// the same bundle and may write into it.
    fn on_save_instance_state(&self, _out_state: &mut StateBundle) -> HookResult {
        Ok(())
    }

    fn on_low_memory(&self) -> HookResult {
        Ok(())
    }

    fn on_trim_memory(&self, _level: TrimLevel) -> HookResult {
        Ok(())
    }

    fn on_new_intent(&self, _intent: &Intent) -> HookResult {
        Ok(())
    }

    fn on_configuration_changed(&self, _config: &Configuration) -> HookResult {
        Ok(())
    }

    fn on_key_down(&self, _event: &KeyEvent) -> HookResult {
        Ok(())
    }

    fn on_key_up(&self, _event: &KeyEvent) -> HookResult {
        Ok(())
    }

    fn on_back_pressed(&self) -> HookResult {
        Ok(())
    }

    /// Delivery of a result from a component this one launched.
    ///
    /// `Ok(None)` means the extension has no opinion and never claims the
    /// result. `Ok(Some(flag))` is interpreted by the dispatcher's claim
    /// polarity. A failing hook never claims.
    fn on_activity_result(
        &self,
        _result: &ActivityResult,
    ) -> Result<Option<bool>, ExtensionError> {
        Ok(None)
    }
}

/// Process-level lifecycle observer.
pub trait ApplicationExtension: Send + Sync + 'static {
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    fn on_create(&self) -> HookResult {
        Ok(())
    }

    fn on_configuration_changed(&self, _config: &Configuration) -> HookResult {
        Ok(())
    }

    fn on_low_memory(&self) -> HookResult {
        Ok(())
    }

    fn on_trim_memory(&self, _level: TrimLevel) -> HookResult {
        Ok(())
    }

    fn on_terminate(&self) -> HookResult {
        Ok(())
    }
}
