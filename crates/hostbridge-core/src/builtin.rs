//! Built-in extensions.

use tracing::debug;

use hostbridge_protocols::{
    ActivityResult, Configuration, Extension, ExtensionError, HookResult, Intent, KeyEvent,
    LifecycleEvent, StateBundle, TrimLevel,
};

/// Logs every lifecycle transition at debug level.
///
/// Never claims an activity result.
#[derive(Debug, Clone)]
pub struct TracingExtension {
    label: String,
}

impl TracingExtension {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }

    fn trace(&self, event: LifecycleEvent) -> HookResult {
        debug!(label = %self.label, event = %event, "Lifecycle transition");
        Ok(())
    }
}

impl Default for TracingExtension {
    fn default() -> Self {
        Self::new("lifecycle")
    }
}

impl Extension for TracingExtension {
    fn name(&self) -> &str {
        &self.label
    }

    fn on_create(&self, saved_state: Option<&StateBundle>) -> HookResult {
        debug!(
            label = %self.label,
            restored = saved_state.is_some(),
            "Lifecycle transition: create"
        );
        Ok(())
    }

    fn on_start(&self) -> HookResult {
        self.trace(LifecycleEvent::Start)
    }

    fn on_restart(&self) -> HookResult {
        self.trace(LifecycleEvent::Restart)
    }

    fn on_resume(&self) -> HookResult {
        self.trace(LifecycleEvent::Resume)
    }

    fn on_pause(&self) -> HookResult {
        self.trace(LifecycleEvent::Pause)
    }

    fn on_stop(&self) -> HookResult {
        self.trace(LifecycleEvent::Stop)
    }

    fn on_destroy(&self) -> HookResult {
        self.trace(LifecycleEvent::Destroy)
    }

    fn on_save_instance_state(&self, out_state: &mut StateBundle) -> HookResult {
        debug!(label = %self.label, keys = out_state.len(), "Lifecycle transition: save_instance_state");
        Ok(())
    }

    fn on_low_memory(&self) -> HookResult {
        self.trace(LifecycleEvent::LowMemory)
    }

    fn on_trim_memory(&self, level: TrimLevel) -> HookResult {
        debug!(label = %self.label, level = level.0, "Lifecycle transition: trim_memory");
        Ok(())
    }

    fn on_new_intent(&self, intent: &Intent) -> HookResult {
        debug!(label = %self.label, action = ?intent.action, "Lifecycle transition: new_intent");
        Ok(())
    }

    fn on_configuration_changed(&self, config: &Configuration) -> HookResult {
        debug!(
            label = %self.label,
            orientation = ?config.orientation,
            "Lifecycle transition: configuration_changed"
        );
        Ok(())
    }

    fn on_key_down(&self, event: &KeyEvent) -> HookResult {
        debug!(label = %self.label, key_code = event.key_code, "Lifecycle transition: key_down");
        Ok(())
    }

    fn on_key_up(&self, event: &KeyEvent) -> HookResult {
        debug!(label = %self.label, key_code = event.key_code, "Lifecycle transition: key_up");
        Ok(())
    }

    fn on_back_pressed(&self) -> HookResult {
        self.trace(LifecycleEvent::BackPressed)
    }

    fn on_activity_result(&self, result: &ActivityResult) -> Result<Option<bool>, ExtensionError> {
        debug!(
            label = %self.label,
            request_code = result.request_code,
            result_code = result.result_code,
            "Lifecycle transition: activity_result"
        );
        Ok(None)
    }
}
