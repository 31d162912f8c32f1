//! Process-level lifecycle dispatcher.

use std::sync::{Arc, Weak};

use tracing::info;

use hostbridge_protocols::{
    ApplicationExtension, ApplicationShell, Configuration, HookResult, LifecycleEvent, TrimLevel,
};

use crate::fault::{FaultSink, TracingFaultSink};
use crate::identity::ProcessIdentity;
use crate::registry::ExtensionRegistry;

static APPLICATION: ProcessIdentity<HostApplication> = ProcessIdentity::new();

/// The embedding process. Outlives any single [`HostActivity`](crate::HostActivity).
///
/// Every event runs the host default first, then every registered
/// [`ApplicationExtension`] in registration order.
pub struct HostApplication {
    self_ref: Weak<HostApplication>,
    shell: Arc<dyn ApplicationShell>,
    extensions: ExtensionRegistry<dyn ApplicationExtension>,
    fault_sink: Arc<dyn FaultSink>,
    identity: &'static ProcessIdentity<HostApplication>,
}

impl HostApplication {
    pub fn new(shell: Arc<dyn ApplicationShell>) -> Arc<Self> {
        Self::with_options(shell, Arc::new(TracingFaultSink), &APPLICATION)
    }

    pub fn with_options(
        shell: Arc<dyn ApplicationShell>,
        fault_sink: Arc<dyn FaultSink>,
        identity: &'static ProcessIdentity<HostApplication>,
    ) -> Arc<Self> {
        Arc::new_cyclic(|self_ref| Self {
            self_ref: self_ref.clone(),
            shell,
            extensions: ExtensionRegistry::new(),
            fault_sink,
            identity,
        })
    }

    /// The live application, if any.
    pub fn current() -> Option<Arc<HostApplication>> {
        APPLICATION.current()
    }

    pub fn register_extension(&self, extension: Arc<dyn ApplicationExtension>) -> bool {
        self.extensions.register(extension)
    }

    pub fn extensions(&self) -> &ExtensionRegistry<dyn ApplicationExtension> {
        &self.extensions
    }

    pub fn on_create(&self) {
        if let Some(this) = self.self_ref.upgrade() {
            self.identity.install(&this);
        }
        info!(extensions = self.extensions.len(), "Application created");
        self.dispatch(LifecycleEvent::Create, |e| e.on_create());
    }

    pub fn on_configuration_changed(&self, config: &Configuration) {
        self.dispatch(LifecycleEvent::ConfigurationChanged, |e| {
            e.on_configuration_changed(config)
        });
    }

    pub fn on_low_memory(&self) {
        self.dispatch(LifecycleEvent::LowMemory, |e| e.on_low_memory());
    }

    pub fn on_trim_memory(&self, level: TrimLevel) {
        self.dispatch(LifecycleEvent::TrimMemory, |e| e.on_trim_memory(level));
    }

    pub fn on_terminate(&self) {
        self.dispatch(LifecycleEvent::Terminate, |e| e.on_terminate());
        self.identity.clear_if(self);
        info!("Application terminated");
    }

    fn dispatch<F>(&self, event: LifecycleEvent, hook: F)
    where
        F: FnMut(&dyn ApplicationExtension) -> HookResult,
    {
        self.shell.run_default(event);
        let report = self.extensions.broadcast(event, hook);
        for fault in &report.faults {
            self.fault_sink.report(fault);
        }
    }
}

#[cfg(test)]
#[path = "application_tests.rs"]
mod tests;
