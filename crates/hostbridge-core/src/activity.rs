//! Host component lifecycle dispatcher.
//!
//! [`HostActivity`] receives one [`LifecycleSink`] call per host transition,
//! runs the host's own behavior through its [`HostShell`] and fans the event
//! out to every registered [`Extension`] in registration order.
//!
//! Ordering per event:
//! - creation: window setup, native libraries and runtime start complete
//!   before the first extension hook
//! - entering events (start, resume, pause, ...): host default first
//! - exiting and result events (new intent, keys, results, back): extensions
//!   first, host default afterward
//! - destruction: extensions, then the process identity is cleared, then
//!   host teardown and process termination

use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use hostbridge_protocols::{
    ActivityResult, ClaimPolarity, Configuration, DefaultOrder, Extension, HookResult, HostError,
    HostShell, HostView, Intent, KeyEvent, LifecycleEvent, LifecycleSink, StateBundle, TrimLevel,
};
use hostbridge_router::{RouteName, RouteResult, RouteTarget, ThreadRouter, WorkItem};

use crate::fault::{FaultSink, TracingFaultSink};
use crate::identity::ProcessIdentity;
use crate::registry::{BroadcastReport, ExtensionRegistry};

#[cfg(test)]
#[path = "activity_tests.rs"]
mod tests;

/// Container extensions attach their views to.
pub const DEFAULT_CONTENT_ROOT: &str = "content_root";

static ACTIVITY: ProcessIdentity<HostActivity> = ProcessIdentity::new();

/// Host component state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ActivityState {
    /// Built, creation not yet delivered.
    Initialized = 0,
    /// Creation claimed by one caller; host initialization is running.
    Creating = 1,
    /// Creation completed; lifecycle events are dispatched.
    Created = 2,
    /// Destroyed. Further events are rejected.
    Destroyed = 3,
}

impl From<u8> for ActivityState {
    fn from(v: u8) -> Self {
        match v {
            1 => ActivityState::Creating,
            2 => ActivityState::Created,
            3 => ActivityState::Destroyed,
            _ => ActivityState::Initialized,
        }
    }
}

/// The embedded host component.
pub struct HostActivity {
    instance_id: Uuid,
    self_ref: Weak<HostActivity>,
    state: AtomicU8,
    shell: Arc<dyn HostShell>,
    router: Arc<ThreadRouter>,
    extensions: ExtensionRegistry<dyn Extension>,
    polarity: ClaimPolarity,
    default_on_back: AtomicBool,
    fault_sink: Arc<dyn FaultSink>,
    content_root: String,
    main_view: RwLock<Option<Weak<dyn HostView>>>,
    identity: &'static ProcessIdentity<HostActivity>,
}

impl HostActivity {
    pub fn builder(shell: Arc<dyn HostShell>, router: Arc<ThreadRouter>) -> HostActivityBuilder {
        HostActivityBuilder::new(shell, router)
    }

    /// The live host component, if any.
    ///
    /// `None` before creation and after destruction is expected; callers on
    /// any thread must check every read.
    pub fn current() -> Option<Arc<HostActivity>> {
        ACTIVITY.current()
    }

    pub fn instance_id(&self) -> Uuid {
        self.instance_id
    }

    pub fn state(&self) -> ActivityState {
        ActivityState::from(self.state.load(Ordering::SeqCst))
    }

    pub fn polarity(&self) -> ClaimPolarity {
        self.polarity
    }

    /// Add an extension. Only valid during single-threaded initialization.
    ///
    /// Returns `false` when this instance was already registered.
    pub fn register_extension(&self, extension: Arc<dyn Extension>) -> bool {
        self.extensions.register(extension)
    }

    pub fn extensions(&self) -> &ExtensionRegistry<dyn Extension> {
        &self.extensions
    }

    pub fn default_on_back(&self) -> bool {
        self.default_on_back.load(Ordering::SeqCst)
    }

    /// Whether the host's default back behavior runs after extensions were
    /// notified of a back press.
    pub fn set_default_on_back(&self, enabled: bool) {
        self.default_on_back.store(enabled, Ordering::SeqCst);
    }

    /// Name of the container views must be attached to.
    pub fn content_root(&self) -> &str {
        &self.content_root
    }

    /// Always rejected: replacing the content view would detach the native
    /// runtime's surface. Attach to [`content_root`](Self::content_root).
    pub fn set_content_view(&self, _view: Arc<dyn HostView>) -> Result<(), HostError> {
        Err(HostError::ContentViewReplaced {
            container: self.content_root.clone(),
        })
    }

    /// Publish the main view so other extensions can find it.
    pub fn set_main_view(&self, view: &Arc<dyn HostView>) {
        debug!("Main view set: {}", view.view_id());
        *self.main_view.write() = Some(Arc::downgrade(view));
    }

    pub fn main_view(&self) -> Option<Arc<dyn HostView>> {
        self.main_view.read().as_ref().and_then(Weak::upgrade)
    }

    pub fn router(&self) -> &Arc<ThreadRouter> {
        &self.router
    }

    /// Run `work` on the context currently serving native-runtime calls.
    pub fn queue_on_native_thread(&self, work: WorkItem) -> RouteResult<()> {
        self.router.route_default(work)
    }

    /// Run `work` on the native main loop.
    ///
    /// Until a runloop target is bound this is the same as
    /// [`queue_on_native_thread`](Self::queue_on_native_thread).
    pub fn queue_on_native_runloop(&self, work: WorkItem) -> RouteResult<()> {
        self.router.route_runloop(work)
    }

    /// Run `work` on the host UI context.
    pub fn queue_on_host_thread(&self, work: WorkItem) -> RouteResult<()> {
        self.router.route_host(work)
    }

    /// Bind the native-thread route, e.g. to a rendering thread.
    pub fn set_native_thread_target(&self, target: Arc<dyn RouteTarget>) -> RouteResult<()> {
        self.router.rebind(RouteName::Default, target)
    }

    pub fn set_runloop_target(&self, target: Arc<dyn RouteTarget>) -> RouteResult<()> {
        self.router.rebind(RouteName::Runloop, target)
    }

    /// Atomically move `from` to `to`, returning the observed state on
    /// failure.
    fn transition(&self, from: ActivityState, to: ActivityState) -> Result<(), ActivityState> {
        self.state
            .compare_exchange(from as u8, to as u8, Ordering::SeqCst, Ordering::SeqCst)
            .map(|_| ())
            .map_err(ActivityState::from)
    }

    fn ensure_alive(&self, event: LifecycleEvent) -> Result<(), HostError> {
        if self.state() == ActivityState::Destroyed {
            return Err(HostError::Destroyed {
                event: event.to_string(),
            });
        }
        Ok(())
    }

    /// Broadcast an unconditional event, running the host default on the
    /// side its ordering rule names.
    fn dispatch<F>(&self, event: LifecycleEvent, hook: F) -> Result<(), HostError>
    where
        F: FnMut(&dyn Extension) -> HookResult,
    {
        self.ensure_alive(event)?;
        let order = event.default_order();

        if order == DefaultOrder::BeforeBroadcast {
            self.shell.run_default(event);
        }
        let report = self.extensions.broadcast(event, hook);
        self.finish(report);
        if order == DefaultOrder::AfterBroadcast {
            self.shell.run_default(event);
        }
        Ok(())
    }

    fn finish(&self, report: BroadcastReport) {
        debug!(
            event = %report.event,
            invoked = report.invoked,
            faults = report.faults.len(),
            "Broadcast finished"
        );
        for fault in &report.faults {
            self.fault_sink.report(fault);
        }
    }

    fn run_creation(&self, saved_state: Option<&StateBundle>) -> Result<(), HostError> {
        self.shell.run_default(LifecycleEvent::Create);
        self.shell.configure_window()?;
        self.shell.load_native_libraries()?;
        self.shell.start_native_runtime()?;
        info!(instance = %self.instance_id, "Native runtime started");

        // Destroy is refused while Creating, so no other writer can race this.
        self.state
            .store(ActivityState::Created as u8, Ordering::SeqCst);
        let report = self
            .extensions
            .broadcast(LifecycleEvent::Create, |e| e.on_create(saved_state));
        self.finish(report);
        Ok(())
    }
}

impl LifecycleSink for HostActivity {
    fn on_create(&self, saved_state: Option<&StateBundle>) -> Result<(), HostError> {
        match self.transition(ActivityState::Initialized, ActivityState::Creating) {
            Ok(()) => {}
            Err(ActivityState::Destroyed) => {
                return Err(HostError::Destroyed {
                    event: LifecycleEvent::Create.to_string(),
                })
            }
            Err(_) => return Err(HostError::AlreadyCreated),
        }

        if let Some(this) = self.self_ref.upgrade() {
            self.identity.install(&this);
        }
        info!(
            instance = %self.instance_id,
            extensions = self.extensions.len(),
            "Host component creating"
        );

        if let Err(e) = self.run_creation(saved_state) {
            self.identity.clear_if(self);
            let _ = self.transition(ActivityState::Creating, ActivityState::Initialized);
            return Err(e);
        }
        Ok(())
    }

    fn on_start(&self) -> Result<(), HostError> {
        self.dispatch(LifecycleEvent::Start, |e| e.on_start())
    }

    fn on_restart(&self) -> Result<(), HostError> {
        self.dispatch(LifecycleEvent::Restart, |e| e.on_restart())
    }

    fn on_resume(&self) -> Result<(), HostError> {
        self.dispatch(LifecycleEvent::Resume, |e| e.on_resume())
    }

    fn on_pause(&self) -> Result<(), HostError> {
        self.dispatch(LifecycleEvent::Pause, |e| e.on_pause())
    }

    fn on_stop(&self) -> Result<(), HostError> {
        self.dispatch(LifecycleEvent::Stop, |e| e.on_stop())
    }

    fn on_destroy(&self) -> Result<(), HostError> {
        let claimed = self
            .state
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |current| {
                match ActivityState::from(current) {
                    ActivityState::Initialized | ActivityState::Created => {
                        Some(ActivityState::Destroyed as u8)
                    }
                    ActivityState::Creating | ActivityState::Destroyed => None,
                }
            });
        match claimed.map_err(ActivityState::from) {
            Ok(_) => {}
            Err(ActivityState::Creating) => return Err(HostError::CreationInProgress),
            Err(_) => {
                return Err(HostError::Destroyed {
                    event: LifecycleEvent::Destroy.to_string(),
                })
            }
        }

        let report = self
            .extensions
            .broadcast(LifecycleEvent::Destroy, |e| e.on_destroy());
        self.finish(report);

        self.identity.clear_if(self);
        self.shell.run_default(LifecycleEvent::Destroy);
        info!(instance = %self.instance_id, "Host component destroyed");

        self.shell.terminate_process();
        Ok(())
    }

    fn on_save_instance_state(&self, out_state: &mut StateBundle) -> Result<(), HostError> {
        self.dispatch(LifecycleEvent::SaveInstanceState, |e| {
            e.on_save_instance_state(out_state)
        })
    }

    fn on_low_memory(&self) -> Result<(), HostError> {
        self.dispatch(LifecycleEvent::LowMemory, |e| e.on_low_memory())
    }

    fn on_trim_memory(&self, level: TrimLevel) -> Result<(), HostError> {
        self.dispatch(LifecycleEvent::TrimMemory, |e| e.on_trim_memory(level))
    }

    fn on_new_intent(&self, intent: &Intent) -> Result<(), HostError> {
        self.dispatch(LifecycleEvent::NewIntent, |e| e.on_new_intent(intent))
    }

    fn on_configuration_changed(&self, config: &Configuration) -> Result<(), HostError> {
        self.dispatch(LifecycleEvent::ConfigurationChanged, |e| {
            e.on_configuration_changed(config)
        })
    }

    fn on_key_down(&self, event: &KeyEvent) -> Result<bool, HostError> {
        self.ensure_alive(LifecycleEvent::KeyDown)?;
        let report = self
            .extensions
            .broadcast(LifecycleEvent::KeyDown, |e| e.on_key_down(event));
        self.finish(report);
        Ok(self.shell.default_key(event))
    }

    fn on_key_up(&self, event: &KeyEvent) -> Result<bool, HostError> {
        self.ensure_alive(LifecycleEvent::KeyUp)?;
        let report = self
            .extensions
            .broadcast(LifecycleEvent::KeyUp, |e| e.on_key_up(event));
        self.finish(report);
        Ok(self.shell.default_key(event))
    }

    fn on_activity_result(&self, result: &ActivityResult) -> Result<bool, HostError> {
        self.ensure_alive(LifecycleEvent::ActivityResult)?;
        let polarity = self.polarity;

        let report = self
            .extensions
            .broadcast_until(LifecycleEvent::ActivityResult, |e| {
                let reply = e.on_activity_result(result)?;
                Ok(reply.is_some_and(|flag| polarity.is_claim(flag)))
            });
        let claimed = report.claimed();
        self.finish(report);

        if !claimed {
            self.shell.default_activity_result(result);
        }
        Ok(claimed)
    }

    fn on_back_pressed(&self) -> Result<(), HostError> {
        self.ensure_alive(LifecycleEvent::BackPressed)?;
        let report = self
            .extensions
            .broadcast(LifecycleEvent::BackPressed, |e| e.on_back_pressed());
        self.finish(report);

        if self.default_on_back() {
            self.shell.default_back_pressed();
        }
        Ok(())
    }
}

/// Builder for [`HostActivity`].
pub struct HostActivityBuilder {
    shell: Arc<dyn HostShell>,
    router: Arc<ThreadRouter>,
    polarity: ClaimPolarity,
    default_on_back: bool,
    fault_sink: Arc<dyn FaultSink>,
    content_root: String,
    identity: &'static ProcessIdentity<HostActivity>,
}

impl HostActivityBuilder {
    pub fn new(shell: Arc<dyn HostShell>, router: Arc<ThreadRouter>) -> Self {
        Self {
            shell,
            router,
            polarity: ClaimPolarity::default(),
            default_on_back: true,
            fault_sink: Arc::new(TracingFaultSink),
            content_root: DEFAULT_CONTENT_ROOT.to_string(),
            identity: &ACTIVITY,
        }
    }

    /// Which activity-result reply claims the result.
    pub fn polarity(mut self, polarity: ClaimPolarity) -> Self {
        self.polarity = polarity;
        self
    }

    pub fn default_on_back(mut self, enabled: bool) -> Self {
        self.default_on_back = enabled;
        self
    }

    pub fn fault_sink(mut self, sink: Arc<dyn FaultSink>) -> Self {
        self.fault_sink = sink;
        self
    }

    pub fn content_root(mut self, name: impl Into<String>) -> Self {
        self.content_root = name.into();
        self
    }

    /// Publish into `identity` instead of the process-wide slot read by
    /// [`HostActivity::current`].
    pub fn identity(mut self, identity: &'static ProcessIdentity<HostActivity>) -> Self {
        self.identity = identity;
        self
    }

    pub fn build(self) -> Arc<HostActivity> {
        Arc::new_cyclic(|self_ref| HostActivity {
            instance_id: Uuid::new_v4(),
            self_ref: self_ref.clone(),
            state: AtomicU8::new(ActivityState::Initialized as u8),
            shell: self.shell,
            router: self.router,
            extensions: ExtensionRegistry::new(),
            polarity: self.polarity,
            default_on_back: AtomicBool::new(self.default_on_back),
            fault_sink: self.fault_sink,
            content_root: self.content_root,
            main_view: RwLock::new(None),
            identity: self.identity,
        })
    }
}
