//! `simulate` command: a host bootstrap without a platform behind it.
//!
//! The main task plays the host UI context and drains the host queue
//! between lifecycle steps, the way a platform event loop would.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;
use std::thread;

use tracing::{debug, info, warn};

use hostbridge_config::{Config, ConfigValidator};
use hostbridge_core::{HostActivity, TracingExtension};
use hostbridge_protocols::{
    ActivityResult, Configuration, Extension, ExtensionError, HookResult, HostError, HostShell,
    HostView, Intent, KeyEvent, LifecycleEvent, LifecycleSink, Orientation, StateBundle, TrimLevel,
};
use hostbridge_router::{queue_target, QueueReceiver, RouteName, ThreadRouter};

/// Request code the demo surface extension claims.
const SURFACE_REQUEST: i32 = 42;

pub(crate) struct SimulateOptions {
    pub work_items: u32,
    pub render_thread: Option<String>,
    pub no_default_back: bool,
    pub metrics: bool,
}

/// Host behavior backed by log lines instead of a windowing system.
struct SimulatedShell {
    config: Config,
    runtime_started: AtomicBool,
    terminated: AtomicBool,
}

impl SimulatedShell {
    fn new(config: Config) -> Self {
        Self {
            config,
            runtime_started: AtomicBool::new(false),
            terminated: AtomicBool::new(false),
        }
    }
}

impl HostShell for SimulatedShell {
    fn configure_window(&self) -> Result<(), HostError> {
        let window = &self.config.window;
        info!(
            title = %window.title,
            fullscreen = window.fullscreen,
            hide_title_bar = window.hide_title_bar,
            "Window configured"
        );
        Ok(())
    }

    fn load_native_libraries(&self) -> Result<(), HostError> {
        for library in &self.config.native.libraries {
            if library.trim().is_empty() {
                return Err(HostError::LibraryLoad {
                    library: library.clone(),
                    message: "empty library name".to_string(),
                });
            }
            info!("Loaded native library: {}", library);
        }
        Ok(())
    }

    fn start_native_runtime(&self) -> Result<(), HostError> {
        if self.runtime_started.swap(true, Ordering::SeqCst) {
            return Err(HostError::RuntimeStart("runtime already started".to_string()));
        }
        info!(entry_point = %self.config.native.entry_point, "Native runtime running");
        Ok(())
    }

    fn run_default(&self, event: LifecycleEvent) {
        debug!("Host default: {}", event);
    }

    fn default_activity_result(&self, result: &ActivityResult) {
        info!(
            request_code = result.request_code,
            "Activity result not claimed, host default applied"
        );
    }

    fn default_key(&self, event: &KeyEvent) -> bool {
        event.key_code == KeyEvent::KEYCODE_BACK
    }

    fn default_back_pressed(&self) {
        info!("Host default back: finishing component");
    }

    fn terminate_process(&self) {
        self.terminated.store(true, Ordering::SeqCst);
        info!("Process termination requested");
    }
}

/// The native runtime's drawing surface.
struct Surface;

impl HostView for Surface {
    fn view_id(&self) -> &str {
        "native-surface"
    }
}

/// Publishes the surface as the main view and claims its own results.
struct SurfaceExtension {
    surface: Arc<dyn HostView>,
    claimed: AtomicU32,
}

impl SurfaceExtension {
    fn new() -> Self {
        Self {
            surface: Arc::new(Surface),
            claimed: AtomicU32::new(0),
        }
    }
}

impl Extension for SurfaceExtension {
    fn name(&self) -> &str {
        "surface"
    }

    fn on_create(&self, _saved_state: Option<&StateBundle>) -> HookResult {
        let activity = HostActivity::current()
            .ok_or_else(|| ExtensionError::NotReady("no live host component".to_string()))?;
        activity.set_main_view(&self.surface);
        info!(container = %activity.content_root(), "Surface attached");
        Ok(())
    }

    fn on_save_instance_state(&self, out_state: &mut StateBundle) -> HookResult {
        out_state.put("surface.claimed", self.claimed.load(Ordering::SeqCst));
        Ok(())
    }

    fn on_activity_result(&self, result: &ActivityResult) -> Result<Option<bool>, ExtensionError> {
        if result.request_code != SURFACE_REQUEST {
            return Ok(None);
        }
        self.claimed.fetch_add(1, Ordering::SeqCst);
        Ok(Some(true))
    }
}

pub(crate) async fn run_simulate(
    config: Config,
    options: SimulateOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let validation = ConfigValidator::validate(&config);
    for warning in &validation.warnings {
        warn!("Config {}: {}", warning.path, warning.message);
    }
    if let Some(err) = validation.into_error() {
        return Err(err.into());
    }

    let render_thread = options
        .render_thread
        .clone()
        .or_else(|| config.router.render_thread.clone());
    let render_route: RouteName = config.router.render_route.parse()?;
    let default_on_back = config.dispatch.default_on_back && !options.no_default_back;

    let (host, mut host_rx) = queue_target(config.router.host_thread.clone());
    let router = Arc::new(ThreadRouter::new(host));
    let shell = Arc::new(SimulatedShell::new(config.clone()));

    let activity = HostActivity::builder(shell.clone(), router.clone())
        .polarity(config.dispatch.claim_polarity)
        .default_on_back(default_on_back)
        .content_root(config.window.content_root.clone())
        .build();

    activity.register_extension(Arc::new(TracingExtension::default()));
    activity.register_extension(Arc::new(SurfaceExtension::new()));

    info!(instance = %activity.instance_id(), "Simulating host lifecycle");
    activity.on_create(None)?;
    activity.on_start()?;
    activity.on_resume()?;
    drain_host(&mut host_rx);

    let render_join = match render_thread {
        Some(name) => {
            let (render, render_rx) = queue_target(name.clone());
            let join = render_rx.spawn_thread(name.clone())?;
            router.rebind(render_route, render)?;
            info!("Route {} bound to render thread {}", render_route, name);
            Some(join)
        }
        None => None,
    };

    let native = {
        let activity = activity.clone();
        let work_items = options.work_items;
        tokio::spawn(async move {
            for n in 0..work_items {
                let submitted = activity.queue_on_native_runloop(Box::new(move || {
                    let current = thread::current();
                    debug!(
                        item = n,
                        thread = current.name().unwrap_or("unnamed"),
                        "Runloop work executed"
                    );
                }));
                if let Err(e) = submitted {
                    warn!("Runloop submission failed: {}", e);
                }
                tokio::task::yield_now().await;
            }
            let _ = activity.queue_on_host_thread(Box::new(|| info!("Native runtime idle")));
        })
    };
    native.await?;
    drain_host(&mut host_rx);

    activity.on_configuration_changed(
        &Configuration::default().with_orientation(Orientation::Landscape),
    )?;
    activity.on_new_intent(&Intent::new("VIEW").with_data("hostbridge://level/2"))?;
    activity.on_key_down(&KeyEvent::down(KeyEvent::KEYCODE_MENU))?;
    activity.on_key_up(&KeyEvent::up(KeyEvent::KEYCODE_MENU))?;

    let claimed = activity.on_activity_result(&ActivityResult::new(
        SURFACE_REQUEST,
        ActivityResult::RESULT_OK,
    ))?;
    info!(claimed, "Surface activity result delivered");
    let claimed = activity.on_activity_result(&ActivityResult::new(7, ActivityResult::RESULT_CANCELED))?;
    info!(claimed, "Foreign activity result delivered");

    activity.on_back_pressed()?;
    activity.on_trim_memory(TrimLevel::UI_HIDDEN)?;

    let mut saved = StateBundle::new();
    activity.on_save_instance_state(&mut saved)?;
    info!(keys = saved.len(), "Instance state saved");

    activity.on_pause()?;
    activity.on_stop()?;
    activity.on_destroy()?;
    drain_host(&mut host_rx);

    if HostActivity::current().is_some() {
        warn!("Host component still published after destroy");
    }

    let snapshot = router.metrics().snapshot();
    drop(activity);
    drop(router);

    if let Some(join) = render_join {
        match join.join() {
            Ok(executed) => info!("Render thread finished after {} items", executed),
            Err(_) => warn!("Render thread panicked"),
        }
    }

    info!(
        submitted = snapshot.total_submitted(),
        rebinds = snapshot.rebinds,
        terminated = shell.terminated.load(Ordering::SeqCst),
        "Simulation finished"
    );
    if options.metrics {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    }
    Ok(())
}

fn drain_host(host_rx: &mut QueueReceiver) {
    let ran = host_rx.drain_pending();
    if ran > 0 {
        debug!("Host UI drained {} items", ran);
    }
}
