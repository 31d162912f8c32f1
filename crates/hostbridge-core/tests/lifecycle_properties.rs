//! End-to-end lifecycle behavior through the public API.

use std::sync::Arc;
use std::thread;

use parking_lot::Mutex;

use hostbridge_core::{HostActivity, TracingExtension};
use hostbridge_protocols::{
    ActivityResult, Extension, ExtensionError, HookResult, HostError, HostShell, LifecycleSink,
};
use hostbridge_router::{queue_target, ThreadRouter};

type Log = Arc<Mutex<Vec<String>>>;

struct Shell(Log);

impl HostShell for Shell {
    fn start_native_runtime(&self) -> Result<(), HostError> {
        self.0.lock().push("runtime".into());
        Ok(())
    }

    fn default_activity_result(&self, _result: &ActivityResult) {
        self.0.lock().push("default_result".into());
    }

    fn default_back_pressed(&self) {
        self.0.lock().push("default_back".into());
    }
}

struct Probe {
    name: &'static str,
    log: Log,
    claim: bool,
    panics: bool,
}

impl Probe {
    fn new(name: &'static str, log: &Log) -> Self {
        Self {
            name,
            log: log.clone(),
            claim: false,
            panics: false,
        }
    }
}

impl Extension for Probe {
    fn name(&self) -> &str {
        self.name
    }

    fn on_stop(&self) -> HookResult {
        if self.panics {
            panic!("{} cannot stop", self.name);
        }
        self.log.lock().push(format!("{}:stop", self.name));
        Ok(())
    }

    fn on_back_pressed(&self) -> HookResult {
        self.log.lock().push(format!("{}:back", self.name));
        Ok(())
    }

    fn on_activity_result(&self, _result: &ActivityResult) -> Result<Option<bool>, ExtensionError> {
        self.log.lock().push(format!("{}:result", self.name));
        Ok(Some(self.claim))
    }
}

fn activity(log: &Log) -> Arc<HostActivity> {
    let (host, _host_rx) = queue_target("host-ui");
    let router = Arc::new(ThreadRouter::new(host));
    HostActivity::builder(Arc::new(Shell(log.clone())), router).build()
}

#[test]
fn registry_keeps_first_seen_order_without_duplicates() {
    let log: Log = Arc::default();
    let activity = activity(&log);
    let a: Arc<dyn Extension> = Arc::new(Probe::new("a", &log));
    let b: Arc<dyn Extension> = Arc::new(Probe::new("b", &log));

    for ext in [&a, &b, &a, &b, &a] {
        activity.register_extension(ext.clone());
    }

    assert_eq!(activity.extensions().names(), vec!["a", "b"]);
}

#[test]
fn unconditional_broadcast_survives_a_panicking_extension() {
    let log: Log = Arc::default();
    let activity = activity(&log);
    let mut b = Probe::new("b", &log);
    b.panics = true;
    activity.register_extension(Arc::new(Probe::new("a", &log)));
    activity.register_extension(Arc::new(b));
    activity.register_extension(Arc::new(Probe::new("c", &log)));

    activity.on_stop().unwrap();

    assert_eq!(*log.lock(), vec!["a:stop", "c:stop"]);
}

#[test]
fn claimed_result_stops_walk_and_skips_default() {
    let log: Log = Arc::default();
    let activity = activity(&log);
    let mut b = Probe::new("b", &log);
    b.claim = true;
    activity.register_extension(Arc::new(Probe::new("a", &log)));
    activity.register_extension(Arc::new(b));
    activity.register_extension(Arc::new(Probe::new("c", &log)));

    assert!(activity
        .on_activity_result(&ActivityResult::new(1, ActivityResult::RESULT_OK))
        .unwrap());
    assert_eq!(*log.lock(), vec!["a:result", "b:result"]);
}

#[test]
fn unclaimed_result_runs_default_once_after_everyone() {
    let log: Log = Arc::default();
    let activity = activity(&log);
    activity.register_extension(Arc::new(Probe::new("a", &log)));
    activity.register_extension(Arc::new(Probe::new("b", &log)));
    activity.register_extension(Arc::new(TracingExtension::default()));

    assert!(!activity
        .on_activity_result(&ActivityResult::new(1, ActivityResult::RESULT_OK))
        .unwrap());
    assert_eq!(*log.lock(), vec!["a:result", "b:result", "default_result"]);
}

#[test]
fn back_flag_gates_default_but_not_extensions() {
    let log: Log = Arc::default();
    let activity = activity(&log);
    activity.register_extension(Arc::new(Probe::new("a", &log)));

    activity.set_default_on_back(false);
    activity.on_back_pressed().unwrap();
    activity.set_default_on_back(true);
    activity.on_back_pressed().unwrap();

    assert_eq!(*log.lock(), vec!["a:back", "a:back", "default_back"]);
}

#[test]
fn runloop_route_moves_to_render_thread_without_losing_queued_work() {
    let (host, mut host_rx) = queue_target("host-ui");
    let (render, render_rx) = queue_target("render");
    let router = Arc::new(ThreadRouter::new(host));
    let log: Log = Arc::default();
    let activity = HostActivity::builder(Arc::new(Shell(log.clone())), router.clone()).build();

    let ran: Arc<Mutex<Vec<(u32, String)>>> = Arc::default();
    let submit = |n: u32| {
        let ran = ran.clone();
        activity
            .queue_on_native_runloop(Box::new(move || {
                let context = thread::current().name().unwrap_or("?").to_string();
                ran.lock().push((n, context));
            }))
            .unwrap();
    };

    submit(1);
    submit(2);
    activity.set_runloop_target(render).unwrap();
    submit(3);

    let metrics = router.metrics().snapshot();
    assert_eq!(metrics.runloop_submitted, 3);
    assert_eq!(metrics.rebinds, 1);

    let render_thread = render_rx.spawn_thread("render").unwrap();
    drop(activity);
    drop(router);
    assert_eq!(render_thread.join().unwrap(), 1);

    // Earlier work stays on the host queue until the host drains it.
    assert_eq!(host_rx.drain_pending(), 2);

    let ran = ran.lock();
    assert_eq!(ran[0], (3, "render".to_string()));
    assert_eq!(ran[1].0, 1);
    assert_eq!(ran[2].0, 2);
    assert!(ran[1..].iter().all(|(_, context)| context != "render"));
}

#[test]
fn current_instance_is_cleared_by_destroy() {
    let log: Log = Arc::default();
    let activity = activity(&log);

    activity.on_create(None).unwrap();
    let current = HostActivity::current().expect("live after create");
    assert_eq!(current.instance_id(), activity.instance_id());
    drop(current);

    activity.on_destroy().unwrap();
    assert!(HostActivity::current().is_none());
}
