use super::*;
use hostbridge_protocols::ExtensionError;
use parking_lot::Mutex;

use crate::fault::ExtensionFault;

type Log = Arc<Mutex<Vec<String>>>;

struct Shell(Log);

impl ApplicationShell for Shell {
    fn run_default(&self, event: LifecycleEvent) {
        self.0.lock().push(format!("host:{event}"));
    }
}

struct Observer {
    name: &'static str,
    log: Log,
}

impl ApplicationExtension for Observer {
    fn name(&self) -> &str {
        self.name
    }

    fn on_create(&self) -> HookResult {
        self.log.lock().push(format!("{}:create", self.name));
        Ok(())
    }

    fn on_low_memory(&self) -> HookResult {
        Err(ExtensionError::NotReady(self.name.to_string()))
    }

    fn on_trim_memory(&self, level: TrimLevel) -> HookResult {
        self.log.lock().push(format!("{}:trim:{}", self.name, level.0));
        Ok(())
    }

    fn on_terminate(&self) -> HookResult {
        self.log.lock().push(format!("{}:terminate", self.name));
        Ok(())
    }
}

fn isolated_identity() -> &'static ProcessIdentity<HostApplication> {
    Box::leak(Box::new(ProcessIdentity::new()))
}

fn observer(name: &'static str, log: &Log) -> Arc<dyn ApplicationExtension> {
    Arc::new(Observer {
        name,
        log: log.clone(),
    })
}

#[test]
fn test_default_runs_before_extensions() {
    let log: Log = Arc::default();
    let app = HostApplication::with_options(
        Arc::new(Shell(log.clone())),
        Arc::new(TracingFaultSink),
        isolated_identity(),
    );
    app.register_extension(observer("a", &log));
    app.register_extension(observer("b", &log));

    app.on_create();
    app.on_trim_memory(TrimLevel::BACKGROUND);

    assert_eq!(
        *log.lock(),
        vec![
            "host:create",
            "a:create",
            "b:create",
            "host:trim_memory",
            "a:trim:40",
            "b:trim:40"
        ]
    );
}

#[test]
fn test_identity_lives_from_create_to_terminate() {
    let log: Log = Arc::default();
    let identity = isolated_identity();
    let app = HostApplication::with_options(
        Arc::new(Shell(log.clone())),
        Arc::new(TracingFaultSink),
        identity,
    );
    assert!(identity.current().is_none());

    app.on_create();
    assert!(identity.current().is_some());

    app.on_terminate();
    assert!(identity.current().is_none());
    assert!(log.lock().ends_with(&["host:terminate".to_string()]));
}

#[test]
fn test_faults_reach_sink() {
    let log: Log = Arc::default();
    let faults: Arc<Mutex<Vec<ExtensionFault>>> = Arc::default();
    let sink = faults.clone();
    let app = HostApplication::with_options(
        Arc::new(Shell(log.clone())),
        Arc::new(move |fault: &ExtensionFault| sink.lock().push(fault.clone())),
        isolated_identity(),
    );
    app.register_extension(observer("a", &log));
    app.register_extension(observer("b", &log));

    app.on_low_memory();

    let faults = faults.lock();
    assert_eq!(faults.len(), 2);
    assert!(faults.iter().all(|f| f.event == LifecycleEvent::LowMemory));
}

#[test]
fn test_duplicate_registration_ignored() {
    let log: Log = Arc::default();
    let app = HostApplication::with_options(
        Arc::new(Shell(log.clone())),
        Arc::new(TracingFaultSink),
        isolated_identity(),
    );
    let a = observer("a", &log);
    assert!(app.register_extension(a.clone()));
    assert!(!app.register_extension(a));
    assert_eq!(app.extensions().len(), 1);
}
