use super::*;
use hostbridge_protocols::HookResult;
use parking_lot::Mutex;

struct Named {
    name: String,
    log: Arc<Mutex<Vec<String>>>,
}

impl Named {
    fn new(name: &str, log: &Arc<Mutex<Vec<String>>>) -> Arc<dyn Extension> {
        Arc::new(Self {
            name: name.to_string(),
            log: log.clone(),
        })
    }
}

impl Extension for Named {
    fn name(&self) -> &str {
        &self.name
    }

    fn on_pause(&self) -> HookResult {
        self.log.lock().push(self.name.clone());
        Ok(())
    }
}

#[test]
fn test_register_preserves_order() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let registry: ExtensionRegistry<dyn Extension> = ExtensionRegistry::new();

    assert!(registry.register(Named::new("a", &log)));
    assert!(registry.register(Named::new("b", &log)));
    assert!(registry.register(Named::new("c", &log)));

    assert_eq!(registry.names(), vec!["a", "b", "c"]);
}

#[test]
fn test_duplicate_instance_is_ignored() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let registry: ExtensionRegistry<dyn Extension> = ExtensionRegistry::new();
    let a = Named::new("a", &log);

    assert!(registry.register(a.clone()));
    assert!(!registry.register(a.clone()));
    assert_eq!(registry.len(), 1);
    assert!(registry.contains(&a));

    let report = registry.broadcast(LifecycleEvent::Pause, |e| e.on_pause());
    assert_eq!(report.invoked, 1);
    assert_eq!(*log.lock(), vec!["a"]);
}

#[test]
fn test_equal_names_are_distinct_instances() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let registry: ExtensionRegistry<dyn Extension> = ExtensionRegistry::new();

    assert!(registry.register(Named::new("same", &log)));
    assert!(registry.register(Named::new("same", &log)));
    assert_eq!(registry.len(), 2);
}

#[test]
fn test_empty_broadcast_is_a_no_op() {
    let registry: ExtensionRegistry<dyn Extension> = ExtensionRegistry::default();
    assert!(registry.is_empty());

    let report = registry.broadcast(LifecycleEvent::Resume, |e| e.on_resume());
    assert_eq!(report.invoked, 0);
    assert!(report.is_clean());
    assert!(!report.claimed());
}

#[test]
fn test_broadcast_until_stops_at_first_claim() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let registry: ExtensionRegistry<dyn Extension> = ExtensionRegistry::new();
    for name in ["a", "b", "c"] {
        registry.register(Named::new(name, &log));
    }

    let report = registry.broadcast_until(LifecycleEvent::ActivityResult, |e| {
        log.lock().push(e.name().to_string());
        Ok(e.name() == "b")
    });

    assert_eq!(report.claimed_by.as_deref(), Some("b"));
    assert_eq!(report.invoked, 2);
    assert_eq!(*log.lock(), vec!["a", "b"]);
}

#[test]
fn test_errors_and_panics_are_isolated() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let registry: ExtensionRegistry<dyn Extension> = ExtensionRegistry::new();
    for name in ["fails", "panics", "ok"] {
        registry.register(Named::new(name, &log));
    }

    let report = registry.broadcast(LifecycleEvent::Stop, |e| match e.name() {
        "fails" => Err(ExtensionError::HookFailed("nope".into())),
        "panics" => panic!("hook exploded"),
        _ => {
            log.lock().push(e.name().to_string());
            Ok(())
        }
    });

    assert_eq!(report.invoked, 3);
    assert_eq!(report.faults.len(), 2);
    assert_eq!(report.faults[0].extension, "fails");
    assert_eq!(report.faults[1].extension, "panics");
    assert!(matches!(
        &report.faults[1].error,
        ExtensionError::Panicked(msg) if msg.contains("hook exploded")
    ));
    assert_eq!(*log.lock(), vec!["ok"]);
}

#[test]
fn test_faulting_hook_does_not_claim() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let registry: ExtensionRegistry<dyn Extension> = ExtensionRegistry::new();
    registry.register(Named::new("broken", &log));
    registry.register(Named::new("fine", &log));

    let report = registry.broadcast_until(LifecycleEvent::ActivityResult, |e| {
        if e.name() == "broken" {
            Err(ExtensionError::HookFailed("bad".into()))
        } else {
            Ok(false)
        }
    });

    assert!(!report.claimed());
    assert_eq!(report.invoked, 2);
    assert_eq!(report.faults.len(), 1);
}

#[test]
fn test_register_during_broadcast_panics() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let registry: Arc<ExtensionRegistry<dyn Extension>> = Arc::new(ExtensionRegistry::new());
    registry.register(Named::new("a", &log));

    let inner = registry.clone();
    let late = Named::new("late", &log);
    let report = registry.broadcast(LifecycleEvent::Pause, |_| {
        inner.register(late.clone());
        Ok(())
    });

    // The assertion fires inside the hook and surfaces as a fault.
    assert_eq!(report.faults.len(), 1);
    assert!(matches!(
        &report.faults[0].error,
        ExtensionError::Panicked(msg) if msg.contains("in-progress broadcast")
    ));
    assert_eq!(registry.len(), 1);

    // Registration works again once the broadcast is over.
    assert!(registry.register(late));
}
