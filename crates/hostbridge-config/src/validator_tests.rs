use super::*;

#[test]
fn test_validate_default_config() {
    let mut config = Config::default();
    config.logging.directory = Some("/tmp/hostbridge-logs".into());

    let result = ConfigValidator::validate(&config);
    assert!(result.is_valid());
    assert!(result.warnings.is_empty());
}

#[test]
fn test_validate_empty_content_root() {
    let mut config = Config::default();
    config.window.content_root = "  ".to_string();

    let result = ConfigValidator::validate(&config);
    assert!(!result.is_valid());
    assert!(result.errors.iter().any(|e| e.path == "window.content_root"));
}

#[test]
fn test_validate_no_libraries_warning() {
    let mut config = Config::default();
    config.native.libraries.clear();

    let result = ConfigValidator::validate(&config);
    assert!(result.is_valid());
    assert!(result.warnings.iter().any(|w| w.path == "native.libraries"));
}

#[test]
fn test_validate_duplicate_library_warning() {
    let mut config = Config::default();
    config.native.libraries = vec!["main".into(), "audio".into(), "main".into()];

    let result = ConfigValidator::validate(&config);
    assert!(result.is_valid());
    assert!(result.warnings.iter().any(|w| w.path == "native.libraries[2]"));
}

#[test]
fn test_validate_empty_library_name() {
    let mut config = Config::default();
    config.native.libraries = vec!["".into()];

    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "native.libraries[0]"));
}

#[test]
fn test_validate_unknown_route() {
    let mut config = Config::default();
    config.router.render_route = "host".to_string();

    let result = ConfigValidator::validate(&config);
    assert!(!result.is_valid());
    assert!(result.errors.iter().any(|e| e.path == "router.render_route"));
}

#[test]
fn test_validate_render_thread_same_as_host() {
    let mut config = Config::default();
    config.router.render_thread = Some(config.router.host_thread.clone());

    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "router.render_thread"));
}

#[test]
fn test_validate_render_route_without_thread_warning() {
    let mut config = Config::default();
    config.router.render_route = "default".to_string();

    let result = ConfigValidator::validate(&config);
    assert!(result.is_valid());
    assert!(result.warnings.iter().any(|w| w.path == "router.render_route"));
}

#[test]
fn test_validate_unknown_level_warning() {
    let mut config = Config::default();
    config.logging.level = "chatty".to_string();

    let result = ConfigValidator::validate(&config);
    assert!(result.is_valid());
    assert!(result.warnings.iter().any(|w| w.path == "logging.level"));
}

#[test]
fn test_validate_directive_level_accepted() {
    let mut config = Config::default();
    config.logging.level = "hostbridge_core=debug,info".to_string();

    let result = ConfigValidator::validate(&config);
    assert!(!result.warnings.iter().any(|w| w.path == "logging.level"));
}

#[test]
fn test_validate_zero_max_files() {
    let mut config = Config::default();
    config.logging.max_files = 0;

    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "logging.max_files"));

    config.logging.file_enabled = false;
    let result = ConfigValidator::validate(&config);
    assert!(!result.errors.iter().any(|e| e.path == "logging.max_files"));
}

#[test]
fn test_into_error_reports_first_error() {
    let mut config = Config::default();
    config.native.entry_point = String::new();

    let err = ConfigValidator::validate(&config).into_error().unwrap();
    assert!(err.to_string().contains("native.entry_point"));

    assert!(ConfigValidator::validate(&Config::default()).into_error().is_none());
}
