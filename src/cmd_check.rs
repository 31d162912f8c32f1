//! `check-config` command.

use std::path::Path;

use hostbridge_config::{Config, ConfigValidator};

/// Print validation findings; fails when the configuration has errors.
pub(crate) fn run_check_config(
    path: Option<&Path>,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(path) => println!("Checking {}", path.display()),
        None => println!("Checking built-in defaults"),
    }

    let result = ConfigValidator::validate(config);

    for warning in &result.warnings {
        println!("  warning: {}: {}", warning.path, warning.message);
    }
    for error in &result.errors {
        println!("  error:   {}: {}", error.path, error.message);
    }

    println!(
        "{} error(s), {} warning(s)",
        result.errors.len(),
        result.warnings.len()
    );

    match result.into_error() {
        Some(err) => Err(err.into()),
        None => Ok(()),
    }
}
