//! Configuration validation.

use crate::error::ConfigError;
use crate::schema::Config;

const ROUTE_NAMES: [&str; 2] = ["default", "runloop"];
const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// First error as a [`ConfigError`], for callers that refuse to start
    /// with an invalid configuration.
    pub fn into_error(self) -> Option<ConfigError> {
        self.errors
            .into_iter()
            .next()
            .map(|e| ConfigError::InvalidValue {
                field: e.path,
                message: e.message,
            })
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::validate_window(config, &mut result);
        Self::validate_native(config, &mut result);
        Self::validate_router(config, &mut result);
        Self::validate_logging(config, &mut result);

        result
    }

    fn validate_window(config: &Config, result: &mut ValidationResult) {
        if config.window.content_root.trim().is_empty() {
            result.add_error(ValidationError::new(
                "window.content_root",
                "Content root cannot be empty",
            ));
        }
    }

    fn validate_native(config: &Config, result: &mut ValidationResult) {
        if config.native.libraries.is_empty() {
            result.add_warning(ValidationWarning::new(
                "native.libraries",
                "No native libraries configured, the runtime must already be linked in",
            ));
        }

        for (i, lib) in config.native.libraries.iter().enumerate() {
            if lib.trim().is_empty() {
                result.add_error(ValidationError::new(
                    format!("native.libraries[{}]", i),
                    "Library name cannot be empty",
                ));
            }
            if config.native.libraries[..i].contains(lib) {
                result.add_warning(ValidationWarning::new(
                    format!("native.libraries[{}]", i),
                    format!("Library '{}' is listed more than once", lib),
                ));
            }
        }

        if config.native.entry_point.trim().is_empty() {
            result.add_error(ValidationError::new(
                "native.entry_point",
                "Entry point cannot be empty",
            ));
        }
    }

    fn validate_router(config: &Config, result: &mut ValidationResult) {
        let router = &config.router;

        if router.host_thread.trim().is_empty() {
            result.add_error(ValidationError::new(
                "router.host_thread",
                "Host thread name cannot be empty",
            ));
        }

        if !ROUTE_NAMES.contains(&router.render_route.as_str()) {
            result.add_error(ValidationError::new(
                "router.render_route",
                format!(
                    "Unknown route '{}', valid values: {:?}",
                    router.render_route, ROUTE_NAMES
                ),
            ));
        }

        match router.render_thread.as_deref() {
            Some(name) if name == router.host_thread => {
                result.add_error(ValidationError::new(
                    "router.render_thread",
                    "Render thread must differ from the host thread",
                ));
            }
            Some(name) if name.trim().is_empty() => {
                result.add_error(ValidationError::new(
                    "router.render_thread",
                    "Render thread name cannot be empty",
                ));
            }
            None if router.render_route != "runloop" => {
                result.add_warning(ValidationWarning::new(
                    "router.render_route",
                    "render_route has no effect without render_thread",
                ));
            }
            _ => {}
        }
    }

    fn validate_logging(config: &Config, result: &mut ValidationResult) {
        let logging = &config.logging;

        // Only plain levels are checked; directive strings are left to the filter.
        let level = logging.level.to_ascii_lowercase();
        if !level.contains('=') && !LOG_LEVELS.contains(&level.as_str()) {
            result.add_warning(ValidationWarning::new(
                "logging.level",
                format!(
                    "Unknown log level '{}', valid values: {:?}",
                    logging.level, LOG_LEVELS
                ),
            ));
        }

        if logging.file_enabled {
            if logging.directory.is_none() {
                result.add_warning(ValidationWarning::new(
                    "logging.directory",
                    "No log directory and no home directory, file logging is disabled",
                ));
            }
            if logging.file_prefix.trim().is_empty() {
                result.add_error(ValidationError::new(
                    "logging.file_prefix",
                    "File prefix cannot be empty",
                ));
            }
            if logging.max_files == 0 {
                result.add_error(ValidationError::new(
                    "logging.max_files",
                    "max_files must be greater than 0",
                ));
            }
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
