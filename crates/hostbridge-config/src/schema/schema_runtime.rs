//! Runtime configuration types (thread routing, logging).

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::default_true;

/// Thread routing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouterConfig {
    /// Name of the host UI thread.
    #[serde(default = "default_host_thread")]
    pub host_thread: String,

    /// When set, a dedicated render thread is started and bound to
    /// `render_route` once the runtime is up.
    #[serde(default)]
    pub render_thread: Option<String>,

    /// Route rebound to the render thread: `default` or `runloop`.
    #[serde(default = "default_render_route")]
    pub render_route: String,
}

fn default_host_thread() -> String {
    "host-ui".to_string()
}

fn default_render_route() -> String {
    "runloop".to_string()
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            host_thread: default_host_thread(),
            render_thread: None,
            render_route: default_render_route(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is not set.
    #[serde(default = "default_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,

    /// Write a daily rolling log file in addition to the console.
    #[serde(default = "default_true")]
    pub file_enabled: bool,

    #[serde(default = "default_log_directory")]
    pub directory: Option<PathBuf>,

    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,

    /// Rolled files kept on disk.
    #[serde(default = "default_max_log_files")]
    pub max_files: usize,
}

fn default_level() -> String {
    "info".to_string()
}

/// `~/.hostbridge/logs`, when a home directory is known.
pub fn default_log_directory() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".hostbridge").join("logs"))
}

fn default_file_prefix() -> String {
    "hostbridge".to_string()
}

fn default_max_log_files() -> usize {
    14
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
            file_enabled: default_true(),
            directory: default_log_directory(),
            file_prefix: default_file_prefix(),
            max_files: default_max_log_files(),
        }
    }
}
