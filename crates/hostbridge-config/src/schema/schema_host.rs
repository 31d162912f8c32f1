//! Host component configuration (window, native runtime, dispatch policy).

use hostbridge_protocols::ClaimPolarity;
use serde::{Deserialize, Serialize};

use super::default_true;

/// Window setup performed before the native runtime starts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    #[serde(default = "default_title")]
    pub title: String,

    /// Hide the platform title bar.
    #[serde(default = "default_true")]
    pub hide_title_bar: bool,

    #[serde(default = "default_true")]
    pub fullscreen: bool,

    /// Container extensions attach their views to.
    #[serde(default = "default_content_root")]
    pub content_root: String,
}

fn default_title() -> String {
    "HostBridge".to_string()
}

fn default_content_root() -> String {
    "content_root".to_string()
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            hide_title_bar: default_true(),
            fullscreen: default_true(),
            content_root: default_content_root(),
        }
    }
}

/// Native runtime bootstrap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NativeConfig {
    /// Libraries loaded in order before the runtime starts.
    #[serde(default = "default_libraries")]
    pub libraries: Vec<String>,

    /// Symbol or command that starts the runtime.
    #[serde(default = "default_entry_point")]
    pub entry_point: String,
}

fn default_libraries() -> Vec<String> {
    vec!["main".to_string()]
}

fn default_entry_point() -> String {
    "main".to_string()
}

impl Default for NativeConfig {
    fn default() -> Self {
        Self {
            libraries: default_libraries(),
            entry_point: default_entry_point(),
        }
    }
}

/// Lifecycle dispatch policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Which activity-result reply claims the result.
    #[serde(default)]
    pub claim_polarity: ClaimPolarity,

    /// Run the host's default back behavior after extensions were notified.
    #[serde(default = "default_true")]
    pub default_on_back: bool,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            claim_polarity: ClaimPolarity::default(),
            default_on_back: default_true(),
        }
    }
}
