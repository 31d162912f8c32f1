//! Lifecycle payloads carried by host transitions.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key/value state saved across component re-creation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateBundle {
    entries: Map<String, Value>,
}

impl StateBundle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

/// A request delivered to the component, e.g. a re-launch with new data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,

    #[serde(default)]
    pub extras: Map<String, Value>,
}

impl Intent {
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: Some(action.into()),
            ..Self::default()
        }
    }

    pub fn with_data(mut self, data: impl Into<String>) -> Self {
        self.data = Some(data.into());
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extras.insert(key.into(), value.into());
        self
    }
}

/// Result delivered by a component this one launched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityResult {
    pub request_code: i32,
    pub result_code: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Intent>,
}

impl ActivityResult {
    pub const RESULT_OK: i32 = -1;
    pub const RESULT_CANCELED: i32 = 0;

    pub fn new(request_code: i32, result_code: i32) -> Self {
        Self {
            request_code,
            result_code,
            data: None,
        }
    }

    pub fn with_data(mut self, data: Intent) -> Self {
        self.data = Some(data);
        self
    }

    pub fn is_ok(&self) -> bool {
        self.result_code == Self::RESULT_OK
    }
}

/// Direction of a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyAction {
    Down,
    Up,
}

/// A key event not consumed by any view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub key_code: i32,
    pub action: KeyAction,
    #[serde(default)]
    pub repeat_count: u32,
    #[serde(default)]
    pub meta_state: u32,
}

impl KeyEvent {
    pub const KEYCODE_BACK: i32 = 4;
    pub const KEYCODE_MENU: i32 = 82;

    pub fn down(key_code: i32) -> Self {
        Self {
            key_code,
            action: KeyAction::Down,
            repeat_count: 0,
            meta_state: 0,
        }
    }

    pub fn up(key_code: i32) -> Self {
        Self {
            key_code,
            action: KeyAction::Up,
            repeat_count: 0,
            meta_state: 0,
        }
    }
}

/// Memory pressure level reported by the host.
///
/// Level values follow the host convention: higher means more pressure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrimLevel(pub i32);

impl TrimLevel {
    pub const RUNNING_MODERATE: TrimLevel = TrimLevel(5);
    pub const RUNNING_LOW: TrimLevel = TrimLevel(10);
    pub const RUNNING_CRITICAL: TrimLevel = TrimLevel(15);
    pub const UI_HIDDEN: TrimLevel = TrimLevel(20);
    pub const BACKGROUND: TrimLevel = TrimLevel(40);
    pub const MODERATE: TrimLevel = TrimLevel(60);
    pub const COMPLETE: TrimLevel = TrimLevel(80);

    /// Whether the process is in the background list rather than running.
    pub fn is_background(self) -> bool {
        self >= Self::BACKGROUND
    }
}

/// Screen orientation reported in a configuration change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Undefined,
    Portrait,
    Landscape,
}

/// Device configuration descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    #[serde(default)]
    pub orientation: Orientation,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,

    #[serde(default = "default_font_scale")]
    pub font_scale: f32,

    #[serde(default)]
    pub extra: Map<String, Value>,
}

fn default_font_scale() -> f32 {
    1.0
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            orientation: Orientation::default(),
            locale: None,
            font_scale: default_font_scale(),
            extra: Map::new(),
        }
    }
}

impl Configuration {
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }
}
