//! Lifecycle event kinds and their dispatch rules.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A host lifecycle transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleEvent {
    Create,
    Start,
    Restart,
    Resume,
    Pause,
    Stop,
    Destroy,
    SaveInstanceState,
    LowMemory,
    TrimMemory,
    NewIntent,
    ConfigurationChanged,
    KeyDown,
    KeyUp,
    ActivityResult,
    BackPressed,
    Terminate,
}

/// Whether the host's own default behavior runs before or after the broadcast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultOrder {
    BeforeBroadcast,
    AfterBroadcast,
}

/// Which return value of the activity-result hook claims the result.
///
/// Host variants disagree on this, so it is an explicit policy. The default
/// is [`ClaimPolarity::ClaimOnTrue`]: returning `Some(true)` means "handled,
/// stop here".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimPolarity {
    #[default]
    ClaimOnTrue,
    ClaimOnFalse,
}

impl ClaimPolarity {
    /// Whether a hook reply claims the result under this policy.
    pub fn is_claim(self, reply: bool) -> bool {
        match self {
            Self::ClaimOnTrue => reply,
            Self::ClaimOnFalse => !reply,
        }
    }
}

impl LifecycleEvent {
    /// All event kinds, in declaration order.
    pub const ALL: [LifecycleEvent; 17] = [
        LifecycleEvent::Create,
        LifecycleEvent::Start,
        LifecycleEvent::Restart,
        LifecycleEvent::Resume,
        LifecycleEvent::Pause,
        LifecycleEvent::Stop,
        LifecycleEvent::Destroy,
        LifecycleEvent::SaveInstanceState,
        LifecycleEvent::LowMemory,
        LifecycleEvent::TrimMemory,
        LifecycleEvent::NewIntent,
        LifecycleEvent::ConfigurationChanged,
        LifecycleEvent::KeyDown,
        LifecycleEvent::KeyUp,
        LifecycleEvent::ActivityResult,
        LifecycleEvent::BackPressed,
        LifecycleEvent::Terminate,
    ];

    /// Stable name used in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Start => "start",
            Self::Restart => "restart",
            Self::Resume => "resume",
            Self::Pause => "pause",
            Self::Stop => "stop",
            Self::Destroy => "destroy",
            Self::SaveInstanceState => "save_instance_state",
            Self::LowMemory => "low_memory",
            Self::TrimMemory => "trim_memory",
            Self::NewIntent => "new_intent",
            Self::ConfigurationChanged => "configuration_changed",
            Self::KeyDown => "key_down",
            Self::KeyUp => "key_up",
            Self::ActivityResult => "activity_result",
            Self::BackPressed => "back_pressed",
            Self::Terminate => "terminate",
        }
    }

    /// Creation is special-cased by the dispatcher: host initialization
    /// always completes before the first extension hook.
    pub fn default_order(self) -> DefaultOrder {
        match self {
            Self::Create
            | Self::Start
            | Self::Restart
            | Self::Resume
            | Self::Pause
            | Self::Stop
            | Self::SaveInstanceState
            | Self::LowMemory
            | Self::TrimMemory
            | Self::ConfigurationChanged
            | Self::Terminate => DefaultOrder::BeforeBroadcast,
            Self::Destroy
            | Self::NewIntent
            | Self::KeyDown
            | Self::KeyUp
            | Self::ActivityResult
            | Self::BackPressed => DefaultOrder::AfterBroadcast,
        }
    }
}

impl fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exiting_events_run_default_after() {
        assert_eq!(LifecycleEvent::Destroy.default_order(), DefaultOrder::AfterBroadcast);
        assert_eq!(LifecycleEvent::NewIntent.default_order(), DefaultOrder::AfterBroadcast);
        assert_eq!(LifecycleEvent::Pause.default_order(), DefaultOrder::BeforeBroadcast);
    }

    #[test]
    fn test_claim_polarity() {
        assert!(ClaimPolarity::ClaimOnTrue.is_claim(true));
        assert!(!ClaimPolarity::ClaimOnTrue.is_claim(false));
        assert!(ClaimPolarity::ClaimOnFalse.is_claim(false));
        assert!(!ClaimPolarity::ClaimOnFalse.is_claim(true));
        assert_eq!(ClaimPolarity::default(), ClaimPolarity::ClaimOnTrue);
    }

    #[test]
    fn test_display_matches_serde_name() {
        for event in LifecycleEvent::ALL {
            let json = serde_json::to_string(&event).unwrap();
            assert_eq!(json, format!("\"{}\"", event));
        }
    }
}
