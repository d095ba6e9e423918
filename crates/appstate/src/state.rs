//! Run-state and snapshot data structures.
//!
//! Pure data - no I/O, no platform dependencies.

use serde::{Deserialize, Serialize};

/// Discrete run state of the monitored application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AppState {
    /// A process of the application is driving user-visible activity.
    Foreground,

    /// The application owns a visible task but no foreground process.
    Background,

    /// No visible footprint, or the state could not be determined.
    /// Conservative default before any resolution has run.
    #[default]
    Terminated,
}

impl AppState {
    /// Returns a human-readable label for the state.
    pub fn label(&self) -> &'static str {
        match self {
            AppState::Foreground => "Foreground",
            AppState::Background => "Background",
            AppState::Terminated => "Terminated",
        }
    }

    /// Parse a label back into a state.
    ///
    /// Unknown input falls back to `Terminated` rather than failing; a
    /// consumer round-tripping labels never gets an error out of this.
    pub fn from_value(value: &str) -> AppState {
        match value {
            "Foreground" => AppState::Foreground,
            "Background" => AppState::Background,
            _ => AppState::Terminated,
        }
    }
}

impl std::fmt::Display for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Package/component identity of the monitored application.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity(String);

impl Identity {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Identity {
    fn from(value: &str) -> Self {
        Identity(value.to_string())
    }
}

impl From<String> for Identity {
    fn from(value: String) -> Self {
        Identity(value)
    }
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One visible task surface, as reported by the host.
///
/// Snapshots are fetched fresh per resolution and discarded after use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskInfo {
    /// Identity of the component that owns the task.
    pub owner: Identity,
}

/// Coarse importance classification of a running process.
///
/// Resolution only distinguishes foreground from not-foreground; the finer
/// grades exist so host adapters can report what they actually observe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Importance {
    /// Driving user-visible activity right now.
    Foreground,
    /// Visible to the user but not in front.
    Visible,
    /// Alive without a visible surface.
    Background,
    /// Host reports the process as on its way out.
    Gone,
}

impl Importance {
    pub fn is_foreground(&self) -> bool {
        matches!(self, Importance::Foreground)
    }
}

/// One running process, as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessInfo {
    /// Process name; matches the owning identity for the app's own processes.
    pub name: String,
    /// Importance classification at snapshot time.
    pub importance: Importance,
}

/// Record of one completed resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateChange {
    /// Resolved state.
    pub state: AppState,
    /// Milliseconds since epoch at resolution completion.
    pub timestamp_ms: i64,
}

impl StateChange {
    pub fn now(state: AppState) -> Self {
        Self {
            state,
            timestamp_ms: chrono::Utc::now().timestamp_millis(),
        }
    }
}
