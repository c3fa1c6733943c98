use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::core::{Color, ViewMode};
use crate::error::{CalendarError, CalendarResult};

/// Public engine bootstrap configuration.
///
/// Serializable so host applications can persist calendar preferences
/// without inventing their own format.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalendarEngineConfig {
    /// First column of Week and Month views.
    #[serde(default = "default_week_start")]
    pub week_start: Weekday,
    /// Vertical size of one hour row.
    #[serde(default = "default_slot_height")]
    pub slot_height: f64,
    /// Color for events whose calendar cannot be resolved.
    #[serde(default)]
    pub default_color: Color,
    #[serde(default)]
    pub initial_view_mode: ViewMode,
}

impl Default for CalendarEngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl CalendarEngineConfig {
    #[must_use]
    pub fn new() -> Self {
        Self {
            week_start: default_week_start(),
            slot_height: default_slot_height(),
            default_color: Color::DEFAULT_EVENT,
            initial_view_mode: ViewMode::default(),
        }
    }

    #[must_use]
    pub fn with_week_start(mut self, week_start: Weekday) -> Self {
        self.week_start = week_start;
        self
    }

    #[must_use]
    pub fn with_slot_height(mut self, slot_height: f64) -> Self {
        self.slot_height = slot_height;
        self
    }

    #[must_use]
    pub fn with_default_color(mut self, color: Color) -> Self {
        self.default_color = color;
        self
    }

    #[must_use]
    pub fn with_initial_view_mode(mut self, view_mode: ViewMode) -> Self {
        self.initial_view_mode = view_mode;
        self
    }

    /// Serializes config to pretty JSON for settings files.
    pub fn to_json_pretty(self) -> CalendarResult<String> {
        serde_json::to_string_pretty(&self)
            .map_err(|e| CalendarError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Deserializes config from JSON; missing fields take their defaults.
    pub fn from_json_str(input: &str) -> CalendarResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| CalendarError::InvalidData(format!("failed to parse config: {e}")))
    }
}

fn default_week_start() -> Weekday {
    Weekday::Mon
}

fn default_slot_height() -> f64 {
    60.0
}
