// Settings module
// User-tunable schedule configuration, stored as TOML

use serde::{Deserialize, Serialize};

use super::error::ScheduleError;
use super::time::Time;
use super::time_range::{LayoutUnit, TimeRange};

/// Edge auto-scroll tuning. Speeds are in pixels per second.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoScrollSettings {
    /// Fraction of the viewport height that counts as "near the edge"
    pub threshold: f32,
    pub min_speed: f32,
    pub max_speed: f32,
}

impl Default for AutoScrollSettings {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            min_speed: 120.0,
            max_speed: 900.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub start: Time,
    pub end: Time,
    pub min_interval: u32,
    pub column_width: f32,
    /// Margin kept below the last grid line so its label stays visible
    pub half_line_height: f32,
    /// Show a translucent ghost of the block at its original position while editing
    pub displays_preview: bool,
    pub long_press_ms: u64,
    pub layout: LayoutUnit,
    pub auto_scroll: AutoScrollSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            start: Time::new(0, 0),
            end: Time::END_OF_DAY,
            min_interval: 15,
            column_width: 160.0,
            half_line_height: 6.0,
            displays_preview: true,
            long_press_ms: 400,
            layout: LayoutUnit::default(),
            auto_scroll: AutoScrollSettings::default(),
        }
    }
}

impl Settings {
    /// Build the visible range described by these settings.
    pub fn time_range(&self) -> Result<TimeRange, ScheduleError> {
        TimeRange::new(self.start, self.end, self.min_interval)
    }

    /// Validate every field
    pub fn validate(&self) -> Result<(), ScheduleError> {
        self.time_range()?;
        self.layout.validate()?;

        if !(self.column_width.is_finite() && self.column_width > 0.0) {
            return Err(ScheduleError::InvalidSettings(
                "column_width must be a positive number".to_string(),
            ));
        }
        if !(self.half_line_height.is_finite() && self.half_line_height >= 0.0) {
            return Err(ScheduleError::InvalidSettings(
                "half_line_height cannot be negative".to_string(),
            ));
        }

        let scroll = &self.auto_scroll;
        if !(scroll.threshold > 0.0 && scroll.threshold <= 0.5) {
            return Err(ScheduleError::InvalidSettings(format!(
                "auto_scroll.threshold must be in (0, 0.5], got {}",
                scroll.threshold
            )));
        }
        if scroll.min_speed < 0.0 || scroll.max_speed < scroll.min_speed {
            return Err(ScheduleError::InvalidSettings(
                "auto_scroll speeds must satisfy 0 <= min_speed <= max_speed".to_string(),
            ));
        }

        Ok(())
    }
}
