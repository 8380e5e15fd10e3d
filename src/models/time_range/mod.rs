// Time range module
// The visible window of the schedule and its layout unit

use serde::{Deserialize, Serialize};

use super::error::ScheduleError;
use super::time::Time;

/// Visible time window of the grid together with its editing resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    start: Time,
    end: Time,
    min_interval: u32,
}

impl TimeRange {
    /// Create a validated range.
    ///
    /// # Errors
    /// Fails when `start >= end` or `min_interval == 0`.
    pub fn new(start: Time, end: Time, min_interval: u32) -> Result<Self, ScheduleError> {
        if start >= end {
            return Err(ScheduleError::InvalidTimeRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        if min_interval == 0 {
            return Err(ScheduleError::InvalidInterval);
        }
        Ok(Self {
            start,
            end,
            min_interval,
        })
    }

    pub fn start(&self) -> Time {
        self.start
    }

    pub fn end(&self) -> Time {
        self.end
    }

    pub fn min_interval(&self) -> u32 {
        self.min_interval
    }

    pub fn duration_minutes(&self) -> i64 {
        self.end.minutes_since(self.start)
    }

    /// Whole intervals in the range; a trailing partial interval is dropped.
    pub fn number_of_intervals(&self) -> i64 {
        self.duration_minutes() / self.min_interval as i64
    }

    pub fn contains(&self, time: Time) -> bool {
        self.start <= time && time <= self.end
    }
}

/// Pixel height assigned to one `minute_unit` of time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutUnit {
    pub minute_unit: u32,
    pub height_unit: f32,
}

impl LayoutUnit {
    pub fn new(minute_unit: u32, height_unit: f32) -> Self {
        Self {
            minute_unit,
            height_unit,
        }
    }

    /// Pixels per minute.
    pub fn scale(&self) -> f32 {
        self.height_unit / self.minute_unit as f32
    }

    /// Pixel height of one editing interval of `min_interval` minutes.
    pub fn height_per_interval(&self, min_interval: u32) -> f32 {
        self.scale() * min_interval as f32
    }

    pub fn validate(&self) -> Result<(), ScheduleError> {
        if self.minute_unit == 0 {
            return Err(ScheduleError::InvalidSettings(
                "layout minute_unit must be greater than zero".to_string(),
            ));
        }
        if !(self.height_unit.is_finite() && self.height_unit > 0.0) {
            return Err(ScheduleError::InvalidSettings(
                "layout height_unit must be a positive number".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for LayoutUnit {
    fn default() -> Self {
        Self {
            minute_unit: 15,
            height_unit: 12.0,
        }
    }
}
