//! Time ↔ pixel mapping for the schedule grid.
//!
//! `y = 0` is the top of the visible range. Times map onto whole intervals
//! (binning), pixels map back onto the nearest interval boundary with ties
//! rounding up.

use crate::models::time::Time;
use crate::models::time_range::{LayoutUnit, TimeRange};

/// Snap a minute value to the nearest multiple of `interval`.
///
/// A remainder of at least half an interval rounds up, anything smaller
/// rounds down. The remainder is taken with Euclidean semantics so negative
/// deltas snap the same way as positive ones.
pub fn snap_minutes(value: i64, interval: u32) -> i64 {
    let interval = interval as i64;
    let modulo = value.rem_euclid(interval);
    if modulo == 0 {
        return value;
    }
    if modulo as f64 / interval as f64 >= 0.5 {
        value + (interval - modulo)
    } else {
        value - modulo
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeGrid {
    range: TimeRange,
    layout: LayoutUnit,
}

impl TimeGrid {
    pub fn new(range: TimeRange, layout: LayoutUnit) -> Self {
        Self { range, layout }
    }

    pub fn range(&self) -> &TimeRange {
        &self.range
    }

    pub fn layout(&self) -> &LayoutUnit {
        &self.layout
    }

    /// Height of one `min_interval`, also the smallest height a block may have.
    pub fn interval_height(&self) -> f32 {
        self.layout.height_per_interval(self.range.min_interval())
    }

    pub fn total_height(&self) -> f32 {
        self.range.number_of_intervals() as f32 * self.interval_height()
    }

    /// Vertical offset of `time`.
    ///
    /// The minute delta is divided by the interval with integer truncation, so
    /// a time between two boundaries is drawn at the earlier one.
    pub fn time_to_y(&self, time: Time) -> f32 {
        let delta = time.minutes_since(self.range.start());
        let intervals = delta / self.range.min_interval() as i64;
        intervals as f32 * self.interval_height()
    }

    /// Unbinned offset of `time`, for markers that should not snap.
    pub fn exact_y(&self, time: Time) -> f32 {
        time.minutes_since(self.range.start()) as f32 * self.layout.scale()
    }

    /// Time at vertical offset `y`, snapped to the nearest interval boundary.
    pub fn y_to_time(&self, y: f32) -> Time {
        let raw = self.raw_minutes(y) + self.range.start().total_minutes();
        Time::from_total_minutes(snap_minutes(raw, self.range.min_interval()))
    }

    /// Convert a pixel length into a whole number of intervals' worth of minutes.
    pub fn rounded_minutes(&self, pixels: f32) -> i64 {
        snap_minutes(self.raw_minutes(pixels), self.range.min_interval())
    }

    /// Top and bottom offsets of a block spanning `start..end`.
    pub fn span(&self, start: Time, end: Time) -> (f32, f32) {
        (self.time_to_y(start), self.time_to_y(end))
    }

    /// Minutes covered by `total_height`; a trailing partial interval is not drawn.
    fn grid_minutes(&self) -> i64 {
        self.range.number_of_intervals() * self.range.min_interval() as i64
    }

    fn raw_minutes(&self, pixels: f32) -> i64 {
        let total_height = self.total_height() as f64;
        if total_height <= 0.0 {
            return 0;
        }
        let minutes = self.grid_minutes() as f64;
        (minutes * pixels as f64 / total_height).round() as i64
    }
}
