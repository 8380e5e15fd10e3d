// Time module
// Wall-clock time of day on a 00:00..=24:00 scale

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use super::error::ScheduleError;

pub const MINUTES_PER_HOUR: i64 = 60;
pub const MAX_HOURS: i64 = 24;

/// A normalized `(hours, minutes)` value.
///
/// Hours lie in `0..=24` and minutes in `0..=59`. `24:00` is the only value
/// with `hours == 24`, so the end of a day can be expressed as a range bound.
/// Ordering follows the total number of minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Time {
    hours: u32,
    minutes: u32,
}

/// Build a normalized [`Time`] from arbitrary hour and minute counts.
///
/// Hours are clamped to `0..=24` first, then minutes are carried into hours
/// (negative minutes borrow). Anything before midnight saturates to `00:00`,
/// anything past the end of the day saturates to `24:00`.
pub fn normalize(hours: i64, minutes: i64) -> Time {
    let mut hours = hours.clamp(0, MAX_HOURS);
    hours += minutes.div_euclid(MINUTES_PER_HOUR);
    let mut minutes = minutes.rem_euclid(MINUTES_PER_HOUR);

    if hours < 0 {
        hours = 0;
        minutes = 0;
    }
    if hours >= MAX_HOURS {
        hours = MAX_HOURS;
        minutes = 0;
    }

    Time {
        hours: hours as u32,
        minutes: minutes as u32,
    }
}

impl Time {
    pub const MIDNIGHT: Time = Time { hours: 0, minutes: 0 };
    pub const END_OF_DAY: Time = Time { hours: 24, minutes: 0 };

    pub fn new(hours: i64, minutes: i64) -> Self {
        normalize(hours, minutes)
    }

    pub fn from_total_minutes(total: i64) -> Self {
        normalize(0, total)
    }

    pub fn hours(&self) -> u32 {
        self.hours
    }

    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    pub fn total_minutes(&self) -> i64 {
        self.hours as i64 * MINUTES_PER_HOUR + self.minutes as i64
    }

    /// Shift by a signed number of minutes, saturating at the ends of the day.
    pub fn add_minutes(self, delta: i64) -> Self {
        normalize(self.hours as i64, self.minutes as i64 + delta)
    }

    /// Signed minutes from `other` to `self`.
    pub fn minutes_since(&self, other: Time) -> i64 {
        self.total_minutes() - other.total_minutes()
    }

    /// Convert to a chrono time. `24:00` has no chrono representation.
    pub fn to_naive_time(&self) -> Option<NaiveTime> {
        NaiveTime::from_hms_opt(self.hours, self.minutes, 0)
    }
}

impl From<NaiveTime> for Time {
    fn from(time: NaiveTime) -> Self {
        normalize(time.hour() as i64, time.minute() as i64)
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hours, self.minutes)
    }
}

impl FromStr for Time {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ScheduleError::InvalidTime(s.to_string());
        let (hours, minutes) = s.trim().split_once(':').ok_or_else(invalid)?;
        let hours: i64 = hours.parse().map_err(|_| invalid())?;
        let minutes: i64 = minutes.parse().map_err(|_| invalid())?;

        if !(0..=MAX_HOURS).contains(&hours) || !(0..MINUTES_PER_HOUR).contains(&minutes) {
            return Err(invalid());
        }
        if hours == MAX_HOURS && minutes != 0 {
            return Err(invalid());
        }

        Ok(normalize(hours, minutes))
    }
}

impl TryFrom<String> for Time {
    type Error = ScheduleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Time> for String {
    fn from(time: Time) -> Self {
        time.to_string()
    }
}
