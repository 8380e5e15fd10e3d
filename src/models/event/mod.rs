// Event module
// Time-bound schedule entry shown as a block on the grid

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::ScheduleError;
use super::time::Time;

/// Opaque identifier assigned by the data source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EventId(pub i64);

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Schedule event rendered as a block between `start` and `end`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub start: Time,
    pub end: Time,
    pub is_editable: bool,
}

impl Event {
    /// Create a new editable event
    ///
    /// # Arguments
    /// * `id` - Identifier owned by the data source
    /// * `title` - Event title (required, non-empty)
    /// * `start` - Event start time
    /// * `end` - Event end time, strictly after `start`
    ///
    /// # Examples
    /// ```
    /// use samidare::models::event::{Event, EventId};
    /// use samidare::models::time::Time;
    ///
    /// let event = Event::new(EventId(1), "Standup", Time::new(9, 0), Time::new(9, 15)).unwrap();
    /// assert_eq!(event.duration_minutes(), 15);
    /// ```
    pub fn new(
        id: EventId,
        title: impl Into<String>,
        start: Time,
        end: Time,
    ) -> Result<Self, ScheduleError> {
        let event = Self {
            id,
            title: title.into(),
            start,
            end,
            is_editable: true,
        };
        event.validate()?;
        Ok(event)
    }

    /// Create a builder for constructing events with optional fields
    pub fn builder() -> EventBuilder {
        EventBuilder::new()
    }

    /// Validate the event
    pub fn validate(&self) -> Result<(), ScheduleError> {
        if self.title.trim().is_empty() {
            return Err(ScheduleError::EmptyTitle);
        }

        if self.end <= self.start {
            return Err(ScheduleError::InvalidEventTimes {
                start: self.start.to_string(),
                end: self.end.to_string(),
            });
        }

        Ok(())
    }

    pub fn duration_minutes(&self) -> i64 {
        self.end.minutes_since(self.start)
    }

    /// Copy of this event moved to a new time span.
    pub fn with_times(&self, start: Time, end: Time) -> Self {
        Self {
            start,
            end,
            ..self.clone()
        }
    }

    pub fn times(&self) -> (Time, Time) {
        (self.start, self.end)
    }
}

/// Builder for creating events with optional fields
#[derive(Default)]
pub struct EventBuilder {
    id: Option<EventId>,
    title: Option<String>,
    start: Option<Time>,
    end: Option<Time>,
    is_editable: Option<bool>,
}

impl EventBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: i64) -> Self {
        self.id = Some(EventId(id));
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn start(mut self, start: Time) -> Self {
        self.start = Some(start);
        self
    }

    pub fn end(mut self, end: Time) -> Self {
        self.end = Some(end);
        self
    }

    /// Mark the event as read-only on the grid
    pub fn editable(mut self, is_editable: bool) -> Self {
        self.is_editable = Some(is_editable);
        self
    }

    /// Build the event
    pub fn build(self) -> Result<Event, ScheduleError> {
        let title = self.title.ok_or(ScheduleError::EmptyTitle)?;
        let start = self.start.unwrap_or(Time::MIDNIGHT);
        let end = self.end.unwrap_or(start);

        let event = Event {
            id: self.id.unwrap_or(EventId(0)),
            title,
            start,
            end,
            is_editable: self.is_editable.unwrap_or(true),
        };

        event.validate()?;
        Ok(event)
    }
}
