use crate::models::event::Event;
use crate::models::settings::Settings;
use crate::models::time_range::{LayoutUnit, TimeRange};

/// Supplies the grid with its time window, layout constants and events.
#[cfg_attr(test, mockall::automock)]
pub trait ScheduleDataSource {
    fn time_range(&self) -> TimeRange;
    fn layout(&self) -> LayoutUnit;
    fn number_of_columns(&self) -> usize;
    fn events(&self, column: usize) -> Vec<Event>;
    fn column_width(&self) -> f32;
}

/// In-memory data source backed by per-column event lists.
#[derive(Debug, Clone)]
pub struct StaticSchedule {
    range: TimeRange,
    layout: LayoutUnit,
    column_width: f32,
    columns: Vec<Vec<Event>>,
}

impl StaticSchedule {
    pub fn new(range: TimeRange, layout: LayoutUnit, column_width: f32) -> Self {
        Self {
            range,
            layout,
            column_width,
            columns: Vec::new(),
        }
    }

    /// Build an empty schedule from validated settings.
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        settings.validate()?;
        Ok(Self::new(
            settings.time_range()?,
            settings.layout,
            settings.column_width,
        ))
    }

    pub fn with_column(mut self, events: Vec<Event>) -> Self {
        self.columns.push(events);
        self
    }

    pub fn push_column(&mut self, events: Vec<Event>) {
        self.columns.push(events);
    }

    /// Replace a stored event, e.g. with the copy committed after editing.
    pub fn update_event(&mut self, column: usize, event: &Event) -> bool {
        let Some(slot) = self
            .columns
            .get_mut(column)
            .and_then(|events| events.iter_mut().find(|e| e.id == event.id))
        else {
            return false;
        };
        *slot = event.clone();
        true
    }
}

impl ScheduleDataSource for StaticSchedule {
    fn time_range(&self) -> TimeRange {
        self.range
    }

    fn layout(&self) -> LayoutUnit {
        self.layout
    }

    fn number_of_columns(&self) -> usize {
        self.columns.len()
    }

    fn events(&self, column: usize) -> Vec<Event> {
        self.columns.get(column).cloned().unwrap_or_default()
    }

    fn column_width(&self) -> f32 {
        self.column_width
    }
}
