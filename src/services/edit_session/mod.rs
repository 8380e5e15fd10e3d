//! Direct-manipulation editing of a single event block.
//!
//! A session starts from an immutable baseline (the event and its frame at
//! begin-editing). Every drag sample moves the live frame by a clamped pixel
//! delta, and the new start/end are re-derived from the distance between the
//! live frame and the baseline, so many small deltas never accumulate drift.

use egui::{pos2, vec2, Rect};

use crate::models::event::Event;
use crate::models::time::Time;
use crate::services::schedule::CellRef;
use crate::services::time_grid::TimeGrid;

/// Which end(s) of the block a drag affects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditEdge {
    /// Top knob, adjusts start time
    Top,
    /// Bottom knob, adjusts end time
    Bottom,
    /// Whole block, moves start and end together
    Both,
}

/// Vertical limits a dragged frame must respect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditBounds {
    pub content_height: f32,
    /// Margin kept free below the lowest reachable edge
    pub half_line_height: f32,
    /// Smallest height a block may shrink to (one interval)
    pub min_height: f32,
}

impl EditBounds {
    pub fn max_y(&self) -> f32 {
        self.content_height - self.half_line_height
    }
}

/// Clamp a drag delta so the resulting frame stays inside `bounds` and never
/// gets shorter than `bounds.min_height`.
pub fn clamp_delta(frame: Rect, edge: EditEdge, delta: f32, bounds: &EditBounds) -> f32 {
    let max_y = bounds.max_y();
    let mut delta = delta;

    match edge {
        EditEdge::Top => {
            if frame.height() - delta < bounds.min_height {
                delta = frame.height() - bounds.min_height;
            }
            if frame.min.y + delta < 0.0 {
                delta = -frame.min.y;
            }
        }
        EditEdge::Bottom => {
            if frame.height() + delta < bounds.min_height {
                delta = bounds.min_height - frame.height();
            }
            if frame.max.y + delta > max_y {
                delta = max_y - frame.max.y;
            }
        }
        EditEdge::Both => {
            if frame.min.y + delta < 0.0 {
                delta = -frame.min.y;
            }
            if frame.max.y + delta > max_y {
                delta = max_y - frame.max.y;
            }
        }
    }

    delta
}

/// Apply an already clamped delta to `frame`.
pub fn apply_delta(frame: Rect, edge: EditEdge, delta: f32) -> Rect {
    match edge {
        EditEdge::Top => Rect::from_min_max(pos2(frame.min.x, frame.min.y + delta), frame.max),
        EditEdge::Bottom => Rect::from_min_max(frame.min, pos2(frame.max.x, frame.max.y + delta)),
        EditEdge::Both => frame.translate(vec2(0.0, delta)),
    }
}

#[derive(Debug, Clone)]
pub struct EditSession {
    cell: CellRef,
    event_at_begin: Event,
    frame_at_begin: Rect,
    editing: Event,
    frame: Rect,
    active_edge: Option<EditEdge>,
    grid: TimeGrid,
    bounds: EditBounds,
}

impl EditSession {
    pub fn begin(cell: CellRef, event: &Event, frame: Rect, grid: TimeGrid, bounds: EditBounds) -> Self {
        Self {
            cell,
            event_at_begin: event.clone(),
            frame_at_begin: frame,
            editing: event.clone(),
            frame,
            active_edge: None,
            grid,
            bounds,
        }
    }

    pub fn cell(&self) -> CellRef {
        self.cell
    }

    /// Snapshot taken at begin-editing; never changes during the session.
    pub fn event_at_begin(&self) -> &Event {
        &self.event_at_begin
    }

    pub fn frame_at_begin(&self) -> Rect {
        self.frame_at_begin
    }

    /// The live editing copy.
    pub fn event(&self) -> &Event {
        &self.editing
    }

    /// The live (possibly sub-interval) frame.
    pub fn frame(&self) -> Rect {
        self.frame
    }

    pub fn active_edge(&self) -> Option<EditEdge> {
        self.active_edge
    }

    pub fn set_active_edge(&mut self, edge: Option<EditEdge>) {
        self.active_edge = edge;
    }

    pub fn bounds(&self) -> &EditBounds {
        &self.bounds
    }

    pub fn is_modified(&self) -> bool {
        self.editing.times() != self.event_at_begin.times()
    }

    /// Move `edge` by `delta` pixels (measured from the previous sample).
    ///
    /// Returns the updated editing copy when the derived start/end changed,
    /// `None` when the drag stayed within the same interval.
    pub fn edit(&mut self, edge: EditEdge, delta: f32) -> Option<&Event> {
        let delta = clamp_delta(self.frame, edge, delta, &self.bounds);
        self.frame = apply_delta(self.frame, edge, delta);

        let (start, end) = self.derived_times();
        if (start, end) == self.editing.times() {
            return None;
        }

        log::trace!(
            "Edited {} via {:?}: {}-{}",
            self.editing.id,
            edge,
            start,
            end
        );
        self.editing.start = start;
        self.editing.end = end;
        Some(&self.editing)
    }

    /// Realign the live frame to the interval grid using the editing times.
    pub fn snap_to_interval(&mut self) -> Rect {
        let (top, bottom) = self.grid.span(self.editing.start, self.editing.end);
        self.frame = Rect::from_min_max(
            pos2(self.frame.min.x, top),
            pos2(self.frame.max.x, bottom),
        );
        self.frame
    }

    /// Consume the session, yielding the edited copy.
    pub fn into_event(self) -> Event {
        self.editing
    }

    fn derived_times(&self) -> (Time, Time) {
        let delta_start = self
            .grid
            .rounded_minutes(self.frame.min.y - self.frame_at_begin.min.y);
        let duration = self.grid.rounded_minutes(self.frame.height());
        let start = self.event_at_begin.start.add_minutes(delta_start);
        let end = start.add_minutes(duration);
        (start, end)
    }
}
