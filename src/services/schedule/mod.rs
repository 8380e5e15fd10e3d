//! Schedule widget core.
//!
//! `Samidare` owns the cell table built from a [`ScheduleDataSource`], the
//! single active [`EditSession`], the [`AutoScroller`] and the vertical
//! scroll position. The view layer feeds it gesture samples and display
//! ticks and reads back cell frames for drawing.

mod callbacks;
mod cell;
mod data_source;
mod gesture;

pub use callbacks::{EventCallback, Feedback, FeedbackCallback, SamidareCallbacks};
pub use cell::{CellRef, KnobRects, CELL_INSET, KNOB_HIT_SIZE, KNOB_INSET, KNOB_VISUAL_SIZE};
#[cfg(test)]
pub use data_source::MockScheduleDataSource;
pub use data_source::{ScheduleDataSource, StaticSchedule};
pub use gesture::{GestureKind, GesturePhase, GestureSample, GestureTarget};

use egui::{pos2, Pos2, Rect};

use crate::models::event::Event;
use crate::models::settings::Settings;
use crate::models::time::Time;
use crate::services::auto_scroll::{AutoScroller, ScrollMetrics};
use crate::services::edit_session::{EditBounds, EditEdge, EditSession};
use crate::services::time_grid::TimeGrid;

use self::cell::block_rect;

/// A block as it should be drawn this frame.
#[derive(Debug, Clone, Copy)]
pub struct CellLayout<'a> {
    pub cell: CellRef,
    pub event: &'a Event,
    /// Frame in content coordinates
    pub frame: Rect,
    pub is_editing: bool,
}

pub struct Samidare {
    settings: Settings,
    grid: Option<TimeGrid>,
    column_width: f32,
    columns: Vec<Vec<Event>>,
    session: Option<EditSession>,
    preview: Option<Rect>,
    drag_location: Option<Pos2>,
    auto_scroller: AutoScroller,
    scroll: ScrollMetrics,
    callbacks: SamidareCallbacks,
}

impl Samidare {
    pub fn new(settings: Settings) -> Self {
        let scroll = ScrollMetrics {
            offset: -settings.half_line_height,
            top_inset: settings.half_line_height,
            ..ScrollMetrics::default()
        };
        Self {
            auto_scroller: AutoScroller::new(settings.auto_scroll),
            column_width: settings.column_width,
            settings,
            grid: None,
            columns: Vec::new(),
            session: None,
            preview: None,
            drag_location: None,
            scroll,
            callbacks: SamidareCallbacks::default(),
        }
    }

    pub fn with_callbacks(mut self, callbacks: SamidareCallbacks) -> Self {
        self.callbacks = callbacks;
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn grid(&self) -> Option<&TimeGrid> {
        self.grid.as_ref()
    }

    /// Rebuild the grid and cell table. Any active edit ends first, since its
    /// cell is about to be replaced.
    pub fn reload(&mut self, source: &dyn ScheduleDataSource) {
        self.end_editing();

        let grid = TimeGrid::new(source.time_range(), source.layout());
        self.column_width = source.column_width();
        self.columns = (0..source.number_of_columns())
            .map(|column| source.events(column))
            .collect();
        self.grid = Some(grid);

        self.scroll.content_height = self.content_height();
        self.scroll.offset = self.scroll.clamp_offset(self.scroll.offset);

        log::debug!(
            "Reloaded schedule: {} columns, {}-{} every {} min",
            self.columns.len(),
            grid.range().start(),
            grid.range().end(),
            grid.range().min_interval()
        );
    }

    pub fn number_of_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn column_width(&self) -> f32 {
        self.column_width
    }

    /// Grid height plus the bottom label margin.
    pub fn content_height(&self) -> f32 {
        self.grid
            .map(|grid| grid.total_height() + self.settings.half_line_height)
            .unwrap_or(0.0)
    }

    pub fn content_width(&self) -> f32 {
        self.columns.len() as f32 * self.column_width
    }

    /// The committed event behind `cell`.
    pub fn event(&self, cell: CellRef) -> Option<&Event> {
        self.columns
            .get(cell.column)?
            .iter()
            .find(|event| event.id == cell.event_id)
    }

    /// Current frame of `cell`; the live drag frame while it is being edited.
    pub fn cell_frame(&self, cell: CellRef) -> Option<Rect> {
        if let Some(session) = self.session.as_ref().filter(|s| s.cell() == cell) {
            return Some(session.frame());
        }
        let event = self.event(cell)?;
        self.layout_frame(cell.column, event)
    }

    /// Every block to draw, with the edited block last so it paints on top.
    pub fn cells(&self) -> Vec<CellLayout<'_>> {
        let editing = self.session.as_ref().map(|s| s.cell());
        let mut cells = Vec::new();

        for (column, events) in self.columns.iter().enumerate() {
            for event in events {
                let cell = CellRef::new(column, event.id);
                if Some(cell) == editing {
                    continue;
                }
                if let Some(frame) = self.layout_frame(column, event) {
                    cells.push(CellLayout {
                        cell,
                        event,
                        frame,
                        is_editing: false,
                    });
                }
            }
        }

        if let Some(session) = &self.session {
            cells.push(CellLayout {
                cell: session.cell(),
                event: session.event(),
                frame: session.frame(),
                is_editing: true,
            });
        }

        cells
    }

    /// Topmost block under a point in content coordinates.
    pub fn hit_test(&self, point: Pos2) -> Option<CellRef> {
        self.cells()
            .iter()
            .rev()
            .find(|layout| layout.frame.contains(point))
            .map(|layout| layout.cell)
    }

    /// Resolve what a gesture starting at `location` (viewport coordinates)
    /// would grab. Knobs of the edited block win over blocks.
    pub fn target_at(&self, location: Pos2) -> GestureTarget {
        let point = self.to_content(location);
        if let Some(knobs) = self.knob_rects() {
            if knobs.top.contains(point) {
                return GestureTarget::TopKnob;
            }
            if knobs.bottom.contains(point) {
                return GestureTarget::BottomKnob;
            }
        }
        match self.hit_test(point) {
            Some(cell) => GestureTarget::Cell(cell),
            None => GestureTarget::Background,
        }
    }

    pub fn to_content(&self, location: Pos2) -> Pos2 {
        pos2(location.x, location.y + self.scroll.offset)
    }

    pub fn knob_rects(&self) -> Option<KnobRects> {
        self.session
            .as_ref()
            .map(|session| KnobRects::for_frame(session.frame()))
    }

    /// Ghost of the edited block at its begin-editing position.
    pub fn preview_frame(&self) -> Option<Rect> {
        self.preview
    }

    pub fn editing(&self) -> Option<&EditSession> {
        self.session.as_ref()
    }

    pub fn is_editing(&self) -> bool {
        self.session.is_some()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_location.is_some()
    }

    /// Start editing `cell`, ending any session that is already active.
    pub fn begin_editing(&mut self, cell: CellRef, displays_preview: bool) {
        let Some(grid) = self.grid else {
            debug_assert!(false, "begin_editing called before reload");
            log::error!("begin_editing called before reload; ignoring");
            return;
        };

        self.end_editing();

        let Some(event) = self.event(cell).cloned() else {
            log::warn!("begin_editing: no event {} in column {}", cell.event_id, cell.column);
            return;
        };
        if !self.is_within_range(&event) {
            log::warn!(
                "begin_editing: event {} ({}-{}) lies outside the visible range",
                event.id,
                event.start,
                event.end
            );
            return;
        }
        let Some(frame) = self.layout_frame(cell.column, &event) else {
            return;
        };

        let bounds = self.edit_bounds(&grid);
        self.session = Some(EditSession::begin(cell, &event, frame, grid, bounds));
        self.preview = displays_preview.then_some(frame);

        log::debug!("Begin editing {} ({}-{})", event.id, event.start, event.end);
        self.callbacks.feedback(Feedback::Impact);
        self.callbacks.begin_editing(cell, &event);
    }

    /// Move `edge` of the edited block by `delta` pixels.
    pub fn edit(&mut self, edge: EditEdge, delta: f32) {
        let Some(session) = self.session.as_mut() else {
            debug_assert!(false, "edit called without an active session");
            log::error!("edit called without an active session; ignoring");
            return;
        };

        let cell = session.cell();
        if let Some(event) = session.edit(edge, delta).cloned() {
            self.callbacks.feedback(Feedback::Selection);
            self.callbacks.edit(cell, &event);
        }
    }

    /// Realign the edited block to the interval grid.
    pub fn snap_to_interval(&mut self) -> Option<Rect> {
        self.session.as_mut().map(|session| session.snap_to_interval())
    }

    /// Tear down the active session, committing the edited copy to the cell
    /// table. Safe to call when nothing is being edited.
    pub fn end_editing(&mut self) {
        let Some(session) = self.session.take() else {
            return;
        };

        self.drag_location = None;
        self.preview = None;
        self.auto_scroller.stop();

        let cell = session.cell();
        let event = session.into_event();
        if let Some(slot) = self
            .columns
            .get_mut(cell.column)
            .and_then(|events| events.iter_mut().find(|e| e.id == cell.event_id))
        {
            *slot = event.clone();
        }

        log::debug!("End editing {} ({}-{})", event.id, event.start, event.end);
        self.callbacks.end_editing(cell, &event);
    }

    /// Remove a block from the table. Editing of that block ends first.
    pub fn remove_cell(&mut self, cell: CellRef) -> Option<Event> {
        if self.session.as_ref().is_some_and(|s| s.cell() == cell) {
            self.end_editing();
        }

        let events = self.columns.get_mut(cell.column)?;
        let index = events.iter().position(|e| e.id == cell.event_id)?;
        Some(events.remove(index))
    }

    pub fn handle_gesture(&mut self, sample: GestureSample) {
        match (sample.kind, sample.phase) {
            (GestureKind::Tap, _) => self.handle_tap(sample.location),
            (GestureKind::LongPress, GesturePhase::Began) => {
                self.handle_long_press(sample.location, sample.target)
            }
            (GestureKind::Pan, GesturePhase::Began) => {
                self.handle_pan(sample.location, sample.target)
            }
            (_, GesturePhase::Changed) => self.drag_changed(sample.location),
            (_, GesturePhase::Ended | GesturePhase::Cancelled) => self.drag_ended(),
        }
    }

    /// Display clock. Advances auto-scroll and keeps the dragged block under
    /// the pointer while the content moves.
    pub fn tick(&mut self, timestamp: f64) {
        if !self.auto_scroller.is_running() {
            return;
        }

        let applied = self.auto_scroller.tick(timestamp, &mut self.scroll);
        if applied == 0.0 {
            return;
        }

        if let Some(edge) = self.session.as_ref().and_then(|s| s.active_edge()) {
            self.edit(edge, applied);
        }
    }

    pub fn is_auto_scrolling(&self) -> bool {
        self.auto_scroller.is_running()
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll.offset
    }

    pub fn set_viewport_height(&mut self, height: f32) {
        self.scroll.viewport_height = height;
        self.scroll.offset = self.scroll.clamp_offset(self.scroll.offset);
    }

    /// Scroll by user input, returning the displacement applied.
    pub fn scroll_by(&mut self, delta: f32) -> f32 {
        self.scroll.scroll_by(delta)
    }

    /// Exact (unbinned) offset of `time`, for the current-time indicator.
    pub fn indicator_y(&self, time: Time) -> Option<f32> {
        let grid = self.grid?;
        grid.range().contains(time).then(|| grid.exact_y(time))
    }

    /// Blocks sticking out of the visible range cannot be edited, their
    /// frame starts outside the draggable bounds.
    fn is_within_range(&self, event: &Event) -> bool {
        self.grid.is_some_and(|grid| {
            grid.range().contains(event.start) && grid.range().contains(event.end)
        })
    }

    fn layout_frame(&self, column: usize, event: &Event) -> Option<Rect> {
        let grid = self.grid.as_ref()?;
        let (top, bottom) = grid.span(event.start, event.end);
        Some(block_rect(column, self.column_width, top, bottom))
    }

    fn edit_bounds(&self, grid: &TimeGrid) -> EditBounds {
        EditBounds {
            content_height: self.content_height(),
            half_line_height: self.settings.half_line_height,
            min_height: grid.interval_height(),
        }
    }

    fn handle_tap(&mut self, location: Pos2) {
        let Some(session) = &self.session else {
            return;
        };
        let point = self.to_content(location);
        let knobs = KnobRects::for_frame(session.frame());
        let inside = session.frame().contains(point)
            || knobs.top.contains(point)
            || knobs.bottom.contains(point);
        if !inside {
            self.end_editing();
        }
    }

    fn handle_long_press(&mut self, location: Pos2, target: GestureTarget) {
        if self.is_dragging() {
            log::warn!("Long-press ignored: another drag is in progress");
            return;
        }
        let GestureTarget::Cell(cell) = target else {
            return;
        };
        let Some(event) = self.event(cell) else {
            return;
        };
        if !event.is_editable || !self.is_within_range(event) {
            log::debug!("Long-press on read-only event {}", event.id);
            self.callbacks.feedback(Feedback::Error);
            return;
        }

        let already_editing = self.session.as_ref().is_some_and(|s| s.cell() == cell);
        if !already_editing {
            self.begin_editing(cell, self.settings.displays_preview);
        }
        self.start_drag(EditEdge::Both, location);
    }

    fn handle_pan(&mut self, location: Pos2, target: GestureTarget) {
        if self.is_dragging() {
            log::warn!("Pan ignored: another drag is in progress");
            return;
        }
        let Some(session) = &self.session else {
            return;
        };
        let edge = match target {
            GestureTarget::TopKnob => EditEdge::Top,
            GestureTarget::BottomKnob => EditEdge::Bottom,
            GestureTarget::Cell(cell) if cell == session.cell() => EditEdge::Both,
            _ => return,
        };
        self.start_drag(edge, location);
    }

    fn start_drag(&mut self, edge: EditEdge, location: Pos2) {
        if let Some(session) = self.session.as_mut() {
            session.set_active_edge(Some(edge));
            self.drag_location = Some(location);
        }
    }

    fn drag_changed(&mut self, location: Pos2) {
        let Some(previous) = self.drag_location.replace(location) else {
            return;
        };
        let Some(edge) = self.session.as_ref().and_then(|s| s.active_edge()) else {
            return;
        };

        self.edit(edge, location.y - previous.y);
        self.auto_scroller.track(location, self.scroll.viewport_height);
    }

    fn drag_ended(&mut self) {
        if self.drag_location.take().is_none() {
            return;
        }
        self.auto_scroller.stop();
        if let Some(session) = self.session.as_mut() {
            session.snap_to_interval();
            session.set_active_edge(None);
        }
    }
}

#[cfg(test)]
mod tests;
