use super::cell::CellRef;
use crate::models::event::Event;

/// Tactile cue requested by the core; the view layer decides how to render it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    /// Editing started
    Impact,
    /// The edited time span changed
    Selection,
    /// A long-press hit a read-only event
    Error,
}

pub type EventCallback = Box<dyn FnMut(CellRef, &Event)>;
pub type FeedbackCallback = Box<dyn FnMut(Feedback)>;

/// Lifecycle hooks for the consumer of the widget.
#[derive(Default)]
pub struct SamidareCallbacks {
    begin_editing: Option<EventCallback>,
    edit: Option<EventCallback>,
    end_editing: Option<EventCallback>,
    feedback: Option<FeedbackCallback>,
}

impl SamidareCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_begin_editing(mut self, callback: impl FnMut(CellRef, &Event) + 'static) -> Self {
        self.begin_editing = Some(Box::new(callback));
        self
    }

    /// Fired once per effective change of the edited start/end.
    pub fn on_edit(mut self, callback: impl FnMut(CellRef, &Event) + 'static) -> Self {
        self.edit = Some(Box::new(callback));
        self
    }

    /// Receives the final edited copy; persist it here.
    pub fn on_end_editing(mut self, callback: impl FnMut(CellRef, &Event) + 'static) -> Self {
        self.end_editing = Some(Box::new(callback));
        self
    }

    pub fn on_feedback(mut self, callback: impl FnMut(Feedback) + 'static) -> Self {
        self.feedback = Some(Box::new(callback));
        self
    }

    pub(super) fn begin_editing(&mut self, cell: CellRef, event: &Event) {
        if let Some(callback) = self.begin_editing.as_mut() {
            callback(cell, event);
        }
    }

    pub(super) fn edit(&mut self, cell: CellRef, event: &Event) {
        if let Some(callback) = self.edit.as_mut() {
            callback(cell, event);
        }
    }

    pub(super) fn end_editing(&mut self, cell: CellRef, event: &Event) {
        if let Some(callback) = self.end_editing.as_mut() {
            callback(cell, event);
        }
    }

    pub(super) fn feedback(&mut self, feedback: Feedback) {
        if let Some(callback) = self.feedback.as_mut() {
            callback(feedback);
        }
    }
}
