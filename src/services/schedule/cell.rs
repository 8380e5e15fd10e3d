use egui::{pos2, vec2, Pos2, Rect, Vec2};

use crate::models::event::EventId;

/// Hit area of a resize knob
pub const KNOB_HIT_SIZE: f32 = 24.0;
/// Visual diameter of a resize knob
pub const KNOB_VISUAL_SIZE: f32 = 10.0;
/// Distance of a knob's centre from the block's side
pub const KNOB_INSET: f32 = 16.0;
/// Horizontal gap between a block and its column edges
pub const CELL_INSET: f32 = 2.0;

/// Non-owning handle to an event block on the grid.
///
/// Handles stay valid while other blocks are inserted or removed; they are
/// looked up again on every use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRef {
    pub column: usize,
    pub event_id: EventId,
}

impl CellRef {
    pub fn new(column: usize, event_id: EventId) -> Self {
        Self { column, event_id }
    }
}

/// Drag handles shown on the block being edited.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KnobRects {
    pub top: Rect,
    pub bottom: Rect,
}

impl KnobRects {
    /// Top knob sits on the top edge near the right side, bottom knob on the
    /// bottom edge near the left side, so they stay apart on short blocks.
    pub fn for_frame(frame: Rect) -> Self {
        let size = Vec2::splat(KNOB_HIT_SIZE);
        let inset = KNOB_INSET.min(frame.width() / 2.0);
        Self {
            top: Rect::from_center_size(pos2(frame.right() - inset, frame.top()), size),
            bottom: Rect::from_center_size(pos2(frame.left() + inset, frame.bottom()), size),
        }
    }

    pub fn top_center(&self) -> Pos2 {
        self.top.center()
    }

    pub fn bottom_center(&self) -> Pos2 {
        self.bottom.center()
    }
}

/// Horizontal extent of a block in `column`.
pub(super) fn column_span(column: usize, column_width: f32) -> (f32, f32) {
    let left = column as f32 * column_width + CELL_INSET;
    (left, left + (column_width - 2.0 * CELL_INSET).max(0.0))
}

pub(super) fn block_rect(column: usize, column_width: f32, top: f32, bottom: f32) -> Rect {
    let (left, right) = column_span(column, column_width);
    Rect::from_min_size(pos2(left, top), vec2(right - left, bottom - top))
}
