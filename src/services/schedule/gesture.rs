use egui::Pos2;

use super::cell::CellRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    /// Press-and-hold on a block; starts editing and then drags the block
    LongPress,
    /// Drag of a knob or of the block already being edited
    Pan,
    Tap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    Began,
    Changed,
    Ended,
    Cancelled,
}

/// What the pointer was over when the gesture started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureTarget {
    Cell(CellRef),
    TopKnob,
    BottomKnob,
    Background,
}

/// One phase-tagged pointer sample.
///
/// `location` is in viewport coordinates of the column area: `x` from the
/// left of the first column, `y` from the top of the visible viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSample {
    pub kind: GestureKind,
    pub phase: GesturePhase,
    pub location: Pos2,
    pub target: GestureTarget,
}

impl GestureSample {
    pub fn new(kind: GestureKind, phase: GesturePhase, location: Pos2, target: GestureTarget) -> Self {
        Self {
            kind,
            phase,
            location,
            target,
        }
    }

    pub fn long_press(phase: GesturePhase, location: Pos2, target: GestureTarget) -> Self {
        Self::new(GestureKind::LongPress, phase, location, target)
    }

    pub fn pan(phase: GesturePhase, location: Pos2, target: GestureTarget) -> Self {
        Self::new(GestureKind::Pan, phase, location, target)
    }

    pub fn tap(location: Pos2, target: GestureTarget) -> Self {
        Self::new(GestureKind::Tap, GesturePhase::Ended, location, target)
    }
}
