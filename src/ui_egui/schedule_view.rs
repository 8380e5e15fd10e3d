//! egui rendering and pointer handling for the schedule grid.
//!
//! The view turns raw pointer state into [`GestureSample`]s for [`Samidare`],
//! forwards the frame clock to its auto-scroller and paints whatever the core
//! reports: grid lines, blocks, the preview ghost, knobs and the current time.

use chrono::Local;
use egui::{pos2, vec2, Align2, Color32, FontId, Pos2, Rect, Sense, Stroke};

use super::palette::{with_alpha, SchedulePalette};
use crate::models::time::Time;
use crate::services::schedule::{
    GestureKind, GesturePhase, GestureSample, GestureTarget, Samidare, KNOB_VISUAL_SIZE,
};

/// Width of the hour label gutter left of the first column
pub const TIME_LABEL_WIDTH: f32 = 56.0;
/// Pointer travel that turns a press into a move rather than a tap or hold
pub const TAP_SLOP: f32 = 6.0;

const BLOCK_ROUNDING: f32 = 4.0;

#[derive(Debug, Clone, Copy)]
struct Press {
    origin: Pos2,
    last: Pos2,
    started_at: f64,
    target: GestureTarget,
    moved: bool,
    active: Option<GestureKind>,
}

/// Turns press / hold / release pointer events into gesture samples.
///
/// Times are seconds on the display clock; locations are viewport
/// coordinates of the column area.
#[derive(Debug, Clone)]
pub struct GestureRecognizer {
    long_press: f64,
    press: Option<Press>,
}

impl GestureRecognizer {
    pub fn new(long_press_ms: u64) -> Self {
        Self {
            long_press: long_press_ms as f64 / 1000.0,
            press: None,
        }
    }

    pub fn is_pressed(&self) -> bool {
        self.press.is_some()
    }

    /// Pointer went down. When `grabs` is set the target can be dragged right
    /// away (a knob or the block being edited) and a pan begins immediately.
    pub fn press(
        &mut self,
        location: Pos2,
        time: f64,
        target: GestureTarget,
        grabs: bool,
    ) -> Option<GestureSample> {
        let active = grabs.then_some(GestureKind::Pan);
        self.press = Some(Press {
            origin: location,
            last: location,
            started_at: time,
            target,
            moved: false,
            active,
        });
        active.map(|_| GestureSample::pan(GesturePhase::Began, location, target))
    }

    /// Pointer is still down at `location`.
    pub fn hold(&mut self, location: Pos2, time: f64) -> Option<GestureSample> {
        let press = self.press.as_mut()?;
        press.last = location;
        if press.origin.distance(location) > TAP_SLOP {
            press.moved = true;
        }

        match press.active {
            Some(kind) => Some(GestureSample::new(
                kind,
                GesturePhase::Changed,
                location,
                press.target,
            )),
            None => {
                let held = time - press.started_at >= self.long_press;
                if !press.moved && held && matches!(press.target, GestureTarget::Cell(_)) {
                    press.active = Some(GestureKind::LongPress);
                    Some(GestureSample::long_press(
                        GesturePhase::Began,
                        location,
                        press.target,
                    ))
                } else {
                    None
                }
            }
        }
    }

    /// Pointer went up. Ends the active drag, or reports a tap when the
    /// pointer never left the slop radius.
    pub fn release(&mut self) -> Option<GestureSample> {
        let press = self.press.take()?;
        match press.active {
            Some(kind) => Some(GestureSample::new(
                kind,
                GesturePhase::Ended,
                press.last,
                press.target,
            )),
            None if !press.moved => Some(GestureSample::tap(press.last, press.target)),
            None => None,
        }
    }

    /// Abandon the current press, e.g. when the pointer leaves the window.
    pub fn cancel(&mut self) -> Option<GestureSample> {
        let press = self.press.take()?;
        press.active.map(|kind| {
            GestureSample::new(kind, GesturePhase::Cancelled, press.last, press.target)
        })
    }
}

pub struct ScheduleView {
    recognizer: GestureRecognizer,
}

impl ScheduleView {
    pub fn new(long_press_ms: u64) -> Self {
        Self {
            recognizer: GestureRecognizer::new(long_press_ms),
        }
    }

    /// Lay out, drive and paint the schedule in the remaining space of `ui`.
    pub fn show(&mut self, ui: &mut egui::Ui, schedule: &mut Samidare) -> egui::Response {
        let palette = SchedulePalette::from_visuals(ui.visuals());
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let columns_rect =
            Rect::from_min_max(pos2(rect.left() + TIME_LABEL_WIDTH, rect.top()), rect.max);

        schedule.set_viewport_height(columns_rect.height());
        self.handle_input(ui, &response, columns_rect, schedule);

        let now = ui.input(|i| i.time);
        schedule.tick(now);

        paint_grid(ui, rect, columns_rect, schedule, &palette);
        paint_blocks(ui, columns_rect, schedule, &palette);
        paint_current_time(ui, columns_rect, schedule, &palette);

        // Long-press detection and auto-scroll both need frames without input
        if schedule.is_auto_scrolling() || self.recognizer.is_pressed() {
            ui.ctx().request_repaint();
        }

        response
    }

    fn handle_input(
        &mut self,
        ui: &egui::Ui,
        response: &egui::Response,
        columns_rect: Rect,
        schedule: &mut Samidare,
    ) {
        let (time, pointer, pressed, down, wheel) = ui.input(|i| {
            (
                i.time,
                i.pointer.interact_pos(),
                i.pointer.primary_pressed(),
                i.pointer.primary_down(),
                i.smooth_scroll_delta.y,
            )
        });

        if response.hovered() && wheel != 0.0 && !schedule.is_dragging() {
            schedule.scroll_by(-wheel);
        }

        let to_local = |p: Pos2| pos2(p.x - columns_rect.left(), p.y - columns_rect.top());

        if pressed {
            if let Some(point) = pointer.filter(|p| columns_rect.contains(*p)) {
                let location = to_local(point);
                let target = schedule.target_at(location);
                let grabs = grabs_immediately(schedule, target);
                if let Some(sample) = self.recognizer.press(location, time, target, grabs) {
                    schedule.handle_gesture(sample);
                }
            }
            return;
        }

        if !self.recognizer.is_pressed() {
            return;
        }

        let sample = if down {
            match pointer {
                Some(point) => self.recognizer.hold(to_local(point), time),
                None => self.recognizer.cancel(),
            }
        } else {
            self.recognizer.release()
        };

        if let Some(sample) = sample {
            schedule.handle_gesture(sample);
        }
    }
}

/// Knobs and the block under edit can be dragged without a long-press.
fn grabs_immediately(schedule: &Samidare, target: GestureTarget) -> bool {
    match target {
        GestureTarget::TopKnob | GestureTarget::BottomKnob => true,
        GestureTarget::Cell(cell) => schedule.editing().is_some_and(|s| s.cell() == cell),
        GestureTarget::Background => false,
    }
}

fn content_to_screen(columns_rect: Rect, offset: f32) -> impl Fn(Rect) -> Rect {
    move |frame: Rect| frame.translate(vec2(columns_rect.left(), columns_rect.top() - offset))
}

fn paint_grid(
    ui: &egui::Ui,
    rect: Rect,
    columns_rect: Rect,
    schedule: &Samidare,
    palette: &SchedulePalette,
) {
    let Some(grid) = schedule.grid().copied() else {
        return;
    };
    let offset = schedule.scroll_offset();
    let to_screen_y = |y: f32| columns_rect.top() + y - offset;
    let painter = ui.painter_at(columns_rect);
    let label_painter = ui.painter_at(Rect::from_min_max(
        rect.min,
        pos2(columns_rect.left(), rect.bottom()),
    ));

    let column_width = schedule.column_width();
    let grid_top = to_screen_y(0.0);
    let grid_bottom = to_screen_y(grid.total_height());
    for column in 0..schedule.number_of_columns() {
        let left = columns_rect.left() + column as f32 * column_width;
        let column_rect =
            Rect::from_min_max(pos2(left, grid_top), pos2(left + column_width, grid_bottom));
        let fill = if column % 2 == 0 {
            palette.column_bg
        } else {
            palette.alt_column_bg
        };
        painter.rect_filled(column_rect, 0.0, fill);
        painter.line_segment(
            [pos2(left, grid_top), pos2(left, grid_bottom)],
            Stroke::new(1.0, palette.hour_line),
        );
    }

    let range = grid.range();
    let right = (columns_rect.left() + schedule.content_width()).min(columns_rect.right());
    let font = FontId::proportional(11.0);
    for step in 0..=range.number_of_intervals() {
        let time = range
            .start()
            .add_minutes(step * range.min_interval() as i64);
        let y = to_screen_y(grid.time_to_y(time));
        if y < rect.top() - font.size || y > rect.bottom() + font.size {
            continue;
        }

        let on_hour = time.minutes() == 0;
        let stroke = if on_hour {
            Stroke::new(1.0, palette.hour_line)
        } else {
            Stroke::new(0.5, palette.slot_line)
        };
        painter.line_segment([pos2(columns_rect.left(), y), pos2(right, y)], stroke);

        if on_hour {
            label_painter.text(
                pos2(columns_rect.left() - 6.0, y),
                Align2::RIGHT_CENTER,
                time.to_string(),
                font.clone(),
                palette.label_text,
            );
        }
    }
}

fn paint_blocks(ui: &egui::Ui, columns_rect: Rect, schedule: &Samidare, palette: &SchedulePalette) {
    let painter = ui.painter_at(columns_rect);
    let to_screen = content_to_screen(columns_rect, schedule.scroll_offset());

    if let Some(preview) = schedule.preview_frame() {
        let ghost = to_screen(preview);
        painter.rect_filled(ghost, BLOCK_ROUNDING, palette.preview_bg);
        painter.rect_stroke(ghost, BLOCK_ROUNDING, Stroke::new(1.0, palette.preview_border));
    }

    for layout in schedule.cells() {
        let frame = to_screen(layout.frame);
        if !frame.intersects(columns_rect) {
            continue;
        }

        let fill = if layout.is_editing {
            palette.editing_bg
        } else if layout.event.is_editable {
            palette.block_bg
        } else {
            palette.read_only_bg
        };
        painter.rect_filled(frame, BLOCK_ROUNDING, fill);
        if layout.is_editing {
            painter.rect_stroke(
                frame,
                BLOCK_ROUNDING,
                Stroke::new(1.5, with_alpha(Color32::WHITE, 200)),
            );
        }

        let text = format!(
            "{}\n{} - {}",
            layout.event.title, layout.event.start, layout.event.end
        );
        let job = egui::text::LayoutJob::simple(
            text,
            FontId::proportional(11.0),
            palette.block_text,
            (frame.width() - 8.0).max(0.0),
        );
        let galley = ui.fonts(|f| f.layout_job(job));
        painter
            .with_clip_rect(frame.intersect(columns_rect))
            .galley(frame.min + vec2(4.0, 3.0), galley, palette.block_text);
    }

    if let Some(knobs) = schedule.knob_rects() {
        let to_screen_pos =
            |p: Pos2| pos2(columns_rect.left() + p.x, columns_rect.top() + p.y - schedule.scroll_offset());
        for center in [knobs.top_center(), knobs.bottom_center()] {
            painter.circle(
                to_screen_pos(center),
                KNOB_VISUAL_SIZE / 2.0,
                palette.knob_fill,
                Stroke::new(2.0, palette.knob_border),
            );
        }
    }
}

fn paint_current_time(
    ui: &egui::Ui,
    columns_rect: Rect,
    schedule: &Samidare,
    palette: &SchedulePalette,
) {
    let now = Time::from(Local::now().time());
    let Some(y) = schedule.indicator_y(now) else {
        return;
    };
    let y = columns_rect.top() + y - schedule.scroll_offset();
    let x_start = columns_rect.left();
    let x_end = (x_start + schedule.content_width()).min(columns_rect.right());

    let painter = ui.painter_at(columns_rect.expand2(vec2(4.0, 0.0)));
    painter.circle_filled(pos2(x_start, y), 3.0, palette.now_line);
    painter.line_segment(
        [pos2(x_start, y), pos2(x_end, y)],
        Stroke::new(2.0, palette.now_line),
    );
}
