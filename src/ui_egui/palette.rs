use egui::{Color32, Visuals};

pub(crate) fn with_alpha(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

fn blend(a: Color32, b: Color32, t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    let lerp = |c1: u8, c2: u8| -> u8 { ((c1 as f32 * (1.0 - t)) + (c2 as f32 * t)).round() as u8 };
    Color32::from_rgb(lerp(a.r(), b.r()), lerp(a.g(), b.g()), lerp(a.b(), b.b()))
}

/// Colors for the schedule grid, derived from the active egui visuals.
#[derive(Clone, Copy)]
pub(crate) struct SchedulePalette {
    pub column_bg: Color32,
    pub alt_column_bg: Color32,
    pub hour_line: Color32,
    pub slot_line: Color32,
    pub label_text: Color32,
    pub block_bg: Color32,
    pub editing_bg: Color32,
    pub read_only_bg: Color32,
    pub block_text: Color32,
    pub preview_bg: Color32,
    pub preview_border: Color32,
    pub knob_fill: Color32,
    pub knob_border: Color32,
    pub now_line: Color32,
}

impl SchedulePalette {
    pub fn from_visuals(visuals: &Visuals) -> Self {
        let accent = visuals.selection.bg_fill;
        let base = visuals.extreme_bg_color;
        let border = visuals.widgets.noninteractive.bg_stroke.color;

        Self {
            column_bg: base,
            alt_column_bg: blend(base, visuals.faint_bg_color, 0.6),
            hour_line: border,
            slot_line: with_alpha(border, 90),
            label_text: visuals.weak_text_color(),
            block_bg: accent,
            editing_bg: blend(accent, Color32::WHITE, if visuals.dark_mode { 0.15 } else { 0.0 }),
            read_only_bg: blend(accent, visuals.widgets.inactive.bg_fill, 0.7),
            block_text: Color32::WHITE,
            preview_bg: with_alpha(accent, 60),
            preview_border: with_alpha(accent, 160),
            knob_fill: visuals.panel_fill,
            knob_border: accent,
            now_line: Color32::from_rgb(255, 100, 100),
        }
    }
}
