//! Edge-triggered auto-scroll while a block is being dragged.
//!
//! The scroller is armed by drag samples that land close to the top or bottom
//! of the viewport and advanced by display ticks. The first tick after arming
//! only records its timestamp; later ticks scroll proportionally to elapsed
//! time, faster the closer the pointer is to the edge.

use egui::Pos2;

use crate::models::settings::AutoScrollSettings;

/// Vertical scroll position and the limits it is clamped to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMetrics {
    pub offset: f32,
    pub viewport_height: f32,
    pub content_height: f32,
    pub top_inset: f32,
    pub bottom_inset: f32,
}

impl ScrollMetrics {
    pub fn min_offset(&self) -> f32 {
        -self.top_inset
    }

    pub fn max_offset(&self) -> f32 {
        (self.content_height - self.viewport_height + self.bottom_inset).max(self.min_offset())
    }

    pub fn clamp_offset(&self, offset: f32) -> f32 {
        offset.clamp(self.min_offset(), self.max_offset())
    }

    /// Scroll by `delta`, returning the displacement actually applied.
    pub fn scroll_by(&mut self, delta: f32) -> f32 {
        let previous = self.offset;
        self.offset = self.clamp_offset(self.offset + delta);
        self.offset - previous
    }
}

impl Default for ScrollMetrics {
    fn default() -> Self {
        Self {
            offset: 0.0,
            viewport_height: 0.0,
            content_height: 0.0,
            top_inset: 0.0,
            bottom_inset: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollEdge {
    Top,
    Bottom,
}

impl ScrollEdge {
    fn direction(&self) -> f32 {
        match self {
            ScrollEdge::Top => -1.0,
            ScrollEdge::Bottom => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct ScrollLoop {
    last_location: Pos2,
    last_tick: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct AutoScroller {
    settings: AutoScrollSettings,
    running: Option<ScrollLoop>,
}

impl AutoScroller {
    pub fn new(settings: AutoScrollSettings) -> Self {
        Self {
            settings,
            running: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// Edge the pointer is close to, with the scroll strength in `0..=1`.
    pub fn proximity(&self, y: f32, viewport_height: f32) -> Option<(ScrollEdge, f32)> {
        if viewport_height <= 0.0 {
            return None;
        }
        let threshold = self.settings.threshold;
        let ratio = y / viewport_height;

        if ratio < threshold {
            let strength = (1.0 - ratio / threshold).min(1.0);
            Some((ScrollEdge::Top, strength))
        } else if ratio > 1.0 - threshold {
            let strength = ((ratio - (1.0 - threshold)) * (1.0 / threshold)).min(1.0);
            Some((ScrollEdge::Bottom, strength))
        } else {
            None
        }
    }

    /// Feed a drag sample in viewport coordinates. Starts the loop when the
    /// pointer enters an edge zone and stops it when the pointer leaves.
    pub fn track(&mut self, location: Pos2, viewport_height: f32) -> bool {
        if self.proximity(location.y, viewport_height).is_none() {
            self.stop();
            return false;
        }

        match self.running.as_mut() {
            Some(state) => state.last_location = location,
            None => {
                log::debug!("Auto-scroll started at y={:.1}", location.y);
                self.running = Some(ScrollLoop {
                    last_location: location,
                    last_tick: None,
                });
            }
        }
        true
    }

    pub fn stop(&mut self) {
        if self.running.take().is_some() {
            log::debug!("Auto-scroll stopped");
        }
    }

    /// Advance one display tick, returning the scroll displacement applied.
    pub fn tick(&mut self, timestamp: f64, metrics: &mut ScrollMetrics) -> f32 {
        let Some(location) = self.running.map(|state| state.last_location) else {
            return 0.0;
        };
        let Some((edge, strength)) = self.proximity(location.y, metrics.viewport_height) else {
            return 0.0;
        };
        let Some(state) = self.running.as_mut() else {
            return 0.0;
        };

        let Some(previous) = state.last_tick.replace(timestamp) else {
            return 0.0;
        };
        let elapsed = (timestamp - previous).max(0.0) as f32;

        let speed = (self.settings.max_speed - self.settings.min_speed) * strength
            + self.settings.min_speed;
        metrics.scroll_by(speed * elapsed * edge.direction())
    }
}
