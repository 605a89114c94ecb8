//! Scripted input producer.
//!
//! Stands in for a browser or window event source: raw pixel events are fed
//! to an [`InputSampler`] and the normalised values are published to the
//! [`InputRegisters`] the session reads.

use glam::DVec2;
use orbital_config::{CursorPath, SessionConfig, ViewportConfig};
use orbital_input::{InputRegisters, InputSampler};

/// Document height as a multiple of the viewport height.
const PAGE_HEIGHT_VIEWPORTS: f64 = 5.0;

/// Deterministic input over one session.
#[derive(Debug, Clone)]
pub struct InputScript {
    sampler: InputSampler,
    duration_secs: f64,
    cursor_path: CursorPath,
}

impl InputScript {
    /// Builds a script from the viewport and session settings.
    pub fn new(viewport: &ViewportConfig, session: &SessionConfig) -> Self {
        let viewport_px = DVec2::new(f64::from(viewport.width_px), f64::from(viewport.height_px));
        let mut sampler = InputSampler::new(viewport_px);
        sampler.on_layout(viewport_px.y * PAGE_HEIGHT_VIEWPORTS);
        Self {
            sampler,
            duration_secs: session.duration_secs,
            cursor_path: session.cursor_path,
        }
    }

    /// Scroll offset in pixels at `elapsed`, sweeping top to bottom.
    pub fn scroll_top_px(&self, elapsed: f64) -> f64 {
        let viewport_height = self.sampler.viewport_px().y;
        let range = viewport_height * (PAGE_HEIGHT_VIEWPORTS - 1.0);
        if self.duration_secs <= 0.0 {
            return range;
        }
        (elapsed / self.duration_secs).clamp(0.0, 1.0) * range
    }

    /// Pointer position in pixels at `elapsed`, if the pointer has moved.
    pub fn pointer_px(&self, elapsed: f64) -> Option<DVec2> {
        match self.cursor_path {
            CursorPath::Still => None,
            CursorPath::Lissajous => {
                let size = self.sampler.viewport_px();
                Some(DVec2::new(
                    size.x * (0.5 + 0.45 * (0.9 * elapsed).sin()),
                    size.y * (0.5 + 0.4 * (1.3 * elapsed + 0.5).sin()),
                ))
            }
        }
    }

    /// Resizes the viewport; the page keeps its height in viewports.
    pub fn resize(&mut self, width_px: u32, height_px: u32) {
        let height = f64::from(height_px);
        self.sampler.on_resized(f64::from(width_px), height);
        self.sampler.on_layout(height * PAGE_HEIGHT_VIEWPORTS);
    }

    /// Feeds the events for `elapsed` and publishes the sampled input.
    pub fn drive(&mut self, elapsed: f64, registers: &InputRegisters) {
        self.sampler.on_scroll(self.scroll_top_px(elapsed));
        if let Some(pointer) = self.pointer_px(elapsed) {
            self.sampler.on_pointer_moved(pointer.x, pointer.y);
        }
        registers.store_scroll_progress(self.sampler.scroll_progress());
        registers.store_cursor(self.sampler.cursor());
    }
}
