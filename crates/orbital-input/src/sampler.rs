//! Pointer and scroll normalization.
//!
//! [`InputSampler`] keeps the last known pointer position and scroll layout
//! reported by the host and turns them into the two bounded signals the
//! scene consumes: a cursor in NDC and a scroll progress in \[0, 1\].

use glam::DVec2;
use tracing::trace;

/// Smallest scrollable range (pixels) used as a divisor.
const MIN_SCROLL_RANGE_PX: f64 = 1e-6;

/// Smallest viewport dimension (pixels) used as a divisor.
const MIN_VIEWPORT_PX: f64 = 1.0;

/// Clamps a raw progress value into \[0, 1\]. Non-finite input maps to 0.
#[must_use]
pub fn clamp_progress(raw: f64) -> f64 {
    if raw.is_nan() {
        return 0.0;
    }
    raw.clamp(0.0, 1.0)
}

/// Clamps an NDC cursor into \[-1, 1\]². Non-finite components map to 0.
#[must_use]
pub fn sanitize_cursor(cursor: DVec2) -> DVec2 {
    let axis = |v: f64| if v.is_nan() { 0.0 } else { v.clamp(-1.0, 1.0) };
    DVec2::new(axis(cursor.x), axis(cursor.y))
}

/// Converts a pointer position in client pixels to NDC (+Y up).
#[must_use]
pub fn pointer_to_ndc(client_px: DVec2, viewport_px: DVec2) -> DVec2 {
    let w = viewport_px.x.max(MIN_VIEWPORT_PX);
    let h = viewport_px.y.max(MIN_VIEWPORT_PX);
    sanitize_cursor(DVec2::new(
        (client_px.x / w) * 2.0 - 1.0,
        -((client_px.y / h) * 2.0 - 1.0),
    ))
}

/// Scroll progress through a document.
///
/// Returns 0 when the document does not scroll (content no taller than the
/// viewport), otherwise `scroll_top / (doc_height - viewport_height)` clamped
/// into \[0, 1\].
#[must_use]
pub fn scroll_progress(scroll_top_px: f64, doc_height_px: f64, viewport_height_px: f64) -> f64 {
    let range = doc_height_px - viewport_height_px;
    if range.is_nan() || range <= 0.0 {
        return 0.0;
    }
    clamp_progress(scroll_top_px / range.max(MIN_SCROLL_RANGE_PX))
}

/// Last-known pointer and scroll state for one viewport.
///
/// # Usage
///
/// 1. Forward host events via the `on_*` methods as they arrive.
/// 2. Read [`cursor`](Self::cursor) and
///    [`scroll_progress`](Self::scroll_progress) once per frame.
#[derive(Debug, Clone)]
pub struct InputSampler {
    viewport_px: DVec2,
    pointer_px: Option<DVec2>,
    scroll_top_px: f64,
    doc_height_px: f64,
}

impl Default for InputSampler {
    fn default() -> Self {
        Self::new(DVec2::new(1280.0, 720.0))
    }
}

impl InputSampler {
    /// Creates a sampler for a viewport of the given pixel size.
    #[must_use]
    pub fn new(viewport_px: DVec2) -> Self {
        Self {
            viewport_px,
            pointer_px: None,
            scroll_top_px: 0.0,
            doc_height_px: viewport_px.y,
        }
    }

    /// Process a pointer-move event in client pixels.
    pub fn on_pointer_moved(&mut self, x: f64, y: f64) {
        self.pointer_px = Some(DVec2::new(x, y));
    }

    /// Process a viewport resize.
    pub fn on_resized(&mut self, width_px: f64, height_px: f64) {
        trace!(width_px, height_px, "viewport resized");
        self.viewport_px = DVec2::new(width_px, height_px);
    }

    /// Process a scroll event (document scroll offset in pixels).
    pub fn on_scroll(&mut self, scroll_top_px: f64) {
        self.scroll_top_px = scroll_top_px;
    }

    /// Process a document layout change (total scrollable height in pixels).
    pub fn on_layout(&mut self, doc_height_px: f64) {
        self.doc_height_px = doc_height_px;
    }

    /// Cursor in NDC; (0, 0) until the first pointer event.
    #[must_use]
    pub fn cursor(&self) -> DVec2 {
        self.pointer_px
            .map_or(DVec2::ZERO, |p| pointer_to_ndc(p, self.viewport_px))
    }

    /// Scroll progress in \[0, 1\].
    #[must_use]
    pub fn scroll_progress(&self) -> f64 {
        scroll_progress(self.scroll_top_px, self.doc_height_px, self.viewport_px.y)
    }

    /// Viewport size in pixels.
    #[must_use]
    pub fn viewport_px(&self) -> DVec2 {
        self.viewport_px
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointer_corners_map_to_ndc_corners() {
        let vp = DVec2::new(800.0, 600.0);
        assert_eq!(pointer_to_ndc(DVec2::ZERO, vp), DVec2::new(-1.0, 1.0));
        assert_eq!(pointer_to_ndc(vp, vp), DVec2::new(1.0, -1.0));
        assert_eq!(pointer_to_ndc(vp * 0.5, vp), DVec2::ZERO);
    }

    #[test]
    fn test_pointer_outside_window_is_clamped() {
        let vp = DVec2::new(800.0, 600.0);
        let c = pointer_to_ndc(DVec2::new(-400.0, 1200.0), vp);
        assert_eq!(c, DVec2::new(-1.0, -1.0));
    }

    #[test]
    fn test_zero_viewport_does_not_produce_nan() {
        let c = pointer_to_ndc(DVec2::new(10.0, 10.0), DVec2::ZERO);
        assert!(c.is_finite());
        assert!(c.x.abs() <= 1.0 && c.y.abs() <= 1.0);
    }

    #[test]
    fn test_scroll_progress_midway() {
        // 3000px document, 1000px viewport: 2000px scrollable.
        assert!((scroll_progress(500.0, 3000.0, 1000.0) - 0.25).abs() < 1e-12);
        assert!((scroll_progress(2000.0, 3000.0, 1000.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_scroll_progress_is_clamped() {
        assert_eq!(scroll_progress(-50.0, 3000.0, 1000.0), 0.0);
        assert_eq!(scroll_progress(5000.0, 3000.0, 1000.0), 1.0);
    }

    #[test]
    fn test_non_scrolling_document_reports_zero() {
        assert_eq!(scroll_progress(100.0, 1000.0, 1000.0), 0.0);
        assert_eq!(scroll_progress(100.0, 500.0, 1000.0), 0.0);
        assert_eq!(scroll_progress(100.0, f64::NAN, 1000.0), 0.0);
    }

    #[test]
    fn test_clamp_progress_handles_nan_and_range() {
        assert_eq!(clamp_progress(f64::NAN), 0.0);
        assert_eq!(clamp_progress(-0.5), 0.0);
        assert_eq!(clamp_progress(1.5), 1.0);
        assert_eq!(clamp_progress(f64::INFINITY), 1.0);
        assert_eq!(clamp_progress(0.4), 0.4);
    }

    #[test]
    fn test_sanitize_cursor() {
        let c = sanitize_cursor(DVec2::new(f64::NAN, 3.0));
        assert_eq!(c, DVec2::new(0.0, 1.0));
    }

    #[test]
    fn test_sampler_cursor_defaults_to_origin() {
        let sampler = InputSampler::new(DVec2::new(800.0, 600.0));
        assert_eq!(sampler.cursor(), DVec2::ZERO);
        assert_eq!(sampler.scroll_progress(), 0.0);
    }

    #[test]
    fn test_sampler_tracks_latest_events() {
        let mut sampler = InputSampler::new(DVec2::new(800.0, 600.0));
        sampler.on_layout(2400.0);
        sampler.on_scroll(900.0);
        sampler.on_pointer_moved(600.0, 150.0);
        assert!((sampler.scroll_progress() - 0.5).abs() < 1e-12);
        assert_eq!(sampler.cursor(), DVec2::new(0.5, 0.5));

        // Resizing re-normalizes the same pixel position.
        sampler.on_resized(1200.0, 600.0);
        assert!((sampler.cursor().x - 0.0).abs() < 1e-12);
    }
}
