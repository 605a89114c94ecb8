//! Variable-rate frame clock.
//!
//! The scene is ticked once per rendered frame, so there is no fixed
//! simulation step. The clock only measures frame delta, clamps stalls, and
//! keeps a monotonic elapsed time that nothing but the clock itself advances.

use std::time::Instant;
use tracing::warn;

/// Maximum frame delta. A longer stall (debugger, suspended tab) is clamped
/// so time-integrated values do not leap forward.
pub const MAX_FRAME_TIME: f64 = 0.25;

/// Timing of one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTime {
    /// Zero-based frame index.
    pub index: u64,
    /// Seconds since the previous frame, after clamping.
    pub delta: f64,
    /// Seconds since the clock started.
    pub elapsed: f64,
}

/// Monotonic frame clock.
///
/// Call [`advance`](Self::advance) once per frame in a live loop, or
/// [`advance_by`](Self::advance_by) to step with explicit deltas.
pub struct FrameClock {
    previous_time: Instant,
    elapsed: f64,
    frame_count: u64,
}

impl FrameClock {
    /// Creates a clock starting from the current instant.
    pub fn new() -> Self {
        Self {
            previous_time: Instant::now(),
            elapsed: 0.0,
            frame_count: 0,
        }
    }

    /// Measures wall time since the previous call and advances by it.
    pub fn advance(&mut self) -> FrameTime {
        let current_time = Instant::now();
        let frame_time = current_time
            .duration_since(self.previous_time)
            .as_secs_f64();
        self.previous_time = current_time;
        self.advance_by(frame_time)
    }

    /// Advances by an explicit delta in seconds.
    ///
    /// Negative or non-finite deltas count as zero; deltas above
    /// [`MAX_FRAME_TIME`] are clamped.
    pub fn advance_by(&mut self, frame_time: f64) -> FrameTime {
        let mut delta = if frame_time.is_finite() {
            frame_time.max(0.0)
        } else {
            0.0
        };
        if delta > MAX_FRAME_TIME {
            warn!(
                "Frame time {:.1}ms exceeds maximum, clamping to {:.1}ms",
                delta * 1000.0,
                MAX_FRAME_TIME * 1000.0
            );
            delta = MAX_FRAME_TIME;
        }

        self.elapsed += delta;
        let time = FrameTime {
            index: self.frame_count,
            delta,
            elapsed: self.elapsed,
        };
        self.frame_count += 1;
        time
    }

    /// Seconds since the clock started.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Number of frames advanced so far.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
