//! Interpolation helpers shared by the planet and satellite engines.

use std::f64::consts::{PI, TAU};

/// Smoothstep interpolation: 3t² − 2t³ for t in [0, 1].
///
/// Input outside the unit interval is clamped first.
#[must_use]
pub fn smoothstep(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Linear interpolation `a + (b - a) * e`.
#[inline]
#[must_use]
pub fn lerp(a: f64, b: f64, e: f64) -> f64 {
    a + (b - a) * e
}

/// Position of `t` inside `[start, end)` as a fraction, clamped to [0, 1].
#[must_use]
pub fn segment_progress(t: f64, start: f64, end: f64) -> f64 {
    let span = end - start;
    if span <= 0.0 {
        return 1.0;
    }
    ((t - start) / span).clamp(0.0, 1.0)
}

/// Wraps an angle into (-π, π].
#[must_use]
pub fn wrap_angle(angle: f64) -> f64 {
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI { wrapped + TAU } else { wrapped }
}
