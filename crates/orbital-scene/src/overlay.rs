//! Scroll-driven cues for the page chrome layered over the scene.

use serde::Serialize;

/// Progress after which the hero veil starts fading in.
const VEIL_START: f64 = 0.03;
/// Veil opacity gained per unit of progress.
const VEIL_RATE: f64 = 8.0;
/// Veil opacity ceiling.
const VEIL_MAX: f64 = 0.95;
/// Progress after which the navigation bar is shown.
const NAVBAR_THRESHOLD: f64 = 0.08;

/// Overlay state derived from scroll progress alone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScrollCues {
    /// Opacity of the veil that fades the hero copy out.
    pub hero_veil_opacity: f64,
    /// Whether the navigation bar should be visible.
    pub navbar_visible: bool,
}

impl ScrollCues {
    #[must_use]
    pub fn from_progress(t: f64) -> Self {
        Self {
            hero_veil_opacity: ((t - VEIL_START) * VEIL_RATE).clamp(0.0, VEIL_MAX),
            navbar_visible: t > NAVBAR_THRESHOLD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_veil_ramps_then_saturates() {
        assert_eq!(ScrollCues::from_progress(0.0).hero_veil_opacity, 0.0);
        assert_eq!(ScrollCues::from_progress(0.03).hero_veil_opacity, 0.0);
        let mid = ScrollCues::from_progress(0.08).hero_veil_opacity;
        assert!((mid - 0.4).abs() < 1e-9, "veil at 0.08 was {mid}");
        assert_eq!(ScrollCues::from_progress(0.5).hero_veil_opacity, 0.95);
    }

    #[test]
    fn test_navbar_threshold() {
        assert!(!ScrollCues::from_progress(0.08).navbar_visible);
        assert!(ScrollCues::from_progress(0.081).navbar_visible);
    }
}
