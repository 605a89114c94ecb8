//! Scroll-driven phase classification.
//!
//! Scroll progress is split into three planet phases and, independently, into
//! satellite motion modes. Both are pure functions of the (clamped) progress,
//! so scrolling back up re-enters earlier phases without hysteresis.

use serde::{Deserialize, Serialize};

use crate::ease::{segment_progress, smoothstep};

/// Macro phase of the planet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlanetPhase {
    /// Full size, centred.
    Hero,
    /// Shrinking and receding toward its background slot.
    Transitioning,
    /// Parked as a small background element.
    Background,
}

/// Motion mode of the satellite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SatelliteMode {
    /// Circling the planet, following its scale and position.
    Orbiting,
    /// Handing off from the orbit to the hover anchor.
    Detaching,
    /// Tracking the cursor across the viewport.
    CursorFollowing,
    /// Floating beside the content and sinking with the scroll
    /// (only without cursor interaction).
    Drifting,
}

/// Scroll-progress thresholds separating the phases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhaseThresholds {
    /// End of [`PlanetPhase::Hero`].
    pub hero_end: f64,
    /// End of [`PlanetPhase::Transitioning`] and of [`SatelliteMode::Orbiting`].
    pub transition_end: f64,
    /// End of [`SatelliteMode::Detaching`].
    pub detach_end: f64,
}

impl Default for PhaseThresholds {
    fn default() -> Self {
        Self {
            hero_end: 0.15,
            transition_end: 0.35,
            detach_end: 0.5,
        }
    }
}

impl PhaseThresholds {
    /// Classify the planet phase and its eased blend factor for progress `t`.
    ///
    /// The blend is 0 in [`PlanetPhase::Hero`], 1 in
    /// [`PlanetPhase::Background`] and `smoothstep` of the segment position
    /// while transitioning.
    #[must_use]
    pub fn planet_phase(&self, t: f64) -> (PlanetPhase, f64) {
        if t < self.hero_end {
            (PlanetPhase::Hero, 0.0)
        } else if t < self.transition_end {
            let p = segment_progress(t, self.hero_end, self.transition_end);
            (PlanetPhase::Transitioning, smoothstep(p))
        } else {
            (PlanetPhase::Background, 1.0)
        }
    }

    /// Classify the satellite mode for progress `t`.
    #[must_use]
    pub fn satellite_mode(&self, t: f64, cursor_interactive: bool) -> SatelliteMode {
        if t < self.transition_end {
            SatelliteMode::Orbiting
        } else if t < self.detach_end {
            SatelliteMode::Detaching
        } else if cursor_interactive {
            SatelliteMode::CursorFollowing
        } else {
            SatelliteMode::Drifting
        }
    }

    /// Eased progress through the detaching segment.
    #[must_use]
    pub fn detach_blend(&self, t: f64) -> f64 {
        smoothstep(segment_progress(t, self.transition_end, self.detach_end))
    }

    /// Linear progress through the segment after detaching.
    #[must_use]
    pub fn settled_progress(&self, t: f64) -> f64 {
        segment_progress(t, self.detach_end, 1.0)
    }
}
