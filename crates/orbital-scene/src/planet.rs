//! Planet transform: scroll-driven scale/position keyframes and the
//! time-driven surface and cloud rotation.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::ease::lerp;
use crate::phase::PlanetPhase;

/// Planet scale and position at the two ends of the transition, plus the
/// self-rotation rates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanetKeyframes {
    /// Uniform scale while in the hero phase.
    pub hero_scale: f64,
    /// Position while in the hero phase.
    pub hero_position: DVec3,
    /// Uniform scale once parked in the background.
    pub background_scale: f64,
    /// Position once parked in the background.
    pub background_position: DVec3,
    /// Surface rotation rate in radians per second.
    pub surface_spin_rate: f64,
    /// Cloud-layer rotation rate in radians per second.
    pub cloud_spin_rate: f64,
}

impl Default for PlanetKeyframes {
    fn default() -> Self {
        Self {
            hero_scale: 1.0,
            hero_position: DVec3::ZERO,
            background_scale: 0.35,
            background_position: DVec3::new(0.0, 1.8, -3.0),
            surface_spin_rate: 0.06,
            cloud_spin_rate: 0.08,
        }
    }
}

/// Planet transform for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlanetState {
    /// Uniform scale, always > 0.
    pub scale: f64,
    /// World-space position.
    pub position: DVec3,
}

impl PlanetKeyframes {
    /// Planet transform for a classified phase and its eased blend.
    ///
    /// Hero and background return their keyframes exactly, so the transition
    /// endpoints line up bit-for-bit with the neighbouring phases.
    #[must_use]
    pub fn state(&self, phase: PlanetPhase, blend: f64) -> PlanetState {
        match phase {
            PlanetPhase::Hero => PlanetState {
                scale: self.hero_scale,
                position: self.hero_position,
            },
            PlanetPhase::Transitioning => PlanetState {
                scale: lerp(self.hero_scale, self.background_scale, blend),
                position: self.hero_position.lerp(self.background_position, blend),
            },
            PlanetPhase::Background => PlanetState {
                scale: self.background_scale,
                position: self.background_position,
            },
        }
    }
}

/// Accumulated rotation angles of the planet layers, in radians.
///
/// Advanced with real frame delta so the rotation speed does not depend on
/// frame rate. Never reset by scrolling or by a scene reset.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct PlanetSpin {
    /// Surface rotation about +Y.
    pub surface: f64,
    /// Cloud-layer rotation about +Y.
    pub clouds: f64,
}

impl PlanetSpin {
    /// Advance both layers by `dt` seconds.
    pub fn advance(&mut self, dt: f64, keyframes: &PlanetKeyframes) {
        self.surface += dt * keyframes.surface_spin_rate;
        self.clouds += dt * keyframes.cloud_spin_rate;
    }
}
