//! Tick coordinator: one call per rendered frame turns the current input
//! signals into the planet and satellite transforms.
//!
//! [`SceneEngine`] owns the only persistent motion state, the smoothed
//! satellite track. Everything else in a [`SceneFrame`] is recomputed from
//! the inputs on every tick, apart from the planet spin which integrates
//! frame delta.

use glam::{DVec2, DVec3};
use orbital_input::{ViewportHalfExtents, clamp_progress, sanitize_cursor};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::SceneConfigError;
use crate::overlay::ScrollCues;
use crate::phase::{PhaseThresholds, PlanetPhase, SatelliteMode};
use crate::planet::{PlanetKeyframes, PlanetSpin, PlanetState};
use crate::satellite::{
    DetachParams, DriftParams, FollowParams, FrameContext, OrbitParams, Orientation,
    SatelliteState, SatelliteTrack,
};

/// Every tunable of the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Enables cursor pull while orbiting and cursor following after the
    /// hand-off. When disabled the satellite drifts beside the content instead.
    pub cursor_interactive: bool,
    /// Phase thresholds on scroll progress.
    pub phases: PhaseThresholds,
    /// Planet keyframes and spin rates.
    pub planet: PlanetKeyframes,
    /// Orbit mode.
    pub orbit: OrbitParams,
    /// Hand-off mode.
    pub detach: DetachParams,
    /// Cursor-following mode.
    pub follow: FollowParams,
    /// Drifting mode.
    pub drift: DriftParams,
    /// Satellite position on creation and after [`SceneEngine::reset`].
    pub rest_position: DVec3,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cursor_interactive: true,
            phases: PhaseThresholds::default(),
            planet: PlanetKeyframes::default(),
            orbit: OrbitParams::default(),
            detach: DetachParams::default(),
            follow: FollowParams::default(),
            drift: DriftParams::default(),
            rest_position: DVec3::new(3.0, 1.0, 1.0),
        }
    }
}

fn check_smoothing(name: &'static str, value: f64) -> Result<(), SceneConfigError> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(SceneConfigError::Smoothing { name, value })
    }
}

fn check_positive(name: &'static str, value: f64) -> Result<(), SceneConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SceneConfigError::NonPositive { name, value })
    }
}

fn check_finite(name: &'static str, value: f64) -> Result<(), SceneConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(SceneConfigError::NonFinite { name, value })
    }
}

fn check_finite_vec(name: &'static str, value: DVec3) -> Result<(), SceneConfigError> {
    match value.to_array().into_iter().find(|c| !c.is_finite()) {
        Some(bad) => Err(SceneConfigError::NonFinite { name, value: bad }),
        None => Ok(()),
    }
}

impl EngineConfig {
    /// Rejects configurations that would break phase ordering, make the
    /// smoothing diverge, or feed NaN into a frame.
    pub fn validate(&self) -> Result<(), SceneConfigError> {
        let PhaseThresholds {
            hero_end,
            transition_end,
            detach_end,
        } = self.phases;
        let ordered = 0.0 <= hero_end
            && hero_end < transition_end
            && transition_end < detach_end
            && detach_end <= 1.0;
        if !ordered {
            return Err(SceneConfigError::ThresholdOrder {
                hero_end,
                transition_end,
                detach_end,
            });
        }

        check_smoothing("orbit.smoothing", self.orbit.smoothing)?;
        check_smoothing("detach.step_fraction", self.detach.step_fraction)?;
        check_smoothing("follow.smoothing", self.follow.smoothing)?;
        check_smoothing("follow.lean_smoothing", self.follow.lean_smoothing)?;
        check_smoothing("drift.smoothing", self.drift.smoothing)?;

        check_positive("planet.hero_scale", self.planet.hero_scale)?;
        check_positive("planet.background_scale", self.planet.background_scale)?;
        check_positive("orbit.radius", self.orbit.radius)?;
        check_positive("orbit.legible_scale", self.orbit.legible_scale)?;
        check_positive("detach.start_scale", self.detach.start_scale)?;
        check_positive("detach.end_scale", self.detach.end_scale)?;
        check_positive("follow.scale", self.follow.scale)?;
        check_positive("drift.scale", self.drift.scale)?;

        let planet = &self.planet;
        check_finite_vec("planet.hero_position", planet.hero_position)?;
        check_finite_vec("planet.background_position", planet.background_position)?;
        check_finite("planet.surface_spin_rate", planet.surface_spin_rate)?;
        check_finite("planet.cloud_spin_rate", planet.cloud_spin_rate)?;

        let orbit = &self.orbit;
        check_finite("orbit.angular_speed", orbit.angular_speed)?;
        check_finite("orbit.bob_frequency", orbit.bob_frequency)?;
        check_finite("orbit.bob_amplitude", orbit.bob_amplitude)?;
        check_finite("orbit.cursor_pull", orbit.cursor_pull)?;
        check_finite("orbit.cursor_pull_gain", orbit.cursor_pull_gain)?;

        check_finite_vec("detach.anchor", self.detach.anchor)?;

        let follow = &self.follow;
        check_finite("follow.reach", follow.reach)?;
        check_finite("follow.depth", follow.depth)?;
        check_finite("follow.float_amplitude", follow.float_amplitude)?;
        check_finite("follow.float_frequency.x", follow.float_frequency.x)?;
        check_finite("follow.float_frequency.y", follow.float_frequency.y)?;
        check_finite("follow.yaw_gain", follow.yaw_gain)?;
        check_finite("follow.pitch_gain", follow.pitch_gain)?;

        let drift = &self.drift;
        check_finite("drift.anchor_x", drift.anchor_x)?;
        check_finite("drift.depth", drift.depth)?;
        check_finite("drift.bob_amplitude", drift.bob_amplitude)?;
        check_finite("drift.bob_frequency", drift.bob_frequency)?;
        check_finite("drift.sink_distance", drift.sink_distance)?;
        check_finite("drift.sway_yaw", drift.sway_yaw)?;
        check_finite("drift.sway_yaw_frequency", drift.sway_yaw_frequency)?;
        check_finite("drift.sway_pitch", drift.sway_pitch)?;
        check_finite("drift.sway_pitch_frequency", drift.sway_pitch_frequency)?;

        check_finite_vec("rest_position", self.rest_position)?;
        Ok(())
    }
}

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SceneFrame {
    /// Clamped scroll progress the frame was computed from.
    pub progress: f64,
    /// Elapsed time the frame was computed from.
    pub elapsed: f64,
    pub phase: PlanetPhase,
    pub mode: SatelliteMode,
    pub planet: PlanetState,
    pub spin: PlanetSpin,
    pub satellite: SatelliteState,
    pub cues: ScrollCues,
}

/// Scroll- and cursor-driven transform engine for one animated scene.
#[derive(Debug, Clone)]
pub struct SceneEngine {
    config: EngineConfig,
    track: SatelliteTrack,
    spin: PlanetSpin,
    last_elapsed: f64,
    phase: Option<PlanetPhase>,
    mode: Option<SatelliteMode>,
}

impl Default for SceneEngine {
    fn default() -> Self {
        Self::from_valid(EngineConfig::default())
    }
}

impl SceneEngine {
    /// Creates an engine after validating `config`.
    pub fn new(config: EngineConfig) -> Result<Self, SceneConfigError> {
        config.validate()?;
        Ok(Self::from_valid(config))
    }

    fn from_valid(config: EngineConfig) -> Self {
        Self {
            track: SatelliteTrack::at_rest(config.rest_position),
            config,
            spin: PlanetSpin::default(),
            last_elapsed: 0.0,
            phase: None,
            mode: None,
        }
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Swaps in a new configuration, keeping the smoothed track and spin.
    pub fn set_config(&mut self, config: EngineConfig) -> Result<(), SceneConfigError> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Smoothed satellite position carried between ticks.
    #[must_use]
    pub fn smoothed_position(&self) -> DVec3 {
        self.track.position
    }

    /// Smoothed satellite orientation carried between ticks.
    #[must_use]
    pub fn smoothed_orientation(&self) -> Orientation {
        self.track.orientation
    }

    /// Restores the smoothed satellite state to its rest pose.
    ///
    /// Planet spin keeps accumulating across resets.
    pub fn reset(&mut self) {
        debug!("scene engine reset");
        self.track = SatelliteTrack::at_rest(self.config.rest_position);
        self.mode = None;
    }

    /// Computes one frame.
    ///
    /// `scroll_progress` is clamped into \[0, 1\] and `cursor` into
    /// \[-1, 1\]²; `elapsed` should never decrease (a decrease contributes
    /// no spin). Only the smoothed satellite track and the planet spin are
    /// mutated.
    pub fn tick(
        &mut self,
        scroll_progress: f64,
        elapsed: f64,
        cursor: DVec2,
        viewport: ViewportHalfExtents,
    ) -> SceneFrame {
        let t = clamp_progress(scroll_progress);
        let elapsed = if elapsed.is_finite() {
            elapsed.max(0.0)
        } else {
            self.last_elapsed
        };
        let dt = (elapsed - self.last_elapsed).max(0.0);
        self.last_elapsed = self.last_elapsed.max(elapsed);

        let cfg = &self.config;
        let (phase, blend) = cfg.phases.planet_phase(t);
        let planet = cfg.planet.state(phase, blend);
        self.spin.advance(dt, &cfg.planet);

        let mode = cfg.phases.satellite_mode(t, cfg.cursor_interactive);
        let ctx = FrameContext {
            elapsed,
            cursor: sanitize_cursor(cursor),
            viewport,
        };
        let satellite = match mode {
            SatelliteMode::Orbiting => {
                self.track
                    .orbit(&cfg.orbit, &ctx, &planet, cfg.cursor_interactive)
            }
            SatelliteMode::Detaching => {
                let blend = cfg.phases.detach_blend(t);
                self.track.detach(&cfg.detach, blend)
            }
            SatelliteMode::CursorFollowing => self.track.follow(&cfg.follow, &ctx),
            SatelliteMode::Drifting => {
                let settled = cfg.phases.settled_progress(t);
                self.track.drift(&cfg.drift, &ctx, settled)
            }
        };

        if self.phase != Some(phase) {
            debug!(?phase, progress = t, "planet phase changed");
            self.phase = Some(phase);
        }
        if self.mode != Some(mode) {
            debug!(?mode, progress = t, "satellite mode changed");
            self.mode = Some(mode);
        }

        SceneFrame {
            progress: t,
            elapsed,
            phase,
            mode,
            planet,
            spin: self.spin,
            satellite,
            cues: ScrollCues::from_progress(t),
        }
    }
}
