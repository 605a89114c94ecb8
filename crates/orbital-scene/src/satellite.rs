//! Satellite motion: per-mode target computation followed by per-tick
//! exponential smoothing of the persistent [`SatelliteTrack`].
//!
//! Smoothing factors are applied once per tick and are not scaled by frame
//! delta, so the approach speed follows the frame rate of the host.

use std::f64::consts::FRAC_PI_2;

use glam::{DVec2, DVec3};
use orbital_input::ViewportHalfExtents;
use serde::{Deserialize, Serialize};

use crate::ease::{lerp, wrap_angle};
use crate::planet::PlanetState;

/// Body orientation in radians.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Orientation {
    /// Rotation about +Y.
    pub yaw: f64,
    /// Rotation about +X.
    pub pitch: f64,
}

impl Orientation {
    #[must_use]
    pub const fn new(yaw: f64, pitch: f64) -> Self {
        Self { yaw, pitch }
    }
}

/// Orbit around the planet, scaled with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitParams {
    /// Orbit radius at planet scale 1.
    pub radius: f64,
    /// Orbit angular speed in radians per second.
    pub angular_speed: f64,
    /// Vertical bob frequency relative to the orbit angle.
    pub bob_frequency: f64,
    /// Vertical bob amplitude at planet scale 1.
    pub bob_amplitude: f64,
    /// Cursor attraction strength at planet scale 1.
    pub cursor_pull: f64,
    /// Extra gain applied to the cursor attraction offset.
    pub cursor_pull_gain: f64,
    /// Per-tick smoothing factor toward the orbit target.
    pub smoothing: f64,
    /// Planet scale below which the satellite shrinks with it.
    pub legible_scale: f64,
}

impl Default for OrbitParams {
    fn default() -> Self {
        Self {
            radius: 3.2,
            angular_speed: 0.4,
            bob_frequency: 0.7,
            bob_amplitude: 0.8,
            cursor_pull: 0.4,
            cursor_pull_gain: 0.15,
            smoothing: 0.06,
            legible_scale: 0.5,
        }
    }
}

/// Hand-off from the orbit to a fixed hover anchor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetachParams {
    /// Point the satellite approaches.
    pub anchor: DVec3,
    /// Fraction of the remaining distance covered per tick at full blend.
    pub step_fraction: f64,
    /// Scale at the start of the hand-off.
    pub start_scale: f64,
    /// Scale at the end of the hand-off.
    pub end_scale: f64,
}

impl Default for DetachParams {
    fn default() -> Self {
        Self {
            anchor: DVec3::new(3.5, 0.0, 1.0),
            step_fraction: 0.15,
            start_scale: 0.7,
            end_scale: 1.2,
        }
    }
}

/// Cursor tracking with idle float and lean-into-motion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FollowParams {
    /// Fraction of the viewport half extents the cursor can reach.
    pub reach: f64,
    /// World Z of the follow plane.
    pub depth: f64,
    /// Idle float amplitude.
    pub float_amplitude: f64,
    /// Idle float frequencies (X, Y) in radians per second.
    pub float_frequency: DVec2,
    /// Display scale.
    pub scale: f64,
    /// Per-tick smoothing factor toward the cursor target.
    pub smoothing: f64,
    /// Yaw per unit of horizontal lag.
    pub yaw_gain: f64,
    /// Pitch per unit of vertical lag.
    pub pitch_gain: f64,
    /// Per-tick smoothing factor of the lean.
    pub lean_smoothing: f64,
}

impl Default for FollowParams {
    fn default() -> Self {
        Self {
            reach: 0.8,
            depth: 2.0,
            float_amplitude: 0.08,
            float_frequency: DVec2::new(0.7, 0.5),
            scale: 1.3,
            smoothing: 0.06,
            yaw_gain: 1.2,
            pitch_gain: 0.6,
            lean_smoothing: 0.1,
        }
    }
}

/// Idle hover beside the content, sinking as the page scrolls on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriftParams {
    /// Hover X.
    pub anchor_x: f64,
    /// Hover Z.
    pub depth: f64,
    /// Vertical bob amplitude.
    pub bob_amplitude: f64,
    /// Vertical bob frequency in radians per second.
    pub bob_frequency: f64,
    /// Distance sunk over the remaining scroll range.
    pub sink_distance: f64,
    /// Display scale.
    pub scale: f64,
    /// Per-tick smoothing factor toward the hover target.
    pub smoothing: f64,
    /// Yaw sway amplitude.
    pub sway_yaw: f64,
    /// Yaw sway frequency in radians per second.
    pub sway_yaw_frequency: f64,
    /// Pitch sway amplitude.
    pub sway_pitch: f64,
    /// Pitch sway frequency in radians per second.
    pub sway_pitch_frequency: f64,
}

impl Default for DriftParams {
    fn default() -> Self {
        Self {
            anchor_x: 3.5,
            depth: 1.0,
            bob_amplitude: 0.15,
            bob_frequency: 0.5,
            sink_distance: 2.0,
            scale: 1.2,
            smoothing: 0.06,
            sway_yaw: 0.3,
            sway_yaw_frequency: 0.3,
            sway_pitch: 0.1,
            sway_pitch_frequency: 0.2,
        }
    }
}

/// Satellite transform for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SatelliteState {
    /// Raw target for this frame.
    pub target_position: DVec3,
    /// Position to render.
    pub smoothed_position: DVec3,
    /// Uniform display scale.
    pub scale: f64,
    /// Raw orientation target for this frame.
    pub target_orientation: Orientation,
    /// Orientation to render.
    pub smoothed_orientation: Orientation,
}

/// The only satellite state carried from one tick to the next.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SatelliteTrack {
    pub position: DVec3,
    pub orientation: Orientation,
}

/// Inputs shared by every mode for one tick.
#[derive(Debug, Clone, Copy)]
pub struct FrameContext {
    /// Seconds since the scene started.
    pub elapsed: f64,
    /// Cursor in NDC.
    pub cursor: DVec2,
    /// Focal-plane extents.
    pub viewport: ViewportHalfExtents,
}

impl SatelliteTrack {
    /// Track resting at `position` with a neutral orientation.
    #[must_use]
    pub fn at_rest(position: DVec3) -> Self {
        Self {
            position,
            orientation: Orientation::default(),
        }
    }

    fn ease_position(&mut self, target: DVec3, alpha: f64) {
        self.position = self.position.lerp(target, alpha);
    }

    fn state(&self, target_position: DVec3, target_orientation: Orientation, scale: f64) -> SatelliteState {
        SatelliteState {
            target_position,
            smoothed_position: self.position,
            scale,
            target_orientation,
            smoothed_orientation: self.orientation,
        }
    }

    /// Orbit the planet; the orbit shrinks and moves with `planet`.
    ///
    /// With `cursor_pull` the target is nudged toward the cursor in
    /// proportion to the planet scale. The heading faces along the orbit and
    /// is applied directly, wrapped into (-π, π].
    pub fn orbit(
        &mut self,
        params: &OrbitParams,
        ctx: &FrameContext,
        planet: &PlanetState,
        cursor_pull: bool,
    ) -> SatelliteState {
        let angle = ctx.elapsed * params.angular_speed;
        let k = planet.scale;
        let base = planet.position
            + DVec3::new(
                angle.cos() * params.radius * k,
                (angle * params.bob_frequency).sin() * params.bob_amplitude * k,
                angle.sin() * params.radius * k,
            );

        let offset = if cursor_pull {
            let pull = params.cursor_pull * k;
            ctx.viewport.ndc_to_plane(ctx.cursor) * pull * params.cursor_pull_gain
        } else {
            DVec2::ZERO
        };
        let target = base + offset.extend(0.0);
        self.ease_position(target, params.smoothing);

        let heading = Orientation::new(wrap_angle(-angle + FRAC_PI_2), 0.0);
        self.orientation = heading;

        let scale = if k > params.legible_scale {
            1.0
        } else {
            k / params.legible_scale
        };
        self.state(target, heading, scale)
    }

    /// Step part of the way toward the hover anchor.
    ///
    /// `blend` is the eased progress through the hand-off; each tick covers
    /// `blend * step_fraction` of the remaining distance, so arrival is not
    /// guaranteed by the end of the segment. Orientation is held.
    pub fn detach(&mut self, params: &DetachParams, blend: f64) -> SatelliteState {
        self.ease_position(params.anchor, blend * params.step_fraction);
        let scale = lerp(params.start_scale, params.end_scale, blend);
        self.state(params.anchor, self.orientation, scale)
    }

    /// Track the cursor on the follow plane and lean into the motion.
    pub fn follow(&mut self, params: &FollowParams, ctx: &FrameContext) -> SatelliteState {
        let reach = ctx.viewport.ndc_to_plane(ctx.cursor) * params.reach;
        let float = DVec2::new(
            (ctx.elapsed * params.float_frequency.x).sin(),
            (ctx.elapsed * params.float_frequency.y).sin(),
        ) * params.float_amplitude;
        let target = (reach + float).extend(params.depth);
        self.ease_position(target, params.smoothing);

        let lag = target - self.position;
        let lean = Orientation::new(lag.x * params.yaw_gain, -lag.y * params.pitch_gain);
        self.orientation.yaw += (lean.yaw - self.orientation.yaw) * params.lean_smoothing;
        self.orientation.pitch += (lean.pitch - self.orientation.pitch) * params.lean_smoothing;

        self.state(target, lean, params.scale)
    }

    /// Hover beside the content, sinking with `settled` (progress through
    /// the remaining scroll range) and swaying gently.
    pub fn drift(&mut self, params: &DriftParams, ctx: &FrameContext, settled: f64) -> SatelliteState {
        let target = DVec3::new(
            params.anchor_x,
            (ctx.elapsed * params.bob_frequency).sin() * params.bob_amplitude
                - settled * params.sink_distance,
            params.depth,
        );
        self.ease_position(target, params.smoothing);

        let sway = Orientation::new(
            (ctx.elapsed * params.sway_yaw_frequency).sin() * params.sway_yaw,
            (ctx.elapsed * params.sway_pitch_frequency).sin() * params.sway_pitch,
        );
        self.orientation = sway;
        self.state(target, sway, params.scale)
    }
}
