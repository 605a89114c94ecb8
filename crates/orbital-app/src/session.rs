//! Scene session: input registers in, frames out.
//!
//! A [`Session`] owns the engine and the clock. Input producers write to the
//! shared [`InputRegisters`] from wherever they run; every call to
//! [`Session::frame`] takes one snapshot, ticks the engine and hands the
//! result to a [`FrameSink`].

use std::sync::Arc;
use std::time::{Duration, Instant};

use orbital_config::{Config, ViewportConfig};
use orbital_input::{InputRegisters, ViewportHalfExtents};
use orbital_scene::{SatelliteMode, SceneEngine, SceneFrame};
use tracing::{debug, info};

use crate::error::AppError;
use crate::frame_clock::{FrameClock, FrameTime};
use crate::reload::ConfigWatch;
use crate::script::InputScript;
use crate::sink::FrameSink;

/// Half extents of the focal plane seen through the configured camera.
pub fn viewport_extents(viewport: &ViewportConfig) -> ViewportHalfExtents {
    let aspect = f64::from(viewport.width_px) / f64::from(viewport.height_px.max(1));
    ViewportHalfExtents::from_perspective(
        viewport.fov_y_degrees.to_radians(),
        aspect,
        viewport.camera_distance,
    )
}

/// One running scene.
pub struct Session {
    engine: SceneEngine,
    registers: Arc<InputRegisters>,
    viewport: ViewportHalfExtents,
    clock: FrameClock,
}

impl Session {
    /// Creates a session from the loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Scene`] if the scene settings are invalid.
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        Ok(Self {
            engine: SceneEngine::new(config.scene.clone())?,
            registers: Arc::new(InputRegisters::new()),
            viewport: viewport_extents(&config.viewport),
            clock: FrameClock::new(),
        })
    }

    /// Registers that input producers write to.
    pub fn registers(&self) -> Arc<InputRegisters> {
        Arc::clone(&self.registers)
    }

    /// Recomputes the focal-plane extents after a resize.
    pub fn set_viewport(&mut self, viewport: &ViewportConfig) {
        self.viewport = viewport_extents(viewport);
        debug!(
            half_width = self.viewport.half_width(),
            half_height = self.viewport.half_height(),
            "viewport changed"
        );
    }

    /// Computes a frame `dt` seconds after the previous one.
    pub fn frame(&mut self, dt: f64, sink: &mut dyn FrameSink) -> Result<SceneFrame, AppError> {
        let time = self.clock.advance_by(dt);
        self.compute(time, sink)
    }

    /// Computes a frame at the current wall-clock time.
    pub fn frame_realtime(&mut self, sink: &mut dyn FrameSink) -> Result<SceneFrame, AppError> {
        let time = self.clock.advance();
        self.compute(time, sink)
    }

    fn compute(&mut self, time: FrameTime, sink: &mut dyn FrameSink) -> Result<SceneFrame, AppError> {
        let input = self.registers.snapshot();
        let frame = self
            .engine
            .tick(input.scroll_progress, time.elapsed, input.cursor, self.viewport);
        sink.submit(time.index, &frame)?;
        Ok(frame)
    }

    /// Returns the satellite to its rest pose. The clock keeps running.
    pub fn reset(&mut self) {
        self.engine.reset();
    }

    /// Seconds since the session started.
    pub fn elapsed(&self) -> f64 {
        self.clock.elapsed()
    }

    pub fn engine(&self) -> &SceneEngine {
        &self.engine
    }

    /// Swaps in reloaded scene and viewport settings. The smoothed
    /// satellite track, spin and clock carry over.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Scene`] and keeps the old settings if the scene
    /// settings are invalid.
    pub fn apply_config(&mut self, config: &Config) -> Result<(), AppError> {
        self.engine.set_config(config.scene.clone())?;
        self.set_viewport(&config.viewport);
        Ok(())
    }
}

/// Outcome of a scripted run.
#[derive(Debug, Clone)]
pub struct SessionSummary {
    pub frames: u64,
    pub elapsed: f64,
    /// Number of satellite mode changes after the first frame.
    pub mode_changes: u32,
    pub last: Option<SceneFrame>,
}

/// Runs the scripted session described by `config` into `sink`.
///
/// Frames are stepped at `1 / fps`; with `session.realtime` they are paced
/// against the wall clock instead. With a `watch`, reloaded scene and
/// viewport settings take effect mid-run; the frame count and pacing stay
/// as they were at the start.
pub fn run_scripted(
    config: &Config,
    sink: &mut dyn FrameSink,
    mut watch: Option<&mut ConfigWatch>,
) -> Result<SessionSummary, AppError> {
    let mut session = Session::from_config(config)?;
    let mut script = InputScript::new(&config.viewport, &config.session);
    let registers = session.registers();

    let fps = config.session.fps.max(1);
    let dt = 1.0 / f64::from(fps);
    let duration = if config.session.duration_secs.is_finite() {
        config.session.duration_secs.max(0.0)
    } else {
        0.0
    };
    let frame_count = ((duration * f64::from(fps)).ceil() as u64).max(1);

    info!(
        "Running {frame_count} frames at {fps} fps ({})",
        if config.session.realtime { "realtime" } else { "stepped" }
    );

    let mut summary = SessionSummary {
        frames: 0,
        elapsed: 0.0,
        mode_changes: 0,
        last: None,
    };
    let mut mode: Option<SatelliteMode> = None;

    for index in 0..frame_count {
        let frame_start = Instant::now();
        if let Some(fresh) = watch.as_deref_mut().and_then(|w| w.poll(index)) {
            session.apply_config(&fresh)?;
            script.resize(fresh.viewport.width_px, fresh.viewport.height_px);
        }
        script.drive(session.elapsed(), &registers);

        let frame = if config.session.realtime {
            session.frame_realtime(sink)?
        } else {
            session.frame(dt, sink)?
        };

        if mode.is_some_and(|m| m != frame.mode) {
            summary.mode_changes += 1;
        }
        mode = Some(frame.mode);
        summary.frames += 1;
        summary.last = Some(frame);

        if config.session.realtime {
            let budget = Duration::from_secs_f64(dt);
            if let Some(remaining) = budget.checked_sub(frame_start.elapsed()) {
                std::thread::sleep(remaining);
            }
        }
    }

    sink.finish()?;
    summary.elapsed = session.elapsed();
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::JsonLinesSink;
    use glam::DVec2;
    use orbital_config::CursorPath;
    use orbital_scene::PlanetPhase;

    struct Collect(Vec<(u64, SceneFrame)>);

    impl FrameSink for Collect {
        fn submit(&mut self, index: u64, frame: &SceneFrame) -> Result<(), AppError> {
            self.0.push((index, *frame));
            Ok(())
        }
    }

    fn short_config() -> Config {
        let mut config = Config::default();
        config.session.fps = 30;
        config.session.duration_secs = 4.0;
        config
    }

    #[test]
    fn test_frame_reads_registers() {
        let mut session = Session::from_config(&Config::default()).unwrap();
        let registers = session.registers();
        registers.store_scroll_progress(0.9);
        registers.store_cursor(DVec2::new(0.5, -0.5));

        let mut sink = Collect(Vec::new());
        let frame = session.frame(1.0 / 60.0, &mut sink).unwrap();
        assert_eq!(frame.progress, 0.9);
        assert_eq!(frame.phase, PlanetPhase::Background);
        assert_eq!(frame.mode, SatelliteMode::CursorFollowing);
        assert_eq!(sink.0.len(), 1);
        assert_eq!(sink.0[0].0, 0);
    }

    #[test]
    fn test_elapsed_follows_clock_not_scroll() {
        let mut session = Session::from_config(&Config::default()).unwrap();
        let registers = session.registers();
        let mut sink = Collect(Vec::new());

        registers.store_scroll_progress(1.0);
        session.frame(0.1, &mut sink).unwrap();
        registers.store_scroll_progress(0.0);
        let frame = session.frame(0.1, &mut sink).unwrap();
        assert!((frame.elapsed - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_reset_keeps_clock() {
        let mut session = Session::from_config(&Config::default()).unwrap();
        let mut sink = Collect(Vec::new());
        session.registers().store_scroll_progress(0.8);
        for _ in 0..30 {
            session.frame(1.0 / 30.0, &mut sink).unwrap();
        }
        let elapsed = session.elapsed();
        session.reset();
        assert_eq!(session.elapsed(), elapsed);
        assert_eq!(
            session.engine().smoothed_position(),
            session.engine().config().rest_position
        );
    }

    #[test]
    fn test_apply_config_keeps_track_and_clock() {
        let mut session = Session::from_config(&Config::default()).unwrap();
        let mut sink = Collect(Vec::new());
        session.registers().store_scroll_progress(0.9);
        for _ in 0..10 {
            session.frame(1.0 / 60.0, &mut sink).unwrap();
        }
        let position = session.engine().smoothed_position();
        let elapsed = session.elapsed();

        let mut config = Config::default();
        config.scene.follow.reach = 0.5;
        config.viewport.width_px = 720;
        session.apply_config(&config).unwrap();
        assert_eq!(session.engine().config().follow.reach, 0.5);
        assert_eq!(session.engine().smoothed_position(), position);
        assert_eq!(session.elapsed(), elapsed);

        // Square viewport: full-right cursor now reaches 0.5 * half_height.
        session.registers().store_cursor(DVec2::new(1.0, 0.0));
        let frame = session.frame(1.0 / 60.0, &mut sink).unwrap();
        let half = viewport_extents(&config.viewport);
        let float_x = (frame.elapsed * 0.7).sin() * 0.08;
        assert!((frame.satellite.target_position.x - (0.5 * half.half_width() + float_x)).abs() < 1e-12);
    }

    #[test]
    fn test_apply_invalid_config_keeps_old_settings() {
        let mut session = Session::from_config(&Config::default()).unwrap();
        let mut config = Config::default();
        config.scene.drift.scale = 0.0;
        assert!(matches!(session.apply_config(&config), Err(AppError::Scene(_))));
        assert_eq!(session.engine().config().drift.scale, 1.2);
    }

    #[test]
    fn test_invalid_scene_rejected() {
        let mut config = Config::default();
        config.scene.phases.hero_end = 0.9;
        assert!(matches!(
            Session::from_config(&config),
            Err(AppError::Scene(_))
        ));
    }

    #[test]
    fn test_viewport_extents_follow_aspect() {
        let wide = viewport_extents(&ViewportConfig::default());
        let square = viewport_extents(&ViewportConfig {
            width_px: 720,
            ..ViewportConfig::default()
        });
        assert!((wide.half_height() - square.half_height()).abs() < 1e-12);
        assert!(wide.half_width() > square.half_width());

        let degenerate = viewport_extents(&ViewportConfig {
            width_px: 0,
            height_px: 0,
            ..ViewportConfig::default()
        });
        assert!(degenerate.half_width() > 0.0 && degenerate.half_height() > 0.0);
    }

    #[test]
    fn test_scripted_run_walks_every_mode() {
        let config = short_config();
        let mut sink = Collect(Vec::new());
        let summary = run_scripted(&config, &mut sink, None).unwrap();

        assert_eq!(summary.frames, 120);
        assert_eq!(sink.0.len(), 120);
        assert!((summary.elapsed - 4.0).abs() < 1e-9);
        assert_eq!(summary.mode_changes, 2, "orbit, detach, follow");

        let last = summary.last.unwrap();
        assert_eq!(last.phase, PlanetPhase::Background);
        assert_eq!(last.mode, SatelliteMode::CursorFollowing);
        for pair in sink.0.windows(2) {
            assert!(pair[1].1.progress >= pair[0].1.progress, "scroll went backwards");
        }
    }

    #[test]
    fn test_scripted_run_without_cursor_drifts() {
        let mut config = short_config();
        config.scene.cursor_interactive = false;
        config.session.cursor_path = CursorPath::Still;
        let mut sink = Collect(Vec::new());
        let summary = run_scripted(&config, &mut sink, None).unwrap();
        assert_eq!(summary.last.unwrap().mode, SatelliteMode::Drifting);
    }

    #[test]
    fn test_scripted_run_records_json() {
        let mut config = short_config();
        config.session.duration_secs = 0.5;
        let mut sink = JsonLinesSink::new(Vec::new());
        let summary = run_scripted(&config, &mut sink, None).unwrap();
        assert_eq!(sink.written(), summary.frames);
        assert_eq!(summary.frames, 15);
    }

    #[test]
    fn test_scripted_run_applies_reloaded_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = short_config();
        config.save(dir.path()).unwrap();
        let mut watch = ConfigWatch::new(
            dir.path().to_path_buf(),
            config.clone(),
            orbital_config::CliArgs::default(),
            30,
        );

        let mut changed = config.clone();
        changed.scene.follow.scale = 2.0;
        changed.save(dir.path()).unwrap();

        let mut sink = Collect(Vec::new());
        let summary = run_scripted(&config, &mut sink, Some(&mut watch)).unwrap();
        assert_eq!(summary.frames, 120);
        assert_eq!(summary.last.unwrap().satellite.scale, 2.0);
    }

    #[test]
    fn test_zero_duration_runs_one_frame() {
        let mut config = short_config();
        config.session.duration_secs = 0.0;
        let mut sink = Collect(Vec::new());
        assert_eq!(run_scripted(&config, &mut sink, None).unwrap().frames, 1);
    }
}
