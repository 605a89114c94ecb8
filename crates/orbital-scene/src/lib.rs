//! Scroll- and cursor-driven transform engine for a planet and its satellite.
//!
//! Each frame, [`SceneEngine::tick`] classifies scroll progress into phases,
//! eases the planet between its hero and background keyframes, and moves the
//! satellite through its orbit, hand-off and cursor-following modes with
//! per-tick exponential smoothing.

pub mod ease;
pub mod engine;
pub mod error;
pub mod overlay;
pub mod phase;
pub mod planet;
pub mod satellite;

pub use engine::{EngineConfig, SceneEngine, SceneFrame};
pub use error::SceneConfigError;
pub use overlay::ScrollCues;
pub use phase::{PhaseThresholds, PlanetPhase, SatelliteMode};
pub use planet::{PlanetKeyframes, PlanetSpin, PlanetState};
pub use satellite::{
    DetachParams, DriftParams, FollowParams, FrameContext, OrbitParams, Orientation,
    SatelliteState, SatelliteTrack,
};
