//! Headless host for the orbital scene.
//!
//! Provides the frame clock, platform directories, a scripted input source
//! and the frame sinks a renderer would sit behind.

pub mod error;
pub mod frame_clock;
pub mod platform;
pub mod reload;
pub mod script;
pub mod session;
pub mod sink;

pub use error::AppError;
pub use frame_clock::{FrameClock, FrameTime, MAX_FRAME_TIME};
pub use platform::PlatformDirs;
pub use reload::ConfigWatch;
pub use script::InputScript;
pub use session::{Session, SessionSummary, run_scripted, viewport_extents};
pub use sink::{FrameSink, JsonLinesSink, TraceSink};
