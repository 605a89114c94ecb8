//! Input sampling: raw pointer and scroll signals normalized into bounded
//! engine inputs, plus last-value registers for hosts that produce input on a
//! different thread than the one that ticks the scene.

pub mod registers;
pub mod sampler;
pub mod viewport;

pub use registers::{InputRegisters, InputSnapshot};
pub use sampler::{InputSampler, clamp_progress, pointer_to_ndc, sanitize_cursor, scroll_progress};
pub use viewport::{MIN_HALF_EXTENT, ViewportHalfExtents};
