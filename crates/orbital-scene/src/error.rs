//! Engine configuration errors.

/// Reasons an [`EngineConfig`](crate::EngineConfig) is rejected.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum SceneConfigError {
    /// Phase thresholds must satisfy `0 <= hero_end < transition_end < detach_end <= 1`.
    #[error(
        "phase thresholds out of order: hero_end={hero_end}, transition_end={transition_end}, detach_end={detach_end}"
    )]
    ThresholdOrder {
        hero_end: f64,
        transition_end: f64,
        detach_end: f64,
    },

    /// A per-tick smoothing factor is outside (0, 1].
    #[error("smoothing factor `{name}` must be in (0, 1], got {value}")]
    Smoothing { name: &'static str, value: f64 },

    /// A length or scale that must be positive is not.
    #[error("`{name}` must be positive and finite, got {value}")]
    NonPositive { name: &'static str, value: f64 },

    /// A tunable is NaN or infinite.
    #[error("`{name}` must be finite, got {value}")]
    NonFinite { name: &'static str, value: f64 },
}
