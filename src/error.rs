use thiserror::Error;

/// Errors surfaced while constructing a [`WaveProgress`](crate::engine::WaveProgress).
///
/// Once an engine exists it never fails: out-of-range progress is clamped.
#[derive(Debug, Error)]
pub enum WaveError {
    #[error("invalid configuration: {0}")]
    Configuration(#[from] ConfigError),

    #[error("drawing surface '{0}' not found")]
    SurfaceNotFound(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("goal amount must be positive, got {0}")]
    InvalidGoal(f32),

    #[error("opacity must be within [0, 1], got {0}")]
    InvalidOpacity(f32),

    #[error("surface dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("invalid color '{0}', expected #RRGGBB or #RRGGBBAA")]
    InvalidColor(String),

    #[error("a transition must span at least one frame")]
    InvalidTransitionFrames,
}
