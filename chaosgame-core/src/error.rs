use thiserror::Error;

/// Errors originating from the core game engine.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid total points: {0} (must be >= 1)")]
    InvalidTotalPoints(usize),

    #[error("invalid hue: {0} (must be finite)")]
    InvalidHue(f64),

    #[error("invalid canvas size: {width}x{height} (both dimensions must be > 0)")]
    InvalidCanvasSize { width: u32, height: u32 },
}
