pub mod color;
pub mod config;
pub mod error;
pub mod generator;
pub mod history;
pub mod labels;
pub mod point;
pub mod session;

// Re-export primary types for convenience.
pub use color::Rgb;
pub use config::PlaybackConfig;
pub use error::CoreError;
pub use generator::{contraction_factor, next_point};
pub use history::{PointHistory, START_LABEL};
pub use labels::{
    anchor_label_layout, below_point_placement, collecting_label_layout, CanvasSize,
    LabelPlacement,
};
pub use point::{GamePoint, Vec2};
pub use session::{permitted_actions, ActionSet, Phase, Session, StepReport};

/// Convenience result type for the core crate.
pub type Result<T> = std::result::Result<T, CoreError>;
