pub mod controller;
pub mod frame;
pub mod scheduler;
pub mod sink;

pub use controller::{PlaybackController, TickReport};
pub use frame::{assemble_frame, frame_color};
pub use scheduler::{ManualScheduler, TickScheduler};
pub use sink::{LabelSink, NullSink, RenderSink};
