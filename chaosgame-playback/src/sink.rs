use chaosgame_core::{GamePoint, Rgb};

/// Consumes the per-tick render data: an ordered point list and the solid
/// color to draw it in. Each point is a plain disc or an outlined one per
/// its `bordered` flag.
pub trait RenderSink {
    fn render(&mut self, points: &[GamePoint], color: Rgb);
}

/// Places text annotations at screen-pixel coordinates, keyed by id so a
/// repeated placement moves the existing label instead of stacking a new one.
pub trait LabelSink {
    fn place_label(&mut self, id: &str, text: &str, x: f64, y: f64);

    /// Remove the most recently added label (an undone anchor's).
    fn remove_last_label(&mut self);

    /// Remove every label (game over, or a full reset).
    fn clear_labels(&mut self);
}

/// A sink that discards everything. Useful for headless runs and benches.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl RenderSink for NullSink {
    fn render(&mut self, _points: &[GamePoint], _color: Rgb) {}
}

impl LabelSink for NullSink {
    fn place_label(&mut self, _id: &str, _text: &str, _x: f64, _y: f64) {}
    fn remove_last_label(&mut self) {}
    fn clear_labels(&mut self) {}
}
