use tracing::trace;

use crate::point::{GamePoint, Vec2};

/// Label shown next to the start point (the entry placed after the anchors).
pub const START_LABEL: &str = "Start";

/// Alphabetic label for anchor `index`: A, B, …, Z, AA, AB, …
fn anchor_label(index: usize) -> String {
    let mut i = index;
    let mut out = String::new();
    loop {
        out.insert(0, (b'A' + (i % 26) as u8) as char);
        if i < 26 {
            break;
        }
        i = i / 26 - 1;
    }
    out
}

/// Ordered history of confirmed points with undo/redo support.
///
/// Holds the anchors plus the start point (entry `n`, when present). The
/// start point is a normal history entry: undoing from a complete board pops
/// it first, returning the session to start-point selection.
///
/// Invariant: placing a new point clears the redo stack, and the list never
/// grows past `n + 1` entries.
#[derive(Debug, Clone)]
pub struct PointHistory {
    n: usize,
    placed: Vec<GamePoint>,
    undone: Vec<GamePoint>,
}

impl PointHistory {
    pub fn new(n: usize) -> Self {
        Self {
            n,
            placed: Vec::with_capacity(n + 1),
            undone: Vec::new(),
        }
    }

    /// Label for the entry at `index`: a letter for the first `n`, then
    /// [`START_LABEL`]. Labels are positional, never stored across undo.
    fn label_for(&self, index: usize) -> String {
        if index < self.n {
            anchor_label(index)
        } else {
            START_LABEL.to_owned()
        }
    }

    /// Confirm a new point. Returns `false` (no-op) once the board already
    /// holds all `n` anchors plus the start point.
    pub fn place(&mut self, pos: Vec2) -> bool {
        if self.placed.len() > self.n {
            return false;
        }
        // A new placement invalidates any redo history.
        self.undone.clear();
        let label = self.label_for(self.placed.len());
        trace!(?pos, label, "placing point");
        self.placed.push(GamePoint::labeled(pos, label));
        true
    }

    /// Move the most recent point onto the redo stack. No-op when empty.
    pub fn undo(&mut self) -> bool {
        match self.placed.pop() {
            Some(p) => {
                self.undone.push(p);
                true
            }
            None => false,
        }
    }

    /// Restore the most recently undone point. Its label is recomputed from
    /// its new position in the list. No-op when nothing was undone.
    pub fn redo(&mut self) -> bool {
        match self.undone.pop() {
            Some(mut p) => {
                p.label = Some(self.label_for(self.placed.len()));
                self.placed.push(p);
                true
            }
            None => false,
        }
    }

    /// All confirmed points in placement order: anchors, then the start point.
    #[inline]
    pub fn placed(&self) -> &[GamePoint] {
        &self.placed
    }

    /// The anchor points (at most the first `n` entries).
    #[inline]
    pub fn anchors(&self) -> &[GamePoint] {
        &self.placed[..self.placed.len().min(self.n)]
    }

    /// The start point, once placed.
    #[inline]
    pub fn start(&self) -> Option<&GamePoint> {
        self.placed.get(self.n)
    }

    /// Clear the start point's outline once the run begins; it is no longer
    /// highlighted while the fractal accumulates.
    pub(crate) fn set_start_plain(&mut self) {
        if let Some(start) = self.placed.get_mut(self.n) {
            start.bordered = false;
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.placed.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.placed.is_empty()
    }

    #[inline]
    pub fn undone_len(&self) -> usize {
        self.undone.len()
    }

    /// True once all `n` anchors and the start point are on the board.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.placed.len() == self.n + 1
    }

    /// Drop redo history (a run consumes it).
    pub fn clear_undone(&mut self) {
        self.undone.clear();
    }

    /// Discard everything. Called when the game finishes and the anchors
    /// stop being meaningful.
    pub fn discard(&mut self) {
        self.placed.clear();
        self.undone.clear();
    }
}
