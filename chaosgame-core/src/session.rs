use rand::Rng;
use tracing::{debug, info};

use crate::config::PlaybackConfig;
use crate::generator::{contraction_factor, next_point};
use crate::history::PointHistory;
use crate::point::{GamePoint, Vec2};

/// The session's current state-machine stage.
///
/// Strictly forward-moving, except that undo/redo shuttle between the first
/// three stages while the board is still being set up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Fewer than `n` anchors placed; clicks add anchors.
    Collecting,
    /// All `n` anchors placed; the next click chooses the start point.
    AwaitingStart,
    /// Start point chosen; waiting for the run request.
    Ready,
    /// Generation is active.
    Running,
    /// The point budget is exhausted. Terminal.
    Finished,
}

impl Phase {
    #[inline]
    pub fn is_terminal(self) -> bool {
        self == Self::Finished
    }
}

/// Which user actions are currently legal.
///
/// This is the only user-facing contract for control enablement, so the UI
/// must consume it rather than re-deriving its own rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionSet {
    /// Clicking the canvas places a point (anchor or start).
    pub place_point: bool,
    pub run: bool,
    pub undo: bool,
    pub redo: bool,
    pub play_pause: bool,
}

impl ActionSet {
    const NONE: Self = Self {
        place_point: false,
        run: false,
        undo: false,
        redo: false,
        play_pause: false,
    };
}

/// Compute the legal actions as a pure function of the observable state.
///
/// `placed` counts confirmed history entries (anchors plus start point),
/// `undone` the redo stack. Note the start point participates in undo: from
/// [`Phase::Ready`] an undo reopens start-point selection.
pub fn permitted_actions(phase: Phase, placed: usize, undone: usize) -> ActionSet {
    match phase {
        Phase::Collecting => ActionSet {
            place_point: true,
            run: false,
            undo: placed > 0,
            redo: undone > 0,
            play_pause: false,
        },
        Phase::AwaitingStart => ActionSet {
            place_point: true,
            run: false,
            undo: true,
            redo: undone > 0,
            play_pause: false,
        },
        Phase::Ready => ActionSet {
            place_point: false,
            run: true,
            undo: true,
            redo: false,
            play_pause: false,
        },
        Phase::Running => ActionSet {
            play_pause: true,
            ..ActionSet::NONE
        },
        Phase::Finished => ActionSet::NONE,
    }
}

/// Outcome of one generation step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepReport {
    /// Which anchor the random draw selected.
    pub anchor_index: usize,
    /// The newly generated point.
    pub pos: Vec2,
    /// True when this step exhausted the point budget.
    pub finished: bool,
}

/// A single game session: the anchor history, the running fractal cursor,
/// and the accumulated point cloud.
///
/// All mutation flows through the event handlers below; each is validated
/// against the current phase and silently ignored when illegal (the
/// forgiving-UI contract). A finished session permits no further mutation
/// except [`Session::reset`].
#[derive(Debug, Clone)]
pub struct Session {
    n: usize,
    phase: Phase,
    config: PlaybackConfig,
    history: PointHistory,
    /// Live pointer position, drawn with an outline while the board accepts
    /// clicks. Parked at [`Vec2::OFFSCREEN`] when the pointer leaves.
    cursor: GamePoint,
    /// The running fractal cursor; meaningful from `Ready` onward.
    current: Vec2,
    /// Append-only cloud of generated points, bounded by the config's
    /// `total_points`.
    generated: Vec<GamePoint>,
}

impl Session {
    /// Create an empty session for an `n`-vertex game. `n >= 3` is the
    /// expected domain; smaller values are degenerate but tolerated.
    pub fn new(n: usize, config: PlaybackConfig) -> Self {
        debug!(n, total_points = config.total_points(), "new session");
        Self {
            n,
            phase: Phase::Collecting,
            history: PointHistory::new(n),
            cursor: GamePoint::outlined(Vec2::OFFSCREEN),
            current: Vec2::ZERO,
            config,
            generated: Vec::new(),
        }
    }

    /// Tear the session down to a fresh board with default settings,
    /// keeping the vertex count.
    pub fn reset(&mut self) {
        info!("session reset");
        *self = Self::new(self.n, PlaybackConfig::default());
    }

    #[inline]
    pub fn n(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[inline]
    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    /// The currently legal actions.
    pub fn actions(&self) -> ActionSet {
        permitted_actions(self.phase, self.history.len(), self.history.undone_len())
    }

    // -----------------------------------------------------------------------
    // Pointer events
    // -----------------------------------------------------------------------

    /// Track the pointer while the board accepts clicks.
    pub fn pointer_moved(&mut self, pos: Vec2) {
        if self.actions().place_point {
            self.cursor.pos = pos;
        }
    }

    /// Park the cursor offscreen so it is no longer drawn.
    pub fn pointer_left(&mut self) {
        self.cursor.pos = Vec2::OFFSCREEN;
    }

    /// Place an anchor or the start point, depending on phase.
    pub fn pointer_clicked(&mut self, pos: Vec2) {
        if !self.actions().place_point {
            return;
        }
        self.cursor.pos = pos;
        if !self.history.place(pos) {
            return;
        }
        if self.history.len() == self.n {
            debug!("all anchors placed, awaiting start point");
            self.phase = Phase::AwaitingStart;
        } else if self.history.is_complete() {
            // The (n+1)-th click is the start point, not an anchor.
            self.current = pos;
            debug!(?pos, "start point chosen");
            self.phase = Phase::Ready;
        }
    }

    // -----------------------------------------------------------------------
    // Action requests
    // -----------------------------------------------------------------------

    /// Undo the most recent placement. The start point is a normal history
    /// entry, so undoing from `Ready` reopens start-point selection.
    pub fn request_undo(&mut self) {
        if !self.actions().undo || !self.history.undo() {
            return;
        }
        // The stale cursor point would otherwise linger where the pointer
        // last was; park it until the next move event.
        self.cursor.pos = Vec2::OFFSCREEN;
        self.phase = if self.history.len() == self.n {
            Phase::AwaitingStart
        } else {
            Phase::Collecting
        };
    }

    /// Restore the most recently undone placement.
    pub fn request_redo(&mut self) {
        if !self.actions().redo || !self.history.redo() {
            return;
        }
        if self.history.is_complete() {
            // The restored entry is the start point.
            if let Some(start) = self.history.start() {
                self.current = start.pos;
            }
            self.phase = Phase::Ready;
        } else if self.history.len() == self.n {
            self.phase = Phase::AwaitingStart;
        }
    }

    /// Begin generation. Legal only from `Ready`.
    pub fn request_run(&mut self) {
        if !self.actions().run {
            return;
        }
        // A run consumes the redo history, and the cursor and start point
        // lose their highlight for the duration of the game.
        self.history.clear_undone();
        self.history.set_start_plain();
        self.cursor.bordered = false;
        if let Some(start) = self.history.start() {
            self.current = start.pos;
        }
        info!(
            n = self.n,
            total_points = self.config.total_points(),
            "run started"
        );
        self.phase = Phase::Running;
    }

    /// Toggle pause/resume. Legal only while running; the tick loop keeps
    /// ticking either way, generation is simply skipped while paused.
    pub fn toggle_play(&mut self) {
        if !self.actions().play_pause {
            return;
        }
        self.config.playing = !self.config.playing;
        debug!(playing = self.config.playing, "play toggled");
    }

    /// Adjust the tick interval. Ignored once the session has finished.
    pub fn set_interval_ms(&mut self, interval_ms: u64) {
        if self.phase.is_terminal() {
            return;
        }
        self.config.interval_ms = interval_ms;
    }

    /// Adjust the point-cloud hue. Ignored once the session has finished.
    pub fn set_hue(&mut self, degrees: f64) {
        if self.phase.is_terminal() {
            return;
        }
        self.config.set_hue(degrees);
    }

    // -----------------------------------------------------------------------
    // Generation
    // -----------------------------------------------------------------------

    /// Perform one generation step toward `anchors[anchor_index]`.
    ///
    /// The previous current point loses its outline, the new point gains
    /// one. Reaching the point budget clears the final outline, discards the
    /// anchors, and moves to `Finished`. Returns `None` outside `Running` or
    /// for an out-of-range index.
    pub fn step(&mut self, anchor_index: usize) -> Option<StepReport> {
        if self.phase != Phase::Running {
            return None;
        }
        let target = self.history.anchors().get(anchor_index)?.pos;
        if let Some(last) = self.generated.last_mut() {
            last.bordered = false;
        }
        let next = next_point(self.current, target, contraction_factor(self.n));
        self.generated.push(GamePoint::outlined(next));
        self.current = next;

        let finished = self.generated.len() >= self.config.total_points();
        if finished {
            self.finish();
        }
        Some(StepReport {
            anchor_index,
            pos: next,
            finished,
        })
    }

    /// Draw a uniform anchor index and step toward it. Pure i.i.d. sampling;
    /// no cycle avoidance or weighting.
    pub fn step_random<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<StepReport> {
        if self.phase != Phase::Running || self.n == 0 {
            return None;
        }
        let index = rng.gen_range(0..self.n);
        self.step(index)
    }

    fn finish(&mut self) {
        // Clear the final point's highlight; the finished cloud stands alone.
        if let Some(last) = self.generated.last_mut() {
            last.bordered = false;
        }
        self.history.discard();
        self.phase = Phase::Finished;
        info!(points = self.generated.len(), "game finished");
    }

    // -----------------------------------------------------------------------
    // Read views
    // -----------------------------------------------------------------------

    #[inline]
    pub fn cursor(&self) -> &GamePoint {
        &self.cursor
    }

    /// Confirmed points in placement order (anchors, then the start point).
    #[inline]
    pub fn placed(&self) -> &[GamePoint] {
        self.history.placed()
    }

    /// The anchor points only.
    #[inline]
    pub fn anchors(&self) -> &[GamePoint] {
        self.history.anchors()
    }

    #[inline]
    pub fn start(&self) -> Option<&GamePoint> {
        self.history.start()
    }

    /// The generated fractal cloud, in generation order.
    #[inline]
    pub fn generated(&self) -> &[GamePoint] {
        &self.generated
    }

    /// Everything on the board except the live cursor, for the
    /// points-placed counter.
    pub fn points_placed(&self) -> usize {
        self.history.len() + self.generated.len()
    }
}
