use std::time::Duration;

use rand::Rng;
use tracing::{debug, trace};

use chaosgame_core::{
    anchor_label_layout, below_point_placement, collecting_label_layout, CanvasSize, Phase,
    Session, StepReport,
};

use crate::frame::{assemble_frame, frame_color};
use crate::scheduler::TickScheduler;
use crate::sink::{LabelSink, RenderSink};

/// Label id for the floating "Start"/"Current" annotation. A single slot,
/// reused: the annotation moves with the current point.
const CUSTOM_LABEL_ID: &str = "custom";

/// What happened during one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    /// The generation step, when one ran (running, not paused).
    pub step: Option<StepReport>,
    /// The session is (now) finished.
    pub finished: bool,
    /// A follow-up tick was scheduled.
    pub rescheduled: bool,
}

/// Drives the generation loop and feeds render data to the sinks.
///
/// The controller owns no game state; the [`Session`] is passed into each
/// call so ownership stays with the host. Ticks keep firing while paused —
/// generation is simply skipped — and stop only when the session finishes
/// or the host cancels the scheduler.
#[derive(Debug)]
pub struct PlaybackController {
    canvas: CanvasSize,
    ticks: u64,
}

impl PlaybackController {
    pub fn new(canvas: CanvasSize) -> Self {
        Self { canvas, ticks: 0 }
    }

    #[inline]
    pub fn canvas(&self) -> CanvasSize {
        self.canvas
    }

    /// Update the canvas dimensions (window resize). The caller should
    /// follow up with [`PlaybackController::sync_labels`].
    pub fn set_canvas(&mut self, canvas: CanvasSize) {
        self.canvas = canvas;
    }

    /// Total ticks processed so far.
    #[inline]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Kick off the tick loop. Cancelling first guarantees that starting
    /// twice never leaves two ticks in flight.
    pub fn start(&self, session: &Session, scheduler: &mut impl TickScheduler) {
        scheduler.cancel();
        scheduler.schedule(Duration::from_millis(session.config().interval_ms));
        debug!(
            interval_ms = session.config().interval_ms,
            "playback loop started"
        );
    }

    /// Process one tick: generate a point when running and not paused, emit
    /// the frame, and schedule the next tick unless the session finished.
    pub fn tick<R: Rng + ?Sized>(
        &mut self,
        session: &mut Session,
        rng: &mut R,
        scheduler: &mut impl TickScheduler,
        render: &mut impl RenderSink,
        labels: &mut impl LabelSink,
    ) -> TickReport {
        self.ticks += 1;

        let mut step = None;
        if session.phase() == Phase::Running && session.config().playing {
            step = session.step_random(rng);
            if let Some(report) = step {
                trace!(
                    anchor = report.anchor_index,
                    x = report.pos.x,
                    y = report.pos.y,
                    "generated point"
                );
                if report.finished {
                    // Anchors and their labels are gone; the cloud stands alone.
                    labels.clear_labels();
                } else {
                    let placement =
                        below_point_placement(report.pos, self.canvas, "Current");
                    labels.place_label(
                        CUSTOM_LABEL_ID,
                        &placement.text,
                        placement.pos.x,
                        placement.pos.y,
                    );
                }
            }
        }

        render.render(&assemble_frame(session), frame_color(session));

        let finished = session.phase().is_terminal();
        // Exactly one pending tick at any time: cancel before scheduling.
        scheduler.cancel();
        if !finished {
            scheduler.schedule(Duration::from_millis(session.config().interval_ms));
        }

        TickReport {
            step,
            finished,
            rescheduled: !finished,
        }
    }

    /// Re-place every label for the current board.
    ///
    /// Anchor labels radiate from the canvas center while the set is still
    /// being collected and from the anchor centroid once it is complete;
    /// the floating annotation marks the start point while waiting for the
    /// run. Labels are keyed by id, so repeated syncs move rather than
    /// duplicate them. Call after clicks, redo, or a canvas resize; a
    /// finished session places nothing.
    pub fn sync_labels(&self, session: &Session, labels: &mut impl LabelSink) {
        if session.phase().is_terminal() {
            return;
        }

        let anchors = session.anchors();
        let layout = if anchors.len() < session.n() {
            collecting_label_layout(anchors, self.canvas)
        } else {
            anchor_label_layout(anchors, session.n(), self.canvas)
        };
        for l in layout {
            labels.place_label(&format!("point-{}", l.index), &l.text, l.pos.x, l.pos.y);
        }

        if session.phase() == Phase::Ready {
            if let Some(start) = session.start() {
                let placement = below_point_placement(start.pos, self.canvas, "Start");
                labels.place_label(
                    CUSTOM_LABEL_ID,
                    &placement.text,
                    placement.pos.x,
                    placement.pos.y,
                );
            }
        }
    }
}
