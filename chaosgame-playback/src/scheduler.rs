use std::time::Duration;

/// A periodic-tick source the playback loop plugs into.
///
/// Invariant: at most one tick is outstanding at any time. `schedule`
/// replaces any pending tick rather than queueing a second one, so a caller
/// that schedules from inside a tick handler can never accumulate duplicate
/// concurrent timers.
pub trait TickScheduler {
    /// Arrange for one tick to fire `interval` from now, replacing any
    /// pending tick.
    fn schedule(&mut self, interval: Duration);

    /// Drop the pending tick, if any.
    fn cancel(&mut self);

    /// Whether a tick is currently pending.
    fn has_pending(&self) -> bool;
}

/// A deterministic scheduler for tests and headless driving.
///
/// Records the requested interval; the caller decides when the tick "fires"
/// by calling [`ManualScheduler::fire`], which consumes the pending slot.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    pending: Option<Duration>,
    scheduled_total: u64,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume the pending tick. Returns `false` when nothing was pending.
    pub fn fire(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// The interval of the pending tick, if any.
    pub fn pending_interval(&self) -> Option<Duration> {
        self.pending
    }

    /// How many schedule calls have been made in total.
    pub fn scheduled_total(&self) -> u64 {
        self.scheduled_total
    }
}

impl TickScheduler for ManualScheduler {
    fn schedule(&mut self, interval: Duration) {
        self.pending = Some(interval);
        self.scheduled_total += 1;
    }

    fn cancel(&mut self) {
        self.pending = None;
    }

    fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schedule_replaces_pending() {
        let mut s = ManualScheduler::new();
        s.schedule(Duration::from_millis(100));
        s.schedule(Duration::from_millis(50));
        // Only one tick pending, at the most recent interval.
        assert_eq!(s.pending_interval(), Some(Duration::from_millis(50)));
        assert!(s.fire());
        assert!(!s.fire());
    }

    #[test]
    fn cancel_clears_pending() {
        let mut s = ManualScheduler::new();
        s.schedule(Duration::from_millis(10));
        s.cancel();
        assert!(!s.has_pending());
        assert!(!s.fire());
    }
}
