//! Drift-free one-second tick scheduling.
//!
//! Deadlines are computed from the previous deadline rather than from the
//! time a tick was handled, so slow frames do not stretch a workout.

use std::time::{Duration, Instant};

/// Default spacing between engine ticks.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Emits ticks at a fixed interval against a monotonic clock.
#[derive(Debug, Clone)]
pub struct Metronome {
    interval: Duration,
    next: Instant,
}

impl Metronome {
    /// Start a metronome whose first tick is one interval from now.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self::starting_at(interval, Instant::now())
    }

    /// Start a metronome anchored at `now`.
    #[must_use]
    pub fn starting_at(interval: Duration, now: Instant) -> Self {
        let interval = interval.max(Duration::from_millis(1));
        Self {
            interval,
            next: now + interval,
        }
    }

    /// Time left until the next tick is due (zero if overdue).
    #[must_use]
    pub fn time_until_tick(&self, now: Instant) -> Duration {
        self.next.saturating_duration_since(now)
    }

    /// Whether at least one tick is due.
    #[must_use]
    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.next
    }

    /// Consume every tick that has come due, returning how many.
    pub fn take_due(&mut self, now: Instant) -> u32 {
        let mut due = 0;
        while now >= self.next {
            due += 1;
            self.next += self.interval;
        }
        due
    }

    /// Re-anchor after a pause so paused time does not produce ticks.
    pub fn reset(&mut self, now: Instant) {
        self.next = now + self.interval;
    }

    /// Block until the next tick is due and consume it.
    pub fn wait(&mut self) -> u32 {
        let remaining = self.time_until_tick(Instant::now());
        if !remaining.is_zero() {
            std::thread::sleep(remaining);
        }
        self.take_due(Instant::now()).max(1)
    }
}

impl Default for Metronome {
    fn default() -> Self {
        Self::new(TICK_INTERVAL)
    }
}
