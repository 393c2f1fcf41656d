use std::time::{Duration, Instant};

/// Cancellable repeating deadline polled from the event loop.
///
/// While armed, every elapsed `period` counts as exactly one tick. Disarming
/// drops the pending deadline, so nothing fires after `stop()`.
pub struct Ticker {
    period: Duration,
    next_due: Option<Instant>,
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        Self { period, next_due: None }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }

    /// Arms the ticker with the first tick one period after `now`.
    /// Returns false if it was already armed.
    pub fn start(&mut self, now: Instant) -> bool {
        if self.next_due.is_some() {
            return false;
        }
        self.next_due = Some(now + self.period);
        true
    }

    /// Returns false if it was not armed.
    pub fn stop(&mut self) -> bool {
        self.next_due.take().is_some()
    }

    /// Number of ticks that came due up to `now`.
    pub fn poll(&mut self, now: Instant) -> u32 {
        let Some(mut due) = self.next_due else {
            return 0;
        };
        let mut fired = 0;
        while due <= now {
            fired += 1;
            due += self.period;
        }
        self.next_due = Some(due);
        fired
    }

    /// How long the loop may block before the next tick, `idle` when disarmed.
    pub fn timeout(&self, now: Instant, idle: Duration) -> Duration {
        match self.next_due {
            Some(due) => due.saturating_duration_since(now),
            None => idle,
        }
    }
}
