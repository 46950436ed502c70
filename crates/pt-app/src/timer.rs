//! Fixed-interval run timer for the step/redraw loop.
//!
//! The caller owns the clock: every method takes `now`, so the loop can be
//! driven by a GUI frame callback or a test without sleeping.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct RunTimer {
    interval: Duration,
    next_due: Option<Instant>,
}

impl RunTimer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_due: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    /// Arm the timer; the first tick is due one interval from `now`.
    pub fn start(&mut self, now: Instant) {
        if self.next_due.is_none() {
            tracing::info!(interval_ms = self.interval.as_millis() as u64, "run timer started");
        }
        self.next_due = Some(now + self.interval);
    }

    /// Clear the timer handle. Returns false if nothing was pending.
    pub fn cancel(&mut self) -> bool {
        let was_running = self.next_due.take().is_some();
        if was_running {
            tracing::info!("run timer cancelled");
        }
        was_running
    }

    /// Consume a tick if one is due, rescheduling the next one.
    ///
    /// Missed ticks are not replayed: a late poll fires once.
    pub fn due(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(at) if now >= at => {
                self.next_due = Some(now + self.interval);
                true
            }
            _ => false,
        }
    }

    /// Time left until the next tick, `None` when stopped.
    pub fn time_until(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|at| at.saturating_duration_since(now))
    }
}
