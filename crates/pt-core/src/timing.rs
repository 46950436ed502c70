//! Lightweight cost accounting for the step/redraw loop.
//!
//! Measures how much wall time goes into simulation stepping versus
//! redrawing. Enabled via the `PT_TIMING` environment variable or
//! programmatically.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Instant;

static ENABLED: AtomicBool = AtomicBool::new(false);

/// Enable timing globally.
pub fn enable_timing() {
    ENABLED.store(true, Ordering::Relaxed);
}

/// Check if timing is enabled.
pub fn is_enabled() -> bool {
    ENABLED.load(Ordering::Relaxed) || std::env::var("PT_TIMING").is_ok()
}

/// A simple timer that measures elapsed time.
pub struct Timer {
    start: Instant,
    enabled: bool,
}

impl Timer {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
            enabled: is_enabled(),
        }
    }

    /// Stop the timer and return elapsed time in seconds.
    /// If timing is disabled, returns None.
    pub fn stop(self) -> Option<f64> {
        self.enabled.then(|| self.start.elapsed().as_secs_f64())
    }
}

/// Accumulating timer for tracking total time across multiple calls.
pub struct AccumulatingTimer {
    total_ns: AtomicU64,
    count: AtomicU64,
}

impl Default for AccumulatingTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl AccumulatingTimer {
    pub const fn new() -> Self {
        Self {
            total_ns: AtomicU64::new(0),
            count: AtomicU64::new(0),
        }
    }

    /// Record a timing measurement.
    pub fn record(&self, duration_s: f64) {
        let nanos = (duration_s * 1e9) as u64;
        self.total_ns.fetch_add(nanos, Ordering::Relaxed);
        self.count.fetch_add(1, Ordering::Relaxed);
    }

    /// Total time spent (in seconds).
    pub fn total_seconds(&self) -> f64 {
        self.total_ns.load(Ordering::Relaxed) as f64 / 1e9
    }

    /// Number of calls.
    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    /// Average time per call (in seconds).
    pub fn average_seconds(&self) -> f64 {
        let count = self.count();
        if count > 0 {
            self.total_seconds() / count as f64
        } else {
            0.0
        }
    }
}

/// Per-session loop statistics.
#[derive(Default)]
pub struct LoopStats {
    /// Simulation steps (engine step + log append).
    pub step: AccumulatingTimer,
    /// Full scene redraws with background capture.
    pub full_redraw: AccumulatingTimer,
    /// Blits of cached background + dynamic artifacts.
    pub blit: AccumulatingTimer,
}

impl LoopStats {
    /// One-line summary suitable for a `tracing` event.
    pub fn summary(&self) -> String {
        format!(
            "steps={} ({:.4}ms avg), full redraws={} ({:.4}ms avg), blits={} ({:.4}ms avg)",
            self.step.count(),
            self.step.average_seconds() * 1000.0,
            self.full_redraw.count(),
            self.full_redraw.average_seconds() * 1000.0,
            self.blit.count(),
            self.blit.average_seconds() * 1000.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulating_timer_averages() {
        let t = AccumulatingTimer::new();
        assert_eq!(t.average_seconds(), 0.0);
        t.record(0.002);
        t.record(0.004);
        assert_eq!(t.count(), 2);
        assert!((t.average_seconds() - 0.003).abs() < 1e-9);
    }

    #[test]
    fn stats_summary_mentions_every_counter() {
        let stats = LoopStats::default();
        stats.blit.record(0.001);
        let s = stats.summary();
        assert!(s.contains("steps=0"));
        assert!(s.contains("blits=1"));
    }
}
