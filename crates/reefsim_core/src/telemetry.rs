//! Tick counters and structured logging for the engine stack.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Lightweight counters shared by the orchestration layer.
pub struct Telemetry {
    tick_count: AtomicU64,
    attempt_count: AtomicU64,
    start_time: Instant,
}

impl Default for Telemetry {
    fn default() -> Self {
        Self::new()
    }
}

impl Telemetry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            tick_count: AtomicU64::new(0),
            attempt_count: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    /// Records a completed tick with its duration and resulting stability.
    pub fn record_tick(&self, duration: Duration, stability: f64) {
        let tick = self.tick_count.fetch_add(1, Ordering::Relaxed) + 1;
        if tick % 100 == 0 {
            tracing::info!(
                tick = tick,
                stability = stability,
                duration_us = duration.as_micros() as u64,
                "Simulation tick"
            );
        }
    }

    pub fn record_attempt(&self) {
        self.attempt_count.fetch_add(1, Ordering::Relaxed);
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn attempt_count(&self) -> u64 {
        self.attempt_count.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

/// Initialize tracing subscriber for logging.
pub fn init_logging() {
    tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_max_level(tracing::Level::INFO)
            .finish(),
    )
    .ok();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_start_at_zero() {
        let telemetry = Telemetry::new();
        assert_eq!(telemetry.tick_count(), 0);
        assert_eq!(telemetry.attempt_count(), 0);
    }

    #[test]
    fn record_tick_increments() {
        let telemetry = Telemetry::new();
        telemetry.record_tick(Duration::from_micros(50), 72.0);
        telemetry.record_tick(Duration::from_micros(60), 71.5);
        assert_eq!(telemetry.tick_count(), 2);
    }
}
