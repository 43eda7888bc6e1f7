//! Metrics collection for the retrieval and generation pipeline.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use serde::Serialize;

/// Counters for pipeline activity. All updates are lock-free.
#[derive(Debug, Default)]
pub struct PipelineMetrics {
    retrievals: AtomicU64,
    passages_returned: AtomicU64,
    generations: AtomicU64,
    generation_failures: AtomicU64,
    tokens_estimated: AtomicU64,
    model_switches: AtomicU64,
    rejected_switches: AtomicU64,
}

impl PipelineMetrics {
    /// Creates a zeroed metrics collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a completed retrieval.
    pub fn record_retrieval(&self, returned: usize) {
        self.retrievals.fetch_add(1, Ordering::Relaxed);
        self.passages_returned
            .fetch_add(returned as u64, Ordering::Relaxed);
    }

    /// Records a successful generation.
    pub fn record_generation(&self, tokens_estimate: usize) {
        self.generations.fetch_add(1, Ordering::Relaxed);
        self.tokens_estimated
            .fetch_add(tokens_estimate as u64, Ordering::Relaxed);
    }

    /// Records a failed generation.
    pub fn record_generation_failure(&self) {
        self.generation_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a model switch attempt.
    pub fn record_model_switch(&self, accepted: bool) {
        if accepted {
            self.model_switches.fetch_add(1, Ordering::Relaxed);
        } else {
            self.rejected_switches.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Returns a point-in-time copy of every counter.
    #[must_use]
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            retrievals: self.retrievals.load(Ordering::Relaxed),
            passages_returned: self.passages_returned.load(Ordering::Relaxed),
            generations: self.generations.load(Ordering::Relaxed),
            generation_failures: self.generation_failures.load(Ordering::Relaxed),
            tokens_estimated: self.tokens_estimated.load(Ordering::Relaxed),
            model_switches: self.model_switches.load(Ordering::Relaxed),
            rejected_switches: self.rejected_switches.load(Ordering::Relaxed),
        }
    }
}

/// Serializable view of [`PipelineMetrics`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    /// Retrievals served.
    pub retrievals: u64,
    /// Passages returned across all retrievals.
    pub passages_returned: u64,
    /// Successful generations.
    pub generations: u64,
    /// Failed generations.
    pub generation_failures: u64,
    /// Sum of token estimates over successful generations.
    pub tokens_estimated: u64,
    /// Accepted model switches.
    pub model_switches: u64,
    /// Rejected model switches (unknown model name).
    pub rejected_switches: u64,
}

/// Timer for measuring operation duration.
pub struct Timer {
    start: Instant,
    label: &'static str,
}

impl Timer {
    /// Starts a new timer.
    #[must_use]
    pub fn start(label: &'static str) -> Self {
        Self {
            start: Instant::now(),
            label,
        }
    }

    /// Returns the elapsed duration.
    #[must_use]
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }

    /// Stops the timer and logs the duration.
    pub fn stop(self) -> f64 {
        let elapsed = self.elapsed_ms();
        tracing::debug!(label = self.label, elapsed_ms = elapsed, "Timer stopped");
        elapsed
    }
}
