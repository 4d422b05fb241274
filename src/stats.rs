//! The run statistics accumulator.
//!
//! [`Stats`] is owned by exactly one writer, the
//! [`ResultCollector`](crate::collector::ResultCollector), for the whole run.
//! Outcomes are folded in with [`Stats::record`]; the accumulation is
//! commutative, so the order in which outcomes arrive does not affect the
//! final value.

use std::collections::HashMap;

use crate::{histogram::LatencyHistogram, outcome::Outcome};

/// Aggregated outcome counts of a run.
///
/// At completion `error_count + status_counts.values().sum() == total_issued`.
#[derive(Clone, Debug, Default)]
pub struct Stats {
    /// Number of outcomes recorded.
    pub total_issued: u64,
    /// Number of transport failures.
    pub error_count: u64,
    /// Occurrences per received status code.
    pub status_counts: HashMap<u16, u64>,
    /// Occurrences per failure cause.
    pub error_dist: HashMap<String, u64>,
    /// Latencies of requests that received a response.
    pub hist: LatencyHistogram,
}

impl Stats {
    /// Creates empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one outcome into the statistics.
    ///
    /// A latency the histogram cannot hold is logged and skipped; the outcome
    /// itself is always counted.
    pub fn record(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Success { status, latency } => {
                if let Err(e) = self.hist.record(*latency) {
                    tracing::warn!(status, "latency not recorded: {e}");
                }
                *self.status_counts.entry(*status).or_default() += 1;
            }
            Outcome::Failure { cause, .. } => {
                self.error_count += 1;
                *self.error_dist.entry(cause.to_string()).or_default() += 1;
            }
        }
        self.total_issued += 1;
    }

    /// Number of outcomes that received a status code.
    pub fn responded(&self) -> u64 {
        self.status_counts.values().sum()
    }
}
