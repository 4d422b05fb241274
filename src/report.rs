//! The final run report.
use std::collections::BTreeMap;

use tokio::time::Duration;

use crate::{histogram::LatencyHistogram, stats::Stats};

/// Status code counted as a plain success in the report.
pub const STATUS_OK: u16 = 200;

/// Immutable summary of a completed run, handed to a
/// [`Reporter`](crate::reporter::Reporter).
#[derive(Clone, Debug)]
pub struct RunReport {
    /// Maximum number of requests in flight.
    pub concurrency: u32,
    /// Number of requests issued.
    pub total: u64,
    /// Number of responses with status 200.
    pub success_count: u64,
    /// Number of requests that got no response.
    pub error_count: u64,
    /// Wall-clock duration of the whole run.
    pub elapsed: Duration,
    /// Occurrences of every status code other than 200.
    pub other_status_codes: BTreeMap<u16, u64>,
    /// Occurrences of every failure cause.
    pub error_dist: BTreeMap<String, u64>,
    /// Latencies of requests that received a response.
    pub hist: LatencyHistogram,
}

impl RunReport {
    /// Builds the report from final statistics.
    pub fn new(concurrency: u32, total: u64, stats: Stats, elapsed: Duration) -> Self {
        debug_assert_eq!(stats.error_count + stats.responded(), stats.total_issued);
        let Stats { error_count, status_counts, error_dist, hist, .. } = stats;
        let success_count = status_counts.get(&STATUS_OK).copied().unwrap_or(0);
        let other_status_codes = status_counts.into_iter().filter(|&(code, _)| code != STATUS_OK).collect();
        Self {
            concurrency,
            total,
            success_count,
            error_count,
            elapsed,
            other_status_codes,
            error_dist: error_dist.into_iter().collect(),
            hist,
        }
    }

    /// Elapsed wall-clock time in seconds.
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    /// Number of requests accounted for: errors plus every received status.
    pub fn accounted(&self) -> u64 {
        self.error_count + self.success_count + self.other_status_codes.values().sum::<u64>()
    }

    /// Fraction of requests answered with status 200.
    pub fn success_ratio(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.success_count as f64 / self.total as f64
    }

    /// Requests completed per second.
    pub fn rate(&self) -> f64 {
        let secs = self.elapsed_secs();
        if secs == 0.0 { 0.0 } else { self.total as f64 / secs }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::TransportError, outcome::Outcome};

    #[test]
    fn splits_success_from_other_codes() {
        let mut stats = Stats::new();
        let latency = Duration::from_millis(3);
        for status in [200, 200, 200, 404, 500, 500] {
            stats.record(&Outcome::Success { status, latency });
        }
        stats.record(&Outcome::Failure { cause: TransportError::Timeout, latency });

        let report = RunReport::new(2, 7, stats, Duration::from_secs(2));
        assert_eq!(report.success_count, 3);
        assert_eq!(report.error_count, 1);
        assert_eq!(report.other_status_codes, BTreeMap::from([(404, 1), (500, 2)]));
        assert_eq!(report.accounted(), 7);
        assert_eq!(report.rate(), 3.5);
    }

    #[test]
    fn empty_run() {
        let report = RunReport::new(8, 0, Stats::new(), Duration::ZERO);
        assert_eq!(report.success_count, 0);
        assert_eq!(report.error_count, 0);
        assert!(report.other_status_codes.is_empty());
        assert_eq!(report.success_ratio(), 0.0);
        assert_eq!(report.rate(), 0.0);
    }
}
