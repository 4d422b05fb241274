//! A thin wrapper around [`hdrhistogram::Histogram`] for request latencies.
use std::time::Duration;

use hdrhistogram::Histogram;

use crate::error::StressError;

pub(crate) const PERCENTAGES: &[f64] = &[10.0, 25.0, 50.0, 75.0, 90.0, 95.0, 99.0, 99.9];

/// Request latency histogram with nanosecond resolution.
#[derive(Clone, Debug)]
pub struct LatencyHistogram {
    hist: Histogram<u64>,
}

impl LatencyHistogram {
    /// Creates an empty, auto-resizing histogram with 3 significant digits.
    pub fn new() -> Self {
        // SAFETY: 3 significant figures is within the supported 0..=5 range
        Self { hist: Histogram::<u64>::new(3).expect("create histogram") }
    }

    /// Records one latency value.
    pub fn record(&mut self, d: Duration) -> Result<(), StressError> {
        let nanos = u64::try_from(d.as_nanos()).map_err(|_| StressError::LatencyTooLarge { latency: d })?;
        Ok(self.hist.record(nanos)?)
    }

    /// Number of recorded values.
    pub fn len(&self) -> u64 {
        self.hist.len()
    }

    /// Returns true if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.hist.is_empty()
    }

    /// Highest recorded latency.
    pub fn max(&self) -> Duration {
        Duration::from_nanos(self.hist.max())
    }

    /// Lowest recorded latency.
    pub fn min(&self) -> Duration {
        Duration::from_nanos(self.hist.min())
    }

    /// Mean of all recorded latencies.
    pub fn mean(&self) -> Duration {
        Duration::from_nanos(self.hist.mean() as u64)
    }

    /// Standard deviation of all recorded latencies.
    pub fn stdev(&self) -> Duration {
        Duration::from_nanos(self.hist.stdev() as u64)
    }

    /// Median latency.
    pub fn median(&self) -> Duration {
        self.value_at_quantile(0.5)
    }

    /// Latency at the given quantile (0.0..=1.0).
    pub fn value_at_quantile(&self, q: f64) -> Duration {
        Duration::from_nanos(self.hist.value_at_quantile(q))
    }

    /// Latency at each of the given percentages.
    pub fn percentiles<'a>(&'a self, percentages: &'a [f64]) -> impl Iterator<Item = (f64, Duration)> + 'a {
        percentages.iter().map(|&p| (p, self.value_at_quantile(p / 100.0)))
    }
}

impl Default for LatencyHistogram {
    fn default() -> Self {
        Self::new()
    }
}
