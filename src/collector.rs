//! The result collector.
//!
//! [`ResultCollector`] is the single consumer of the outcome channel and the
//! single writer of [`Stats`]. It terminates on a count, not on channel
//! closure: after exactly `expected` outcomes it fires the completion gate with
//! the final statistics.
use tokio::sync::mpsc::UnboundedReceiver;

use crate::{error::StressError, gate::GateSignal, outcome::Outcome, stats::Stats};

/// Collects a known number of outcomes into [`Stats`].
pub struct ResultCollector {
    expected: u64,
    res_rx: UnboundedReceiver<Outcome>,
    done: GateSignal<Stats>,
}

impl ResultCollector {
    /// Creates a collector waiting for `expected` outcomes.
    pub fn new(expected: u64, res_rx: UnboundedReceiver<Outcome>, done: GateSignal<Stats>) -> Self {
        Self { expected, res_rx, done }
    }

    /// Drains `expected` outcomes and fires the gate with the result.
    ///
    /// If the channel closes early the gate is dropped unfired and
    /// [`StressError::OutcomesLost`] is returned.
    pub async fn run(mut self) -> Result<(), StressError> {
        let mut stats = Stats::new();

        tracing::debug!(expected = self.expected, "receiving responses");
        while stats.total_issued < self.expected {
            let outcome = self.res_rx.recv().await.ok_or(StressError::OutcomesLost {
                expected: self.expected,
                received: stats.total_issued,
            })?;
            stats.record(&outcome);
        }
        tracing::debug!(received = stats.total_issued, "all responses received");

        if !self.done.fire(stats) {
            tracing::warn!("run finished but nobody is waiting for the result");
        }
        Ok(())
    }
}
