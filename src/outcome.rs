//! The per-request result emitted by the executor pool.
use std::time::Duration;

use crate::error::TransportError;

/// Result of one request attempt.
///
/// Exactly one outcome exists per work token. A response with any status code,
/// including 4xx and 5xx, is a [`Success`](Outcome::Success): only failures
/// where no status code could be obtained are [`Failure`](Outcome::Failure)s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A response was received.
    Success {
        /// The response status code.
        status: u16,
        /// Time from sending the request to receiving the response head.
        latency: Duration,
    },
    /// No response could be obtained.
    Failure {
        /// Why the request failed.
        cause: TransportError,
        /// Time spent before the failure surfaced.
        latency: Duration,
    },
}
