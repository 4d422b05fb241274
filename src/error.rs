//! Error types for the load generator.
use std::time::Duration;

use thiserror::Error;

/// Errors that can stop a run from producing a report.
///
/// Per-request failures are never represented here; they become
/// [`Outcome::Failure`](crate::Outcome::Failure) and are counted instead.
#[derive(Debug, Error)]
pub enum StressError {
    /// The collector went away without firing the completion gate.
    #[error("completion gate was dropped before the run finished")]
    GateAbandoned,

    /// The completion gate already handed over its value.
    #[error("completion gate already completed")]
    GateCompleted,

    /// The outcome stream closed before the expected number of outcomes arrived.
    #[error("outcome stream closed after {received} of {expected} outcomes")]
    OutcomesLost {
        /// Number of outcomes the collector was waiting for.
        expected: u64,
        /// Number of outcomes actually received.
        received: u64,
    },

    /// A latency value could not be stored in the histogram.
    #[error("latency {latency:?} exceeds histogram range")]
    LatencyTooLarge {
        /// The offending latency.
        latency: Duration,
    },

    /// Recording into the histogram failed.
    #[error("failed to record latency: {0}")]
    HistogramRecord(#[from] hdrhistogram::RecordError),

    /// The HTTP client could not be built.
    #[error("failed to build http client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// A background task of the run failed to join.
    #[error("run task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    /// The concurrency semaphore was closed while dispatching.
    #[error("concurrency gate closed while dispatching")]
    PoolClosed(#[from] tokio::sync::AcquireError),
}

/// Classified transport-level failure of a single request.
///
/// Produced only when no status code could be obtained.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
pub enum TransportError {
    /// The request did not complete before its deadline.
    #[error("request timed out")]
    Timeout,

    /// The connection could not be established (DNS, TCP, TLS handshake).
    #[error("connect error: {0}")]
    Connect(String),

    /// The request could not be sent or the response could not be read.
    #[error("request error: {0}")]
    Request(String),

    /// Any other failure.
    #[error("{0}")]
    Other(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        // strip the url so equal causes bucket together
        let e = e.without_url();
        if e.is_timeout() {
            Self::Timeout
        } else if e.is_connect() {
            Self::Connect(root_cause(&e))
        } else if e.is_request() || e.is_body() {
            Self::Request(root_cause(&e))
        } else {
            Self::Other(root_cause(&e))
        }
    }
}

fn root_cause(e: &(dyn std::error::Error + 'static)) -> String {
    let mut cause = e;
    while let Some(source) = cause.source() {
        cause = source;
    }
    cause.to_string()
}
