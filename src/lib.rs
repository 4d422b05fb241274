//! A command-line HTTP load generator.
//!
//! Given a target URL, a request count and a concurrency level, `volley`
//! issues that many GET requests while keeping at most `concurrency` of them
//! in flight, and reports how they went: status code distribution, transport
//! errors, latencies and total elapsed time.
//!
//! The engine is a small pipeline:
//!
//! - a [`WorkSource`](work::WorkSource) emits one token per request,
//! - an [`ExecutorPool`](pool::ExecutorPool) turns each token into one
//!   [`Outcome`] under a semaphore-enforced concurrency cap,
//! - a [`ResultCollector`](collector::ResultCollector) folds exactly `total`
//!   outcomes into [`Stats`] and fires a one-shot
//!   [completion gate](gate),
//! - the [`Stresser`] waits on the gate and builds a [`RunReport`].
//!
//! ## Example
//!
//! ```no_run
//! use std::num::NonZeroU32;
//!
//! use reqwest::Url;
//! use volley::{
//!     ReqwestTransport, RunConfig, Stresser, TransportConfig,
//!     reporter::{Reporter, TextReporter},
//! };
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = RunConfig {
//!         target: Url::parse("http://localhost:8080/")?,
//!         total: 100,
//!         concurrency: NonZeroU32::new(8).unwrap(),
//!     };
//!     let transport = ReqwestTransport::new(&TransportConfig::default())?;
//!     let report = Stresser::new(config, transport).execute().await?;
//!     TextReporter.print(&mut std::io::stdout(), &report)
//! }
//! ```
#![deny(missing_docs)]

mod histogram;
mod outcome;
mod report;
mod runner;
mod stats;
mod status;

pub mod cli;
pub mod collector;
pub mod error;
pub mod gate;
pub mod pool;
pub mod reporter;
pub mod transport;
pub mod work;

pub use crate::{
    error::{StressError, TransportError},
    histogram::LatencyHistogram,
    outcome::Outcome,
    report::RunReport,
    runner::{RunConfig, Stresser},
    stats::Stats,
    status::{Status, StatusKind},
    transport::{ReqwestTransport, Transport, TransportConfig},
};
