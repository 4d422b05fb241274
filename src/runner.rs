//! The run orchestrator.
//!
//! [`Stresser`] wires the work source, the executor pool and the result
//! collector together, waits on the completion gate and turns the final
//! statistics into a [`RunReport`].
//!
//! ```text
//! WorkSource ──tokens──▶ ExecutorPool ──outcomes──▶ ResultCollector ──gate──▶ Stresser
//! ```
use std::{num::NonZeroU32, sync::Arc};

use reqwest::Url;
use tokio::{sync::mpsc, time::Instant};
use tokio_util::task::AbortOnDropHandle;

use crate::{
    collector::ResultCollector,
    error::StressError,
    gate::{GateSignal, GateState, completion_gate},
    pool::ExecutorPool,
    report::RunReport,
    stats::Stats,
    transport::Transport,
    work::WorkSource,
};

/// Immutable input of a run.
#[derive(Clone, Debug)]
pub struct RunConfig {
    /// URL every request is sent to.
    pub target: Url,

    /// Number of requests to issue. Zero is a valid no-op run.
    pub total: u64,

    /// Maximum number of requests in flight.
    pub concurrency: NonZeroU32,
}

/// Issues `total` GET requests against a target with bounded concurrency.
pub struct Stresser<T> {
    config: RunConfig,
    transport: Arc<T>,
}

impl<T: Transport> Stresser<T> {
    /// Creates a stresser sending requests through `transport`.
    pub fn new(config: RunConfig, transport: T) -> Self {
        Self { config, transport: Arc::new(transport) }
    }

    /// Runs to completion and returns the report.
    ///
    /// Per-request failures never abort the run; they are counted in the
    /// report. The elapsed time brackets everything from launch to the
    /// completion gate firing.
    pub async fn execute(&self) -> Result<RunReport, StressError> {
        let RunConfig { target, total, concurrency } = self.config.clone();
        let (done, mut gate) = completion_gate::<Stats>();

        if total == 0 {
            let start = Instant::now();
            done.fire(Stats::new());
            let stats = gate.wait().await?;
            return Ok(RunReport::new(concurrency.get(), 0, stats, start.elapsed()));
        }

        tracing::info!(%target, total, concurrency = concurrency.get(), "starting run");
        let start = Instant::now();
        let run = self.launch(target, total, concurrency, done);

        // on any early return the background tasks are aborted when `run` drops
        let stats = match gate.wait().await {
            Ok(stats) => stats,
            Err(e) => {
                run.dispatcher.abort();
                run.producer.abort();
                // surface the collector's own error when it has one
                run.collecting.await??;
                return Err(e);
            }
        };
        let elapsed = start.elapsed();
        debug_assert_eq!(gate.state(), GateState::Complete);

        let launched = run.dispatcher.await??;
        run.producer.await?;
        run.collecting.await??;
        tracing::info!(launched, elapsed = ?elapsed, "run complete");

        Ok(RunReport::new(concurrency.get(), total, stats, elapsed))
    }

    /// Starts the work source, the pool and the collector for one run.
    fn launch(&self, target: Url, total: u64, concurrency: NonZeroU32, done: GateSignal<Stats>) -> LaunchedRun {
        let (res_tx, res_rx) = mpsc::unbounded_channel();
        let pool = ExecutorPool::new(self.transport.clone(), target, concurrency);
        let collector = ResultCollector::new(total, res_rx, done);

        let (tokens, producer) = WorkSource::new(total, concurrency.get() as usize).spawn();
        LaunchedRun {
            producer: AbortOnDropHandle::new(producer),
            dispatcher: AbortOnDropHandle::new(tokio::spawn(pool.run(tokens, res_tx))),
            collecting: AbortOnDropHandle::new(tokio::spawn(collector.run())),
        }
    }
}

/// Background tasks of a run; dropping it aborts all of them.
struct LaunchedRun {
    producer: AbortOnDropHandle<u64>,
    dispatcher: AbortOnDropHandle<Result<u64, StressError>>,
    collecting: AbortOnDropHandle<Result<(), StressError>>,
}
