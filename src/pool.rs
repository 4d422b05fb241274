//! The bounded executor pool.
//!
//! The pool pulls [`WorkToken`]s and runs one execution unit per token. Every
//! unit holds a permit of a counting semaphore sized to the concurrency cap for
//! its whole lifetime, and a permit is acquired *before* the next token is
//! pulled, so no more than `concurrency` requests can ever be in flight.
//!
//! Each unit sends exactly one [`Outcome`] on the outcome channel. A unit that
//! panics is replaced by a failure outcome when it is reaped, which keeps the
//! outcome count equal to the token count.
use std::{num::NonZeroU32, sync::Arc};

use reqwest::Url;
use tokio::{
    sync::{Semaphore, mpsc},
    task::{JoinError, JoinSet},
    time::{Duration, Instant},
};

use crate::{
    error::{StressError, TransportError},
    outcome::Outcome,
    transport::Transport,
    work::WorkToken,
};

/// A pool running at most `concurrency` requests at a time.
pub struct ExecutorPool<T> {
    transport: Arc<T>,
    target: Arc<Url>,
    concurrency: NonZeroU32,
}

impl<T: Transport> ExecutorPool<T> {
    /// Creates a pool sending requests to `target` through `transport`.
    pub fn new(transport: Arc<T>, target: Url, concurrency: NonZeroU32) -> Self {
        Self { transport, target: Arc::new(target), concurrency }
    }

    /// Consumes tokens until the source is exhausted and waits for every
    /// launched unit to finish.
    ///
    /// Returns the number of units launched.
    pub async fn run(
        self,
        mut tokens: mpsc::Receiver<WorkToken>,
        res_tx: mpsc::UnboundedSender<Outcome>,
    ) -> Result<u64, StressError> {
        let slots = Arc::new(Semaphore::new(self.concurrency.get() as usize));
        let mut set = JoinSet::new();
        let mut launched = 0;

        tracing::debug!(concurrency = self.concurrency.get(), "sending requests");
        loop {
            let permit = slots.clone().acquire_owned().await?;
            let Some(token) = tokens.recv().await else {
                break;
            };

            while let Some(res) = set.try_join_next() {
                reap(res, &res_tx);
            }

            let transport = self.transport.clone();
            let target = self.target.clone();
            let res_tx = res_tx.clone();
            set.spawn(async move {
                let _permit = permit;
                let outcome = execute(transport.as_ref(), &target, token).await;
                // safe to ignore the error which means the collector is gone
                let _ = res_tx.send(outcome);
            });
            launched += 1;
        }
        tracing::debug!(launched, "all requests sent");

        while let Some(res) = set.join_next().await {
            reap(res, &res_tx);
        }
        Ok(launched)
    }
}

async fn execute<T: Transport + ?Sized>(transport: &T, target: &Url, token: WorkToken) -> Outcome {
    let t = Instant::now();
    let res = transport.get(target).await;
    let latency = t.elapsed();

    match res {
        Ok(status) => {
            tracing::trace!(seq = token.seq, status, ?latency, "response received");
            Outcome::Success { status, latency }
        }
        Err(cause) => {
            tracing::warn!(seq = token.seq, %cause, "request failed");
            Outcome::Failure { cause, latency }
        }
    }
}

fn reap(res: Result<(), JoinError>, res_tx: &mpsc::UnboundedSender<Outcome>) {
    if let Err(e) = res {
        tracing::error!("execution unit failed: {e}");
        let cause = TransportError::Other("execution unit panicked".into());
        let _ = res_tx.send(Outcome::Failure { cause, latency: Duration::ZERO });
    }
}
