//! The work source: a lazy, finite stream of request tokens.
use tokio::{sync::mpsc, task::JoinHandle};

/// One unit of work: "send one request".
///
/// The target is shared configuration, so a token carries nothing but its
/// issue sequence number, which is only used for diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WorkToken {
    /// Zero-based issue order of the token.
    pub seq: u64,
}

/// Produces exactly `total` tokens, then closes its output.
#[derive(Debug)]
pub struct WorkSource {
    total: u64,
    buffer: usize,
}

impl WorkSource {
    /// Creates a source of `total` tokens with an output buffer of `buffer` slots.
    ///
    /// The buffer is clamped to at least one slot.
    pub fn new(total: u64, buffer: usize) -> Self {
        Self { total, buffer: buffer.max(1) }
    }

    /// Starts producing tokens in the background.
    ///
    /// The producer suspends whenever the buffer is full. When `total` is zero
    /// the returned receiver is already closed.
    pub fn spawn(self) -> (mpsc::Receiver<WorkToken>, JoinHandle<u64>) {
        let (tx, rx) = mpsc::channel(self.buffer);
        let total = self.total;
        let handle = tokio::spawn(async move {
            tracing::debug!(total, "preparing requests");
            let mut sent = 0;
            for seq in 0..total {
                // the pool dropped its receiver; nobody will consume further tokens
                if tx.send(WorkToken { seq }).await.is_err() {
                    break;
                }
                sent += 1;
            }
            tracing::debug!(sent, "requests prepared");
            sent
        });
        (rx, handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn emits_exactly_total_tokens_then_closes() {
        let (mut rx, handle) = WorkSource::new(5, 2).spawn();
        let mut seen = Vec::new();
        while let Some(token) = rx.recv().await {
            seen.push(token.seq);
        }
        assert_eq!(seen, vec![0, 1, 2, 3, 4]);
        assert_eq!(handle.await.unwrap(), 5);
    }

    #[tokio::test]
    async fn zero_total_closes_immediately() {
        let (mut rx, handle) = WorkSource::new(0, 8).spawn();
        assert!(rx.recv().await.is_none());
        assert_eq!(handle.await.unwrap(), 0);
    }

    #[tokio::test]
    async fn stops_when_consumer_goes_away() {
        let (mut rx, handle) = WorkSource::new(1_000, 1).spawn();
        assert_eq!(rx.recv().await, Some(WorkToken { seq: 0 }));
        drop(rx);
        assert!(handle.await.unwrap() < 1_000);
    }
}
