//! The one-shot completion gate between the collector and the orchestrator.
//!
//! A gate is created per run as a ([`GateSignal`], [`CompletionGate`]) pair.
//! The collector holds the signal and fires it once with the final value; the
//! orchestrator waits on the gate. The signal is consumed by firing, so a gate
//! fires at most once; a gate that has completed refuses further waits.
//!
//! State transitions: `Idle → Running → Complete` (Complete is terminal)
use tokio::sync::oneshot;

use crate::error::StressError;

/// Lifecycle of a completion gate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum GateState {
    /// Created, nothing launched yet.
    #[default]
    Idle,
    /// The orchestrator is waiting for the signal.
    Running,
    /// The signal fired; the value has been handed over.
    Complete,
}

/// Creates a fresh completion gate.
pub fn completion_gate<T>() -> (GateSignal<T>, CompletionGate<T>) {
    let (tx, rx) = oneshot::channel();
    (GateSignal { tx }, CompletionGate { rx, state: GateState::Idle })
}

/// The firing half of a completion gate.
#[derive(Debug)]
pub struct GateSignal<T> {
    tx: oneshot::Sender<T>,
}

impl<T> GateSignal<T> {
    /// Fires the gate, handing `value` to the waiting side.
    ///
    /// Returns false if the waiting side is already gone.
    pub fn fire(self, value: T) -> bool {
        self.tx.send(value).is_ok()
    }
}

/// The waiting half of a completion gate.
#[derive(Debug)]
pub struct CompletionGate<T> {
    rx: oneshot::Receiver<T>,
    state: GateState,
}

impl<T> CompletionGate<T> {
    /// Current state of the gate.
    pub fn state(&self) -> GateState {
        self.state
    }

    /// Marks the gate as running. Has no effect once complete.
    pub fn start(&mut self) {
        if self.state == GateState::Idle {
            self.state = GateState::Running;
        }
    }

    /// Waits until the gate fires and returns the handed-over value.
    ///
    /// Leaves the gate in [`GateState::Complete`]. Fails with
    /// [`StressError::GateAbandoned`] if the signal is dropped without firing,
    /// and with [`StressError::GateCompleted`] if the gate already completed.
    pub async fn wait(&mut self) -> Result<T, StressError> {
        if self.state == GateState::Complete {
            return Err(StressError::GateCompleted);
        }
        self.start();
        let value = (&mut self.rx).await.map_err(|_| StressError::GateAbandoned)?;
        self.state = GateState::Complete;
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn fires_once_with_value() {
        let (signal, mut gate) = completion_gate::<u64>();
        assert_eq!(gate.state(), GateState::Idle);
        gate.start();
        assert_eq!(gate.state(), GateState::Running);

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(5)).await;
            assert!(signal.fire(42));
        });

        assert_eq!(gate.wait().await.unwrap(), 42);
        assert_eq!(gate.state(), GateState::Complete);
    }

    #[tokio::test]
    async fn completed_gate_refuses_a_second_wait() {
        let (signal, mut gate) = completion_gate();
        signal.fire(7u8);
        assert_eq!(gate.wait().await.unwrap(), 7);
        assert_eq!(gate.state(), GateState::Complete);

        assert!(matches!(gate.wait().await, Err(StressError::GateCompleted)));
        gate.start();
        assert_eq!(gate.state(), GateState::Complete);
    }

    #[tokio::test]
    async fn fired_before_wait_is_not_lost() {
        let (signal, mut gate) = completion_gate();
        assert!(signal.fire("done"));
        assert_eq!(gate.wait().await.unwrap(), "done");
    }

    #[tokio::test]
    async fn dropped_signal_abandons_gate() {
        let (signal, mut gate) = completion_gate::<()>();
        drop(signal);
        assert!(matches!(gate.wait().await, Err(StressError::GateAbandoned)));
        assert_eq!(gate.state(), GateState::Running);
    }

    #[tokio::test]
    async fn fire_without_waiter_reports_failure() {
        let (signal, gate) = completion_gate::<()>();
        drop(gate);
        assert!(!signal.fire(()));
    }
}
