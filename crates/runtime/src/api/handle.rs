//! Handle to a running exploration.
//!
//! [`RunHandle`] hides the worker task and cancellation channel and offers
//! helpers for cancelling, joining, or streaming events from specific topics.
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;

use super::errors::{Result, RuntimeError};
use super::report::RunReport;
use super::request::RunId;
use crate::events::{EventBus, RunEvent, Topic};

/// Client-facing handle to one run.
pub struct RunHandle {
    run_id: RunId,
    cancel_tx: watch::Sender<bool>,
    task: JoinHandle<Result<RunReport>>,
    event_bus: EventBus,
}

impl RunHandle {
    pub(crate) fn new(
        run_id: RunId,
        cancel_tx: watch::Sender<bool>,
        task: JoinHandle<Result<RunReport>>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            run_id,
            cancel_tx,
            task,
            event_bus,
        }
    }

    pub fn run_id(&self) -> RunId {
        self.run_id
    }

    /// Request cancellation.
    ///
    /// The worker stops before its next event and records the run as
    /// cancelled. A run that already finished keeps its status.
    pub fn cancel(&self) {
        self.cancel_tx.send_replace(true);
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the run to end and collect its report.
    pub async fn join(self) -> Result<RunReport> {
        self.task.await.map_err(RuntimeError::WorkerJoin)?
    }

    /// Subscribe to events from a specific topic.
    ///
    /// The bus is shared by every run of the explorer; filter on
    /// [`RunEvent::run_id`] when several runs are in flight.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<RunEvent> {
        self.event_bus.subscribe(topic)
    }
}
