//! Worker task that owns one run's [`RunState`].
//!
//! The engine is synchronous; the worker steps it, publishes each outcome,
//! and yields between events so cancellation and other runs make progress.

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::{info, warn};

use delve_core::{
    EngineError, ExplorationEngine, RunConfiguration, RunState, RuntimePartyState, StepOutcome,
    outcome_digest,
};

use crate::api::{Result, RunId, RunReport};
use crate::events::{EventBus, RunEvent};
use crate::oracle::OracleBundle;

pub(crate) struct RunWorker {
    pub(crate) run_id: RunId,
    pub(crate) seed: u64,
    pub(crate) oracles: OracleBundle,
    pub(crate) plan: RunConfiguration,
    pub(crate) state: RunState,
    pub(crate) party: RuntimePartyState,
    pub(crate) event_bus: EventBus,
    pub(crate) cancel_rx: watch::Receiver<bool>,
    pub(crate) started_at: DateTime<Utc>,
}

impl RunWorker {
    pub(crate) async fn run(mut self) -> Result<RunReport> {
        let mut outcomes = Vec::new();

        loop {
            let cancelled = *self.cancel_rx.borrow();
            if cancelled {
                self.state.cancel();
                info!(run_id = %self.run_id, events = outcomes.len(), "run cancelled");
                break;
            }

            match self.step() {
                Ok(Some(outcome)) => {
                    self.event_bus.publish(RunEvent::Step {
                        run_id: self.run_id,
                        outcome: Box::new(outcome.clone()),
                        at: Utc::now(),
                    });
                    outcomes.push(outcome);
                }
                Ok(None) => break,
                Err(err) => {
                    warn!(run_id = %self.run_id, error = %err, "run aborted");
                    self.event_bus.publish(RunEvent::Failed {
                        run_id: self.run_id,
                        error: err.to_string(),
                        at: Utc::now(),
                    });
                    return Err(err.into());
                }
            }

            tokio::task::yield_now().await;
        }

        let finished_at = Utc::now();
        info!(
            run_id = %self.run_id,
            status = %self.state.status,
            events = self.state.totals.events_resolved,
            experience = self.state.totals.experience,
            gold = self.state.totals.gold,
            "run finished"
        );
        self.event_bus.publish(RunEvent::Finished {
            run_id: self.run_id,
            status: self.state.status,
            totals: self.state.totals,
            at: finished_at,
        });

        Ok(RunReport {
            run_id: self.run_id,
            dungeon_id: self.plan.dungeon.id,
            seed: self.seed,
            status: self.state.status,
            totals: self.state.totals,
            daily: self.state.daily,
            digest: hex::encode(outcome_digest(&outcomes)),
            outcomes,
            started_at: self.started_at,
            finished_at,
        })
    }

    fn step(&mut self) -> std::result::Result<Option<StepOutcome>, EngineError> {
        let engine = ExplorationEngine::new(self.oracles.as_master_env(), self.oracles.config())?;
        engine.step(&self.plan, &mut self.state, &self.party)
    }
}
