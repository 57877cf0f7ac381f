//! Events published while runs progress.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use delve_core::{RunStatus, RunTotals, StepOutcome};

use super::bus::Topic;
use crate::api::RunId;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RunEvent {
    Started {
        run_id: RunId,
        dungeon_id: u32,
        seed: u64,
        at: DateTime<Utc>,
    },
    /// One resolved exploration event.
    Step {
        run_id: RunId,
        outcome: Box<StepOutcome>,
        at: DateTime<Utc>,
    },
    Finished {
        run_id: RunId,
        status: RunStatus,
        totals: RunTotals,
        at: DateTime<Utc>,
    },
    /// The run aborted on a configuration or master-data error.
    Failed {
        run_id: RunId,
        error: String,
        at: DateTime<Utc>,
    },
}

impl RunEvent {
    pub fn topic(&self) -> Topic {
        match self {
            RunEvent::Step { .. } => Topic::Step,
            RunEvent::Started { .. } | RunEvent::Finished { .. } | RunEvent::Failed { .. } => {
                Topic::Lifecycle
            }
        }
    }

    pub fn run_id(&self) -> RunId {
        match self {
            RunEvent::Started { run_id, .. }
            | RunEvent::Step { run_id, .. }
            | RunEvent::Finished { run_id, .. }
            | RunEvent::Failed { run_id, .. } => *run_id,
        }
    }

    pub fn at(&self) -> DateTime<Utc> {
        match self {
            RunEvent::Started { at, .. }
            | RunEvent::Step { at, .. }
            | RunEvent::Finished { at, .. }
            | RunEvent::Failed { at, .. } => *at,
        }
    }
}
