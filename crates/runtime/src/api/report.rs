//! Final summary of a run.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use delve_core::{RunStatus, RunTotals, StepOutcome, SuperRareDailyState};

use super::request::RunId;

/// Returned by [`RunHandle::join`](crate::RunHandle::join).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub run_id: RunId,
    pub dungeon_id: u32,
    pub seed: u64,
    pub status: RunStatus,
    pub totals: RunTotals,
    /// Persist this and pass it to the next run of the same day.
    pub daily: SuperRareDailyState,
    pub outcomes: Vec<StepOutcome>,
    /// Hex SHA-256 of the outcomes; equal for equal seeds and inputs.
    pub digest: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}
