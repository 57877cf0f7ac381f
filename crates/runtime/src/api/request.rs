//! Run requests and identifiers.
use std::fmt;

use serde::{Deserialize, Serialize};

use delve_core::{RuntimePartyState, SuperRareDailyState};

/// Identifier of a run within one [`Explorer`](crate::Explorer).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RunId(pub u64);

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "run-{}", self.0)
    }
}

/// Everything needed to start a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRequest {
    pub dungeon_id: u32,
    /// Floors to clear; clamped into the dungeon's floor count.
    pub target_floor: u32,
    pub party: RuntimePartyState,
    /// Fixed seed for replays; a random seed is drawn when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Super-rare gate carried over from earlier runs of the day.
    #[serde(default)]
    pub daily: SuperRareDailyState,
}

impl RunRequest {
    pub fn new(dungeon_id: u32, target_floor: u32, party: RuntimePartyState) -> Self {
        Self {
            dungeon_id,
            target_floor,
            party,
            seed: None,
            daily: SuperRareDailyState::default(),
        }
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn with_daily(mut self, daily: SuperRareDailyState) -> Self {
        self.daily = daily;
        self
    }
}
