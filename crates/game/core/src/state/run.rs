//! Mutable state of one run.

use serde::{Deserialize, Serialize};

use super::daily::SuperRareDailyState;
use crate::env::PcgRandom;

/// Lifecycle of a run.
///
/// ```text
/// NotStarted -> Running -> { Completed | Defeated | Cancelled }
/// ```
///
/// `Cancelled` is only ever set by the caller.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    #[default]
    NotStarted,
    Running,
    Completed,
    Defeated,
    Cancelled,
}

impl RunStatus {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Defeated | Self::Cancelled)
    }
}

/// Aggregates accumulated over every resolved event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunTotals {
    pub events_resolved: u32,
    pub combats: u32,
    pub victories: u32,
    pub experience: u64,
    pub gold: u64,
    pub drops: u32,
}

/// Cursor, generator and daily gate of a run.
///
/// Exclusively owned by whoever drives the run; nothing in the engine shares
/// it. Serializing it mid-run and resuming reproduces the remaining steps.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunState {
    /// Zero-based index into the run's sorted floors.
    pub floor_index: u32,
    /// Position within the current floor, in `[0, events_per_floor)`.
    pub event_index: u32,
    pub daily: SuperRareDailyState,
    pub rng: PcgRandom,
    pub status: RunStatus,
    pub totals: RunTotals,
}

impl RunState {
    pub fn new(seed: u64, daily: SuperRareDailyState) -> Self {
        Self {
            floor_index: 0,
            event_index: 0,
            daily,
            rng: PcgRandom::new(seed),
            status: RunStatus::NotStarted,
            totals: RunTotals::default(),
        }
    }

    /// Records a caller-driven stop. Terminal runs keep their status.
    pub fn cancel(&mut self) {
        if !self.status.is_terminal() {
            self.status = RunStatus::Cancelled;
        }
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_terminal()
    }

    /// Moves to the next event, wrapping onto the next floor.
    pub fn advance(&mut self, events_per_floor: u32) {
        self.event_index += 1;
        if self.event_index >= events_per_floor.max(1) {
            self.event_index = 0;
            self.floor_index += 1;
        }
    }
}
