//! Per-step results handed back to the caller.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::combat::{BattleLogEntry, BattleResult, CombatSummary, Drop};
use crate::scheduler::EventCategory;
use crate::state::SuperRareDailyState;

/// What happened at one cursor position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Nothing,
    Scripted {
        event_id: u32,
        name: String,
    },
    Combat {
        /// Master ids of the materialized enemies, in suffix order.
        enemy_ids: Vec<u32>,
        result: BattleResult,
    },
}

impl EventKind {
    pub fn category(&self) -> EventCategory {
        match self {
            Self::Nothing => EventCategory::Nothing,
            Self::Scripted { .. } => EventCategory::Scripted,
            Self::Combat { .. } => EventCategory::Combat,
        }
    }
}

/// Persistable record of one event.
///
/// `sequence` orders entries within a run; wall-clock timestamps are added
/// by the host.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLogEntry {
    pub sequence: u32,
    pub floor_number: u32,
    pub event_index: u32,
    pub kind: EventKind,
    pub experience: u64,
    pub member_experience: BTreeMap<u32, u64>,
    pub gold: u64,
    pub drops: Vec<Drop>,
    pub applied_status_effects: Vec<u32>,
}

/// Result of one `step`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepOutcome {
    pub entry: EventLogEntry,
    pub combat: Option<CombatSummary>,
    pub battle_log: Option<Vec<BattleLogEntry>>,
    /// Set when the event was a lost combat.
    pub should_terminate: bool,
    /// Daily gate after this step; persist it for the next run of the day.
    pub daily: SuperRareDailyState,
}

impl StepOutcome {
    pub fn category(&self) -> EventCategory {
        self.entry.kind.category()
    }

    pub fn experience(&self) -> u64 {
        self.entry.experience
    }

    pub fn gold(&self) -> u64 {
        self.entry.gold
    }

    pub fn drops(&self) -> &[Drop] {
        &self.entry.drops
    }

    pub fn member_experience(&self) -> &BTreeMap<u32, u64> {
        &self.entry.member_experience
    }
}
