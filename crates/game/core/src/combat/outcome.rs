//! Results of one encounter.

use std::collections::BTreeMap;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use super::drops::Drop;
use super::log::BattleLogEntry;

#[derive(
    Clone,
    Copy,
    Debug,
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
pub enum BattleResult {
    Victory,
    Defeat,
    /// Turn limit reached with both sides standing. No rewards.
    Retreat,
}

impl BattleResult {
    pub const fn is_defeat(self) -> bool {
        matches!(self, Self::Defeat)
    }
}

/// Experience and gold awarded by a victory.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleRewards {
    /// Experience per character id, including zero for fallen members.
    pub per_member: BTreeMap<u32, u64>,
    pub total_experience: u64,
    pub gold: u64,
}

bitflags! {
    /// Notable things that happened during an encounter.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct EncounterFlags: u8 {
        const BOSS            = 1 << 0;
        const CRITICAL_HIT    = 1 << 1;
        const STATUS_APPLIED  = 1 << 2;
        const BERSERK         = 1 << 3;
        const SUPER_RARE_DROP = 1 << 4;
        const ALLY_FELL       = 1 << 5;
    }
}

/// One materialized enemy as it ended the encounter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemySummary {
    /// Packed actor reference.
    pub actor: u32,
    pub enemy_id: u32,
    pub level: u32,
    pub defeated: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatSummary {
    pub result: BattleResult,
    pub turns: u8,
    pub enemies: Vec<EnemySummary>,
    /// Character ids still standing.
    pub survivors: Vec<u32>,
    pub rewards: BattleRewards,
    pub drops: Vec<Drop>,
    pub flags: EncounterFlags,
}

/// Summary plus the full battle log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatOutcome {
    pub summary: CombatSummary,
    pub log: Vec<BattleLogEntry>,
}
