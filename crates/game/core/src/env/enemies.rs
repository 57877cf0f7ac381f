//! Enemy and skill definitions and oracle interface.
//!
//! The `EnemyOracle` also owns the level-to-snapshot computation so the
//! engine can treat `combat_stats(id, level)` as a pure lookup.

use serde::{Deserialize, Serialize};

use crate::stats::{BaseStats, CombatStats, StatusResistances};

pub trait EnemyOracle: Send + Sync {
    fn enemy(&self, id: u32) -> Option<EnemyDefinition>;

    fn skill(&self, id: u32) -> Option<SkillDefinition>;

    /// Combat snapshot of enemy `id` at `level`.
    ///
    /// Defaults to expanding the definition's base stats.
    fn combat_stats(&self, id: u32, level: u32) -> Option<CombatStats> {
        self.enemy(id).map(|enemy| enemy.stats_at(level))
    }
}

/// Master-data record for an enemy species.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnemyDefinition {
    /// Must stay below [`ExplorationConfig::ACTOR_ID_LIMIT`](crate::ExplorationConfig::ACTOR_ID_LIMIT).
    pub id: u32,
    pub name: String,
    pub base_experience: u64,
    #[serde(default)]
    pub is_boss: bool,
    #[serde(default)]
    pub base_stats: BaseStats,
    #[serde(default)]
    pub resistances: StatusResistances,
    #[serde(default)]
    pub skill_ids: Vec<u32>,
    /// Chance, in percent, of using a skill instead of a basic attack.
    #[serde(default)]
    pub skill_rate_percent: f64,
    #[serde(default)]
    pub drop_item_ids: Vec<u32>,
}

impl EnemyDefinition {
    pub fn stats_at(&self, level: u32) -> CombatStats {
        self.base_stats
            .at_level(level, self.is_boss, self.resistances.clone())
    }
}

/// Which attack/defense pair a skill uses.
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
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum DamageKind {
    #[default]
    Physical,
    Magical,
}

/// Active skill usable by enemies and party members.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SkillDefinition {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub damage_kind: DamageKind,
    /// Multiplier on the attack stat.
    #[serde(default = "default_multiplier")]
    pub power: f64,
    #[serde(default = "default_hit_count")]
    pub hit_count: u8,
    #[serde(default = "default_multiplier")]
    pub accuracy_multiplier: f64,
    /// Replaces the configured hit-chance bounds while this skill resolves.
    #[serde(default)]
    pub hit_bounds: Option<(f64, f64)>,
    #[serde(default)]
    pub status: Option<SkillStatus>,
}

/// Status effect a skill may inflict on each landed hit.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SkillStatus {
    pub status_id: u32,
    pub base_percent: f64,
}

fn default_multiplier() -> f64 {
    1.0
}

fn default_hit_count() -> u8 {
    1
}
