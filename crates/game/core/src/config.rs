//! Exploration configuration constants and tunable parameters.
//!
//! Compile-time limits live as associated constants on [`ExplorationConfig`];
//! everything a designer may tune is a serde field with a default so partial
//! `config.toml` files load cleanly.

use serde::{Deserialize, Serialize};

/// Tunable parameters for one exploration engine instance.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorationConfig {
    pub scheduler: SchedulerWeights,
    pub rewards: RewardScales,
    pub combat: CombatRules,
    pub drops: DropRules,
}

impl ExplorationConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum number of party members taking part in a run.
    pub const MAX_PARTY_SIZE: usize = 6;
    /// Maximum number of enemies materialized by one encounter.
    pub const MAX_ENEMY_GROUP: usize = 5;
    /// Maximum number of simultaneously active status effects per combatant.
    pub const MAX_STATUS_EFFECTS: usize = 8;

    /// Enemy and ally ids must stay below this bound for actor references to pack.
    pub const ACTOR_ID_LIMIT: u32 = 1_000;

    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the event category weights (builder pattern).
    #[must_use]
    pub fn with_scheduler(mut self, scheduler: SchedulerWeights) -> Self {
        self.scheduler = scheduler;
        self
    }

    /// Replaces the combat rules (builder pattern).
    #[must_use]
    pub fn with_combat(mut self, combat: CombatRules) -> Self {
        self.combat = combat;
        self
    }

    /// Replaces the drop rules (builder pattern).
    #[must_use]
    pub fn with_drops(mut self, drops: DropRules) -> Self {
        self.drops = drops;
        self
    }
}

/// Base weights for the event category picker.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerWeights {
    pub nothing: f64,
    pub scripted: f64,
    pub combat: f64,
}

impl SchedulerWeights {
    pub const DEFAULT_NOTHING: f64 = 0.6;
    pub const DEFAULT_SCRIPTED: f64 = 0.1;
    pub const DEFAULT_COMBAT: f64 = 0.3;

    pub const fn new(nothing: f64, scripted: f64, combat: f64) -> Self {
        Self {
            nothing,
            scripted,
            combat,
        }
    }
}

impl Default for SchedulerWeights {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_NOTHING,
            Self::DEFAULT_SCRIPTED,
            Self::DEFAULT_COMBAT,
        )
    }
}

/// Global multipliers applied on top of the reward curves.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardScales {
    pub experience: f64,
    pub gold: f64,
}

impl Default for RewardScales {
    fn default() -> Self {
        Self {
            experience: 1.0,
            gold: 1.0,
        }
    }
}

/// Balance parameters for combat resolution.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatRules {
    /// Lower clamp for the final hit chance.
    pub min_hit: f64,
    /// Upper clamp for the final hit chance.
    pub max_hit: f64,
    /// Turn limit; an encounter still undecided after this many turns is a retreat.
    pub max_turns: u8,
    /// Damage multiplier for critical hits.
    pub critical_multiplier: f64,
    /// Upper clamp for critical chance, in percent.
    pub critical_cap_percent: f64,
    /// Lower bound of the damage variance roll.
    pub damage_variance_min: f64,
    /// Upper bound of the damage variance roll.
    pub damage_variance_max: f64,
    /// Fixed duration of berserk self-confusion, in turns.
    pub berserk_duration: u8,
}

impl Default for CombatRules {
    fn default() -> Self {
        Self {
            min_hit: 0.05,
            max_hit: 0.95,
            max_turns: 20,
            critical_multiplier: 1.5,
            critical_cap_percent: 50.0,
            damage_variance_min: 0.9,
            damage_variance_max: 1.1,
            berserk_duration: 2,
        }
    }
}

/// Drop chances and the super-rare daily gate.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DropRules {
    /// Chance, in percent, for each listed common drop of a defeated enemy.
    pub base_drop_percent: f64,
    /// Chance, in percent, for each listed super-rare drop while eligible.
    pub super_rare_percent: f64,
    /// Super-rare drops awarded per day before the gate closes.
    pub super_rare_daily_limit: u32,
}

impl Default for DropRules {
    fn default() -> Self {
        Self {
            base_drop_percent: 20.0,
            super_rare_percent: 0.5,
            super_rare_daily_limit: 1,
        }
    }
}
