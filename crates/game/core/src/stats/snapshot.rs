//! CombatStats - complete combat stat snapshot.
//!
//! The snapshot captures every value the combat model reads, computed by the
//! caller (party) or by the enemy oracle (enemies) before the encounter
//! starts. Combat never recomputes stats; it only tracks current HP.

use serde::{Deserialize, Serialize};

use super::resistance::StatusResistances;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatStats {
    pub max_hp: u32,
    /// HP at encounter start, clamped to `max_hp` when the combatant is built.
    pub hp: u32,

    pub physical_attack: u32,
    pub physical_defense: u32,
    pub magical_attack: u32,
    pub magical_defense: u32,

    /// Hit score used against the defender's evasion.
    pub accuracy: u32,
    pub evasion: u32,
    /// Evasion lost to debuffs, in percent.
    pub degradation_percent: f64,

    pub luck: u32,
    /// Turn-order key, higher acts first.
    pub speed: u32,
    /// Critical rate in percent, before luck adjustment.
    pub critical_rate: f64,
    /// Hits per basic attack.
    pub attack_count: u8,

    /// Scales status chances this combatant inflicts.
    pub source_proc_multiplier: f64,
    /// Scales status chances this combatant receives.
    pub target_proc_multiplier: f64,

    /// Per-turn chance, in percent, of berserk self-confusion.
    pub berserk_chance_percent: f64,

    pub resistances: StatusResistances,
}

impl Default for CombatStats {
    fn default() -> Self {
        Self {
            max_hp: 100,
            hp: 100,
            physical_attack: 10,
            physical_defense: 10,
            magical_attack: 10,
            magical_defense: 10,
            accuracy: 10,
            evasion: 10,
            degradation_percent: 0.0,
            luck: 10,
            speed: 10,
            critical_rate: 0.0,
            attack_count: 1,
            source_proc_multiplier: 1.0,
            target_proc_multiplier: 1.0,
            berserk_chance_percent: 0.0,
            resistances: StatusResistances::default(),
        }
    }
}

impl CombatStats {
    /// Current HP clamped to the maximum.
    pub fn starting_hp(&self) -> u32 {
        self.hp.min(self.max_hp)
    }

    pub fn is_alive(&self) -> bool {
        self.starting_hp() > 0
    }
}
