//! Base attributes of enemies and their level scaling.
//!
//! Party members arrive with a computed [`CombatStats`] snapshot; enemies are
//! stored as six base attributes and expanded to a snapshot per level.

use serde::{Deserialize, Serialize};

use super::resistance::StatusResistances;
use super::snapshot::CombatStats;

/// The six base attributes of an enemy template.
///
/// - **strength**: physical attack
/// - **wisdom**: magical attack
/// - **spirit**: magical defense
/// - **vitality**: HP and physical defense
/// - **agility**: accuracy, evasion, speed
/// - **luck**: critical rate and hit luck
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStats {
    pub strength: u32,
    pub wisdom: u32,
    pub spirit: u32,
    pub vitality: u32,
    pub agility: u32,
    pub luck: u32,
}

impl Default for BaseStats {
    fn default() -> Self {
        Self {
            strength: 10,
            wisdom: 10,
            spirit: 10,
            vitality: 10,
            agility: 10,
            luck: 10,
        }
    }
}

impl BaseStats {
    /// Expands base attributes into a full snapshot at `level`.
    ///
    /// Bosses receive triple HP so they survive more than a handful of turns.
    pub fn at_level(
        &self,
        level: u32,
        is_boss: bool,
        resistances: StatusResistances,
    ) -> CombatStats {
        let level = level.max(1);
        let hp_factor = if is_boss { 3 } else { 1 };
        let max_hp = grow(self.vitality, 10, level, 8).saturating_mul(hp_factor);

        CombatStats {
            max_hp,
            hp: max_hp,
            physical_attack: grow(self.strength, 2, level, 2),
            physical_defense: self.vitality.saturating_add(level),
            magical_attack: grow(self.wisdom, 2, level, 2),
            magical_defense: self.spirit.saturating_add(level),
            accuracy: grow(self.agility, 2, level, 1),
            evasion: self.agility.saturating_add(level / 2),
            luck: self.luck,
            speed: self.agility,
            critical_rate: f64::from(self.luck) / 5.0,
            attack_count: (1 + level / 40).min(4) as u8,
            resistances,
            ..CombatStats::default()
        }
    }
}

/// `base * per_base + level * per_level`, saturating at `u32::MAX`.
fn grow(base: u32, per_base: u32, level: u32, per_level: u32) -> u32 {
    base.saturating_mul(per_base)
        .saturating_add(level.saturating_mul(per_level))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_scaling_is_monotonic() {
        let base = BaseStats::default();
        let low = base.at_level(1, false, StatusResistances::new());
        let high = base.at_level(50, false, StatusResistances::new());
        assert!(high.max_hp > low.max_hp);
        assert!(high.physical_attack > low.physical_attack);
        assert!(high.attack_count >= low.attack_count);
        assert_eq!(low.hp, low.max_hp);
    }

    #[test]
    fn bosses_triple_hp() {
        let base = BaseStats::default();
        let normal = base.at_level(10, false, StatusResistances::new());
        let boss = base.at_level(10, true, StatusResistances::new());
        assert_eq!(boss.max_hp, normal.max_hp * 3);
    }

    #[test]
    fn attack_count_is_capped() {
        let stats = BaseStats::default().at_level(500, false, StatusResistances::new());
        assert_eq!(stats.attack_count, 4);
    }

    #[test]
    fn extreme_levels_saturate_instead_of_overflowing() {
        let base = BaseStats {
            strength: u32::MAX,
            wisdom: u32::MAX / 2,
            spirit: u32::MAX,
            vitality: 600_000_000,
            agility: u32::MAX,
            luck: 99,
        };
        let stats = base.at_level(u32::MAX, true, StatusResistances::new());
        assert_eq!(stats.max_hp, u32::MAX);
        assert_eq!(stats.hp, u32::MAX);
        assert_eq!(stats.physical_attack, u32::MAX);
        assert_eq!(stats.magical_defense, u32::MAX);
        assert_eq!(stats.accuracy, u32::MAX);
        assert_eq!(stats.evasion, u32::MAX);
        assert_eq!(stats.attack_count, 4);

        let moderate = BaseStats::default().at_level(600_000_000, false, StatusResistances::new());
        assert_eq!(moderate.max_hp, u32::MAX);
        assert_eq!(moderate.physical_defense, 600_000_010);
    }
}
