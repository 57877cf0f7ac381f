//! Experience, gold and trap-difficulty curves.
//!
//! Pure functions. Every result is rounded half away from zero and clamped
//! to be non-negative. The level multipliers saturate so that extreme level
//! mismatches cannot inflate rewards past ten times the base.

use serde::{Deserialize, Serialize};

/// Cap applied to `level_difference_multiplier * level_ratio_multiplier`.
pub const MAX_REWARD_MULTIPLIER: f64 = 10.0;

/// Reward-relevant facts about one defeated enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefeatedEnemy {
    pub base_experience: u64,
    pub level: u32,
}

impl DefeatedEnemy {
    pub const fn new(base_experience: u64, level: u32) -> Self {
        Self {
            base_experience,
            level,
        }
    }
}

/// Piecewise multiplier on `enemy_level - character_level`.
///
/// ```text
/// diff <= -50        0.5
/// -50 < diff <= 0    50 / (50 - diff)
/// 0 < diff <= 50     (50 + diff) / 50
/// diff > 50          2.0
/// ```
pub fn level_difference_multiplier(enemy_level: u32, character_level: u32) -> f64 {
    let diff = i64::from(enemy_level) - i64::from(character_level);
    match diff {
        d if d <= -50 => 0.5,
        d if d <= 0 => 50.0 / (50.0 - d as f64),
        d if d <= 50 => (50.0 + d as f64) / 50.0,
        _ => 2.0,
    }
}

/// Multiplier on `enemy_level / character_level`, capped at 5.0.
pub fn level_ratio_multiplier(enemy_level: u32, character_level: u32) -> f64 {
    if character_level == 0 {
        return 1.0;
    }
    let ratio = f64::from(enemy_level) / f64::from(character_level);
    if ratio <= 2.0 {
        ratio
    } else if ratio < 17.0 {
        1.0 + (ratio - 1.0).sqrt()
    } else {
        5.0
    }
}

/// Combined, capped level multiplier.
pub fn reward_multiplier(enemy_level: u32, character_level: u32) -> f64 {
    (level_difference_multiplier(enemy_level, character_level)
        * level_ratio_multiplier(enemy_level, character_level))
    .min(MAX_REWARD_MULTIPLIER)
}

/// Experience earned by one party member.
///
/// Non-survivors earn nothing. Each enemy's base experience is split between
/// the `alive_count` survivors before the level multiplier applies.
pub fn experience_for_member(
    member_level: u32,
    survived: bool,
    enemies: &[DefeatedEnemy],
    alive_count: usize,
    scale: f64,
) -> u64 {
    if !survived || alive_count == 0 {
        return 0;
    }
    let alive = alive_count as f64;
    let total: f64 = enemies
        .iter()
        .map(|enemy| {
            enemy.base_experience as f64 / alive * reward_multiplier(enemy.level, member_level)
        })
        .sum();
    to_reward(total * scale)
}

/// Gold earned by the party as a whole.
///
/// Every (enemy, survivor) pair contributes half the enemy's split base
/// experience scaled by the survivor's level multiplier.
pub fn gold_for_party(
    enemies: &[DefeatedEnemy],
    survivor_levels: &[u32],
    alive_count: usize,
    victory: bool,
    scale: f64,
) -> u64 {
    if !victory || survivor_levels.is_empty() || alive_count == 0 {
        return 0;
    }
    let alive = alive_count as f64;
    let mut total = 0.0;
    for enemy in enemies {
        let share = enemy.base_experience as f64 * 0.5 / alive;
        for level in survivor_levels {
            total += share * reward_multiplier(enemy.level, *level);
        }
    }
    to_reward(total * scale)
}

/// Trap difficulty of a chest holding an item of `base_price`.
pub fn item_trap_difficulty(base_price: i64, recommended_level: u32, floor_number: u32) -> u32 {
    let base = if base_price <= 0 {
        0
    } else if base_price <= 1_000 {
        (0.033 * base_price as f64 + 32.6).round() as i64
    } else {
        (99.2 + 0.172 * (base_price as f64).sqrt()).round() as i64
    };
    let modifier = (i64::from(recommended_level) * 5 + i64::from(floor_number) * 2).max(0);
    (base + modifier).clamp(0, i64::from(u32::MAX)) as u32
}

fn to_reward(value: f64) -> u64 {
    if !value.is_finite() {
        return 0;
    }
    // `as` saturates, so huge values clamp to u64::MAX.
    value.round().max(0.0) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn difference_multiplier_is_continuous_at_breakpoints() {
        assert!((level_difference_multiplier(50, 50) - 1.0).abs() < EPS);
        assert!((level_difference_multiplier(51, 50) - 1.02).abs() < EPS);
        assert!((level_difference_multiplier(1, 51) - 0.5).abs() < EPS);
        assert!((level_difference_multiplier(2, 51) - 50.0 / 99.0).abs() < EPS);
        assert!((level_difference_multiplier(100, 50) - 2.0).abs() < EPS);
        assert!((level_difference_multiplier(101, 50) - 2.0).abs() < EPS);
    }

    #[test]
    fn ratio_multiplier_is_continuous_at_breakpoints() {
        assert!((level_ratio_multiplier(20, 10) - 2.0).abs() < EPS);
        assert!((level_ratio_multiplier(170, 10) - 5.0).abs() < EPS);
        assert!((level_ratio_multiplier(169, 10) - (1.0 + 15.9f64.sqrt())).abs() < EPS);
        assert_eq!(level_ratio_multiplier(10, 0), 1.0);
    }

    #[test]
    fn combined_multiplier_never_exceeds_cap() {
        for (enemy, character) in [(1, 1000), (1000, 1), (u32::MAX, 1), (1, u32::MAX)] {
            let multiplier = reward_multiplier(enemy, character);
            assert!(multiplier <= MAX_REWARD_MULTIPLIER, "{enemy} vs {character}");
            assert!(multiplier >= 0.0);
        }
        assert_eq!(reward_multiplier(1000, 1), MAX_REWARD_MULTIPLIER);
    }

    #[test]
    fn non_survivor_earns_nothing() {
        let enemies = [DefeatedEnemy::new(500, 90), DefeatedEnemy::new(80, 3)];
        for level in [1, 50, 99] {
            assert_eq!(experience_for_member(level, false, &enemies, 3, 2.0), 0);
        }
    }

    #[test]
    fn experience_splits_between_survivors() {
        let enemies = [DefeatedEnemy::new(100, 50)];
        assert_eq!(experience_for_member(50, true, &enemies, 2, 1.0), 50);
        assert_eq!(experience_for_member(50, true, &enemies, 1, 1.5), 150);
        assert_eq!(experience_for_member(50, true, &enemies, 0, 1.0), 0);
    }

    #[test]
    fn gold_matches_worked_example() {
        let enemies = [DefeatedEnemy::new(100, 50)];
        assert_eq!(gold_for_party(&enemies, &[50, 50], 2, true, 1.0), 50);
        assert_eq!(gold_for_party(&enemies, &[50, 50], 2, false, 1.0), 0);
        assert_eq!(gold_for_party(&enemies, &[], 0, true, 1.0), 0);
    }

    #[test]
    fn rounding_is_half_away_from_zero() {
        // 5 / 2 = 2.5 rounds up.
        let enemies = [DefeatedEnemy::new(5, 10)];
        assert_eq!(experience_for_member(10, true, &enemies, 2, 1.0), 3);
        assert_eq!(to_reward(-3.0), 0);
        assert_eq!(to_reward(f64::NAN), 0);
    }

    #[test]
    fn trap_difficulty_curves() {
        assert_eq!(item_trap_difficulty(0, 0, 0), 0);
        assert_eq!(item_trap_difficulty(-50, 2, 1), 12);
        // 0.033 * 100 + 32.6 = 35.9
        assert_eq!(item_trap_difficulty(100, 0, 0), 36);
        // 99.2 + 0.172 * 100 = 116.4
        assert_eq!(item_trap_difficulty(10_000, 0, 0), 116);
        assert_eq!(item_trap_difficulty(100, 10, 3), 36 + 50 + 6);
    }
}
