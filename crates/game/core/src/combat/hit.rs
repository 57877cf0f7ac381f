//! Hit chance model.
//!
//! # Formula
//!
//! ```text
//! attacker  = max(1, accuracy)
//! defender  = max(1, evasion * (1 - degradation% / 100))
//! base      = attacker / (attacker + defender)
//! random    = luck_mult(attacker_luck) / max(0.01, luck_mult(defender_luck))
//! luck_mod  = (attacker_luck - defender_luck) * 0.002
//! decay     = hit_index <= 1 ? 1.0 : 0.6 * 0.9^(hit_index - 2)
//! raw       = (base * random + luck_mod) * decay * skill_accuracy
//! final     = clamp(raw, min_hit, max_hit)
//! ```

use serde::{Deserialize, Serialize};

use crate::config::CombatRules;
use crate::env::{LuckTable, RandomSource};

/// Clamp range for the final hit chance.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HitBounds {
    pub min: f64,
    pub max: f64,
}

impl HitBounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn from_rules(rules: &CombatRules) -> Self {
        Self::new(rules.min_hit, rules.max_hit)
    }

    /// Skill override, or the configured bounds.
    pub fn for_skill(rules: &CombatRules, skill_bounds: Option<(f64, f64)>) -> Self {
        skill_bounds.map_or_else(|| Self::from_rules(rules), |(min, max)| Self::new(min, max))
    }

    /// Clamps `chance`, keeping the result a valid probability even when the
    /// bounds themselves are out of order or outside `[0, 1]`.
    pub fn clamp(&self, chance: f64) -> f64 {
        let low = self.min.clamp(0.0, 1.0);
        let high = self.max.clamp(low, 1.0);
        if chance.is_nan() {
            return low;
        }
        chance.clamp(low, high)
    }
}

impl Default for HitBounds {
    fn default() -> Self {
        Self::from_rules(&CombatRules::default())
    }
}

/// Attacker and defender values feeding one hit roll.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HitInput {
    pub accuracy: u32,
    pub evasion: u32,
    pub degradation_percent: f64,
    pub attacker_luck: u32,
    pub defender_luck: u32,
    /// 1-based position of this hit within a multi-hit action.
    pub hit_index: u32,
    pub skill_accuracy: f64,
}

/// Successive-hit decay within one action.
pub fn hit_accuracy_modifier(hit_index: u32) -> f64 {
    if hit_index <= 1 {
        1.0
    } else {
        0.6 * 0.9f64.powi((hit_index - 2) as i32)
    }
}

/// Accuracy share of the combined accuracy and degraded evasion.
pub fn base_hit_ratio(accuracy: u32, evasion: u32, degradation_percent: f64) -> f64 {
    let attacker = f64::from(accuracy).max(1.0);
    let degradation = degradation_percent.clamp(0.0, 100.0) / 100.0;
    let defender = (f64::from(evasion) * (1.0 - degradation)).max(1.0);
    attacker / (attacker + defender)
}

/// Final hit chance given the two luck multipliers already drawn.
pub fn hit_chance(
    input: &HitInput,
    attacker_multiplier: f64,
    defender_multiplier: f64,
    bounds: HitBounds,
) -> f64 {
    let base = base_hit_ratio(input.accuracy, input.evasion, input.degradation_percent);
    let random_factor = attacker_multiplier / defender_multiplier.max(0.01);
    let luck_modifier =
        (f64::from(input.attacker_luck) - f64::from(input.defender_luck)) * 0.002;
    let raw = (base * random_factor + luck_modifier)
        * hit_accuracy_modifier(input.hit_index)
        * input.skill_accuracy;
    bounds.clamp(raw)
}

/// Draws both luck multipliers, then the hit itself.
///
/// Returns the decision and the chance it was made with.
pub fn roll_hit(
    input: &HitInput,
    luck: &LuckTable,
    bounds: HitBounds,
    rng: &mut impl RandomSource,
) -> (bool, f64) {
    let attacker = luck.multiplier(input.attacker_luck, rng);
    let defender = luck.multiplier(input.defender_luck, rng);
    let chance = hit_chance(input, attacker, defender, bounds);
    (rng.chance(chance), chance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::PcgRandom;

    fn input(accuracy: u32, evasion: u32) -> HitInput {
        HitInput {
            accuracy,
            evasion,
            degradation_percent: 0.0,
            attacker_luck: 35,
            defender_luck: 35,
            hit_index: 1,
            skill_accuracy: 1.0,
        }
    }

    #[test]
    fn final_chance_stays_inside_default_bounds() {
        let bounds = HitBounds::default();
        let scores = [0, 1, 2, 10, 100, 1_000, u32::MAX];
        for accuracy in scores {
            for evasion in scores {
                for (a, d) in [(0.0, 0.0), (1.0, 0.41), (0.41, 1.0), (1.0, 1.0)] {
                    let chance = hit_chance(&input(accuracy, evasion), a, d, bounds);
                    assert!((0.05..=0.95).contains(&chance), "{accuracy} vs {evasion}");
                }
            }
        }
    }

    #[test]
    fn skill_bounds_widen_the_range() {
        let rules = CombatRules::default();
        let bounds = HitBounds::for_skill(&rules, Some((0.0, 1.0)));
        let sure = hit_chance(&input(u32::MAX, 0), 1.0, 1.0, bounds);
        assert!(sure > 0.95);
        assert_eq!(HitBounds::for_skill(&rules, None), HitBounds::from_rules(&rules));
    }

    #[test]
    fn equal_scores_with_equal_luck_give_even_odds() {
        let chance = hit_chance(&input(40, 40), 1.0, 1.0, HitBounds::default());
        assert!((chance - 0.5).abs() < 1e-12);
    }

    #[test]
    fn degradation_lowers_effective_evasion() {
        let plain = base_hit_ratio(50, 50, 0.0);
        let degraded = base_hit_ratio(50, 50, 50.0);
        assert!(degraded > plain);
        assert!((degraded - 50.0 / 75.0).abs() < 1e-12);
    }

    #[test]
    fn successive_hits_decay() {
        assert_eq!(hit_accuracy_modifier(0), 1.0);
        assert_eq!(hit_accuracy_modifier(1), 1.0);
        assert!((hit_accuracy_modifier(2) - 0.6).abs() < 1e-12);
        assert!((hit_accuracy_modifier(3) - 0.54).abs() < 1e-12);
        assert!(hit_accuracy_modifier(4) < hit_accuracy_modifier(3));
    }

    #[test]
    fn luck_difference_shifts_chance() {
        let mut lucky = input(40, 40);
        lucky.attacker_luck = 60;
        lucky.defender_luck = 10;
        let chance = hit_chance(&lucky, 1.0, 1.0, HitBounds::default());
        assert!((chance - 0.6).abs() < 1e-12);
    }

    #[test]
    fn roll_reports_the_chance_used() {
        let table = LuckTable::default();
        let mut rng = PcgRandom::new(5);
        for _ in 0..100 {
            let (_, chance) = roll_hit(&input(30, 30), &table, HitBounds::default(), &mut rng);
            assert!((0.05..=0.95).contains(&chance));
        }
    }
}
