//! Damage and critical rolls.

use crate::config::CombatRules;
use crate::env::{DamageKind, RandomSource};
use crate::stats::CombatStats;

/// Attack and defense stats a hit reads for `kind`.
pub fn stat_pair(kind: DamageKind, attacker: &CombatStats, defender: &CombatStats) -> (u32, u32) {
    match kind {
        DamageKind::Physical => (attacker.physical_attack, defender.physical_defense),
        DamageKind::Magical => (attacker.magical_attack, defender.magical_defense),
    }
}

/// Calculate damage of one landed hit.
///
/// # Formula
///
/// ```text
/// damage = max(1, round((attack * power - defense * 0.5) * variance * critical))
/// ```
///
/// `critical` is the configured multiplier on a critical hit and 1.0 otherwise.
pub fn calculate_damage(attack: u32, power: f64, defense: u32, variance: f64, critical: f64) -> u32 {
    let raw = (f64::from(attack) * power - f64::from(defense) * 0.5) * variance * critical;
    if raw.is_nan() {
        return 1;
    }
    raw.round().clamp(1.0, f64::from(u32::MAX)) as u32
}

/// Critical chance in percent, capped by the rules.
pub fn critical_chance_percent(critical_rate: f64, rules: &CombatRules) -> f64 {
    if critical_rate.is_nan() {
        return 0.0;
    }
    critical_rate.clamp(0.0, rules.critical_cap_percent.max(0.0))
}

/// Rolls critical then variance, in that order, and returns the damage.
pub fn roll_damage(
    attack: u32,
    power: f64,
    defense: u32,
    critical_rate: f64,
    rules: &CombatRules,
    rng: &mut impl RandomSource,
) -> (u32, bool) {
    let critical = rng.chance(critical_chance_percent(critical_rate, rules) / 100.0);
    let variance = rng.uniform_f64(rules.damage_variance_min, rules.damage_variance_max);
    let multiplier = if critical {
        rules.critical_multiplier
    } else {
        1.0
    };
    (
        calculate_damage(attack, power, defense, variance, multiplier),
        critical,
    )
}

/// Applies damage to current HP (clamped to 0). Returns whether it was lethal.
pub fn apply_damage(hp: &mut u32, damage: u32) -> bool {
    *hp = hp.saturating_sub(damage);
    *hp == 0
}
