//! Status application chances.
//!
//! ```text
//! scaled = base% * source_proc
//! chance = clamp(round(scaled * resistance_factor * target_proc), 0, 100)
//! apply iff Bernoulli(chance / 100)
//! ```

use crate::env::RandomSource;
use crate::stats::Resistance;

/// Clamped application chance, in whole percent.
pub fn status_chance_percent(
    base_percent: f64,
    source_proc_multiplier: f64,
    resistance: Resistance,
    target_proc_multiplier: f64,
) -> f64 {
    let scaled = base_percent * source_proc_multiplier;
    clamp_percent(scaled * resistance.factor() * target_proc_multiplier)
}

/// Berserk self-confusion chance, in whole percent.
pub fn berserk_chance_percent(chance_percent: f64) -> f64 {
    clamp_percent(chance_percent)
}

/// Bernoulli draw on a percent chance.
pub fn roll_percent(chance_percent: f64, rng: &mut impl RandomSource) -> bool {
    rng.chance(chance_percent / 100.0)
}

fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.round().clamp(0.0, 100.0)
}
