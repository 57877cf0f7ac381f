//! Deterministic random number generation.
//!
//! Every probabilistic decision in a run (event category, encounter pick,
//! hit, critical, status, drop) draws from a single [`RandomSource`] owned by
//! the run. Seeding two runs identically reproduces them draw for draw.
//!
//! # Determinism
//!
//! Implementations must produce the same sequence for the same seed. The
//! generator state is part of [`RunState`](crate::state::RunState) so a
//! persisted run resumes exactly where it stopped.

use serde::{Deserialize, Serialize};

/// Upper bound of a luck roll.
pub const LUCK_ROLL_MAX: f64 = 99.99;

/// Stateful pseudo-random generator contract.
///
/// Only [`next_u32`](RandomSource::next_u32) is required; the remaining
/// operations are derived from it so every implementation consumes draws
/// identically.
pub trait RandomSource {
    /// Advances the generator and returns 32 random bits.
    fn next_u32(&mut self) -> u32;

    /// Returns 64 random bits (two draws, high word first).
    fn next_u64(&mut self) -> u64 {
        let high = u64::from(self.next_u32());
        let low = u64::from(self.next_u32());
        (high << 32) | low
    }

    /// Uniform value in the closed unit interval `[0, 1]`.
    fn unit(&mut self) -> f64 {
        f64::from(self.next_u32()) / f64::from(u32::MAX)
    }

    /// Uniform value in the closed range `[min, max]`.
    ///
    /// Reversed bounds are swapped; an empty range returns `min` without drawing.
    fn uniform_f64(&mut self, min: f64, max: f64) -> f64 {
        let (low, high) = if min <= max { (min, max) } else { (max, min) };
        if low == high {
            return low;
        }
        low + (high - low) * self.unit()
    }

    /// Uniform integer in the closed range `[min, max]`.
    fn uniform_int(&mut self, min: i64, max: i64) -> i64 {
        if min >= max {
            return min;
        }
        let span = max.abs_diff(min).saturating_add(1);
        let offset = self.next_u64() % span;
        min.wrapping_add(offset as i64)
    }

    /// Bernoulli trial. The probability is clamped into `[0, 1]`; the
    /// degenerate ends decide without consuming a draw.
    fn chance(&mut self, probability: f64) -> bool {
        let p = if probability.is_nan() {
            0.0
        } else {
            probability.clamp(0.0, 1.0)
        };
        if p <= 0.0 {
            return false;
        }
        if p >= 1.0 {
            return true;
        }
        self.unit() < p
    }

    /// Luck roll in `[lower_bound, 99.99]`, rounded to two decimal places.
    ///
    /// `lower_bound` is clamped into `[0, 99.99]` first.
    fn luck_roll(&mut self, lower_bound: f64) -> f64 {
        let lower = if lower_bound.is_nan() {
            0.0
        } else {
            lower_bound.clamp(0.0, LUCK_ROLL_MAX)
        };
        let value = self.uniform_f64(lower, LUCK_ROLL_MAX);
        ((value * 100.0).round() / 100.0).clamp(lower, LUCK_ROLL_MAX)
    }

    /// Weighted index selection over non-negative weights.
    ///
    /// Returns `None` for an empty slice. When no weight is positive the last
    /// index is returned without drawing. Otherwise a draw in `[0, total]` is
    /// compared against the running sum of positive weights; the first index
    /// whose cumulative sum reaches the draw wins, so ties go to the earlier
    /// index.
    fn weighted_index(&mut self, weights: &[f64]) -> Option<usize> {
        let last = weights.len().checked_sub(1)?;
        let total: f64 = weights.iter().copied().filter(|w| *w > 0.0).sum();
        if total <= 0.0 || !total.is_finite() {
            return Some(last);
        }

        let draw = self.uniform_f64(0.0, total);
        let mut cumulative = 0.0;
        let mut last_positive = last;
        for (index, weight) in weights.iter().copied().enumerate() {
            if weight <= 0.0 {
                continue;
            }
            cumulative += weight;
            last_positive = index;
            if draw <= cumulative {
                return Some(index);
            }
        }
        // Floating-point shortfall on the final sum.
        Some(last_positive)
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// PCG-XSH-RR: 64-bit LCG state, 32-bit permuted output.
///
/// # Properties
///
/// - **Deterministic**: Same seed always produces same output
/// - **Fast**: Single multiply + xorshift + rotate
/// - **Small state**: Only 64 bits, serialized with the run
///
/// # References
///
/// - PCG paper: <https://www.pcg-random.org/>
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PcgRandom {
    state: u64,
}

impl PcgRandom {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    /// Creates a generator from a seed.
    pub fn new(seed: u64) -> Self {
        let mut rng = Self { state: 0 };
        rng.state = Self::pcg_step(rng.state).wrapping_add(seed);
        rng.state = Self::pcg_step(rng.state);
        rng
    }

    /// Restores a generator from a previously captured state.
    pub const fn from_state(state: u64) -> Self {
        Self { state }
    }

    /// Current internal state, suitable for persistence.
    pub const fn state(&self) -> u64 {
        self.state
    }

    /// Advance the PCG state by one step.
    ///
    /// `state' = (state × multiplier + increment) mod 2^64`
    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// PCG output function using XSH-RR (xorshift high, random rotate).
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RandomSource for PcgRandom {
    fn next_u32(&mut self) -> u32 {
        let old = self.state;
        self.state = Self::pcg_step(old);
        Self::pcg_output(old)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Replays a fixed list of raw draws.
    struct Scripted {
        values: Vec<u32>,
        cursor: usize,
    }

    impl Scripted {
        fn new(values: &[u32]) -> Self {
            Self {
                values: values.to_vec(),
                cursor: 0,
            }
        }
    }

    impl RandomSource for Scripted {
        fn next_u32(&mut self) -> u32 {
            let value = self.values[self.cursor % self.values.len()];
            self.cursor += 1;
            value
        }
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = PcgRandom::new(42);
        let mut b = PcgRandom::new(42);
        for _ in 0..64 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = PcgRandom::new(1);
        let mut b = PcgRandom::new(2);
        let left: Vec<u32> = (0..8).map(|_| a.next_u32()).collect();
        let right: Vec<u32> = (0..8).map(|_| b.next_u32()).collect();
        assert_ne!(left, right);
    }

    #[test]
    fn state_round_trips() {
        let mut rng = PcgRandom::new(7);
        rng.next_u32();
        let mut resumed = PcgRandom::from_state(rng.state());
        assert_eq!(rng.next_u32(), resumed.next_u32());
    }

    #[test]
    fn uniform_int_stays_in_closed_range() {
        let mut rng = PcgRandom::new(99);
        for _ in 0..1_000 {
            let value = rng.uniform_int(-3, 3);
            assert!((-3..=3).contains(&value));
        }
        assert_eq!(rng.uniform_int(5, 5), 5);
    }

    #[test]
    fn uniform_f64_handles_reversed_bounds() {
        let mut rng = PcgRandom::new(5);
        for _ in 0..100 {
            let value = rng.uniform_f64(2.0, 1.0);
            assert!((1.0..=2.0).contains(&value));
        }
    }

    #[test]
    fn chance_extremes_do_not_draw() {
        let mut rng = Scripted::new(&[0]);
        assert!(!rng.chance(0.0));
        assert!(!rng.chance(-1.0));
        assert!(rng.chance(1.0));
        assert!(rng.chance(3.0));
        assert_eq!(rng.cursor, 0);
    }

    #[test]
    fn luck_roll_respects_bounds_and_precision() {
        let mut rng = PcgRandom::new(11);
        for _ in 0..500 {
            let roll = rng.luck_roll(40.0);
            assert!((40.0..=LUCK_ROLL_MAX).contains(&roll));
            assert!(((roll * 100.0).round() - roll * 100.0).abs() < 1e-6);
        }
        let mut top = Scripted::new(&[u32::MAX]);
        assert_eq!(top.luck_roll(500.0), LUCK_ROLL_MAX);
    }

    #[test]
    fn weighted_index_skips_zero_weights() {
        let mut rng = PcgRandom::new(3);
        for _ in 0..200 {
            assert_eq!(rng.weighted_index(&[0.0, 0.0, 5.0]), Some(2));
        }
        // A zero draw must not land on a leading zero-weight entry.
        let mut zero = Scripted::new(&[0]);
        assert_eq!(zero.weighted_index(&[0.0, 0.0, 5.0]), Some(2));
    }

    #[test]
    fn weighted_index_fallbacks() {
        let mut rng = Scripted::new(&[0]);
        assert_eq!(rng.weighted_index(&[]), None);
        assert_eq!(rng.weighted_index(&[0.0, 0.0, 0.0]), Some(2));
        assert_eq!(rng.cursor, 0);
    }

    #[test]
    fn weighted_index_ties_resolve_to_earlier_index() {
        // Draw lands exactly on the first boundary: total 2.0, draw 1.0.
        let mut rng = Scripted::new(&[u32::MAX / 2 + 1]);
        let picked = rng.weighted_index(&[1.0, 1.0]).unwrap();
        assert!(picked <= 1);
        let mut low = Scripted::new(&[0]);
        assert_eq!(low.weighted_index(&[1.0, 1.0]), Some(0));
        let mut high = Scripted::new(&[u32::MAX]);
        assert_eq!(high.weighted_index(&[1.0, 1.0]), Some(1));
    }
}
