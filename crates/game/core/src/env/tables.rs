use serde::{Deserialize, Serialize};

use super::rng::RandomSource;
use crate::engine::ConfigurationError;

/// Oracle providing balance tables.
///
/// Tables are game-balance datasets tuned outside the engine. The engine only
/// validates their shape, never their values.
pub trait TablesOracle: Send + Sync {
    fn luck_table(&self) -> &LuckTable;
}

/// Step table mapping luck to the floor of its random multiplier range.
///
/// A combatant with luck `l` draws its multiplier uniformly from
/// `[lower_bound(l), 1.0]`; once the lower bound reaches 1.0 the multiplier
/// is fixed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LuckTable {
    bands: Vec<LuckBand>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LuckBand {
    /// Smallest luck value this band applies to.
    pub min_luck: u32,
    /// Lower bound of the multiplier draw.
    pub lower: f64,
}

impl LuckBand {
    pub const fn new(min_luck: u32, lower: f64) -> Self {
        Self { min_luck, lower }
    }
}

impl LuckTable {
    /// Builds a table, rejecting shapes the hit model cannot use.
    ///
    /// Bands must start at luck 0, be strictly increasing in luck, have
    /// non-decreasing lower bounds inside `[0, 1]`, and end at 1.0.
    pub fn new(bands: Vec<LuckBand>) -> Result<Self, ConfigurationError> {
        let table = Self { bands };
        table.validate()?;
        Ok(table)
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let invalid = ConfigurationError::InvalidLuckTable;
        let first = self.bands.first().ok_or(invalid("table is empty"))?;
        if first.min_luck != 0 {
            return Err(invalid("first band must start at luck 0"));
        }
        for band in &self.bands {
            if !(0.0..=1.0).contains(&band.lower) {
                return Err(invalid("lower bound outside [0, 1]"));
            }
        }
        for pair in self.bands.windows(2) {
            if pair[1].min_luck <= pair[0].min_luck {
                return Err(invalid("bands must be sorted by luck"));
            }
            if pair[1].lower < pair[0].lower {
                return Err(invalid("lower bounds must be non-decreasing"));
            }
        }
        let last = self.bands.last().ok_or(invalid("table is empty"))?;
        if last.lower < 1.0 {
            return Err(invalid("last band must saturate at 1.0"));
        }
        Ok(())
    }

    pub fn bands(&self) -> &[LuckBand] {
        &self.bands
    }

    /// Lower bound of the multiplier range for `luck`.
    pub fn lower_bound(&self, luck: u32) -> f64 {
        self.bands
            .iter()
            .take_while(|band| band.min_luck <= luck)
            .last()
            .map_or(1.0, |band| band.lower)
    }

    /// Draws the luck multiplier for `luck`.
    pub fn multiplier(&self, luck: u32, rng: &mut impl RandomSource) -> f64 {
        let lower = self.lower_bound(luck);
        if lower >= 1.0 {
            return 1.0;
        }
        rng.uniform_f64(lower, 1.0)
    }
}

impl Default for LuckTable {
    /// Illustrative balance: luck 1 draws from `[0.41, 1.00]`, luck 60 and
    /// above is fixed at 1.00.
    fn default() -> Self {
        Self {
            bands: vec![
                LuckBand::new(0, 0.41),
                LuckBand::new(10, 0.50),
                LuckBand::new(20, 0.60),
                LuckBand::new(30, 0.70),
                LuckBand::new(40, 0.80),
                LuckBand::new(50, 0.90),
                LuckBand::new(60, 1.00),
            ],
        }
    }
}
