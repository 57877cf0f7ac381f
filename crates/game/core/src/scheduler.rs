//! Event category picker.

use serde::{Deserialize, Serialize};

use crate::config::SchedulerWeights;
use crate::engine::ConfigurationError;
use crate::env::RandomSource;

/// Kind of event resolved at one cursor position.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    Nothing,
    Scripted,
    Combat,
}

impl EventCategory {
    /// Walk order of the weighted pick.
    pub const ALL: [EventCategory; 3] = [Self::Nothing, Self::Scripted, Self::Combat];
}

/// Picks the category of the next event from the configured base weights.
///
/// Categories without candidates on the current floor get weight zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EventScheduler {
    weights: SchedulerWeights,
}

impl EventScheduler {
    /// # Errors
    ///
    /// Rejects negative or non-finite weights.
    pub fn new(weights: SchedulerWeights) -> Result<Self, ConfigurationError> {
        for (category, weight) in [
            ("nothing", weights.nothing),
            ("scripted", weights.scripted),
            ("combat", weights.combat),
        ] {
            if !weight.is_finite() || weight < 0.0 {
                return Err(ConfigurationError::InvalidCategoryWeight { category });
            }
        }
        Ok(Self { weights })
    }

    pub fn weights(&self) -> SchedulerWeights {
        self.weights
    }

    /// Effective weights after availability masking, in walk order.
    pub fn effective_weights(&self, has_scripted: bool, has_combat: bool) -> [f64; 3] {
        [
            self.weights.nothing,
            if has_scripted { self.weights.scripted } else { 0.0 },
            if has_combat { self.weights.combat } else { 0.0 },
        ]
    }

    /// # Errors
    ///
    /// [`ConfigurationError::DegenerateCategoryWeights`] when every available
    /// category has weight zero.
    pub fn next_category(
        &self,
        has_scripted: bool,
        has_combat: bool,
        rng: &mut impl RandomSource,
    ) -> Result<EventCategory, ConfigurationError> {
        let weights = self.effective_weights(has_scripted, has_combat);
        let total: f64 = weights.iter().sum();
        if total <= 0.0 {
            return Err(ConfigurationError::DegenerateCategoryWeights);
        }
        let index = rng
            .weighted_index(&weights)
            .ok_or(ConfigurationError::DegenerateCategoryWeights)?;
        Ok(EventCategory::ALL[index])
    }
}

impl Default for EventScheduler {
    fn default() -> Self {
        Self {
            weights: SchedulerWeights::default(),
        }
    }
}
