//! Status resistances.
//!
//! Resistance scales the chance of a status effect landing on a target; it
//! never changes the effect itself once applied.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::env::StatusKind;

/// Resistance tier of a combatant against one status kind.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Resistance {
    Immune,
    Resistant,
    #[default]
    Neutral,
    Vulnerable,
}

impl Resistance {
    /// Multiplier applied to the scaled base chance.
    pub const fn factor(self) -> f64 {
        match self {
            Self::Immune => 0.0,
            Self::Resistant => 0.5,
            Self::Neutral => 1.0,
            Self::Vulnerable => 1.5,
        }
    }
}

/// Per-kind resistances; kinds without an entry are neutral.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusResistances(BTreeMap<StatusKind, Resistance>);

impl StatusResistances {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, kind: StatusKind, resistance: Resistance) -> Self {
        self.0.insert(kind, resistance);
        self
    }

    pub fn get(&self, kind: StatusKind) -> Resistance {
        self.0.get(&kind).copied().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factors_follow_tiers() {
        assert_eq!(Resistance::Immune.factor(), 0.0);
        assert_eq!(Resistance::Resistant.factor(), 0.5);
        assert_eq!(Resistance::Neutral.factor(), 1.0);
        assert_eq!(Resistance::Vulnerable.factor(), 1.5);
    }

    #[test]
    fn missing_kinds_are_neutral() {
        let resistances = StatusResistances::new().with(StatusKind::Poison, Resistance::Immune);
        assert_eq!(resistances.get(StatusKind::Poison), Resistance::Immune);
        assert_eq!(resistances.get(StatusKind::Sleep), Resistance::Neutral);
    }
}
