//! Status effect definitions and oracle interface.

use serde::{Deserialize, Serialize};

pub trait StatusOracle: Send + Sync {
    fn status_effect(&self, id: u32) -> Option<StatusEffectDefinition>;
}

/// Master-data record for a status effect.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StatusEffectDefinition {
    pub id: u32,
    pub name: String,
    pub kind: StatusKind,
    pub duration_turns: u8,
    /// Damage dealt every turn, in percent of the afflicted combatant's max HP.
    #[serde(default)]
    pub damage_percent: f64,
}

/// Behavioural family of a status effect.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum StatusKind {
    /// Damage over time.
    Poison,
    /// Damage over time.
    Burn,
    /// Skips actions.
    Sleep,
    /// Skips actions.
    Paralysis,
    /// Skips actions.
    Petrify,
    /// Blocks skills; basic attacks still allowed.
    Silence,
    /// Targets are picked from every living combatant.
    Confusion,
}

impl StatusKind {
    /// Whether an afflicted combatant loses its action.
    pub const fn prevents_action(self) -> bool {
        matches!(self, Self::Sleep | Self::Paralysis | Self::Petrify)
    }

    pub const fn blocks_skills(self) -> bool {
        matches!(self, Self::Silence)
    }

    pub const fn is_periodic(self) -> bool {
        matches!(self, Self::Poison | Self::Burn)
    }
}
