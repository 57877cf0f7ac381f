//! Compact battle log.
//!
//! Every decision of an encounter becomes one fixed-width [`BattleLogEntry`].
//! Persisted logs are decoded by later versions, so [`LogTemplate`] values are
//! assigned once and never reused. Gaps between groups are reserved.
//!
//! # Record layout (19 bytes, little endian)
//!
//! ```text
//! offset  size  field
//!      0     1  turn
//!      1     2  template id
//!      3     4  actor reference
//!      7     4  target reference
//!     11     4  signed value
//!     15     4  skill / status / item reference (0 = none)
//! ```
//!
//! # Actor references
//!
//! Allies use their character id. Enemies pack `suffix * 1000 + enemy_id`,
//! where the suffix is the 1-based order of the enemy in the encounter.
//! Enemy and character ids must therefore stay below 1000, and the suffix
//! below `u32::MAX / 1000`. Reference 0 means "no actor".

use serde::{Deserialize, Serialize};

use crate::config::ExplorationConfig;
use crate::error::{ErrorSeverity, GameError};

/// Stable numbering of battle log templates.
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
    strum::AsRefStr,
    strum::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
#[repr(u16)]
pub enum LogTemplate {
    // ===== encounter flow: 1..=19 =====
    BattleStart = 1,
    TurnStart = 2,
    Victory = 8,
    Defeat = 9,
    Retreat = 10,

    // ===== actions: 20..=39 =====
    Attack = 20,
    SkillUse = 21,
    Miss = 22,
    Hit = 23,
    CriticalHit = 24,
    ActionSkipped = 25,

    // ===== status effects: 40..=59 =====
    StatusApplied = 40,
    StatusResisted = 41,
    StatusTick = 42,
    StatusExpired = 43,
    BerserkTriggered = 44,

    // ===== outcomes: 60..=79 =====
    Defeated = 60,
    ExperienceGained = 61,
    GoldGained = 62,
    ItemDropped = 63,
    SuperRareDropped = 64,
}

impl LogTemplate {
    pub const fn id(self) -> u16 {
        self as u16
    }

    pub const fn from_id(id: u16) -> Option<Self> {
        Some(match id {
            1 => Self::BattleStart,
            2 => Self::TurnStart,
            8 => Self::Victory,
            9 => Self::Defeat,
            10 => Self::Retreat,
            20 => Self::Attack,
            21 => Self::SkillUse,
            22 => Self::Miss,
            23 => Self::Hit,
            24 => Self::CriticalHit,
            25 => Self::ActionSkipped,
            40 => Self::StatusApplied,
            41 => Self::StatusResisted,
            42 => Self::StatusTick,
            43 => Self::StatusExpired,
            44 => Self::BerserkTriggered,
            60 => Self::Defeated,
            61 => Self::ExperienceGained,
            62 => Self::GoldGained,
            63 => Self::ItemDropped,
            64 => Self::SuperRareDropped,
            _ => return None,
        })
    }
}

/// Decoded actor reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorRef {
    Ally { character_id: u32 },
    Enemy { suffix: u32, enemy_id: u32 },
}

impl ActorRef {
    const SUFFIX_BASE: u32 = ExplorationConfig::ACTOR_ID_LIMIT;

    pub const fn ally(character_id: u32) -> Self {
        Self::Ally { character_id }
    }

    pub const fn enemy(suffix: u32, enemy_id: u32) -> Self {
        Self::Enemy { suffix, enemy_id }
    }

    /// Packs the reference into its persisted integer form.
    ///
    /// # Errors
    ///
    /// Fails when an id does not fit below 1000 or the suffix overflows.
    pub fn encode(self) -> Result<u32, ActorRefError> {
        match self {
            Self::Ally { character_id } => {
                if character_id == 0 || character_id >= Self::SUFFIX_BASE {
                    return Err(ActorRefError::IdOutOfRange(character_id));
                }
                Ok(character_id)
            }
            Self::Enemy { suffix, enemy_id } => {
                if enemy_id >= Self::SUFFIX_BASE {
                    return Err(ActorRefError::IdOutOfRange(enemy_id));
                }
                if suffix == 0 {
                    return Err(ActorRefError::InvalidSuffix(suffix));
                }
                suffix
                    .checked_mul(Self::SUFFIX_BASE)
                    .and_then(|packed| packed.checked_add(enemy_id))
                    .ok_or(ActorRefError::InvalidSuffix(suffix))
            }
        }
    }

    /// Unpacks a persisted reference; 0 decodes to `None`.
    pub const fn decode(packed: u32) -> Option<Self> {
        if packed == 0 {
            None
        } else if packed < Self::SUFFIX_BASE {
            Some(Self::Ally {
                character_id: packed,
            })
        } else {
            Some(Self::Enemy {
                suffix: packed / Self::SUFFIX_BASE,
                enemy_id: packed % Self::SUFFIX_BASE,
            })
        }
    }

    pub const fn is_ally(self) -> bool {
        matches!(self, Self::Ally { .. })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActorRefError {
    #[error("id {0} does not fit below the actor reference base")]
    IdOutOfRange(u32),

    #[error("enemy suffix {0} cannot be packed")]
    InvalidSuffix(u32),
}

impl GameError for ActorRefError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::IdOutOfRange(_) => "ACTOR_REF_ID_OUT_OF_RANGE",
            Self::InvalidSuffix(_) => "ACTOR_REF_INVALID_SUFFIX",
        }
    }
}

/// One fixed-width battle log record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BattleLogEntry {
    pub turn: u8,
    pub template: LogTemplate,
    /// Packed actor reference, 0 for none.
    pub actor: u32,
    /// Packed target reference, 0 for none.
    pub target: u32,
    pub value: i32,
    /// Skill, status effect or item id depending on the template, 0 for none.
    pub reference: u32,
}

impl BattleLogEntry {
    pub const ENCODED_LEN: usize = 19;

    pub const fn new(turn: u8, template: LogTemplate) -> Self {
        Self {
            turn,
            template,
            actor: 0,
            target: 0,
            value: 0,
            reference: 0,
        }
    }

    #[must_use]
    pub const fn actor(mut self, actor: u32) -> Self {
        self.actor = actor;
        self
    }

    #[must_use]
    pub const fn target(mut self, target: u32) -> Self {
        self.target = target;
        self
    }

    /// Sets the value, saturating into `i32`.
    #[must_use]
    pub fn value(mut self, value: impl TryInto<i32>) -> Self {
        self.value = value.try_into().unwrap_or(i32::MAX);
        self
    }

    #[must_use]
    pub const fn reference(mut self, reference: u32) -> Self {
        self.reference = reference;
        self
    }

    pub const fn actor_ref(&self) -> Option<ActorRef> {
        ActorRef::decode(self.actor)
    }

    pub const fn target_ref(&self) -> Option<ActorRef> {
        ActorRef::decode(self.target)
    }

    pub fn to_bytes(&self) -> [u8; Self::ENCODED_LEN] {
        let mut bytes = [0u8; Self::ENCODED_LEN];
        bytes[0] = self.turn;
        bytes[1..3].copy_from_slice(&self.template.id().to_le_bytes());
        bytes[3..7].copy_from_slice(&self.actor.to_le_bytes());
        bytes[7..11].copy_from_slice(&self.target.to_le_bytes());
        bytes[11..15].copy_from_slice(&self.value.to_le_bytes());
        bytes[15..19].copy_from_slice(&self.reference.to_le_bytes());
        bytes
    }

    /// # Errors
    ///
    /// Fails on a short or long buffer and on template ids this version does
    /// not know.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, LogDecodeError> {
        let bytes: &[u8; Self::ENCODED_LEN] =
            bytes.try_into().map_err(|_| LogDecodeError::WrongLength {
                expected: Self::ENCODED_LEN,
                actual: bytes.len(),
            })?;
        let template_id = u16::from_le_bytes([bytes[1], bytes[2]]);
        let template =
            LogTemplate::from_id(template_id).ok_or(LogDecodeError::UnknownTemplate(template_id))?;
        let word = |at: usize| [bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]];
        Ok(Self {
            turn: bytes[0],
            template,
            actor: u32::from_le_bytes(word(3)),
            target: u32::from_le_bytes(word(7)),
            value: i32::from_le_bytes(word(11)),
            reference: u32::from_le_bytes(word(15)),
        })
    }
}

/// Encodes a whole log as consecutive records.
pub fn encode_log(entries: &[BattleLogEntry]) -> Vec<u8> {
    entries.iter().flat_map(|entry| entry.to_bytes()).collect()
}

/// Decodes consecutive records.
///
/// # Errors
///
/// Fails when the buffer is not a whole number of records or holds an
/// unknown template.
pub fn decode_log(bytes: &[u8]) -> Result<Vec<BattleLogEntry>, LogDecodeError> {
    if bytes.len() % BattleLogEntry::ENCODED_LEN != 0 {
        return Err(LogDecodeError::WrongLength {
            expected: bytes.len().next_multiple_of(BattleLogEntry::ENCODED_LEN),
            actual: bytes.len(),
        });
    }
    bytes
        .chunks_exact(BattleLogEntry::ENCODED_LEN)
        .map(BattleLogEntry::from_bytes)
        .collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LogDecodeError {
    #[error("battle log record has {actual} bytes (expected {expected})")]
    WrongLength { expected: usize, actual: usize },

    #[error("unknown battle log template {0}")]
    UnknownTemplate(u16),
}

impl GameError for LogDecodeError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::WrongLength { .. } => "LOG_WRONG_LENGTH",
            Self::UnknownTemplate(_) => "LOG_UNKNOWN_TEMPLATE",
        }
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn template_ids_are_frozen() {
        let expected: [(LogTemplate, u16); 21] = [
            (LogTemplate::BattleStart, 1),
            (LogTemplate::TurnStart, 2),
            (LogTemplate::Victory, 8),
            (LogTemplate::Defeat, 9),
            (LogTemplate::Retreat, 10),
            (LogTemplate::Attack, 20),
            (LogTemplate::SkillUse, 21),
            (LogTemplate::Miss, 22),
            (LogTemplate::Hit, 23),
            (LogTemplate::CriticalHit, 24),
            (LogTemplate::ActionSkipped, 25),
            (LogTemplate::StatusApplied, 40),
            (LogTemplate::StatusResisted, 41),
            (LogTemplate::StatusTick, 42),
            (LogTemplate::StatusExpired, 43),
            (LogTemplate::BerserkTriggered, 44),
            (LogTemplate::Defeated, 60),
            (LogTemplate::ExperienceGained, 61),
            (LogTemplate::GoldGained, 62),
            (LogTemplate::ItemDropped, 63),
            (LogTemplate::SuperRareDropped, 64),
        ];
        for (template, id) in expected {
            assert_eq!(template.id(), id, "{template}");
        }
        assert_eq!(LogTemplate::iter().count(), expected.len());
    }

    #[test]
    fn every_template_id_decodes_to_itself() {
        for template in LogTemplate::iter() {
            assert_eq!(LogTemplate::from_id(template.id()), Some(template));
        }
        for reserved in [0, 3, 7, 11, 19, 26, 39, 45, 65, u16::MAX] {
            assert_eq!(LogTemplate::from_id(reserved), None);
        }
    }

    #[test]
    fn enemy_reference_packs_suffix_and_id() {
        let packed = ActorRef::enemy(3, 42).encode().unwrap();
        assert_eq!(packed, 3042);
        assert_eq!(ActorRef::decode(3042), Some(ActorRef::enemy(3, 42)));
        assert_eq!(ActorRef::decode(7), Some(ActorRef::ally(7)));
        assert_eq!(ActorRef::decode(0), None);
        assert_eq!(ActorRef::decode(1000), Some(ActorRef::enemy(1, 0)));
    }

    #[test]
    fn out_of_range_references_are_rejected() {
        assert_eq!(
            ActorRef::enemy(1, 1000).encode(),
            Err(ActorRefError::IdOutOfRange(1000))
        );
        assert_eq!(ActorRef::ally(1000).encode(), Err(ActorRefError::IdOutOfRange(1000)));
        assert_eq!(ActorRef::enemy(0, 5).encode(), Err(ActorRefError::InvalidSuffix(0)));
        assert_eq!(
            ActorRef::enemy(u32::MAX / 1000 + 1, 5).encode(),
            Err(ActorRefError::InvalidSuffix(u32::MAX / 1000 + 1))
        );
    }

    #[test]
    fn record_layout_is_fixed() {
        let entry = BattleLogEntry::new(3, LogTemplate::CriticalHit)
            .actor(2)
            .target(1042)
            .value(-5)
            .reference(77);
        let bytes = entry.to_bytes();
        assert_eq!(
            hex::encode(bytes),
            "0318000200000012040000fbffffff4d000000"
        );
        assert_eq!(BattleLogEntry::from_bytes(&bytes), Ok(entry));
        assert_eq!(entry.target_ref(), Some(ActorRef::enemy(1, 42)));
    }

    #[test]
    fn decoding_rejects_bad_input() {
        assert_eq!(
            BattleLogEntry::from_bytes(&[0u8; 18]),
            Err(LogDecodeError::WrongLength {
                expected: 19,
                actual: 18
            })
        );
        let mut bytes = BattleLogEntry::new(1, LogTemplate::Hit).to_bytes();
        bytes[1] = 5;
        assert_eq!(
            BattleLogEntry::from_bytes(&bytes),
            Err(LogDecodeError::UnknownTemplate(5))
        );
        assert!(decode_log(&[0u8; 20]).is_err());
    }

    #[test]
    fn whole_logs_concatenate_records() {
        let entries = [
            BattleLogEntry::new(0, LogTemplate::BattleStart).value(2),
            BattleLogEntry::new(1, LogTemplate::Miss).actor(4).target(2001),
        ];
        let bytes = encode_log(&entries);
        assert_eq!(bytes.len(), 2 * BattleLogEntry::ENCODED_LEN);
        assert_eq!(decode_log(&bytes).unwrap(), entries);
    }

    #[test]
    fn large_values_saturate() {
        let entry = BattleLogEntry::new(1, LogTemplate::GoldGained).value(u64::MAX);
        assert_eq!(entry.value, i32::MAX);
    }
}
