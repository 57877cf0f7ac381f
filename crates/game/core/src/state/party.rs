//! Party snapshot handed to the engine.
//!
//! The engine never mutates the party. Experience and survivor bookkeeping
//! come back as separate results.

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::config::ExplorationConfig;
use crate::error::{ErrorSeverity, GameError};
use crate::stats::CombatStats;

/// One character as seen by combat: a precomputed stat snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PartyMember {
    /// Character id; doubles as the ally actor reference, so it must lie in
    /// `1..ExplorationConfig::ACTOR_ID_LIMIT`.
    pub id: u32,
    pub level: u32,
    pub stats: CombatStats,
    #[serde(default)]
    pub skill_ids: Vec<u32>,
    #[serde(default)]
    pub skill_rate_percent: f64,
}

impl PartyMember {
    pub fn new(id: u32, level: u32, stats: CombatStats) -> Self {
        Self {
            id,
            level,
            stats,
            skill_ids: Vec::new(),
            skill_rate_percent: 0.0,
        }
    }

    #[must_use]
    pub fn with_skills(mut self, skill_ids: Vec<u32>, skill_rate_percent: f64) -> Self {
        self.skill_ids = skill_ids;
        self.skill_rate_percent = skill_rate_percent;
        self
    }
}

/// Ordered, non-empty party of at most [`ExplorationConfig::MAX_PARTY_SIZE`] members.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PartyMember>", into = "Vec<PartyMember>")]
pub struct RuntimePartyState {
    members: ArrayVec<PartyMember, { ExplorationConfig::MAX_PARTY_SIZE }>,
}

impl RuntimePartyState {
    /// # Errors
    ///
    /// Rejects empty or oversized parties, duplicate ids and ids that do not
    /// fit an ally actor reference.
    pub fn new(members: Vec<PartyMember>) -> Result<Self, PartyError> {
        if members.is_empty() {
            return Err(PartyError::Empty);
        }
        if members.len() > ExplorationConfig::MAX_PARTY_SIZE {
            return Err(PartyError::TooManyMembers {
                count: members.len(),
                max: ExplorationConfig::MAX_PARTY_SIZE,
            });
        }
        let mut slots = ArrayVec::new();
        for member in members {
            if member.id == 0 || member.id >= ExplorationConfig::ACTOR_ID_LIMIT {
                return Err(PartyError::IdOutOfRange(member.id));
            }
            if slots.iter().any(|m: &PartyMember| m.id == member.id) {
                return Err(PartyError::DuplicateMember(member.id));
            }
            slots.push(member);
        }
        Ok(Self { members: slots })
    }

    pub fn members(&self) -> &[PartyMember] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn member(&self, id: u32) -> Option<&PartyMember> {
        self.members.iter().find(|m| m.id == id)
    }
}

impl TryFrom<Vec<PartyMember>> for RuntimePartyState {
    type Error = PartyError;

    fn try_from(members: Vec<PartyMember>) -> Result<Self, Self::Error> {
        Self::new(members)
    }
}

impl From<RuntimePartyState> for Vec<PartyMember> {
    fn from(party: RuntimePartyState) -> Self {
        party.members.into_iter().collect()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PartyError {
    #[error("party has no members")]
    Empty,

    #[error("party has {count} members (max: {max})")]
    TooManyMembers { count: usize, max: usize },

    #[error("character id {0} does not fit the actor reference format")]
    IdOutOfRange(u32),

    #[error("character {0} appears twice in the party")]
    DuplicateMember(u32),
}

impl GameError for PartyError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Empty => "PARTY_EMPTY",
            Self::TooManyMembers { .. } => "PARTY_TOO_MANY_MEMBERS",
            Self::IdOutOfRange(_) => "PARTY_ID_OUT_OF_RANGE",
            Self::DuplicateMember(_) => "PARTY_DUPLICATE_MEMBER",
        }
    }
}
