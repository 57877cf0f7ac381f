//! Error types surfaced by `prepare` and `step`.
//!
//! Nothing here is retried. Configuration and master-data failures end the
//! run; party validation failures are rejected before the run starts.

use crate::env::OracleError;
use crate::error::{ErrorContext, ErrorSeverity, GameError};
use crate::state::PartyError;

/// Dungeon or tunable data that cannot drive a run.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("dungeon {dungeon_id} defines no floors")]
    NoFloors { dungeon_id: u32 },

    #[error("event category weights sum to zero or less")]
    DegenerateCategoryWeights,

    #[error("event category weight {category} is negative or not finite")]
    InvalidCategoryWeight { category: &'static str },

    #[error("scripted event {event_id} has a malformed payload: {reason}")]
    MalformedScriptedPayload { event_id: u32, reason: String },

    #[error("weight table for {context} is empty")]
    EmptyWeightTable { context: &'static str },

    #[error("combat entry in encounter table {table_id} names no enemy")]
    MissingEnemyReference { table_id: u32 },

    #[error("enemy id {0} does not fit the actor reference format")]
    EnemyIdOutOfRange(u32),

    #[error("invalid luck table: {0}")]
    InvalidLuckTable(&'static str),
}

impl GameError for ConfigurationError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NoFloors { .. } => "CONFIG_NO_FLOORS",
            Self::DegenerateCategoryWeights => "CONFIG_DEGENERATE_CATEGORY_WEIGHTS",
            Self::InvalidCategoryWeight { .. } => "CONFIG_INVALID_CATEGORY_WEIGHT",
            Self::MalformedScriptedPayload { .. } => "CONFIG_MALFORMED_SCRIPTED_PAYLOAD",
            Self::EmptyWeightTable { .. } => "CONFIG_EMPTY_WEIGHT_TABLE",
            Self::MissingEnemyReference { .. } => "CONFIG_MISSING_ENEMY_REFERENCE",
            Self::EnemyIdOutOfRange(_) => "CONFIG_ENEMY_ID_OUT_OF_RANGE",
            Self::InvalidLuckTable(_) => "CONFIG_INVALID_LUCK_TABLE",
        }
    }
}

/// Failure of an exploration call.
///
/// Display strings lead with the diagnostic a content author should see:
/// "dungeon data invalid" or "master data missing".
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum EngineError {
    #[error("dungeon data invalid: {source}")]
    Configuration {
        source: ConfigurationError,
        context: ErrorContext,
    },

    #[error("master data missing: {source}")]
    MasterDataNotFound {
        source: OracleError,
        context: ErrorContext,
    },

    #[error("invalid party: {0}")]
    InvalidParty(#[from] PartyError),
}

impl EngineError {
    /// Pins the error to a run position, keeping any context already set.
    #[must_use]
    pub fn at(self, context: ErrorContext) -> Self {
        match self {
            Self::Configuration { source, context: old } if old == ErrorContext::default() => {
                Self::Configuration { source, context }
            }
            Self::MasterDataNotFound { source, context: old } if old == ErrorContext::default() => {
                Self::MasterDataNotFound { source, context }
            }
            other => other,
        }
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration { .. })
    }

    pub fn is_master_data_not_found(&self) -> bool {
        matches!(self, Self::MasterDataNotFound { .. })
    }
}

impl From<ConfigurationError> for EngineError {
    fn from(source: ConfigurationError) -> Self {
        Self::Configuration {
            source,
            context: ErrorContext::default(),
        }
    }
}

impl From<OracleError> for EngineError {
    fn from(source: OracleError) -> Self {
        Self::MasterDataNotFound {
            source,
            context: ErrorContext::default(),
        }
    }
}

impl GameError for EngineError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Configuration { source, .. } => source.severity(),
            Self::MasterDataNotFound { source, .. } => source.severity(),
            Self::InvalidParty(err) => err.severity(),
        }
    }

    fn context(&self) -> Option<&ErrorContext> {
        match self {
            Self::Configuration { context, .. } | Self::MasterDataNotFound { context, .. } => {
                Some(context)
            }
            Self::InvalidParty(_) => None,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Configuration { source, .. } => source.error_code(),
            Self::MasterDataNotFound { source, .. } => source.error_code(),
            Self::InvalidParty(err) => err.error_code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversions_classify_failures() {
        let err: EngineError = ConfigurationError::NoFloors { dungeon_id: 4 }.into();
        assert!(err.is_configuration());
        assert_eq!(err.error_code(), "CONFIG_NO_FLOORS");
        assert!(err.to_string().starts_with("dungeon data invalid"));

        let err: EngineError = OracleError::ItemNotFound(9).into();
        assert!(err.is_master_data_not_found());
        assert!(err.severity().is_fatal());
        assert!(err.to_string().starts_with("master data missing"));
    }

    #[test]
    fn context_is_attached_once() {
        let first = ErrorContext::new().with_dungeon(1).with_cursor(2, 0);
        let second = ErrorContext::new().with_dungeon(7);
        let err = EngineError::from(OracleError::EnemyNotFound(3))
            .at(first.clone())
            .at(second);
        assert_eq!(err.context(), Some(&first));
    }
}
