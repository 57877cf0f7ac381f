//! Oracle access errors.
//!
//! Errors related to oracle availability and master-data lookups. Every
//! not-found variant is the "master data missing" failure of a run.

use crate::error::{ErrorSeverity, GameError};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum OracleError {
    /// DungeonOracle is not available in the environment.
    #[error("DungeonOracle not available")]
    DungeonsNotAvailable,

    /// ItemOracle is not available in the environment.
    #[error("ItemOracle not available")]
    ItemsNotAvailable,

    /// StatusOracle is not available in the environment.
    #[error("StatusOracle not available")]
    StatusNotAvailable,

    /// EnemyOracle is not available in the environment.
    #[error("EnemyOracle not available")]
    EnemiesNotAvailable,

    /// TablesOracle is not available in the environment.
    #[error("TablesOracle not available")]
    TablesNotAvailable,

    #[error("dungeon {0} not found")]
    DungeonNotFound(u32),

    #[error("encounter table {0} not found")]
    EncounterTableNotFound(u32),

    #[error("item {0} not found")]
    ItemNotFound(u32),

    #[error("status effect {0} not found")]
    StatusEffectNotFound(u32),

    #[error("enemy {0} not found")]
    EnemyNotFound(u32),

    #[error("combat stats for enemy {enemy_id} at level {level} not found")]
    EnemyStatsNotFound { enemy_id: u32, level: u32 },

    #[error("skill {0} not found")]
    SkillNotFound(u32),
}

impl GameError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        // Both a missing oracle and a dangling id leave the run without data.
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        use OracleError::*;
        match self {
            DungeonsNotAvailable => "ORACLE_DUNGEONS_NOT_AVAILABLE",
            ItemsNotAvailable => "ORACLE_ITEMS_NOT_AVAILABLE",
            StatusNotAvailable => "ORACLE_STATUS_NOT_AVAILABLE",
            EnemiesNotAvailable => "ORACLE_ENEMIES_NOT_AVAILABLE",
            TablesNotAvailable => "ORACLE_TABLES_NOT_AVAILABLE",
            DungeonNotFound(_) => "MASTER_DUNGEON_NOT_FOUND",
            EncounterTableNotFound(_) => "MASTER_ENCOUNTER_TABLE_NOT_FOUND",
            ItemNotFound(_) => "MASTER_ITEM_NOT_FOUND",
            StatusEffectNotFound(_) => "MASTER_STATUS_EFFECT_NOT_FOUND",
            EnemyNotFound(_) => "MASTER_ENEMY_NOT_FOUND",
            EnemyStatsNotFound { .. } => "MASTER_ENEMY_STATS_NOT_FOUND",
            SkillNotFound(_) => "MASTER_SKILL_NOT_FOUND",
        }
    }
}
