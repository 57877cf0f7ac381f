//! Deterministic dungeon exploration and combat rules.
//!
//! `delve-core` turns a seed, read-only master data and a party snapshot into
//! a reproducible sequence of exploration events. It performs no I/O: master
//! data arrives through the oracle traits in [`env`], randomness through a
//! [`RandomSource`], and every result is plain serializable data.
//!
//! Runs are driven by [`ExplorationEngine`]: `prepare` builds the plan and
//! `step` resolves one event at a time, delegating fights to
//! [`CombatResolver`].
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod replay;
pub mod reward;
pub mod scheduler;
pub mod state;
pub mod stats;

pub use combat::{
    ActorRef, BattleLogEntry, BattleResult, BattleRewards, CombatOutcome, CombatResolver,
    CombatSummary, Drop, DropSource, Encounter, EncounterFlags, EncounteredEnemy, LogTemplate,
    decode_log, encode_log,
};
pub use config::{CombatRules, DropRules, ExplorationConfig, RewardScales, SchedulerWeights};
pub use engine::{
    ConfigurationError, EngineError, EventKind, EventLogEntry, ExplorationEngine,
    RunConfiguration, ScriptedPayload, StepOutcome,
};
pub use env::{
    DungeonDefinition, DungeonOracle, EncounterEvent, EncounterKind, EncounterTableDefinition,
    EnemyDefinition, EnemyOracle, Env, FloorDefinition, ItemDefinition, ItemOracle, ItemRarity,
    LuckBand, LuckTable, MasterDataSnapshot, MasterEnv, OracleError, PcgRandom, RandomSource,
    ScriptedEventDefinition, SkillDefinition, SnapshotError, StatusEffectDefinition, StatusKind,
    StatusOracle, TablesOracle,
};
pub use error::{ErrorContext, ErrorSeverity, GameError};
pub use replay::{battle_log_digest, outcome_digest};
pub use scheduler::{EventCategory, EventScheduler};
pub use state::{
    PartyError, PartyMember, RunState, RunStatus, RunTotals, RuntimePartyState,
    SuperRareDailyState,
};
pub use stats::{BaseStats, CombatStats, Resistance, StatusResistances};
