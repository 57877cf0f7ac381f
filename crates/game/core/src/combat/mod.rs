//! Combat resolution system.
//!
//! The numeric model is a set of pure functions (hit, damage, status); the
//! [`CombatResolver`] drives them through turns and records every decision
//! in the battle log.
//!
//! # Core Functions
//!
//! - `hit_chance`: accuracy vs evasion with luck, decay and bounds
//! - `calculate_damage`: attack vs defense with variance and critical
//! - `status_chance_percent`: resistance-scaled status application
//! - `roll_enemy_drops`: drop rolls gated by the super-rare daily limit

pub mod damage;
pub mod drops;
pub mod hit;
pub mod log;
pub mod outcome;
pub mod resolver;
pub mod status;

pub use damage::{apply_damage, calculate_damage, critical_chance_percent, roll_damage};
pub use drops::{Drop, DropContext, DropSource, roll_enemy_drops};
pub use hit::{HitBounds, HitInput, base_hit_ratio, hit_accuracy_modifier, hit_chance, roll_hit};
pub use log::{
    ActorRef, ActorRefError, BattleLogEntry, LogDecodeError, LogTemplate, decode_log, encode_log,
};
pub use outcome::{
    BattleResult, BattleRewards, CombatOutcome, CombatSummary, EncounterFlags, EnemySummary,
};
pub use resolver::{CombatResolver, Encounter, EncounteredEnemy};
pub use status::{berserk_chance_percent, roll_percent, status_chance_percent};
