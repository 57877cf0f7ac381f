//! Replay digests.
//!
//! A run is fully determined by its seed, master data and party, so two
//! executions can be compared by hashing what they produced. Callers store the
//! digest next to the seed and re-run to audit a result.

use sha2::{Digest, Sha256};

use crate::combat::{BattleLogEntry, encode_log};
use crate::engine::StepOutcome;

/// SHA-256 over the bincode encoding of every step outcome, in order.
///
/// Order matters: the same outcomes in a different order hash differently.
pub fn outcome_digest(outcomes: &[StepOutcome]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    for outcome in outcomes {
        // bincode is deterministic for these types; an encoding failure would
        // hash identically on every replay, so it is skipped.
        if let Ok(bytes) = bincode::serialize(outcome) {
            hasher.update(&bytes);
        }
    }
    hasher.finalize().into()
}

/// SHA-256 over the packed binary battle log.
pub fn battle_log_digest(log: &[BattleLogEntry]) -> [u8; 32] {
    Sha256::digest(encode_log(log)).into()
}
