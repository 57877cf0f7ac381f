//! Combat stat snapshots.
//!
//! ```text
//! [ BaseStats (enemy templates) ] --at_level--> [ CombatStats ] <-- party snapshots
//! ```
//!
//! Party snapshots are computed by the character system outside this crate;
//! enemy snapshots are derived from base attributes by the enemy oracle.

pub mod core;
pub mod resistance;
pub mod snapshot;

pub use self::core::BaseStats;
pub use resistance::{Resistance, StatusResistances};
pub use snapshot::CombatStats;
