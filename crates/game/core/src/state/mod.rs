//! Run-scoped state.
//!
//! [`RunState`] is the only thing a run mutates. The party is read-only
//! input; per-combatant status effects live only for one encounter.
mod daily;
mod party;
mod run;
mod status;

pub use daily::SuperRareDailyState;
pub use party::{PartyError, PartyMember, RuntimePartyState};
pub use run::{RunState, RunStatus, RunTotals};
pub use status::{ActiveStatus, ActiveStatuses, BERSERK_STATUS_ID, StatusTick};
