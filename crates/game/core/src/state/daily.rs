//! Super-rare drop gate.

use serde::{Deserialize, Serialize};

/// Number of super-rare drops awarded on a given day.
///
/// Owned by the caller and threaded through the run by value: every step
/// returns the updated state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SuperRareDailyState {
    /// Caller-defined day key, e.g. days since the epoch.
    pub day: u32,
    pub awarded: u32,
}

impl SuperRareDailyState {
    pub const fn new(day: u32) -> Self {
        Self { day, awarded: 0 }
    }

    /// Whether another super-rare drop may be awarded today.
    pub const fn is_eligible(&self, daily_limit: u32) -> bool {
        self.awarded < daily_limit
    }

    pub fn record(&mut self) {
        self.awarded = self.awarded.saturating_add(1);
    }

    /// Resets the counter when `day` differs from the tracked day.
    #[must_use]
    pub const fn roll_over(self, day: u32) -> Self {
        if self.day == day { self } else { Self::new(day) }
    }
}
