//! Active status effects on a combatant.
//!
//! Effects count down in turns. Every end of turn applies periodic damage,
//! decrements the counters and drops effects that reached zero.

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::config::ExplorationConfig;
use crate::env::{StatusEffectDefinition, StatusKind};

/// Status id logged for berserk self-confusion, which has no master record.
pub const BERSERK_STATUS_ID: u32 = 0;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActiveStatus {
    pub status_id: u32,
    pub kind: StatusKind,
    pub remaining_turns: u8,
    /// Periodic damage in percent of max HP.
    pub damage_percent: f64,
}

impl ActiveStatus {
    pub fn from_definition(definition: &StatusEffectDefinition) -> Self {
        Self {
            status_id: definition.id,
            kind: definition.kind,
            remaining_turns: definition.duration_turns,
            damage_percent: definition.damage_percent,
        }
    }

    pub const fn berserk(duration: u8) -> Self {
        Self {
            status_id: BERSERK_STATUS_ID,
            kind: StatusKind::Confusion,
            remaining_turns: duration,
            damage_percent: 0.0,
        }
    }
}

/// What happened to one effect during an end-of-turn tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatusTick {
    pub status_id: u32,
    pub kind: StatusKind,
    pub damage: u32,
    pub expired: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ActiveStatuses {
    effects: ArrayVec<ActiveStatus, { ExplorationConfig::MAX_STATUS_EFFECTS }>,
}

impl ActiveStatuses {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has(&self, kind: StatusKind) -> bool {
        self.effects.iter().any(|e| e.kind == kind)
    }

    pub fn prevents_action(&self) -> Option<StatusKind> {
        self.effects
            .iter()
            .map(|e| e.kind)
            .find(|kind| kind.prevents_action())
    }

    pub fn blocks_skills(&self) -> bool {
        self.effects.iter().any(|e| e.kind.blocks_skills())
    }

    pub fn is_confused(&self) -> bool {
        self.has(StatusKind::Confusion)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActiveStatus> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Applies an effect. Re-applying a kind refreshes its duration to the
    /// longer of the two.
    ///
    /// Returns `false` when the set is full and the effect was dropped.
    pub fn apply(&mut self, status: ActiveStatus) -> bool {
        if let Some(existing) = self.effects.iter_mut().find(|e| e.kind == status.kind) {
            existing.remaining_turns = existing.remaining_turns.max(status.remaining_turns);
            return true;
        }
        self.effects.try_push(status).is_ok()
    }

    /// Applies berserk confusion. No-op while already confused.
    ///
    /// Returns whether the effect was newly added.
    pub fn apply_berserk(&mut self, duration: u8) -> bool {
        if self.is_confused() || duration == 0 {
            return false;
        }
        self.effects.try_push(ActiveStatus::berserk(duration)).is_ok()
    }

    /// End-of-turn processing against a combatant with `max_hp`.
    pub fn tick(&mut self, max_hp: u32) -> Vec<StatusTick> {
        let mut ticks = Vec::with_capacity(self.effects.len());
        for effect in &mut self.effects {
            let damage = if effect.kind.is_periodic() && effect.damage_percent > 0.0 {
                let raw = (f64::from(max_hp) * effect.damage_percent / 100.0).round();
                raw.max(1.0) as u32
            } else {
                0
            };
            effect.remaining_turns = effect.remaining_turns.saturating_sub(1);
            ticks.push(StatusTick {
                status_id: effect.status_id,
                kind: effect.kind,
                damage,
                expired: effect.remaining_turns == 0,
            });
        }
        self.effects.retain(|e| e.remaining_turns > 0);
        ticks
    }
}
