//! Exploration state machine.
//!
//! The [`ExplorationEngine`] prepares a run from dungeon master data and then
//! resolves it one event at a time. It owns no state: the caller keeps the
//! [`RunState`] and passes it to every [`step`](ExplorationEngine::step),
//! which is what lets independent runs proceed concurrently and replay
//! deterministically.
//!
//! ```text
//! prepare ──> NotStarted ──step──> Running ──step──> Completed
//!                                     │
//!                                     ├── lost combat ──> Defeated
//!                                     └── caller ───────> Cancelled
//! ```

mod errors;
mod outcome;
mod scripted;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

pub use errors::{ConfigurationError, EngineError};
pub use outcome::{EventKind, EventLogEntry, StepOutcome};
pub use scripted::ScriptedPayload;

use crate::combat::{
    BattleResult, CombatResolver, Drop, DropContext, DropSource, Encounter, EncounteredEnemy,
};
use crate::config::ExplorationConfig;
use crate::env::{
    DungeonDefinition, EncounterEvent, FloorDefinition, MasterEnv, OracleError, RandomSource,
    ScriptedEventDefinition,
};
use crate::error::ErrorContext;
use crate::scheduler::{EventCategory, EventScheduler};
use crate::state::{RunState, RunStatus, RuntimePartyState, SuperRareDailyState};

/// Immutable plan of a run, built once by [`ExplorationEngine::prepare`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunConfiguration {
    pub dungeon: DungeonDefinition,
    /// Floors sorted by number, truncated to the target.
    pub floors: Vec<FloorDefinition>,
    /// Number of floors to clear, in `[1, available floors]`.
    pub target_floor: u32,
    pub events_per_floor: u32,
    /// Scripted events that may fire on each floor number.
    pub scripted_by_floor: BTreeMap<u32, Vec<ScriptedEventDefinition>>,
}

impl RunConfiguration {
    /// Total number of events a full run resolves.
    pub fn total_events(&self) -> u32 {
        self.target_floor.saturating_mul(self.events_per_floor)
    }

    pub fn scripted_for(&self, floor_number: u32) -> &[ScriptedEventDefinition] {
        self.scripted_by_floor
            .get(&floor_number)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// Stateless driver of exploration runs.
pub struct ExplorationEngine<'a> {
    env: MasterEnv<'a>,
    config: &'a ExplorationConfig,
    scheduler: EventScheduler,
}

impl<'a> ExplorationEngine<'a> {
    /// # Errors
    ///
    /// Rejects negative or non-finite scheduler weights.
    pub fn new(
        env: MasterEnv<'a>,
        config: &'a ExplorationConfig,
    ) -> Result<Self, ConfigurationError> {
        Ok(Self {
            env,
            config,
            scheduler: EventScheduler::new(config.scheduler)?,
        })
    }

    pub fn config(&self) -> &ExplorationConfig {
        self.config
    }

    /// Builds the run plan and a fresh run state seeded with `seed`.
    ///
    /// # Errors
    ///
    /// - [`OracleError::DungeonNotFound`] for an unknown dungeon
    /// - [`ConfigurationError::NoFloors`] for a dungeon without floors
    /// - [`ConfigurationError::InvalidLuckTable`] for a malformed luck table
    pub fn prepare(
        &self,
        dungeon_id: u32,
        target_floor: u32,
        daily: SuperRareDailyState,
        seed: u64,
    ) -> Result<(RunConfiguration, RunState), EngineError> {
        let context = ErrorContext::new().with_dungeon(dungeon_id);
        let located = |err: EngineError| err.at(context.clone());

        let dungeons = self.env.dungeons().map_err(|e| located(e.into()))?;
        let dungeon = dungeons
            .dungeon(dungeon_id)
            .ok_or(OracleError::DungeonNotFound(dungeon_id))
            .map_err(|e| located(e.into()))?;

        let mut floors = dungeons.floors(dungeon_id);
        if floors.is_empty() {
            return Err(located(ConfigurationError::NoFloors { dungeon_id }.into()));
        }
        floors.sort_by_key(|floor| floor.floor_number);
        let available = u32::try_from(floors.len()).unwrap_or(u32::MAX);
        if available != dungeon.floor_count {
            warn!(
                target: "delve::engine",
                dungeon_id,
                floor_count = dungeon.floor_count,
                defined_floors = available,
                "dungeon floor count disagrees with its floors; using the defined floors"
            );
        }
        let target_floor = target_floor.clamp(1, available);
        floors.truncate(target_floor as usize);

        self.env
            .tables()
            .map_err(|e| located(e.into()))?
            .luck_table()
            .validate()
            .map_err(|e| located(e.into()))?;

        let mut scripted_by_floor: BTreeMap<u32, Vec<ScriptedEventDefinition>> = BTreeMap::new();
        for event in dungeons.scripted_events(dungeon_id) {
            if event.weight_for(&dungeon) <= 0.0 {
                continue;
            }
            for floor in floors.iter().filter(|f| event.covers_floor(f.floor_number)) {
                scripted_by_floor
                    .entry(floor.floor_number)
                    .or_default()
                    .push(event.clone());
            }
        }

        let events_per_floor = dungeon.events_per_floor.max(1);
        info!(
            target: "delve::engine",
            dungeon_id,
            target_floor,
            events_per_floor,
            scripted_floors = scripted_by_floor.len(),
            "run prepared"
        );

        let plan = RunConfiguration {
            dungeon,
            floors,
            target_floor,
            events_per_floor,
            scripted_by_floor,
        };
        Ok((plan, RunState::new(seed, daily)))
    }

    /// Resolves the event at the current cursor and advances it.
    ///
    /// Returns `Ok(None)` once the run is over: the cursor passed the target
    /// floor, a combat was lost, or the caller cancelled.
    ///
    /// # Errors
    ///
    /// Configuration and master-data failures. The cursor, totals and daily
    /// state keep their pre-event values; nothing is retried.
    pub fn step(
        &self,
        plan: &RunConfiguration,
        state: &mut RunState,
        party: &RuntimePartyState,
    ) -> Result<Option<StepOutcome>, EngineError> {
        if state.status.is_terminal() {
            return Ok(None);
        }
        let Some(floor) = plan.floors.get(state.floor_index as usize).copied() else {
            self.complete(plan, state);
            return Ok(None);
        };
        state.status = RunStatus::Running;

        let context = ErrorContext::new()
            .with_dungeon(plan.dungeon.id)
            .with_cursor(floor.floor_number, state.event_index);
        let located = |err: EngineError| err.at(context.clone());

        let scripted = plan.scripted_for(floor.floor_number);
        let table = self
            .env
            .dungeons()
            .map_err(|e| located(e.into()))?
            .encounter_table(floor.encounter_table_id)
            .ok_or(OracleError::EncounterTableNotFound(floor.encounter_table_id))
            .map_err(|e| located(e.into()))?;
        let combat: Vec<&EncounterEvent> = table.combat_candidates().collect();

        let category = self
            .scheduler
            .next_category(!scripted.is_empty(), !combat.is_empty(), &mut state.rng)
            .map_err(|e| located(e.into()))?;

        let mut entry = EventLogEntry {
            sequence: state.totals.events_resolved,
            floor_number: floor.floor_number,
            event_index: state.event_index,
            kind: EventKind::Nothing,
            experience: 0,
            member_experience: BTreeMap::new(),
            gold: 0,
            drops: Vec::new(),
            applied_status_effects: Vec::new(),
        };
        let mut combat_summary = None;
        let mut battle_log = None;
        let mut should_terminate = false;
        // Committed back to the run only once the event resolved.
        let mut daily = state.daily;

        match category {
            EventCategory::Nothing => {}
            EventCategory::Scripted => {
                self.resolve_scripted(plan, scripted, state, &mut daily, party, &mut entry)
                    .map_err(located)?;
            }
            EventCategory::Combat => {
                let encounter = self
                    .materialize(plan, floor, table.id, &combat, state)
                    .map_err(located)?;
                let resolver = CombatResolver::new(self.env, self.config);
                let outcome = resolver
                    .resolve(&encounter, party, &mut daily, &mut state.rng)
                    .map_err(located)?;
                let summary = outcome.summary;

                entry.kind = EventKind::Combat {
                    enemy_ids: encounter.enemies.iter().map(|e| e.definition.id).collect(),
                    result: summary.result,
                };
                entry.experience = summary.rewards.total_experience;
                entry.member_experience = summary.rewards.per_member.clone();
                entry.gold = summary.rewards.gold;
                entry.drops = summary.drops.clone();
                should_terminate = summary.result.is_defeat();

                state.totals.combats += 1;
                if summary.result == BattleResult::Victory {
                    state.totals.victories += 1;
                }
                combat_summary = Some(summary);
                battle_log = Some(outcome.log);
            }
        }

        debug!(
            target: "delve::engine",
            floor = floor.floor_number,
            event = state.event_index,
            category = %category,
            experience = entry.experience,
            gold = entry.gold,
            drops = entry.drops.len(),
            "event resolved"
        );

        state.daily = daily;
        state.totals.events_resolved += 1;
        state.totals.experience = state.totals.experience.saturating_add(entry.experience);
        state.totals.gold = state.totals.gold.saturating_add(entry.gold);
        state.totals.drops = state
            .totals
            .drops
            .saturating_add(u32::try_from(entry.drops.len()).unwrap_or(u32::MAX));
        state.advance(plan.events_per_floor);

        if should_terminate {
            state.status = RunStatus::Defeated;
            info!(
                target: "delve::engine",
                dungeon_id = plan.dungeon.id,
                floor = floor.floor_number,
                events = state.totals.events_resolved,
                "party defeated"
            );
        } else if state.floor_index >= plan.target_floor {
            self.complete(plan, state);
        }

        Ok(Some(StepOutcome {
            entry,
            combat: combat_summary,
            battle_log,
            should_terminate,
            daily: state.daily,
        }))
    }

    fn complete(&self, plan: &RunConfiguration, state: &mut RunState) {
        if state.status.is_terminal() {
            return;
        }
        state.status = RunStatus::Completed;
        info!(
            target: "delve::engine",
            dungeon_id = plan.dungeon.id,
            floors = plan.target_floor,
            experience = state.totals.experience,
            gold = state.totals.gold,
            "run completed"
        );
    }

    fn resolve_scripted(
        &self,
        plan: &RunConfiguration,
        candidates: &[ScriptedEventDefinition],
        state: &mut RunState,
        daily: &mut SuperRareDailyState,
        party: &RuntimePartyState,
        entry: &mut EventLogEntry,
    ) -> Result<(), EngineError> {
        let weights: Vec<f64> = candidates
            .iter()
            .map(|event| event.weight_for(&plan.dungeon))
            .collect();
        let index = state
            .rng
            .weighted_index(&weights)
            .ok_or(ConfigurationError::EmptyWeightTable {
                context: "scripted events",
            })?;
        let event = &candidates[index];
        let payload = ScriptedPayload::parse(event)?;

        let items = self.env.items()?;
        let statuses = self.env.status()?;
        for status_id in &payload.status_effects {
            statuses
                .status_effect(*status_id)
                .ok_or(OracleError::StatusEffectNotFound(*status_id))?;
        }
        let resolved = payload
            .items
            .iter()
            .map(|id| items.definition(*id).ok_or(OracleError::ItemNotFound(*id)))
            .collect::<Result<Vec<_>, _>>()?;

        let drop_context = DropContext {
            recommended_level: plan.dungeon.recommended_level,
            floor_number: entry.floor_number,
        };
        for item in resolved {
            if item.is_super_rare() {
                if !daily.is_eligible(self.config.drops.super_rare_daily_limit) {
                    debug!(
                        target: "delve::engine",
                        item_id = item.id,
                        "super-rare scripted item withheld by daily limit"
                    );
                    continue;
                }
                daily.record();
            }
            entry.drops.push(Drop::new(
                &item,
                DropSource::Scripted { event_id: event.id },
                drop_context,
            ));
        }

        let experience = payload.scaled_experience(self.config.rewards.experience);
        for member in party.members().iter().filter(|m| m.stats.is_alive()) {
            entry.member_experience.insert(member.id, experience);
        }
        entry.experience = entry.member_experience.values().sum();
        entry.gold = payload.scaled_gold(self.config.rewards.gold);
        entry.applied_status_effects = payload.status_effects;
        entry.kind = EventKind::Scripted {
            event_id: event.id,
            name: event.name.clone(),
        };
        Ok(())
    }

    fn materialize(
        &self,
        plan: &RunConfiguration,
        floor: FloorDefinition,
        table_id: u32,
        candidates: &[&EncounterEvent],
        state: &mut RunState,
    ) -> Result<Encounter, EngineError> {
        let weights: Vec<f64> = candidates.iter().map(|e| e.spawn_weight()).collect();
        let index = state
            .rng
            .weighted_index(&weights)
            .ok_or(ConfigurationError::EmptyWeightTable {
                context: "encounter table",
            })?;
        let event = candidates[index];
        let enemy_id = event
            .enemy_id
            .ok_or(ConfigurationError::MissingEnemyReference { table_id })?;
        let definition = self
            .env
            .enemies()?
            .enemy(enemy_id)
            .ok_or(OracleError::EnemyNotFound(enemy_id))?;

        let max_group = ExplorationConfig::MAX_ENEMY_GROUP as i64;
        let low = i64::from(event.group_min).clamp(1, max_group);
        let high = i64::from(event.group_max).clamp(low, max_group);
        let size = state.rng.uniform_int(low, high);

        let enemies = (1..=size as u32)
            .map(|suffix| EncounteredEnemy {
                suffix,
                definition: definition.clone(),
                level: event.level,
            })
            .collect::<Vec<_>>();
        for enemy in &enemies {
            enemy.actor()?;
        }

        Ok(Encounter {
            enemies,
            context: DropContext {
                recommended_level: plan.dungeon.recommended_level,
                floor_number: floor.floor_number,
            },
        })
    }
}
