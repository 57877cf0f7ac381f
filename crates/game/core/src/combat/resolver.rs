//! Turn-based resolution of one encounter.
//!
//! # Turn structure
//!
//! ```text
//! for turn in 1..=max_turns:
//!     order = living combatants by speed desc, allies first on ties, then slot
//!     for each combatant in order:
//!         skip if incapacitated
//!         roll berserk confusion
//!         pick skill or basic attack, pick target
//!         per hit: hit roll -> critical roll -> damage -> status roll
//!     end of turn: status ticks for every living combatant
//! ```
//!
//! The encounter ends as soon as one side has nobody standing. Every random
//! decision draws from the run's generator in this fixed order, so identical
//! seeds replay identical battles.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::damage::{apply_damage, roll_damage, stat_pair};
use super::drops::{DropContext, roll_enemy_drops};
use super::hit::{HitBounds, HitInput, roll_hit};
use super::log::{ActorRef, BattleLogEntry, LogTemplate};
use super::outcome::{
    BattleResult, BattleRewards, CombatOutcome, CombatSummary, EncounterFlags, EnemySummary,
};
use super::status::{berserk_chance_percent, roll_percent, status_chance_percent};
use crate::config::{CombatRules, ExplorationConfig};
use crate::engine::{ConfigurationError, EngineError};
use crate::env::{
    DamageKind, EnemyDefinition, LuckTable, MasterEnv, OracleError, RandomSource, SkillDefinition,
    SkillStatus, StatusOracle,
};
use crate::reward::{DefeatedEnemy, experience_for_member, gold_for_party};
use crate::state::{
    ActiveStatus, ActiveStatuses, BERSERK_STATUS_ID, RuntimePartyState, SuperRareDailyState,
};
use crate::stats::CombatStats;

/// Enemy materialized for one combat event and discarded afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EncounteredEnemy {
    /// 1-based order within the encounter.
    pub suffix: u32,
    pub definition: EnemyDefinition,
    pub level: u32,
}

impl EncounteredEnemy {
    /// Packed actor reference of this enemy.
    ///
    /// # Errors
    ///
    /// [`ConfigurationError::EnemyIdOutOfRange`] when the id cannot be packed.
    pub fn actor(&self) -> Result<u32, ConfigurationError> {
        ActorRef::enemy(self.suffix, self.definition.id)
            .encode()
            .map_err(|_| ConfigurationError::EnemyIdOutOfRange(self.definition.id))
    }
}

/// Everything a combat event hands to the resolver.
#[derive(Clone, Debug, PartialEq)]
pub struct Encounter {
    pub enemies: Vec<EncounteredEnemy>,
    pub context: DropContext,
}

/// Resolves encounters against read-only master data.
pub struct CombatResolver<'a> {
    env: MasterEnv<'a>,
    config: &'a ExplorationConfig,
}

impl<'a> CombatResolver<'a> {
    pub fn new(env: MasterEnv<'a>, config: &'a ExplorationConfig) -> Self {
        Self { env, config }
    }

    /// Fights `encounter` to a result.
    ///
    /// `daily` is updated when a super-rare item drops.
    ///
    /// # Errors
    ///
    /// Master-data lookups (enemy stats, skills, status effects, items) that
    /// fail abort the encounter.
    pub fn resolve(
        &self,
        encounter: &Encounter,
        party: &RuntimePartyState,
        daily: &mut SuperRareDailyState,
        rng: &mut impl RandomSource,
    ) -> Result<CombatOutcome, EngineError> {
        let enemies_oracle = self.env.enemies()?;
        let mut combatants = Vec::with_capacity(party.len() + encounter.enemies.len());

        for (slot, member) in party.members().iter().enumerate() {
            let skills = member
                .skill_ids
                .iter()
                .map(|id| enemies_oracle.skill(*id).ok_or(OracleError::SkillNotFound(*id)))
                .collect::<Result<Vec<_>, _>>()?;
            combatants.push(Combatant::new(
                Side::Ally,
                slot,
                member.id,
                member.stats.clone(),
                skills,
                member.skill_rate_percent,
            ));
        }

        let mut flags = EncounterFlags::empty();
        for (slot, enemy) in encounter.enemies.iter().enumerate() {
            let definition = &enemy.definition;
            let stats = enemies_oracle
                .combat_stats(definition.id, enemy.level)
                .ok_or(OracleError::EnemyStatsNotFound {
                    enemy_id: definition.id,
                    level: enemy.level,
                })?;
            let skills = definition
                .skill_ids
                .iter()
                .map(|id| enemies_oracle.skill(*id).ok_or(OracleError::SkillNotFound(*id)))
                .collect::<Result<Vec<_>, _>>()?;
            if definition.is_boss {
                flags |= EncounterFlags::BOSS;
            }
            combatants.push(Combatant::new(
                Side::Enemy,
                slot,
                enemy.actor()?,
                stats,
                skills,
                definition.skill_rate_percent,
            ));
        }

        let mut battle = Battle {
            combatants,
            log: Vec::new(),
            flags,
            turn: 0,
            rules: &self.config.combat,
            luck: self.env.tables()?.luck_table(),
            statuses: self.env.status()?,
        };
        battle.push(BattleLogEntry::new(0, LogTemplate::BattleStart).value(encounter.enemies.len()));

        let (result, turns) = battle.run(rng)?;
        let template = match result {
            BattleResult::Victory => LogTemplate::Victory,
            BattleResult::Defeat => LogTemplate::Defeat,
            BattleResult::Retreat => LogTemplate::Retreat,
        };
        battle.push(BattleLogEntry::new(turns, template).value(turns));

        let ally_alive: Vec<bool> = battle
            .side(Side::Ally)
            .map(Combatant::is_alive)
            .collect();
        let survivors: Vec<u32> = party
            .members()
            .iter()
            .zip(&ally_alive)
            .filter(|(_, alive)| **alive)
            .map(|(member, _)| member.id)
            .collect();
        if ally_alive.iter().any(|alive| !alive) {
            battle.flags |= EncounterFlags::ALLY_FELL;
        }

        let mut rewards = BattleRewards::default();
        let mut drops = Vec::new();
        if result == BattleResult::Victory {
            let defeated: Vec<DefeatedEnemy> = encounter
                .enemies
                .iter()
                .map(|e| DefeatedEnemy::new(e.definition.base_experience, e.level))
                .collect();
            let alive_count = survivors.len();
            let scales = self.config.rewards;

            for (member, alive) in party.members().iter().zip(&ally_alive) {
                let experience = experience_for_member(
                    member.level,
                    *alive,
                    &defeated,
                    alive_count,
                    scales.experience,
                );
                rewards.per_member.insert(member.id, experience);
                rewards.total_experience = rewards.total_experience.saturating_add(experience);
                if experience > 0 {
                    battle.push(
                        BattleLogEntry::new(turns, LogTemplate::ExperienceGained)
                            .actor(member.id)
                            .value(experience),
                    );
                }
            }

            let survivor_levels: Vec<u32> = party
                .members()
                .iter()
                .zip(&ally_alive)
                .filter(|(_, alive)| **alive)
                .map(|(member, _)| member.level)
                .collect();
            rewards.gold = gold_for_party(&defeated, &survivor_levels, alive_count, true, scales.gold);
            if rewards.gold > 0 {
                battle.push(BattleLogEntry::new(turns, LogTemplate::GoldGained).value(rewards.gold));
            }

            let items = self.env.items()?;
            for enemy in &encounter.enemies {
                let actor = enemy.actor()?;
                let rolled = roll_enemy_drops(
                    actor,
                    &enemy.definition.drop_item_ids,
                    items,
                    &self.config.drops,
                    daily,
                    encounter.context,
                    rng,
                )?;
                for drop in &rolled {
                    let template = if drop.super_rare {
                        battle.flags |= EncounterFlags::SUPER_RARE_DROP;
                        LogTemplate::SuperRareDropped
                    } else {
                        LogTemplate::ItemDropped
                    };
                    battle.push(
                        BattleLogEntry::new(turns, template)
                            .actor(actor)
                            .value(drop.trap_difficulty)
                            .reference(drop.item_id),
                    );
                }
                drops.extend(rolled);
            }
        }

        let enemies = encounter
            .enemies
            .iter()
            .zip(battle.side(Side::Enemy))
            .map(|(enemy, combatant)| EnemySummary {
                actor: combatant.actor,
                enemy_id: enemy.definition.id,
                level: enemy.level,
                defeated: !combatant.is_alive(),
            })
            .collect();

        debug!(
            target: "delve::combat",
            result = %result,
            turns,
            survivors = survivors.len(),
            experience = rewards.total_experience,
            gold = rewards.gold,
            drops = drops.len(),
            "encounter resolved"
        );

        Ok(CombatOutcome {
            summary: CombatSummary {
                result,
                turns,
                enemies,
                survivors,
                rewards,
                drops,
                flags: battle.flags,
            },
            log: battle.log,
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Side {
    Ally,
    Enemy,
}

impl Side {
    const fn rank(self) -> u8 {
        match self {
            Self::Ally => 0,
            Self::Enemy => 1,
        }
    }
}

#[derive(Clone, Debug)]
struct Combatant {
    side: Side,
    slot: usize,
    actor: u32,
    stats: CombatStats,
    hp: u32,
    statuses: ActiveStatuses,
    skills: Vec<SkillDefinition>,
    skill_rate_percent: f64,
}

impl Combatant {
    fn new(
        side: Side,
        slot: usize,
        actor: u32,
        stats: CombatStats,
        skills: Vec<SkillDefinition>,
        skill_rate_percent: f64,
    ) -> Self {
        Self {
            side,
            slot,
            actor,
            hp: stats.starting_hp(),
            stats,
            statuses: ActiveStatuses::new(),
            skills,
            skill_rate_percent,
        }
    }

    fn is_alive(&self) -> bool {
        self.hp > 0
    }
}

/// Chosen action of one combatant for this turn.
struct Action {
    skill: Option<SkillDefinition>,
    target: usize,
}

struct Battle<'a> {
    combatants: Vec<Combatant>,
    log: Vec<BattleLogEntry>,
    flags: EncounterFlags,
    turn: u8,
    rules: &'a CombatRules,
    luck: &'a LuckTable,
    statuses: &'a dyn StatusOracle,
}

impl Battle<'_> {
    fn push(&mut self, entry: BattleLogEntry) {
        self.log.push(entry);
    }

    fn side(&self, side: Side) -> impl Iterator<Item = &Combatant> {
        self.combatants.iter().filter(move |c| c.side == side)
    }

    fn decided(&self) -> Option<BattleResult> {
        if !self.side(Side::Ally).any(Combatant::is_alive) {
            Some(BattleResult::Defeat)
        } else if !self.side(Side::Enemy).any(Combatant::is_alive) {
            Some(BattleResult::Victory)
        } else {
            None
        }
    }

    fn run(&mut self, rng: &mut impl RandomSource) -> Result<(BattleResult, u8), EngineError> {
        if let Some(result) = self.decided() {
            return Ok((result, 0));
        }
        for turn in 1..=self.rules.max_turns {
            self.turn = turn;
            self.push(BattleLogEntry::new(turn, LogTemplate::TurnStart));
            for index in self.turn_order() {
                if let Some(result) = self.decided() {
                    return Ok((result, turn));
                }
                if self.combatants[index].is_alive() {
                    self.act(index, rng)?;
                }
            }
            self.end_of_turn();
            if let Some(result) = self.decided() {
                return Ok((result, turn));
            }
        }
        Ok((BattleResult::Retreat, self.rules.max_turns))
    }

    fn turn_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.combatants.len())
            .filter(|i| self.combatants[*i].is_alive())
            .collect();
        order.sort_by(|a, b| {
            let (a, b) = (&self.combatants[*a], &self.combatants[*b]);
            b.stats
                .speed
                .cmp(&a.stats.speed)
                .then(a.side.rank().cmp(&b.side.rank()))
                .then(a.slot.cmp(&b.slot))
        });
        order
    }

    fn act(&mut self, index: usize, rng: &mut impl RandomSource) -> Result<(), EngineError> {
        let turn = self.turn;
        let actor = self.combatants[index].actor;

        if let Some(kind) = self.combatants[index].statuses.prevents_action() {
            let status_id = self.combatants[index]
                .statuses
                .iter()
                .find(|s| s.kind == kind)
                .map_or(0, |s| s.status_id);
            self.push(
                BattleLogEntry::new(turn, LogTemplate::ActionSkipped)
                    .actor(actor)
                    .reference(status_id),
            );
            return Ok(());
        }

        let berserk = berserk_chance_percent(self.combatants[index].stats.berserk_chance_percent);
        if berserk > 0.0
            && roll_percent(berserk, rng)
            && self.combatants[index]
                .statuses
                .apply_berserk(self.rules.berserk_duration)
        {
            self.flags |= EncounterFlags::BERSERK;
            self.push(
                BattleLogEntry::new(turn, LogTemplate::BerserkTriggered)
                    .actor(actor)
                    .value(self.rules.berserk_duration)
                    .reference(BERSERK_STATUS_ID),
            );
        }

        let Some(action) = self.choose_action(index, rng) else {
            return Ok(());
        };
        let skill_id = action.skill.as_ref().map_or(0, |s| s.id);
        let target_actor = self.combatants[action.target].actor;
        let template = if action.skill.is_some() {
            LogTemplate::SkillUse
        } else {
            LogTemplate::Attack
        };
        self.push(
            BattleLogEntry::new(turn, template)
                .actor(actor)
                .target(target_actor)
                .reference(skill_id),
        );

        let attacker = self.combatants[index].stats.clone();
        let (hits, power, kind, accuracy, bounds, status) = match &action.skill {
            Some(skill) => (
                skill.hit_count.max(1),
                skill.power,
                skill.damage_kind,
                skill.accuracy_multiplier,
                HitBounds::for_skill(self.rules, skill.hit_bounds),
                skill.status,
            ),
            None => (
                attacker.attack_count.max(1),
                1.0,
                DamageKind::Physical,
                1.0,
                HitBounds::from_rules(self.rules),
                None,
            ),
        };

        for hit_index in 1..=u32::from(hits) {
            let target = &self.combatants[action.target];
            if !target.is_alive() {
                break;
            }
            let input = HitInput {
                accuracy: attacker.accuracy,
                evasion: target.stats.evasion,
                degradation_percent: target.stats.degradation_percent,
                attacker_luck: attacker.luck,
                defender_luck: target.stats.luck,
                hit_index,
                skill_accuracy: accuracy,
            };
            let (hit, _) = roll_hit(&input, self.luck, bounds, rng);
            if !hit {
                self.push(
                    BattleLogEntry::new(turn, LogTemplate::Miss)
                        .actor(actor)
                        .target(target_actor)
                        .reference(skill_id),
                );
                continue;
            }

            let (attack, defense) = stat_pair(kind, &attacker, &target.stats);
            let (damage, critical) =
                roll_damage(attack, power, defense, attacker.critical_rate, self.rules, rng);
            let lethal = apply_damage(&mut self.combatants[action.target].hp, damage);
            if critical {
                self.flags |= EncounterFlags::CRITICAL_HIT;
            }
            self.push(
                BattleLogEntry::new(
                    turn,
                    if critical {
                        LogTemplate::CriticalHit
                    } else {
                        LogTemplate::Hit
                    },
                )
                .actor(actor)
                .target(target_actor)
                .value(damage)
                .reference(skill_id),
            );

            if lethal {
                self.push(
                    BattleLogEntry::new(turn, LogTemplate::Defeated)
                        .actor(target_actor)
                        .target(actor),
                );
                break;
            }
            if let Some(status) = status {
                self.try_apply_status(&attacker, actor, action.target, status, rng)?;
            }
        }
        Ok(())
    }

    fn choose_action(&self, index: usize, rng: &mut impl RandomSource) -> Option<Action> {
        let me = &self.combatants[index];
        let skill = if !me.skills.is_empty()
            && !me.statuses.blocks_skills()
            && rng.chance(me.skill_rate_percent / 100.0)
        {
            let pick = rng.uniform_int(0, me.skills.len() as i64 - 1) as usize;
            me.skills.get(pick).cloned()
        } else {
            None
        };

        let confused = me.statuses.is_confused();
        let candidates: Vec<usize> = self
            .combatants
            .iter()
            .enumerate()
            .filter(|(i, c)| *i != index && c.is_alive() && (confused || c.side != me.side))
            .map(|(i, _)| i)
            .collect();
        if candidates.is_empty() {
            return None;
        }
        let pick = rng.uniform_int(0, candidates.len() as i64 - 1) as usize;
        Some(Action {
            skill,
            target: candidates[pick],
        })
    }

    fn try_apply_status(
        &mut self,
        attacker: &CombatStats,
        actor: u32,
        target: usize,
        status: SkillStatus,
        rng: &mut impl RandomSource,
    ) -> Result<(), EngineError> {
        let definition = self
            .statuses
            .status_effect(status.status_id)
            .ok_or(OracleError::StatusEffectNotFound(status.status_id))?;
        let defender = &self.combatants[target];
        let target_actor = defender.actor;
        let chance = status_chance_percent(
            status.base_percent,
            attacker.source_proc_multiplier,
            defender.stats.resistances.get(definition.kind),
            defender.stats.target_proc_multiplier,
        );
        let applied = roll_percent(chance, rng)
            && self.combatants[target]
                .statuses
                .apply(ActiveStatus::from_definition(&definition));
        let template = if applied {
            self.flags |= EncounterFlags::STATUS_APPLIED;
            LogTemplate::StatusApplied
        } else {
            LogTemplate::StatusResisted
        };
        self.push(
            BattleLogEntry::new(self.turn, template)
                .actor(actor)
                .target(target_actor)
                .value(definition.duration_turns)
                .reference(definition.id),
        );
        Ok(())
    }

    fn end_of_turn(&mut self) {
        let turn = self.turn;
        for index in 0..self.combatants.len() {
            if !self.combatants[index].is_alive() {
                continue;
            }
            let actor = self.combatants[index].actor;
            let max_hp = self.combatants[index].stats.max_hp;
            let ticks = self.combatants[index].statuses.tick(max_hp);
            for tick in ticks {
                if tick.damage > 0 {
                    let lethal = apply_damage(&mut self.combatants[index].hp, tick.damage);
                    self.push(
                        BattleLogEntry::new(turn, LogTemplate::StatusTick)
                            .actor(actor)
                            .value(tick.damage)
                            .reference(tick.status_id),
                    );
                    if lethal {
                        self.push(BattleLogEntry::new(turn, LogTemplate::Defeated).actor(actor));
                        break;
                    }
                }
                if tick.expired {
                    self.push(
                        BattleLogEntry::new(turn, LogTemplate::StatusExpired)
                            .actor(actor)
                            .reference(tick.status_id),
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{Env, MasterDataSnapshot, PcgRandom, StatusEffectDefinition, StatusKind};
    use crate::state::PartyMember;
    use crate::stats::BaseStats;

    fn enemy(id: u32, vitality: u32) -> EnemyDefinition {
        EnemyDefinition {
            id,
            name: format!("enemy-{id}"),
            base_experience: 100,
            is_boss: false,
            base_stats: BaseStats {
                vitality,
                ..BaseStats::default()
            },
            resistances: Default::default(),
            skill_ids: vec![],
            skill_rate_percent: 0.0,
            drop_item_ids: vec![],
        }
    }

    fn strong_member(id: u32) -> PartyMember {
        PartyMember::new(
            id,
            5,
            CombatStats {
                max_hp: 5_000,
                hp: 5_000,
                physical_attack: 2_000,
                accuracy: 500,
                speed: 99,
                ..CombatStats::default()
            },
        )
    }

    fn encounter(enemies: Vec<EnemyDefinition>) -> Encounter {
        Encounter {
            enemies: enemies
                .into_iter()
                .enumerate()
                .map(|(i, definition)| EncounteredEnemy {
                    suffix: i as u32 + 1,
                    definition,
                    level: 5,
                })
                .collect(),
            context: DropContext {
                recommended_level: 5,
                floor_number: 1,
            },
        }
    }

    fn resolve(
        snapshot: &MasterDataSnapshot,
        config: &ExplorationConfig,
        encounter: &Encounter,
        party: &RuntimePartyState,
        seed: u64,
    ) -> CombatOutcome {
        let env = Env::with_all(snapshot, snapshot, snapshot, snapshot, snapshot).into_master_env();
        let resolver = CombatResolver::new(env, config);
        let mut daily = SuperRareDailyState::default();
        let mut rng = PcgRandom::new(seed);
        resolver
            .resolve(encounter, party, &mut daily, &mut rng)
            .expect("encounter resolves")
    }

    #[test]
    fn overwhelming_party_wins_and_earns_rewards() {
        let snapshot = MasterDataSnapshot::new().with_enemy(enemy(4, 1));
        let config = ExplorationConfig::default();
        let party = RuntimePartyState::new(vec![strong_member(1), strong_member(2)]).unwrap();
        let outcome = resolve(&snapshot, &config, &encounter(vec![enemy(4, 1)]), &party, 3);

        let summary = &outcome.summary;
        assert_eq!(summary.result, BattleResult::Victory);
        assert_eq!(summary.survivors, vec![1, 2]);
        assert!(summary.enemies.iter().all(|e| e.defeated));
        assert_eq!(summary.enemies[0].actor, 1004);
        assert_eq!(summary.rewards.per_member.len(), 2);
        assert!(summary.rewards.total_experience > 0);
        assert!(summary.rewards.gold > 0);

        assert_eq!(outcome.log.first().map(|e| e.template), Some(LogTemplate::BattleStart));
        assert!(outcome.log.iter().any(|e| e.template == LogTemplate::Victory));
        assert!(outcome.log.iter().any(|e| e.template == LogTemplate::Defeated && e.actor == 1004));
    }

    #[test]
    fn hopeless_party_is_defeated_without_rewards() {
        let mut brute = enemy(7, 200);
        brute.base_stats.strength = 500;
        brute.base_stats.agility = 200;
        let snapshot = MasterDataSnapshot::new().with_enemy(brute.clone());
        let config = ExplorationConfig::default();
        let weak = PartyMember::new(
            3,
            1,
            CombatStats {
                max_hp: 1,
                hp: 1,
                physical_attack: 0,
                ..CombatStats::default()
            },
        );
        let party = RuntimePartyState::new(vec![weak]).unwrap();
        let outcome = resolve(&snapshot, &config, &encounter(vec![brute]), &party, 9);

        assert_eq!(outcome.summary.result, BattleResult::Defeat);
        assert!(outcome.summary.survivors.is_empty());
        assert_eq!(outcome.summary.rewards, BattleRewards::default());
        assert!(outcome.summary.drops.is_empty());
        assert!(outcome.summary.flags.contains(EncounterFlags::ALLY_FELL));
    }

    #[test]
    fn stalemate_retreats_at_turn_limit() {
        let mut wall = enemy(8, 1);
        wall.base_stats.strength = 0;
        let snapshot = MasterDataSnapshot::new().with_enemy(wall.clone());
        let config = ExplorationConfig::default().with_combat(CombatRules {
            max_turns: 3,
            min_hit: 0.0,
            max_hit: 0.0,
            ..CombatRules::default()
        });
        let party = RuntimePartyState::new(vec![strong_member(1)]).unwrap();
        let outcome = resolve(&snapshot, &config, &encounter(vec![wall]), &party, 1);

        assert_eq!(outcome.summary.result, BattleResult::Retreat);
        assert_eq!(outcome.summary.turns, 3);
        assert_eq!(outcome.summary.rewards, BattleRewards::default());
        let misses = outcome.log.iter().filter(|e| e.template == LogTemplate::Miss).count();
        assert_eq!(misses, 6);
    }

    #[test]
    fn group_members_get_distinct_suffixes() {
        let snapshot = MasterDataSnapshot::new().with_enemy(enemy(4, 1));
        let config = ExplorationConfig::default();
        let party = RuntimePartyState::new(vec![strong_member(1)]).unwrap();
        let outcome = resolve(
            &snapshot,
            &config,
            &encounter(vec![enemy(4, 1), enemy(4, 1), enemy(4, 1)]),
            &party,
            5,
        );
        let actors: Vec<u32> = outcome.summary.enemies.iter().map(|e| e.actor).collect();
        assert_eq!(actors, vec![1004, 2004, 3004]);
    }

    #[test]
    fn same_seed_replays_identically() {
        let snapshot = MasterDataSnapshot::new().with_enemy(enemy(4, 30));
        let config = ExplorationConfig::default();
        let party = RuntimePartyState::new(vec![PartyMember::new(1, 5, CombatStats::default())])
            .unwrap();
        let fight = encounter(vec![enemy(4, 30), enemy(4, 30)]);
        let first = resolve(&snapshot, &config, &fight, &party, 42);
        let second = resolve(&snapshot, &config, &fight, &party, 42);
        assert_eq!(first, second);
    }

    #[test]
    fn guaranteed_status_is_applied_and_ticks() {
        let venom = StatusEffectDefinition {
            id: 5,
            name: "Venom".into(),
            kind: StatusKind::Poison,
            duration_turns: 3,
            damage_percent: 10.0,
        };
        let bite = SkillDefinition {
            id: 9,
            name: "Venom Bite".into(),
            damage_kind: DamageKind::Physical,
            power: 0.0,
            hit_count: 1,
            accuracy_multiplier: 1.0,
            hit_bounds: Some((1.0, 1.0)),
            status: Some(SkillStatus {
                status_id: 5,
                base_percent: 100.0,
            }),
        };
        let mut target = enemy(4, 100);
        target.base_stats.strength = 0;
        let snapshot = MasterDataSnapshot::new()
            .with_enemy(target.clone())
            .with_skill(bite)
            .with_status_effect(venom);
        let config = ExplorationConfig::default().with_combat(CombatRules {
            max_turns: 1,
            ..CombatRules::default()
        });
        let member = PartyMember::new(1, 5, CombatStats {
            speed: 50,
            ..CombatStats::default()
        })
        .with_skills(vec![9], 100.0);
        let party = RuntimePartyState::new(vec![member]).unwrap();
        let outcome = resolve(&snapshot, &config, &encounter(vec![target]), &party, 2);

        assert!(outcome.summary.flags.contains(EncounterFlags::STATUS_APPLIED));
        let applied = outcome
            .log
            .iter()
            .find(|e| e.template == LogTemplate::StatusApplied)
            .expect("status applied");
        assert_eq!((applied.actor, applied.target, applied.reference), (1, 1004, 5));
        assert!(
            outcome
                .log
                .iter()
                .any(|e| e.template == LogTemplate::StatusTick && e.actor == 1004)
        );
    }

    #[test]
    fn missing_skill_is_master_data_failure() {
        let snapshot = MasterDataSnapshot::new().with_enemy(enemy(4, 1));
        let env = Env::with_all(&snapshot, &snapshot, &snapshot, &snapshot, &snapshot)
            .into_master_env();
        let config = ExplorationConfig::default();
        let resolver = CombatResolver::new(env, &config);
        let member = strong_member(1).with_skills(vec![77], 50.0);
        let party = RuntimePartyState::new(vec![member]).unwrap();
        let mut daily = SuperRareDailyState::default();
        let mut rng = PcgRandom::new(1);
        let err = resolver
            .resolve(&encounter(vec![enemy(4, 1)]), &party, &mut daily, &mut rng)
            .unwrap_err();
        assert!(err.is_master_data_not_found());
    }
}
