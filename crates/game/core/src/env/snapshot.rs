//! In-memory master data implementing every oracle.
//!
//! Content loaders and tests build a [`MasterDataSnapshot`] once and share it
//! read-only between runs. [`MasterDataSnapshot::validate`] checks the
//! cross-references between records so broken content is reported at load
//! time instead of mid-run.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{
    DungeonDefinition, DungeonOracle, EncounterTableDefinition, EnemyDefinition, EnemyOracle,
    FloorDefinition, ItemDefinition, ItemOracle, LuckTable, ScriptedEventDefinition,
    SkillDefinition, StatusEffectDefinition, StatusOracle, TablesOracle,
};
use crate::config::ExplorationConfig;
use crate::engine::{ConfigurationError, ScriptedPayload};
use crate::error::{ErrorSeverity, GameError};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MasterDataSnapshot {
    pub dungeons: BTreeMap<u32, DungeonDefinition>,
    /// Floors keyed by dungeon id.
    pub floors: BTreeMap<u32, Vec<FloorDefinition>>,
    pub encounter_tables: BTreeMap<u32, EncounterTableDefinition>,
    /// Scripted events are global; per-dungeon weights decide where they fire.
    pub scripted_events: Vec<ScriptedEventDefinition>,
    pub items: BTreeMap<u32, ItemDefinition>,
    pub status_effects: BTreeMap<u32, StatusEffectDefinition>,
    pub enemies: BTreeMap<u32, EnemyDefinition>,
    pub skills: BTreeMap<u32, SkillDefinition>,
    pub luck_table: LuckTable,
}

impl MasterDataSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_dungeon(mut self, dungeon: DungeonDefinition) -> Self {
        self.dungeons.insert(dungeon.id, dungeon);
        self
    }

    #[must_use]
    pub fn with_floor(mut self, floor: FloorDefinition) -> Self {
        self.floors.entry(floor.dungeon_id).or_default().push(floor);
        self
    }

    #[must_use]
    pub fn with_encounter_table(mut self, table: EncounterTableDefinition) -> Self {
        self.encounter_tables.insert(table.id, table);
        self
    }

    #[must_use]
    pub fn with_scripted_event(mut self, event: ScriptedEventDefinition) -> Self {
        self.scripted_events.push(event);
        self
    }

    #[must_use]
    pub fn with_item(mut self, item: ItemDefinition) -> Self {
        self.items.insert(item.id, item);
        self
    }

    #[must_use]
    pub fn with_status_effect(mut self, status: StatusEffectDefinition) -> Self {
        self.status_effects.insert(status.id, status);
        self
    }

    #[must_use]
    pub fn with_enemy(mut self, enemy: EnemyDefinition) -> Self {
        self.enemies.insert(enemy.id, enemy);
        self
    }

    #[must_use]
    pub fn with_skill(mut self, skill: SkillDefinition) -> Self {
        self.skills.insert(skill.id, skill);
        self
    }

    #[must_use]
    pub fn with_luck_table(mut self, table: LuckTable) -> Self {
        self.luck_table = table;
        self
    }

    /// Checks every id reference between records.
    ///
    /// # Errors
    ///
    /// Returns the first dangling reference or shape violation found.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        self.luck_table.validate()?;

        for (dungeon_id, floors) in &self.floors {
            if !self.dungeons.contains_key(dungeon_id) {
                return Err(SnapshotError::UnknownDungeon(*dungeon_id));
            }
            let mut numbers: Vec<u32> = floors.iter().map(|f| f.floor_number).collect();
            numbers.sort_unstable();
            if let Some(pair) = numbers.windows(2).find(|pair| pair[0] == pair[1]) {
                return Err(SnapshotError::DuplicateFloor {
                    dungeon_id: *dungeon_id,
                    floor_number: pair[0],
                });
            }
            for floor in floors {
                if floor.dungeon_id != *dungeon_id {
                    return Err(SnapshotError::UnknownDungeon(floor.dungeon_id));
                }
                if !self.encounter_tables.contains_key(&floor.encounter_table_id) {
                    return Err(SnapshotError::UnknownEncounterTable {
                        dungeon_id: *dungeon_id,
                        table_id: floor.encounter_table_id,
                    });
                }
            }
        }

        for table in self.encounter_tables.values() {
            for event in &table.events {
                if usize::from(event.group_max) > ExplorationConfig::MAX_ENEMY_GROUP
                    || event.group_min == 0
                    || event.group_min > event.group_max
                {
                    return Err(SnapshotError::InvalidGroupSize {
                        table_id: table.id,
                        min: event.group_min,
                        max: event.group_max,
                    });
                }
                match event.enemy_id {
                    Some(enemy_id) if !self.enemies.contains_key(&enemy_id) => {
                        return Err(SnapshotError::UnknownEnemy {
                            referenced_by: "encounter table",
                            enemy_id,
                        });
                    }
                    _ => {}
                }
            }
        }

        for enemy in self.enemies.values() {
            if enemy.id >= ExplorationConfig::ACTOR_ID_LIMIT {
                return Err(SnapshotError::EnemyIdOutOfRange(enemy.id));
            }
            for skill_id in &enemy.skill_ids {
                if !self.skills.contains_key(skill_id) {
                    return Err(SnapshotError::UnknownSkill {
                        enemy_id: enemy.id,
                        skill_id: *skill_id,
                    });
                }
            }
            for item_id in &enemy.drop_item_ids {
                if !self.items.contains_key(item_id) {
                    return Err(SnapshotError::UnknownItem {
                        referenced_by: "enemy drop list",
                        item_id: *item_id,
                    });
                }
            }
        }

        for skill in self.skills.values() {
            let Some(status) = skill.status else {
                continue;
            };
            if !self.status_effects.contains_key(&status.status_id) {
                return Err(SnapshotError::UnknownStatusEffect {
                    referenced_by: "skill",
                    status_id: status.status_id,
                });
            }
        }

        for event in &self.scripted_events {
            if event.floor_min == 0 || event.floor_min > event.floor_max {
                return Err(SnapshotError::InvalidFloorRange {
                    event_id: event.id,
                    floor_min: event.floor_min,
                    floor_max: event.floor_max,
                });
            }
            // Numeric weight keys name dungeons; anything else is a tag.
            for key in event.weights.keys() {
                let Ok(dungeon_id) = key.parse::<u32>() else {
                    continue;
                };
                if !self.dungeons.contains_key(&dungeon_id) {
                    return Err(SnapshotError::UnknownWeightKey {
                        event_id: event.id,
                        dungeon_id,
                    });
                }
            }

            let payload = ScriptedPayload::parse(event)?;
            if let Some(item_id) = payload.items.iter().find(|id| !self.items.contains_key(*id)) {
                return Err(SnapshotError::UnknownItem {
                    referenced_by: "scripted event",
                    item_id: *item_id,
                });
            }
            if let Some(status_id) = payload
                .status_effects
                .iter()
                .find(|id| !self.status_effects.contains_key(*id))
            {
                return Err(SnapshotError::UnknownStatusEffect {
                    referenced_by: "scripted event",
                    status_id: *status_id,
                });
            }
        }

        Ok(())
    }
}

impl DungeonOracle for MasterDataSnapshot {
    fn dungeon(&self, id: u32) -> Option<DungeonDefinition> {
        self.dungeons.get(&id).cloned()
    }

    fn floors(&self, dungeon_id: u32) -> Vec<FloorDefinition> {
        self.floors.get(&dungeon_id).cloned().unwrap_or_default()
    }

    fn encounter_table(&self, id: u32) -> Option<EncounterTableDefinition> {
        self.encounter_tables.get(&id).cloned()
    }

    fn scripted_events(&self, _dungeon_id: u32) -> Vec<ScriptedEventDefinition> {
        self.scripted_events.clone()
    }
}

impl ItemOracle for MasterDataSnapshot {
    fn definition(&self, id: u32) -> Option<ItemDefinition> {
        self.items.get(&id).cloned()
    }
}

impl StatusOracle for MasterDataSnapshot {
    fn status_effect(&self, id: u32) -> Option<StatusEffectDefinition> {
        self.status_effects.get(&id).cloned()
    }
}

impl EnemyOracle for MasterDataSnapshot {
    fn enemy(&self, id: u32) -> Option<EnemyDefinition> {
        self.enemies.get(&id).cloned()
    }

    fn skill(&self, id: u32) -> Option<SkillDefinition> {
        self.skills.get(&id).cloned()
    }
}

impl TablesOracle for MasterDataSnapshot {
    fn luck_table(&self) -> &LuckTable {
        &self.luck_table
    }
}

/// Cross-reference failures found by [`MasterDataSnapshot::validate`].
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum SnapshotError {
    #[error("floors reference unknown dungeon {0}")]
    UnknownDungeon(u32),

    #[error("dungeon {dungeon_id} defines floor {floor_number} twice")]
    DuplicateFloor { dungeon_id: u32, floor_number: u32 },

    #[error("dungeon {dungeon_id} references unknown encounter table {table_id}")]
    UnknownEncounterTable { dungeon_id: u32, table_id: u32 },

    #[error("{referenced_by} references unknown enemy {enemy_id}")]
    UnknownEnemy {
        referenced_by: &'static str,
        enemy_id: u32,
    },

    #[error("enemy {enemy_id} references unknown skill {skill_id}")]
    UnknownSkill { enemy_id: u32, skill_id: u32 },

    #[error("{referenced_by} references unknown item {item_id}")]
    UnknownItem {
        referenced_by: &'static str,
        item_id: u32,
    },

    #[error("{referenced_by} references unknown status effect {status_id}")]
    UnknownStatusEffect {
        referenced_by: &'static str,
        status_id: u32,
    },

    #[error("enemy id {0} does not fit the actor reference format")]
    EnemyIdOutOfRange(u32),

    #[error("encounter table {table_id} has invalid group size {min}..={max}")]
    InvalidGroupSize { table_id: u32, min: u8, max: u8 },

    #[error("scripted event {event_id} has invalid floor range {floor_min}..={floor_max}")]
    InvalidFloorRange {
        event_id: u32,
        floor_min: u32,
        floor_max: u32,
    },

    #[error("scripted event {event_id} weights unknown dungeon {dungeon_id}")]
    UnknownWeightKey { event_id: u32, dungeon_id: u32 },

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}

impl GameError for SnapshotError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownDungeon(_) => "SNAPSHOT_UNKNOWN_DUNGEON",
            Self::DuplicateFloor { .. } => "SNAPSHOT_DUPLICATE_FLOOR",
            Self::UnknownEncounterTable { .. } => "SNAPSHOT_UNKNOWN_ENCOUNTER_TABLE",
            Self::UnknownEnemy { .. } => "SNAPSHOT_UNKNOWN_ENEMY",
            Self::UnknownSkill { .. } => "SNAPSHOT_UNKNOWN_SKILL",
            Self::UnknownItem { .. } => "SNAPSHOT_UNKNOWN_ITEM",
            Self::UnknownStatusEffect { .. } => "SNAPSHOT_UNKNOWN_STATUS_EFFECT",
            Self::EnemyIdOutOfRange(_) => "SNAPSHOT_ENEMY_ID_OUT_OF_RANGE",
            Self::InvalidGroupSize { .. } => "SNAPSHOT_INVALID_GROUP_SIZE",
            Self::InvalidFloorRange { .. } => "SNAPSHOT_INVALID_FLOOR_RANGE",
            Self::UnknownWeightKey { .. } => "SNAPSHOT_UNKNOWN_WEIGHT_KEY",
            Self::Configuration(err) => err.error_code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{EncounterEvent, EncounterKind, SkillStatus};

    fn dungeon() -> DungeonDefinition {
        DungeonDefinition {
            id: 1,
            name: "Mossy Cellar".into(),
            chapter: 1,
            recommended_level: 3,
            floor_count: 2,
            events_per_floor: 2,
            tags: vec![],
        }
    }

    fn enemy(id: u32) -> EnemyDefinition {
        EnemyDefinition {
            id,
            name: "Cellar Rat".into(),
            base_experience: 12,
            is_boss: false,
            base_stats: Default::default(),
            resistances: Default::default(),
            skill_ids: vec![],
            skill_rate_percent: 0.0,
            drop_item_ids: vec![],
        }
    }

    fn table(enemy_id: u32) -> EncounterTableDefinition {
        EncounterTableDefinition {
            id: 10,
            events: vec![EncounterEvent {
                kind: EncounterKind::Enemy,
                enemy_id: Some(enemy_id),
                level: 2,
                weight: None,
                group_min: 1,
                group_max: 3,
            }],
        }
    }

    fn floor(number: u32) -> FloorDefinition {
        FloorDefinition {
            dungeon_id: 1,
            floor_number: number,
            encounter_table_id: 10,
        }
    }

    fn valid() -> MasterDataSnapshot {
        MasterDataSnapshot::new()
            .with_dungeon(dungeon())
            .with_floor(floor(1))
            .with_floor(floor(2))
            .with_encounter_table(table(4))
            .with_enemy(enemy(4))
    }

    #[test]
    fn valid_snapshot_passes_and_serves_oracles() {
        let snapshot = valid();
        assert_eq!(snapshot.validate(), Ok(()));
        assert_eq!(snapshot.floors(1).len(), 2);
        assert!(snapshot.floors(99).is_empty());
        assert_eq!(snapshot.enemy(4).map(|e| e.base_experience), Some(12));
        assert!(snapshot.combat_stats(4, 5).is_some());
        assert!(snapshot.combat_stats(5, 5).is_none());
    }

    #[test]
    fn dangling_enemy_reference_is_reported() {
        let snapshot = valid().with_encounter_table(table(7));
        assert_eq!(
            snapshot.validate(),
            Err(SnapshotError::UnknownEnemy {
                referenced_by: "encounter table",
                enemy_id: 7
            })
        );
    }

    #[test]
    fn duplicate_floor_numbers_are_rejected() {
        let snapshot = valid().with_floor(floor(2));
        assert!(matches!(
            snapshot.validate(),
            Err(SnapshotError::DuplicateFloor { floor_number: 2, .. })
        ));
    }

    #[test]
    fn enemy_ids_must_fit_actor_references() {
        let snapshot = valid().with_enemy(enemy(1_000));
        let err = snapshot.validate().unwrap_err();
        assert_eq!(err, SnapshotError::EnemyIdOutOfRange(1_000));
        assert_eq!(err.error_code(), "SNAPSHOT_ENEMY_ID_OUT_OF_RANGE");
    }

    #[test]
    fn skill_status_reference_is_checked() {
        let skill = SkillDefinition {
            id: 3,
            name: "Venom Bite".into(),
            damage_kind: Default::default(),
            power: 1.2,
            hit_count: 1,
            accuracy_multiplier: 1.0,
            hit_bounds: None,
            status: Some(SkillStatus {
                status_id: 8,
                base_percent: 30.0,
            }),
        };
        let snapshot = valid().with_skill(skill);
        assert!(matches!(
            snapshot.validate(),
            Err(SnapshotError::UnknownStatusEffect { status_id: 8, .. })
        ));
    }

    fn altar(weights: &[(&str, f64)], payload: &str) -> ScriptedEventDefinition {
        ScriptedEventDefinition {
            id: 9,
            name: "Mossy Altar".into(),
            floor_min: 1,
            floor_max: 2,
            weights: weights.iter().map(|(k, w)| (k.to_string(), *w)).collect(),
            payload: payload.into(),
        }
    }

    const EMPTY_PAYLOAD: &str = r#"{"experience": 1, "gold": 1, "items": [], "statusEffects": []}"#;

    #[test]
    fn scripted_weight_keys_must_name_known_dungeons() {
        let tagged =
            valid().with_scripted_event(altar(&[("1", 2.0), ("cellar", 1.0)], EMPTY_PAYLOAD));
        assert_eq!(tagged.validate(), Ok(()));

        let stray = valid().with_scripted_event(altar(&[("42", 1.0)], EMPTY_PAYLOAD));
        let err = stray.validate().unwrap_err();
        assert_eq!(
            err,
            SnapshotError::UnknownWeightKey {
                event_id: 9,
                dungeon_id: 42
            }
        );
        assert_eq!(err.error_code(), "SNAPSHOT_UNKNOWN_WEIGHT_KEY");
    }

    #[test]
    fn scripted_payload_references_are_checked_at_load() {
        let missing_item = valid().with_scripted_event(altar(
            &[],
            r#"{"experience": 1, "gold": 1, "items": [77], "statusEffects": []}"#,
        ));
        assert_eq!(
            missing_item.validate(),
            Err(SnapshotError::UnknownItem {
                referenced_by: "scripted event",
                item_id: 77
            })
        );

        let missing_status = valid().with_scripted_event(altar(
            &[],
            r#"{"experience": 1, "gold": 1, "items": [], "statusEffects": [999]}"#,
        ));
        assert_eq!(
            missing_status.validate(),
            Err(SnapshotError::UnknownStatusEffect {
                referenced_by: "scripted event",
                status_id: 999
            })
        );

        let malformed = valid().with_scripted_event(altar(&[], r#"{"experience": "lots"}"#));
        assert!(matches!(
            malformed.validate(),
            Err(SnapshotError::Configuration(
                ConfigurationError::MalformedScriptedPayload { event_id: 9, .. }
            ))
        ));
    }
}
