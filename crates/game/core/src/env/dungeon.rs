//! Dungeon layout definitions and the oracle that resolves them.
//!
//! Dungeons, floors, encounter tables and scripted events are master data:
//! immutable for the lifetime of a run and shared by every run reading them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Read-only access to dungeon layout data.
pub trait DungeonOracle: Send + Sync {
    fn dungeon(&self, id: u32) -> Option<DungeonDefinition>;

    /// Floors of a dungeon, in any order.
    fn floors(&self, dungeon_id: u32) -> Vec<FloorDefinition>;

    fn encounter_table(&self, id: u32) -> Option<EncounterTableDefinition>;

    /// Scripted events that may fire in the given dungeon.
    fn scripted_events(&self, dungeon_id: u32) -> Vec<ScriptedEventDefinition>;
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DungeonDefinition {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub chapter: u32,
    pub recommended_level: u32,
    pub floor_count: u32,
    pub events_per_floor: u32,
    /// Context tags consulted by scripted-event weight tables.
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloorDefinition {
    pub dungeon_id: u32,
    pub floor_number: u32,
    pub encounter_table_id: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EncounterTableDefinition {
    pub id: u32,
    pub events: Vec<EncounterEvent>,
}

impl EncounterTableDefinition {
    /// Events that can start a combat: enemy or boss encounters naming an enemy.
    pub fn combat_candidates(&self) -> impl Iterator<Item = &EncounterEvent> {
        self.events
            .iter()
            .filter(|event| event.kind.is_combat() && event.enemy_id.is_some())
    }
}

/// One weighted entry of an encounter table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EncounterEvent {
    pub kind: EncounterKind,
    pub enemy_id: Option<u32>,
    pub level: u32,
    /// Spawn weight; absent means 1.0.
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default = "default_group_size")]
    pub group_min: u8,
    #[serde(default = "default_group_size")]
    pub group_max: u8,
}

fn default_group_size() -> u8 {
    1
}

impl EncounterEvent {
    pub fn spawn_weight(&self) -> f64 {
        self.weight.unwrap_or(1.0)
    }
}

/// Event type tag of an encounter entry.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EncounterKind {
    Enemy,
    Boss,
    /// Non-combat entries kept in the table for content tooling.
    Other,
}

impl EncounterKind {
    pub const fn is_combat(self) -> bool {
        matches!(self, Self::Enemy | Self::Boss)
    }
}

/// A hand-authored event with a JSON reward payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScriptedEventDefinition {
    pub id: u32,
    pub name: String,
    pub floor_min: u32,
    pub floor_max: u32,
    /// Weight per context key: a dungeon id, a dungeon tag, or `"default"`.
    #[serde(default)]
    pub weights: BTreeMap<String, f64>,
    /// Reward document, parsed and validated when the event fires.
    pub payload: String,
}

impl ScriptedEventDefinition {
    pub const DEFAULT_WEIGHT_KEY: &'static str = "default";

    pub fn covers_floor(&self, floor_number: u32) -> bool {
        (self.floor_min..=self.floor_max).contains(&floor_number)
    }

    /// Weight of this event inside `dungeon`.
    ///
    /// Lookup order: exact dungeon id, first dungeon tag with an entry,
    /// `"default"`, then 1.0.
    pub fn weight_for(&self, dungeon: &DungeonDefinition) -> f64 {
        if let Some(weight) = self.weights.get(&dungeon.id.to_string()) {
            return *weight;
        }
        if let Some(weight) = dungeon.tags.iter().find_map(|tag| self.weights.get(tag)) {
            return *weight;
        }
        self.weights
            .get(Self::DEFAULT_WEIGHT_KEY)
            .copied()
            .unwrap_or(1.0)
    }
}
