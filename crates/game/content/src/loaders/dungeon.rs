//! Dungeon layout loader.

use std::path::Path;

use delve_core::{
    DungeonDefinition, EncounterTableDefinition, FloorDefinition, ScriptedEventDefinition,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::loaders::{LoadResult, parse_ron};

/// Everything `dungeons.ron` describes.
///
/// ```ron
/// (
///     dungeons: [(id: 1, name: "Mossy Cellar", recommended_level: 3, floor_count: 2, events_per_floor: 3)],
///     floors: [(dungeon_id: 1, floor_number: 1, encounter_table_id: 10)],
///     encounter_tables: [(id: 10, events: [(kind: Enemy, enemy_id: Some(1), level: 2)])],
///     scripted_events: [],
/// )
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DungeonCatalog {
    pub dungeons: Vec<DungeonDefinition>,
    pub floors: Vec<FloorDefinition>,
    pub encounter_tables: Vec<EncounterTableDefinition>,
    pub scripted_events: Vec<ScriptedEventDefinition>,
}

/// Loader for dungeon layouts from RON files.
pub struct DungeonLoader;

impl DungeonLoader {
    pub fn load(path: &Path) -> LoadResult<DungeonCatalog> {
        let catalog: DungeonCatalog = parse_ron(path, "dungeon catalog")?;
        debug!(
            dungeons = catalog.dungeons.len(),
            floors = catalog.floors.len(),
            encounter_tables = catalog.encounter_tables.len(),
            scripted_events = catalog.scripted_events.len(),
            "loaded dungeon catalog"
        );
        Ok(catalog)
    }
}
