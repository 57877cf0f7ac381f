//! Content factory for building master data from data files.

use std::path::{Path, PathBuf};

use anyhow::Context;
use delve_core::{ExplorationConfig, LuckTable, MasterDataSnapshot, RuntimePartyState};
use tracing::{debug, info};

use crate::loaders::{
    ConfigLoader, DungeonLoader, EnemyLoader, ItemLoader, LoadResult, PartyLoader, StatusLoader,
    TablesLoader,
};

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── tables.toml
/// ├── dungeons.ron
/// ├── enemies.ron
/// ├── items.ron
/// ├── status_effects.ron
/// └── party.ron        (simulator fixture, optional)
/// ```
///
/// `config.toml` and `tables.toml` are optional; defaults apply when absent.
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load exploration configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<ExplorationConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(ExplorationConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load balance tables from `tables.toml`.
    pub fn load_luck_table(&self) -> LoadResult<LuckTable> {
        let path = self.data_dir.join("tables.toml");
        if !path.exists() {
            debug!(path = %path.display(), "no tables file, using built-in luck table");
            return Ok(LuckTable::default());
        }
        TablesLoader::load(&path)
    }

    /// Load the party fixture from `party.ron`.
    pub fn load_party(&self) -> LoadResult<RuntimePartyState> {
        PartyLoader::load(&self.data_dir.join("party.ron"))
    }

    /// Load every master-data file and assemble a validated snapshot.
    ///
    /// # Errors
    ///
    /// Fails on unreadable or malformed files, and on dangling references
    /// between records (an encounter naming an unknown enemy, a floor of an
    /// unknown dungeon, ...).
    pub fn load_snapshot(&self) -> LoadResult<MasterDataSnapshot> {
        let dungeons = DungeonLoader::load(&self.data_dir.join("dungeons.ron"))?;
        let enemies = EnemyLoader::load(&self.data_dir.join("enemies.ron"))?;
        let items = ItemLoader::load(&self.data_dir.join("items.ron"))?;
        let status_effects = StatusLoader::load(&self.data_dir.join("status_effects.ron"))?;
        let luck_table = self.load_luck_table()?;

        let mut snapshot = MasterDataSnapshot::new().with_luck_table(luck_table);
        snapshot = dungeons
            .dungeons
            .into_iter()
            .fold(snapshot, MasterDataSnapshot::with_dungeon);
        snapshot = dungeons
            .floors
            .into_iter()
            .fold(snapshot, MasterDataSnapshot::with_floor);
        snapshot = dungeons
            .encounter_tables
            .into_iter()
            .fold(snapshot, MasterDataSnapshot::with_encounter_table);
        snapshot = dungeons
            .scripted_events
            .into_iter()
            .fold(snapshot, MasterDataSnapshot::with_scripted_event);
        snapshot = enemies
            .enemies
            .into_iter()
            .fold(snapshot, MasterDataSnapshot::with_enemy);
        snapshot = enemies
            .skills
            .into_iter()
            .fold(snapshot, MasterDataSnapshot::with_skill);
        snapshot = items
            .into_iter()
            .fold(snapshot, MasterDataSnapshot::with_item);
        snapshot = status_effects
            .into_iter()
            .fold(snapshot, MasterDataSnapshot::with_status_effect);

        snapshot
            .validate()
            .with_context(|| format!("Inconsistent master data in {}", self.data_dir.display()))?;

        info!(
            data_dir = %self.data_dir.display(),
            dungeons = snapshot.dungeons.len(),
            enemies = snapshot.enemies.len(),
            items = snapshot.items.len(),
            "master data loaded"
        );
        Ok(snapshot)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn optional_files_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let factory = ContentFactory::new(dir.path());
        assert_eq!(factory.load_config().unwrap(), ExplorationConfig::default());
        assert_eq!(factory.load_luck_table().unwrap(), LuckTable::default());
        assert!(factory.load_party().is_err());
    }
}
