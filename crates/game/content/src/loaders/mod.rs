//! Content loaders for reading game data from files.
//!
//! Each loader turns one RON/TOML file into `delve-core` types;
//! [`ContentFactory`] combines them into a master-data snapshot.

pub mod config;
pub mod dungeon;
pub mod enemy;
pub mod factory;
pub mod item;
pub mod party;
pub mod status;
pub mod tables;

pub use config::ConfigLoader;
pub use dungeon::{DungeonCatalog, DungeonLoader};
pub use enemy::{EnemyCatalog, EnemyLoader};
pub use factory::ContentFactory;
pub use item::ItemLoader;
pub use party::PartyLoader;
pub use status::StatusLoader;
pub use tables::TablesLoader;

use std::path::Path;

use anyhow::Context;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read file {}", path.display()))
}

/// Parses a RON document, naming the file and `what` on failure.
pub(crate) fn parse_ron<T>(path: &Path, what: &str) -> LoadResult<T>
where
    T: serde::de::DeserializeOwned,
{
    let content = read_file(path)?;
    ron::from_str(&content)
        .map_err(|e| anyhow::anyhow!("Failed to parse {} RON at {}: {}", what, path.display(), e))
}

/// Parses a TOML document, naming the file and `what` on failure.
pub(crate) fn parse_toml<T>(path: &Path, what: &str) -> LoadResult<T>
where
    T: serde::de::DeserializeOwned,
{
    let content = read_file(path)?;
    toml::from_str(&content)
        .map_err(|e| anyhow::anyhow!("Failed to parse {} TOML at {}: {}", what, path.display(), e))
}
