//! Enemy and skill catalog loader.

use std::path::Path;

use delve_core::{EnemyDefinition, SkillDefinition};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::loaders::{LoadResult, parse_ron};

/// Enemy catalog structure for RON files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyCatalog {
    pub enemies: Vec<EnemyDefinition>,
    pub skills: Vec<SkillDefinition>,
}

/// Loader for enemies and the skills they use.
pub struct EnemyLoader;

impl EnemyLoader {
    pub fn load(path: &Path) -> LoadResult<EnemyCatalog> {
        let catalog: EnemyCatalog = parse_ron(path, "enemy catalog")?;
        debug!(
            enemies = catalog.enemies.len(),
            skills = catalog.skills.len(),
            "loaded enemy catalog"
        );
        Ok(catalog)
    }
}
