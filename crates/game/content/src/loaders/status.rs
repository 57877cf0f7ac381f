//! Status effect catalog loader.

use std::path::Path;

use delve_core::StatusEffectDefinition;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::loaders::{LoadResult, parse_ron};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusCatalog {
    pub status_effects: Vec<StatusEffectDefinition>,
}

/// Loader for status effect definitions from RON files.
pub struct StatusLoader;

impl StatusLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<StatusEffectDefinition>> {
        let catalog: StatusCatalog = parse_ron(path, "status effect catalog")?;
        debug!(
            status_effects = catalog.status_effects.len(),
            "loaded status effect catalog"
        );
        Ok(catalog.status_effects)
    }
}
