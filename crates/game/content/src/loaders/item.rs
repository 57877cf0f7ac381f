//! Item catalog loader.

use std::path::Path;

use delve_core::ItemDefinition;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::loaders::{LoadResult, parse_ron};

/// Item catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemCatalog {
    pub items: Vec<ItemDefinition>,
}

/// Loader for item catalog from RON files.
pub struct ItemLoader;

impl ItemLoader {
    /// Load item catalog from a RON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file containing ItemCatalog
    pub fn load(path: &Path) -> LoadResult<Vec<ItemDefinition>> {
        let catalog: ItemCatalog = parse_ron(path, "item catalog")?;
        debug!(items = catalog.items.len(), "loaded item catalog");
        Ok(catalog.items)
    }
}
