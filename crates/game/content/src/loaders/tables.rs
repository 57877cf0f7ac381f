//! Balance tables loader.
//!
//! ```toml
//! [[luck.bands]]
//! min_luck = 0
//! lower = 0.41
//!
//! [[luck.bands]]
//! min_luck = 60
//! lower = 1.0
//! ```

use std::path::Path;

use delve_core::LuckTable;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::loaders::{LoadResult, parse_toml};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct TablesFile {
    luck: Option<LuckTable>,
}

/// Loader for game balance tables.
pub struct TablesLoader;

impl TablesLoader {
    /// Loads the luck table, falling back to the built-in table when the
    /// file has no `[luck]` section.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read or parsed, or the table shape is
    /// invalid.
    pub fn load(path: &Path) -> LoadResult<LuckTable> {
        let file: TablesFile = parse_toml(path, "tables")?;
        let Some(table) = file.luck else {
            debug!(path = %path.display(), "no luck table section, using built-in table");
            return Ok(LuckTable::default());
        };
        table
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid luck table in {}: {}", path.display(), e))?;
        debug!(bands = table.bands().len(), "loaded luck table");
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tables.toml");
        std::fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn loads_banded_table() {
        let (_dir, path) = write(
            r#"
            [[luck.bands]]
            min_luck = 0
            lower = 0.5

            [[luck.bands]]
            min_luck = 40
            lower = 1.0
            "#,
        );
        let table = TablesLoader::load(&path).unwrap();
        assert_eq!(table.lower_bound(39), 0.5);
        assert_eq!(table.lower_bound(40), 1.0);
    }

    #[test]
    fn missing_section_uses_default_table() {
        let (_dir, path) = write("");
        assert_eq!(TablesLoader::load(&path).unwrap(), LuckTable::default());
    }

    #[test]
    fn rejects_unsaturated_table() {
        let (_dir, path) = write(
            r#"
            [[luck.bands]]
            min_luck = 0
            lower = 0.5
            "#,
        );
        let err = TablesLoader::load(&path).unwrap_err().to_string();
        assert!(err.contains("Invalid luck table"));
    }
}
