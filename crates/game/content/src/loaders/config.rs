//! Exploration configuration loader.

use std::path::Path;

use delve_core::{EventScheduler, ExplorationConfig};

use crate::loaders::{LoadResult, parse_toml};

/// Loader for exploration configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing sections and fields keep their defaults. Scheduler weights are
    /// checked here so a bad file fails at load rather than on the first step.
    pub fn load(path: &Path) -> LoadResult<ExplorationConfig> {
        let config: ExplorationConfig = parse_toml(path, "config")?;
        EventScheduler::new(config.scheduler).map_err(|e| {
            anyhow::anyhow!("Invalid scheduler weights in {}: {}", path.display(), e)
        })?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use delve_core::SchedulerWeights;

    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
            [scheduler]
            nothing = 0.0
            scripted = 0.0
            combat = 1.0

            [drops]
            super_rare_daily_limit = 3
            "#,
        )
        .unwrap();

        let config = ConfigLoader::load(&path).unwrap();
        assert_eq!(config.scheduler, SchedulerWeights::new(0.0, 0.0, 1.0));
        assert_eq!(config.drops.super_rare_daily_limit, 3);
        assert_eq!(config.drops.base_drop_percent, 20.0);
        assert_eq!(config.combat.max_turns, 20);
    }

    #[test]
    fn negative_weights_fail_at_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[scheduler]\ncombat = -1.0\n").unwrap();
        assert!(ConfigLoader::load(&path).is_err());
    }
}
