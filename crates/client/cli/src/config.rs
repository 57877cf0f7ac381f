//! Simulator configuration read from the process environment.
use std::env;
use std::path::PathBuf;

/// Settings for one simulated run.
#[derive(Clone, Debug)]
pub struct CliConfig {
    pub data_dir: PathBuf,
    pub dungeon_id: u32,
    pub target_floor: u32,
    pub seed: Option<u64>,
    /// Overrides the platform cache directory for log files.
    pub log_dir: Option<PathBuf>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            dungeon_id: 1,
            target_floor: u32::MAX,
            seed: None,
            log_dir: None,
        }
    }
}

impl CliConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `DELVE_DATA_DIR` - Master data directory (default: `data`)
    /// - `DELVE_DUNGEON_ID` - Dungeon to explore (default: 1)
    /// - `DELVE_TARGET_FLOOR` - Floors to clear (default: every floor)
    /// - `DELVE_SEED` - Fixed seed for replays (default: random)
    /// - `DELVE_LOG_DIR` - Log directory (default: platform cache dir)
    ///
    /// Runtime settings (`DELVE_EVENT_BUFFER`, ...) are read separately by
    /// `RuntimeConfig::with_env_overrides`.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = env::var("DELVE_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(id) = read_env::<u32>("DELVE_DUNGEON_ID") {
            config.dungeon_id = id;
        }
        if let Some(floor) = read_env::<u32>("DELVE_TARGET_FLOOR") {
            config.target_floor = floor;
        }
        config.seed = read_env::<u64>("DELVE_SEED");
        config.log_dir = env::var_os("DELVE_LOG_DIR").map(PathBuf::from);

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
