//! Traits describing read-only master data.
//!
//! Oracles expose dungeon layouts, item, status and enemy definitions, and
//! balance tables. The [`Env`] aggregate bundles them so the engine can access
//! everything it needs without hard coupling to concrete implementations.
mod dungeon;
mod enemies;
mod error;
mod items;
mod rng;
mod snapshot;
mod status;
mod tables;

pub use dungeon::{
    DungeonDefinition, DungeonOracle, EncounterEvent, EncounterKind, EncounterTableDefinition,
    FloorDefinition, ScriptedEventDefinition,
};
pub use enemies::{DamageKind, EnemyDefinition, EnemyOracle, SkillDefinition, SkillStatus};
pub use error::OracleError;
pub use items::{ItemDefinition, ItemOracle, ItemRarity};
pub use rng::{LUCK_ROLL_MAX, PcgRandom, RandomSource};
pub use snapshot::{MasterDataSnapshot, SnapshotError};
pub use status::{StatusEffectDefinition, StatusKind, StatusOracle};
pub use tables::{LuckBand, LuckTable, TablesOracle};

/// Aggregates read-only oracles required by the exploration engine.
pub struct Env<'a, D, I, S, E, T>
where
    D: DungeonOracle + ?Sized,
    I: ItemOracle + ?Sized,
    S: StatusOracle + ?Sized,
    E: EnemyOracle + ?Sized,
    T: TablesOracle + ?Sized,
{
    dungeons: Option<&'a D>,
    items: Option<&'a I>,
    status: Option<&'a S>,
    enemies: Option<&'a E>,
    tables: Option<&'a T>,
}

// Manual impls: derives would demand `Clone` of the (unsized) oracle types.
impl<D, I, S, E, T> Clone for Env<'_, D, I, S, E, T>
where
    D: DungeonOracle + ?Sized,
    I: ItemOracle + ?Sized,
    S: StatusOracle + ?Sized,
    E: EnemyOracle + ?Sized,
    T: TablesOracle + ?Sized,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<D, I, S, E, T> Copy for Env<'_, D, I, S, E, T>
where
    D: DungeonOracle + ?Sized,
    I: ItemOracle + ?Sized,
    S: StatusOracle + ?Sized,
    E: EnemyOracle + ?Sized,
    T: TablesOracle + ?Sized,
{
}

pub type MasterEnv<'a> = Env<
    'a,
    dyn DungeonOracle + 'a,
    dyn ItemOracle + 'a,
    dyn StatusOracle + 'a,
    dyn EnemyOracle + 'a,
    dyn TablesOracle + 'a,
>;

impl<'a, D, I, S, E, T> Env<'a, D, I, S, E, T>
where
    D: DungeonOracle + ?Sized,
    I: ItemOracle + ?Sized,
    S: StatusOracle + ?Sized,
    E: EnemyOracle + ?Sized,
    T: TablesOracle + ?Sized,
{
    pub fn new(
        dungeons: Option<&'a D>,
        items: Option<&'a I>,
        status: Option<&'a S>,
        enemies: Option<&'a E>,
        tables: Option<&'a T>,
    ) -> Self {
        Self {
            dungeons,
            items,
            status,
            enemies,
            tables,
        }
    }

    pub fn with_all(
        dungeons: &'a D,
        items: &'a I,
        status: &'a S,
        enemies: &'a E,
        tables: &'a T,
    ) -> Self {
        Self::new(
            Some(dungeons),
            Some(items),
            Some(status),
            Some(enemies),
            Some(tables),
        )
    }

    pub fn empty() -> Self {
        Self {
            dungeons: None,
            items: None,
            status: None,
            enemies: None,
            tables: None,
        }
    }

    /// Returns the DungeonOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::DungeonsNotAvailable` if no dungeon oracle was provided.
    pub fn dungeons(&self) -> Result<&'a D, OracleError> {
        self.dungeons.ok_or(OracleError::DungeonsNotAvailable)
    }

    /// Returns the ItemOracle, or an error if not available.
    pub fn items(&self) -> Result<&'a I, OracleError> {
        self.items.ok_or(OracleError::ItemsNotAvailable)
    }

    /// Returns the StatusOracle, or an error if not available.
    pub fn status(&self) -> Result<&'a S, OracleError> {
        self.status.ok_or(OracleError::StatusNotAvailable)
    }

    /// Returns the EnemyOracle, or an error if not available.
    pub fn enemies(&self) -> Result<&'a E, OracleError> {
        self.enemies.ok_or(OracleError::EnemiesNotAvailable)
    }

    /// Returns the TablesOracle, or an error if not available.
    pub fn tables(&self) -> Result<&'a T, OracleError> {
        self.tables.ok_or(OracleError::TablesNotAvailable)
    }
}

impl<'a, D, I, S, E, T> Env<'a, D, I, S, E, T>
where
    D: DungeonOracle + 'a,
    I: ItemOracle + 'a,
    S: StatusOracle + 'a,
    E: EnemyOracle + 'a,
    T: TablesOracle + 'a,
{
    /// Converts this environment into a trait-object based `MasterEnv`.
    pub fn into_master_env(self) -> MasterEnv<'a> {
        let dungeons: Option<&'a dyn DungeonOracle> = self.dungeons.map(|d| d as _);
        let items: Option<&'a dyn ItemOracle> = self.items.map(|i| i as _);
        let status: Option<&'a dyn StatusOracle> = self.status.map(|s| s as _);
        let enemies: Option<&'a dyn EnemyOracle> = self.enemies.map(|e| e as _);
        let tables: Option<&'a dyn TablesOracle> = self.tables.map(|t| t as _);
        Env::new(dungeons, items, status, enemies, tables)
    }
}
