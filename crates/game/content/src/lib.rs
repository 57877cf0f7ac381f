//! Data-driven content definitions and loaders.
//!
//! This crate reads master data and tunables from a data directory:
//! - Dungeons, floors, encounter tables and scripted events (RON)
//! - Enemy and skill catalogs (RON)
//! - Item catalogs (RON)
//! - Status effect catalogs (RON)
//! - Balance tables such as the luck table (TOML)
//! - Exploration configuration (TOML)
//! - Party fixtures for headless simulation (RON)
//!
//! Loaded content is assembled into a validated
//! [`MasterDataSnapshot`](delve_core::MasterDataSnapshot) that backs every
//! oracle the engine reads.

pub mod loaders;

pub use loaders::{
    ConfigLoader, ContentFactory, DungeonCatalog, DungeonLoader, EnemyCatalog, EnemyLoader,
    ItemLoader, LoadResult, PartyLoader, StatusLoader, TablesLoader,
};
