//! Runtime wrappers around master data.
//!
//! A [`MasterDataSource`] loads a [`MasterDataSnapshot`] once; the
//! [`OracleBundle`] shares it read-only between every run so the runtime can
//! build [`delve_core::Env`] views on demand. Dynamic state lives in each
//! run's `RunState`, never here.
mod source;

use std::sync::Arc;

use delve_core::{Env, ExplorationConfig, MasterDataSnapshot, MasterEnv};

pub use source::{ContentDirectorySource, MasterDataSource, StaticSource};

/// Shared, immutable master data plus the tunables runs are resolved with.
#[derive(Clone)]
pub struct OracleBundle {
    snapshot: Arc<MasterDataSnapshot>,
    config: Arc<ExplorationConfig>,
}

impl OracleBundle {
    pub fn new(snapshot: Arc<MasterDataSnapshot>, config: Arc<ExplorationConfig>) -> Self {
        Self { snapshot, config }
    }

    /// Converts the bundle into the oracle environment the engine reads.
    pub fn as_master_env(&self) -> MasterEnv<'_> {
        let snapshot = self.snapshot.as_ref();
        Env::with_all(snapshot, snapshot, snapshot, snapshot, snapshot).into_master_env()
    }

    pub fn snapshot(&self) -> &MasterDataSnapshot {
        &self.snapshot
    }

    pub fn config(&self) -> &ExplorationConfig {
        &self.config
    }
}
