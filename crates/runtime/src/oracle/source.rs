//! Asynchronous master-data sources.
//!
//! Loading is the only place a run may suspend on external data; the engine
//! itself only ever reads the loaded snapshot.
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use delve_content::ContentFactory;
use delve_core::MasterDataSnapshot;

use crate::api::{Result, RuntimeError};

#[async_trait]
pub trait MasterDataSource: Send + Sync {
    /// Human-readable origin used in errors and logs.
    fn describe(&self) -> String;

    async fn load(&self) -> Result<MasterDataSnapshot>;
}

/// Source backed by an already built snapshot.
#[derive(Clone)]
pub struct StaticSource {
    snapshot: Arc<MasterDataSnapshot>,
}

impl StaticSource {
    pub fn new(snapshot: MasterDataSnapshot) -> Self {
        Self {
            snapshot: Arc::new(snapshot),
        }
    }
}

#[async_trait]
impl MasterDataSource for StaticSource {
    fn describe(&self) -> String {
        "in-memory snapshot".to_string()
    }

    async fn load(&self) -> Result<MasterDataSnapshot> {
        Ok(self.snapshot.as_ref().clone())
    }
}

/// Source reading a content data directory on the blocking thread pool.
#[derive(Clone, Debug)]
pub struct ContentDirectorySource {
    data_dir: PathBuf,
}

impl ContentDirectorySource {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }
}

#[async_trait]
impl MasterDataSource for ContentDirectorySource {
    fn describe(&self) -> String {
        self.data_dir.display().to_string()
    }

    async fn load(&self) -> Result<MasterDataSnapshot> {
        let factory = ContentFactory::new(self.data_dir.clone());
        debug!(data_dir = %self.data_dir.display(), "loading master data");
        tokio::task::spawn_blocking(move || factory.load_snapshot())
            .await
            .map_err(RuntimeError::WorkerJoin)?
            .map_err(|source| RuntimeError::Source {
                origin: self.describe(),
                source,
            })
    }
}
