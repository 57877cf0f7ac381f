//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from the engine, master-data sources and worker tasks so
//! clients can bubble them up with consistent context.
use thiserror::Error;

use delve_core::{EngineError, SnapshotError};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("master data is inconsistent")]
    InvalidMasterData(#[from] SnapshotError),

    #[error("failed to load master data from {origin}")]
    Source {
        origin: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("run worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),
}

impl RuntimeError {
    /// Whether the failure points at broken content rather than the caller.
    pub fn is_content_error(&self) -> bool {
        match self {
            Self::Engine(err) => err.is_configuration() || err.is_master_data_not_found(),
            Self::InvalidMasterData(_) | Self::Source { .. } => true,
            Self::WorkerJoin(_) => false,
        }
    }
}
