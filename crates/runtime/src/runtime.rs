//! High-level run orchestrator.
//!
//! The [`Explorer`] owns shared master data and the event bus; every call to
//! [`Explorer::start`] prepares a run and spawns a worker task that owns that
//! run's state exclusively.

use std::env;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use tokio::sync::{broadcast, watch};
use tracing::info;

use delve_core::{EngineError, ExplorationConfig, ExplorationEngine, MasterDataSnapshot};

use crate::api::{Result, RunHandle, RunId, RunRequest};
use crate::events::{EventBus, RunEvent, Topic};
use crate::oracle::{MasterDataSource, OracleBundle};
use crate::workers::RunWorker;

/// Runtime configuration shared across the explorer and workers.
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeConfig {
    pub exploration: ExplorationConfig,
    /// Capacity of each event bus topic.
    pub event_buffer_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            exploration: ExplorationConfig::default(),
            event_buffer_size: 100,
        }
    }
}

impl RuntimeConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `DELVE_EVENT_BUFFER` - Event bus capacity per topic (default: 100)
    /// - `DELVE_SUPER_RARE_DAILY_LIMIT` - Overrides the super-rare daily limit
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Applies the variables read by [`RuntimeConfig::from_env`] on top of
    /// an existing configuration, e.g. one loaded from `config.toml`.
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        let mut config = self;

        if let Some(capacity) = read_env::<usize>("DELVE_EVENT_BUFFER") {
            config.event_buffer_size = capacity.max(1);
        }
        if let Some(limit) = read_env::<u32>("DELVE_SUPER_RARE_DAILY_LIMIT") {
            config.exploration.drops.super_rare_daily_limit = limit;
        }

        config
    }

    #[must_use]
    pub fn with_exploration(mut self, exploration: ExplorationConfig) -> Self {
        self.exploration = exploration;
        self
    }
}

/// Starts and tracks exploration runs over one set of master data.
pub struct Explorer {
    oracles: OracleBundle,
    event_bus: EventBus,
    next_run: AtomicU64,
}

impl Explorer {
    /// Loads master data from `source` and validates it together with the
    /// configuration.
    pub async fn load(source: &dyn MasterDataSource, config: RuntimeConfig) -> Result<Self> {
        let snapshot = source.load().await?;
        info!(origin = %source.describe(), "master data source loaded");
        Self::from_snapshot(snapshot, config)
    }

    /// Builds an explorer from an in-memory snapshot.
    ///
    /// # Errors
    ///
    /// Dangling references in the snapshot, an invalid luck table, or
    /// unusable scheduler weights.
    pub fn from_snapshot(snapshot: MasterDataSnapshot, config: RuntimeConfig) -> Result<Self> {
        snapshot.validate()?;
        let oracles = OracleBundle::new(Arc::new(snapshot), Arc::new(config.exploration));
        ExplorationEngine::new(oracles.as_master_env(), oracles.config())
            .map_err(EngineError::from)?;

        Ok(Self {
            oracles,
            event_bus: EventBus::with_capacity(config.event_buffer_size),
            next_run: AtomicU64::new(1),
        })
    }

    /// Prepares a run and spawns its worker.
    ///
    /// Preparation errors (unknown dungeon, dungeon without floors) are
    /// returned here; errors while stepping surface from
    /// [`RunHandle::join`].
    pub fn start(&self, request: RunRequest) -> Result<RunHandle> {
        let run_id = RunId(self.next_run.fetch_add(1, Ordering::Relaxed));
        let seed = request.seed.unwrap_or_else(rand::random);

        let engine = ExplorationEngine::new(self.oracles.as_master_env(), self.oracles.config())
            .map_err(EngineError::from)?;
        let (plan, state) =
            engine.prepare(request.dungeon_id, request.target_floor, request.daily, seed)?;

        let started_at = Utc::now();
        info!(
            %run_id,
            dungeon_id = request.dungeon_id,
            target_floor = plan.target_floor,
            seed,
            party = request.party.len(),
            "run started"
        );
        self.event_bus.publish(RunEvent::Started {
            run_id,
            dungeon_id: request.dungeon_id,
            seed,
            at: started_at,
        });

        let (cancel_tx, cancel_rx) = watch::channel(false);
        let worker = RunWorker {
            run_id,
            seed,
            oracles: self.oracles.clone(),
            plan,
            state,
            party: request.party,
            event_bus: self.event_bus.clone(),
            cancel_rx,
            started_at,
        };
        let task = tokio::spawn(worker.run());

        Ok(RunHandle::new(run_id, cancel_tx, task, self.event_bus.clone()))
    }

    /// Subscribe to events of every run started by this explorer.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<RunEvent> {
        self.event_bus.subscribe(topic)
    }

    pub fn oracles(&self) -> &OracleBundle {
        &self.oracles
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
