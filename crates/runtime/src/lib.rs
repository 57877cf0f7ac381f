//! Runtime orchestration for deterministic dungeon runs.
//!
//! This crate loads master data through an asynchronous source boundary and
//! drives exploration runs as tokio tasks. Consumers build an [`Explorer`],
//! start runs with [`Explorer::start`], and observe them through the
//! [`RunHandle`] and the topic-based [`EventBus`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the explorer and its configuration
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides the topic-based event bus
//! - [`oracle`] adapts master-data sources to the core oracle traits
//! - `workers` keeps the per-run task internal to the crate
pub mod api;
pub mod events;
pub mod oracle;
pub mod runtime;

mod workers;

pub use api::{Result, RunHandle, RunId, RunReport, RunRequest, RuntimeError};
pub use events::{EventBus, RunEvent, Topic};
pub use oracle::{ContentDirectorySource, MasterDataSource, OracleBundle, StaticSource};
pub use runtime::{Explorer, RuntimeConfig};
