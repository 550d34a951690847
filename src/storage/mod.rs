//! Storage module for configuration and plan snapshots.

pub mod config;
pub mod database;
pub mod schema;
pub mod store;

pub use config::{AppConfig, ConfigError, GeneratorSettings, PlanSettings, SearchSettings};
pub use database::SqliteStore;
pub use store::{MemoryStore, SnapshotStore, StoreError};
