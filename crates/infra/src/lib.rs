//! Infrastructure layer: record storage and configuration.

pub mod config;
pub mod record_store;

pub use config::{AppConfig, ConfigError};
pub use record_store::{InMemoryRecordStore, RecordStore};
