//! Shared data model, progress reporting, and configuration for `bizdir`.

mod app_config;
mod config;
pub mod progress;
pub mod record;
pub mod stats;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use progress::{NullSink, ProgressEvent, ProgressSink, TracingSink};
pub use record::{
    dedupe_records, has_usable_phone, CompanyField, Deduplicator, Record, RecordKey,
    NOT_AVAILABLE, PHONE_NOT_FOUND,
};
pub use stats::{CrawlStats, EnrichmentStats};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
