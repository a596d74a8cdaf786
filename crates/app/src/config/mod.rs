//! Application configuration module

use clap::Args;

use crate::config::{logging::LoggingConfig, storage::StorageConfig};

pub mod logging;
pub mod storage;

/// Atelier CLI configuration, read from flags with environment fallbacks.
#[derive(Debug, Args)]
pub struct AppConfig {
    /// Cart storage, catalog and currency settings.
    #[command(flatten)]
    pub storage: StorageConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,
}
