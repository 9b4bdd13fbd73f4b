//! services/api/src/bootstrap.rs
//!
//! Start-up wiring shared by the binaries: logging and the fortune store.

use crate::adapters::{
    device_id, DirectoryBackupStore, JsonCatalogLoader, JsonStateFile, SystemClock,
};
use crate::config::Config;
use daily_fortune_core::FortuneHistoryStore;
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the global `tracing` subscriber.
pub fn init_tracing(level: Level) {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Loads the catalog and the saved history (restoring from backup when the
/// history is empty) using the filesystem adapters.
pub fn open_store(config: &Config) -> FortuneHistoryStore {
    let catalog = JsonCatalogLoader::new(&config.catalog_path).load();
    let repository = Arc::new(JsonStateFile::new(config.user_data_path()));
    let backups = Arc::new(DirectoryBackupStore::new(config.backup_dirs.clone()));

    FortuneHistoryStore::open(
        catalog,
        repository,
        backups,
        Arc::new(SystemClock),
        device_id,
    )
}
