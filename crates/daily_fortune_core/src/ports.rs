//! crates/daily_fortune_core/src/ports.rs
//!
//! Defines the service contracts (traits) the fortune store depends on.
//! These traits form the boundary of the hexagonal architecture, keeping the
//! core independent of the filesystem layout and of the wall clock.

use crate::domain::{BackupMetadata, UserState};
use chrono::{NaiveDate, NaiveDateTime};
use std::path::PathBuf;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Stored data is corrupt: {0}")]
    Corrupt(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Backup Reporting Types
//=========================================================================================

/// The result of writing one backup location.
#[derive(Debug)]
pub struct BackupOutcome {
    pub location: PathBuf,
    pub result: PortResult<()>,
}

/// A readable backup found while scanning the backup locations.
#[derive(Debug, Clone)]
pub struct StoredBackup {
    pub location: PathBuf,
    pub metadata: BackupMetadata,
    pub state: UserState,
}

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// Primary storage for the single `UserState` document.
pub trait UserStateRepository: Send + Sync {
    /// Returns `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> PortResult<Option<UserState>>;

    fn save(&self, state: &UserState) -> PortResult<()>;
}

/// Redundant copies of the user state kept outside the primary data directory.
pub trait BackupStore: Send + Sync {
    /// Writes `state` and `metadata` to every location, one outcome per location.
    /// A failure at one location never stops the others from being attempted.
    fn write_backup(&self, state: &UserState, metadata: &BackupMetadata) -> Vec<BackupOutcome>;

    /// Every backup that could be read, in location priority order.
    fn list_backups(&self) -> Vec<StoredBackup>;
}

/// Source of "now" in the host's local time.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}
