//! crates/daily_fortune_core/src/domain.rs
//!
//! Defines the core data structures for the application.
//! The serde field names are the on-disk JSON names, so catalog, state and
//! backup files written by earlier versions of the app stay readable.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Version stamped into every backup metadata file.
pub const BACKUP_FORMAT_VERSION: u32 = 1;

/// A single fortune from the catalog. Immutable once the catalog is loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FortuneRecord {
    pub id: i64,
    pub text: String,
    pub category: String,
}

/// One generated fortune in the history log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub date: NaiveDate,
    pub fortune_id: i64,
    pub timestamp: NaiveDateTime,
}

/// Everything persisted for one device.
///
/// `history` is append-only and kept in generation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserState {
    pub device_id: String,
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
}

impl UserState {
    /// A first-run state with an empty history.
    pub fn new(device_id: impl Into<String>) -> Self {
        Self {
            device_id: device_id.into(),
            history: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Returns true if any entry is dated `date`.
    pub fn has_entry_on(&self, date: NaiveDate) -> bool {
        self.history.iter().any(|entry| entry.date == date)
    }

    /// All entries dated `date`, in history order.
    pub fn entries_on(&self, date: NaiveDate) -> impl Iterator<Item = &HistoryEntry> {
        self.history.iter().filter(move |entry| entry.date == date)
    }
}

/// The small sidecar file written next to every backup copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupMetadata {
    pub timestamp: NaiveDateTime,
    pub device_id: String,
    pub version: u32,
}

/// A catalog fortune enriched with the moment it was generated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyFortune {
    pub id: i64,
    pub text: String,
    pub category: String,
    pub generated_at: NaiveDateTime,
}

impl DailyFortune {
    pub fn new(record: &FortuneRecord, generated_at: NaiveDateTime) -> Self {
        Self {
            id: record.id,
            text: record.text.clone(),
            category: record.category.clone(),
            generated_at,
        }
    }
}

/// Summary numbers shown by the front ends.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FortuneStats {
    pub total_fortunes: usize,
    pub streak: u32,
    #[serde(rename = "first_fortune")]
    pub first_fortune_date: Option<NaiveDate>,
    #[serde(rename = "last_fortune")]
    pub last_fortune_date: Option<NaiveDate>,
}
