//! crates/daily_fortune_core/src/store.rs
//!
//! The fortune history store: daily eligibility, fortune selection,
//! statistics, and the policy side of backup and restore.
//!
//! The store owns the `UserState` for the lifetime of the process. Every
//! mutation is followed by a primary save and a backup fan-out.

use crate::catalog::FortuneCatalog;
use crate::domain::{
    BackupMetadata, DailyFortune, FortuneRecord, FortuneStats, HistoryEntry, UserState,
    BACKUP_FORMAT_VERSION,
};
use crate::ports::{BackupOutcome, BackupStore, Clock, StoredBackup, UserStateRepository};
use chrono::NaiveDate;
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// How many of the latest history entries are avoided when picking a fortune.
const RECENT_WINDOW: usize = 30;

//=========================================================================================
// Store Error and Result Types
//=========================================================================================

#[derive(Debug, thiserror::Error)]
pub enum FortuneError {
    #[error("Fortune already generated for {0}")]
    AlreadyGenerated(NaiveDate),
    #[error("The fortune catalog is empty")]
    EmptyCatalog,
}

pub type FortuneResult<T> = Result<T, FortuneError>;

//=========================================================================================
// The Store
//=========================================================================================

pub struct FortuneHistoryStore {
    catalog: FortuneCatalog,
    state: UserState,
    repository: Arc<dyn UserStateRepository>,
    backups: Arc<dyn BackupStore>,
    clock: Arc<dyn Clock>,
    rng: StdRng,
}

impl FortuneHistoryStore {
    /// Loads the saved state and restores from backup if the history is empty.
    ///
    /// A missing or unreadable state file starts a fresh history; `device_id`
    /// is only called in that case.
    pub fn open(
        catalog: FortuneCatalog,
        repository: Arc<dyn UserStateRepository>,
        backups: Arc<dyn BackupStore>,
        clock: Arc<dyn Clock>,
        device_id: impl FnOnce() -> String,
    ) -> Self {
        let state = match repository.load() {
            Ok(Some(state)) => {
                info!(entries = state.history.len(), "Loaded fortune history");
                state
            }
            Ok(None) => {
                info!("No saved fortune history, starting fresh");
                UserState::new(device_id())
            }
            Err(e) => {
                warn!(error = %e, "Failed to load fortune history, starting fresh");
                UserState::new(device_id())
            }
        };

        let mut store = Self {
            catalog,
            state,
            repository,
            backups,
            clock,
            rng: StdRng::from_entropy(),
        };
        store.restore_if_needed();
        store
    }

    /// Replaces the random source, e.g. with a seeded one.
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn state(&self) -> &UserState {
        &self.state
    }

    pub fn catalog(&self) -> &FortuneCatalog {
        &self.catalog
    }

    /// True iff no fortune has been generated today.
    pub fn can_generate(&self) -> bool {
        !self.state.has_entry_on(self.clock.today())
    }

    pub fn get_today(&self) -> Option<DailyFortune> {
        self.get_by_date(self.clock.today())
    }

    /// Resolves the entry for `date` against the catalog.
    /// An id that is no longer in the catalog resolves to `None`.
    pub fn get_by_date(&self, date: NaiveDate) -> Option<DailyFortune> {
        self.state.entries_on(date).find_map(|entry| {
            self.catalog
                .get(entry.fortune_id)
                .map(|record| DailyFortune::new(record, entry.timestamp))
        })
    }

    /// Picks today's fortune, records it, and persists the new history.
    pub fn generate(&mut self) -> FortuneResult<DailyFortune> {
        let now = self.clock.now();
        let today = now.date();
        if self.state.has_entry_on(today) {
            return Err(FortuneError::AlreadyGenerated(today));
        }

        let selected = self.select_fortune()?;
        self.state.history.push(HistoryEntry {
            date: today,
            fortune_id: selected.id,
            timestamp: now,
        });
        info!(fortune_id = selected.id, %today, "Generated fortune");

        self.persist();
        Ok(DailyFortune::new(&selected, now))
    }

    /// Uniform pick among fortunes not used in the last `RECENT_WINDOW` entries,
    /// or among the whole catalog when every fortune was used recently.
    fn select_fortune(&mut self) -> FortuneResult<FortuneRecord> {
        let history = &self.state.history;
        let recent_ids: HashSet<i64> = history[history.len().saturating_sub(RECENT_WINDOW)..]
            .iter()
            .map(|entry| entry.fortune_id)
            .collect();

        let mut candidates: Vec<&FortuneRecord> = self
            .catalog
            .records()
            .iter()
            .filter(|record| !recent_ids.contains(&record.id))
            .collect();
        if candidates.is_empty() {
            debug!("Every fortune was used recently, choosing from the full catalog");
            candidates = self.catalog.records().iter().collect();
        }

        candidates
            .choose(&mut self.rng)
            .map(|record| (*record).clone())
            .ok_or(FortuneError::EmptyCatalog)
    }

    /// Distinct history dates, most recent first.
    pub fn list_available_dates(&self) -> Vec<NaiveDate> {
        let dates: BTreeSet<NaiveDate> = self.state.history.iter().map(|e| e.date).collect();
        dates.into_iter().rev().collect()
    }

    /// Totals plus the streak of consecutive days ending today.
    ///
    /// The streak walks the history backwards from today and stops at the
    /// first entry that is not dated on the expected day, so it reads 0 until
    /// today's fortune exists.
    pub fn get_stats(&self) -> FortuneStats {
        let history = &self.state.history;
        let (Some(first), Some(last)) = (history.first(), history.last()) else {
            return FortuneStats::default();
        };

        let mut streak = 0;
        let mut cursor = Some(self.clock.today());
        for entry in history.iter().rev() {
            match cursor {
                Some(day) if entry.date == day => {
                    streak += 1;
                    cursor = day.pred_opt();
                }
                _ => break,
            }
        }

        FortuneStats {
            total_fortunes: history.len(),
            streak,
            first_fortune_date: Some(first.date),
            last_fortune_date: Some(last.date),
        }
    }

    //=====================================================================================
    // Backup & Restore
    //=====================================================================================

    /// Copies the current state to every backup location.
    ///
    /// An empty history is never backed up. Per-location failures are logged
    /// and returned, never raised.
    pub fn create_backup(&self) -> Vec<BackupOutcome> {
        if self.state.is_empty() {
            debug!("History is empty, skipping backup");
            return Vec::new();
        }

        let metadata = BackupMetadata {
            timestamp: self.clock.now(),
            device_id: self.state.device_id.clone(),
            version: BACKUP_FORMAT_VERSION,
        };
        let outcomes = self.backups.write_backup(&self.state, &metadata);
        for outcome in &outcomes {
            if let Err(e) = &outcome.result {
                warn!(location = %outcome.location.display(), error = %e, "Backup failed");
            }
        }
        outcomes
    }

    /// Replaces an empty history with the newest non-empty backup.
    ///
    /// Returns true if a backup was restored. On equal timestamps the
    /// earlier location wins.
    pub fn restore_if_needed(&mut self) -> bool {
        if !self.state.is_empty() {
            return false;
        }

        let mut newest: Option<StoredBackup> = None;
        for candidate in self.backups.list_backups() {
            if candidate.state.is_empty() {
                continue;
            }
            let is_newer = newest
                .as_ref()
                .map_or(true, |best| candidate.metadata.timestamp > best.metadata.timestamp);
            if is_newer {
                newest = Some(candidate);
            }
        }

        let Some(backup) = newest else {
            debug!("No backup with history found");
            return false;
        };

        info!(
            location = %backup.location.display(),
            timestamp = %backup.metadata.timestamp,
            entries = backup.state.history.len(),
            "Restoring fortune history from backup"
        );
        self.state = backup.state;
        self.persist();
        true
    }

    /// Saves the primary copy, then fans out backups.
    fn persist(&self) {
        if let Err(e) = self.repository.save(&self.state) {
            error!(error = %e, "Failed to save fortune history");
        }
        self.create_backup();
    }
}
