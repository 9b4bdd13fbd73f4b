//! services/api/src/adapters/backup.rs
//!
//! Keeps redundant copies of the user state in a fixed list of directories.
//! Implements the `BackupStore` port from the core crate.
//!
//! Each backup is a pair of files sharing one stem:
//!
//! ```text
//! fortune_backup_20240101_093000_000000.json       # the UserState
//! fortune_backup_20240101_093000_000000.meta.json  # {timestamp, device_id, version}
//! ```

use crate::adapters::json_file::{read_json, write_json_atomic};
use daily_fortune_core::{
    BackupMetadata, BackupOutcome, BackupStore, PortError, PortResult, StoredBackup, UserState,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{debug, warn};

const BACKUP_PREFIX: &str = "fortune_backup_";
const META_SUFFIX: &str = ".meta.json";
const DATA_SUFFIX: &str = ".json";

/// How many backup pairs each directory retains.
pub const BACKUPS_PER_LOCATION: usize = 5;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

#[derive(Clone, Debug)]
pub struct DirectoryBackupStore {
    locations: Vec<PathBuf>,
    keep: usize,
}

impl DirectoryBackupStore {
    /// `locations` are in restore priority order.
    pub fn new(locations: Vec<PathBuf>) -> Self {
        Self {
            locations,
            keep: BACKUPS_PER_LOCATION,
        }
    }

    pub fn backup_locations(&self) -> &[PathBuf] {
        &self.locations
    }

    fn write_location(
        &self,
        dir: &Path,
        state: &UserState,
        metadata: &BackupMetadata,
    ) -> PortResult<()> {
        fs::create_dir_all(dir)
            .map_err(|e| PortError::Unexpected(format!("{}: {}", dir.display(), e)))?;

        let stem = format!(
            "{}{}",
            BACKUP_PREFIX,
            metadata.timestamp.format("%Y%m%d_%H%M%S_%6f")
        );
        write_json_atomic(&dir.join(format!("{stem}{DATA_SUFFIX}")), state)?;
        write_json_atomic(&dir.join(format!("{stem}{META_SUFFIX}")), metadata)
    }

    /// Deletes all but the `keep` most recently modified backups in `dir`.
    /// Deletion failures are logged and skipped.
    fn prune(&self, dir: &Path) {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                debug!(location = %dir.display(), error = %e, "Cannot list backup directory for pruning");
                return;
            }
        };

        let mut backups: Vec<(SystemTime, String)> = entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                let name = entry.file_name().into_string().ok()?;
                backup_stem(&name)?;
                let modified = entry
                    .metadata()
                    .and_then(|m| m.modified())
                    .unwrap_or(SystemTime::UNIX_EPOCH);
                Some((modified, name))
            })
            .collect();
        backups.sort_by(|a, b| b.cmp(a));

        for (_, name) in backups.into_iter().skip(self.keep) {
            let data_path = dir.join(&name);
            if let Err(e) = fs::remove_file(&data_path) {
                debug!(path = %data_path.display(), error = %e, "Failed to delete old backup");
            }
            if let Some(stem) = backup_stem(&name) {
                let meta_path = dir.join(format!("{stem}{META_SUFFIX}"));
                if let Err(e) = fs::remove_file(&meta_path) {
                    debug!(path = %meta_path.display(), error = %e, "Failed to delete old backup metadata");
                }
            }
        }
    }

    /// Every readable backup in `dir`, ordered by file name.
    fn read_location(&self, dir: &Path) -> Vec<StoredBackup> {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                debug!(location = %dir.display(), error = %e, "Skipping backup location");
                return Vec::new();
            }
        };

        let mut meta_names: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| name.starts_with(BACKUP_PREFIX) && name.ends_with(META_SUFFIX))
            .collect();
        meta_names.sort();

        meta_names
            .into_iter()
            .filter_map(|meta_name| {
                let stem = meta_name.strip_suffix(META_SUFFIX)?;
                let data_path = dir.join(format!("{stem}{DATA_SUFFIX}"));
                let metadata = read_or_skip::<BackupMetadata>(&dir.join(&meta_name))?;
                let state = read_or_skip::<UserState>(&data_path)?;
                Some(StoredBackup {
                    location: dir.to_path_buf(),
                    metadata,
                    state,
                })
            })
            .collect()
    }
}

//=========================================================================================
// `BackupStore` Trait Implementation
//=========================================================================================

impl BackupStore for DirectoryBackupStore {
    fn write_backup(&self, state: &UserState, metadata: &BackupMetadata) -> Vec<BackupOutcome> {
        self.locations
            .iter()
            .map(|dir| {
                let result = self.write_location(dir, state, metadata);
                if result.is_ok() {
                    self.prune(dir);
                }
                BackupOutcome {
                    location: dir.clone(),
                    result,
                }
            })
            .collect()
    }

    fn list_backups(&self) -> Vec<StoredBackup> {
        self.locations
            .iter()
            .flat_map(|dir| self.read_location(dir))
            .collect()
    }
}

//=========================================================================================
// Helpers
//=========================================================================================

/// The shared stem of a backup data file name, or `None` for any other file.
fn backup_stem(name: &str) -> Option<&str> {
    if !name.starts_with(BACKUP_PREFIX) || name.ends_with(META_SUFFIX) {
        return None;
    }
    name.strip_suffix(DATA_SUFFIX)
}

fn read_or_skip<T: serde::de::DeserializeOwned>(path: &Path) -> Option<T> {
    match read_json(path) {
        Ok(value) => value,
        Err(e) => {
            warn!(error = %e, "Skipping unreadable backup file");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate, NaiveDateTime};
    use daily_fortune_core::{HistoryEntry, BACKUP_FORMAT_VERSION};
    use tempfile::TempDir;

    fn start() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn state_with(entries: i64) -> UserState {
        let mut state = UserState::new("device");
        for n in 0..entries {
            let timestamp = start() + Duration::days(n);
            state.history.push(HistoryEntry {
                date: timestamp.date(),
                fortune_id: n + 1,
                timestamp,
            });
        }
        state
    }

    fn metadata(timestamp: NaiveDateTime) -> BackupMetadata {
        BackupMetadata {
            timestamp,
            device_id: "device".to_string(),
            version: BACKUP_FORMAT_VERSION,
        }
    }

    fn file_names(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn writes_a_pair_to_every_location() {
        let temp_dir = TempDir::new().unwrap();
        let dirs = vec![temp_dir.path().join("docs"), temp_dir.path().join("home")];
        let store = DirectoryBackupStore::new(dirs.clone());

        let outcomes = store.write_backup(&state_with(2), &metadata(start()));

        assert_eq!(store.backup_locations(), dirs.as_slice());
        assert_eq!(outcomes.len(), 2);
        assert!(outcomes.iter().all(|o| o.result.is_ok()));
        for dir in &dirs {
            assert_eq!(
                file_names(dir),
                vec![
                    "fortune_backup_20240101_090000_000000.json".to_string(),
                    "fortune_backup_20240101_090000_000000.meta.json".to_string(),
                ]
            );
        }
    }

    #[test]
    fn a_failing_location_does_not_stop_the_others() {
        let temp_dir = TempDir::new().unwrap();
        let blocked = temp_dir.path().join("blocked");
        fs::write(&blocked, "not a directory").unwrap();
        let good = temp_dir.path().join("good");
        let store = DirectoryBackupStore::new(vec![blocked.clone(), good.clone()]);

        let outcomes = store.write_backup(&state_with(1), &metadata(start()));

        assert_eq!(outcomes[0].location, blocked);
        assert!(outcomes[0].result.is_err());
        assert!(outcomes[1].result.is_ok());
        assert_eq!(file_names(&good).len(), 2);
    }

    #[test]
    fn keeps_only_the_five_most_recent_pairs() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("backups");
        let store = DirectoryBackupStore::new(vec![dir.clone()]);

        for n in 0..7 {
            let stamp = start() + Duration::seconds(n);
            store.write_backup(&state_with(1), &metadata(stamp));
        }

        let names = file_names(&dir);
        assert_eq!(names.len(), 10);
        for n in 2..7 {
            let stem = format!("fortune_backup_20240101_0900{:02}_000000", n);
            assert!(names.contains(&format!("{stem}.json")));
            assert!(names.contains(&format!("{stem}.meta.json")));
        }
        assert!(!names.iter().any(|n| n.contains("090000") || n.contains("090001")));
    }

    #[test]
    fn pruning_ignores_unrelated_files() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("backups");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("notes.json"), "{}").unwrap();
        let store = DirectoryBackupStore::new(vec![dir.clone()]);

        for n in 0..6 {
            store.write_backup(&state_with(1), &metadata(start() + Duration::seconds(n)));
        }

        assert!(dir.join("notes.json").exists());
        assert_eq!(file_names(&dir).len(), 11);
    }

    #[test]
    fn lists_backups_in_location_order() {
        let temp_dir = TempDir::new().unwrap();
        let first = temp_dir.path().join("first");
        let second = temp_dir.path().join("second");
        let store = DirectoryBackupStore::new(vec![first.clone(), second.clone()]);
        store.write_backup(&state_with(3), &metadata(start()));

        let backups = store.list_backups();

        assert_eq!(backups.len(), 2);
        assert_eq!(backups[0].location, first);
        assert_eq!(backups[1].location, second);
        assert_eq!(backups[0].state, state_with(3));
        assert_eq!(backups[0].metadata, metadata(start()));
    }

    #[test]
    fn unreadable_backups_are_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("backups");
        DirectoryBackupStore::new(vec![dir.clone()])
            .write_backup(&state_with(1), &metadata(start()));
        fs::write(
            dir.join("fortune_backup_20991231_000000_000000.meta.json"),
            "{broken",
        )
        .unwrap();
        fs::write(
            dir.join("fortune_backup_20981231_000000_000000.meta.json"),
            serde_json::to_string(&metadata(start())).unwrap(),
        )
        .unwrap();

        let store = DirectoryBackupStore::new(vec![temp_dir.path().join("missing"), dir]);
        let backups = store.list_backups();

        assert_eq!(backups.len(), 1);
        assert_eq!(backups[0].metadata.timestamp, start());
    }
}
