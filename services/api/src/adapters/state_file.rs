//! services/api/src/adapters/state_file.rs
//!
//! The primary `user_data.json` store. Implements the `UserStateRepository`
//! port from the core crate.

use crate::adapters::json_file::{read_json, write_json_atomic};
use daily_fortune_core::{PortResult, UserState, UserStateRepository};
use std::path::{Path, PathBuf};

#[derive(Clone, Debug)]
pub struct JsonStateFile {
    path: PathBuf,
}

impl JsonStateFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl UserStateRepository for JsonStateFile {
    fn load(&self) -> PortResult<Option<UserState>> {
        read_json(&self.path)
    }

    fn save(&self, state: &UserState) -> PortResult<()> {
        write_json_atomic(&self.path, state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use daily_fortune_core::{HistoryEntry, PortError};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn save_then_load_keeps_history_order() {
        let temp_dir = TempDir::new().unwrap();
        let repo = JsonStateFile::new(temp_dir.path().join(".dailyfortune").join("user_data.json"));
        assert!(repo.load().unwrap().is_none());

        let mut state = UserState::new("0011223344556677");
        for (d, id) in [(2, 5), (1, 9)] {
            let date = NaiveDate::from_ymd_opt(2024, 1, d).unwrap();
            state.history.push(HistoryEntry {
                date,
                fortune_id: id,
                timestamp: date.and_hms_micro_opt(7, 45, 1, 250_000).unwrap(),
            });
        }
        repo.save(&state).unwrap();

        assert_eq!(repo.load().unwrap(), Some(state));
    }

    #[test]
    fn saved_file_uses_plain_date_strings() {
        let temp_dir = TempDir::new().unwrap();
        let repo = JsonStateFile::new(temp_dir.path().join("user_data.json"));
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let mut state = UserState::new("abc");
        state.history.push(HistoryEntry {
            date,
            fortune_id: 4,
            timestamp: date.and_hms_opt(12, 0, 0).unwrap(),
        });
        repo.save(&state).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(repo.path()).unwrap()).unwrap();
        assert_eq!(raw["history"][0]["date"], "2024-01-01");
        assert_eq!(raw["history"][0]["fortune_id"], 4);
    }

    #[test]
    fn corrupt_file_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("user_data.json");
        fs::write(&path, "[]").unwrap();

        let err = JsonStateFile::new(&path).load().unwrap_err();
        assert!(matches!(err, PortError::Corrupt(_)));
    }
}
