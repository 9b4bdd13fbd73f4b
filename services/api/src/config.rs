//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::ffi::OsString;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
    #[error("Cannot find the home directory")]
    HomeDirNotFound,
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub log_level: Level,
    /// Directory holding the primary `user_data.json`.
    pub data_dir: PathBuf,
    pub catalog_path: PathBuf,
    /// Backup directories in restore priority order.
    pub backup_dirs: Vec<PathBuf>,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination.
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        // --- Load Server Settings ---
        let bind_address_str =
            std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "127.0.0.1:8000".to_string());
        let bind_address = bind_address_str.parse::<SocketAddr>().map_err(|e| {
            ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string())
        })?;

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        // --- Load Storage Locations ---
        let home = dirs::home_dir().ok_or(ConfigError::HomeDirNotFound)?;

        let data_dir = std::env::var_os("FORTUNE_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| home.join(".dailyfortune"));

        let catalog_path = std::env::var_os("FORTUNE_CATALOG_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./fortunes.json"));

        let backup_dirs = match std::env::var_os("FORTUNE_BACKUP_DIRS") {
            Some(value) => parse_backup_dirs(&value)?,
            None => default_backup_dirs(&home),
        };

        Ok(Self {
            bind_address,
            log_level,
            data_dir,
            catalog_path,
            backup_dirs,
        })
    }

    pub fn user_data_path(&self) -> PathBuf {
        self.data_dir.join("user_data.json")
    }
}

/// The three well-known backup directories: documents, desktop, then home.
pub fn default_backup_dirs(home: &Path) -> Vec<PathBuf> {
    let documents = dirs::document_dir().unwrap_or_else(|| home.join("Documents"));
    let desktop = dirs::desktop_dir().unwrap_or_else(|| home.join("Desktop"));
    vec![
        documents.join("DailyFortune").join("backups"),
        desktop.join(".dailyfortune_backup"),
        home.join(".dailyfortune_backup"),
    ]
}

fn parse_backup_dirs(value: &OsString) -> Result<Vec<PathBuf>, ConfigError> {
    let dirs: Vec<PathBuf> = std::env::split_paths(value)
        .filter(|path| !path.as_os_str().is_empty())
        .collect();
    if dirs.is_empty() {
        return Err(ConfigError::InvalidValue(
            "FORTUNE_BACKUP_DIRS".to_string(),
            "no directories listed".to_string(),
        ));
    }
    Ok(dirs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_backup_dirs_end_in_home() {
        let home = PathBuf::from("/home/tester");
        let dirs = default_backup_dirs(&home);
        assert_eq!(dirs.len(), 3);
        assert!(dirs[0].ends_with("DailyFortune/backups"));
        assert!(dirs[1].ends_with(".dailyfortune_backup"));
        assert_eq!(dirs[2], home.join(".dailyfortune_backup"));
    }

    #[test]
    fn backup_dirs_override_keeps_order() {
        let joined = std::env::join_paths(["/tmp/a", "/tmp/b"]).unwrap();
        let dirs = parse_backup_dirs(&joined).unwrap();
        assert_eq!(dirs, vec![PathBuf::from("/tmp/a"), PathBuf::from("/tmp/b")]);
    }

    #[test]
    fn empty_backup_dirs_override_is_rejected() {
        let err = parse_backup_dirs(&OsString::new()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(name, _) if name == "FORTUNE_BACKUP_DIRS"));
    }
}
