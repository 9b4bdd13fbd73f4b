//! services/api/src/adapters/json_file.rs
//!
//! Small helpers for reading and atomically writing JSON documents.

use daily_fortune_core::{PortError, PortResult};
use serde::{de::DeserializeOwned, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Reads and deserializes `path`.
///
/// - `Ok(None)`: the file doesn't exist or is blank
/// - `Err(PortError::Corrupt)`: the content doesn't parse
pub fn read_json<T: DeserializeOwned>(path: &Path) -> PortResult<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .map_err(|e| PortError::Unexpected(format!("{}: {}", path.display(), e)))?;
    if content.trim().is_empty() {
        return Ok(None);
    }

    serde_json::from_str(&content)
        .map(Some)
        .map_err(|e| PortError::Corrupt(format!("{}: {}", path.display(), e)))
}

/// Writes `data` as pretty JSON via a temp file and rename in the same directory.
pub fn write_json_atomic<T: Serialize>(path: &Path, data: &T) -> PortResult<()> {
    let io_err = |e: std::io::Error| PortError::Unexpected(format!("{}: {}", path.display(), e));

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
    }

    let json = serde_json::to_string_pretty(data)
        .map_err(|e| PortError::Unexpected(format!("{}: {}", path.display(), e)))?;

    let tmp_path = temp_path(path)?;
    let mut tmp_file = File::create(&tmp_path).map_err(io_err)?;
    tmp_file.write_all(json.as_bytes()).map_err(io_err)?;
    tmp_file.sync_all().map_err(io_err)?;
    drop(tmp_file);

    fs::rename(&tmp_path, path).map_err(io_err)
}

fn temp_path(path: &Path) -> PortResult<PathBuf> {
    let file_name = path
        .file_name()
        .ok_or_else(|| PortError::Unexpected(format!("{} has no file name", path.display())))?;
    Ok(path.with_file_name(format!(".{}.tmp", file_name.to_string_lossy())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_and_blank_files_read_as_none() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data.json");
        assert!(read_json::<Vec<i64>>(&path).unwrap().is_none());

        fs::write(&path, "  \n").unwrap();
        assert!(read_json::<Vec<i64>>(&path).unwrap().is_none());
    }

    #[test]
    fn write_creates_parent_and_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("data.json");

        write_json_atomic(&path, &vec![1, 2, 3]).unwrap();

        assert_eq!(read_json::<Vec<i64>>(&path).unwrap(), Some(vec![1, 2, 3]));
        assert!(!temp_dir.path().join("nested").join(".data.json.tmp").exists());
    }

    #[test]
    fn malformed_content_is_corrupt() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data.json");
        fs::write(&path, "{not json").unwrap();

        let err = read_json::<Vec<i64>>(&path).unwrap_err();
        assert!(matches!(err, PortError::Corrupt(_)));
    }
}
