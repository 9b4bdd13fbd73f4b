//! services/api/src/adapters/catalog.rs
//!
//! Loads the fortune catalog from a JSON file of `{id, text, category}` objects.
//! Loading never fails: a missing or unreadable file yields the built-in set.

use crate::adapters::json_file::read_json;
use daily_fortune_core::{FortuneCatalog, FortuneRecord};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Clone, Debug)]
pub struct JsonCatalogLoader {
    path: PathBuf,
}

impl JsonCatalogLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn load(&self) -> FortuneCatalog {
        match read_json::<Vec<FortuneRecord>>(&self.path) {
            Ok(Some(records)) => {
                let catalog = FortuneCatalog::from_records(records);
                info!(path = %self.path.display(), fortunes = catalog.len(), "Loaded fortune catalog");
                catalog
            }
            Ok(None) => {
                info!(path = %self.path.display(), "No fortune catalog found, using the built-in set");
                FortuneCatalog::builtin()
            }
            Err(e) => {
                warn!(error = %e, "Failed to load fortune catalog, using the built-in set");
                FortuneCatalog::builtin()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn reads_catalog_in_file_order() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("fortunes.json");
        fs::write(
            &path,
            r#"[
                {"id": 20, "text": "Luck follows the curious", "category": "wisdom"},
                {"id": 11, "text": "A door opens this week", "category": "success"}
            ]"#,
        )
        .unwrap();

        let catalog = JsonCatalogLoader::new(&path).load();
        let ids: Vec<i64> = catalog.records().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![20, 11]);
        assert_eq!(catalog.get(11).unwrap().category, "success");
    }

    #[test]
    fn missing_file_uses_builtin() {
        let temp_dir = TempDir::new().unwrap();
        let catalog = JsonCatalogLoader::new(temp_dir.path().join("absent.json")).load();
        assert_eq!(catalog.len(), 10);
    }

    #[test]
    fn corrupt_file_uses_builtin() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("fortunes.json");
        fs::write(&path, r#"[{"id": "one"}]"#).unwrap();

        let catalog = JsonCatalogLoader::new(&path).load();
        assert_eq!(catalog.len(), 10);
        assert_eq!(catalog.get(1).unwrap().text, "Today brings new opportunities your way");
    }
}
