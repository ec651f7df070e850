use std::fs;
use std::path::{Path, PathBuf};

use super::Index;
use crate::error::{Error, Result};
use crate::fs_ops::FileSystemOps;

/// Reads and replaces the persisted `index.json`.
#[derive(Debug, Clone)]
pub struct IndexStore {
    path: PathBuf,
}

impl IndexStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the index, or an empty one if the file does not exist yet.
    pub fn load(&self) -> Result<Index> {
        if !self.path.exists() {
            tracing::debug!("no index at {}, using an empty one", self.path.display());
            return Ok(Index::default());
        }

        let content = fs::read_to_string(&self.path).map_err(|e| Error::io(&self.path, e))?;

        serde_json::from_str(&content).map_err(|source| Error::CorruptIndex {
            path: self.path.clone(),
            source,
        })
    }

    /// Replace the index file as a whole.
    ///
    /// The JSON is written to a temporary file next to the target and renamed
    /// over it, so a concurrent reader sees either the old or the new index.
    pub fn save(&self, index: &Index) -> Result<()> {
        let mut data = serde_json::to_string_pretty(index)?;
        data.push('\n');

        FileSystemOps::write_atomic(&self.path, data.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::{Index, SymbolRecord};
    use chrono::Utc;
    use tempfile::TempDir;

    fn sample_index() -> Index {
        let record = SymbolRecord {
            name: "calculateHandlingTime".to_string(),
            file: "src/a.ts".to_string(),
            line: 10,
            file_type: "ts".to_string(),
            description: "計算處理時間 Computes handling time".to_string(),
            context: "export function calculateHandlingTime(order: Order) {".to_string(),
            method: None,
            route: None,
        };
        Index::new(Utc::now(), vec![record], Vec::new(), Vec::new())
    }

    #[test]
    fn test_round_trip() {
        let tmp = TempDir::new().unwrap();
        let store = IndexStore::new(tmp.path().join("wiki").join("index.json"));
        let index = sample_index();

        store.save(&index).unwrap();
        let loaded = store.load().unwrap();

        assert_eq!(loaded, index);
    }

    #[test]
    fn test_non_ascii_written_literally() {
        let tmp = TempDir::new().unwrap();
        let store = IndexStore::new(tmp.path().join("index.json"));
        store.save(&sample_index()).unwrap();

        let raw = fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("計算處理時間"));
        assert!(raw.contains("\n  \"version\": \"1.0\""));
    }

    #[test]
    fn test_missing_file_is_empty_index() {
        let tmp = TempDir::new().unwrap();
        let store = IndexStore::new(tmp.path().join("index.json"));
        let index = store.load().unwrap();
        assert!(index.is_empty());
    }

    #[test]
    fn test_loads_index_with_offsetless_timestamp() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("index.json");
        fs::write(
            &path,
            r#"{
  "generated_at": "2025-10-19T06:44:00.123456",
  "version": "1.0",
  "functions": [
    {
      "name": "calculateHandlingTime",
      "file": "src/a.ts",
      "line": 10,
      "file_type": "ts",
      "description": "",
      "context": "export function calculateHandlingTime(order: Order) {"
    }
  ],
  "classes": [],
  "apis": [],
  "statistics": {"total_functions": 1, "total_classes": 0, "total_apis": 0}
}"#,
        )
        .unwrap();

        let index = IndexStore::new(&path).load().unwrap();
        assert_eq!(index.functions.len(), 1);
        assert_eq!(index.functions[0].name, "calculateHandlingTime");
        assert_eq!(
            index.generated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            "2025-10-19 06:44:00"
        );
    }

    #[test]
    fn test_corrupt_file_fails_fast() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("index.json");
        fs::write(&path, "{ \"functions\": [").unwrap();

        let err = IndexStore::new(&path).load().unwrap_err();
        assert!(matches!(err, Error::CorruptIndex { .. }));
        assert!(err.to_string().contains("codewiki generate"));
    }

    #[test]
    fn test_save_replaces_previous_index() {
        let tmp = TempDir::new().unwrap();
        let store = IndexStore::new(tmp.path().join("index.json"));
        store.save(&sample_index()).unwrap();
        store.save(&Index::new(Utc::now(), Vec::new(), Vec::new(), Vec::new())).unwrap();

        assert!(store.load().unwrap().is_empty());
        let leftovers = fs::read_dir(tmp.path()).unwrap().count();
        assert_eq!(leftovers, 1);
    }
}
