//! Implements RecordStore using one pretty-printed JSON array per document.
//!
//! Layout: {base_dir}/users.json, projects.json, tasks.json. Backups sit next to them.

use crate::domain::DomainError;
use crate::ports::RecordStore;
use chrono::Local;
use serde_json::Value;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// JSON file-based record storage rooted at a data directory.
pub struct JsonStore {
    base_dir: PathBuf,
}

impl JsonStore {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.base_dir.join(name)
    }

    /// Creates the data directory on first use.
    fn ensure_dir(&self) -> Result<(), DomainError> {
        if !self.base_dir.exists() {
            fs::create_dir_all(&self.base_dir)
                .map_err(|e| DomainError::Persistence(format!("create data dir: {}", e)))?;
            info!(path = %self.base_dir.display(), "created data directory");
        }
        Ok(())
    }

    /// Write-replace: temp file, fsync, rename over the target.
    /// A crash mid-write leaves the previous document intact; a failed write
    /// removes its temp file.
    fn write_atomic(&self, name: &str, contents: &[u8]) -> Result<(), DomainError> {
        let path = self.path_for(name);
        let temp_path = self.path_for(&format!("{}.tmp", name));

        let result = Self::write_then_rename(&temp_path, &path, contents);
        if result.is_err() && temp_path.exists() {
            if let Err(e) = fs::remove_file(&temp_path) {
                warn!(path = %temp_path.display(), error = %e, "could not remove temp file");
            }
        }
        result
    }

    fn write_then_rename(temp_path: &Path, path: &Path, contents: &[u8]) -> Result<(), DomainError> {
        let mut f = fs::File::create(temp_path)
            .map_err(|e| DomainError::Persistence(format!("create temp file: {}", e)))?;
        f.write_all(contents)
            .map_err(|e| DomainError::Persistence(format!("write temp file: {}", e)))?;
        f.sync_all()
            .map_err(|e| DomainError::Persistence(format!("sync temp file: {}", e)))?;
        drop(f);

        fs::rename(temp_path, path)
            .map_err(|e| DomainError::Persistence(format!("atomic rename failed: {}", e)))
    }
}

impl RecordStore for JsonStore {
    fn load(&self, name: &str) -> Vec<Value> {
        if let Err(e) = self.ensure_dir() {
            error!(error = %e, "cannot prepare data directory");
            return Vec::new();
        }
        let path = self.path_for(name);
        let text = match fs::read_to_string(&path) {
            Ok(s) => s,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(path = %path.display(), "file does not exist, starting empty");
                return Vec::new();
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "error reading data file");
                return Vec::new();
            }
        };
        match serde_json::from_str::<Vec<Value>>(&text) {
            Ok(records) => {
                info!(path = %path.display(), count = records.len(), "loaded records");
                records
            }
            Err(e) => {
                // Corrupt file: start fresh. The next save overwrites it.
                error!(path = %path.display(), error = %e, "error decoding JSON, ignoring file");
                Vec::new()
            }
        }
    }

    fn save(&self, name: &str, records: &[Value]) -> Result<(), DomainError> {
        self.ensure_dir()?;
        let json = serde_json::to_string_pretty(records)
            .map_err(|e| DomainError::Persistence(e.to_string()))?;
        if let Err(e) = self.write_atomic(name, json.as_bytes()) {
            error!(name, error = %e, "error saving data");
            return Err(e);
        }
        info!(
            path = %self.path_for(name).display(),
            count = records.len(),
            "saved records"
        );
        Ok(())
    }

    fn backup(&self, name: &str) -> Option<String> {
        if let Err(e) = self.ensure_dir() {
            error!(error = %e, "cannot prepare data directory");
            return None;
        }
        let path = self.path_for(name);
        if !path.exists() {
            warn!(name, "cannot back up: file does not exist");
            return None;
        }
        let stamp = Local::now().format("%Y%m%d-%H%M%S");
        let backup_name = format!("{}.{}.backup", name, stamp);
        match fs::copy(&path, self.path_for(&backup_name)) {
            Ok(_) => {
                info!(backup = %backup_name, "created backup");
                Some(backup_name)
            }
            Err(e) => {
                error!(name, error = %e, "error creating backup");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path());
        assert!(store.load("users.json").is_empty());
    }

    #[test]
    fn test_save_creates_dir_and_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("nested").join("data"));
        let records = vec![json!({"user_id": 2, "name": "Bo"}), json!({"user_id": 1})];
        store.save("users.json", &records).unwrap();
        assert!(store.base_dir().join("users.json").exists());
        assert!(!store.base_dir().join("users.json.tmp").exists());
        assert_eq!(store.load("users.json"), records);
    }

    #[test]
    fn test_save_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path());
        store.save("tasks.json", &[json!({"a": 1}), json!({"a": 2})]).unwrap();
        store.save("tasks.json", &[json!({"a": 3})]).unwrap();
        assert_eq!(store.load("tasks.json"), vec![json!({"a": 3})]);
    }

    #[test]
    fn test_failed_rename_removes_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("users.json");
        fs::create_dir(&blocker).unwrap();
        fs::write(blocker.join("keep"), "x").unwrap();

        let store = JsonStore::new(dir.path());
        let err = store.save("users.json", &[json!({"user_id": 1})]).unwrap_err();
        assert!(matches!(err, DomainError::Persistence(_)));
        assert!(!dir.path().join("users.json.tmp").exists());
        assert!(blocker.join("keep").exists());
    }

    #[test]
    fn test_malformed_json_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("projects.json"), "[{\"project_id\": 1,").unwrap();
        let store = JsonStore::new(dir.path());
        assert!(store.load("projects.json").is_empty());
    }

    #[test]
    fn test_non_array_document_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("users.json"), r#"{"users": []}"#).unwrap();
        let store = JsonStore::new(dir.path());
        assert!(store.load("users.json").is_empty());
    }

    #[test]
    fn test_backup_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path());
        assert_eq!(store.backup("users.json"), None);
    }

    #[test]
    fn test_backup_copies_contents() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path());
        store.save("users.json", &[json!({"user_id": 1})]).unwrap();
        let name = store.backup("users.json").unwrap();
        assert!(name.starts_with("users.json."));
        assert!(name.ends_with(".backup"));
        let original = fs::read_to_string(dir.path().join("users.json")).unwrap();
        let copy = fs::read_to_string(dir.path().join(&name)).unwrap();
        assert_eq!(original, copy);
    }
}
