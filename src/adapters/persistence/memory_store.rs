//! In-memory RecordStore for tests and dry runs. Nothing touches the disk.

use crate::domain::DomainError;
use crate::ports::RecordStore;
use serde_json::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use tracing::debug;

/// Keeps each document as a vector of records. Backups are stored under
/// `{name}.backup` in the same map.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: RefCell<HashMap<String, Vec<Value>>>,
    fail_saves: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose `save` always fails, for exercising error reporting.
    pub fn failing() -> Self {
        Self {
            fail_saves: true,
            ..Self::default()
        }
    }

    /// Seed a document directly, bypassing entity serialization.
    pub fn insert(&self, name: &str, records: Vec<Value>) {
        self.documents.borrow_mut().insert(name.to_string(), records);
    }

    pub fn get(&self, name: &str) -> Option<Vec<Value>> {
        self.documents.borrow().get(name).cloned()
    }
}

impl RecordStore for MemoryStore {
    fn load(&self, name: &str) -> Vec<Value> {
        self.get(name).unwrap_or_default()
    }

    fn save(&self, name: &str, records: &[Value]) -> Result<(), DomainError> {
        if self.fail_saves {
            return Err(DomainError::Persistence(format!("{} is read-only", name)));
        }
        debug!(name, count = records.len(), "[MEMORY] saved records");
        self.insert(name, records.to_vec());
        Ok(())
    }

    fn backup(&self, name: &str) -> Option<String> {
        let records = self.get(name)?;
        let backup_name = format!("{}.backup", name);
        self.insert(&backup_name, records);
        Some(backup_name)
    }
}
