//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters (and by fakes in tests).

use crate::domain::{DomainError, EntityId, TaskStatus};
use serde_json::Value;

/// Persistence adapter. Each named document is an ordered sequence of flat records.
///
/// Implementations must make sure the storage location exists before any read or write.
pub trait RecordStore {
    /// Read every record of `name`. A missing document is an empty sequence.
    /// Unreadable or malformed documents are logged and also yield an empty
    /// sequence ("corrupt file, start fresh"), so this never fails.
    fn load(&self, name: &str) -> Vec<Value>;

    /// Replace the whole document with `records`, preserving their order.
    fn save(&self, name: &str, records: &[Value]) -> Result<(), DomainError>;

    /// Copy the current document to a sibling backup. Returns the backup name,
    /// or `None` if there is nothing to back up or the copy failed.
    fn backup(&self, name: &str) -> Option<String>;
}

/// Read-only task status lookup. Lets a project compute its completion without
/// holding a reference to the task registry itself.
pub trait TaskLookup {
    /// Status of `task_id`, or `None` if no such task is loaded.
    fn task_status(&self, task_id: EntityId) -> Option<TaskStatus>;
}

/// Yes/no confirmation from whoever is driving the CLI.
pub trait ConfirmPort {
    /// Ask `message`; a refusal or a dismissed prompt is `Ok(false)`.
    fn confirm(&self, message: &str) -> Result<bool, DomainError>;
}
