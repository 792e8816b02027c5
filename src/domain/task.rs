//! Task entity and its status.

use super::entity::{Entity, contains_ci};
use super::errors::ValidationError;
use super::relations::{EntityId, IdList};
use super::validation::{self, normalize_description, validate_title};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [
        TaskStatus::Pending,
        TaskStatus::InProgress,
        TaskStatus::Completed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TaskStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidStatus(s.to_string()))
    }
}

/// A unit of work inside a project, assignable to any number of users.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    task_id: EntityId,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    status: TaskStatus,
    project_id: EntityId,
    #[serde(default)]
    assigned_users: IdList,
    #[serde(default = "validation::now")]
    created_at: NaiveDateTime,
}

impl Task {
    /// Validates and builds a pending task owned by `project_id`.
    pub fn new(
        task_id: EntityId,
        title: &str,
        description: &str,
        project_id: EntityId,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            task_id,
            title: validate_title(title)?,
            description: normalize_description(description),
            status: TaskStatus::Pending,
            project_id,
            assigned_users: IdList::new(),
            created_at: validation::now(),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn status(&self) -> TaskStatus {
        self.status
    }

    pub fn project_id(&self) -> EntityId {
        self.project_id
    }

    pub fn assigned_users(&self) -> &IdList {
        &self.assigned_users
    }

    pub fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }

    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }

    pub fn set_title(&mut self, value: &str) -> Result<(), ValidationError> {
        self.title = validate_title(value)?;
        Ok(())
    }

    pub fn set_description(&mut self, value: &str) {
        self.description = normalize_description(value);
    }

    pub fn set_status(&mut self, status: TaskStatus) {
        self.status = status;
    }

    /// String form of [`Task::set_status`]; unknown values leave the status untouched.
    pub fn set_status_str(&mut self, value: &str) -> Result<(), ValidationError> {
        self.status = value.parse()?;
        Ok(())
    }

    pub fn mark_complete(&mut self) {
        self.status = TaskStatus::Completed;
    }

    pub fn is_assigned(&self, user_id: EntityId) -> bool {
        self.assigned_users.contains(user_id)
    }

    pub fn assign_user(&mut self, user_id: EntityId) -> bool {
        self.assigned_users.insert(user_id)
    }

    pub fn unassign_user(&mut self, user_id: EntityId) -> bool {
        self.assigned_users.remove(user_id)
    }
}

impl Entity for Task {
    const KIND: &'static str = "task";
    const FILE_NAME: &'static str = "tasks.json";

    fn id(&self) -> EntityId {
        self.task_id
    }

    fn matches_text(&self, needle: &str) -> bool {
        contains_ci(&self.title, needle) || contains_ci(&self.description, needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_task_is_pending() {
        let task = Task::new(1, "Write doc", "", 1).unwrap();
        assert_eq!(task.status(), TaskStatus::Pending);
        assert!(!task.is_completed());
    }

    #[test]
    fn test_mark_complete() {
        let mut task = Task::new(1, "Write doc", "", 1).unwrap();
        task.mark_complete();
        assert_eq!(task.status(), TaskStatus::Completed);
        assert!(task.is_completed());
    }

    #[test]
    fn test_bogus_status_rejected_and_unchanged() {
        let mut task = Task::new(1, "Write doc", "", 1).unwrap();
        task.set_status_str("in_progress").unwrap();
        let err = task.set_status_str("bogus").unwrap_err();
        assert_eq!(err, ValidationError::InvalidStatus("bogus".to_string()));
        assert_eq!(task.status(), TaskStatus::InProgress);
    }

    #[test]
    fn test_empty_title_rejected() {
        assert_eq!(
            Task::new(1, "  ", "", 1).unwrap_err(),
            ValidationError::EmptyTitle
        );
        let mut task = Task::new(1, "Write doc", "", 1).unwrap();
        assert!(task.set_title("").is_err());
        assert_eq!(task.title(), "Write doc");
    }

    #[test]
    fn test_assign_idempotent() {
        let mut task = Task::new(1, "Write doc", "", 1).unwrap();
        assert!(task.assign_user(2));
        assert!(!task.assign_user(2));
        assert!(task.assign_user(5));
        assert_eq!(task.assigned_users().as_slice(), &[2, 5]);
        assert!(!task.unassign_user(7));
        assert!(task.unassign_user(2));
        assert!(!task.is_assigned(2));
    }

    #[test]
    fn test_status_wire_names() {
        let mut task = Task::new(1, "Write doc", "", 1).unwrap();
        task.set_status(TaskStatus::InProgress);
        let record = serde_json::to_value(&task).unwrap();
        assert_eq!(record["status"], "in_progress");
        let bad = r#"{"task_id":1,"title":"x","status":"bogus","project_id":1}"#;
        assert!(serde_json::from_str::<Task>(bad).is_err());
    }

    #[test]
    fn test_lenient_optional_fields() {
        let record = r#"{"task_id":4,"title":"x","project_id":2}"#;
        let task: Task = serde_json::from_str(record).unwrap();
        assert_eq!(task.id(), 4);
        assert_eq!(task.description(), "");
        assert_eq!(task.status(), TaskStatus::Pending);
        assert!(task.assigned_users().is_empty());
    }
}
