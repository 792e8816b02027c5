//! Project entity and its derived state.

use super::entity::{Entity, contains_ci};
use super::errors::ValidationError;
use super::relations::{EntityId, IdList};
use super::task::TaskStatus;
use super::validation::{
    self, deserialize_due_date, normalize_description, parse_due_date, validate_title,
};
use crate::ports::TaskLookup;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A project owned by one user and holding an ordered list of task ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    project_id: EntityId,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(deserialize_with = "deserialize_due_date")]
    due_date: NaiveDateTime,
    user_id: EntityId,
    #[serde(default)]
    tasks: IdList,
    #[serde(default = "validation::now")]
    created_at: NaiveDateTime,
}

impl Project {
    /// Validates and builds a project owned by `user_id`.
    pub fn new(
        project_id: EntityId,
        title: &str,
        description: &str,
        due_date: &str,
        user_id: EntityId,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            project_id,
            title: validate_title(title)?,
            description: normalize_description(description),
            due_date: parse_due_date(due_date)?,
            user_id,
            tasks: IdList::new(),
            created_at: validation::now(),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn due_date(&self) -> NaiveDateTime {
        self.due_date
    }

    pub fn user_id(&self) -> EntityId {
        self.user_id
    }

    pub fn tasks(&self) -> &IdList {
        &self.tasks
    }

    pub fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }

    pub fn set_title(&mut self, value: &str) -> Result<(), ValidationError> {
        self.title = validate_title(value)?;
        Ok(())
    }

    pub fn set_description(&mut self, value: &str) {
        self.description = normalize_description(value);
    }

    pub fn set_due_date(&mut self, value: &str) -> Result<(), ValidationError> {
        self.due_date = parse_due_date(value)?;
        Ok(())
    }

    pub fn add_task(&mut self, task_id: EntityId) -> bool {
        self.tasks.insert(task_id)
    }

    pub fn remove_task(&mut self, task_id: EntityId) -> bool {
        self.tasks.remove(task_id)
    }

    /// True once the current local time is strictly past the due date.
    pub fn is_overdue(&self) -> bool {
        self.is_overdue_at(validation::now())
    }

    pub fn is_overdue_at(&self, now: NaiveDateTime) -> bool {
        now > self.due_date
    }

    /// Share of this project's tasks that are completed, as 0.0..=100.0.
    ///
    /// Task ids the lookup cannot resolve count neither toward the total nor
    /// toward completed.
    pub fn completion_percentage(&self, lookup: &dyn TaskLookup) -> f64 {
        let (total, completed) = self
            .tasks
            .iter()
            .filter_map(|id| lookup.task_status(id))
            .fold((0usize, 0usize), |(total, done), status| {
                (total + 1, done + usize::from(status == TaskStatus::Completed))
            });
        if total == 0 {
            return 0.0;
        }
        completed as f64 / total as f64 * 100.0
    }
}

impl Entity for Project {
    const KIND: &'static str = "project";
    const FILE_NAME: &'static str = "projects.json";

    fn id(&self) -> EntityId {
        self.project_id
    }

    fn matches_text(&self, needle: &str) -> bool {
        contains_ci(&self.title, needle) || contains_ci(&self.description, needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use std::collections::HashMap;

    /// Fixed task statuses standing in for the task registry.
    struct FakeTasks(HashMap<EntityId, TaskStatus>);

    impl TaskLookup for FakeTasks {
        fn task_status(&self, task_id: EntityId) -> Option<TaskStatus> {
            self.0.get(&task_id).copied()
        }
    }

    fn project_due(due: &str) -> Project {
        Project::new(1, "Launch", "", due, 1).unwrap()
    }

    #[test]
    fn test_add_task_idempotent() {
        let mut project = project_due("2099-01-01");
        assert!(project.add_task(3));
        assert!(!project.add_task(3));
        assert!(project.add_task(1));
        assert_eq!(project.tasks().as_slice(), &[3, 1]);
        assert!(!project.remove_task(9));
        assert!(project.remove_task(3));
        assert!(!project.remove_task(3));
        assert_eq!(project.tasks().as_slice(), &[1]);
    }

    #[test]
    fn test_stored_duplicate_task_counted_once() {
        let record = r#"{"project_id":1,"title":"x","due_date":"2099-01-01","user_id":1,"tasks":[1,1,2]}"#;
        let project: Project = serde_json::from_str(record).unwrap();
        assert_eq!(project.tasks().as_slice(), &[1, 2]);
        let tasks = FakeTasks(HashMap::from([
            (1, TaskStatus::Completed),
            (2, TaskStatus::Pending),
        ]));
        assert_eq!(project.completion_percentage(&tasks), 50.0);
    }

    #[test]
    fn test_invalid_due_date_rejected() {
        let err = Project::new(1, "Launch", "", "soon", 1).unwrap_err();
        assert_eq!(err, ValidationError::InvalidDate("soon".to_string()));

        let mut project = project_due("2099-01-01");
        let before = project.due_date();
        assert!(project.set_due_date("31/12/2024").is_err());
        assert_eq!(project.due_date(), before);
    }

    #[test]
    fn test_overdue_yesterday() {
        let yesterday = (validation::now() - Duration::days(1))
            .format("%Y-%m-%d")
            .to_string();
        assert!(project_due(&yesterday).is_overdue());
        assert!(!project_due("2099-01-01").is_overdue());
    }

    #[test]
    fn test_due_today_not_overdue_until_midnight_passes() {
        let project = project_due("2024-05-01");
        let midnight = project.due_date();
        assert!(!project.is_overdue_at(midnight));
        assert!(project.is_overdue_at(midnight + Duration::seconds(1)));
    }

    #[test]
    fn test_completion_half() {
        let mut project = project_due("2099-01-01");
        project.add_task(1);
        project.add_task(2);
        let tasks = FakeTasks(HashMap::from([
            (1, TaskStatus::Completed),
            (2, TaskStatus::InProgress),
        ]));
        assert_eq!(project.completion_percentage(&tasks), 50.0);
    }

    #[test]
    fn test_completion_no_tasks() {
        let project = project_due("2099-01-01");
        assert_eq!(project.completion_percentage(&FakeTasks(HashMap::new())), 0.0);
    }

    #[test]
    fn test_completion_skips_dangling_ids() {
        let mut project = project_due("2099-01-01");
        project.add_task(1);
        project.add_task(42);
        let tasks = FakeTasks(HashMap::from([(1, TaskStatus::Completed)]));
        assert_eq!(project.completion_percentage(&tasks), 100.0);

        let mut orphaned = project_due("2099-01-01");
        orphaned.add_task(42);
        assert_eq!(orphaned.completion_percentage(&tasks), 0.0);
    }

    #[test]
    fn test_due_date_wire_format() {
        let project = project_due("2099-01-01");
        let record = serde_json::to_value(&project).unwrap();
        assert_eq!(record["due_date"], "2099-01-01T00:00:00");
        let back: Project = serde_json::from_value(record).unwrap();
        assert_eq!(back, project);
    }

    #[test]
    fn test_bare_date_on_disk_accepted() {
        let record = r#"{"project_id":2,"title":"x","due_date":"2030-06-01","user_id":1}"#;
        let project: Project = serde_json::from_str(record).unwrap();
        assert_eq!(project.due_date(), parse_due_date("2030-06-01").unwrap());
        assert!(project.tasks().is_empty());
    }
}
