//! User entity.

use super::entity::{Entity, contains_ci};
use super::errors::ValidationError;
use super::relations::{EntityId, IdList};
use super::validation::{self, validate_email, validate_name};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A person who owns projects and can be assigned to tasks.
///
/// Fields are private so that every change goes through a validating setter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    user_id: EntityId,
    name: String,
    email: String,
    #[serde(default = "validation::now")]
    created_at: NaiveDateTime,
    #[serde(default)]
    projects: IdList,
}

impl User {
    /// Validates and builds a fresh user stamped with the current time.
    /// Registration (and id allocation) is the registry's job.
    pub fn new(user_id: EntityId, name: &str, email: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            user_id,
            name: validate_name(name)?,
            email: validate_email(email)?,
            created_at: validation::now(),
            projects: IdList::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }

    pub fn projects(&self) -> &IdList {
        &self.projects
    }

    pub fn set_name(&mut self, value: &str) -> Result<(), ValidationError> {
        self.name = validate_name(value)?;
        Ok(())
    }

    pub fn set_email(&mut self, value: &str) -> Result<(), ValidationError> {
        self.email = validate_email(value)?;
        Ok(())
    }

    /// Records ownership of a project on this side only.
    pub fn add_project(&mut self, project_id: EntityId) -> bool {
        self.projects.insert(project_id)
    }

    pub fn remove_project(&mut self, project_id: EntityId) -> bool {
        self.projects.remove(project_id)
    }
}

impl Entity for User {
    const KIND: &'static str = "user";
    const FILE_NAME: &'static str = "users.json";

    fn id(&self) -> EntityId {
        self.user_id
    }

    fn matches_text(&self, needle: &str) -> bool {
        contains_ci(&self.name, needle) || contains_ci(&self.email, needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_validates_name_and_email() {
        assert_eq!(
            User::new(1, "A", "a@b.c").unwrap_err(),
            ValidationError::NameTooShort
        );
        assert_eq!(
            User::new(1, "Al", "bad").unwrap_err(),
            ValidationError::InvalidEmail
        );
        let user = User::new(1, "  Al ", "a@b.c").unwrap();
        assert_eq!(user.name(), "Al");
        assert!(user.projects().is_empty());
    }

    #[test]
    fn test_rejected_setter_leaves_value() {
        let mut user = User::new(1, "Ana", "ana@x.com").unwrap();
        assert!(user.set_email("bad").is_err());
        assert_eq!(user.email(), "ana@x.com");
        assert!(user.set_name(" ").is_err());
        assert_eq!(user.name(), "Ana");
        user.set_email("a@b.c").unwrap();
        assert_eq!(user.email(), "a@b.c");
    }

    #[test]
    fn test_add_project_idempotent() {
        let mut user = User::new(1, "Ana", "ana@x.com").unwrap();
        assert!(user.add_project(4));
        assert!(!user.add_project(4));
        assert_eq!(user.projects().as_slice(), &[4]);
        assert!(!user.remove_project(9));
        assert!(user.remove_project(4));
        assert!(user.projects().is_empty());
    }

    #[test]
    fn test_record_field_names() {
        let user = User::new(3, "Ana", "ana@x.com").unwrap();
        let record = serde_json::to_value(&user).unwrap();
        let obj = record.as_object().unwrap();
        for key in ["user_id", "name", "email", "created_at", "projects"] {
            assert!(obj.contains_key(key), "missing {key}");
        }
        assert_eq!(obj["user_id"], 3);
        assert!(obj["projects"].is_array());
    }

    #[test]
    fn test_stored_duplicate_project_removed_fully() {
        let record = r#"{"user_id": 1, "name": "Ana", "email": "a@b.c", "projects": [4, 4]}"#;
        let mut user: User = serde_json::from_str(record).unwrap();
        assert_eq!(user.projects().as_slice(), &[4]);
        assert!(user.remove_project(4));
        assert!(user.projects().is_empty());
    }

    #[test]
    fn test_missing_required_field_fails() {
        let err = serde_json::from_str::<User>(r#"{"user_id": 1, "name": "Ana"}"#);
        assert!(err.is_err());
    }

    #[test]
    fn test_matches_name_or_email() {
        let user = User::new(1, "Ana Lopez", "ana@x.com").unwrap();
        assert!(user.matches_text("lopez"));
        assert!(user.matches_text("x.com"));
        assert!(!user.matches_text("bob"));
    }
}
