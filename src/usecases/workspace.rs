//! Workspace service. Owns the three registries and their store, and performs the
//! two-sided relationship updates the CLI needs (the entities themselves only ever
//! touch their own lists).

use crate::domain::{DomainError, Entity, EntityId, Project, Task, TaskStatus, User};
use crate::ports::RecordStore;
use crate::usecases::registry::{ProjectRegistry, TaskRegistry, UserRegistry};
use tracing::{error, info};

/// Outcome of resolving a user-typed identifier (numeric id or name/title fragment).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved {
    pub id: EntityId,
    /// More than one name/title matched; `id` is the first in insertion order.
    pub ambiguous: bool,
}

/// Cross-entity search hits, each group in insertion order.
#[derive(Debug, Default)]
pub struct SearchResults<'a> {
    pub users: Vec<&'a User>,
    pub projects: Vec<&'a Project>,
    pub tasks: Vec<&'a Task>,
}

impl SearchResults<'_> {
    pub fn is_empty(&self) -> bool {
        self.users.is_empty() && self.projects.is_empty() && self.tasks.is_empty()
    }
}

/// Counts from a successful `load_all`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadSummary {
    pub users: usize,
    pub projects: usize,
    pub tasks: usize,
}

pub struct Workspace {
    pub users: UserRegistry,
    pub projects: ProjectRegistry,
    pub tasks: TaskRegistry,
    store: Box<dyn RecordStore>,
}

impl Workspace {
    pub fn new(store: Box<dyn RecordStore>) -> Self {
        Self {
            users: UserRegistry::new(),
            projects: ProjectRegistry::new(),
            tasks: TaskRegistry::new(),
            store,
        }
    }

    pub fn store(&self) -> &dyn RecordStore {
        self.store.as_ref()
    }

    /// Reloads all three registries. Either all of them are replaced or none is.
    pub fn load_all(&mut self) -> Result<LoadSummary, DomainError> {
        let mut users = UserRegistry::new();
        let mut projects = ProjectRegistry::new();
        let mut tasks = TaskRegistry::new();
        let summary = LoadSummary {
            users: users.load_all(self.store.as_ref())?,
            projects: projects.load_all(self.store.as_ref())?,
            tasks: tasks.load_all(self.store.as_ref())?,
        };
        self.users = users;
        self.projects = projects;
        self.tasks = tasks;
        Ok(summary)
    }

    /// Writes all three registries. Every kind is attempted; the first failure is returned.
    pub fn save_all(&self) -> Result<(), DomainError> {
        let results = [
            (User::KIND, self.users.save_all(self.store.as_ref())),
            (Project::KIND, self.projects.save_all(self.store.as_ref())),
            (Task::KIND, self.tasks.save_all(self.store.as_ref())),
        ];
        let mut first_err = None;
        for (kind, result) in results {
            if let Err(e) = result {
                error!(kind, error = %e, "save failed");
                first_err.get_or_insert(e);
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => {
                info!("workspace saved");
                Ok(())
            }
        }
    }

    /// Backs up each kind's document. Pairs the document name with the backup name, if any.
    pub fn backup_all(&self) -> Vec<(&'static str, Option<String>)> {
        [User::FILE_NAME, Project::FILE_NAME, Task::FILE_NAME]
            .into_iter()
            .map(|name| (name, self.store.backup(name)))
            .collect()
    }

    pub fn add_user(&mut self, name: &str, email: &str) -> Result<EntityId, DomainError> {
        Ok(self.users.create(name, email)?.id())
    }

    /// Creates a project owned by `user_id` and records it on the user.
    pub fn add_project(
        &mut self,
        user_id: EntityId,
        title: &str,
        description: &str,
        due_date: &str,
    ) -> Result<EntityId, DomainError> {
        if self.users.find_by_id(user_id).is_none() {
            return Err(DomainError::NotFound(format!("User {} not found", user_id)));
        }
        let project_id = self
            .projects
            .create(title, description, due_date, user_id)?
            .id();
        if let Some(user) = self.users.find_by_id_mut(user_id) {
            user.add_project(project_id);
        }
        Ok(project_id)
    }

    /// Creates a task under `project_id` and records it on the project.
    pub fn add_task(
        &mut self,
        project_id: EntityId,
        title: &str,
        description: &str,
    ) -> Result<EntityId, DomainError> {
        if self.projects.find_by_id(project_id).is_none() {
            return Err(DomainError::NotFound(format!(
                "Project {} not found",
                project_id
            )));
        }
        let task_id = self.tasks.create(title, description, project_id)?.id();
        if let Some(project) = self.projects.find_by_id_mut(project_id) {
            project.add_task(task_id);
        }
        Ok(task_id)
    }

    /// Assigns a user to a task. Returns whether the assignment is new.
    pub fn assign_user(&mut self, task_id: EntityId, user_id: EntityId) -> Result<bool, DomainError> {
        if self.users.find_by_id(user_id).is_none() {
            return Err(DomainError::NotFound(format!("User {} not found", user_id)));
        }
        Ok(self.task_mut(task_id)?.assign_user(user_id))
    }

    pub fn unassign_user(
        &mut self,
        task_id: EntityId,
        user_id: EntityId,
    ) -> Result<bool, DomainError> {
        Ok(self.task_mut(task_id)?.unassign_user(user_id))
    }

    /// Sets a task's status and returns the previous one.
    pub fn set_task_status(
        &mut self,
        task_id: EntityId,
        status: TaskStatus,
    ) -> Result<TaskStatus, DomainError> {
        let task = self.task_mut(task_id)?;
        let old = task.status();
        task.set_status(status);
        Ok(old)
    }

    pub fn complete_task(&mut self, task_id: EntityId) -> Result<(), DomainError> {
        self.task_mut(task_id)?.mark_complete();
        Ok(())
    }

    fn task_mut(&mut self, task_id: EntityId) -> Result<&mut Task, DomainError> {
        self.tasks
            .find_by_id_mut(task_id)
            .ok_or_else(|| DomainError::NotFound(format!("Task with ID {} not found", task_id)))
    }

    /// Numeric id first, then case-insensitive name fragment.
    pub fn resolve_user(&self, identifier: &str) -> Option<Resolved> {
        if let Some(user) = parse_id(identifier).and_then(|id| self.users.find_by_id(id)) {
            return Some(Resolved {
                id: user.id(),
                ambiguous: false,
            });
        }
        first_match(self.users.find_by_name(identifier.trim()))
    }

    /// Numeric id first, then case-insensitive title fragment.
    pub fn resolve_project(&self, identifier: &str) -> Option<Resolved> {
        if let Some(project) = parse_id(identifier).and_then(|id| self.projects.find_by_id(id)) {
            return Some(Resolved {
                id: project.id(),
                ambiguous: false,
            });
        }
        first_match(self.projects.find_by_title(identifier.trim()))
    }

    pub fn search(&self, query: &str) -> SearchResults<'_> {
        SearchResults {
            users: self.users.search(query),
            projects: self.projects.search(query),
            tasks: self.tasks.search(query),
        }
    }

    pub fn completion_percentage(&self, project: &Project) -> f64 {
        project.completion_percentage(&self.tasks)
    }

    /// Projects listed on the user, in list order. Dangling ids are skipped.
    pub fn projects_of(&self, user: &User) -> Vec<&Project> {
        user.projects()
            .iter()
            .filter_map(|id| self.projects.find_by_id(id))
            .collect()
    }

    /// Tasks listed on the project, in list order. Dangling ids are skipped.
    pub fn tasks_of(&self, project: &Project) -> Vec<&Task> {
        project
            .tasks()
            .iter()
            .filter_map(|id| self.tasks.find_by_id(id))
            .collect()
    }
}

fn parse_id(identifier: &str) -> Option<EntityId> {
    identifier.trim().parse().ok()
}

fn first_match<E: Entity>(matches: Vec<&E>) -> Option<Resolved> {
    matches.first().map(|e| Resolved {
        id: e.id(),
        ambiguous: matches.len() > 1,
    })
}
