//! Implements InputPort. Runs one parsed CLI command against the workspace.
//!
//! Lookup misses are reported to the user and are not errors; validation and
//! persistence failures are returned so the caller skips saving.

use crate::adapters::ui::cli::Command;
use crate::adapters::ui::output::Printer;
use crate::adapters::ui::table::{projects_table, tasks_table, users_table};
use crate::domain::{DomainError, Entity, EntityId, Project, Task, TaskStatus, User};
use crate::ports::{ConfirmPort, InputPort};
use crate::usecases::Workspace;
use std::io::Write;

/// Search hits shown per entity kind before summarizing the rest.
const SEARCH_PREVIEW: usize = 5;

pub struct CommandRunner<'a, W: Write> {
    workspace: &'a mut Workspace,
    confirm: &'a dyn ConfirmPort,
    printer: Printer<W>,
    command: Command,
}

impl<'a, W: Write> CommandRunner<'a, W> {
    pub fn new(
        workspace: &'a mut Workspace,
        confirm: &'a dyn ConfirmPort,
        out: W,
        command: Command,
    ) -> Self {
        Self {
            workspace,
            confirm,
            printer: Printer::new(out),
            command,
        }
    }

    pub fn into_output(self) -> W {
        self.printer.into_inner()
    }

    fn add_user(&mut self, name: &str, email: &str) -> Result<(), DomainError> {
        self.printer.header("Add New User");
        let id = self.workspace.add_user(name, email)?;
        if let Some(user) = self.workspace.users.find_by_id(id) {
            self.printer
                .success(&format!("User created successfully: {}", describe_user(user)));
        }
        Ok(())
    }

    fn list_users(&mut self, name: Option<&str>) {
        self.printer.header("Users List");
        let ws = &*self.workspace;
        let users: Vec<&User> = match name {
            Some(name) => ws.users.find_by_name(name),
            None => ws.users.get_all().collect(),
        };
        if users.is_empty() {
            self.printer.warning("No users found.");
        } else {
            self.printer.raw(&users_table(&users));
        }
        self.printer.info(&format!("Total: {} user(s)", users.len()));
    }

    fn show_user(&mut self, user_id: Option<EntityId>, name: Option<&str>) {
        self.printer.header("User Details");
        let ws = &*self.workspace;
        let user = match (user_id, name) {
            (Some(id), _) => ws.users.find_by_id(id),
            (None, Some(name)) => {
                let found = ws.users.find_by_name(name);
                if found.len() > 1 {
                    self.printer.warning(&format!(
                        "Found multiple users with name '{}'. Showing first match.",
                        name
                    ));
                }
                found.first().copied()
            }
            (None, None) => None,
        };
        let Some(user) = user else {
            self.printer.error("User not found");
            return;
        };

        self.printer.field("ID", user.id());
        self.printer.field("Name", user.name());
        self.printer.field("Email", user.email());
        self.printer.field("Created", user.created_at());
        self.printer.field("Total Projects", user.projects().len());

        if !user.projects().is_empty() {
            self.printer.info("Projects:");
            self.printer
                .raw(&projects_table(&ws.projects_of(user), &ws.tasks, true));
        }
        let tasks = ws.tasks.find_by_user(user.id());
        if !tasks.is_empty() {
            self.printer.info("Assigned Tasks:");
            self.printer.raw(&tasks_table(&tasks, true));
        }
    }

    fn add_project(
        &mut self,
        user: &str,
        title: &str,
        description: &str,
        due_date: &str,
    ) -> Result<(), DomainError> {
        self.printer.header("Add New Project");
        let Some(owner) = self.resolve_user(user) else {
            self.printer.error(&format!("User '{}' not found", user));
            return Ok(());
        };
        let id = self
            .workspace
            .add_project(owner, title, description, due_date)?;
        if let Some(project) = self.workspace.projects.find_by_id(id) {
            self.printer.success(&format!(
                "Project created successfully: {}",
                describe_project(project)
            ));
        }
        Ok(())
    }

    fn list_projects(&mut self, user: Option<&str>, overdue: bool) {
        self.printer.header("Projects List");
        let owner = match user {
            Some(ident) => {
                let owner = self.resolve_user(ident);
                if owner.is_none() {
                    self.printer.warning(&format!("User '{}' not found", ident));
                }
                owner
            }
            None => None,
        };
        let ws = &*self.workspace;
        let projects = ws.projects.find(|p| {
            owner.is_none_or(|id| p.user_id() == id) && (!overdue || p.is_overdue())
        });
        if projects.is_empty() {
            self.printer.warning("No projects found.");
        } else {
            self.printer.raw(&projects_table(&projects, &ws.tasks, true));
        }
        self.printer
            .info(&format!("Total: {} project(s)", projects.len()));
    }

    fn show_project(&mut self, project_id: EntityId) {
        self.printer.header("Project Details");
        let ws = &*self.workspace;
        let Some(project) = ws.projects.find_by_id(project_id) else {
            self.printer
                .error(&format!("Project with ID {} not found", project_id));
            return;
        };

        let description = if project.description().is_empty() {
            "No description"
        } else {
            project.description()
        };
        self.printer.field("ID", project.id());
        self.printer.field("Title", project.title());
        self.printer.field("Description", description);
        self.printer
            .field("Due Date", project.due_date().format("%Y-%m-%d"));
        self.printer.field("Status", overdue_label(project));
        self.printer.field(
            "Completion",
            format!("{:.1}%", ws.completion_percentage(project)),
        );
        if let Some(owner) = ws.users.find_by_id(project.user_id()) {
            self.printer
                .field("Owner", format!("{} (ID: {})", owner.name(), owner.id()));
        }

        if project.tasks().is_empty() {
            self.printer.info("No tasks in this project.");
        } else {
            self.printer.info("Tasks:");
            self.printer.raw(&tasks_table(&ws.tasks_of(project), false));
        }
    }

    fn add_task(
        &mut self,
        project: &str,
        title: &str,
        description: &str,
        assign: &[String],
    ) -> Result<(), DomainError> {
        self.printer.header("Add New Task");
        let Some(project_id) = self.resolve_project(project) else {
            self.printer
                .error(&format!("Project '{}' not found", project));
            return Ok(());
        };
        let task_id = self.workspace.add_task(project_id, title, description)?;

        for assignee in assign {
            match self.resolve_user(assignee) {
                Some(user_id) => {
                    self.workspace.assign_user(task_id, user_id)?;
                    let name = self.user_name(user_id);
                    self.printer.info(&format!("Assigned task to {}", name));
                }
                None => self.printer.warning(&format!(
                    "User '{}' not found, skipping assignment",
                    assignee
                )),
            }
        }

        if let Some(task) = self.workspace.tasks.find_by_id(task_id) {
            self.printer
                .success(&format!("Task created successfully: {}", describe_task(task)));
        }
        Ok(())
    }

    fn list_tasks(&mut self, project: Option<&str>, user: Option<&str>, status: Option<TaskStatus>) {
        self.printer.header("Tasks List");
        let project_id = match project {
            Some(ident) => {
                let found = self.resolve_project(ident);
                if found.is_none() {
                    self.printer
                        .warning(&format!("Project '{}' not found", ident));
                }
                found
            }
            None => None,
        };
        let user_id = match user {
            Some(ident) => {
                let found = self.resolve_user(ident);
                if found.is_none() {
                    self.printer.warning(&format!("User '{}' not found", ident));
                }
                found
            }
            None => None,
        };

        let ws = &*self.workspace;
        let tasks = ws.tasks.find(|t| {
            project_id.is_none_or(|id| t.project_id() == id)
                && user_id.is_none_or(|id| t.is_assigned(id))
                && status.is_none_or(|s| t.status() == s)
        });
        if tasks.is_empty() {
            self.printer.warning("No tasks found.");
        } else {
            self.printer.raw(&tasks_table(&tasks, true));
        }
        self.printer.info(&format!("Total: {} task(s)", tasks.len()));
    }

    fn update_task(&mut self, task_id: EntityId, status: TaskStatus) -> Result<(), DomainError> {
        self.printer.header("Update Task");
        if self.workspace.tasks.find_by_id(task_id).is_none() {
            self.printer
                .error(&format!("Task with ID {} not found", task_id));
            return Ok(());
        }
        let old = self.workspace.set_task_status(task_id, status)?;
        self.printer
            .success(&format!("Task status updated: {} → {}", old, status));
        Ok(())
    }

    fn complete_task(&mut self, task_id: EntityId) -> Result<(), DomainError> {
        self.printer.header("Complete Task");
        let Some(task) = self.workspace.tasks.find_by_id(task_id) else {
            self.printer
                .error(&format!("Task with ID {} not found", task_id));
            return Ok(());
        };

        if task.is_completed() {
            self.printer.warning("Task is already completed");
            if !self.confirm.confirm("Mark as pending instead?")? {
                return Ok(());
            }
            self.workspace
                .set_task_status(task_id, TaskStatus::Pending)?;
            self.printer.success("Task marked as pending");
        } else {
            self.workspace.complete_task(task_id)?;
            self.printer.success("Task marked as completed");
        }
        Ok(())
    }

    fn assign_task(&mut self, task_id: EntityId, user: &str) -> Result<(), DomainError> {
        self.printer.header("Assign Task");
        if self.workspace.tasks.find_by_id(task_id).is_none() {
            self.printer
                .error(&format!("Task with ID {} not found", task_id));
            return Ok(());
        }
        let Some(user_id) = self.resolve_user(user) else {
            self.printer.error(&format!("User '{}' not found", user));
            return Ok(());
        };
        let assigned = self
            .workspace
            .tasks
            .find_by_id(task_id)
            .is_some_and(|t| t.is_assigned(user_id));
        let name = self.user_name(user_id);

        if assigned {
            self.printer
                .warning(&format!("Task already assigned to {}", name));
            if self.confirm.confirm("Remove assignment?")? {
                self.workspace.unassign_user(task_id, user_id)?;
                self.printer
                    .success(&format!("Task unassigned from {}", name));
            }
        } else {
            self.workspace.assign_user(task_id, user_id)?;
            self.printer.success(&format!("Task assigned to {}", name));
        }
        Ok(())
    }

    fn search(&mut self, query: &str) {
        self.printer
            .header(&format!("Search Results for '{}'", query));
        let ws = &*self.workspace;
        let hits = ws.search(query);
        if hits.is_empty() {
            self.printer.warning("No results found");
            return;
        }

        if !hits.users.is_empty() {
            self.printer
                .info(&format!("Users ({}):", hits.users.len()));
            self.printer.raw(&users_table(preview(&hits.users)));
            more(&mut self.printer, hits.users.len());
        }
        if !hits.projects.is_empty() {
            self.printer
                .info(&format!("Projects ({}):", hits.projects.len()));
            self.printer
                .raw(&projects_table(preview(&hits.projects), &ws.tasks, false));
            more(&mut self.printer, hits.projects.len());
        }
        if !hits.tasks.is_empty() {
            self.printer
                .info(&format!("Tasks ({}):", hits.tasks.len()));
            self.printer.raw(&tasks_table(preview(&hits.tasks), true));
            more(&mut self.printer, hits.tasks.len());
        }
    }

    fn backup(&mut self) {
        self.printer.header("Backup");
        for (name, backup) in self.workspace.backup_all() {
            match backup {
                Some(backup) => self
                    .printer
                    .success(&format!("Backed up {} to {}", name, backup)),
                None => self
                    .printer
                    .warning(&format!("Skipped {}: nothing to back up", name)),
            }
        }
    }

    fn resolve_user(&mut self, identifier: &str) -> Option<EntityId> {
        let resolved = self.workspace.resolve_user(identifier)?;
        if resolved.ambiguous {
            self.printer.warning(&format!(
                "Multiple users found with name '{}'. Using first match.",
                identifier
            ));
        }
        Some(resolved.id)
    }

    fn resolve_project(&mut self, identifier: &str) -> Option<EntityId> {
        let resolved = self.workspace.resolve_project(identifier)?;
        if resolved.ambiguous {
            self.printer.warning(&format!(
                "Multiple projects found with title '{}'. Using first match.",
                identifier
            ));
        }
        Some(resolved.id)
    }

    fn user_name(&self, user_id: EntityId) -> String {
        self.workspace
            .users
            .find_by_id(user_id)
            .map(|u| u.name().to_string())
            .unwrap_or_else(|| format!("user {}", user_id))
    }
}

impl<W: Write> InputPort for CommandRunner<'_, W> {
    fn run(&mut self) -> Result<(), DomainError> {
        match self.command.clone() {
            Command::AddUser { name, email } => self.add_user(&name, &email)?,
            Command::ListUsers { name } => self.list_users(name.as_deref()),
            Command::ShowUser { user_id, name } => self.show_user(user_id, name.as_deref()),
            Command::AddProject {
                user,
                title,
                description,
                due_date,
            } => self.add_project(&user, &title, &description, &due_date)?,
            Command::ListProjects { user, overdue } => {
                self.list_projects(user.as_deref(), overdue)
            }
            Command::ShowProject { project_id } => self.show_project(project_id),
            Command::AddTask {
                project,
                title,
                description,
                assign,
            } => self.add_task(&project, &title, &description, &assign)?,
            Command::ListTasks {
                project,
                user,
                status,
            } => self.list_tasks(project.as_deref(), user.as_deref(), status.map(Into::into)),
            Command::UpdateTask { task_id, status } => {
                self.update_task(task_id, status.into())?
            }
            Command::CompleteTask { task_id } => self.complete_task(task_id)?,
            Command::AssignTask { task_id, user } => self.assign_task(task_id, &user)?,
            Command::Search { query } => self.search(&query),
            Command::Backup => self.backup(),
        }
        Ok(())
    }
}

fn more<W: Write>(printer: &mut Printer<W>, total: usize) {
    if total > SEARCH_PREVIEW {
        printer.info(&format!("... and {} more", total - SEARCH_PREVIEW));
    }
}

fn preview<'a, T>(items: &'a [&'a T]) -> &'a [&'a T] {
    &items[..items.len().min(SEARCH_PREVIEW)]
}

fn overdue_label(project: &Project) -> &'static str {
    if project.is_overdue() {
        "OVERDUE"
    } else {
        "On Track"
    }
}

fn describe_user(user: &User) -> String {
    format!(
        "User(ID: {}, Name: {}, Email: {}, Projects: {})",
        user.id(),
        user.name(),
        user.email(),
        user.projects().len()
    )
}

fn describe_project(project: &Project) -> String {
    let overdue = if project.is_overdue() { " (OVERDUE)" } else { "" };
    format!(
        "Project(ID: {}, Title: {}, Due: {}{}, Tasks: {})",
        project.id(),
        project.title(),
        project.due_date().format("%Y-%m-%d"),
        overdue,
        project.tasks().len()
    )
}

fn describe_task(task: &Task) -> String {
    format!(
        "Task(ID: {}, Title: {}, Status: {}, Project: {}, Assigned: {})",
        task.id(),
        task.title(),
        task.status(),
        task.project_id(),
        task.assigned_users().len()
    )
}
