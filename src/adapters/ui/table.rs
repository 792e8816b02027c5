//! Plain-text tables for users, projects and tasks.

use crate::domain::{Entity, Project, Task, TaskStatus, User};
use crate::ports::TaskLookup;
use crossterm::style::{Color, Stylize};

/// Longest cell before truncation with "...".
const MAX_CELL: usize = 30;

struct Cell {
    text: String,
    color: Option<Color>,
}

impl From<String> for Cell {
    fn from(text: String) -> Self {
        Self { text, color: None }
    }
}

/// Column-aligned table. Widths come from the widest cell per column.
struct Table {
    title: &'static str,
    headers: Vec<&'static str>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    fn new(title: &'static str, headers: Vec<&'static str>) -> Self {
        Self {
            title,
            headers,
            rows: Vec::new(),
        }
    }

    fn push(&mut self, row: Vec<Cell>) {
        self.rows.push(row);
    }

    fn render(&self) -> String {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(cell.text.chars().count());
            }
        }

        let mut out = format!("{}\n", self.title.bold());
        let header: Vec<String> = self
            .headers
            .iter()
            .zip(&widths)
            .map(|(h, w)| format!("{:<w$}", h, w = *w))
            .collect();
        out.push_str(&format!("{}\n", header.join("  ").magenta().bold()));
        let rule: Vec<String> = widths.iter().map(|w| "─".repeat(*w)).collect();
        out.push_str(&rule.join("  "));
        out.push('\n');

        for row in &self.rows {
            let line: Vec<String> = row
                .iter()
                .zip(&widths)
                .map(|(cell, w)| {
                    // Pad before styling so escape codes don't skew alignment.
                    let padded = format!("{:<w$}", cell.text, w = *w);
                    match cell.color {
                        Some(color) => padded.with(color).to_string(),
                        None => padded,
                    }
                })
                .collect();
            out.push_str(line.join("  ").trim_end());
            out.push('\n');
        }
        out
    }
}

fn truncate(text: &str) -> String {
    if text.chars().count() > MAX_CELL {
        let head: String = text.chars().take(MAX_CELL - 3).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}

fn status_color(status: TaskStatus) -> Color {
    match status {
        TaskStatus::Pending => Color::Yellow,
        TaskStatus::InProgress => Color::Blue,
        TaskStatus::Completed => Color::Green,
    }
}

pub fn users_table(users: &[&User]) -> String {
    let mut table = Table::new("Users", vec!["ID", "Name", "Email", "Projects", "Created"]);
    for user in users {
        table.push(vec![
            user.id().to_string().into(),
            truncate(user.name()).into(),
            truncate(user.email()).into(),
            user.projects().len().to_string().into(),
            user.created_at().format("%Y-%m-%d %H:%M").to_string().into(),
        ]);
    }
    table.render()
}

pub fn projects_table(projects: &[&Project], tasks: &dyn TaskLookup, show_tasks: bool) -> String {
    let mut headers = vec!["ID", "Title", "Due Date", "Status", "Progress"];
    if show_tasks {
        headers.push("Tasks");
    }
    headers.push("User ID");

    let mut table = Table::new("Projects", headers);
    for project in projects {
        let status = if project.is_overdue() {
            Cell {
                text: "OVERDUE".to_string(),
                color: Some(Color::Red),
            }
        } else {
            Cell {
                text: "On Track".to_string(),
                color: Some(Color::Green),
            }
        };
        let mut row: Vec<Cell> = vec![
            project.id().to_string().into(),
            truncate(project.title()).into(),
            project.due_date().format("%Y-%m-%d").to_string().into(),
            status,
            format!("{:.1}%", project.completion_percentage(tasks)).into(),
        ];
        if show_tasks {
            row.push(project.tasks().len().to_string().into());
        }
        row.push(project.user_id().to_string().into());
        table.push(row);
    }
    table.render()
}

pub fn tasks_table(tasks: &[&Task], show_project: bool) -> String {
    let mut headers = vec!["ID", "Title", "Status", "Assigned Users"];
    if show_project {
        headers.push("Project ID");
    }

    let mut table = Table::new("Tasks", headers);
    for task in tasks {
        let mut row: Vec<Cell> = vec![
            task.id().to_string().into(),
            truncate(task.title()).into(),
            Cell {
                text: task.status().to_string(),
                color: Some(status_color(task.status())),
            },
            task.assigned_users().len().to_string().into(),
        ];
        if show_project {
            row.push(task.project_id().to_string().into());
        }
        table.push(row);
    }
    table.render()
}
