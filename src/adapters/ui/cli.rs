//! Command-line surface. Subcommands mirror the entity operations one to one.

use crate::domain::TaskStatus;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "projman",
    version,
    about = "Manage users, projects and tasks stored as JSON files",
    after_help = "Examples:
  projman add-user --name \"John Doe\" --email \"john@example.com\"
  projman add-project --user \"John Doe\" --title \"New Project\" --due-date 2024-12-31
  projman add-task --project \"New Project\" --title \"Implement feature\" --assign 1
  projman complete-task --task-id 1"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Directory holding users.json, projects.json, tasks.json")]
    pub data_dir: Option<String>,
    #[arg(short, long, global = true, help = "Verbose logging (debug)")]
    pub verbose: bool,
    #[arg(short = 'y', long, global = true, help = "Answer yes to every confirmation prompt")]
    pub yes: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Add a new user
    AddUser {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
    },
    /// List all users
    ListUsers {
        #[arg(long, help = "Filter by name")]
        name: Option<String>,
    },
    /// Show user details
    ShowUser {
        #[arg(long)]
        user_id: Option<u64>,
        #[arg(long)]
        name: Option<String>,
    },
    /// Add a new project
    AddProject {
        #[arg(long, help = "User name or ID")]
        user: String,
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, help = "Due date (YYYY-MM-DD)")]
        due_date: String,
    },
    /// List projects
    ListProjects {
        #[arg(long, help = "Filter by user name or ID")]
        user: Option<String>,
        #[arg(long, help = "Show only overdue projects")]
        overdue: bool,
    },
    /// Show project details
    ShowProject {
        #[arg(long)]
        project_id: u64,
    },
    /// Add a new task
    AddTask {
        #[arg(long, help = "Project title or ID")]
        project: String,
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, help = "Assign to user (repeatable)")]
        assign: Vec<String>,
    },
    /// List tasks
    ListTasks {
        #[arg(long, help = "Filter by project title or ID")]
        project: Option<String>,
        #[arg(long, help = "Filter by assigned user name or ID")]
        user: Option<String>,
        #[arg(long, value_enum)]
        status: Option<StatusArg>,
    },
    /// Update task status
    UpdateTask {
        #[arg(long)]
        task_id: u64,
        #[arg(long, value_enum)]
        status: StatusArg,
    },
    /// Mark task as completed
    CompleteTask {
        #[arg(long)]
        task_id: u64,
    },
    /// Assign task to user
    AssignTask {
        #[arg(long)]
        task_id: u64,
        #[arg(long, help = "User name or ID")]
        user: String,
    },
    /// Search across all entities
    Search {
        #[arg(long)]
        query: String,
    },
    /// Copy every data file to a timestamped backup
    Backup,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "snake_case")]
pub enum StatusArg {
    Pending,
    InProgress,
    Completed,
}

impl From<StatusArg> for TaskStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Pending => TaskStatus::Pending,
            StatusArg::InProgress => TaskStatus::InProgress,
            StatusArg::Completed => TaskStatus::Completed,
        }
    }
}
