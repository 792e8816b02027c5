use projman::adapters::persistence::JsonStore;
use projman::adapters::ui::cli::Command;
use projman::adapters::ui::commands::CommandRunner;
use projman::adapters::ui::prompt::FixedConfirm;
use projman::domain::{DomainError, Entity, TaskStatus};
use projman::ports::InputPort;
use projman::usecases::Workspace;
use std::path::Path;

fn open(dir: &Path) -> Workspace {
    let mut ws = Workspace::new(Box::new(JsonStore::new(dir)));
    ws.load_all().unwrap();
    ws
}

fn run(dir: &Path, command: Command) -> String {
    let mut ws = open(dir);
    let confirm = FixedConfirm(true);
    let mut runner = CommandRunner::new(&mut ws, &confirm, Vec::new(), command);
    runner.run().unwrap();
    let out = String::from_utf8(runner.into_output()).unwrap();
    ws.save_all().unwrap();
    out
}

#[test]
fn test_scenario_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut ws = open(dir.path());
        let alice = ws.add_user("Alice", "a@x.io").unwrap();
        let launch = ws.add_project(alice, "Launch", "", "2030-01-01").unwrap();
        let spec = ws.add_task(launch, "Spec", "").unwrap();
        let build = ws.add_task(launch, "Build", "").unwrap();
        ws.complete_task(spec).unwrap();
        ws.set_task_status(build, TaskStatus::Completed).unwrap();
        ws.save_all().unwrap();
    }

    let ws = open(dir.path());
    assert_eq!(ws.users.len(), 1);
    let project = ws.projects.find_by_id(1).unwrap();
    assert_eq!(project.tasks().as_slice(), &[1, 2]);
    assert_eq!(ws.users.find_by_id(1).unwrap().projects().as_slice(), &[1]);
    assert_eq!(ws.completion_percentage(project), 100.0);
    assert!(!project.is_overdue());
    assert_eq!(ws.tasks.next_id(), 3);
}

#[test]
fn test_next_id_follows_highest_stored_id() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("users.json"),
        r#"[
  {"user_id": 3, "name": "Cy", "email": "c@x.io", "projects": []},
  {"user_id": 7, "name": "Gil", "email": "g@x.io", "projects": []},
  {"user_id": 1, "name": "Ann", "email": "a@x.io", "projects": []}
]"#,
    )
    .unwrap();

    let mut ws = open(dir.path());
    let order: Vec<u64> = ws.users.get_all().map(|u| u.id()).collect();
    assert_eq!(order, [3, 7, 1]);
    assert_eq!(ws.add_user("Dee", "d@x.io").unwrap(), 8);
}

#[test]
fn test_corrupt_file_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("tasks.json"), "{ not json").unwrap();

    let mut ws = open(dir.path());
    assert!(ws.tasks.is_empty());
    ws.save_all().unwrap();
    let text = std::fs::read_to_string(dir.path().join("tasks.json")).unwrap();
    assert_eq!(text.trim(), "[]");
}

#[test]
fn test_malformed_record_aborts_load() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("tasks.json"),
        r#"[{"task_id": 1, "title": "Doc", "project_id": 1, "status": "done"}]"#,
    )
    .unwrap();

    let mut ws = Workspace::new(Box::new(JsonStore::new(dir.path())));
    let err = ws.load_all().unwrap_err();
    assert!(matches!(
        err,
        DomainError::MalformedRecord {
            kind: "task",
            index: 0,
            ..
        }
    ));
}

#[test]
fn test_cli_commands_share_data_dir() {
    let dir = tempfile::tempdir().unwrap();
    let out = run(
        dir.path(),
        Command::AddUser {
            name: "John Doe".into(),
            email: "john@example.com".into(),
        },
    );
    assert!(out.contains("User created successfully"));

    run(
        dir.path(),
        Command::AddProject {
            user: "John".into(),
            title: "New Project".into(),
            description: String::new(),
            due_date: "2030-12-31".into(),
        },
    );
    run(
        dir.path(),
        Command::AddTask {
            project: "New Project".into(),
            title: "Implement feature".into(),
            description: String::new(),
            assign: vec!["1".into()],
        },
    );
    run(dir.path(), Command::CompleteTask { task_id: 1 });

    let ws = open(dir.path());
    let task = ws.tasks.find_by_id(1).unwrap();
    assert!(task.is_completed());
    assert!(task.is_assigned(1));

    let out = run(dir.path(), Command::ShowProject { project_id: 1 });
    assert!(out.contains("New Project"));
    assert!(out.contains("100.0%"));

    let out = run(dir.path(), Command::Backup);
    assert!(out.contains("users.json"));
    let backups = std::fs::read_dir(dir.path())
        .unwrap()
        .filter_map(Result::ok)
        .filter(|e| e.file_name().to_string_lossy().ends_with(".backup"))
        .count();
    assert_eq!(backups, 3);
}
