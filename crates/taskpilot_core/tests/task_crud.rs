use taskpilot_core::db::schema::ensure_schema;
use taskpilot_core::{
    Gateway, Importance, NewTask, RepoError, SqliteTaskRepository, StoreConfig, TaskRepository,
    ValidationError,
};
use tempfile::TempDir;

fn setup() -> (TempDir, SqliteTaskRepository) {
    let dir = tempfile::tempdir().unwrap();
    let gateway = Gateway::new(StoreConfig::new(dir.path().join("tasks.sqlite3")));
    assert!(ensure_schema(&gateway).is_complete());
    (dir, SqliteTaskRepository::new(gateway))
}

#[test]
fn create_uses_medium_importance_and_open_status_by_default() {
    let (_dir, repo) = setup();

    let id = repo.create_task(&NewTask::new("Buy stamps")).unwrap();
    let task = repo.get_task(id).unwrap().unwrap();

    assert_eq!(task.name, "Buy stamps");
    assert_eq!(task.importance, Importance::Medium);
    assert!(!task.completed);
    assert_eq!(task.notes, "");
}

#[test]
fn create_trims_name_and_keeps_notes() {
    let (_dir, repo) = setup();

    let id = repo
        .create_task(
            &NewTask::new("  Write spec  ")
                .with_importance(Importance::High)
                .with_notes("draft first"),
        )
        .unwrap();
    let task = repo.get_task(id).unwrap().unwrap();

    assert_eq!(task.name, "Write spec");
    assert_eq!(task.importance, Importance::High);
    assert_eq!(task.notes, "draft first");
}

#[test]
fn blank_name_is_rejected_before_insert() {
    let (_dir, repo) = setup();

    let err = repo.create_task(&NewTask::new("   ")).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::EmptyTaskName)
    ));
    assert!(repo.list_tasks().unwrap().is_empty());
}

#[test]
fn toggle_twice_restores_status_and_leaves_other_fields() {
    let (_dir, repo) = setup();
    let id = repo
        .create_task(&NewTask::new("Read").with_importance(Importance::Low))
        .unwrap();
    let before = repo.get_task(id).unwrap().unwrap();

    repo.toggle_completed(id).unwrap();
    let toggled = repo.get_task(id).unwrap().unwrap();
    assert!(toggled.completed);
    assert_eq!(toggled.name, before.name);
    assert_eq!(toggled.importance, before.importance);
    assert_eq!(toggled.created_at, before.created_at);

    repo.toggle_completed(id).unwrap();
    assert_eq!(repo.get_task(id).unwrap().unwrap(), before);
}

#[test]
fn list_is_newest_first() {
    let (_dir, repo) = setup();
    let first = repo.create_task(&NewTask::new("first")).unwrap();
    let second = repo.create_task(&NewTask::new("second")).unwrap();
    let third = repo.create_task(&NewTask::new("third")).unwrap();

    let ids: Vec<_> = repo.list_tasks().unwrap().iter().map(|task| task.id).collect();
    assert_eq!(ids, vec![third, second, first]);
}

#[test]
fn delete_removes_only_the_target() {
    let (_dir, repo) = setup();
    let keep = repo.create_task(&NewTask::new("keep")).unwrap();
    let drop_id = repo.create_task(&NewTask::new("drop")).unwrap();

    repo.delete_task(drop_id).unwrap();

    let remaining = repo.list_tasks().unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, keep);
    assert!(repo.get_task(drop_id).unwrap().is_none());
}

#[test]
fn mutations_on_missing_id_report_not_found_and_touch_nothing() {
    let (_dir, repo) = setup();
    let id = repo.create_task(&NewTask::new("only")).unwrap();
    let before = repo.list_tasks().unwrap();

    assert!(matches!(
        repo.delete_task(id + 100),
        Err(RepoError::NotFound(missing)) if missing == id + 100
    ));
    assert!(matches!(
        repo.toggle_completed(id + 100),
        Err(RepoError::NotFound(_))
    ));
    assert_eq!(repo.list_tasks().unwrap(), before);
}

#[test]
fn collapsed_gateway_reports_false_for_zero_row_delete() {
    let dir = tempfile::tempdir().unwrap();
    let gateway = Gateway::new(StoreConfig::new(dir.path().join("collapsed.sqlite3")));
    ensure_schema(&gateway);

    assert!(!gateway.execute("DELETE FROM tareas WHERE id = ?1;", [42_i64]));
    assert!(gateway.execute(
        "INSERT INTO tareas (nombre) VALUES (?1);",
        ["via gateway"]
    ));
}

#[test]
fn rows_without_creation_date_still_load() {
    let dir = tempfile::tempdir().unwrap();
    let gateway = Gateway::new(StoreConfig::new(dir.path().join("dateless.sqlite3")));
    ensure_schema(&gateway);
    let repo = SqliteTaskRepository::new(gateway.clone());

    let dated = repo.create_task(&NewTask::new("normal")).unwrap();
    assert!(gateway.execute("INSERT INTO tareas (nombre) VALUES (?1);", ["no date"]));

    let tasks = repo.list_tasks().unwrap();
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0].id, dated);
    assert!(tasks[0].created_at.is_some());
    assert_eq!(tasks[1].name, "no date");
    assert!(tasks[1].created_at.is_none());
    assert_eq!(tasks[1].importance, Importance::Medium);
}
