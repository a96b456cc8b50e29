use rusqlite::Connection;
use taskpilot_core::db::schema::ensure_schema;
use taskpilot_core::{
    Gateway, ListRepository, NewTaskList, RepoError, ReminderRepository, SqliteListRepository,
    SqliteReminderRepository, StoreConfig, ValidationError,
};
use tempfile::TempDir;

fn setup() -> (TempDir, Gateway) {
    let dir = tempfile::tempdir().unwrap();
    let gateway = Gateway::new(StoreConfig::new(dir.path().join("lists.sqlite3")));
    assert!(ensure_schema(&gateway).is_complete());
    (dir, gateway)
}

#[test]
fn groceries_round_trip_drops_blank_lines() {
    let (dir, gateway) = setup();
    let repo = SqliteListRepository::new(gateway);

    let id = repo
        .create_list(&NewTaskList::from_raw("Groceries", "milk\n\neggs\n  "))
        .unwrap();

    let lists = repo.list_lists().unwrap();
    assert_eq!(lists.len(), 1);
    assert_eq!(lists[0].id, id);
    assert_eq!(lists[0].title, "Groceries");
    assert_eq!(lists[0].elements, vec!["milk", "eggs"]);

    let conn = Connection::open(dir.path().join("lists.sqlite3")).unwrap();
    let stored: String = conn
        .query_row("SELECT elementos FROM listas WHERE id = ?1;", [id], |row| {
            row.get(0)
        })
        .unwrap();
    assert_eq!(stored, "milk\neggs");
}

#[test]
fn list_without_elements_reads_back_empty() {
    let (_dir, gateway) = setup();
    let repo = SqliteListRepository::new(gateway);

    repo.create_list(&NewTaskList::from_raw("Someday", "\n \n"))
        .unwrap();

    let lists = repo.list_lists().unwrap();
    assert!(lists[0].elements.is_empty());
}

#[test]
fn blank_title_is_rejected() {
    let (_dir, gateway) = setup();
    let repo = SqliteListRepository::new(gateway);

    let err = repo
        .create_list(&NewTaskList::from_raw("  ", "milk"))
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::EmptyListTitle)
    ));
    assert!(repo.list_lists().unwrap().is_empty());
}

#[test]
fn lists_are_newest_first_and_delete_is_targeted() {
    let (_dir, gateway) = setup();
    let repo = SqliteListRepository::new(gateway);
    let older = repo
        .create_list(&NewTaskList::from_raw("Older", "a"))
        .unwrap();
    let newer = repo
        .create_list(&NewTaskList::from_raw("Newer", "b"))
        .unwrap();

    let titles: Vec<_> = repo
        .list_lists()
        .unwrap()
        .into_iter()
        .map(|list| list.title)
        .collect();
    assert_eq!(titles, vec!["Newer", "Older"]);

    repo.delete_list(newer).unwrap();
    assert!(matches!(
        repo.delete_list(newer),
        Err(RepoError::NotFound(_))
    ));
    let remaining = repo.list_lists().unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, older);
}

#[test]
fn reminders_keep_insertion_order() {
    let (_dir, gateway) = setup();
    let repo = SqliteReminderRepository::new(gateway);

    let first = repo.create_reminder("Standup at 9").unwrap();
    repo.create_reminder("Pay rent").unwrap();

    let texts: Vec<_> = repo
        .list_reminders()
        .unwrap()
        .into_iter()
        .map(|reminder| reminder.text)
        .collect();
    assert_eq!(texts, vec!["Standup at 9", "Pay rent"]);

    repo.delete_reminder(first).unwrap();
    assert_eq!(repo.list_reminders().unwrap().len(), 1);
    assert!(repo.create_reminder("   ").is_err());
}
