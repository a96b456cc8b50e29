use rusqlite::Connection;
use taskpilot_core::db::schema::{ensure_schema, table_names};
use taskpilot_core::{Gateway, GatewayErrorKind, StoreConfig};

fn assert_table_exists(conn: &Connection, table: &str) {
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1;",
            [table],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(count, 1, "missing table {table}");
}

#[test]
fn fresh_store_gets_all_three_tables() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fresh.sqlite3");
    let gateway = Gateway::new(StoreConfig::new(&path));

    let report = ensure_schema(&gateway);
    assert!(report.is_complete());
    assert_eq!(report.ready, table_names());

    let conn = Connection::open(&path).unwrap();
    for table in ["tareas", "recordatorios", "listas"] {
        assert_table_exists(&conn, table);
    }
}

#[test]
fn running_initializer_twice_keeps_existing_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("twice.sqlite3");
    let gateway = Gateway::new(StoreConfig::new(&path));

    assert!(ensure_schema(&gateway).is_complete());
    let conn = Connection::open(&path).unwrap();
    conn.execute(
        "INSERT INTO tareas (nombre, fecha_creacion) VALUES ('keep me', '2026-01-01 08:00:00');",
        [],
    )
    .unwrap();
    drop(conn);

    let second = ensure_schema(&gateway);
    assert!(second.is_complete());
    assert_eq!(second.ready.len(), 3);

    let conn = Connection::open(&path).unwrap();
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM tareas;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn task_defaults_come_from_the_table_definition() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("defaults.sqlite3");
    let gateway = Gateway::new(StoreConfig::new(&path));
    ensure_schema(&gateway);

    let conn = Connection::open(&path).unwrap();
    conn.execute("INSERT INTO tareas (nombre) VALUES ('bare');", [])
        .unwrap();
    let (completed, importance): (bool, String) = conn
        .query_row(
            "SELECT completada, importancia FROM tareas WHERE nombre = 'bare';",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();
    assert!(!completed);
    assert_eq!(importance, "Media");
}

#[test]
fn unreachable_store_reports_every_table_as_failed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing-dir").join("store.sqlite3");
    let gateway = Gateway::new(StoreConfig::new(&path));

    let err = gateway.ping().unwrap_err();
    assert_eq!(err.kind(), GatewayErrorKind::Unavailable);

    let report = ensure_schema(&gateway);
    assert!(!report.is_complete());
    assert!(report.ready.is_empty());
    assert_eq!(report.failed.len(), 3);
}
