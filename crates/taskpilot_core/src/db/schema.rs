//! Idempotent schema bootstrap for the three application tables.
//!
//! # Invariants
//! - Tables are created only when absent; nothing is ever dropped or altered.
//! - Each table is created by its own statement, so one failure does not hide
//!   the others.
//! - Every statement is `CREATE TABLE IF NOT EXISTS`, so an existing table is
//!   not an error. Any failure is logged and reported but never aborts startup.

use super::Gateway;
use log::{error, info};

#[derive(Debug, Clone, Copy)]
struct TableDefinition {
    name: &'static str,
    sql: &'static str,
}

pub const TASKS_TABLE: &str = "tareas";
pub const REMINDERS_TABLE: &str = "recordatorios";
pub const LISTS_TABLE: &str = "listas";

const TABLES: &[TableDefinition] = &[
    TableDefinition {
        name: TASKS_TABLE,
        sql: "CREATE TABLE IF NOT EXISTS tareas (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            nombre TEXT NOT NULL,
            fecha_creacion DATETIME,
            completada BOOLEAN NOT NULL DEFAULT 0,
            importancia TEXT DEFAULT 'Media',
            notas TEXT
        );",
    },
    TableDefinition {
        name: REMINDERS_TABLE,
        sql: "CREATE TABLE IF NOT EXISTS recordatorios (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            texto TEXT NOT NULL,
            fecha_creacion DATETIME
        );",
    },
    TableDefinition {
        name: LISTS_TABLE,
        sql: "CREATE TABLE IF NOT EXISTS listas (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            titulo TEXT NOT NULL,
            elementos TEXT,
            fecha_creacion DATETIME
        );",
    },
];

/// Per-table outcome of `ensure_schema`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaReport {
    /// Tables that exist after the call.
    pub ready: Vec<&'static str>,
    /// Tables that could not be created, with the logged reason.
    pub failed: Vec<(&'static str, String)>,
}

impl SchemaReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Returns the names of all tables managed by the initializer.
pub fn table_names() -> Vec<&'static str> {
    TABLES.iter().map(|table| table.name).collect()
}

/// Ensures every application table exists.
pub fn ensure_schema(gateway: &Gateway) -> SchemaReport {
    let mut report = SchemaReport::default();

    for table in TABLES {
        match gateway.try_execute_batch(table.sql) {
            Ok(()) => report.ready.push(table.name),
            Err(err) => {
                error!(
                    "event=schema_init module=db status=error table={} error_kind={} error={}",
                    table.name,
                    err.kind().as_str(),
                    err
                );
                report.failed.push((table.name, err.to_string()));
            }
        }
    }

    info!(
        "event=schema_init module=db status={} ready={} failed={}",
        if report.is_complete() { "ok" } else { "degraded" },
        report.ready.len(),
        report.failed.len()
    );

    report
}
