//! Reminder repository over the `recordatorios` table.
//!
//! No panel edits reminders; they are written by integrations and read by the
//! activity analysis prompt.

use super::{creation_timestamp, RepoError, RepoResult};
use crate::db::Gateway;
use crate::model::reminder::{normalize_reminder_text, Reminder};
use crate::model::RecordId;
use rusqlite::{params, Row};

pub trait ReminderRepository {
    fn create_reminder(&self, text: &str) -> RepoResult<RecordId>;
    /// All reminders in insertion order.
    fn list_reminders(&self) -> RepoResult<Vec<Reminder>>;
    fn delete_reminder(&self, id: RecordId) -> RepoResult<()>;
}

#[derive(Debug, Clone)]
pub struct SqliteReminderRepository {
    gateway: Gateway,
}

impl SqliteReminderRepository {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }
}

impl ReminderRepository for SqliteReminderRepository {
    fn create_reminder(&self, text: &str) -> RepoResult<RecordId> {
        let text = normalize_reminder_text(text)?;
        let mutation = self.gateway.try_execute(
            "INSERT INTO recordatorios (texto, fecha_creacion) VALUES (?1, ?2);",
            params![text, creation_timestamp()],
        )?;
        Ok(mutation.last_insert_id)
    }

    fn list_reminders(&self) -> RepoResult<Vec<Reminder>> {
        let reminders = self.gateway.try_query(
            "SELECT id, texto, fecha_creacion FROM recordatorios ORDER BY id ASC;",
            [],
            parse_reminder_row,
        )?;
        Ok(reminders)
    }

    fn delete_reminder(&self, id: RecordId) -> RepoResult<()> {
        let mutation = self
            .gateway
            .try_execute("DELETE FROM recordatorios WHERE id = ?1;", [id])?;
        if mutation.rows_affected == 0 {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }
}

fn parse_reminder_row(row: &Row<'_>) -> rusqlite::Result<Reminder> {
    Ok(Reminder {
        id: row.get("id")?,
        text: row.get("texto")?,
        created_at: row.get("fecha_creacion")?,
    })
}
