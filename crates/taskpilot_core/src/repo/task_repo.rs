//! Task repository over the `tareas` table.

use super::{creation_timestamp, RepoError, RepoResult};
use crate::db::Gateway;
use crate::model::task::{Importance, NewTask, Task};
use crate::model::RecordId;
use rusqlite::{params, Row};

const TASK_SELECT_SQL: &str = "SELECT
    id,
    nombre,
    fecha_creacion,
    completada,
    importancia,
    notas
FROM tareas";

pub trait TaskRepository {
    fn create_task(&self, task: &NewTask) -> RepoResult<RecordId>;
    /// All tasks, newest first.
    fn list_tasks(&self) -> RepoResult<Vec<Task>>;
    fn get_task(&self, id: RecordId) -> RepoResult<Option<Task>>;
    /// Flips `completada`; no other column changes.
    fn toggle_completed(&self, id: RecordId) -> RepoResult<()>;
    fn delete_task(&self, id: RecordId) -> RepoResult<()>;
}

#[derive(Debug, Clone)]
pub struct SqliteTaskRepository {
    gateway: Gateway,
}

impl SqliteTaskRepository {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }
}

impl TaskRepository for SqliteTaskRepository {
    fn create_task(&self, task: &NewTask) -> RepoResult<RecordId> {
        let task = task.normalized()?;
        let mutation = self.gateway.try_execute(
            "INSERT INTO tareas (nombre, fecha_creacion, importancia, notas)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                task.name.as_str(),
                creation_timestamp(),
                task.importance,
                task.notes.as_str(),
            ],
        )?;
        Ok(mutation.last_insert_id)
    }

    fn list_tasks(&self) -> RepoResult<Vec<Task>> {
        let tasks = self.gateway.try_query(
            &format!("{TASK_SELECT_SQL} ORDER BY fecha_creacion DESC, id DESC;"),
            [],
            parse_task_row,
        )?;
        Ok(tasks)
    }

    fn get_task(&self, id: RecordId) -> RepoResult<Option<Task>> {
        let mut tasks = self.gateway.try_query(
            &format!("{TASK_SELECT_SQL} WHERE id = ?1;"),
            [id],
            parse_task_row,
        )?;
        Ok(tasks.pop())
    }

    fn toggle_completed(&self, id: RecordId) -> RepoResult<()> {
        let mutation = self.gateway.try_execute(
            "UPDATE tareas SET completada = NOT completada WHERE id = ?1;",
            [id],
        )?;
        if mutation.rows_affected == 0 {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }

    fn delete_task(&self, id: RecordId) -> RepoResult<()> {
        let mutation = self
            .gateway
            .try_execute("DELETE FROM tareas WHERE id = ?1;", [id])?;
        if mutation.rows_affected == 0 {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }
}

fn parse_task_row(row: &Row<'_>) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get("id")?,
        name: row.get("nombre")?,
        created_at: row.get("fecha_creacion")?,
        completed: row.get("completada")?,
        importance: row
            .get::<_, Option<Importance>>("importancia")?
            .unwrap_or_default(),
        notes: row.get::<_, Option<String>>("notas")?.unwrap_or_default(),
    })
}
