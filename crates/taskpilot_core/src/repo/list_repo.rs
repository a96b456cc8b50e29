//! List repository over the `listas` table.

use super::{creation_timestamp, RepoError, RepoResult};
use crate::db::Gateway;
use crate::model::list::{split_elements, NewTaskList, TaskList};
use crate::model::RecordId;
use rusqlite::{params, Row};

pub trait ListRepository {
    fn create_list(&self, list: &NewTaskList) -> RepoResult<RecordId>;
    /// All lists, newest first.
    fn list_lists(&self) -> RepoResult<Vec<TaskList>>;
    fn delete_list(&self, id: RecordId) -> RepoResult<()>;
}

#[derive(Debug, Clone)]
pub struct SqliteListRepository {
    gateway: Gateway,
}

impl SqliteListRepository {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }
}

impl ListRepository for SqliteListRepository {
    fn create_list(&self, list: &NewTaskList) -> RepoResult<RecordId> {
        let list = list.normalized()?;
        let mutation = self.gateway.try_execute(
            "INSERT INTO listas (titulo, elementos, fecha_creacion) VALUES (?1, ?2, ?3);",
            params![list.title.as_str(), list.elements_text(), creation_timestamp()],
        )?;
        Ok(mutation.last_insert_id)
    }

    fn list_lists(&self) -> RepoResult<Vec<TaskList>> {
        let lists = self.gateway.try_query(
            "SELECT id, titulo, elementos, fecha_creacion
             FROM listas
             ORDER BY fecha_creacion DESC, id DESC;",
            [],
            parse_list_row,
        )?;
        Ok(lists)
    }

    fn delete_list(&self, id: RecordId) -> RepoResult<()> {
        let mutation = self
            .gateway
            .try_execute("DELETE FROM listas WHERE id = ?1;", [id])?;
        if mutation.rows_affected == 0 {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }
}

fn parse_list_row(row: &Row<'_>) -> rusqlite::Result<TaskList> {
    let elements: Option<String> = row.get("elementos")?;
    Ok(TaskList {
        id: row.get("id")?,
        title: row.get("titulo")?,
        elements: split_elements(elements.as_deref()),
        created_at: row.get("fecha_creacion")?,
    })
}
