//! Store read used to build the activity analysis prompt.

use super::prompts::NOTES_EXCERPT_CHARS;
use crate::model::task::{Importance, Task};
use crate::repo::list_repo::ListRepository;
use crate::repo::reminder_repo::ReminderRepository;
use crate::repo::task_repo::TaskRepository;
use log::warn;

/// Condensed task fields sent to the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDigest {
    pub name: String,
    pub importance: Importance,
    pub completed: bool,
    /// First `NOTES_EXCERPT_CHARS` characters of the notes.
    pub notes_excerpt: String,
}

impl TaskDigest {
    pub fn from_task(task: &Task) -> Self {
        Self {
            name: task.name.clone(),
            importance: task.importance,
            completed: task.completed,
            notes_excerpt: task.notes.chars().take(NOTES_EXCERPT_CHARS).collect(),
        }
    }
}

/// Everything the analysis prompt mentions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivitySnapshot {
    pub reminders: Vec<String>,
    pub list_titles: Vec<String>,
    pub tasks: Vec<TaskDigest>,
}

impl ActivitySnapshot {
    /// Reads all reminders, list titles and tasks.
    ///
    /// A failed read leaves its section empty.
    pub fn gather<T, L, R>(tasks: &T, lists: &L, reminders: &R) -> Self
    where
        T: TaskRepository,
        L: ListRepository,
        R: ReminderRepository,
    {
        let reminders = match reminders.list_reminders() {
            Ok(rows) => rows
                .into_iter()
                .map(|reminder| reminder.text)
                .filter(|text| !text.is_empty())
                .collect(),
            Err(err) => {
                warn!(
                    "event=activity_snapshot module=ai status=degraded section=reminders error_kind={}",
                    err.kind()
                );
                Vec::new()
            }
        };

        let list_titles = match lists.list_lists() {
            Ok(rows) => rows
                .into_iter()
                .map(|list| list.title)
                .filter(|title| !title.is_empty())
                .collect(),
            Err(err) => {
                warn!(
                    "event=activity_snapshot module=ai status=degraded section=lists error_kind={}",
                    err.kind()
                );
                Vec::new()
            }
        };

        let tasks = match tasks.list_tasks() {
            Ok(rows) => rows
                .iter()
                .filter(|task| !task.name.is_empty())
                .map(TaskDigest::from_task)
                .collect(),
            Err(err) => {
                warn!(
                    "event=activity_snapshot module=ai status=degraded section=tasks error_kind={}",
                    err.kind()
                );
                Vec::new()
            }
        };

        Self {
            reminders,
            list_titles,
            tasks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::TaskDigest;
    use crate::model::task::{Importance, Task};
    use chrono::NaiveDate;

    #[test]
    fn digest_keeps_first_fifty_characters_of_notes() {
        let task = Task {
            id: 1,
            name: "Refactor".to_string(),
            created_at: NaiveDate::from_ymd_opt(2026, 1, 5)
                .unwrap()
                .and_hms_opt(9, 0, 0),
            completed: true,
            importance: Importance::Low,
            notes: "é".repeat(80),
        };

        let digest = TaskDigest::from_task(&task);
        assert_eq!(digest.notes_excerpt.chars().count(), 50);
        assert!(digest.completed);
    }
}
