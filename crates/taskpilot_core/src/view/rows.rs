//! Display row models for the Tasks and Lists panels.

use crate::model::list::TaskList;
use crate::model::task::{Importance, Task};
use crate::model::RecordId;

pub const EMPTY_TASKS_PLACEHOLDER: &str = "No tasks in your list.";
pub const EMPTY_LISTS_PLACEHOLDER: &str = "No lists created.";
pub const EMPTY_LIST_ELEMENTS_PLACEHOLDER: &str = "(empty list)";
pub const NO_NOTES_PLACEHOLDER: &str = "No additional notes.";
pub const UNKNOWN_DATE_PLACEHOLDER: &str = "Unknown date";
const DETAILS_DATE_FORMAT: &str = "%d-%m-%Y %H:%M";

const TASK_AFFORDANCES: &[Affordance] = &[
    Affordance::ToggleComplete,
    Affordance::Details,
    Affordance::Delete,
];
const LIST_AFFORDANCES: &[Affordance] = &[Affordance::Delete];

/// User action a row exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Affordance {
    ToggleComplete,
    Details,
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRow {
    pub id: RecordId,
    pub name: String,
    pub completed: bool,
    /// Completed tasks are struck through.
    pub strikethrough: bool,
    /// Shown only while the task is open.
    pub importance: Option<Importance>,
    pub affordances: &'static [Affordance],
}

impl TaskRow {
    pub fn from_task(task: &Task) -> Self {
        Self {
            id: task.id,
            name: task.name.clone(),
            completed: task.completed,
            strikethrough: task.completed,
            importance: (!task.completed).then_some(task.importance),
            affordances: TASK_AFFORDANCES,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListCard {
    pub id: RecordId,
    pub title: String,
    pub elements: Vec<String>,
    /// Set when the list has no elements.
    pub placeholder: Option<&'static str>,
    pub affordances: &'static [Affordance],
}

impl ListCard {
    pub fn from_list(list: &TaskList) -> Self {
        Self {
            id: list.id,
            title: list.title.clone(),
            elements: list.elements.clone(),
            placeholder: list
                .elements
                .is_empty()
                .then_some(EMPTY_LIST_ELEMENTS_PLACEHOLDER),
            affordances: LIST_AFFORDANCES,
        }
    }
}

/// One displayed item in a panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewItem {
    Task(TaskRow),
    List(ListCard),
    /// Shown alone when the query produced no rows.
    Placeholder(&'static str),
}

/// Read-only detail view of one task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDetails {
    pub id: RecordId,
    pub name: String,
    pub importance: &'static str,
    pub created_at: String,
    pub notes: String,
}

impl TaskDetails {
    pub fn from_task(task: &Task) -> Self {
        Self {
            id: task.id,
            name: task.name.clone(),
            importance: task.importance.label(),
            created_at: task
                .created_at
                .map(|created_at| created_at.format(DETAILS_DATE_FORMAT).to_string())
                .unwrap_or_else(|| UNKNOWN_DATE_PLACEHOLDER.to_string()),
            notes: if task.notes.trim().is_empty() {
                NO_NOTES_PLACEHOLDER.to_string()
            } else {
                task.notes.clone()
            },
        }
    }
}
