//! Domain records for tasks, lists and reminders.
//!
//! # Responsibility
//! - Define the records fetched from and written to the store.
//! - Normalize and validate user input before it reaches persistence.
//!
//! # Invariants
//! - Names, titles and reminder texts are trimmed and never empty when stored.
//! - Rows are owned by the store; these values are transient copies.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod list;
pub mod reminder;
pub mod task;

/// Store-assigned integer identity shared by every table.
pub type RecordId = i64;

/// Input validation failure raised before any statement is issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    EmptyTaskName,
    EmptyListTitle,
    EmptyReminderText,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTaskName => write!(f, "task name cannot be empty"),
            Self::EmptyListTitle => write!(f, "list title cannot be empty"),
            Self::EmptyReminderText => write!(f, "reminder text cannot be empty"),
        }
    }
}

impl Error for ValidationError {}
