//! Titled lists of text lines.
//!
//! # Invariants
//! - Elements are stored newline-joined, each line trimmed, blank lines dropped.
//! - Splitting the stored text reproduces the cleaned sequence exactly.
//! - Lists are never edited in place; editing is delete-and-recreate.

use super::{RecordId, ValidationError};
use chrono::NaiveDateTime;

const ELEMENT_SEPARATOR: char = '\n';

/// A persisted list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskList {
    pub id: RecordId,
    pub title: String,
    pub elements: Vec<String>,
    /// `None` for rows written without a creation date.
    pub created_at: Option<NaiveDateTime>,
}

/// User submission for a new list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTaskList {
    pub title: String,
    pub elements: Vec<String>,
}

impl NewTaskList {
    /// Builds a submission from free text, one element per line.
    pub fn from_raw(title: impl Into<String>, raw_elements: &str) -> Self {
        Self {
            title: title.into(),
            elements: clean_elements(raw_elements),
        }
    }

    /// Returns a trimmed copy, or an error when the title is blank.
    pub fn normalized(&self) -> Result<Self, ValidationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyListTitle);
        }
        Ok(Self {
            title: title.to_string(),
            elements: self
                .elements
                .iter()
                .map(|element| element.trim())
                .filter(|element| !element.is_empty())
                .map(str::to_string)
                .collect(),
        })
    }

    /// Text written to `listas.elementos`.
    pub fn elements_text(&self) -> String {
        join_elements(&self.elements)
    }
}

/// Trims every line and drops blank ones.
pub fn clean_elements(raw: &str) -> Vec<String> {
    raw.split(ELEMENT_SEPARATOR)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn join_elements(elements: &[String]) -> String {
    elements.join("\n")
}

/// Splits stored element text back into its sequence.
///
/// `None` (SQL NULL) and empty text both yield an empty sequence.
pub fn split_elements(stored: Option<&str>) -> Vec<String> {
    stored.map(clean_elements).unwrap_or_default()
}
