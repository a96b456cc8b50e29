//! Task record and importance levels.
//!
//! # Invariants
//! - `importance` defaults to `Medium`, `completed` to `false`.
//! - `created_at` is assigned once at insert time and never updated. Rows
//!   written outside the repository may lack it; they still load.
//! - Persisted importance labels are `Baja | Media | Alta`; any other stored
//!   value is rejected on read.

use super::{RecordId, ValidationError};
use chrono::NaiveDateTime;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};

/// Task priority shown as a colored indicator next to open tasks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Importance {
    Low,
    #[default]
    Medium,
    High,
}

impl Importance {
    pub const ALL: [Importance; 3] = [Importance::Low, Importance::Medium, Importance::High];

    /// Value stored in `tareas.importancia`.
    pub fn as_db(self) -> &'static str {
        match self {
            Self::Low => "Baja",
            Self::Medium => "Media",
            Self::High => "Alta",
        }
    }

    pub fn from_db(value: &str) -> Option<Self> {
        match value {
            "Baja" => Some(Self::Low),
            "Media" => Some(Self::Medium),
            "Alta" => Some(Self::High),
            _ => None,
        }
    }

    /// Human-facing label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    /// Parses user input: accepts the display label or the stored label,
    /// case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_lowercase();
        Self::ALL.into_iter().find(|importance| {
            importance.label().to_lowercase() == normalized
                || importance.as_db().to_lowercase() == normalized
        })
    }
}

impl ToSql for Importance {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_db()))
    }
}

impl FromSql for Importance {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let text = value.as_str()?;
        Self::from_db(text)
            .ok_or_else(|| FromSqlError::Other(format!("unknown importance `{text}`").into()))
    }
}

/// A persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: RecordId,
    pub name: String,
    /// `None` for rows written without a creation date.
    pub created_at: Option<NaiveDateTime>,
    pub completed: bool,
    pub importance: Importance,
    /// Empty when the user left no notes.
    pub notes: String,
}

/// User submission for a new task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTask {
    pub name: String,
    pub importance: Importance,
    pub notes: String,
}

impl NewTask {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_importance(mut self, importance: Importance) -> Self {
        self.importance = importance;
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Returns a trimmed copy, or an error when the name is blank.
    pub fn normalized(&self) -> Result<Self, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyTaskName);
        }
        Ok(Self {
            name: name.to_string(),
            importance: self.importance,
            notes: self.notes.trim().to_string(),
        })
    }
}
