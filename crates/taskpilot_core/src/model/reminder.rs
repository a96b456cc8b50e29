//! Reminder record. Only created, listed and deleted; read by activity analysis.

use super::{RecordId, ValidationError};
use chrono::NaiveDateTime;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reminder {
    pub id: RecordId,
    pub text: String,
    pub created_at: Option<NaiveDateTime>,
}

/// Trims reminder text, rejecting blank input.
pub fn normalize_reminder_text(text: &str) -> Result<String, ValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyReminderText);
    }
    Ok(trimmed.to_string())
}
