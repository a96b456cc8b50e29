//! Repository contracts and gateway-backed implementations.
//!
//! # Responsibility
//! - Expose typed CRUD for tasks, lists and reminders.
//! - Keep SQL text inside the persistence boundary.
//!
//! # Invariants
//! - Write paths validate input before any statement is issued.
//! - Targeted mutations on a missing id return `NotFound` and touch no row.
//! - Read paths reject undecodable rows instead of masking them.

use crate::db::{GatewayError, GatewayErrorKind};
use crate::model::{RecordId, ValidationError};
use chrono::{Local, NaiveDateTime};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod list_repo;
pub mod reminder_repo;
pub mod task_repo;

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationError),
    Store(GatewayError),
    NotFound(RecordId),
}

impl RepoError {
    /// Stable short label for logs and notifications.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Store(err) => err.kind().as_str(),
            Self::NotFound(_) => "not_found",
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Store(err) if err.kind() == GatewayErrorKind::Unavailable)
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "record not found: {id}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::NotFound(_) => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<GatewayError> for RepoError {
    fn from(value: GatewayError) -> Self {
        Self::Store(value)
    }
}

/// Creation timestamp written at insert time.
pub(crate) fn creation_timestamp() -> NaiveDateTime {
    Local::now().naive_local()
}
