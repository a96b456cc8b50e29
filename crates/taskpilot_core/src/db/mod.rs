//! SQLite persistence gateway and schema bootstrap.
//!
//! # Responsibility
//! - Issue every statement against the backing store through one gateway.
//! - Ensure the three application tables exist before first use.
//!
//! # Invariants
//! - One connection per operation; no pooling, no multi-statement transactions.
//! - Reads and writes are both parameterized; values are never interpolated.
//! - Failures are classified into stable kinds before leaving this module.

use rusqlite::ErrorCode;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod gateway;
pub mod schema;

pub use gateway::{Gateway, Mutation};

pub type GatewayResult<T> = Result<T, GatewayError>;

/// Stable failure category exposed to callers and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayErrorKind {
    /// Store unreachable: cannot open, busy, locked, I/O, not a database.
    Unavailable,
    /// A constraint rejected the statement (NOT NULL, UNIQUE, ...).
    Constraint,
    /// Malformed or otherwise rejected statement.
    Statement,
    /// A persisted value could not be decoded into its domain type.
    InvalidRow,
}

impl GatewayErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unavailable => "unavailable",
            Self::Constraint => "constraint",
            Self::Statement => "statement",
            Self::InvalidRow => "invalid_row",
        }
    }
}

#[derive(Debug)]
pub enum GatewayError {
    Unavailable(rusqlite::Error),
    Constraint(rusqlite::Error),
    Statement(rusqlite::Error),
    InvalidRow(rusqlite::Error),
}

impl GatewayError {
    pub fn kind(&self) -> GatewayErrorKind {
        match self {
            Self::Unavailable(_) => GatewayErrorKind::Unavailable,
            Self::Constraint(_) => GatewayErrorKind::Constraint,
            Self::Statement(_) => GatewayErrorKind::Statement,
            Self::InvalidRow(_) => GatewayErrorKind::InvalidRow,
        }
    }

    fn sqlite(&self) -> &rusqlite::Error {
        match self {
            Self::Unavailable(err)
            | Self::Constraint(err)
            | Self::Statement(err)
            | Self::InvalidRow(err) => err,
        }
    }
}

impl Display for GatewayError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} error: {}", self.kind().as_str(), self.sqlite())
    }
}

impl Error for GatewayError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(self.sqlite())
    }
}

impl From<rusqlite::Error> for GatewayError {
    fn from(value: rusqlite::Error) -> Self {
        match classify(&value) {
            GatewayErrorKind::Unavailable => Self::Unavailable(value),
            GatewayErrorKind::Constraint => Self::Constraint(value),
            GatewayErrorKind::Statement => Self::Statement(value),
            GatewayErrorKind::InvalidRow => Self::InvalidRow(value),
        }
    }
}

fn classify(err: &rusqlite::Error) -> GatewayErrorKind {
    match err {
        rusqlite::Error::SqliteFailure(failure, _) => match failure.code {
            ErrorCode::ConstraintViolation => GatewayErrorKind::Constraint,
            ErrorCode::CannotOpen
            | ErrorCode::DatabaseBusy
            | ErrorCode::DatabaseLocked
            | ErrorCode::DatabaseCorrupt
            | ErrorCode::NotADatabase
            | ErrorCode::PermissionDenied
            | ErrorCode::ReadOnly
            | ErrorCode::SystemIoFailure
            | ErrorCode::DiskFull
            | ErrorCode::FileLockingProtocolFailed => GatewayErrorKind::Unavailable,
            _ => GatewayErrorKind::Statement,
        },
        rusqlite::Error::FromSqlConversionFailure(..)
        | rusqlite::Error::InvalidColumnType(..)
        | rusqlite::Error::IntegralValueOutOfRange(..) => GatewayErrorKind::InvalidRow,
        _ => GatewayErrorKind::Statement,
    }
}

#[cfg(test)]
mod tests {
    use super::{GatewayError, GatewayErrorKind};
    use rusqlite::ffi;

    fn sqlite_failure(code: i32) -> rusqlite::Error {
        rusqlite::Error::SqliteFailure(ffi::Error::new(code), None)
    }

    #[test]
    fn constraint_and_connectivity_failures_are_split() {
        let constraint = GatewayError::from(sqlite_failure(ffi::SQLITE_CONSTRAINT));
        assert_eq!(constraint.kind(), GatewayErrorKind::Constraint);

        let busy = GatewayError::from(sqlite_failure(ffi::SQLITE_BUSY));
        assert_eq!(busy.kind(), GatewayErrorKind::Unavailable);

        let cant_open = GatewayError::from(sqlite_failure(ffi::SQLITE_CANTOPEN));
        assert_eq!(cant_open.kind(), GatewayErrorKind::Unavailable);
    }

    #[test]
    fn decode_failures_are_invalid_rows() {
        let err = GatewayError::from(rusqlite::Error::InvalidColumnType(
            0,
            "fecha_creacion".to_string(),
            rusqlite::types::Type::Null,
        ));
        assert_eq!(err.kind(), GatewayErrorKind::InvalidRow);
        assert!(err.to_string().starts_with("invalid_row error"));
    }

    #[test]
    fn other_failures_are_statement_errors() {
        let err = GatewayError::from(rusqlite::Error::QueryReturnedNoRows);
        assert_eq!(err.kind(), GatewayErrorKind::Statement);
    }
}
