//! Per-operation SQLite gateway.
//!
//! # Responsibility
//! - Open a connection, run exactly one statement, close the connection.
//! - Offer strict (`try_*`) operations with classified errors. Repositories and
//!   schema bootstrap go through these.
//! - Keep `execute` / `query` as a log-and-collapse shorthand for ad-hoc
//!   statements whose callers only need success or rows.
//!
//! # Invariants
//! - Every statement runs in SQLite auto-commit mode.
//! - Collapsed operations never return an error and never panic.
//! - A mutation that touches zero rows reports `false` on the collapsed path.

use super::{GatewayError, GatewayResult};
use crate::config::StoreConfig;
use log::{debug, error, warn};
use rusqlite::{Connection, Params, Row};
use std::path::Path;
use std::time::Instant;

/// Outcome of one mutating statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mutation {
    pub rows_affected: usize,
    /// Rowid of the last successful insert on this connection, `0` if none.
    pub last_insert_id: i64,
}

/// The only component that talks to the backing store.
#[derive(Debug, Clone)]
pub struct Gateway {
    config: StoreConfig,
}

impl Gateway {
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    pub fn path(&self) -> &Path {
        self.config.path.as_path()
    }

    /// Opens a connection just to prove the store is reachable.
    pub fn ping(&self) -> GatewayResult<()> {
        self.connect().map(|_| ())
    }

    /// Runs one parameterized mutating statement.
    ///
    /// Zero affected rows is not an error here; callers decide what it means.
    pub fn try_execute<P: Params>(&self, sql: &str, params: P) -> GatewayResult<Mutation> {
        let conn = self.connect()?;
        let rows_affected = conn.execute(sql, params)?;
        Ok(Mutation {
            rows_affected,
            last_insert_id: conn.last_insert_rowid(),
        })
    }

    /// Runs one parameterized query and fetches every row in statement order.
    pub fn try_query<T, P, F>(&self, sql: &str, params: P, map_row: F) -> GatewayResult<Vec<T>>
    where
        P: Params,
        F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
    {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt
            .query_map(params, map_row)?
            .collect::<rusqlite::Result<Vec<T>>>()?;
        Ok(rows)
    }

    /// Runs parameterless DDL (one or more statements).
    pub fn try_execute_batch(&self, sql: &str) -> GatewayResult<()> {
        let conn = self.connect()?;
        conn.execute_batch(sql)?;
        Ok(())
    }

    /// Collapsed mutation: `true` only when the statement ran and touched a row.
    pub fn execute<P: Params>(&self, sql: &str, params: P) -> bool {
        let started_at = Instant::now();
        match self.try_execute(sql, params) {
            Ok(mutation) if mutation.rows_affected > 0 => {
                debug!(
                    "event=db_execute module=db status=ok rows={} duration_ms={}",
                    mutation.rows_affected,
                    started_at.elapsed().as_millis()
                );
                true
            }
            Ok(_) => {
                warn!(
                    "event=db_execute module=db status=noop rows=0 duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                false
            }
            Err(err) => {
                error!(
                    "event=db_execute module=db status=error error_kind={} duration_ms={} error={}",
                    err.kind().as_str(),
                    started_at.elapsed().as_millis(),
                    err
                );
                false
            }
        }
    }

    /// Collapsed query: any failure yields an empty sequence.
    pub fn query<T, P, F>(&self, sql: &str, params: P, map_row: F) -> Vec<T>
    where
        P: Params,
        F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
    {
        let started_at = Instant::now();
        match self.try_query(sql, params, map_row) {
            Ok(rows) => {
                debug!(
                    "event=db_query module=db status=ok rows={} duration_ms={}",
                    rows.len(),
                    started_at.elapsed().as_millis()
                );
                rows
            }
            Err(err) => {
                error!(
                    "event=db_query module=db status=error error_kind={} duration_ms={} error={}",
                    err.kind().as_str(),
                    started_at.elapsed().as_millis(),
                    err
                );
                Vec::new()
            }
        }
    }

    fn connect(&self) -> GatewayResult<Connection> {
        let conn = Connection::open(&self.config.path).map_err(|err| {
            // Open failures are connectivity failures whatever code SQLite reports.
            GatewayError::Unavailable(err)
        })?;
        conn.busy_timeout(self.config.busy_timeout)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(conn)
    }
}
