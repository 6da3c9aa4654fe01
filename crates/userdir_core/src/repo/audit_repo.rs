//! Audit log contracts and SQLite implementation.
//!
//! # Responsibility
//! - Append administrative actions with store-assigned ids and timestamps.
//! - List the log in either presentation order.
//!
//! # Invariants
//! - `log_id` is strictly increasing and starts at 1 (`AUTOINCREMENT`).
//! - No exposed operation edits or deletes an entry; schema triggers
//!   reject `UPDATE`/`DELETE` on `admin_logs` as well.

use crate::db::{self, DbError, SharedConnection};
use crate::model::audit::{AuditEntry, LogOrder};
use rusqlite::{params, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const AUDIT_COLUMNS: &[&str] = &["log_id", "admin_name", "action", "timestamp"];

pub type AuditResult<T> = Result<T, AuditLogError>;

/// Audit log error.
#[derive(Debug)]
pub enum AuditLogError {
    /// Backing store could not be reached or rejected the statement.
    LogUnavailable(DbError),
    InvalidData(String),
}

impl Display for AuditLogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LogUnavailable(err) => write!(f, "audit log unavailable: {err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted audit data: {message}"),
        }
    }
}

impl Error for AuditLogError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::LogUnavailable(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for AuditLogError {
    fn from(value: DbError) -> Self {
        Self::LogUnavailable(value)
    }
}

impl From<rusqlite::Error> for AuditLogError {
    fn from(value: rusqlite::Error) -> Self {
        Self::LogUnavailable(DbError::Sqlite(value))
    }
}

/// Append-only, strictly ordered log of administrative actions.
pub trait AuditLogRepository {
    /// Persists one entry and returns it with its assigned id and timestamp.
    fn append(&self, actor_name: &str, action: &str) -> AuditResult<AuditEntry>;
    fn list_entries(&self, order: LogOrder) -> AuditResult<Vec<AuditEntry>>;
}

/// SQLite-backed audit log.
pub struct SqliteAuditLogRepository {
    conn: SharedConnection,
}

impl SqliteAuditLogRepository {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: SharedConnection) -> Result<Self, DbError> {
        db::ensure_connection_ready(&*db::lock(&conn)?, "admin_logs", AUDIT_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl AuditLogRepository for SqliteAuditLogRepository {
    fn append(&self, actor_name: &str, action: &str) -> AuditResult<AuditEntry> {
        let conn = db::lock(&self.conn)?;
        let entry = conn.query_row(
            "INSERT INTO admin_logs (admin_name, action, timestamp)
             VALUES (?1, ?2, strftime('%Y-%m-%d %H:%M:%S', 'now'))
             RETURNING log_id, admin_name, action, timestamp;",
            params![actor_name, action],
            parse_entry_row,
        )?;
        Ok(entry)
    }

    fn list_entries(&self, order: LogOrder) -> AuditResult<Vec<AuditEntry>> {
        let sql = match order {
            LogOrder::OldestFirst => {
                "SELECT log_id, admin_name, action, timestamp FROM admin_logs ORDER BY log_id ASC;"
            }
            LogOrder::NewestFirst => {
                "SELECT log_id, admin_name, action, timestamp FROM admin_logs ORDER BY log_id DESC;"
            }
        };

        let conn = db::lock(&self.conn)?;
        let mut stmt = conn.prepare(sql)?;
        let mut rows = stmt.query([])?;
        let mut entries = Vec::new();
        while let Some(row) = rows.next()? {
            let entry = parse_entry_row(row)?;
            if entry.log_id < 1 {
                return Err(AuditLogError::InvalidData(format!(
                    "invalid log id `{}` in admin_logs.log_id",
                    entry.log_id
                )));
            }
            entries.push(entry);
        }
        Ok(entries)
    }
}

fn parse_entry_row(row: &Row<'_>) -> rusqlite::Result<AuditEntry> {
    Ok(AuditEntry {
        log_id: row.get(0)?,
        actor_name: row.get(1)?,
        action: row.get(2)?,
        timestamp: row.get(3)?,
    })
}
