//! Directory store contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide create/remove/get/list over the `users` table.
//! - Translate key conflicts and missing rows into semantic errors.
//!
//! # Invariants
//! - `id` is unique among live rows (primary key).
//! - Listing order is insertion order (`rowid ASC`); a re-inserted id
//!   lands at the end.
//! - Every successful write is committed before the call returns.

use crate::db::{self, DbError, SharedConnection};
use crate::model::user::{AccessLevel, RecordValidationError, User, UserId};
use rusqlite::{params, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const USER_COLUMNS: &[&str] = &["id", "name", "access_level", "created_at"];

pub type RepoResult<T> = Result<T, RepoError>;

/// Directory store error.
#[derive(Debug)]
pub enum RepoError {
    Validation(RecordValidationError),
    DuplicateId(UserId),
    NotFound(UserId),
    Db(DbError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::DuplicateId(id) => write!(f, "user id already exists: {id}"),
            Self::NotFound(id) => write!(f, "user not found: {id}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted user data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::DuplicateId(_) | Self::NotFound(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Durable keyed table of user records.
pub trait UserRepository {
    /// Inserts a new record; fails with `DuplicateId` on key conflict.
    fn create_user(&self, user: &User) -> RepoResult<()>;
    /// Deletes a record and returns its last snapshot.
    fn remove_user(&self, id: &UserId) -> RepoResult<User>;
    fn get_user(&self, id: &UserId) -> RepoResult<User>;
    /// Snapshot of all live records in insertion order.
    fn list_users(&self) -> RepoResult<Vec<User>>;
}

/// SQLite-backed directory store.
pub struct SqliteUserRepository {
    conn: SharedConnection,
}

impl SqliteUserRepository {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: SharedConnection) -> Result<Self, DbError> {
        db::ensure_connection_ready(&*db::lock(&conn)?, "users", USER_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl UserRepository for SqliteUserRepository {
    fn create_user(&self, user: &User) -> RepoResult<()> {
        let conn = db::lock(&self.conn)?;
        let inserted = conn.execute(
            "INSERT INTO users (id, name, access_level) VALUES (?1, ?2, ?3);",
            params![
                user.id().as_str(),
                user.name(),
                user.access_level().as_str()
            ],
        );

        match inserted {
            Ok(_) => Ok(()),
            Err(err) if is_primary_key_conflict(&err) => {
                Err(RepoError::DuplicateId(user.id().clone()))
            }
            Err(err) => Err(err.into()),
        }
    }

    fn remove_user(&self, id: &UserId) -> RepoResult<User> {
        let conn = db::lock(&self.conn)?;
        let removed = conn
            .query_row(
                "DELETE FROM users
                 WHERE id = ?1
                 RETURNING id, name, access_level;",
                [id.as_str()],
                read_user_columns,
            )
            .optional()?;

        match removed {
            Some(columns) => parse_user(columns),
            None => Err(RepoError::NotFound(id.clone())),
        }
    }

    fn get_user(&self, id: &UserId) -> RepoResult<User> {
        let conn = db::lock(&self.conn)?;
        let found = conn
            .query_row(
                "SELECT id, name, access_level FROM users WHERE id = ?1;",
                [id.as_str()],
                read_user_columns,
            )
            .optional()?;

        match found {
            Some(columns) => parse_user(columns),
            None => Err(RepoError::NotFound(id.clone())),
        }
    }

    fn list_users(&self) -> RepoResult<Vec<User>> {
        let conn = db::lock(&self.conn)?;
        let mut stmt =
            conn.prepare("SELECT id, name, access_level FROM users ORDER BY rowid ASC;")?;
        let mut rows = stmt.query([])?;
        let mut users = Vec::new();
        while let Some(row) = rows.next()? {
            users.push(parse_user(read_user_columns(row)?)?);
        }
        Ok(users)
    }
}

type UserColumns = (String, String, String);

fn read_user_columns(row: &Row<'_>) -> rusqlite::Result<UserColumns> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?))
}

fn parse_user((id, name, access_level): UserColumns) -> RepoResult<User> {
    let level = AccessLevel::parse(&access_level).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid access level `{access_level}` in users.access_level"
        ))
    })?;
    User::with_access_level(id, name, level).map_err(|err| {
        RepoError::InvalidData(format!("row rejected by record validation: {err}"))
    })
}

fn is_primary_key_conflict(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
    )
}
