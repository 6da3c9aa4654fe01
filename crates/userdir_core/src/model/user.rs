//! User directory record model.
//!
//! # Responsibility
//! - Define the single record shape shared by plain users and admins.
//! - Reject blank identifiers and names at construction time.
//!
//! # Invariants
//! - `id` never changes after construction.
//! - `name` is never blank, including after `rename`.
//! - `access_level` is fixed by the constructor that built the record.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Caller-supplied directory key.
///
/// Stored trimmed; never blank.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Parses a caller-provided identifier.
    ///
    /// # Errors
    /// - Returns `RecordValidationError::EmptyId` when `value` is blank.
    pub fn parse(value: impl Into<String>) -> Result<Self, RecordValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(RecordValidationError::EmptyId);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Privilege tag derived from the role a record was built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessLevel {
    User,
    Admin,
}

impl AccessLevel {
    /// Stable string used in storage and serialized payloads.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "user" => Some(Self::User),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }
}

/// Input-shape errors for directory records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordValidationError {
    EmptyId,
    EmptyName,
}

impl Display for RecordValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "user id must not be blank"),
            Self::EmptyName => write!(f, "user name must not be blank"),
        }
    }
}

impl Error for RecordValidationError {}

/// Directory record for one person.
///
/// Fields are private so the access level cannot be changed after
/// construction and the name cannot be blanked out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UserWire")]
pub struct User {
    id: UserId,
    name: String,
    access_level: AccessLevel,
}

impl User {
    /// Creates a plain `user`-level record.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<Self, RecordValidationError> {
        Self::with_access_level(id, name, AccessLevel::User)
    }

    pub(crate) fn with_access_level(
        id: impl Into<String>,
        name: impl Into<String>,
        access_level: AccessLevel,
    ) -> Result<Self, RecordValidationError> {
        let id = UserId::parse(id)?;
        let name = normalize_name(name.into())?;
        Ok(Self {
            id,
            name,
            access_level,
        })
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn access_level(&self) -> AccessLevel {
        self.access_level
    }

    pub fn is_admin(&self) -> bool {
        self.access_level == AccessLevel::Admin
    }

    /// Replaces the display name.
    ///
    /// The current name is kept when `new_name` is rejected.
    pub fn rename(&mut self, new_name: impl Into<String>) -> Result<(), RecordValidationError> {
        self.name = normalize_name(new_name.into())?;
        Ok(())
    }
}

/// Privileged actor performing directory administration.
///
/// Holds no directory state; the store is shared and owned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Admin(User);

impl Admin {
    /// Creates an `admin`-level record.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<Self, RecordValidationError> {
        User::with_access_level(id, name, AccessLevel::Admin).map(Self)
    }

    pub fn id(&self) -> &UserId {
        self.0.id()
    }

    pub fn name(&self) -> &str {
        self.0.name()
    }

    /// Snapshot of this admin as a directory record.
    pub fn as_user(&self) -> &User {
        &self.0
    }
}

#[derive(Deserialize)]
struct UserWire {
    id: String,
    name: String,
    access_level: AccessLevel,
}

impl TryFrom<UserWire> for User {
    type Error = RecordValidationError;

    fn try_from(value: UserWire) -> Result<Self, Self::Error> {
        Self::with_access_level(value.id, value.name, value.access_level)
    }
}

fn normalize_name(value: String) -> Result<String, RecordValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(RecordValidationError::EmptyName);
    }
    Ok(trimmed.to_string())
}
