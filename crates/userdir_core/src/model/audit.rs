//! Audit log record model.
//!
//! # Responsibility
//! - Define persisted audit entries and the actions that produce them.
//! - Render action descriptions in one canonical text form.
//!
//! # Invariants
//! - Entries are immutable after they are written.
//! - `log_id` ordering (ascending) is the ground-truth log order.

use crate::model::user::{User, UserId};
use serde::Serialize;
use std::fmt::{Display, Formatter};

/// Store-assigned audit sequence number. Starts at 1.
pub type LogId = i64;

/// One persisted administrative action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditEntry {
    pub log_id: LogId,
    pub actor_name: String,
    pub action: String,
    /// UTC, `YYYY-MM-DD HH:MM:SS`.
    pub timestamp: String,
}

/// Presentation order for audit listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LogOrder {
    /// Most recent first, for human review.
    #[default]
    NewestFirst,
    /// Ascending `log_id`.
    OldestFirst,
}

/// Directory mutation recorded in the audit log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminAction {
    AddedUser { id: UserId, name: String },
    RemovedUser { id: UserId, name: String },
}

impl AdminAction {
    pub fn added(user: &User) -> Self {
        Self::AddedUser {
            id: user.id().clone(),
            name: user.name().to_string(),
        }
    }

    pub fn removed(user: &User) -> Self {
        Self::RemovedUser {
            id: user.id().clone(),
            name: user.name().to_string(),
        }
    }

    pub fn user_id(&self) -> &UserId {
        match self {
            Self::AddedUser { id, .. } | Self::RemovedUser { id, .. } => id,
        }
    }

    /// Short event name used in diagnostic logs.
    pub fn event_name(&self) -> &'static str {
        match self {
            Self::AddedUser { .. } => "user_add",
            Self::RemovedUser { .. } => "user_remove",
        }
    }

    pub fn description(&self) -> String {
        self.to_string()
    }
}

impl Display for AdminAction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AddedUser { id, name } => write!(f, "added user {name} (id={id})"),
            Self::RemovedUser { id, name } => write!(f, "removed user {name} (id={id})"),
        }
    }
}
