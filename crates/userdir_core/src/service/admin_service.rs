//! Admin use-case service.
//!
//! # Responsibility
//! - Pair every directory mutation with exactly one audit entry.
//! - Serialize mutating calls so store and log never interleave.
//! - Map repository failures into the caller-facing error taxonomy.
//!
//! # Invariants
//! - The directory write happens before the audit append.
//! - A failed directory write produces no audit entry.
//! - A failed audit append after a successful directory write surfaces as
//!   `AuditFailed`; the directory change stays applied.
//! - Readers observe either the state before or after a whole mutating call.

use crate::config::StoreLocation;
use crate::db::{self, DbError};
use crate::model::audit::{AdminAction, AuditEntry, LogOrder};
use crate::model::user::{Admin, RecordValidationError, User, UserId};
use crate::repo::audit_repo::{AuditLogError, AuditLogRepository, SqliteAuditLogRepository};
use crate::repo::user_repo::{RepoError, SqliteUserRepository, UserRepository};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Instant;

/// Admin service over the SQLite repositories.
pub type SqliteAdminService = AdminService<SqliteUserRepository, SqliteAuditLogRepository>;

pub type AdminResult<T> = Result<T, AdminServiceError>;

/// Audit record whose append failed after the directory change was applied.
///
/// Only produced by a failed mutation and consumed by a successful
/// `AdminService::reconcile_audit`, so each one yields at most one entry.
///
/// ```compile_fail
/// use userdir_core::{AdminAction, PendingAudit, UserId};
///
/// let forged = PendingAudit {
///     actor_name: "Mallory".to_string(),
///     action: AdminAction::RemovedUser {
///         id: UserId::parse("99").unwrap(),
///         name: "Ghost".to_string(),
///     },
/// };
/// ```
#[derive(Debug, PartialEq, Eq)]
pub struct PendingAudit {
    actor_name: String,
    action: AdminAction,
}

impl PendingAudit {
    pub fn actor_name(&self) -> &str {
        self.actor_name.as_str()
    }

    pub fn action(&self) -> &AdminAction {
        &self.action
    }
}

/// Result of a mutating call that fully succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedChange {
    /// Created record, or the snapshot of the removed one.
    pub user: User,
    pub audit_entry: AuditEntry,
}

/// Errors from admin service operations.
#[derive(Debug)]
pub enum AdminServiceError {
    /// Id or name failed record validation. Nothing changed.
    InvalidRecord(RecordValidationError),
    /// Id already present. Nothing changed.
    DuplicateId(UserId),
    /// No live record with this id. Nothing changed.
    NotFound(UserId),
    /// Directory change applied, audit entry missing.
    ///
    /// Pass `pending` to `AdminService::reconcile_audit` to retry only the
    /// audit step.
    AuditFailed {
        pending: PendingAudit,
        source: AuditLogError,
    },
    /// Audit log could not be read.
    LogUnavailable(AuditLogError),
    /// Directory storage failure. Nothing changed.
    Storage(RepoError),
}

impl AdminServiceError {
    /// Whether the directory mutation was applied despite the error.
    pub fn mutation_applied(&self) -> bool {
        matches!(self, Self::AuditFailed { .. })
    }
}

impl Display for AdminServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRecord(err) => write!(f, "invalid record: {err}"),
            Self::DuplicateId(id) => write!(f, "user id already exists: {id}"),
            Self::NotFound(id) => write!(f, "user not found: {id}"),
            Self::AuditFailed { pending, source } => write!(
                f,
                "change applied but audit entry `{}` was not recorded: {source}",
                pending.action
            ),
            Self::LogUnavailable(err) => write!(f, "{err}"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for AdminServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidRecord(err) => Some(err),
            Self::AuditFailed { source, .. } => Some(source),
            Self::LogUnavailable(err) => Some(err),
            Self::Storage(err) => Some(err),
            Self::DuplicateId(_) | Self::NotFound(_) => None,
        }
    }
}

impl From<RecordValidationError> for AdminServiceError {
    fn from(value: RecordValidationError) -> Self {
        Self::InvalidRecord(value)
    }
}

impl From<RepoError> for AdminServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::InvalidRecord(err),
            RepoError::DuplicateId(id) => Self::DuplicateId(id),
            RepoError::NotFound(id) => Self::NotFound(id),
            other => Self::Storage(other),
        }
    }
}

impl From<AuditLogError> for AdminServiceError {
    fn from(value: AuditLogError) -> Self {
        Self::LogUnavailable(value)
    }
}

/// Orchestrates the directory store and audit log for one admin actor.
///
/// Owns both repositories; callers only ever see snapshots.
pub struct AdminService<D: UserRepository, L: AuditLogRepository> {
    admin: Admin,
    directory: D,
    audit_log: L,
    // Write side: one whole mutation. Read side: one listing.
    critical_section: RwLock<()>,
}

impl SqliteAdminService {
    /// Opens (or creates) the database at `location` and builds a service
    /// whose repositories share a single connection.
    pub fn open(location: &StoreLocation, admin: Admin) -> Result<Self, DbError> {
        let conn = db::open_shared(location)?;
        let directory = SqliteUserRepository::try_new(conn.clone())?;
        let audit_log = SqliteAuditLogRepository::try_new(conn)?;
        Ok(Self::new(admin, directory, audit_log))
    }
}

impl<D: UserRepository, L: AuditLogRepository> AdminService<D, L> {
    pub fn new(admin: Admin, directory: D, audit_log: L) -> Self {
        Self {
            admin,
            directory,
            audit_log,
            critical_section: RwLock::new(()),
        }
    }

    /// The actor recorded in every audit entry this service writes.
    pub fn admin(&self) -> &Admin {
        &self.admin
    }

    /// Creates a `user`-level record and audits it.
    ///
    /// # Errors
    /// - `InvalidRecord` for a blank id or name.
    /// - `DuplicateId` when the id is already present.
    /// - `AuditFailed` when the user was stored but the log append failed.
    pub fn add_user(
        &self,
        id: impl Into<String>,
        name: impl Into<String>,
    ) -> AdminResult<AppliedChange> {
        let user = User::new(id, name)?;
        let _guard = self.write_guard();
        let started_at = Instant::now();

        if let Err(err) = self.directory.create_user(&user) {
            log_rejected("user_add", user.id(), &err, started_at);
            return Err(err.into());
        }

        let action = AdminAction::added(&user);
        self.record(action, started_at)
            .map(|audit_entry| AppliedChange { user, audit_entry })
    }

    /// Removes a record and audits it with the removed name.
    ///
    /// # Errors
    /// - `InvalidRecord` for a blank id.
    /// - `NotFound` when no live record has this id.
    /// - `AuditFailed` when the user was removed but the log append failed.
    pub fn remove_user(&self, id: impl Into<String>) -> AdminResult<AppliedChange> {
        let id = UserId::parse(id)?;
        let _guard = self.write_guard();
        let started_at = Instant::now();

        let removed = match self.directory.remove_user(&id) {
            Ok(user) => user,
            Err(err) => {
                log_rejected("user_remove", &id, &err, started_at);
                return Err(err.into());
            }
        };

        let action = AdminAction::removed(&removed);
        self.record(action, started_at)
            .map(|audit_entry| AppliedChange {
                user: removed,
                audit_entry,
            })
    }

    /// Snapshot of all live records in insertion order. Not audited.
    pub fn list_users(&self) -> AdminResult<Vec<User>> {
        let _guard = self.read_guard();
        self.directory.list_users().map_err(Into::into)
    }

    /// Full audit log in the requested order. Not audited.
    pub fn list_audit_log(&self, order: LogOrder) -> AdminResult<Vec<AuditEntry>> {
        let _guard = self.read_guard();
        self.audit_log.list_entries(order).map_err(Into::into)
    }

    /// Appends the audit record carried by `AuditFailed`.
    ///
    /// Never touches the directory. A successful call consumes `pending`;
    /// when the log is still unreachable the same record comes back inside
    /// `AuditFailed` so the caller can retry later.
    ///
    /// ```compile_fail
    /// use userdir_core::{AdminServiceError, SqliteAdminService};
    ///
    /// fn reconcile_twice(service: &SqliteAdminService, err: AdminServiceError) {
    ///     if let AdminServiceError::AuditFailed { pending, .. } = err {
    ///         let _ = service.reconcile_audit(pending);
    ///         let _ = service.reconcile_audit(pending);
    ///     }
    /// }
    /// ```
    pub fn reconcile_audit(&self, pending: PendingAudit) -> AdminResult<AuditEntry> {
        let _guard = self.write_guard();
        let entry = match self
            .audit_log
            .append(&pending.actor_name, &pending.action.description())
        {
            Ok(entry) => entry,
            Err(source) => {
                warn!(
                    "event=audit_reconcile module=service status=error user_id={} error_code=audit_failed error={}",
                    pending.action.user_id(),
                    source
                );
                return Err(AdminServiceError::AuditFailed { pending, source });
            }
        };
        info!(
            "event=audit_reconcile module=service status=ok user_id={} log_id={}",
            pending.action.user_id(),
            entry.log_id
        );
        Ok(entry)
    }

    fn record(&self, action: AdminAction, started_at: Instant) -> AdminResult<AuditEntry> {
        match self.audit_log.append(self.admin.name(), &action.description()) {
            Ok(entry) => {
                info!(
                    "event={} module=service status=ok user_id={} log_id={} duration_ms={}",
                    action.event_name(),
                    action.user_id(),
                    entry.log_id,
                    started_at.elapsed().as_millis()
                );
                Ok(entry)
            }
            Err(source) => {
                warn!(
                    "event={} module=service status=degraded user_id={} duration_ms={} error_code=audit_failed error={}",
                    action.event_name(),
                    action.user_id(),
                    started_at.elapsed().as_millis(),
                    source
                );
                Err(AdminServiceError::AuditFailed {
                    pending: PendingAudit {
                        actor_name: self.admin.name().to_string(),
                        action,
                    },
                    source,
                })
            }
        }
    }

    // The lock guards no data, so a poisoned lock carries no torn state.
    fn write_guard(&self) -> RwLockWriteGuard<'_, ()> {
        self.critical_section
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn read_guard(&self) -> RwLockReadGuard<'_, ()> {
        self.critical_section
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

fn log_rejected(event: &str, id: &UserId, err: &RepoError, started_at: Instant) {
    let error_code = match err {
        RepoError::DuplicateId(_) => "duplicate_id",
        RepoError::NotFound(_) => "not_found",
        RepoError::Validation(_) => "invalid_record",
        RepoError::Db(_) | RepoError::InvalidData(_) => "storage_error",
    };
    warn!(
        "event={event} module=service status=error user_id={id} duration_ms={} error_code={error_code}",
        started_at.elapsed().as_millis()
    );
}
