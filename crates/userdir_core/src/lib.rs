//! Core domain logic for the audited user directory.
//! This crate is the single source of truth for the store/log pairing.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{default_log_level, LoggingConfig, StoreLocation};
pub use logging::{init_logging, logging_status};
pub use model::audit::{AdminAction, AuditEntry, LogId, LogOrder};
pub use model::user::{AccessLevel, Admin, RecordValidationError, User, UserId};
pub use repo::audit_repo::{
    AuditLogError, AuditLogRepository, AuditResult, SqliteAuditLogRepository,
};
pub use repo::user_repo::{RepoError, RepoResult, SqliteUserRepository, UserRepository};
pub use service::admin_service::{
    AdminResult, AdminService, AdminServiceError, AppliedChange, PendingAudit, SqliteAdminService,
};

/// Minimal health-check API for integration probes.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
