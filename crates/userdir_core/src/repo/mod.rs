//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define storage-agnostic contracts for the directory and its audit log.
//! - Keep SQLite query details out of service orchestration.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`DuplicateId`, `NotFound`,
//!   `LogUnavailable`) in addition to DB transport errors.
//! - Write methods are called only by `AdminService`.

pub mod audit_repo;
pub mod user_repo;
