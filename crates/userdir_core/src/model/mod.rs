//! Domain model for the user directory and its audit trail.
//!
//! # Responsibility
//! - Define the canonical record shapes used by repositories and services.
//! - Express roles as an access-level tag instead of separate record types.
//!
//! # Invariants
//! - Every directory record is identified by a non-blank `UserId`.
//! - Audit entries are append-only values; nothing here mutates them.

pub mod audit;
pub mod user;
