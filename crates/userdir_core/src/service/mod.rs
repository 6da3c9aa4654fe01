//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate directory and audit repositories into admin use-cases.
//! - Keep front ends decoupled from storage details.

pub mod admin_service;
