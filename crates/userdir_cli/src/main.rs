//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `userdir_core` linkage and schema bootstrap from a binary.
//! - Keep output deterministic for quick local sanity checks.

use std::process::ExitCode;
use userdir_core::db::{migrations::latest_version, open_store};
use userdir_core::StoreLocation;

fn main() -> ExitCode {
    println!("userdir_core ping={}", userdir_core::ping());
    println!("userdir_core version={}", userdir_core::core_version());

    match open_store(&StoreLocation::InMemory) {
        Ok(_) => {
            println!("userdir_core schema_version={}", latest_version());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("userdir_core store_open_failed error={err}");
            ExitCode::FAILURE
        }
    }
}
