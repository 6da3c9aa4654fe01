//! Typed runtime configuration passed in by the hosting process.
//!
//! # Responsibility
//! - Normalize logging level/directory input before logger startup.
//! - Describe where the directory database lives.
//!
//! # Invariants
//! - Core never reads environment variables or config files on its own.
//! - A constructed `LoggingConfig` always holds a supported level and an
//!   absolute directory.

use std::path::{Path, PathBuf};

/// Storage location for the directory database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
    /// SQLite file, created on first open.
    File(PathBuf),
    /// Process-local database; contents vanish with the connection.
    InMemory,
}

impl StoreLocation {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File(path.into())
    }

    /// Short label used in diagnostic log lines.
    pub fn mode(&self) -> &'static str {
        match self {
            Self::File(_) => "file",
            Self::InMemory => "memory",
        }
    }
}

/// Validated logger settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    level: &'static str,
    log_dir: PathBuf,
}

impl LoggingConfig {
    /// Builds a logging config from raw host input.
    ///
    /// # Errors
    /// - Returns an error when `level` is not one of
    ///   `trace|debug|info|warn|error` (`warning` is accepted as `warn`).
    /// - Returns an error when `log_dir` is blank or relative.
    pub fn new(level: &str, log_dir: &str) -> Result<Self, String> {
        Ok(Self {
            level: normalize_level(level)?,
            log_dir: normalize_log_dir(log_dir)?,
        })
    }

    /// Uses the build-mode default level.
    pub fn with_default_level(log_dir: &str) -> Result<Self, String> {
        Self::new(default_log_level(), log_dir)
    }

    pub fn level(&self) -> &'static str {
        self.level
    }

    pub fn log_dir(&self) -> &Path {
        self.log_dir.as_path()
    }
}

/// Returns `debug` for debug builds and `info` for release builds.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn normalize_level(level: &str) -> Result<&'static str, String> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        other => Err(format!(
            "unsupported log level `{other}`; expected trace|debug|info|warn|error"
        )),
    }
}

fn normalize_log_dir(log_dir: &str) -> Result<PathBuf, String> {
    let trimmed = log_dir.trim();
    if trimmed.is_empty() {
        return Err("log_dir cannot be empty".to_string());
    }
    let path = Path::new(trimmed);
    if !path.is_absolute() {
        return Err(format!("log_dir must be an absolute path, got `{trimmed}`"));
    }
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::{default_log_level, LoggingConfig, StoreLocation};

    #[test]
    fn level_aliases_are_normalized() {
        let dir = std::env::temp_dir();
        let dir = dir.to_str().expect("temp dir should be valid UTF-8");

        let config = LoggingConfig::new(" WARNING ", dir).unwrap();
        assert_eq!(config.level(), "warn");
        assert_eq!(LoggingConfig::new("Info", dir).unwrap().level(), "info");
    }

    #[test]
    fn default_level_follows_build_mode() {
        let dir = std::env::temp_dir();
        let dir = dir.to_str().expect("temp dir should be valid UTF-8");

        let config = LoggingConfig::with_default_level(dir).unwrap();
        assert_eq!(config.level(), default_log_level());
        assert_eq!(config.log_dir(), std::env::temp_dir());
    }

    #[test]
    fn unknown_level_is_rejected() {
        let dir = std::env::temp_dir();
        let dir = dir.to_str().expect("temp dir should be valid UTF-8");

        let err = LoggingConfig::new("verbose", dir).unwrap_err();
        assert!(err.contains("unsupported log level"));
    }

    #[test]
    fn relative_or_blank_log_dir_is_rejected() {
        assert!(LoggingConfig::new("info", "logs/dev")
            .unwrap_err()
            .contains("absolute"));
        assert!(LoggingConfig::new("info", "   ")
            .unwrap_err()
            .contains("empty"));
    }

    #[test]
    fn store_location_reports_mode() {
        assert_eq!(StoreLocation::InMemory.mode(), "memory");
        assert_eq!(StoreLocation::file("/tmp/users.db").mode(), "file");
    }
}
