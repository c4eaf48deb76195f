//! Logging configuration, read once at startup.
//!
//! | Variable                 | Meaning                          | Default |
//! |--------------------------|----------------------------------|---------|
//! | `EXLOG_VERBOSITY`        | verbosity level                  | `3`     |
//! | `EXLOG_DIAGNOSTIC_LIMIT` | per call-site limit, `<= 0` off  | `100`   |
//! | `EXLOG_LOG_DIR`          | log directory, stdout when unset | unset   |
//! | `EXLOG_TRACE_TREE`       | tree output for `init_tracing`   | unset   |
//!
//! Malformed numbers fall back to the default; they are never fatal.

use std::path::PathBuf;

use crate::Verbosity;

pub const VERBOSITY_VAR: &str = "EXLOG_VERBOSITY";
pub const DIAGNOSTIC_LIMIT_VAR: &str = "EXLOG_DIAGNOSTIC_LIMIT";
pub const LOG_DIR_VAR: &str = "EXLOG_LOG_DIR";
pub const TRACE_TREE_VAR: &str = "EXLOG_TRACE_TREE";

pub const DEFAULT_DIAGNOSTIC_LIMIT: i64 = 100;

/// Origin string written into every JSON line and diagnostic record.
pub const DEFAULT_ORIGIN: &str = "Extractor";

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct LogConfig {
    pub verbosity: Verbosity,
    pub diagnostic_limit: i64,
    /// Directory for a fresh log file; `None` logs to stdout.
    pub log_dir: Option<PathBuf>,
    pub origin: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            verbosity: Verbosity::default(),
            diagnostic_limit: DEFAULT_DIAGNOSTIC_LIMIT,
            log_dir: None,
            origin: DEFAULT_ORIGIN.to_string(),
        }
    }
}

impl LogConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through `lookup`, which maps a variable name to
    /// its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = LogConfig::default();
        let verbosity = parse_int(VERBOSITY_VAR, lookup(VERBOSITY_VAR))
            .map_or(defaults.verbosity, Verbosity);
        let diagnostic_limit = parse_int(DIAGNOSTIC_LIMIT_VAR, lookup(DIAGNOSTIC_LIMIT_VAR))
            .unwrap_or(defaults.diagnostic_limit);
        let log_dir = lookup(LOG_DIR_VAR)
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from);

        tracing::debug!(
            verbosity = verbosity.0,
            diagnostic_limit,
            log_dir = ?log_dir,
            "loaded log configuration"
        );

        LogConfig {
            verbosity,
            diagnostic_limit,
            log_dir,
            origin: defaults.origin,
        }
    }

    #[must_use]
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = origin.into();
        self
    }
}

fn parse_int(key: &str, value: Option<String>) -> Option<i64> {
    let value = value?;
    match value.trim().parse() {
        Ok(n) => Some(n),
        Err(_) => {
            tracing::warn!(key, value = %value, "ignoring malformed integer setting");
            None
        }
    }
}

#[cfg(test)]
mod tests;
