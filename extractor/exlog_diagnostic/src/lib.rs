//! Diagnostics and logging engine for the extractor.
//!
//! Extraction code logs through a [`Logger`] or, when working on a source
//! file, a [`FileLogger`]. Both delegate to one shared [`DiagnosticsEngine`],
//! which writes:
//! - a JSON line per message to the log stream (stdout or a log file)
//! - `diagnostics` records, unit associations and comments to the caller's
//!   [`DiagnosticTrapWriter`]
//!
//! Diagnostics are rate limited per call site and severity. With the default
//! limit of 100, the 100th warning from one line of extractor code says so and
//! the rest are dropped.
//!
//! ```text
//! let engine = DiagnosticsEngine::from_config(LogConfig::from_env())?;
//! let mut logger = FileLogger::new(&engine, &mut trap, file_number);
//! let mut scope = logger.enter(ExtractorContext::new("function", name, loc));
//! scope.warn("unexpected receiver type")?;
//! ```

use std::sync::Once;

pub mod config;
mod context;
mod engine;
mod error;
mod limiter;
pub mod logger;
mod message;
mod severity;
mod sink;
mod stream;

#[cfg(test)]
pub mod test_support;

pub use config::LogConfig;
pub use context::{ContextStack, ExtractorContext, LoggerState};
pub use engine::{DiagnosticsEngine, Report};
pub use error::{LogError, Result};
pub use limiter::{Classification, DiagnosticCounter, DiagnosticKey, Origin};
pub use logger::{ContextScope, FileLogger, Logger};
pub use message::{escape_json, LogMessage};
pub use severity::{LogLevel, Severity, Verbosity};
pub use sink::{DiagnosticRecord, DiagnosticTrapWriter, Label, LocationResolver, COMPILATION_UNIT};
pub use stream::{LogStream, SharedBuffer};

static TRACING_INIT: Once = Once::new();

/// Initialize the tracing subscriber for the engine's own debug output.
///
/// Call this once at startup. Safe to call multiple times.
/// Enable with `RUST_LOG=exlog_diagnostic=debug`; set `EXLOG_TRACE_TREE` to
/// show nested extraction spans as a tree. Output goes to stderr so it never
/// mixes with a log stream on stdout.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let tree = std::env::var_os(config::TRACE_TREE_VAR).is_some();
            let tree_layer = tree.then(|| {
                tracing_tree::HierarchicalLayer::new(2)
                    .with_targets(true)
                    .with_writer(std::io::stderr)
            });
            let fmt_layer = (!tree).then(|| {
                fmt::layer()
                    .with_target(true)
                    .with_level(true)
                    .with_writer(std::io::stderr)
            });
            tracing_subscriber::registry()
                .with(tree_layer)
                .with(fmt_layer)
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}
