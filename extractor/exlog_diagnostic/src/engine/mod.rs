//! The diagnostics engine.
//!
//! One engine is shared by every unit of work in a run. It owns the two pieces
//! of process-wide state, the [`DiagnosticCounter`] and the [`LogStream`],
//! each behind its own lock. Trap writers and [`LoggerState`] belong to the
//! calling unit and are passed in per call.
//!
//! A diagnostic goes through these steps:
//! 1. classify its origin with the counter, returning early when suppressed
//! 2. build the body: message, extra info, context trail, limit notice
//! 3. resolve the location entity (only now, since it may write records)
//! 4. write the `diagnostics` record and, for a unit, its association
//! 5. write the JSON line to the log stream

use std::io::{self, Write};

use parking_lot::Mutex;

use crate::error::TrapResultExt;
use crate::{
    Classification, DiagnosticCounter, DiagnosticKey, DiagnosticRecord, DiagnosticTrapWriter,
    Label, LogConfig, LogError, LogLevel, LogMessage, LogStream, LoggerState, Origin, Result,
    Severity, Verbosity, COMPILATION_UNIT,
};

/// Shown in place of the origin when the caller is not known.
const UNKNOWN_ORIGIN: &str = "<unknown location>";

const MISSING_CALLER_NOTICE: &str = "    Missing caller information.";

/// A diagnostic to be emitted.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Report<'a> {
    pub severity: Severity,
    /// Short message; also stored on its own in the diagnostic record.
    pub message: &'a str,
    /// Appended to the body on its own line, e.g. an error chain.
    pub extra_info: Option<&'a str>,
    /// Call site used for rate limiting. `None` disables limiting for this
    /// diagnostic and marks it as missing caller information.
    pub origin: Option<Origin>,
    /// Human-readable location of the element the diagnostic is about.
    pub location_string: Option<&'a str>,
}

impl<'a> Report<'a> {
    pub fn new(severity: Severity, message: &'a str, origin: Option<Origin>) -> Self {
        Report {
            severity,
            message,
            extra_info: None,
            origin,
            location_string: None,
        }
    }

    #[must_use]
    pub fn with_extra_info(mut self, extra_info: Option<&'a str>) -> Self {
        self.extra_info = extra_info;
        self
    }

    #[must_use]
    pub fn with_location_string(mut self, location_string: Option<&'a str>) -> Self {
        self.location_string = location_string;
        self
    }
}

pub struct DiagnosticsEngine {
    config: LogConfig,
    counter: Mutex<DiagnosticCounter>,
    stream: Mutex<LogStream>,
}

impl DiagnosticsEngine {
    /// Create an engine writing its log lines to `stream`.
    pub fn new(config: LogConfig, stream: impl Into<LogStream>) -> Self {
        let counter = DiagnosticCounter::new(config.diagnostic_limit);
        DiagnosticsEngine {
            config,
            counter: Mutex::new(counter),
            stream: Mutex::new(stream.into()),
        }
    }

    /// Create an engine with the log stream described by `config`.
    pub fn from_config(config: LogConfig) -> Result<Self> {
        let stream = LogStream::open(&config)?;
        Ok(Self::new(config, stream))
    }

    pub fn config(&self) -> &LogConfig {
        &self.config
    }

    pub fn verbosity(&self) -> Verbosity {
        self.config.verbosity
    }

    /// Whether calls at `level` pass the verbosity gate.
    #[inline]
    pub fn enabled(&self, level: LogLevel) -> bool {
        self.config.verbosity.allows(level)
    }

    /// How many times `key` has been seen, suppressed occurrences included.
    pub fn occurrences(&self, key: &DiagnosticKey) -> u64 {
        self.counter.lock().count(key)
    }

    /// Path of the log file, when logging to a file.
    pub fn log_path(&self) -> Option<std::path::PathBuf> {
        self.stream.lock().path().map(std::path::Path::to_path_buf)
    }

    /// Write a plain log message: a comment record in the trap file and a
    /// JSON line in the log. Not rate limited and not gated on verbosity.
    pub fn log<W>(&self, trap: &mut W, level: LogLevel, message: &str) -> Result<()>
    where
        W: DiagnosticTrapWriter + ?Sized,
    {
        let log_message = LogMessage::new(level.kind(), message);
        trap.write_comment(&log_message.to_text()).trap_err()?;
        self.write_line(&log_message.to_json_line(&self.config.origin))
    }

    /// Emit a diagnostic, unless its origin has exceeded the limit.
    ///
    /// `mk_location` is only called once the diagnostic is known to be
    /// emitted. With a `state`, the diagnostic is associated with that unit
    /// and the unit's count advances.
    #[tracing::instrument(level = "trace", skip_all, fields(severity = report.severity.rank()))]
    pub fn diagnostic<W, F>(
        &self,
        trap: &mut W,
        report: &Report<'_>,
        state: Option<&mut LoggerState>,
        mk_location: F,
    ) -> Result<()>
    where
        W: DiagnosticTrapWriter + ?Sized,
        F: FnOnce(&mut W) -> io::Result<Label>,
    {
        let notice = match report.origin {
            None => Some(MISSING_CALLER_NOTICE.to_string()),
            Some(origin) => match self.counter.lock().record((origin, report.severity)) {
                Classification::Normal => None,
                Classification::LimitReached => {
                    tracing::debug!(%origin, "diagnostic limit reached");
                    Some(format!("    Limit reached for diagnostics from {origin}."))
                }
                Classification::Suppressed => {
                    tracing::trace!(%origin, "diagnostic suppressed");
                    return Ok(());
                }
            },
        };

        let mut body = String::from(report.message);
        if let Some(extra) = report.extra_info {
            body.push('\n');
            body.push_str(extra);
        }
        if let Some(state) = state.as_deref() {
            for line in state.context.render_trail() {
                body.push('\n');
                body.push_str(&line);
            }
        }
        if let Some(notice) = notice {
            body.push('\n');
            body.push_str(&notice);
        }

        let location = mk_location(trap).trap_err()?;

        let origin = report
            .origin
            .map_or_else(|| UNKNOWN_ORIGIN.to_string(), |o| o.to_string());
        let at = report
            .location_string
            .map(|loc| format!("At {loc}: "))
            .unwrap_or_default();
        let log_message = LogMessage::new(
            report.severity.tag(),
            format!("Diagnostic({origin}): {at}{body}"),
        );

        let id = trap.fresh_id();
        let full_message = format!("{} {body}", log_message.timestamp());
        trap.write_diagnostic(&DiagnosticRecord {
            id,
            origin: &self.config.origin,
            severity: report.severity.rank(),
            category: "",
            message: report.message,
            full_message: &full_message,
            location,
        })
        .trap_err()?;

        if let Some(state) = state {
            let sequence = state.next_sequence();
            trap.write_diagnostic_for(id, COMPILATION_UNIT, state.file_number, sequence)
                .trap_err()?;
        }

        self.write_line(&log_message.to_json_line(&self.config.origin))
    }

    fn write_line(&self, line: &str) -> Result<()> {
        self.stream
            .lock()
            .write_all(line.as_bytes())
            .map_err(LogError::Stream)
    }

    pub fn flush(&self) -> Result<()> {
        self.stream.lock().flush().map_err(LogError::Stream)
    }

    /// Flush and release the log stream.
    pub fn close(self) -> Result<()> {
        let mut stream = self.stream.into_inner();
        stream.flush().map_err(LogError::Stream)
    }
}
