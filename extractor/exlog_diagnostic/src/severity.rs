//! Severity scale for extractor diagnostics and verbosity levels for the log.
//!
//! Severities are ranked 1 through 8. Ranks 1–3 form the warn-class band and
//! are tagged `WARN` in the log; ranks 4–8 form the error-class band and are
//! tagged `ERROR`.

use std::fmt;

/// Severity of a diagnostic message.
///
/// Declaration order matches rank order, so the derived `Ord` is the rank order.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum Severity {
    WarnLow,
    Warn,
    WarnHigh,
    /// Minor extractor errors, with minimal impact on analysis.
    ErrorLow,
    /// Most extractor errors, with local impact on analysis.
    Error,
    /// Errors reported by the front-end compiler.
    ErrorHigh,
    /// Severe extractor errors affecting a single source file.
    ErrorSevere,
    /// Severe extractor errors likely to affect multiple source files.
    ErrorGlobal,
}

impl Severity {
    /// Every severity, in rank order.
    pub const ALL: [Severity; 8] = [
        Severity::WarnLow,
        Severity::Warn,
        Severity::WarnHigh,
        Severity::ErrorLow,
        Severity::Error,
        Severity::ErrorHigh,
        Severity::ErrorSevere,
        Severity::ErrorGlobal,
    ];

    /// Numeric rank as stored in diagnostic records.
    #[inline]
    pub const fn rank(self) -> u8 {
        match self {
            Severity::WarnLow => 1,
            Severity::Warn => 2,
            Severity::WarnHigh => 3,
            Severity::ErrorLow => 4,
            Severity::Error => 5,
            Severity::ErrorHigh => 6,
            Severity::ErrorSevere => 7,
            Severity::ErrorGlobal => 8,
        }
    }

    /// Look up a severity by its rank.
    pub fn from_rank(rank: u8) -> Option<Severity> {
        Severity::ALL.into_iter().find(|s| s.rank() == rank)
    }

    /// Whether this severity belongs to the warn-class band (rank <= 3).
    #[inline]
    pub const fn is_warn_class(self) -> bool {
        self.rank() <= Severity::WarnHigh.rank()
    }

    /// Textual tag used for this severity in the log stream.
    pub const fn tag(self) -> &'static str {
        if self.is_warn_class() {
            "WARN"
        } else {
            "ERROR"
        }
    }

    /// The verbosity level a diagnostic of this severity is gated on.
    pub const fn level(self) -> LogLevel {
        if self.is_warn_class() {
            LogLevel::Warn
        } else {
            LogLevel::Error
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({})", self, self.rank())
    }
}

/// Level of a log call, used against the configured verbosity.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Minimum verbosity at which calls at this level are written.
    pub const fn required_verbosity(self) -> i64 {
        match self {
            LogLevel::Error => 1,
            LogLevel::Warn => 2,
            LogLevel::Info => 3,
            LogLevel::Debug | LogLevel::Trace => 4,
        }
    }

    /// Kind tag written into log lines for non-diagnostic messages.
    pub const fn kind(self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
            LogLevel::Trace => "TRACE",
        }
    }
}

/// Configured verbosity, fixed for the lifetime of an engine.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Verbosity(pub i64);

impl Verbosity {
    /// Whether calls at `level` pass the gate.
    #[inline]
    pub fn allows(self, level: LogLevel) -> bool {
        self.0 >= level.required_verbosity()
    }
}

impl Default for Verbosity {
    fn default() -> Self {
        Verbosity(3)
    }
}
