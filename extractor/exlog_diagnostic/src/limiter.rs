//! Per call-site rate limiting of diagnostics.
//!
//! Every diagnostic is keyed by the source location that raised it and its
//! severity. Once a key has been seen `limit` times the last permitted
//! occurrence carries a one-time notice and later occurrences are dropped.

use std::fmt;
use std::panic::Location;

use rustc_hash::FxHashMap;

/// Call-site identity of a diagnostic, captured at compile time.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Origin {
    pub file: &'static str,
    pub line: u32,
    pub column: u32,
}

impl Origin {
    /// The location of the caller of the enclosing `#[track_caller]` function.
    #[track_caller]
    #[inline]
    pub fn caller() -> Self {
        Origin::from(Location::caller())
    }
}

impl From<&'static Location<'static>> for Origin {
    fn from(loc: &'static Location<'static>) -> Self {
        Origin {
            file: loc.file(),
            line: loc.line(),
            column: loc.column(),
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// Rate-limiting key: where a diagnostic came from and how severe it is.
pub type DiagnosticKey = (Origin, crate::Severity);

/// Outcome of recording one occurrence of a key.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Classification {
    /// Below the limit, or limiting disabled.
    Normal,
    /// Exactly at the limit: emit once more, with a notice.
    LimitReached,
    /// Past the limit: emit nothing.
    Suppressed,
}

/// Occurrence counts per [`DiagnosticKey`] with a shared limit.
///
/// A limit of zero or less disables limiting. Counts only ever grow.
#[derive(Clone, Debug, Default)]
pub struct DiagnosticCounter {
    counts: FxHashMap<DiagnosticKey, u64>,
    limit: i64,
}

impl DiagnosticCounter {
    pub fn new(limit: i64) -> Self {
        DiagnosticCounter {
            counts: FxHashMap::default(),
            limit,
        }
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }

    /// Number of occurrences recorded for `key` so far.
    pub fn count(&self, key: &DiagnosticKey) -> u64 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// Count one more occurrence of `key` and decide how to emit it.
    pub fn record(&mut self, key: DiagnosticKey) -> Classification {
        let count = self.counts.entry(key).or_insert(0);
        *count += 1;
        let Ok(limit) = u64::try_from(self.limit) else {
            return Classification::Normal;
        };
        if limit == 0 {
            return Classification::Normal;
        }
        match (*count).cmp(&limit) {
            std::cmp::Ordering::Less => Classification::Normal,
            std::cmp::Ordering::Equal => Classification::LimitReached,
            std::cmp::Ordering::Greater => Classification::Suppressed,
        }
    }
}
