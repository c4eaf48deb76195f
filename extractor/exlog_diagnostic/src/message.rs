//! Log message formatting.
//!
//! A [`LogMessage`] is stamped with the local time when it is built and has
//! two projections: a plain text line (written as trap comments) and a
//! single-line JSON object (written to the log stream). Downstream tooling
//! parses the JSON form, so its key order and escaping table are fixed.

use std::fmt::Write;

/// Timestamp layout shared by both projections.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A single log message with its construction timestamp.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct LogMessage {
    kind: String,
    message: String,
    timestamp: String,
}

impl LogMessage {
    /// Create a message stamped with the current local time.
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        let timestamp = chrono::Local::now().format(TIMESTAMP_FORMAT).to_string();
        Self::with_timestamp(kind, message, timestamp)
    }

    /// Create a message with an explicit timestamp.
    pub fn with_timestamp(
        kind: impl Into<String>,
        message: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        LogMessage {
            kind: kind.into(),
            message: message.into(),
            timestamp: timestamp.into(),
        }
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// Plain text form: `[<timestamp> K] [<kind>] <message>`.
    pub fn to_text(&self) -> String {
        format!("[{} K] [{}] {}", self.timestamp, self.kind, self.message)
    }

    /// JSON form, terminated by a newline.
    ///
    /// Keys are always `origin`, `timestamp`, `kind`, `message`, in that order.
    pub fn to_json_line(&self, origin: &str) -> String {
        let fields = [
            ("origin", origin),
            ("timestamp", self.timestamp.as_str()),
            ("kind", self.kind.as_str()),
            ("message", self.message.as_str()),
        ];
        let mut line = String::from("{ ");
        for (i, (key, value)) in fields.iter().enumerate() {
            if i > 0 {
                line.push_str(", ");
            }
            let _ = write!(line, "\"{key}\": \"{}\"", escape_json(value));
        }
        line.push_str(" }\n");
        line
    }
}

/// Escape a string for the JSON log line.
///
/// Only backslash, double quote and the C0 control characters are rewritten.
/// The five named controls use their short escapes; the rest use `\u00XX`
/// with uppercase hex digits.
pub fn escape_json(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => result.push_str("\\\\"),
            '"' => result.push_str("\\\""),
            '\u{08}' => result.push_str("\\b"),
            '\t' => result.push_str("\\t"),
            '\n' => result.push_str("\\n"),
            '\u{0C}' => result.push_str("\\f"),
            '\r' => result.push_str("\\r"),
            c if u32::from(c) < 0x20 => {
                let _ = write!(result, "\\u{:04X}", u32::from(c));
            }
            c => result.push(c),
        }
    }
    result
}
