//! In-memory collaborators for the unit tests.

use std::io;

use crate::{
    DiagnosticRecord, DiagnosticTrapWriter, DiagnosticsEngine, Label, LocationResolver,
    LogConfig, SharedBuffer, Verbosity,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredDiagnostic {
    pub id: Label,
    pub origin: String,
    pub severity: u8,
    pub category: String,
    pub message: String,
    pub full_message: String,
    pub location: Label,
}

#[derive(Debug, Default)]
pub struct MemoryTrap {
    pub next_id: u64,
    pub unknown: Option<Label>,
    pub diagnostics: Vec<StoredDiagnostic>,
    pub associations: Vec<(Label, String, u32, u32)>,
    pub comments: Vec<String>,
    pub flushes: usize,
}

impl DiagnosticTrapWriter for MemoryTrap {
    fn fresh_id(&mut self) -> Label {
        self.next_id += 1;
        Label(self.next_id)
    }

    fn unknown_location(&mut self) -> io::Result<Label> {
        if let Some(label) = self.unknown {
            return Ok(label);
        }
        let label = self.fresh_id();
        self.unknown = Some(label);
        Ok(label)
    }

    fn write_diagnostic(&mut self, record: &DiagnosticRecord<'_>) -> io::Result<()> {
        self.diagnostics.push(StoredDiagnostic {
            id: record.id,
            origin: record.origin.to_string(),
            severity: record.severity,
            category: record.category.to_string(),
            message: record.message.to_string(),
            full_message: record.full_message.to_string(),
            location: record.location,
        });
        Ok(())
    }

    fn write_diagnostic_for(
        &mut self,
        diag: Label,
        unit: &str,
        unit_number: u32,
        sequence: u32,
    ) -> io::Result<()> {
        self.associations
            .push((diag, unit.to_string(), unit_number, sequence));
        Ok(())
    }

    fn write_comment(&mut self, text: &str) -> io::Result<()> {
        self.comments.push(text.to_string());
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flushes += 1;
        Ok(())
    }
}

/// Trap writer whose every write fails.
pub struct BrokenTrap;

impl DiagnosticTrapWriter for BrokenTrap {
    fn fresh_id(&mut self) -> Label {
        Label(0)
    }

    fn unknown_location(&mut self) -> io::Result<Label> {
        Err(io::Error::other("no location"))
    }

    fn write_diagnostic(&mut self, _record: &DiagnosticRecord<'_>) -> io::Result<()> {
        Err(io::Error::other("disk full"))
    }

    fn write_diagnostic_for(&mut self, _: Label, _: &str, _: u32, _: u32) -> io::Result<()> {
        Err(io::Error::other("disk full"))
    }

    fn write_comment(&mut self, _text: &str) -> io::Result<()> {
        Err(io::Error::other("disk full"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Err(io::Error::other("disk full"))
    }
}

/// Log stream writer whose every write and flush fails.
pub struct FailingWriter;

impl io::Write for FailingWriter {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "log stream closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "log stream closed"))
    }
}

/// Resolves `str` elements to `<element>:1:1` and numbered labels.
#[derive(Debug, Default)]
pub struct NameResolver {
    pub resolved: Vec<String>,
}

impl LocationResolver<str> for NameResolver {
    fn location_string(&self, element: &str) -> String {
        format!("{element}:1:1")
    }

    fn location(&mut self, element: &str) -> io::Result<Label> {
        self.resolved.push(element.to_string());
        Ok(Label(1000 + self.resolved.len() as u64))
    }
}

/// Engine capturing its log stream in memory.
pub fn engine(verbosity: i64, limit: i64) -> (DiagnosticsEngine, SharedBuffer) {
    let buffer = SharedBuffer::new();
    let config = LogConfig {
        verbosity: Verbosity(verbosity),
        diagnostic_limit: limit,
        ..LogConfig::default()
    };
    (DiagnosticsEngine::new(config, buffer.clone()), buffer)
}

/// Decode every JSON line written to `buffer`.
pub fn json_lines(buffer: &SharedBuffer) -> Vec<serde_json::Value> {
    buffer
        .lines()
        .iter()
        .map(|line| {
            serde_json::from_str(line)
                .unwrap_or_else(|err| panic!("log line is not JSON ({err}): {line}"))
        })
        .collect()
}
