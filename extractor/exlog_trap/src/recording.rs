//! In-memory trap writer.

use std::io;

use exlog_diagnostic::{DiagnosticRecord, DiagnosticTrapWriter, Label};

/// One record written to a [`RecordingTrapWriter`].
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum TrapRecord {
    UnknownLocation(Label),
    Diagnostic {
        id: Label,
        origin: String,
        severity: u8,
        category: String,
        message: String,
        full_message: String,
        location: Label,
    },
    DiagnosticFor {
        diag: Label,
        unit: String,
        unit_number: u32,
        sequence: u32,
    },
    Comment(String),
}

/// Keeps every record in order of writing.
#[derive(Clone, Debug, Default)]
pub struct RecordingTrapWriter {
    records: Vec<TrapRecord>,
    next_id: u64,
    unknown_location: Option<Label>,
    flushes: usize,
}

impl RecordingTrapWriter {
    pub fn new() -> Self {
        RecordingTrapWriter::default()
    }

    pub fn records(&self) -> &[TrapRecord] {
        &self.records
    }

    /// Only the diagnostic records.
    pub fn diagnostics(&self) -> impl Iterator<Item = &TrapRecord> {
        self.records
            .iter()
            .filter(|r| matches!(r, TrapRecord::Diagnostic { .. }))
    }

    /// Only the comment texts.
    pub fn comments(&self) -> impl Iterator<Item = &str> {
        self.records.iter().filter_map(|r| match r {
            TrapRecord::Comment(text) => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn flushes(&self) -> usize {
        self.flushes
    }
}

impl DiagnosticTrapWriter for RecordingTrapWriter {
    fn fresh_id(&mut self) -> Label {
        self.next_id += 1;
        Label(self.next_id)
    }

    fn unknown_location(&mut self) -> io::Result<Label> {
        if let Some(label) = self.unknown_location {
            return Ok(label);
        }
        let label = self.fresh_id();
        self.unknown_location = Some(label);
        self.records.push(TrapRecord::UnknownLocation(label));
        Ok(label)
    }

    fn write_diagnostic(&mut self, record: &DiagnosticRecord<'_>) -> io::Result<()> {
        self.records.push(TrapRecord::Diagnostic {
            id: record.id,
            origin: record.origin.to_owned(),
            severity: record.severity,
            category: record.category.to_owned(),
            message: record.message.to_owned(),
            full_message: record.full_message.to_owned(),
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
        self.records.push(TrapRecord::DiagnosticFor {
            diag,
            unit: unit.to_owned(),
            unit_number,
            sequence,
        });
        Ok(())
    }

    fn write_comment(&mut self, text: &str) -> io::Result<()> {
        self.records.push(TrapRecord::Comment(text.to_owned()));
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flushes += 1;
        tracing::trace!(records = self.records.len(), "recording trap flushed");
        Ok(())
    }
}
