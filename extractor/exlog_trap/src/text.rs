//! Text TRAP output.
//!
//! ```text
//! #1=@"loc,{unknown}"
//! #2=*
//! diagnostics(#2,"Extractor",5,"","message","2024-01-01 00:00:00 message",#1)
//! diagnostic_for(#2,@"compilation",0,0)
//! // [2024-01-01 00:00:00 K] [INFO] comment text
//! ```

use std::io::{self, Write};

use exlog_diagnostic::{DiagnosticRecord, DiagnosticTrapWriter, Label};

/// Quote a string for a TRAP tuple: wrap in `"` and double any inner `"`.
pub fn quote_trap_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        if c == '"' {
            out.push('"');
        }
        out.push(c);
    }
    out.push('"');
    out
}

/// Writes TRAP tuples to `W`.
pub struct TextTrapWriter<W: Write> {
    writer: W,
    next_id: u64,
    unknown_location: Option<Label>,
}

impl<W: Write> TextTrapWriter<W> {
    pub fn new(writer: W) -> Self {
        TextTrapWriter {
            writer,
            next_id: 0,
            unknown_location: None,
        }
    }

    /// Bind a fresh label to a keyed entity (`#N=@"key"`).
    pub fn keyed_label(&mut self, key: &str) -> io::Result<Label> {
        let label = self.next_label();
        writeln!(self.writer, "{label}=@{}", quote_trap_string(key))?;
        Ok(label)
    }

    /// Flush and hand back the underlying writer.
    pub fn into_inner(mut self) -> io::Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }

    fn next_label(&mut self) -> Label {
        self.next_id += 1;
        Label(self.next_id)
    }
}

impl<W: Write> DiagnosticTrapWriter for TextTrapWriter<W> {
    fn fresh_id(&mut self) -> Label {
        self.next_label()
    }

    fn unknown_location(&mut self) -> io::Result<Label> {
        if let Some(label) = self.unknown_location {
            return Ok(label);
        }
        let label = self.keyed_label("loc,{unknown}")?;
        self.unknown_location = Some(label);
        Ok(label)
    }

    fn write_diagnostic(&mut self, record: &DiagnosticRecord<'_>) -> io::Result<()> {
        writeln!(self.writer, "{}=*", record.id)?;
        writeln!(
            self.writer,
            "diagnostics({},{},{},{},{},{},{})",
            record.id,
            quote_trap_string(record.origin),
            record.severity,
            quote_trap_string(record.category),
            quote_trap_string(record.message),
            quote_trap_string(record.full_message),
            record.location,
        )
    }

    fn write_diagnostic_for(
        &mut self,
        diag: Label,
        unit: &str,
        unit_number: u32,
        sequence: u32,
    ) -> io::Result<()> {
        writeln!(
            self.writer,
            "diagnostic_for({diag},@{},{unit_number},{sequence})",
            quote_trap_string(unit)
        )
    }

    fn write_comment(&mut self, text: &str) -> io::Result<()> {
        // A comment ends at the newline.
        let folded = text.replace(['\r', '\n'], " ");
        writeln!(self.writer, "// {folded}")
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
