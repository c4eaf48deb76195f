//! Trap writers for extractor diagnostics.
//!
//! - [`TextTrapWriter`]: writes TRAP tuples as text to any `io::Write`
//! - [`RecordingTrapWriter`]: keeps records in memory, for tests and dry runs
//!
//! Both implement [`DiagnosticTrapWriter`](exlog_diagnostic::DiagnosticTrapWriter).

mod recording;
mod text;

pub use recording::{RecordingTrapWriter, TrapRecord};
pub use text::{quote_trap_string, TextTrapWriter};
