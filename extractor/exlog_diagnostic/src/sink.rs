//! The contracts this crate consumes: a writer for structured trap records and
//! a resolver that turns program elements into locations.

use std::fmt;
use std::io;

/// Opaque identifier of a trap entity.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct Label(pub u64);

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Unit label used when associating a diagnostic with a compilation unit.
pub const COMPILATION_UNIT: &str = "compilation";

/// One diagnostic row as handed to the trap writer.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct DiagnosticRecord<'a> {
    pub id: Label,
    pub origin: &'a str,
    pub severity: u8,
    /// Always empty; kept for the diagnostics table layout.
    pub category: &'a str,
    pub message: &'a str,
    /// Timestamped full message body.
    pub full_message: &'a str,
    pub location: Label,
}

/// Writer of structured diagnostic, association and comment records.
///
/// Each unit of work owns its writer, so implementations need no locking.
pub trait DiagnosticTrapWriter {
    /// Allocate a fresh entity identifier.
    fn fresh_id(&mut self) -> Label;

    /// The shared "unknown location" entity, created on first use.
    fn unknown_location(&mut self) -> io::Result<Label>;

    fn write_diagnostic(&mut self, record: &DiagnosticRecord<'_>) -> io::Result<()>;

    /// Associate diagnostic `diag` with a unit as its `sequence`th diagnostic.
    fn write_diagnostic_for(
        &mut self,
        diag: Label,
        unit: &str,
        unit_number: u32,
        sequence: u32,
    ) -> io::Result<()>;

    fn write_comment(&mut self, text: &str) -> io::Result<()>;

    fn flush(&mut self) -> io::Result<()>;
}

/// Resolves program elements of type `E` to locations.
pub trait LocationResolver<E: ?Sized> {
    /// Human-readable location, e.g. `Main.kt:3:5`.
    fn location_string(&self, element: &E) -> String;

    /// Trap location entity for `element`. Only called for diagnostics that
    /// are actually emitted.
    fn location(&mut self, element: &E) -> io::Result<Label>;
}
