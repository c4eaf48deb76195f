//! Extraction context tracking for a single unit of work.

/// One frame of "currently extracting X".
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ExtractorContext {
    /// What kind of element is being extracted, e.g. `function`.
    pub kind: String,
    /// Display name of the element.
    pub name: String,
    /// Human-readable location of the element.
    pub loc: String,
}

impl ExtractorContext {
    pub fn new(kind: impl Into<String>, name: impl Into<String>, loc: impl Into<String>) -> Self {
        ExtractorContext {
            kind: kind.into(),
            name: name.into(),
            loc: loc.into(),
        }
    }

    /// The trail line describing this frame.
    pub fn trail_line(&self) -> String {
        format!(
            "  ...while extracting a {} ({}) at {}",
            self.kind, self.name, self.loc
        )
    }
}

/// Stack of the extraction frames currently open.
///
/// Every [`push`](Self::push) must be paired with a [`pop`](Self::pop) on all
/// exit paths; `FileLogger::enter` does this with a drop guard.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct ContextStack {
    frames: Vec<ExtractorContext>,
}

impl ContextStack {
    pub fn new() -> Self {
        ContextStack { frames: Vec::new() }
    }

    pub fn push(&mut self, frame: ExtractorContext) {
        self.frames.push(frame);
    }

    pub fn pop(&mut self) -> Option<ExtractorContext> {
        self.frames.pop()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Innermost frame, if any.
    pub fn top(&self) -> Option<&ExtractorContext> {
        self.frames.last()
    }

    /// Trail lines, most recently pushed frame first.
    pub fn render_trail(&self) -> Vec<String> {
        self.frames
            .iter()
            .rev()
            .map(ExtractorContext::trail_line)
            .collect()
    }
}

/// Per-unit logging state: the context stack, the unit's file number and the
/// number of diagnostics already associated with that unit.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct LoggerState {
    pub context: ContextStack,
    pub file_number: u32,
    diagnostic_count: u32,
}

impl LoggerState {
    pub fn new(file_number: u32) -> Self {
        LoggerState {
            context: ContextStack::new(),
            file_number,
            diagnostic_count: 0,
        }
    }

    /// Diagnostics associated with this unit so far.
    pub fn diagnostic_count(&self) -> u32 {
        self.diagnostic_count
    }

    /// Return the current sequence number and advance it.
    pub(crate) fn next_sequence(&mut self) -> u32 {
        let seq = self.diagnostic_count;
        self.diagnostic_count += 1;
        seq
    }
}
