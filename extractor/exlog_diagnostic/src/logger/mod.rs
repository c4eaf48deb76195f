//! Logger facades handed to extraction code.
//!
//! [`Logger`] is for work that is not tied to a source file. [`FileLogger`]
//! additionally owns the [`LoggerState`] of one file, so its diagnostics carry
//! the file's context trail and are associated with the file.
//!
//! Every call is first checked against the engine's verbosity; calls below it
//! do no work at all. Diagnostic methods are `#[track_caller]`: the caller's
//! source location is the rate-limiting origin.

use std::error::Error;
use std::fmt::Write as _;
use std::ops::{Deref, DerefMut};

use crate::{
    DiagnosticTrapWriter, DiagnosticsEngine, ExtractorContext, LocationResolver, LogLevel,
    LoggerState, Origin, Report, Result, Severity,
};

/// Render an error and its source chain, one cause per line.
pub fn error_chain(err: &dyn Error) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let _ = write!(out, "\ncaused by: {cause}");
        source = cause.source();
    }
    out
}

/// Logger for one piece of work, writing diagnostics to its trap writer.
pub struct Logger<'a> {
    engine: &'a DiagnosticsEngine,
    trap: &'a mut dyn DiagnosticTrapWriter,
}

impl<'a> Logger<'a> {
    pub fn new(engine: &'a DiagnosticsEngine, trap: &'a mut dyn DiagnosticTrapWriter) -> Self {
        Logger { engine, trap }
    }

    fn log(&mut self, level: LogLevel, msg: &str) -> Result<()> {
        if !self.engine.enabled(level) {
            return Ok(());
        }
        self.engine.log(&mut *self.trap, level, msg)
    }

    pub fn trace(&mut self, msg: &str) -> Result<()> {
        self.log(LogLevel::Trace, msg)
    }

    pub fn trace_err(&mut self, msg: &str, err: &dyn Error) -> Result<()> {
        if !self.engine.enabled(LogLevel::Trace) {
            return Ok(());
        }
        self.log(LogLevel::Trace, &format!("{msg}\n{}", error_chain(err)))
    }

    pub fn debug(&mut self, msg: &str) -> Result<()> {
        self.log(LogLevel::Debug, msg)
    }

    pub fn info(&mut self, msg: &str) -> Result<()> {
        self.log(LogLevel::Info, msg)
    }

    #[track_caller]
    pub fn warn(&mut self, msg: &str) -> Result<()> {
        self.emit(Severity::Warn, msg, None, None, Origin::caller())
    }

    #[track_caller]
    pub fn warn_err(&mut self, msg: &str, err: &dyn Error) -> Result<()> {
        let origin = Origin::caller();
        self.emit_err(Severity::Warn, msg, err, None, origin)
    }

    #[track_caller]
    pub fn error(&mut self, msg: &str) -> Result<()> {
        self.emit(Severity::Error, msg, None, None, Origin::caller())
    }

    #[track_caller]
    pub fn error_err(&mut self, msg: &str, err: &dyn Error) -> Result<()> {
        let origin = Origin::caller();
        self.emit_err(Severity::Error, msg, err, None, origin)
    }

    /// Emit a diagnostic with an explicit severity. Warn-class severities are
    /// gated like [`warn`](Self::warn), error-class ones like
    /// [`error`](Self::error).
    #[track_caller]
    pub fn report(&mut self, severity: Severity, msg: &str, extra_info: Option<&str>) -> Result<()> {
        self.emit(severity, msg, extra_info, None, Origin::caller())
    }

    fn emit_err(
        &mut self,
        severity: Severity,
        msg: &str,
        err: &dyn Error,
        state: Option<&mut LoggerState>,
        origin: Origin,
    ) -> Result<()> {
        if !self.engine.enabled(severity.level()) {
            return Ok(());
        }
        let chain = error_chain(err);
        self.emit(severity, msg, Some(&chain), state, origin)
    }

    fn emit(
        &mut self,
        severity: Severity,
        msg: &str,
        extra_info: Option<&str>,
        state: Option<&mut LoggerState>,
        origin: Origin,
    ) -> Result<()> {
        if !self.engine.enabled(severity.level()) {
            return Ok(());
        }
        let report = Report::new(severity, msg, Some(origin)).with_extra_info(extra_info);
        self.engine
            .diagnostic(&mut *self.trap, &report, state, |trap| trap.unknown_location())
    }

    /// Flush the trap writer, then the log stream.
    pub fn flush(&mut self) -> Result<()> {
        self.trap.flush().map_err(crate::LogError::Trap)?;
        self.engine.flush()
    }
}

/// Logger for one source file.
pub struct FileLogger<'a> {
    logger: Logger<'a>,
    state: LoggerState,
}

impl<'a> FileLogger<'a> {
    pub fn new(
        engine: &'a DiagnosticsEngine,
        trap: &'a mut dyn DiagnosticTrapWriter,
        file_number: u32,
    ) -> Self {
        FileLogger {
            logger: Logger::new(engine, trap),
            state: LoggerState::new(file_number),
        }
    }

    pub fn state(&self) -> &LoggerState {
        &self.state
    }

    /// Push `frame` for as long as the returned scope lives.
    pub fn enter(&mut self, frame: ExtractorContext) -> ContextScope<'_, 'a> {
        let span = tracing::debug_span!("extract", kind = %frame.kind, name = %frame.name);
        self.state.context.push(frame);
        ContextScope {
            logger: self,
            _span: span.entered(),
        }
    }

    pub fn trace(&mut self, msg: &str) -> Result<()> {
        self.logger.trace(msg)
    }

    pub fn trace_err(&mut self, msg: &str, err: &dyn Error) -> Result<()> {
        self.logger.trace_err(msg, err)
    }

    pub fn debug(&mut self, msg: &str) -> Result<()> {
        self.logger.debug(msg)
    }

    pub fn info(&mut self, msg: &str) -> Result<()> {
        self.logger.info(msg)
    }

    #[track_caller]
    pub fn warn(&mut self, msg: &str) -> Result<()> {
        self.logger
            .emit(Severity::Warn, msg, None, Some(&mut self.state), Origin::caller())
    }

    #[track_caller]
    pub fn warn_err(&mut self, msg: &str, err: &dyn Error) -> Result<()> {
        let origin = Origin::caller();
        self.logger
            .emit_err(Severity::Warn, msg, err, Some(&mut self.state), origin)
    }

    #[track_caller]
    pub fn error(&mut self, msg: &str) -> Result<()> {
        self.logger
            .emit(Severity::Error, msg, None, Some(&mut self.state), Origin::caller())
    }

    #[track_caller]
    pub fn error_err(&mut self, msg: &str, err: &dyn Error) -> Result<()> {
        let origin = Origin::caller();
        self.logger
            .emit_err(Severity::Error, msg, err, Some(&mut self.state), origin)
    }

    #[track_caller]
    pub fn report(&mut self, severity: Severity, msg: &str, extra_info: Option<&str>) -> Result<()> {
        let origin = Origin::caller();
        self.logger
            .emit(severity, msg, extra_info, Some(&mut self.state), origin)
    }

    /// Warn about `element`, located through `resolver`.
    #[track_caller]
    pub fn warn_element<E, R>(&mut self, msg: &str, element: &E, resolver: &mut R) -> Result<()>
    where
        E: ?Sized,
        R: LocationResolver<E>,
    {
        let origin = Origin::caller();
        self.element_diagnostic(Severity::Warn, msg, element, resolver, origin)
    }

    /// Report an error about `element`, located through `resolver`.
    #[track_caller]
    pub fn error_element<E, R>(&mut self, msg: &str, element: &E, resolver: &mut R) -> Result<()>
    where
        E: ?Sized,
        R: LocationResolver<E>,
    {
        let origin = Origin::caller();
        self.element_diagnostic(Severity::Error, msg, element, resolver, origin)
    }

    fn element_diagnostic<E, R>(
        &mut self,
        severity: Severity,
        msg: &str,
        element: &E,
        resolver: &mut R,
        origin: Origin,
    ) -> Result<()>
    where
        E: ?Sized,
        R: LocationResolver<E>,
    {
        let engine = self.logger.engine;
        if !engine.enabled(severity.level()) {
            return Ok(());
        }
        let location_string = resolver.location_string(element);
        let report = Report::new(severity, msg, Some(origin))
            .with_location_string(Some(&location_string));
        engine.diagnostic(
            &mut *self.logger.trap,
            &report,
            Some(&mut self.state),
            |_| resolver.location(element),
        )
    }

    pub fn flush(&mut self) -> Result<()> {
        self.logger.flush()
    }
}

/// An open extraction frame. Derefs to the [`FileLogger`] and pops the frame
/// when dropped, including on early return and unwinding.
pub struct ContextScope<'s, 'a> {
    logger: &'s mut FileLogger<'a>,
    _span: tracing::span::EnteredSpan,
}

impl<'a> Deref for ContextScope<'_, 'a> {
    type Target = FileLogger<'a>;

    fn deref(&self) -> &Self::Target {
        &*self.logger
    }
}

impl DerefMut for ContextScope<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.logger
    }
}

impl Drop for ContextScope<'_, '_> {
    fn drop(&mut self) {
        self.logger.state.context.pop();
    }
}
