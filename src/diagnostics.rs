//! Diagnostic sinks
//!
//! Components never print directly. Failures that are swallowed at a
//! component boundary (fetch errors, bad heading hints, missing containers)
//! are reported to a `DiagnosticSink` so tests can assert on them and hosts
//! can route them wherever they like. `LogSink` forwards to the `log` facade.

use std::fmt;
use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DiagnosticLevel {
    Info,
    Warn,
    Error,
}

/// A single reported event
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    /// Component that produced the event, e.g. "fetch" or "render"
    pub scope: &'static str,
    pub message: String,
}

impl Diagnostic {
    pub fn new(level: DiagnosticLevel, scope: &'static str, message: impl Into<String>) -> Self {
        Self {
            level,
            scope,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {:?}: {}", self.scope, self.level, self.message)
    }
}

pub trait DiagnosticSink: Send + Sync {
    fn report(&self, diagnostic: Diagnostic);

    fn info(&self, scope: &'static str, message: &str) {
        self.report(Diagnostic::new(DiagnosticLevel::Info, scope, message));
    }

    fn warn(&self, scope: &'static str, message: &str) {
        self.report(Diagnostic::new(DiagnosticLevel::Warn, scope, message));
    }

    fn error(&self, scope: &'static str, message: &str) {
        self.report(Diagnostic::new(DiagnosticLevel::Error, scope, message));
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &S {
    fn report(&self, diagnostic: Diagnostic) {
        (**self).report(diagnostic)
    }
}

/// Forwards diagnostics to the `log` crate, using the scope as log target.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report(&self, d: Diagnostic) {
        match d.level {
            DiagnosticLevel::Info => log::info!(target: d.scope, "{}", d.message),
            DiagnosticLevel::Warn => log::warn!(target: d.scope, "{}", d.message),
            DiagnosticLevel::Error => log::error!(target: d.scope, "{}", d.message),
        }
    }
}

/// Keeps every diagnostic in memory
#[derive(Debug, Default)]
pub struct RecordingSink {
    entries: Mutex<Vec<Diagnostic>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<Diagnostic> {
        self.entries.lock().map(|g| g.clone()).unwrap_or_default()
    }

    pub fn count_at(&self, level: DiagnosticLevel) -> usize {
        self.entries().iter().filter(|d| d.level == level).count()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}

impl DiagnosticSink for RecordingSink {
    fn report(&self, diagnostic: Diagnostic) {
        if let Ok(mut g) = self.entries.lock() {
            g.push(diagnostic);
        }
    }
}
