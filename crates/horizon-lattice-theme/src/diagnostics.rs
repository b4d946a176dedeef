//! Diagnostics reported while loading themes.
//!
//! The loader never panics or returns raw parser errors from its `load_*`
//! entry points. Every problem is handed to a [`DiagnosticSink`] instead,
//! which by default forwards it to `tracing`.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::Error;
use crate::logging::targets;

/// How bad a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Loading continued with a fallback.
    Warning,
    /// Loading failed.
    Error,
}

/// What went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// The stylesheet is not syntactically valid.
    Syntax,
    /// No `Theme` block.
    MissingThemeSelector,
    /// `Theme` block without `Name`.
    MissingThemeName,
    /// `UnitSize` could not be parsed.
    InvalidUnitSize,
    /// The theme file could not be read.
    Io,
}

/// A single problem found while loading a theme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Severity.
    pub severity: Severity,
    /// Category.
    pub kind: DiagnosticKind,
    /// Label of the stylesheet, usually its file name.
    pub source: String,
    /// Human-readable description.
    pub message: String,
}

impl Diagnostic {
    /// Build a diagnostic from a loader error.
    pub fn from_error(source: impl Into<String>, error: &Error) -> Self {
        let kind = match error {
            Error::Parse { .. } => DiagnosticKind::Syntax,
            Error::MissingThemeSelector => DiagnosticKind::MissingThemeSelector,
            Error::MissingThemeName => DiagnosticKind::MissingThemeName,
            Error::InvalidUnitSize { .. } => DiagnosticKind::InvalidUnitSize,
            Error::Io { .. } => DiagnosticKind::Io,
        };
        let severity = if error.is_recoverable() {
            Severity::Warning
        } else {
            Severity::Error
        };

        Self {
            severity,
            kind,
            source: source.into(),
            message: error.to_string(),
        }
    }

    /// Render the diagnostic as a log line, e.g.
    /// `[Lattice] dark.css: Error parsing theme CSS. Missing Theme Name.`
    pub fn display_with_tag<'a>(&'a self, tag: &'a str) -> impl fmt::Display + 'a {
        TaggedDiagnostic { tag, diagnostic: self }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: Error parsing theme CSS. {}", self.source, self.message)
    }
}

struct TaggedDiagnostic<'a> {
    tag: &'a str,
    diagnostic: &'a Diagnostic,
}

impl fmt::Display for TaggedDiagnostic<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.tag, self.diagnostic)
    }
}

/// Receiver for loader diagnostics.
pub trait DiagnosticSink {
    /// Handle one diagnostic. `tag` is the configured log tag.
    fn report(&self, tag: &str, diagnostic: &Diagnostic);
}

impl<T: DiagnosticSink + ?Sized> DiagnosticSink for &T {
    fn report(&self, tag: &str, diagnostic: &Diagnostic) {
        (**self).report(tag, diagnostic);
    }
}

impl<T: DiagnosticSink + ?Sized> DiagnosticSink for Arc<T> {
    fn report(&self, tag: &str, diagnostic: &Diagnostic) {
        (**self).report(tag, diagnostic);
    }
}

/// Forwards diagnostics to `tracing`.
///
/// Errors are logged with `error!`, recoverable problems with `warn!`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl DiagnosticSink for TracingDiagnostics {
    fn report(&self, tag: &str, diagnostic: &Diagnostic) {
        match diagnostic.severity {
            Severity::Error => tracing::error!(
                target: targets::LOADER,
                kind = ?diagnostic.kind,
                source = %diagnostic.source,
                "{}",
                diagnostic.display_with_tag(tag)
            ),
            Severity::Warning => tracing::warn!(
                target: targets::LOADER,
                kind = ?diagnostic.kind,
                source = %diagnostic.source,
                "{}",
                diagnostic.display_with_tag(tag)
            ),
        }
    }
}

/// Keeps every diagnostic in memory.
///
/// Useful in tests and in tools that show problems to the user.
#[derive(Debug, Default)]
pub struct CollectingDiagnostics {
    diagnostics: Mutex<Vec<Diagnostic>>,
}

impl CollectingDiagnostics {
    /// Create an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the collected diagnostics.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.lock().clone()
    }

    /// Remove and return the collected diagnostics.
    pub fn take(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.diagnostics.lock())
    }

    /// Collected diagnostic kinds, in report order.
    pub fn kinds(&self) -> Vec<DiagnosticKind> {
        self.diagnostics.lock().iter().map(|d| d.kind).collect()
    }

    /// Number of collected diagnostics.
    pub fn len(&self) -> usize {
        self.diagnostics.lock().len()
    }

    /// Whether nothing was reported.
    pub fn is_empty(&self) -> bool {
        self.diagnostics.lock().is_empty()
    }
}

impl DiagnosticSink for CollectingDiagnostics {
    fn report(&self, _tag: &str, diagnostic: &Diagnostic) {
        self.diagnostics.lock().push(diagnostic.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnostic_from_errors() {
        let missing = Diagnostic::from_error("dark.css", &Error::MissingThemeName);
        assert_eq!(missing.kind, DiagnosticKind::MissingThemeName);
        assert_eq!(missing.severity, Severity::Error);

        let unit = Diagnostic::from_error("dark.css", &Error::invalid_unit_size("bogus"));
        assert_eq!(unit.kind, DiagnosticKind::InvalidUnitSize);
        assert_eq!(unit.severity, Severity::Warning);

        let syntax = Diagnostic::from_error("dark.css", &Error::parse("Empty selector", 2, 4));
        assert_eq!(syntax.kind, DiagnosticKind::Syntax);
    }

    #[test]
    fn tagged_message_format() {
        let diagnostic = Diagnostic::from_error("dark.css", &Error::MissingThemeSelector);

        assert_eq!(
            diagnostic.display_with_tag("Lattice").to_string(),
            "[Lattice] dark.css: Error parsing theme CSS. Missing Theme selector."
        );
    }

    #[test]
    fn collector_records_in_order() {
        let sink = CollectingDiagnostics::new();
        assert!(sink.is_empty());

        sink.report("T", &Diagnostic::from_error("a", &Error::MissingThemeSelector));
        (&sink).report("T", &Diagnostic::from_error("b", &Error::MissingThemeName));

        assert_eq!(
            sink.kinds(),
            vec![DiagnosticKind::MissingThemeSelector, DiagnosticKind::MissingThemeName]
        );
        assert_eq!(sink.take().len(), 2);
        assert!(sink.is_empty());
    }

    #[test]
    fn shared_collector_through_arc() {
        let sink = Arc::new(CollectingDiagnostics::new());
        let shared: Arc<dyn DiagnosticSink + Send + Sync> = sink.clone();

        shared.report("T", &Diagnostic::from_error("a", &Error::MissingThemeName));
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn tracing_sink_does_not_panic_without_subscriber() {
        let fatal = Diagnostic::from_error("a", &Error::MissingThemeName);
        let recoverable = Diagnostic::from_error("a", &Error::invalid_unit_size("x"));

        TracingDiagnostics.report("T", &fatal);
        TracingDiagnostics.report("T", &recoverable);
    }
}
