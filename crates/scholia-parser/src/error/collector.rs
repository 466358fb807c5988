//! Collector for accumulating diagnostics during a scanning phase.
//!
//! The [`DiagnosticCollector`] allows the scanner to report multiple errors
//! instead of failing on the first error encountered.

use crate::error::{Diagnostic, ParseError};

/// A collector for accumulating diagnostics during a scanning phase.
///
/// # Example
///
/// ```text
/// # use scholia_parser::error::{Diagnostic, ErrorCode};
/// # use scholia_parser::Span;
///
/// let mut collector = DiagnosticCollector::new();
///
/// let span1 = Span::new(0..10);
/// let span2 = Span::new(20..30);
///
/// // Emit multiple errors
/// collector.emit(
///     Diagnostic::error("unterminated table row")
///         .with_code(ErrorCode::E001)
///         .with_label(span1, "row opened here")
/// );
///
/// collector.emit(
///     Diagnostic::error("empty heading")
///         .with_code(ErrorCode::E003)
///         .with_label(span2, "no heading text")
/// );
///
/// // Finish and convert to Result
/// let result = collector.finish();
/// ```
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
    has_errors: bool,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a diagnostic to this collector.
    ///
    /// The diagnostic is added to the collection and if it's an error,
    /// the collector is marked as having errors.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        if diagnostic.severity().is_error() {
            self.has_errors = true;
        }
        self.diagnostics.push(diagnostic);
    }

    /// Finish collection and return a result.
    ///
    /// - If there are errors, returns `Err(ParseError)` with all diagnostics.
    /// - If there are no errors, returns `Ok(())`.
    ///
    /// Note: Warnings are currently discarded in the success case.
    pub fn finish(self) -> Result<(), ParseError> {
        if self.has_errors {
            Err(ParseError::new(self.diagnostics))
        } else {
            Ok(())
        }
    }
}
