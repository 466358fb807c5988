//! The core diagnostic type for the Scholia error system.
//!
//! A [`Diagnostic`] represents a single error or warning with optional
//! error code, multiple labeled source spans, and help text.

use std::fmt;

use crate::{
    error::{Severity, error_code::ErrorCode, label::Label},
    span::Span,
};

/// A rich diagnostic message with source location information.
///
/// Diagnostics provide detailed information about errors and warnings,
/// including:
/// - A severity level
/// - An optional error code for documentation and searchability
/// - A primary message describing the issue
/// - One or more labeled source spans
/// - Optional help text with suggestions
///
/// # Example
///
/// ```text
/// error[E200]: unknown relation label `elaboration`
///   --> scheme/README.md:19:3
///    |
/// 19 | | elaboration | satellite = detail; nucleus = claim | ... |
///    |   ^^^^^^^^^^^ unknown relation label
///    |
///    = help: the scheme defines: restatement, identification, effect,
///            sequence, property-ascription, title, none
/// ```
#[derive(Debug, Clone)]
pub struct Diagnostic {
    severity: Severity,
    code: Option<ErrorCode>,
    message: String,
    labels: Vec<Label>,
    help: Option<String>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    ///
    /// # Example
    ///
    /// ```
    /// # use scholia_parser::error::{Diagnostic, ErrorCode};
    /// # use scholia_parser::Span;
    ///
    /// let span = Span::new(0..11);
    /// let diag = Diagnostic::error("unknown relation label `elaboration`")
    ///     .with_code(ErrorCode::E200)
    ///     .with_label(span, "not part of the scheme")
    ///     .with_help("did you mean `property-ascription`?");
    /// ```
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Create a warning diagnostic.
    ///
    /// # Example
    ///
    /// ```
    /// # use scholia_parser::error::Diagnostic;
    /// # use scholia_parser::Span;
    ///
    /// let span = Span::new(0..10);
    /// let diag = Diagnostic::warning("table duplicates an earlier table")
    ///     .with_label(span, "duplicate copy")
    ///     .with_help("keep a single copy and link to it");
    /// ```
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    /// Get the severity of this diagnostic.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Get the error code, if any.
    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }

    /// Get the primary message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get all labels attached to this diagnostic.
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Get the help text, if any.
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Set the error code.
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Add a primary label to this diagnostic.
    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::primary(span, message));
        self
    }

    /// Add a secondary label to this diagnostic.
    pub fn with_secondary_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::secondary(span, message));
        self
    }

    /// Set the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Create a new diagnostic with the given severity and message.
    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: None,
            message: message.into(),
            labels: Vec::new(),
            help: None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Format: "error[E001]: message" or "error: message"
        write!(f, "{}", self.severity)?;
        if let Some(code) = self.code {
            write!(f, "[{}]", code)?;
        }
        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for Diagnostic {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_new() {
        let diag = Diagnostic::new(Severity::Error, "test error");

        assert!(diag.severity().is_error());
        assert!(!diag.severity().is_warning());
        assert_eq!(diag.message(), "test error");
        assert!(diag.code().is_none());
        assert!(diag.labels().is_empty());
        assert!(diag.help().is_none());
    }

    #[test]
    fn test_diagnostic_with_code() {
        let diag =
            Diagnostic::new(Severity::Error, "unknown relation").with_code(ErrorCode::E200);

        assert_eq!(diag.code(), Some(ErrorCode::E200));
    }

    #[test]
    fn test_diagnostic_with_label() {
        let diag = Diagnostic::new(Severity::Error, "test error")
            .with_label(Span::new(10..20), "error here");

        assert_eq!(diag.labels().len(), 1);
        assert!(diag.labels()[0].is_primary());
        assert_eq!(diag.labels()[0].message(), "error here");
    }

    #[test]
    fn test_diagnostic_with_secondary_label() {
        let diag = Diagnostic::new(Severity::Error, "duplicate relation entry")
            .with_label(Span::new(10..20), "listed again here")
            .with_secondary_label(Span::new(5..15), "first listed here");

        assert_eq!(diag.labels().len(), 2);
        assert!(diag.labels()[0].is_primary());
        assert!(diag.labels()[1].is_secondary());
    }

    #[test]
    fn test_diagnostic_with_help() {
        let diag = Diagnostic::new(Severity::Warning, "heading repeats earlier content")
            .with_help("keep one canonical copy of the section");

        assert_eq!(diag.help(), Some("keep one canonical copy of the section"));
    }

    #[test]
    fn test_diagnostic_display_with_code() {
        let diag = Diagnostic::new(Severity::Error, "unknown relation label `joint`")
            .with_code(ErrorCode::E200);

        assert_eq!(
            diag.to_string(),
            "error[E200]: unknown relation label `joint`"
        );
    }

    #[test]
    fn test_diagnostic_display_without_code() {
        let diag = Diagnostic::new(Severity::Warning, "near-duplicate document");

        assert_eq!(diag.to_string(), "warning: near-duplicate document");
    }

    #[test]
    fn test_diagnostic_builder_chain() {
        let diag = Diagnostic::new(Severity::Error, "relation `title` listed more than once")
            .with_code(ErrorCode::E201)
            .with_label(Span::new(100..120), "listed again here")
            .with_secondary_label(Span::new(50..70), "first listed here")
            .with_help("every relation appears exactly once per table");

        assert!(diag.severity().is_error());
        assert_eq!(diag.code(), Some(ErrorCode::E201));
        assert_eq!(diag.message(), "relation `title` listed more than once");
        assert_eq!(diag.labels().len(), 2);
        assert_eq!(
            diag.help(),
            Some("every relation appears exactly once per table")
        );
    }
}
