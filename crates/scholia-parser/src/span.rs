//! Byte-offset spans into scanned source text.
//!
//! Spans locate headings, table cells, and diagnostics within a scheme
//! document. Offsets are byte positions into the original source string.

use std::fmt;

/// A half-open byte range `start..end` into source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    start: usize,
    end: usize,
}

impl Span {
    /// Create a new span from a byte range.
    pub fn new(range: std::ops::Range<usize>) -> Self {
        Self {
            start: range.start,
            end: range.end,
        }
    }

    /// Get the start offset of the span.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Get the end offset of the span.
    pub fn end(&self) -> usize {
        self.end
    }

    /// Get the length of the span.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if the span is empty.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Create a union of two spans (encompassing both).
    pub fn union(&self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

impl Default for Span {
    fn default() -> Self {
        Self::new(0..0)
    }
}

/// A generic wrapper pairing a value with its source span.
///
/// `Spanned<T>` lets the checker point diagnostics at the exact source
/// text a heading or table cell was scanned from.
#[derive(Debug, Clone, Default)]
pub struct Spanned<T> {
    value: T,
    span: Span,
}

impl<T> Spanned<T> {
    /// Create a new spanned value from a value and its span.
    pub fn new(value: T, span: Span) -> Self {
        Self { value, span }
    }

    pub fn span(&self) -> Span {
        self.span
    }

    /// Get a reference to the underlying value.
    pub fn inner(&self) -> &T {
        &self.value
    }

    /// Consume the wrapper and return just the inner value.
    pub fn into_inner(self) -> T {
        self.value
    }

    /// Transform the value while keeping the same span.
    pub fn map<F, U>(&self, f: F) -> Spanned<U>
    where
        F: FnOnce(&T) -> U,
    {
        Spanned {
            value: f(&self.value),
            span: self.span,
        }
    }
}

impl<T> std::ops::Deref for Spanned<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.value
    }
}

impl<T: fmt::Display> fmt::Display for Spanned<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.value.fmt(f)
    }
}

// PartialEq compares only the inner values, ignoring span information
impl<T: PartialEq> PartialEq for Spanned<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value.eq(&other.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_basic_functionality() {
        let span = Span::new(5..10);
        assert_eq!(span.start(), 5);
        assert_eq!(span.end(), 10);
        assert_eq!(span.len(), 5);
        assert!(!span.is_empty());
    }

    #[test]
    fn test_span_empty() {
        let span = Span::new(5..5);
        assert_eq!(span.len(), 0);
        assert!(span.is_empty());
    }

    #[test]
    fn test_span_union() {
        let span1 = Span::new(5..10);
        let span2 = Span::new(15..20);
        let union = span1.union(span2);
        assert_eq!(union.start(), 5);
        assert_eq!(union.end(), 20);
    }

    #[test]
    fn test_span_union_overlapping() {
        let span1 = Span::new(5..12);
        let span2 = Span::new(8..10);
        let union = span1.union(span2);
        assert_eq!(union.start(), 5);
        assert_eq!(union.end(), 12);
    }

    #[test]
    fn test_spanned_accessors() {
        let spanned = Spanned::new("effect", Span::new(5..11));
        assert_eq!(*spanned.inner(), "effect");
        assert_eq!(spanned.span().start(), 5);
        assert_eq!(spanned.span().len(), 6);
    }

    #[test]
    fn test_spanned_map_keeps_span() {
        let spanned = Spanned::new("Title", Span::new(2..7));
        let mapped = spanned.map(|s| s.to_lowercase());
        assert_eq!(mapped.inner(), "title");
        assert_eq!(mapped.span(), spanned.span());
    }

    #[test]
    fn test_spanned_eq_ignores_span() {
        let a = Spanned::new("none", Span::new(0..4));
        let b = Spanned::new("none", Span::new(40..44));
        assert_eq!(a, b);
    }
}
