//! Scanner for annotation scheme documents.
//!
//! Scheme documents are the markdown README files that define the annotation
//! taxonomy: the relation inventory lives in pipe-delimited tables, grouped
//! under headings, with explanatory prose in between. The scanner extracts
//! exactly the structure the consistency checks need (headings and tables,
//! with byte spans back into the source) and skips prose.
//!
//! The public entry point is [`SchemeDoc::parse`], which performs
//! error-recovering scanning and collects all diagnostics in a single pass.
//!
//! # Example
//!
//! ```
//! # use scholia_parser::scheme::SchemeDoc;
//! let source = "## Relations\n\n| Relation | Roles assigned |\n| --- | --- |\n| title | satellite = title; nucleus = titled diagram/part |\n";
//!
//! let doc = SchemeDoc::parse(source).unwrap();
//! assert_eq!(doc.headings().len(), 1);
//! assert_eq!(doc.tables().len(), 1);
//!
//! let table = &doc.tables()[0];
//! assert_eq!(table.columns()[0].inner(), "Relation");
//! assert_eq!(table.rows()[0].cells()[0].inner(), "title");
//! ```

use log::trace;
use winnow::{
    Parser as _,
    combinator::{alt, eof, opt, peek},
    error::{AddContext, ContextError, ErrMode, ModalResult},
    stream::{LocatingSlice, Location, Stream},
    token::{one_of, take_while},
};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    span::{Span, Spanned},
};

/// Rich diagnostic information for scanner errors.
///
/// Attached to winnow errors via `.context()` or [`AddContext`] to provide
/// detailed error messages with codes, help text, and precise span
/// information.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ScanDiagnostic {
    pub code: ErrorCode,
    pub message: &'static str,
    pub help: Option<&'static str>,
    /// The error span covers from `start` to the error position.
    pub start: usize,
}

type Input<'a> = LocatingSlice<&'a str>;
type ScanResult<O> = ModalResult<O, ContextError<ScanDiagnostic>>;

/// A section heading in a scheme document.
#[derive(Debug, Clone, PartialEq)]
pub struct Heading {
    level: u8,
    text: Spanned<String>,
}

impl Heading {
    /// Heading depth, 1 for `#` through 6 for `######`.
    pub fn level(&self) -> u8 {
        self.level
    }

    /// The heading text with surrounding whitespace removed.
    pub fn text(&self) -> &str {
        self.text.inner()
    }

    /// Span of the heading text in the source.
    pub fn span(&self) -> Span {
        self.text.span()
    }
}

/// A single body row of a [`Table`].
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    span: Span,
    cells: Vec<Spanned<String>>,
}

impl TableRow {
    /// Span of the whole row in the source, without the trailing newline.
    pub fn span(&self) -> Span {
        self.span
    }

    /// The trimmed cell texts, left to right.
    pub fn cells(&self) -> &[Spanned<String>] {
        &self.cells
    }

    /// The cell at `index`, if the row is wide enough.
    pub fn cell(&self, index: usize) -> Option<&Spanned<String>> {
        self.cells.get(index)
    }
}

/// A pipe-delimited table: a header row, a delimiter row, and body rows.
///
/// The delimiter row is structural and not retained; `columns` holds the
/// header cells and `rows` the body.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    span: Span,
    columns: Vec<Spanned<String>>,
    rows: Vec<TableRow>,
}

impl Table {
    /// Span covering the table from header to last row.
    pub fn span(&self) -> Span {
        self.span
    }

    /// The trimmed header cells, left to right.
    pub fn columns(&self) -> &[Spanned<String>] {
        &self.columns
    }

    /// The body rows in source order.
    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    /// Number of columns the header declares.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Finds the first column whose header contains `needle`,
    /// case-insensitively.
    pub fn column_index(&self, needle: &str) -> Option<usize> {
        let needle = needle.to_lowercase();
        self.columns
            .iter()
            .position(|column| column.to_lowercase().contains(&needle))
    }

    /// Span covering the header cells.
    pub fn header_span(&self) -> Span {
        match (self.columns.first(), self.columns.last()) {
            (Some(first), Some(last)) => first.span().union(last.span()),
            _ => self.span,
        }
    }
}

/// A scanned scheme document: its headings and tables, in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemeDoc {
    source_len: usize,
    headings: Vec<Heading>,
    tables: Vec<Table>,
}

impl SchemeDoc {
    /// Scan a scheme document, collecting multiple errors.
    ///
    /// Attempts to recover from errors and continue scanning, collecting
    /// all errors encountered. This provides better user experience by
    /// reporting multiple issues in a single pass.
    ///
    /// # Returns
    ///
    /// - `Ok(doc)` - The document scanned cleanly
    /// - `Err(ParseError)` - One or more errors occurred; contains all
    ///   diagnostics
    pub fn parse(source: &str) -> Result<Self, ParseError> {
        let input = LocatingSlice::new(source);
        let mut scanner = Scanner::new();
        scanner.scan(input);
        let (headings, tables) = scanner.finish()?;

        trace!(headings = headings.len(), tables = tables.len(); "Scanned scheme document");

        Ok(Self {
            source_len: source.len(),
            headings,
            tables,
        })
    }

    /// The headings in source order.
    pub fn headings(&self) -> &[Heading] {
        &self.headings
    }

    /// The tables in source order.
    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    /// Span covering the whole source document.
    pub fn span(&self) -> Span {
        Span::new(0..self.source_len)
    }

    /// Whether the document contains no headings and no tables.
    pub fn is_empty(&self) -> bool {
        self.headings.is_empty() && self.tables.is_empty()
    }
}

/// One scanned source line.
#[derive(Debug, Clone, PartialEq)]
enum Line {
    Blank,
    Prose,
    Heading(Heading),
    Row(TableRow),
}

fn is_inline_space(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// Trim a raw cell and compute the span of the retained text.
fn trimmed_cell(raw: &str, cell_start: usize) -> Spanned<String> {
    let trimmed = raw.trim();
    let offset = cell_start + (raw.len() - raw.trim_start().len());
    Spanned::new(
        trimmed.to_string(),
        Span::new(offset..offset + trimmed.len()),
    )
}

/// Parse a heading line: `#` marks, a word boundary, then the heading text.
///
/// Backtracks when the `#` run is not followed by a boundary, so `#tag`
/// and seven-deep `#######` lines fall through to prose. An empty heading
/// commits to E003.
fn heading(input: &mut Input<'_>) -> ScanResult<Line> {
    let start = input.current_token_start();

    let marks = take_while(1..=6, '#').parse_next(input)?;
    peek(alt((one_of([' ', '\t', '\n']).void(), eof.void()))).parse_next(input)?;
    let level = marks.len() as u8;

    take_while(0.., is_inline_space).void().parse_next(input)?;
    let text_start = input.current_token_start();
    let text = take_while(0.., |c: char| c != '\n').parse_next(input)?;

    let trimmed = text.trim_end();
    if trimmed.is_empty() {
        return Err(ErrMode::Cut(ContextError::new().add_context(
            input,
            &input.checkpoint(),
            ScanDiagnostic {
                code: ErrorCode::E003,
                message: "empty heading",
                help: Some("write the heading text after the `#` marks"),
                start,
            },
        )));
    }
    opt('\n').void().parse_next(input)?;

    let span = Span::new(text_start..text_start + trimmed.len());
    Ok(Line::Heading(Heading {
        level,
        text: Spanned::new(trimmed.to_string(), span),
    }))
}

/// Parse a table row line: a leading `|`, then `|`-separated cells.
///
/// Commits once the leading pipe matched; a row that reaches the end of
/// the line with unclosed cell text is E001.
fn table_row(input: &mut Input<'_>) -> ScanResult<Line> {
    let row_start = input.current_token_start();

    take_while(0.., is_inline_space).void().parse_next(input)?;
    '|'.void().parse_next(input)?;

    let mut cells = Vec::new();
    let mut row_end = input.current_token_start();
    loop {
        let cell_start = input.current_token_start();
        let raw = take_while(0.., |c: char| c != '|' && c != '\n').parse_next(input)?;

        match opt('|').parse_next(input)? {
            Some(_) => {
                cells.push(trimmed_cell(raw, cell_start));
                row_end = input.current_token_start();
            }
            None => {
                // End of line. Trailing whitespace after the final pipe is
                // fine; pending cell text means the closing pipe is missing.
                if !raw.trim().is_empty() || cells.is_empty() {
                    return Err(ErrMode::Cut(ContextError::new().add_context(
                        input,
                        &input.checkpoint(),
                        ScanDiagnostic {
                            code: ErrorCode::E001,
                            message: "unterminated table row",
                            help: Some("close the row with a final `|`"),
                            start: row_start,
                        },
                    )));
                }
                break;
            }
        }
    }
    opt('\n').void().parse_next(input)?;

    Ok(Line::Row(TableRow {
        span: Span::new(row_start..row_end),
        cells,
    }))
}

/// Parse a line holding only whitespace.
fn blank_line(input: &mut Input<'_>) -> ScanResult<Line> {
    (
        take_while(0.., is_inline_space),
        alt(('\n'.void(), eof.void())),
    )
        .value(Line::Blank)
        .parse_next(input)
}

/// Parse any other non-empty line.
fn prose_line(input: &mut Input<'_>) -> ScanResult<Line> {
    (take_while(1.., |c: char| c != '\n'), opt('\n'))
        .value(Line::Prose)
        .parse_next(input)
}

/// Parse a single source line.
fn line(input: &mut Input<'_>) -> ScanResult<Line> {
    alt((heading, table_row, blank_line, prose_line)).parse_next(input)
}

/// A delimiter row separates the table header from the body. Each cell is
/// dashes with optional alignment colons, like `---`, `:--`, or `:-:`.
fn is_delimiter_row(row: &TableRow) -> bool {
    !row.cells.is_empty()
        && row.cells.iter().all(|cell| {
            !cell.is_empty() && cell.chars().all(|c| c == '-' || c == ':') && cell.contains('-')
        })
}

/// A table whose header has been seen but which is still being assembled.
struct PendingTable {
    header: TableRow,
    span: Span,
    delimiter_seen: bool,
    error_reported: bool,
    rows: Vec<TableRow>,
}

/// Scanner that accumulates headings, tables, and diagnostics.
struct Scanner {
    headings: Vec<Heading>,
    tables: Vec<Table>,
    pending: Option<PendingTable>,
    diagnostics: DiagnosticCollector,
}

impl Scanner {
    fn new() -> Self {
        Self {
            headings: Vec::new(),
            tables: Vec::new(),
            pending: None,
            diagnostics: DiagnosticCollector::new(),
        }
    }

    /// Scan the input, collecting structure and errors.
    fn scan(&mut self, mut input: Input<'_>) {
        while !input.is_empty() {
            match line(&mut input) {
                Ok(Line::Heading(heading)) => {
                    self.close_table();
                    self.headings.push(heading);
                }
                Ok(Line::Row(row)) => self.take_row(row),
                Ok(Line::Blank) | Ok(Line::Prose) => self.close_table(),
                Err(e) => {
                    // Get position before recovery
                    let error_pos = input.current_token_start();

                    let diagnostic = Self::convert_err_mode(e, error_pos);
                    self.diagnostics.emit(diagnostic);
                    self.close_table();

                    // Skip to the end of the line so one bad line yields
                    // one diagnostic instead of a cascade.
                    while let Some(c) = input.next_token() {
                        if c == '\n' {
                            break;
                        }
                    }
                }
            }
        }
        self.close_table();
    }

    /// Fold a scanned row into the pending table.
    fn take_row(&mut self, row: TableRow) {
        match &mut self.pending {
            None => {
                self.pending = Some(PendingTable {
                    span: row.span,
                    header: row,
                    delimiter_seen: false,
                    error_reported: false,
                    rows: Vec::new(),
                });
            }
            Some(pending) if !pending.delimiter_seen => {
                if pending.error_reported {
                    // Rows of an already-reported undelimited table are
                    // skipped until something closes it.
                } else if is_delimiter_row(&row) {
                    pending.span = pending.span.union(row.span);
                    pending.delimiter_seen = true;
                } else {
                    self.diagnostics
                        .emit(Self::missing_delimiter(pending.header.span));
                    pending.error_reported = true;
                }
            }
            Some(pending) => {
                if row.cells.len() != pending.header.cells.len() {
                    self.diagnostics.emit(
                        Diagnostic::error("table row width mismatch")
                            .with_code(ErrorCode::E100)
                            .with_label(row.span, format!("row has {} cells", row.cells.len()))
                            .with_secondary_label(
                                pending.header.span,
                                format!(
                                    "header defines {} columns",
                                    pending.header.cells.len()
                                ),
                            ),
                    );
                }
                pending.span = pending.span.union(row.span);
                pending.rows.push(row);
            }
        }
    }

    /// Close the pending table, keeping it only when it was delimited.
    fn close_table(&mut self) {
        let Some(pending) = self.pending.take() else {
            return;
        };
        if !pending.delimiter_seen {
            if !pending.error_reported {
                self.diagnostics.emit(Self::missing_delimiter(pending.header.span));
            }
            return;
        }
        self.tables.push(Table {
            span: pending.span,
            columns: pending.header.cells,
            rows: pending.rows,
        });
    }

    fn missing_delimiter(header_span: Span) -> Diagnostic {
        Diagnostic::error("missing table delimiter row")
            .with_code(ErrorCode::E002)
            .with_label(header_span, "table header without a delimiter row")
            .with_help("separate the header from the body with a `| --- |` row")
    }

    /// Finish scanning and return the structure or collected errors.
    fn finish(self) -> Result<(Vec<Heading>, Vec<Table>), ParseError> {
        self.diagnostics
            .finish()
            .map(|()| (self.headings, self.tables))
    }

    /// Convert an ErrMode and error position to a Diagnostic.
    ///
    /// Extracts `ScanDiagnostic` from the error context for rich error info
    /// with code, message, and help. Falls back to E004 (malformed line)
    /// if no diagnostic context is found.
    fn convert_err_mode(
        err: ErrMode<ContextError<ScanDiagnostic>>,
        error_pos: usize,
    ) -> Diagnostic {
        let context_error = match err {
            ErrMode::Backtrack(ctx) | ErrMode::Cut(ctx) => ctx,
            ErrMode::Incomplete(_) => ContextError::new(),
        };

        // Use the first diagnostic context if available
        if let Some(ScanDiagnostic {
            code,
            message,
            help,
            start,
        }) = context_error.context().next()
        {
            let span = Span::new(*start..error_pos);

            let mut diag = Diagnostic::error(*message)
                .with_code(*code)
                .with_label(span, code.description());
            if let Some(h) = help {
                diag = diag.with_help(*h);
            }
            return diag;
        }

        // Fallback when no context is present
        let span = Span::new(error_pos..error_pos.saturating_add(1));
        Diagnostic::error("malformed line")
            .with_code(ErrorCode::E004)
            .with_label(span, ErrorCode::E004.description())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CANONICAL: &str = "\
# AI2D-RST annotation schema

## Semantic relations

The seven labels used when annotating diagram relationships.

| Relation | Roles assigned | Notes |
| --- | --- | --- |
| restatement | both elements = nucleus | symmetric equivalence |
| identification | satellite = identifying label; nucleus = identified element | asymmetric |
| effect | satellite = cause; nucleus = affected element | asymmetric |
| sequence | both elements = nucleus | temporal/spatial ordering, symmetric roles |
| property-ascription | satellite = property source; nucleus = described element | asymmetric |
| title | satellite = title; nucleus = titled diagram/part | asymmetric |
| none | unassigned / flags invalid pair | excluded from final corpus |
";

    /// Helper to verify error codes in diagnostics match exactly in order.
    fn assert_error_codes(source: &str, expected_codes: &[ErrorCode]) {
        let result = SchemeDoc::parse(source);
        assert!(result.is_err(), "Expected scan to fail on: {source:?}");
        let parse_error = result.unwrap_err();
        let diagnostics = parse_error.diagnostics();
        assert_eq!(
            diagnostics.len(),
            expected_codes.len(),
            "Expected {} errors for {source:?}, got {}: {diagnostics:#?}",
            expected_codes.len(),
            diagnostics.len()
        );
        for (i, (diag, expected)) in diagnostics.iter().zip(expected_codes).enumerate() {
            assert_eq!(
                diag.code(),
                Some(*expected),
                "Error {i}: expected {expected:?} for {source:?}, got {:?}",
                diag.code()
            );
        }
    }

    #[test]
    fn test_canonical_document_scans_cleanly() {
        let doc = SchemeDoc::parse(CANONICAL).unwrap();

        assert_eq!(doc.headings().len(), 2);
        assert_eq!(doc.tables().len(), 1);

        let table = &doc.tables()[0];
        assert_eq!(table.width(), 3);
        assert_eq!(table.columns()[0].inner(), "Relation");
        assert_eq!(table.columns()[1].inner(), "Roles assigned");
        assert_eq!(table.columns()[2].inner(), "Notes");
        assert_eq!(table.rows().len(), 7);

        let relations: Vec<&str> = table
            .rows()
            .iter()
            .map(|row| row.cells()[0].inner().as_str())
            .collect();
        assert_eq!(
            relations,
            [
                "restatement",
                "identification",
                "effect",
                "sequence",
                "property-ascription",
                "title",
                "none",
            ]
        );
    }

    #[test]
    fn test_heading_levels_and_text() {
        let doc = SchemeDoc::parse("# One\n## Two deep\n###### Six\n").unwrap();

        let levels: Vec<u8> = doc.headings().iter().map(Heading::level).collect();
        assert_eq!(levels, [1, 2, 6]);

        assert_eq!(doc.headings()[0].text(), "One");
        assert_eq!(doc.headings()[1].text(), "Two deep");
        assert_eq!(doc.headings()[2].text(), "Six");
    }

    #[test]
    fn test_heading_span_slices_source() {
        let source = "## Semantic relations\n";
        let doc = SchemeDoc::parse(source).unwrap();

        let span = doc.headings()[0].span();
        assert_eq!(&source[span.start()..span.end()], "Semantic relations");
    }

    #[test]
    fn test_hash_word_is_prose() {
        let doc = SchemeDoc::parse("#tag without a space\n").unwrap();
        assert!(doc.headings().is_empty());
        assert!(doc.is_empty());
    }

    #[test]
    fn test_seven_hashes_is_prose() {
        let doc = SchemeDoc::parse("####### too deep\n").unwrap();
        assert!(doc.headings().is_empty());
    }

    #[test]
    fn test_heading_at_end_of_input() {
        let doc = SchemeDoc::parse("## No trailing newline").unwrap();
        assert_eq!(doc.headings()[0].text(), "No trailing newline");
    }

    #[test]
    fn test_empty_heading_is_an_error() {
        assert_error_codes("##\n", &[ErrorCode::E003]);
        assert_error_codes("##   \n", &[ErrorCode::E003]);
        assert_error_codes("#", &[ErrorCode::E003]);
    }

    #[test]
    fn test_unterminated_row_is_an_error() {
        assert_error_codes("| restatement | both elements = nucleus\n", &[ErrorCode::E001]);
        assert_error_codes("| dangling", &[ErrorCode::E001]);
        assert_error_codes("|", &[ErrorCode::E001]);
    }

    #[test]
    fn test_unterminated_row_span_covers_the_row() {
        let source = "prose first\n| title | text\n";
        let parse_error = SchemeDoc::parse(source).unwrap_err();
        let diagnostic = &parse_error.diagnostics()[0];

        let span = diagnostic.labels()[0].span();
        assert_eq!(&source[span.start()..span.end()], "| title | text");
    }

    #[test]
    fn test_missing_delimiter_is_one_error() {
        // Several body rows after an undelimited header still report once
        let source = "| a | b |\n| c | d |\n| e | f |\n\n";
        assert_error_codes(source, &[ErrorCode::E002]);
    }

    #[test]
    fn test_lone_header_is_missing_delimiter() {
        assert_error_codes("| Relation | Roles |\n", &[ErrorCode::E002]);
    }

    #[test]
    fn test_lone_delimiter_row_is_an_error() {
        assert_error_codes("| --- | --- |\n\n", &[ErrorCode::E002]);
    }

    #[test]
    fn test_row_width_mismatch() {
        let source = "\
| Relation | Roles |
| --- | --- |
| title | satellite = title | extra |
";
        assert_error_codes(source, &[ErrorCode::E100]);
    }

    #[test]
    fn test_width_mismatch_labels_row_and_header() {
        let source = "| a | b |\n| --- | --- |\n| one |\n";
        let parse_error = SchemeDoc::parse(source).unwrap_err();
        let diagnostic = &parse_error.diagnostics()[0];

        assert_eq!(diagnostic.code(), Some(ErrorCode::E100));
        assert_eq!(diagnostic.labels().len(), 2);
        assert!(diagnostic.labels()[0].is_primary());
        assert!(!diagnostic.labels()[1].is_primary());
    }

    #[test]
    fn test_error_recovery_collects_multiple_errors() {
        assert_error_codes("##\n| a | b\n", &[ErrorCode::E003, ErrorCode::E001]);
        assert_error_codes("##\n###\n", &[ErrorCode::E003, ErrorCode::E003]);
    }

    #[test]
    fn test_pipes_inside_prose_are_not_a_table() {
        let doc = SchemeDoc::parse("either restatement | identification works\n").unwrap();
        assert!(doc.tables().is_empty());
    }

    #[test]
    fn test_indented_table_scans() {
        let source = "  | a | b |\n  | --- | --- |\n  | c | d |\n";
        let doc = SchemeDoc::parse(source).unwrap();

        assert_eq!(doc.tables().len(), 1);
        assert_eq!(doc.tables()[0].rows().len(), 1);
    }

    #[test]
    fn test_delimiter_alignment_variants() {
        let source = "| a | b | c | d |\n| --- | :-- | --: | :-: |\n| 1 | 2 | 3 | 4 |\n";
        let doc = SchemeDoc::parse(source).unwrap();
        assert_eq!(doc.tables().len(), 1);
    }

    #[test]
    fn test_prose_and_blank_lines_separate_tables() {
        let source = "\
| a |
| --- |
| 1 |

prose between

| b |
| --- |
| 2 |
";
        let doc = SchemeDoc::parse(source).unwrap();

        assert_eq!(doc.tables().len(), 2);
        assert_eq!(doc.tables()[0].columns()[0].inner(), "a");
        assert_eq!(doc.tables()[1].columns()[0].inner(), "b");
    }

    #[test]
    fn test_heading_closes_table() {
        let source = "| a |\n| --- |\n| 1 |\n## Next section\n";
        let doc = SchemeDoc::parse(source).unwrap();

        assert_eq!(doc.tables().len(), 1);
        assert_eq!(doc.headings().len(), 1);
    }

    #[test]
    fn test_table_at_end_of_input() {
        let doc = SchemeDoc::parse("| a |\n| --- |\n| 1 |").unwrap();
        assert_eq!(doc.tables().len(), 1);
        assert_eq!(doc.tables()[0].rows().len(), 1);
    }

    #[test]
    fn test_cell_spans_slice_source() {
        let source = "| Relation | Roles assigned |\n| --- | --- |\n| title |  satellite = title  |\n";
        let doc = SchemeDoc::parse(source).unwrap();
        let table = &doc.tables()[0];

        let column = &table.columns()[1];
        assert_eq!(
            &source[column.span().start()..column.span().end()],
            "Roles assigned"
        );

        // Trimming narrows the span to the retained text
        let cell = &table.rows()[0].cells()[1];
        assert_eq!(cell.inner(), "satellite = title");
        assert_eq!(
            &source[cell.span().start()..cell.span().end()],
            "satellite = title"
        );
    }

    #[test]
    fn test_empty_cell_has_empty_span() {
        let source = "| a | b |\n| --- | --- |\n| | x |\n";
        let doc = SchemeDoc::parse(source).unwrap();
        let cell = &doc.tables()[0].rows()[0].cells()[0];

        assert_eq!(cell.inner(), "");
        assert!(cell.span().is_empty());
    }

    #[test]
    fn test_table_span_covers_header_to_last_row() {
        let source = "prose\n| a |\n| --- |\n| 1 |\n| 2 |\nafter\n";
        let doc = SchemeDoc::parse(source).unwrap();
        let span = doc.tables()[0].span();

        assert_eq!(
            &source[span.start()..span.end()],
            "| a |\n| --- |\n| 1 |\n| 2 |"
        );
    }

    #[test]
    fn test_column_index_is_case_insensitive() {
        let doc = SchemeDoc::parse(CANONICAL).unwrap();
        let table = &doc.tables()[0];

        assert_eq!(table.column_index("relation"), Some(0));
        assert_eq!(table.column_index("ROLES"), Some(1));
        assert_eq!(table.column_index("roles assigned"), Some(1));
        assert_eq!(table.column_index("directionality"), None);
    }

    #[test]
    fn test_header_span_covers_all_columns() {
        let source = "| Relation | Roles |\n| --- | --- |\n| x | y |\n";
        let doc = SchemeDoc::parse(source).unwrap();
        let span = doc.tables()[0].header_span();

        assert_eq!(&source[span.start()..span.end()], "Relation | Roles");
    }

    #[test]
    fn test_empty_document() {
        let doc = SchemeDoc::parse("").unwrap();
        assert!(doc.is_empty());
        assert_eq!(doc.span(), Span::default());
    }

    #[test]
    fn test_whitespace_only_document() {
        let doc = SchemeDoc::parse("   \n\t\n\n").unwrap();
        assert!(doc.is_empty());
    }

    #[test]
    fn test_prose_only_document() {
        let source = "The annotation covers diagrams from primary school science.\n\nNothing else.\n";
        let doc = SchemeDoc::parse(source).unwrap();
        assert!(doc.is_empty());
        assert_eq!(doc.span(), Span::new(0..source.len()));
    }

    #[test]
    fn test_row_after_error_starts_fresh() {
        // The bad row is skipped; the table that follows scans cleanly
        let source = "| broken\n\n| a |\n| --- |\n| 1 |\n";
        let parse_error = SchemeDoc::parse(source).unwrap_err();
        assert_eq!(parse_error.diagnostics().len(), 1);
    }
}
