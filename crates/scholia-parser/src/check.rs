//! Consistency checks for scheme documents.
//!
//! The annotation scheme is documented in README copies spread across the
//! repository, and the copies drift: a label gets renamed in one place, a
//! role assignment is edited in another, a table loses a row. The checks
//! here verify each document against the scheme coded in
//! [`scholia_core::taxonomy`] and verify the copies against each other.
//!
//! [`check_document`] runs the per-document checks; [`check_corpus`] runs
//! them over a set of named documents and adds the cross-document checks.
//!
//! # Example
//!
//! ```
//! # use scholia_parser::{check::check_document, error::ErrorCode, scheme::SchemeDoc};
//! let source = "| Relation | Roles assigned |\n| --- | --- |\n| title | satellite = title; nucleus = titled diagram/part |\n| title | satellite = title; nucleus = titled diagram/part |\n";
//!
//! let doc = SchemeDoc::parse(source).unwrap();
//! let diagnostics = check_document(&doc);
//!
//! assert!(diagnostics.iter().any(|d| d.code() == Some(ErrorCode::E201)));
//! ```

use indexmap::{IndexMap, map::Entry};
use log::debug;

use scholia_core::taxonomy::{RoleScheme, SemanticRelation};

use crate::{
    error::{Diagnostic, ErrorCode},
    scheme::{SchemeDoc, Table, TableRow},
    span::{Span, Spanned},
};

/// One finding, tied to the document it was raised in.
#[derive(Debug, Clone)]
pub struct CheckItem {
    doc_index: usize,
    diagnostic: Diagnostic,
}

impl CheckItem {
    /// Index of the document in the slice passed to [`check_corpus`].
    pub fn doc_index(&self) -> usize {
        self.doc_index
    }

    pub fn diagnostic(&self) -> &Diagnostic {
        &self.diagnostic
    }
}

/// Every finding from a corpus-wide check.
#[derive(Debug, Clone)]
pub struct CheckReport {
    items: Vec<CheckItem>,
}

impl CheckReport {
    /// All findings, per-document checks first, then cross-document ones.
    pub fn items(&self) -> &[CheckItem] {
        &self.items
    }

    /// Whether the check produced no findings at all.
    pub fn is_clean(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether any finding is an error.
    pub fn has_errors(&self) -> bool {
        self.items
            .iter()
            .any(|item| item.diagnostic.severity().is_error())
    }

    pub fn error_count(&self) -> usize {
        self.items
            .iter()
            .filter(|item| item.diagnostic.severity().is_error())
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.items
            .iter()
            .filter(|item| item.diagnostic.severity().is_warning())
            .count()
    }
}

/// How a scanned table relates to the taxonomy.
enum TableKind {
    /// A taxonomy table with both a relation and a roles column.
    Taxonomy { relation: usize, roles: usize },
    /// A taxonomy table missing its roles column.
    MissingRoles { relation: usize },
    /// Some other table; not checked.
    Other,
}

/// Decide whether a table documents the relation scheme.
///
/// A table with both a relation column and a roles column is always
/// treated as a taxonomy table. A table with only a relation column is
/// one exactly when every non-empty relation cell holds a scheme label;
/// this keeps tables that list the full rhetorical inventory, which
/// shares labels like `sequence` and `title` with the scheme, out of the
/// checks.
fn classify(table: &Table) -> TableKind {
    let Some(relation) = table.column_index("relation") else {
        return TableKind::Other;
    };
    if let Some(roles) = table.column_index("role") {
        if roles != relation {
            return TableKind::Taxonomy { relation, roles };
        }
    }

    let mut any_label = false;
    for row in table.rows() {
        let Some(cell) = row.cell(relation) else {
            continue;
        };
        if cell.is_empty() {
            continue;
        }
        if normalize_label(cell.as_str()).parse::<SemanticRelation>().is_err() {
            return TableKind::Other;
        }
        any_label = true;
    }
    if any_label {
        TableKind::MissingRoles { relation }
    } else {
        TableKind::Other
    }
}

/// Collapse runs of whitespace to single spaces.
fn normalize_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Strip markdown emphasis from a relation label cell.
fn normalize_label(text: &str) -> String {
    text.trim()
        .trim_matches(|c| c == '*' || c == '`' || c == '_')
        .trim()
        .to_string()
}

fn known_labels_help() -> String {
    let labels: Vec<&str> = SemanticRelation::ALL.iter().map(|r| r.label()).collect();
    format!("the scheme labels are: {}", labels.join(", "))
}

/// The role wording documentation is expected to carry for a label.
fn canonical_roles(relation: SemanticRelation) -> String {
    match relation.role_scheme() {
        RoleScheme::Symmetric => "both elements = nucleus".to_string(),
        RoleScheme::Asymmetric { satellite, nucleus } => {
            format!("satellite = {satellite}; nucleus = {nucleus}")
        }
        RoleScheme::Unassigned => "unassigned / flags invalid pair".to_string(),
    }
}

/// Verify a roles cell against the label's role scheme.
///
/// The check is deliberately loose about wording: symmetric labels must
/// mention the nucleus and nothing of a satellite, asymmetric labels must
/// mention both roles, and `none` must mention neither.
fn check_role_cell(
    relation: SemanticRelation,
    cell: &Spanned<String>,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let text = cell.to_lowercase();
    let has_nucleus = text.contains("nucleus");
    let has_satellite = text.contains("satellite");

    let matches_scheme = match relation.role_scheme() {
        RoleScheme::Symmetric => has_nucleus && !has_satellite,
        RoleScheme::Asymmetric { .. } => has_nucleus && has_satellite,
        RoleScheme::Unassigned => !has_nucleus && !has_satellite,
    };

    if !matches_scheme {
        diagnostics.push(
            Diagnostic::error(format!("mismatched role assignment for `{relation}`"))
                .with_code(ErrorCode::E203)
                .with_label(cell.span(), "does not match the label's role scheme")
                .with_help(format!("expected: {}", canonical_roles(relation))),
        );
    }
}

/// Run the taxonomy checks over one classified table.
fn check_taxonomy_table(
    table: &Table,
    relation_col: usize,
    roles_col: Option<usize>,
    diagnostics: &mut Vec<Diagnostic>,
) {
    if roles_col.is_none() {
        diagnostics.push(
            Diagnostic::error("missing roles column")
                .with_code(ErrorCode::E101)
                .with_label(table.header_span(), "this taxonomy table has no roles column")
                .with_help("add a `Roles assigned` column naming each label's role scheme"),
        );
    }

    let mut seen: IndexMap<SemanticRelation, Span> = IndexMap::new();
    for row in table.rows() {
        let Some(cell) = row.cell(relation_col) else {
            // Ragged rows are already reported at scan time
            continue;
        };
        if cell.is_empty() {
            diagnostics.push(
                Diagnostic::error("empty relation cell")
                    .with_code(ErrorCode::E102)
                    .with_label(row.span(), "this row names no relation"),
            );
            continue;
        }

        let label = normalize_label(cell.as_str());
        let Ok(relation) = label.parse::<SemanticRelation>() else {
            diagnostics.push(
                Diagnostic::error(format!("unknown relation label `{label}`"))
                    .with_code(ErrorCode::E200)
                    .with_label(cell.span(), "not a label in the scheme")
                    .with_help(known_labels_help()),
            );
            continue;
        };

        if let Some(first) = seen.get(&relation) {
            diagnostics.push(
                Diagnostic::error(format!("duplicate entry for `{relation}`"))
                    .with_code(ErrorCode::E201)
                    .with_label(cell.span(), "listed again here")
                    .with_secondary_label(*first, "first listed here"),
            );
            continue;
        }
        seen.insert(relation, cell.span());

        if let Some(roles_col) = roles_col {
            if let Some(role_cell) = row.cell(roles_col) {
                check_role_cell(relation, role_cell, diagnostics);
            }
        }
    }

    if !seen.is_empty() && seen.len() < SemanticRelation::ALL.len() {
        let missing: Vec<&str> = SemanticRelation::ALL
            .iter()
            .filter(|relation| !seen.contains_key(*relation))
            .map(|relation| relation.label())
            .collect();
        diagnostics.push(
            Diagnostic::error("incomplete taxonomy table")
                .with_code(ErrorCode::E202)
                .with_label(table.span(), format!("missing: {}", missing.join(", ")))
                .with_help("every label in the scheme must appear exactly once"),
        );
    }
}

/// Warn when a heading is reused within one document.
fn check_repeated_headings(doc: &SchemeDoc, diagnostics: &mut Vec<Diagnostic>) {
    let mut seen: IndexMap<String, Span> = IndexMap::new();
    for heading in doc.headings() {
        let key = normalize_text(heading.text()).to_lowercase();
        match seen.entry(key) {
            Entry::Occupied(entry) => {
                diagnostics.push(
                    Diagnostic::warning(format!(
                        "heading `{}` appears more than once",
                        heading.text()
                    ))
                    .with_label(heading.span(), "repeated here")
                    .with_secondary_label(*entry.get(), "first used here"),
                );
            }
            Entry::Vacant(entry) => {
                entry.insert(heading.span());
            }
        }
    }
}

fn table_fingerprint(table: &Table) -> String {
    let mut parts: Vec<String> = Vec::new();
    parts.push(
        table
            .columns()
            .iter()
            .map(|cell| normalize_text(cell.as_str()).to_lowercase())
            .collect::<Vec<_>>()
            .join("|"),
    );
    for row in table.rows() {
        parts.push(
            row.cells()
                .iter()
                .map(|cell| normalize_text(cell.as_str()).to_lowercase())
                .collect::<Vec<_>>()
                .join("|"),
        );
    }
    parts.join("\n")
}

fn row_fingerprint(row: &TableRow) -> String {
    row.cells()
        .iter()
        .map(|cell| normalize_text(cell.as_str()))
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Warn when one document repeats a whole table.
fn check_duplicated_tables(doc: &SchemeDoc, diagnostics: &mut Vec<Diagnostic>) {
    let mut seen: IndexMap<String, Span> = IndexMap::new();
    for table in doc.tables() {
        if table.rows().is_empty() {
            continue;
        }
        match seen.entry(table_fingerprint(table)) {
            Entry::Occupied(entry) => {
                diagnostics.push(
                    Diagnostic::warning("table duplicated within the document")
                        .with_label(table.span(), "same content as an earlier table")
                        .with_secondary_label(*entry.get(), "first copy here"),
                );
            }
            Entry::Vacant(entry) => {
                entry.insert(table.span());
            }
        }
    }
}

/// Run the per-document checks.
///
/// Covers the taxonomy tables (missing roles column, empty and unknown
/// and duplicated labels, incomplete tables, role assignments) plus the
/// within-document duplication warnings.
pub fn check_document(doc: &SchemeDoc) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for table in doc.tables() {
        match classify(table) {
            TableKind::Taxonomy { relation, roles } => {
                check_taxonomy_table(table, relation, Some(roles), &mut diagnostics);
            }
            TableKind::MissingRoles { relation } => {
                check_taxonomy_table(table, relation, None, &mut diagnostics);
            }
            TableKind::Other => {}
        }
    }

    check_repeated_headings(doc, &mut diagnostics);
    check_duplicated_tables(doc, &mut diagnostics);
    diagnostics
}

struct FirstSighting {
    doc_index: usize,
    doc_name: String,
    fingerprint: String,
}

/// Flag taxonomy rows that diverge between scheme copies.
///
/// The first sighting of each label is taken as the reference; later
/// copies in other documents must agree with it after whitespace
/// normalization.
fn check_cross_document(docs: &[(&str, &SchemeDoc)], items: &mut Vec<CheckItem>) {
    let mut first: IndexMap<SemanticRelation, FirstSighting> = IndexMap::new();

    for (doc_index, (name, doc)) in docs.iter().enumerate() {
        for table in doc.tables() {
            let relation_col = match classify(table) {
                TableKind::Taxonomy { relation, .. } | TableKind::MissingRoles { relation } => {
                    relation
                }
                TableKind::Other => continue,
            };
            for row in table.rows() {
                let Some(cell) = row.cell(relation_col) else {
                    continue;
                };
                let Ok(relation) = normalize_label(cell.as_str()).parse::<SemanticRelation>()
                else {
                    continue;
                };
                let fingerprint = row_fingerprint(row);
                match first.entry(relation) {
                    Entry::Occupied(entry) => {
                        let sighting = entry.get();
                        if sighting.doc_index != doc_index && sighting.fingerprint != fingerprint
                        {
                            items.push(CheckItem {
                                doc_index,
                                diagnostic: Diagnostic::error(format!(
                                    "entry for `{relation}` differs from the copy in {}",
                                    sighting.doc_name
                                ))
                                .with_code(ErrorCode::E204)
                                .with_label(row.span(), "this copy of the entry")
                                .with_help("scheme copies must agree cell-for-cell"),
                            });
                        }
                    }
                    Entry::Vacant(entry) => {
                        entry.insert(FirstSighting {
                            doc_index,
                            doc_name: name.to_string(),
                            fingerprint,
                        });
                    }
                }
            }
        }
    }
}

fn doc_fingerprint(doc: &SchemeDoc) -> String {
    let mut parts: Vec<String> = doc
        .headings()
        .iter()
        .map(|heading| normalize_text(heading.text()).to_lowercase())
        .collect();
    for table in doc.tables() {
        parts.push(table_fingerprint(table));
    }
    parts.join("\n#\n")
}

/// Warn when a document duplicates the structure of an earlier one.
///
/// Documents compare by their headings and tables after whitespace and
/// case normalization; prose does not participate, so two copies that
/// differ only in wording around the tables still count as duplicates.
fn check_near_duplicates(docs: &[(&str, &SchemeDoc)], items: &mut Vec<CheckItem>) {
    let mut seen: IndexMap<String, String> = IndexMap::new();
    for (doc_index, (name, doc)) in docs.iter().enumerate() {
        let fingerprint = doc_fingerprint(doc);
        if fingerprint.is_empty() {
            continue;
        }
        match seen.entry(fingerprint) {
            Entry::Occupied(entry) => {
                items.push(CheckItem {
                    doc_index,
                    diagnostic: Diagnostic::warning(format!(
                        "document duplicates the content of {}",
                        entry.get()
                    ))
                    .with_label(doc.span(), "same headings and tables")
                    .with_help("keep one authoritative copy of the scheme documentation"),
                });
            }
            Entry::Vacant(entry) => {
                entry.insert(name.to_string());
            }
        }
    }
}

/// Run every check over a set of named documents.
///
/// Names identify documents in cross-document messages; paths work well.
pub fn check_corpus(docs: &[(&str, &SchemeDoc)]) -> CheckReport {
    let mut items = Vec::new();

    for (doc_index, (_, doc)) in docs.iter().enumerate() {
        for diagnostic in check_document(doc) {
            items.push(CheckItem {
                doc_index,
                diagnostic,
            });
        }
    }
    check_cross_document(docs, &mut items);
    check_near_duplicates(docs, &mut items);

    let report = CheckReport { items };
    debug!(
        docs = docs.len(),
        errors = report.error_count(),
        warnings = report.warning_count();
        "Checked scheme documents"
    );
    report
}
