//! # Scholia Parser
//!
//! Front end for the scholia toolkit. This crate turns the two input
//! formats of the annotation workflow into typed data:
//!
//! - [`ai2d::Annotation`]: a serde model of one AI2D annotation file, the
//!   JSON dumps that pair diagram elements with their relationships.
//! - [`scheme::SchemeDoc`]: the headings and relation tables of a Markdown
//!   annotation-scheme document, scanned with span tracking so that every
//!   diagnostic can point back into the source.
//!
//! On top of the scanner, [`check::check_corpus`] verifies that scheme
//! documents stay consistent: taxonomy tables must cover the seven
//! semantic relations exactly once with the canonical role assignments,
//! and copies of the scheme spread across documents must agree
//! cell-for-cell.
//!
//! ## Usage
//!
//! ```
//! use scholia_parser::{check_corpus, SchemeDoc};
//!
//! let source = "| Relation | Roles assigned |\n|---|---|\n| title | satellite = title; nucleus = titled diagram/part |\n";
//! let doc = SchemeDoc::parse(source)?;
//!
//! // A single-row table is well-formed but incomplete.
//! let report = check_corpus(&[("scheme.md", &doc)]);
//! assert!(report.has_errors());
//! # Ok::<(), scholia_parser::ParseError>(())
//! ```

pub mod ai2d;
pub mod check;
pub mod error;
pub mod scheme;
mod span;

pub use ai2d::Annotation;
pub use check::{CheckReport, check_corpus};
pub use error::{Diagnostic, ErrorCode, Label, ParseError, Severity};
pub use scheme::SchemeDoc;
pub use span::{Span, Spanned};
