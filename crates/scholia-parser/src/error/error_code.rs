//! Error codes for the Scholia diagnostic system.
//!
//! Error codes are organized by phase:
//! - `E0xx` - Scan errors
//! - `E1xx` - Table structure errors
//! - `E2xx` - Taxonomy consistency errors

use std::fmt;

/// Error codes for categorizing diagnostic errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Scan Errors (E0xx)
    // =========================================================================
    /// Unterminated table row.
    ///
    /// A table row was opened with `|` but never closed before the end of
    /// the line.
    E001,

    /// Missing table delimiter row.
    ///
    /// A table header row was not followed by a `| --- |` delimiter row,
    /// so the block cannot be read as a table.
    E002,

    /// Empty heading.
    ///
    /// A heading marker (`#`) was found with no heading text after it.
    E003,

    /// Malformed line.
    ///
    /// A line could not be scanned as a heading, table row, or prose.
    E004,

    // =========================================================================
    // Table Structure Errors (E1xx)
    // =========================================================================
    /// Table row width mismatch.
    ///
    /// A table row has a different number of cells than the header row.
    E100,

    /// Taxonomy table missing roles column.
    ///
    /// A table lists the scheme's relations but has no column describing
    /// the roles they assign.
    E101,

    /// Empty relation cell.
    ///
    /// A row in a taxonomy table has an empty relation cell.
    E102,

    // =========================================================================
    // Taxonomy Consistency Errors (E2xx)
    // =========================================================================
    /// Unknown relation label.
    ///
    /// A taxonomy table names a relation that is not part of the scheme.
    E200,

    /// Duplicate relation entry.
    ///
    /// A relation appears more than once in a single taxonomy table.
    E201,

    /// Incomplete taxonomy table.
    ///
    /// A taxonomy table does not cover all seven relations of the scheme.
    E202,

    /// Mismatched role assignment.
    ///
    /// A roles cell contradicts the role scheme of its relation, for
    /// example by assigning a satellite to a symmetric relation.
    E203,

    /// Divergent relation entry.
    ///
    /// The entry for a relation differs between two copies of the
    /// taxonomy table.
    E204,
}

impl ErrorCode {
    /// Returns the numeric code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            // Scan errors
            ErrorCode::E001 => "E001",
            ErrorCode::E002 => "E002",
            ErrorCode::E003 => "E003",
            ErrorCode::E004 => "E004",
            // Table structure errors
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            // Taxonomy consistency errors
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E202 => "E202",
            ErrorCode::E203 => "E203",
            ErrorCode::E204 => "E204",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            // Scan errors
            ErrorCode::E001 => "unterminated table row",
            ErrorCode::E002 => "missing table delimiter row",
            ErrorCode::E003 => "empty heading",
            ErrorCode::E004 => "malformed line",
            // Table structure errors
            ErrorCode::E100 => "table row width mismatch",
            ErrorCode::E101 => "missing roles column",
            ErrorCode::E102 => "empty relation cell",
            // Taxonomy consistency errors
            ErrorCode::E200 => "unknown relation label",
            ErrorCode::E201 => "duplicate relation entry",
            ErrorCode::E202 => "incomplete taxonomy table",
            ErrorCode::E203 => "mismatched role assignment",
            ErrorCode::E204 => "divergent relation entry",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
