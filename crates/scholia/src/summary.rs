//! Summaries over record sets: how far annotation work has come.
//!
//! A [`RecordSummary`] tallies a record set by relationship category, by
//! assigned semantic relation, and by source file, alongside the judged and
//! excluded totals. Its [`Display`](std::fmt::Display) output is the text
//! block the `stats` command prints.

use std::{collections::BTreeMap, fmt};

use indexmap::IndexMap;

use scholia_core::taxonomy::SemanticRelation;

use crate::record::RelationRecord;

/// Tallies over a record set.
///
/// # Examples
///
/// ```
/// use scholia::summary::RecordSummary;
/// # use scholia::record::RelationRecord;
///
/// # fn records() -> Vec<RelationRecord> { Vec::new() }
/// let records = records();
/// let summary = RecordSummary::of(&records);
/// assert_eq!(summary.total(), records.len());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSummary {
    total: usize,
    judged: usize,
    excluded: usize,
    by_category: BTreeMap<String, usize>,
    by_relation: IndexMap<SemanticRelation, usize>,
    by_file: BTreeMap<String, usize>,
}

impl RecordSummary {
    /// Tally a record set.
    pub fn of<'a>(records: impl IntoIterator<Item = &'a RelationRecord>) -> Self {
        let mut summary = Self {
            total: 0,
            judged: 0,
            excluded: 0,
            by_category: BTreeMap::new(),
            by_relation: SemanticRelation::ALL
                .into_iter()
                .map(|relation| (relation, 0))
                .collect(),
            by_file: BTreeMap::new(),
        };

        for record in records {
            summary.total += 1;
            *summary
                .by_category
                .entry(record.category().as_str().to_string())
                .or_insert(0) += 1;
            *summary
                .by_file
                .entry(record.file_name().to_string())
                .or_insert(0) += 1;

            if let Some(judgement) = record.judgement() {
                summary.judged += 1;
                *summary.by_relation.entry(judgement.relation()).or_insert(0) += 1;
            }
            if record.is_excluded() {
                summary.excluded += 1;
            }
        }

        summary
    }

    /// Total number of records.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of records carrying a judgement.
    pub fn judged(&self) -> usize {
        self.judged
    }

    /// Number of records excluded from the final corpus (judged `none`).
    pub fn excluded(&self) -> usize {
        self.excluded
    }

    /// Number of distinct annotation files in the set.
    pub fn files(&self) -> usize {
        self.by_file.len()
    }

    /// Record counts per relationship category, sorted by category name.
    pub fn by_category(&self) -> &BTreeMap<String, usize> {
        &self.by_category
    }

    /// Judged record counts per semantic relation, in scheme order.
    ///
    /// Every label of the scheme is present, including those with no
    /// judged records yet.
    pub fn by_relation(&self) -> &IndexMap<SemanticRelation, usize> {
        &self.by_relation
    }

    /// Record counts per annotation file, sorted by file name.
    pub fn by_file(&self) -> &BTreeMap<String, usize> {
        &self.by_file
    }
}

impl fmt::Display for RecordSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} records from {} files ({} judged, {} excluded)",
            self.total,
            self.files(),
            self.judged,
            self.excluded
        )?;

        writeln!(f, "\ncategories:")?;
        for (category, count) in &self.by_category {
            writeln!(f, "  {category:<24} {count}")?;
        }

        writeln!(f, "\nrelations:")?;
        for (relation, count) in &self.by_relation {
            writeln!(f, "  {:<24} {count}", relation.label())?;
        }

        writeln!(f, "\nfiles:")?;
        for (file, count) in &self.by_file {
            writeln!(f, "  {file:<24} {count}")?;
        }

        Ok(())
    }
}
