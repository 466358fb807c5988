//! The full rhetorical relation inventory.
//!
//! Rhetorical Structure Theory names its relations after the discourse
//! function they describe. This module carries the complete inventory used
//! for discourse-structure annotation, including the classic relations and
//! the extensions for multimodal diagram content. Each relation has a
//! four-letter abbreviation accepted as input alongside the full name.
//!
//! The subset used for the semantic relation scheme lives in
//! [`taxonomy`](crate::taxonomy); every relation in that scheme maps onto a
//! member of this inventory.

use std::{fmt, str::FromStr};

use thiserror::Error;

/// Whether a relation holds between equal segments or a nucleus and its
/// satellites.
///
/// Mononuclear relations distinguish one central segment (the nucleus) from
/// the peripheral ones (the satellites). Multinuclear relations join segments
/// of equal prominence, so all participants are nuclei.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Nuclearity {
    Mono,
    Multi,
}

impl Nuclearity {
    /// Returns the short form used in relation listings.
    pub fn as_str(self) -> &'static str {
        match self {
            Nuclearity::Mono => "mono",
            Nuclearity::Multi => "multi",
        }
    }

    /// Returns true for mononuclear relations
    pub fn is_mono(self) -> bool {
        matches!(self, Nuclearity::Mono)
    }

    /// Returns true for multinuclear relations
    pub fn is_multi(self) -> bool {
        matches!(self, Nuclearity::Multi)
    }
}

impl fmt::Display for Nuclearity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known rhetorical relation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown rhetorical relation: {0}")]
pub struct UnknownRelation(pub String);

/// A rhetorical relation from the annotation inventory.
///
/// Relations are entered by annotators either by full name ("elaboration")
/// or by four-letter abbreviation ("elab"); both parse via [`FromStr`].
///
/// # Examples
///
/// ```
/// use scholia_core::relation::{Nuclearity, Relation};
///
/// let rel: Relation = "elab".parse().unwrap();
/// assert_eq!(rel, Relation::Elaboration);
/// assert_eq!(rel.name(), "elaboration");
/// assert_eq!(rel.nuclearity(), Nuclearity::Mono);
///
/// let joint: Relation = "joint".parse().unwrap();
/// assert!(joint.nuclearity().is_multi());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    Antithesis,
    Background,
    Circumstance,
    Concession,
    Condition,
    Elaboration,
    Enablement,
    Evaluation,
    Evidence,
    Interpretation,
    Justify,
    Means,
    Motivation,
    NonvolitionalCause,
    NonvolitionalResult,
    Otherwise,
    Preparation,
    Purpose,
    Restatement,
    Solutionhood,
    Summary,
    Unless,
    VolitionalCause,
    VolitionalResult,
    Contrast,
    Joint,
    List,
    Sequence,
    Identification,
    ClassAscription,
    PropertyAscription,
    Possession,
    Projection,
    Effect,
    Title,
}

impl Relation {
    /// All relations in the inventory, in listing order.
    pub const ALL: [Relation; 35] = [
        Relation::Antithesis,
        Relation::Background,
        Relation::Circumstance,
        Relation::Concession,
        Relation::Condition,
        Relation::Elaboration,
        Relation::Enablement,
        Relation::Evaluation,
        Relation::Evidence,
        Relation::Interpretation,
        Relation::Justify,
        Relation::Means,
        Relation::Motivation,
        Relation::NonvolitionalCause,
        Relation::NonvolitionalResult,
        Relation::Otherwise,
        Relation::Preparation,
        Relation::Purpose,
        Relation::Restatement,
        Relation::Solutionhood,
        Relation::Summary,
        Relation::Unless,
        Relation::VolitionalCause,
        Relation::VolitionalResult,
        Relation::Contrast,
        Relation::Joint,
        Relation::List,
        Relation::Sequence,
        Relation::Identification,
        Relation::ClassAscription,
        Relation::PropertyAscription,
        Relation::Possession,
        Relation::Projection,
        Relation::Effect,
        Relation::Title,
    ];

    /// Returns the four-letter abbreviation annotators may enter.
    pub fn abbreviation(self) -> &'static str {
        match self {
            Relation::Antithesis => "anti",
            Relation::Background => "back",
            Relation::Circumstance => "circ",
            Relation::Concession => "conc",
            Relation::Condition => "cond",
            Relation::Elaboration => "elab",
            Relation::Enablement => "enab",
            Relation::Evaluation => "eval",
            Relation::Evidence => "evid",
            Relation::Interpretation => "pret",
            Relation::Justify => "just",
            Relation::Means => "mean",
            Relation::Motivation => "moti",
            Relation::NonvolitionalCause => "nvoc",
            Relation::NonvolitionalResult => "nvor",
            Relation::Otherwise => "otws",
            Relation::Preparation => "prep",
            Relation::Purpose => "purp",
            Relation::Restatement => "rest",
            Relation::Solutionhood => "solu",
            Relation::Summary => "summ",
            Relation::Unless => "unls",
            Relation::VolitionalCause => "volc",
            Relation::VolitionalResult => "volr",
            Relation::Contrast => "cont",
            Relation::Joint => "join",
            Relation::List => "list",
            Relation::Sequence => "sequ",
            Relation::Identification => "iden",
            Relation::ClassAscription => "casc",
            Relation::PropertyAscription => "pasc",
            Relation::Possession => "poss",
            Relation::Projection => "proj",
            Relation::Effect => "effe",
            Relation::Title => "titl",
        }
    }

    /// Returns the full relation name.
    pub fn name(self) -> &'static str {
        match self {
            Relation::Antithesis => "antithesis",
            Relation::Background => "background",
            Relation::Circumstance => "circumstance",
            Relation::Concession => "concession",
            Relation::Condition => "condition",
            Relation::Elaboration => "elaboration",
            Relation::Enablement => "enablement",
            Relation::Evaluation => "evaluation",
            Relation::Evidence => "evidence",
            Relation::Interpretation => "interpretation",
            Relation::Justify => "justify",
            Relation::Means => "means",
            Relation::Motivation => "motivation",
            Relation::NonvolitionalCause => "nonvolitional-cause",
            Relation::NonvolitionalResult => "nonvolitional-result",
            Relation::Otherwise => "otherwise",
            Relation::Preparation => "preparation",
            Relation::Purpose => "purpose",
            Relation::Restatement => "restatement",
            Relation::Solutionhood => "solutionhood",
            Relation::Summary => "summary",
            Relation::Unless => "unless",
            Relation::VolitionalCause => "volitional-cause",
            Relation::VolitionalResult => "volitional-result",
            Relation::Contrast => "contrast",
            Relation::Joint => "joint",
            Relation::List => "list",
            Relation::Sequence => "sequence",
            Relation::Identification => "identification",
            Relation::ClassAscription => "class-ascription",
            Relation::PropertyAscription => "property-ascription",
            Relation::Possession => "possession",
            Relation::Projection => "projection",
            Relation::Effect => "effect",
            Relation::Title => "title",
        }
    }

    /// Returns whether the relation is mononuclear or multinuclear.
    pub fn nuclearity(self) -> Nuclearity {
        match self {
            Relation::Restatement
            | Relation::Contrast
            | Relation::Joint
            | Relation::List
            | Relation::Sequence => Nuclearity::Multi,
            _ => Nuclearity::Mono,
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Relation {
    type Err = UnknownRelation;

    /// Accepts either a full relation name or its four-letter abbreviation,
    /// case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Relation::ALL
            .into_iter()
            .find(|rel| rel.name() == needle || rel.abbreviation() == needle)
            .ok_or_else(|| UnknownRelation(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_inventory_size() {
        assert_eq!(Relation::ALL.len(), 35);
    }

    #[test]
    fn test_abbreviations_are_unique() {
        let abbrevs: HashSet<_> = Relation::ALL.iter().map(|r| r.abbreviation()).collect();
        assert_eq!(abbrevs.len(), Relation::ALL.len());
    }

    #[test]
    fn test_names_are_unique() {
        let names: HashSet<_> = Relation::ALL.iter().map(|r| r.name()).collect();
        assert_eq!(names.len(), Relation::ALL.len());
    }

    #[test]
    fn test_from_str_accepts_name_and_abbreviation() {
        for rel in Relation::ALL {
            assert_eq!(rel.name().parse::<Relation>(), Ok(rel));
            assert_eq!(rel.abbreviation().parse::<Relation>(), Ok(rel));
        }
    }

    #[test]
    fn test_from_str_is_case_insensitive() {
        assert_eq!("ELAB".parse::<Relation>(), Ok(Relation::Elaboration));
        assert_eq!("Joint".parse::<Relation>(), Ok(Relation::Joint));
        assert_eq!(" sequence ".parse::<Relation>(), Ok(Relation::Sequence));
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        let err = "cause".parse::<Relation>().unwrap_err();
        assert_eq!(err, UnknownRelation("cause".to_string()));
    }

    #[test]
    fn test_multinuclear_relations() {
        let multi: Vec<_> = Relation::ALL
            .into_iter()
            .filter(|r| r.nuclearity().is_multi())
            .collect();
        assert_eq!(
            multi,
            vec![
                Relation::Restatement,
                Relation::Contrast,
                Relation::Joint,
                Relation::List,
                Relation::Sequence,
            ],
        );
    }

    #[test]
    fn test_display_uses_full_name() {
        assert_eq!(
            Relation::NonvolitionalCause.to_string(),
            "nonvolitional-cause"
        );
        assert_eq!(Relation::PropertyAscription.to_string(), "property-ascription");
    }
}
