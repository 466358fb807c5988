//! The semantic relation scheme and participant roles.
//!
//! Diagram annotation pairs two elements and asks which rhetorical relation
//! holds between them. Rather than the full inventory in
//! [`relation`](crate::relation), pairwise annotation uses a compact scheme
//! of six relations plus an escape label for invalid pairs:
//!
//! | Relation            | Roles                                               |
//! |---------------------|-----------------------------------------------------|
//! | restatement         | both elements act as nuclei                         |
//! | identification      | satellite identifies, nucleus is identified         |
//! | effect              | satellite is the cause, nucleus the affected element|
//! | sequence            | both elements act as nuclei                         |
//! | property-ascription | satellite supplies a property, nucleus is described |
//! | title               | satellite is the title, nucleus the titled content  |
//! | none                | roles unassigned; the pair is excluded from corpora |
//!
//! [`SemanticRelation`] codes the scheme, [`RoleScheme`] the canonical role
//! assignment of each label, and [`Role`] the nuclearity value given to a
//! single participating element.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::relation::Relation;

/// Error returned when a string names no relation in the scheme.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown semantic relation: {0}")]
pub struct UnknownSemanticRelation(pub String);

/// Error returned when a string names no participant role.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown participant role: {0}")]
pub struct UnknownRole(pub String);

/// A relation label from the semantic relation scheme.
///
/// The scheme covers the rhetorical relations observed between pairs of
/// elements in primary-school science diagrams. [`SemanticRelation::None`]
/// is the escape label: it marks a pair the annotator judged not to stand in
/// any rhetorical relation, and such pairs are dropped when a corpus is
/// finalized.
///
/// # Examples
///
/// ```
/// use scholia_core::taxonomy::{RoleScheme, SemanticRelation};
///
/// let rel: SemanticRelation = "property-ascription".parse().unwrap();
/// assert_eq!(rel, SemanticRelation::PropertyAscription);
/// assert!(matches!(rel.role_scheme(), RoleScheme::Asymmetric { .. }));
///
/// assert!(SemanticRelation::None.is_excluded_from_corpus());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SemanticRelation {
    Restatement,
    Identification,
    Effect,
    Sequence,
    PropertyAscription,
    Title,
    None,
}

/// The canonical role assignment of a relation label.
///
/// Symmetric relations give every participant the nucleus role. Asymmetric
/// relations name what the satellite and the nucleus each stand for, in the
/// wording annotation guidelines use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleScheme {
    /// Both elements act as nuclei.
    Symmetric,
    /// One element is the satellite, the other the nucleus.
    Asymmetric {
        satellite: &'static str,
        nucleus: &'static str,
    },
    /// No roles are assigned; used only by the `none` label.
    Unassigned,
}

impl SemanticRelation {
    /// All labels in the scheme, in documentation order.
    pub const ALL: [SemanticRelation; 7] = [
        SemanticRelation::Restatement,
        SemanticRelation::Identification,
        SemanticRelation::Effect,
        SemanticRelation::Sequence,
        SemanticRelation::PropertyAscription,
        SemanticRelation::Title,
        SemanticRelation::None,
    ];

    /// Returns the label string used in annotation files and documentation.
    pub fn label(self) -> &'static str {
        match self {
            SemanticRelation::Restatement => "restatement",
            SemanticRelation::Identification => "identification",
            SemanticRelation::Effect => "effect",
            SemanticRelation::Sequence => "sequence",
            SemanticRelation::PropertyAscription => "property-ascription",
            SemanticRelation::Title => "title",
            SemanticRelation::None => "none",
        }
    }

    /// Returns the definition presented to annotators.
    pub fn definition(self) -> &'static str {
        match self {
            SemanticRelation::Restatement => {
                "A multinuclear relation holding between two entities that could \
                 act as a substitute for each other, such as the name of an \
                 entity and its visualisation."
            }
            SemanticRelation::Identification => {
                "A short text segment, such as a single noun or a noun group, \
                 which identifies an entity or its part(s). A common example \
                 would be a label for a part of an entity."
            }
            SemanticRelation::Effect => {
                "A generic mononuclear relation for describing processes that \
                 take place between entities, which are often reinforced using \
                 lines or arrows. The affected entity acts as the nucleus, while \
                 the origin of the effect acts as the satellite."
            }
            SemanticRelation::Sequence => {
                "A multinuclear relation indicating a temporal or spatial \
                 sequence holding between entities."
            }
            SemanticRelation::PropertyAscription => {
                "A mononuclear relation ascribing a property to an entity or its \
                 part(s). The element supplying the property acts as the \
                 satellite, while the described element acts as the nucleus."
            }
            SemanticRelation::Title => {
                "A text segment acting as the title for the entire diagram or \
                 its parts."
            }
            SemanticRelation::None => {
                "No rhetorical relation holds between the elements. Flags a pair \
                 judged invalid, which is excluded from the final corpus."
            }
        }
    }

    /// Returns the canonical role assignment for this label.
    pub fn role_scheme(self) -> RoleScheme {
        match self {
            SemanticRelation::Restatement | SemanticRelation::Sequence => RoleScheme::Symmetric,
            SemanticRelation::Identification => RoleScheme::Asymmetric {
                satellite: "identifying label",
                nucleus: "identified element",
            },
            SemanticRelation::Effect => RoleScheme::Asymmetric {
                satellite: "cause",
                nucleus: "affected element",
            },
            SemanticRelation::PropertyAscription => RoleScheme::Asymmetric {
                satellite: "property source",
                nucleus: "described element",
            },
            SemanticRelation::Title => RoleScheme::Asymmetric {
                satellite: "title",
                nucleus: "titled diagram or part",
            },
            SemanticRelation::None => RoleScheme::Unassigned,
        }
    }

    /// Returns the full-inventory relation this label corresponds to.
    ///
    /// The `none` label has no counterpart in the inventory.
    pub fn relation(self) -> Option<Relation> {
        match self {
            SemanticRelation::Restatement => Some(Relation::Restatement),
            SemanticRelation::Identification => Some(Relation::Identification),
            SemanticRelation::Effect => Some(Relation::Effect),
            SemanticRelation::Sequence => Some(Relation::Sequence),
            SemanticRelation::PropertyAscription => Some(Relation::PropertyAscription),
            SemanticRelation::Title => Some(Relation::Title),
            SemanticRelation::None => None,
        }
    }

    /// Returns true when both participants take the nucleus role.
    pub fn is_symmetric(self) -> bool {
        matches!(self.role_scheme(), RoleScheme::Symmetric)
    }

    /// Returns true when pairs carrying this label are dropped from final
    /// corpora.
    pub fn is_excluded_from_corpus(self) -> bool {
        matches!(self, SemanticRelation::None)
    }
}

impl fmt::Display for SemanticRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SemanticRelation {
    type Err = UnknownSemanticRelation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        SemanticRelation::ALL
            .into_iter()
            .find(|rel| rel.label() == needle)
            .ok_or_else(|| UnknownSemanticRelation(s.to_string()))
    }
}

/// The nuclearity role of one element participating in a relation.
///
/// Annotators may spell roles out in full or abbreviate them; [`FromStr`]
/// accepts `n`, `nuc` and `nucleus` for the nucleus role, and `s`, `sat` and
/// `satellite` for the satellite role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Nucleus,
    Satellite,
}

impl Role {
    /// Returns the full role name.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Nucleus => "nucleus",
            Role::Satellite => "satellite",
        }
    }

    /// Returns the other role.
    pub fn opposite(self) -> Role {
        match self {
            Role::Nucleus => Role::Satellite,
            Role::Satellite => Role::Nucleus,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "n" | "nuc" | "nucleus" => Ok(Role::Nucleus),
            "s" | "sat" | "satellite" => Ok(Role::Satellite),
            _ => Err(UnknownRole(s.to_string())),
        }
    }
}
