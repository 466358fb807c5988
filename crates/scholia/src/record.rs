//! Relation records: the unit of semantic-relation annotation work.
//!
//! A [`RelationRecord`] flattens one AI2D relationship into a standalone
//! row: the file it came from, the participants with their outlines, and an
//! optional [`RstJudgement`] recording which rhetorical relation an
//! annotator assigned to the pair, with nucleus and satellite roles per
//! participant. Record sets travel as JSON Lines (see
//! [`export`](crate::export)), so annotation can be interrupted and picked
//! up later with unjudged records still in place.
//!
//! Judgements are validated against the role scheme of their label:
//!
//! - `none` leaves both roles unassigned and excludes the record from the
//!   final corpus,
//! - symmetric relations make both participants nuclei,
//! - asymmetric relations take exactly one nucleus and one satellite,
//! - every other judged record must carry both roles.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use scholia_core::{
    identifier::Id,
    taxonomy::{Role, RoleScheme, SemanticRelation},
};
use scholia_parser::ai2d::{Annotation, Category, Outline, Relationship};

// =============================================================================
// Records
// =============================================================================

/// One AI2D relationship flattened for annotation work.
///
/// # Examples
///
/// ```
/// use scholia::record::{RelationRecord, RstJudgement};
/// use scholia_core::identifier::Id;
/// use scholia_core::taxonomy::{Role, SemanticRelation};
/// use scholia_parser::ai2d::Annotation;
///
/// let source = r#"{
///     "blobs": {"B0": {"id": "B0", "polygon": [[0, 0], [4, 0], [2, 3]]}},
///     "text": {"T0": {"id": "T0", "rectangle": [[6, 0], [9, 2]], "value": "leaf"}},
///     "relationships": {
///         "R0": {"id": "R0", "category": "intraObjectLabel",
///                "origin": "T0", "destination": "B0"}
///     }
/// }"#;
/// let annotation: Annotation = source.parse().unwrap();
/// let relationship = &annotation.relationships()[&Id::new("R0")];
///
/// let mut record = RelationRecord::from_relationship("0.png.json", relationship, &annotation);
/// assert_eq!(record.outlines().len(), 2);
///
/// record.set_judgement(
///     RstJudgement::new(SemanticRelation::Identification)
///         .with_roles(Role::Satellite, Role::Nucleus),
/// );
/// assert!(record.violations().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationRecord {
    file_name: String,
    relation_id: Id,
    category: Category,
    origin: Id,
    destination: Id,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    connector: Option<Id>,
    #[serde(default)]
    directionality: bool,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    outlines: IndexMap<Id, Outline>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    judgement: Option<RstJudgement>,
}

impl RelationRecord {
    /// Flatten one relationship of an annotation file into a record.
    ///
    /// Outlines are collected for the origin, destination, and connector,
    /// in that order; participants without an outline representation
    /// (arrowheads, containers) are left out.
    pub fn from_relationship(
        file_name: impl Into<String>,
        relationship: &Relationship,
        annotation: &Annotation,
    ) -> Self {
        let mut outlines = IndexMap::new();
        let participants = [
            Some(relationship.origin()),
            Some(relationship.destination()),
            relationship.connector(),
        ];
        for id in participants.into_iter().flatten() {
            if let Some(outline) = annotation.outline(id) {
                outlines.insert(id, outline);
            }
        }

        Self {
            file_name: file_name.into(),
            relation_id: relationship.id(),
            category: relationship.category().clone(),
            origin: relationship.origin(),
            destination: relationship.destination(),
            connector: relationship.connector(),
            directionality: relationship.has_directionality(),
            outlines,
            judgement: None,
        }
    }

    /// The annotation file the relationship came from.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// The relationship identifier.
    pub fn relation_id(&self) -> Id {
        self.relation_id
    }

    /// The AI2D relationship category.
    pub fn category(&self) -> &Category {
        &self.category
    }

    pub fn origin(&self) -> Id {
        self.origin
    }

    pub fn destination(&self) -> Id {
        self.destination
    }

    pub fn connector(&self) -> Option<Id> {
        self.connector
    }

    /// Whether the relationship is directional.
    pub fn has_directionality(&self) -> bool {
        self.directionality
    }

    /// Participant outlines, keyed by identifier.
    pub fn outlines(&self) -> &IndexMap<Id, Outline> {
        &self.outlines
    }

    /// Look up the outline of one participant.
    pub fn outline(&self, id: Id) -> Option<&Outline> {
        self.outlines.get(&id)
    }

    /// The rhetorical judgement, when the record has been annotated.
    pub fn judgement(&self) -> Option<&RstJudgement> {
        self.judgement.as_ref()
    }

    /// Record a rhetorical judgement for this pair.
    pub fn set_judgement(&mut self, judgement: RstJudgement) {
        self.judgement = Some(judgement);
    }

    /// Returns `true` when the record has been annotated.
    pub fn is_judged(&self) -> bool {
        self.judgement.is_some()
    }

    /// Returns `true` when the record is excluded from the final corpus,
    /// which is the case for pairs judged `none`.
    pub fn is_excluded(&self) -> bool {
        self.judgement
            .as_ref()
            .is_some_and(|judgement| judgement.relation().is_excluded_from_corpus())
    }

    /// Check the judgement of this record against its role scheme.
    ///
    /// Unjudged records have nothing to check and return no violations.
    pub fn violations(&self) -> Vec<JudgementViolation> {
        self.judgement
            .as_ref()
            .map(RstJudgement::violations)
            .unwrap_or_default()
    }
}

// =============================================================================
// Judgements
// =============================================================================

/// A rhetorical judgement over one record: the assigned relation and the
/// nuclearity role of each participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RstJudgement {
    relation: SemanticRelation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    origin_role: Option<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    destination_role: Option<Role>,
}

impl RstJudgement {
    /// Create a judgement with no roles assigned yet.
    pub fn new(relation: SemanticRelation) -> Self {
        Self {
            relation,
            origin_role: None,
            destination_role: None,
        }
    }

    /// Assign the participant roles.
    pub fn with_roles(mut self, origin: Role, destination: Role) -> Self {
        self.origin_role = Some(origin);
        self.destination_role = Some(destination);
        self
    }

    /// The assigned semantic relation.
    pub fn relation(&self) -> SemanticRelation {
        self.relation
    }

    /// The role of the origin participant, when assigned.
    pub fn origin_role(&self) -> Option<Role> {
        self.origin_role
    }

    /// The role of the destination participant, when assigned.
    pub fn destination_role(&self) -> Option<Role> {
        self.destination_role
    }

    fn role(&self, side: Participant) -> Option<Role> {
        match side {
            Participant::Origin => self.origin_role,
            Participant::Destination => self.destination_role,
        }
    }

    /// Check this judgement against the role scheme of its relation.
    pub fn violations(&self) -> Vec<JudgementViolation> {
        let mut violations = Vec::new();

        match self.relation.role_scheme() {
            RoleScheme::Unassigned => {
                if self.origin_role.is_some() || self.destination_role.is_some() {
                    violations.push(JudgementViolation::RolesOnNone {
                        relation: self.relation,
                    });
                }
            }
            RoleScheme::Symmetric => {
                for side in [Participant::Origin, Participant::Destination] {
                    match self.role(side) {
                        None => violations.push(JudgementViolation::MissingRole {
                            relation: self.relation,
                            side,
                        }),
                        Some(Role::Satellite) => {
                            violations.push(JudgementViolation::SatelliteOnSymmetric {
                                relation: self.relation,
                                side,
                            });
                        }
                        Some(Role::Nucleus) => {}
                    }
                }
            }
            RoleScheme::Asymmetric { .. } => {
                for side in [Participant::Origin, Participant::Destination] {
                    if self.role(side).is_none() {
                        violations.push(JudgementViolation::MissingRole {
                            relation: self.relation,
                            side,
                        });
                    }
                }
                if let (Some(origin), Some(destination)) =
                    (self.origin_role, self.destination_role)
                    && origin == destination
                {
                    violations.push(JudgementViolation::EqualRolesOnAsymmetric {
                        relation: self.relation,
                        role: origin,
                    });
                }
            }
        }

        violations
    }
}

// =============================================================================
// Validation
// =============================================================================

/// One side of a relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Participant {
    Origin,
    Destination,
}

impl Participant {
    pub fn as_str(self) -> &'static str {
        match self {
            Participant::Origin => "origin",
            Participant::Destination => "destination",
        }
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A judgement that contradicts the role scheme of its relation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JudgementViolation {
    /// The `none` label leaves both roles unassigned.
    #[error("`{relation}` flags an invalid pair and takes no roles, but roles are assigned")]
    RolesOnNone { relation: SemanticRelation },

    /// A judged record is missing a participant role.
    #[error("`{relation}` is judged but the {side} role is missing")]
    MissingRole {
        relation: SemanticRelation,
        side: Participant,
    },

    /// A symmetric relation assigns the nucleus role to both participants.
    #[error("`{relation}` makes both participants nuclei, but the {side} is a satellite")]
    SatelliteOnSymmetric {
        relation: SemanticRelation,
        side: Participant,
    },

    /// An asymmetric relation takes one nucleus and one satellite.
    #[error("`{relation}` takes one nucleus and one satellite, but both participants are marked {role}")]
    EqualRolesOnAsymmetric {
        relation: SemanticRelation,
        role: Role,
    },
}

/// A violation located within a record set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordViolation {
    index: usize,
    file_name: String,
    relation_id: Id,
    violation: JudgementViolation,
}

impl RecordViolation {
    /// Zero-based position of the offending record in the set.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The annotation file the record came from.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// The relationship identifier of the offending record.
    pub fn relation_id(&self) -> Id {
        self.relation_id
    }

    /// The violated rule.
    pub fn violation(&self) -> &JudgementViolation {
        &self.violation
    }
}

impl fmt::Display for RecordViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "record {} ({} in {}): {}",
            self.index, self.relation_id, self.file_name, self.violation
        )
    }
}

/// Check every judged record of a set against the role schemes.
///
/// Unjudged records are skipped; annotation in progress is not a violation.
pub fn validate_records<'a>(
    records: impl IntoIterator<Item = &'a RelationRecord>,
) -> Vec<RecordViolation> {
    records
        .into_iter()
        .enumerate()
        .flat_map(|(index, record)| {
            record
                .violations()
                .into_iter()
                .map(move |violation| RecordViolation {
                    index,
                    file_name: record.file_name().to_string(),
                    relation_id: record.relation_id(),
                    violation,
                })
        })
        .collect()
}
