//! Graph structure representations for annotated diagrams.
//!
//! This module provides the graph layers built on top of parsed annotation.
//! Each layer describes the same diagram from a different angle, and the
//! layers build on one another:
//!
//! - [`ElementGraph`]: one node per diagram element, with optional edges
//!   drawn from the relationships of the annotation file, plus grouping
//!   operations for describing content hierarchy.
//! - [`ConnectivityGraph`]: a directed graph of how elements are wired
//!   together by arrows and lines, seeded from an element graph.
//! - [`RstGraph`]: rhetorical structure, where relation nodes join the
//!   diagram elements they hold between.
//!
//! Node identity is the annotation identifier ([`Id`]); every graph keeps an
//! identifier-to-index map so callers never handle raw graph indices.

use std::fmt;

use thiserror::Error;

use scholia_core::{element::ElementKind, identifier::Id, relation::Relation};

mod connectivity;
mod element;
mod rst;

pub use connectivity::{
    ConnectionKind, ConnectivityEdge, ConnectivityGraph, UnknownConnectionKind,
};
pub use element::ElementGraph;
pub use rst::{RstEdge, RstGraph};

/// A node in an annotation graph.
///
/// # Variants
///
/// * `Element` - A diagram element carried over from the annotation file
/// * `Group` - A generated node standing for a group of elements
/// * `Relation` - A rhetorical relation holding between other nodes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A diagram element carried over from the annotation file.
    Element { id: Id, kind: ElementKind },

    /// A generated node standing for a group of elements.
    Group { id: Id },

    /// A rhetorical relation holding between other nodes.
    Relation { id: Id, relation: Relation },
}

impl Node {
    /// Returns the identifier of this node.
    pub fn id(&self) -> Id {
        match self {
            Node::Element { id, .. } | Node::Group { id } | Node::Relation { id, .. } => *id,
        }
    }

    /// Returns the element kind, for element nodes.
    pub fn element_kind(&self) -> Option<ElementKind> {
        match self {
            Node::Element { kind, .. } => Some(*kind),
            Node::Group { .. } | Node::Relation { .. } => None,
        }
    }

    /// Returns `true` for generated group nodes.
    pub fn is_group(&self) -> bool {
        matches!(self, Node::Group { .. })
    }

    /// Returns `true` for relation nodes.
    pub fn is_relation(&self) -> bool {
        matches!(self, Node::Relation { .. })
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.id(), f)
    }
}

/// Errors raised by graph construction and mutation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructureError {
    /// An operation referenced an identifier with no node in the graph.
    #[error("no node `{0}` in the graph")]
    UnknownNode(Id),

    /// Grouping requires at least two member elements.
    #[error("a group needs at least two members, got {0}")]
    GroupTooSmall(usize),

    /// A mononuclear relation takes exactly one nucleus.
    #[error("mononuclear relation `{relation}` takes exactly one nucleus, got {nuclei}")]
    MononuclearNuclei { relation: Relation, nuclei: usize },

    /// A mononuclear relation takes at least one satellite.
    #[error("mononuclear relation `{relation}` takes at least one satellite")]
    MissingSatellites { relation: Relation },

    /// A multinuclear relation takes at least two nuclei.
    #[error("multinuclear relation `{relation}` takes at least two nuclei, got {nuclei}")]
    MultinuclearNuclei { relation: Relation, nuclei: usize },

    /// A multinuclear relation takes no satellites.
    #[error("multinuclear relation `{relation}` takes no satellites")]
    UnexpectedSatellites { relation: Relation },
}
