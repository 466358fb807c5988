//! The rhetorical structure layer: relations over diagram elements.
//!
//! An [`RstGraph`] starts from the diagram elements of an [`ElementGraph`]
//! (groups are left out) and grows relation nodes as annotation proceeds.
//! Every relation becomes its own node, joined to its participants:
//! satellites point at the relation, and the relation points at its nuclei.
//! A relation node can itself act as a nucleus or satellite of a later
//! relation, which is how complete rhetorical structures build up.
//!
//! Relation node identifiers compose from the participants: a mononuclear
//! relation with nucleus `B0` and satellites `T0`, `T1` becomes `B0-T0+T1`;
//! a multinuclear relation over `B0` and `B1` becomes `B0+B1`.

use std::{collections::HashMap, fmt};

use log::debug;
use petgraph::{
    graph::{DiGraph, NodeIndex},
    visit::EdgeRef,
};

use scholia_core::{identifier::Id, relation::{Nuclearity, Relation}};

use super::{ElementGraph, Node, StructureError};

/// The role an edge plays in a rhetorical relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RstEdge {
    /// From a satellite to the relation it supports.
    Satellite,
    /// From a relation to one of its nuclei.
    Nucleus,
}

impl RstEdge {
    /// Returns the role name.
    pub fn as_str(self) -> &'static str {
        match self {
            RstEdge::Satellite => "satellite",
            RstEdge::Nucleus => "nucleus",
        }
    }
}

impl fmt::Display for RstEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A directed graph of rhetorical relations over diagram elements.
///
/// # Examples
///
/// ```
/// use scholia::{config::GraphConfig, structure::{ElementGraph, RstGraph}};
/// use scholia_core::{identifier::Id, relation::Relation};
/// use scholia_parser::ai2d::Annotation;
///
/// let source = r#"{
///     "blobs": {"B0": {"id": "B0", "polygon": [[0, 0], [4, 0], [2, 3]]}},
///     "text": {"T0": {"id": "T0", "rectangle": [[6, 0], [9, 2]], "value": "leaf"}}
/// }"#;
/// let annotation: Annotation = source.parse().unwrap();
/// let elements = ElementGraph::from_annotation(&annotation, &GraphConfig::default());
///
/// let mut rst = RstGraph::from_element_graph(&elements);
/// let relation = rst
///     .add_relation(Relation::Identification, &["B0".into()], &["T0".into()])
///     .unwrap();
/// assert_eq!(relation, Id::from("B0-T0"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct RstGraph {
    graph: DiGraph<Node, RstEdge>,
    indices: HashMap<Id, NodeIndex>,
}

impl RstGraph {
    /// Seed a rhetorical structure graph from an element graph.
    ///
    /// Every diagram element becomes a node; group nodes are not part of
    /// rhetorical structure and are left out. No edges are carried over.
    pub fn from_element_graph(element_graph: &ElementGraph) -> Self {
        let mut rst = Self::default();
        for node in element_graph.nodes() {
            if node.is_group() {
                continue;
            }
            rst.insert_node(node.clone());
        }

        debug!(nodes = rst.node_count(); "Seeded rhetorical structure graph");

        rst
    }

    /// Returns the underlying petgraph graph.
    pub fn graph(&self) -> &DiGraph<Node, RstEdge> {
        &self.graph
    }

    /// Returns the number of nodes in the graph.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of edges in the graph.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Returns `true` when the graph holds a node with this identifier.
    pub fn contains(&self, id: Id) -> bool {
        self.indices.contains_key(&id)
    }

    /// Look up a node by identifier.
    pub fn node(&self, id: Id) -> Option<&Node> {
        self.indices.get(&id).map(|idx| &self.graph[*idx])
    }

    /// Iterate over all nodes in the graph.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.graph.node_indices().map(|idx| &self.graph[idx])
    }

    /// Iterate over the relation nodes in the graph.
    pub fn relations(&self) -> impl Iterator<Item = &Node> {
        self.nodes().filter(|node| node.is_relation())
    }

    /// Iterate over all edges as identifier pairs with their roles.
    pub fn edges(&self) -> impl Iterator<Item = (Id, Id, RstEdge)> + '_ {
        self.graph.edge_references().map(|edge| {
            (
                self.graph[edge.source()].id(),
                self.graph[edge.target()].id(),
                *edge.weight(),
            )
        })
    }

    /// Returns the role of the edge running from `a` to `b`, if any.
    pub fn edge_role(&self, a: Id, b: Id) -> Option<RstEdge> {
        let a_idx = self.indices.get(&a)?;
        let b_idx = self.indices.get(&b)?;
        let edge = self.graph.find_edge(*a_idx, *b_idx)?;
        self.graph.edge_weight(edge).copied()
    }

    /// Add a rhetorical relation over nodes of the graph.
    ///
    /// Mononuclear relations take exactly one nucleus and one or more
    /// satellites; multinuclear relations take two or more nuclei and no
    /// satellites. The relation becomes a node whose identifier composes
    /// from the participants, with satellite edges pointing at it and
    /// nucleus edges leaving it. Participants may be diagram elements or
    /// previously added relations.
    ///
    /// Adding the same relation over the same participants again reuses
    /// the existing node.
    ///
    /// # Errors
    ///
    /// Returns an arity error matching the relation's nuclearity, or
    /// [`StructureError::UnknownNode`] when a participant is not in the
    /// graph. Nothing is added on error.
    pub fn add_relation(
        &mut self,
        relation: Relation,
        nuclei: &[Id],
        satellites: &[Id],
    ) -> Result<Id, StructureError> {
        match relation.nuclearity() {
            Nuclearity::Mono => {
                if nuclei.len() != 1 {
                    return Err(StructureError::MononuclearNuclei {
                        relation,
                        nuclei: nuclei.len(),
                    });
                }
                if satellites.is_empty() {
                    return Err(StructureError::MissingSatellites { relation });
                }
            }
            Nuclearity::Multi => {
                if nuclei.len() < 2 {
                    return Err(StructureError::MultinuclearNuclei {
                        relation,
                        nuclei: nuclei.len(),
                    });
                }
                if !satellites.is_empty() {
                    return Err(StructureError::UnexpectedSatellites { relation });
                }
            }
        }
        for &id in nuclei.iter().chain(satellites) {
            if !self.indices.contains_key(&id) {
                return Err(StructureError::UnknownNode(id));
            }
        }

        let relation_id = match relation.nuclearity() {
            Nuclearity::Mono => compose_id(nuclei[0], satellites),
            Nuclearity::Multi => join_ids(nuclei),
        };
        let relation_idx = match self.indices.get(&relation_id) {
            Some(idx) => *idx,
            None => self.insert_node(Node::Relation {
                id: relation_id,
                relation,
            }),
        };

        for &satellite in satellites {
            let satellite_idx = self.indices[&satellite];
            self.graph
                .update_edge(satellite_idx, relation_idx, RstEdge::Satellite);
        }
        for &nucleus in nuclei {
            let nucleus_idx = self.indices[&nucleus];
            self.graph
                .update_edge(relation_idx, nucleus_idx, RstEdge::Nucleus);
        }

        debug!(
            relation = relation.name(),
            id = relation_id.to_string();
            "Added rhetorical relation"
        );

        Ok(relation_id)
    }

    fn insert_node(&mut self, node: Node) -> NodeIndex {
        let id = node.id();
        let idx = self.graph.add_node(node);
        self.indices.insert(id, idx);
        idx
    }
}

/// Compose a mononuclear relation identifier: `N-S1+S2`.
fn compose_id(nucleus: Id, satellites: &[Id]) -> Id {
    Id::new(&format!("{nucleus}-{}", joined(satellites)))
}

/// Compose a multinuclear relation identifier: `N1+N2`.
fn join_ids(nuclei: &[Id]) -> Id {
    Id::new(&joined(nuclei))
}

fn joined(ids: &[Id]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("+")
}
