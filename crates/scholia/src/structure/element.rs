//! The element graph layer: diagram elements, relationship edges, grouping.
//!
//! An [`ElementGraph`] holds one node per diagram element drawn from an
//! annotation file. Edges come from the file's relationships, routed through
//! connector elements where the annotation names one. On top of that, the
//! grouping operations describe the content hierarchy of the diagram: sets
//! of elements join under generated group nodes (or under the image constant
//! when it takes part), and nodes can carry a free-form macro-group label.
//!
//! # Connector routing
//!
//! Relationships name an `origin` and a `destination`, and optionally a
//! `connector` (the arrow or line drawn between them). Edges follow the
//! wiring of the drawn diagram:
//!
//! - `arrowHeadTail` relationships link an arrow to its head and record the
//!   pairing for later routing.
//! - A relationship with a connector links origin—connector, then head of
//!   the connector—destination when the connector has a paired head, or
//!   connector—destination when it does not.
//! - A relationship whose connector field is present but empty marks a
//!   retracted connector and contributes no edges.
//! - A relationship without a connector field links origin—destination.

use std::collections::HashMap;

use log::debug;
use petgraph::{
    graph::{NodeIndex, UnGraph},
    visit::EdgeRef,
};
use rand::RngExt;

use scholia_core::{element::ElementKind, identifier::Id};
use scholia_parser::ai2d::{Annotation, Relationship};

use super::{Node, StructureError};
use crate::config::GraphConfig;

/// Characters used for generated group identifiers.
const GROUP_ID_CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Length of generated group identifiers.
const GROUP_ID_LEN: usize = 6;

/// An undirected graph of diagram elements and their grouping structure.
///
/// Node identity is the annotation identifier; the graph keeps an
/// identifier-to-index map so callers address nodes by [`Id`] throughout.
///
/// # Examples
///
/// ```
/// use scholia::{config::GraphConfig, structure::ElementGraph};
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
///
/// let graph = ElementGraph::from_annotation(&annotation, &GraphConfig::default());
/// assert_eq!(graph.node_count(), 2);
/// assert!(graph.contains_edge("T0".into(), "B0".into()));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ElementGraph {
    graph: UnGraph<Node, ()>,
    indices: HashMap<Id, NodeIndex>,
    // Arrow identifier to paired arrowhead, from arrowHeadTail relationships.
    arrow_heads: HashMap<Id, Id>,
    macro_groups: HashMap<Id, String>,
}

impl ElementGraph {
    /// Build an element graph from parsed annotation.
    ///
    /// Every diagram element becomes a node, except arrowheads, which are
    /// left out unless [`GraphConfig::include_arrowheads`] is set; the arrow
    /// itself stands for the connection. When
    /// [`GraphConfig::include_edges`] is set, the relationships of the file
    /// are drawn as edges in file order, following the routing rules in the
    /// [module documentation](self).
    pub fn from_annotation(annotation: &Annotation, config: &GraphConfig) -> Self {
        let mut element_graph = Self::default();

        for (id, kind) in annotation.elements() {
            if kind == ElementKind::ArrowHead && !config.include_arrowheads() {
                continue;
            }
            element_graph.insert_node(Node::Element { id, kind });
        }

        if config.include_edges() {
            for relationship in annotation.relationships().values() {
                element_graph.insert_relationship(relationship, annotation);
            }
        }

        debug!(
            nodes = element_graph.node_count(),
            edges = element_graph.edge_count();
            "Built element graph"
        );

        element_graph
    }

    /// Returns the underlying petgraph graph.
    pub fn graph(&self) -> &UnGraph<Node, ()> {
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

    /// Iterate over all edges as identifier pairs, in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (Id, Id)> + '_ {
        self.graph
            .edge_references()
            .map(|edge| (self.graph[edge.source()].id(), self.graph[edge.target()].id()))
    }

    /// Returns `true` when an edge joins the two identifiers.
    pub fn contains_edge(&self, a: Id, b: Id) -> bool {
        match (self.indices.get(&a), self.indices.get(&b)) {
            (Some(a_idx), Some(b_idx)) => self.graph.find_edge(*a_idx, *b_idx).is_some(),
            _ => false,
        }
    }

    /// Returns the arrowhead paired with an arrow, when the annotation
    /// declared an `arrowHeadTail` relationship for it.
    pub fn paired_head(&self, arrow: Id) -> Option<Id> {
        self.arrow_heads.get(&arrow).copied()
    }

    /// Returns the macro-group label of a node, when one has been assigned.
    pub fn macro_group(&self, id: Id) -> Option<&str> {
        self.macro_groups.get(&id).map(String::as_str)
    }

    /// Group elements under a new node.
    ///
    /// Creates a generated group node and joins every member to it,
    /// returning the new group identifier. When one of the members is the
    /// image constant, no node is created: the remaining members attach to
    /// the image constant directly and `None` is returned.
    ///
    /// # Errors
    ///
    /// Returns [`StructureError::GroupTooSmall`] for fewer than two members
    /// and [`StructureError::UnknownNode`] when a member is not in the
    /// graph.
    pub fn group(&mut self, members: &[Id]) -> Result<Option<Id>, StructureError> {
        if members.len() < 2 {
            return Err(StructureError::GroupTooSmall(members.len()));
        }
        for &member in members {
            self.index_of(member)?;
        }

        let image_consts: Vec<NodeIndex> = members
            .iter()
            .filter_map(|member| {
                let idx = self.indices[member];
                (self.graph[idx].element_kind() == Some(ElementKind::ImageConst)).then_some(idx)
            })
            .collect();

        if !image_consts.is_empty() {
            // The image constant already stands for the whole diagram, so
            // the members hang off it instead of a generated node.
            for &image_const in &image_consts {
                for &member in members {
                    let member_idx = self.indices[&member];
                    if member_idx != image_const {
                        self.graph.update_edge(member_idx, image_const, ());
                    }
                }
            }
            debug!(members = members.len(); "Grouped elements under the image constant");
            return Ok(None);
        }

        let group_id = self.generate_group_id();
        let group_idx = self.insert_node(Node::Group { id: group_id });
        for &member in members {
            let member_idx = self.indices[&member];
            self.graph.update_edge(member_idx, group_idx, ());
        }

        debug!(group = group_id.to_string(), members = members.len(); "Grouped elements");
        Ok(Some(group_id))
    }

    /// Assign a macro-group label to a set of nodes.
    ///
    /// Macro groups describe the diagram type a set of elements forms, such
    /// as a cycle or a cross-section. The label is free-form.
    ///
    /// # Errors
    ///
    /// Returns [`StructureError::UnknownNode`] when a member is not in the
    /// graph.
    pub fn set_macro_group(
        &mut self,
        members: &[Id],
        label: impl Into<String>,
    ) -> Result<(), StructureError> {
        for &member in members {
            self.index_of(member)?;
        }
        let label = label.into();
        for &member in members {
            self.macro_groups.insert(member, label.clone());
        }
        Ok(())
    }

    /// Remove nodes and their incident edges from the graph.
    ///
    /// # Errors
    ///
    /// Returns [`StructureError::UnknownNode`] when an identifier is not in
    /// the graph; nothing is removed in that case.
    pub fn remove_nodes(&mut self, ids: &[Id]) -> Result<(), StructureError> {
        let mut indices = Vec::with_capacity(ids.len());
        for &id in ids {
            indices.push(self.index_of(id)?);
        }

        // Removal swaps the last node into the freed slot, so remove in
        // descending index order to keep the remaining indices valid.
        indices.sort_unstable_by(|a, b| b.cmp(a));
        indices.dedup();
        for idx in indices {
            self.graph.remove_node(idx);
        }
        self.reindex();

        Ok(())
    }

    /// Remove every edge incident to the named nodes, keeping the nodes.
    ///
    /// # Errors
    ///
    /// Returns [`StructureError::UnknownNode`] when an identifier is not in
    /// the graph; nothing is removed in that case.
    pub fn detach_nodes(&mut self, ids: &[Id]) -> Result<(), StructureError> {
        for &id in ids {
            self.index_of(id)?;
        }
        for &id in ids {
            let idx = self.indices[&id];
            while let Some(edge) = self.graph.edges(idx).next().map(|edge| edge.id()) {
                self.graph.remove_edge(edge);
            }
        }
        Ok(())
    }

    fn index_of(&self, id: Id) -> Result<NodeIndex, StructureError> {
        self.indices
            .get(&id)
            .copied()
            .ok_or(StructureError::UnknownNode(id))
    }

    fn insert_node(&mut self, node: Node) -> NodeIndex {
        let id = node.id();
        let idx = self.graph.add_node(node);
        self.indices.insert(id, idx);
        idx
    }

    /// Draw the edges contributed by one relationship.
    fn insert_relationship(&mut self, relationship: &Relationship, annotation: &Annotation) {
        if relationship.category().is_arrow_head_tail() {
            self.insert_edge(relationship.origin(), relationship.destination(), annotation);
            self.arrow_heads
                .insert(relationship.origin(), relationship.destination());
            return;
        }

        match relationship.connector() {
            Some(connector) => {
                // Route through the connector; when the connector has a
                // paired head, the edge lands on the head instead.
                self.insert_edge(relationship.origin(), connector, annotation);
                let landing = self.paired_head(connector).unwrap_or(connector);
                self.insert_edge(landing, relationship.destination(), annotation);
            }
            None if relationship.has_connector_field() => {
                // A retracted connector leaves the relationship undrawn.
            }
            None => {
                self.insert_edge(relationship.origin(), relationship.destination(), annotation);
            }
        }
    }

    /// Add an edge between two elements, pulling an endpoint back into the
    /// graph when it was left out of the initial node pass.
    fn insert_edge(&mut self, a: Id, b: Id, annotation: &Annotation) {
        let (Some(a_idx), Some(b_idx)) = (self.resolve(a, annotation), self.resolve(b, annotation))
        else {
            debug!(
                from = a.to_string(),
                to = b.to_string();
                "Relationship endpoint missing from annotation, edge skipped"
            );
            return;
        };
        self.graph.update_edge(a_idx, b_idx, ());
    }

    fn resolve(&mut self, id: Id, annotation: &Annotation) -> Option<NodeIndex> {
        if let Some(idx) = self.indices.get(&id) {
            return Some(*idx);
        }
        let kind = annotation.element_kind(id)?;
        Some(self.insert_node(Node::Element { id, kind }))
    }

    fn generate_group_id(&self) -> Id {
        let mut rng = rand::rng();
        loop {
            let name: String = (0..GROUP_ID_LEN)
                .map(|_| GROUP_ID_CHARS[rng.random_range(0..GROUP_ID_CHARS.len())] as char)
                .collect();
            let id = Id::new(&name);
            // Identifiers are random; retry on collision with an existing node.
            if !self.indices.contains_key(&id) {
                return id;
            }
        }
    }

    fn reindex(&mut self) {
        self.indices = self
            .graph
            .node_indices()
            .map(|idx| (self.graph[idx].id(), idx))
            .collect();
        let indices = &self.indices;
        self.macro_groups.retain(|id, _| indices.contains_key(id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_annotation() -> Annotation {
        let source = r#"{
            "blobs": {
                "B0": {"id": "B0", "polygon": [[10, 10], [60, 12], [40, 50]]},
                "B1": {"id": "B1", "polygon": [[100, 100], [160, 110], [140, 150]]}
            },
            "text": {
                "T0": {"id": "T0", "rectangle": [[70, 14], [120, 30]], "value": "stratus"}
            },
            "arrows": {
                "A0": {"id": "A0", "polygon": [[20, 60], [24, 90], [30, 95]]}
            },
            "arrowHeads": {
                "AH0": {"id": "AH0", "rectangle": [[28, 92], [34, 98]]}
            },
            "imageConsts": {
                "I0": {"id": "I0"}
            },
            "relationships": {
                "R0": {"id": "R0", "category": "arrowHeadTail",
                       "origin": "A0", "destination": "AH0"},
                "R1": {"id": "R1", "category": "intraObjectLabel",
                       "origin": "T0", "destination": "B0"},
                "R2": {"id": "R2", "category": "interObjectLinkage",
                       "origin": "B0", "destination": "B1", "connector": "A0",
                       "hasDirectionality": true}
            }
        }"#;
        source.parse().unwrap()
    }

    #[test]
    fn test_nodes_exclude_arrowheads_by_default() {
        let annotation = sample_annotation();
        let graph = ElementGraph::from_annotation(&annotation, &GraphConfig::new(false, false));

        // B0, B1, A0, T0, I0; AH0 is excluded
        assert_eq!(graph.node_count(), 5);
        assert!(graph.contains("A0".into()));
        assert!(!graph.contains("AH0".into()));
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_nodes_include_arrowheads_when_configured() {
        let annotation = sample_annotation();
        let graph = ElementGraph::from_annotation(&annotation, &GraphConfig::new(true, false));

        assert_eq!(graph.node_count(), 6);
        assert!(graph.contains("AH0".into()));
    }

    #[test]
    fn test_arrow_head_tail_pairs_and_links() {
        let annotation = sample_annotation();
        let graph = ElementGraph::from_annotation(&annotation, &GraphConfig::new(true, true));

        assert!(graph.contains_edge("A0".into(), "AH0".into()));
        assert_eq!(graph.paired_head("A0".into()), Some("AH0".into()));
        assert_eq!(graph.paired_head("B0".into()), None);
    }

    #[test]
    fn test_connector_routes_through_paired_head() {
        let annotation = sample_annotation();
        let graph = ElementGraph::from_annotation(&annotation, &GraphConfig::new(true, true));

        // R2 runs B0 -> B1 via A0, whose head is AH0: the edge into B1
        // leaves from the head.
        assert!(graph.contains_edge("B0".into(), "A0".into()));
        assert!(graph.contains_edge("AH0".into(), "B1".into()));
        assert!(!graph.contains_edge("A0".into(), "B1".into()));
    }

    #[test]
    fn test_connector_without_head_routes_directly() {
        let source = r#"{
            "blobs": {
                "B0": {"id": "B0", "polygon": [[0, 0], [4, 0], [2, 3]]},
                "B1": {"id": "B1", "polygon": [[20, 0], [24, 0], [22, 3]]}
            },
            "arrows": {
                "A0": {"id": "A0", "polygon": [[5, 1], [19, 1]]}
            },
            "relationships": {
                "R0": {"id": "R0", "category": "interObjectLinkage",
                       "origin": "B0", "destination": "B1", "connector": "A0"}
            }
        }"#;
        let annotation: Annotation = source.parse().unwrap();
        let graph = ElementGraph::from_annotation(&annotation, &GraphConfig::default());

        assert!(graph.contains_edge("B0".into(), "A0".into()));
        assert!(graph.contains_edge("A0".into(), "B1".into()));
        assert!(!graph.contains_edge("B0".into(), "B1".into()));
    }

    #[test]
    fn test_retracted_connector_draws_nothing() {
        let source = r#"{
            "blobs": {
                "B0": {"id": "B0", "polygon": [[0, 0], [4, 0], [2, 3]]},
                "B1": {"id": "B1", "polygon": [[20, 0], [24, 0], [22, 3]]}
            },
            "relationships": {
                "R0": {"id": "R0", "category": "interObjectLinkage",
                       "origin": "B0", "destination": "B1", "connector": null}
            }
        }"#;
        let annotation: Annotation = source.parse().unwrap();
        let graph = ElementGraph::from_annotation(&annotation, &GraphConfig::default());

        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_excluded_arrowhead_reenters_through_edge() {
        let annotation = sample_annotation();
        // Arrowheads are excluded from the node pass, but the arrowHeadTail
        // edge and the head-landing rule pull AH0 back in with its kind.
        let graph = ElementGraph::from_annotation(&annotation, &GraphConfig::default());

        assert!(graph.contains("AH0".into()));
        assert_eq!(
            graph.node("AH0".into()).and_then(Node::element_kind),
            Some(ElementKind::ArrowHead)
        );
        assert!(graph.contains_edge("AH0".into(), "B1".into()));
    }

    #[test]
    fn test_unknown_endpoint_skips_edge() {
        let source = r#"{
            "blobs": {"B0": {"id": "B0", "polygon": [[0, 0], [4, 0], [2, 3]]}},
            "relationships": {
                "R0": {"id": "R0", "category": "intraObjectLabel",
                       "origin": "T9", "destination": "B0"}
            }
        }"#;
        let annotation: Annotation = source.parse().unwrap();
        let graph = ElementGraph::from_annotation(&annotation, &GraphConfig::default());

        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_duplicate_relationships_share_an_edge() {
        let source = r#"{
            "blobs": {"B0": {"id": "B0", "polygon": [[0, 0], [4, 0], [2, 3]]}},
            "text": {"T0": {"id": "T0", "rectangle": [[6, 0], [9, 2]], "value": "x"}},
            "relationships": {
                "R0": {"id": "R0", "category": "intraObjectLabel",
                       "origin": "T0", "destination": "B0"},
                "R1": {"id": "R1", "category": "intraObjectLabel",
                       "origin": "T0", "destination": "B0"}
            }
        }"#;
        let annotation: Annotation = source.parse().unwrap();
        let graph = ElementGraph::from_annotation(&annotation, &GraphConfig::default());

        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_group_creates_generated_node() {
        let annotation = sample_annotation();
        let mut graph = ElementGraph::from_annotation(&annotation, &GraphConfig::default());

        let group_id = graph
            .group(&["B0".into(), "B1".into()])
            .unwrap()
            .expect("a generated group node");

        let group = graph.node(group_id).unwrap();
        assert!(group.is_group());
        assert_eq!(group_id.to_string().len(), 6);
        assert!(graph.contains_edge("B0".into(), group_id));
        assert!(graph.contains_edge("B1".into(), group_id));
    }

    #[test]
    fn test_group_with_image_constant_attaches_members() {
        let annotation = sample_annotation();
        let mut graph = ElementGraph::from_annotation(&annotation, &GraphConfig::default());
        let nodes_before = graph.node_count();

        let group_id = graph
            .group(&["T0".into(), "I0".into()])
            .expect("grouping should succeed");

        assert_eq!(group_id, None);
        assert_eq!(graph.node_count(), nodes_before);
        assert!(graph.contains_edge("T0".into(), "I0".into()));
    }

    #[test]
    fn test_group_arity_and_membership_errors() {
        let annotation = sample_annotation();
        let mut graph = ElementGraph::from_annotation(&annotation, &GraphConfig::default());

        assert_eq!(
            graph.group(&["B0".into()]),
            Err(StructureError::GroupTooSmall(1))
        );
        assert_eq!(
            graph.group(&["B0".into(), "Z9".into()]),
            Err(StructureError::UnknownNode("Z9".into()))
        );
    }

    #[test]
    fn test_macro_group_labels() {
        let annotation = sample_annotation();
        let mut graph = ElementGraph::from_annotation(&annotation, &GraphConfig::default());

        graph
            .set_macro_group(&["B0".into(), "B1".into()], "cycle")
            .unwrap();

        assert_eq!(graph.macro_group("B0".into()), Some("cycle"));
        assert_eq!(graph.macro_group("B1".into()), Some("cycle"));
        assert_eq!(graph.macro_group("T0".into()), None);

        assert_eq!(
            graph.set_macro_group(&["Z9".into()], "cycle"),
            Err(StructureError::UnknownNode("Z9".into()))
        );
    }

    #[test]
    fn test_remove_nodes() {
        let annotation = sample_annotation();
        let mut graph = ElementGraph::from_annotation(&annotation, &GraphConfig::default());
        graph.set_macro_group(&["B0".into()], "cycle").unwrap();

        graph.remove_nodes(&["B0".into(), "A0".into()]).unwrap();

        assert!(!graph.contains("B0".into()));
        assert!(!graph.contains("A0".into()));
        assert_eq!(graph.macro_group("B0".into()), None);
        // The survivors stay addressable after reindexing
        assert!(graph.contains("B1".into()));
        assert!(graph.contains("T0".into()));

        assert_eq!(
            graph.remove_nodes(&["B0".into()]),
            Err(StructureError::UnknownNode("B0".into()))
        );
    }

    #[test]
    fn test_detach_nodes_keeps_nodes() {
        let annotation = sample_annotation();
        let mut graph = ElementGraph::from_annotation(&annotation, &GraphConfig::default());
        assert!(graph.edge_count() > 0);

        graph
            .detach_nodes(&["B0".into(), "B1".into(), "A0".into(), "AH0".into(), "T0".into()])
            .unwrap();

        assert_eq!(graph.edge_count(), 0);
        assert!(graph.contains("B0".into()));
        assert!(graph.contains("T0".into()));
    }

    #[test]
    fn test_generated_group_ids_are_fresh() {
        let annotation = sample_annotation();
        let mut graph = ElementGraph::from_annotation(&annotation, &GraphConfig::default());

        let first = graph.group(&["B0".into(), "B1".into()]).unwrap().unwrap();
        let second = graph.group(&["T0".into(), first]).unwrap().unwrap();

        assert_ne!(first, second);
        assert!(graph.contains_edge(first, second));
    }
}
