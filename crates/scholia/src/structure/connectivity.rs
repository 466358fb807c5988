//! The connectivity layer: how elements are wired together.
//!
//! A [`ConnectivityGraph`] is a directed graph seeded from an
//! [`ElementGraph`]. Seeding keeps the grouping skeleton that is relevant
//! to connectivity: edges touching the image constant are dropped, and
//! group or image-constant nodes left isolated by that drop are removed.
//! Surviving edges are marked [`ConnectivityEdge::Grouping`].
//!
//! Connections are then drawn between node sets with
//! [`ConnectivityGraph::connect`]. Parallel edges are allowed; two elements
//! wired twice carry two edges.

use std::{
    collections::{HashMap, HashSet},
    fmt,
    str::FromStr,
};

use log::debug;
use petgraph::{
    graph::{DiGraph, NodeIndex},
    visit::EdgeRef,
};
use thiserror::Error;

use scholia_core::{element::ElementKind, identifier::Id};

use super::{ElementGraph, Node, StructureError};

/// Error returned when parsing an unrecognised connection kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown connection kind `{0}`")]
pub struct UnknownConnectionKind(pub String);

/// The kind of a drawn connection between elements.
///
/// Annotators abbreviate connection kinds when wiring elements up;
/// [`FromStr`] accepts `-` for undirectional, `>` for directional and `<>`
/// for bidirectional, alongside the full names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectionKind {
    /// A plain line without direction.
    Undirectional,
    /// An arrow from source to target.
    Directional,
    /// Arrows both ways between source and target.
    Bidirectional,
}

impl ConnectionKind {
    /// Returns the connection kind name.
    pub fn as_str(self) -> &'static str {
        match self {
            ConnectionKind::Undirectional => "undirectional",
            ConnectionKind::Directional => "directional",
            ConnectionKind::Bidirectional => "bidirectional",
        }
    }
}

impl fmt::Display for ConnectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConnectionKind {
    type Err = UnknownConnectionKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "-" | "undirectional" => Ok(ConnectionKind::Undirectional),
            ">" | "directional" => Ok(ConnectionKind::Directional),
            "<>" | "bidirectional" => Ok(ConnectionKind::Bidirectional),
            other => Err(UnknownConnectionKind(other.to_string())),
        }
    }
}

/// The weight on a connectivity edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectivityEdge {
    /// A grouping edge carried over from the element graph.
    Grouping,
    /// A drawn connection between elements.
    Connection(ConnectionKind),
}

impl ConnectivityEdge {
    /// Returns the edge kind name.
    pub fn as_str(self) -> &'static str {
        match self {
            ConnectivityEdge::Grouping => "grouping",
            ConnectivityEdge::Connection(kind) => kind.as_str(),
        }
    }

    /// Returns `true` for grouping edges carried over from the element
    /// graph.
    pub fn is_grouping(self) -> bool {
        matches!(self, ConnectivityEdge::Grouping)
    }
}

impl fmt::Display for ConnectivityEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A directed graph of element connectivity, with parallel edges allowed.
///
/// # Examples
///
/// ```
/// use scholia::{
///     config::GraphConfig,
///     structure::{ConnectionKind, ConnectivityGraph, ElementGraph},
/// };
/// use scholia_parser::ai2d::Annotation;
///
/// let source = r#"{
///     "blobs": {
///         "B0": {"id": "B0", "polygon": [[0, 0], [4, 0], [2, 3]]},
///         "B1": {"id": "B1", "polygon": [[20, 0], [24, 0], [22, 3]]}
///     }
/// }"#;
/// let annotation: Annotation = source.parse().unwrap();
/// let elements = ElementGraph::from_annotation(&annotation, &GraphConfig::default());
///
/// let mut connectivity = ConnectivityGraph::from_element_graph(&elements);
/// connectivity
///     .connect(&["B0".into()], &["B1".into()], ConnectionKind::Directional)
///     .unwrap();
/// assert_eq!(connectivity.edge_count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConnectivityGraph {
    graph: DiGraph<Node, ConnectivityEdge>,
    indices: HashMap<Id, NodeIndex>,
}

impl ConnectivityGraph {
    /// Seed a connectivity graph from an element graph.
    ///
    /// Edges touching the image constant are dropped, group and
    /// image-constant nodes left isolated by the drop are removed, and the
    /// surviving edges are marked [`ConnectivityEdge::Grouping`].
    pub fn from_element_graph(element_graph: &ElementGraph) -> Self {
        let source = element_graph.graph();
        let is_image_const =
            |idx: NodeIndex| source[idx].element_kind() == Some(ElementKind::ImageConst);

        let surviving: Vec<(NodeIndex, NodeIndex)> = source
            .edge_references()
            .filter(|edge| !is_image_const(edge.source()) && !is_image_const(edge.target()))
            .map(|edge| (edge.source(), edge.target()))
            .collect();
        let connected: HashSet<NodeIndex> =
            surviving.iter().flat_map(|&(a, b)| [a, b]).collect();

        let mut connectivity = Self::default();
        let mut remap = HashMap::new();
        for idx in source.node_indices() {
            let node = &source[idx];
            let structural =
                node.is_group() || node.element_kind() == Some(ElementKind::ImageConst);
            if structural && !connected.contains(&idx) {
                continue;
            }
            remap.insert(idx, connectivity.insert_node(node.clone()));
        }

        for (a, b) in surviving {
            connectivity
                .graph
                .add_edge(remap[&a], remap[&b], ConnectivityEdge::Grouping);
        }

        debug!(
            nodes = connectivity.node_count(),
            edges = connectivity.edge_count();
            "Seeded connectivity graph"
        );

        connectivity
    }

    /// Returns the underlying petgraph graph.
    pub fn graph(&self) -> &DiGraph<Node, ConnectivityEdge> {
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

    /// Iterate over all edges as identifier pairs with their kinds.
    pub fn edges(&self) -> impl Iterator<Item = (Id, Id, ConnectivityEdge)> + '_ {
        self.graph.edge_references().map(|edge| {
            (
                self.graph[edge.source()].id(),
                self.graph[edge.target()].id(),
                *edge.weight(),
            )
        })
    }

    /// Returns the kinds of every edge running from `a` to `b`.
    pub fn edge_kinds(&self, a: Id, b: Id) -> Vec<ConnectivityEdge> {
        match (self.indices.get(&a), self.indices.get(&b)) {
            (Some(a_idx), Some(b_idx)) => self
                .graph
                .edges_connecting(*a_idx, *b_idx)
                .map(|edge| *edge.weight())
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Draw connections from every source to every target.
    ///
    /// One edge is added per source–target pair. Bidirectional connections
    /// also add the reverse edges. Repeated connections stack as parallel
    /// edges.
    ///
    /// # Errors
    ///
    /// Returns [`StructureError::UnknownNode`] when a source or target is
    /// not in the graph; nothing is drawn in that case.
    pub fn connect(
        &mut self,
        sources: &[Id],
        targets: &[Id],
        kind: ConnectionKind,
    ) -> Result<(), StructureError> {
        for &id in sources.iter().chain(targets) {
            self.index_of(id)?;
        }

        for &source in sources {
            for &target in targets {
                self.graph.add_edge(
                    self.indices[&source],
                    self.indices[&target],
                    ConnectivityEdge::Connection(kind),
                );
            }
        }
        if kind == ConnectionKind::Bidirectional {
            for &target in targets {
                for &source in sources {
                    self.graph.add_edge(
                        self.indices[&target],
                        self.indices[&source],
                        ConnectivityEdge::Connection(kind),
                    );
                }
            }
        }

        debug!(
            sources = sources.len(),
            targets = targets.len(),
            kind = kind.as_str();
            "Connected elements"
        );

        Ok(())
    }

    /// Drop the grouping edges carried over from the element graph.
    ///
    /// Node indices are unaffected; drawn connections stay in place.
    pub fn ungroup(&mut self) {
        self.graph
            .retain_edges(|graph, edge| !graph[edge].is_grouping());
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
}
