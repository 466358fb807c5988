//! Export: DOT rendering for graph layers and JSONL persistence for
//! record sets.
//!
//! Every graph layer renders to Graphviz DOT for visual inspection. Nodes
//! are filled by kind — text blocks dodgerblue, blobs orangered, arrows
//! mediumseagreen, arrowheads darkorange, image constants palegoldenrod,
//! group nodes navajowhite, relation nodes white — and generated nodes get
//! readable labels: groups are enumerated `G1`, `G2`, ... and relation
//! nodes read `R1 (identification)`.
//!
//! Record sets persist as JSON Lines, one [`RelationRecord`] per line, so
//! partially annotated sets diff cleanly and stream without loading the
//! whole file.

use std::{
    fs::File,
    io::{self, BufRead, BufReader, BufWriter, Write as _},
    path::Path,
};

use log::debug;

use scholia_core::element::ElementKind;

use crate::{
    error::ScholiaError,
    record::RelationRecord,
    structure::{ConnectivityGraph, ElementGraph, Node, RstGraph},
};

// =============================================================================
// DOT rendering
// =============================================================================

/// Render an element graph as undirected DOT.
///
/// # Examples
///
/// ```
/// use scholia::{config::GraphConfig, export, structure::ElementGraph};
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
/// let graph = ElementGraph::from_annotation(&annotation, &GraphConfig::default());
///
/// let dot = export::element_dot(&graph);
/// assert!(dot.starts_with("graph elements {"));
/// assert!(dot.contains("\"T0\" -- \"B0\";"));
/// ```
pub fn element_dot(graph: &ElementGraph) -> String {
    let mut dot = String::from("graph elements {\n    node [style=filled];\n");
    render_nodes(&mut dot, graph.nodes());
    for (a, b) in graph.edges() {
        dot.push_str(&format!(
            "    {} -- {};\n",
            quoted(&a.to_string()),
            quoted(&b.to_string())
        ));
    }
    dot.push_str("}\n");
    dot
}

/// Render a connectivity graph as directed DOT, edges labelled by kind.
pub fn connectivity_dot(graph: &ConnectivityGraph) -> String {
    let mut dot = String::from("digraph connectivity {\n    node [style=filled];\n");
    render_nodes(&mut dot, graph.nodes());
    for (a, b, kind) in graph.edges() {
        dot.push_str(&format!(
            "    {} -> {} [label={}];\n",
            quoted(&a.to_string()),
            quoted(&b.to_string()),
            quoted(kind.as_str())
        ));
    }
    dot.push_str("}\n");
    dot
}

/// Render a rhetorical structure graph as directed DOT, edges labelled by
/// role.
pub fn rst_dot(graph: &RstGraph) -> String {
    let mut dot = String::from("digraph rst {\n    node [style=filled];\n");
    render_nodes(&mut dot, graph.nodes());
    for (a, b, role) in graph.edges() {
        dot.push_str(&format!(
            "    {} -> {} [label={}];\n",
            quoted(&a.to_string()),
            quoted(&b.to_string()),
            quoted(role.as_str())
        ));
    }
    dot.push_str("}\n");
    dot
}

fn render_nodes<'a>(dot: &mut String, nodes: impl Iterator<Item = &'a Node>) {
    let mut groups = 0;
    let mut relations = 0;
    for node in nodes {
        let id = node.id().to_string();
        let label = match node {
            Node::Element { .. } => id.clone(),
            Node::Group { .. } => {
                groups += 1;
                format!("G{groups}")
            }
            Node::Relation { relation, .. } => {
                relations += 1;
                format!("R{relations} ({})", relation.name())
            }
        };
        dot.push_str(&format!(
            "    {} [label={}, fillcolor={}];\n",
            quoted(&id),
            quoted(&label),
            quoted(fill_colour(node))
        ));
    }
}

fn fill_colour(node: &Node) -> &'static str {
    match node {
        Node::Element { kind, .. } => match kind {
            ElementKind::Text => "dodgerblue",
            ElementKind::Blob => "orangered",
            ElementKind::Arrow => "mediumseagreen",
            ElementKind::ArrowHead => "darkorange",
            ElementKind::Container => "lightgrey",
            ElementKind::ImageConst => "palegoldenrod",
        },
        Node::Group { .. } => "navajowhite",
        Node::Relation { .. } => "white",
    }
}

/// Quote a DOT identifier or attribute value, escaping quotes and
/// backslashes.
fn quoted(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        if matches!(c, '"' | '\\') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

// =============================================================================
// JSONL record sets
// =============================================================================

/// Write a record set to disk, one JSON record per line.
pub fn write_records(
    path: impl AsRef<Path>,
    records: &[RelationRecord],
) -> Result<(), ScholiaError> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    for record in records {
        serde_json::to_writer(&mut writer, record).map_err(io::Error::from)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;

    debug!(path = path.display().to_string(), records = records.len(); "Wrote record set");
    Ok(())
}

/// Read a record set from disk.
///
/// Blank lines are skipped. A line that fails to parse aborts the read
/// with [`ScholiaError::Records`] naming the offending line.
pub fn read_records(path: impl AsRef<Path>) -> Result<Vec<RelationRecord>, ScholiaError> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);

    let mut records = Vec::new();
    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record = serde_json::from_str(&line).map_err(|source| ScholiaError::Records {
            path: path.to_path_buf(),
            line: number + 1,
            source,
        })?;
        records.push(record);
    }

    debug!(path = path.display().to_string(), records = records.len(); "Read record set");
    Ok(records)
}
