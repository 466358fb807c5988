//! Example: Driving the annotation workflow programmatically
//!
//! This example demonstrates how to take one parsed annotation file through
//! the workflow the interactive tooling drives: grouping diagram elements,
//! connecting them, inserting a rhetorical relation, and exporting DOT.

use scholia::{
    AnnotationBuilder, config::AppConfig, export, identifier::Id, relation::Relation,
    structure::ConnectionKind,
};

const ANNOTATION: &str = r#"{
    "blobs": {
        "B0": {"id": "B0", "polygon": [[10, 10], [60, 12], [40, 50]]},
        "B1": {"id": "B1", "polygon": [[100, 100], [160, 110], [140, 150]]}
    },
    "text": {
        "T0": {"id": "T0", "rectangle": [[70, 14], [120, 30]], "value": "stratus"}
    },
    "arrows": {
        "A0": {"id": "A0", "polygon": [[60, 40], [95, 95]]}
    },
    "relationships": {
        "R0": {"id": "R0", "category": "intraObjectLabel",
               "origin": "T0", "destination": "B0"},
        "R1": {"id": "R1", "category": "interObjectLinkage",
               "origin": "B0", "destination": "B1", "connector": "A0"}
    }
}"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Parsing annotation...\n");

    let builder = AnnotationBuilder::new(AppConfig::default());
    let annotation = builder.parse(ANNOTATION)?;

    // Element identifiers from the annotation file (Id is Copy)
    let b0 = Id::new("B0");
    let b1 = Id::new("B1");
    let t0 = Id::new("T0");

    // Build the element graph and group the labelled blob with its label
    let mut elements = builder.element_graph(&annotation);
    println!("Element graph:");
    println!("  Nodes: {}", elements.node_count());
    println!("  Edges: {}", elements.edge_count());

    let group = elements
        .group(&[b0, t0])?
        .expect("grouping without an image constant creates a group node");
    elements.set_macro_group(&[b0, t0], "cloud formations")?;
    println!("  Grouped B0 and T0 under {group}");
    println!();

    // Mark the connection the arrow stands for in the connectivity layer
    let mut connectivity = builder.connectivity_graph(&elements);
    connectivity.connect(&[group], &[b1], ConnectionKind::Directional)?;
    println!("Connectivity graph:");
    println!("  Nodes: {}", connectivity.node_count());
    println!("  Edges: {}", connectivity.edge_count());
    println!();

    // Insert a rhetorical relation: the text identifies the blob
    let mut rst = builder.rst_graph(&elements);
    let relation_node = rst.add_relation(Relation::Identification, &[b0], &[t0])?;
    println!("RST graph:");
    println!("  Relation node: {relation_node}");
    println!("  Edges: {}", rst.edge_count());
    println!();

    // Export the layers as DOT
    let element_dot = export::element_dot(&elements);
    let rst_dot = export::rst_dot(&rst);

    std::fs::write("elements.dot", &element_dot)?;
    std::fs::write("rst.dot", &rst_dot)?;
    println!("DOT written to: elements.dot ({} bytes)", element_dot.len());
    println!("DOT written to: rst.dot ({} bytes)", rst_dot.len());

    Ok(())
}
