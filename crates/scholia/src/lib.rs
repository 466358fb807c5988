//! Scholia - annotation graphs and relation records for the AI2D diagram
//! corpus.
//!
//! Parsing, graph construction, corpus extraction, and record validation for
//! annotating the rhetorical structure of diagrams. Annotation files parse
//! into typed models, build into element, connectivity, and rhetorical
//! structure graphs, and flatten into relation records that carry RST
//! judgements.

pub mod config;
pub mod error;
pub mod export;
pub mod extract;
pub mod record;
pub mod structure;
pub mod summary;

pub use scholia_core::{element, identifier, relation, taxonomy};

pub use error::ScholiaError;

use std::path::Path;

use log::{debug, info};

use scholia_parser::ai2d::Annotation;

use config::AppConfig;
use record::RelationRecord;
use structure::{ConnectivityGraph, ElementGraph, RstGraph};

/// Builder for loading annotation and constructing its graph layers.
///
/// This provides an API for processing AI2D annotation through parsing,
/// graph construction, and corpus extraction, with behavior drawn from one
/// [`AppConfig`].
///
/// # Examples
///
/// ```
/// use scholia::{AnnotationBuilder, config::AppConfig};
///
/// let source = r#"{
///     "blobs": {"B0": {"id": "B0", "polygon": [[0, 0], [4, 0], [2, 3]]}},
///     "text": {"T0": {"id": "T0", "rectangle": [[6, 0], [9, 2]], "value": "leaf"}},
///     "relationships": {
///         "R0": {"id": "R0", "category": "intraObjectLabel",
///                "origin": "T0", "destination": "B0"}
///     }
/// }"#;
///
/// let builder = AnnotationBuilder::new(AppConfig::default());
/// let annotation = builder.parse(source).expect("Failed to parse");
///
/// let elements = builder.element_graph(&annotation);
/// assert_eq!(elements.node_count(), 2);
///
/// // Or use default config
/// let builder = AnnotationBuilder::default();
/// ```
#[derive(Debug, Default)]
pub struct AnnotationBuilder {
    config: AppConfig,
}

impl AnnotationBuilder {
    /// Create a new annotation builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Parse annotation JSON into a typed model.
    ///
    /// # Errors
    ///
    /// Returns [`ScholiaError::Ai2d`] when the source is not valid
    /// annotation JSON.
    pub fn parse(&self, source: &str) -> Result<Annotation, ScholiaError> {
        info!("Parsing annotation");

        let annotation: Annotation = source.parse()?;

        debug!(
            elements = annotation.element_count(),
            relationships = annotation.relationships().len();
            "Annotation parsed"
        );
        Ok(annotation)
    }

    /// Load an annotation file from disk.
    ///
    /// # Errors
    ///
    /// Returns [`ScholiaError::Ai2d`] when the file cannot be read or does
    /// not hold valid annotation JSON.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<Annotation, ScholiaError> {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading annotation file");

        Ok(Annotation::from_path(path)?)
    }

    /// Build the element graph of an annotation, per the graph
    /// configuration.
    pub fn element_graph(&self, annotation: &Annotation) -> ElementGraph {
        ElementGraph::from_annotation(annotation, self.config.graph())
    }

    /// Seed the connectivity layer from an element graph.
    pub fn connectivity_graph(&self, elements: &ElementGraph) -> ConnectivityGraph {
        ConnectivityGraph::from_element_graph(elements)
    }

    /// Seed the rhetorical structure layer from an element graph.
    pub fn rst_graph(&self, elements: &ElementGraph) -> RstGraph {
        RstGraph::from_element_graph(elements)
    }

    /// Extract relation records from a directory of annotation files, per
    /// the extraction configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ScholiaError::Io`] when the directory cannot be walked and
    /// [`ScholiaError::Ai2d`] when a file fails to parse.
    pub fn extract(&self, directory: impl AsRef<Path>) -> Result<Vec<RelationRecord>, ScholiaError> {
        extract::extract_records(directory, self.config.extract())
    }
}
