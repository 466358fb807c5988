//! Configuration types for scholia processing.
//!
//! This module provides configuration structures that control how annotation
//! graphs are built and how corpus extraction behaves. All types implement
//! [`serde::Deserialize`] for flexible loading from external sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level application configuration combining graph and extraction settings.
//! - [`GraphConfig`] - Controls which elements and edges an element graph carries.
//! - [`ExtractConfig`] - Controls which relationships corpus extraction keeps.
//!
//! # Example
//!
//! ```
//! # use scholia::config::AppConfig;
//! // Use default configuration
//! let config = AppConfig::default();
//! assert!(config.graph().include_edges());
//! assert!(!config.graph().include_arrowheads());
//! ```

use serde::Deserialize;

/// Top-level application configuration combining graph and extraction
/// settings.
///
/// Groups [`GraphConfig`] and [`ExtractConfig`] into a single configuration
/// root.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Graph construction section.
    #[serde(default)]
    graph: GraphConfig,

    /// Corpus extraction section.
    #[serde(default)]
    extract: ExtractConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified graph and extraction
    /// configurations.
    ///
    /// # Arguments
    ///
    /// * `graph` - Element graph construction settings.
    /// * `extract` - Corpus extraction settings.
    pub fn new(graph: GraphConfig, extract: ExtractConfig) -> Self {
        Self { graph, extract }
    }

    /// Returns the graph configuration.
    pub fn graph(&self) -> &GraphConfig {
        &self.graph
    }

    /// Returns the extraction configuration.
    pub fn extract(&self) -> &ExtractConfig {
        &self.extract
    }
}

/// Element graph construction settings.
///
/// Controls whether arrowhead elements become nodes and whether the
/// relationships of an annotation file are drawn as edges.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphConfig {
    /// Include arrowhead elements as graph nodes.
    ///
    /// Arrowheads mark the directed end of an arrow and are left out by
    /// default; the arrow itself stands for the connection.
    #[serde(default)]
    include_arrowheads: bool,

    /// Draw edges from the relationships of the annotation file.
    #[serde(default = "default_include_edges")]
    include_edges: bool,
}

fn default_include_edges() -> bool {
    true
}

impl GraphConfig {
    /// Creates a new [`GraphConfig`] with the specified settings.
    pub fn new(include_arrowheads: bool, include_edges: bool) -> Self {
        Self {
            include_arrowheads,
            include_edges,
        }
    }

    /// Returns whether arrowhead elements become graph nodes.
    pub fn include_arrowheads(&self) -> bool {
        self.include_arrowheads
    }

    /// Returns whether relationship edges are drawn.
    pub fn include_edges(&self) -> bool {
        self.include_edges
    }
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            include_arrowheads: false,
            include_edges: true,
        }
    }
}

/// Corpus extraction settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExtractConfig {
    /// Skip `arrowHeadTail` relationships during extraction.
    ///
    /// These pair an arrow with its head and carry no rhetorical content,
    /// so annotation work typically drops them.
    #[serde(default)]
    skip_arrow_head_tail: bool,
}

impl ExtractConfig {
    /// Creates a new [`ExtractConfig`] with the specified settings.
    pub fn new(skip_arrow_head_tail: bool) -> Self {
        Self {
            skip_arrow_head_tail,
        }
    }

    /// Returns whether `arrowHeadTail` relationships are skipped.
    pub fn skip_arrow_head_tail(&self) -> bool {
        self.skip_arrow_head_tail
    }
}
