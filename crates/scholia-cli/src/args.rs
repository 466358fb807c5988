//! Command-line argument definitions for the Scholia CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. A subcommand selects the operation; global arguments
//! control configuration file selection and logging verbosity.

use clap::{Parser, Subcommand};

/// Command-line arguments for the Scholia annotation tools
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,
}

/// The operation to run.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Extract relation records from a directory of annotation files
    Extract {
        /// Path to the directory holding annotation JSON files
        #[arg(short, long)]
        annotations: String,

        /// Path to the output record set
        #[arg(short, long, default_value = "records.jsonl")]
        output: String,
    },

    /// Render the element graph of an annotation file as DOT
    Graph {
        /// Path to the annotation JSON file
        #[arg(help = "Path to the annotation file")]
        input: String,

        /// Path to the output DOT file
        #[arg(short, long, default_value = "out.dot")]
        output: String,

        /// Include arrowhead elements as graph nodes
        #[arg(long)]
        arrowheads: bool,

        /// Leave relationship edges out of the graph
        #[arg(long)]
        no_edges: bool,
    },

    /// Check scheme documents for internal and cross-copy consistency
    Check {
        /// Paths to the scheme documents
        #[arg(required = true)]
        documents: Vec<String>,
    },

    /// Validate the judgements of a record set
    Validate {
        /// Path to the record set
        records: String,
    },

    /// Summarise a record set
    Stats {
        /// Path to the record set
        records: String,
    },
}
