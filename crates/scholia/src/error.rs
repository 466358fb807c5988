//! Error types for scholia operations.
//!
//! This module provides the main error type [`ScholiaError`] which wraps
//! the error conditions that can occur while loading annotation, building
//! graphs, and working with record sets.

use std::{io, path::PathBuf};

use thiserror::Error;

use scholia_parser::{ai2d::Ai2dError, error::ParseError};

use crate::structure::StructureError;

/// The main error type for scholia operations.
///
/// # Diagnostic Variants
///
/// The `Scheme` variant contains structured error information with source
/// code spans. This provides detailed error information that can be used
/// for rich error reporting.
#[derive(Debug, Error)]
pub enum ScholiaError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Ai2d(#[from] Ai2dError),

    #[error("{err}")]
    Scheme { err: ParseError, src: String },

    #[error(transparent)]
    Structure(#[from] StructureError),

    #[error("malformed record set `{path}` at line {line}: {source}")]
    Records {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Config error: {0}")]
    Config(String),
}

impl ScholiaError {
    /// Create a new `Scheme` error with the associated source code.
    pub fn new_scheme_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Scheme {
            err,
            src: src.into(),
        }
    }
}
