//! Error types for Flujo operations.
//!
//! This module provides the main error type [`FlujoError`] which wraps
//! the error conditions that can occur while compiling a flow.

use std::io;

use thiserror::Error;

use flujo_parser::ParseError;

/// The main error type for Flujo operations.
///
/// The `Parse` variant keeps the source text next to the structured error,
/// so callers can render the diagnostic with a source snippet.
#[derive(Debug, Error)]
pub enum FlujoError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("JSON error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl FlujoError {
    /// Create a new `Parse` error with the associated source code.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
