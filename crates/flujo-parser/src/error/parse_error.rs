//! The fatal error type returned from the compilation pipeline.
//!
//! Compilation surfaces at most one fatal diagnostic per call (the first
//! structural violation in document order), so [`ParseError`] wraps exactly
//! one [`Diagnostic`].

use std::fmt;

use crate::error::Diagnostic;

/// The fatal error of a failed compilation.
#[derive(Debug, Clone)]
pub struct ParseError {
    diagnostic: Diagnostic,
}

impl ParseError {
    /// Get the fatal diagnostic.
    pub fn diagnostic(&self) -> &Diagnostic {
        &self.diagnostic
    }

    /// Consume the error and return the fatal diagnostic.
    pub fn into_diagnostic(self) -> Diagnostic {
        self.diagnostic
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.diagnostic)
    }
}

impl std::error::Error for ParseError {}

impl From<Diagnostic> for ParseError {
    fn from(diagnostic: Diagnostic) -> Self {
        Self { diagnostic }
    }
}
