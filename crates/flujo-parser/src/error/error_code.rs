//! Error codes for the Flujo diagnostic system.
//!
//! Codes are organized by phase:
//! - `E0xx` - lexical errors
//! - `E1xx` - structural (AST build) errors
//! - `E2xx` - validation errors
//! - `E3xx` - synthesis errors
//! - `W0xx` - lint warnings

use std::fmt;

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Lexical Errors (E0xx)
    // =========================================================================
    /// Unterminated string literal.
    ///
    /// An image source was opened with a quote but never closed.
    E001,

    /// Missing `:` after a keyword that requires one.
    E002,

    /// Missing name in a declaration (`Pantalla`, `Lista`, `Formulario`).
    E003,

    /// Malformed image statement (missing quoted source or bad dimensions).
    E004,

    // =========================================================================
    // Structural Errors (E1xx)
    // =========================================================================
    /// Content found before the first screen declaration.
    E100,

    /// An option entry appeared outside an open list block.
    E101,

    /// An option list closed without a single entry.
    E102,

    /// A screen declared more than one navigation directive.
    E103,

    /// A `Formulario` block was never closed.
    E104,

    /// A `FinFormulario` appeared without an open `Formulario` block.
    E105,

    /// Nested `Formulario` blocks are not allowed.
    E106,

    // =========================================================================
    // Validation Errors (E2xx)
    // =========================================================================
    /// Duplicate screen definition.
    ///
    /// Two screens resolve to the same identifier.
    E200,

    /// Duplicate list name within one screen (catalog key collision).
    E201,

    /// The document contains no screens (empty or whitespace-only input).
    E202,

    // =========================================================================
    // Synthesis Errors (E3xx)
    // =========================================================================
    /// A navigation directive targets a screen that does not exist.
    E300,

    // =========================================================================
    // Lint Warnings (W0xx)
    // =========================================================================
    /// A list option starts with a hyphen-delimited date literal.
    W001,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
