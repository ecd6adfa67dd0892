//! The Flujo compiler pipeline.
//!
//! Raw DSL text goes through four stages, each of which aborts on the first
//! fatal diagnostic:
//!
//! 1. [`lexer`](crate::lexer) — classify each physical line into a statement
//!    with its byte span;
//! 2. [`parser`](crate::parser) — assemble statements into the flow AST;
//! 3. [`validate`](crate::validate) — check identifier uniqueness;
//! 4. [`elaborate`](crate::elaborate) — lower the AST into the output
//!    [`Document`], resolving navigation and synthesizing forms.
//!
//! The lint layer runs over the raw text in parallel with the pipeline and
//! its warnings are merged into the [`CompileOutcome`] regardless of the
//! parse result.
//!
//! The whole pipeline is a pure function of the source text: no I/O, no
//! shared state, safe to call concurrently and cheap enough to re-run on
//! every editor keystroke.

pub mod config;
mod elaborate;
pub mod error;
mod lexer;
mod lint;
pub mod outcome;
mod parser;
mod parser_types;
pub mod span;
mod validate;

#[cfg(test)]
mod parser_tests;

pub use config::CompileConfig;
pub use error::{Diagnostic, ErrorCode, Label, ParseError, Severity};
pub use outcome::{CompileOutcome, EditorDiagnostic, EditorPayload};
pub use span::{SourceLocation, Span};

use flujo_core::document::Document;

/// Parse and synthesize a document, failing on the first fatal diagnostic.
///
/// Whitespace-only input is the distinguished empty-document error rather
/// than a generic grammar failure.
pub fn parse(source: &str, config: &CompileConfig) -> Result<Document, ParseError> {
    if source.trim().is_empty() {
        return Err(ParseError::from(
            Diagnostic::error("El DSL está vacío")
                .with_code(ErrorCode::E202)
                .with_help("escribe al menos una `Pantalla` para comenzar"),
        ));
    }

    let statements = lexer::classify(source, &config.vocab)?;
    let flow = parser::build_flow(statements)?;
    validate::validate(&flow)?;
    let document = elaborate::elaborate(&flow, config)?;

    log::info!(screens = document.screens.len(); "Compiled flow");
    Ok(document)
}

/// Compile the source, merging the lint warnings into the result.
///
/// Never fails: the outcome carries either the document or the single fatal
/// error, and the warnings either way.
pub fn compile(source: &str, config: &CompileConfig) -> CompileOutcome {
    let warnings = lint::lint(source);
    match parse(source, config) {
        Ok(document) => CompileOutcome {
            document: Some(document),
            error: None,
            warnings,
        },
        Err(error) => CompileOutcome {
            document: None,
            error: Some(error),
            warnings,
        },
    }
}
