//! Flujo - a Spanish-language DSL for authoring conversational flows.
//!
//! Flujo compiles constrained natural-language text (`Pantalla` blocks with
//! titles, option lists and navigation) into the screen-based JSON document
//! a downstream messaging platform renders.

pub mod config;

mod error;

pub use flujo_core::{document, slug, vocab};
pub use flujo_parser::{CompileOutcome, Diagnostic, ParseError, Severity};

pub use error::FlujoError;

use log::{debug, info};

use flujo_core::document::Document;

use config::AppConfig;

/// Builder for compiling Flujo flows.
///
/// # Examples
///
/// ```
/// use flujo::{FlowCompiler, config::AppConfig};
///
/// let source = "Pantalla Bienvenida:\nTitulo: Hola\n";
///
/// // With custom config
/// let config = AppConfig::default();
/// let compiler = FlowCompiler::new(config);
///
/// // Parse source to a document
/// let document = compiler.parse(source)
///     .expect("Failed to compile");
///
/// // Serialize the document to JSON
/// let json = compiler.to_json(&document)
///     .expect("Failed to serialize");
///
/// // Or use default config
/// let compiler = FlowCompiler::default();
/// ```
#[derive(Default)]
pub struct FlowCompiler {
    config: AppConfig,
}

impl FlowCompiler {
    /// Create a new flow compiler with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Parse source text into a flow document.
    ///
    /// This runs the full pipeline (classification, AST build, validation,
    /// synthesis) and fails on the first fatal diagnostic.
    ///
    /// # Errors
    ///
    /// Returns [`FlujoError::Parse`] carrying the fatal diagnostic and the
    /// source text, for rendering with a snippet.
    pub fn parse(&self, source: &str) -> Result<Document, FlujoError> {
        info!("Compiling flow");

        let compile_config = self.config.compile_config();
        let document = flujo_parser::parse(source, &compile_config)
            .map_err(|err| FlujoError::new_parse_error(err, source))?;

        debug!("Flow compiled successfully");
        Ok(document)
    }

    /// Compile source text, never failing: the outcome carries the document
    /// or the fatal error, plus lint warnings either way.
    ///
    /// This is the editor-facing entry point; [`FlowCompiler::parse`] is the
    /// strict one.
    pub fn compile(&self, source: &str) -> CompileOutcome {
        let compile_config = self.config.compile_config();
        let outcome = flujo_parser::compile(source, &compile_config);
        debug!(ok = outcome.ok(), warnings = outcome.warnings.len(); "Flow compiled");
        outcome
    }

    /// Serialize a document to JSON, pretty-printed if the configuration
    /// says so.
    pub fn to_json(&self, document: &Document) -> Result<String, FlujoError> {
        let json = if self.config.document().pretty() {
            document.to_json_pretty()?
        } else {
            document.to_json()?
        };
        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compiler_round_trip() {
        let compiler = FlowCompiler::default();
        let document = compiler
            .parse("Pantalla A:\nTitulo: Hola\n")
            .expect("compile failed");
        let json = compiler.to_json(&document).expect("serialize failed");
        assert!(json.contains("\"SingleColumnLayout\""));
    }

    #[test]
    fn test_parse_error_carries_source() {
        let compiler = FlowCompiler::default();
        let source = "Pantalla A\n";
        match compiler.parse(source) {
            Err(FlujoError::Parse { src, .. }) => assert_eq!(src, source),
            other => panic!("expected parse error, got {other:?}"),
        }
    }
}
