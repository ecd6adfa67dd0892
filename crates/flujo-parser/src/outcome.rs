//! The merged result of one compilation call.
//!
//! [`CompileOutcome`] carries the document or the single fatal error, plus
//! the lint warnings, which are present either way. The editor surface
//! consumes the same information in serialized form through
//! [`CompileOutcome::editor_payload`], with byte spans converted to the
//! 1-indexed line/column addresses it highlights.

use flujo_core::document::Document;
use serde::Serialize;

use crate::{
    error::{Diagnostic, ParseError},
    span::{LineIndex, SourceLocation},
};

/// What one `compile` call produced.
#[derive(Debug)]
pub struct CompileOutcome {
    /// The compiled document; present iff no fatal error occurred.
    pub document: Option<Document>,
    /// The first (and only) fatal error, if any.
    pub error: Option<ParseError>,
    /// Non-fatal warnings, present regardless of the parse outcome.
    pub warnings: Vec<Diagnostic>,
}

impl CompileOutcome {
    pub fn ok(&self) -> bool {
        self.error.is_none()
    }

    /// Serialize the outcome for the editor, resolving spans against the
    /// source the outcome was compiled from.
    pub fn editor_payload(&self, source: &str) -> EditorPayload<'_> {
        let index = LineIndex::new(source);
        EditorPayload {
            ok: self.ok(),
            document: self.document.as_ref(),
            error: self
                .error
                .as_ref()
                .map(|err| EditorDiagnostic::new(err.diagnostic(), &index)),
            warnings: self
                .warnings
                .iter()
                .map(|warning| EditorDiagnostic::new(warning, &index))
                .collect(),
        }
    }
}

/// The editor-facing result shape.
#[derive(Debug, Serialize)]
pub struct EditorPayload<'a> {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<&'a Document>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<EditorDiagnostic>,
    pub warnings: Vec<EditorDiagnostic>,
}

/// A positioned message in editor terms: 1-indexed lines and columns,
/// inclusive end.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EditorDiagnostic {
    pub message: String,
    pub location: SourceLocation,
}

impl EditorDiagnostic {
    fn new(diagnostic: &Diagnostic, index: &LineIndex) -> Self {
        let location = diagnostic
            .primary_span()
            .map(|span| index.location(span))
            .unwrap_or_else(SourceLocation::document_start);
        Self {
            message: diagnostic.message().to_string(),
            location,
        }
    }
}
