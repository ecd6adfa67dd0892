//! Semantic validation of the flow AST, between build and synthesis.
//!
//! Checks identifier uniqueness at the granularity the output document
//! requires: screen ids unique across the document, catalog keys unique
//! within each screen. Both are compared after slug derivation, since two
//! distinct spellings that slugify to the same id would collide in the
//! output.

use std::collections::HashMap;

use flujo_core::slug::slugify;

use crate::{
    error::{Diagnostic, ErrorCode, Result},
    parser_types::Flow,
    span::Span,
};

/// Validate the flow; the first violation aborts.
pub(crate) fn validate(flow: &Flow<'_>) -> Result<()> {
    let mut seen_screens: HashMap<String, Span> = HashMap::new();

    for screen in &flow.screens {
        let id = slugify(screen.name.inner());
        if let Some(first) = seen_screens.get(&id) {
            return Err(Diagnostic::error(format!(
                "la pantalla `{}` ya está declarada",
                screen.name.inner()
            ))
            .with_code(ErrorCode::E200)
            .with_label(screen.name.span(), "declaración repetida")
            .with_secondary_label(*first, "la primera declaración está aquí")
            .with_help("usa un nombre distinto para cada pantalla"));
        }
        seen_screens.insert(id, screen.name.span());

        let mut seen_lists: HashMap<String, Span> = HashMap::new();
        for list in screen.lists() {
            let key = slugify(list.name.inner());
            if let Some(first) = seen_lists.get(&key) {
                return Err(Diagnostic::error(format!(
                    "la lista `{}` ya está declarada en esta pantalla",
                    list.name.inner()
                ))
                .with_code(ErrorCode::E201)
                .with_label(list.name.span(), "lista repetida")
                .with_secondary_label(*first, "la primera declaración está aquí")
                .with_help("cada lista de una pantalla necesita un nombre distinto"));
            }
            seen_lists.insert(key, list.name.span());
        }
    }

    log::trace!(screens = flow.screens.len(); "Flow validated");
    Ok(())
}
