//! Compiler configuration.

use flujo_core::{document::DEFAULT_VERSION, vocab::Vocabulary};

/// Settings for one compilation.
///
/// The defaults accept every keyword spelling the language has ever had and
/// emit the current document format version; profiles that pin a stricter
/// vocabulary (or an older version string) override the fields.
#[derive(Debug, Clone, PartialEq)]
pub struct CompileConfig {
    /// The keyword spellings the grammar accepts.
    pub vocab: Vocabulary,
    /// The `version` string emitted at the document root.
    pub document_version: String,
}

impl Default for CompileConfig {
    fn default() -> Self {
        Self {
            vocab: Vocabulary::default(),
            document_version: DEFAULT_VERSION.to_string(),
        }
    }
}
