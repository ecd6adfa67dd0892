//! Configuration types for flow compilation.
//!
//! All types implement [`serde::Deserialize`] so configuration can be loaded
//! from external sources (the CLI loads a TOML file into [`AppConfig`]).
//!
//! # Example
//!
//! ```
//! # use flujo::config::AppConfig;
//! let config = AppConfig::default();
//! assert!(config.grammar().legacy_list_alias());
//! ```

use serde::Deserialize;

use flujo_core::vocab::Vocabulary;
use flujo_parser::CompileConfig;

/// Top-level application configuration combining grammar and document
/// settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Grammar profile section.
    #[serde(default)]
    grammar: GrammarConfig,

    /// Output document section.
    #[serde(default)]
    document: DocumentConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from the given sections.
    pub fn new(grammar: GrammarConfig, document: DocumentConfig) -> Self {
        Self { grammar, document }
    }

    /// Returns the grammar configuration.
    pub fn grammar(&self) -> &GrammarConfig {
        &self.grammar
    }

    /// Returns the document configuration.
    pub fn document(&self) -> &DocumentConfig {
        &self.document
    }

    /// Lower this configuration into the compiler's settings.
    pub fn compile_config(&self) -> CompileConfig {
        let defaults = CompileConfig::default();
        CompileConfig {
            vocab: Vocabulary {
                legacy_list_alias: self.grammar.legacy_list_alias,
                verbose_navigation: self.grammar.verbose_navigation,
                body_keyword: self.grammar.body_keyword,
            },
            document_version: self
                .document
                .version
                .clone()
                .unwrap_or(defaults.document_version),
        }
    }
}

/// Which keyword spellings the grammar accepts.
///
/// The defaults accept every spelling the language has ever had, so existing
/// documents keep compiling; profiles that want the current spellings only
/// disable the legacy fields.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GrammarConfig {
    /// Accept `Opciones` as an alias of `Lista`.
    legacy_list_alias: bool,
    /// Accept the verbose `Ir a pantalla` navigation spelling.
    verbose_navigation: bool,
    /// Accept the `Mostramos:` body keyword.
    body_keyword: bool,
}

impl Default for GrammarConfig {
    fn default() -> Self {
        let vocab = Vocabulary::default();
        Self {
            legacy_list_alias: vocab.legacy_list_alias,
            verbose_navigation: vocab.verbose_navigation,
            body_keyword: vocab.body_keyword,
        }
    }
}

impl GrammarConfig {
    pub fn legacy_list_alias(&self) -> bool {
        self.legacy_list_alias
    }

    pub fn verbose_navigation(&self) -> bool {
        self.verbose_navigation
    }

    pub fn body_keyword(&self) -> bool {
        self.body_keyword
    }
}

/// Output document settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DocumentConfig {
    /// The `version` string emitted at the document root; the compiler's
    /// default when unset.
    version: Option<String>,
    /// Pretty-print the emitted JSON.
    pretty: bool,
}

impl DocumentConfig {
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn pretty(&self) -> bool {
        self.pretty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_matches_compiler_defaults() {
        let config = AppConfig::default().compile_config();
        assert_eq!(config, CompileConfig::default());
    }

    #[test]
    fn test_partial_sections_fall_back_to_defaults() {
        let config: AppConfig = toml::from_str(
            "[grammar]\n\
             legacy_list_alias = false\n\
             [document]\n\
             version = \"4.0\"\n",
        )
        .unwrap();
        let compile = config.compile_config();
        assert!(!compile.vocab.legacy_list_alias);
        assert!(compile.vocab.verbose_navigation);
        assert_eq!(compile.document_version, "4.0");
        assert!(!config.document().pretty());
    }
}
