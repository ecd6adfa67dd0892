//! The keyword vocabulary of the Flujo language.
//!
//! The grammar and every tool that needs the same word list (editor
//! autocompletion, syntax highlighting) share this single table, so the two
//! can never drift apart. Keywords are case- and accent-sensitive and matched
//! as whole words.
//!
//! The language accumulated alternate spellings over its history (a verbose
//! `Ir a pantalla` next to the compact `IrAPantalla`, an `Opciones` alias for
//! `Lista`). [`Vocabulary`] models which of those spellings a given grammar
//! profile accepts instead of hard-coding one set.

/// The statement kind a keyword introduces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementKind {
    /// `Pantalla <nombre>:` opens a screen block.
    Screen,
    /// `Titulo: <texto>` sets the heading of the current screen.
    Title,
    /// `Mostramos: <texto>` adds body text to the current screen.
    Body,
    /// `Imagen: "<src>" [ancho] [alto]` embeds an image.
    Image,
    /// `Lista <nombre>:` (or the `Opciones` alias) opens an option list.
    List,
    /// `Opcional:` prefix marking an option entry as not selectable.
    OptionalMarker,
    /// `IrAPantalla <destino>` / `Ir a pantalla <destino>` explicit navigation.
    Navigation,
    /// `Salir` ends the flow from this screen.
    Exit,
    /// `Cancelar` aborts the flow from this screen.
    Cancel,
    /// `Si` affirmative literal (required-flag on a list header).
    Affirmative,
    /// `No` negative literal (required-flag on a list header).
    Negative,
    /// `Formulario <nombre>:` opens an explicit form block.
    FormOpen,
    /// `FinFormulario` closes an explicit form block.
    FormClose,
}

/// One entry of the keyword table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Keyword {
    pub literal: &'static str,
    pub kind: StatementKind,
}

/// Every keyword the language has ever recognized, across all profiles.
///
/// The verbose navigation spelling is matched on its first word; the grammar
/// checks the full phrase.
const TABLE: &[Keyword] = &[
    Keyword { literal: "Pantalla", kind: StatementKind::Screen },
    Keyword { literal: "Titulo", kind: StatementKind::Title },
    Keyword { literal: "Mostramos", kind: StatementKind::Body },
    Keyword { literal: "Imagen", kind: StatementKind::Image },
    Keyword { literal: "Lista", kind: StatementKind::List },
    Keyword { literal: "Opciones", kind: StatementKind::List },
    Keyword { literal: "Opcional", kind: StatementKind::OptionalMarker },
    Keyword { literal: "IrAPantalla", kind: StatementKind::Navigation },
    Keyword { literal: "Ir", kind: StatementKind::Navigation },
    Keyword { literal: "Salir", kind: StatementKind::Exit },
    Keyword { literal: "Cancelar", kind: StatementKind::Cancel },
    Keyword { literal: "Si", kind: StatementKind::Affirmative },
    Keyword { literal: "No", kind: StatementKind::Negative },
    Keyword { literal: "Formulario", kind: StatementKind::FormOpen },
    Keyword { literal: "FinFormulario", kind: StatementKind::FormClose },
];

/// The keyword set accepted by one grammar profile.
///
/// The default profile accepts everything, including legacy spellings kept
/// for documents written against older grammar versions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    /// Accept `Opciones` as an alias of `Lista`.
    pub legacy_list_alias: bool,
    /// Accept the verbose `Ir a pantalla <destino>` spelling.
    pub verbose_navigation: bool,
    /// Accept the `Mostramos:` body keyword (plain text lines always work).
    pub body_keyword: bool,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            legacy_list_alias: true,
            verbose_navigation: true,
            body_keyword: true,
        }
    }
}

impl Vocabulary {
    /// The compact profile: only the current spellings, no legacy aliases.
    pub fn compact() -> Self {
        Self {
            legacy_list_alias: false,
            verbose_navigation: false,
            body_keyword: true,
        }
    }

    /// Look up the statement kind a leading word introduces, if this profile
    /// accepts it.
    pub fn lookup(&self, word: &str) -> Option<StatementKind> {
        let keyword = TABLE.iter().find(|k| k.literal == word)?;
        if !self.accepts(keyword) {
            return None;
        }
        Some(keyword.kind)
    }

    /// Iterate the keywords this profile accepts, for tooling such as
    /// autocompletion.
    pub fn keywords(&self) -> impl Iterator<Item = &'static Keyword> + '_ {
        TABLE.iter().filter(|k| self.accepts(k))
    }

    fn accepts(&self, keyword: &Keyword) -> bool {
        match (keyword.literal, keyword.kind) {
            ("Opciones", StatementKind::List) => self.legacy_list_alias,
            ("Ir", StatementKind::Navigation) => self.verbose_navigation,
            ("Mostramos", StatementKind::Body) => self.body_keyword,
            _ => true,
        }
    }
}
