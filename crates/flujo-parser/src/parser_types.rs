//! AST types produced by the builder.
//!
//! Leaf values (names, text) are wrapped in [`Spanned`] so later stages can
//! attribute errors without re-scanning the source. Composite nodes keep the
//! span of their declaring line.

use crate::span::{Span, Spanned};

/// A complete parsed flow: the screens in declaration order.
#[derive(Debug, PartialEq)]
pub(crate) struct Flow<'src> {
    pub screens: Vec<ScreenNode<'src>>,
}

/// One `Pantalla` block.
#[derive(Debug, PartialEq)]
pub(crate) struct ScreenNode<'src> {
    pub name: Spanned<&'src str>,
    pub items: Vec<ScreenItem<'src>>,
    /// At most one navigation directive per screen; duplicates are rejected
    /// at build time.
    pub navigation: Option<Spanned<NavDirective<'src>>>,
}

/// Where a screen sends the user when its footer is tapped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum NavDirective<'src> {
    /// Explicit jump to a named screen; resolved during synthesis so forward
    /// references work.
    Goto(&'src str),
    /// Terminal: end the flow.
    Exit,
    /// Terminal: abort the flow.
    Cancel,
}

/// One content item of a screen, in authored order.
#[derive(Debug, PartialEq)]
pub(crate) enum ScreenItem<'src> {
    Heading(Spanned<&'src str>),
    Body(Spanned<&'src str>),
    Image {
        src: Spanned<&'src str>,
        width: Option<u32>,
        height: Option<u32>,
    },
    List(ListNode<'src>),
    Form(FormNode<'src>),
}

/// An option list (`Lista`/`Opciones` block).
#[derive(Debug, PartialEq)]
pub(crate) struct ListNode<'src> {
    pub name: Spanned<&'src str>,
    /// `Si`/`No` on the header, overriding required-field inference.
    pub required: Option<bool>,
    pub entries: Vec<EntryNode<'src>>,
    /// Span of the header line, for empty-list errors.
    pub header_span: Span,
}

/// One numbered option entry.
#[derive(Debug, PartialEq)]
pub(crate) struct EntryNode<'src> {
    /// `Opcional:` marker: presented but not selectable.
    pub optional: bool,
    pub text: Spanned<&'src str>,
}

/// An explicit `Formulario` block grouping the lists declared inside it.
#[derive(Debug, PartialEq)]
pub(crate) struct FormNode<'src> {
    pub name: Spanned<&'src str>,
    pub lists: Vec<ListNode<'src>>,
}

impl<'src> ScreenNode<'src> {
    /// All option lists of the screen, whether loose or inside a form.
    pub fn lists(&self) -> impl Iterator<Item = &ListNode<'src>> {
        self.items.iter().flat_map(|item| {
            let lists: &[ListNode<'src>] = match item {
                ScreenItem::List(list) => std::slice::from_ref(list),
                ScreenItem::Form(form) => &form.lists,
                _ => &[],
            };
            lists.iter()
        })
    }
}
