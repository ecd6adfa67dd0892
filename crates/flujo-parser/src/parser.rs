//! AST builder: classified statements to a [`Flow`] tree.
//!
//! A single top-to-bottom scan with no backtracking. Once a screen opens,
//! only statements valid inside a screen are accepted until the next
//! `Pantalla` or end of input. The first structural violation aborts the
//! build; the caller receives exactly one diagnostic.
//!
//! Open option lists close on any new keyword statement or on two
//! consecutive blank lines, so a stray blank inside a list does not split it.

use crate::{
    error::{Diagnostic, ErrorCode, Result},
    lexer::{PositionedStatement, Statement},
    parser_types::{EntryNode, Flow, FormNode, ListNode, NavDirective, ScreenItem, ScreenNode},
    span::{Span, Spanned},
};

/// Build the flow AST from the statement sequence.
pub(crate) fn build_flow<'src>(statements: Vec<PositionedStatement<'src>>) -> Result<Flow<'src>> {
    let mut builder = FlowBuilder::default();
    for positioned in statements {
        builder.push(positioned)?;
    }
    builder.finish()
}

#[derive(Default)]
struct FlowBuilder<'src> {
    screens: Vec<ScreenNode<'src>>,
    current: Option<ScreenState<'src>>,
}

/// The screen currently being assembled, with its open blocks.
struct ScreenState<'src> {
    name: Spanned<&'src str>,
    items: Vec<ScreenItem<'src>>,
    navigation: Option<Spanned<NavDirective<'src>>>,
    open_list: Option<OpenList<'src>>,
    open_form: Option<OpenForm<'src>>,
}

struct OpenList<'src> {
    node: ListNode<'src>,
    /// Consecutive blank lines seen since the last entry.
    blank_run: usize,
}

struct OpenForm<'src> {
    name: Spanned<&'src str>,
    lists: Vec<ListNode<'src>>,
    open_span: Span,
}

impl<'src> FlowBuilder<'src> {
    fn push(&mut self, positioned: PositionedStatement<'src>) -> Result<()> {
        let span = positioned.span;

        if let Statement::Screen { name } = positioned.statement {
            self.finish_screen()?;
            self.current = Some(ScreenState {
                name,
                items: Vec::new(),
                navigation: None,
                open_list: None,
                open_form: None,
            });
            return Ok(());
        }

        let Some(screen) = self.current.as_mut() else {
            return match positioned.statement {
                Statement::Blank => Ok(()),
                _ => Err(Diagnostic::error("el contenido debe estar dentro de una pantalla")
                    .with_code(ErrorCode::E100)
                    .with_label(span, "fuera de toda pantalla")
                    .with_help("comienza el documento con `Pantalla <nombre>:`")),
            };
        };

        match positioned.statement {
            Statement::Screen { .. } => unreachable!("handled above"),
            Statement::Blank => {
                if let Some(open) = screen.open_list.as_mut() {
                    open.blank_run += 1;
                    if open.blank_run >= 2 {
                        screen.close_list()?;
                    }
                }
                Ok(())
            }
            Statement::Entry { optional, text } => {
                let Some(open) = screen.open_list.as_mut() else {
                    return Err(Diagnostic::error("la opción numerada está fuera de una lista")
                        .with_code(ErrorCode::E101)
                        .with_label(span, "no hay una lista abierta")
                        .with_help("declara la lista primero, por ejemplo `Lista tipo:`"));
                };
                open.blank_run = 0;
                open.node.entries.push(EntryNode { optional, text });
                Ok(())
            }
            Statement::List { name, required } => {
                screen.close_list()?;
                screen.open_list = Some(OpenList {
                    node: ListNode {
                        name,
                        required,
                        entries: Vec::new(),
                        header_span: span,
                    },
                    blank_run: 0,
                });
                Ok(())
            }
            Statement::Title { text } => {
                screen.close_list()?;
                screen.items.push(ScreenItem::Heading(text));
                Ok(())
            }
            Statement::Body { text } => {
                screen.close_list()?;
                screen.items.push(ScreenItem::Body(text));
                Ok(())
            }
            // Free text inside a screen is body content.
            Statement::Raw { text } => {
                screen.close_list()?;
                screen.items.push(ScreenItem::Body(text));
                Ok(())
            }
            Statement::Image { src, width, height } => {
                screen.close_list()?;
                screen.items.push(ScreenItem::Image { src, width, height });
                Ok(())
            }
            Statement::Navigation { target } => {
                screen.close_list()?;
                screen.set_navigation(Spanned::new(NavDirective::Goto(target.into_inner()), span))
            }
            Statement::Exit => {
                screen.close_list()?;
                screen.set_navigation(Spanned::new(NavDirective::Exit, span))
            }
            Statement::Cancel => {
                screen.close_list()?;
                screen.set_navigation(Spanned::new(NavDirective::Cancel, span))
            }
            Statement::FormOpen { name } => {
                screen.close_list()?;
                if let Some(open) = &screen.open_form {
                    return Err(Diagnostic::error("no se pueden anidar formularios")
                        .with_code(ErrorCode::E106)
                        .with_label(span, "formulario anidado")
                        .with_secondary_label(open.open_span, "el formulario exterior abre aquí")
                        .with_help("cierra el formulario anterior con `FinFormulario`"));
                }
                screen.open_form = Some(OpenForm {
                    name,
                    lists: Vec::new(),
                    open_span: span,
                });
                Ok(())
            }
            Statement::FormClose => {
                screen.close_list()?;
                let Some(form) = screen.open_form.take() else {
                    return Err(Diagnostic::error(
                        "`FinFormulario` sin un `Formulario` abierto",
                    )
                    .with_code(ErrorCode::E105)
                    .with_label(span, "no hay formulario que cerrar")
                    .with_help("abre el bloque con `Formulario <nombre>:`"));
                };
                screen.items.push(ScreenItem::Form(FormNode {
                    name: form.name,
                    lists: form.lists,
                }));
                Ok(())
            }
        }
    }

    /// Close the screen being assembled and append it.
    fn finish_screen(&mut self) -> Result<()> {
        let Some(mut screen) = self.current.take() else {
            return Ok(());
        };
        screen.close_list()?;
        if let Some(form) = &screen.open_form {
            return Err(Diagnostic::error("el formulario no fue cerrado")
                .with_code(ErrorCode::E104)
                .with_label(form.open_span, "abre aquí y nunca se cierra")
                .with_help("agrega `FinFormulario` antes del final de la pantalla"));
        }
        self.screens.push(ScreenNode {
            name: screen.name,
            items: screen.items,
            navigation: screen.navigation,
        });
        Ok(())
    }

    fn finish(mut self) -> Result<Flow<'src>> {
        self.finish_screen()?;
        if self.screens.is_empty() {
            return Err(Diagnostic::error("el documento no contiene ninguna pantalla")
                .with_code(ErrorCode::E202)
                .with_label(Span::default(), "sin pantallas")
                .with_help("declara al menos una, por ejemplo `Pantalla Bienvenida:`"));
        }
        log::debug!(screens = self.screens.len(); "Built flow");
        Ok(Flow {
            screens: self.screens,
        })
    }
}

impl<'src> ScreenState<'src> {
    /// Flush the open option list, if any, into the form or the screen.
    ///
    /// A list that closes with no entries is a structural error pointing at
    /// its header.
    fn close_list(&mut self) -> Result<()> {
        let Some(open) = self.open_list.take() else {
            return Ok(());
        };
        if open.node.entries.is_empty() {
            return Err(Diagnostic::error("la lista no tiene ninguna opción")
                .with_code(ErrorCode::E102)
                .with_label(open.node.header_span, "lista vacía")
                .with_help("agrega al menos una opción numerada, por ejemplo `1. General`"));
        }
        match self.open_form.as_mut() {
            Some(form) => form.lists.push(open.node),
            None => self.items.push(ScreenItem::List(open.node)),
        }
        Ok(())
    }

    fn set_navigation(&mut self, directive: Spanned<NavDirective<'src>>) -> Result<()> {
        if let Some(existing) = &self.navigation {
            return Err(Diagnostic::error(
                "la pantalla ya tiene una directiva de navegación",
            )
            .with_code(ErrorCode::E103)
            .with_label(directive.span(), "segunda directiva")
            .with_secondary_label(existing.span(), "la primera está aquí")
            .with_help("una pantalla solo puede declarar un destino"));
        }
        self.navigation = Some(directive);
        Ok(())
    }
}
