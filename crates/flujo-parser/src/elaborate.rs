//! Document synthesis: the validated flow AST to the output [`Document`].
//!
//! This stage resolves everything the builder deferred:
//!
//! - navigation edges, explicit (forward references allowed) and implicit
//!   (next screen in declaration order; the last screen gets a terminal
//!   `complete` action instead);
//! - catalog assembly: every option list becomes one data-source entry keyed
//!   by the slug of its name, referenced by the matching dropdown;
//! - form wrapping: explicit `Formulario` blocks are honored, loose lists
//!   are wrapped in an implicit `form_<screen_id>` form, and the screen's
//!   single footer lands in its last form (an otherwise empty implicit form
//!   is synthesized when a footer is needed and no form exists).
//!
//! Given a valid AST the only fatal error left is an unknown navigation
//! target.

use flujo_core::{
    document::{Child, ClickAction, DataSource, Document, FormChild, Layout, OptionItem, Screen},
    slug::slugify,
};
use indexmap::IndexMap;

use crate::{
    config::CompileConfig,
    error::{Diagnostic, ErrorCode, Result},
    parser_types::{EntryNode, Flow, ListNode, NavDirective, ScreenItem, ScreenNode},
};

/// Footer labels per action kind.
const LABEL_CONTINUE: &str = "Continuar";
const LABEL_EXIT: &str = "Salir";
const LABEL_CANCEL: &str = "Cancelar";

/// Lower the flow into the final document.
pub(crate) fn elaborate(flow: &Flow<'_>, config: &CompileConfig) -> Result<Document> {
    let screen_ids: Vec<String> = flow
        .screens
        .iter()
        .map(|screen| slugify(screen.name.inner()))
        .collect();

    let mut document = Document::new(config.document_version.clone());
    for (index, screen) in flow.screens.iter().enumerate() {
        let next_id = screen_ids.get(index + 1).map(String::as_str);
        document
            .screens
            .push(lower_screen(screen, &screen_ids[index], next_id, &screen_ids)?);
    }

    log::debug!(screens = document.screens.len(); "Document synthesized");
    Ok(document)
}

fn lower_screen(
    screen: &ScreenNode<'_>,
    id: &str,
    next_id: Option<&str>,
    screen_ids: &[String],
) -> Result<Screen> {
    let mut children = Vec::new();
    let mut data: IndexMap<String, DataSource> = IndexMap::new();
    let mut loose_dropdowns: Vec<FormChild> = Vec::new();

    for item in &screen.items {
        match item {
            ScreenItem::Heading(text) => {
                children.push(Child::TextSubheading {
                    text: (*text.inner()).to_owned(),
                });
            }
            ScreenItem::Body(text) => {
                children.push(Child::TextBody {
                    text: (*text.inner()).to_owned(),
                });
            }
            ScreenItem::Image { src, width, height } => {
                children.push(Child::Image {
                    src: (*src.inner()).to_owned(),
                    width: *width,
                    height: *height,
                });
            }
            ScreenItem::List(list) => {
                loose_dropdowns.push(lower_list(list, &mut data));
            }
            ScreenItem::Form(form) => {
                let fields = form
                    .lists
                    .iter()
                    .map(|list| lower_list(list, &mut data))
                    .collect();
                children.push(Child::Form {
                    name: slugify(form.name.inner()),
                    children: fields,
                });
            }
        }
    }

    let footer = footer_action(screen, next_id, screen_ids)?;
    assemble_forms(&mut children, loose_dropdowns, footer, id);

    Ok(Screen {
        id: id.to_owned(),
        title: (*screen.name.inner()).to_owned(),
        layout: Layout::single_column(children),
        data,
    })
}

/// Lower one option list: register its catalog entry and return the
/// matching dropdown field.
fn lower_list(list: &ListNode<'_>, data: &mut IndexMap<String, DataSource>) -> FormChild {
    let key = slugify(list.name.inner());
    let options: Vec<OptionItem> = list.entries.iter().map(lower_entry).collect();

    // Required unless the author said otherwise, or every option is inert.
    let required = list
        .required
        .unwrap_or_else(|| options.iter().any(|option| option.enabled));

    let dropdown = FormChild::Dropdown {
        label: format!("Seleccione {}", list.name.inner()),
        name: key.clone(),
        required,
        data_source: format!("${{data.{key}}}"),
    };
    data.insert(key, DataSource { example: options });
    dropdown
}

/// Lower one option entry into `{id, title, enabled}`.
///
/// `<id> - <display>` splits on the first ` - `; the id side is slugified.
/// A display-only entry that is exactly a date-like token keeps the token
/// verbatim as both id and title, so authored dates survive unmangled.
fn lower_entry(entry: &EntryNode<'_>) -> OptionItem {
    let text = *entry.text.inner();
    let (id, title) = match text.split_once(" - ") {
        Some((id_part, display)) => (slugify(id_part), display.trim().to_owned()),
        None if is_date_like(text) => (text.to_owned(), text.to_owned()),
        None => (slugify(text), text.to_owned()),
    };
    OptionItem {
        id,
        title,
        enabled: !entry.optional,
    }
}

/// `dddd-dd-dd` or `dddd dd dd`, nothing else on the line.
fn is_date_like(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() == 10
        && bytes[..4].iter().all(u8::is_ascii_digit)
        && (bytes[4] == b'-' || bytes[4] == b' ')
        && bytes[5..7].iter().all(u8::is_ascii_digit)
        && bytes[7] == bytes[4]
        && bytes[8..10].iter().all(u8::is_ascii_digit)
}

/// Decide the screen's footer action, if it needs one.
///
/// Explicit directives always produce a footer. Without one, every screen
/// except the last gets an implicit edge to the next screen; the last screen
/// gets a terminal action only when it carries a form to submit.
fn footer_action(
    screen: &ScreenNode<'_>,
    next_id: Option<&str>,
    screen_ids: &[String],
) -> Result<Option<FormChild>> {
    if let Some(directive) = &screen.navigation {
        let (label, action) = match directive.inner() {
            NavDirective::Goto(target) => {
                let target_id = slugify(target);
                if !screen_ids.contains(&target_id) {
                    return Err(Diagnostic::error(format!(
                        "la pantalla de destino `{target}` no existe"
                    ))
                    .with_code(ErrorCode::E300)
                    .with_label(directive.span(), "destino desconocido")
                    .with_help("el destino debe coincidir con una `Pantalla` declarada"));
                }
                (LABEL_CONTINUE, ClickAction::navigate(target_id))
            }
            NavDirective::Exit => (LABEL_EXIT, ClickAction::complete()),
            NavDirective::Cancel => (LABEL_CANCEL, ClickAction::complete()),
        };
        return Ok(Some(FormChild::Footer {
            label: label.to_owned(),
            on_click_action: action,
        }));
    }

    let action = match next_id {
        Some(next) => ClickAction::navigate(next.to_owned()),
        None if screen.lists().next().is_some() => ClickAction::complete(),
        // Last screen, nothing to submit: no outgoing edge at all.
        None => return Ok(None),
    };
    Ok(Some(FormChild::Footer {
        label: LABEL_CONTINUE.to_owned(),
        on_click_action: action,
    }))
}

/// Attach loose dropdowns and the footer to the screen's children.
fn assemble_forms(
    children: &mut Vec<Child>,
    loose_dropdowns: Vec<FormChild>,
    footer: Option<FormChild>,
    screen_id: &str,
) {
    let mut implicit: Vec<FormChild> = loose_dropdowns;

    if let Some(footer) = footer {
        if implicit.is_empty() {
            // Prefer the last explicit form over synthesizing an empty one.
            if let Some(Child::Form { children: fields, .. }) = children
                .iter_mut()
                .rev()
                .find(|child| matches!(child, Child::Form { .. }))
            {
                fields.push(footer);
                return;
            }
        }
        implicit.push(footer);
    }

    if !implicit.is_empty() {
        children.push(Child::Form {
            name: format!("form_{screen_id}"),
            children: implicit,
        });
    }
}
