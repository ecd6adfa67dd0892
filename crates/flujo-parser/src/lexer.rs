//! Line classifier for Flujo source text.
//!
//! The grammar is line-oriented: every physical line is classified into one
//! [`Statement`] according to its leading keyword, with comments discarded
//! and blank lines kept (they matter as list terminators). Lines that match
//! no keyword are classified as [`Statement::Raw`] and deferred to the AST
//! builder, which can produce a more specific error (or accept them as body
//! text inside a screen) than the classifier could.
//!
//! Lines that *do* start with a keyword but are malformed (missing `:`,
//! missing name, unterminated image source) fail here, with the span
//! pointing at the offending line.

use winnow::{
    Parser as _,
    ascii::{digit1, space0},
    error::ModalResult,
    stream::{LocatingSlice, Location},
    token::take_till,
};

use flujo_core::vocab::{StatementKind, Vocabulary};

use crate::{
    error::{Diagnostic, ErrorCode, Result},
    span::{Span, Spanned},
};

/// One classified source line.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Statement<'src> {
    /// `Pantalla <nombre>:`
    Screen { name: Spanned<&'src str> },
    /// `Titulo: <texto>`
    Title { text: Spanned<&'src str> },
    /// `Mostramos: <texto>`
    Body { text: Spanned<&'src str> },
    /// `Imagen: "<src>" [ancho] [alto]`
    Image {
        src: Spanned<&'src str>,
        width: Option<u32>,
        height: Option<u32>,
    },
    /// `Lista <nombre> [Si|No]:` (or `Opciones` in the legacy profile)
    List {
        name: Spanned<&'src str>,
        required: Option<bool>,
    },
    /// `N. [Opcional:] <texto>`
    Entry {
        optional: bool,
        text: Spanned<&'src str>,
    },
    /// `IrAPantalla <destino>` / `Ir a pantalla <destino>`
    Navigation { target: Spanned<&'src str> },
    /// `Salir`
    Exit,
    /// `Cancelar`
    Cancel,
    /// `Formulario <nombre>:`
    FormOpen { name: Spanned<&'src str> },
    /// `FinFormulario`
    FormClose,
    /// An empty (or whitespace-only) line.
    Blank,
    /// A non-blank line matching no keyword; the builder decides its fate.
    Raw { text: Spanned<&'src str> },
}

/// A statement with the span of its originating line.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PositionedStatement<'src> {
    pub statement: Statement<'src>,
    pub span: Span,
}

/// Classify the full source text into a statement per line.
///
/// Comment lines (`//`) are discarded before any other matching. The first
/// malformed keyword line aborts classification.
pub(crate) fn classify<'src>(
    source: &'src str,
    vocab: &Vocabulary,
) -> Result<Vec<PositionedStatement<'src>>> {
    let mut statements = Vec::new();
    let mut offset = 0;

    for raw_line in source.split_inclusive('\n') {
        let line_start = offset;
        offset += raw_line.len();

        let content = raw_line.strip_suffix('\n').unwrap_or(raw_line);
        let content = content.strip_suffix('\r').unwrap_or(content);

        let end_trimmed = content.trim_end();
        let trimmed = end_trimmed.trim_start();
        let base = line_start + (end_trimmed.len() - trimmed.len());
        let span = Span::new(base..base + trimmed.len());

        if trimmed.is_empty() {
            statements.push(PositionedStatement {
                statement: Statement::Blank,
                span,
            });
            continue;
        }

        if trimmed.starts_with("//") {
            continue;
        }

        let statement = classify_line(trimmed, base, span, vocab)?;
        statements.push(PositionedStatement { statement, span });
    }

    log::trace!(count = statements.len(); "Classified statements");
    Ok(statements)
}

/// Classify one trimmed, non-blank, non-comment line.
fn classify_line<'src>(
    line: &'src str,
    base: usize,
    line_span: Span,
    vocab: &Vocabulary,
) -> Result<Statement<'src>> {
    if let Some(entry) = numbered_entry(line, base) {
        return Ok(entry);
    }

    let word_end = line
        .find(|c: char| c.is_whitespace() || c == ':')
        .unwrap_or(line.len());
    let word = &line[..word_end];
    let rest = &line[word_end..];

    let Some(kind) = vocab.lookup(word) else {
        return Ok(raw(line, base));
    };

    match kind {
        StatementKind::Screen => {
            named_declaration(rest, base + word_end, line_span, "pantalla")
                .map(|name| Statement::Screen { name })
        }
        StatementKind::Title => {
            keyword_text(rest, base + word_end, line_span, "Titulo").map(|text| Statement::Title { text })
        }
        StatementKind::Body => {
            keyword_text(rest, base + word_end, line_span, "Mostramos").map(|text| Statement::Body { text })
        }
        StatementKind::Image => image_statement(rest, base + word_end, line_span),
        StatementKind::List => list_statement(rest, base + word_end, line_span),
        StatementKind::Navigation => navigation_statement(word, rest, base + word_end, line, base),
        StatementKind::Exit => {
            if rest.trim().is_empty() {
                Ok(Statement::Exit)
            } else {
                Ok(raw(line, base))
            }
        }
        StatementKind::Cancel => {
            if rest.trim().is_empty() {
                Ok(Statement::Cancel)
            } else {
                Ok(raw(line, base))
            }
        }
        StatementKind::FormOpen => {
            named_declaration(rest, base + word_end, line_span, "formulario")
                .map(|name| Statement::FormOpen { name })
        }
        StatementKind::FormClose => {
            if rest.trim().is_empty() {
                Ok(Statement::FormClose)
            } else {
                Ok(raw(line, base))
            }
        }
        // `Si`/`No` are literals, not statement openers.
        StatementKind::Affirmative | StatementKind::Negative | StatementKind::OptionalMarker => {
            Ok(raw(line, base))
        }
    }
}

fn raw<'src>(line: &'src str, base: usize) -> Statement<'src> {
    Statement::Raw {
        text: Spanned::new(line, Span::new(base..base + line.len())),
    }
}

/// Parse a numbered option entry: `N. [Opcional:] <texto>`.
fn numbered_entry<'src>(line: &'src str, base: usize) -> Option<Statement<'src>> {
    let digits = line.len() - line.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 || !line[digits..].starts_with('.') {
        return None;
    }

    let body_offset = digits + 1;
    let body = line[body_offset..].trim_start();
    let body_start = base + line.len() - body.len();

    // `Opcional:` prefix marks the entry as presented but not selectable.
    if let Some(after) = body.strip_prefix("Opcional") {
        let after_marker = after.trim_start();
        if let Some(text) = after_marker.strip_prefix(':') {
            let text = text.trim_start();
            let text_start = base + line.len() - text.len();
            return Some(Statement::Entry {
                optional: true,
                text: Spanned::new(text, Span::new(text_start..text_start + text.len())),
            });
        }
    }

    Some(Statement::Entry {
        optional: false,
        text: Spanned::new(body, Span::new(body_start..body_start + body.len())),
    })
}

/// Parse `<nombre>:` after a declaration keyword (`Pantalla`, `Formulario`).
///
/// The name may be quoted; anything after the closing `:` is ignored.
fn named_declaration<'src>(
    rest: &'src str,
    rest_base: usize,
    line_span: Span,
    what: &str,
) -> Result<Spanned<&'src str>> {
    let Some(colon) = rest.find(':') else {
        return Err(Diagnostic::error(format!(
            "se esperaba `:` después del nombre de la {what}"
        ))
        .with_code(ErrorCode::E002)
        .with_label(line_span, "falta `:`")
        .with_help(format!("termina la declaración con `:`, por ejemplo `{}`", example(what))));
    };

    let name = unquote(&rest[..colon], rest_base)?;
    if name.is_empty() {
        return Err(Diagnostic::error(format!("falta el nombre de la {what}"))
            .with_code(ErrorCode::E003)
            .with_label(line_span, "declaración sin nombre")
            .with_help(format!("escribe un nombre, por ejemplo `{}`", example(what))));
    }
    Ok(name)
}

fn example(what: &str) -> &'static str {
    match what {
        "pantalla" => "Pantalla Bienvenida:",
        "formulario" => "Formulario agenda:",
        _ => "Lista tipo:",
    }
}

/// Parse `: <texto>` after a text keyword (`Titulo`, `Mostramos`).
fn keyword_text<'src>(
    rest: &'src str,
    rest_base: usize,
    line_span: Span,
    keyword: &str,
) -> Result<Spanned<&'src str>> {
    let skipped = rest.trim_start();
    let Some(after_colon) = skipped.strip_prefix(':') else {
        return Err(
            Diagnostic::error(format!("se esperaba `:` después de `{keyword}`"))
                .with_code(ErrorCode::E002)
                .with_label(line_span, "falta `:`")
                .with_help(format!("escribe `{keyword}: <texto>`")),
        );
    };
    let text = after_colon.trim();
    let start = rest_base + rest.len() - after_colon.trim_start().len();
    Ok(Spanned::new(text, Span::new(start..start + text.len())))
}

/// Parse the arguments of `Imagen: "<src>" [ancho] [alto]`.
///
/// A single number is the height (the common authored form); two numbers are
/// width then height.
fn image_statement<'src>(
    rest: &'src str,
    rest_base: usize,
    line_span: Span,
) -> Result<Statement<'src>> {
    let skipped = rest.trim_start();
    let Some(args) = skipped.strip_prefix(':') else {
        return Err(Diagnostic::error("se esperaba `:` después de `Imagen`")
            .with_code(ErrorCode::E002)
            .with_label(line_span, "falta `:`")
            .with_help("escribe `Imagen: \"https://...\" [alto]`"));
    };
    let args_base = rest_base + (rest.len() - args.len());

    let mut input = LocatingSlice::new(args);

    let opening: ModalResult<(&str, char)> = (space0, '"').parse_next(&mut input);
    if opening.is_err() {
        return Err(
            Diagnostic::error("se esperaba la ruta de la imagen entre comillas")
                .with_code(ErrorCode::E004)
                .with_label(line_span, "imagen sin ruta")
                .with_help("escribe `Imagen: \"https://...\" [alto]`"),
        );
    }

    let src_start = input.current_token_start();
    let body: ModalResult<&str> = take_till(0.., '"').parse_next(&mut input);
    let src = body.unwrap_or("");
    let src_span = Span::new(args_base + src_start..args_base + src_start + src.len());

    let closing: ModalResult<char> = '"'.parse_next(&mut input);
    if closing.is_err() {
        return Err(Diagnostic::error("falta la comilla de cierre en la ruta de la imagen")
            .with_code(ErrorCode::E001)
            .with_label(
                Span::new(args_base + src_start.saturating_sub(1)..line_span.end()),
                "ruta sin cerrar",
            )
            .with_help("agrega `\"` al final de la ruta"));
    }

    let mut dimensions: Vec<u32> = Vec::new();
    loop {
        let _: ModalResult<&str> = space0.parse_next(&mut input);
        if input.is_empty() {
            break;
        }
        let number_start = input.current_token_start();
        let number: ModalResult<u32> = digit1.parse_to().parse_next(&mut input);
        let Ok(value) = number else {
            return Err(Diagnostic::error("dimensión de imagen inválida")
                .with_code(ErrorCode::E004)
                .with_label(
                    Span::new(args_base + number_start..line_span.end()),
                    "se esperaba un número",
                )
                .with_help("las dimensiones son números enteros de píxeles"));
        };
        dimensions.push(value);
        if dimensions.len() > 2 {
            return Err(Diagnostic::error("demasiadas dimensiones para la imagen")
                .with_code(ErrorCode::E004)
                .with_label(line_span, "a lo sumo ancho y alto")
                .with_help("escribe `Imagen: \"...\" <alto>` o `Imagen: \"...\" <ancho> <alto>`"));
        }
    }

    let (width, height) = match dimensions[..] {
        [] => (None, None),
        [height] => (None, Some(height)),
        [width, height, ..] => (Some(width), Some(height)),
    };

    Ok(Statement::Image {
        src: Spanned::new(src, src_span),
        width,
        height,
    })
}

/// Parse `Lista <nombre> [Si|No]:` arguments.
fn list_statement<'src>(
    rest: &'src str,
    rest_base: usize,
    line_span: Span,
) -> Result<Statement<'src>> {
    let Some(colon) = rest.find(':') else {
        return Err(Diagnostic::error("se esperaba `:` después del nombre de la lista")
            .with_code(ErrorCode::E002)
            .with_label(line_span, "falta `:`")
            .with_help("termina la declaración con `:`, por ejemplo `Lista tipo:`"));
    };

    let mut header = &rest[..colon];
    let mut required = None;

    // A trailing `Si`/`No` literal overrides the required-field inference.
    let trimmed = header.trim_end();
    if let Some(prefix) = trimmed.strip_suffix("Si") {
        if prefix.ends_with(char::is_whitespace) {
            required = Some(true);
            header = prefix;
        }
    } else if let Some(prefix) = trimmed.strip_suffix("No") {
        if prefix.ends_with(char::is_whitespace) {
            required = Some(false);
            header = prefix;
        }
    }

    let name = unquote(header, rest_base)?;
    if name.is_empty() {
        return Err(Diagnostic::error("falta el nombre de la lista")
            .with_code(ErrorCode::E003)
            .with_label(line_span, "lista sin nombre")
            .with_help("escribe un nombre, por ejemplo `Lista tipo:`"));
    }

    Ok(Statement::List { name, required })
}

/// Parse a navigation line: the compact `IrAPantalla[:] <destino>` or the
/// verbose `Ir a pantalla <destino>`.
///
/// A line starting with `Ir` that is not the full verbose phrase is plain
/// text, not a malformed directive, so it is deferred as raw.
fn navigation_statement<'src>(
    word: &str,
    rest: &'src str,
    rest_base: usize,
    line: &'src str,
    base: usize,
) -> Result<Statement<'src>> {
    let target_part = if word == "Ir" {
        let mut words = rest.split_whitespace();
        if words.next() != Some("a") || words.next() != Some("pantalla") {
            return Ok(raw(line, base));
        }
        // Position after the word "pantalla".
        let marker = "pantalla";
        let idx = rest.find(marker).map(|i| i + marker.len()).unwrap_or(0);
        &rest[idx..]
    } else {
        rest.trim_start().strip_prefix(':').unwrap_or(rest)
    };

    let offset = rest_base + (rest.len() - target_part.len());
    let target = unquote(target_part, offset)?;
    if target.is_empty() {
        return Err(Diagnostic::error("falta la pantalla de destino")
            .with_code(ErrorCode::E003)
            .with_label(Span::new(base..base + line.len()), "directiva sin destino")
            .with_help("escribe `IrAPantalla <nombre de pantalla>`"));
    }
    Ok(Statement::Navigation { target })
}

/// Trim a name fragment and strip one pair of surrounding quotes if present.
fn unquote<'src>(fragment: &'src str, fragment_base: usize) -> Result<Spanned<&'src str>> {
    let trimmed = fragment.trim();
    let start = fragment_base + (fragment.len() - fragment.trim_start().len());

    if let Some(inner) = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
    {
        return Ok(Spanned::new(
            inner,
            Span::new(start + 1..start + 1 + inner.len()),
        ));
    }
    if trimmed.starts_with('"') {
        return Err(Diagnostic::error("falta la comilla de cierre en el nombre")
            .with_code(ErrorCode::E001)
            .with_label(
                Span::new(start..start + trimmed.len()),
                "nombre sin cerrar",
            )
            .with_help("agrega `\"` al final del nombre"));
    }

    Ok(Spanned::new(
        trimmed,
        Span::new(start..start + trimmed.len()),
    ))
}
