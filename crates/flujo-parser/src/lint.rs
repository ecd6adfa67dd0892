//! Authoring lint passes over the raw source text.
//!
//! Passes run independently of the parse attempt: an input can fail to
//! compile and still receive warnings, and a clean parse can still be
//! flagged. Each pass is a pure function from text to warnings with no
//! shared state, composed by [`lint`].

use flujo_core::vocab::Vocabulary;

use crate::{
    error::{Diagnostic, ErrorCode},
    span::Span,
};

/// Run every lint pass over the source.
pub(crate) fn lint(source: &str) -> Vec<Diagnostic> {
    let warnings = hyphenated_dates(source);
    if !warnings.is_empty() {
        log::debug!(count = warnings.len(); "Lint warnings");
    }
    warnings
}

/// Flag option entries whose text starts with a hyphen-delimited date.
///
/// The downstream platform renders option titles verbatim, and hyphenated
/// dates read poorly there; authors are told to use spaces instead. Only
/// entries inside an option-list block are checked, using the same block
/// boundary as the grammar (a new keyword or two consecutive blank lines
/// closes the list), so dates in free text never trip the check.
fn hyphenated_dates(source: &str) -> Vec<Diagnostic> {
    let vocab = Vocabulary::default();
    let mut warnings = Vec::new();
    let mut in_list = false;
    let mut blank_run = 0usize;
    let mut offset = 0;

    for raw_line in source.split_inclusive('\n') {
        let line_start = offset;
        offset += raw_line.len();

        let content = raw_line.trim_end_matches(['\n', '\r']);
        let trimmed = content.trim();
        let base = line_start + (content.trim_end().len() - trimmed.len());

        if trimmed.is_empty() {
            blank_run += 1;
            if blank_run >= 2 {
                in_list = false;
            }
            continue;
        }
        blank_run = 0;

        if trimmed.starts_with("//") {
            continue;
        }

        if let Some(text_offset) = entry_text_offset(trimmed) {
            if in_list {
                let text = &trimmed[text_offset..];
                if let Some(len) = hyphenated_date_len(text) {
                    let start = base + text_offset;
                    let spaced = text[..len].replace('-', " ");
                    warnings.push(
                        Diagnostic::warning(format!(
                            "no escribas las fechas con guiones, usa espacios: `{spaced}`"
                        ))
                        .with_code(ErrorCode::W001)
                        .with_label(Span::new(start..start + len), "fecha con guiones")
                        .with_help("el formato recomendado es `aaaa mm dd`"),
                    );
                }
            }
            continue;
        }

        // A leading keyword opens a list block or closes the current one.
        let word_end = trimmed
            .find(|c: char| c.is_whitespace() || c == ':')
            .unwrap_or(trimmed.len());
        if let Some(kind) = vocab.lookup(&trimmed[..word_end]) {
            in_list = kind == flujo_core::vocab::StatementKind::List;
        }
    }

    warnings
}

/// Byte offset of the entry text within a `N. [Opcional:] <texto>` line, or
/// `None` if the line is not a numbered entry.
fn entry_text_offset(line: &str) -> Option<usize> {
    let digits = line.len() - line.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 || !line[digits..].starts_with('.') {
        return None;
    }
    let mut rest = &line[digits + 1..];
    let mut consumed = digits + 1;

    let unpadded = rest.trim_start();
    consumed += rest.len() - unpadded.len();
    rest = unpadded;

    if let Some(after) = rest.strip_prefix("Opcional") {
        let after_spaces = after.trim_start();
        if let Some(after_colon) = after_spaces.strip_prefix(':') {
            consumed += rest.len() - after_colon.len();
            let text = after_colon.trim_start();
            consumed += after_colon.len() - text.len();
            return Some(consumed);
        }
    }

    Some(consumed)
}

/// Length of a `dddd-dd-dd` prefix of the text, if present.
fn hyphenated_date_len(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    if bytes.len() >= 10
        && bytes[..4].iter().all(u8::is_ascii_digit)
        && bytes[4] == b'-'
        && bytes[5..7].iter().all(u8::is_ascii_digit)
        && bytes[7] == b'-'
        && bytes[8..10].iter().all(u8::is_ascii_digit)
    {
        Some(10)
    } else {
        None
    }
}
