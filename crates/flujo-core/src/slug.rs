//! Stable identifier derivation from free-form text.
//!
//! Screen names, list names and option texts are authored as free text; the
//! output document needs stable machine ids for them. [`slugify`] derives one
//! deterministically: lowercase, with every run of non-alphanumeric
//! characters collapsed to a single `_`.

/// Derive a stable id from free-form text.
///
/// Alphanumeric characters are lowercased and kept; any run of other
/// characters collapses to a single `_`; accented letters count as
/// alphabetic and are kept. Leading and trailing separators are dropped.
///
/// # Examples
///
/// ```
/// use flujo_core::slug::slugify;
///
/// assert_eq!(slugify("Consulta General"), "consulta_general");
/// assert_eq!(slugify("2027 01 01"), "2027_01_01");
/// assert_eq!(slugify("  tipo - cita  "), "tipo_cita");
/// ```
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_separator = false;

    for c in text.chars() {
        if c.is_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('_');
            }
            pending_separator = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_separator = true;
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_basic_words() {
        assert_eq!(slugify("CITA"), "cita");
        assert_eq!(slugify("tipo cita"), "tipo_cita");
        assert_eq!(slugify("Control de Salud Preventivo"), "control_de_salud_preventivo");
    }

    #[test]
    fn test_punctuation_runs_collapse() {
        assert_eq!(slugify("a -- b"), "a_b");
        assert_eq!(slugify("2027-01-01"), "2027_01_01");
    }

    #[test]
    fn test_edges_trimmed() {
        assert_eq!(slugify("  hola  "), "hola");
        assert_eq!(slugify("---"), "");
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn test_accents_preserved() {
        assert_eq!(slugify("Miércoles"), "miércoles");
    }

    proptest! {
        #[test]
        fn prop_deterministic(s in ".*") {
            prop_assert_eq!(slugify(&s), slugify(&s));
        }

        #[test]
        fn prop_idempotent(s in ".*") {
            let once = slugify(&s);
            prop_assert_eq!(slugify(&once), once);
        }

        #[test]
        fn prop_no_separator_at_edges(s in ".*") {
            let slug = slugify(&s);
            prop_assert!(!slug.starts_with('_'));
            prop_assert!(!slug.ends_with('_'));
        }
    }
}
