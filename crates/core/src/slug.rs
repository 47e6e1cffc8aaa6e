//! URL slug generation for pages and performers.
//!
//! Slugs are lowercase ASCII, hyphen-separated identifiers derived from
//! human-readable text. Accented letters fold to their base letter
//! (`"Kačka"` becomes `"kacka"`).

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::error::CoreError;

/// Convert arbitrary text into a URL-safe slug.
///
/// Steps: canonical decomposition (NFD), strip combining marks, lowercase,
/// trim, whitespace runs become a single hyphen, drop everything that is not
/// `[a-z0-9_-]`, collapse repeated hyphens. Empty input yields `""`.
///
/// # Examples
///
/// ```
/// use festival_core::slug::slugify;
///
/// assert_eq!(slugify("Festival 2026!"), "festival-2026");
/// assert_eq!(slugify("Přátelé festivalu"), "pratele-festivalu");
/// ```
pub fn slugify(text: &str) -> String {
    let folded: String = text
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase();

    let mut raw = String::with_capacity(folded.len());
    let mut in_whitespace = false;
    for c in folded.trim().chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                raw.push('-');
            }
            in_whitespace = true;
            continue;
        }
        in_whitespace = false;
        if is_slug_char(c) {
            raw.push(c);
        }
    }

    collapse_hyphens(&raw)
}

/// Public slug of a performer: `"{year}-{slugify(name)}"`.
///
/// The year prefix keeps acts that return in a later edition distinct.
pub fn performer_slug(year: i32, name: &str) -> String {
    format!("{year}-{}", slugify(name))
}

/// Whether `s` consists only of characters a slug may contain.
pub fn is_slug_shaped(s: &str) -> bool {
    !s.is_empty() && s.chars().all(is_slug_char)
}

/// Validate a page slug supplied by an admin.
///
/// The slug must be non-empty and already in canonical form, i.e. a fixed
/// point of [`slugify`].
pub fn validate_page_slug(slug: &str) -> Result<(), CoreError> {
    if slug.is_empty() {
        return Err(CoreError::Validation("Page slug must not be empty".into()));
    }
    if slugify(slug) != slug {
        return Err(CoreError::Validation(format!(
            "Page slug '{slug}' is not a valid slug (expected '{}')",
            slugify(slug)
        )));
    }
    Ok(())
}

fn is_slug_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-'
}

fn collapse_hyphens(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_hyphen = false;
    for c in s.chars() {
        if c == '-' {
            if !prev_hyphen {
                out.push(c);
            }
            prev_hyphen = true;
        } else {
            out.push(c);
            prev_hyphen = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn punctuation_is_dropped() {
        assert_eq!(slugify("Festival 2026!"), "festival-2026");
    }

    #[test]
    fn diacritics_fold_to_base_letters() {
        assert_eq!(slugify("Žluťoučký kůň"), "zlutoucky-kun");
        assert_eq!(slugify("Dolívka"), "dolivka");
    }

    #[test]
    fn whitespace_runs_become_one_hyphen() {
        assert_eq!(slugify("  Ondra \t  Band  "), "ondra-band");
    }

    #[test]
    fn repeated_hyphens_collapse() {
        assert_eq!(slugify("rock -- & -- roll"), "rock-roll");
    }

    #[test]
    fn underscores_survive() {
        assert_eq!(slugify("dj_set"), "dj_set");
    }

    #[test]
    fn empty_input_yields_empty_slug() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("   "), "");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn slugify_is_idempotent() {
        let inputs = [
            "Festival 2026!",
            "Ondra Band II",
            "  --weird__ input--  ",
            "Příliš žluťoučký kůň úpěl ďábelské ódy",
            "İstanbul Ǆ ﬁ",
            "a ! b",
            "",
        ];
        for input in inputs {
            let once = slugify(input);
            assert_eq!(slugify(&once), once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn performer_slug_includes_year() {
        assert_eq!(performer_slug(2026, "Ondra Band"), "2026-ondra-band");
        assert_eq!(performer_slug(2026, "Ondra Band II"), "2026-ondra-band-ii");
    }

    #[test]
    fn same_name_different_year_never_collides() {
        assert_ne!(performer_slug(2025, "Echo"), performer_slug(2026, "Echo"));
    }

    #[test]
    fn slug_shape_check() {
        assert!(is_slug_shaped("2026-ondra-band"));
        assert!(is_slug_shaped("42"));
        assert!(!is_slug_shaped(""));
        assert!(!is_slug_shaped("Ondra Band"));
    }

    #[test]
    fn page_slug_validation() {
        assert!(validate_page_slug("info-dolivka").is_ok());
        assert!(validate_page_slug("").is_err());
        assert!(validate_page_slug("Info Dolivka").is_err());
        assert!(validate_page_slug("info--dolivka").is_err());
    }
}
