//! Slug normalization for subject and note names.

use once_cell::sync::Lazy;
use regex::Regex;

static SEPARATOR_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s-]+").unwrap());
static NON_ALPHANUMERIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9]").unwrap());

/// Convert a human-entered name into a filesystem-safe kebab-case slug.
///
/// Splits on runs of whitespace and hyphens, strips every character outside
/// `[A-Za-z0-9]` from each word, drops words left empty, lowercases, and
/// joins with `-`. Total and deterministic; the output contains only
/// lowercase alphanumerics and `-`.
///
/// A fully-punctuation input produces an empty string, which the name
/// validators reject before any slug is ever used for a path.
pub fn kebab_case(text: &str) -> String {
    SEPARATOR_RUNS
        .split(text)
        .filter_map(|word| {
            let stripped = NON_ALPHANUMERIC.replace_all(word, "");
            if stripped.is_empty() {
                None
            } else {
                Some(stripped.to_lowercase())
            }
        })
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_words() {
        assert_eq!(kebab_case("Linear Algebra"), "linear-algebra");
        assert_eq!(kebab_case("Physics"), "physics");
    }

    #[test]
    fn test_separator_runs_collapse() {
        assert_eq!(kebab_case("a   lot\tof   space"), "a-lot-of-space");
        assert_eq!(kebab_case("already--kebab---case"), "already-kebab-case");
    }

    #[test]
    fn test_punctuation_stripped_within_words() {
        assert_eq!(kebab_case("Physics 2: Electric Boogaloo"), "physics-2-electric-boogaloo");
        assert_eq!(kebab_case("C. Elegans (notes)"), "c-elegans-notes");
    }

    #[test]
    fn test_empty_words_discarded() {
        // "&" strips to nothing and must not leave a double separator
        assert_eq!(kebab_case("Salt & Pepper"), "salt-pepper");
    }

    #[test]
    fn test_fully_punctuation_input_is_empty() {
        assert_eq!(kebab_case("!!! ???"), "");
        assert_eq!(kebab_case(""), "");
    }

    #[test]
    fn test_only_lowercase_alphanumerics_and_dashes() {
        let slug = kebab_case("Mixed CASE with_underscores & Stuff 42");
        assert!(slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
    }

    // Idempotence is a property we test rather than assume: underscores
    // survive the first pass glued into words, so a second pass is a no-op,
    // but differently-separated inputs may normalize to the same slug.
    #[test]
    fn test_idempotent_on_own_output() {
        for input in ["Linear Algebra", "a_b c", "Physics 2: Electric Boogaloo", "x--y"] {
            let once = kebab_case(input);
            assert_eq!(kebab_case(&once), once);
        }
    }
}
