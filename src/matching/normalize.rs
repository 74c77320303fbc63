use std::sync::LazyLock;

use regex::Regex;

/// Anything that is neither alphanumeric nor whitespace.
static PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{Alphabetic}\p{N}\s]+").unwrap());

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Canonicalizes a name for comparison.
///
/// Lowercases, strips punctuation, collapses whitespace runs to a single
/// space and trims both ends. Total and idempotent.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let stripped = PUNCTUATION.replace_all(&lowered, "");
    let collapsed = WHITESPACE.replace_all(&stripped, " ");
    collapsed.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_case_and_punctuation() {
        assert_eq!(normalize("O'Brien, Sean"), "obrien sean");
        assert_eq!(normalize("JOHN  SMITH"), "john smith");
        assert_eq!(normalize("Mary-Jane Watson."), "maryjane watson");
    }

    #[test]
    fn test_normalize_trims_after_stripping() {
        assert_eq!(normalize("  john . "), "john");
        assert_eq!(normalize("\tjohn\n\nsmith "), "john smith");
    }

    #[test]
    fn test_normalize_keeps_unicode_letters_and_digits() {
        assert_eq!(normalize("José Müller 2nd"), "josé müller 2nd");
    }

    #[test]
    fn test_normalize_empty_and_symbols_only() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("!!! ??"), "");
    }
}
