//! Splitting of free-text search phrases such as "priya from hr" into a name
//! and a disambiguation hint.

const SEPARATORS: [&str; 2] = [" from ", " in "];

/// Splits a search phrase into `(name, hint)`.
///
/// The phrase is lowercased and trimmed. The first separator found, trying
/// `" from "` before `" in "`, divides the name from the hint; anything after
/// a second occurrence of the same separator is dropped. A blank hint is
/// `None`.
pub fn split_search_phrase(text: &str) -> (String, Option<String>) {
    let lowered = text.trim().to_lowercase();

    for separator in SEPARATORS {
        if lowered.contains(separator) {
            let mut parts = lowered.split(separator);
            let name = parts.next().unwrap_or_default().trim().to_string();
            let hint = parts
                .next()
                .map(str::trim)
                .filter(|h| !h.is_empty())
                .map(str::to_string);
            return (name, hint);
        }
    }

    (lowered, None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_separator() {
        assert_eq!(
            split_search_phrase("Priya from HR"),
            ("priya".to_string(), Some("hr".to_string()))
        );
    }

    #[test]
    fn test_in_separator() {
        assert_eq!(
            split_search_phrase("  Smith in Engineering "),
            ("smith".to_string(), Some("engineering".to_string()))
        );
    }

    #[test]
    fn test_from_wins_over_in() {
        assert_eq!(
            split_search_phrase("kumar in it from sales"),
            ("kumar in it".to_string(), Some("sales".to_string()))
        );
    }

    #[test]
    fn test_only_second_segment_is_the_hint() {
        assert_eq!(
            split_search_phrase("ana from ops from emea"),
            ("ana".to_string(), Some("ops".to_string()))
        );
    }

    #[test]
    fn test_no_separator() {
        // "in" inside a word is not a separator.
        assert_eq!(split_search_phrase("Quinn Fromm"), ("quinn fromm".to_string(), None));
    }

    #[test]
    fn test_blank_hint_is_none() {
        assert_eq!(
            split_search_phrase("john from  "),
            ("john from".to_string(), None)
        );
        assert_eq!(split_search_phrase("john from   x"), ("john".to_string(), Some("x".to_string())));
    }
}
