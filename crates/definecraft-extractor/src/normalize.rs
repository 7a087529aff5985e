//! Normalization of raw comma/newline separated word lists

use std::collections::HashSet;

/// Split raw input into an ordered list of unique lowercase terms
///
/// Newline runs count as commas; tokens are trimmed and lowercased, empty
/// tokens dropped, and later duplicates removed.
pub fn parse_terms(raw: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    raw.split(|c| c == ',' || c == '\n' || c == '\r')
        .map(|token| token.trim().to_lowercase())
        .filter(|token| !token.is_empty())
        .filter(|token| seen.insert(token.clone()))
        .collect()
}

/// Normalize raw input into its canonical `a, b, c` form
///
/// # Examples
///
/// ```
/// use definecraft_extractor::normalize_terms;
///
/// assert_eq!(normalize_terms(" Happy,\njoyful "), "happy, joyful");
/// ```
pub fn normalize_terms(raw: &str) -> String {
    parse_terms(raw).join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_and_lowercases() {
        assert_eq!(normalize_terms(" Happy,\njoyful "), "happy, joyful");
    }

    #[test]
    fn test_newline_runs_become_separators() {
        assert_eq!(parse_terms("one\r\n\r\ntwo\n\nthree"), vec!["one", "two", "three"]);
    }

    #[test]
    fn test_dedupes_preserving_first_seen_order() {
        assert_eq!(normalize_terms("b, a, B, c, a"), "b, a, c");
    }

    #[test]
    fn test_drops_empty_tokens() {
        assert_eq!(normalize_terms(",, ,\n,"), "");
        assert!(parse_terms("").is_empty());
    }

    #[test]
    fn test_keeps_inner_spaces() {
        assert_eq!(normalize_terms("Look Up,  give in "), "look up, give in");
    }
}
