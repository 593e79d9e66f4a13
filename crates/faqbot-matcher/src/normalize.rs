//! Text normalization shared by the index and incoming queries.

use std::collections::HashSet;

/// Lowercased runs of ASCII letters and digits, in order.
fn alnum_runs(s: &str) -> Vec<String> {
    s.to_lowercase()
        .split(|c: char| !(c.is_ascii_lowercase() || c.is_ascii_digit()))
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Lowercase and keep only alphanumeric tokens, joined by single spaces.
pub fn normalize(s: &str) -> String {
    alnum_runs(s).join(" ")
}

/// Unique token set of [`normalize`]'s extraction.
pub fn tokenize(s: &str) -> HashSet<String> {
    alnum_runs(s).into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_punctuation() {
        assert_eq!(
            normalize("How can I reset my PASSWORD?!"),
            "how can i reset my password"
        );
        assert_eq!(normalize("3–7 business days"), "3 7 business days");
        assert_eq!(normalize("support@example.com"), "support example com");
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("  —→!? "), "");
        assert!(tokenize("...").is_empty());
    }

    #[test]
    fn test_normalize_idempotent() {
        for s in [
            "Hello, World!",
            "  spaced   out\ttext\n",
            "Ünïcödé café — 42",
            "a_b-c.d",
            "",
        ] {
            let once = normalize(s);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn test_non_ascii_letters_are_separators() {
        assert_eq!(normalize("café"), "caf");
        assert_eq!(normalize("naïve"), "na ve");
    }

    #[test]
    fn test_tokenize_dedupes() {
        let tokens = tokenize("Order order ORDER status");
        assert_eq!(tokens.len(), 2);
        assert!(tokens.contains("order"));
        assert!(tokens.contains("status"));
    }
}
