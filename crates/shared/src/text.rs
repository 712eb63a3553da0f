//! Keyword normalization and case-insensitive containment helpers.

/// Normalizes a keyword list: trims, lowercases, drops empties and
/// duplicates. First occurrence order is kept.
pub fn normalize_keywords<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for keyword in raw {
        let keyword = keyword.as_ref().trim().to_lowercase();
        if !keyword.is_empty() && !out.contains(&keyword) {
            out.push(keyword);
        }
    }
    out
}

/// Splits comma-separated keyword text and normalizes the parts.
pub fn split_keywords(raw: &str) -> Vec<String> {
    normalize_keywords(raw.split(','))
}

/// Returns true if any needle is a substring of `haystack_lower`.
///
/// `haystack_lower` must already be lowercased; needles are compared as given.
pub fn contains_any<S: AsRef<str>>(haystack_lower: &str, needles: &[S]) -> bool {
    needles
        .iter()
        .any(|needle| haystack_lower.contains(needle.as_ref()))
}

/// Case-insensitive substring test.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_keywords() {
        assert_eq!(
            split_keywords(" Jab, CROSS ,, hook ,"),
            vec!["jab", "cross", "hook"]
        );
    }

    #[test]
    fn test_split_keywords_empty_input() {
        assert!(split_keywords("").is_empty());
        assert!(split_keywords(" , ,").is_empty());
    }

    #[test]
    fn test_normalize_keywords_dedupes_keeping_order() {
        assert_eq!(
            normalize_keywords(["Spar", "jab", "spar ", "JAB"]),
            vec!["spar", "jab"]
        );
    }

    #[test]
    fn test_contains_any() {
        assert!(contains_any("what's a jab?", &["cross", "jab"]));
        assert!(!contains_any("what's footwork?", &["cross", "jab"]));
        assert!(!contains_any::<&str>("anything", &[]));
    }

    #[test]
    fn test_contains_ignore_case() {
        assert!(contains_ignore_case("Leather Boxing Gloves", "GLOVES"));
        assert!(!contains_ignore_case("Hand wraps", "gloves"));
    }
}
