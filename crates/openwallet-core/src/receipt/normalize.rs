//! OCR text normalization

/// Normalize raw OCR output into ordered, non-empty trimmed lines
///
/// Internal whitespace runs are collapsed to a single space. Empty input
/// yields an empty vec; there are no error cases.
pub fn normalize(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_whitespace() {
        let lines = normalize("  스타카페   강남점  \n\n합계 :   4,500원\n");
        assert_eq!(lines, vec!["스타카페 강남점", "합계 : 4,500원"]);
    }

    #[test]
    fn test_normalize_empty_input() {
        assert!(normalize("").is_empty());
        assert!(normalize("   \n\t\n").is_empty());
    }

    #[test]
    fn test_normalize_preserves_line_order() {
        let lines = normalize("a\nb\nc");
        assert_eq!(lines, vec!["a", "b", "c"]);
    }
}
