//! Document counters shown in the footer.

/// Whitespace-separated, non-empty tokens.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Unicode scalar values, matching the editor's char offsets.
pub fn char_count(text: &str) -> usize {
    text.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_count_ignores_extra_whitespace() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("   \n\t "), 0);
        assert_eq!(word_count("  how do\nI   borrow?  "), 4);
    }

    #[test]
    fn test_char_count_counts_scalars() {
        assert_eq!(char_count("café"), 4);
        assert_eq!(char_count("a\nb"), 3);
    }
}
