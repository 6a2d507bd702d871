//! Text truncation
//!
//! Applied to the final translated text, after markup conversion, so the
//! cut never lands inside a half-written markdown token.

/// Cap `text` at `max_len` bytes, appending an ellipsis marker when cut.
/// The cut point backs up to the nearest character boundary.
pub fn truncate(text: &str, max_len: usize) -> String {
    if text.len() <= max_len {
        return text.to_string();
    }

    let mut end = max_len;
    while !text.is_char_boundary(end) {
        end -= 1;
    }

    format!("{}...", &text[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_long_text() {
        assert_eq!(truncate("hello world", 5), "hello...");
    }

    #[test]
    fn test_truncate_short_text_unchanged() {
        assert_eq!(truncate("hi", 5), "hi");
        assert_eq!(truncate("hello", 5), "hello");
    }

    #[test]
    fn test_truncate_respects_char_boundary() {
        // Four-byte emoji; the cut backs up instead of splitting it
        assert_eq!(truncate("ab🦀cd", 3), "ab...");
    }
}
