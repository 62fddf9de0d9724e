//! Output length limiting

/// Marker appended to truncated text
pub const ELLIPSIS: char = '…';

/// Count of Unicode scalar values, the unit all chat limits are measured in
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Truncate `text` to at most `max_len` characters.
///
/// Text over the bound keeps its first `max_len - 1` characters followed by
/// [`ELLIPSIS`]. A bound of zero yields the empty string.
pub fn limit_text(text: &str, max_len: usize) -> String {
    if max_len == 0 {
        return String::new();
    }
    if char_len(text) <= max_len {
        return text.to_string();
    }

    let mut out: String = text.chars().take(max_len - 1).collect();
    out.push(ELLIPSIS);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_unchanged() {
        assert_eq!(limit_text("hello", 5), "hello");
        assert_eq!(limit_text("hello", 400), "hello");
        assert_eq!(limit_text("", 1), "");
    }

    #[test]
    fn test_exact_length_on_truncation() {
        let out = limit_text("hello world", 8);
        assert_eq!(out, "hello w…");
        assert_eq!(char_len(&out), 8);
        assert!(out.ends_with(ELLIPSIS));
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        let text = "🎲🎲🎲🎲🎲";
        assert_eq!(limit_text(text, 5), text);
        assert_eq!(limit_text(text, 3), "🎲🎲…");
        assert_eq!(limit_text("ééé", 2), "é…");
    }

    #[test]
    fn test_bound_of_one() {
        assert_eq!(limit_text("abc", 1), "…");
    }

    #[test]
    fn test_zero_bound() {
        assert_eq!(limit_text("abc", 0), "");
    }

    #[test]
    fn test_idempotent() {
        let samples = ["", "a", "hello world", "🗣\"quote with ünïcödé\"", "x".repeat(500).as_str()]
            .map(str::to_string);
        for sample in &samples {
            for bound in [1, 2, 5, 11, 32, 400, 2000] {
                let once = limit_text(sample, bound);
                assert_eq!(limit_text(&once, bound), once, "bound {bound}");
            }
        }
    }
}
