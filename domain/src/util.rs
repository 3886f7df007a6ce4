//! Shared text helpers.

/// Truncate a string to at most `max_bytes` without splitting a UTF-8
/// character.
pub fn truncate_str(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// One-line preview of a message for logs and status lines.
///
/// Line breaks collapse to single spaces; anything past `max_chars`
/// characters is replaced with `...`.
pub fn preview(text: &str, max_chars: usize) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= max_chars {
        return flat;
    }
    let cut: String = flat.chars().take(max_chars).collect();
    format!("{}...", cut.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_keeps_char_boundary() {
        // "é" is two bytes
        assert_eq!(truncate_str("café au lait", 4), "caf");
        assert_eq!(truncate_str("café", 5), "café");
        assert_eq!(truncate_str("", 3), "");
    }

    #[test]
    fn test_preview_flattens_lines() {
        assert_eq!(
            preview("[10:01] Sam: hey\n[10:02] Me:  hi", 80),
            "[10:01] Sam: hey [10:02] Me: hi"
        );
    }

    #[test]
    fn test_preview_cuts_long_text() {
        assert_eq!(preview("I had a fight with my roommate", 14), "I had a fight...");
        assert_eq!(preview("namaste 🙏 friend", 9), "namaste 🙏...");
    }
}
