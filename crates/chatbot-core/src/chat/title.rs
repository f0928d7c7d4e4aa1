//! Conversation title derivation.

/// Titles longer than this many characters are truncated.
pub const MAX_TITLE_CHARS: usize = 15;

const ELLIPSIS: &str = "...";

/// Derive a display title from the first user message.
pub fn derive_title(first_message: &str) -> String {
    truncate_chars(first_message, MAX_TITLE_CHARS)
}

/// Keep the first `max_chars` characters of `text`, appending `...` when
/// anything was cut.
///
/// Counts Unicode scalar values, so CJK text truncates at the same
/// character count as ASCII and no code point is ever split.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}{ELLIPSIS}", &text[..cut]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::{json, Value};

    /// Title a loosely-typed value would get: absent renders as
    /// `undefined`, `null` as `null`, other non-strings as their JSON text.
    fn title_from_json(value: Option<&Value>) -> String {
        let text = match value {
            None => "undefined".to_string(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        };
        derive_title(&text)
    }

    #[test]
    fn test_truncate_chars_limit_is_configurable() {
        assert_eq!(truncate_chars("abcdef", 3), "abc...");
        assert_eq!(truncate_chars("abc", 3), "abc");
        assert_eq!(truncate_chars("一二三四五", 3), "一二三...");
        assert_eq!(truncate_chars("anything", 0), "...");
        assert_eq!(truncate_chars("", 0), "");
    }

    #[test]
    fn test_short_message_unchanged() {
        assert_eq!(derive_title("你好"), "你好");
        assert_eq!(derive_title(""), "");
    }

    #[test]
    fn test_exactly_fifteen_chars_unchanged() {
        let msg = "abcdefghijklmno";
        assert_eq!(msg.chars().count(), 15);
        assert_eq!(derive_title(msg), msg);
    }

    #[test]
    fn test_sixteen_chars_truncated() {
        assert_eq!(derive_title("abcdefghijklmnop"), "abcdefghijklmno...");
    }

    #[test]
    fn test_cjk_counts_chars_not_bytes() {
        let msg = "请帮我写一个快速排序算法并解释它的时间复杂度";
        let title = derive_title(msg);
        assert_eq!(title, "请帮我写一个快速排序算法并解释...");
        assert_eq!(title.chars().count(), 18);

        let fifteen = "一二三四五六七八九十一二三四五";
        assert_eq!(derive_title(fifteen), fifteen);
    }

    #[test]
    fn test_emoji_not_split() {
        let msg = "🦀".repeat(20);
        assert_eq!(derive_title(&msg), format!("{}...", "🦀".repeat(15)));
    }

    #[test]
    fn test_json_null_and_absent() {
        assert_eq!(title_from_json(Some(&Value::Null)), "null");
        assert_eq!(title_from_json(None), "undefined");
    }

    #[test]
    fn test_json_non_string_values() {
        assert_eq!(title_from_json(Some(&json!(42))), "42");
        assert_eq!(title_from_json(Some(&json!(true))), "true");
        assert_eq!(title_from_json(Some(&json!("hello"))), "hello");
        assert_eq!(
            title_from_json(Some(&json!("a very long first message"))),
            "a very long fir..."
        );
    }
}
