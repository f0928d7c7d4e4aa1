//! Query parameter extractors for list endpoints.

use serde::Deserialize;

use chatbot_types::chat::PageRequest;

/// Raw pagination parameters for the conversation list.
///
/// Kept as strings so that garbage never rejects the request: values are
/// read leniently and fall back to the defaults.
#[derive(Debug, Deserialize, Default)]
pub struct PageQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl PageQuery {
    /// Parse and clamp into a `PageRequest`.
    pub fn to_page_request(&self) -> PageRequest {
        let page = self
            .page
            .as_deref()
            .and_then(leading_int)
            .filter(|n| *n != 0)
            .unwrap_or(PageRequest::DEFAULT_PAGE);
        let limit = self
            .limit
            .as_deref()
            .and_then(leading_int)
            .filter(|n| *n != 0)
            .unwrap_or(PageRequest::DEFAULT_LIMIT);
        PageRequest::new(page, limit)
    }
}

/// Read the integer prefix of `raw`: optional whitespace, an optional sign,
/// then digits. `"12abc"` is 12, `"abc"` is `None`. Overlong values saturate.
fn leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }
    let digits = &rest[..digits_len];
    let value = digits.parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -value } else { value })
}
