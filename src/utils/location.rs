//! Redirect target encoding.

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

/// Bytes percent-encoded in a `Location` value, on top of non-ASCII.
///
/// Reserved characters and existing `%XX` escapes pass through untouched, so
/// an already valid URL comes out unchanged.
const LOCATION: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'\\')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Encodes a stored target so it can be sent as a `Location` header.
///
/// Links accept any non-empty text, so the target may hold control
/// characters, spaces or non-ASCII text. The result is always visible ASCII.
///
/// ```ignore
/// assert_eq!(encode_location("https://example.com/a b"), "https://example.com/a%20b");
/// ```
pub fn encode_location(target: &str) -> String {
    utf8_percent_encode(target, LOCATION).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_valid_url_is_unchanged() {
        let url = "https://example.com/path?q=1&r=a%20b#frag";
        assert_eq!(encode_location(url), url);
    }

    #[test]
    fn test_control_characters_are_encoded() {
        assert_eq!(
            encode_location("https://example.com/a\nb\tc"),
            "https://example.com/a%0Ab%09c"
        );
    }

    #[test]
    fn test_unicode_and_spaces_are_encoded() {
        assert_eq!(
            encode_location("https://example.com/café menu"),
            "https://example.com/caf%C3%A9%20menu"
        );
    }

    #[test]
    fn test_result_is_always_a_header_value() {
        for target in ["a\r\nSet-Cookie: x=1", "\u{7f}\u{0}", "<script>\"{}\"</script>", "日本"] {
            assert!(HeaderValue::try_from(encode_location(target)).is_ok());
        }
    }
}
