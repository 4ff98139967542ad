//! Percent-encoding as required by [RFC 5849 section 3.6][rfc].
//!
//! This is stricter than the form encoding used for query strings: only
//! ASCII letters, digits and `-`, `.`, `_`, `~` survive unescaped, spaces
//! become `%20` (never `+`), and hex digits are upper-case.
//!
//! [rfc]: https://tools.ietf.org/html/rfc5849#section-3.6

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Everything except the unreserved set `A-Z a-z 0-9 - . _ ~`.
const OAUTH_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encode `s` per RFC 5849.
pub fn encode(s: &str) -> String {
    utf8_percent_encode(s, OAUTH_ENCODE_SET).to_string()
}

/// Reverse [`encode`].
///
/// Malformed escapes are passed through untouched and invalid UTF-8 is
/// replaced, so this never fails.
pub fn decode(s: &str) -> String {
    percent_decode_str(s).decode_utf8_lossy().into_owned()
}

/// Decode a form-encoded value, where `+` stands for a space.
///
/// Returns `None` when the decoded bytes are not valid UTF-8.
pub(crate) fn decode_form(s: &str) -> Option<String> {
    let spaced = s.replace('+', " ");
    percent_decode_str(&spaced)
        .decode_utf8()
        .ok()
        .map(|decoded| decoded.into_owned())
}

/// Form-encode a value for use in a query string.
pub(crate) fn encode_form(s: &str) -> String {
    url::form_urlencoded::byte_serialize(s.as_bytes()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreserved_is_untouched() {
        let unreserved = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-._~";
        assert_eq!(encode(unreserved), unreserved);
    }

    #[test]
    fn reserved_is_escaped() {
        assert_eq!(encode("a b/c"), "a%20b%2Fc");
        assert_eq!(encode("&=+:,!*'()"), "%26%3D%2B%3A%2C%21%2A%27%28%29");
        assert_eq!(encode("%"), "%25");
    }

    #[test]
    fn hex_is_upper_case() {
        assert_eq!(encode("\u{7f}"), "%7F");
        assert_eq!(encode("少女"), "%E5%B0%91%E5%A5%B3");
        assert_eq!(encode("é"), "%C3%A9");
    }

    #[test]
    fn decode_reverses_encode() {
        for s in &[
            "",
            "plain",
            "a b/c",
            "Hello Ladies + Gentlemen, a signed OAuth request!",
            "http://printer.example.com/ready?x=1&y=2",
            "終末旅行 ~ 100%",
            "\u{0}\u{1f}\u{7f}",
        ] {
            assert_eq!(decode(&encode(s)), *s);
        }
    }

    #[test]
    fn decode_passes_malformed_escapes_through() {
        assert_eq!(decode("100%"), "100%");
        assert_eq!(decode("%zz"), "%zz");
    }

    #[test]
    fn form_decoding_treats_plus_as_space() {
        assert_eq!(decode_form("a+b%2Bc").as_deref(), Some("a b+c"));
        assert_eq!(decode_form("%FF"), None);
    }

    #[test]
    fn form_encoding_uses_plus_for_space() {
        assert_eq!(encode_form("a b&c"), "a+b%26c");
    }
}
