//! Response body decoding.
//!
//! HTTP bodies arrive as bytes in whatever charset the server chose.
//! The charset parameter of the `Content-Type` header wins when it
//! names a known encoding; otherwise the document head is scanned for
//! `<meta>` charset declarations; otherwise UTF-8. Decoding is always
//! lossy, so invalid sequences become replacement characters instead of
//! errors.

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;
use std::sync::LazyLock;

/// Match `<meta charset="...">`.
#[allow(clippy::expect_used)]
static META_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s>]+)"#).expect("valid regex")
});

/// Match `<meta http-equiv="Content-Type" content="...; charset=...">`.
#[allow(clippy::expect_used)]
static META_CONTENT_TYPE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)<meta[^>]+http-equiv\s*=\s*["']?content-type["']?[^>]+content\s*=\s*["']?[^"'>]*;\s*charset\s*=\s*([^"'\s>]+)"#,
    )
    .expect("valid regex")
});

/// Extracts the charset parameter from a `Content-Type` header value
/// such as `text/html; charset=ISO-8859-1`.
#[must_use]
pub fn charset_from_content_type(value: &str) -> Option<String> {
    value.split(';').skip(1).find_map(|param| {
        let (name, charset) = param.split_once('=')?;
        if !name.trim().eq_ignore_ascii_case("charset") {
            return None;
        }
        Some(charset.trim().trim_matches('"').to_string())
    })
}

/// Decodes a response body to UTF-8.
///
/// `header_charset` is the charset parameter from the `Content-Type`
/// header, if the server sent one. Unknown labels fall through to
/// `<meta>` detection.
#[must_use]
pub fn decode_body(body: &[u8], header_charset: Option<&str>) -> String {
    let encoding = header_charset
        .and_then(|label| Encoding::for_label(label.trim().as_bytes()))
        .unwrap_or_else(|| detect_encoding(body));

    if encoding == UTF_8 {
        // Fast path: no transcoding, just replace invalid sequences.
        return String::from_utf8_lossy(body).into_owned();
    }
    let (decoded, _encoding_used, _had_errors) = encoding.decode(body);
    decoded.into_owned()
}

/// Detects the encoding declared in the document head.
///
/// Only the first 1024 bytes are examined; charset declarations past
/// that point are not honored by browsers either.
fn detect_encoding(body: &[u8]) -> &'static Encoding {
    let head = &body[..body.len().min(1024)];
    let head_str = String::from_utf8_lossy(head);

    for pattern in [&META_CHARSET_RE, &META_CONTENT_TYPE_RE] {
        if let Some(label) = pattern.captures(&head_str).and_then(|c| c.get(1)) {
            if let Some(encoding) = Encoding::for_label(label.as_str().as_bytes()) {
                return encoding;
            }
        }
    }
    UTF_8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_charset_wins_over_meta_declaration() {
        // Header says latin-1, meta says utf-8; the 0xE9 byte must be
        // decoded as latin-1 e-acute.
        let body = b"<html><head><meta charset=\"utf-8\"></head><body>Caf\xE9</body></html>";
        let decoded = decode_body(body, Some("ISO-8859-1"));
        assert!(decoded.contains("Caf\u{e9}"));
    }

    #[test]
    fn unknown_header_charset_falls_back_to_meta() {
        let body = b"<html><head><meta charset=\"ISO-8859-1\"></head><body>Caf\xE9</body></html>";
        let decoded = decode_body(body, Some("no-such-charset"));
        assert!(decoded.contains("Caf\u{e9}"));
    }

    #[test]
    fn meta_charset_detected_when_no_header() {
        let body = b"<html><head><meta charset=\"windows-1252\"></head><body>\x93Hi\x94</body></html>";
        let decoded = decode_body(body, None);
        assert!(decoded.contains("\u{201C}Hi\u{201D}"));
    }

    #[test]
    fn meta_http_equiv_content_type_detected() {
        let body = b"<html><head><meta http-equiv=\"Content-Type\" content=\"text/html; charset=ISO-8859-1\"></head><body>Caf\xE9</body></html>";
        let decoded = decode_body(body, None);
        assert!(decoded.contains("Caf\u{e9}"));
    }

    #[test]
    fn defaults_to_utf8_and_is_lossy() {
        let body = b"<html><body>Test \xFF\xFE Invalid</body></html>";
        let decoded = decode_body(body, None);
        assert!(decoded.contains("Test"));
        assert!(decoded.contains("Invalid"));
        assert!(decoded.contains('\u{FFFD}'));
    }

    #[test]
    fn charset_param_parsed_from_content_type() {
        assert_eq!(
            charset_from_content_type("text/html; charset=ISO-8859-1"),
            Some("ISO-8859-1".to_string())
        );
        assert_eq!(
            charset_from_content_type("text/html; Charset=\"utf-8\""),
            Some("utf-8".to_string())
        );
        assert_eq!(charset_from_content_type("text/html"), None);
        assert_eq!(
            charset_from_content_type("text/html; boundary=xyz"),
            None
        );
    }

    #[test]
    fn charset_detection_ignores_declarations_past_first_kilobyte() {
        let mut body = Vec::new();
        body.extend_from_slice(b"<html><head>");
        body.extend_from_slice(&vec![b' '; 1100]);
        body.extend_from_slice(b"<meta charset=\"ISO-8859-1\"></head><body>x</body></html>");
        let decoded = decode_body(&body, None);
        assert!(decoded.contains("x"));
    }
}
