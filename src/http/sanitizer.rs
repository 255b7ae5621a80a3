//! Validation and normalization of header names and values.
//!
//! Every name or value that enters a [`Headers`](crate::http::headers::Headers)
//! store goes through [`Sanitizer`] first. Names must be HTTP tokens and are
//! stored lowercase; values keep their case but must not contain characters
//! that would break a header line on the wire.

use crate::error::{HeadersError, Result};

/// Separators allowed in a token besides ALPHA and DIGIT (RFC 7230 `tchar`)
const TOKEN_SYMBOLS: &[u8] = b"!#$%&'*+-.^_`|~";

pub struct Sanitizer;

impl Sanitizer {
    fn is_token_char(c: char) -> bool {
        c.is_ascii_alphanumeric() || (c.is_ascii() && TOKEN_SYMBOLS.contains(&(c as u8)))
    }

    // HTAB, visible ASCII and the 0x80..=0xFF range
    fn is_value_char(c: char) -> bool {
        matches!(c, '\t' | ' '..='~' | '\u{80}'..='\u{ff}')
    }

    pub fn is_token(name: &str) -> bool {
        !name.is_empty() && name.chars().all(Self::is_token_char)
    }

    pub fn is_valid_value(value: &str) -> bool {
        value.chars().all(Self::is_value_char)
    }

    /// Checks `name` against the token grammar and returns its lowercase form.
    pub fn name(name: impl AsRef<str>) -> Result<String> {
        let name = name.as_ref();
        if !Self::is_token(name) {
            return Err(HeadersError::InvalidHeaderName(name.to_string()));
        }
        Ok(name.to_ascii_lowercase())
    }

    /// Checks `value` for forbidden characters. Case is preserved.
    pub fn value(value: impl AsRef<str>) -> Result<String> {
        let value = value.as_ref();
        if !Self::is_valid_value(value) {
            return Err(HeadersError::InvalidHeaderValue(value.to_string()));
        }
        Ok(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_is_lowercased() {
        assert_eq!(Sanitizer::name("Content-Type").unwrap(), "content-type");
        assert_eq!(Sanitizer::name("X-Custom_Header.1").unwrap(), "x-custom_header.1");
        assert_eq!(Sanitizer::name("!#$%&'*+-.^_`|~").unwrap(), "!#$%&'*+-.^_`|~");
    }

    #[test]
    fn test_name_rejects_non_tokens() {
        for bad in ["", "Content Type", "a:b", "a\tb", "x(y)", "a/b", "\"q\"", "n\u{7f}", "é", "a\r\n"] {
            assert_eq!(
                Sanitizer::name(bad),
                Err(HeadersError::InvalidHeaderName(bad.to_string())),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_value_preserves_case() {
        assert_eq!(Sanitizer::value("Text/HTML; charset=UTF-8").unwrap(), "Text/HTML; charset=UTF-8");
        assert_eq!(Sanitizer::value("").unwrap(), "");
        assert_eq!(Sanitizer::value("a\tb").unwrap(), "a\tb");
        assert_eq!(Sanitizer::value("caf\u{e9}").unwrap(), "caf\u{e9}");
    }

    #[test]
    fn test_value_rejects_forbidden_chars() {
        for bad in ["a\nb", "a\rb", "a\0b", "\u{7f}", "\u{1}", "\u{100}", "日本"] {
            assert!(
                matches!(Sanitizer::value(bad), Err(HeadersError::InvalidHeaderValue(_))),
                "{bad:?} should be rejected"
            );
        }
    }
}
