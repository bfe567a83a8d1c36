//! Percent-encoding for URL paths.
//!
//! Request paths are decoded before they are matched against routes, and
//! reversed paths are encoded before they are handed out.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

/// Characters left unescaped in reversed paths: RFC 3986 unreserved
/// characters, sub-delimiters, and `/`, `:`, `@`.
const PATH_SAFE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'/')
    .remove(b':')
    .remove(b'@')
    .remove(b'!')
    .remove(b'$')
    .remove(b'&')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'*')
    .remove(b'+')
    .remove(b',')
    .remove(b';')
    .remove(b'=');

/// Errors that can occur while decoding a request path.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PathDecodingError {
    #[error("Request path is not valid UTF-8 after percent-decoding")]
    InvalidUtf8,
}

/// Percent-decodes a request path.
///
/// # Errors
///
/// Returns [`PathDecodingError::InvalidUtf8`] if the decoded bytes are not
/// valid UTF-8.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(decode_path("/search/rust%20lang/").unwrap(), "/search/rust lang/");
/// ```
pub fn decode_path(path: &str) -> Result<String, PathDecodingError> {
    percent_decode_str(path)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|_| PathDecodingError::InvalidUtf8)
}

/// Percent-encodes a path, leaving `/` and other path-safe characters as-is.
pub fn encode_path(path: &str) -> String {
    utf8_percent_encode(path, PATH_SAFE).to_string()
}
