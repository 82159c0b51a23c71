//! Percent-encoding and decoding of URI components.
//!
//! Encoding is not idempotent: encoding `%20` again yields `%2520`. Callers
//! track whether text is already encoded (see
//! [`UriComponents::is_encoded`](crate::UriComponents::is_encoded)).

use std::borrow::Cow;

use crate::component::ComponentType;
use crate::error::EncodingError;

const HEX_UPPER: &[u8; 16] = b"0123456789ABCDEF";

/// Percent-encodes every byte of `source` not allowed in `component`.
///
/// Allowed characters pass through unchanged; everything else, including
/// `%` and all non-ASCII characters, becomes `%XX` per UTF-8 byte with
/// uppercase hex digits.
///
/// # Examples
///
/// ```
/// use uri_components::{encode, ComponentType};
///
/// assert_eq!(encode("/hotel list", ComponentType::Path), "/hotel%20list");
/// assert_eq!(encode("Z\u{fc}rich", ComponentType::PathSegment), "Z%C3%BCrich");
/// assert_eq!(encode("ba/z", ComponentType::PathSegment), "ba%2Fz");
/// ```
#[must_use]
pub fn encode(source: &str, component: ComponentType) -> Cow<'_, str> {
    let bytes = source.as_bytes();
    let Some(first) = bytes.iter().position(|&b| !component.is_allowed(b)) else {
        return Cow::Borrowed(source);
    };

    let mut encoded = String::with_capacity(source.len() + 16);
    encoded.push_str(&source[..first]);
    for &b in &bytes[first..] {
        if component.is_allowed(b) {
            encoded.push(char::from(b));
        } else {
            push_escaped(&mut encoded, b);
        }
    }
    Cow::Owned(encoded)
}

/// Decodes `%XX` sequences back into UTF-8 text.
///
/// Byte sequences that do not form valid UTF-8 are replaced with
/// `U+FFFD`.
///
/// # Errors
///
/// Returns [`EncodingError::MalformedEscape`] if a `%` is not followed by
/// two hexadecimal digits.
///
/// # Examples
///
/// ```
/// use uri_components::decode;
///
/// assert_eq!(decode("Z%C3%BCrich").unwrap(), "Z\u{fc}rich");
/// assert!(decode("/fo%2o").is_err());
/// ```
pub fn decode(source: &str) -> Result<Cow<'_, str>, EncodingError> {
    if !source.contains('%') {
        return Ok(Cow::Borrowed(source));
    }

    let bytes = source.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            decoded.push(escaped_byte(source, i)?);
            i += 3;
        } else {
            decoded.push(bytes[i]);
            i += 1;
        }
    }

    Ok(Cow::Owned(String::from_utf8_lossy(&decoded).into_owned()))
}

/// Checks that `source` is in encoded form for `component`.
///
/// Every character must either be allowed in the component or be part of
/// a well-formed `%XX` escape.
///
/// # Errors
///
/// Returns [`EncodingError::MalformedEscape`] for a bad escape and
/// [`EncodingError::InvalidChar`] for the first character outside the
/// allowed set.
///
/// # Examples
///
/// ```
/// use uri_components::{verify, ComponentType};
///
/// assert!(verify("/hotel%20list", ComponentType::Path).is_ok());
/// assert!(verify("/{foo}", ComponentType::Path).is_err());
/// ```
pub fn verify(source: &str, component: ComponentType) -> Result<(), EncodingError> {
    let bytes = source.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if b == b'%' {
            escaped_byte(source, i)?;
            i += 3;
        } else if component.is_allowed(b) {
            i += 1;
        } else {
            let char = source[i..].chars().next().unwrap_or(char::REPLACEMENT_CHARACTER);
            return Err(EncodingError::InvalidChar {
                component,
                char,
                position: i,
            });
        }
    }
    Ok(())
}

/// Escapes characters that can never appear in a URI value while keeping
/// existing escapes and printable non-ASCII characters.
///
/// Used when assembling a [`Uri`](crate::Uri) from components that were
/// never encoded, so that `Z\u{fc}rich` survives as-is but a space becomes
/// `%20`.
pub(crate) fn quote(source: &str, component: ComponentType) -> Cow<'_, str> {
    let needs_quoting = |(i, c): (usize, char)| -> bool {
        if c == '%' {
            return escaped_byte(source, i).is_err();
        }
        if c.is_ascii() {
            return !component.is_allowed(c as u8);
        }
        c.is_control() || c.is_whitespace()
    };

    if !source.char_indices().any(needs_quoting) {
        return Cow::Borrowed(source);
    }

    let mut quoted = String::with_capacity(source.len() + 16);
    let mut buf = [0u8; 4];
    for (i, c) in source.char_indices() {
        if needs_quoting((i, c)) {
            for &b in c.encode_utf8(&mut buf).as_bytes() {
                push_escaped(&mut quoted, b);
            }
        } else {
            quoted.push(c);
        }
    }
    Cow::Owned(quoted)
}

fn push_escaped(out: &mut String, b: u8) {
    out.push('%');
    out.push(char::from(HEX_UPPER[usize::from(b >> 4)]));
    out.push(char::from(HEX_UPPER[usize::from(b & 0x0F)]));
}

fn hex_val(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

/// Reads the escape starting at the `%` at byte offset `at`.
fn escaped_byte(source: &str, at: usize) -> Result<u8, EncodingError> {
    let bytes = source.as_bytes();
    let hi = bytes.get(at + 1).copied().and_then(hex_val);
    let lo = bytes.get(at + 2).copied().and_then(hex_val);
    match (hi, lo) {
        (Some(hi), Some(lo)) => Ok((hi << 4) | lo),
        _ => Err(EncodingError::MalformedEscape {
            value: source[at..].to_string(),
            position: at,
        }),
    }
}
