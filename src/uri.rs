//! Validated URI value.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::net::Ipv6Addr;
use std::str::FromStr;

use crate::component::ComponentType;
use crate::encoding::decode;
use crate::error::{EncodingError, ParseError, ParseErrorKind};
use crate::parser::{RawUri, split};

/// A parsed and validated URI reference.
///
/// Components are kept in their raw, percent-encoded form. Printable
/// non-ASCII characters are accepted unescaped, so a URI assembled from
/// components that were never encoded keeps `Z\u{fc}rich` as-is, while
/// spaces, controls and other illegal ASCII characters are rejected.
///
/// Two values are equal if their string forms are equal.
///
/// # Examples
///
/// ```
/// use uri_components::Uri;
///
/// let uri = Uri::parse("http://example.com:8080/hotel%20list?page=2#top").unwrap();
/// assert_eq!(uri.scheme(), Some("http"));
/// assert_eq!(uri.host(), Some("example.com"));
/// assert_eq!(uri.port(), Some(8080));
/// assert_eq!(uri.path(), "/hotel%20list");
/// assert_eq!(uri.decoded_path().unwrap(), "/hotel list");
/// assert_eq!(uri.query(), Some("page=2"));
/// assert_eq!(uri.fragment(), Some("top"));
///
/// assert!(Uri::parse("http://example.com/hotel list").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Uri {
    scheme: Option<String>,
    scheme_specific_part: Option<String>,
    user_info: Option<String>,
    host: Option<String>,
    port: Option<u16>,
    path: String,
    query: Option<String>,
    fragment: Option<String>,
    /// Validated string representation
    normalized: String,
}

impl Uri {
    /// Parses a URI reference from a string.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if:
    /// - A character is not legal in a URI
    /// - A `%` is not followed by two hex digits
    /// - The port is not a number in `0..=65535`
    /// - A bracketed host is not a valid IPv6 address
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        Self::parse_inner(input).map_err(|kind| ParseError {
            input: input.to_string(),
            kind,
        })
    }

    /// Returns the scheme, if present.
    #[must_use]
    pub fn scheme(&self) -> Option<&str> {
        self.scheme.as_deref()
    }

    /// Returns the scheme-specific part of an opaque URI.
    #[must_use]
    pub fn scheme_specific_part(&self) -> Option<&str> {
        self.scheme_specific_part.as_deref()
    }

    /// Returns the user info, if present.
    #[must_use]
    pub fn user_info(&self) -> Option<&str> {
        self.user_info.as_deref()
    }

    /// Returns the host, brackets included for IP literals.
    #[must_use]
    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    /// Returns the port, if specified.
    #[must_use]
    pub const fn port(&self) -> Option<u16> {
        self.port
    }

    /// Returns the raw path; empty for opaque URIs.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the path with escapes decoded.
    ///
    /// # Errors
    ///
    /// Never fails for a parsed `Uri`, as escapes were validated; the
    /// result type mirrors [`decode`].
    pub fn decoded_path(&self) -> Result<Cow<'_, str>, EncodingError> {
        decode(&self.path)
    }

    /// Returns the raw query, if present.
    #[must_use]
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Returns the raw fragment, if present.
    #[must_use]
    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    /// Returns true if this URI has a scheme and no hierarchical part.
    #[must_use]
    pub const fn is_opaque(&self) -> bool {
        self.scheme_specific_part.is_some()
    }

    /// Returns true if this URI has a scheme.
    #[must_use]
    pub const fn is_absolute(&self) -> bool {
        self.scheme.is_some()
    }

    /// Returns the URI string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.normalized
    }

    fn parse_inner(input: &str) -> Result<Self, ParseErrorKind> {
        Self::validate_chars(input)?;

        let normalized = input.to_string();
        match split(input)? {
            RawUri::Opaque {
                scheme,
                scheme_specific_part,
                fragment,
            } => Ok(Self {
                scheme: Some(scheme.to_string()),
                scheme_specific_part: Some(scheme_specific_part.to_string()),
                user_info: None,
                host: None,
                port: None,
                path: String::new(),
                query: None,
                fragment: fragment.map(str::to_string),
                normalized,
            }),
            RawUri::Hierarchical {
                scheme,
                user_info,
                host,
                port,
                path,
                query,
                fragment,
            } => {
                if let Some(host) = host {
                    Self::validate_ip_literal(host)?;
                }
                let port = port.map(Self::parse_port).transpose()?;
                Ok(Self {
                    scheme: scheme.map(str::to_string),
                    scheme_specific_part: None,
                    user_info: user_info.map(str::to_string),
                    host: host.map(str::to_string),
                    port,
                    path: path.to_string(),
                    query: query.map(str::to_string),
                    fragment: fragment.map(str::to_string),
                    normalized,
                })
            }
        }
    }

    fn validate_chars(input: &str) -> Result<(), ParseErrorKind> {
        let bytes = input.as_bytes();
        for (position, char) in input.char_indices() {
            let legal = if char == '%' {
                let is_hex = |i: usize| bytes.get(i).is_some_and(u8::is_ascii_hexdigit);
                if !(is_hex(position + 1) && is_hex(position + 2)) {
                    return Err(ParseErrorKind::InvalidEscape { position });
                }
                true
            } else if char.is_ascii() {
                ComponentType::Uri.is_allowed(char as u8)
            } else {
                !char.is_control() && !char.is_whitespace()
            };
            if !legal {
                return Err(ParseErrorKind::InvalidChar { char, position });
            }
        }
        Ok(())
    }

    fn validate_ip_literal(host: &str) -> Result<(), ParseErrorKind> {
        let Some(literal) = host.strip_prefix('[').and_then(|h| h.strip_suffix(']')) else {
            return Ok(());
        };
        let address = literal.split_once('%').map_or(literal, |(addr, _zone)| addr);
        address
            .parse::<Ipv6Addr>()
            .map(|_| ())
            .map_err(|_| ParseErrorKind::InvalidIpLiteral {
                value: literal.to_string(),
                reason: "invalid IPv6 address",
            })
    }

    fn parse_port(port: &str) -> Result<u16, ParseErrorKind> {
        port.parse().map_err(|_| ParseErrorKind::InvalidPort {
            value: port.to_string(),
            reason: "port must be 0-65535",
        })
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.normalized)
    }
}

impl FromStr for Uri {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Uri {
    fn as_ref(&self) -> &str {
        &self.normalized
    }
}

impl TryFrom<&str> for Uri {
    type Error = ParseError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl PartialOrd for Uri {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Uri {
    fn cmp(&self, other: &Self) -> Ordering {
        self.normalized.cmp(&other.normalized)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Uri {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.normalized)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Uri {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
