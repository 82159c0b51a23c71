//! URI component types and the characters each one allows unescaped.
//!
//! # Grammar Reference
//!
//! The allowed sets follow RFC 3986:
//!
//! ```abnf
//! unreserved  = ALPHA / DIGIT / "-" / "." / "_" / "~"
//! sub-delims  = "!" / "$" / "&" / "'" / "(" / ")" / "*" / "+" / "," / ";" / "="
//! gen-delims  = ":" / "/" / "?" / "#" / "[" / "]" / "@"
//! pchar       = unreserved / pct-encoded / sub-delims / ":" / "@"
//! ```
//!
//! Each set is a 128-bit mask over ASCII; bytes at or above `0x80` are never
//! allowed and are always percent-encoded.

use std::fmt;

const fn mask(bytes: &[u8]) -> u128 {
    let mut m = 0u128;
    let mut i = 0;
    while i < bytes.len() {
        m |= 1u128 << bytes[i];
        i += 1;
    }
    m
}

const ALPHA: u128 = mask(b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz");
const DIGIT: u128 = mask(b"0123456789");
const UNRESERVED: u128 = ALPHA | DIGIT | mask(b"-._~");
const SUB_DELIMS: u128 = mask(b"!$&'()*+,;=");
const GEN_DELIMS: u128 = mask(b":/?#[]@");
const PCHAR: u128 = UNRESERVED | SUB_DELIMS | mask(b":@");

const SCHEME: u128 = ALPHA | DIGIT | mask(b"+-.");
const AUTHORITY: u128 = UNRESERVED | SUB_DELIMS | mask(b":@");
const USER_INFO: u128 = UNRESERVED | SUB_DELIMS | mask(b":");
const HOST_IPV4: u128 = UNRESERVED | SUB_DELIMS;
const HOST_IPV6: u128 = UNRESERVED | SUB_DELIMS | mask(b"[]:");
const PATH: u128 = PCHAR | mask(b"/");
const QUERY: u128 = PCHAR | mask(b"/?");
const QUERY_PARAM: u128 = QUERY & !mask(b"=&");
const FRAGMENT: u128 = PCHAR | mask(b"/?");
const URI: u128 = UNRESERVED | SUB_DELIMS | GEN_DELIMS;

/// The component of a URI a piece of text belongs to.
///
/// Determines which characters may appear unescaped. `/` is allowed in a
/// [`Path`](Self::Path) but not in a [`PathSegment`](Self::PathSegment);
/// `:` is allowed in [`UserInfo`](Self::UserInfo) but not in
/// [`HostIpv4`](Self::HostIpv4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentType {
    /// `scheme`
    Scheme,
    /// `[userinfo@]host[:port]`
    Authority,
    /// `userinfo`
    UserInfo,
    /// A registered name or IPv4 address
    HostIpv4,
    /// A bracketed IP literal
    HostIpv6,
    /// `port`
    Port,
    /// A full path, `/` included
    Path,
    /// A single path segment
    PathSegment,
    /// A full query string
    Query,
    /// A query parameter name or value
    QueryParam,
    /// `fragment`
    Fragment,
    /// Any character legal somewhere in a URI
    Uri,
}

impl ComponentType {
    const fn table(self) -> u128 {
        match self {
            Self::Scheme => SCHEME,
            Self::Authority => AUTHORITY,
            Self::UserInfo => USER_INFO,
            Self::HostIpv4 => HOST_IPV4,
            Self::HostIpv6 => HOST_IPV6,
            Self::Port => DIGIT,
            Self::Path => PATH,
            Self::PathSegment => PCHAR,
            Self::Query => QUERY,
            Self::QueryParam => QUERY_PARAM,
            Self::Fragment => FRAGMENT,
            Self::Uri => URI,
        }
    }

    /// Returns true if `byte` may appear unescaped in this component.
    #[must_use]
    pub const fn is_allowed(self, byte: u8) -> bool {
        byte < 0x80 && (self.table() >> byte) & 1 == 1
    }

    /// Returns the host component type for `host`: bracketed literals are IPv6.
    #[must_use]
    pub fn for_host(host: &str) -> Self {
        if host.starts_with('[') {
            Self::HostIpv6
        } else {
            Self::HostIpv4
        }
    }

    /// Returns a human-readable name for the component.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Scheme => "scheme",
            Self::Authority => "authority",
            Self::UserInfo => "user info",
            Self::HostIpv4 => "host",
            Self::HostIpv6 => "IPv6 host",
            Self::Port => "port",
            Self::Path => "path",
            Self::PathSegment => "path segment",
            Self::Query => "query",
            Self::QueryParam => "query parameter",
            Self::Fragment => "fragment",
            Self::Uri => "URI",
        }
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slash_allowed_in_path_not_segment() {
        assert!(ComponentType::Path.is_allowed(b'/'));
        assert!(!ComponentType::PathSegment.is_allowed(b'/'));
    }

    #[test]
    fn colon_allowed_in_user_info_not_host() {
        assert!(ComponentType::UserInfo.is_allowed(b':'));
        assert!(!ComponentType::HostIpv4.is_allowed(b':'));
        assert!(ComponentType::HostIpv6.is_allowed(b':'));
    }

    #[test]
    fn query_param_excludes_separators() {
        assert!(ComponentType::Query.is_allowed(b'='));
        assert!(ComponentType::Query.is_allowed(b'&'));
        assert!(!ComponentType::QueryParam.is_allowed(b'='));
        assert!(!ComponentType::QueryParam.is_allowed(b'&'));
        assert!(ComponentType::QueryParam.is_allowed(b'?'));
    }

    #[test]
    fn port_is_digits_only() {
        assert!(ComponentType::Port.is_allowed(b'8'));
        assert!(!ComponentType::Port.is_allowed(b'{'));
    }

    #[test]
    fn non_ascii_never_allowed() {
        assert!(!ComponentType::Uri.is_allowed(0xC3));
        assert!(!ComponentType::Path.is_allowed(0xFF));
    }

    #[test]
    fn braces_and_space_never_allowed() {
        for ty in [
            ComponentType::Scheme,
            ComponentType::UserInfo,
            ComponentType::HostIpv4,
            ComponentType::Path,
            ComponentType::Query,
            ComponentType::Fragment,
            ComponentType::Uri,
        ] {
            assert!(!ty.is_allowed(b'{'), "{ty}");
            assert!(!ty.is_allowed(b'}'), "{ty}");
            assert!(!ty.is_allowed(b' '), "{ty}");
        }
    }

    #[test]
    fn host_type_from_brackets() {
        assert_eq!(ComponentType::for_host("[::1]"), ComponentType::HostIpv6);
        assert_eq!(ComponentType::for_host("example.com"), ComponentType::HostIpv4);
    }
}
