//! Splits a URI string into raw components.
//!
//! # Grammar Reference
//!
//! RFC 3986, extended so that `{name}` placeholders can stand in for any
//! component, including the port:
//!
//! ```abnf
//! URI-reference = [ scheme ":" ] hier-part [ "?" query ] [ "#" fragment ]
//! hier-part     = "//" authority path / path
//! authority     = [ userinfo "@" ] host [ ":" port ]
//! host          = "[" ip-literal "]" / reg-name
//! port          = *DIGIT [ placeholder ]
//! placeholder   = "{" 1*( %x00-2E / %x30-7C / %x7E-10FFFF ) "}"
//! ```
//!
//! A scheme that is not followed by `/` makes the URI opaque
//! (`mailto:user@example.com`, `http:example.com/foo`); everything up to
//! the fragment is then the scheme-specific part.

use crate::error::ParseErrorKind;

/// Borrowed pieces of a URI string, before any validation beyond structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RawUri<'a> {
    Hierarchical {
        scheme: Option<&'a str>,
        user_info: Option<&'a str>,
        host: Option<&'a str>,
        port: Option<&'a str>,
        path: &'a str,
        query: Option<&'a str>,
        fragment: Option<&'a str>,
    },
    Opaque {
        scheme: &'a str,
        scheme_specific_part: &'a str,
        fragment: Option<&'a str>,
    },
}

pub(crate) fn split(input: &str) -> Result<RawUri<'_>, ParseErrorKind> {
    let (scheme, rest) = split_scheme(input);
    let (rest, fragment) = match rest.split_once('#') {
        Some((rest, fragment)) => (rest, Some(fragment)),
        None => (rest, None),
    };

    if let Some(scheme) = scheme {
        if !rest.starts_with('/') {
            return Ok(RawUri::Opaque {
                scheme,
                scheme_specific_part: rest,
                fragment,
            });
        }
    }

    let (rest, query) = match rest.split_once('?') {
        Some((rest, query)) => (rest, Some(query)),
        None => (rest, None),
    };

    let (user_info, host, port, path) = match rest.strip_prefix("//") {
        Some(after) => {
            let end = after.find('/').unwrap_or(after.len());
            let (user_info, host, port) = split_authority(&after[..end])?;
            (user_info, Some(host), port, &after[end..])
        }
        None => (None, None, None, rest),
    };

    Ok(RawUri::Hierarchical {
        scheme,
        user_info,
        host,
        port,
        path,
        query,
        fragment,
    })
}

/// Splits off `scheme ":"` if the first delimiter in `input` is a colon.
fn split_scheme(input: &str) -> (Option<&str>, &str) {
    match input.find([':', '/', '?', '#']) {
        Some(idx) if idx > 0 && input.as_bytes()[idx] == b':' => {
            (Some(&input[..idx]), &input[idx + 1..])
        }
        _ => (None, input),
    }
}

type Authority<'a> = (Option<&'a str>, &'a str, Option<&'a str>);

fn split_authority(authority: &str) -> Result<Authority<'_>, ParseErrorKind> {
    let (user_info, host_port) = match authority.find(['@', '[']) {
        Some(idx) if authority.as_bytes()[idx] == b'@' => {
            (Some(&authority[..idx]), &authority[idx + 1..])
        }
        _ => (None, authority),
    };

    let (host, port) = if host_port.starts_with('[') {
        let close = host_port
            .find(']')
            .ok_or_else(|| ParseErrorKind::InvalidIpLiteral {
                value: host_port.to_string(),
                reason: "missing closing bracket for IP literal",
            })?;
        let host = &host_port[..=close];
        match &host_port[close + 1..] {
            "" => (host, None),
            after => match after.strip_prefix(':') {
                Some(port) => (host, Some(port)),
                None => {
                    return Err(ParseErrorKind::InvalidIpLiteral {
                        value: host_port.to_string(),
                        reason: "expected ':' after IP literal closing bracket",
                    });
                }
            },
        }
    } else {
        match host_port.split_once(':') {
            Some((host, port)) => (host, Some(port)),
            None => (host_port, None),
        }
    };

    let port = port.filter(|p| !p.is_empty());
    if let Some(port) = port {
        validate_port(port)?;
    }

    Ok((user_info, host, port))
}

/// A port is digits, optionally followed by one placeholder. A literal
/// port must fit in a `u16`.
fn validate_port(port: &str) -> Result<(), ParseErrorKind> {
    let digits = port.bytes().take_while(u8::is_ascii_digit).count();
    let rest = &port[digits..];
    let valid = rest.is_empty()
        || (rest.len() > 2 && rest.starts_with('{') && rest.ends_with('}') && !rest.contains('/'));
    if !valid {
        return Err(ParseErrorKind::InvalidPort {
            value: port.to_string(),
            reason: "port must be digits or a template placeholder",
        });
    }
    if rest.is_empty() && port.parse::<u16>().is_err() {
        return Err(ParseErrorKind::InvalidPort {
            value: port.to_string(),
            reason: "port must be 0-65535",
        });
    }
    Ok(())
}
