//! Mutable builder for [`UriComponents`].
//!
//! The builder accumulates raw, possibly template-bearing component strings
//! and produces immutable [`UriComponents`] values. It stays usable after
//! `build`, so one builder can produce several related URIs.

use std::collections::HashMap;
use std::fmt::Display;

use crate::components::UriComponents;
use crate::constants::HTTP_SCHEMES;
use crate::error::{BuilderError, ExpandError, ParseError, ParseErrorKind};
use crate::hierarchical::HierarchicalUriComponents;
use crate::opaque::OpaqueUriComponents;
use crate::parser::{RawUri, split};
use crate::path::PathBuilder;
use crate::query::QueryParams;
use crate::template::{Missing, UriTemplateVariables};
use crate::uri::Uri;

/// A builder for [`UriComponents`].
///
/// Setters take `&mut self` and return `&mut Self`, so calls chain on a
/// temporary or on a named builder alike.
///
/// # Examples
///
/// ```
/// use uri_components::UriComponentsBuilder;
///
/// let components = UriComponentsBuilder::new()
///     .scheme("https")
///     .host("example.com")
///     .path("/hotels")
///     .path_segment(["{hotel}", "rooms"])
///     .query_param("sort", ["price"])
///     .build_and_expand(&["42"])
///     .unwrap();
///
/// assert_eq!(
///     components.to_uri_string(),
///     "https://example.com/hotels/42/rooms?sort=price"
/// );
/// ```
///
/// Opaque URIs are built from a scheme-specific part:
///
/// ```
/// use uri_components::UriComponentsBuilder;
///
/// let components = UriComponentsBuilder::new()
///     .scheme("mailto")
///     .scheme_specific_part("user@example.com")
///     .build()
///     .unwrap();
/// assert!(components.is_opaque());
/// assert_eq!(components.to_uri_string(), "mailto:user@example.com");
/// ```
#[derive(Debug, Clone, Default)]
pub struct UriComponentsBuilder {
    scheme: Option<String>,
    scheme_specific_part: Option<String>,
    user_info: Option<String>,
    host: Option<String>,
    port: Option<String>,
    path: PathBuilder,
    query_params: QueryParams,
    fragment: Option<String>,
    uri_variables: HashMap<String, String>,
}

impl UriComponentsBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder seeded with `path`.
    ///
    /// # Examples
    ///
    /// ```
    /// use uri_components::UriComponentsBuilder;
    ///
    /// let components = UriComponentsBuilder::from_path("/foo")
    ///     .path("/bar")
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(components.path().as_deref(), Some("/foo/bar"));
    /// ```
    #[must_use]
    pub fn from_path(path: &str) -> Self {
        let mut builder = Self::new();
        builder.path(path);
        builder
    }

    /// Creates a builder seeded from a [`Uri`] value.
    #[must_use]
    pub fn from_uri(uri: &Uri) -> Self {
        let mut builder = Self::new();
        builder.uri(uri);
        builder
    }

    /// Creates a builder by splitting a URI string into its components.
    ///
    /// Components are kept as written; placeholders such as `{id}` are
    /// allowed anywhere, including the port. No character validation takes
    /// place here; see [`build_encoded`](Self::build_encoded).
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if:
    /// - The port is neither digits nor a placeholder
    /// - A bracketed host is not closed, or is followed by something other
    ///   than a port
    ///
    /// # Examples
    ///
    /// ```
    /// use uri_components::UriComponentsBuilder;
    ///
    /// let builder = UriComponentsBuilder::from_uri_string(
    ///     "https://user@example.com:{port}/a/{b}?q=1#frag",
    /// )?;
    /// let components = builder.build()?;
    /// assert_eq!(components.user_info(), Some("user"));
    /// assert_eq!(components.port_str(), Some("{port}"));
    /// assert_eq!(components.path_segments(), vec!["a", "{b}"]);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn from_uri_string(uri: &str) -> Result<Self, ParseError> {
        let raw = split(uri).map_err(|kind| Self::rejected(uri, kind))?;
        Ok(Self::from_raw(raw))
    }

    /// Creates a builder from an HTTP URL.
    ///
    /// Like [`from_uri_string`](Self::from_uri_string), but the scheme must
    /// be `http` or `https` (in any case, stored lowercased) and a host must
    /// be present.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` with [`ParseErrorKind::InvalidScheme`] or
    /// [`ParseErrorKind::MissingHost`], or any error of
    /// [`from_uri_string`](Self::from_uri_string).
    ///
    /// # Examples
    ///
    /// ```
    /// use uri_components::{ParseErrorKind, UriComponentsBuilder};
    ///
    /// let components = UriComponentsBuilder::from_http_url("HTTP://example.com/a")?
    ///     .build()?;
    /// assert_eq!(components.scheme(), Some("http"));
    ///
    /// let err = UriComponentsBuilder::from_http_url("ftp://example.com").unwrap_err();
    /// assert!(matches!(err.kind, ParseErrorKind::InvalidScheme { .. }));
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn from_http_url(http_url: &str) -> Result<Self, ParseError> {
        let raw = split(http_url).map_err(|kind| Self::rejected(http_url, kind))?;
        let (scheme, host) = match &raw {
            RawUri::Hierarchical { scheme, host, .. } => (*scheme, *host),
            RawUri::Opaque { scheme, .. } => (Some(*scheme), None),
        };
        let is_http = scheme.is_some_and(|s| HTTP_SCHEMES.iter().any(|h| s.eq_ignore_ascii_case(h)));
        if !is_http {
            let found = scheme.map(str::to_string);
            return Err(Self::rejected(http_url, ParseErrorKind::InvalidScheme { found }));
        }
        if host.is_none_or(str::is_empty) {
            return Err(Self::rejected(http_url, ParseErrorKind::MissingHost));
        }

        let mut builder = Self::from_raw(raw);
        builder.scheme = builder.scheme.map(|s| s.to_ascii_lowercase());
        Ok(builder)
    }

    fn rejected(input: &str, kind: ParseErrorKind) -> ParseError {
        let err = ParseError {
            input: input.to_string(),
            kind,
        };
        tracing::debug!(error = %err, "rejected URI string");
        err
    }

    fn from_raw(raw: RawUri<'_>) -> Self {
        let mut builder = Self::new();
        match raw {
            RawUri::Opaque {
                scheme,
                scheme_specific_part,
                fragment,
            } => {
                builder.scheme(scheme);
                builder.scheme_specific_part(scheme_specific_part);
                if let Some(fragment) = fragment {
                    builder.fragment(fragment);
                }
            }
            RawUri::Hierarchical {
                scheme,
                user_info,
                host,
                port,
                path,
                query,
                fragment,
            } => {
                if let Some(scheme) = scheme {
                    builder.scheme(scheme);
                }
                if let Some(user_info) = user_info {
                    builder.user_info(user_info);
                }
                if let Some(host) = host {
                    builder.host(host);
                }
                if let Some(port) = port {
                    builder.port(port);
                }
                builder.path(path);
                if let Some(query) = query {
                    builder.query(query);
                }
                if let Some(fragment) = fragment {
                    builder.fragment(fragment);
                }
            }
        }
        builder
    }

    /// Overwrites components with those present in `uri`.
    ///
    /// The scheme is always replaced. For an opaque `uri` the builder
    /// switches to opaque mode; otherwise user info, host, port, path and
    /// query are replaced where `uri` has them.
    pub fn uri(&mut self, uri: &Uri) -> &mut Self {
        self.scheme = uri.scheme().map(str::to_string);
        if let Some(ssp) = uri.scheme_specific_part() {
            self.scheme_specific_part(ssp);
        } else {
            if let Some(user_info) = uri.user_info() {
                self.user_info(user_info);
            }
            if let Some(host) = uri.host() {
                self.host(host);
            }
            if let Some(port) = uri.port() {
                self.port(port);
            }
            if !uri.path().is_empty() {
                self.replace_path(uri.path());
            }
            if let Some(query) = uri.query() {
                self.replace_query(query);
            }
        }
        if let Some(fragment) = uri.fragment() {
            self.fragment(fragment);
        }
        self
    }

    /// Overwrites components with those of `components`.
    pub fn uri_components(&mut self, components: &UriComponents) -> &mut Self {
        components.copy_to_uri_components_builder(self);
        self
    }

    /// Sets the scheme. An empty string clears it.
    pub fn scheme(&mut self, scheme: &str) -> &mut Self {
        self.scheme = non_empty(scheme);
        self
    }

    /// Sets the scheme-specific part, switching to an opaque URI.
    ///
    /// Clears user info, host, port, path and query.
    pub fn scheme_specific_part(&mut self, ssp: &str) -> &mut Self {
        self.scheme_specific_part = Some(ssp.to_string());
        self.user_info = None;
        self.host = None;
        self.port = None;
        self.path.clear();
        self.query_params.clear();
        self
    }

    /// Sets the user info.
    pub fn user_info(&mut self, user_info: &str) -> &mut Self {
        self.user_info = Some(user_info.to_string());
        self.reset_scheme_specific_part()
    }

    /// Sets the host. An empty host is kept, as in `file:///path`.
    pub fn host(&mut self, host: &str) -> &mut Self {
        self.host = Some(host.to_string());
        self.reset_scheme_specific_part()
    }

    /// Sets the port from a number or a template such as `"{port}"`.
    ///
    /// An empty value clears the port.
    pub fn port(&mut self, port: impl Display) -> &mut Self {
        self.port = non_empty(&port.to_string());
        self.reset_scheme_specific_part()
    }

    /// Appends `path` to the current path.
    ///
    /// Appended text joins a preceding full path directly, and any `//`
    /// this creates is collapsed at build time.
    pub fn path(&mut self, path: &str) -> &mut Self {
        self.path.add_path(path);
        self.reset_scheme_specific_part()
    }

    /// Appends path segments. A `/` inside a segment is part of the segment
    /// and gets encoded as `%2F`.
    ///
    /// # Examples
    ///
    /// ```
    /// use uri_components::UriComponentsBuilder;
    ///
    /// let components = UriComponentsBuilder::new()
    ///     .path_segment(["foo", "ba/z"])
    ///     .build()
    ///     .unwrap()
    ///     .encode();
    /// assert_eq!(components.path().as_deref(), Some("/foo/ba%2Fz"));
    /// ```
    pub fn path_segment<I>(&mut self, segments: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.path.add_segments(segments);
        self.reset_scheme_specific_part()
    }

    /// Replaces the whole path. An empty string removes it.
    pub fn replace_path(&mut self, path: &str) -> &mut Self {
        self.path.clear();
        self.path(path)
    }

    /// Parses `query` and appends its parameters.
    ///
    /// `name` alone records a parameter without a value, `name=` one with
    /// an empty value.
    pub fn query(&mut self, query: &str) -> &mut Self {
        self.query_params.extend_from_query(query);
        self.reset_scheme_specific_part()
    }

    /// Replaces all query parameters with those parsed from `query`.
    pub fn replace_query(&mut self, query: &str) -> &mut Self {
        self.query_params.clear();
        self.query(query)
    }

    /// Appends values to the query parameter `name`.
    ///
    /// With no values, a single value-less parameter is added.
    ///
    /// # Examples
    ///
    /// ```
    /// use uri_components::UriComponentsBuilder;
    ///
    /// let components = UriComponentsBuilder::from_path("/search")
    ///     .query_param("tag", ["a", "b"])
    ///     .query_param("flag", [""; 0])
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(components.query().as_deref(), Some("tag=a&tag=b&flag"));
    /// ```
    pub fn query_param<I>(&mut self, name: &str, values: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: ToString,
    {
        let mut added = false;
        for value in values {
            self.query_params.add(name, Some(value.to_string()));
            added = true;
        }
        if !added {
            self.query_params.add(name, None);
        }
        self.reset_scheme_specific_part()
    }

    /// Replaces the values of `name`. With no values, the parameter is
    /// removed.
    pub fn replace_query_param<I>(&mut self, name: &str, values: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: ToString,
    {
        let values: Vec<String> = values.into_iter().map(|v| v.to_string()).collect();
        self.query_params.remove(name);
        if !values.is_empty() {
            self.query_param(name, values);
        }
        self.reset_scheme_specific_part()
    }

    /// Appends every parameter of `params`, keeping their order.
    pub fn query_params(&mut self, params: &QueryParams) -> &mut Self {
        for (name, values) in params.iter() {
            if values.is_empty() && !self.query_params.contains(name) {
                self.query_params.set(name, Vec::new());
            }
            for value in values {
                self.query_params.add(name, value.clone());
            }
        }
        self.reset_scheme_specific_part()
    }

    /// Replaces all query parameters with `params`.
    pub fn replace_query_params(&mut self, params: &QueryParams) -> &mut Self {
        self.query_params.clear();
        self.query_params(params)
    }

    /// Sets the fragment. An empty string clears it.
    pub fn fragment(&mut self, fragment: &str) -> &mut Self {
        self.fragment = non_empty(fragment);
        self
    }

    /// Adds variables that [`build`](Self::build) expands.
    ///
    /// Placeholders without a matching variable are left in place for a
    /// later [`UriComponents::expand`].
    ///
    /// # Examples
    ///
    /// ```
    /// use uri_components::UriComponentsBuilder;
    ///
    /// let components = UriComponentsBuilder::from_path("/{a}/{b}")
    ///     .uri_variables([("a", "x")])
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(components.path().as_deref(), Some("/x/{b}"));
    /// ```
    pub fn uri_variables<I, K, V>(&mut self, variables: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Display,
    {
        self.uri_variables.extend(
            variables
                .into_iter()
                .map(|(name, value)| (name.into(), value.to_string())),
        );
        self
    }

    fn reset_scheme_specific_part(&mut self) -> &mut Self {
        self.scheme_specific_part = None;
        self
    }

    /// Builds [`UriComponents`] from the current state.
    ///
    /// Pending [`uri_variables`](Self::uri_variables) are expanded.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::Expand`] if a pending variable sets the port
    /// to something other than a number.
    pub fn build(&self) -> Result<UriComponents, BuilderError> {
        let components = self.assemble(false);
        let components = if self.uri_variables.is_empty() {
            components
        } else {
            let mut variables = &self.uri_variables;
            components.expand_internal(&mut variables, Missing::Skip)?
        };
        tracing::trace!(
            opaque = components.is_opaque(),
            encoded = false,
            "built URI components"
        );
        Ok(components)
    }

    /// Builds [`UriComponents`] from components that are already
    /// percent-encoded.
    ///
    /// Every hierarchical component is checked against its allowed
    /// characters. The result is marked encoded, so
    /// [`UriComponents::encode`] leaves it as is and expansion fails.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::Encoding`] if a component holds an illegal
    /// character or a malformed escape, and
    /// [`BuilderError::Expand`] if variables are pending.
    ///
    /// # Examples
    ///
    /// ```
    /// use uri_components::{BuilderError, EncodingError, UriComponentsBuilder};
    ///
    /// let components = UriComponentsBuilder::from_path("/hotel%20list")
    ///     .build_encoded()
    ///     .unwrap();
    /// assert!(components.is_encoded());
    ///
    /// let err = UriComponentsBuilder::from_path("/fo%2o").build_encoded().unwrap_err();
    /// assert!(matches!(err, BuilderError::Encoding(EncodingError::MalformedEscape { .. })));
    /// ```
    pub fn build_encoded(&self) -> Result<UriComponents, BuilderError> {
        if !self.uri_variables.is_empty() {
            return Err(ExpandError::AlreadyEncoded.into());
        }
        let components = self.assemble(true);
        if let UriComponents::Hierarchical(h) = &components {
            if let Err(e) = h.verify() {
                tracing::debug!(uri = %components, error = %e, "rejected encoded URI components");
                return Err(e.into());
            }
        }
        tracing::trace!(
            opaque = components.is_opaque(),
            encoded = true,
            "built URI components"
        );
        Ok(components)
    }

    /// Builds and expands with positional values.
    ///
    /// # Errors
    ///
    /// Returns `BuilderError` if building or expansion fails.
    pub fn build_and_expand<T: Display>(&self, values: &[T]) -> Result<UriComponents, BuilderError> {
        Ok(self.build()?.expand(values)?)
    }

    /// Builds and expands with `variables`.
    ///
    /// # Errors
    ///
    /// Returns `BuilderError` if building or expansion fails.
    pub fn build_and_expand_with<V: UriTemplateVariables>(
        &self,
        variables: V,
    ) -> Result<UriComponents, BuilderError> {
        Ok(self.build()?.expand_with(variables)?)
    }

    /// Builds, encodes and renders the URI string.
    ///
    /// # Errors
    ///
    /// Returns `BuilderError` if building fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use uri_components::UriComponentsBuilder;
    ///
    /// let uri = UriComponentsBuilder::from_uri_string("http://example.com/hotel list")?
    ///     .to_uri_string()?;
    /// assert_eq!(uri, "http://example.com/hotel%20list");
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn to_uri_string(&self) -> Result<String, BuilderError> {
        Ok(self.build()?.encode().to_uri_string())
    }

    pub(crate) fn assemble(&self, encoded: bool) -> UriComponents {
        match &self.scheme_specific_part {
            Some(ssp) => OpaqueUriComponents::new(
                self.scheme.clone(),
                ssp.clone(),
                self.fragment.clone(),
            )
            .into(),
            None => HierarchicalUriComponents::new(
                self.scheme.clone(),
                self.user_info.clone(),
                self.host.clone(),
                self.port.clone(),
                self.path.build(),
                self.query_params.clone(),
                self.fragment.clone(),
                encoded,
            )
            .into(),
        }
    }
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EncodingError;

    #[test]
    fn new_builds_empty() {
        let components = UriComponentsBuilder::new().build().unwrap();
        assert_eq!(components.to_uri_string(), "");
        assert_eq!(components.path(), None);
        assert_eq!(components.query(), None);
    }

    #[test]
    fn from_uri_string_hierarchical() {
        let components = UriComponentsBuilder::from_uri_string(
            "http://user:pw@example.com:8080/a/b?q=1&q=2&flag#frag",
        )
        .unwrap()
        .build()
        .unwrap();
        assert_eq!(components.scheme(), Some("http"));
        assert_eq!(components.user_info(), Some("user:pw"));
        assert_eq!(components.host(), Some("example.com"));
        assert_eq!(components.port(), Some(8080));
        assert_eq!(components.path().as_deref(), Some("/a/b"));
        assert_eq!(components.query().as_deref(), Some("q=1&q=2&flag"));
        assert_eq!(components.fragment(), Some("frag"));
    }

    #[test]
    fn from_uri_string_opaque() {
        let components = UriComponentsBuilder::from_uri_string("http:example.com/foo/bar")
            .unwrap()
            .build()
            .unwrap();
        assert!(components.is_opaque());
        assert_eq!(components.scheme_specific_part(), Some("example.com/foo/bar"));
    }

    #[test]
    fn from_uri_string_empty_fragment_dropped() {
        let components = UriComponentsBuilder::from_uri_string("/a#")
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(components.fragment(), None);
        assert_eq!(components.to_uri_string(), "/a");
    }

    #[test]
    fn from_uri_string_invalid_port() {
        let err = UriComponentsBuilder::from_uri_string("http://example.com:8o/").unwrap_err();
        assert!(matches!(err.kind, ParseErrorKind::InvalidPort { .. }));
        assert_eq!(err.input, "http://example.com:8o/");
    }

    #[test]
    fn from_uri_string_port_out_of_range() {
        let err = UriComponentsBuilder::from_uri_string("http://h:99999").unwrap_err();
        assert!(matches!(err.kind, ParseErrorKind::InvalidPort { .. }));
        assert!(UriComponentsBuilder::from_uri_string("http://h:{port}").is_ok());
    }

    #[test]
    fn from_http_url_requires_host() {
        let err = UriComponentsBuilder::from_http_url("http:///path").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::MissingHost);
        let err = UriComponentsBuilder::from_http_url("http:example.com").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::MissingHost);
    }

    #[test]
    fn from_http_url_requires_scheme() {
        let err = UriComponentsBuilder::from_http_url("/path").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidScheme { found: None });
    }

    #[test]
    fn from_http_url_lowercases_scheme() {
        let components = UriComponentsBuilder::from_http_url("HTTPS://example.com")
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(components.scheme(), Some("https"));
    }

    #[test]
    fn from_uri_value() {
        let uri = Uri::parse("https://example.com:8443/a%20b?x=1#top").unwrap();
        let components = UriComponentsBuilder::from_uri(&uri).build_encoded().unwrap();
        assert_eq!(components.to_uri_string(), uri.as_str());
    }

    #[test]
    fn uri_overwrites_path_and_query() {
        let uri = Uri::parse("http://example.com/new?b=2").unwrap();
        let components = UriComponentsBuilder::from_path("/old")
            .query("a=1")
            .uri(&uri)
            .build()
            .unwrap();
        assert_eq!(components.path().as_deref(), Some("/new"));
        assert_eq!(components.query().as_deref(), Some("b=2"));
    }

    #[test]
    fn ssp_and_hierarchical_setters_reset_each_other() {
        let mut builder = UriComponentsBuilder::from_uri_string("http://example.com/a").unwrap();
        builder.scheme_specific_part("opaque");
        let components = builder.build().unwrap();
        assert!(components.is_opaque());
        assert_eq!(components.to_uri_string(), "http:opaque");

        builder.host("example.org");
        let components = builder.build().unwrap();
        assert!(!components.is_opaque());
        assert_eq!(components.to_uri_string(), "http://example.org");
    }

    #[test]
    fn empty_scheme_and_fragment_clear() {
        let components = UriComponentsBuilder::from_uri_string("http://example.com#f")
            .unwrap()
            .scheme("")
            .fragment("")
            .build()
            .unwrap();
        assert_eq!(components.to_uri_string(), "//example.com");
    }

    #[test]
    fn port_number_and_template() {
        let mut builder = UriComponentsBuilder::from_uri_string("http://example.com").unwrap();
        assert_eq!(builder.port(8080).build().unwrap().port(), Some(8080));
        assert_eq!(
            builder.port("{port}").build().unwrap().port_str(),
            Some("{port}")
        );
        assert_eq!(builder.port("").build().unwrap().port_str(), None);
    }

    #[test]
    fn replace_path_and_query() {
        let components = UriComponentsBuilder::from_uri_string("/a/b?x=1")
            .unwrap()
            .replace_path("/c")
            .replace_query("y=2")
            .build()
            .unwrap();
        assert_eq!(components.to_uri_string(), "/c?y=2");
    }

    #[test]
    fn replace_query_param_with_no_values_removes() {
        let components = UriComponentsBuilder::from_uri_string("/p?a=1&b=2")
            .unwrap()
            .replace_query_param("a", [""; 0])
            .replace_query_param("b", ["3", "4"])
            .build()
            .unwrap();
        assert_eq!(components.query().as_deref(), Some("b=3&b=4"));
    }

    #[test]
    fn query_params_merge_in_order() {
        let extra = QueryParams::parse("b=2&a=3");
        let components = UriComponentsBuilder::from_uri_string("/p?a=1")
            .unwrap()
            .query_params(&extra)
            .build()
            .unwrap();
        assert_eq!(components.query().as_deref(), Some("a=1&a=3&b=2"));

        let components = UriComponentsBuilder::from_uri_string("/p?a=1")
            .unwrap()
            .replace_query_params(&extra)
            .build()
            .unwrap();
        assert_eq!(components.query().as_deref(), Some("b=2&a=3"));
    }

    #[test]
    fn query_empty_value_vs_no_value() {
        let components = UriComponentsBuilder::new()
            .query("a=&b")
            .build()
            .unwrap();
        assert_eq!(components.query_params().get("a"), Some(&[Some(String::new())][..]));
        assert_eq!(components.query_params().get("b"), Some(&[None][..]));
        assert_eq!(components.query().as_deref(), Some("a=&b"));
    }

    #[test]
    fn build_is_repeatable() {
        let mut builder = UriComponentsBuilder::from_path("/a");
        let first = builder.build().unwrap();
        builder.path("/b");
        let second = builder.build().unwrap();
        assert_eq!(first.path().as_deref(), Some("/a"));
        assert_eq!(second.path().as_deref(), Some("/a/b"));
    }

    #[test]
    fn clone_is_independent() {
        let original = UriComponentsBuilder::from_path("/a");
        let mut copy = original.clone();
        copy.path("/b");
        assert_eq!(original.build().unwrap().path().as_deref(), Some("/a"));
        assert_eq!(copy.build().unwrap().path().as_deref(), Some("/a/b"));
    }

    #[test]
    fn build_encoded_rejects_brace() {
        let err = UriComponentsBuilder::from_path("/{foo}").build_encoded().unwrap_err();
        assert!(matches!(
            err,
            BuilderError::Encoding(EncodingError::InvalidChar { char: '{', .. })
        ));
    }

    #[test]
    fn build_encoded_with_pending_variables_fails() {
        let err = UriComponentsBuilder::from_path("/a")
            .uri_variables([("a", "b")])
            .build_encoded()
            .unwrap_err();
        assert_eq!(err, BuilderError::Expand(ExpandError::AlreadyEncoded));
    }

    #[test]
    fn build_encoded_skips_opaque_validation() {
        let components = UriComponentsBuilder::from_uri_string("mailto:a b@example.com")
            .unwrap()
            .build_encoded()
            .unwrap();
        assert!(components.is_opaque());
    }

    #[test]
    fn uri_variables_expand_port() {
        let components = UriComponentsBuilder::from_uri_string("http://example.com:{port}/{p}")
            .unwrap()
            .uri_variables([("port", 9090)])
            .build()
            .unwrap();
        assert_eq!(components.port(), Some(9090));
        assert_eq!(components.path().as_deref(), Some("/{p}"));
    }

    #[test]
    fn uri_variables_invalid_port() {
        let err = UriComponentsBuilder::from_uri_string("http://example.com:{port}")
            .unwrap()
            .uri_variables([("port", "http")])
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            BuilderError::Expand(ExpandError::InvalidPort { .. })
        ));
    }

    #[test]
    fn build_and_expand_missing_value() {
        let err = UriComponentsBuilder::from_path("/{a}/{b}")
            .build_and_expand(&["x"])
            .unwrap_err();
        assert_eq!(
            err,
            BuilderError::Expand(ExpandError::MissingVariable {
                name: "b".to_string()
            })
        );
    }

    #[test]
    fn build_and_expand_with_map() {
        let vars = HashMap::from([("id", 7)]);
        let components = UriComponentsBuilder::from_path("/items/{id}")
            .build_and_expand_with(&vars)
            .unwrap();
        assert_eq!(components.path().as_deref(), Some("/items/7"));
    }

    #[test]
    fn uri_components_seeds_builder() {
        let source = UriComponentsBuilder::from_uri_string("http://example.com/a?x=1#f")
            .unwrap()
            .build()
            .unwrap();
        let copy = UriComponentsBuilder::new()
            .uri_components(&source)
            .build()
            .unwrap();
        assert_eq!(copy, source);
    }
}
