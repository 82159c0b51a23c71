//! URI components with an authority and/or path structure.

use std::hash::{Hash, Hasher};

use crate::builder::UriComponentsBuilder;
use crate::component::ComponentType;
use crate::constants::PATH_DELIMITER;
use crate::encoding::{encode, quote, verify};
use crate::error::{EncodingError, ExpandError, ParseError};
use crate::normalize::remove_dot_segments;
use crate::path::PathComponent;
use crate::query::QueryParams;
use crate::template::{Missing, UriTemplateVariables, expand_component, expand_optional};
use crate::uri::Uri;

/// Hierarchical URI components: `scheme://userinfo@host:port/path?query#fragment`.
///
/// Immutable; [`encode`](Self::encode), [`normalize`](Self::normalize) and
/// expansion return new instances. Equality and hashing cover every
/// component but not the encoded flag.
///
/// Path equality follows how the path was built: a full path `/a/b` and
/// the segments `a`, `b` render the same string but are not equal. Compare
/// [`to_uri_string`](Self::to_uri_string) output to compare rendered URIs.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HierarchicalUriComponents {
    scheme: Option<String>,
    user_info: Option<String>,
    host: Option<String>,
    port: Option<String>,
    path: PathComponent,
    query_params: QueryParams,
    fragment: Option<String>,
    encoded: bool,
}

impl HierarchicalUriComponents {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        scheme: Option<String>,
        user_info: Option<String>,
        host: Option<String>,
        port: Option<String>,
        path: PathComponent,
        query_params: QueryParams,
        fragment: Option<String>,
        encoded: bool,
    ) -> Self {
        Self {
            scheme,
            user_info,
            host,
            port,
            path,
            query_params,
            fragment,
            encoded,
        }
    }

    /// Returns the scheme, if present.
    #[must_use]
    pub fn scheme(&self) -> Option<&str> {
        self.scheme.as_deref()
    }

    /// Returns the user info, if present.
    #[must_use]
    pub fn user_info(&self) -> Option<&str> {
        self.user_info.as_deref()
    }

    /// Returns the host, if present. May be empty (`file:///`).
    #[must_use]
    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    /// Returns the port, if present and numeric.
    #[must_use]
    pub fn port(&self) -> Option<u16> {
        self.port.as_deref().and_then(|p| p.parse().ok())
    }

    /// Returns the port text, which may still be a template.
    #[must_use]
    pub fn port_str(&self) -> Option<&str> {
        self.port.as_deref()
    }

    /// Returns the path, or `None` if there is none.
    #[must_use]
    pub fn path(&self) -> Option<String> {
        (!self.path.is_empty()).then(|| self.path.path())
    }

    /// Returns the structured path.
    #[must_use]
    pub const fn path_component(&self) -> &PathComponent {
        &self.path
    }

    /// Returns the path segments.
    #[must_use]
    pub fn path_segments(&self) -> Vec<&str> {
        self.path.path_segments()
    }

    /// Returns the query string, or `None` if there are no parameters.
    #[must_use]
    pub fn query(&self) -> Option<String> {
        self.query_params.to_query_string()
    }

    /// Returns the query parameters.
    #[must_use]
    pub const fn query_params(&self) -> &QueryParams {
        &self.query_params
    }

    /// Returns the fragment, if present.
    #[must_use]
    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    /// Returns true if the components are percent-encoded.
    #[must_use]
    pub const fn is_encoded(&self) -> bool {
        self.encoded
    }

    /// Percent-encodes every component with its own allowed set.
    ///
    /// Returns a copy if already encoded. The port is left untouched.
    #[must_use]
    pub fn encode(&self) -> Self {
        if self.encoded {
            return self.clone();
        }
        let encode_opt = |s: &Option<String>, ty| s.as_deref().map(|s| encode(s, ty).into_owned());
        Self {
            scheme: encode_opt(&self.scheme, ComponentType::Scheme),
            user_info: encode_opt(&self.user_info, ComponentType::UserInfo),
            host: self
                .host
                .as_deref()
                .map(|h| encode(h, ComponentType::for_host(h)).into_owned()),
            port: self.port.clone(),
            path: self.path.encode(),
            query_params: self.query_params.encode(),
            fragment: encode_opt(&self.fragment, ComponentType::Fragment),
            encoded: true,
        }
    }

    /// Checks every component is in encoded form.
    pub(crate) fn verify(&self) -> Result<(), EncodingError> {
        let check = |s: &Option<String>, ty| s.as_deref().map_or(Ok(()), |s| verify(s, ty));
        check(&self.scheme, ComponentType::Scheme)?;
        check(&self.user_info, ComponentType::UserInfo)?;
        if let Some(host) = &self.host {
            verify(host, ComponentType::for_host(host))?;
        }
        check(&self.port, ComponentType::Port)?;
        self.path.verify()?;
        self.query_params.verify()?;
        check(&self.fragment, ComponentType::Fragment)
    }

    /// Expands placeholders in scheme, user info, host, port, path, query
    /// and fragment, in that order.
    pub(crate) fn expand(
        &self,
        variables: &mut dyn UriTemplateVariables,
        missing: Missing,
    ) -> Result<Self, ExpandError> {
        if self.encoded {
            return Err(ExpandError::AlreadyEncoded);
        }
        let scheme = expand_optional(self.scheme.as_deref(), variables, missing)?;
        let user_info = expand_optional(self.user_info.as_deref(), variables, missing)?;
        let host = expand_optional(self.host.as_deref(), variables, missing)?;
        let port = match self.port.as_deref() {
            Some(port) => Some(Self::expand_port(port, variables, missing)?),
            None => None,
        };
        Ok(Self {
            scheme,
            user_info,
            host,
            port,
            path: self.path.expand(variables, missing)?,
            query_params: self.query_params.expand(variables, missing)?,
            fragment: expand_optional(self.fragment.as_deref(), variables, missing)?,
            encoded: false,
        })
    }

    fn expand_port(
        port: &str,
        variables: &mut dyn UriTemplateVariables,
        missing: Missing,
    ) -> Result<String, ExpandError> {
        let expanded = expand_component(port, variables, missing)?;
        let unresolved = missing == Missing::Skip && expanded.contains('{');
        if !unresolved && expanded.parse::<u16>().is_err() {
            return Err(ExpandError::InvalidPort {
                value: expanded.into_owned(),
            });
        }
        Ok(expanded.into_owned())
    }

    /// Removes `.` and `..` segments from the path.
    ///
    /// A path without dot segments keeps its structure; otherwise the
    /// normalized path becomes a single full path.
    #[must_use]
    pub fn normalize(&self) -> Self {
        let path = self.path.path();
        let normalized = remove_dot_segments(&path);
        if normalized == path.as_str() {
            return self.clone();
        }
        let path = if normalized.is_empty() {
            PathComponent::Empty
        } else {
            PathComponent::Full(normalized.into_owned())
        };
        Self {
            path,
            ..self.clone()
        }
    }

    /// Renders the URI string.
    #[must_use]
    pub fn to_uri_string(&self) -> String {
        let mut uri = String::new();
        if let Some(scheme) = &self.scheme {
            uri.push_str(scheme);
            uri.push(':');
        }
        if self.user_info.is_some() || self.host.is_some() {
            uri.push_str("//");
            if let Some(user_info) = &self.user_info {
                uri.push_str(user_info);
                uri.push('@');
            }
            if let Some(host) = &self.host {
                uri.push_str(host);
            }
            if let Some(port) = &self.port {
                uri.push(':');
                uri.push_str(port);
            }
        }
        let path = self.path.path();
        if !path.is_empty() {
            if !uri.is_empty() && !path.starts_with(PATH_DELIMITER) {
                uri.push(PATH_DELIMITER);
            }
            uri.push_str(&path);
        }
        if let Some(query) = self.query() {
            uri.push('?');
            uri.push_str(&query);
        }
        if let Some(fragment) = &self.fragment {
            uri.push('#');
            uri.push_str(fragment);
        }
        uri
    }

    /// Converts to a [`Uri`] value.
    ///
    /// Encoded components are parsed as they are. Components that were
    /// never encoded have characters illegal in a URI escaped first, while
    /// existing escapes such as an encoded `/` in a segment are preserved.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if the result is not a valid URI, for example
    /// because a placeholder is still unexpanded in the host or port.
    pub fn to_uri(&self) -> Result<Uri, ParseError> {
        if self.encoded {
            return Uri::parse(&self.to_uri_string());
        }
        let quote_opt =
            |s: &Option<String>, ty| s.as_deref().map(|s| quote(s, ty).into_owned());
        let mut path = self.path.path();
        let has_prefix = self.scheme.is_some()
            || self.user_info.is_some()
            || self.host.is_some()
            || self.port.is_some();
        if has_prefix && !path.is_empty() && !path.starts_with(PATH_DELIMITER) {
            path.insert(0, PATH_DELIMITER);
        }
        let quoted = Self {
            scheme: self.scheme.clone(),
            user_info: quote_opt(&self.user_info, ComponentType::UserInfo),
            host: self.host.clone(),
            port: self.port.clone(),
            path: PathComponent::Full(quote(&path, ComponentType::Path).into_owned()),
            query_params: QueryParams::new(),
            fragment: quote_opt(&self.fragment, ComponentType::Fragment),
            encoded: true,
        };
        let mut uri = quoted.to_uri_string();
        if let Some(query) = self.query() {
            let (head, fragment) = match uri.find('#') {
                Some(idx) => uri.split_at(idx),
                None => (uri.as_str(), ""),
            };
            uri = format!("{head}?{}{fragment}", quote(&query, ComponentType::Query));
        }
        Uri::parse(&uri)
    }

    /// Copies every component into `builder`, keeping path segments and
    /// query parameter order intact.
    pub fn copy_to_uri_components_builder(&self, builder: &mut UriComponentsBuilder) {
        if let Some(scheme) = &self.scheme {
            builder.scheme(scheme);
        }
        if let Some(user_info) = &self.user_info {
            builder.user_info(user_info);
        }
        if let Some(host) = &self.host {
            builder.host(host);
        }
        if let Some(port) = &self.port {
            builder.port(port);
        }
        self.path.copy_to_uri_components_builder(builder);
        builder.query_params(&self.query_params);
        if let Some(fragment) = &self.fragment {
            builder.fragment(fragment);
        }
    }
}

impl PartialEq for HierarchicalUriComponents {
    fn eq(&self, other: &Self) -> bool {
        self.scheme == other.scheme
            && self.user_info == other.user_info
            && self.host == other.host
            && self.port == other.port
            && self.path == other.path
            && self.query_params == other.query_params
            && self.fragment == other.fragment
    }
}

impl Eq for HierarchicalUriComponents {}

impl Hash for HierarchicalUriComponents {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.scheme.hash(state);
        self.user_info.hash(state);
        self.host.hash(state);
        self.port.hash(state);
        self.path.hash(state);
        self.query_params.hash(state);
        self.fragment.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::Positional;

    fn components(path: &str) -> HierarchicalUriComponents {
        HierarchicalUriComponents::new(
            Some("http".to_string()),
            None,
            Some("example.com".to_string()),
            None,
            PathComponent::Full(path.to_string()),
            QueryParams::new(),
            None,
            false,
        )
    }

    #[test]
    fn encode_marks_encoded() {
        let encoded = components("/hotel list").encode();
        assert!(encoded.is_encoded());
        assert_eq!(encoded.path().as_deref(), Some("/hotel%20list"));
    }

    #[test]
    fn encode_twice_is_noop() {
        let once = components("/hotel list").encode();
        assert_eq!(once.encode().to_uri_string(), once.to_uri_string());
    }

    #[test]
    fn equality_ignores_encoded_flag() {
        let plain = components("/a");
        let encoded = plain.encode();
        assert_eq!(plain, encoded);
    }

    #[test]
    fn equality_depends_on_path_shape() {
        let full = components("/a/b");
        let mut segments = components("/");
        segments.path = PathComponent::Segments(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(full.to_uri_string(), segments.to_uri_string());
        assert_ne!(full, segments);
    }

    #[test]
    fn expand_encoded_fails() {
        let encoded = components("/{foo}").encode();
        let mut vars = Positional::new(["bar"]);
        assert_eq!(
            encoded.expand(&mut vars, Missing::Fail),
            Err(ExpandError::AlreadyEncoded)
        );
    }

    #[test]
    fn expand_port_non_numeric_fails() {
        let mut uri = components("/");
        uri.port = Some("{port}".to_string());
        let mut vars = Positional::new(["http"]);
        assert_eq!(
            uri.expand(&mut vars, Missing::Fail),
            Err(ExpandError::InvalidPort {
                value: "http".to_string()
            })
        );
    }

    #[test]
    fn expand_port_left_when_skipping() {
        let mut uri = components("/");
        uri.port = Some("{port}".to_string());
        let mut vars = Positional::new(std::iter::empty::<u16>());
        let expanded = uri.expand(&mut vars, Missing::Skip).unwrap();
        assert_eq!(expanded.port_str(), Some("{port}"));
    }

    #[test]
    fn normalize_keeps_authority() {
        let normalized = components("/foo/../bar").normalize();
        assert_eq!(normalized.to_uri_string(), "http://example.com/bar");
    }

    #[test]
    fn normalize_without_dots_keeps_structure() {
        let mut uri = components("/a");
        uri.path = PathComponent::Segments(vec!["b/c".to_string()]);
        assert_eq!(uri.normalize().path_component(), uri.path_component());
    }

    #[test]
    fn to_uri_string_inserts_slash_for_relative_path() {
        let uri = components("bar");
        assert_eq!(uri.to_uri_string(), "http://example.com/bar");
    }

    #[test]
    fn to_uri_string_path_only() {
        let uri = HierarchicalUriComponents::new(
            None,
            None,
            None,
            None,
            PathComponent::Full("bar".to_string()),
            QueryParams::parse("a=1"),
            Some("f".to_string()),
            false,
        );
        assert_eq!(uri.to_uri_string(), "bar?a=1#f");
    }

    #[test]
    fn to_uri_quotes_query_and_fragment() {
        let mut uri = components("/p");
        uri.query_params = QueryParams::parse("q=a b");
        uri.fragment = Some("sec tion".to_string());
        assert_eq!(
            uri.to_uri().unwrap().as_str(),
            "http://example.com/p?q=a%20b#sec%20tion"
        );
    }

    #[test]
    fn to_uri_with_template_host_fails() {
        let mut uri = components("/p");
        uri.host = Some("{host}".to_string());
        assert!(uri.to_uri().is_err());
    }
}
