//! The immutable URI components value.

use std::fmt;
use std::fmt::Display;
use std::str::FromStr;

use crate::builder::UriComponentsBuilder;
use crate::error::{ExpandError, ParseError};
use crate::hierarchical::HierarchicalUriComponents;
use crate::opaque::OpaqueUriComponents;
use crate::query::QueryParams;
use crate::template::{Missing, Positional, UriTemplateVariables};
use crate::uri::Uri;

static EMPTY_QUERY_PARAMS: QueryParams = QueryParams::new();

/// An immutable, structured representation of a URI.
///
/// Produced by [`UriComponentsBuilder`]. Every transformation
/// ([`encode`](Self::encode), [`expand`](Self::expand),
/// [`normalize`](Self::normalize)) returns a new value.
///
/// # Examples
///
/// ```
/// use uri_components::UriComponentsBuilder;
///
/// let components = UriComponentsBuilder::from_uri_string("http://example.com/hotels/{hotel}")
///     .unwrap()
///     .query_param("q", ["{q}"])
///     .build()
///     .unwrap();
///
/// let expanded = components.expand(&["Z\u{fc}rich", "with space"]).unwrap();
/// assert_eq!(expanded.to_uri_string(), "http://example.com/hotels/Z\u{fc}rich?q=with space");
///
/// let encoded = expanded.encode();
/// assert_eq!(encoded.to_uri_string(), "http://example.com/hotels/Z%C3%BCrich?q=with%20space");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UriComponents {
    /// Authority and/or path structure.
    Hierarchical(HierarchicalUriComponents),
    /// `scheme:scheme-specific-part`.
    Opaque(OpaqueUriComponents),
}

impl UriComponents {
    /// Returns the scheme, if present.
    #[must_use]
    pub fn scheme(&self) -> Option<&str> {
        match self {
            Self::Hierarchical(h) => h.scheme(),
            Self::Opaque(o) => o.scheme(),
        }
    }

    /// Returns the scheme-specific part of an opaque URI.
    #[must_use]
    pub fn scheme_specific_part(&self) -> Option<&str> {
        match self {
            Self::Hierarchical(_) => None,
            Self::Opaque(o) => Some(o.scheme_specific_part()),
        }
    }

    /// Returns the user info, if present.
    #[must_use]
    pub fn user_info(&self) -> Option<&str> {
        self.as_hierarchical().and_then(HierarchicalUriComponents::user_info)
    }

    /// Returns the host, if present.
    #[must_use]
    pub fn host(&self) -> Option<&str> {
        self.as_hierarchical().and_then(HierarchicalUriComponents::host)
    }

    /// Returns the port, if present and numeric.
    #[must_use]
    pub fn port(&self) -> Option<u16> {
        self.as_hierarchical().and_then(HierarchicalUriComponents::port)
    }

    /// Returns the port text, which may still be a template.
    #[must_use]
    pub fn port_str(&self) -> Option<&str> {
        self.as_hierarchical().and_then(HierarchicalUriComponents::port_str)
    }

    /// Returns the path, or `None` for opaque URIs and empty paths.
    #[must_use]
    pub fn path(&self) -> Option<String> {
        self.as_hierarchical().and_then(HierarchicalUriComponents::path)
    }

    /// Returns the path segments; empty for opaque URIs.
    #[must_use]
    pub fn path_segments(&self) -> Vec<&str> {
        self.as_hierarchical()
            .map(HierarchicalUriComponents::path_segments)
            .unwrap_or_default()
    }

    /// Returns the query string, or `None` if there are no parameters.
    #[must_use]
    pub fn query(&self) -> Option<String> {
        self.as_hierarchical().and_then(HierarchicalUriComponents::query)
    }

    /// Returns the query parameters; empty for opaque URIs.
    #[must_use]
    pub fn query_params(&self) -> &QueryParams {
        self.as_hierarchical()
            .map_or(&EMPTY_QUERY_PARAMS, HierarchicalUriComponents::query_params)
    }

    /// Returns the fragment, if present.
    #[must_use]
    pub fn fragment(&self) -> Option<&str> {
        match self {
            Self::Hierarchical(h) => h.fragment(),
            Self::Opaque(o) => o.fragment(),
        }
    }

    /// Returns true if the components are percent-encoded.
    ///
    /// Opaque components are never marked encoded.
    #[must_use]
    pub const fn is_encoded(&self) -> bool {
        match self {
            Self::Hierarchical(h) => h.is_encoded(),
            Self::Opaque(_) => false,
        }
    }

    /// Returns true for the opaque variant.
    #[must_use]
    pub const fn is_opaque(&self) -> bool {
        matches!(self, Self::Opaque(_))
    }

    /// Returns the hierarchical variant, if this is one.
    #[must_use]
    pub const fn as_hierarchical(&self) -> Option<&HierarchicalUriComponents> {
        match self {
            Self::Hierarchical(h) => Some(h),
            Self::Opaque(_) => None,
        }
    }

    /// Returns the opaque variant, if this is one.
    #[must_use]
    pub const fn as_opaque(&self) -> Option<&OpaqueUriComponents> {
        match self {
            Self::Hierarchical(_) => None,
            Self::Opaque(o) => Some(o),
        }
    }

    /// Percent-encodes each component with its own allowed characters.
    ///
    /// Placeholders are encoded like any other text, so the result can no
    /// longer be expanded. Opaque components are returned unchanged.
    #[must_use]
    pub fn encode(&self) -> Self {
        match self {
            Self::Hierarchical(h) => Self::Hierarchical(h.encode()),
            Self::Opaque(o) => Self::Opaque(o.clone()),
        }
    }

    /// Expands placeholders with positional values, consumed in the order
    /// placeholders appear across the whole URI.
    ///
    /// # Errors
    ///
    /// Returns [`ExpandError::AlreadyEncoded`] if the components are
    /// encoded, [`ExpandError::MissingVariable`] if there are fewer values
    /// than placeholders, and [`ExpandError::InvalidPort`] if the port does
    /// not expand to a number.
    ///
    /// # Examples
    ///
    /// ```
    /// use uri_components::UriComponentsBuilder;
    ///
    /// let components = UriComponentsBuilder::from_uri_string("http://example.com/bar")
    ///     .unwrap()
    ///     .port("{port}")
    ///     .build()
    ///     .unwrap();
    /// let expanded = components.expand(&[8080]).unwrap();
    /// assert_eq!(expanded.port(), Some(8080));
    /// assert_eq!(expanded.to_string(), "http://example.com:8080/bar");
    /// ```
    pub fn expand<T: Display>(&self, values: &[T]) -> Result<Self, ExpandError> {
        self.expand_with(Positional::new(values.iter()))
    }

    /// Expands placeholders with values from `variables`.
    ///
    /// # Errors
    ///
    /// Same as [`expand`](Self::expand); a named source fails with
    /// [`ExpandError::MissingVariable`] for a name it does not contain.
    pub fn expand_with<V: UriTemplateVariables>(&self, mut variables: V) -> Result<Self, ExpandError> {
        let expanded = self.expand_internal(&mut variables, Missing::Fail);
        if let Err(e) = &expanded {
            tracing::debug!(uri = %self, error = %e, "failed to expand URI template");
        }
        expanded
    }

    pub(crate) fn expand_internal(
        &self,
        variables: &mut dyn UriTemplateVariables,
        missing: Missing,
    ) -> Result<Self, ExpandError> {
        Ok(match self {
            Self::Hierarchical(h) => Self::Hierarchical(h.expand(variables, missing)?),
            Self::Opaque(o) => Self::Opaque(o.expand(variables, missing)?),
        })
    }

    /// Removes `.` and `..` path segments. Opaque components are returned
    /// unchanged.
    #[must_use]
    pub fn normalize(&self) -> Self {
        match self {
            Self::Hierarchical(h) => Self::Hierarchical(h.normalize()),
            Self::Opaque(o) => Self::Opaque(o.clone()),
        }
    }

    /// Renders the URI string, omitting absent components and their
    /// separators.
    #[must_use]
    pub fn to_uri_string(&self) -> String {
        match self {
            Self::Hierarchical(h) => h.to_uri_string(),
            Self::Opaque(o) => o.to_uri_string(),
        }
    }

    /// Converts to a [`Uri`] value.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if the components do not form a valid URI.
    pub fn to_uri(&self) -> Result<Uri, ParseError> {
        match self {
            Self::Hierarchical(h) => h.to_uri(),
            Self::Opaque(o) => o.to_uri(),
        }
    }

    /// Converts the encoded form into a [`url::Url`].
    ///
    /// # Errors
    ///
    /// Returns [`url::ParseError`] if the encoded URI is not an absolute URL.
    #[cfg(feature = "url")]
    pub fn to_url(&self) -> Result<url::Url, url::ParseError> {
        url::Url::parse(&self.encode().to_uri_string())
    }

    /// Copies every component into `builder`.
    ///
    /// Path segments stay separate segments and query parameters keep their
    /// order and repeated names, so building again reproduces this value.
    pub fn copy_to_uri_components_builder(&self, builder: &mut UriComponentsBuilder) {
        match self {
            Self::Hierarchical(h) => h.copy_to_uri_components_builder(builder),
            Self::Opaque(o) => o.copy_to_uri_components_builder(builder),
        }
    }
}

impl From<HierarchicalUriComponents> for UriComponents {
    fn from(h: HierarchicalUriComponents) -> Self {
        Self::Hierarchical(h)
    }
}

impl From<OpaqueUriComponents> for UriComponents {
    fn from(o: OpaqueUriComponents) -> Self {
        Self::Opaque(o)
    }
}

impl fmt::Display for UriComponents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_uri_string())
    }
}

impl FromStr for UriComponents {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(UriComponentsBuilder::from_uri_string(s)?.assemble(false))
    }
}
