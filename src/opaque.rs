//! URI components for opaque URIs (`scheme:scheme-specific-part`).

use crate::builder::UriComponentsBuilder;
use crate::component::ComponentType;
use crate::encoding::quote;
use crate::error::{ExpandError, ParseError};
use crate::template::{Missing, UriTemplateVariables, expand_component, expand_optional};
use crate::uri::Uri;

/// Opaque URI components such as `mailto:user@example.com`.
///
/// The scheme-specific part is a single string with no path or query
/// structure. Encoding and normalization leave it untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OpaqueUriComponents {
    scheme: Option<String>,
    scheme_specific_part: String,
    fragment: Option<String>,
}

impl OpaqueUriComponents {
    pub(crate) fn new(
        scheme: Option<String>,
        scheme_specific_part: String,
        fragment: Option<String>,
    ) -> Self {
        Self {
            scheme,
            scheme_specific_part,
            fragment,
        }
    }

    /// Returns the scheme, if present.
    #[must_use]
    pub fn scheme(&self) -> Option<&str> {
        self.scheme.as_deref()
    }

    /// Returns the scheme-specific part.
    #[must_use]
    pub fn scheme_specific_part(&self) -> &str {
        &self.scheme_specific_part
    }

    /// Returns the fragment, if present.
    #[must_use]
    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    pub(crate) fn expand(
        &self,
        variables: &mut dyn UriTemplateVariables,
        missing: Missing,
    ) -> Result<Self, ExpandError> {
        Ok(Self {
            scheme: expand_optional(self.scheme.as_deref(), variables, missing)?,
            scheme_specific_part: expand_component(&self.scheme_specific_part, variables, missing)?
                .into_owned(),
            fragment: expand_optional(self.fragment.as_deref(), variables, missing)?,
        })
    }

    /// Renders `scheme:ssp#fragment`.
    #[must_use]
    pub fn to_uri_string(&self) -> String {
        let mut uri = String::new();
        if let Some(scheme) = &self.scheme {
            uri.push_str(scheme);
            uri.push(':');
        }
        uri.push_str(&self.scheme_specific_part);
        if let Some(fragment) = &self.fragment {
            uri.push('#');
            uri.push_str(fragment);
        }
        uri
    }

    /// Converts to a [`Uri`], escaping characters illegal in a URI.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if the result is not a valid URI.
    pub fn to_uri(&self) -> Result<Uri, ParseError> {
        let quoted = Self {
            scheme: self.scheme.clone(),
            scheme_specific_part: quote(&self.scheme_specific_part, ComponentType::Uri)
                .into_owned(),
            fragment: self
                .fragment
                .as_deref()
                .map(|f| quote(f, ComponentType::Fragment).into_owned()),
        };
        Uri::parse(&quoted.to_uri_string())
    }

    /// Copies scheme, scheme-specific part and fragment into `builder`.
    pub fn copy_to_uri_components_builder(&self, builder: &mut UriComponentsBuilder) {
        if let Some(scheme) = &self.scheme {
            builder.scheme(scheme);
        }
        builder.scheme_specific_part(&self.scheme_specific_part);
        if let Some(fragment) = &self.fragment {
            builder.fragment(fragment);
        }
    }
}
