//! Builder, template expander and percent-codec for URI components.
//!
//! This crate models a URI as a set of typed components (scheme, user
//! info, host, port, path, query, fragment) that can be assembled,
//! expanded from `{name}` templates, percent-encoded per component and
//! normalized.
//!
//! # Overview
//!
//! A [`UriComponentsBuilder`] accumulates raw component strings, parsed
//! from a URI string or set one by one. Building produces an immutable
//! [`UriComponents`], either hierarchical:
//!
//! ```text
//! [scheme:][//[userinfo@]host[:port]][path][?query][#fragment]
//! ```
//!
//! or opaque (`scheme:scheme-specific-part`). Every transformation returns
//! a new value.
//!
//! # Quick Start
//!
//! ```rust
//! use uri_components::UriComponentsBuilder;
//!
//! let components = UriComponentsBuilder::from_uri_string("http://example.com/hotels/{hotel}")
//!     .unwrap()
//!     .query_param("date", ["{date}"])
//!     .build()
//!     .unwrap();
//!
//! // Expand placeholders in encounter order
//! let expanded = components.expand(&["Grand Budapest", "2026-10-19"]).unwrap();
//! assert_eq!(expanded.path().as_deref(), Some("/hotels/Grand Budapest"));
//!
//! // Encode each component with its own rules
//! let uri = expanded.encode().to_uri().unwrap();
//! assert_eq!(
//!     uri.as_str(),
//!     "http://example.com/hotels/Grand%20Budapest?date=2026-10-19"
//! );
//! ```
//!
//! # Encoded State
//!
//! Components built with [`UriComponentsBuilder::build`] hold raw text.
//! [`UriComponents::encode`] escapes it and marks the result encoded;
//! [`UriComponentsBuilder::build_encoded`] instead validates text that is
//! already encoded. Encoded components cannot be expanded, since their
//! braces have been escaped.
//!
//! # Features
//!
//! | Feature | Effect |
//! |---------|--------|
//! | `serde` | `Serialize`/`Deserialize` for components, `Uri` as a string |
//! | `url` | [`UriComponents::to_url`] |

#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod builder;
mod component;
mod components;
mod constants;
mod encoding;
mod error;
mod hierarchical;
mod normalize;
mod opaque;
mod parser;
mod path;
pub mod prelude;
mod query;
mod template;
mod uri;

pub use builder::UriComponentsBuilder;
pub use component::ComponentType;
pub use components::UriComponents;
pub use constants::{HTTP_SCHEMES, PATH_DELIMITER, QUERY_PARAM_DELIMITER, QUERY_VALUE_DELIMITER};
pub use encoding::{decode, encode, verify};
pub use error::{BuilderError, EncodingError, ExpandError, ParseError, ParseErrorKind};
pub use hierarchical::HierarchicalUriComponents;
pub use normalize::remove_dot_segments;
pub use opaque::OpaqueUriComponents;
pub use path::PathComponent;
pub use query::QueryParams;
pub use template::{Positional, UriTemplateVariables, variable_names};
pub use uri::Uri;
