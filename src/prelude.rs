//! Convenient re-exports for glob imports.
//!
//! ```rust
//! use uri_components::prelude::*;
//!
//! let components: UriComponents = "http://example.com/a b".parse().unwrap();
//! assert_eq!(components.encode().to_string(), "http://example.com/a%20b");
//! ```

pub use crate::{
    // Core types
    ComponentType, HierarchicalUriComponents, OpaqueUriComponents, PathComponent, QueryParams,
    Uri, UriComponents,
    // Builder
    UriComponentsBuilder,
    // Templates
    Positional, UriTemplateVariables,
    // Errors
    BuilderError, EncodingError, ExpandError, ParseError, ParseErrorKind,
};
