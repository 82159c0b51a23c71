//! Separators and scheme names shared across the crate.

/// Separator between path segments.
pub const PATH_DELIMITER: char = '/';

/// Separator between query parameters.
pub const QUERY_PARAM_DELIMITER: char = '&';

/// Separator between a query parameter name and its value.
pub const QUERY_VALUE_DELIMITER: char = '=';

/// Schemes accepted by [`UriComponentsBuilder::from_http_url`].
///
/// [`UriComponentsBuilder::from_http_url`]: crate::UriComponentsBuilder::from_http_url
pub const HTTP_SCHEMES: [&str; 2] = ["http", "https"];
