//! Error types for URI parsing, encoding and template expansion.

use std::fmt;

use crate::component::ComponentType;

/// Errors raised while validating or decoding percent-encoded text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    /// A character outside the component's allowed set that is not part of an escape.
    InvalidChar {
        /// The component being validated
        component: ComponentType,
        /// The offending character
        char: char,
        /// Byte offset in the component
        position: usize,
    },
    /// A `%` that is not followed by two hexadecimal digits.
    MalformedEscape {
        /// The input from the `%` onwards
        value: String,
        /// Byte offset of the `%`
        position: usize,
    },
}

impl fmt::Display for EncodingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidChar {
                component,
                char,
                position,
            } => write!(
                f,
                "invalid character '{char}' for {component} at position {position}"
            ),
            Self::MalformedEscape { value, position } => write!(
                f,
                "invalid encoded sequence \"{value}\" at position {position}; '%' must be followed by two hex digits"
            ),
        }
    }
}

impl std::error::Error for EncodingError {}

/// Errors raised while expanding URI template placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpandError {
    /// The components were already percent-encoded.
    AlreadyEncoded,
    /// The variable source had no value for a placeholder.
    MissingVariable {
        /// Name of the placeholder, without any regex constraint
        name: String,
    },
    /// The port did not expand to a decimal number in `0..=65535`.
    InvalidPort {
        /// The expanded port text
        value: String,
    },
}

impl fmt::Display for ExpandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyEncoded => {
                write!(f, "cannot expand an already encoded URI components object")
            }
            Self::MissingVariable { name } => {
                write!(f, "no value available to expand '{name}'")
            }
            Self::InvalidPort { value } => {
                write!(f, "port '{value}' is not a number between 0 and 65535")
            }
        }
    }
}

impl std::error::Error for ExpandError {}

/// Errors that can occur when parsing a URI string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// The input that failed to parse
    pub input: String,
    /// The specific error that occurred
    pub kind: ParseErrorKind,
}

/// Specific parsing error types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Character that may not appear in a URI
    InvalidChar {
        /// The invalid character
        char: char,
        /// Byte offset in the input
        position: usize,
    },
    /// A `%` not followed by two hex digits
    InvalidEscape {
        /// Byte offset of the `%`
        position: usize,
    },
    /// Port is neither numeric nor a template placeholder
    InvalidPort {
        /// The invalid value
        value: String,
        /// Reason for invalidity
        reason: &'static str,
    },
    /// Malformed bracketed IP literal host
    InvalidIpLiteral {
        /// The invalid value
        value: String,
        /// Reason for invalidity
        reason: &'static str,
    },
    /// Scheme is missing or not one of the accepted schemes
    InvalidScheme {
        /// The scheme that was found, if any
        found: Option<String>,
    },
    /// An HTTP URL without a host
    MissingHost,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse URI '{}': ", self.input)?;
        match &self.kind {
            ParseErrorKind::InvalidChar { char, position } => {
                write!(f, "invalid character '{char}' at position {position}")
            }
            ParseErrorKind::InvalidEscape { position } => {
                write!(f, "invalid encoded sequence at position {position}")
            }
            ParseErrorKind::InvalidPort { value, reason } => {
                write!(f, "invalid port '{value}': {reason}")
            }
            ParseErrorKind::InvalidIpLiteral { value, reason } => {
                write!(f, "invalid IP literal '{value}': {reason}")
            }
            ParseErrorKind::InvalidScheme { found } => match found {
                Some(s) => write!(f, "expected scheme 'http' or 'https', found '{s}'"),
                None => write!(f, "missing scheme; expected 'http' or 'https'"),
            },
            ParseErrorKind::MissingHost => write!(f, "HTTP URL must have a host"),
        }
    }
}

impl std::error::Error for ParseError {}

/// Errors returned by [`UriComponentsBuilder`] build methods.
///
/// [`UriComponentsBuilder`]: crate::UriComponentsBuilder
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuilderError {
    /// A component failed encoded-form validation
    Encoding(EncodingError),
    /// Expanding pending or supplied variables failed
    Expand(ExpandError),
}

impl fmt::Display for BuilderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Encoding(e) => write!(f, "invalid encoded URI components: {e}"),
            Self::Expand(e) => write!(f, "failed to expand URI components: {e}"),
        }
    }
}

impl std::error::Error for BuilderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Encoding(e) => Some(e),
            Self::Expand(e) => Some(e),
        }
    }
}

impl From<EncodingError> for BuilderError {
    fn from(e: EncodingError) -> Self {
        Self::Encoding(e)
    }
}

impl From<ExpandError> for BuilderError {
    fn from(e: ExpandError) -> Self {
        Self::Expand(e)
    }
}
