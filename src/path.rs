//! Path component of hierarchical URI components.
//!
//! A path is kept as it was built: a full path string (`/foo/bar`), a list
//! of individual segments, or a sequence of both. The distinction matters
//! for encoding: `/` separates segments in a full path but is escaped to
//! `%2F` inside a single segment.

use std::borrow::Cow;

use crate::builder::UriComponentsBuilder;
use crate::component::ComponentType;
use crate::constants::PATH_DELIMITER;
use crate::encoding::{encode, verify};
use crate::error::{EncodingError, ExpandError};
use crate::template::{Missing, UriTemplateVariables, expand_component};

/// The path of a [`HierarchicalUriComponents`](crate::HierarchicalUriComponents).
///
/// # Examples
///
/// ```
/// use uri_components::{PathComponent, UriComponentsBuilder};
///
/// let components = UriComponentsBuilder::from_path("/foo/bar")
///     .path_segment(["ba/z"])
///     .build()
///     .unwrap();
/// let path = components.as_hierarchical().unwrap().path_component();
///
/// assert!(matches!(path, PathComponent::Composite(_)));
/// assert_eq!(path.path(), "/foo/bar/ba/z");
/// assert_eq!(path.path_segments(), vec!["foo", "bar", "ba/z"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathComponent {
    /// No path.
    #[default]
    Empty,
    /// A full path, `/` separating segments.
    Full(String),
    /// Individual segments; rendered with a leading `/`.
    Segments(Vec<String>),
    /// Full paths and segment lists in the order they were added.
    Composite(Vec<PathComponent>),
}

impl PathComponent {
    /// Returns true if there is no path.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Renders the path; empty if there is none.
    #[must_use]
    pub fn path(&self) -> String {
        let mut out = String::new();
        self.write_path(&mut out);
        out
    }

    fn write_path(&self, out: &mut String) {
        match self {
            Self::Empty => {}
            Self::Full(path) => out.push_str(path),
            Self::Segments(segments) => {
                out.push(PATH_DELIMITER);
                for (i, segment) in segments.iter().enumerate() {
                    if i > 0 {
                        out.push(PATH_DELIMITER);
                    }
                    out.push_str(segment);
                }
            }
            Self::Composite(parts) => {
                for part in parts {
                    part.write_path(out);
                }
            }
        }
    }

    /// Returns the path segments.
    ///
    /// A full path is split on `/` with empty segments dropped; explicit
    /// segments are returned as they are, even if they contain `/`.
    #[must_use]
    pub fn path_segments(&self) -> Vec<&str> {
        match self {
            Self::Empty => Vec::new(),
            Self::Full(path) => path.split(PATH_DELIMITER).filter(|s| !s.is_empty()).collect(),
            Self::Segments(segments) => segments.iter().map(String::as_str).collect(),
            Self::Composite(parts) => parts.iter().flat_map(Self::path_segments).collect(),
        }
    }

    /// Percent-encodes the path, full paths as [`ComponentType::Path`] and
    /// segments as [`ComponentType::PathSegment`].
    #[must_use]
    pub fn encode(&self) -> Self {
        match self {
            Self::Empty => Self::Empty,
            Self::Full(path) => Self::Full(encode(path, ComponentType::Path).into_owned()),
            Self::Segments(segments) => Self::Segments(
                segments
                    .iter()
                    .map(|s| encode(s, ComponentType::PathSegment).into_owned())
                    .collect(),
            ),
            Self::Composite(parts) => Self::Composite(parts.iter().map(Self::encode).collect()),
        }
    }

    /// Checks that the path is already in encoded form.
    ///
    /// # Errors
    ///
    /// Returns [`EncodingError`] for the first invalid character or escape.
    pub fn verify(&self) -> Result<(), EncodingError> {
        match self {
            Self::Empty => Ok(()),
            Self::Full(path) => verify(path, ComponentType::Path),
            Self::Segments(segments) => segments
                .iter()
                .try_for_each(|s| verify(s, ComponentType::PathSegment)),
            Self::Composite(parts) => parts.iter().try_for_each(Self::verify),
        }
    }

    pub(crate) fn expand(
        &self,
        variables: &mut dyn UriTemplateVariables,
        missing: Missing,
    ) -> Result<Self, ExpandError> {
        Ok(match self {
            Self::Empty => Self::Empty,
            Self::Full(path) => {
                Self::Full(expand_component(path, variables, missing)?.into_owned())
            }
            Self::Segments(segments) => Self::Segments(
                segments
                    .iter()
                    .map(|s| expand_component(s, variables, missing).map(Cow::into_owned))
                    .collect::<Result<_, _>>()?,
            ),
            Self::Composite(parts) => Self::Composite(
                parts
                    .iter()
                    .map(|p| p.expand(variables, missing))
                    .collect::<Result<_, _>>()?,
            ),
        })
    }

    pub(crate) fn copy_to_uri_components_builder(&self, builder: &mut UriComponentsBuilder) {
        match self {
            Self::Empty => {}
            Self::Full(path) => {
                builder.path(path);
            }
            Self::Segments(segments) => {
                builder.path_segment(segments);
            }
            Self::Composite(parts) => {
                for part in parts {
                    part.copy_to_uri_components_builder(builder);
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum PathPart {
    Full(String),
    Segments(Vec<String>),
}

/// Accumulates `path` and `path_segment` calls for the builder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct PathBuilder {
    parts: Vec<PathPart>,
}

impl PathBuilder {
    /// Appends to the trailing full path, or starts a new one.
    pub(crate) fn add_path(&mut self, path: &str) {
        if path.trim().is_empty() {
            return;
        }
        match self.parts.last_mut() {
            Some(PathPart::Full(full)) => full.push_str(path),
            Some(PathPart::Segments(_)) => {
                let mut full = String::with_capacity(path.len() + 1);
                if !path.starts_with(PATH_DELIMITER) {
                    full.push(PATH_DELIMITER);
                }
                full.push_str(path);
                self.parts.push(PathPart::Full(full));
            }
            None => self.parts.push(PathPart::Full(path.to_string())),
        }
    }

    /// Appends to the trailing segment list, or starts a new one.
    pub(crate) fn add_segments<I>(&mut self, segments: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let segments: Vec<String> = segments
            .into_iter()
            .filter(|s| !s.as_ref().trim().is_empty())
            .map(|s| s.as_ref().to_string())
            .collect();
        if segments.is_empty() {
            return;
        }
        match self.parts.last_mut() {
            Some(PathPart::Segments(existing)) => existing.extend(segments),
            Some(PathPart::Full(full)) => {
                if full.ends_with(PATH_DELIMITER) {
                    full.pop();
                }
                self.parts.push(PathPart::Segments(segments));
            }
            None => self.parts.push(PathPart::Segments(segments)),
        }
    }

    pub(crate) fn clear(&mut self) {
        self.parts.clear();
    }

    pub(crate) fn build(&self) -> PathComponent {
        let mut components: Vec<PathComponent> = self
            .parts
            .iter()
            .filter_map(|part| match part {
                PathPart::Full(path) if path.is_empty() => None,
                PathPart::Full(path) => Some(PathComponent::Full(collapse_slashes(path))),
                PathPart::Segments(segments) => Some(PathComponent::Segments(segments.clone())),
            })
            .collect();

        match components.len() {
            0 => PathComponent::Empty,
            1 => components.remove(0),
            _ => PathComponent::Composite(components),
        }
    }
}

fn collapse_slashes(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    for c in path.chars() {
        if c == PATH_DELIMITER && out.ends_with(PATH_DELIMITER) {
            continue;
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_path_renders_as_is() {
        let path = PathComponent::Full("/foo/bar".to_string());
        assert_eq!(path.path(), "/foo/bar");
        assert_eq!(path.path_segments(), vec!["foo", "bar"]);
    }

    #[test]
    fn segments_render_with_leading_slash() {
        let path = PathComponent::Segments(vec!["a".to_string(), "b c".to_string()]);
        assert_eq!(path.path(), "/a/b c");
    }

    #[test]
    fn segment_slash_encoded() {
        let path = PathComponent::Segments(vec!["ba/z".to_string()]);
        assert_eq!(path.encode().path(), "/ba%2Fz");
        let full = PathComponent::Full("/ba/z".to_string());
        assert_eq!(full.encode().path(), "/ba/z");
    }

    #[test]
    fn verify_segment_rejects_slash() {
        let path = PathComponent::Segments(vec!["ba/z".to_string()]);
        assert!(matches!(
            path.verify(),
            Err(EncodingError::InvalidChar { char: '/', .. })
        ));
    }

    #[test]
    fn builder_appends_to_full_path() {
        let mut builder = PathBuilder::default();
        builder.add_path("/foo");
        builder.add_path("/bar");
        assert_eq!(builder.build(), PathComponent::Full("/foo/bar".to_string()));
    }

    #[test]
    fn builder_collapses_double_slash() {
        let mut builder = PathBuilder::default();
        builder.add_path("/foo/");
        builder.add_path("/bar");
        assert_eq!(builder.build().path(), "/foo/bar");
    }

    #[test]
    fn builder_segments_after_path() {
        let mut builder = PathBuilder::default();
        builder.add_path("/foo/bar/");
        builder.add_segments(["ba/z"]);
        let path = builder.build();
        assert_eq!(
            path,
            PathComponent::Composite(vec![
                PathComponent::Full("/foo/bar".to_string()),
                PathComponent::Segments(vec!["ba/z".to_string()]),
            ])
        );
        assert_eq!(path.path(), "/foo/bar/ba/z");
    }

    #[test]
    fn builder_path_after_segments_gets_slash() {
        let mut builder = PathBuilder::default();
        builder.add_segments(["a"]);
        builder.add_path("b");
        assert_eq!(builder.build().path(), "/a/b");
    }

    #[test]
    fn builder_ignores_blank_input() {
        let mut builder = PathBuilder::default();
        builder.add_path("   ");
        builder.add_segments(["", " "]);
        assert!(builder.build().is_empty());
    }

    #[test]
    fn expand_composite() {
        let path = PathComponent::Composite(vec![
            PathComponent::Full("/{a}".to_string()),
            PathComponent::Segments(vec!["{b}".to_string()]),
        ]);
        let mut vars = crate::template::Positional::new(["x", "y/z"]);
        let expanded = path.expand(&mut vars, Missing::Fail).unwrap();
        assert_eq!(expanded.path(), "/x/y/z");
        assert_eq!(expanded.path_segments(), vec!["x", "y/z"]);
    }
}
