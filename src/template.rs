//! URI template placeholders and the values that fill them.
//!
//! A placeholder is `{name}` or `{name:regex}`. The regex is stripped
//! before the name is looked up and is never matched against the value.
//! Nested braces inside the regex (`{id:[a-z]{1,5}}`) belong to the
//! placeholder. Braces enclosing a `/` are literal text, not a placeholder.

use std::borrow::{Borrow, Cow};
use std::collections::{BTreeMap, HashMap};
use std::fmt::Display;
use std::hash::{BuildHasher, Hash};

use crate::error::ExpandError;

/// A source of values for URI template placeholders.
///
/// Positional sources ignore the name and hand out values in the order
/// placeholders are encountered across the whole URI; named sources look
/// the name up.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use uri_components::UriComponentsBuilder;
///
/// let components = UriComponentsBuilder::from_path("/hotels/{hotel}").build().unwrap();
///
/// let vars = HashMap::from([("hotel", 42)]);
/// let expanded = components.expand_with(&vars).unwrap();
/// assert_eq!(expanded.path().as_deref(), Some("/hotels/42"));
/// ```
pub trait UriTemplateVariables {
    /// Returns the value for the placeholder `name`, or `None` if the
    /// source has nothing for it.
    fn value(&mut self, name: &str) -> Option<String>;
}

impl<V: UriTemplateVariables + ?Sized> UriTemplateVariables for &mut V {
    fn value(&mut self, name: &str) -> Option<String> {
        (**self).value(name)
    }
}

impl<K, V, S> UriTemplateVariables for &HashMap<K, V, S>
where
    K: Borrow<str> + Eq + Hash,
    V: Display,
    S: BuildHasher,
{
    fn value(&mut self, name: &str) -> Option<String> {
        self.get(name).map(ToString::to_string)
    }
}

impl<K, V> UriTemplateVariables for &BTreeMap<K, V>
where
    K: Borrow<str> + Ord,
    V: Display,
{
    fn value(&mut self, name: &str) -> Option<String> {
        self.get(name).map(ToString::to_string)
    }
}

/// Positional placeholder values, consumed left to right.
#[derive(Debug, Clone)]
pub struct Positional<I>(I);

impl<I> Positional<I>
where
    I: Iterator,
    I::Item: Display,
{
    /// Wraps an iterator of values.
    pub fn new<T>(values: T) -> Self
    where
        T: IntoIterator<IntoIter = I>,
    {
        Self(values.into_iter())
    }
}

impl<I> UriTemplateVariables for Positional<I>
where
    I: Iterator,
    I::Item: Display,
{
    fn value(&mut self, _name: &str) -> Option<String> {
        self.0.next().map(|v| v.to_string())
    }
}

/// What to do with a placeholder the source has no value for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Missing {
    /// Fail with [`ExpandError::MissingVariable`].
    Fail,
    /// Leave the placeholder text in place.
    Skip,
}

/// Replaces every placeholder in `source` with its value.
pub(crate) fn expand_component<'a>(
    source: &'a str,
    variables: &mut dyn UriTemplateVariables,
    missing: Missing,
) -> Result<Cow<'a, str>, ExpandError> {
    if !source.contains('{') {
        return Ok(Cow::Borrowed(source));
    }

    let mut expanded = String::with_capacity(source.len());
    let mut rest = source;
    while let Some(start) = rest.find('{') {
        let Some(len) = placeholder_len(&rest[start..]) else {
            expanded.push_str(&rest[..=start]);
            rest = &rest[start + 1..];
            continue;
        };

        expanded.push_str(&rest[..start]);
        let placeholder = &rest[start..start + len];
        let name = variable_name(placeholder);
        match (variables.value(name), missing) {
            (Some(value), _) => expanded.push_str(&value),
            (None, Missing::Skip) => expanded.push_str(placeholder),
            (None, Missing::Fail) => {
                return Err(ExpandError::MissingVariable {
                    name: name.to_string(),
                });
            }
        }
        rest = &rest[start + len..];
    }
    expanded.push_str(rest);

    Ok(Cow::Owned(expanded))
}

/// Like [`expand_component`] for optional components.
pub(crate) fn expand_optional(
    source: Option<&str>,
    variables: &mut dyn UriTemplateVariables,
    missing: Missing,
) -> Result<Option<String>, ExpandError> {
    source
        .map(|s| expand_component(s, variables, missing).map(Cow::into_owned))
        .transpose()
}

/// Returns the placeholder names in `source`, in order of appearance.
///
/// # Examples
///
/// ```
/// use uri_components::variable_names;
///
/// let names = variable_names("/myurl/{name:[a-z]{1,5}}/{page}");
/// assert_eq!(names, vec!["name", "page"]);
/// ```
#[must_use]
pub fn variable_names(source: &str) -> Vec<&str> {
    let mut names = Vec::new();
    let mut rest = source;
    while let Some(start) = rest.find('{') {
        match placeholder_len(&rest[start..]) {
            Some(len) => {
                names.push(variable_name(&rest[start..start + len]));
                rest = &rest[start + len..];
            }
            None => rest = &rest[start + 1..],
        }
    }
    names
}

/// Length of the placeholder at the start of `s` (which begins with `{`),
/// including both braces.
fn placeholder_len(s: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (i, b) in s.bytes().enumerate() {
        match b {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return (i > 1).then_some(i + 1);
                }
            }
            b'/' => return None,
            _ => {}
        }
    }
    None
}

/// Name inside a `{...}` placeholder with any `:regex` suffix removed.
fn variable_name(placeholder: &str) -> &str {
    let inner = &placeholder[1..placeholder.len() - 1];
    inner.split_once(':').map_or(inner, |(name, _)| name).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expand_positional(source: &str, values: &[&str]) -> Result<String, ExpandError> {
        let mut vars = Positional::new(values.iter());
        expand_component(source, &mut vars, Missing::Fail).map(Cow::into_owned)
    }

    #[test]
    fn no_placeholder_borrows() {
        let mut vars = Positional::new(std::iter::empty::<&str>());
        assert!(matches!(
            expand_component("/plain", &mut vars, Missing::Fail),
            Ok(Cow::Borrowed("/plain"))
        ));
    }

    #[test]
    fn positional_in_encounter_order() {
        assert_eq!(
            expand_positional("/{foo} {bar}", &["1 2", "3 4"]).unwrap(),
            "/1 2 3 4"
        );
    }

    #[test]
    fn positional_not_enough_values() {
        assert_eq!(
            expand_positional("/{foo}/{bar}", &["1"]),
            Err(ExpandError::MissingVariable {
                name: "bar".to_string()
            })
        );
    }

    #[test]
    fn named_with_regex_constraint() {
        let map = HashMap::from([("name", "test")]);
        let mut vars = &map;
        let expanded =
            expand_component("/myurl/{name:[a-z]{1,5}}/show", &mut vars, Missing::Fail).unwrap();
        assert_eq!(expanded, "/myurl/test/show");
    }

    #[test]
    fn regex_constraint_not_enforced() {
        let map = BTreeMap::from([("id".to_string(), "NOT-LOWER-42")]);
        let mut vars = &map;
        let expanded = expand_component("{id:[a-z]+}", &mut vars, Missing::Fail).unwrap();
        assert_eq!(expanded, "NOT-LOWER-42");
    }

    #[test]
    fn named_missing_fails() {
        let map: HashMap<String, String> = HashMap::new();
        let mut vars = &map;
        assert!(matches!(
            expand_component("/{foo}", &mut vars, Missing::Fail),
            Err(ExpandError::MissingVariable { name }) if name == "foo"
        ));
    }

    #[test]
    fn named_missing_skipped() {
        let map = HashMap::from([("a", "1")]);
        let mut vars = &map;
        let expanded =
            expand_component("/{a}/{b:\\d+}", &mut vars, Missing::Skip).unwrap();
        assert_eq!(expanded, "/1/{b:\\d+}");
    }

    #[test]
    fn braces_around_slash_are_literal() {
        assert_eq!(expand_positional("/{a/b}/{c}", &["x"]).unwrap(), "/{a/b}/x");
    }

    #[test]
    fn empty_braces_are_literal() {
        assert_eq!(expand_positional("/{}/{c}", &["x"]).unwrap(), "/{}/x");
    }

    #[test]
    fn unclosed_brace_is_literal() {
        assert_eq!(expand_positional("/{a", &[]).unwrap(), "/{a");
    }

    #[test]
    fn name_is_trimmed() {
        let map = HashMap::from([("port", 8080)]);
        let mut vars = &map;
        assert_eq!(
            expand_component("{ port }", &mut vars, Missing::Fail).unwrap(),
            "8080"
        );
    }

    #[test]
    fn variable_names_in_order() {
        assert_eq!(
            variable_names("http://{host}:{port}/{a}/{b:[0-9]{2}}"),
            vec!["host", "port", "a", "b"]
        );
        assert!(variable_names("/plain/{x/y}").is_empty());
    }
}
