//! Query parameters for hierarchical URI components.

use std::fmt;

use crate::component::ComponentType;
use crate::constants::{QUERY_PARAM_DELIMITER, QUERY_VALUE_DELIMITER};
use crate::encoding::{encode, verify};
use crate::error::{EncodingError, ExpandError};
use crate::template::{Missing, UriTemplateVariables, expand_component, expand_optional};

/// Query parameters from a URI.
///
/// An ordered multimap: names keep the order in which they were first
/// added, values keep their insertion order, and a name may carry several
/// values. A value of `None` is a parameter without `=` (`?flag`), while
/// `Some("")` renders as `?flag=`.
///
/// # Examples
///
/// ```
/// use uri_components::QueryParams;
///
/// let params = QueryParams::parse("z=1&a=2&z=3&flag");
/// assert_eq!(params.get("z"), Some(&[Some("1".to_string()), Some("3".to_string())][..]));
/// assert_eq!(params.first("a"), Some("2"));
/// assert_eq!(params.to_string(), "z=1&z=3&a=2&flag");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QueryParams {
    params: Vec<(String, Vec<Option<String>>)>,
}

impl QueryParams {
    /// Creates an empty query params instance.
    #[must_use]
    pub const fn new() -> Self {
        Self { params: Vec::new() }
    }

    /// Parses a query string (without leading '?').
    ///
    /// Pairs are separated by `&`; a pair without `=` becomes a value-less
    /// parameter. Text is taken as-is, templates and escapes included.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let mut params = Self::new();
        params.extend_from_query(input);
        params
    }

    pub(crate) fn extend_from_query(&mut self, input: &str) {
        for pair in input.split(QUERY_PARAM_DELIMITER) {
            let (name, value) = match pair.split_once(QUERY_VALUE_DELIMITER) {
                Some((name, value)) => (name, Some(value.to_string())),
                None => (pair, None),
            };
            if name.is_empty() {
                continue;
            }
            self.add(name, value);
        }
    }

    /// Adds a value to `name`, appending to any existing values.
    pub fn add(&mut self, name: &str, value: Option<String>) {
        match self.params.iter_mut().find(|(n, _)| n == name) {
            Some((_, values)) => values.push(value),
            None => self.params.push((name.to_string(), vec![value])),
        }
    }

    /// Replaces all values of `name`, keeping its position if present.
    pub fn set(&mut self, name: &str, values: Vec<Option<String>>) {
        match self.params.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => *existing = values,
            None => self.params.push((name.to_string(), values)),
        }
    }

    /// Removes `name` and all its values.
    pub fn remove(&mut self, name: &str) -> Option<Vec<Option<String>>> {
        let idx = self.params.iter().position(|(n, _)| n == name)?;
        Some(self.params.remove(idx).1)
    }

    /// Removes every parameter.
    pub fn clear(&mut self) {
        self.params.clear();
    }

    /// Returns all values for a parameter, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[Option<String>]> {
        self.params
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, values)| values.as_slice())
    }

    /// Returns the first value for a parameter, if it has one.
    #[must_use]
    pub fn first(&self, name: &str) -> Option<&str> {
        self.get(name)?.first()?.as_deref()
    }

    /// Returns true if the parameter is present, with or without a value.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Returns true if the query is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Returns the number of distinct parameter names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Returns an iterator over names and their values.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Option<String>])> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Renders the query string, or `None` if there are no parameters.
    #[must_use]
    pub fn to_query_string(&self) -> Option<String> {
        (!self.is_empty()).then(|| self.to_string())
    }

    pub(crate) fn encode(&self) -> Self {
        let params = self
            .params
            .iter()
            .map(|(name, values)| {
                let name = encode(name, ComponentType::QueryParam).into_owned();
                let values = values
                    .iter()
                    .map(|v| {
                        v.as_deref()
                            .map(|v| encode(v, ComponentType::QueryParam).into_owned())
                    })
                    .collect();
                (name, values)
            })
            .collect();
        Self { params }
    }

    pub(crate) fn verify(&self) -> Result<(), EncodingError> {
        for (name, values) in &self.params {
            verify(name, ComponentType::QueryParam)?;
            for value in values.iter().flatten() {
                verify(value, ComponentType::QueryParam)?;
            }
        }
        Ok(())
    }

    pub(crate) fn expand(
        &self,
        variables: &mut dyn UriTemplateVariables,
        missing: Missing,
    ) -> Result<Self, ExpandError> {
        let mut expanded = Self::new();
        for (name, values) in &self.params {
            let name = expand_component(name, variables, missing)?;
            if values.is_empty() {
                expanded.set(&name, Vec::new());
            }
            for value in values {
                let value = expand_optional(value.as_deref(), variables, missing)?;
                expanded.add(&name, value);
            }
        }
        Ok(expanded)
    }
}

impl fmt::Display for QueryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (name, values) in &self.params {
            if values.is_empty() {
                if !first {
                    f.write_str("&")?;
                }
                f.write_str(name)?;
                first = false;
                continue;
            }
            for value in values {
                if !first {
                    f.write_str("&")?;
                }
                f.write_str(name)?;
                if let Some(value) = value {
                    write!(f, "={value}")?;
                }
                first = false;
            }
        }
        Ok(())
    }
}

impl<K, V> FromIterator<(K, V)> for QueryParams
where
    K: AsRef<str>,
    V: Into<Option<String>>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut params = Self::new();
        for (name, value) in iter {
            params.add(name.as_ref(), value.into());
        }
        params
    }
}
