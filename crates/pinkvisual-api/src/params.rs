//! Query parameters sent with every request.

use std::collections::BTreeMap;
use std::fmt::Display;

/// Name of the query parameter carrying the API key.
pub(crate) const KEY_PARAM: &str = "key";

/// Query parameters for an API request.
///
/// The upstream API defines the accepted names; [`QueryParams::set`] passes
/// any of them through untouched. An explicit `key` overrides the client's
/// configured key for this request only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    /// Parameter name to value.
    params: BTreeMap<String, String>,
}

impl QueryParams {
    /// Creates an empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a parameter, replacing any previous value.
    #[must_use]
    pub fn set(mut self, name: impl Into<String>, value: impl Display) -> Self {
        self.insert(name, value);
        self
    }

    /// Sets a parameter in place, replacing any previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Display) {
        self.params.insert(name.into(), value.to_string());
    }

    /// Sets the API key for this request.
    #[must_use]
    pub fn key(self, key: impl Into<String>) -> Self {
        let key: String = key.into();
        self.set(KEY_PARAM, key)
    }

    /// Sets the offset of the first result.
    #[must_use]
    pub fn start(self, start: u32) -> Self {
        self.set("start", start)
    }

    /// Sets the maximum number of results.
    #[must_use]
    pub fn limit(self, limit: u32) -> Self {
        self.set("limit", limit)
    }

    /// Returns the value of a parameter.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Returns the explicit API key, ignoring an empty value.
    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.get(KEY_PARAM).filter(|key| !key.is_empty())
    }

    /// Number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Whether no parameters are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Iterates over `(name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Builds the query pairs for the wire, with `key` set to `api_key`.
    pub(crate) fn to_query<'a>(&'a self, api_key: &'a str) -> Vec<(&'a str, &'a str)> {
        let mut query: Vec<(&str, &str)> =
            self.iter().filter(|(name, _)| *name != KEY_PARAM).collect();
        query.push((KEY_PARAM, api_key));
        query
    }
}

impl<K: Into<String>, V: Display> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (name, value) in iter {
            params.insert(name, value);
        }
        params
    }
}
