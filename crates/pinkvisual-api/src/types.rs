//! Record and listing types returned by the API.

use anyhow::{Context, Result, bail};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An opaque catalog record as sent by the API.
///
/// The API owns the record layout; the client neither validates nor
/// rewrites it, and serializing a record yields the JSON it was read from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

/// An episode record.
pub type Episode = Record;

/// An actor record.
pub type Actor = Record;

/// A niche (category) record.
pub type Niche = Record;

impl Record {
    /// Returns a field of the record.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Returns a string field of the record.
    #[must_use]
    pub fn str_field(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(Value::as_str)
    }

    /// Returns the `id` field as text, whether the API sent a string or a number.
    #[must_use]
    pub fn id(&self) -> Option<String> {
        match self.get("id")? {
            Value::String(id) => Some(id.clone()),
            Value::Number(id) => Some(id.to_string()),
            _ => None,
        }
    }

    /// Returns the underlying JSON object.
    #[must_use]
    pub const fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Consumes the record, returning the underlying JSON object.
    #[must_use]
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    /// Unwraps a single-record response.
    ///
    /// Takes `body[field]` when the body carries it as an object, the body
    /// itself otherwise.
    pub(crate) fn from_body(body: Value, field: &str) -> Result<Self> {
        let mut object = match body {
            Value::Object(object) => object,
            other => bail!("expected a JSON object for `{field}`, got {}", kind(&other)),
        };
        if let Some(Value::Object(inner)) = object.get_mut(field) {
            return Ok(Self(std::mem::take(inner)));
        }
        Ok(Self(object))
    }
}

impl From<Map<String, Value>> for Record {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Unwrapped response of a list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Listing<T> {
    /// Records from the endpoint's named array field.
    pub items: Vec<T>,
    /// The body's `total` field, when the endpoint reports one.
    pub total: Option<u64>,
}

impl<T> Listing<T> {
    /// Number of records in this response.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether this response carries no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates over the records.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T: DeserializeOwned> Listing<T> {
    /// Unwraps a list response from `body[field]`.
    ///
    /// A missing field yields an empty listing.
    pub(crate) fn from_body(body: Value, field: &str) -> Result<Self> {
        let mut object = match body {
            Value::Object(object) => object,
            other => bail!("expected a JSON object for `{field}`, got {}", kind(&other)),
        };

        let total = object.get("total").and_then(total_from_value);
        let items = match object.remove(field) {
            None | Some(Value::Null) => Vec::new(),
            Some(value @ Value::Array(_)) => serde_json::from_value(value)
                .with_context(|| format!("failed to decode `{field}` records"))?,
            Some(other) => bail!("expected `{field}` to be an array, got {}", kind(&other)),
        };

        Ok(Self { items, total })
    }
}

impl<T> IntoIterator for Listing<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Listing<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Reads `total` whether it arrived as a number or a numeric string.
fn total_from_value(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Short name of a JSON value's type, for error messages.
const fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use serde_json::json;

    use super::*;

    #[test]
    fn test_listing_from_episodes_fixture() {
        // Arrange
        let body: Value =
            serde_json::from_str(include_str!("../../../fixtures/pinkvisual/episodes_all.json"))
                .unwrap();

        // Act
        let listing: Listing<Episode> = Listing::from_body(body, "episodes").unwrap();

        // Assert
        assert_eq!(listing.total, Some(1287));
        assert_eq!(listing.len(), 2);
        assert_eq!(listing.items[0].id().as_deref(), Some("10452"));
        assert_eq!(listing.items[0].str_field("title"), Some("Sunset Session"));
    }

    #[test]
    fn test_listing_missing_field_is_empty() {
        // Arrange
        let body = json!({ "total": 0 });

        // Act
        let listing: Listing<Actor> = Listing::from_body(body, "actors").unwrap();

        // Assert
        assert!(listing.is_empty());
        assert_eq!(listing.total, Some(0));
    }

    #[test]
    fn test_listing_without_total() {
        // Arrange
        let body: Value =
            serde_json::from_str(include_str!("../../../fixtures/pinkvisual/niches_all.json"))
                .unwrap();

        // Act
        let listing: Listing<Niche> = Listing::from_body(body, "niches").unwrap();

        // Assert
        assert_eq!(listing.total, None);
        assert_eq!(listing.len(), 3);
    }

    #[test]
    fn test_listing_total_as_string() {
        // Arrange
        let body = json!({ "total": "42", "actors": [] });

        // Act
        let listing: Listing<Actor> = Listing::from_body(body, "actors").unwrap();

        // Assert
        assert_eq!(listing.total, Some(42));
    }

    #[test]
    fn test_listing_non_array_field_is_error() {
        // Arrange
        let body = json!({ "episodes": "none" });

        // Act
        let result: Result<Listing<Episode>> = Listing::from_body(body, "episodes");

        // Assert
        let err = result.unwrap_err().to_string();
        assert!(err.contains("expected `episodes` to be an array"));
    }

    #[test]
    fn test_listing_non_object_body_is_error() {
        // Arrange
        let body = json!([1, 2, 3]);

        // Act
        let result: Result<Listing<Episode>> = Listing::from_body(body, "episodes");

        // Assert
        assert!(result.unwrap_err().to_string().contains("got an array"));
    }

    #[test]
    fn test_record_unwraps_named_field() {
        // Arrange
        let body: Value =
            serde_json::from_str(include_str!("../../../fixtures/pinkvisual/episode_10452.json"))
                .unwrap();

        // Act
        let episode = Record::from_body(body, "episode").unwrap();

        // Assert
        assert_eq!(episode.id().as_deref(), Some("10452"));
        assert!(episode.get("description").is_some());
    }

    #[test]
    fn test_record_falls_back_to_body() {
        // Arrange
        let body: Value =
            serde_json::from_str(include_str!("../../../fixtures/pinkvisual/actor_3311.json"))
                .unwrap();

        // Act
        let actor = Record::from_body(body, "actor").unwrap();

        // Assert
        assert_eq!(actor.id().as_deref(), Some("3311"));
        assert_eq!(actor.str_field("name"), Some("Alexis Vale"));
    }

    #[test]
    fn test_record_serializes_to_original_json() {
        // Arrange
        let original = json!({ "id": 7, "name": "Vintage", "extra": { "nested": [1, 2] } });
        let record: Record = serde_json::from_value(original.clone()).unwrap();

        // Act
        let value = serde_json::to_value(&record).unwrap();

        // Assert
        assert_eq!(value, original);
    }

    #[test]
    fn test_record_id_missing_or_unusual() {
        // Arrange
        let no_id = Record::from(Map::new());
        let bool_id: Record = serde_json::from_value(json!({ "id": true })).unwrap();

        // Act & Assert
        assert_eq!(no_id.id(), None);
        assert_eq!(bool_id.id(), None);
    }
}
