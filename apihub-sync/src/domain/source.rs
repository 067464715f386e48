use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

/// Property type tags understood by the translator. Matching is exact and
/// case-sensitive.
pub mod tags {
    pub const CREATED: &str = "X-Created";
    pub const MODIFIED: &str = "X-Modified";
    pub const VERSION: &str = "X-Version";
    pub const SPECIFICATION: &str = "Swagger";
}

pub const DEFAULT_VERSION: &str = "v1";

/// One catalog entry: an API and its property bag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SourceRecord {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub properties: Vec<Property>,
}

/// Treats an explicit `null` like a missing key.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl SourceRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_property(mut self, property: Property) -> Self {
        self.properties.push(property);
        self
    }

    /// First property carrying `kind`, in sequence order.
    pub fn first_property(&self, kind: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.kind == kind)
    }

    /// URL of the first specification-bearing property. A matching property
    /// without a URL resolves to the empty string.
    pub fn spec_url(&self) -> Option<&str> {
        self.first_property(tags::SPECIFICATION)
            .map(|p| p.url().unwrap_or_default())
    }

    pub fn version_label(&self) -> String {
        self.first_property(tags::VERSION).map_or_else(
            || DEFAULT_VERSION.to_string(),
            |p| p.value().unwrap_or_default().to_string(),
        )
    }

    /// First `kind` property whose value parses as RFC 3339. Values that do
    /// not parse are skipped.
    pub fn timestamp_override(&self, kind: &str) -> Option<DateTime<Utc>> {
        self.properties
            .iter()
            .filter(|p| p.kind == kind)
            .filter_map(Property::value)
            .find_map(|v| DateTime::parse_from_rfc3339(v).ok())
            .map(|t| t.with_timezone(&Utc))
    }
}

/// A typed annotation on a [`SourceRecord`]. The payload is either a URL or
/// a plain value, never both.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "WireProperty")]
pub struct Property {
    pub kind: String,
    pub payload: PropertyPayload,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyPayload {
    Url(String),
    Value(String),
    Absent,
}

impl Property {
    pub fn with_url(kind: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            payload: PropertyPayload::Url(url.into()),
        }
    }

    pub fn with_value(kind: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            payload: PropertyPayload::Value(value.into()),
        }
    }

    pub fn url(&self) -> Option<&str> {
        match &self.payload {
            PropertyPayload::Url(u) => Some(u),
            _ => None,
        }
    }

    pub fn value(&self) -> Option<&str> {
        match &self.payload {
            PropertyPayload::Value(v) => Some(v),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct WireProperty {
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    kind: String,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    value: Option<String>,
}

impl From<WireProperty> for Property {
    fn from(wire: WireProperty) -> Self {
        let payload = match (wire.url, wire.value) {
            (Some(url), _) if !url.is_empty() => PropertyPayload::Url(url),
            (_, Some(value)) => PropertyPayload::Value(value),
            (Some(url), None) => PropertyPayload::Url(url),
            (None, None) => PropertyPayload::Absent,
        };
        Self {
            kind: wire.kind,
            payload,
        }
    }
}
