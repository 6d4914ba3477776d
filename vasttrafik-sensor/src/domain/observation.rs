//! What a sensor shows after an update.

use std::collections::BTreeMap;

use serde::Serialize;

/// A single attribute value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Text(String),
    List(Vec<String>),
}

impl AttributeValue {
    /// Empty strings and empty lists carry no information.
    pub fn is_empty(&self) -> bool {
        match self {
            AttributeValue::Text(s) => s.is_empty(),
            AttributeValue::List(items) => items.is_empty(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttributeValue::Text(s) => Some(s),
            AttributeValue::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            AttributeValue::Text(_) => None,
            AttributeValue::List(items) => Some(items),
        }
    }
}

impl From<String> for AttributeValue {
    fn from(s: String) -> Self {
        AttributeValue::Text(s)
    }
}

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        AttributeValue::Text(s.to_string())
    }
}

impl From<Vec<String>> for AttributeValue {
    fn from(items: Vec<String>) -> Self {
        AttributeValue::List(items)
    }
}

/// Extra display attributes of a sensor.
///
/// Never contains an empty value: construction goes through
/// [`Attributes::compact`], which drops them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Attributes(BTreeMap<String, AttributeValue>);

impl Attributes {
    /// Build attributes from candidate pairs, dropping absent and empty values.
    pub fn compact<I, K>(params: I) -> Self
    where
        I: IntoIterator<Item = (K, Option<AttributeValue>)>,
        K: Into<String>,
    {
        let map = params
            .into_iter()
            .filter_map(|(key, value)| match value {
                Some(value) if !value.is_empty() => Some((key.into(), value)),
                _ => None,
            })
            .collect();
        Self(map)
    }

    pub fn get(&self, key: &str) -> Option<&AttributeValue> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Display state plus attributes, replaced wholesale on every update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SensorObservation {
    /// Departure time shown as the sensor state, absent when unknown.
    pub state: Option<String>,
    pub attributes: Attributes,
}

impl SensorObservation {
    pub fn new(state: impl Into<String>, attributes: Attributes) -> Self {
        Self {
            state: Some(state.into()),
            attributes,
        }
    }

    /// No state and no attributes.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.state.is_none() && self.attributes.is_empty()
    }
}
