//! Adapter for fields the provider sends as either a value or a list.
//!
//! Västtrafik collapses single-element arrays into a bare object: a trip with
//! one leg carries `"Leg": {...}` instead of `"Leg": [{...}]`, and the same
//! happens for departure boards and location lists.

use serde::{Deserialize, Deserializer};

/// Either a single value or a sequence of values.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    /// A proper sequence.
    Many(Vec<T>),
    /// A bare value standing in for a one-element sequence.
    One(T),
}

impl<T> OneOrMany<T> {
    /// Normalize into a sequence, wrapping a bare value.
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(value) => vec![value],
            OneOrMany::Many(values) => values,
        }
    }

    /// View as a slice without allocating.
    pub fn as_slice(&self) -> &[T] {
        match self {
            OneOrMany::One(value) => std::slice::from_ref(value),
            OneOrMany::Many(values) => values,
        }
    }

    /// Number of values.
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// True for an empty sequence. A bare value is never empty.
    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    /// Fallibly convert every value, keeping the one-or-many shape.
    pub fn try_map<U, E>(self, mut f: impl FnMut(T) -> Result<U, E>) -> Result<OneOrMany<U>, E> {
        match self {
            OneOrMany::One(value) => f(value).map(OneOrMany::One),
            OneOrMany::Many(values) => values
                .into_iter()
                .map(f)
                .collect::<Result<Vec<_>, _>>()
                .map(OneOrMany::Many),
        }
    }
}

impl<T> Default for OneOrMany<T> {
    fn default() -> Self {
        OneOrMany::Many(Vec::new())
    }
}

impl<T> From<Vec<T>> for OneOrMany<T> {
    fn from(values: Vec<T>) -> Self {
        OneOrMany::Many(values)
    }
}

/// `deserialize_with` helper for `Vec<T>` fields that also accept a bare value.
pub fn one_or_many<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    OneOrMany::deserialize(deserializer).map(OneOrMany::into_vec)
}
