// SPDX-License-Identifier: GPL-3.0-or-later

use std::collections::HashSet;
use std::fmt;
use std::ops::{Bound, Index, RangeBounds};

use playme_core::{MethodPath, PlaymeClient, QueryString, Response};
use serde::{Serialize, Serializer};
use serde_json::Value;
use tracing::debug;

use crate::entity::Entity;
use crate::error::{DomainError, Result};
use crate::registry::Registry;

/// Ordered, deduplicated sequence of entities.
///
/// Only the first of several structurally equal entities is kept, at its
/// original position. Entities without any field are skipped.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Collection<T> {
    items: Vec<T>,
}

impl<T: Entity> Collection<T> {
    pub fn new(items: impl IntoIterator<Item = T>) -> Self {
        let mut seen = HashSet::new();
        let items = items
            .into_iter()
            .filter(|item| !item.record().is_empty())
            .filter(|item| seen.insert(item.clone()))
            .collect();
        Self { items }
    }

    /// Cast raw JSON values, silently dropping the ones that cannot be
    /// coerced into `T`.
    pub fn from_values(values: impl IntoIterator<Item = Value>, registry: &Registry) -> Self {
        Self::from_values_counted(values, registry).0
    }

    /// Like [`Collection::from_values`], also returning how many values were
    /// dropped because they could not be cast.
    pub fn from_values_counted(
        values: impl IntoIterator<Item = Value>,
        registry: &Registry,
    ) -> (Self, usize) {
        let mut dropped = 0;
        let items: Vec<T> = values
            .into_iter()
            .filter_map(|value| match T::from_value(value, registry) {
                Ok(item) => Some(item),
                Err(_) => {
                    dropped += 1;
                    None
                }
            })
            .collect();

        if dropped > 0 {
            debug!(
                target: "cast",
                collection = T::COLLECTION_NAME,
                dropped,
                "dropped values that could not be cast"
            );
        }

        (Self::new(items), dropped)
    }

    /// Cast the array found under the collection label of a successful
    /// response.
    pub fn from_response(response: &Response, registry: &Registry) -> Result<Self> {
        let status = response.status()?;
        if !status.is_success() {
            return Err(DomainError::Api { status });
        }

        match response.get(T::COLLECTION_LABEL) {
            Some(Value::Array(values)) => Ok(Self::from_values(values.iter().cloned(), registry)),
            _ => Err(DomainError::MissingField(T::COLLECTION_LABEL)),
        }
    }

    /// Invoke `method` and cast its response.
    pub async fn request(
        client: &PlaymeClient,
        registry: &Registry,
        method: &MethodPath,
        params: QueryString,
    ) -> Result<Self> {
        let response = method.invoke(client, params).await?;
        Self::from_response(&response, registry)
    }

    /// Sub-collection over `range`, clamped to the collection bounds.
    pub fn slice(&self, range: impl RangeBounds<usize>) -> Self {
        let len = self.items.len();
        let start = match range.start_bound() {
            Bound::Included(&start) => start,
            Bound::Excluded(&start) => start.saturating_add(1),
            Bound::Unbounded => 0,
        }
        .min(len);
        let end = match range.end_bound() {
            Bound::Included(&end) => end.saturating_add(1),
            Bound::Excluded(&end) => end,
            Bound::Unbounded => len,
        }
        .min(len);

        if start >= end {
            return Self { items: Vec::new() };
        }
        Self {
            items: self.items[start..end].to_vec(),
        }
    }

    pub fn to_value(&self) -> Value {
        Value::Array(self.items.iter().map(Entity::to_value).collect())
    }
}

impl<T> Collection<T> {
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn first(&self) -> Option<&T> {
        self.items.first()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Entity> FromIterator<T> for Collection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl<T> Index<usize> for Collection<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

impl<T> IntoIterator for Collection<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Collection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: Entity> Serialize for Collection<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl<T: Entity> fmt::Display for Collection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", T::COLLECTION_NAME)?;
        for (index, item) in self.items.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", item)?;
        }
        f.write_str(")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Artist, Item, Items};
    use serde_json::json;

    #[test]
    fn test_mixed_values() {
        let registry = Registry::default();
        let items = Items::from_values(
            vec![
                json!("a"),
                json!(1),
                json!([["a", 1], ["b", 2]]),
                json!({"a": 3, "b": 4}),
                json!({"item": {"a": 5, "b": 6}}),
            ],
            &registry,
        );

        assert_eq!(items.len(), 3);
        assert_eq!(
            items.to_string(),
            "Items(Item(a = 1, b = 2), Item(a = 3, b = 4), Item(a = 5, b = 6))"
        );
    }

    #[test]
    fn test_dropped_values_are_counted() {
        let registry = Registry::default();
        let (items, dropped) = Items::from_values_counted(
            vec![json!({"a": 1}), json!(null), json!("b"), json!({"a": 2})],
            &registry,
        );
        assert_eq!(items.len(), 2);
        assert_eq!(dropped, 2);
    }

    #[test]
    fn test_duplicates_keep_first_position() {
        let registry = Registry::default();
        let items = Items::from_values(
            vec![
                json!({"a": 1}),
                json!({"b": 2}),
                json!({"a": 1}),
                json!({"c": 3}),
                json!({"b": 2}),
            ],
            &registry,
        );

        let values: Vec<Value> = items.iter().map(Entity::to_value).collect();
        assert_eq!(values, vec![json!({"a": 1}), json!({"b": 2}), json!({"c": 3})]);
    }

    #[test]
    fn test_signed_zero_duplicates_collapse() {
        let registry = Registry::default();
        let items = Items::from_values(vec![json!({"a": 0.0}), json!({"a": -0.0})], &registry);
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_empty_entities_skipped() {
        let registry = Registry::default();
        let items = Items::from_values(vec![json!({}), json!([]), json!({"a": 1})], &registry);
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_slice() {
        let registry = Registry::default();
        let items = Items::from_values(
            vec![json!({"a": 1}), json!({"a": 2}), json!({"a": 3})],
            &registry,
        );

        let tail = items.slice(1..);
        assert_eq!(tail.len(), 2);
        assert_eq!(tail[0], items[1]);
        assert_eq!(tail.to_string(), "Items(Item(a = 2), Item(a = 3))");

        assert_eq!(items.slice(..=0).len(), 1);
        assert_eq!(items.slice(1..10).len(), 2);
        assert!(items.slice(5..).is_empty());
        assert_eq!(items.slice(..), items);
    }

    #[test]
    fn test_new_deduplicates_typed_items() {
        let registry = Registry::default();
        let radiohead = Artist::from_value(json!({"name": "Radiohead"}), &registry).unwrap();
        let blur = Artist::from_value(json!({"name": "Blur"}), &registry).unwrap();

        let artists: Collection<Artist> =
            vec![radiohead.clone(), blur.clone(), radiohead.clone()].into_iter().collect();
        assert_eq!(artists.as_slice(), &[radiohead, blur]);
        assert_eq!(Item::COLLECTION_NAME, "Items");
    }
}
