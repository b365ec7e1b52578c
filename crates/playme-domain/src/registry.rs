// SPDX-License-Identifier: GPL-3.0-or-later

use std::collections::HashMap;

use serde_json::Value;
use tracing::debug;

use crate::collection::Collection;
use crate::entity::Entity;
use crate::fields::{Field, Record};
use crate::models::{Album, Albums, Artist, Artists, Track, Tracks};

/// Typed value a labelled field can be cast into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Artist,
    Album,
    Track,
    Artists,
    Albums,
    Tracks,
}

impl Kind {
    pub const ALL: [Kind; 6] = [
        Kind::Artist,
        Kind::Album,
        Kind::Track,
        Kind::Artists,
        Kind::Albums,
        Kind::Tracks,
    ];

    /// Label the type is nested under in response messages.
    pub fn default_label(self) -> &'static str {
        match self {
            Kind::Artist => Artist::LABEL,
            Kind::Album => Album::LABEL,
            Kind::Track => Track::LABEL,
            Kind::Artists => Artist::COLLECTION_LABEL,
            Kind::Albums => Album::COLLECTION_LABEL,
            Kind::Tracks => Track::COLLECTION_LABEL,
        }
    }

    /// Cast `value` into this kind, handing it back untouched on failure.
    pub(crate) fn cast(self, value: Value, registry: &Registry) -> Result<Field, Value> {
        match self {
            Kind::Artist => cast_entity::<Artist>(value, registry).map(Field::Artist),
            Kind::Album => cast_entity::<Album>(value, registry).map(Field::Album),
            Kind::Track => cast_entity::<Track>(value, registry).map(Field::Track),
            Kind::Artists => cast_collection::<Artist>(value, registry).map(Field::Artists),
            Kind::Albums => cast_collection::<Album>(value, registry).map(Field::Albums),
            Kind::Tracks => cast_collection::<Track>(value, registry).map(Field::Tracks),
        }
    }
}

fn cast_entity<T: Entity>(value: Value, registry: &Registry) -> Result<T, Value> {
    Record::from_value(value, T::LABEL, registry).map(T::from_record)
}

fn cast_collection<T: Entity>(value: Value, registry: &Registry) -> Result<Collection<T>, Value> {
    match value {
        Value::Array(items) => Ok(Collection::from_values(items, registry)),
        other => Err(other),
    }
}

/// Label to type mapping used while casting nested fields.
///
/// `Registry::default()` knows every entity and collection type under its
/// own label; `Registry::empty()` knows no label, in which case nothing nested is
/// cast and every field is kept as raw JSON.
#[derive(Debug, Clone)]
pub struct Registry {
    by_label: HashMap<String, Kind>,
    by_kind: HashMap<Kind, String>,
}

impl Registry {
    pub fn empty() -> Self {
        Self {
            by_label: HashMap::new(),
            by_kind: HashMap::new(),
        }
    }

    /// Registry populated with every known type under its default label.
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        for kind in Kind::ALL {
            registry.register(kind.default_label(), kind);
        }
        registry
    }

    /// Map `label` to `kind`, returning the kind it was mapped to before.
    ///
    /// A kind may be reachable from several labels; the first one registered
    /// is the one reported by [`Registry::label_of`].
    pub fn register(&mut self, label: impl Into<String>, kind: Kind) -> Option<Kind> {
        let label = label.into();
        debug!(target: "registry", %label, ?kind, "registering label");

        let previous = self.by_label.insert(label.clone(), kind);
        if let Some(previous) = previous {
            if previous != kind && self.by_kind.get(&previous) == Some(&label) {
                self.by_kind.remove(&previous);
            }
        }
        self.by_kind.entry(kind).or_insert(label);
        previous
    }

    pub fn kind_of(&self, label: &str) -> Option<Kind> {
        self.by_label.get(label).copied()
    }

    pub fn label_of(&self, kind: Kind) -> Option<&str> {
        self.by_kind.get(&kind).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_label.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_label.is_empty()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_map_both_ways() {
        let registry = Registry::default();
        assert_eq!(registry.len(), 6);
        for kind in Kind::ALL {
            let label = registry.label_of(kind).unwrap();
            assert_eq!(registry.kind_of(label), Some(kind));
        }
        assert_eq!(registry.kind_of("artist"), Some(Kind::Artist));
        assert_eq!(registry.kind_of("tracks"), Some(Kind::Tracks));
        assert_eq!(registry.kind_of("genre"), None);
    }

    #[test]
    fn test_empty_registry() {
        let registry = Registry::empty();
        assert!(registry.is_empty());
        assert_eq!(registry.kind_of("artist"), None);
        assert_eq!(registry.label_of(Kind::Artist), None);
    }

    #[test]
    fn test_alias_labels() {
        let mut registry = Registry::with_defaults();
        assert_eq!(registry.register("mainArtist", Kind::Artist), None);
        assert_eq!(registry.kind_of("mainArtist"), Some(Kind::Artist));
        // The first label stays canonical.
        assert_eq!(registry.label_of(Kind::Artist), Some("artist"));
    }

    #[test]
    fn test_relabel_kind() {
        let mut registry = Registry::empty();
        registry.register("artist", Kind::Artist);
        assert_eq!(registry.register("artist", Kind::Album), Some(Kind::Artist));
        assert_eq!(registry.kind_of("artist"), Some(Kind::Album));
        assert_eq!(registry.label_of(Kind::Artist), None);
        assert_eq!(registry.label_of(Kind::Album), Some("artist"));
    }

    #[test]
    fn test_cast_keeps_value_on_failure() {
        let registry = Registry::default();
        let value = serde_json::json!("Radiohead");
        assert_eq!(Kind::Artist.cast(value.clone(), &registry), Err(value));

        let value = serde_json::json!({"artist": "x"});
        assert_eq!(Kind::Artists.cast(value.clone(), &registry), Err(value));
    }
}
