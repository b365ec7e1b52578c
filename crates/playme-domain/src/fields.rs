// SPDX-License-Identifier: GPL-3.0-or-later

use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use playme_core::response::canonicalize;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::entity::Entity;
use crate::models::{Album, Albums, Artist, Artists, Track, Tracks};
use crate::registry::Registry;

/// Value of one entity field: raw JSON, or a typed entity or collection
/// when the field's key is a registered label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field {
    Value(Value),
    Artist(Artist),
    Album(Album),
    Track(Track),
    Artists(Artists),
    Albums(Albums),
    Tracks(Tracks),
}

impl Field {
    pub fn to_value(&self) -> Value {
        match self {
            Field::Value(value) => value.clone(),
            Field::Artist(artist) => artist.record().to_value(),
            Field::Album(album) => album.record().to_value(),
            Field::Track(track) => track.record().to_value(),
            Field::Artists(artists) => artists.to_value(),
            Field::Albums(albums) => albums.to_value(),
            Field::Tracks(tracks) => tracks.to_value(),
        }
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Field::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        self.as_value().and_then(Value::as_str)
    }

    pub fn as_artist(&self) -> Option<&Artist> {
        match self {
            Field::Artist(artist) => Some(artist),
            _ => None,
        }
    }

    pub fn as_album(&self) -> Option<&Album> {
        match self {
            Field::Album(album) => Some(album),
            _ => None,
        }
    }

    pub fn as_track(&self) -> Option<&Track> {
        match self {
            Field::Track(track) => Some(track),
            _ => None,
        }
    }

    pub fn as_artists(&self) -> Option<&Artists> {
        match self {
            Field::Artists(artists) => Some(artists),
            _ => None,
        }
    }

    pub fn as_albums(&self) -> Option<&Albums> {
        match self {
            Field::Albums(albums) => Some(albums),
            _ => None,
        }
    }

    pub fn as_tracks(&self) -> Option<&Tracks> {
        match self {
            Field::Tracks(tracks) => Some(tracks),
            _ => None,
        }
    }
}

impl Hash for Field {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_key(self.to_value()).hash(state);
    }
}

impl Serialize for Field {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Value(value) => write!(f, "{}", value),
            Field::Artist(artist) => write!(f, "{}", artist),
            Field::Album(album) => write!(f, "{}", album),
            Field::Track(track) => write!(f, "{}", track),
            Field::Artists(artists) => write!(f, "{}", artists),
            Field::Albums(albums) => write!(f, "{}", albums),
            Field::Tracks(tracks) => write!(f, "{}", tracks),
        }
    }
}

/// Field set backing every entity. Equality and hashing are structural.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: BTreeMap<String, Field>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from a JSON object.
    ///
    /// When the object holds an object under `label`, that object is
    /// unwrapped into the record and the wrapper key dropped. Every remaining
    /// key that `registry` knows is cast into its typed value; fields that
    /// do not cast, and unknown keys, are kept verbatim.
    pub fn cast(mut map: Map<String, Value>, label: &str, registry: &Registry) -> Self {
        if matches!(map.get(label), Some(Value::Object(_))) {
            if let Some(Value::Object(inner)) = map.remove(label) {
                map.extend(inner);
            }
        }

        let fields = map
            .into_iter()
            .map(|(key, value)| {
                let field = match registry.kind_of(&key) {
                    Some(kind) => kind.cast(value, registry).unwrap_or_else(Field::Value),
                    None => Field::Value(value),
                };
                (key, field)
            })
            .collect();

        Self { fields }
    }

    /// Coerce a JSON value into a record.
    ///
    /// Objects and arrays of `[key, value]` pairs are accepted; anything else
    /// is handed back unchanged.
    pub(crate) fn from_value(
        value: Value,
        label: &str,
        registry: &Registry,
    ) -> Result<Self, Value> {
        match value {
            Value::Object(map) => Ok(Self::cast(map, label, registry)),
            Value::Array(items) => match pairs_to_map(&items) {
                Some(map) => Ok(Self::cast(map, label, registry)),
                None => Err(Value::Array(items)),
            },
            other => Err(other),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Field> {
        self.fields.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Text of a scalar field; numbers are rendered as strings.
    pub fn text(&self, key: &str) -> Option<String> {
        match self.get(key)?.as_value()? {
            Value::String(text) => Some(text.clone()),
            Value::Number(number) => Some(number.to_string()),
            _ => None,
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Field)> {
        self.fields.iter().map(|(key, field)| (key.as_str(), field))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn to_value(&self) -> Value {
        Value::Object(
            self.fields
                .iter()
                .map(|(key, field)| (key.clone(), field.to_value()))
                .collect(),
        )
    }

    /// `Name(key = value, ...)`, keys in ascending order.
    pub(crate) fn fmt_named(&self, name: &str, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", name)?;
        for (index, (key, field)) in self.fields.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{} = {}", key, field)?;
        }
        f.write_str(")")
    }
}

fn pairs_to_map(items: &[Value]) -> Option<Map<String, Value>> {
    items
        .iter()
        .map(|item| match item.as_array().map(Vec::as_slice) {
            Some([Value::String(key), value]) => Some((key.clone(), value.clone())),
            _ => None,
        })
        .collect()
}

impl Hash for Record {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_key(self.to_value()).hash(state);
    }
}

/// Canonical text of `value` for hashing.
///
/// Must agree with `Value`'s equality, which holds `0.0 == -0.0`.
fn hash_key(value: Value) -> String {
    unsigned_zeros(canonicalize(value)).to_string()
}

fn unsigned_zeros(value: Value) -> Value {
    match value {
        Value::Number(number) if number.is_f64() && number.as_f64() == Some(0.0) => {
            Value::from(0.0)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(unsigned_zeros).collect()),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (key, unsigned_zeros(value)))
                .collect(),
        ),
        other => other,
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl FromIterator<(String, Field)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, Field)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}
