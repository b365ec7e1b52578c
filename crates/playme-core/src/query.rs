// SPDX-License-Identifier: GPL-3.0-or-later

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::{Hash, Hasher};

use url::form_urlencoded;

/// Parameter carrying the caller's API key. Sent on the wire, never displayed.
pub const API_KEY_PARAM: &str = "apikey";

/// Query string parameters for an API call.
///
/// Values are stored in their string form and always iterated in ascending
/// key order, so two parameter sets with the same content produce the same
/// encoded string no matter how they were built. Equality and hashing go
/// through that encoded string, which makes a `QueryString` usable as a
/// cache or deduplication key.
#[derive(Clone, Default)]
pub struct QueryString {
    params: BTreeMap<String, String>,
}

impl QueryString {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl fmt::Display) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert a parameter, replacing any previous value for the key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl fmt::Display) -> Option<String> {
        self.params.insert(key.into(), value.to_string())
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.params.remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Returns a copy of `self` with `overrides` applied on top.
    pub fn merged(&self, overrides: &QueryString) -> Self {
        let mut merged = self.clone();
        merged.extend(
            overrides
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_string())),
        );
        merged
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.params.keys().map(String::as_str)
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.params.values().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Percent-encoded `key=value` pairs joined by `&`, in key order.
    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.iter())
            .finish()
    }
}

impl fmt::Display for QueryString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

impl fmt::Debug for QueryString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("QueryString(")?;
        f.debug_map()
            .entries(self.iter().filter(|(key, _)| *key != API_KEY_PARAM))
            .finish()?;
        f.write_str(")")
    }
}

impl PartialEq for QueryString {
    fn eq(&self, other: &Self) -> bool {
        self.to_query_string() == other.to_query_string()
    }
}

impl Eq for QueryString {}

impl Hash for QueryString {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_query_string().hash(state);
    }
}

impl<K, V> Extend<(K, V)> for QueryString
where
    K: Into<String>,
    V: fmt::Display,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for QueryString
where
    K: Into<String>,
    V: fmt::Display,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut query = Self::new();
        query.extend(iter);
        query
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for QueryString
where
    K: Into<String>,
    V: fmt::Display,
{
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl<K, V> From<HashMap<K, V>> for QueryString
where
    K: Into<String>,
    V: fmt::Display,
{
    fn from(map: HashMap<K, V>) -> Self {
        map.into_iter().collect()
    }
}

impl<K, V> From<BTreeMap<K, V>> for QueryString
where
    K: Into<String>,
    V: fmt::Display,
{
    fn from(map: BTreeMap<K, V>) -> Self {
        map.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;

    fn hash_of(query: &QueryString) -> u64 {
        let mut hasher = DefaultHasher::new();
        query.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_keys_are_sorted() {
        let query = QueryString::from([("country", "it"), ("apikey", "k"), ("albumCode", "1")]);
        assert_eq!(
            query.keys().collect::<Vec<_>>(),
            vec!["albumCode", "apikey", "country"]
        );
        assert_eq!(query.values().collect::<Vec<_>>(), vec!["1", "k", "it"]);
        assert_eq!(
            query.iter().collect::<Vec<_>>(),
            vec![("albumCode", "1"), ("apikey", "k"), ("country", "it")]
        );
    }

    #[test]
    fn test_values_are_stringified() {
        let query = QueryString::new()
            .with("country", "it")
            .with("albumCode", 782378);
        assert_eq!(query.get("albumCode"), Some("782378"));
        assert_eq!(query.to_string(), "albumCode=782378&country=it");
    }

    #[test]
    fn test_insertion_order_does_not_matter() {
        let first = QueryString::new().with("country", "it").with("albumCode", 1);
        let second = QueryString::new().with("albumCode", 1).with("country", "it");

        let mut map = HashMap::new();
        map.insert("albumCode", "1");
        map.insert("country", "it");
        let third = QueryString::from(map);

        assert_eq!(first.to_query_string(), second.to_query_string());
        assert_eq!(first, second);
        assert_eq!(first, third);
        assert_eq!(hash_of(&first), hash_of(&second));
        assert_eq!(hash_of(&first), hash_of(&third));
    }

    #[test]
    fn test_percent_encoding() {
        let query = QueryString::new()
            .with("name", "Sigur Rós")
            .with("q", "a&b=c");
        assert_eq!(query.to_string(), "name=Sigur+R%C3%B3s&q=a%26b%3Dc");
    }

    #[test]
    fn test_debug_hides_apikey() {
        let query = QueryString::from([("country", "it"), ("albumCode", "1"), ("apikey", "k")]);
        assert_eq!(
            format!("{:?}", query),
            r#"QueryString({"albumCode": "1", "country": "it"})"#
        );
        // The wire form keeps it.
        assert_eq!(query.to_string(), "albumCode=1&apikey=k&country=it");
    }

    #[test]
    fn test_merged_overrides() {
        let base = QueryString::from([("country", "it"), ("albumCode", "1")]);
        let overrides = QueryString::from([("country", "us"), ("format", "json")]);
        let merged = base.merged(&overrides);
        assert_eq!(merged.to_string(), "albumCode=1&country=us&format=json");
        // The original is untouched.
        assert_eq!(base.get("country"), Some("it"));
    }

    #[test]
    fn test_empty() {
        let query = QueryString::new();
        assert!(query.is_empty());
        assert_eq!(query.to_string(), "");
    }
}
