//! Asset metadata: an ordered string map.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Key/value metadata attached to an asset registration.
///
/// Backed by a `BTreeMap`, so iteration and canonical encoding always follow
/// key order regardless of insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata(BTreeMap<String, String>);

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry, returning the updated map.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The ledger's flat string form: `key\0value\0key\0value`.
    pub fn to_serialized_string(&self) -> String {
        let mut out = String::new();
        for (i, (key, value)) in self.0.iter().enumerate() {
            if i > 0 {
                out.push('\0');
            }
            out.push_str(key);
            out.push('\0');
            out.push_str(value);
        }
        out
    }

    /// Size of the flat string form in characters.
    pub fn serialized_len(&self) -> usize {
        let separators = (self.0.len() * 2).saturating_sub(1);
        self.0
            .iter()
            .map(|(k, v)| k.chars().count() + v.chars().count())
            .sum::<usize>()
            + separators
    }
}

impl From<BTreeMap<String, String>> for Metadata {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Metadata {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iteration_is_key_ordered() {
        let metadata = Metadata::new().with("zeta", "1").with("alpha", "2");
        let keys: Vec<&str> = metadata.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["alpha", "zeta"]);
    }

    #[test]
    fn test_serialized_form() {
        let metadata = Metadata::new().with("author", "test").with("a", "b");
        assert_eq!(metadata.to_serialized_string(), "a\0b\0author\0test");
        assert_eq!(
            metadata.serialized_len(),
            metadata.to_serialized_string().chars().count()
        );
        assert_eq!(Metadata::new().serialized_len(), 0);
    }

    #[test]
    fn test_insertion_order_does_not_matter() {
        let a: Metadata = [("x", "1"), ("y", "2")].into_iter().collect();
        let b: Metadata = [("y", "2"), ("x", "1")].into_iter().collect();
        assert_eq!(a, b);
    }
}
