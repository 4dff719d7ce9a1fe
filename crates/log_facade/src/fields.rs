//! Contextual key-value pairs attached to log records.

use rustc_hash::FxHashMap;
use serde_json::Value;

/// A mapping from string keys to arbitrary JSON values, attached to every record logged through
/// a field-scoped logger.
///
/// A [`Fields`] value is never modified once it is handed to a logger; chaining
/// [`Logger::with_fields`][crate::Logger::with_fields] builds a new mapping via
/// [`Fields::merged_with`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Fields(FxHashMap<String, Value>);

impl Fields {
    /// Creates an empty set of fields.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a key-value pair, replacing any previous value for the key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Returns the union of `self` and `newer`.
    ///
    /// Values from `newer` take precedence on key collisions.
    pub fn merged_with(&self, newer: &Self) -> Self {
        let mut merged = FxHashMap::with_capacity_and_hasher(
            self.0.len() + newer.0.len(),
            Default::default(),
        );
        merged.extend(self.0.iter().map(|(k, v)| (k.clone(), v.clone())));
        merged.extend(newer.0.iter().map(|(k, v)| (k.clone(), v.clone())));
        Self(merged)
    }

    /// Returns the value stored for `key`, if any.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no fields.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the key-value pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K, V> FromIterator<(K, V)> for Fields
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for Fields
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn merge_is_a_union() {
        let older = Fields::from([("db", "dataDB")]);
        let newer = Fields::from([("log", "facade")]);

        let merged = older.merged_with(&newer);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged.get("db"), Some(&json!("dataDB")));
        assert_eq!(merged.get("log"), Some(&json!("facade")));
    }

    #[test]
    fn newer_fields_win_on_collision() {
        let older = Fields::from([("foo", json!("old")), ("keep", json!(1))]);
        let newer = Fields::from([("foo", json!("new"))]);

        let merged = older.merged_with(&newer);

        assert_eq!(merged.get("foo"), Some(&json!("new")));
        assert_eq!(merged.get("keep"), Some(&json!(1)));
    }

    #[test]
    fn merge_leaves_inputs_untouched() {
        let older = Fields::from([("foo", "old")]);
        let newer = Fields::from([("foo", "new"), ("bar", "baz")]);

        let _ = older.merged_with(&newer);

        assert_eq!(older.len(), 1);
        assert_eq!(older.get("foo"), Some(&json!("old")));
        assert_eq!(newer.len(), 2);
    }

    #[test]
    fn values_keep_their_json_type() {
        let mut fields = Fields::new();
        fields.insert("acctNumber", 7899);
        fields.insert("active", true);
        fields.insert("nested", json!({ "a": [1, 2] }));

        assert_eq!(fields.get("acctNumber"), Some(&json!(7899)));
        assert_eq!(fields.get("active"), Some(&json!(true)));
        assert_eq!(fields.get("nested"), Some(&json!({ "a": [1, 2] })));
        assert!(!fields.is_empty());
    }
}
