// ABOUTME: Ordered key/value option store backing client settings and the current token
// ABOUTME: Defines the OptionStore trait and the in-memory MemoryOptionStore implementation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key/value container the client reads settings from and writes the token into
///
/// Implementations decide durability. A store is owned by one logical session;
/// the client takes `&mut self` for every write, so no internal locking is needed.
pub trait OptionStore {
    /// Value stored under `key`
    fn get(&self, key: &str) -> Option<Value>;

    /// Replace the value stored under `key`
    fn set(&mut self, key: &str, value: Value);
}

/// In-memory option store preserving insertion order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemoryOptionStore {
    values: Map<String, Value>,
}

impl MemoryOptionStore {
    /// Empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded from an existing JSON object
    #[must_use]
    pub const fn from_map(values: Map<String, Value>) -> Self {
        Self { values }
    }

    /// All entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.values.iter()
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the store is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Consume the store, returning its entries
    #[must_use]
    pub fn into_map(self) -> Map<String, Value> {
        self.values
    }
}

impl OptionStore for MemoryOptionStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Value) {
        self.values.insert(key.to_owned(), value);
    }
}

impl<S: OptionStore + ?Sized> OptionStore for &mut S {
    fn get(&self, key: &str) -> Option<Value> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: Value) {
        (**self).set(key, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_set_overwrites_and_keeps_position() {
        let mut store = MemoryOptionStore::new();
        store.set("authurl", json!("https://a.example"));
        store.set("clientid", json!("id"));
        store.set("authurl", json!("https://b.example"));

        let keys: Vec<&String> = store.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["authurl", "clientid"]);
        assert_eq!(store.get("authurl"), Some(json!("https://b.example")));
        assert_eq!(store.get("missing"), None);
    }

    #[test]
    fn test_round_trips_as_plain_json_object() {
        let store: MemoryOptionStore =
            serde_json::from_value(json!({"scope": ["a", "b"], "userefresh": true}))
                .unwrap_or_default();
        assert_eq!(store.len(), 2);
        assert_eq!(store.get("userefresh"), Some(json!(true)));
    }
}
