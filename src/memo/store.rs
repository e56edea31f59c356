//! Cache Store Module
//!
//! Append-only key/value storage shared by reference between a memoized
//! invoker and the code that created it.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

// == Cache Store ==
/// Shared handle over the memoization cache.
///
/// Cloning the handle does not copy the entries: every clone sees the same
/// map, so a caller can pre-seed a store, hand it to an invoker and inspect
/// what the invoker stored afterwards. Entries are never replaced or removed.
pub struct CacheStore<V> {
    entries: Arc<RwLock<HashMap<String, Arc<V>>>>,
}

impl<V> CacheStore<V> {
    // == Constructor ==
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Creates a store pre-populated with `entries`.
    ///
    /// When a key repeats, the first value wins.
    pub fn from_entries<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
    {
        let store = Self::new();
        for (key, value) in entries {
            store.insert(key, value);
        }
        store
    }

    // == Lookup ==
    /// Returns the stored value for `key`, if any.
    ///
    /// Presence is decided by the map alone, so values like `0`, `""` or
    /// `false` are hits like any other.
    pub fn lookup(&self, key: &str) -> Option<Arc<V>> {
        self.read().get(key).cloned()
    }

    /// Returns true if `key` has an entry.
    pub fn contains(&self, key: &str) -> bool {
        self.read().contains_key(key)
    }

    // == Store ==
    /// Stores `value` under `key` unless the key is already present.
    ///
    /// Returns the value that ends up in the store (the new one, or the
    /// existing one if another writer got there first) and whether this
    /// call inserted it.
    pub fn store(&self, key: String, value: V) -> (Arc<V>, bool) {
        let mut entries = self.write();
        if let Some(existing) = entries.get(&key) {
            return (Arc::clone(existing), false);
        }
        let stored = Arc::new(value);
        entries.insert(key, Arc::clone(&stored));
        (stored, true)
    }

    // == Insert ==
    /// Seeds an entry from caller code. Returns false if the key existed.
    pub fn insert(&self, key: impl Into<String>, value: V) -> bool {
        let mut entries = self.write();
        let key = key.into();
        if entries.contains_key(&key) {
            return false;
        }
        entries.insert(key, Arc::new(value));
        true
    }

    // == Length ==
    /// Returns the current number of entries.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Returns true if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Returns the stored keys in sorted order.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.read().keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Returns a sorted copy of all entries.
    pub fn snapshot(&self) -> Vec<(String, Arc<V>)> {
        let mut entries: Vec<(String, Arc<V>)> = self
            .read()
            .iter()
            .map(|(key, value)| (key.clone(), Arc::clone(value)))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }

    /// Returns true if both handles point at the same map.
    pub fn shares_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.entries, &other.entries)
    }

    // A panicking writer cannot leave a half-inserted entry behind, so a
    // poisoned lock is still safe to use.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Arc<V>>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Arc<V>>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<V> Clone for CacheStore<V> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
        }
    }
}

impl<V> Default for CacheStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> fmt::Debug for CacheStore<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheStore")
            .field("entries", &self.len())
            .finish()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_new() {
        let store: CacheStore<i32> = CacheStore::new();
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_and_lookup() {
        let store = CacheStore::new();

        store.store("key1".to_string(), "value1".to_string());
        let value = store.lookup("key1").unwrap();

        assert_eq!(*value, "value1");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_lookup_nonexistent() {
        let store: CacheStore<String> = CacheStore::new();
        assert!(store.lookup("nonexistent").is_none());
        assert!(!store.contains("nonexistent"));
    }

    #[test]
    fn test_falsy_values_are_present() {
        let store = CacheStore::new();
        store.store("zero".to_string(), 0);

        assert!(store.contains("zero"));
        assert_eq!(store.lookup("zero").as_deref(), Some(&0));
    }

    #[test]
    fn test_store_keeps_first_value() {
        let store = CacheStore::new();

        let (first, inserted_first) = store.store("key1".to_string(), "value1".to_string());
        let (second, inserted_second) = store.store("key1".to_string(), "value2".to_string());

        assert!(inserted_first);
        assert!(!inserted_second);
        assert_eq!(*second, "value1");
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_insert_does_not_overwrite() {
        let store = CacheStore::new();

        assert!(store.insert("k", 1));
        assert!(!store.insert("k", 2));
        assert_eq!(store.lookup("k").as_deref(), Some(&1));
    }

    #[test]
    fn test_clones_share_entries() {
        let store = CacheStore::new();
        let alias = store.clone();

        alias.store("shared".to_string(), 7);

        assert!(store.shares_with(&alias));
        assert_eq!(store.lookup("shared").as_deref(), Some(&7));
        assert!(!store.shares_with(&CacheStore::new()));
    }

    #[test]
    fn test_from_entries_and_keys() {
        let store = CacheStore::from_entries(vec![("b", 2), ("a", 1), ("b", 3)]);

        assert_eq!(store.keys(), vec!["a".to_string(), "b".to_string()]);
        assert_eq!(store.lookup("b").as_deref(), Some(&2));

        let snapshot = store.snapshot();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[0].0, "a");
        assert_eq!(*snapshot[0].1, 1);
    }
}
