//! Memo Configuration Module
//!
//! Typed builder describing how a memoized invoker derives keys, where it
//! stores results, how many it may store, and whether outputs are cloned.

use std::fmt;

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::error::{AuxError, Result};
use crate::memo::{CacheStore, JsonCloner, JsonKeyDeriver, KeyDeriver, NativeCloner, ResultCloner};

// == Memo Options ==
/// Serializable subset of the configuration, for loading from files or the
/// environment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoOptions {
    /// Maximum number of entries to store; `None` means unbounded
    #[serde(default)]
    pub limit: Option<usize>,
    /// Clone outputs with the JSON round-trip cloner
    #[serde(default)]
    pub clone: bool,
}

// == Memo Config ==
/// Configuration for a [`MemoizedInvoker`](crate::memo::MemoizedInvoker).
///
/// Defaults: JSON key derivation, a fresh empty store, no size limit and no
/// output cloning. Supplying any cloner turns cloning on.
pub struct MemoConfig<A, V> {
    pub(crate) key_deriver: Box<dyn KeyDeriver<A>>,
    pub(crate) cache: Option<CacheStore<V>>,
    pub(crate) limit: Option<usize>,
    pub(crate) cloner: Option<Box<dyn ResultCloner<V>>>,
}

impl<A: Serialize, V> MemoConfig<A, V> {
    // == Constructor ==
    /// Creates the default configuration, keyed by JSON serialization.
    pub fn new() -> Self {
        Self::with_key_deriver(JsonKeyDeriver)
    }
}

impl<A: Serialize, V> Default for MemoConfig<A, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A, V> MemoConfig<A, V> {
    /// Creates a configuration with a custom key deriver, for argument types
    /// that are not serializable.
    pub fn with_key_deriver<D>(deriver: D) -> Self
    where
        D: KeyDeriver<A> + 'static,
    {
        Self {
            key_deriver: Box::new(deriver),
            cache: None,
            limit: None,
            cloner: None,
        }
    }

    /// Replaces the key deriver.
    pub fn key_deriver<D>(mut self, deriver: D) -> Self
    where
        D: KeyDeriver<A> + 'static,
    {
        self.key_deriver = Box::new(deriver);
        self
    }

    /// Uses `cache` as the store. The caller keeps its own handle and sees
    /// every entry the invoker adds.
    pub fn cache(mut self, cache: CacheStore<V>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Stops storing new entries once `limit` entries have been inserted.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Clones outputs with a custom function.
    pub fn clone_fn<F>(self, clone_fn: F) -> Self
    where
        F: Fn(&V) -> V + Send + 'static,
    {
        self.cloner(clone_fn)
    }

    /// Clones outputs with `cloner`.
    pub fn cloner<C>(mut self, cloner: C) -> Self
    where
        C: ResultCloner<V> + 'static,
    {
        self.cloner = Some(Box::new(cloner));
        self
    }

    /// Returns true if outputs will be cloned.
    pub fn is_cloning(&self) -> bool {
        self.cloner.is_some()
    }

    /// Returns the configured limit, if any.
    pub fn max_entries(&self) -> Option<usize> {
        self.limit
    }

    /// Checks the configuration before an invoker is built from it.
    pub fn validate(&self) -> Result<()> {
        if self.limit == Some(0) {
            return Err(AuxError::InvalidConfig(
                "limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl<A, V: Clone + 'static> MemoConfig<A, V> {
    /// Clones outputs with `V::clone`.
    pub fn native_clone(self) -> Self {
        self.cloner(NativeCloner)
    }
}

impl<A, V> MemoConfig<A, V>
where
    V: Serialize + DeserializeOwned + 'static,
{
    /// Clones outputs with the JSON round-trip cloner.
    pub fn clone_outputs(self) -> Self {
        self.cloner(JsonCloner)
    }

    /// Applies a loaded options record on top of this configuration.
    pub fn apply_options(mut self, options: &MemoOptions) -> Self {
        if let Some(limit) = options.limit {
            self = self.limit(limit);
        }
        if options.clone {
            self = self.clone_outputs();
        }
        self
    }
}

impl<A, V> fmt::Debug for MemoConfig<A, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoConfig")
            .field("cache", &self.cache)
            .field("limit", &self.limit)
            .field("cloning", &self.is_cloning())
            .finish()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config: MemoConfig<i32, i32> = MemoConfig::default();
        assert!(config.cache.is_none());
        assert_eq!(config.max_entries(), None);
        assert!(!config.is_cloning());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_limit_rejected() {
        let config: MemoConfig<i32, i32> = MemoConfig::new().limit(0);
        assert!(matches!(config.validate(), Err(AuxError::InvalidConfig(_))));
    }

    #[test]
    fn test_clone_fn_enables_cloning() {
        let config: MemoConfig<i32, Vec<i32>> = MemoConfig::new().clone_fn(|v: &Vec<i32>| v.clone());
        assert!(config.is_cloning());
    }

    #[test]
    fn test_apply_options() {
        let options: MemoOptions = serde_json::from_str(r#"{"limit": 5, "clone": true}"#).unwrap();
        let config: MemoConfig<i32, String> = MemoConfig::new().apply_options(&options);

        assert_eq!(config.max_entries(), Some(5));
        assert!(config.is_cloning());
    }

    #[test]
    fn test_options_defaults_when_missing() {
        let options: MemoOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, MemoOptions::default());
    }

    #[test]
    fn test_custom_key_deriver_for_unserializable_args() {
        struct Opaque(u8);
        let config: MemoConfig<Opaque, u8> =
            MemoConfig::with_key_deriver(|args: &Opaque| args.0.to_string());

        assert_eq!(config.key_deriver.derive(&Opaque(9)).unwrap(), "9");
    }
}
