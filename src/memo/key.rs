//! Key Derivation Module
//!
//! Turns an argument value into the string key used by the cache store.

use serde::Serialize;

use crate::error::{AuxError, Result};

// == Key Deriver ==
/// Maps a call's arguments to a cache key.
///
/// Implementations must be deterministic for the lifetime of the invoker:
/// the same logical arguments must always produce the same key.
pub trait KeyDeriver<A>: Send {
    /// Derives the cache key for `args`.
    fn derive(&self, args: &A) -> Result<String>;
}

impl<A, F> KeyDeriver<A> for F
where
    F: Fn(&A) -> String + Send,
{
    fn derive(&self, args: &A) -> Result<String> {
        Ok(self(args))
    }
}

// == JSON Key Deriver ==
/// Default deriver: compact JSON serialization of the arguments.
///
/// Structurally equal arguments give equal keys, with one caveat: a
/// `HashMap` serializes in iteration order, so two equal hash maps may
/// produce different keys. Use `BTreeMap` or a custom deriver for map
/// arguments.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonKeyDeriver;

impl<A: Serialize> KeyDeriver<A> for JsonKeyDeriver {
    fn derive(&self, args: &A) -> Result<String> {
        serde_json::to_string(args).map_err(|e| AuxError::KeyDerivation(e.to_string()))
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeMap, HashMap};

    #[test]
    fn test_json_key_scalar() {
        assert_eq!(JsonKeyDeriver.derive(&4).unwrap(), "4");
        assert_eq!(JsonKeyDeriver.derive(&"a").unwrap(), "\"a\"");
    }

    #[test]
    fn test_json_key_tuple_is_argument_list() {
        let key = JsonKeyDeriver.derive(&(1, "two", true)).unwrap();
        assert_eq!(key, r#"[1,"two",true]"#);
    }

    #[test]
    fn test_json_key_distinguishes_types() {
        let number = JsonKeyDeriver.derive(&1).unwrap();
        let text = JsonKeyDeriver.derive(&"1").unwrap();
        assert_ne!(number, text);
    }

    #[test]
    fn test_json_key_ordered_map() {
        let mut a = BTreeMap::new();
        a.insert("x", 1);
        a.insert("y", 2);
        let mut b = BTreeMap::new();
        b.insert("y", 2);
        b.insert("x", 1);

        assert_eq!(
            JsonKeyDeriver.derive(&a).unwrap(),
            JsonKeyDeriver.derive(&b).unwrap()
        );
    }

    #[test]
    fn test_json_key_rejects_non_string_map_keys() {
        let mut args = HashMap::new();
        args.insert((1, 2), 3);

        let result = JsonKeyDeriver.derive(&args);
        assert!(matches!(result, Err(AuxError::KeyDerivation(_))));
    }

    #[test]
    fn test_closure_deriver() {
        let deriver = |args: &(u32, u32)| format!("{}:{}", args.0, args.1);
        assert_eq!(deriver.derive(&(3, 4)).unwrap(), "3:4");
    }
}
