//! Dispatch Module
//!
//! A switch-case replacement: handlers keyed by value, with an optional
//! default.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use crate::error::{AuxError, Result};

/// Zero-argument case handler.
pub type Handler<R> = Box<dyn Fn() -> R + Send + Sync>;

// == Case Of ==
/// Runs the handler registered for a value, falling back to the default.
pub struct CaseOf<K, R> {
    cases: HashMap<K, Handler<R>>,
    default: Option<Handler<R>>,
}

impl<K: Eq + Hash, R> CaseOf<K, R> {
    // == Constructors ==
    pub fn new() -> Self {
        Self {
            cases: HashMap::new(),
            default: None,
        }
    }

    /// Builds a dispatcher from prepared handlers.
    pub fn from_map(cases: HashMap<K, Handler<R>>, default: Option<Handler<R>>) -> Self {
        Self { cases, default }
    }

    /// Registers `handler` for `value`, replacing any previous one.
    pub fn case<F>(mut self, value: K, handler: F) -> Self
    where
        F: Fn() -> R + Send + Sync + 'static,
    {
        self.cases.insert(value, Box::new(handler));
        self
    }

    /// Sets the handler used when no case matches.
    pub fn default_case<F>(mut self, handler: F) -> Self
    where
        F: Fn() -> R + Send + Sync + 'static,
    {
        self.default = Some(Box::new(handler));
        self
    }

    // == Dispatch ==
    /// Runs the handler for `value`, or the default.
    ///
    /// Fails with [`AuxError::NoDefaultCase`] when neither exists.
    pub fn dispatch<Q>(&self, value: &Q) -> Result<R>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let handler = self
            .cases
            .get(value)
            .or(self.default.as_ref())
            .ok_or(AuxError::NoDefaultCase)?;
        Ok(handler())
    }

    pub fn has_case<Q>(&self, value: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.cases.contains_key(value)
    }

    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    /// Number of explicit cases, not counting the default.
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }
}

impl<K: Eq + Hash, R> Default for CaseOf<K, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, R> fmt::Debug for CaseOf<K, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaseOf")
            .field("cases", &self.cases.len())
            .field("default", &self.default.is_some())
            .finish()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn numbers() -> CaseOf<u32, &'static str> {
        CaseOf::new().case(1, || "one").case(2, || "two")
    }

    #[test]
    fn test_dispatch_matching_case() {
        let cases = numbers().default_case(|| "other");
        assert_eq!(cases.dispatch(&1).unwrap(), "one");
        assert_eq!(cases.dispatch(&2).unwrap(), "two");
    }

    #[test]
    fn test_dispatch_falls_back_to_default() {
        let cases = numbers().default_case(|| "other");
        assert_eq!(cases.dispatch(&0).unwrap(), "other");
    }

    #[test]
    fn test_dispatch_without_default() {
        let result = numbers().dispatch(&9);
        assert!(matches!(result, Err(AuxError::NoDefaultCase)));
        assert_eq!(result.unwrap_err().to_string(), "ERROR no Default value set");
    }

    #[test]
    fn test_borrowed_lookup() {
        let cases: CaseOf<String, usize> = CaseOf::new().case("len".to_string(), || 3);
        assert!(cases.has_case("len"));
        assert_eq!(cases.dispatch("len").unwrap(), 3);
    }

    #[test]
    fn test_from_map() {
        let mut map: HashMap<char, Handler<i32>> = HashMap::new();
        map.insert('a', Box::new(|| 1));
        let cases = CaseOf::from_map(map, Some(Box::new(|| -1)));

        assert_eq!(cases.len(), 1);
        assert!(cases.has_default());
        assert_eq!(cases.dispatch(&'z').unwrap(), -1);
    }
}
