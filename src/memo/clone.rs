//! Result Cloning Module
//!
//! Deep-copy strategies applied to memoized outputs so callers never hold a
//! reference into cached state.

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{AuxError, Result};

// == Result Cloner ==
/// Produces a copy of `value` that is independent of it for mutation.
pub trait ResultCloner<V>: Send {
    fn clone_value(&self, value: &V) -> Result<V>;
}

impl<V, F> ResultCloner<V> for F
where
    F: Fn(&V) -> V + Send,
{
    fn clone_value(&self, value: &V) -> Result<V> {
        Ok(self(value))
    }
}

// == JSON Cloner ==
/// Default cloner: serializes the value to JSON and reads it back.
///
/// Values that do not survive the round trip fail with
/// [`AuxError::Clone`]: non-finite floats become `null`, maps with
/// non-string keys cannot be serialized, and `#[serde(skip)]` fields come
/// back as their defaults.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCloner;

impl<V> ResultCloner<V> for JsonCloner
where
    V: Serialize + DeserializeOwned,
{
    fn clone_value(&self, value: &V) -> Result<V> {
        let json = serde_json::to_value(value).map_err(|e| AuxError::Clone(e.to_string()))?;
        serde_json::from_value(json).map_err(|e| AuxError::Clone(e.to_string()))
    }
}

// == Native Cloner ==
/// Cloner backed by the value's own `Clone` impl.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeCloner;

impl<V: Clone> ResultCloner<V> for NativeCloner {
    fn clone_value(&self, value: &V) -> Result<V> {
        Ok(value.clone())
    }
}
