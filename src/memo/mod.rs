//! Memo Module
//!
//! Function memoization with pluggable key derivation, a shared append-only
//! store, an optional entry limit and optional output cloning.

mod clone;
mod config;
mod invoker;
mod key;
mod stats;
mod store;


// Re-export public types
pub use clone::{JsonCloner, NativeCloner, ResultCloner};
pub use config::{MemoConfig, MemoOptions};
pub use invoker::{memoize, CacheState, MemoizedInvoker, SharedInvoker};
pub use key::{JsonKeyDeriver, KeyDeriver};
pub use stats::MemoStats;
pub use store::CacheStore;
