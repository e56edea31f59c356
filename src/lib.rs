//! Auxil - auxiliary helpers
//!
//! A bounded memoizer with optional output cloning, a configurable logger
//! factory, and a dispatch-by-value helper.

pub mod config;
pub mod dispatch;
pub mod error;
pub mod logger;
pub mod memo;

pub use config::Config;
pub use dispatch::CaseOf;
pub use error::{AuxError, Result};
pub use logger::{Logger, LoggerConfig};
pub use memo::{memoize, CacheStore, MemoConfig, MemoizedInvoker};

/// Returns the library version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
