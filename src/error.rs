//! Error types for the auxil helpers
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

/// Boxed error produced by a fallible wrapped function.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

// == Aux Error Enum ==
/// Unified error type for memoization, logging and dispatch.
#[derive(Error, Debug)]
pub enum AuxError {
    /// Arguments could not be turned into a cache key
    #[error("Key derivation failed: {0}")]
    KeyDerivation(String),

    /// A result could not be deep-copied
    #[error("Clone failed: {0}")]
    Clone(String),

    /// The wrapped function itself failed
    #[error("Wrapped function failed: {0}")]
    Invocation(#[source] BoxError),

    /// Configuration rejected at construction
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Dispatch found neither a matching case nor a default
    #[error("ERROR no Default value set")]
    NoDefaultCase,

    /// A log sink could not render or write a record
    #[error("Log error: {0}")]
    Log(String),

    /// I/O failure while writing a log record
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// == Result Type Alias ==
/// Convenience Result type for the auxil helpers.
pub type Result<T> = std::result::Result<T, AuxError>;
