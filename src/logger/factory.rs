//! Logger Factory Module
//!
//! Builds loggers that stamp records with an optional time and id, resolve
//! an inspection depth, and hand the record to a sink.

use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};

use crate::error::{AuxError, Result};
use crate::logger::format::timestamp;
use crate::logger::{FileSink, LogRecord, LogSink, TracingSink, WriterSink};

// == Logger Config ==
/// Settings shared by every logger sink.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerConfig {
    /// Prefix each record with the current time
    #[serde(default)]
    pub store_time: bool,
    /// Identifier printed with each record
    #[serde(default)]
    pub id: Option<String>,
    /// Depth used when a call does not pass one
    #[serde(default)]
    pub default_depth: usize,
    /// Append records to this file instead of the console
    #[serde(default)]
    pub file_path: Option<PathBuf>,
}

// == Logger ==
/// A configured log function with a runtime on/off switch.
///
/// All methods take `&self`, so one logger can be shared behind an `Arc`.
pub struct Logger {
    store_time: bool,
    id: Option<String>,
    debug: AtomicBool,
    default_depth: AtomicUsize,
    sink: Mutex<Box<dyn LogSink>>,
}

impl Logger {
    // == Constructors ==
    /// Creates a logger with the default sink: the configured file if
    /// `file_path` is set, the tracing subscriber otherwise.
    pub fn new(config: LoggerConfig) -> Self {
        match config.file_path.clone() {
            Some(path) => Self::with_sink(config, FileSink::new(path)),
            None => Self::with_sink(config, TracingSink),
        }
    }

    /// Creates a logger that appends flat entries to `writer`.
    pub fn with_writer<W>(config: LoggerConfig, writer: W) -> Self
    where
        W: Write + Send + 'static,
    {
        Self::with_sink(config, WriterSink::new(writer))
    }

    /// Creates a logger around a custom log function.
    pub fn with_log_fn<F>(config: LoggerConfig, log_fn: F) -> Self
    where
        F: FnMut(&LogRecord<'_>) -> Result<()> + Send + 'static,
    {
        Self::with_sink(config, log_fn)
    }

    /// Creates a logger around a custom sink.
    pub fn with_sink<S>(config: LoggerConfig, sink: S) -> Self
    where
        S: LogSink + 'static,
    {
        Self {
            store_time: config.store_time,
            id: config.id,
            debug: AtomicBool::new(true),
            default_depth: AtomicUsize::new(config.default_depth),
            sink: Mutex::new(Box::new(sink)),
        }
    }

    // == Log ==
    /// Logs `value`.
    ///
    /// A depth of `None` or `Some(0)` falls back to the default depth.
    /// Returns `Ok(false)` without emitting anything when debug is off.
    pub fn log<T>(&self, value: &T, depth: Option<usize>) -> Result<bool>
    where
        T: Serialize + ?Sized,
    {
        if !self.is_debug() {
            return Ok(false);
        }

        let depth = match depth {
            Some(d) if d > 0 => d,
            _ => self.depth(),
        };
        let value = serde_json::to_value(value).map_err(|e| AuxError::Log(e.to_string()))?;
        let record = LogRecord {
            time: self.store_time.then(timestamp),
            id: self.id.as_deref(),
            value: &value,
            depth,
        };

        self.sink
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .emit(&record)?;
        Ok(true)
    }

    // == Switches ==
    /// Turns logging on or off.
    pub fn set_debug(&self, enabled: bool) {
        self.debug.store(enabled, Ordering::Relaxed);
    }

    pub fn is_debug(&self) -> bool {
        self.debug.load(Ordering::Relaxed)
    }

    /// Changes the default depth.
    pub fn set_depth(&self, depth: usize) {
        self.default_depth.store(depth, Ordering::Relaxed);
    }

    pub fn depth(&self) -> usize {
        self.default_depth.load(Ordering::Relaxed)
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("store_time", &self.store_time)
            .field("id", &self.id)
            .field("debug", &self.is_debug())
            .field("default_depth", &self.depth())
            .finish()
    }
}
