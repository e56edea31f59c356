//! Log Sink Module
//!
//! Destinations for log records: the tracing subscriber, any writer, or a
//! file opened in append mode.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use serde_json::Value;
use tracing::info;

use crate::error::{AuxError, Result};
use crate::logger::format::{inspect, to_plain_string};

// == Log Record ==
/// One call to [`Logger::log`](crate::logger::Logger::log), ready to emit.
#[derive(Debug, Clone)]
pub struct LogRecord<'a> {
    /// RFC 3339 timestamp, present when the logger stores time
    pub time: Option<String>,
    /// Logger id, if configured
    pub id: Option<&'a str>,
    /// The logged value
    pub value: &'a Value,
    /// Resolved inspection depth
    pub depth: usize,
}

impl LogRecord<'_> {
    /// `logTime: ...` line, if time is stored.
    pub fn time_line(&self) -> Option<String> {
        self.time.as_ref().map(|t| format!("logTime: {}", t))
    }

    /// `env ID: ...` line, if an id is set.
    pub fn id_line(&self) -> Option<String> {
        self.id.map(|id| format!("env ID: {}", id))
    }

    /// Body for flat entries: compact JSON when depth > 1, plain text
    /// otherwise.
    pub fn body(&self) -> Result<String> {
        if self.depth > 1 {
            serde_json::to_string(self.value).map_err(|e| AuxError::Log(e.to_string()))
        } else {
            Ok(to_plain_string(self.value))
        }
    }

    /// Full flat entry: time line, id line and body, each newline
    /// terminated. Missing header lines are left empty.
    pub fn to_entry(&self) -> Result<String> {
        Ok(format!(
            "{}\n{}\n{}\n",
            self.time_line().unwrap_or_default(),
            self.id_line().unwrap_or_default(),
            self.body()?
        ))
    }
}

// == Log Sink ==
/// Where a logger sends its records.
pub trait LogSink: Send {
    fn emit(&mut self, record: &LogRecord<'_>) -> Result<()>;
}

impl<F> LogSink for F
where
    F: FnMut(&LogRecord<'_>) -> Result<()> + Send,
{
    fn emit(&mut self, record: &LogRecord<'_>) -> Result<()> {
        self(record)
    }
}

// == Tracing Sink ==
/// Console sink: each line becomes an `info` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn emit(&mut self, record: &LogRecord<'_>) -> Result<()> {
        if let Some(line) = record.time_line() {
            info!(target: "auxil::logger", "{}", line);
        }
        if let Some(line) = record.id_line() {
            info!(target: "auxil::logger", "{}", line);
        }
        info!(target: "auxil::logger", "{}", inspect(record.value, record.depth));
        Ok(())
    }
}

// == Writer Sink ==
/// Appends flat entries to any writer.
#[derive(Debug)]
pub struct WriterSink<W> {
    writer: W,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> LogSink for WriterSink<W> {
    fn emit(&mut self, record: &LogRecord<'_>) -> Result<()> {
        self.writer.write_all(record.to_entry()?.as_bytes())?;
        self.writer.flush()?;
        Ok(())
    }
}

// == File Sink ==
/// Appends flat entries to a file, creating it if needed.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl LogSink for FileSink {
    fn emit(&mut self, record: &LogRecord<'_>) -> Result<()> {
        let entry = record.to_entry()?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(entry.as_bytes())?;
        Ok(())
    }
}
