//! Logger Module
//!
//! A logger factory: time and id stamping, a default inspection depth, a
//! debug switch, and pluggable sinks (console through tracing, writers,
//! files, or any closure).

mod factory;
pub mod format;
mod sink;

// Re-export public types
pub use factory::{Logger, LoggerConfig};
pub use format::{inspect, to_plain_string};
pub use sink::{FileSink, LogRecord, LogSink, TracingSink, WriterSink};
