//! Configuration Module
//!
//! Loads the memoizer and logger settings used by the demo binary from
//! environment variables.

use std::env;
use std::path::PathBuf;

use crate::logger::LoggerConfig;
use crate::memo::MemoOptions;

/// Demo configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Memoizer options (entry limit, output cloning)
    pub memo: MemoOptions,
    /// Logger settings
    pub logger: LoggerConfig,
    /// Number of dispatch rounds the demo runs
    pub rounds: usize,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MEMO_LIMIT` - Entry limit; non-numeric or 0 means unbounded (default: 10)
    /// - `MEMO_CLONE` - Clone outputs, `true` or `1` (default: false)
    /// - `DEMO_ROUNDS` - Dispatch rounds (default: 50)
    /// - `LOG_STORE_TIME` - Stamp log records with the time (default: false)
    /// - `LOG_ID` - Id printed with each record (default: none)
    /// - `LOG_DEPTH` - Default inspection depth (default: 0)
    /// - `LOG_FILE` - Append records to this file instead of the console
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let limit = match env::var("MEMO_LIMIT") {
            Ok(v) => v.parse().ok().filter(|limit: &usize| *limit > 0),
            Err(_) => defaults.memo.limit,
        };

        Self {
            memo: MemoOptions {
                limit,
                clone: env_flag("MEMO_CLONE"),
            },
            logger: LoggerConfig {
                store_time: env_flag("LOG_STORE_TIME"),
                id: env::var("LOG_ID").ok().filter(|id| !id.is_empty()),
                default_depth: env::var("LOG_DEPTH")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.logger.default_depth),
                file_path: env::var("LOG_FILE").ok().map(PathBuf::from),
            },
            rounds: env::var("DEMO_ROUNDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.rounds),
        }
    }
}

fn env_flag(name: &str) -> bool {
    env::var(name)
        .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "true" | "1"))
        .unwrap_or(false)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            memo: MemoOptions {
                limit: Some(10),
                clone: false,
            },
            logger: LoggerConfig::default(),
            rounds: 50,
        }
    }
}
