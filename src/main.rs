//! Auxil demo
//!
//! Memoizes a Fibonacci function over a caller-owned cache, drives it
//! through a value dispatcher, and logs every result.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use auxil::{CacheStore, CaseOf, Config, Logger, MemoConfig, MemoizedInvoker};

/// Main entry point for the auxil demo.
///
/// # Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Build the logger and the memoized Fibonacci over a shared cache
/// 4. Dispatch random rounds between small inputs, large inputs and a default
/// 5. Log the cache contents and statistics
fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "auxil=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting auxil demo v{}", auxil::version());

    let config = Config::from_env();
    info!(
        "Configuration loaded: limit={:?}, clone={}, rounds={}",
        config.memo.limit, config.memo.clone, config.rounds
    );

    let logger = Arc::new(Logger::new(config.logger.clone()));

    let cache = CacheStore::new();
    let fib = MemoizedInvoker::new(
        fibonacci,
        MemoConfig::new()
            .cache(cache.clone())
            .apply_options(&config.memo),
    )
    .context("invalid memo configuration")?
    .into_shared();

    let samples = Arc::new(AtomicU64::new(seed()));

    let small = {
        let (fib, logger, samples) = (fib.clone(), Arc::clone(&logger), Arc::clone(&samples));
        move || -> auxil::Result<()> {
            let n = next_sample(&samples) % 10;
            let value = fib.invoke(n)?;
            logger.log(&format!("fibonacci({}): {}", n, value), None)?;
            Ok(())
        }
    };
    let large = {
        let (fib, logger, samples) = (fib.clone(), Arc::clone(&logger), Arc::clone(&samples));
        move || -> auxil::Result<()> {
            let n = next_sample(&samples) % 50;
            let value = fib.invoke(n)?;
            logger.log(&format!("fibonacci({}): {}", n, value), None)?;
            Ok(())
        }
    };
    let fallback = {
        let logger = Arc::clone(&logger);
        move || -> auxil::Result<()> {
            logger.log("default", None)?;
            Ok(())
        }
    };

    let cases = CaseOf::new()
        .case(1u64, small)
        .case(2u64, large)
        .default_case(fallback);

    for _ in 0..config.rounds {
        let choice = next_sample(&samples) % 3;
        cases.dispatch(&choice)??;
    }

    let contents: BTreeMap<String, u64> = cache
        .snapshot()
        .into_iter()
        .map(|(key, value)| (key, *value))
        .collect();
    logger.log(
        &format!(
            "logging cache for fibonacci: {}",
            serde_json::to_string(&contents)?
        ),
        None,
    )?;
    logger.log(&fib.stats(), Some(2))?;

    info!("Demo complete");
    Ok(())
}

fn fibonacci(n: u64) -> u64 {
    let (mut a, mut b) = (1u64, 1u64);
    for _ in 1..n {
        let next = a.saturating_add(b);
        a = b;
        b = next;
    }
    b
}

fn seed() -> u64 {
    chrono::Utc::now()
        .timestamp_nanos_opt()
        .map(|nanos| nanos as u64)
        .unwrap_or(0x2545_f491_4f6c_dd1d)
}

/// xorshift64 step over a shared state
fn next_sample(state: &AtomicU64) -> u64 {
    let mut x = state.load(Ordering::Relaxed) | 1;
    x ^= x << 13;
    x ^= x >> 7;
    x ^= x << 17;
    state.store(x, Ordering::Relaxed);
    x
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fibonacci() {
        let values: Vec<u64> = (0..7).map(fibonacci).collect();
        assert_eq!(values, vec![1, 1, 2, 3, 5, 8, 13]);
    }

    #[test]
    fn test_next_sample_moves() {
        let state = AtomicU64::new(42);
        let a = next_sample(&state);
        let b = next_sample(&state);
        assert_ne!(a, b);
    }
}
