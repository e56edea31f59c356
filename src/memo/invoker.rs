//! Memoized Invoker Module
//!
//! Wraps a function with a cache: derives a key from the arguments, serves
//! stored results, stores fresh ones until the size limit is reached and
//! then passes calls straight through.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{AuxError, BoxError, Result};
use crate::memo::{CacheStore, KeyDeriver, MemoConfig, MemoStats, ResultCloner};

type WrappedFn<A, V> = Box<dyn FnMut(A) -> std::result::Result<V, BoxError> + Send>;

// == Cache State ==
/// Whether the invoker still stores new results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CacheState {
    /// Misses are computed and stored
    Caching,
    /// The limit was reached; misses are computed and returned uncached.
    /// Terminal.
    Passthrough,
}

// == Memoized Invoker ==
/// A function wrapped with a bounded, append-only cache.
///
/// Results are handed out as `Arc<V>`. Without cloning the `Arc` aliases
/// the cached value; with cloning each call gets a fresh copy that the
/// caller owns outright (`Arc::get_mut` succeeds on it).
pub struct MemoizedInvoker<A, V> {
    func: WrappedFn<A, V>,
    key_deriver: Box<dyn KeyDeriver<A>>,
    cache: CacheStore<V>,
    cloner: Option<Box<dyn ResultCloner<V>>>,
    limit: Option<usize>,
    /// Entries this invoker actually inserted; keys seeded by other
    /// handles first are not counted
    entry_count: usize,
    state: CacheState,
    stats: MemoStats,
}

impl<A: 'static, V: 'static> MemoizedInvoker<A, V> {
    // == Constructor ==
    /// Wraps an infallible function.
    ///
    /// Fails with [`AuxError::InvalidConfig`] if the configuration is
    /// rejected.
    pub fn new<F>(mut func: F, config: MemoConfig<A, V>) -> Result<Self>
    where
        F: FnMut(A) -> V + Send + 'static,
    {
        config.validate()?;
        let func: WrappedFn<A, V> =
            Box::new(move |args: A| -> std::result::Result<V, BoxError> { Ok(func(args)) });
        Ok(Self::assemble(func, config))
    }

    /// Wraps a fallible function. Its errors are returned as
    /// [`AuxError::Invocation`] and never cached.
    pub fn try_new<F, E>(mut func: F, config: MemoConfig<A, V>) -> Result<Self>
    where
        F: FnMut(A) -> std::result::Result<V, E> + Send + 'static,
        E: Into<BoxError>,
    {
        config.validate()?;
        let func: WrappedFn<A, V> = Box::new(move |args: A| -> std::result::Result<V, BoxError> {
            func(args).map_err(Into::into)
        });
        Ok(Self::assemble(func, config))
    }

    fn assemble(func: WrappedFn<A, V>, config: MemoConfig<A, V>) -> Self {
        Self {
            func,
            key_deriver: config.key_deriver,
            cache: config.cache.unwrap_or_default(),
            cloner: config.cloner,
            limit: config.limit,
            entry_count: 0,
            state: CacheState::Caching,
            stats: MemoStats::new(),
        }
    }

    // == Invoke ==
    /// Calls the wrapped function through the cache.
    ///
    /// Key derivation, clone and wrapped-function failures propagate
    /// unchanged. A failed call stores nothing.
    pub fn invoke(&mut self, args: A) -> Result<Arc<V>> {
        let key = self.key_deriver.derive(&args)?;

        if let Some(stored) = self.cache.lookup(&key) {
            self.stats.record_hit();
            debug!(key = %key, "memo hit");
            return self.output(stored);
        }

        match self.state {
            CacheState::Caching => {
                let value = self.call(args)?;
                let (stored, inserted) = self.cache.store(key.clone(), value);
                self.stats.record_miss();
                if !inserted {
                    debug!(key = %key, "memo miss, key seeded concurrently");
                    return self.output(stored);
                }
                self.entry_count += 1;
                debug!(key = %key, entries = self.entry_count, "memo miss stored");

                if let Some(limit) = self.limit {
                    if self.entry_count >= limit {
                        self.state = CacheState::Passthrough;
                        info!(limit, "memo cache limit reached, passing calls through");
                    }
                }

                self.output(stored)
            }
            CacheState::Passthrough => {
                self.stats.record_passthrough();
                debug!(key = %key, "memo passthrough");
                self.call(args).map(Arc::new)
            }
        }
    }

    fn call(&mut self, args: A) -> Result<V> {
        (self.func)(args).map_err(|e| {
            warn!(error = %e, "wrapped function failed");
            AuxError::Invocation(e)
        })
    }

    fn output(&self, stored: Arc<V>) -> Result<Arc<V>> {
        match &self.cloner {
            Some(cloner) => cloner.clone_value(&stored).map(Arc::new),
            None => Ok(stored),
        }
    }

    /// Moves the invoker behind a mutex so it can be called from several
    /// threads. Each call holds the lock from lookup to store.
    ///
    /// The shared invoker is not re-entrant: a wrapped function that calls
    /// back into the same `SharedInvoker` (a memoized recursive function,
    /// say) deadlocks on the lock it is already holding.
    pub fn into_shared(self) -> SharedInvoker<A, V> {
        SharedInvoker {
            inner: Arc::new(Mutex::new(self)),
        }
    }
}

impl<A, V> MemoizedInvoker<A, V> {
    // == Accessors ==
    pub fn state(&self) -> CacheState {
        self.state
    }

    /// Returns true while new results are still being stored.
    pub fn is_caching(&self) -> bool {
        self.state == CacheState::Caching
    }

    /// Number of entries this invoker has inserted into its store.
    pub fn entry_count(&self) -> usize {
        self.entry_count
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Returns a handle sharing this invoker's store.
    pub fn cache(&self) -> CacheStore<V> {
        self.cache.clone()
    }

    /// Returns the call counters, with `stored_entries` taken from the
    /// entry count.
    pub fn stats(&self) -> MemoStats {
        let mut stats = self.stats.clone();
        stats.set_stored_entries(self.entry_count);
        stats
    }
}

impl<A, V> fmt::Debug for MemoizedInvoker<A, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoizedInvoker")
            .field("state", &self.state)
            .field("entry_count", &self.entry_count)
            .field("limit", &self.limit)
            .field("cloning", &self.cloner.is_some())
            .field("cache", &self.cache)
            .finish()
    }
}

// == Memoize ==
/// Wraps `func` with the default configuration.
pub fn memoize<A, V, F>(func: F) -> MemoizedInvoker<A, V>
where
    A: Serialize + 'static,
    V: 'static,
    F: FnMut(A) -> V + Send + 'static,
{
    let mut func = func;
    let wrapped: WrappedFn<A, V> =
        Box::new(move |args: A| -> std::result::Result<V, BoxError> { Ok(func(args)) });
    MemoizedInvoker::assemble(wrapped, MemoConfig::new())
}

// == Shared Invoker ==
/// Thread-safe handle to a memoized invoker.
pub struct SharedInvoker<A, V> {
    inner: Arc<Mutex<MemoizedInvoker<A, V>>>,
}

impl<A: 'static, V: 'static> SharedInvoker<A, V> {
    /// Calls through the cache while holding the invoker's lock.
    ///
    /// Not re-entrant: calling this from inside the wrapped function of the
    /// same invoker deadlocks.
    pub fn invoke(&self, args: A) -> Result<Arc<V>> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .invoke(args)
    }

    pub fn stats(&self) -> MemoStats {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .stats()
    }

    pub fn cache(&self) -> CacheStore<V> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .cache()
    }
}

impl<A, V> Clone for SharedInvoker<A, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}
