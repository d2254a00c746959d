//! Single-slot computation cache.
//!
//! # Invariants
//!
//! - **At most one live key**: the slot holds zero or one `(key, handle)`.
//! - **Equal key → same handle**: `get_or_start` with the stored key returns
//!   the stored handle and never calls the factory.
//! - **Supersede, don't cancel**: a different key overwrites the slot. The
//!   previous computation keeps running; its handle is simply unreachable
//!   from the cache from then on.
//! - `clear` drops the slot without touching running work.
//!
//! Not thread-safe by itself: the owner mutates it from a single dispatch
//! context.

use std::fmt;

use tracing::debug;

use crate::ComputationHandle;

#[derive(Debug)]
pub struct CacheEntry<K, T> {
    pub key: K,
    pub handle: ComputationHandle<T>,
}

/// Counters for observability and tests.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Factory invocations.
    pub started: u64,
    /// Calls that returned the stored handle without starting anything.
    pub reused: u64,
    /// Starts that overwrote an existing entry.
    pub superseded: u64,
}

#[derive(Debug)]
pub struct ComputationCache<K, T> {
    slot: Option<CacheEntry<K, T>>,
    stats: CacheStats,
}

impl<K, T> Default for ComputationCache<K, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, T> ComputationCache<K, T> {
    pub fn new() -> Self {
        Self {
            slot: None,
            stats: CacheStats::default(),
        }
    }

    /// Read-only peek at the live entry.
    pub fn current(&self) -> Option<&CacheEntry<K, T>> {
        self.slot.as_ref()
    }

    /// Drop the slot. Any running computation is left alone.
    pub fn clear(&mut self) {
        self.slot = None;
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}

impl<K: PartialEq + fmt::Display, T> ComputationCache<K, T> {
    /// Return the handle for `key`, starting it with `factory` only if the
    /// slot does not already hold an equal key.
    pub fn get_or_start<F>(&mut self, key: K, factory: F) -> ComputationHandle<T>
    where
        F: FnOnce() -> ComputationHandle<T>,
    {
        if let Some(entry) = &self.slot {
            if entry.key == key {
                self.stats.reused += 1;
                return entry.handle.clone();
            }
        }

        if let Some(old) = self.slot.take() {
            debug!(
                old = %old.key,
                new = %key,
                old_status = ?old.handle.status(),
                "superseding cached computation"
            );
            self.stats.superseded += 1;
        }

        let handle = factory();
        self.stats.started += 1;
        self.slot = Some(CacheEntry {
            key,
            handle: handle.clone(),
        });
        handle
    }
}
