//! sqd-cache
//!
//! Single-slot, latest-key-wins memoization of background computations.
//!
//! - [`ComputationHandle`] is a one-shot, pollable result cell shared between
//!   the worker that fills it and the dispatcher that reads it.
//! - [`ComputationCache`] tracks at most one `(key, handle)` pair. A new key
//!   supersedes the old pair; the old computation keeps running but its
//!   handle is no longer reachable from the cache ("abandoned", not
//!   cancelled).
//!
//! No eviction, no TTL, no persistence.

mod cache;
mod handle;

pub use cache::{CacheEntry, CacheStats, ComputationCache};
pub use handle::{Completer, ComputationHandle, HandleStatus};
