//! Scenario: single-slot cache supersede semantics
//!
//! # Invariants under test
//!
//! 1. Two calls with an unchanged key return the same handle and invoke the
//!    factory exactly once.
//! 2. F1 then F2 (F1 ≠ F2) yields a handle for F2; the F1 handle is never
//!    returned by `current()` again, even after it completes.
//! 3. Returning to F1 after F2 starts a fresh computation (single slot, no
//!    history).
//! 4. An abandoned computation still runs to completion; it is ignored,
//!    not cancelled.

use std::cell::Cell;

use sqd_cache::{ComputationCache, ComputationHandle};

#[test]
fn unchanged_key_reuses_handle_and_calls_factory_once() {
    let mut cache: ComputationCache<&'static str, u32> = ComputationCache::new();
    let calls = Cell::new(0u32);
    let factory = || {
        calls.set(calls.get() + 1);
        ComputationHandle::channel().1
    };

    let first = cache.get_or_start("F1", factory);
    let second = cache.get_or_start("F1", || {
        calls.set(calls.get() + 1);
        ComputationHandle::channel().1
    });

    assert_eq!(calls.get(), 1, "factory must run exactly once");
    assert!(first.same_handle(&second));
    assert_eq!(cache.stats().started, 1);
    assert_eq!(cache.stats().reused, 1);
}

#[test]
fn new_key_supersedes_and_old_handle_never_resurfaces() {
    let mut cache: ComputationCache<&'static str, u32> = ComputationCache::new();

    let (f1_completer, f1_handle) = ComputationHandle::channel();
    let h1 = cache.get_or_start("F1", || f1_handle);

    let (f2_completer, f2_handle) = ComputationHandle::channel();
    let h2 = cache.get_or_start("F2", || f2_handle);

    assert!(!h1.same_handle(&h2));
    let current = cache.current().unwrap();
    assert_eq!(current.key, "F2");
    assert!(current.handle.same_handle(&h2));

    // The abandoned F1 computation still finishes...
    assert!(f1_completer.complete(111));
    assert_eq!(h1.result(), Some(&111));

    // ...but the cache never exposes it.
    let current = cache.current().unwrap();
    assert_eq!(current.key, "F2");
    assert!(current.handle.is_pending());
    assert!(!current.handle.same_handle(&h1));

    f2_completer.complete(222);
    assert_eq!(cache.current().unwrap().handle.result(), Some(&222));
    assert_eq!(cache.stats().superseded, 1);
}

#[test]
fn returning_to_previous_key_starts_fresh() {
    let mut cache: ComputationCache<u32, u32> = ComputationCache::new();
    let a1 = cache.get_or_start(1, || ComputationHandle::completed(10));
    let _b = cache.get_or_start(2, || ComputationHandle::completed(20));
    let a2 = cache.get_or_start(1, || ComputationHandle::completed(30));

    assert!(!a1.same_handle(&a2));
    assert_eq!(a2.result(), Some(&30));
    assert_eq!(cache.stats().started, 3);
    assert_eq!(cache.stats().superseded, 2);
}
