//! Scenario: empty mission catalog
//!
//! # Invariants under test
//!
//! 1. With an empty catalog every event is a no-op: no computation starts
//!    and the solver is never called.
//! 2. The squadron snapshot is still accepted so that a later session with
//!    data behaves normally.

use std::sync::Arc;

use sqd_catalog::Catalog;
use sqd_reconcile::{ReconcileEvent, Reconciler, RecomputeOutcome};
use sqd_testkit::{squadron_of, FakeSampler, InstantSolver, MISSION_15_VARIANTS};

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn every_event_is_a_noop_without_missions() {
    let solver = Arc::new(InstantSolver::default());
    let mut sampler = FakeSampler::new().with_squadron(squadron_of(3));
    sampler.select(Some(15));
    sampler.show(MISSION_15_VARIANTS[0]);

    let mut r = Reconciler::new(
        Catalog::empty(),
        sampler,
        Arc::clone(&solver),
        tokio::runtime::Handle::current(),
    );

    let events = [
        ReconcileEvent::MemberListUpdated,
        ReconcileEvent::CatalogSurfaceOpened,
        ReconcileEvent::Tick,
        ReconcileEvent::Tick,
        ReconcileEvent::CatalogSurfaceOpened,
        ReconcileEvent::MemberListUpdated,
        ReconcileEvent::SessionReset,
        ReconcileEvent::Tick,
    ];
    for event in events {
        let outcome = r.handle(event);
        assert!(
            matches!(outcome, None | Some(RecomputeOutcome::MissingPrerequisites)),
            "{event:?} produced {outcome:?}"
        );
    }

    assert!(r.working_missions().is_empty());
    assert!(r.current_result().is_none());
    assert_eq!(r.cache().stats().started, 0);

    tokio::task::yield_now().await;
    assert_eq!(solver.calls(), 0);
    // Requirement readings are never even taken.
    assert_eq!(r.sampler().attribute_reads(), 0);
}
