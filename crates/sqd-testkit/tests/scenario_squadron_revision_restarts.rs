//! Scenario: same fingerprint, different inputs
//!
//! # Invariants under test
//!
//! 1. A changed roster under an unchanged fingerprint restarts the
//!    computation; the old handle is abandoned, not cancelled.
//! 2. A member-list update carrying an identical roster reuses the live
//!    computation.
//! 3. Reopening the catalog surface while a computation is pending reuses it.
//! 4. A computation whose worker died (handle `Lost`) is restarted by the
//!    next recompute for the same fingerprint.
//! 5. With the machine idle and selection and reading unchanged, a tick
//!    alone restarts a lost computation.

use std::sync::Arc;
use std::time::Duration;

use sqd_cache::HandleStatus;
use sqd_model::{Fingerprint, Sample};
use sqd_reconcile::{Phase, ReconcileEvent, Reconciler, RecomputeOutcome};
use sqd_testkit::{
    fixture_catalog, squadron_of, wait_until, FakeSampler, GatedSolver, PanickingSolver,
    MISSION_15_VARIANTS,
};

fn selecting_15() -> FakeSampler {
    let mut sampler = FakeSampler::new().with_squadron(squadron_of(4));
    sampler.select(Some(15));
    sampler.show(MISSION_15_VARIANTS[0]);
    sampler
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn roster_change_restarts_identical_roster_reuses() {
    let solver = Arc::new(GatedSolver::default());
    let mut r = Reconciler::new(
        fixture_catalog(),
        selecting_15(),
        Arc::clone(&solver),
        tokio::runtime::Handle::current(),
    );
    let fp = Fingerprint::new(15, MISSION_15_VARIANTS[0]);

    r.handle(ReconcileEvent::MemberListUpdated);
    assert_eq!(
        r.handle(ReconcileEvent::CatalogSurfaceOpened),
        Some(RecomputeOutcome::Started(fp))
    );
    let first = r.current_result().unwrap().handle.clone();
    assert_eq!(r.squadron_revision(), 1);

    // Identical roster: revision holds, computation reused.
    assert_eq!(
        r.handle(ReconcileEvent::MemberListUpdated),
        Some(RecomputeOutcome::Reused(fp))
    );
    assert_eq!(r.squadron_revision(), 1);

    // Reopening while pending.
    assert_eq!(
        r.handle(ReconcileEvent::CatalogSurfaceOpened),
        Some(RecomputeOutcome::Reused(fp))
    );
    assert!(r.current_result().unwrap().handle.same_handle(&first));

    // New recruit.
    r.sampler_mut().squadron = Sample::Available(squadron_of(5));
    assert_eq!(
        r.handle(ReconcileEvent::MemberListUpdated),
        Some(RecomputeOutcome::Started(fp))
    );
    assert_eq!(r.squadron_revision(), 2);
    let second = r.current_result().unwrap().handle.clone();
    assert!(!second.same_handle(&first));
    assert_eq!(r.current_result().unwrap().squadron_revision, 2);
    assert_eq!(r.cache().stats().started, 2);

    // The abandoned computation still runs to completion.
    solver.release(2);
    assert!(wait_until(Duration::from_secs(2), || first.is_completed() && second.is_completed()).await);
    assert_eq!(solver.calls(), 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn lost_computation_restarts_on_reopen() {
    let solver = Arc::new(PanickingSolver::default());
    let mut r = Reconciler::new(
        fixture_catalog(),
        selecting_15(),
        Arc::clone(&solver),
        tokio::runtime::Handle::current(),
    );

    r.handle(ReconcileEvent::MemberListUpdated);
    assert!(matches!(
        r.handle(ReconcileEvent::CatalogSurfaceOpened),
        Some(RecomputeOutcome::Started(_))
    ));
    let first = r.current_result().unwrap().handle.clone();
    assert!(wait_until(Duration::from_secs(2), || first.status() == HandleStatus::Lost).await);
    assert!(first.result().is_none());

    assert!(matches!(
        r.handle(ReconcileEvent::CatalogSurfaceOpened),
        Some(RecomputeOutcome::Started(_))
    ));
    assert!(!r.current_result().unwrap().handle.same_handle(&first));
    assert!(wait_until(Duration::from_secs(2), || solver.calls() == 2).await);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn lost_computation_restarts_on_plain_tick() {
    let solver = Arc::new(PanickingSolver::default());
    let mut r = Reconciler::new(
        fixture_catalog(),
        selecting_15(),
        Arc::clone(&solver),
        tokio::runtime::Handle::current(),
    );

    r.handle(ReconcileEvent::MemberListUpdated);
    r.handle(ReconcileEvent::CatalogSurfaceOpened);
    // Observe the selection so later ticks see it unchanged.
    r.handle(ReconcileEvent::Tick);
    assert_eq!(r.state().phase, Phase::Idle);

    let lost = r.current_result().unwrap().handle.clone();
    assert!(wait_until(Duration::from_secs(2), || lost.status() == HandleStatus::Lost).await);
    let calls = solver.calls();

    assert_eq!(
        r.handle(ReconcileEvent::Tick),
        Some(RecomputeOutcome::Started(Fingerprint::new(15, MISSION_15_VARIANTS[0])))
    );
    assert!(!r.current_result().unwrap().handle.same_handle(&lost));
    assert!(wait_until(Duration::from_secs(2), || solver.calls() > calls).await);
}
