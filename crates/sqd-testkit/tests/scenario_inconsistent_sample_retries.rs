//! Scenario: unavailable and inconsistent readings park and retry
//!
//! # Invariants under test
//!
//! 1. A hidden surface parks the machine in AwaitingConsistentAttributes
//!    for the selected mission; every tick retries.
//! 2. A reading that matches no variant is handled exactly like an
//!    unavailable one.
//! 3. (0,0,0) is inconsistent unless the mission declares a (0,0,0) variant
//!    and the sampler reports it as available.
//! 4. Switching selection while awaiting moves the wait to the new mission.
//! 5. Nothing is computed until a reading matches.

use std::sync::Arc;

use sqd_model::{Attributes, Fingerprint, Unavailable};
use sqd_reconcile::{Phase, ReconcileEvent, Reconciler, RecomputeOutcome, WaitReason};
use sqd_testkit::{fixture_catalog, squadron_of, FakeSampler, InstantSolver, MISSION_15_VARIANTS};

fn opened(solver: Arc<InstantSolver>) -> Reconciler<FakeSampler, InstantSolver> {
    let mut r = Reconciler::new(
        fixture_catalog(),
        FakeSampler::new().with_squadron(squadron_of(5)),
        solver,
        tokio::runtime::Handle::current(),
    );
    r.handle(ReconcileEvent::MemberListUpdated);
    r.handle(ReconcileEvent::CatalogSurfaceOpened);
    r
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn unavailable_then_mismatch_then_match() {
    let solver = Arc::new(InstantSolver::default());
    let mut r = opened(Arc::clone(&solver));

    r.sampler_mut().select(Some(15));
    r.sampler_mut().hide(Unavailable::NotVisible);
    assert_eq!(
        r.handle(ReconcileEvent::Tick),
        Some(RecomputeOutcome::Waiting {
            mission_id: 15,
            reason: WaitReason::Unavailable(Unavailable::NotVisible),
        })
    );
    assert_eq!(r.state().phase, Phase::AwaitingConsistentAttributes(15));

    // Retry on the next tick, still unavailable.
    let reads = r.sampler().attribute_reads();
    assert!(matches!(
        r.handle(ReconcileEvent::Tick),
        Some(RecomputeOutcome::Waiting { mission_id: 15, .. })
    ));
    assert_eq!(r.sampler().attribute_reads(), reads + 1);

    // Mid-animation value that matches no variant.
    let bogus = Attributes::new(215, 195, 161);
    r.sampler_mut().show(bogus);
    assert_eq!(
        r.handle(ReconcileEvent::Tick),
        Some(RecomputeOutcome::Waiting {
            mission_id: 15,
            reason: WaitReason::NoVariantMatch { sampled: bogus },
        })
    );
    assert!(r.current_result().is_none());

    // Settled.
    r.sampler_mut().show(MISSION_15_VARIANTS[1]);
    assert_eq!(
        r.handle(ReconcileEvent::Tick),
        Some(RecomputeOutcome::Started(Fingerprint::new(15, MISSION_15_VARIANTS[1])))
    );
    assert_eq!(r.state().phase, Phase::Idle);
    assert_eq!(r.cache().stats().started, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn zero_reading_is_inconsistent_unless_declared() {
    let solver = Arc::new(InstantSolver::default());
    let mut r = opened(Arc::clone(&solver));

    r.sampler_mut().select(Some(15));
    r.sampler_mut().show(Attributes::ZERO);
    assert!(matches!(
        r.handle(ReconcileEvent::Tick),
        Some(RecomputeOutcome::Waiting {
            mission_id: 15,
            reason: WaitReason::NoVariantMatch { .. },
        })
    ));
    assert!(r.cache().current().is_none());

    // Mission 34 genuinely declares (0,0,0) at index 1.
    r.sampler_mut().select(Some(34));
    assert_eq!(
        r.handle(ReconcileEvent::Tick),
        Some(RecomputeOutcome::Started(Fingerprint::new(34, Attributes::ZERO)))
    );
    assert_eq!(r.current_result().unwrap().variant_index, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn selection_change_moves_the_wait() {
    let solver = Arc::new(InstantSolver::default());
    let mut r = opened(Arc::clone(&solver));

    r.sampler_mut().select(Some(15));
    r.sampler_mut().hide(Unavailable::NoReadableDigits);
    r.handle(ReconcileEvent::Tick);
    assert!(r.state().is_awaiting(15));

    r.sampler_mut().select(Some(3));
    r.handle(ReconcileEvent::Tick);
    assert!(r.state().is_awaiting(3));
    assert!(!r.state().is_awaiting(15));

    r.sampler_mut().show(Attributes::new(100, 80, 60));
    assert_eq!(
        r.handle(ReconcileEvent::Tick),
        Some(RecomputeOutcome::Started(Fingerprint::new(3, Attributes::new(100, 80, 60))))
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn selection_outside_working_list_is_a_noop() {
    let solver = Arc::new(InstantSolver::default());
    let mut r = opened(Arc::clone(&solver));

    r.sampler_mut().select(Some(99));
    r.sampler_mut().show(MISSION_15_VARIANTS[0]);
    assert_eq!(
        r.handle(ReconcileEvent::Tick),
        Some(RecomputeOutcome::SelectionNotLoaded(99))
    );
    // The selection change itself still marks the mission as awaited.
    assert!(r.state().is_awaiting(99));
    assert!(r.cache().current().is_none());
    assert_eq!(solver.calls(), 0);
}
