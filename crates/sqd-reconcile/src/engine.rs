//! Reconciler state machine.
//!
//! # Transitions
//!
//! - `MemberListUpdated`: resample the squadron. Unavailable keeps the
//!   previous snapshot and touches nothing else; success replaces the
//!   snapshot wholesale and recomputes.
//! - `CatalogSurfaceOpened`: reset the working mission list to a fresh copy
//!   of the catalog, clear the selection marker, recompute.
//! - `Tick`: a changed selection enters `AwaitingConsistentAttributes` and
//!   recomputes; an unchanged selection recomputes while awaiting it, when
//!   its tracked computation was lost, or when its live reading has drifted
//!   away from the cached variant.
//! - `SessionReset`: drop squadron, result, working list; back to `Idle`.
//!
//! # Recompute
//!
//! Idempotent. Requires a squadron and a non-empty working list, resolves
//! the selected mission, samples the requirement triple and matches it
//! against the mission's variants. Unavailable and no-match are handled
//! identically: park in `AwaitingConsistentAttributes` and stop. A match
//! yields the fingerprint; an equal fingerprint whose computation is
//! pending or completed (for the same squadron snapshot) is left alone.

use std::sync::Arc;

use sqd_cache::{ComputationCache, ComputationHandle, HandleStatus};
use sqd_catalog::Catalog;
use sqd_model::{Attributes, Fingerprint, Mission, MissionId, Sample, SquadronState, Unavailable};
use tracing::{debug, info, warn};

use crate::{
    match_variant, Phase, ReconcileEvent, ReconcilerState, SelectionMarker, Solver, SolverInput,
    StateSampler,
};

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WaitReason {
    Unavailable(Unavailable),
    /// The reading matches no declared variant (UI mid-transition).
    NoVariantMatch { sampled: Attributes },
}

/// What one recompute pass did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecomputeOutcome {
    /// No squadron snapshot yet, or the working mission list is empty.
    MissingPrerequisites,
    NoSelection,
    /// The selected id is not in the working mission list.
    SelectionNotLoaded(MissionId),
    Waiting {
        mission_id: MissionId,
        reason: WaitReason,
    },
    /// The live computation already serves this fingerprint.
    Reused(Fingerprint),
    Started(Fingerprint),
}

/// The single tracked computation and what it was computed for.
/// Replaced, never mutated.
pub struct MissionResult<T> {
    pub mission: Mission,
    pub variant_index: usize,
    pub fingerprint: Fingerprint,
    /// Squadron revision captured by the computation. The revision moves
    /// only when a sample differs from the snapshot it replaces.
    pub squadron_revision: u64,
    pub handle: ComputationHandle<T>,
}

impl<T> Clone for MissionResult<T> {
    fn clone(&self) -> Self {
        Self {
            mission: self.mission.clone(),
            variant_index: self.variant_index,
            fingerprint: self.fingerprint,
            squadron_revision: self.squadron_revision,
            handle: self.handle.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Reconciler
// ---------------------------------------------------------------------------

pub struct Reconciler<S, V: Solver> {
    catalog: Catalog,
    sampler: S,
    solver: Arc<V>,
    runtime: tokio::runtime::Handle,
    state: ReconcilerState,
    squadron: Option<Arc<SquadronState>>,
    squadron_revision: u64,
    working_missions: Vec<Mission>,
    cache: ComputationCache<Fingerprint, V::Output>,
    current: Option<MissionResult<V::Output>>,
}

impl<S: StateSampler, V: Solver> Reconciler<S, V> {
    /// `runtime` is where computations are spawned; the reconciler itself
    /// never awaits.
    pub fn new(catalog: Catalog, sampler: S, solver: Arc<V>, runtime: tokio::runtime::Handle) -> Self {
        Self {
            catalog,
            sampler,
            solver,
            runtime,
            state: ReconcilerState::default(),
            squadron: None,
            squadron_revision: 0,
            working_missions: Vec::new(),
            cache: ComputationCache::new(),
            current: None,
        }
    }

    /// Dispatch one event. Returns the recompute outcome when the event ran one.
    pub fn handle(&mut self, event: ReconcileEvent) -> Option<RecomputeOutcome> {
        match event {
            ReconcileEvent::MemberListUpdated => self.on_member_list_updated(),
            ReconcileEvent::CatalogSurfaceOpened => Some(self.on_catalog_surface_opened()),
            ReconcileEvent::Tick => self.on_tick(),
            ReconcileEvent::SessionReset => {
                self.on_session_reset();
                None
            }
        }
    }

    pub fn on_member_list_updated(&mut self) -> Option<RecomputeOutcome> {
        match self.sampler.try_sample_squadron_state() {
            Sample::Unavailable(why) => {
                warn!(reason = %why, "squadron state unavailable; keeping previous snapshot");
                None
            }
            Sample::Available(snapshot) => {
                if self.squadron.as_deref() != Some(&snapshot) {
                    self.squadron_revision = self.squadron_revision.wrapping_add(1);
                }
                info!(
                    members = snapshot.members().len(),
                    revision = self.squadron_revision,
                    "squadron state updated"
                );
                self.squadron = Some(Arc::new(snapshot));
                Some(self.recompute())
            }
        }
    }

    pub fn on_catalog_surface_opened(&mut self) -> RecomputeOutcome {
        self.working_missions = self.catalog.missions().to_vec();
        self.state.last_selection = SelectionMarker::Cleared;
        info!(
            missions = self.working_missions.len(),
            "catalog surface opened; working mission list reset"
        );
        self.recompute()
    }

    pub fn on_tick(&mut self) -> Option<RecomputeOutcome> {
        let selected = self.sampler.read_selected_mission_id();
        let observed = SelectionMarker::Observed(selected);

        if self.state.last_selection != observed {
            debug!(?selected, previous = ?self.state.last_selection, "selection changed");
            self.state.last_selection = observed;
            self.state.phase = match selected {
                Some(id) => Phase::AwaitingConsistentAttributes(id),
                None => Phase::Idle,
            };
            return Some(self.recompute());
        }

        match (self.state.phase, selected) {
            (Phase::AwaitingConsistentAttributes(waiting), Some(id)) if waiting == id => {
                Some(self.recompute())
            }
            (Phase::Idle, Some(id)) if self.current_lost(id) => {
                debug!(mission_id = id, "tracked computation lost; retrying");
                Some(self.recompute())
            }
            (Phase::Idle, Some(id)) if self.requirement_drifted(id) => {
                debug!(mission_id = id, "requirement reading drifted from cached variant");
                Some(self.recompute())
            }
            _ => None,
        }
    }

    /// `true` when the current result is for `selected` and its worker ended
    /// without publishing.
    fn current_lost(&self, selected: MissionId) -> bool {
        self.current.as_ref().is_some_and(|c| {
            c.fingerprint.mission_id == selected && c.handle.status() == HandleStatus::Lost
        })
    }

    /// `true` when the live reading for the mission behind the current result
    /// is available and no longer equals that result's variant.
    fn requirement_drifted(&self, selected: MissionId) -> bool {
        let Some(current) = &self.current else {
            return false;
        };
        if current.fingerprint.mission_id != selected {
            return false;
        }
        match self.sampler.try_sample_required_attributes() {
            Sample::Available(a) => a != current.fingerprint.variant,
            Sample::Unavailable(_) => false,
        }
    }

    /// Running computations are left alone; only the references are dropped.
    pub fn on_session_reset(&mut self) {
        info!("session reset; clearing squadron and mission state");
        self.squadron = None;
        self.current = None;
        self.cache.clear();
        self.working_missions.clear();
        self.state = ReconcilerState::default();
    }

    pub fn recompute(&mut self) -> RecomputeOutcome {
        let Some(squadron) = self.squadron.clone() else {
            return RecomputeOutcome::MissingPrerequisites;
        };
        if self.working_missions.is_empty() {
            return RecomputeOutcome::MissingPrerequisites;
        }

        let Some(selected_id) = self.sampler.read_selected_mission_id() else {
            return RecomputeOutcome::NoSelection;
        };
        let Some(mission) = self
            .working_missions
            .iter()
            .find(|m| m.id == selected_id)
            .cloned()
        else {
            return RecomputeOutcome::SelectionNotLoaded(selected_id);
        };

        let sampled = match self.sampler.try_sample_required_attributes() {
            Sample::Available(a) => a,
            Sample::Unavailable(why) => {
                return self.wait(selected_id, WaitReason::Unavailable(why));
            }
        };
        let Some(matched) = match_variant(&mission.variants, &sampled) else {
            return self.wait(selected_id, WaitReason::NoVariantMatch { sampled });
        };

        self.state.phase = Phase::Idle;
        let fingerprint = Fingerprint::new(mission.id, matched.attributes);

        if let Some(current) = &self.current {
            if current.fingerprint == fingerprint {
                let same_roster = current.squadron_revision == self.squadron_revision;
                let live = current.handle.status() != HandleStatus::Lost;
                if same_roster && live {
                    return RecomputeOutcome::Reused(fingerprint);
                }
                info!(%fingerprint, same_roster, live, "restarting computation for unchanged fingerprint");
                self.cache.clear();
            }
        }

        let input = SolverInput {
            mission: mission.clone(),
            variant: matched.attributes,
            squadron,
            trainings: self.catalog.trainings_shared(),
        };
        let solver = Arc::clone(&self.solver);
        let runtime = self.runtime.clone();

        let started_before = self.cache.stats().started;
        let handle = self.cache.get_or_start(fingerprint, move || {
            ComputationHandle::spawn(&runtime, async move { solver.calculate(input).await })
        });
        let started = self.cache.stats().started != started_before;

        self.current = Some(MissionResult {
            mission,
            variant_index: matched.index,
            fingerprint,
            squadron_revision: self.squadron_revision,
            handle,
        });

        if started {
            info!(%fingerprint, variant_index = matched.index, "computation started");
            RecomputeOutcome::Started(fingerprint)
        } else {
            RecomputeOutcome::Reused(fingerprint)
        }
    }

    fn wait(&mut self, mission_id: MissionId, reason: WaitReason) -> RecomputeOutcome {
        self.state.phase = Phase::AwaitingConsistentAttributes(mission_id);
        debug!(mission_id, ?reason, "awaiting consistent attributes");
        RecomputeOutcome::Waiting { mission_id, reason }
    }

    // -----------------------------------------------------------------------
    // Read-only views
    // -----------------------------------------------------------------------

    pub fn state(&self) -> ReconcilerState {
        self.state
    }

    pub fn squadron(&self) -> Option<&SquadronState> {
        self.squadron.as_deref()
    }

    pub fn squadron_revision(&self) -> u64 {
        self.squadron_revision
    }

    pub fn working_missions(&self) -> &[Mission] {
        &self.working_missions
    }

    pub fn current_result(&self) -> Option<&MissionResult<V::Output>> {
        self.current.as_ref()
    }

    pub fn cache(&self) -> &ComputationCache<Fingerprint, V::Output> {
        &self.cache
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn sampler(&self) -> &S {
        &self.sampler
    }

    pub fn sampler_mut(&mut self) -> &mut S {
        &mut self.sampler
    }
}
