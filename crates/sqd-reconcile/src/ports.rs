//! Boundary contracts consumed by the reconciler.

use std::sync::Arc;

use async_trait::async_trait;
use sqd_model::{Attributes, Mission, MissionId, Sample, SquadronState, Training};

/// Trusted capability that turns opaque live state into typed snapshots.
///
/// Every method may be called at any rate and must not block. Failures are
/// expected transient states reported as [`Sample::Unavailable`], never panics.
pub trait StateSampler {
    /// Complete squadron snapshot, or Unavailable when the source is not loaded.
    fn try_sample_squadron_state(&self) -> Sample<SquadronState>;

    /// Requirement triple currently shown on the mission surface.
    fn try_sample_required_attributes(&self) -> Sample<Attributes>;

    fn read_selected_mission_id(&self) -> Option<MissionId>;
}

/// Inputs captured for one computation. Immutable from the moment the
/// computation starts.
#[derive(Clone, Debug)]
pub struct SolverInput {
    pub mission: Mission,
    pub variant: Attributes,
    pub squadron: Arc<SquadronState>,
    pub trainings: Arc<Vec<Training>>,
}

/// External optimisation step. Runs on a worker task, never on the
/// dispatch context. Failure reporting is part of `Output`.
#[async_trait]
pub trait Solver: Send + Sync + 'static {
    type Output: Send + Sync + 'static;

    async fn calculate(&self, input: SolverInput) -> Self::Output;
}
