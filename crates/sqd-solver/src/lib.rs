//! sqd-solver
//!
//! Reference party solver. Picks the group of members whose summed
//! attributes plus the squadron bonus best cover a mission variant, then
//! greedily plans bonus trainings to close any remaining gap.
//!
//! The optimisation quality here is deliberately simple; the engine only
//! depends on the [`sqd_reconcile::Solver`] contract.

mod party;

use std::fmt;

use async_trait::async_trait;
use serde::Serialize;
use sqd_model::{Attributes, MissionId};
use sqd_reconcile::{Solver, SolverInput};
use tracing::debug;

pub use party::{combinations, plan_trainings, rank_parties, PartyPlan, TrainingPlan};

pub const DEFAULT_PARTY_SIZE: usize = 4;
pub const DEFAULT_MAX_TRAINING_SESSIONS: usize = 3;
pub const DEFAULT_MAX_CANDIDATES: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolverError {
    /// The squadron snapshot has no members to choose from.
    NoMembers,
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoMembers => write!(f, "squadron has no members"),
        }
    }
}

impl std::error::Error for SolverError {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalculationResults {
    pub mission_id: MissionId,
    pub required: Attributes,
    /// Best parties first.
    pub parties: Vec<PartyPlan>,
    /// Training plan for the best party; empty when it already covers.
    pub training: TrainingPlan,
}

impl CalculationResults {
    pub fn best(&self) -> Option<&PartyPlan> {
        self.parties.first()
    }

    /// `true` when the best party covers the requirement after training.
    pub fn is_feasible(&self) -> bool {
        self.training.deficit_after.is_zero()
    }
}

#[derive(Debug, Clone)]
pub struct PartySolver {
    pub party_size: usize,
    pub max_training_sessions: usize,
    pub max_candidates: usize,
}

impl Default for PartySolver {
    fn default() -> Self {
        Self {
            party_size: DEFAULT_PARTY_SIZE,
            max_training_sessions: DEFAULT_MAX_TRAINING_SESSIONS,
            max_candidates: DEFAULT_MAX_CANDIDATES,
        }
    }
}

impl PartySolver {
    pub fn solve(&self, input: &SolverInput) -> Result<CalculationResults, SolverError> {
        let members = input.squadron.members();
        if members.is_empty() {
            return Err(SolverError::NoMembers);
        }
        let bonus = input.squadron.bonus;

        let mut parties = rank_parties(members, bonus.attributes, &input.variant, self.party_size);
        parties.truncate(self.max_candidates.max(1));

        let training = match parties.first() {
            Some(best) => plan_trainings(
                best,
                bonus,
                &input.variant,
                &input.trainings,
                self.max_training_sessions,
            ),
            None => TrainingPlan::default(),
        };

        debug!(
            mission_id = input.mission.id,
            candidates = parties.len(),
            sessions = training.sessions.len(),
            "party solve finished"
        );

        Ok(CalculationResults {
            mission_id: input.mission.id,
            required: input.variant,
            parties,
            training,
        })
    }
}

#[async_trait]
impl Solver for PartySolver {
    type Output = Result<CalculationResults, SolverError>;

    async fn calculate(&self, input: SolverInput) -> Self::Output {
        self.solve(&input)
    }
}
