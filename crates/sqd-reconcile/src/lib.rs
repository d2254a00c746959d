//! sqd-reconcile
//!
//! Reconciliation engine: turns noisy, asynchronously-updated external
//! readings into at most one live background computation.
//!
//! Architectural decisions:
//! - Events arrive serially on one dispatch context; the [`Reconciler`]
//!   owns all of its state and needs no locking.
//! - A required-attribute reading is acted on only when it matches one of
//!   the selected mission's declared variants. Anything else (unavailable,
//!   mid-animation, half-updated) parks the machine in
//!   `AwaitingConsistentAttributes` and the next tick retries.
//! - Computations run on independent tasks via [`sqd_cache`]; superseded
//!   work is abandoned, never cancelled.
//!
//! The external sampler and solver are traits; this crate does no IO.

mod engine;
mod ports;
mod state;
mod variant;

pub use engine::{MissionResult, Reconciler, RecomputeOutcome, WaitReason};
pub use ports::{SolverInput, Solver, StateSampler};
pub use state::{Phase, ReconcileEvent, ReconcilerState, SelectionMarker};
pub use variant::{match_variant, VariantMatch};
