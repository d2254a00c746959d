//! sqd-testkit
//!
//! Test doubles and fixtures for the reconciliation engine.
//!
//! - [`FakeSampler`]: settable sampler that counts requirement reads.
//! - [`InstantSolver`], [`GatedSolver`], [`PanickingSolver`]: solvers whose
//!   output is the computation's own fingerprint, so tests can tell which
//!   computation a surfaced result came from.
//! - Catalog / squadron fixtures and an async polling helper.

mod fixtures;
mod sampler;
mod solvers;

pub use fixtures::{fixture_catalog, mission_15, squadron_of, wait_until, MISSION_15_VARIANTS};
pub use sampler::FakeSampler;
pub use solvers::{GatedSolver, InstantSolver, PanickingSolver};
