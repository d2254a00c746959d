//! sqd-model
//!
//! Shared domain types for the squadron reconciliation engine.
//!
//! - Attribute triples and mission variants
//! - Catalog rows (missions, trainings)
//! - Squadron snapshots rebuilt wholesale on every successful sample
//! - The computation fingerprint `(mission id, matched variant)`
//! - The typed `Sample` outcome returned by every external sampler
//!
//! Pure data. No IO, no async.

mod attributes;
mod fingerprint;
mod mission;
mod sample;
mod squadron;

pub use attributes::{AttributeDelta, Attributes};
pub use fingerprint::Fingerprint;
pub use mission::{is_flagged_mission_id, Mission, MissionId, Training, FLAGGED_MISSION_IDS};
pub use sample::{Sample, Unavailable};
pub use squadron::{BonusAttributes, Race, SquadronMember, SquadronState, MAX_MEMBERS};
