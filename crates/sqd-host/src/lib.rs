//! sqd-host
//!
//! Process shell around the reconciliation engine.
//!
//! - [`Dispatcher`]: one tokio task owns the [`sqd_reconcile::Reconciler`]
//!   and applies [`HostMessage`]s strictly in arrival order.
//! - [`spawn_tick_source`]: periodic `Tick` events on an interval.
//! - [`CommandRouter`]: slash commands that toggle the result window.
//! - [`Presenter`]: read-only view over the tracked computation.
//! - [`ScriptedSampler`] / [`Script`]: replayable external readings, with
//!   requirement text rendered into a node graph and read back through the
//!   digit scanner.
//! - [`run_scripted_session`]: wires all of the above for the `sqd` binary.

mod command;
mod dispatcher;
mod presenter;
mod sampler;
mod script;
mod session;

pub use command::{CommandOutcome, CommandRouter, TOGGLE_COMMANDS};
pub use dispatcher::{spawn_dispatcher, spawn_tick_source, DispatchReport, Dispatcher, HostMessage};
pub use presenter::{Presenter, View, ViewSummary};
pub use sampler::{LiveReadings, RequirementSurface, ScriptedSampler, SharedReadings};
pub use script::{
    load_script, parse_script, Frame, RequirementText, Script, ScriptError, ScriptEvent,
    ScriptMember, ScriptSquadron,
};
pub use session::{play_script, run_scripted_session, settle, SessionOptions};
