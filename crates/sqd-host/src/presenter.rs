//! Read-only presentation of the tracked computation.
//!
//! # Invariants
//!
//! - Polling never mutates reconciler state.
//! - A result is shown only while its handle is the one in the cache slot;
//!   abandoned computations are never presented, even once they complete.

use sqd_cache::HandleStatus;
use sqd_model::{Mission, MissionId};
use sqd_reconcile::{Reconciler, Solver, StateSampler};

/// What the result window would render right now.
#[derive(Debug, PartialEq, Eq)]
pub enum View<'a, T> {
    Hidden,
    NoSelection,
    Calculating {
        mission: &'a Mission,
    },
    Ready {
        mission: &'a Mission,
        variant_index: usize,
        result: &'a T,
    },
    /// The worker ended without publishing a result.
    Failed {
        mission: &'a Mission,
    },
}

impl<T> View<'_, T> {
    pub fn label(&self) -> &'static str {
        match self {
            View::Hidden => "hidden",
            View::NoSelection => "no_selection",
            View::Calculating { .. } => "calculating",
            View::Ready { .. } => "ready",
            View::Failed { .. } => "failed",
        }
    }

    pub fn mission(&self) -> Option<&Mission> {
        match self {
            View::Calculating { mission }
            | View::Ready { mission, .. }
            | View::Failed { mission } => Some(mission),
            View::Hidden | View::NoSelection => None,
        }
    }

    pub fn summary(&self) -> ViewSummary {
        ViewSummary {
            label: self.label(),
            mission_id: self.mission().map(|m| m.id),
        }
    }
}

/// Owned, comparable digest of a [`View`], used to log view transitions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewSummary {
    pub label: &'static str,
    pub mission_id: Option<MissionId>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Presenter {
    open: bool,
}

impl Presenter {
    pub fn new(open: bool) -> Self {
        Self { open }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn set_open(&mut self, open: bool) {
        self.open = open;
    }

    /// Flip the window and return the new state.
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    pub fn poll<'a, S, V>(&self, reconciler: &'a Reconciler<S, V>) -> View<'a, V::Output>
    where
        S: StateSampler,
        V: Solver,
    {
        if !self.open {
            return View::Hidden;
        }
        let Some(current) = reconciler.current_result() else {
            return View::NoSelection;
        };
        match reconciler.cache().current() {
            Some(entry) if entry.handle.same_handle(&current.handle) => {}
            _ => return View::NoSelection,
        }

        let mission = &current.mission;
        match current.handle.status() {
            HandleStatus::Pending => View::Calculating { mission },
            HandleStatus::Lost => View::Failed { mission },
            HandleStatus::Completed => match current.handle.result() {
                Some(result) => View::Ready {
                    mission,
                    variant_index: current.variant_index,
                    result,
                },
                None => View::Failed { mission },
            },
        }
    }
}
