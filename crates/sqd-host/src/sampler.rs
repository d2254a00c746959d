//! Sampler over replayed readings.
//!
//! The readings live behind a shared lock: the script player writes them,
//! the dispatcher task samples them. Requirement text is rendered into a
//! [`NodeGraph`] shaped like the mission surface (label node, value node,
//! and a back link that closes a cycle) and read through the digit scanner,
//! so replay exercises the same read path as a live surface.

use std::sync::{Arc, Mutex, MutexGuard};

use sqd_model::{Attributes, MissionId, Sample, SquadronState, Unavailable, MAX_MEMBERS};
use sqd_reconcile::StateSampler;
use sqd_scan::{read_required_attributes, AttributeRoots, NodeGraph, NodeId};
use tracing::debug;

use crate::{Frame, RequirementText};

#[derive(Clone, Debug)]
pub struct RequirementSurface {
    graph: NodeGraph,
    roots: AttributeRoots<NodeId>,
}

impl Default for RequirementSurface {
    fn default() -> Self {
        Self {
            graph: NodeGraph::new(),
            roots: AttributeRoots {
                physical: None,
                mental: None,
                tactical: None,
            },
        }
    }
}

impl RequirementSurface {
    pub fn render(text: &RequirementText) -> Self {
        let mut graph = NodeGraph::new();
        let physical = render_component(&mut graph, "Physical", text.physical.as_deref());
        let mental = render_component(&mut graph, "Mental", text.mental.as_deref());
        let tactical = render_component(&mut graph, "Tactical", text.tactical.as_deref());
        Self {
            graph,
            roots: AttributeRoots {
                physical,
                mental,
                tactical,
            },
        }
    }

    pub fn read(&self, visible: bool) -> Sample<Attributes> {
        read_required_attributes(&self.graph, visible, &self.roots)
    }
}

fn render_component(graph: &mut NodeGraph, label: &str, value: Option<&str>) -> Option<NodeId> {
    let value = value?;
    let root = graph.add_node(None);
    let label = graph.add_node(Some(label));
    let value = graph.add_node(Some(value));
    graph.set_child(root, label);
    graph.set_next_sibling(label, value);
    graph.set_prev_sibling(value, label);
    Some(root)
}

/// Everything an external source would expose at one instant.
#[derive(Clone, Debug)]
pub struct LiveReadings {
    pub squadron: Sample<SquadronState>,
    pub selected: Option<MissionId>,
    pub visible: bool,
    pub surface: RequirementSurface,
}

impl Default for LiveReadings {
    fn default() -> Self {
        Self {
            squadron: Sample::Unavailable(Unavailable::NotLoaded),
            selected: None,
            visible: false,
            surface: RequirementSurface::default(),
        }
    }
}

impl LiveReadings {
    /// Overwrite the fields the frame sets.
    pub fn apply(&mut self, frame: &Frame) {
        if let Some(squadron) = &frame.squadron {
            self.squadron = if squadron.loaded {
                Sample::Available(squadron.to_state())
            } else {
                Sample::Unavailable(Unavailable::NotLoaded)
            };
        }
        if let Some(selected) = frame.selected {
            self.selected = (selected != 0).then_some(selected);
        }
        if let Some(visible) = frame.visible {
            self.visible = visible;
        }
        if let Some(text) = &frame.requirements {
            self.surface = RequirementSurface::render(text);
        }
    }
}

/// Writer side of the readings.
#[derive(Clone, Debug, Default)]
pub struct SharedReadings {
    inner: Arc<Mutex<LiveReadings>>,
}

impl SharedReadings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&self, frame: &Frame) {
        if let Some(mut readings) = self.lock() {
            readings.apply(frame);
        }
    }

    pub fn sampler(&self, max_members: usize) -> ScriptedSampler {
        ScriptedSampler {
            readings: self.clone(),
            max_members: max_members.min(MAX_MEMBERS),
        }
    }

    fn lock(&self) -> Option<MutexGuard<'_, LiveReadings>> {
        self.inner.lock().ok()
    }
}

/// [`StateSampler`] over [`SharedReadings`]. A poisoned lock reads as
/// unavailable.
#[derive(Clone, Debug)]
pub struct ScriptedSampler {
    readings: SharedReadings,
    max_members: usize,
}

impl StateSampler for ScriptedSampler {
    fn try_sample_squadron_state(&self) -> Sample<SquadronState> {
        let Some(readings) = self.readings.lock() else {
            return Sample::Unavailable(Unavailable::NotLoaded);
        };
        readings.squadron.clone().map(|state| {
            if state.members().len() <= self.max_members {
                return state;
            }
            debug!(
                sampled = state.members().len(),
                kept = self.max_members,
                "dropping squadron members over the configured limit"
            );
            let members = state.members()[..self.max_members].to_vec();
            SquadronState::new(members, state.bonus, state.current_training)
        })
    }

    fn try_sample_required_attributes(&self) -> Sample<Attributes> {
        match self.readings.lock() {
            Some(readings) => readings.surface.read(readings.visible),
            None => Sample::Unavailable(Unavailable::NotVisible),
        }
    }

    fn read_selected_mission_id(&self) -> Option<MissionId> {
        self.readings.lock().and_then(|r| r.selected)
    }
}
