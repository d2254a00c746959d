use std::cell::Cell;

use sqd_model::{Attributes, MissionId, Sample, SquadronState, Unavailable};
use sqd_reconcile::StateSampler;

/// Sampler whose readings are plain fields the test sets between events.
#[derive(Debug, Clone)]
pub struct FakeSampler {
    pub squadron: Sample<SquadronState>,
    pub attributes: Sample<Attributes>,
    pub selected: Option<MissionId>,
    attribute_reads: Cell<usize>,
    squadron_reads: Cell<usize>,
}

impl Default for FakeSampler {
    fn default() -> Self {
        Self {
            squadron: Sample::Unavailable(Unavailable::NotLoaded),
            attributes: Sample::Unavailable(Unavailable::NotVisible),
            selected: None,
            attribute_reads: Cell::new(0),
            squadron_reads: Cell::new(0),
        }
    }
}

impl FakeSampler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_squadron(mut self, squadron: SquadronState) -> Self {
        self.squadron = Sample::Available(squadron);
        self
    }

    pub fn select(&mut self, id: Option<MissionId>) {
        self.selected = id;
    }

    pub fn show(&mut self, attributes: Attributes) {
        self.attributes = Sample::Available(attributes);
    }

    pub fn hide(&mut self, why: Unavailable) {
        self.attributes = Sample::Unavailable(why);
    }

    pub fn attribute_reads(&self) -> usize {
        self.attribute_reads.get()
    }

    pub fn squadron_reads(&self) -> usize {
        self.squadron_reads.get()
    }
}

impl StateSampler for FakeSampler {
    fn try_sample_squadron_state(&self) -> Sample<SquadronState> {
        self.squadron_reads.set(self.squadron_reads.get() + 1);
        self.squadron.clone()
    }

    fn try_sample_required_attributes(&self) -> Sample<Attributes> {
        self.attribute_reads.set(self.attribute_reads.get() + 1);
        self.attributes.clone()
    }

    fn read_selected_mission_id(&self) -> Option<MissionId> {
        self.selected
    }
}
