use sqd_model::MissionId;

/// External events, delivered serially.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReconcileEvent {
    MemberListUpdated,
    CatalogSurfaceOpened,
    Tick,
    SessionReset,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    /// The selected mission's reading has not yet matched a declared variant;
    /// every tick that still shows this mission retries.
    AwaitingConsistentAttributes(MissionId),
}

/// Last selection seen by the tick handler.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SelectionMarker {
    /// Nothing observed since start, reset, or the catalog surface opening.
    #[default]
    Cleared,
    Observed(Option<MissionId>),
}

/// Everything the reconciler tracks between events, as one value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReconcilerState {
    pub phase: Phase,
    pub last_selection: SelectionMarker,
}

impl ReconcilerState {
    pub fn is_awaiting(&self, id: MissionId) -> bool {
        self.phase == Phase::AwaitingConsistentAttributes(id)
    }
}
