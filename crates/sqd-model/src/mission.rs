use serde::{Deserialize, Serialize};

use crate::{AttributeDelta, Attributes};

/// Stable, catalog-assigned mission row id.
pub type MissionId = u32;

/// Missions that belong to the flagged set.
pub const FLAGGED_MISSION_IDS: [MissionId; 4] = [7, 14, 15, 34];

pub fn is_flagged_mission_id(id: MissionId) -> bool {
    FLAGGED_MISSION_IDS.contains(&id)
}

/// One squadron mission as loaded from the static catalog.
///
/// `variants` is the ordered list of attribute requirement combinations the
/// mission may present. Declaration order is significant: variant matching
/// resolves ties to the lowest index.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mission {
    pub id: MissionId,
    pub name: String,
    pub level: u8,
    pub is_flagged: bool,
    pub variants: Vec<Attributes>,
}

impl Mission {
    pub fn new(
        id: MissionId,
        name: impl Into<String>,
        level: u8,
        variants: Vec<Attributes>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            level,
            is_flagged: is_flagged_mission_id(id),
            variants,
        }
    }

    /// A mission with no declared variants can never be matched.
    pub fn is_usable(&self) -> bool {
        !self.variants.is_empty()
    }

    pub fn variant(&self, index: usize) -> Option<&Attributes> {
        self.variants.get(index)
    }
}

/// One training regimen. Immutable once loaded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Training {
    pub id: u32,
    pub name: String,
    /// Per-attribute change applied by one session of this training.
    pub gain: AttributeDelta,
}

impl Training {
    pub fn new(id: u32, name: impl Into<String>, gain: AttributeDelta) -> Self {
        Self {
            id,
            name: name.into(),
            gain,
        }
    }
}
