use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Attributes, MissionId};

/// Identity of "what to compute": the selected mission and the variant the
/// live reading matched. Two fingerprints are equal iff both fields are equal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fingerprint {
    pub mission_id: MissionId,
    pub variant: Attributes,
}

impl Fingerprint {
    pub fn new(mission_id: MissionId, variant: Attributes) -> Self {
        Self {
            mission_id,
            variant,
        }
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mission={} variant={}", self.mission_id, self.variant)
    }
}
