//! Squadron snapshot types.
//!
//! A [`SquadronState`] is never patched in place: every successful
//! member-list sample builds a new one, and a session reset drops it.

use serde::{Deserialize, Serialize};

use crate::Attributes;

/// Hard cap on the number of members a squadron can hold.
pub const MAX_MEMBERS: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Race {
    Hyur,
    Elezen,
    Lalafell,
    Miqote,
    Roegadyn,
    AuRa,
    Hrothgar,
    Viera,
    Unknown,
}

impl Race {
    /// Map a raw race id from the external source. Unrecognised ids map to `Unknown`.
    pub fn from_raw(raw: u8) -> Self {
        match raw {
            1 => Race::Hyur,
            2 => Race::Elezen,
            3 => Race::Lalafell,
            4 => Race::Miqote,
            5 => Race::Roegadyn,
            6 => Race::AuRa,
            7 => Race::Hrothgar,
            8 => Race::Viera,
            _ => Race::Unknown,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SquadronMember {
    pub name: String,
    pub level: u8,
    /// Raw class/job id.
    pub job: u8,
    pub race: Race,
    pub experience: u32,
    /// Attributes as read from the member list, stored unprojected. The
    /// catalog feed carries no per-job growth table, so deriving growth from
    /// job and experience is left to the solver.
    pub attributes: Attributes,
}

impl SquadronMember {
    pub fn new(
        name: impl Into<String>,
        level: u8,
        job: u8,
        race: Race,
        experience: u32,
        attributes: Attributes,
    ) -> Self {
        Self {
            name: name.into(),
            level,
            job,
            race,
            experience,
            attributes,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusAttributes {
    pub attributes: Attributes,
    /// Upper bound on the summed bonus; 0 when the source does not report one.
    pub cap: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SquadronState {
    members: Vec<SquadronMember>,
    pub bonus: BonusAttributes,
    pub current_training: usize,
}

impl SquadronState {
    /// Build a snapshot. Members beyond [`MAX_MEMBERS`] are dropped.
    pub fn new(
        mut members: Vec<SquadronMember>,
        bonus: BonusAttributes,
        current_training: usize,
    ) -> Self {
        members.truncate(MAX_MEMBERS);
        Self {
            members,
            bonus,
            current_training,
        }
    }

    pub fn members(&self) -> &[SquadronMember] {
        &self.members
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(i: u8) -> SquadronMember {
        SquadronMember::new(
            format!("Member {i}"),
            10,
            1,
            Race::from_raw(i),
            0,
            Attributes::new(u32::from(i), 0, 0),
        )
    }

    #[test]
    fn members_are_capped_at_eight() {
        let members: Vec<_> = (1..=10).map(member).collect();
        let st = SquadronState::new(members, BonusAttributes::default(), 0);
        assert_eq!(st.members().len(), MAX_MEMBERS);
        assert_eq!(st.members()[7].name, "Member 8");
    }

    #[test]
    fn sampled_attributes_are_kept_unprojected() {
        let sampled = Attributes::new(91, 47, 66);
        let veteran = SquadronMember::new("Vet", 60, 3, Race::Viera, 250_000, sampled);
        let st = SquadronState::new(vec![veteran], BonusAttributes::default(), 0);
        assert_eq!(st.members()[0].attributes, sampled);
    }

    #[test]
    fn unknown_race_ids_fall_back() {
        assert_eq!(Race::from_raw(0), Race::Unknown);
        assert_eq!(Race::from_raw(200), Race::Unknown);
        assert_eq!(Race::from_raw(6), Race::AuRa);
    }
}
