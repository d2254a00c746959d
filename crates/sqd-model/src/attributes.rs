use std::fmt;

use serde::{Deserialize, Serialize};

/// Physical / mental / tactical triple.
///
/// Used for mission requirements, member stats, bonuses and training gains.
/// Equality is by value on all three fields.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Attributes {
    pub physical: u32,
    pub mental: u32,
    pub tactical: u32,
}

impl Attributes {
    pub const ZERO: Attributes = Attributes::new(0, 0, 0);

    pub const fn new(physical: u32, mental: u32, tactical: u32) -> Self {
        Self {
            physical,
            mental,
            tactical,
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    pub fn saturating_add(self, other: Attributes) -> Attributes {
        Attributes {
            physical: self.physical.saturating_add(other.physical),
            mental: self.mental.saturating_add(other.mental),
            tactical: self.tactical.saturating_add(other.tactical),
        }
    }

    /// `true` when every field of `self` is at least the matching field of `required`.
    pub fn covers(&self, required: &Attributes) -> bool {
        self.physical >= required.physical
            && self.mental >= required.mental
            && self.tactical >= required.tactical
    }

    /// Per-field shortfall of `self` against `required` (zero where covered).
    pub fn deficit(&self, required: &Attributes) -> Attributes {
        Attributes {
            physical: required.physical.saturating_sub(self.physical),
            mental: required.mental.saturating_sub(self.mental),
            tactical: required.tactical.saturating_sub(self.tactical),
        }
    }

    /// Sum of the three fields, widened so it cannot overflow.
    pub fn total(&self) -> u64 {
        u64::from(self.physical) + u64::from(self.mental) + u64::from(self.tactical)
    }
}

/// Signed per-field change, e.g. one training session (+40 / -20 / -20).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttributeDelta {
    pub physical: i32,
    pub mental: i32,
    pub tactical: i32,
}

impl AttributeDelta {
    pub const fn new(physical: i32, mental: i32, tactical: i32) -> Self {
        Self {
            physical,
            mental,
            tactical,
        }
    }

    /// Apply to `base`, clamping each field at zero.
    pub fn apply(&self, base: Attributes) -> Attributes {
        Attributes {
            physical: base.physical.saturating_add_signed(self.physical),
            mental: base.mental.saturating_add_signed(self.mental),
            tactical: base.tactical.saturating_add_signed(self.tactical),
        }
    }
}

impl fmt::Display for Attributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.physical, self.mental, self.tactical)
    }
}
