use std::time::Duration;

use sqd_catalog::Catalog;
use sqd_model::{
    AttributeDelta, Attributes, BonusAttributes, Mission, Race, SquadronMember, SquadronState,
    Training,
};

pub const MISSION_15_VARIANTS: [Attributes; 3] = [
    Attributes::new(215, 195, 160),
    Attributes::new(160, 215, 195),
    Attributes::new(195, 160, 215),
];

pub fn mission_15() -> Mission {
    Mission::new(15, "Curing What Ails", 40, MISSION_15_VARIANTS.to_vec())
}

/// Missions 3, 15 and 34 (34 declares a genuine all-zero variant) and the
/// three single-stat trainings.
pub fn fixture_catalog() -> Catalog {
    Catalog::new(
        vec![
            Mission::new(3, "Crystal Clear", 20, vec![Attributes::new(100, 80, 60)]),
            mission_15(),
            Mission::new(
                34,
                "Zero Requirement Drill",
                50,
                vec![Attributes::new(300, 300, 300), Attributes::ZERO],
            ),
        ],
        vec![
            Training::new(1, "Physical Training", AttributeDelta::new(40, -20, -20)),
            Training::new(2, "Mental Training", AttributeDelta::new(-20, 40, -20)),
            Training::new(3, "Tactical Training", AttributeDelta::new(-20, -20, 40)),
        ],
    )
}

/// Squadron of `n` members with distinct, deterministic attributes.
pub fn squadron_of(n: u32) -> SquadronState {
    let members = (1..=n)
        .map(|i| {
            SquadronMember::new(
                format!("Member {i}"),
                40,
                1,
                Race::Hyur,
                i * 100,
                Attributes::new(40 + i, 40 + 2 * i, 40 + 3 * i),
            )
        })
        .collect();
    SquadronState::new(
        members,
        BonusAttributes {
            attributes: Attributes::new(20, 20, 20),
            cap: 0,
        },
        0,
    )
}

/// Poll `cond` every few milliseconds until it holds or `timeout` elapses.
/// Returns whether it held.
pub async fn wait_until(timeout: Duration, mut cond: impl FnMut() -> bool) -> bool {
    let deadline = tokio::time::Instant::now() + timeout;
    loop {
        if cond() {
            return true;
        }
        if tokio::time::Instant::now() >= deadline {
            return false;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}
