//! Scenario: reference party solver
//!
//! # Invariants under test
//!
//! 1. An exactly-covering party beats a party with surplus.
//! 2. When no party covers, the smallest-deficit party ranks first and a
//!    greedy training plan closes the gap when a training helps.
//! 3. An empty roster is a solver error, not a panic.
//! 4. The async `Solver` entry point returns the same result as `solve`.
//! 5. Results serialise to the JSON shape the `sqd run` output prints.

use std::sync::Arc;

use sqd_model::{
    AttributeDelta, Attributes, BonusAttributes, Mission, Race, SquadronMember, SquadronState,
    Training,
};
use sqd_reconcile::{Solver, SolverInput};
use serde_json::json;
use sqd_solver::{PartySolver, SolverError};

fn member(name: &str, p: u32, m: u32, t: u32) -> SquadronMember {
    SquadronMember::new(name, 50, 1, Race::Hyur, 0, Attributes::new(p, m, t))
}

fn roster() -> SquadronState {
    SquadronState::new(
        vec![
            member("A", 100, 20, 20),
            member("B", 20, 100, 20),
            member("C", 20, 20, 100),
            member("D", 50, 50, 50),
            member("E", 10, 10, 10),
        ],
        BonusAttributes::default(),
        0,
    )
}

fn input(required: Attributes, squadron: SquadronState) -> SolverInput {
    SolverInput {
        mission: Mission::new(15, "m15", 40, vec![required]),
        variant: required,
        squadron: Arc::new(squadron),
        trainings: Arc::new(vec![
            Training::new(1, "Physical", AttributeDelta::new(40, -20, -20)),
            Training::new(2, "Mental", AttributeDelta::new(-20, 40, -20)),
            Training::new(3, "Tactical", AttributeDelta::new(-20, -20, 40)),
        ]),
    }
}

#[test]
fn exact_cover_ranks_first() {
    let res = PartySolver::default()
        .solve(&input(Attributes::new(150, 150, 150), roster()))
        .unwrap();

    let best = res.best().unwrap();
    assert_eq!(best.members, vec!["A", "B", "C", "E"]);
    assert!(best.deficit.is_zero());
    assert_eq!(best.surplus, 0);
    assert!(res.is_feasible());
    assert!(res.training.sessions.is_empty());
    assert!(res.parties.len() <= 5);
}

#[test]
fn training_closes_a_small_gap() {
    let res = PartySolver::default()
        .solve(&input(Attributes::new(200, 150, 150), roster()))
        .unwrap();

    let best = res.best().unwrap();
    assert_eq!(best.members, vec!["A", "B", "C", "D"]);
    assert_eq!(best.deficit, Attributes::new(10, 0, 0));

    assert_eq!(res.training.sessions, vec![1]);
    assert_eq!(res.training.bonus_after, Attributes::new(40, 0, 0));
    assert!(res.is_feasible());
}

#[test]
fn empty_roster_is_an_error() {
    let empty = SquadronState::new(Vec::new(), BonusAttributes::default(), 0);
    let err = PartySolver::default()
        .solve(&input(Attributes::new(1, 1, 1), empty))
        .unwrap_err();
    assert_eq!(err, SolverError::NoMembers);
}

#[tokio::test]
async fn async_entry_point_matches_sync_solve() {
    let solver = PartySolver::default();
    let i = input(Attributes::new(150, 150, 150), roster());
    let sync = solver.solve(&i);
    let via_trait = solver.calculate(i).await;
    assert_eq!(sync, via_trait);
}

#[test]
fn results_serialise_to_json() {
    let res = PartySolver::default()
        .solve(&input(Attributes::new(200, 150, 150), roster()))
        .unwrap();

    let v = serde_json::to_value(&res).unwrap();
    assert_eq!(v["mission_id"], json!(15));
    assert_eq!(
        v["required"],
        json!({ "physical": 200, "mental": 150, "tactical": 150 })
    );
    assert_eq!(v["parties"][0]["members"], json!(["A", "B", "C", "D"]));
    assert_eq!(
        v["parties"][0]["deficit"],
        json!({ "physical": 10, "mental": 0, "tactical": 0 })
    );
    assert_eq!(v["training"]["sessions"], json!([1]));
    assert_eq!(
        v["training"]["deficit_after"],
        json!({ "physical": 0, "mental": 0, "tactical": 0 })
    );
}
