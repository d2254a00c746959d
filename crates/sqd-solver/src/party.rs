//! Party ranking and greedy training planning.

use serde::Serialize;
use sqd_model::{Attributes, BonusAttributes, SquadronMember, Training};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartyPlan {
    pub members: Vec<String>,
    /// Member attributes plus bonus.
    pub total: Attributes,
    pub deficit: Attributes,
    /// Points above the requirement, summed over covered fields.
    pub surplus: u64,
}

impl PartyPlan {
    fn score(&self) -> (u64, u64) {
        (self.deficit.total(), self.surplus)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TrainingPlan {
    /// Training ids in the order they should be run.
    pub sessions: Vec<u32>,
    pub bonus_after: Attributes,
    pub deficit_after: Attributes,
}

/// All `k`-element index combinations of `0..n` in lexicographic order.
/// `k` larger than `n` yields the single combination of all indices.
pub fn combinations(n: usize, k: usize) -> Vec<Vec<usize>> {
    let k = k.min(n);
    if k == 0 {
        return Vec::new();
    }
    let mut out = Vec::new();
    let mut idx: Vec<usize> = (0..k).collect();
    loop {
        out.push(idx.clone());
        // Rightmost position that can still advance.
        let Some(pos) = (0..k).rev().find(|&i| idx[i] < n - k + i) else {
            return out;
        };
        idx[pos] += 1;
        for j in pos + 1..k {
            idx[j] = idx[j - 1] + 1;
        }
    }
}

fn surplus(total: &Attributes, required: &Attributes) -> u64 {
    u64::from(total.physical.saturating_sub(required.physical))
        + u64::from(total.mental.saturating_sub(required.mental))
        + u64::from(total.tactical.saturating_sub(required.tactical))
}

/// Every party of `party_size` members, best first: smallest deficit, then
/// smallest surplus. Ties keep roster order.
pub fn rank_parties(
    members: &[SquadronMember],
    bonus: Attributes,
    required: &Attributes,
    party_size: usize,
) -> Vec<PartyPlan> {
    let mut plans: Vec<PartyPlan> = combinations(members.len(), party_size)
        .into_iter()
        .map(|combo| {
            let picked: Vec<&SquadronMember> =
                combo.iter().filter_map(|&i| members.get(i)).collect();
            let total = picked
                .iter()
                .fold(bonus, |acc, m| acc.saturating_add(m.attributes));
            PartyPlan {
                members: picked.iter().map(|m| m.name.clone()).collect(),
                deficit: total.deficit(required),
                surplus: surplus(&total, required),
                total,
            }
        })
        .collect();
    plans.sort_by_key(PartyPlan::score);
    plans
}

/// Greedily pick up to `max_sessions` trainings that shrink the party's
/// deficit. Stops early once covered or when no training helps.
pub fn plan_trainings(
    party: &PartyPlan,
    bonus: BonusAttributes,
    required: &Attributes,
    trainings: &[Training],
    max_sessions: usize,
) -> TrainingPlan {
    let members_only = Attributes::new(
        party.total.physical.saturating_sub(bonus.attributes.physical),
        party.total.mental.saturating_sub(bonus.attributes.mental),
        party.total.tactical.saturating_sub(bonus.attributes.tactical),
    );

    let mut current_bonus = bonus.attributes;
    let mut sessions = Vec::new();
    let deficit_for = |b: Attributes| members_only.saturating_add(b).deficit(required);

    for _ in 0..max_sessions {
        let before = deficit_for(current_bonus).total();
        if before == 0 {
            break;
        }
        let best = trainings
            .iter()
            .map(|t| (t, t.gain.apply(current_bonus)))
            .filter(|(_, after)| bonus.cap == 0 || after.total() <= u64::from(bonus.cap))
            .map(|(t, after)| (deficit_for(after).total(), t.id, after))
            .min_by_key(|(deficit, id, _)| (*deficit, *id));
        match best {
            Some((after_deficit, id, after)) if after_deficit < before => {
                sessions.push(id);
                current_bonus = after;
            }
            _ => break,
        }
    }

    TrainingPlan {
        sessions,
        bonus_after: current_bonus,
        deficit_after: deficit_for(current_bonus),
    }
}
