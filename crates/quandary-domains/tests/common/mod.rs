#![allow(dead_code)]

use std::collections::{HashSet, VecDeque};

use quandary_core::{Domain, State};

/// Every state reachable from the domain's seeds through any enumerated branch,
/// in breadth-first discovery order.
pub fn reachable_states(domain: &Domain) -> Vec<State> {
    let mut seen: HashSet<State> = HashSet::new();
    let mut order = Vec::new();
    let mut frontier: VecDeque<State> = domain.seed_states().iter().cloned().collect();

    while let Some(state) = frontier.pop_front() {
        if !seen.insert(state.clone()) {
            continue;
        }
        for action in domain.action_names() {
            let dist = domain
                .transitions(action, &state)
                .unwrap_or_else(|err| panic!("{action} from {state}: {err}"));
            for (next, _) in dist.iter() {
                if !seen.contains(next) {
                    frontier.push_back(next.clone());
                }
            }
        }
        order.push(state);
    }

    order
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
