//! Memoized solve of the full game tree
//!
//! The agent in [`agent`](super::agent) searches one position at a time and
//! reports node counts; this module instead solves every position once,
//! memoizing on the encoded state, and records *all* minimax-equivalent
//! actions. Analysis commands and the exhaustive test suite cross-check the
//! agent against it.

use std::collections::{HashMap, HashSet};

use crate::tictactoe::{Action, GameState, Player};

/// Optimal value of a position together with every action achieving it
#[derive(Debug, Clone)]
pub struct OptimalPolicy {
    /// Game-theoretic value (+1 X win, -1 O win, 0 draw)
    pub value: i32,
    /// All minimax-equivalent actions, in row-major order; empty for
    /// terminal states
    pub optimal_actions: Vec<Action>,
}

fn solve_memo(state: GameState, memo: &mut HashMap<String, OptimalPolicy>) -> OptimalPolicy {
    let key = state.encode();
    if let Some(policy) = memo.get(&key) {
        return policy.clone();
    }

    if state.is_terminal() {
        let value = match state.winner() {
            Some(Player::X) => 1,
            Some(Player::O) => -1,
            None => 0,
        };
        let policy = OptimalPolicy {
            value,
            optimal_actions: Vec::new(),
        };
        memo.insert(key, policy.clone());
        return policy;
    }

    let mut best_value = match state.to_move {
        Player::X => i32::MIN,
        Player::O => i32::MAX,
    };
    let mut best_actions: Vec<Action> = Vec::new();

    for action in state.legal_actions() {
        let next_state = state
            .apply(action)
            .expect("legal action should apply cleanly");
        let child_value = solve_memo(next_state, memo).value;

        match state.to_move {
            Player::X => {
                if child_value > best_value {
                    best_value = child_value;
                    best_actions.clear();
                    best_actions.push(action);
                } else if child_value == best_value {
                    best_actions.push(action);
                }
            }
            Player::O => {
                if child_value < best_value {
                    best_value = child_value;
                    best_actions.clear();
                    best_actions.push(action);
                } else if child_value == best_value {
                    best_actions.push(action);
                }
            }
        }
    }

    let policy = OptimalPolicy {
        value: best_value,
        optimal_actions: best_actions,
    };
    memo.insert(key, policy.clone());
    policy
}

/// Solve a single position
pub fn solve(state: &GameState) -> OptimalPolicy {
    let mut memo = HashMap::new();
    solve_memo(*state, &mut memo)
}

/// Solve every state reachable from `initial`, keyed by
/// [`GameState::encode`]
pub fn solve_reachable(initial: &GameState) -> HashMap<String, OptimalPolicy> {
    let mut memo = HashMap::new();
    for state in reachable_states(initial) {
        solve_memo(state, &mut memo);
    }
    memo
}

/// Enumerate every state reachable from `initial` in a deterministic
/// depth-first order, the initial state first. Terminal states are included
/// but not expanded.
pub fn reachable_states(initial: &GameState) -> Vec<GameState> {
    let mut seen = HashSet::new();
    let mut ordered = Vec::new();
    visit(*initial, &mut seen, &mut ordered);
    ordered
}

fn visit(state: GameState, seen: &mut HashSet<String>, ordered: &mut Vec<GameState>) {
    if !seen.insert(state.encode()) {
        return;
    }
    ordered.push(state);

    for action in state.legal_actions() {
        let child = state
            .apply(action)
            .expect("legal action should apply cleanly");
        visit(child, seen, ordered);
    }
}
