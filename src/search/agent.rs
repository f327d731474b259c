//! Minimax search agent with alpha-beta pruning
//!
//! The agent evaluates the full game tree: X is the maximizing player and O
//! the minimizing player, so the side to move in the searched state
//! determines the direction of optimization. The tree is small enough
//! (at most 9 plies) to solve exactly, so there is no heuristic evaluation
//! and no depth limit.

use crate::tictactoe::{Action, GameState, Player};

/// Search procedure used by the agent
///
/// Both strategies return the same chosen action and value for every
/// position; pruning only changes how many nodes get visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Plain exhaustive minimax
    Minimax,
    /// Minimax with alpha-beta pruning
    #[default]
    AlphaBeta,
}

/// Outcome of a completed search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    /// The action judged optimal for the player to move
    pub action: Action,
    /// Game-theoretic value of the searched state (+1 X win, -1 O win, 0 draw)
    pub value: i32,
    /// Number of states visited, terminal leaves and the searched root included
    pub nodes_expanded: u64,
}

/// Agent that selects actions by exhaustive adversarial search
#[derive(Debug, Clone, Copy, Default)]
pub struct MinimaxAgent {
    strategy: Strategy,
}

impl MinimaxAgent {
    pub fn new(strategy: Strategy) -> Self {
        MinimaxAgent { strategy }
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Select the optimal action for the player to move.
    ///
    /// Ties are broken by the first-encountered action in the row-major
    /// enumeration order of [`GameState::legal_actions`], so repeated
    /// searches of the same state return the same action and the same node
    /// count. The root counts as the first expanded node.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GameOver`] if the state is already terminal: there is
    /// no action to choose. Use [`evaluate`](Self::evaluate) for value-only
    /// queries, which handle terminal states.
    ///
    /// [`Error::GameOver`]: crate::Error::GameOver
    ///
    /// # Examples
    ///
    /// ```
    /// use tictactoe_minimax::search::MinimaxAgent;
    /// use tictactoe_minimax::tictactoe::{Action, GameState};
    ///
    /// // O must block X's open top row
    /// let state = GameState::from_string("XX.OO...._O").unwrap();
    /// let result = MinimaxAgent::default().choose_action(&state).unwrap();
    /// assert_eq!(result.action, Action::new(0, 2));
    /// ```
    pub fn choose_action(&self, state: &GameState) -> crate::Result<SearchResult> {
        if state.is_terminal() {
            return Err(crate::Error::GameOver);
        }

        let maximizing = state.to_move == Player::X;
        let mut run = SearchRun { nodes: 1 };
        let mut alpha = i32::MIN;
        let mut beta = i32::MAX;
        let mut best: Option<(Action, i32)> = None;

        for action in state.legal_actions() {
            let child = state
                .apply(action)
                .expect("legal action should apply cleanly");
            let value = match self.strategy {
                Strategy::Minimax => run.minimax(&child),
                Strategy::AlphaBeta => run.alpha_beta(&child, alpha, beta),
            };

            let improved = match best {
                None => true,
                Some((_, best_value)) => {
                    if maximizing {
                        value > best_value
                    } else {
                        value < best_value
                    }
                }
            };
            if improved {
                best = Some((action, value));
                // Later siblings are searched against the best value so far
                if maximizing {
                    alpha = alpha.max(value);
                } else {
                    beta = beta.min(value);
                }
            }
        }

        let (action, value) = best.expect("non-terminal state has at least one legal action");
        Ok(SearchResult {
            action,
            value,
            nodes_expanded: run.nodes,
        })
    }

    /// Game-theoretic value of any state, with the node count of the search.
    ///
    /// A terminal state short-circuits to its utility at a cost of exactly
    /// one node (the single terminal visit).
    pub fn evaluate(&self, state: &GameState) -> (i32, u64) {
        let mut run = SearchRun { nodes: 0 };
        let value = match self.strategy {
            Strategy::Minimax => run.minimax(state),
            Strategy::AlphaBeta => run.alpha_beta(state, i32::MIN, i32::MAX),
        };
        (value, run.nodes)
    }
}

/// One search invocation; owns the node counter so concurrent searches never
/// share state
struct SearchRun {
    nodes: u64,
}

fn terminal_value(state: &GameState) -> i32 {
    match state.winner() {
        Some(Player::X) => 1,
        Some(Player::O) => -1,
        None => 0,
    }
}

impl SearchRun {
    fn minimax(&mut self, state: &GameState) -> i32 {
        self.nodes += 1;
        if state.is_terminal() {
            return terminal_value(state);
        }

        let mut best = match state.to_move {
            Player::X => i32::MIN,
            Player::O => i32::MAX,
        };
        for action in state.legal_actions() {
            let child = state
                .apply(action)
                .expect("legal action should apply cleanly");
            let value = self.minimax(&child);
            best = match state.to_move {
                Player::X => best.max(value),
                Player::O => best.min(value),
            };
        }
        best
    }

    fn alpha_beta(&mut self, state: &GameState, mut alpha: i32, mut beta: i32) -> i32 {
        self.nodes += 1;
        if state.is_terminal() {
            return terminal_value(state);
        }

        match state.to_move {
            Player::X => {
                let mut best = i32::MIN;
                for action in state.legal_actions() {
                    let child = state
                        .apply(action)
                        .expect("legal action should apply cleanly");
                    best = best.max(self.alpha_beta(&child, alpha, beta));
                    alpha = alpha.max(best);
                    if alpha >= beta {
                        // Remaining children cannot affect the result
                        break;
                    }
                }
                best
            }
            Player::O => {
                let mut best = i32::MAX;
                for action in state.legal_actions() {
                    let child = state
                        .apply(action)
                        .expect("legal action should apply cleanly");
                    best = best.min(self.alpha_beta(&child, alpha, beta));
                    beta = beta.min(best);
                    if beta <= alpha {
                        break;
                    }
                }
                best
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn both_agents() -> [MinimaxAgent; 2] {
        [
            MinimaxAgent::new(Strategy::Minimax),
            MinimaxAgent::new(Strategy::AlphaBeta),
        ]
    }

    #[test]
    fn test_takes_immediate_win() {
        // X completes the top row rather than anything else
        let state = GameState::from_string("XX.OO....").unwrap();
        assert_eq!(state.to_move, Player::X);

        for agent in both_agents() {
            let result = agent.choose_action(&state).unwrap();
            assert_eq!(result.action, Action::new(0, 2));
            assert_eq!(result.value, 1);
        }
    }

    #[test]
    fn test_blocks_open_row() {
        // O to move; blocking at (0,2) and winning at (1,2) are both worth -1,
        // and the block enumerates first
        let state = GameState::from_string("XX.OO...._O").unwrap();

        for agent in both_agents() {
            let result = agent.choose_action(&state).unwrap();
            assert_eq!(result.action, Action::new(0, 2));
            assert_eq!(result.value, -1);
        }
    }

    #[test]
    fn test_choose_action_rejects_terminal_state() {
        let state = GameState::from_string("XXXOO....").unwrap();
        for agent in both_agents() {
            assert!(matches!(
                agent.choose_action(&state),
                Err(crate::Error::GameOver)
            ));
        }
    }

    #[test]
    fn test_evaluate_terminal_is_single_node() {
        let x_win = GameState::from_string("XXXOO....").unwrap();
        let draw = GameState::from_string("XOXXOOOXX").unwrap();

        for agent in both_agents() {
            assert_eq!(agent.evaluate(&x_win), (1, 1));
            assert_eq!(agent.evaluate(&draw), (0, 1));
        }
    }

    #[test]
    fn test_single_empty_cell_costs_two_nodes() {
        // One legal action left; the search visits the root and one leaf
        let state = GameState::from_string("XOXXOOOX.").unwrap();

        for agent in both_agents() {
            let result = agent.choose_action(&state).unwrap();
            assert_eq!(result.action, Action::new(2, 2));
            assert_eq!(result.value, 0);
            assert_eq!(result.nodes_expanded, 2);
        }
    }

    #[test]
    fn test_pruning_reduces_nodes_with_identical_choice() {
        let state = GameState::new();
        let plain = MinimaxAgent::new(Strategy::Minimax)
            .choose_action(&state)
            .unwrap();
        let pruned = MinimaxAgent::new(Strategy::AlphaBeta)
            .choose_action(&state)
            .unwrap();

        assert_eq!(plain.action, pruned.action);
        assert_eq!(plain.value, pruned.value);
        assert!(
            pruned.nodes_expanded < plain.nodes_expanded,
            "alpha-beta should visit strictly fewer nodes ({} vs {})",
            pruned.nodes_expanded,
            plain.nodes_expanded
        );
    }

    #[test]
    fn test_empty_board_is_a_draw() {
        for agent in both_agents() {
            let (value, _) = agent.evaluate(&GameState::new());
            assert_eq!(value, 0);

            let (value, _) = agent.evaluate(&GameState::new_with_player(Player::O));
            assert_eq!(value, 0);
        }
    }

    #[test]
    fn test_repeated_search_is_deterministic() {
        let state = GameState::from_string("X...O....").unwrap();
        let agent = MinimaxAgent::default();

        let first = agent.choose_action(&state).unwrap();
        let second = agent.choose_action(&state).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_punishes_weak_reply() {
        // X took a corner, O replied with an edge instead of the center;
        // X now has a forced win
        let state = GameState::from_string("X..O.....").unwrap();
        assert_eq!(state.to_move, Player::X);

        for agent in both_agents() {
            let result = agent.choose_action(&state).unwrap();
            assert_eq!(result.value, 1);
        }
    }
}
