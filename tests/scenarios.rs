//! End-to-end scenarios for the game model and search agent

use tictactoe_minimax::search::{MinimaxAgent, Strategy};
use tictactoe_minimax::tictactoe::{Action, GameState, Player};

fn both_agents() -> [MinimaxAgent; 2] {
    [
        MinimaxAgent::new(Strategy::Minimax),
        MinimaxAgent::new(Strategy::AlphaBeta),
    ]
}

/// Play a position out with the agent moving for both sides, returning the
/// terminal state
fn play_out(agent: &MinimaxAgent, mut state: GameState) -> GameState {
    while !state.is_terminal() {
        let result = agent
            .choose_action(&state)
            .expect("agent must move in any non-terminal state");
        state = state
            .apply(result.action)
            .expect("agent must choose a legal action");
    }
    state
}

mod opening {
    use super::*;

    #[test]
    fn first_move_is_legal_and_game_is_drawable() {
        let state = GameState::new();

        for agent in both_agents() {
            let result = agent.choose_action(&state).unwrap();
            assert!(
                state.legal_actions().contains(&result.action),
                "chosen opening {} must be legal",
                result.action
            );
            assert_eq!(result.value, 0, "perfect play from the empty board draws");
        }
    }

    #[test]
    fn center_opening_plays_out_to_a_draw() {
        let state = GameState::new().apply(Action::new(1, 1)).unwrap();

        for agent in both_agents() {
            let terminal = play_out(&agent, state);
            assert!(terminal.is_draw(), "got {terminal}");
            assert_eq!(terminal.utility().unwrap(), 0);
        }
    }

    #[test]
    fn every_opening_reply_chain_stays_drawn() {
        // All 9 first moves for X are drawable with correct subsequent play
        let empty = GameState::new();

        for action in empty.legal_actions() {
            let state = empty.apply(action).unwrap();
            let terminal = play_out(&MinimaxAgent::default(), state);
            assert!(
                terminal.is_draw(),
                "opening {action} should be held to a draw, got {terminal}"
            );
        }
    }
}

mod blocking {
    use super::*;

    #[test]
    fn o_answers_the_open_top_row_at_its_first_equivalent_reply() {
        // XX.
        // OO.
        // ...   O to move: both completing row 1 and blocking row 0 lose
        //       against perfect play, so the row-major first of the
        //       value-equivalent replies is chosen
        let state = GameState::from_string("XX.OO...._O").unwrap();

        for agent in both_agents() {
            let result = agent.choose_action(&state).unwrap();
            assert_eq!(result.action, Action::new(0, 2));
            assert_eq!(result.value, -1);
        }
    }

    #[test]
    fn x_completes_its_own_row_over_blocking() {
        // Same cells with X to move: taking the win beats everything
        let state = GameState::from_string("XX.OO....").unwrap();
        assert_eq!(state.to_move, Player::X);

        for agent in both_agents() {
            let result = agent.choose_action(&state).unwrap();
            assert_eq!(result.action, Action::new(0, 2));
            assert_eq!(result.value, 1);

            let next = state.apply(result.action).unwrap();
            assert_eq!(next.winner(), Some(Player::X));
        }
    }

    #[test]
    fn o_blocks_a_lone_double_threat_setup() {
        // X.X on the top row with nothing else: O must take (0,1)
        let state = GameState::from_string("X.X.O...._O").unwrap();

        for agent in both_agents() {
            let result = agent.choose_action(&state).unwrap();
            assert_eq!(result.action, Action::new(0, 1));
        }
    }
}

mod endgame {
    use super::*;

    #[test]
    fn full_board_without_a_line_is_a_terminal_draw() {
        // XOX
        // XOO
        // OXX
        let state = GameState::from_string("XOXXOOOXX").unwrap();

        assert!(state.is_terminal());
        assert!(state.legal_actions().is_empty());
        assert_eq!(state.winner(), None);
        assert_eq!(state.utility().unwrap(), 0);
    }

    #[test]
    fn single_remaining_cell_finishes_as_a_draw() {
        // XOX
        // XOO
        // OX.   X to move; the one legal action fills the board without a line
        let state = GameState::from_string("XOXXOOOX.").unwrap();
        assert_eq!(state.to_move, Player::X);

        let actions = state.legal_actions();
        assert_eq!(actions, vec![Action::new(2, 2)]);

        let terminal = state.apply(actions[0]).unwrap();
        assert!(terminal.is_terminal());
        assert_eq!(terminal.utility().unwrap(), 0);
    }

    #[test]
    fn single_remaining_cell_may_also_complete_a_win() {
        // XOX
        // OXO
        // OX.   X to move; filling the last cell completes the diagonal
        let state = GameState::from_string("XOXOXOOX.").unwrap();

        let actions = state.legal_actions();
        assert_eq!(actions, vec![Action::new(2, 2)]);

        let terminal = state.apply(actions[0]).unwrap();
        assert!(terminal.is_terminal());
        assert_eq!(terminal.winner(), Some(Player::X));
        assert_eq!(terminal.utility().unwrap(), 1);
    }
}

mod node_metrics {
    use super::*;

    #[test]
    fn pruning_saves_nodes_on_a_mid_game_state() {
        let state = GameState::from_string("X...O....").unwrap();

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
            "alpha-beta expanded {} nodes, plain minimax {}",
            pruned.nodes_expanded,
            plain.nodes_expanded
        );
    }

    #[test]
    fn node_counts_are_reproducible() {
        let state = GameState::new();

        for agent in both_agents() {
            let first = agent.choose_action(&state).unwrap();
            let second = agent.choose_action(&state).unwrap();
            assert_eq!(first.nodes_expanded, second.nodes_expanded);
        }
    }
}
