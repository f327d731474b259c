//! High-level game management

use serde::{Deserialize, Serialize};

use super::board::{Action, GameState, Player};

/// A move in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub action: Action,
    pub player: Player,
}

/// Outcome of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    Win(Player),
    Draw,
}

impl GameOutcome {
    /// Utility of the outcome: +1 for an X win, -1 for an O win, 0 for a draw
    pub fn utility(self) -> i32 {
        match self {
            GameOutcome::Win(Player::X) => 1,
            GameOutcome::Win(Player::O) => -1,
            GameOutcome::Draw => 0,
        }
    }
}

/// A complete game with history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    pub initial: GameState,
    pub moves: Vec<Move>,
    pub outcome: Option<GameOutcome>,
}

impl Game {
    /// Create a new game from the standard initial position (X first)
    pub fn new() -> Self {
        Self::with_first_player(Player::X)
    }

    /// Create a new game with a chosen first player
    pub fn with_first_player(first_player: Player) -> Self {
        Game {
            initial: GameState::new_with_player(first_player),
            moves: Vec::new(),
            outcome: None,
        }
    }

    /// Play an action for the player to move
    ///
    /// # Errors
    ///
    /// Returns error if the game is already decided or the action is illegal
    /// in the current position.
    pub fn play(&mut self, action: Action) -> Result<(), crate::Error> {
        if self.outcome.is_some() {
            return Err(crate::Error::GameOver);
        }

        let current = self.current_state()?;
        let new_state = current.apply(action)?;

        self.moves.push(Move {
            action,
            player: current.to_move,
        });

        if new_state.is_terminal() {
            self.outcome = Some(if let Some(winner) = new_state.winner() {
                GameOutcome::Win(winner)
            } else {
                GameOutcome::Draw
            });
        }

        Ok(())
    }

    /// Replay moves up to a given index (exclusive)
    ///
    /// # Errors
    ///
    /// Returns error if any move in the history is invalid for the current
    /// state. This indicates corrupted game data.
    fn replay_moves_until(&self, end_index: usize) -> Result<GameState, crate::Error> {
        let mut state = self.initial;
        for m in self.moves.iter().take(end_index) {
            state = state.apply(m.action)?;
        }
        Ok(state)
    }

    /// Get current board state
    ///
    /// # Errors
    ///
    /// Returns error if any move in the history is invalid for the current
    /// state. This indicates corrupted game data.
    pub fn current_state(&self) -> Result<GameState, crate::Error> {
        self.replay_moves_until(self.moves.len())
    }

    /// Get the sequence of board states from the initial position onward
    ///
    /// # Errors
    ///
    /// Returns error if any move in the history is invalid for the current
    /// state. This indicates corrupted game data.
    pub fn state_sequence(&self) -> Result<Vec<GameState>, crate::Error> {
        let mut states = Vec::with_capacity(self.moves.len() + 1);
        states.push(self.initial);

        for i in 1..=self.moves.len() {
            states.push(self.replay_moves_until(i)?);
        }

        Ok(states)
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_records_moves_and_outcome() {
        let mut game = Game::new();
        for (row, col) in [(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)] {
            game.play(Action::new(row, col)).unwrap();
        }

        assert_eq!(game.moves.len(), 5);
        assert_eq!(game.outcome, Some(GameOutcome::Win(Player::X)));
        assert_eq!(game.outcome.unwrap().utility(), 1);

        // No moves accepted after the game is decided
        assert!(matches!(
            game.play(Action::new(2, 2)),
            Err(crate::Error::GameOver)
        ));
    }

    #[test]
    fn test_state_sequence_length() {
        let mut game = Game::new();
        game.play(Action::new(1, 1)).unwrap();
        game.play(Action::new(0, 0)).unwrap();

        let states = game.state_sequence().unwrap();
        assert_eq!(states.len(), 3);
        assert_eq!(states[0], game.initial);
        assert_eq!(states[2], game.current_state().unwrap());
    }
}
