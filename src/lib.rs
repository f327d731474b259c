//! Tic-Tac-Toe with an exhaustive adversarial search agent
//!
//! This crate provides:
//! - Complete Tic-Tac-Toe game model with immutable state transitions
//! - Minimax agent with alpha-beta pruning and node-expansion metrics
//! - Memoized full-tree solver for optimal-policy analysis
//! - CLI shell for interactive play, position analysis, and evaluation

pub mod cli;
pub mod error;
pub mod search;
pub mod tictactoe;

pub use error::{Error, Result};
pub use search::{MinimaxAgent, OptimalPolicy, SearchResult, Strategy};
pub use tictactoe::{Action, Cell, Game, GameOutcome, GameState, Player};
