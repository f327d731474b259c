//! CLI infrastructure for the Tic-Tac-Toe agent
//!
//! This module provides the command-line shell around the game core:
//! interactive play, position analysis, and agent evaluation.

pub mod commands;
pub mod output;
