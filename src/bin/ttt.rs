//! Tic-Tac-Toe CLI - play against, analyze, and evaluate the minimax agent
//!
//! This CLI provides a unified interface for:
//! - Playing interactively against the agent
//! - Analyzing positions and exporting the optimal policy
//! - Evaluating the agent in self-play or against a random opponent

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "ttt")]
#[command(version, about = "Tic-Tac-Toe with an exhaustive minimax agent", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play interactively against the agent
    Play(tictactoe_minimax::cli::commands::play::PlayArgs),

    /// Analyze positions and export the optimal policy
    Analyze(tictactoe_minimax::cli::commands::analyze::AnalyzeArgs),

    /// Evaluate the agent in self-play or against a random opponent
    Evaluate(tictactoe_minimax::cli::commands::evaluate::EvaluateArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => tictactoe_minimax::cli::commands::play::execute(args),
        Commands::Analyze(args) => tictactoe_minimax::cli::commands::analyze::execute(args),
        Commands::Evaluate(args) => tictactoe_minimax::cli::commands::evaluate::execute(args),
    }
}
