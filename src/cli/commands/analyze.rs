//! Position analysis and optimal-policy export
//!
//! Shows what the agent sees in a position: threats on the board, the chosen
//! action with its value, the node cost under both search strategies, and
//! the full set of minimax-equivalent actions from the solver.

use std::{collections::HashMap, path::PathBuf};

use anyhow::Result;
use clap::Parser;
use serde::Serialize;

use crate::cli::output;
use crate::search::{self, MinimaxAgent, Strategy};
use crate::tictactoe::{Action, GameState, LineAnalyzer, Player};

#[derive(Parser, Debug)]
#[command(about = "Analyze positions and export the optimal policy")]
pub struct AnalyzeArgs {
    /// Board to analyze, e.g. "XX.OO...." or "XX.OO...._O" (optional `_X`/`_O`
    /// suffix fixes the player to move)
    #[arg(long)]
    pub state: Option<String>,

    /// Export the optimal policy for every reachable state as JSON
    #[arg(long)]
    pub export: Option<PathBuf>,
}

pub fn execute(args: AnalyzeArgs) -> Result<()> {
    if let Some(s) = &args.state {
        let state = GameState::from_string(s)?;
        analyze_position(&state, "Custom state")?;
    } else if args.export.is_none() {
        println!("Agent analysis for key positions:");
        analyze_position(&GameState::new(), "Empty board")?;
        analyze_position(
            &GameState::from_string("....X...._O")?,
            "Center taken by X",
        )?;
        analyze_position(
            &GameState::from_string("X........_O")?,
            "Corner taken by X",
        )?;
    }

    if let Some(path) = &args.export {
        export_policy(path)?;
        println!("\nOptimal policy exported to: {}", path.display());
    }

    Ok(())
}

/// Analyze a single position
fn analyze_position(state: &GameState, description: &str) -> Result<()> {
    output::print_section(description);
    println!("{state}");

    if state.is_terminal() {
        let verdict = match state.winner() {
            Some(player) => format!("{player} has won"),
            None => "draw".to_string(),
        };
        println!("Terminal state: {verdict} (utility {})", state.utility()?);
        return Ok(());
    }

    output::print_kv("To move", &state.to_move.to_string());
    output::print_kv("Pieces placed", &state.occupied_count().to_string());
    let mut any_threat = false;
    for player in [Player::X, Player::O] {
        if LineAnalyzer::has_immediate_win(&state.cells, player) {
            any_threat = true;
            let wins = format_positions(LineAnalyzer::winning_moves(&state.cells, player));
            output::print_kv(&format!("Immediate wins for {player}"), &wins);
        }
    }
    if !any_threat {
        output::print_kv("Immediate wins", "none");
    }

    let plain = MinimaxAgent::new(Strategy::Minimax).choose_action(state)?;
    let pruned = MinimaxAgent::new(Strategy::AlphaBeta).choose_action(state)?;

    output::print_kv("Chosen action", &plain.action.to_string());
    output::print_kv("Value", &plain.value.to_string());
    output::print_kv(
        "Minimax nodes",
        &output::format_number(plain.nodes_expanded),
    );
    output::print_kv(
        "Alpha-beta nodes",
        &output::format_number(pruned.nodes_expanded),
    );

    let policy = search::solve(state);
    let all_optimal = policy
        .optimal_actions
        .iter()
        .map(|a| a.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    output::print_kv("All optimal actions", &all_optimal);

    Ok(())
}

fn format_positions(positions: std::collections::HashSet<usize>) -> String {
    let mut sorted: Vec<usize> = positions.into_iter().collect();
    sorted.sort_unstable();
    sorted
        .into_iter()
        .map(|pos| Action::from_index(pos).to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Serialize)]
struct PolicyExport {
    description: &'static str,
    total_states: usize,
    policy: HashMap<String, PolicyEntry>,
}

#[derive(Serialize)]
struct PolicyEntry {
    value: i32,
    optimal_actions: Vec<Action>,
}

/// Export the optimal policy for every reachable non-terminal state as JSON
fn export_policy(path: &PathBuf) -> Result<()> {
    let spinner = output::create_spinner("Solving all reachable states...");
    let policies = search::solve_reachable(&GameState::new());
    spinner.finish_and_clear();

    // Terminal states carry no decision, so they are left out of the table
    let mut policy = HashMap::new();
    for (key, entry) in policies {
        if !entry.optimal_actions.is_empty() {
            policy.insert(
                key,
                PolicyEntry {
                    value: entry.value,
                    optimal_actions: entry.optimal_actions,
                },
            );
        }
    }

    println!("  Total policy entries: {}", policy.len());

    let export = PolicyExport {
        description: "Optimal minimax policy for Tic-Tac-Toe",
        total_states: policy.len(),
        policy,
    };

    let file = std::fs::File::create(path)?;
    serde_json::to_writer_pretty(file, &export)?;

    Ok(())
}
