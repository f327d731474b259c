//! Interactive play against the agent
//!
//! The shell owns all I/O: it renders the board, collects and validates
//! human input, re-prompts on illegal moves, reports the agent's
//! nodes-expanded metric, and offers a restart. The game core never touches
//! stdin/stdout.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use clap::Parser;

use crate::cli::output;
use crate::search::{MinimaxAgent, Strategy};
use crate::tictactoe::{Action, Game, GameOutcome, GameState, Player};

#[derive(Parser, Debug)]
#[command(about = "Play interactively against the agent")]
pub struct PlayArgs {
    /// Let the agent open the game (agent plays X, you play O)
    #[arg(long)]
    pub agent_first: bool,

    /// Search with plain minimax instead of alpha-beta pruning
    #[arg(long)]
    pub no_alpha_beta: bool,

    /// Hide the nodes-expanded metric after agent moves
    #[arg(long)]
    pub quiet: bool,
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let strategy = if args.no_alpha_beta {
        Strategy::Minimax
    } else {
        Strategy::AlphaBeta
    };
    let agent = MinimaxAgent::new(strategy);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    println!("Tic-Tac-Toe vs minimax agent");
    println!("Cells are (row, col) with indices 0, 1, 2. Enter moves as 'row col'.");

    loop {
        if !play_one_game(&agent, &args, &mut lines)? {
            break;
        }

        print!("\nPlay again? (y/n, default n): ");
        io::stdout().flush()?;
        match lines.next() {
            Some(line) => {
                if line?.trim().eq_ignore_ascii_case("y") {
                    continue;
                } else {
                    break;
                }
            }
            None => break,
        }
    }

    Ok(())
}

/// Run a single game. Returns false when the human quit mid-game.
fn play_one_game(
    agent: &MinimaxAgent,
    args: &PlayArgs,
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> Result<bool> {
    let human = if args.agent_first {
        Player::O
    } else {
        Player::X
    };
    let mut game = Game::new();

    println!("\nYou play {}, the agent plays {}.", human, human.opponent());

    while game.outcome.is_none() {
        let state = game.current_state()?;
        println!("\n{state}\n");

        let action = if state.to_move == human {
            match prompt_human_action(&state, lines)? {
                Some(action) => action,
                None => {
                    println!("Game abandoned.");
                    return Ok(false);
                }
            }
        } else {
            let result = agent.choose_action(&state)?;
            if !args.quiet {
                println!(
                    "  [agent expanded {} nodes]",
                    output::format_number(result.nodes_expanded)
                );
            }
            println!("Agent plays: {}", result.action);
            result.action
        };

        game.play(action)?;
    }

    let final_state = game.current_state()?;
    println!("\n{final_state}\n");
    match game.outcome {
        Some(GameOutcome::Win(winner)) if winner == human => println!("Result: you win!"),
        Some(GameOutcome::Win(_)) => println!("Result: the agent wins."),
        Some(GameOutcome::Draw) => println!("Result: draw."),
        None => {}
    }

    Ok(true)
}

/// Prompt until a legal move arrives; None when the human quits or stdin
/// closes
fn prompt_human_action(
    state: &GameState,
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> Result<Option<Action>> {
    loop {
        print!("Your move (row col, 0-2, e.g. 1 1): ");
        io::stdout().flush()?;

        let line = match lines.next() {
            Some(line) => line?,
            None => return Ok(None),
        };
        let input = line.trim();

        if input.eq_ignore_ascii_case("q") || input.eq_ignore_ascii_case("quit") {
            return Ok(None);
        }

        let Some(action) = parse_action(input) else {
            println!("Invalid input. Enter two numbers 0-2 (row and column), e.g. 0 0 or 1 2.");
            continue;
        };

        match state.apply(action) {
            Ok(_) => return Ok(Some(action)),
            Err(err) => println!("Illegal move: {err}"),
        }
    }
}

/// Parse human input. Accepts "1 1" and "1,1" (0-indexed).
fn parse_action(input: &str) -> Option<Action> {
    let normalized = input.replace(',', " ");
    let mut parts = normalized.split_whitespace();
    let row: usize = parts.next()?.parse().ok()?;
    let col: usize = parts.next()?.parse().ok()?;
    if parts.next().is_some() || row > 2 || col > 2 {
        return None;
    }
    Some(Action::new(row, col))
}
