//! Agent evaluation: self-play and random opponents
//!
//! Self-play from the empty board always ends in a draw; against a
//! uniform-random opponent the agent wins or draws every game. Both runs
//! report node-expansion totals so the pruning payoff is visible.

use anyhow::Result;
use clap::{Parser, ValueEnum};
use rand::{SeedableRng, prelude::IndexedRandom, rngs::StdRng};

use crate::cli::output;
use crate::search::{MinimaxAgent, Strategy};
use crate::tictactoe::{Game, GameOutcome, Player};

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum Opponent {
    /// The agent plays itself
    Optimal,
    /// Uniformly random legal moves
    Random,
}

#[derive(Parser, Debug)]
#[command(about = "Evaluate the agent in self-play or against a random opponent")]
pub struct EvaluateArgs {
    /// Who the agent plays against
    #[arg(long, value_enum, default_value_t = Opponent::Optimal)]
    pub opponent: Opponent,

    /// Number of games against the random opponent (the agent alternates
    /// sides)
    #[arg(long, default_value_t = 100)]
    pub games: u64,

    /// RNG seed for the random opponent
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Search with plain minimax instead of alpha-beta pruning
    #[arg(long)]
    pub no_alpha_beta: bool,
}

pub fn execute(args: EvaluateArgs) -> Result<()> {
    let strategy = if args.no_alpha_beta {
        Strategy::Minimax
    } else {
        Strategy::AlphaBeta
    };
    let agent = MinimaxAgent::new(strategy);

    match args.opponent {
        Opponent::Optimal => evaluate_self_play(&agent),
        Opponent::Random => evaluate_vs_random(&agent, args.games, args.seed),
    }
}

/// Play the agent against itself from both opening conventions
fn evaluate_self_play(agent: &MinimaxAgent) -> Result<()> {
    output::print_section("Self-play evaluation");

    let mut total_nodes = 0;
    for first_player in [Player::X, Player::O] {
        let mut game = Game::with_first_player(first_player);
        while game.outcome.is_none() {
            let state = game.current_state()?;
            let result = agent.choose_action(&state)?;
            total_nodes += result.nodes_expanded;
            game.play(result.action)?;
        }

        let outcome = match game.outcome {
            Some(GameOutcome::Win(player)) => format!("{player} wins"),
            Some(GameOutcome::Draw) => "draw".to_string(),
            None => unreachable!("game loop exits only on a decided game"),
        };
        output::print_kv(&format!("{first_player} opens"), &outcome);
    }

    output::print_kv("Total nodes", &output::format_number(total_nodes));
    Ok(())
}

/// Play many games against a seeded uniform-random opponent, alternating
/// which side the agent controls
fn evaluate_vs_random(agent: &MinimaxAgent, games: u64, seed: u64) -> Result<()> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut wins = 0u64;
    let mut draws = 0u64;
    let mut losses = 0u64;
    let mut total_nodes = 0u64;

    let pb = output::create_game_progress(games);
    for i in 0..games {
        let agent_side = if i.is_multiple_of(2) {
            Player::X
        } else {
            Player::O
        };

        let mut game = Game::new();
        while game.outcome.is_none() {
            let state = game.current_state()?;
            let action = if state.to_move == agent_side {
                let result = agent.choose_action(&state)?;
                total_nodes += result.nodes_expanded;
                result.action
            } else {
                let actions = state.legal_actions();
                *actions
                    .choose(&mut rng)
                    .expect("non-terminal state has at least one legal action")
            };
            game.play(action)?;
        }

        match game.outcome {
            Some(GameOutcome::Win(player)) if player == agent_side => wins += 1,
            Some(GameOutcome::Win(_)) => losses += 1,
            Some(GameOutcome::Draw) => draws += 1,
            None => unreachable!("game loop exits only on a decided game"),
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    output::print_section("Evaluation vs random opponent");
    output::print_kv("Games", &output::format_number(games));
    output::print_kv("Agent wins", &output::format_number(wins));
    output::print_kv("Draws", &output::format_number(draws));
    output::print_kv("Agent losses", &output::format_number(losses));
    output::print_kv("Total nodes", &output::format_number(total_nodes));

    if losses > 0 {
        println!("\nWARNING: an optimal agent should never lose; check the search.");
    }

    Ok(())
}
