//! Plays a seeded game headless with uniformly random moves and prints the final board.
//! Handy for smoke-testing the engine and reproducing a board from a seed.

use anyhow::Result;
use clap::Parser;
use engine::HeadlessRunner;
use env_logger::Env;
use log::info;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use game::board::{Board, Direction};
use game::logic::TwentyFortyEight;

// Keeps the move picker's stream independent of the spawn stream for the same seed.
const PICKER_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

#[derive(Debug, Parser)]
#[command(author, version, about = "Play 2048 headless with random moves")]
struct Cli {
    /// Seed for both tile spawns and move picks (random if omitted)
    #[arg(long, value_name = "N")]
    seed: Option<u64>,

    /// Stop after this many key presses even if the game is not over
    #[arg(long, value_name = "N", default_value_t = 10_000)]
    max_steps: usize,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct Summary {
    seed: u64,
    steps: usize,
    moves: u32,
    game_over: bool,
    max_tile: u32,
    sum: u64,
    board: Board,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let seed = cli.seed.unwrap_or_else(rand::random);
    let mut picker = ChaCha8Rng::seed_from_u64(seed ^ PICKER_SALT);
    let inputs =
        std::iter::repeat_with(move || Direction::ALL[picker.gen_range(0..Direction::ALL.len())]);

    let mut runner = HeadlessRunner::new(TwentyFortyEight::new(seed));
    let steps = runner.run_until(inputs, cli.max_steps, |session| session.is_game_over());
    let session = runner.state();
    info!("autoplay finished after {steps} steps");

    let board = *session.board();
    let summary = Summary {
        seed,
        steps,
        moves: session.moves(),
        game_over: session.is_game_over(),
        max_tile: board.max_tile(),
        sum: board.sum(),
        board,
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!(
            "seed {}: {} steps, {} moves, max tile {}, game over: {}",
            summary.seed, summary.steps, summary.moves, summary.max_tile, summary.game_over
        );
        println!("{}", summary.board);
    }
    Ok(())
}
