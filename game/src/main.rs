use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use log::info;

use game::logic::TwentyFortyEight;
use game::settings::{Cli, Settings};
use game::shell::Shell;

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let settings = Settings::from_cli(&cli);
    let seed = settings.seed.unwrap_or_else(rand::random);
    info!("starting 2048 with seed {seed}");

    let session = TwentyFortyEight::new(seed).session();
    let shell = Shell::new(session, settings.game_over_pause);
    engine::app::run_game(settings.app_config(), shell)
        .context("failed to open the game window")?;
    Ok(())
}
