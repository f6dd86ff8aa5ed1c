use std::time::Duration;

use clap::Parser;
use engine::app::AppConfig;
use engine::surface::SurfaceSize;

pub const WINDOW_TITLE: &str = "2048 Game";
pub const DEFAULT_WINDOW_SIZE: u32 = 400;
pub const DEFAULT_TARGET_FPS: u32 = 60;
pub const DEFAULT_GAME_OVER_PAUSE: Duration = Duration::from_millis(2000);

#[derive(Debug, Parser)]
#[command(author, version, about = "Slide and merge tiles on a 4x4 board")]
pub struct Cli {
    /// Seed for tile spawning (random if omitted)
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    /// Window side length in logical pixels
    #[arg(long, value_name = "PX", default_value_t = DEFAULT_WINDOW_SIZE)]
    pub size: u32,

    /// Frame rate cap
    #[arg(long, value_name = "FPS", default_value_t = DEFAULT_TARGET_FPS)]
    pub fps: u32,

    /// How long the game-over screen stays up before exiting
    #[arg(long, value_name = "MS", default_value_t = DEFAULT_GAME_OVER_PAUSE.as_millis() as u64)]
    pub game_over_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub window_size: u32,
    pub target_fps: u32,
    pub game_over_pause: Duration,
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            target_fps: DEFAULT_TARGET_FPS,
            game_over_pause: DEFAULT_GAME_OVER_PAUSE,
            seed: None,
        }
    }
}

impl Settings {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            // Four tiles need at least a few pixels each to show anything.
            window_size: cli.size.max(16),
            target_fps: cli.fps.clamp(1, 240),
            game_over_pause: Duration::from_millis(cli.game_over_ms),
            seed: cli.seed,
        }
    }

    pub fn app_config(&self) -> AppConfig {
        AppConfig {
            title: WINDOW_TITLE.to_string(),
            size: SurfaceSize::square(self.window_size),
            target_fps: self.target_fps,
            resizable: false,
            vsync: true,
        }
    }
}
