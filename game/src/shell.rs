use std::time::{Duration, Instant};

use engine::app::{Flow, GameApp};
use engine::graphics::{fit_text_scale, Renderer2d};
use engine::ui::{Rect, Size};
use log::info;
use rand::Rng;
use winit::event::VirtualKeyCode;

use crate::board::{Board, Direction, SIZE};
use crate::palette::{self, tile_color};
use crate::session::{MoveOutcome, Session};

pub const GAME_OVER_TEXT: &str = "GAME OVER";

// Block-font scale cap; 8 gives 40px tall digits on a 100px tile.
const MAX_TEXT_SCALE: u32 = 8;

pub fn map_key_to_direction(key: VirtualKeyCode) -> Option<Direction> {
    match key {
        VirtualKeyCode::Left => Some(Direction::Left),
        VirtualKeyCode::Right => Some(Direction::Right),
        VirtualKeyCode::Up => Some(Direction::Up),
        VirtualKeyCode::Down => Some(Direction::Down),
        _ => None,
    }
}

/// Square board area of the current frame.
pub fn board_rect(gfx: &dyn Renderer2d) -> Rect {
    let s = gfx.size();
    Rect::from_size(s.width, s.height).square()
}

pub fn tile_rect(board: Rect, row: usize, col: usize) -> Rect {
    board.grid_cell(SIZE as u32, SIZE as u32, row as u32, col as u32)
}

pub fn draw_board(gfx: &mut dyn Renderer2d, board: &Board) {
    gfx.clear(palette::BACKGROUND);
    let area = board_rect(gfx);

    for (row, line) in board.rows().iter().enumerate() {
        for (col, &value) in line.iter().enumerate() {
            let rect = tile_rect(area, row, col);
            gfx.fill_rect(rect, tile_color(value));
            if value == 0 {
                continue;
            }
            let label = value.to_string();
            let bounds = Size::new(rect.w * 3 / 4, rect.h * 3 / 4);
            let scale = fit_text_scale(&label, bounds, MAX_TEXT_SCALE);
            gfx.draw_text_centered(rect, &label, palette::TILE_TEXT, scale);
        }
    }
}

pub fn draw_game_over(gfx: &mut dyn Renderer2d) {
    let s = gfx.size();
    let screen = Rect::from_size(s.width, s.height);
    gfx.blend_rect(screen, palette::OVERLAY, palette::OVERLAY_ALPHA);

    let bounds = Size::new(screen.w * 9 / 10, screen.h / 4);
    let scale = fit_text_scale(GAME_OVER_TEXT, bounds, MAX_TEXT_SCALE);
    gfx.draw_text_centered(screen, GAME_OVER_TEXT, palette::OVERLAY_TEXT, scale);
}

/// Window-side glue: keys in, session moves, frames out.
pub struct Shell<R> {
    session: Session<R>,
    game_over_pause: Duration,
    exit_at: Option<Instant>,
}

impl<R: Rng> Shell<R> {
    /// Takes a started session. One that is already over gets its exit deadline on the first
    /// `update`.
    pub fn new(session: Session<R>, game_over_pause: Duration) -> Self {
        Self {
            session,
            game_over_pause,
            exit_at: None,
        }
    }

    pub fn session(&self) -> &Session<R> {
        &self.session
    }

    /// When the game-over pause ends, once the game is over.
    pub fn exit_at(&self) -> Option<Instant> {
        self.exit_at
    }

    pub fn handle_direction(&mut self, dir: Direction, now: Instant) -> MoveOutcome {
        let outcome = self.session.apply(dir);
        if outcome == MoveOutcome::GameOver {
            self.exit_at = Some(now + self.game_over_pause);
        }
        outcome
    }
}

impl<R: Rng> GameApp for Shell<R> {
    fn on_key(&mut self, key: VirtualKeyCode, now: Instant) -> Flow {
        if key == VirtualKeyCode::Escape {
            info!("escape pressed, quitting");
            return Flow::Exit;
        }
        if let Some(dir) = map_key_to_direction(key) {
            self.handle_direction(dir, now);
        }
        Flow::Continue
    }

    fn update(&mut self, now: Instant) -> Flow {
        if self.exit_at.is_none() && self.session.is_game_over() {
            self.exit_at = Some(now + self.game_over_pause);
        }
        match self.exit_at {
            Some(deadline) if now >= deadline => Flow::Exit,
            _ => Flow::Continue,
        }
    }

    fn render(&mut self, gfx: &mut dyn Renderer2d) {
        draw_board(gfx, self.session.board());
        if self.session.is_game_over() {
            draw_game_over(gfx);
        }
    }
}
