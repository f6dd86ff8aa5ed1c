use log::{debug, info};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::board::{Board, Direction};

pub const STARTING_TILES: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Init,
    Playing,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The session is not accepting moves (not started, or already over).
    Ignored,
    /// Nothing slid or merged; no tile was spawned.
    Rejected,
    /// The board changed and a tile was spawned.
    Accepted,
    /// Accepted, and the board is now stuck.
    GameOver,
}

impl MoveOutcome {
    pub fn moved(self) -> bool {
        matches!(self, MoveOutcome::Accepted | MoveOutcome::GameOver)
    }
}

/// One game: the board, its random source, and where it is in `Init -> Playing -> GameOver`.
#[derive(Debug, Clone)]
pub struct Session<R> {
    board: Board,
    rng: R,
    phase: Phase,
    moves: u32,
}

impl<R: Rng> Session<R> {
    pub fn new(rng: R) -> Self {
        Self {
            board: Board::new(),
            rng,
            phase: Phase::Init,
            moves: 0,
        }
    }

    /// Resumes from a prepared board. A board that is already stuck starts as `GameOver`.
    pub fn start_with(board: Board, rng: R) -> Self {
        let phase = if board.is_game_over() {
            Phase::GameOver
        } else {
            Phase::Playing
        };
        Self {
            board,
            rng,
            phase,
            moves: 0,
        }
    }

    /// Spawns the starting tiles and begins play. Does nothing outside `Init`.
    pub fn start(&mut self) {
        if self.phase != Phase::Init {
            return;
        }
        for _ in 0..STARTING_TILES {
            self.board.spawn_tile(&mut self.rng);
        }
        self.phase = Phase::Playing;
        info!("game started:\n{}", self.board);
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Accepted moves so far.
    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn apply(&mut self, dir: Direction) -> MoveOutcome {
        if self.phase != Phase::Playing {
            return MoveOutcome::Ignored;
        }
        if !self.board.shift(dir) {
            debug!("{dir:?} rejected");
            return MoveOutcome::Rejected;
        }

        self.moves += 1;
        if let Some((cell, value)) = self.board.spawn_tile(&mut self.rng) {
            debug!(
                "{dir:?} accepted; spawned {value} at ({}, {})",
                cell.row, cell.col
            );
        }

        if self.board.is_game_over() {
            self.phase = Phase::GameOver;
            info!(
                "game over after {} moves, max tile {}:\n{}",
                self.moves,
                self.board.max_tile(),
                self.board
            );
            return MoveOutcome::GameOver;
        }
        MoveOutcome::Accepted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn start_spawns_two_tiles_once() {
        let mut session = Session::new(StdRng::seed_from_u64(3));
        assert_eq!(session.phase(), Phase::Init);
        assert_eq!(session.board().occupied_count(), 0);

        session.start();
        assert_eq!(session.phase(), Phase::Playing);
        assert_eq!(session.board().occupied_count(), 2);

        session.start();
        assert_eq!(session.board().occupied_count(), 2);
    }

    #[test]
    fn moves_before_start_are_ignored() {
        let mut session = Session::new(StdRng::seed_from_u64(3));
        assert_eq!(session.apply(Direction::Left), MoveOutcome::Ignored);
        assert_eq!(session.board(), &Board::new());
    }
}
