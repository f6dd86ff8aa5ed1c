//! The 4x4 grid and its move rules.
//!
//! Every move works on one line at a time: the line is read in the direction of travel so that
//! tiles always slide toward index 0, then compressed, merged in a single pass, compressed
//! again and written back.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const SIZE: usize = 4;

/// Largest tile a 4x4 game can ever produce.
pub const MAX_TILE: u32 = 1 << 17;

/// Chance that a spawned tile is a 2 rather than a 4.
pub const SPAWN_TWO_PROBABILITY: f64 = 0.9;

pub type Line = [u32; SIZE];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// Lines are read back-to-front when tiles travel toward the high index.
    fn reads_reversed(self) -> bool {
        matches!(self, Direction::Right | Direction::Down)
    }

    /// Grid position of element `k` of line `index` when read in this direction
    /// (before any reversal).
    fn cell(self, index: usize, k: usize) -> Cell {
        match self {
            Direction::Left | Direction::Right => Cell::new(index, k),
            Direction::Up | Direction::Down => Cell::new(k, index),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("tile at row {row}, col {col} is {value}; tiles must be 0 or a power of two >= 2")]
    NotPowerOfTwo { row: usize, col: usize, value: u32 },
    #[error("tile at row {row}, col {col} is {value}, above the {max} limit", max = MAX_TILE)]
    TooLarge { row: usize, col: usize, value: u32 },
}

pub fn is_valid_tile(value: u32) -> bool {
    value == 0 || (value >= 2 && value.is_power_of_two())
}

/// Removes zeros, keeping the order of the remaining tiles, and pads with zeros.
pub fn compress_line(line: Line) -> Line {
    let mut out = [0; SIZE];
    for (slot, value) in out.iter_mut().zip(line.into_iter().filter(|&v| v != 0)) {
        *slot = value;
    }
    out
}

/// One left-to-right pass over adjacent pairs: an equal non-zero pair doubles into the left
/// cell and zeroes the right one.
///
/// The zeroed cell cannot pair with its right neighbour, so no tile merges twice.
pub fn merge_line(mut line: Line) -> Line {
    for i in 0..SIZE - 1 {
        if line[i] != 0 && line[i] == line[i + 1] {
            line[i] *= 2;
            line[i + 1] = 0;
        }
    }
    line
}

/// Compress, merge, compress: the full slide of one line toward index 0.
pub fn slide_line(line: Line) -> Line {
    compress_line(merge_line(compress_line(line)))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "[[u32; SIZE]; SIZE]", into = "[[u32; SIZE]; SIZE]")]
pub struct Board {
    cells: [[u32; SIZE]; SIZE],
}

impl Board {
    pub const fn new() -> Self {
        Self {
            cells: [[0; SIZE]; SIZE],
        }
    }

    pub fn from_rows(rows: [[u32; SIZE]; SIZE]) -> Result<Self, BoardError> {
        for (row, line) in rows.iter().enumerate() {
            for (col, &value) in line.iter().enumerate() {
                if !is_valid_tile(value) {
                    return Err(BoardError::NotPowerOfTwo { row, col, value });
                }
                if value > MAX_TILE {
                    return Err(BoardError::TooLarge { row, col, value });
                }
            }
        }
        Ok(Self { cells: rows })
    }

    pub fn rows(&self) -> &[[u32; SIZE]; SIZE] {
        &self.cells
    }

    pub fn get(&self, cell: Cell) -> u32 {
        self.cells[cell.row][cell.col]
    }

    pub fn row(&self, row: usize) -> Line {
        self.cells[row]
    }

    pub fn column(&self, col: usize) -> Line {
        std::array::from_fn(|row| self.cells[row][col])
    }

    /// Empty cells in row-major order.
    pub fn empty_cells(&self) -> Vec<Cell> {
        (0..SIZE)
            .flat_map(|row| (0..SIZE).map(move |col| Cell::new(row, col)))
            .filter(|&cell| self.get(cell) == 0)
            .collect()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(|&v| v != 0)
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().flatten().filter(|&&v| v != 0).count()
    }

    pub fn sum(&self) -> u64 {
        self.cells.iter().flatten().map(|&v| u64::from(v)).sum()
    }

    pub fn max_tile(&self) -> u32 {
        self.cells.iter().flatten().copied().max().unwrap_or(0)
    }

    /// Non-zero tiles, sorted ascending.
    pub fn tiles_sorted(&self) -> Vec<u32> {
        let mut tiles: Vec<u32> = self.cells.iter().flatten().copied().filter(|&v| v != 0).collect();
        tiles.sort_unstable();
        tiles
    }

    fn read_line(&self, dir: Direction, index: usize) -> Line {
        let mut line: Line = std::array::from_fn(|k| self.get(dir.cell(index, k)));
        if dir.reads_reversed() {
            line.reverse();
        }
        line
    }

    fn write_line(&mut self, dir: Direction, index: usize, mut line: Line) {
        if dir.reads_reversed() {
            line.reverse();
        }
        for (k, value) in line.into_iter().enumerate() {
            let cell = dir.cell(index, k);
            self.cells[cell.row][cell.col] = value;
        }
    }

    /// Slides every line in `dir`. Returns whether any cell changed; when it returns false the
    /// board is untouched.
    pub fn shift(&mut self, dir: Direction) -> bool {
        let mut moved = false;
        for index in 0..SIZE {
            let before = self.read_line(dir, index);
            let after = slide_line(before);
            if after != before {
                self.write_line(dir, index, after);
                moved = true;
            }
        }
        moved
    }

    /// The board `shift` would produce, without touching `self`.
    pub fn shifted(&self, dir: Direction) -> (Self, bool) {
        let mut next = *self;
        let moved = next.shift(dir);
        (next, moved)
    }

    /// Puts a 2 (or, one time in ten, a 4) on a uniformly chosen empty cell.
    ///
    /// Returns what was placed, or `None` on a full board.
    pub fn spawn_tile<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<(Cell, u32)> {
        let empty = self.empty_cells();
        if empty.is_empty() {
            return None;
        }
        let cell = empty[rng.gen_range(0..empty.len())];
        let value = if rng.gen_bool(SPAWN_TWO_PROBABILITY) { 2 } else { 4 };
        self.cells[cell.row][cell.col] = value;
        Some((cell, value))
    }

    /// True when the board is full and no two horizontal or vertical neighbours are equal.
    pub fn is_game_over(&self) -> bool {
        for row in 0..SIZE {
            for col in 0..SIZE {
                let value = self.cells[row][col];
                if value == 0 {
                    return false;
                }
                if col + 1 < SIZE && value == self.cells[row][col + 1] {
                    return false;
                }
                if row + 1 < SIZE && value == self.cells[row + 1][col] {
                    return false;
                }
            }
        }
        true
    }
}

impl TryFrom<[[u32; SIZE]; SIZE]> for Board {
    type Error = BoardError;

    fn try_from(rows: [[u32; SIZE]; SIZE]) -> Result<Self, Self::Error> {
        Board::from_rows(rows)
    }
}

impl From<Board> for [[u32; SIZE]; SIZE] {
    fn from(board: Board) -> Self {
        board.cells
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for (j, &value) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, " ")?;
                }
                if value == 0 {
                    write!(f, "{:>6}", ".")?;
                } else {
                    write!(f, "{value:>6}")?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compress_keeps_order_and_pads() {
        assert_eq!(compress_line([0, 2, 0, 4]), [2, 4, 0, 0]);
        assert_eq!(compress_line([0, 0, 0, 0]), [0, 0, 0, 0]);
    }

    #[test]
    fn merge_is_a_single_pass() {
        assert_eq!(merge_line([2, 2, 2, 2]), [4, 0, 4, 0]);
        assert_eq!(merge_line([4, 4, 8, 0]), [8, 0, 8, 0]);
        assert_eq!(merge_line([2, 4, 2, 4]), [2, 4, 2, 4]);
    }

    #[test]
    fn slide_does_not_remerge_a_merged_tile() {
        assert_eq!(slide_line([2, 2, 2, 2]), [4, 4, 0, 0]);
        assert_eq!(slide_line([4, 4, 8, 0]), [8, 8, 0, 0]);
        assert_eq!(slide_line([2, 2, 4, 0]), [4, 4, 0, 0]);
        assert_eq!(slide_line([0, 2, 2, 2]), [4, 2, 0, 0]);
    }

    #[test]
    fn column_reads_top_to_bottom() {
        let board = Board::from_rows([[2, 0, 0, 0], [4, 0, 0, 0], [8, 0, 0, 0], [16, 0, 0, 0]])
            .unwrap();
        assert_eq!(board.column(0), [2, 4, 8, 16]);
        assert_eq!(board.read_line(Direction::Down, 0), [16, 8, 4, 2]);
        assert_eq!(board.read_line(Direction::Right, 0), [0, 0, 0, 2]);
    }

    #[test]
    fn from_rows_rejects_non_powers_of_two() {
        let err = Board::from_rows([[0, 0, 0, 0], [0, 3, 0, 0], [0; 4], [0; 4]]).unwrap_err();
        assert_eq!(
            err,
            BoardError::NotPowerOfTwo {
                row: 1,
                col: 1,
                value: 3
            }
        );
        assert!(Board::from_rows([[1, 0, 0, 0], [0; 4], [0; 4], [0; 4]]).is_err());
        assert!(matches!(
            Board::from_rows([[MAX_TILE * 2, 0, 0, 0], [0; 4], [0; 4], [0; 4]]),
            Err(BoardError::TooLarge { .. })
        ));
    }

    #[test]
    fn display_renders_dots_for_empty_cells() {
        let board = Board::from_rows([[2, 0, 0, 0], [0; 4], [0; 4], [0, 0, 0, 2048]]).unwrap();
        let text = board.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].trim_start().starts_with('2'));
        assert!(lines[3].ends_with("2048"));
        assert_eq!(lines[1].matches('.').count(), 4);
    }
}
