//! Board representation for Gomoku

pub mod board;


// Re-exports
pub use board::Board;

use crate::error::GomokuError;

/// Board size (15x15)
pub const BOARD_SIZE: usize = 15;
pub const TOTAL_CELLS: usize = BOARD_SIZE * BOARD_SIZE; // 225

/// Centre cell, the fixed opening move
pub const CENTER: Pos = Pos { row: 7, col: 7 };

/// Cell states. The engine always plays [`Stone::Ai`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stone {
    Empty,
    Ai,
    Human,
}

impl Stone {
    /// Get opponent
    #[inline]
    pub fn opponent(self) -> Stone {
        match self {
            Stone::Ai => Stone::Human,
            Stone::Human => Stone::Ai,
            Stone::Empty => Stone::Empty,
        }
    }

    /// Scoring sign: +1 for the engine, -1 for the human, 0 for empty
    #[inline]
    pub fn sign(self) -> i64 {
        match self {
            Stone::Ai => 1,
            Stone::Human => -1,
            Stone::Empty => 0,
        }
    }
}

/// Raw cell values follow the +1 (AI) / -1 (Human) / 0 (Empty) convention.
impl TryFrom<i8> for Stone {
    type Error = GomokuError;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Stone::Empty),
            1 => Ok(Stone::Ai),
            -1 => Ok(Stone::Human),
            other => Err(GomokuError::InvalidState(other)),
        }
    }
}

/// Game state as seen after the most recent move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Ongoing,
    Win(Stone),
    Draw,
}

/// Position on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pos {
    pub row: u8,
    pub col: u8,
}

impl Pos {
    #[inline]
    pub fn new(row: u8, col: u8) -> Self {
        debug_assert!(row < BOARD_SIZE as u8 && col < BOARD_SIZE as u8);
        Self { row, col }
    }

    /// Checked construction from signed coordinates
    #[inline]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn try_new(row: i32, col: i32) -> Option<Self> {
        Self::is_valid(row, col).then(|| Self::new(row as u8, col as u8))
    }

    #[inline]
    pub fn to_index(self) -> usize {
        self.row as usize * BOARD_SIZE + self.col as usize
    }

    #[inline]
    pub fn from_index(idx: usize) -> Self {
        Self {
            row: (idx / BOARD_SIZE) as u8,
            col: (idx % BOARD_SIZE) as u8,
        }
    }

    #[inline]
    pub fn is_valid(row: i32, col: i32) -> bool {
        row >= 0 && row < BOARD_SIZE as i32 && col >= 0 && col < BOARD_SIZE as i32
    }

    /// Cell `steps` away along `(dr, dc)`, if it is on the board
    #[inline]
    pub fn offset(self, dr: i32, dc: i32, steps: i32) -> Option<Pos> {
        Self::try_new(
            i32::from(self.row) + dr * steps,
            i32::from(self.col) + dc * steps,
        )
    }

    /// Manhattan distance between two cells
    #[inline]
    pub fn manhattan(self, other: Pos) -> i32 {
        (i32::from(self.row) - i32::from(other.row)).abs()
            + (i32::from(self.col) - i32::from(other.col)).abs()
    }

    /// Iterate over every board position in row-major order
    pub fn all() -> impl Iterator<Item = Pos> {
        (0..TOTAL_CELLS).map(Pos::from_index)
    }
}

impl PartialOrd for Pos {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pos {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.to_index().cmp(&other.to_index())
    }
}
