//! Board grid with win and draw detection

use super::{Outcome, Pos, Stone, BOARD_SIZE, TOTAL_CELLS};
use crate::error::{GomokuError, Result};

/// The four line axes, each scanned in both directions
const AXES: [(i32, i32); 4] = [
    (0, 1),  // Horizontal
    (1, 0),  // Vertical
    (1, 1),  // Diagonal SE
    (1, -1), // Diagonal SW
];

/// Game board.
///
/// Besides the grid it tracks the number of empty cells (draw detection) and
/// the last placed stone, which is the only place a new five can appear.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [[Stone; BOARD_SIZE]; BOARD_SIZE],
    empty_cells: usize,
    last_played: Stone,
    last_move: Option<Pos>,
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [[Stone::Empty; BOARD_SIZE]; BOARD_SIZE],
            empty_cells: TOTAL_CELLS,
            last_played: Stone::Empty,
            last_move: None,
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        BOARD_SIZE
    }

    /// Whether `(row, col)` lies on the board
    #[inline]
    pub fn is_inside(&self, row: i32, col: i32) -> bool {
        Pos::is_valid(row, col)
    }

    /// Inside the board and empty
    #[inline]
    pub fn is_playable(&self, row: i32, col: i32) -> bool {
        Pos::try_new(row, col).is_some_and(|pos| self.is_empty(pos))
    }

    /// Get stone at position
    #[inline]
    pub fn get(&self, pos: Pos) -> Stone {
        self.cells[pos.row as usize][pos.col as usize]
    }

    /// Check if position is empty
    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        self.get(pos) == Stone::Empty
    }

    /// Resolve coordinates of a move, rejecting off-board and occupied cells.
    pub fn validate(&self, row: i32, col: i32) -> Result<Pos> {
        let pos = Pos::try_new(row, col).ok_or(GomokuError::OutOfBounds { row, col })?;
        if !self.is_empty(pos) {
            return Err(GomokuError::OccupiedCell { row, col });
        }
        Ok(pos)
    }

    /// Write a cell and record it as the last played stone.
    ///
    /// No occupancy check: callers validate first (see [`Board::validate`]).
    #[inline]
    pub fn place(&mut self, pos: Pos, stone: Stone) {
        self.set_cell(pos, stone);
        self.last_played = stone;
        self.last_move = Some(pos);
    }

    /// Raw-state variant of [`Board::place`] using the +1/-1/0 convention.
    ///
    /// Anything outside that domain is an `InvalidState` contract violation
    /// and the board is left untouched.
    pub fn place_state(&mut self, row: i32, col: i32, state: i8) -> Result<()> {
        let stone = Stone::try_from(state)?;
        let pos = Pos::try_new(row, col).ok_or(GomokuError::OutOfBounds { row, col })?;
        self.place(pos, stone);
        Ok(())
    }

    /// Take back a stone and restore the previous last-move bookkeeping
    #[inline]
    pub(crate) fn unplace(&mut self, pos: Pos, last_played: Stone, last_move: Option<Pos>) {
        self.set_cell(pos, Stone::Empty);
        self.last_played = last_played;
        self.last_move = last_move;
    }

    #[inline]
    fn set_cell(&mut self, pos: Pos, stone: Stone) {
        let cell = &mut self.cells[pos.row as usize][pos.col as usize];
        match (*cell == Stone::Empty, stone == Stone::Empty) {
            (true, false) => self.empty_cells -= 1,
            (false, true) => self.empty_cells += 1,
            _ => {}
        }
        *cell = stone;
    }

    /// Number of empty cells left
    #[inline]
    pub fn empty_cells(&self) -> usize {
        self.empty_cells
    }

    /// State written by the most recent `place`
    #[inline]
    pub fn last_played(&self) -> Stone {
        self.last_played
    }

    /// Cell written by the most recent `place`
    #[inline]
    pub fn last_move(&self) -> Option<Pos> {
        self.last_move
    }

    /// Total stones on board
    #[inline]
    pub fn stone_count(&self) -> usize {
        TOTAL_CELLS - self.empty_cells
    }

    /// Check if board is empty
    #[inline]
    pub fn is_board_empty(&self) -> bool {
        self.empty_cells == TOTAL_CELLS
    }

    /// Positions of every stone of one color, row-major
    pub fn stones(&self, stone: Stone) -> impl Iterator<Item = Pos> + '_ {
        Pos::all().filter(move |&pos| self.get(pos) == stone)
    }

    /// Count same-colored stones stepping away from `pos`, at most 4 steps.
    fn count_direction(&self, pos: Pos, dr: i32, dc: i32, stone: Stone) -> usize {
        (1..5)
            .map_while(|step| pos.offset(dr, dc, step))
            .take_while(|&p| self.get(p) == stone)
            .count()
    }

    /// Five or more `stone`s in a row through `pos` on any axis.
    pub fn is_five_in_row(&self, pos: Pos, stone: Stone) -> bool {
        AXES.iter().any(|&(dr, dc)| {
            let mut run = 1 + self.count_direction(pos, -dr, -dc, stone);
            if run < 5 {
                run += self.count_direction(pos, dr, dc, stone);
            }
            run >= 5
        })
    }

    /// Outcome judged from the most recently placed stone.
    pub fn check_result(&self) -> Outcome {
        match self.last_move {
            Some(pos)
                if self.last_played != Stone::Empty
                    && self.is_five_in_row(pos, self.last_played) =>
            {
                Outcome::Win(self.last_played)
            }
            _ if self.empty_cells == 0 => Outcome::Draw,
            _ => Outcome::Ongoing,
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
