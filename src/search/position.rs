//! Board plus running Zobrist hash, with scoped trial moves
//!
//! Search mutates one shared board. Every descent goes through a
//! [`TrialMove`] guard, whose `Drop` takes the stone back and XORs its key
//! out again, so the board and hash always describe exactly the path from
//! the root to the current node, including after a pruning `break`.

use std::ops::{Deref, DerefMut};

use crate::board::{Board, Pos, Stone};
use crate::error::Result;

use super::ZobristTable;

/// Game board kept in sync with its Zobrist hash.
#[derive(Debug, Clone)]
pub struct Position {
    board: Board,
    zobrist: ZobristTable,
    hash: u64,
}

impl Position {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            board: Board::new(),
            zobrist: ZobristTable::new(seed),
            hash: 0,
        }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Running hash: XOR of the keys of every stone on the board
    #[inline]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    #[inline]
    pub fn zobrist(&self) -> &ZobristTable {
        &self.zobrist
    }

    /// Validate and play a real game move.
    ///
    /// Rejected moves leave the board and hash untouched.
    pub fn apply(&mut self, row: i32, col: i32, stone: Stone) -> Result<Pos> {
        let pos = self.board.validate(row, col)?;
        self.board.place(pos, stone);
        self.hash = self.zobrist.toggle(self.hash, pos, stone);
        Ok(pos)
    }

    /// Play a speculative move that is undone when the guard drops.
    ///
    /// `pos` must be empty; candidates come from the frontier, which only
    /// yields playable cells.
    pub fn trial(&mut self, pos: Pos, stone: Stone) -> TrialMove<'_> {
        debug_assert!(self.board.is_empty(pos), "trial move on occupied cell {pos:?}");
        debug_assert!(stone != Stone::Empty);

        let last_played = self.board.last_played();
        let last_move = self.board.last_move();
        self.board.place(pos, stone);
        self.hash = self.zobrist.toggle(self.hash, pos, stone);

        TrialMove {
            position: self,
            pos,
            stone,
            last_played,
            last_move,
        }
    }

    /// Whether the running hash still equals a from-scratch hash
    pub fn hash_is_consistent(&self) -> bool {
        self.hash == self.zobrist.hash(&self.board)
    }
}

/// Scoped make/unmake of one stone. Derefs to the [`Position`] it modifies.
pub struct TrialMove<'a> {
    position: &'a mut Position,
    pos: Pos,
    stone: Stone,
    last_played: Stone,
    last_move: Option<Pos>,
}

impl Deref for TrialMove<'_> {
    type Target = Position;

    fn deref(&self) -> &Position {
        &*self.position
    }
}

impl DerefMut for TrialMove<'_> {
    fn deref_mut(&mut self) -> &mut Position {
        &mut *self.position
    }
}

impl Drop for TrialMove<'_> {
    fn drop(&mut self) {
        let position = &mut *self.position;
        position.board.unplace(self.pos, self.last_played, self.last_move);
        position.hash = position.zobrist.toggle(position.hash, self.pos, self.stone);
    }
}
