//! Zobrist hashing for position identification
//!
//! Zobrist hashing allows O(1) incremental hash updates when placing/removing stones.
//! This is essential for efficient transposition table lookups during search.
//!
//! # Example
//!
//! ```
//! use gomoku::board::{Board, Pos, Stone};
//! use gomoku::search::ZobristTable;
//!
//! let zt = ZobristTable::new(7);
//! let mut board = Board::new();
//!
//! let hash1 = zt.hash(&board);
//!
//! let pos = Pos::new(7, 7);
//! board.place(pos, Stone::Ai);
//! let hash2 = zt.hash(&board);
//!
//! // Incremental update is equivalent to full recomputation
//! assert_eq!(zt.toggle(hash1, pos, Stone::Ai), hash2);
//! ```

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::board::{Board, Pos, Stone, BOARD_SIZE};

/// Zobrist hash table for position hashing.
///
/// One random key per (cell, player). The running hash of a position is the
/// XOR of the keys of every stone on the board; there is no side-to-move key.
#[derive(Debug, Clone)]
pub struct ZobristTable {
    /// `keys[row][col][0]` for AI stones, `[1]` for human stones
    keys: [[[u64; 2]; BOARD_SIZE]; BOARD_SIZE],
}

impl ZobristTable {
    /// Create a table from a seed. Same seed = same table = reproducible hashes.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        let mut keys = [[[0u64; 2]; BOARD_SIZE]; BOARD_SIZE];
        for row in keys.iter_mut() {
            for cell in row.iter_mut() {
                cell[0] = rng.random();
                cell[1] = rng.random();
            }
        }
        Self { keys }
    }

    /// Key of a stone on a cell; empty cells contribute nothing.
    #[inline]
    #[must_use]
    pub fn key(&self, pos: Pos, stone: Stone) -> u64 {
        let cell = &self.keys[pos.row as usize][pos.col as usize];
        match stone {
            Stone::Ai => cell[0],
            Stone::Human => cell[1],
            Stone::Empty => 0,
        }
    }

    /// Compute the full hash for a board position.
    ///
    /// Used to seed the running hash and to check it; search code uses
    /// [`ZobristTable::toggle`] instead.
    #[must_use]
    pub fn hash(&self, board: &Board) -> u64 {
        Pos::all().fold(0u64, |h, pos| h ^ self.key(pos, board.get(pos)))
    }

    /// XOR a stone in or out of a running hash. Its own inverse.
    #[inline]
    #[must_use]
    pub fn toggle(&self, hash: u64, pos: Pos, stone: Stone) -> u64 {
        hash ^ self.key(pos, stone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zobrist_empty_board() {
        let zt = ZobristTable::new(1);
        assert_eq!(zt.hash(&Board::new()), 0);
    }

    #[test]
    fn test_zobrist_deterministic() {
        let zt1 = ZobristTable::new(99);
        let zt2 = ZobristTable::new(99);
        let pos = Pos::new(3, 9);
        assert_eq!(zt1.key(pos, Stone::Human), zt2.key(pos, Stone::Human));
        assert_ne!(
            ZobristTable::new(100).key(pos, Stone::Human),
            zt1.key(pos, Stone::Human)
        );
    }

    #[test]
    fn test_zobrist_players_differ() {
        let zt = ZobristTable::new(5);
        let pos = Pos::new(7, 7);
        assert_ne!(zt.key(pos, Stone::Ai), zt.key(pos, Stone::Human));
        assert_eq!(zt.key(pos, Stone::Empty), 0);
    }

    #[test]
    fn test_zobrist_round_trip_every_cell() {
        let zt = ZobristTable::new(11);
        let mut board = Board::new();
        board.place(Pos::new(7, 7), Stone::Ai);
        board.place(Pos::new(7, 8), Stone::Human);
        let base = zt.hash(&board);

        for pos in Pos::all() {
            for stone in [Stone::Ai, Stone::Human] {
                let placed = zt.toggle(base, pos, stone);
                assert_eq!(zt.toggle(placed, pos, stone), base, "{pos:?} {stone:?}");
            }
        }
    }

    #[test]
    fn test_zobrist_same_position_different_path() {
        let zt = ZobristTable::new(3);
        let a = Pos::new(7, 7);
        let b = Pos::new(8, 8);

        let path1 = zt.toggle(zt.toggle(0, a, Stone::Ai), b, Stone::Human);
        let path2 = zt.toggle(zt.toggle(0, b, Stone::Human), a, Stone::Ai);
        assert_eq!(path1, path2);

        let mut board = Board::new();
        board.place(b, Stone::Human);
        board.place(a, Stone::Ai);
        assert_eq!(zt.hash(&board), path1);
    }

    #[test]
    fn test_zobrist_collision_resistance() {
        let zt = ZobristTable::new(17);
        let mut seen = std::collections::HashSet::new();
        for pos in Pos::all() {
            assert!(seen.insert(zt.key(pos, Stone::Ai)));
            assert!(seen.insert(zt.key(pos, Stone::Human)));
        }
    }
}
