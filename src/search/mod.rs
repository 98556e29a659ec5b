//! Search module for Gomoku AI
//!
//! Contains:
//! - Zobrist hashing for position identification
//! - Board plus running hash with scoped trial moves
//! - Candidate frontier for move generation and ordering
//! - Transposition table for caching search results
//! - Minimax search with alpha-beta pruning

pub mod alphabeta;
pub mod frontier;
pub mod position;
pub mod tt;
pub mod zobrist;

pub use alphabeta::{SearchResult, Searcher};
pub use frontier::Frontier;
pub use position::{Position, TrialMove};
pub use tt::{EntryType, TTEntry, TTStats, TranspositionTable};
pub use zobrist::ZobristTable;
