//! Transposition Table for caching search results
//!
//! The transposition table stores search results indexed by board hash,
//! enabling reuse of previous search results for positions we've seen before.
//! Entries live as long as the engine (or until [`TranspositionTable::clear`]);
//! there is no eviction.
//!
//! # Example
//!
//! ```
//! use gomoku::search::{EntryType, TranspositionTable};
//!
//! let mut tt = TranspositionTable::new();
//!
//! let hash = 0x1234_5678_9ABC_DEF0;
//! tt.store(hash, 3, 100, EntryType::Exact);
//!
//! // Deeper-or-equal entries answer shallower queries
//! assert_eq!(tt.probe(hash, 2, -1000, 1000), Some(100));
//! assert_eq!(tt.probe(hash, 4, -1000, 1000), None);
//! ```

use std::collections::HashMap;

/// Entry type for score interpretation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryType {
    /// Exact score - the search completed inside its window
    Exact,
    /// Lower bound - score >= stored value (beta cutoff)
    LowerBound,
    /// Upper bound - score <= stored value (alpha fail-low)
    UpperBound,
}

impl EntryType {
    /// Classify a node result against the window the node was entered with.
    #[must_use]
    pub fn classify(score: i64, alpha: i64, beta: i64) -> Self {
        if score <= alpha {
            EntryType::UpperBound
        } else if score >= beta {
            EntryType::LowerBound
        } else {
            EntryType::Exact
        }
    }
}

/// Transposition table entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TTEntry {
    /// Evaluation score
    pub score: i64,
    /// Remaining depth the score was searched to
    pub depth: u8,
    /// Type of score (exact, lower bound, upper bound)
    pub entry_type: EntryType,
}

/// Transposition table keyed by the running Zobrist hash.
#[derive(Debug, Default, Clone)]
pub struct TranspositionTable {
    entries: HashMap<u64, TTEntry>,
    hits: u64,
}

impl TranspositionTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Probe the table for a position.
    ///
    /// Returns the stored score only when the entry was searched at least
    /// `depth` plies deep and its bound type answers the `(alpha, beta)`
    /// window; otherwise the caller must search.
    pub fn probe(&mut self, hash: u64, depth: u8, alpha: i64, beta: i64) -> Option<i64> {
        let entry = self.entries.get(&hash)?;
        if entry.depth < depth {
            return None;
        }

        let usable = match entry.entry_type {
            EntryType::Exact => true,
            EntryType::LowerBound => entry.score >= beta,
            EntryType::UpperBound => entry.score <= alpha,
        };
        if usable {
            self.hits += 1;
            Some(entry.score)
        } else {
            None
        }
    }

    /// Raw entry lookup, without depth or window checks
    #[must_use]
    pub fn get(&self, hash: u64) -> Option<&TTEntry> {
        self.entries.get(&hash)
    }

    /// Store a position in the table.
    ///
    /// A shallower result never replaces a deeper one for the same hash.
    pub fn store(&mut self, hash: u64, depth: u8, score: i64, entry_type: EntryType) {
        let entry = TTEntry {
            score,
            depth,
            entry_type,
        };
        self.entries
            .entry(hash)
            .and_modify(|old| {
                if old.depth <= depth {
                    *old = entry;
                }
            })
            .or_insert(entry);
    }

    /// Clear all entries in the table.
    ///
    /// This should be called when starting a new game.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.hits = 0;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get statistics about table usage.
    #[must_use]
    pub fn stats(&self) -> TTStats {
        TTStats {
            entries: self.entries.len(),
            hits: self.hits,
        }
    }
}

/// Statistics about transposition table usage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TTStats {
    /// Number of stored positions
    pub entries: usize,
    /// Probes answered from the table
    pub hits: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tt_store_and_probe() {
        let mut tt = TranspositionTable::new();
        tt.store(12345, 5, 100, EntryType::Exact);

        assert_eq!(tt.probe(12345, 5, -1000, 1000), Some(100));
        assert_eq!(tt.stats().hits, 1);
    }

    #[test]
    fn test_tt_miss() {
        let mut tt = TranspositionTable::new();
        tt.store(12345, 5, 100, EntryType::Exact);
        assert_eq!(tt.probe(54321, 1, -1000, 1000), None);
    }

    #[test]
    fn test_tt_depth_requirement() {
        let mut tt = TranspositionTable::new();
        tt.store(12345, 3, 100, EntryType::Exact);

        assert_eq!(tt.probe(12345, 3, -1000, 1000), Some(100));
        assert_eq!(tt.probe(12345, 1, -1000, 1000), Some(100));
        assert_eq!(tt.probe(12345, 4, -1000, 1000), None);
    }

    #[test]
    fn test_tt_bound_types() {
        let mut tt = TranspositionTable::new();

        tt.store(1, 5, 500, EntryType::LowerBound);
        assert_eq!(tt.probe(1, 5, -1000, 400), Some(500));
        assert_eq!(tt.probe(1, 5, -1000, 600), None);

        tt.store(2, 5, -500, EntryType::UpperBound);
        assert_eq!(tt.probe(2, 5, -400, 1000), Some(-500));
        assert_eq!(tt.probe(2, 5, -600, 1000), None);
    }

    #[test]
    fn test_tt_keeps_deeper_entry() {
        let mut tt = TranspositionTable::new();
        tt.store(7, 4, 10, EntryType::Exact);
        tt.store(7, 2, 20, EntryType::Exact);
        assert_eq!(tt.get(7).map(|e| e.score), Some(10));

        tt.store(7, 4, 30, EntryType::Exact);
        assert_eq!(tt.get(7).map(|e| e.score), Some(30));
    }

    #[test]
    fn test_classify() {
        assert_eq!(EntryType::classify(-5, -5, 5), EntryType::UpperBound);
        assert_eq!(EntryType::classify(5, -5, 5), EntryType::LowerBound);
        assert_eq!(EntryType::classify(0, -5, 5), EntryType::Exact);
    }

    #[test]
    fn test_tt_clear() {
        let mut tt = TranspositionTable::new();
        for i in 0..100 {
            tt.store(i, 1, 0, EntryType::Exact);
        }
        assert_eq!(tt.len(), 100);
        tt.clear();
        assert!(tt.is_empty());
    }
}
