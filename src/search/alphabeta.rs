//! Depth-limited minimax with alpha-beta pruning
//!
//! The engine maximises, the human minimises. Every node:
//!
//! - returns the carried board value at depth 0 or once the game is decided
//! - answers from the transposition table when a deep-enough entry fits the window
//! - otherwise expands the top frontier candidates, best-looking first
//!
//! Each child gets its own copy of the frontier, evaluated and extended for the
//! trial stone, while the board and hash are shared and restored by
//! [`TrialMove`](super::TrialMove) on the way back up.
//!
//! # Example
//!
//! ```
//! use gomoku::board::Stone;
//! use gomoku::config::EngineConfig;
//! use gomoku::eval::evaluate_move;
//! use gomoku::search::{Frontier, Position, Searcher};
//!
//! let config = EngineConfig::default().with_depth(2);
//! let mut searcher = Searcher::new(config);
//! let mut position = Position::new(config.zobrist_seed);
//! let mut frontier = Frontier::new();
//!
//! // Human opens in the centre
//! let pos = position.board().validate(7, 7).unwrap();
//! let value = evaluate_move(searcher.catalog(), position.board(), pos, Stone::Human, 0, &mut frontier);
//! position.apply(7, 7, Stone::Human).unwrap();
//! frontier.update(position.board(), pos, Stone::Human, &config.distant);
//!
//! let result = searcher.search(&mut position, &frontier, value);
//! assert!(result.best_move.is_some());
//! ```

use log::{debug, trace};

use crate::board::{Outcome, Pos, Stone};
use crate::config::EngineConfig;
use crate::eval::{evaluate_move, PatternCatalog};

use super::{EntryType, Frontier, Position, TTStats, TranspositionTable};

/// Window bound; symmetric so negation never overflows
const INF: i64 = i64::MAX;

/// Outcome of one root search.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Chosen cell, `None` when the frontier had no empty cell
    pub best_move: Option<Pos>,
    /// Frontier score the chosen cell had before the search
    pub frontier_score: i64,
    /// Minimax value of the chosen move
    pub score: i64,
    /// Frontier after the chosen move was evaluated and played
    pub next_frontier: Frontier,
    /// Nodes visited, leaves included
    pub nodes: u64,
    pub depth: u8,
}

/// Alpha-beta searcher owning the pattern catalog and the transposition table.
///
/// The table lives as long as the searcher; call [`Searcher::clear_tt`] for a
/// new game.
#[derive(Debug, Clone)]
pub struct Searcher {
    catalog: PatternCatalog,
    tt: TranspositionTable,
    config: EngineConfig,
    nodes: u64,
}

impl Searcher {
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            catalog: PatternCatalog::new(),
            tt: TranspositionTable::new(),
            config,
            nodes: 0,
        }
    }

    #[inline]
    pub fn catalog(&self) -> &PatternCatalog {
        &self.catalog
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn tt_stats(&self) -> TTStats {
        self.tt.stats()
    }

    pub fn clear_tt(&mut self) {
        self.tt.clear();
    }

    /// Search for the engine's best reply from `position`.
    ///
    /// `value` must be the board value of `position` and `frontier` the live
    /// frontier. Both the board and the hash are left exactly as they were.
    pub fn search(&mut self, position: &mut Position, frontier: &Frontier, value: i64) -> SearchResult {
        self.nodes = 0;
        let depth = self.config.depth.max(1);
        let result = self.search_root(position, frontier, value, depth);

        debug_assert!(position.hash_is_consistent(), "hash drifted during search");
        debug!(
            "search depth {} nodes {} score {} move {:?} tt {}",
            result.depth,
            result.nodes,
            result.score,
            result.best_move,
            self.tt.len()
        );
        result
    }

    /// Root node: always expands, never answers from the table, and keeps the
    /// frontier of the best child.
    fn search_root(
        &mut self,
        position: &mut Position,
        frontier: &Frontier,
        value: i64,
        depth: u8,
    ) -> SearchResult {
        self.nodes += 1;
        let hash = position.hash();
        let candidates = frontier.select_top(position.board(), self.config.candidate_limit);
        trace!("root candidates {candidates:?}");

        let mut result = SearchResult {
            best_move: None,
            frontier_score: 0,
            score: value,
            next_frontier: frontier.clone(),
            nodes: 0,
            depth,
        };

        let mut alpha = -INF;
        for (pos, frontier_score) in candidates {
            let (score, child) = self.play_child(position, frontier, value, pos, Stone::Ai, depth, alpha, INF);

            if result.best_move.is_none() || score > result.score {
                result.best_move = Some(pos);
                result.frontier_score = frontier_score;
                result.score = score;
                result.next_frontier = child;
            }
            alpha = alpha.max(score);
        }

        if self.config.use_transposition && result.best_move.is_some() {
            self.tt.store(hash, depth, result.score, EntryType::Exact);
        }
        result.nodes = self.nodes;
        result
    }

    /// Evaluate `pos` for `stone` into a copy of `frontier`, play it, and
    /// search the reply. Returns the child's value and frontier.
    #[allow(clippy::too_many_arguments)]
    fn play_child(
        &mut self,
        position: &mut Position,
        frontier: &Frontier,
        value: i64,
        pos: Pos,
        stone: Stone,
        depth: u8,
        alpha: i64,
        beta: i64,
    ) -> (i64, Frontier) {
        let mut child = frontier.clone();
        let child_value = evaluate_move(&self.catalog, position.board(), pos, stone, value, &mut child);

        let mut trial = position.trial(pos, stone);
        child.update(trial.board(), pos, stone, &self.config.distant);

        let score = self.alpha_beta(&mut trial, depth - 1, child_value, &child, alpha, beta, stone == Stone::Human);
        (score, child)
    }

    /// Interior node. `maximizing` is true when the engine is to move.
    #[allow(clippy::too_many_arguments)]
    fn alpha_beta(
        &mut self,
        position: &mut Position,
        depth: u8,
        value: i64,
        frontier: &Frontier,
        mut alpha: i64,
        mut beta: i64,
        maximizing: bool,
    ) -> i64 {
        self.nodes += 1;

        if depth == 0 || position.board().check_result() != Outcome::Ongoing {
            return value;
        }

        let hash = position.hash();
        if self.config.use_transposition {
            if let Some(score) = self.tt.probe(hash, depth, alpha, beta) {
                return score;
            }
        }

        let candidates = frontier.select_top(position.board(), self.config.candidate_limit);
        if candidates.is_empty() {
            return value;
        }

        let (alpha_orig, beta_orig) = (alpha, beta);
        let stone = if maximizing { Stone::Ai } else { Stone::Human };
        let mut best = if maximizing { -INF } else { INF };

        for (pos, _) in candidates {
            let (score, _) = self.play_child(position, frontier, value, pos, stone, depth, alpha, beta);

            if maximizing {
                if score > best {
                    best = score;
                }
                alpha = alpha.max(best);
            } else {
                if score < best {
                    best = score;
                }
                beta = beta.min(best);
            }

            if beta <= alpha {
                break;
            }
        }

        if self.config.use_transposition {
            let entry_type = EntryType::classify(best, alpha_orig, beta_orig);
            self.tt.store(hash, depth, best, entry_type);
        }
        best
    }
}
