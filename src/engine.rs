//! Game-facing AI engine
//!
//! [`AIEngine`] owns the real game: the board with its running hash, the live
//! frontier, and the incrementally maintained board value. Moves from either
//! side go through the same path (evaluate into the frontier, place, extend
//! the frontier), so the board value always equals a full rescan of the board.
//!
//! # Example
//!
//! ```
//! use gomoku::{AIEngine, EngineConfig, Outcome};
//!
//! let mut engine = AIEngine::with_config(EngineConfig::default().with_depth(2));
//!
//! let opening = engine.propose_first_move();
//! engine.apply_engine_move(opening.row.into(), opening.col.into()).unwrap();
//! engine.apply_human_move(6, 7).unwrap();
//!
//! let reply = engine.propose_move().unwrap();
//! engine.apply_engine_move(reply.row.into(), reply.col.into()).unwrap();
//! assert_eq!(engine.check_result(), Outcome::Ongoing);
//! ```

use std::time::Instant;

use log::{debug, info};

use crate::board::{Board, Outcome, Pos, Stone, CENTER};
use crate::config::EngineConfig;
use crate::error::{GomokuError, Result};
use crate::eval::evaluate_move;
use crate::search::{Frontier, Position, SearchResult, Searcher, TTStats};

/// Summary of the engine's last search, for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveResult {
    /// Chosen cell
    pub best_move: Pos,
    /// Minimax value of the chosen move
    pub score: i64,
    /// Frontier score of the chosen cell before the search
    pub frontier_score: i64,
    /// Number of nodes searched
    pub nodes: u64,
    /// Time taken in milliseconds
    pub time_ms: u64,
}

impl MoveResult {
    #[inline]
    fn from_search(best_move: Pos, result: &SearchResult, time_ms: u64) -> Self {
        Self {
            best_move,
            score: result.score,
            frontier_score: result.frontier_score,
            nodes: result.nodes,
            time_ms,
        }
    }
}

/// Gomoku AI playing [`Stone::Ai`] against [`Stone::Human`].
///
/// The engine never applies its own proposals: callers poll
/// [`propose_move`](AIEngine::propose_move) and then report the move back
/// through [`apply_engine_move`](AIEngine::apply_engine_move), exactly as
/// human moves are reported through
/// [`apply_human_move`](AIEngine::apply_human_move).
#[derive(Debug, Clone)]
pub struct AIEngine {
    searcher: Searcher,
    position: Position,
    /// Live candidate frontier of the real game
    frontier: Frontier,
    /// Incremental value of the real board
    board_value: i64,
    current_move: Option<Pos>,
    current_score: i64,
    /// Frontier of the line behind the last proposal
    next_frontier: Frontier,
    last_search: Option<MoveResult>,
}

impl AIEngine {
    /// Create an engine with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Create an engine with an explicit configuration.
    ///
    /// ```
    /// use gomoku::{AIEngine, EngineConfig};
    ///
    /// let engine = AIEngine::with_config(EngineConfig::default().with_depth(2));
    /// assert_eq!(engine.config().depth, 2);
    /// ```
    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            searcher: Searcher::new(config),
            position: Position::new(config.zobrist_seed),
            frontier: Frontier::new(),
            board_value: 0,
            current_move: None,
            current_score: 0,
            next_frontier: Frontier::new(),
            last_search: None,
        }
    }

    /// Opening move when the engine plays first: the centre.
    pub fn propose_first_move(&mut self) -> Pos {
        self.current_move = Some(CENTER);
        self.current_score = 0;
        CENTER
    }

    /// Search the current position and return the engine's chosen cell.
    ///
    /// Records the move, its score and the frontier of its line for
    /// inspection; the board itself is left unchanged.
    ///
    /// # Errors
    ///
    /// [`GomokuError::GameOver`] once the game is decided,
    /// [`GomokuError::NoCandidates`] if the frontier holds no empty cell.
    pub fn propose_move(&mut self) -> Result<Pos> {
        self.ensure_ongoing()?;
        if self.position.board().is_board_empty() {
            return Ok(self.propose_first_move());
        }

        let start = Instant::now();
        let result = self
            .searcher
            .search(&mut self.position, &self.frontier, self.board_value);
        let time_ms = start.elapsed().as_millis() as u64;

        let best = result.best_move.ok_or(GomokuError::NoCandidates)?;
        info!(
            "engine proposes ({}, {}) score {} in {}ms",
            best.row, best.col, result.score, time_ms
        );

        self.current_move = Some(best);
        self.current_score = result.score;
        self.last_search = Some(MoveResult::from_search(best, &result, time_ms));
        self.next_frontier = result.next_frontier;
        Ok(best)
    }

    /// Play a human stone.
    ///
    /// # Errors
    ///
    /// Rejects out-of-bounds or occupied cells and moves after the game is
    /// decided, without touching any state.
    pub fn apply_human_move(&mut self, row: i32, col: i32) -> Result<()> {
        self.apply_move(row, col, Stone::Human)
    }

    /// Play an engine stone, typically the one just proposed.
    ///
    /// # Errors
    ///
    /// Same as [`apply_human_move`](AIEngine::apply_human_move).
    pub fn apply_engine_move(&mut self, row: i32, col: i32) -> Result<()> {
        self.apply_move(row, col, Stone::Ai)
    }

    fn apply_move(&mut self, row: i32, col: i32, stone: Stone) -> Result<()> {
        self.ensure_ongoing()?;
        let pos = self.position.board().validate(row, col)?;

        self.board_value = evaluate_move(
            self.searcher.catalog(),
            self.position.board(),
            pos,
            stone,
            self.board_value,
            &mut self.frontier,
        );
        self.position.apply(row, col, stone)?;
        self.frontier
            .update(self.position.board(), pos, stone, &self.searcher.config().distant);

        info!("{:?} plays ({}, {})", stone, pos.row, pos.col);
        debug!(
            "board value {} frontier {} hash {:#018x}",
            self.board_value,
            self.frontier.len(),
            self.position.hash()
        );
        Ok(())
    }

    fn ensure_ongoing(&self) -> Result<()> {
        match self.check_result() {
            Outcome::Ongoing => Ok(()),
            outcome => Err(GomokuError::GameOver(outcome)),
        }
    }

    /// Outcome of the real game, judged from the last stone played.
    #[must_use]
    pub fn check_result(&self) -> Outcome {
        self.position.board().check_result()
    }

    /// Start a new game. The transposition table is cleared as well.
    pub fn reset(&mut self) {
        let config = *self.searcher.config();
        self.position = Position::new(config.zobrist_seed);
        self.frontier = Frontier::new();
        self.board_value = 0;
        self.current_move = None;
        self.current_score = 0;
        self.next_frontier = Frontier::new();
        self.last_search = None;
        self.searcher.clear_tt();
        info!("new game");
    }

    #[inline]
    pub fn board(&self) -> &Board {
        self.position.board()
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        self.searcher.config()
    }

    #[inline]
    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    /// Running Zobrist hash of the real board
    #[inline]
    pub fn hash(&self) -> u64 {
        self.position.hash()
    }

    /// Incremental board value; positive favours the engine
    #[inline]
    pub fn board_value(&self) -> i64 {
        self.board_value
    }

    /// Last proposed move
    #[inline]
    pub fn current_move(&self) -> Option<Pos> {
        self.current_move
    }

    /// Score of the last proposed move
    #[inline]
    pub fn current_score(&self) -> i64 {
        self.current_score
    }

    #[inline]
    pub fn next_frontier(&self) -> &Frontier {
        &self.next_frontier
    }

    #[inline]
    pub fn last_search(&self) -> Option<&MoveResult> {
        self.last_search.as_ref()
    }

    pub fn tt_stats(&self) -> TTStats {
        self.searcher.tt_stats()
    }
}

impl Default for AIEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::{score_board, PatternCatalog};

    fn play(engine: &mut AIEngine, moves: &[(i32, i32, Stone)]) {
        for &(row, col, stone) in moves {
            match stone {
                Stone::Human => engine.apply_human_move(row, col).unwrap(),
                _ => engine.apply_engine_move(row, col).unwrap(),
            }
        }
    }

    #[test]
    fn test_engine_creation() {
        let engine = AIEngine::new();
        assert_eq!(engine.config().depth, 4);
        assert_eq!(engine.config().candidate_limit, 5);
        assert!(engine.board().is_board_empty());
        assert_eq!(engine.board_value(), 0);
        assert_eq!(engine.hash(), 0);
    }

    #[test]
    fn test_first_move_is_center() {
        let mut engine = AIEngine::new();
        assert_eq!(engine.propose_first_move(), Pos::new(7, 7));
        assert_eq!(engine.current_move(), Some(Pos::new(7, 7)));
        assert!(engine.board().is_board_empty());
    }

    #[test]
    fn test_propose_on_empty_board() {
        let mut engine = AIEngine::new();
        assert_eq!(engine.propose_move(), Ok(CENTER));
        assert!(engine.last_search().is_none());
    }

    #[test]
    fn test_engine_blocks_open_four() {
        use Stone::{Ai as A, Human as H};
        let mut engine = AIEngine::new();
        play(
            &mut engine,
            &[
                (7, 5, H),
                (2, 2, A),
                (7, 6, H),
                (2, 12, A),
                (7, 7, H),
                (12, 2, A),
                (7, 8, H),
            ],
        );

        let reply = engine.propose_move().unwrap();
        assert!(
            reply == Pos::new(7, 4) || reply == Pos::new(7, 9),
            "expected an open end, got {reply:?}"
        );
    }

    #[test]
    fn test_engine_blocks_single_open_end() {
        use Stone::{Ai as A, Human as H};
        let mut engine = AIEngine::new();
        play(
            &mut engine,
            &[
                (7, 5, H),
                (7, 4, A),
                (7, 6, H),
                (2, 12, A),
                (7, 7, H),
                (12, 2, A),
                (7, 8, H),
            ],
        );

        assert_eq!(engine.propose_move(), Ok(Pos::new(7, 9)));
    }

    #[test]
    fn test_engine_answers_open_three() {
        use Stone::{Ai as A, Human as H};
        let mut engine = AIEngine::new();
        play(
            &mut engine,
            &[(7, 7, H), (8, 8, A), (7, 6, H), (6, 6, A), (7, 5, H)],
        );

        let reply = engine.propose_move().unwrap();
        assert!(reply == Pos::new(7, 4) || reply == Pos::new(7, 8), "{reply:?}");
    }

    #[test]
    fn test_propose_records_inspection_state() {
        let mut engine = AIEngine::new();
        play(&mut engine, &[(7, 7, Stone::Ai), (7, 8, Stone::Human)]);
        let before = engine.board().clone();

        let reply = engine.propose_move().unwrap();
        assert_eq!(engine.current_move(), Some(reply));
        assert_eq!(engine.board(), &before);

        let stats = engine.last_search().copied().unwrap();
        assert_eq!(stats.best_move, reply);
        assert_eq!(stats.score, engine.current_score());
        assert!(stats.nodes > 1);
        assert!(!engine.next_frontier().contains(reply));
        assert!(engine.tt_stats().entries > 0);
    }

    #[test]
    fn test_board_value_tracks_full_scan() {
        let catalog = PatternCatalog::new();
        let mut engine = AIEngine::with_config(EngineConfig::default().with_depth(2));
        engine.apply_human_move(7, 7).unwrap();

        for _ in 0..6 {
            let reply = engine.propose_move().unwrap();
            engine
                .apply_engine_move(reply.row.into(), reply.col.into())
                .unwrap();
            assert_eq!(engine.board_value(), score_board(&catalog, engine.board()));

            // Human answers on the first empty frontier cell
            let human = engine
                .frontier()
                .select_top(engine.board(), 1)
                .first()
                .map(|&(pos, _)| pos)
                .unwrap();
            engine
                .apply_human_move(human.row.into(), human.col.into())
                .unwrap();
            assert_eq!(engine.board_value(), score_board(&catalog, engine.board()));
        }
        assert!(engine.hash() != 0);
        assert_eq!(engine.board().stone_count(), 13);
    }

    #[test]
    fn test_rejected_moves_leave_state() {
        let mut engine = AIEngine::new();
        engine.apply_human_move(7, 7).unwrap();
        let board = engine.board().clone();
        let frontier = engine.frontier().clone();
        let (hash, value) = (engine.hash(), engine.board_value());

        assert_eq!(
            engine.apply_engine_move(7, 7),
            Err(GomokuError::OccupiedCell { row: 7, col: 7 })
        );
        assert_eq!(
            engine.apply_engine_move(15, 0),
            Err(GomokuError::OutOfBounds { row: 15, col: 0 })
        );
        assert_eq!(
            engine.apply_human_move(-1, 3),
            Err(GomokuError::OutOfBounds { row: -1, col: 3 })
        );

        assert_eq!(engine.board(), &board);
        assert_eq!(engine.frontier(), &frontier);
        assert_eq!(engine.hash(), hash);
        assert_eq!(engine.board_value(), value);
    }

    #[test]
    fn test_game_over_rejects_moves() {
        let mut engine = AIEngine::new();
        for col in [3, 4, 6, 7] {
            engine.apply_human_move(5, col).unwrap();
        }
        engine.apply_human_move(5, 5).unwrap();

        let outcome = Outcome::Win(Stone::Human);
        assert_eq!(engine.check_result(), outcome);
        assert_eq!(engine.propose_move(), Err(GomokuError::GameOver(outcome)));
        assert_eq!(
            engine.apply_engine_move(0, 0),
            Err(GomokuError::GameOver(outcome))
        );
    }

    #[test]
    fn test_no_candidates_is_an_error() {
        let mut engine = AIEngine::with_config(EngineConfig::default().with_candidate_limit(0));
        engine.apply_human_move(7, 7).unwrap();
        assert_eq!(engine.propose_move(), Err(GomokuError::NoCandidates));
        assert_eq!(engine.current_move(), None);
    }

    #[test]
    fn test_reset_starts_new_game() {
        let mut engine = AIEngine::with_config(EngineConfig::default().with_depth(2));
        engine.apply_human_move(7, 7).unwrap();
        engine.propose_move().unwrap();
        assert!(engine.tt_stats().entries > 0);

        engine.reset();
        assert!(engine.board().is_board_empty());
        assert!(engine.frontier().is_empty());
        assert_eq!(engine.hash(), 0);
        assert_eq!(engine.board_value(), 0);
        assert_eq!(engine.current_move(), None);
        assert_eq!(engine.tt_stats().entries, 0);
        assert_eq!(engine.check_result(), Outcome::Ongoing);
    }

    #[test]
    fn test_engine_default() {
        let engine = AIEngine::default();
        assert_eq!(engine.config(), &EngineConfig::default());
    }
}
