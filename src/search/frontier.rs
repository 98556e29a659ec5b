//! Candidate-move frontier
//!
//! Maps empty cells near the action to an accumulated desirability score.
//! The evaluator adds to it, search clones it per branch, and the engine keeps
//! the live copy for the real game. It is scratch state, never consulted for
//! legality.

use std::collections::BTreeMap;

use log::trace;

use crate::board::{Board, Pos, Stone};
use crate::config::DistantThreatConfig;

/// King-move neighbourhood
const NEIGHBORS: [(i32, i32); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, 1),
    (1, -1),
    (-1, -1),
    (1, 1),
];

/// Scored candidate cells plus the distant-threat throttle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frontier {
    scores: BTreeMap<Pos, i64>,
    /// Updates applied so far on this line of play
    plies: u32,
    /// Ply of the last distant scan that found isolated stones
    last_distant_check: Option<u32>,
}

impl Frontier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn score(&self, pos: Pos) -> Option<i64> {
        self.scores.get(&pos).copied()
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, pos: Pos) -> bool {
        self.scores.contains_key(&pos)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Entries in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (Pos, i64)> + '_ {
        self.scores.iter().map(|(&pos, &score)| (pos, score))
    }

    /// Add `delta` to a cell, creating it at zero if absent.
    #[inline]
    pub fn add(&mut self, pos: Pos, delta: i64) {
        *self.scores.entry(pos).or_insert(0) += delta;
    }

    #[inline]
    pub fn remove(&mut self, pos: Pos) -> Option<i64> {
        self.scores.remove(&pos)
    }

    /// Updates applied so far
    #[inline]
    pub fn plies(&self) -> u32 {
        self.plies
    }

    /// Record that `mover` just placed a stone on `pos` (already on `board`).
    ///
    /// 1. `pos` stops being a candidate.
    /// 2. Its playable neighbours join at score 0 if not already present.
    /// 3. After a human stone, at most once every `cfg.interval` updates,
    ///    human stones far from every engine stone are looked for; when there
    ///    are enough of them the neighbours of the first few join at
    ///    `cfg.watch_score`.
    pub fn update(&mut self, board: &Board, pos: Pos, mover: Stone, cfg: &DistantThreatConfig) {
        self.scores.remove(&pos);
        self.seed_neighbors(board, pos, 0);

        if mover == Stone::Human && self.distant_check_due(cfg) {
            self.watch_distant_stones(board, cfg);
        }
        self.plies += 1;
    }

    fn distant_check_due(&self, cfg: &DistantThreatConfig) -> bool {
        match self.last_distant_check {
            Some(last) => self.plies - last >= cfg.interval,
            None => true,
        }
    }

    fn watch_distant_stones(&mut self, board: &Board, cfg: &DistantThreatConfig) {
        let engine_stones: Vec<Pos> = board.stones(Stone::Ai).collect();
        let isolated: Vec<Pos> = board
            .stones(Stone::Human)
            .filter(|&human| {
                engine_stones
                    .iter()
                    .all(|&ai| human.manhattan(ai) > cfg.isolation_distance)
            })
            .collect();

        if isolated.len() < cfg.min_isolated {
            return;
        }

        trace!("watching {} isolated human stones", isolated.len().min(cfg.max_zones));
        for &stone in isolated.iter().take(cfg.max_zones) {
            self.seed_neighbors(board, stone, cfg.watch_score);
        }
        self.last_distant_check = Some(self.plies);
    }

    fn seed_neighbors(&mut self, board: &Board, center: Pos, score: i64) {
        for &(dr, dc) in &NEIGHBORS {
            let row = i32::from(center.row) + dr;
            let col = i32::from(center.col) + dc;
            if board.is_playable(row, col) {
                if let Some(pos) = Pos::try_new(row, col) {
                    self.scores.entry(pos).or_insert(score);
                }
            }
        }
    }

    /// Best `k` empty cells by descending `|score|`, ties in row-major order.
    #[must_use]
    pub fn select_top(&self, board: &Board, k: usize) -> Vec<(Pos, i64)> {
        let mut candidates: Vec<(Pos, i64)> =
            self.iter().filter(|&(pos, _)| board.is_empty(pos)).collect();
        candidates.sort_by_key(|&(pos, score)| (std::cmp::Reverse(score.abs()), pos));
        candidates.truncate(k);
        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> DistantThreatConfig {
        DistantThreatConfig::default()
    }

    fn play(board: &mut Board, frontier: &mut Frontier, row: u8, col: u8, stone: Stone) {
        let pos = Pos::new(row, col);
        board.place(pos, stone);
        frontier.update(board, pos, stone, &cfg());
    }

    #[test]
    fn test_update_adds_neighbors() {
        let mut board = Board::new();
        let mut frontier = Frontier::new();
        play(&mut board, &mut frontier, 7, 7, Stone::Ai);

        assert_eq!(frontier.len(), 8);
        assert!(!frontier.contains(Pos::new(7, 7)));
        assert_eq!(frontier.score(Pos::new(6, 6)), Some(0));
        assert_eq!(frontier.plies(), 1);
    }

    #[test]
    fn test_update_keeps_existing_scores() {
        let mut board = Board::new();
        let mut frontier = Frontier::new();
        frontier.add(Pos::new(7, 8), 500);
        play(&mut board, &mut frontier, 7, 7, Stone::Ai);
        assert_eq!(frontier.score(Pos::new(7, 8)), Some(500));
    }

    #[test]
    fn test_update_corner_clips_neighbors() {
        let mut board = Board::new();
        let mut frontier = Frontier::new();
        play(&mut board, &mut frontier, 0, 0, Stone::Human);
        assert_eq!(frontier.len(), 3);
    }

    #[test]
    fn test_update_skips_occupied_neighbors() {
        let mut board = Board::new();
        let mut frontier = Frontier::new();
        play(&mut board, &mut frontier, 7, 7, Stone::Ai);
        play(&mut board, &mut frontier, 7, 8, Stone::Human);

        assert!(!frontier.contains(Pos::new(7, 7)));
        assert!(!frontier.contains(Pos::new(7, 8)));
        // 8 around (7,7) minus (7,8), plus 3 new cells right of (7,8)
        assert_eq!(frontier.len(), 10);
    }

    #[test]
    fn test_select_top_orders_by_magnitude() {
        let board = Board::new();
        let mut frontier = Frontier::new();
        frontier.add(Pos::new(1, 1), 10);
        frontier.add(Pos::new(2, 2), -500);
        frontier.add(Pos::new(3, 3), 200);

        let top = frontier.select_top(&board, 2);
        assert_eq!(top, vec![(Pos::new(2, 2), -500), (Pos::new(3, 3), 200)]);
    }

    #[test]
    fn test_select_top_tie_break_is_positional() {
        let board = Board::new();
        let mut frontier = Frontier::new();
        for pos in [Pos::new(9, 2), Pos::new(4, 4), Pos::new(4, 1), Pos::new(0, 14)] {
            frontier.add(pos, 300);
        }
        frontier.add(Pos::new(5, 5), -300);

        let first = frontier.select_top(&board, 5);
        let order: Vec<Pos> = first.iter().map(|&(pos, _)| pos).collect();
        assert_eq!(
            order,
            vec![
                Pos::new(0, 14),
                Pos::new(4, 1),
                Pos::new(4, 4),
                Pos::new(5, 5),
                Pos::new(9, 2),
            ]
        );
        for _ in 0..10 {
            assert_eq!(frontier.select_top(&board, 5), first);
        }
    }

    #[test]
    fn test_select_top_filters_occupied() {
        let mut board = Board::new();
        let mut frontier = Frontier::new();
        frontier.add(Pos::new(7, 7), 1_000);
        frontier.add(Pos::new(7, 8), 1);
        board.place(Pos::new(7, 7), Stone::Ai);

        assert_eq!(frontier.select_top(&board, 5), vec![(Pos::new(7, 8), 1)]);
    }

    #[test]
    fn test_distant_human_stones_are_watched() {
        let mut board = Board::new();
        let mut frontier = Frontier::new();
        board.place(Pos::new(0, 0), Stone::Ai);
        board.place(Pos::new(14, 14), Stone::Human);
        play(&mut board, &mut frontier, 12, 12, Stone::Human);

        // (12,12) is row-major first, so its neighbours were seeded at 0 by
        // the plain update; (14,14) gets the watch score.
        assert_eq!(frontier.score(Pos::new(13, 14)), Some(-100));
        assert_eq!(frontier.score(Pos::new(14, 13)), Some(-100));
        assert_eq!(frontier.score(Pos::new(13, 13)), Some(0));
        assert!(!frontier.contains(Pos::new(1, 1)));
    }

    #[test]
    fn test_single_isolated_stone_is_not_watched() {
        let mut board = Board::new();
        let mut frontier = Frontier::new();
        board.place(Pos::new(7, 7), Stone::Ai);
        board.place(Pos::new(7, 8), Stone::Human);
        play(&mut board, &mut frontier, 0, 14, Stone::Human);

        assert_eq!(frontier.len(), 3);
        assert!(frontier.iter().all(|(_, score)| score == 0));
    }

    #[test]
    fn test_engine_moves_never_scan() {
        let mut board = Board::new();
        let mut frontier = Frontier::new();
        board.place(Pos::new(0, 0), Stone::Human);
        board.place(Pos::new(14, 14), Stone::Human);
        play(&mut board, &mut frontier, 7, 7, Stone::Ai);

        assert!(!frontier.contains(Pos::new(1, 1)));
        assert!(!frontier.contains(Pos::new(13, 13)));
    }

    #[test]
    fn test_distant_scan_is_throttled() {
        let mut board = Board::new();
        let mut frontier = Frontier::new();
        board.place(Pos::new(0, 0), Stone::Human);
        board.place(Pos::new(0, 14), Stone::Human);
        play(&mut board, &mut frontier, 14, 14, Stone::Human); // ply 0: scan

        assert_eq!(frontier.score(Pos::new(1, 1)), Some(-100));
        assert_eq!(frontier.score(Pos::new(1, 13)), Some(-100));

        // Plies 1 and 2 fall inside the interval, so the watch is not redone
        frontier.remove(Pos::new(1, 1));
        play(&mut board, &mut frontier, 7, 7, Stone::Human); // ply 1
        assert!(!frontier.contains(Pos::new(1, 1)));
        play(&mut board, &mut frontier, 7, 3, Stone::Human); // ply 2
        assert!(!frontier.contains(Pos::new(1, 1)));

        play(&mut board, &mut frontier, 3, 7, Stone::Human); // ply 3: scan again
        assert_eq!(frontier.score(Pos::new(1, 1)), Some(-100));
    }

    #[test]
    fn test_clones_are_independent() {
        let mut board = Board::new();
        let mut frontier = Frontier::new();
        play(&mut board, &mut frontier, 7, 7, Stone::Ai);

        let mut branch = frontier.clone();
        branch.add(Pos::new(6, 6), 42);
        branch.remove(Pos::new(8, 8));

        assert_eq!(frontier.score(Pos::new(6, 6)), Some(0));
        assert!(frontier.contains(Pos::new(8, 8)));
    }
}
