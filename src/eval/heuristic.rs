//! Incremental pattern evaluation
//!
//! The board value is the sum of the scores of every catalogued pattern
//! occurrence on the board, read along four axes. Playing one stone only
//! changes occurrences whose window contains that cell, so the value is
//! maintained as a running total: [`evaluate_move`] returns the new total
//! after a stone, and [`score_board`] recomputes it from scratch.

use crate::board::{Board, Pos, Stone};
use crate::search::Frontier;

use super::patterns::{Pattern, PatternCatalog};

/// Reading directions, one per axis
const AXES: [(i32, i32); 4] = [
    (1, 0),  // Vertical
    (1, 1),  // Diagonal SE
    (0, 1),  // Horizontal
    (-1, 1), // Diagonal NE
];

/// Farthest offset a window containing the centre can reach (longest pattern - 1)
const REACH: i32 = 6;
const LINE_LEN: usize = (2 * REACH + 1) as usize;

/// Cells on one axis within `REACH` of a centre, `None` past the edge.
struct AxisLine {
    cells: [Option<(Pos, Stone)>; LINE_LEN],
}

impl AxisLine {
    fn capture(board: &Board, center: Pos, dr: i32, dc: i32) -> Self {
        let mut cells = [None; LINE_LEN];
        for (slot, offset) in cells.iter_mut().zip(-REACH..=REACH) {
            *slot = center.offset(dr, dc, offset).map(|pos| (pos, board.get(pos)));
        }
        Self { cells }
    }

    #[inline]
    fn at(&self, offset: i32) -> Option<(Pos, Stone)> {
        self.cells[(offset + REACH) as usize]
    }

    /// Window `[start, start + len)` matches `pattern` with the centre read as `center`.
    fn matches(&self, start: i32, pattern: &Pattern, center: Stone) -> bool {
        pattern.cells.iter().zip(start..).all(|(&want, offset)| match self.at(offset) {
            Some(_) if offset == 0 => want == center,
            Some((_, stone)) => want == stone,
            None => false,
        })
    }

    /// Add `delta` to the frontier score of every empty cell of a matched window.
    fn credit(&self, start: i32, pattern: &Pattern, delta: i64, frontier: &mut Frontier) {
        for (&want, offset) in pattern.cells.iter().zip(start..) {
            if want == Stone::Empty {
                if let Some((pos, _)) = self.at(offset) {
                    frontier.add(pos, delta);
                }
            }
        }
    }
}

/// Board value after `stone` is played on the empty cell `pos`.
///
/// Every pattern window through `pos` is compared twice, with the cell empty
/// and with `stone` on it: matches before the move are subtracted, matches
/// after are added. The board itself is only read.
///
/// Frontier side effect: each empty cell of a window matched before the move
/// loses `|score|`, each empty cell of a window matched after gains it.
pub fn evaluate_move(
    catalog: &PatternCatalog,
    board: &Board,
    pos: Pos,
    stone: Stone,
    value: i64,
    frontier: &mut Frontier,
) -> i64 {
    debug_assert!(board.is_empty(pos), "evaluating occupied cell {pos:?}");

    let mut before = 0i64;
    let mut after = 0i64;

    for &(dr, dc) in &AXES {
        let line = AxisLine::capture(board, pos, dr, dc);
        for pattern in catalog.iter() {
            let len = pattern.len() as i32;
            let weight = pattern.score.abs();
            for start in (1 - len)..=0 {
                if line.matches(start, pattern, Stone::Empty) {
                    before += pattern.score;
                    line.credit(start, pattern, -weight, frontier);
                }
                if line.matches(start, pattern, stone) {
                    after += pattern.score;
                    line.credit(start, pattern, weight, frontier);
                }
            }
        }
    }

    value + after - before
}

/// Board value computed from scratch over every window on the board.
pub fn score_board(catalog: &PatternCatalog, board: &Board) -> i64 {
    let mut total = 0i64;
    for origin in Pos::all() {
        for &(dr, dc) in &AXES {
            for pattern in catalog.iter() {
                let matched = pattern.cells.iter().zip(0..).all(|(&want, step)| {
                    origin
                        .offset(dr, dc, step)
                        .is_some_and(|pos| board.get(pos) == want)
                });
                if matched {
                    total += pattern.score;
                }
            }
        }
    }
    total
}
