//! Open-line counting for square tic-tac-toe boards.

use duel_core::{Side, TicTacToe};

use crate::eval::Evaluator;

/// Credit for a line holding `n` stones of one side and none of the other.
///
/// Lines longer than the table use the last entry.
pub const LINE_WEIGHTS: [i32; 6] = [0, 1, 4, 16, 64, 256];

/// Credit for one line owned by a single side.
#[inline]
pub(crate) fn line_weight(stones: usize) -> i32 {
    LINE_WEIGHTS[stones.min(LINE_WEIGHTS.len() - 1)]
}

/// Sum of line credits for (first, second).
pub(crate) fn line_credit(board: &TicTacToe) -> (i32, i32) {
    board
        .geometry()
        .lines()
        .iter()
        .fold((0, 0), |(first, second), line| match board.line_owners(line) {
            (n, 0) => (first + line_weight(n), second),
            (0, n) => (first, second + line_weight(n)),
            _ => (first, second),
        })
}

/// Scores a board by the lines each side can still complete.
///
/// Every line that contains stones of exactly one side is worth
/// [`LINE_WEIGHTS`]`[stones]` to that side. Blocked lines count for nobody.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineEvaluator;

impl Evaluator<TicTacToe> for LineEvaluator {
    fn heuristic(&self, position: &TicTacToe, perspective: Side) -> i32 {
        let (first, second) = line_credit(position);
        match perspective {
            Side::First => first - second,
            Side::Second => second - first,
        }
    }
}
