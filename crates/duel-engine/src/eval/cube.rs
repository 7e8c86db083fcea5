//! Evaluation for 3D tic-tac-toe.

use duel_core::{Position, Side, TicTacToe};

use crate::eval::Evaluator;
use crate::eval::lines::line_credit;

/// Line credit plus a positional bonus per occupied cell.
///
/// A cell is worth `1 + diagonals through it`: the eight corners and the
/// eight inner-cube cells of a 4x4x4 board (four diagonals each) score 5,
/// face-diagonal cells 2, everything else 1.
#[derive(Debug, Clone, Copy, Default)]
pub struct CubeEvaluator;

impl CubeEvaluator {
    /// Positional weight of `cell`.
    pub fn cell_weight(board: &TicTacToe, cell: usize) -> i32 {
        1 + board.geometry().diagonals_through(cell) as i32
    }
}

impl Evaluator<TicTacToe> for CubeEvaluator {
    fn heuristic(&self, position: &TicTacToe, perspective: Side) -> i32 {
        let (mut first, mut second) = line_credit(position);
        for cell in 0..position.cell_count() {
            if let Some(piece) = position.cell(cell) {
                let weight = Self::cell_weight(position, cell);
                match piece.owner() {
                    Side::First => first += weight,
                    Side::Second => second += weight,
                }
            }
        }
        match perspective {
            Side::First => first - second,
            Side::Second => second - first,
        }
    }
}
