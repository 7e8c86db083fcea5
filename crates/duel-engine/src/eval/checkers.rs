//! Material and advancement evaluation for checkers.

use duel_core::checkers::{SQUARES, promotion_row, row_of};
use duel_core::{Checkers, Position, Side};

use crate::eval::Evaluator;

/// Value of an uncrowned man.
pub const MAN_VALUE: i32 = 100;

/// Value of a king.
pub const KING_VALUE: i32 = 160;

/// Bonus per row a man has advanced from its back rank.
pub const ADVANCE_BONUS: i32 = 4;

/// Material plus a small bonus for men that have advanced toward the crown row.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialEvaluator;

impl MaterialEvaluator {
    /// Score of one side's pieces, ignoring the opponent.
    pub fn side_total(board: &Checkers, side: Side) -> i32 {
        (0..SQUARES)
            .filter_map(|square| board.cell(square).map(|piece| (square, piece)))
            .filter(|(_, piece)| piece.owner() == side)
            .map(|(square, piece)| {
                if piece.is_king() {
                    KING_VALUE
                } else {
                    let advanced = 7 - row_of(square).abs_diff(promotion_row(side));
                    MAN_VALUE + ADVANCE_BONUS * advanced as i32
                }
            })
            .sum()
    }
}

impl Evaluator<Checkers> for MaterialEvaluator {
    fn heuristic(&self, position: &Checkers, perspective: Side) -> i32 {
        Self::side_total(position, perspective) - Self::side_total(position, !perspective)
    }
}

#[cfg(test)]
mod tests {
    use duel_core::Piece;

    use super::*;

    #[test]
    fn opening_is_level() {
        let board = Checkers::new();
        assert_eq!(MaterialEvaluator.heuristic(&board, Side::First), 0);
        assert_eq!(MaterialEvaluator.heuristic(&board, Side::Second), 0);
    }

    #[test]
    fn back_rank_men_have_no_bonus() {
        let board = Checkers::from_pieces(&[(0, Piece::FIRST_MAN), (31, Piece::SECOND_MAN)], Side::First);
        assert_eq!(MaterialEvaluator::side_total(&board, Side::First), MAN_VALUE);
        assert_eq!(MaterialEvaluator::side_total(&board, Side::Second), MAN_VALUE);
    }

    #[test]
    fn kings_and_advanced_men_score_more() {
        let board = Checkers::from_pieces(
            &[(24, Piece::FIRST_MAN), (4, Piece::SECOND_KING)],
            Side::First,
        );
        // Row 6 is six rows ahead of red's back rank.
        assert_eq!(MaterialEvaluator::side_total(&board, Side::First), MAN_VALUE + 6 * ADVANCE_BONUS);
        assert_eq!(MaterialEvaluator::side_total(&board, Side::Second), KING_VALUE);
        assert_eq!(
            MaterialEvaluator.heuristic(&board, Side::First),
            MAN_VALUE + 6 * ADVANCE_BONUS - KING_VALUE
        );
    }

    #[test]
    fn heuristic_is_antisymmetric() {
        let board = Checkers::from_pieces(
            &[(9, Piece::FIRST_MAN), (13, Piece::SECOND_MAN), (30, Piece::SECOND_KING)],
            Side::First,
        );
        assert_eq!(
            MaterialEvaluator.heuristic(&board, Side::First),
            -MaterialEvaluator.heuristic(&board, Side::Second)
        );
    }
}
