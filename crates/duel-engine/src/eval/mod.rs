//! Position evaluation.
//!
//! Each game supplies its own [`Evaluator`]. The provided
//! [`Evaluator::evaluate`] turns terminal outcomes into fixed sentinels and
//! clamps heuristic scores below them, so a proven win or loss always
//! outweighs any heuristic judgement.

pub mod checkers;
pub mod cube;
pub mod lines;
pub mod score;

use duel_core::{Outcome, Position, Side};

use self::score::{DRAW_SCORE, HEURISTIC_LIMIT, WIN_SCORE};

pub use self::checkers::MaterialEvaluator;
pub use self::cube::CubeEvaluator;
pub use self::lines::LineEvaluator;

/// Scores positions of one game.
///
/// Implementations must be pure and deterministic, and `heuristic` must be
/// anti-symmetric: scoring from the other side negates the result.
pub trait Evaluator<P: Position> {
    /// Heuristic score of a non-terminal position for `perspective`.
    fn heuristic(&self, position: &P, perspective: Side) -> i32;

    /// Full evaluation: sentinels for finished games, clamped heuristic otherwise.
    fn evaluate(&self, position: &P, perspective: Side) -> i32 {
        match position.outcome() {
            Outcome::Win(winner) if winner == perspective => WIN_SCORE,
            Outcome::Win(_) => -WIN_SCORE,
            Outcome::Draw => DRAW_SCORE,
            Outcome::Ongoing => self
                .heuristic(position, perspective)
                .clamp(-HEURISTIC_LIMIT, HEURISTIC_LIMIT),
        }
    }
}
