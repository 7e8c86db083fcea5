//! The contract every game position implements for the search.

use std::fmt;

use crate::piece::Piece;
use crate::side::Side;

/// Terminal classification of a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The game continues.
    Ongoing,
    /// The given side has won.
    Win(Side),
    /// Nobody can win any more.
    Draw,
}

impl Outcome {
    /// `true` for wins and draws.
    #[inline]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Outcome::Ongoing)
    }

    /// The winning side, if any.
    #[inline]
    pub const fn winner(self) -> Option<Side> {
        match self {
            Outcome::Win(side) => Some(side),
            _ => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Ongoing => write!(f, "ongoing"),
            Outcome::Win(side) => write!(f, "{side} wins"),
            Outcome::Draw => write!(f, "draw"),
        }
    }
}

/// How one cell changed between a parent position and its successor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellChange {
    /// Cell index.
    pub index: usize,
    /// Contents in the parent.
    pub before: Option<Piece>,
    /// Contents in the successor.
    pub after: Option<Piece>,
}

/// An immutable game state.
///
/// Successors are new values; a position is never mutated by the search.
/// Implementations must be deterministic: the same position always yields
/// the same successors in the same order.
pub trait Position: Clone + fmt::Debug {
    /// The side about to move.
    fn side_to_move(&self) -> Side;

    /// All legal successor positions, in a fixed order.
    ///
    /// Empty when the game is over or the side to move is stuck.
    fn successors(&self) -> Vec<Self>;

    /// Terminal classification.
    fn outcome(&self) -> Outcome;

    /// Number of addressable cells.
    fn cell_count(&self) -> usize;

    /// Contents of cell `index` (`index < cell_count()`).
    fn cell(&self, index: usize) -> Option<Piece>;

    /// Cells that differ between `parent` and `self`.
    ///
    /// The default compares every cell. Games that know which cells their
    /// last move touched override this; the result must be the same.
    fn changes_from(&self, parent: &Self) -> Vec<CellChange> {
        (0..self.cell_count())
            .filter_map(|index| {
                let before = parent.cell(index);
                let after = self.cell(index);
                (before != after).then_some(CellChange { index, before, after })
            })
            .collect()
    }
}
