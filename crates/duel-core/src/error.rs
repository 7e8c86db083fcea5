//! Errors from parsing textual positions.

/// Errors that occur when parsing a position string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The string describes the wrong number of cells.
    #[error("expected {expected} cells, found {found}")]
    WrongCellCount {
        /// Cells the board needs.
        expected: usize,
        /// Cells the string described.
        found: usize,
    },
    /// The cell count is not a supported board shape.
    #[error("{found} cells do not form a supported board")]
    UnsupportedShape {
        /// Cells the string described.
        found: usize,
    },
    /// An unrecognized character appeared in the cell list.
    #[error("invalid cell character: '{character}'")]
    InvalidCell {
        /// The invalid character.
        character: char,
    },
    /// The piece counts cannot arise from alternating play.
    #[error("impossible piece counts: {first} first, {second} second")]
    ImpossibleCounts {
        /// Pieces of the first side.
        first: usize,
        /// Pieces of the second side.
        second: usize,
    },
    /// The side-to-move token is not recognized.
    #[error("invalid side to move: \"{found}\"")]
    InvalidSide {
        /// The invalid token.
        found: String,
    },
}
