//! Core game types: sides, pieces, positions, and the supported games.

pub mod checkers;
mod error;
mod piece;
mod position;
mod side;
mod tictactoe;
pub mod zobrist;

pub use checkers::Checkers;
pub use error::ParseError;
pub use piece::Piece;
pub use position::{CellChange, Outcome, Position};
pub use side::Side;
pub use tictactoe::{Geometry, TicTacToe};
pub use zobrist::Zobrist;
