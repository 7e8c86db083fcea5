//! English draughts on the 32 dark squares of an 8x8 board.
//!
//! Square `i` sits on row `i / 4`; even rows use the odd columns and odd
//! rows the even columns. `First` (red) starts on squares 0-11 and moves
//! toward row 7; `Second` (white) starts on 20-31 and moves toward row 0.

mod movegen;

use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;
use crate::piece::Piece;
use crate::position::{CellChange, Outcome, Position};
use crate::side::Side;

use self::movegen::{generate_moves, has_moves};

/// Number of playable squares.
pub const SQUARES: usize = 32;

/// Consecutive plies without a capture or man move that end the game in a draw.
pub const DRAW_PLIES: u8 = 50;

/// Row (0-7) of a playable square.
#[inline]
pub const fn row_of(square: usize) -> usize {
    square / 4
}

/// Column (0-7) of a playable square.
#[inline]
pub const fn col_of(square: usize) -> usize {
    let row = row_of(square);
    2 * (square % 4) + if row % 2 == 0 { 1 } else { 0 }
}

/// The square `dr` rows and `dc` columns away, if it is on the board.
pub fn offset(square: usize, dr: i8, dc: i8) -> Option<usize> {
    let row = row_of(square) as i8 + dr;
    let col = col_of(square) as i8 + dc;
    if !(0..8).contains(&row) || !(0..8).contains(&col) {
        return None;
    }
    debug_assert!((row + col) % 2 == 1);
    Some(row as usize * 4 + col as usize / 2)
}

/// Row on which `side`'s men are crowned.
#[inline]
pub const fn promotion_row(side: Side) -> usize {
    match side {
        Side::First => 7,
        Side::Second => 0,
    }
}

/// A complete move: the squares visited and the squares jumped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Move {
    /// Origin followed by every landing square.
    pub path: Vec<u8>,
    /// Squares of captured pieces, in jump order.
    pub captured: Vec<u8>,
}

impl Move {
    /// Origin square.
    #[inline]
    pub fn from(&self) -> usize {
        self.path[0] as usize
    }

    /// Final landing square.
    #[inline]
    pub fn to(&self) -> usize {
        self.path[self.path.len() - 1] as usize
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = if self.captured.is_empty() { "-" } else { "x" };
        let squares: Vec<String> = self.path.iter().map(|sq| sq.to_string()).collect();
        write!(f, "{}", squares.join(sep))
    }
}

/// A checkers position.
#[derive(Clone)]
pub struct Checkers {
    cells: [Option<Piece>; SQUARES],
    to_move: Side,
    quiet_plies: u8,
    /// Move that produced this position.
    last_move: Option<Move>,
}

impl Checkers {
    /// The standard starting position, red to move.
    pub fn new() -> Self {
        let mut cells = [None; SQUARES];
        for (square, cell) in cells.iter_mut().enumerate() {
            *cell = match square {
                0..12 => Some(Piece::FIRST_MAN),
                20..32 => Some(Piece::SECOND_MAN),
                _ => None,
            };
        }
        Self {
            cells,
            to_move: Side::First,
            quiet_plies: 0,
            last_move: None,
        }
    }

    /// A position holding only the given pieces.
    pub fn from_pieces(pieces: &[(usize, Piece)], to_move: Side) -> Self {
        let mut cells = [None; SQUARES];
        for &(square, piece) in pieces {
            cells[square] = Some(piece);
        }
        Self {
            cells,
            to_move,
            quiet_plies: 0,
            last_move: None,
        }
    }

    /// Piece on `square`, if any.
    #[inline]
    pub fn piece_at(&self, square: usize) -> Option<Piece> {
        self.cells[square]
    }

    #[inline]
    pub(crate) fn side_to_move_raw(&self) -> Side {
        self.to_move
    }

    /// Plies since the last capture or man move.
    #[inline]
    pub fn quiet_plies(&self) -> u8 {
        self.quiet_plies
    }

    /// The move that produced this position, if known.
    #[inline]
    pub fn last_move(&self) -> Option<&Move> {
        self.last_move.as_ref()
    }

    /// All legal moves for the side to move.
    pub fn moves(&self) -> Vec<Move> {
        if self.quiet_plies >= DRAW_PLIES {
            return Vec::new();
        }
        generate_moves(self)
    }

    /// Play `mv`, which must be legal in this position.
    pub fn make_move(&self, mv: &Move) -> Self {
        let from = mv.from();
        let to = mv.to();
        let piece = self.cells[from].expect("move origin holds a piece");

        let mut cells = self.cells;
        cells[from] = None;
        for &square in &mv.captured {
            cells[square as usize] = None;
        }
        let landed = if !piece.is_king() && row_of(to) == promotion_row(piece.owner()) {
            piece.crowned()
        } else {
            piece
        };
        cells[to] = Some(landed);

        let quiet_plies = if mv.captured.is_empty() && piece.is_king() {
            self.quiet_plies.saturating_add(1)
        } else {
            0
        };

        Self {
            cells,
            to_move: !self.to_move,
            quiet_plies,
            last_move: Some(mv.clone()),
        }
    }

    /// Number of pieces `side` still has on the board.
    pub fn count(&self, side: Side) -> usize {
        self.cells.iter().flatten().filter(|p| p.owner() == side).count()
    }
}

impl Default for Checkers {
    fn default() -> Self {
        Self::new()
    }
}

impl Position for Checkers {
    fn side_to_move(&self) -> Side {
        self.to_move
    }

    fn successors(&self) -> Vec<Self> {
        self.moves().iter().map(|mv| self.make_move(mv)).collect()
    }

    fn outcome(&self) -> Outcome {
        if self.quiet_plies >= DRAW_PLIES {
            Outcome::Draw
        } else if !has_moves(self) {
            Outcome::Win(!self.to_move)
        } else {
            Outcome::Ongoing
        }
    }

    fn cell_count(&self) -> usize {
        SQUARES
    }

    fn cell(&self, index: usize) -> Option<Piece> {
        self.cells[index]
    }

    fn changes_from(&self, parent: &Self) -> Vec<CellChange> {
        let Some(mv) = &self.last_move else {
            return (0..SQUARES)
                .filter(|&index| self.cells[index] != parent.cells[index])
                .map(|index| CellChange {
                    index,
                    before: parent.cells[index],
                    after: self.cells[index],
                })
                .collect();
        };

        let mut touched: Vec<usize> = mv
            .captured
            .iter()
            .map(|&sq| sq as usize)
            .chain([mv.from(), mv.to()])
            .collect();
        touched.sort_unstable();
        touched.dedup();
        touched
            .into_iter()
            .filter(|&index| self.cells[index] != parent.cells[index])
            .map(|index| CellChange {
                index,
                before: parent.cells[index],
                after: self.cells[index],
            })
            .collect()
    }
}

impl PartialEq for Checkers {
    fn eq(&self, other: &Self) -> bool {
        self.cells == other.cells
            && self.to_move == other.to_move
            && self.quiet_plies == other.quiet_plies
    }
}

impl Eq for Checkers {}

fn piece_char(cell: Option<Piece>) -> char {
    match cell {
        None => '.',
        Some(Piece::FIRST_MAN) => 'r',
        Some(Piece::FIRST_KING) => 'R',
        Some(Piece::SECOND_MAN) => 'w',
        Some(_) => 'W',
    }
}

impl FromStr for Checkers {
    type Err = ParseError;

    /// Parse 32 cells of `. r R w W` (whitespace and `/` ignored), then an
    /// optional side-to-move token `r` or `w`.
    fn from_str(text: &str) -> Result<Checkers, ParseError> {
        let mut cells = [None; SQUARES];
        let mut chars = text.char_indices().filter(|(_, c)| !c.is_whitespace() && *c != '/');
        let mut rest = "";

        for (square, cell) in cells.iter_mut().enumerate() {
            let Some((at, c)) = chars.next() else {
                return Err(ParseError::WrongCellCount {
                    expected: SQUARES,
                    found: square,
                });
            };
            *cell = match c {
                '.' | '-' => None,
                'r' => Some(Piece::FIRST_MAN),
                'R' => Some(Piece::FIRST_KING),
                'w' => Some(Piece::SECOND_MAN),
                'W' => Some(Piece::SECOND_KING),
                _ => return Err(ParseError::InvalidCell { character: c }),
            };
            rest = &text[at + c.len_utf8()..];
        }

        let to_move = match rest.trim() {
            "" | "r" => Side::First,
            "w" => Side::Second,
            other => {
                return Err(ParseError::InvalidSide {
                    found: other.to_string(),
                });
            }
        };

        Ok(Checkers {
            cells,
            to_move,
            quiet_plies: 0,
            last_move: None,
        })
    }
}

impl fmt::Display for Checkers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..8 {
            for col in 0..8 {
                if (row + col) % 2 == 1 {
                    write!(f, "{}", piece_char(self.cells[row * 4 + col / 2]))?;
                } else {
                    write!(f, " ")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Checkers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cells: String = self.cells.iter().map(|&cell| piece_char(cell)).collect();
        f.debug_struct("Checkers")
            .field("cells", &cells)
            .field("to_move", &self.to_move)
            .field("quiet_plies", &self.quiet_plies)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_geometry() {
        assert_eq!((row_of(0), col_of(0)), (0, 1));
        assert_eq!((row_of(4), col_of(4)), (1, 0));
        assert_eq!((row_of(31), col_of(31)), (7, 6));
        assert_eq!(offset(0, 1, -1), Some(4));
        assert_eq!(offset(0, 1, 1), Some(5));
        assert_eq!(offset(0, -1, 1), None);
        assert_eq!(offset(4, 1, -1), None);
    }

    #[test]
    fn starting_position() {
        let board = Checkers::new();
        assert_eq!(board.count(Side::First), 12);
        assert_eq!(board.count(Side::Second), 12);
        assert_eq!(board.side_to_move(), Side::First);
        assert_eq!(board.outcome(), Outcome::Ongoing);
    }

    #[test]
    fn parse_matches_starting_position() {
        let parsed: Checkers = "rrrr/rrrr/rrrr/..../..../wwww/wwww/wwww r".parse().unwrap();
        assert_eq!(parsed, Checkers::new());
        let white: Checkers = "rrrr/rrrr/rrrr/..../..../wwww/wwww/wwww w".parse().unwrap();
        assert_eq!(white.side_to_move(), Side::Second);
    }

    #[test]
    fn parse_errors() {
        assert_eq!(
            "rrrr".parse::<Checkers>().unwrap_err(),
            ParseError::WrongCellCount { expected: 32, found: 4 }
        );
        assert_eq!(
            "rrrr/rrrr/rrrr/..../..../wwww/wwww/wwwq".parse::<Checkers>().unwrap_err(),
            ParseError::InvalidCell { character: 'q' }
        );
        assert!(matches!(
            "rrrr/rrrr/rrrr/..../..../wwww/wwww/wwww x".parse::<Checkers>(),
            Err(ParseError::InvalidSide { .. })
        ));
    }

    #[test]
    fn capture_removes_piece() {
        let board = Checkers::from_pieces(
            &[(9, Piece::FIRST_MAN), (13, Piece::SECOND_MAN), (30, Piece::SECOND_MAN)],
            Side::First,
        );
        let next = &board.successors()[0];
        assert_eq!(next.piece_at(13), None);
        assert_eq!(next.piece_at(16), Some(Piece::FIRST_MAN));
        assert_eq!(next.side_to_move(), Side::Second);
        assert_eq!(next.count(Side::Second), 1);
    }

    #[test]
    fn man_is_crowned_on_far_row() {
        let board = Checkers::from_pieces(&[(25, Piece::FIRST_MAN), (2, Piece::SECOND_MAN)], Side::First);
        let crowned = board
            .successors()
            .into_iter()
            .find(|next| row_of(next.last_move().unwrap().to()) == 7)
            .unwrap();
        assert_eq!(crowned.piece_at(crowned.last_move().unwrap().to()), Some(Piece::FIRST_KING));
    }

    #[test]
    fn man_move_resets_quiet_counter() {
        let mut board = Checkers::from_pieces(&[(9, Piece::FIRST_MAN), (31, Piece::SECOND_KING)], Side::First);
        board.quiet_plies = 10;
        assert_eq!(board.successors()[0].quiet_plies(), 0);
    }

    #[test]
    fn stuck_side_loses() {
        let board = Checkers::from_pieces(&[(28, Piece::FIRST_MAN), (3, Piece::SECOND_MAN)], Side::First);
        assert_eq!(board.outcome(), Outcome::Win(Side::Second));
        assert!(board.successors().is_empty());
    }

    #[test]
    fn king_shuffling_draws() {
        let mut board = Checkers::from_pieces(&[(0, Piece::FIRST_KING), (31, Piece::SECOND_KING)], Side::First);
        board = board.successors().swap_remove(0);
        assert_eq!(board.quiet_plies(), 1);

        board.quiet_plies = DRAW_PLIES - 1;
        assert_eq!(board.outcome(), Outcome::Ongoing);
        board = board.successors().swap_remove(0);
        assert_eq!(board.quiet_plies(), DRAW_PLIES);
        assert_eq!(board.outcome(), Outcome::Draw);
        assert!(board.successors().is_empty());
    }

    #[test]
    fn changes_from_matches_diff() {
        let board = Checkers::from_pieces(
            &[(0, Piece::FIRST_MAN), (5, Piece::SECOND_MAN), (14, Piece::SECOND_MAN)],
            Side::First,
        );
        for child in board.successors() {
            let fast = child.changes_from(&board);
            let diff: Vec<CellChange> = (0..SQUARES)
                .filter(|&i| child.cell(i) != board.cell(i))
                .map(|i| CellChange { index: i, before: board.cell(i), after: child.cell(i) })
                .collect();
            assert_eq!(fast, diff);
            assert_eq!(fast.len(), 4);
        }
    }

    #[test]
    fn display_shows_dark_squares() {
        let text = Checkers::new().to_string();
        let first_row = text.lines().next().unwrap();
        assert_eq!(first_row, " r r r r");
    }
}
