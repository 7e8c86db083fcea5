//! N-in-a-row on square and cubic boards.

use std::fmt;
use std::sync::Arc;

use crate::error::ParseError;
use crate::piece::Piece;
use crate::position::{CellChange, Outcome, Position};
use crate::side::Side;

/// Board shape and the winning lines it contains.
///
/// Cell `i` has coordinate `k` equal to `(i / size^k) % size`. A line is any
/// straight run of `size` cells; lines whose direction moves along more than
/// one axis are diagonals.
#[derive(Debug)]
pub struct Geometry {
    size: usize,
    dims: usize,
    lines: Vec<Box<[usize]>>,
    /// Indices into `lines` for each cell.
    lines_through: Vec<Vec<usize>>,
    /// Number of diagonal lines through each cell.
    diagonals_through: Vec<u8>,
}

impl Geometry {
    /// Build the geometry of a `size^dims` board.
    pub fn new(size: usize, dims: usize) -> Self {
        assert!(size >= 1 && (1..=3).contains(&dims), "unsupported board shape");
        let cells = size.pow(dims as u32);

        let coords = |cell: usize| -> Vec<i64> {
            (0..dims)
                .map(|k| ((cell / size.pow(k as u32)) % size) as i64)
                .collect()
        };
        let index_of = |coord: &[i64]| -> Option<usize> {
            let mut index = 0;
            for (k, &c) in coord.iter().enumerate() {
                if c < 0 || c >= size as i64 {
                    return None;
                }
                index += c as usize * size.pow(k as u32);
            }
            Some(index)
        };

        // Canonical directions: the last non-zero component is +1.
        let directions: Vec<Vec<i64>> = (0..3usize.pow(dims as u32))
            .map(|n| (0..dims).map(|k| ((n / 3usize.pow(k as u32)) % 3) as i64 - 1).collect::<Vec<_>>())
            .filter(|d: &Vec<i64>| d.iter().rev().find(|&&c| c != 0) == Some(&1))
            .collect();

        let mut lines = Vec::new();
        let mut diagonal = Vec::new();
        for dir in &directions {
            for start in 0..cells {
                let origin = coords(start);
                let before: Vec<i64> = origin.iter().zip(dir).map(|(c, d)| c - d).collect();
                if index_of(&before).is_some() {
                    continue;
                }
                let line: Option<Vec<usize>> = (0..size as i64)
                    .map(|step| {
                        let at: Vec<i64> = origin.iter().zip(dir).map(|(c, d)| c + d * step).collect();
                        index_of(&at)
                    })
                    .collect();
                if let Some(line) = line {
                    lines.push(line.into_boxed_slice());
                    diagonal.push(dir.iter().filter(|&&d| d != 0).count() > 1);
                }
            }
        }

        let mut lines_through = vec![Vec::new(); cells];
        let mut diagonals_through = vec![0u8; cells];
        for (line_index, line) in lines.iter().enumerate() {
            for &cell in line.iter() {
                lines_through[cell].push(line_index);
                if diagonal[line_index] {
                    diagonals_through[cell] += 1;
                }
            }
        }

        Self {
            size,
            dims,
            lines,
            lines_through,
            diagonals_through,
        }
    }

    /// Side length.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of dimensions (2 for square boards, 3 for cubes).
    #[inline]
    pub fn dims(&self) -> usize {
        self.dims
    }

    /// Total number of cells.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.lines_through.len()
    }

    /// Every winning line.
    #[inline]
    pub fn lines(&self) -> &[Box<[usize]>] {
        &self.lines
    }

    /// Number of diagonal lines passing through `cell`.
    #[inline]
    pub fn diagonals_through(&self, cell: usize) -> u8 {
        self.diagonals_through[cell]
    }
}

/// A tic-tac-toe position: `First` plays `x`, `Second` plays `o`.
#[derive(Clone)]
pub struct TicTacToe {
    geometry: Arc<Geometry>,
    cells: Box<[Option<Piece>]>,
    to_move: Side,
    outcome: Outcome,
    empty: usize,
    /// Cell filled by the move that produced this position.
    last_move: Option<usize>,
}

impl TicTacToe {
    /// Empty `size x size` board.
    pub fn square(size: usize) -> Self {
        Self::empty(Arc::new(Geometry::new(size, 2)))
    }

    /// Empty `size x size x size` board.
    pub fn cube(size: usize) -> Self {
        Self::empty(Arc::new(Geometry::new(size, 3)))
    }

    fn empty(geometry: Arc<Geometry>) -> Self {
        let cells = vec![None; geometry.cell_count()].into_boxed_slice();
        let empty = cells.len();
        Self {
            geometry,
            cells,
            to_move: Side::First,
            outcome: Outcome::Ongoing,
            empty,
            last_move: None,
        }
    }

    /// Parse a square board from `x`, `o` and `.` characters.
    ///
    /// Whitespace and `/` separators are ignored. The side to move follows
    /// from the piece counts.
    pub fn parse_square(text: &str) -> Result<Self, ParseError> {
        let cells = parse_cells(text)?;
        let size = (1..=cells.len())
            .find(|n| n * n >= cells.len())
            .filter(|n| n * n == cells.len() && *n >= 2)
            .ok_or(ParseError::UnsupportedShape { found: cells.len() })?;
        Self::from_cells(Geometry::new(size, 2), cells)
    }

    /// Parse a cubic board, layer after layer.
    pub fn parse_cube(text: &str) -> Result<Self, ParseError> {
        let cells = parse_cells(text)?;
        let size = (1..=cells.len())
            .find(|n| n * n * n >= cells.len())
            .filter(|n| n * n * n == cells.len() && *n >= 2)
            .ok_or(ParseError::UnsupportedShape { found: cells.len() })?;
        Self::from_cells(Geometry::new(size, 3), cells)
    }

    fn from_cells(geometry: Geometry, cells: Vec<Option<Piece>>) -> Result<Self, ParseError> {
        if cells.len() != geometry.cell_count() {
            return Err(ParseError::WrongCellCount {
                expected: geometry.cell_count(),
                found: cells.len(),
            });
        }

        let count = |side: Side| cells.iter().flatten().filter(|p| p.owner() == side).count();
        let (first, second) = (count(Side::First), count(Side::Second));
        let to_move = match first.checked_sub(second) {
            Some(0) => Side::First,
            Some(1) => Side::Second,
            _ => return Err(ParseError::ImpossibleCounts { first, second }),
        };

        let mut board = Self {
            empty: cells.len() - first - second,
            geometry: Arc::new(geometry),
            cells: cells.into_boxed_slice(),
            to_move,
            outcome: Outcome::Ongoing,
            last_move: None,
        };
        board.outcome = board.full_scan_outcome();
        Ok(board)
    }

    /// Board shape.
    #[inline]
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Cell filled by the last move, if known.
    #[inline]
    pub fn last_move(&self) -> Option<usize> {
        self.last_move
    }

    /// Contents of one line.
    pub fn line_owners(&self, line: &[usize]) -> (usize, usize) {
        line.iter().fold((0, 0), |(first, second), &cell| match self.cells[cell] {
            Some(piece) if piece.owner() == Side::First => (first + 1, second),
            Some(_) => (first, second + 1),
            None => (first, second),
        })
    }

    /// Place the mover's piece on `cell`, which must be empty.
    pub fn play(&self, cell: usize) -> Self {
        debug_assert!(self.cells[cell].is_none());
        let mut next = self.clone();
        next.cells[cell] = Some(Piece::man(self.to_move));
        next.to_move = !self.to_move;
        next.empty -= 1;
        next.last_move = Some(cell);
        next.outcome = next.outcome_after(cell, self.to_move);
        next
    }

    fn outcome_after(&self, cell: usize, mover: Side) -> Outcome {
        let size = self.geometry.size;
        let won = self.geometry.lines_through[cell].iter().any(|&line| {
            let (first, second) = self.line_owners(&self.geometry.lines[line]);
            match mover {
                Side::First => first == size,
                Side::Second => second == size,
            }
        });
        if won {
            Outcome::Win(mover)
        } else if self.empty == 0 {
            Outcome::Draw
        } else {
            Outcome::Ongoing
        }
    }

    fn full_scan_outcome(&self) -> Outcome {
        let size = self.geometry.size;
        for line in &self.geometry.lines {
            match self.line_owners(line) {
                (first, _) if first == size => return Outcome::Win(Side::First),
                (_, second) if second == size => return Outcome::Win(Side::Second),
                _ => {}
            }
        }
        if self.empty == 0 { Outcome::Draw } else { Outcome::Ongoing }
    }
}

fn parse_cells(text: &str) -> Result<Vec<Option<Piece>>, ParseError> {
    text.chars()
        .filter(|c| !c.is_whitespace() && *c != '/')
        .map(|c| match c {
            'x' | 'X' => Ok(Some(Piece::FIRST_MAN)),
            'o' | 'O' => Ok(Some(Piece::SECOND_MAN)),
            '.' | '-' => Ok(None),
            _ => Err(ParseError::InvalidCell { character: c }),
        })
        .collect()
}

impl Position for TicTacToe {
    fn side_to_move(&self) -> Side {
        self.to_move
    }

    fn successors(&self) -> Vec<Self> {
        if self.outcome.is_terminal() {
            return Vec::new();
        }
        (0..self.cells.len())
            .filter(|&cell| self.cells[cell].is_none())
            .map(|cell| self.play(cell))
            .collect()
    }

    fn outcome(&self) -> Outcome {
        self.outcome
    }

    fn cell_count(&self) -> usize {
        self.cells.len()
    }

    fn cell(&self, index: usize) -> Option<Piece> {
        self.cells[index]
    }

    fn changes_from(&self, parent: &Self) -> Vec<CellChange> {
        match self.last_move {
            Some(index) if parent.cells[index].is_none() && self.empty + 1 == parent.empty => {
                vec![CellChange {
                    index,
                    before: None,
                    after: self.cells[index],
                }]
            }
            _ => (0..self.cells.len())
                .filter(|&index| self.cells[index] != parent.cells[index])
                .map(|index| CellChange {
                    index,
                    before: parent.cells[index],
                    after: self.cells[index],
                })
                .collect(),
        }
    }
}

impl PartialEq for TicTacToe {
    fn eq(&self, other: &Self) -> bool {
        self.geometry.size == other.geometry.size
            && self.geometry.dims == other.geometry.dims
            && self.to_move == other.to_move
            && self.cells == other.cells
    }
}

impl Eq for TicTacToe {}

impl fmt::Display for TicTacToe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let size = self.geometry.size;
        for (row_index, row) in self.cells.chunks(size).enumerate() {
            if row_index > 0 && row_index % size == 0 {
                writeln!(f)?;
            }
            for cell in row {
                let c = match cell {
                    Some(piece) if piece.owner() == Side::First => 'x',
                    Some(_) => 'o',
                    None => '.',
                };
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for TicTacToe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cells: String = self
            .cells
            .iter()
            .map(|cell| match cell {
                Some(piece) if piece.owner() == Side::First => 'x',
                Some(_) => 'o',
                None => '.',
            })
            .collect();
        f.debug_struct("TicTacToe")
            .field("cells", &cells)
            .field("to_move", &self.to_move)
            .field("outcome", &self.outcome)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_counts() {
        assert_eq!(Geometry::new(3, 2).lines().len(), 8);
        assert_eq!(Geometry::new(4, 2).lines().len(), 10);
        assert_eq!(Geometry::new(4, 3).lines().len(), 76);
    }

    #[test]
    fn cube_diagonal_weights() {
        let geometry = Geometry::new(4, 3);
        // Corners sit on three face diagonals and one space diagonal.
        assert_eq!(geometry.diagonals_through(0), 4);
        assert_eq!(geometry.diagonals_through(63), 4);
        // Inner cube cell (1,1,1).
        assert_eq!(geometry.diagonals_through(21), 4);
        // Edge cell (1,0,0) only lies on the y=z diagonal of the x=1 face.
        assert_eq!(geometry.diagonals_through(1), 1);
        // Every inner cube cell matches the corners.
        assert_eq!(geometry.diagonals_through(37), 4);
    }

    #[test]
    fn empty_square_has_all_moves() {
        let board = TicTacToe::square(3);
        assert_eq!(board.side_to_move(), Side::First);
        assert_eq!(board.successors().len(), 9);
        assert_eq!(board.outcome(), Outcome::Ongoing);
    }

    #[test]
    fn detects_row_win() {
        let board = TicTacToe::parse_square("xx./oo./...").unwrap();
        let won = board.play(2);
        assert_eq!(won.outcome(), Outcome::Win(Side::First));
        assert!(won.successors().is_empty());
    }

    #[test]
    fn detects_anti_diagonal_win_on_parse() {
        let board = TicTacToe::parse_square("x.o/xo./o.x").unwrap();
        assert_eq!(board.outcome(), Outcome::Win(Side::Second));
    }

    #[test]
    fn detects_draw() {
        let board = TicTacToe::parse_square("xox/xoo/oxx").unwrap();
        assert_eq!(board.outcome(), Outcome::Draw);
        assert!(board.successors().is_empty());
    }

    #[test]
    fn side_to_move_from_counts() {
        let board = TicTacToe::parse_square("x../.../...").unwrap();
        assert_eq!(board.side_to_move(), Side::Second);
        assert_eq!(
            TicTacToe::parse_square("xx./.../...").unwrap_err(),
            ParseError::ImpossibleCounts { first: 2, second: 0 }
        );
    }

    #[test]
    fn parse_errors() {
        assert_eq!(
            TicTacToe::parse_square("x..q").unwrap_err(),
            ParseError::InvalidCell { character: 'q' }
        );
        assert_eq!(
            TicTacToe::parse_square("x....").unwrap_err(),
            ParseError::UnsupportedShape { found: 5 }
        );
    }

    #[test]
    fn cube_space_diagonal_wins() {
        let mut board = TicTacToe::cube(4);
        // x on the main space diagonal, o scattered on edge cells.
        for (x, o) in [(0, 1), (21, 2), (42, 4)] {
            board = board.play(x).play(o);
        }
        let won = board.play(63);
        assert_eq!(won.outcome(), Outcome::Win(Side::First));
    }

    #[test]
    fn cube_display_parses_back() {
        let board = TicTacToe::cube(4).play(0).play(1).play(21).play(2).play(42);
        let parsed = TicTacToe::parse_cube(&board.to_string()).unwrap();
        assert_eq!(parsed, board);
        assert_eq!(parsed.side_to_move(), Side::Second);
        assert_eq!(parsed.outcome(), Outcome::Ongoing);
        assert_eq!(
            TicTacToe::parse_cube(".........").unwrap_err(),
            ParseError::UnsupportedShape { found: 9 }
        );
    }

    #[test]
    fn changes_from_matches_diff() {
        let parent = TicTacToe::parse_square("x.o/.x./...").unwrap();
        for child in parent.successors() {
            let fast = child.changes_from(&parent);
            let diff: Vec<CellChange> = (0..9)
                .filter(|&i| child.cell(i) != parent.cell(i))
                .map(|i| CellChange {
                    index: i,
                    before: parent.cell(i),
                    after: child.cell(i),
                })
                .collect();
            assert_eq!(fast, diff);
        }
    }

    #[test]
    fn display_square() {
        let board = TicTacToe::parse_square("x.o/.x./...").unwrap();
        assert_eq!(board.to_string(), "x.o\n.x.\n...\n");
    }
}
