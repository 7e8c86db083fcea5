//! Legal move generation for checkers.
//!
//! Captures are mandatory. A capturing piece keeps jumping while it can;
//! a man that reaches the far row is crowned and its move ends there.

use crate::checkers::{Checkers, Move, SQUARES, offset, promotion_row, row_of};
use crate::piece::Piece;
use crate::side::Side;

const ALL_DIRECTIONS: [(i8, i8); 4] = [(1, -1), (1, 1), (-1, -1), (-1, 1)];

/// Diagonal steps available to `piece`.
fn directions(piece: Piece) -> &'static [(i8, i8)] {
    if piece.is_king() {
        &ALL_DIRECTIONS
    } else {
        match piece.owner() {
            Side::First => &ALL_DIRECTIONS[..2],
            Side::Second => &ALL_DIRECTIONS[2..],
        }
    }
}

/// Whether `piece` landing on `square` ends its move by promotion.
fn promotes(piece: Piece, square: usize) -> bool {
    !piece.is_king() && row_of(square) == promotion_row(piece.owner())
}

/// Generate all legal moves for the side to move.
pub(crate) fn generate_moves(board: &Checkers) -> Vec<Move> {
    let mover = board.side_to_move_raw();
    let mut moves = Vec::new();

    for from in 0..SQUARES {
        let Some(piece) = board.piece_at(from) else { continue };
        if piece.owner() != mover {
            continue;
        }
        let mut path = vec![from as u8];
        let mut captured = Vec::new();
        extend_jumps(board, piece, from, from, &mut path, &mut captured, &mut moves);
    }

    if !moves.is_empty() {
        return moves;
    }

    for from in 0..SQUARES {
        let Some(piece) = board.piece_at(from) else { continue };
        if piece.owner() != mover {
            continue;
        }
        for &(dr, dc) in directions(piece) {
            if let Some(to) = offset(from, dr, dc)
                && board.piece_at(to).is_none()
            {
                moves.push(Move {
                    path: vec![from as u8, to as u8],
                    captured: Vec::new(),
                });
            }
        }
    }

    moves
}

/// Depth-first search over jump sequences starting at `at`.
///
/// Jumped pieces stay on the board until the move completes, so they can
/// neither be jumped twice nor landed on. The origin square counts as empty.
fn extend_jumps(
    board: &Checkers,
    piece: Piece,
    origin: usize,
    at: usize,
    path: &mut Vec<u8>,
    captured: &mut Vec<u8>,
    out: &mut Vec<Move>,
) {
    let mut extended = false;

    for &(dr, dc) in directions(piece) {
        let Some(over) = offset(at, dr, dc) else { continue };
        let Some(land) = offset(at, 2 * dr, 2 * dc) else { continue };

        let jumpable = matches!(board.piece_at(over), Some(p) if p.owner() != piece.owner())
            && !captured.contains(&(over as u8));
        let free = board.piece_at(land).is_none() || land == origin;
        if !jumpable || !free {
            continue;
        }

        extended = true;
        path.push(land as u8);
        captured.push(over as u8);
        if promotes(piece, land) {
            out.push(Move {
                path: path.clone(),
                captured: captured.clone(),
            });
        } else {
            extend_jumps(board, piece, origin, land, path, captured, out);
        }
        path.pop();
        captured.pop();
    }

    if !extended && !captured.is_empty() {
        out.push(Move {
            path: path.clone(),
            captured: captured.clone(),
        });
    }
}

/// Whether the side to move has at least one legal move.
pub(crate) fn has_moves(board: &Checkers) -> bool {
    let mover = board.side_to_move_raw();
    (0..SQUARES).any(|from| {
        let Some(piece) = board.piece_at(from) else { return false };
        piece.owner() == mover
            && directions(piece).iter().any(|&(dr, dc)| {
                let step = offset(from, dr, dc);
                if step.is_some_and(|to| board.piece_at(to).is_none()) {
                    return true;
                }
                let over = step.and_then(|sq| board.piece_at(sq));
                let land = offset(from, 2 * dr, 2 * dc);
                matches!(over, Some(p) if p.owner() != mover)
                    && land.is_some_and(|sq| board.piece_at(sq).is_none())
            })
    })
}
