//! A piece owned by one side, bit-packed into a single byte.

use std::fmt;

use crate::side::Side;

/// A piece owned by one side, optionally crowned.
///
/// Bit layout:
/// - bit 0: owner ([`Side`] index)
/// - bit 1: crowned
///
/// Valid raw values are 0-3, which double as the piece-kind index used by
/// the fingerprint table. Tic-tac-toe games only ever place uncrowned pieces.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece(u8);

impl Piece {
    /// Number of distinct piece kinds.
    pub const COUNT: usize = 4;

    /// Uncrowned piece of the first side. Raw value: 0.
    pub const FIRST_MAN: Piece = Piece::new(Side::First, false);
    /// Uncrowned piece of the second side. Raw value: 1.
    pub const SECOND_MAN: Piece = Piece::new(Side::Second, false);
    /// Crowned piece of the first side. Raw value: 2.
    pub const FIRST_KING: Piece = Piece::new(Side::First, true);
    /// Crowned piece of the second side. Raw value: 3.
    pub const SECOND_KING: Piece = Piece::new(Side::Second, true);

    /// All pieces in index order.
    pub const ALL: [Piece; 4] = [
        Self::FIRST_MAN,
        Self::SECOND_MAN,
        Self::FIRST_KING,
        Self::SECOND_KING,
    ];

    /// Create a piece from its owner and crowned flag.
    #[inline]
    pub const fn new(owner: Side, crowned: bool) -> Piece {
        Piece((owner as u8) | ((crowned as u8) << 1))
    }

    /// Uncrowned piece for `owner`.
    #[inline]
    pub const fn man(owner: Side) -> Piece {
        Piece::new(owner, false)
    }

    /// Crowned piece for `owner`.
    #[inline]
    pub const fn king(owner: Side) -> Piece {
        Piece::new(owner, true)
    }

    /// Create a piece from its kind index, if valid.
    #[inline]
    pub const fn from_index(index: usize) -> Option<Piece> {
        if index < Self::COUNT {
            Some(Piece(index as u8))
        } else {
            None
        }
    }

    /// The side owning this piece.
    #[inline]
    pub const fn owner(self) -> Side {
        if self.0 & 1 == 0 { Side::First } else { Side::Second }
    }

    /// Whether this piece has been crowned.
    #[inline]
    pub const fn is_king(self) -> bool {
        self.0 & 2 != 0
    }

    /// The same piece, crowned.
    #[inline]
    pub const fn crowned(self) -> Piece {
        Piece(self.0 | 2)
    }

    /// Piece-kind index (0-3).
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.is_king() { "King" } else { "Man" };
        write!(f, "Piece({:?} {kind})", self.owner())
    }
}
