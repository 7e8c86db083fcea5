//! Zobrist fingerprints for position deduplication.
//!
//! A fingerprint is the XOR of one random key per occupied cell, indexed by
//! `[cell][Piece::index()]`. Empty cells contribute nothing. The side to move
//! is not part of the fingerprint.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::piece::Piece;
use crate::position::{CellChange, Position};

/// Random key table for one board size.
///
/// Built once, before any hashing, and never modified afterwards.
#[derive(Clone)]
pub struct Zobrist {
    keys: Box<[[u64; Piece::COUNT]]>,
}

impl Zobrist {
    /// Build a table for `cells` cells from an OS-entropy seed.
    ///
    /// Every process run gets different keys.
    pub fn new(cells: usize) -> Self {
        Self::from_rng(cells, &mut StdRng::from_os_rng())
    }

    /// Build a reproducible table from `seed`.
    pub fn with_seed(cells: usize, seed: u64) -> Self {
        Self::from_rng(cells, &mut StdRng::seed_from_u64(seed))
    }

    /// Build a table drawing keys from `rng`.
    pub fn from_rng<R: Rng>(cells: usize, rng: &mut R) -> Self {
        let keys = (0..cells)
            .map(|_| std::array::from_fn(|_| rng.random::<u64>()))
            .collect();
        Self { keys }
    }

    /// Number of cells this table covers.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.keys.len()
    }

    /// Key for `piece` standing on `cell`.
    #[inline]
    pub fn key(&self, cell: usize, piece: Piece) -> u64 {
        self.keys[cell][piece.index()]
    }

    /// Compute a fingerprint from scratch.
    pub fn fingerprint<P: Position>(&self, position: &P) -> u64 {
        debug_assert!(position.cell_count() <= self.cell_count());
        (0..position.cell_count())
            .filter_map(|cell| position.cell(cell).map(|piece| self.key(cell, piece)))
            .fold(0, |hash, key| hash ^ key)
    }

    /// Fold a list of cell changes into `hash`.
    pub fn apply(&self, mut hash: u64, changes: &[CellChange]) -> u64 {
        for change in changes {
            if let Some(piece) = change.before {
                hash ^= self.key(change.index, piece);
            }
            if let Some(piece) = change.after {
                hash ^= self.key(change.index, piece);
            }
        }
        hash
    }

    /// Derive the fingerprint of `child` from its parent's fingerprint.
    ///
    /// Equal to `self.fingerprint(child)` whenever `parent_hash` is the
    /// fingerprint of `parent`.
    pub fn advance<P: Position>(&self, parent_hash: u64, parent: &P, child: &P) -> u64 {
        self.apply(parent_hash, &child.changes_from(parent))
    }
}

impl std::fmt::Debug for Zobrist {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Zobrist")
            .field("cells", &self.keys.len())
            .finish()
    }
}
