//! Transposition table keyed by position fingerprint.
//!
//! A fixed power-of-two array of slots indexed by `hash & mask`. Each slot
//! keeps the full 64-bit key, so a probe that lands on a slot owned by a
//! different position is a miss. Distinct positions sharing a full key are
//! not detected.
//!
//! Only positions where the searching side is to move are stored; see
//! [`negamax`](super::negamax).

use crate::eval::score::WIN_THRESHOLD;

/// Bound type stored in a TT entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Bound {
    /// No bound information (empty entry).
    #[default]
    None = 0,
    /// The stored score is exact.
    Exact = 1,
    /// The stored score is a lower bound (failed high).
    LowerBound = 2,
    /// The stored score is an upper bound (failed low).
    UpperBound = 3,
}

/// Result of a successful TT probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TtEntry {
    /// Remaining depth the stored score was searched to.
    pub depth: u8,
    /// Bound type (exact, lower, or upper).
    pub bound: Bound,
    /// Score, already adjusted from node-relative back to root-relative.
    pub score: i32,
}

/// What a probe means for the current alpha-beta window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Probe {
    /// Nothing usable: no entry, a different key, or too shallow.
    Miss,
    /// The stored result settles the node.
    Cutoff(i32),
    /// The stored bound tightened the window; search on with it.
    Narrowed {
        /// New lower bound.
        alpha: i32,
        /// New upper bound.
        beta: i32,
    },
}

/// Convert a search score to TT-storable form.
///
/// Win scores are path-dependent: `WIN_SCORE - ply` changes with the search
/// path. They are stored as distance-from-node instead of distance-from-root.
pub fn score_to_tt(score: i32, ply: u8) -> i32 {
    if score > WIN_THRESHOLD {
        score + ply as i32
    } else if score < -WIN_THRESHOLD {
        score - ply as i32
    } else {
        score
    }
}

/// Convert a TT-stored score back to search-usable form.
///
/// Reverses the win-distance adjustment applied by [`score_to_tt`].
pub fn score_from_tt(score: i32, ply: u8) -> i32 {
    if score > WIN_THRESHOLD {
        score - ply as i32
    } else if score < -WIN_THRESHOLD {
        score + ply as i32
    } else {
        score
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Slot {
    key: u64,
    score: i32,
    depth: u8,
    bound: Bound,
    generation: u8,
}

/// Single-owner transposition table.
pub struct TranspositionTable {
    slots: Box<[Slot]>,
    /// Index mask, `slots.len() - 1`.
    mask: u64,
    generation: u8,
}

impl TranspositionTable {
    /// Create a table with the given size in megabytes.
    ///
    /// The number of slots is rounded down to a power of two.
    pub fn new(mb: usize) -> Self {
        let bytes = mb * 1024 * 1024;
        let slot_size = std::mem::size_of::<Slot>();
        let num_slots = ((bytes / slot_size).next_power_of_two() >> 1).max(1);

        Self {
            slots: vec![Slot::default(); num_slots].into_boxed_slice(),
            mask: (num_slots - 1) as u64,
            generation: 0,
        }
    }

    /// Number of slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Current generation.
    pub fn generation(&self) -> u8 {
        self.generation
    }

    /// Clear all entries and reset the generation counter.
    pub fn clear(&mut self) {
        self.slots.fill(Slot::default());
        self.generation = 0;
    }

    /// Advance the generation counter so older entries yield to new ones.
    pub fn new_generation(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    /// Look up a position.
    pub fn probe(&self, hash: u64, ply: u8) -> Option<TtEntry> {
        let slot = &self.slots[(hash & self.mask) as usize];
        if slot.bound == Bound::None || slot.key != hash {
            return None;
        }
        Some(TtEntry {
            depth: slot.depth,
            bound: slot.bound,
            score: score_from_tt(slot.score, ply),
        })
    }

    /// Probe and apply the stored result to the window `(alpha, beta)`.
    ///
    /// Entries searched shallower than `depth` are ignored. An exact entry
    /// settles the node; a bound narrows the window and settles the node if
    /// the window closes.
    pub fn probe_window(&self, hash: u64, depth: u8, ply: u8, mut alpha: i32, mut beta: i32) -> Probe {
        let Some(entry) = self.probe(hash, ply) else {
            return Probe::Miss;
        };
        if entry.depth < depth {
            return Probe::Miss;
        }

        match entry.bound {
            Bound::Exact => return Probe::Cutoff(entry.score),
            Bound::LowerBound => alpha = alpha.max(entry.score),
            Bound::UpperBound => beta = beta.min(entry.score),
            Bound::None => return Probe::Miss,
        }

        if alpha >= beta {
            Probe::Cutoff(entry.score)
        } else {
            Probe::Narrowed { alpha, beta }
        }
    }

    /// Store a search result.
    ///
    /// Replacement policy: replace if any of:
    /// - The slot is empty (bound is None)
    /// - The stored entry is from a different generation
    /// - The new depth >= stored depth
    /// - The new bound is Exact
    pub fn store(&mut self, hash: u64, depth: u8, score: i32, bound: Bound, ply: u8) {
        let generation = self.generation;
        let slot = &mut self.slots[(hash & self.mask) as usize];

        let replace = slot.bound == Bound::None
            || slot.generation != generation
            || depth >= slot.depth
            || bound == Bound::Exact;

        if replace {
            *slot = Slot {
                key: hash,
                score: score_to_tt(score, ply),
                depth,
                bound,
                generation,
            };
        }
    }
}

impl std::fmt::Debug for TranspositionTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranspositionTable")
            .field("slots", &self.slots.len())
            .field("generation", &self.generation)
            .finish()
    }
}
