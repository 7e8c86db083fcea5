//! Shared fixtures for the engine integration tests.

#![allow(dead_code)]

use std::time::Duration;

use duel_core::{Outcome, Piece, Position, Side};
use duel_engine::{Deadline, Evaluator, SearchConfig};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Levels a [`TreeGame`] can grow to.
pub const TREE_LEVELS: usize = 6;

/// Widest branching factor of a [`TreeGame`] node.
pub const TREE_BRANCHING: usize = 4;

/// A synthetic game whose tree is a pure function of a seed.
///
/// Each node has 2 to 4 children, a few nodes end the game, and now and
/// then the same side moves twice. A node is identified by how often each
/// choice was taken, not by their order, so different move orders reach
/// the same position and the transposition table gets real hits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeGame {
    seed: u64,
    taken: [u8; TREE_BRANCHING],
}

fn mix(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

impl TreeGame {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            taken: [0; TREE_BRANCHING],
        }
    }

    /// Moves played to reach this node.
    pub fn level(&self) -> usize {
        self.taken.iter().map(|&n| n as usize).sum()
    }

    /// Deterministic per-node noise.
    pub fn node_hash(&self) -> u64 {
        self.taken
            .iter()
            .fold(mix(self.seed), |h, &count| mix(h ^ (count as u64 + 1)))
    }

    fn branching(&self) -> usize {
        2 + (self.node_hash() % 3) as usize
    }

    /// Whether this node skips a turn, handing the move back to the side
    /// that just played.
    fn repeats(&self) -> bool {
        self.level() > 0 && self.node_hash() % 7 == 0
    }
}

impl Position for TreeGame {
    fn side_to_move(&self) -> Side {
        if (self.level() + self.repeats() as usize) % 2 == 0 {
            Side::First
        } else {
            Side::Second
        }
    }

    fn successors(&self) -> Vec<Self> {
        if self.level() >= TREE_LEVELS || self.outcome().is_terminal() {
            return Vec::new();
        }
        (0..self.branching())
            .map(|choice| {
                let mut child = self.clone();
                child.taken[choice] += 1;
                child
            })
            .collect()
    }

    fn outcome(&self) -> Outcome {
        if self.level() > 0 && self.node_hash() % 13 == 0 {
            Outcome::Win(!self.side_to_move())
        } else {
            Outcome::Ongoing
        }
    }

    fn cell_count(&self) -> usize {
        TREE_LEVELS * TREE_BRANCHING
    }

    fn cell(&self, index: usize) -> Option<Piece> {
        let (choice, nth) = (index / TREE_LEVELS, index % TREE_LEVELS);
        (nth < self.taken[choice] as usize).then_some(Piece::FIRST_MAN)
    }
}

/// Anti-symmetric noise in `-100..=100`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeEvaluator;

impl Evaluator<TreeGame> for TreeEvaluator {
    fn heuristic(&self, position: &TreeGame, perspective: Side) -> i32 {
        let raw = (position.node_hash() % 201) as i32 - 100;
        raw * Side::First.sign_for(perspective)
    }
}

/// A deadline far enough away that no test search runs into it.
pub fn generous() -> Deadline {
    Deadline::after(Duration::from_secs(120))
}

/// Reproducible configuration with a small table.
pub fn seeded(config: SearchConfig) -> SearchConfig {
    SearchConfig {
        seed: Some(0x5EED),
        tt_mb: 1,
        ..config
    }
}

/// Every position along a random playout from `start`, `start` included.
pub fn playout<P: Position>(start: &P, rng: &mut StdRng) -> Vec<P> {
    let mut line = vec![start.clone()];
    loop {
        let Some(last) = line.last() else { break };
        let mut children = last.successors();
        if children.is_empty() {
            break;
        }
        let pick = rng.random_range(0..children.len());
        line.push(children.swap_remove(pick));
    }
    line
}

/// Seeded random source for playouts.
pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}
