//! Deadline-bounded best-move search.

pub mod control;
pub mod negamax;
pub mod ordering;
pub mod tt;

use std::time::Duration;

use duel_core::{Position, Side, Zobrist};
use tracing::{debug, info, warn};

use crate::config::SearchConfig;
use crate::error::ConfigError;
use crate::eval::Evaluator;
use crate::eval::score::MAX_PLY;

use control::{Deadline, SearchControl};
use negamax::{SearchContext, search_root};
use ordering::presort;
use tt::TranspositionTable;

/// Result of a completed search.
#[derive(Debug, Clone)]
pub struct SearchResult<P> {
    /// Successor judged best for the searching side.
    pub best: P,
    /// Its score from the searching side's point of view.
    pub score: i32,
    /// Total nodes visited, pre-search included.
    pub nodes: u64,
    /// Depth searched.
    pub depth: u8,
    /// Whether the deadline cut the search short.
    pub timed_out: bool,
    /// Wall-clock time spent.
    pub elapsed: Duration,
}

/// Alpha-beta searcher for one game.
///
/// Owns the evaluator, the fingerprint keys and the transposition table.
/// Calls on one searcher must not overlap; each top-level call has the table
/// to itself.
pub struct Searcher<E> {
    config: SearchConfig,
    evaluator: E,
    zobrist: Zobrist,
    tt: Option<TranspositionTable>,
    /// Side the retained table was filled for.
    tt_owner: Option<Side>,
}

impl<E> Searcher<E> {
    /// Create a searcher for boards of up to `cell_count` cells.
    pub fn new(config: SearchConfig, evaluator: E, cell_count: usize) -> Result<Self, ConfigError> {
        config.validate()?;

        let zobrist = match config.seed {
            Some(seed) => Zobrist::with_seed(cell_count, seed),
            None => Zobrist::new(cell_count),
        };
        let tt = config.use_tt.then(|| TranspositionTable::new(config.tt_mb));

        Ok(Self {
            config,
            evaluator,
            zobrist,
            tt,
            tt_owner: None,
        })
    }

    /// Active configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Clear the transposition table (preserving the allocation).
    pub fn clear_tt(&mut self) {
        if let Some(tt) = &mut self.tt {
            tt.clear();
        }
        self.tt_owner = None;
    }

    /// Prepare the table for a new top-level call by `perspective`.
    fn prepare_tt(&mut self, perspective: Side) {
        let Some(tt) = &mut self.tt else { return };
        if self.config.retain_tt && self.tt_owner == Some(perspective) {
            tt.new_generation();
        } else {
            tt.clear();
        }
        self.tt_owner = Some(perspective);
    }

    /// Search `position` for `perspective` and report the best successor.
    ///
    /// Returns `None` when `position` has no successors. Never fails on
    /// time: once the deadline's safety margin is reached the best successor
    /// found so far is returned.
    pub fn search<P>(
        &mut self,
        position: &P,
        perspective: Side,
        max_depth: u8,
        deadline: Deadline,
    ) -> Option<SearchResult<P>>
    where
        P: Position,
        E: Evaluator<P>,
    {
        let mut children = position.successors();
        if children.is_empty() {
            return None;
        }

        let depth = max_depth.clamp(1, (MAX_PLY - 1) as u8);
        let control = SearchControl::new(deadline, self.config.safety_margin);

        let hashing = self.config.use_tt && position.cell_count() <= self.zobrist.cell_count();
        if self.config.use_tt && !hashing {
            warn!(
                cells = position.cell_count(),
                keys = self.zobrist.cell_count(),
                "position larger than fingerprint table, searching without transposition table"
            );
        }
        if hashing {
            self.prepare_tt(perspective);
        }

        let mut nodes = 0;
        let order = if self.config.presort && children.len() > 1 {
            let slice = control.slice(self.config.presort_share);
            let (order, presort_nodes) = presort(
                &children,
                self.config.presort_depth,
                perspective,
                &self.evaluator,
                &slice,
            );
            nodes += presort_nodes;
            order
        } else {
            (0..children.len()).collect()
        };

        let root_hash = if hashing {
            self.zobrist.fingerprint(position)
        } else {
            0
        };

        let mut ctx = SearchContext {
            nodes: 0,
            tt: if hashing { self.tt.as_mut() } else { None },
            zobrist: &self.zobrist,
            evaluator: &self.evaluator,
            control: &control,
            perspective,
            timed_out: false,
        };

        let (best_index, score) = search_root(position, root_hash, &children, &order, depth, &mut ctx);
        nodes += ctx.nodes;
        let timed_out = ctx.timed_out;
        let elapsed = control.elapsed();

        debug!(
            %perspective,
            depth,
            score,
            nodes,
            timed_out,
            elapsed_ms = elapsed.as_millis() as u64,
            "search complete"
        );

        Some(SearchResult {
            best: children.swap_remove(best_index),
            score,
            nodes,
            depth,
            timed_out,
            elapsed,
        })
    }

    /// Return the successor of `position` judged best for `perspective`.
    ///
    /// With no legal successor the position itself is returned unchanged,
    /// signalling a pass.
    pub fn select_best_move<P>(
        &mut self,
        deadline: Deadline,
        position: &P,
        perspective: Side,
        max_depth: u8,
    ) -> P
    where
        P: Position,
        E: Evaluator<P>,
    {
        match self.search(position, perspective, max_depth, deadline) {
            Some(result) => result.best,
            None => {
                info!(%perspective, "no legal move, passing");
                position.clone()
            }
        }
    }

    /// Play one move for the side to move at the configured depth.
    pub fn play<P>(&mut self, position: &P, deadline: Deadline) -> P
    where
        P: Position,
        E: Evaluator<P>,
    {
        let max_depth = self.config.max_depth;
        self.select_best_move(deadline, position, position.side_to_move(), max_depth)
    }
}

impl<E> std::fmt::Debug for Searcher<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Searcher")
            .field("config", &self.config)
            .field("zobrist", &self.zobrist)
            .field("tt", &self.tt)
            .finish()
    }
}
