//! Search tuning knobs.

use std::time::Duration;

use crate::error::ConfigError;
use crate::eval::score::MAX_PLY;

/// Settings for a [`Searcher`](crate::Searcher).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Plies searched by [`Searcher::play`](crate::Searcher::play).
    pub max_depth: u8,
    /// Remaining time below which the search stops expanding nodes.
    pub safety_margin: Duration,
    /// Consult and fill the transposition table.
    pub use_tt: bool,
    /// Keep table entries between top-level calls instead of clearing them.
    pub retain_tt: bool,
    /// Transposition table size in megabytes.
    pub tt_mb: usize,
    /// Order root moves with a shallow pre-search.
    pub presort: bool,
    /// Depth of the pre-search.
    pub presort_depth: u8,
    /// Percent of the usable time the pre-search may spend.
    pub presort_share: u8,
    /// Fixed fingerprint seed; `None` draws one from OS entropy.
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 6,
            safety_margin: Duration::from_millis(100),
            use_tt: true,
            retain_tt: false,
            tt_mb: 16,
            presort: true,
            presort_depth: 1,
            presort_share: 10,
            seed: None,
        }
    }
}

impl SearchConfig {
    /// Tuning for `size x size` tic-tac-toe.
    ///
    /// 3x3 is small enough to solve outright.
    pub fn square(size: usize) -> Self {
        let max_depth = if size <= 3 { 9 } else { 6 };
        Self {
            max_depth,
            ..Self::default()
        }
    }

    /// Tuning for 4x4x4 tic-tac-toe.
    pub fn cube() -> Self {
        Self {
            max_depth: 4,
            presort_share: 20,
            ..Self::default()
        }
    }

    /// Tuning for checkers.
    pub fn checkers() -> Self {
        Self {
            max_depth: 8,
            tt_mb: 32,
            ..Self::default()
        }
    }

    /// Check that every field is in range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == 0 {
            return Err(ConfigError::ZeroDepth);
        }
        if self.max_depth as usize >= MAX_PLY {
            return Err(ConfigError::DepthTooLarge {
                depth: self.max_depth,
                max: MAX_PLY - 1,
            });
        }
        if self.use_tt && self.tt_mb == 0 {
            return Err(ConfigError::ZeroTableSize);
        }
        if self.presort && self.presort_depth == 0 {
            return Err(ConfigError::PresortDepth);
        }
        if self.presort && self.presort_depth as usize >= MAX_PLY {
            return Err(ConfigError::PresortTooDeep {
                depth: self.presort_depth,
                max: MAX_PLY - 1,
            });
        }
        if self.presort && !(1..=100).contains(&self.presort_share) {
            return Err(ConfigError::PresortShare {
                share: self.presort_share,
            });
        }
        Ok(())
    }
}
