//! Search configuration errors.

/// Errors reported by [`SearchConfig::validate`](crate::SearchConfig::validate).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A search must look at least one ply ahead.
    #[error("max depth must be at least 1")]
    ZeroDepth,

    /// The requested depth exceeds the recursion limit.
    #[error("max depth {depth} exceeds the limit of {max}")]
    DepthTooLarge {
        /// Requested depth.
        depth: u8,
        /// Largest supported depth.
        max: usize,
    },

    /// The transposition table is enabled but given no memory.
    #[error("transposition table size must be at least 1 MB")]
    ZeroTableSize,

    /// Pre-sort is enabled with a zero-ply pre-search.
    #[error("presort depth must be at least 1")]
    PresortDepth,

    /// The pre-search depth exceeds the recursion limit.
    #[error("presort depth {depth} exceeds the limit of {max}")]
    PresortTooDeep {
        /// Requested depth.
        depth: u8,
        /// Largest supported depth.
        max: usize,
    },

    /// The pre-sort time share is not a percentage in 1..=100.
    #[error("presort share must be between 1 and 100 percent, got {share}")]
    PresortShare {
        /// Requested share.
        share: u8,
    },
}
