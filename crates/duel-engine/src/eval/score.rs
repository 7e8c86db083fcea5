//! Score scale shared by evaluators, the search and the transposition table.
//!
//! All scores are plain `i32` values from one side's point of view. Terminal
//! sentinels sit far above anything a heuristic may return:
//!
//! ```text
//!   INF            30 000   unreachable window bound
//!   WIN_SCORE      29 000   win at the node itself
//!   WIN_THRESHOLD  28 000   anything above is a proven win (minus distance)
//!   HEURISTIC_LIMIT 20 000  clamp for non-terminal evaluations
//!   DRAW_SCORE          0
//! ```

/// Score representing an unreachable upper/lower bound.
pub const INF: i32 = 30_000;

/// Base score for a win (reduced by ply for win distance).
pub const WIN_SCORE: i32 = 29_000;

/// Scores above this threshold indicate a forced win.
pub const WIN_THRESHOLD: i32 = 28_000;

/// Largest magnitude a heuristic evaluation may report.
pub const HEURISTIC_LIMIT: i32 = 20_000;

/// Score of a drawn position.
pub const DRAW_SCORE: i32 = 0;

/// Maximum search depth (in plies).
pub const MAX_PLY: usize = 128;
