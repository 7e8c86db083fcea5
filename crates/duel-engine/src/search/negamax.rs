//! Negamax alpha-beta search and the unpruned minimax reference.

use duel_core::{Position, Side, Zobrist};

use crate::eval::Evaluator;
use crate::eval::score::{INF, MAX_PLY, WIN_THRESHOLD};
use crate::search::control::SearchControl;
use crate::search::tt::{Bound, Probe, TranspositionTable};

/// Search state threaded through negamax calls.
pub(super) struct SearchContext<'a, E> {
    /// Total nodes visited.
    pub nodes: u64,
    /// Transposition table, `None` when disabled for this call.
    pub tt: Option<&'a mut TranspositionTable>,
    /// Fingerprint keys for the table.
    pub zobrist: &'a Zobrist,
    /// Leaf evaluator.
    pub evaluator: &'a E,
    /// Deadline and safety margin.
    pub control: &'a SearchControl,
    /// Side the search plays for.
    pub perspective: Side,
    /// Set once the deadline cut any node short.
    pub timed_out: bool,
}

/// Pull win scores toward zero by `ply` so nearer wins score higher.
#[inline]
fn adjust_for_ply(score: i32, ply: u8) -> i32 {
    if score > WIN_THRESHOLD {
        score - ply as i32
    } else if score < -WIN_THRESHOLD {
        score + ply as i32
    } else {
        score
    }
}

/// Leaf value of `position` for `perspective`.
#[inline]
fn leaf_value<P: Position, E: Evaluator<P>>(
    position: &P,
    ply: u8,
    perspective: Side,
    evaluator: &E,
) -> i32 {
    adjust_for_ply(evaluator.evaluate(position, perspective), ply)
}

/// Negamax alpha-beta search (fail-soft).
///
/// Returns the score of `position` for its side to move. `depth` counts
/// the plies left to the horizon, `ply` the plies from the root. A child's
/// score is negated only when the mover changes.
///
/// The table is only consulted and filled at nodes where the searching side
/// is to move: a score found with the opponent to move depends on the window
/// the path handed down.
pub(super) fn negamax<P: Position, E: Evaluator<P>>(
    position: &P,
    hash: u64,
    depth: u8,
    ply: u8,
    mut alpha: i32,
    mut beta: i32,
    ctx: &mut SearchContext<'_, E>,
) -> i32 {
    ctx.nodes += 1;

    let mover = position.side_to_move();
    let cacheable = mover == ctx.perspective && ctx.tt.is_some();
    let original_alpha = alpha;
    let original_beta = beta;

    if cacheable && let Some(tt) = ctx.tt.as_deref() {
        match tt.probe_window(hash, depth, ply, alpha, beta) {
            Probe::Cutoff(score) => return score,
            Probe::Narrowed { alpha: a, beta: b } => {
                alpha = a;
                beta = b;
            }
            Probe::Miss => {}
        }
    }

    let sign = mover.sign_for(ctx.perspective);

    if depth == 0 || position.outcome().is_terminal() {
        return sign * leaf_value(position, ply, ctx.perspective, ctx.evaluator);
    }
    if ctx.control.out_of_time() {
        ctx.timed_out = true;
        return sign * leaf_value(position, ply, ctx.perspective, ctx.evaluator);
    }

    let children = position.successors();
    if children.is_empty() {
        return sign * leaf_value(position, ply, ctx.perspective, ctx.evaluator);
    }

    let mut best_score = -INF;

    for child in &children {
        let child_hash = if ctx.tt.is_some() {
            ctx.zobrist.advance(hash, position, child)
        } else {
            0
        };
        let score = if child.side_to_move() == mover {
            negamax(child, child_hash, depth - 1, ply + 1, alpha, beta, ctx)
        } else {
            -negamax(child, child_hash, depth - 1, ply + 1, -beta, -alpha, ctx)
        };

        if score > best_score {
            best_score = score;
            if score > alpha {
                alpha = score;
            }
        }

        if alpha >= beta {
            break;
        }
        if ctx.control.out_of_time() {
            ctx.timed_out = true;
            break;
        }
    }

    if cacheable
        && !ctx.timed_out
        && let Some(tt) = ctx.tt.as_deref_mut()
    {
        let bound = if best_score <= original_alpha {
            Bound::UpperBound
        } else if best_score >= original_beta {
            Bound::LowerBound
        } else {
            Bound::Exact
        };
        tt.store(hash, depth, best_score, bound, ply);
    }

    best_score
}

/// Search every root successor and return the index and score of the best.
///
/// Scores are from `ctx.perspective`'s point of view; the first successor
/// with the highest score wins ties. The root itself is never probed. The
/// first successor is always searched; later ones only while time remains.
pub(super) fn search_root<P: Position, E: Evaluator<P>>(
    root: &P,
    root_hash: u64,
    children: &[P],
    order: &[usize],
    depth: u8,
    ctx: &mut SearchContext<'_, E>,
) -> (usize, i32) {
    ctx.nodes += 1;

    let mut alpha = -INF;
    let beta = INF;
    let mut best_index = order[0];
    let mut best_score = -INF;

    for (searched, &index) in order.iter().enumerate() {
        if searched > 0 && ctx.control.out_of_time() {
            ctx.timed_out = true;
            break;
        }

        let child = &children[index];
        let child_hash = if ctx.tt.is_some() {
            ctx.zobrist.advance(root_hash, root, child)
        } else {
            0
        };
        let score = if child.side_to_move() == ctx.perspective {
            negamax(child, child_hash, depth - 1, 1, alpha, beta, ctx)
        } else {
            -negamax(child, child_hash, depth - 1, 1, -beta, -alpha, ctx)
        };

        if score > best_score {
            best_score = score;
            best_index = index;
        }
        alpha = alpha.max(score);
    }

    (best_index, best_score)
}

/// Full-width minimax without pruning or table, from `perspective`'s view.
///
/// The searching side maximizes and the other side minimizes. Wins are
/// distance-adjusted exactly as in [`negamax`], so both agree on any tree
/// searched to completion. `depth` is capped below [`MAX_PLY`].
pub fn minimax<P: Position, E: Evaluator<P>>(
    position: &P,
    depth: u8,
    perspective: Side,
    evaluator: &E,
) -> i32 {
    let depth = depth.min((MAX_PLY - 1) as u8);
    let mut nodes = 0;
    minimax_bounded(position, depth, 0, perspective, evaluator, &SearchControl::unlimited(), &mut nodes)
}

/// [`minimax`] that stops expanding once `control` runs out of time.
pub(super) fn minimax_bounded<P: Position, E: Evaluator<P>>(
    position: &P,
    depth: u8,
    ply: u8,
    perspective: Side,
    evaluator: &E,
    control: &SearchControl,
    nodes: &mut u64,
) -> i32 {
    *nodes += 1;

    if depth == 0 || position.outcome().is_terminal() || control.out_of_time() {
        return leaf_value(position, ply, perspective, evaluator);
    }
    let children = position.successors();
    if children.is_empty() {
        return leaf_value(position, ply, perspective, evaluator);
    }

    let scores = children
        .iter()
        .map(|child| minimax_bounded(child, depth - 1, ply + 1, perspective, evaluator, control, nodes));
    let best = if position.side_to_move() == perspective {
        scores.max()
    } else {
        scores.min()
    };
    best.unwrap_or_else(|| leaf_value(position, ply, perspective, evaluator))
}

#[cfg(test)]
mod tests {
    use duel_core::TicTacToe;

    use super::*;
    use crate::eval::LineEvaluator;
    use crate::eval::score::WIN_SCORE;

    fn context<'a>(
        zobrist: &'a Zobrist,
        control: &'a SearchControl,
        tt: Option<&'a mut TranspositionTable>,
        perspective: Side,
    ) -> SearchContext<'a, LineEvaluator> {
        SearchContext {
            nodes: 0,
            tt,
            zobrist,
            evaluator: &LineEvaluator,
            control,
            perspective,
            timed_out: false,
        }
    }

    #[test]
    fn finished_game_scores_sentinel() {
        let board = TicTacToe::parse_square("xxx/oo./...").unwrap();
        let zobrist = Zobrist::with_seed(9, 1);
        let control = SearchControl::unlimited();
        let mut ctx = context(&zobrist, &control, None, Side::Second);
        // Second to move has lost.
        assert_eq!(negamax(&board, 0, 3, 0, -INF, INF, &mut ctx), -WIN_SCORE);
    }

    #[test]
    fn win_in_one_is_found_and_distance_adjusted() {
        // x to move completes the top row.
        let board = TicTacToe::parse_square("xx./oo./...").unwrap();
        let zobrist = Zobrist::with_seed(9, 1);
        let control = SearchControl::unlimited();
        let mut ctx = context(&zobrist, &control, None, Side::First);
        assert_eq!(negamax(&board, 0, 2, 0, -INF, INF, &mut ctx), WIN_SCORE - 1);
        assert_eq!(minimax(&board, 2, Side::First, &LineEvaluator), WIN_SCORE - 1);
    }

    #[test]
    fn minimax_caps_excessive_depth() {
        let board = TicTacToe::parse_square("x../.o./...").unwrap();
        assert_eq!(
            minimax(&board, u8::MAX, Side::First, &LineEvaluator),
            minimax(&board, 9, Side::First, &LineEvaluator)
        );
    }

    #[test]
    fn negamax_matches_minimax_on_open_board() {
        let board = TicTacToe::parse_square("x../.o./...").unwrap();
        let zobrist = Zobrist::with_seed(9, 1);
        let control = SearchControl::unlimited();
        for depth in 1..=4 {
            let mut ctx = context(&zobrist, &control, None, Side::First);
            assert_eq!(
                negamax(&board, 0, depth, 0, -INF, INF, &mut ctx),
                minimax(&board, depth, Side::First, &LineEvaluator),
                "depth {depth}"
            );
        }
    }

    #[test]
    fn table_does_not_change_score() {
        let board = TicTacToe::parse_square("x../.o./...").unwrap();
        let zobrist = Zobrist::with_seed(9, 1);
        let control = SearchControl::unlimited();
        let hash = zobrist.fingerprint(&board);

        let mut plain = context(&zobrist, &control, None, Side::First);
        let without = negamax(&board, hash, 7, 0, -INF, INF, &mut plain);

        let mut tt = TranspositionTable::new(1);
        let mut cached = context(&zobrist, &control, Some(&mut tt), Side::First);
        let with = negamax(&board, hash, 7, 0, -INF, INF, &mut cached);
        assert_eq!(with, without);
    }

    #[test]
    fn root_prefers_first_of_equal_moves() {
        // Against a centre opening every corner reply scores the same at
        // depth 1, ahead of the edges. The first corner generated is chosen.
        let board = TicTacToe::square(3).play(4);
        let children = board.successors();
        let order: Vec<usize> = (0..children.len()).collect();
        let zobrist = Zobrist::with_seed(9, 1);
        let control = SearchControl::unlimited();
        let mut ctx = context(&zobrist, &control, None, Side::Second);
        let (index, _) = search_root(&board, 0, &children, &order, 1, &mut ctx);
        assert_eq!(children[index].last_move(), Some(0));
    }

    #[test]
    fn exhausted_control_stops_early() {
        let board = TicTacToe::square(3);
        let zobrist = Zobrist::with_seed(9, 1);
        let control = SearchControl::new(
            crate::search::control::Deadline::after(std::time::Duration::ZERO),
            std::time::Duration::from_millis(50),
        );
        let mut ctx = context(&zobrist, &control, None, Side::First);
        negamax(&board, 0, 9, 0, -INF, INF, &mut ctx);
        assert!(ctx.timed_out);
        assert_eq!(ctx.nodes, 1);
    }
}
