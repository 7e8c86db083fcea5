//! Root move ordering by a shallow pre-search.

use duel_core::{Position, Side};
use tracing::trace;

use crate::eval::Evaluator;
use crate::search::control::SearchControl;
use crate::search::negamax::minimax_bounded;

/// Order root successors best-first for `perspective`.
///
/// Each successor is scored with an unpruned search `depth` plies deep
/// while `control` has time left. Scored successors come first, sorted by
/// score with ties kept in generation order; any left unscored when time
/// ran out follow in generation order.
///
/// Returns indices into `children` and the number of nodes visited.
pub(super) fn presort<P: Position, E: Evaluator<P>>(
    children: &[P],
    depth: u8,
    perspective: Side,
    evaluator: &E,
    control: &SearchControl,
) -> (Vec<usize>, u64) {
    let mut nodes = 0;
    let mut scored: Vec<(usize, i32)> = Vec::with_capacity(children.len());

    for (index, child) in children.iter().enumerate() {
        if control.out_of_time() {
            break;
        }
        let score = minimax_bounded(child, depth, 1, perspective, evaluator, control, &mut nodes);
        if control.out_of_time() {
            break;
        }
        scored.push((index, score));
    }

    let complete = scored.len();
    scored.sort_by(|a, b| b.1.cmp(&a.1));
    trace!(scored = complete, total = children.len(), order = ?scored, "presort");

    let order = scored
        .into_iter()
        .map(|(index, _)| index)
        .chain(complete..children.len())
        .collect();
    (order, nodes)
}
