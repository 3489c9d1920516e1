//! [Perft] (*per*formance *t*esting) is a technique for checking correctness of
//! move generation (tested functions are generate move, make move and unmake
//! move): the number of leaf nodes of the legal move tree is compared against
//! known values.
//!
//! [Perft]: https://www.chessprogramming.org/Perft

use crate::chess::moves::Move;
use crate::chess::position::Position;

/// Counts the leaf nodes of the legal move tree of given depth. The last ply
/// is not played: the number of legal moves is the number of leaves.
///
/// ```
/// use rookery::chess::perft::perft;
/// use rookery::chess::position::Position;
///
/// assert_eq!(perft(&Position::starting(), 2), 400);
/// ```
#[must_use]
pub fn perft(position: &Position, depth: u8) -> u64 {
    match depth {
        0 => 1,
        1 => position.generate_moves().len() as u64,
        _ => {
            let mut scratch = position.clone();
            let mut nodes = 0;
            for next_move in position.generate_moves() {
                let undo = scratch.apply(next_move);
                nodes += perft(&scratch, depth - 1);
                scratch.unmake_move(next_move, undo);
            }
            nodes
        },
    }
}

/// Breaks [`perft`] down by the root moves. The output is the standard way to
/// find discrepancies with another move generator. Empty for depth 0.
#[must_use]
pub fn divide(position: &Position, depth: u8) -> Vec<(Move, u64)> {
    if depth == 0 {
        return Vec::new();
    }
    let mut scratch = position.clone();
    position
        .generate_moves()
        .into_iter()
        .map(|next_move| {
            let undo = scratch.apply(next_move);
            let nodes = perft(&scratch, depth - 1);
            scratch.unmake_move(next_move, undo);
            (next_move, nodes)
        })
        .collect()
}
