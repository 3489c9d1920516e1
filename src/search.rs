//! Picks a move for `go` without searching the game tree: a mate in one if
//! there is one, otherwise the capture of the most valuable piece, otherwise
//! the first legal move.
//!
//! The piece values are the "[standard piece valuations]".
//!
//! [standard piece valuations]: https://en.wikipedia.org/wiki/Chess_piece_relative_value

use std::sync::atomic::{AtomicBool, Ordering};

use crate::chess::core::PieceKind;
use crate::chess::moves::Move;
use crate::chess::position::Position;

/// Material value of a piece in centipawns.
type Value = u16;

const fn value(kind: PieceKind) -> Value {
    match kind {
        PieceKind::Pawn => 100,
        PieceKind::Knight | PieceKind::Bishop => 300,
        PieceKind::Rook => 500,
        PieceKind::Queen => 900,
        // Never captured in a legal position.
        PieceKind::King => 0,
    }
}

/// The move chosen by [`select_move`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Selection {
    /// `None` if the side to move has no legal moves.
    pub best: Option<Move>,
    /// Number of candidate moves that were played and inspected.
    pub nodes: u64,
}

/// Chooses a legal move. `stop` is checked before every candidate: once it is
/// raised the best move found so far is returned, or the first legal move if
/// nothing was inspected yet.
#[must_use]
pub fn select_move(position: &Position, stop: &AtomicBool) -> Selection {
    let moves = position.generate_moves();
    let mut scratch = position.clone();
    let mut nodes = 0;
    let mut best_capture: Option<(Move, Value)> = None;

    for &candidate in &moves {
        if stop.load(Ordering::Relaxed) {
            break;
        }
        nodes += 1;
        let undo = scratch.apply(candidate);
        let mates = scratch.in_check() && scratch.generate_moves().is_empty();
        scratch.unmake_move(candidate, undo);
        if mates {
            return Selection {
                best: Some(candidate),
                nodes,
            };
        }
        if candidate.is_capture() {
            // En passant is the only capture with an empty target square.
            let captured = position
                .piece_at(candidate.to())
                .map_or(PieceKind::Pawn, |piece| piece.kind());
            if best_capture.map_or(true, |(_, best)| value(captured) > best) {
                best_capture = Some((candidate, value(captured)));
            }
        }
    }

    Selection {
        best: best_capture
            .map(|(capture, _)| capture)
            .or_else(|| moves.first().copied()),
        nodes,
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    fn select(fen: &str) -> Selection {
        let position = Position::from_fen(fen).expect("valid position");
        select_move(&position, &AtomicBool::new(false))
    }

    #[test]
    fn mate_in_one() {
        let selection = select("7k/5Q2/6K1/8/8/8/8/8 w - - 0 1");
        assert_eq!(
            selection.best.map(|m| m.to_string()),
            Some("f7g7".to_string())
        );
    }

    #[test]
    fn most_valuable_capture() {
        let fen = "4k3/8/8/3q1n2/4P3/8/8/4K3 w - - 0 1";
        let selection = select(fen);
        assert_eq!(
            selection.best.map(|m| m.to_string()),
            Some("e4d5".to_string())
        );
        let position = Position::from_fen(fen).unwrap();
        assert_eq!(selection.nodes, position.generate_moves().len() as u64);
    }

    #[test]
    fn en_passant_counts_as_pawn_capture() {
        let selection = select("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1");
        assert_eq!(
            selection.best.map(|m| m.to_string()),
            Some("e5d6".to_string())
        );
    }

    #[test]
    fn first_legal_move() {
        let selection = select("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
        assert_eq!(
            selection.best.map(|m| m.to_string()),
            Some("a2a3".to_string())
        );
        assert_eq!(selection.nodes, 20);
    }

    #[test]
    fn no_legal_moves() {
        assert_eq!(
            select("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1"),
            Selection {
                best: None,
                nodes: 0
            }
        );
    }

    #[test]
    fn stopped_before_first_candidate() {
        let selection = select_move(&Position::starting(), &AtomicBool::new(true));
        assert_eq!(selection.nodes, 0);
        assert_eq!(
            selection.best,
            Position::starting().generate_moves().first().copied()
        );
    }
}
