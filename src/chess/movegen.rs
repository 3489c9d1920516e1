//! [Move generation]: pseudo-legal moves are produced from the attack tables
//! and filtered down to the legal ones by playing each of them on a scratch
//! copy of the position.
//!
//! Moves are ordered deterministically: pawns, knights, bishops, rooks,
//! queens, king and castling last. Within a piece kind the moves are sorted by
//! the origin and then the destination square, promotions come in queen,
//! rook, bishop, knight order.
//!
//! [Move generation]: https://www.chessprogramming.org/Move_Generation

use crate::chess::attacks::{attacks_for, pawn_attacks};
use crate::chess::bitboard::Bitboard;
use crate::chess::core::{CastlingSide, PieceKind, Promotion, Rank, Square};
use crate::chess::moves::{Move, MoveFlag, MoveList};
use crate::chess::position::Position;
use crate::error::{Error, Result};

const PROMOTIONS: [Promotion; 4] = [
    Promotion::Queen,
    Promotion::Rook,
    Promotion::Bishop,
    Promotion::Knight,
];

impl Position {
    /// Calculates a list of legal moves (i.e. the moves that do not leave our
    /// king in check).
    ///
    /// ```
    /// use rookery::chess::position::Position;
    ///
    /// assert_eq!(Position::starting().generate_moves().len(), 20);
    /// ```
    #[must_use]
    pub fn generate_moves(&self) -> MoveList {
        let us = self.side_to_move();
        let mut scratch = self.clone();
        let mut moves = MoveList::new();
        for candidate in self.generate_pseudo_legal_moves() {
            let undo = scratch.apply(candidate);
            if !scratch.is_in_check(us) {
                moves.push(candidate);
            }
            scratch.unmake_move(candidate, undo);
        }
        moves
    }

    /// Moves that follow the movement rules of each piece but may leave own
    /// king in check. Castling is the exception: it is only generated when
    /// the king does not start, pass or land on an attacked square.
    #[must_use]
    pub fn generate_pseudo_legal_moves(&self) -> MoveList {
        let mut moves = MoveList::new();
        self.generate_pawn_moves(&mut moves);
        for kind in [
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Rook,
            PieceKind::Queen,
            PieceKind::King,
        ] {
            self.generate_piece_moves(kind, &mut moves);
        }
        self.generate_castles(&mut moves);
        moves
    }

    /// No legal moves while in check.
    #[must_use]
    pub fn is_checkmate(&self) -> bool {
        self.in_check() && self.generate_moves().is_empty()
    }

    /// No legal moves while not in check.
    #[must_use]
    pub fn is_stalemate(&self) -> bool {
        !self.in_check() && self.generate_moves().is_empty()
    }

    /// Finds the legal move written in UCI long algebraic notation (`e2e4`,
    /// `e7e8q`, `e1g1` for castling).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEncoding`] if the squares or the promotion
    /// can not be parsed and [`Error::IllegalMove`] if there is no such legal
    /// move.
    pub fn parse_uci_move(&self, uci: &str) -> Result<Move> {
        let (Some(from), Some(to)) = (uci.get(0..2), uci.get(2..4)) else {
            return Err(Error::encoding("move", format!("{uci:?}")));
        };
        let from = Square::try_from(from)?;
        let to = Square::try_from(to)?;
        let promotion = match &uci[4..] {
            "" => None,
            suffix => {
                let mut symbols = suffix.chars();
                match (symbols.next(), symbols.next()) {
                    (Some(symbol), None) => Some(Promotion::try_from(symbol)?),
                    _ => return Err(Error::encoding("move", format!("{uci:?}"))),
                }
            },
        };
        self.generate_moves()
            .into_iter()
            .find(|m| m.from() == from && m.to() == to && m.promotion() == promotion)
            .ok_or_else(|| Error::illegal(uci, format!("not a legal move in {self}")))
    }

    fn generate_pawn_moves(&self, moves: &mut MoveList) {
        let us = self.side_to_move();
        let them = us.opponent();
        let empty = !self.occupied_squares();
        let enemies = self.occupancy(them);
        let en_passant = self
            .en_passant_square()
            .map_or(Bitboard::empty(), Bitboard::from);
        let promotion_rank = Rank::backrank(them).mask();
        // Pawns that made a single push from the starting rank land here.
        let single_push_rank = Rank::en_passant_target(them).mask();

        for from in self.pieces(us).pawns {
            let single = Bitboard::from(from).shift(us.push_direction()) & empty;
            let double = (single & single_push_rank).shift(us.push_direction()) & empty;
            let captures = pawn_attacks(us, from) & enemies;
            let en_passant_captures = pawn_attacks(us, from) & en_passant;
            for to in single | double | captures | en_passant_captures {
                let flag = if double.contains(to) {
                    MoveFlag::DoublePawnPush
                } else if en_passant_captures.contains(to) {
                    MoveFlag::EnPassant
                } else if captures.contains(to) {
                    MoveFlag::Capture
                } else {
                    MoveFlag::Quiet
                };
                if promotion_rank.contains(to) {
                    for promotion in PROMOTIONS {
                        moves.push(Move::new(
                            from,
                            to,
                            MoveFlag::promotion(promotion, flag.is_capture()),
                        ));
                    }
                } else {
                    moves.push(Move::new(from, to, flag));
                }
            }
        }
    }

    fn generate_piece_moves(&self, kind: PieceKind, moves: &mut MoveList) {
        let us = self.side_to_move();
        let occupied = self.occupied_squares();
        let ours = self.occupancy(us);
        let enemies = self.occupancy(us.opponent());
        for from in self.pieces(us).bitboard_for(kind) {
            for to in attacks_for(kind, from, us, occupied) - ours {
                let flag = if enemies.contains(to) {
                    MoveFlag::Capture
                } else {
                    MoveFlag::Quiet
                };
                moves.push(Move::new(from, to, flag));
            }
        }
    }

    fn generate_castles(&self, moves: &mut MoveList) {
        let us = self.side_to_move();
        if self.in_check() {
            return;
        }
        let king_from = CastlingSide::king_from(us);
        let pieces = self.pieces(us);
        for (side, flag) in [
            (CastlingSide::Short, MoveFlag::KingsideCastle),
            (CastlingSide::Long, MoveFlag::QueensideCastle),
        ] {
            if !self.castling().contains(side.right(us))
                || !pieces.king.contains(king_from)
                || !pieces.rooks.contains(side.rook_from(us))
                || self.occupied_squares().intersects(side.gap(us))
                || side
                    .king_walk(us)
                    .iter()
                    .any(|square| self.is_attacked(square, us.opponent()))
            {
                continue;
            }
            moves.push(Move::new(king_from, side.king_to(us), flag));
        }
    }
}
