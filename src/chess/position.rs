//! Provides fully-specified [Chess Position] implementation: stores information
//! about the board and tracks the state of castling, 50-move rule draw, etc.
//!
//! Moves are applied in place with [`Position::make_move`] and reverted with
//! [`Position::unmake_move`]. The caller keeps the history: each make returns
//! a compact [`UndoInfo`] with everything the move destroys.
//!
//! [Chess Position]: https://www.chessprogramming.org/Chess_Position

use std::fmt;
use std::num::NonZeroU16;
use std::str::FromStr;

use crate::chess::attacks::{
    between,
    bishop_attacks,
    king_attacks,
    knight_attacks,
    pawn_attacks,
    rook_attacks,
};
use crate::chess::bitboard::{Bitboard, Board, Pieces};
use crate::chess::core::{
    CastleRights,
    CastlingSide,
    Color,
    File,
    Piece,
    PieceKind,
    Rank,
    Square,
    BOARD_WIDTH,
};
use crate::chess::domain::{Enumerable, StrongValue};
use crate::chess::moves::{Move, MoveFlag};
use crate::error::{Error, FenField, Result};

/// State of the chess game: board, half-move counters and castling rights,
/// etc. It has 1:1 relationship with [Forsyth-Edwards Notation] (FEN).
///
/// [`Position::try_from()`] provides a convenient interface for creating a
/// [`Position`]. It will clean up the input (trim newlines and whitespace) and
/// attempt to parse in either FEN or a version of [Extended Position
/// Description] (EPD). The EPD format does not support [Operations], it only
/// exists for compatibility with databases which provide trimmed FEN lines
/// (all FEN parts except Halfmove Clock and Fullmove Counter).
///
/// Parsed positions are validated: a [`Position`] can only describe a state
/// that is reachable (or at least plausible) in a real game.
///
/// [Forsyth-Edwards Notation]: https://www.chessprogramming.org/Forsyth-Edwards_Notation
/// [Extended Position Description]: https://www.chessprogramming.org/Extended_Position_Description
/// [Operations]: https://www.chessprogramming.org/Extended_Position_Description#Operations
#[derive(Clone, PartialEq, Eq)]
pub struct Position {
    board: Board,
    castling: CastleRights,
    side_to_move: Color,
    /// [Halfmove Clock][^ply] keeps track of the number of (half-)moves
    /// since the last capture or pawn move and is used to enforce
    /// fifty[^fifty]-move draw rule.
    ///
    /// [Halfmove Clock]: https://www.chessprogramming.org/Halfmove_Clock
    /// [^ply]: "Half-move" or ["ply"](https://www.chessprogramming.org/Ply) means a move of only
    ///     one side.
    /// [^fifty]: 50 __full__ moves
    halfmove_clock: u8,
    fullmove_counter: NonZeroU16,
    /// The square skipped by a pawn double push on the previous move. It is
    /// set after every double push, even if no pawn can capture en passant.
    en_passant_square: Option<Square>,
}

impl Position {
    /// Creates the starting position of the standard chess.
    ///
    /// ```
    /// use rookery::chess::position::Position;
    ///
    /// let starting_position = Position::starting();
    /// assert_eq!(
    ///     starting_position.to_string(),
    ///     "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
    /// );
    /// ```
    #[must_use]
    pub fn starting() -> Self {
        Self {
            board: Board::starting(),
            castling: CastleRights::ALL,
            side_to_move: Color::White,
            halfmove_clock: 0,
            fullmove_counter: NonZeroU16::MIN,
            en_passant_square: None,
        }
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn castling(&self) -> CastleRights {
        self.castling
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn en_passant_square(&self) -> Option<Square> {
        self.en_passant_square
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn halfmove_clock(&self) -> u8 {
        self.halfmove_clock
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn fullmove_counter(&self) -> NonZeroU16 {
        self.fullmove_counter
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn pieces(&self, color: Color) -> &Pieces {
        self.board.pieces(color)
    }

    /// Squares occupied by the pieces of given color.
    #[must_use]
    pub fn occupancy(&self, color: Color) -> Bitboard {
        self.pieces(color).all()
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn occupied_squares(&self) -> Bitboard {
        self.board.occupied()
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board.at(square)
    }

    /// Returns `None` only for positions without a king of given color, which
    /// can not be constructed through FEN parsing.
    #[must_use]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces(color).king.lsb()
    }

    /// Pieces of color `by` attacking `square`. Uses the fact that attacks are
    /// symmetric: a knight on `square` would attack exactly the knights that
    /// attack it.
    #[must_use]
    pub fn attackers(&self, square: Square, by: Color) -> Bitboard {
        let occupancy = self.occupied_squares();
        let pieces = self.pieces(by);
        (pawn_attacks(by.opponent(), square) & pieces.pawns)
            | (knight_attacks(square) & pieces.knights)
            | (king_attacks(square) & pieces.king)
            | (bishop_attacks(square, occupancy) & (pieces.bishops | pieces.queens))
            | (rook_attacks(square, occupancy) & (pieces.rooks | pieces.queens))
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn is_attacked(&self, square: Square, by: Color) -> bool {
        !self.attackers(square, by).is_empty()
    }

    /// Checks if the king of given color is attacked by any enemy piece.
    #[must_use]
    pub fn is_in_check(&self, color: Color) -> bool {
        self
            .king_square(color)
            .is_some_and(|king| self.is_attacked(king, color.opponent()))
    }

    /// Checks if the side to move is in check.
    #[must_use]
    pub fn in_check(&self) -> bool {
        self.is_in_check(self.side_to_move)
    }

    /// Serializes the position to FEN. Same as [`Position::to_string`].
    #[must_use]
    pub fn fen(&self) -> String {
        self.to_string()
    }

    /// Plays a pseudo-legal move for the side to move and returns the
    /// information needed to take it back.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IllegalMove`] if `next_move` is not among the
    /// pseudo-legal moves. The position is left untouched in that case. Moves
    /// leaving own king in check are accepted, [`Position::generate_moves`]
    /// filters them out.
    pub fn make_move(&mut self, next_move: Move) -> Result<UndoInfo> {
        if !self.generate_pseudo_legal_moves().contains(&next_move) {
            return Err(Error::illegal(
                next_move,
                format!("not a pseudo-legal move in {self}"),
            ));
        }
        Ok(self.apply(next_move))
    }

    /// Same as [`Position::make_move`] without validation. The move must be
    /// produced by the move generator for this position.
    pub(crate) fn apply(&mut self, next_move: Move) -> UndoInfo {
        let us = self.side_to_move;
        let them = us.opponent();
        let (from, to, flag) = (next_move.from(), next_move.to(), next_move.flag());
        let Some(moving) = self.board.pieces(us).at(from) else {
            unreachable!("no {us} piece on {from} to play {next_move:?} in {self}");
        };
        let victim_square = capture_square(next_move);
        let captured = if flag.is_capture() {
            self.board
                .pieces(them)
                .at(victim_square)
                .map(|kind| Piece::new(them, kind))
        } else {
            None
        };
        let undo = UndoInfo::new(
            self.castling,
            self.en_passant_square.map(Square::file),
            self.halfmove_clock,
            captured,
        )
        .with_fullmove_frozen(us == Color::Black && self.fullmove_counter == NonZeroU16::MAX);

        if let Some(victim) = captured {
            *self.board.pieces_mut(them).bitboard_for_mut(victim.kind()) ^=
                Bitboard::from(victim_square);
        }
        let ours = self.board.pieces_mut(us);
        *ours.bitboard_for_mut(moving) ^= Bitboard::from(from);
        let placed = next_move.promotion().map_or(moving, PieceKind::from);
        *ours.bitboard_for_mut(placed) ^= Bitboard::from(to);
        if let Some(side) = flag.castling_side() {
            ours.rooks ^= Bitboard::from(side.rook_from(us)) | Bitboard::from(side.rook_to(us));
        }

        self.castling
            .remove(CastleRights::lost_by(from) | CastleRights::lost_by(to));
        self.en_passant_square = if flag == MoveFlag::DoublePawnPush {
            from.shift(us.push_direction())
        } else {
            None
        };
        self.halfmove_clock = if moving == PieceKind::Pawn || captured.is_some() {
            0
        } else {
            self.halfmove_clock.saturating_add(1)
        };
        if us == Color::Black {
            self.fullmove_counter = self.fullmove_counter.saturating_add(1);
        }
        self.side_to_move = them;
        undo
    }

    /// Takes back `last_move`. `undo` has to be the value returned when
    /// `last_move` was made in the preceding position.
    ///
    /// # Panics
    ///
    /// Panics if no piece of the side that moved stands on the target square
    /// of `last_move`. Other mismatched pairs leave the position corrupted.
    pub fn unmake_move(&mut self, last_move: Move, undo: UndoInfo) {
        let them = self.side_to_move;
        let us = them.opponent();
        let (from, to) = (last_move.from(), last_move.to());
        let Some(placed) = self.board.pieces(us).at(to) else {
            unreachable!("no {us} piece on {to} to take back {last_move:?} in {self}");
        };
        let moving = if last_move.promotion().is_some() {
            PieceKind::Pawn
        } else {
            placed
        };

        let ours = self.board.pieces_mut(us);
        *ours.bitboard_for_mut(placed) ^= Bitboard::from(to);
        *ours.bitboard_for_mut(moving) ^= Bitboard::from(from);
        if let Some(side) = last_move.flag().castling_side() {
            ours.rooks ^= Bitboard::from(side.rook_from(us)) | Bitboard::from(side.rook_to(us));
        }
        if let Some(victim) = undo.captured() {
            *self.board.pieces_mut(them).bitboard_for_mut(victim.kind()) ^=
                Bitboard::from(capture_square(last_move));
        }

        self.castling = undo.castling();
        self.en_passant_square = undo
            .en_passant_file()
            .map(|file| Square::new(file, Rank::en_passant_target(us)));
        self.halfmove_clock = undo.halfmove_clock();
        if us == Color::Black && !undo.fullmove_frozen() {
            self.fullmove_counter =
                NonZeroU16::new(self.fullmove_counter.get() - 1).unwrap_or(NonZeroU16::MIN);
        }
        self.side_to_move = us;
    }

    /// Parses board from Forsyth-Edwards Notation and checks its correctness.
    /// The parser is strict: no leading or trailing whitespace, fields are
    /// separated by exactly one space. 4-field (EPD) input defaults the clocks
    /// to `0 1`.
    ///
    /// ```
    /// use rookery::chess::position::Position;
    ///
    /// assert!(Position::from_fen("8/8/8/8/8/8/8/8 w - - 0 1").is_err());
    /// let position = Position::from_fen("4k3/8/8/8/8/8/8/4K3 b - -").unwrap();
    /// assert_eq!(position.to_string(), "4k3/8/8/8/8/8/8/4K3 b - - 0 1");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedFen`] naming the offending field if the input
    /// can not be parsed or describes an impossible position.
    pub fn from_fen(input: &str) -> Result<Self> {
        let fields = input.split(' ').collect::<Vec<_>>();
        let (placement, side, castling, en_passant, clocks) = match fields.as_slice() {
            [placement, side, castling, en_passant] => {
                (*placement, *side, *castling, *en_passant, None)
            },
            [placement, side, castling, en_passant, halfmove, fullmove] => (
                *placement,
                *side,
                *castling,
                *en_passant,
                Some((*halfmove, *fullmove)),
            ),
            _ => {
                return Err(Error::fen(
                    FenField::FieldCount,
                    format!("expected 4 or 6 fields, got {}", fields.len()),
                ))
            },
        };
        let board = parse_placement(placement)?;
        let side_to_move = Color::try_from(side)?;
        let castling = CastleRights::try_from(castling)?;
        let en_passant_square = match en_passant {
            "-" => None,
            square => Some(Square::try_from(square).map_err(|_| {
                Error::fen(
                    FenField::EnPassant,
                    format!("expected '-' or a square, got {square:?}"),
                )
            })?),
        };
        let (halfmove_clock, fullmove_counter) = match clocks {
            Some((halfmove, fullmove)) => (
                parse_counter(halfmove, FenField::HalfmoveClock)?,
                parse_counter(fullmove, FenField::FullmoveNumber)?,
            ),
            None => (0, NonZeroU16::MIN),
        };
        let position = Self {
            board,
            castling,
            side_to_move,
            halfmove_clock,
            fullmove_counter,
            en_passant_square,
        };
        position.validate()?;
        Ok(position)
    }

    /// Rejects positions that can not occur in a game even though FEN can
    /// express them.
    fn validate(&self) -> Result<()> {
        for color in Color::iter() {
            let kings = self.pieces(color).king.count();
            if kings != 1 {
                return Err(Error::fen(
                    FenField::PiecePlacement,
                    format!("expected 1 {} king, got {kings}", color_name(color)),
                ));
            }
        }
        for color in Color::iter() {
            let pawns = self.pieces(color).pawns.count();
            if pawns > 8 {
                return Err(Error::fen(
                    FenField::PiecePlacement,
                    format!("expected <= 8 {} pawns, got {pawns}", color_name(color)),
                ));
            }
        }
        let pawns = self.pieces(Color::White).pawns | self.pieces(Color::Black).pawns;
        if pawns.intersects(Rank::One.mask() | Rank::Eight.mask()) {
            return Err(Error::fen(
                FenField::PiecePlacement,
                "pawns can not be placed on backranks",
            ));
        }

        let us = self.side_to_move;
        let them = us.opponent();
        let double_push = match self.en_passant_square {
            Some(square) => Some(self.validate_en_passant(square)?),
            None => None,
        };

        for color in Color::iter() {
            for side in [CastlingSide::Short, CastlingSide::Long] {
                let right = side.right(color);
                let pieces = self.pieces(color);
                if self.castling.contains(right)
                    && !(pieces.king.contains(CastlingSide::king_from(color))
                        && pieces.rooks.contains(side.rook_from(color)))
                {
                    return Err(Error::fen(
                        FenField::CastlingRights,
                        format!("{right} castling requires king and rook on original squares"),
                    ));
                }
            }
        }

        if self.is_in_check(them) {
            return Err(Error::fen(
                FenField::SideToMove,
                format!("{} king is in check while {} is to move", color_name(them), color_name(us)),
            ));
        }
        let Some(king) = self.king_square(us) else {
            unreachable!("king count is validated");
        };
        let checkers = self.attackers(king, them);
        if checkers.count() > 2 {
            return Err(Error::fen(
                FenField::PiecePlacement,
                format!("expected <= 2 checks, got {}", checkers.count()),
            ));
        }
        if let Some((pushed, original)) = double_push {
            if checkers.count() > 1 {
                return Err(Error::fen(
                    FenField::EnPassant,
                    "more than 1 check after double pawn push is impossible",
                ));
            }
            if let Some(checker) = checkers.lsb() {
                if checker != pushed && !between(checker, king).contains(original) {
                    return Err(Error::fen(
                        FenField::EnPassant,
                        "the only possible checks after double pawn push are either discovery \
                         targeting the original pawn square or the pushed pawn itself",
                    ));
                }
            }
            let theirs = self.pieces(them);
            let diagonal_sliders =
                (theirs.bishops | theirs.queens) & bishop_attacks(king, Bitboard::empty());
            for slider in diagonal_sliders {
                if between(slider, king) & self.occupied_squares() == Bitboard::from(pushed) {
                    return Err(Error::fen(
                        FenField::EnPassant,
                        "doubly pushed pawn can not be the only blocker on a diagonal",
                    ));
                }
            }
        }
        Ok(())
    }

    /// Returns the squares the pawn was pushed to and from.
    fn validate_en_passant(&self, square: Square) -> Result<(Square, Square)> {
        let us = self.side_to_move;
        let them = us.opponent();
        let expected = Rank::en_passant_target(us);
        if square.rank() != expected {
            return Err(Error::fen(
                FenField::EnPassant,
                format!(
                    "expected en passant square to be on rank {expected}, got {}",
                    square.rank()
                ),
            ));
        }
        let not_beyond_pushed_pawn =
            || Error::fen(FenField::EnPassant, "en passant square is not beyond pushed pawn");
        let (Some(pushed), Some(original)) = (
            square.shift(them.push_direction()),
            square.shift(us.push_direction()),
        ) else {
            return Err(not_beyond_pushed_pawn());
        };
        if !self.pieces(them).pawns.contains(pushed)
            || self
                .occupied_squares()
                .intersects(Bitboard::from(square) | Bitboard::from(original))
        {
            return Err(not_beyond_pushed_pawn());
        }
        Ok((pushed, original))
    }
}

/// Square of the piece removed by a capturing move: the destination, except
/// for en passant where the victim stands next to the capturing pawn.
fn capture_square(m: Move) -> Square {
    if m.flag() == MoveFlag::EnPassant {
        Square::new(m.to().file(), m.from().rank())
    } else {
        m.to()
    }
}

const fn color_name(color: Color) -> &'static str {
    match color {
        Color::White => "white",
        Color::Black => "black",
    }
}

fn parse_placement(placement: &str) -> Result<Board> {
    let malformed = |reason: String| Error::fen(FenField::PiecePlacement, reason);
    let ranks = placement.split('/').collect::<Vec<_>>();
    if ranks.len() != BOARD_WIDTH as usize {
        return Err(malformed(format!(
            "expected {BOARD_WIDTH} ranks, got {placement:?}"
        )));
    }
    let mut board = Board::empty();
    for (rank, rank_fen) in Rank::iter().rev().zip(ranks) {
        let mut file: u8 = 0;
        for symbol in rank_fen.chars() {
            match symbol.to_digit(10) {
                Some(skip @ 1..=8) => file += skip as u8,
                Some(_) => {
                    return Err(malformed(format!(
                        "empty square count must be within 1..=8, got {symbol:?}"
                    )))
                },
                None => {
                    let piece = Piece::try_from(symbol).map_err(|e| malformed(e.to_string()))?;
                    let Some(piece_file) = File::from_index(file as usize) else {
                        return Err(malformed(format!("rank {rank_fen:?} is too long")));
                    };
                    *board
                        .pieces_mut(piece.color())
                        .bitboard_for_mut(piece.kind()) |=
                        Bitboard::from(Square::new(piece_file, rank));
                    file += 1;
                },
            }
            if file > BOARD_WIDTH {
                return Err(malformed(format!("rank {rank_fen:?} is too long")));
            }
        }
        if file != BOARD_WIDTH {
            return Err(malformed(format!(
                "rank size should be exactly {BOARD_WIDTH}, got {rank_fen:?} of length {file}"
            )));
        }
    }
    Ok(board)
}

/// Only plain ASCII digits are accepted: `FromStr` for integers would allow a
/// leading `+`.
fn parse_counter<T: FromStr>(value: &str, field: FenField) -> Result<T> {
    if value.is_empty() || !value.bytes().all(|c| c.is_ascii_digit()) {
        return Err(Error::fen(field, format!("expected a number, got {value:?}")));
    }
    value
        .parse()
        .map_err(|_| Error::fen(field, format!("{value} is out of range")))
}

impl TryFrom<&str> for Position {
    type Error = Error;

    /// Trims the input and strips optional `fen ` or `epd ` prefix before
    /// parsing it with [`Position::from_fen`].
    fn try_from(input: &str) -> Result<Self> {
        let input = input.trim();
        for prefix in ["fen ", "epd "] {
            if let Some(stripped) = input.strip_prefix(prefix) {
                return Self::from_fen(stripped);
            }
        }
        Self::from_fen(input)
    }
}

impl fmt::Display for Position {
    /// Prints board in Forsyth-Edwards Notation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ", &self.board)?;
        write!(f, "{} ", &self.side_to_move)?;
        write!(f, "{} ", &self.castling)?;
        match self.en_passant_square {
            Some(square) => write!(f, "{square} "),
            None => write!(f, "- "),
        }?;
        write!(f, "{} ", &self.halfmove_clock)?;
        write!(f, "{}", &self.fullmove_counter)
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:?}", &self.board)?;
        writeln!(f, "Side to move: {:?}", &self.side_to_move)?;
        writeln!(f, "Fullmove counter: {:?}", &self.fullmove_counter)?;
        writeln!(f, "En Passant: {:?}", &self.en_passant_square)?;
        // bitflags' default fmt::Debug implementation is not very convenient:
        // dump FEN instead.
        writeln!(f, "Castling rights: {}", &self.castling)?;
        writeln!(f, "FEN: {self}")
    }
}

/// State destroyed by a move, packed into 32 bits:
///
/// | Bits  | Field                                                  |
/// | ----- | ------------------------------------------------------ |
/// | 0-3   | castling rights                                        |
/// | 4-7   | en passant target: bit 3 is presence, bits 0-2 file    |
/// | 8-15  | halfmove clock                                         |
/// | 16-19 | captured [`Piece`], `0xF` if nothing was captured       |
/// | 20    | Black moved with the fullmove counter at `u16::MAX`    |
///
/// The rank of the en passant target is implied by the side that moved.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct UndoInfo(u32);

impl UndoInfo {
    const CASTLING_MASK: u32 = 0b1111;
    const EN_PASSANT_SHIFT: u32 = 4;
    const EN_PASSANT_PRESENT: u32 = 0b1000;
    const EN_PASSANT_FILE_MASK: u32 = 0b0111;
    const HALFMOVE_SHIFT: u32 = 8;
    const CAPTURED_SHIFT: u32 = 16;
    const NO_PIECE: u32 = 0xF;
    const FULLMOVE_FROZEN: u32 = 1 << 20;

    fn new(
        castling: CastleRights,
        en_passant: Option<File>,
        halfmove_clock: u8,
        captured: Option<Piece>,
    ) -> Self {
        let en_passant = en_passant.map_or(0, |file| Self::EN_PASSANT_PRESENT | file as u32);
        let captured = captured.map_or(Self::NO_PIECE, |piece| u32::from(piece.raw()));
        Self(
            u32::from(castling.bits())
                | en_passant << Self::EN_PASSANT_SHIFT
                | u32::from(halfmove_clock) << Self::HALFMOVE_SHIFT
                | captured << Self::CAPTURED_SHIFT,
        )
    }

    /// Marks a Black move that could not advance the saturated fullmove
    /// counter, so taking it back must not decrement it either.
    const fn with_fullmove_frozen(self, frozen: bool) -> Self {
        if frozen {
            Self(self.0 | Self::FULLMOVE_FROZEN)
        } else {
            self
        }
    }

    /// Whether the move left the fullmove counter at its maximum instead of
    /// advancing it.
    #[must_use]
    pub const fn fullmove_frozen(self) -> bool {
        self.0 & Self::FULLMOVE_FROZEN != 0
    }

    /// Castling rights before the move.
    #[must_use]
    pub fn castling(self) -> CastleRights {
        CastleRights::from_bits_retain((self.0 & Self::CASTLING_MASK) as u8)
    }

    /// File of the en passant target before the move.
    #[must_use]
    pub fn en_passant_file(self) -> Option<File> {
        let nibble = self.0 >> Self::EN_PASSANT_SHIFT & 0b1111;
        if nibble & Self::EN_PASSANT_PRESENT == 0 {
            return None;
        }
        File::from_index((nibble & Self::EN_PASSANT_FILE_MASK) as usize)
    }

    /// Halfmove clock before the move.
    #[must_use]
    pub const fn halfmove_clock(self) -> u8 {
        (self.0 >> Self::HALFMOVE_SHIFT) as u8
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn captured(self) -> Option<Piece> {
        Piece::try_from_raw((self.0 >> Self::CAPTURED_SHIFT & 0xF) as u8).ok()
    }
}

impl StrongValue for UndoInfo {
    type Raw = u32;

    const BITS: u32 = 21;
    const DOMAIN: &'static str = "undo info";

    fn raw(self) -> u32 {
        self.0
    }

    fn try_from_raw(raw: u32) -> Result<Self> {
        if u64::from(raw) & !Self::mask() != 0 {
            return Err(Self::invalid(raw));
        }
        let en_passant = raw >> Self::EN_PASSANT_SHIFT & 0b1111;
        if en_passant & Self::EN_PASSANT_PRESENT == 0 && en_passant != 0 {
            return Err(Self::invalid(raw));
        }
        let captured = raw >> Self::CAPTURED_SHIFT & 0xF;
        if captured != Self::NO_PIECE && Piece::try_from_raw(captured as u8).is_err() {
            return Err(Self::invalid(raw));
        }
        Ok(Self(raw))
    }
}

impl fmt::Debug for UndoInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UndoInfo")
            .field("castling", &self.castling().to_string())
            .field("en_passant_file", &self.en_passant_file())
            .field("halfmove_clock", &self.halfmove_clock())
            .field("captured", &self.captured())
            .field("fullmove_frozen", &self.fullmove_frozen())
            .finish()
    }
}
