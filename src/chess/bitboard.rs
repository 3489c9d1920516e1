//! [Bitboard]-based representation for [`crate::chess::position::Position`].
//! Bitboard utilizes the fact that modern processors operate on 64 bit
//! integers, and the bit operations can be performed simultaneously. This
//! results in very efficient calculation of possible attack vectors and other
//! meaningful features of a position on the board. The disadvantage is
//! complexity that comes with bitboard implementation and inefficiency of some
//! operations like "get piece type on given square" (efficiently handled by
//! Square-centric board implementations).
//!
//! [Bitboard]: https://www.chessprogramming.org/Bitboards

use std::fmt::{self, Write};
use std::mem;
use std::ops::{
    BitAnd,
    BitAndAssign,
    BitOr,
    BitOrAssign,
    BitXor,
    BitXorAssign,
    Not,
    Shl,
    Shr,
    Sub,
    SubAssign,
};

use itertools::Itertools;

use crate::chess::core::{
    Color,
    Direction,
    File,
    Piece,
    PieceKind,
    Rank,
    Square,
    BOARD_WIDTH,
};
use crate::chess::domain::Enumerable;

/// Represents a set of squares and provides common operations (e.g. AND, OR,
/// XOR) over these sets. Each bit corresponds to one of 64 squares of the chess
/// board.
///
/// Mirroring [`Square`] semantics, the least significant
/// bit corresponds to A1, and the most significant bit - to H8.
///
/// Bitboard is a thin wrapper around [u64].
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct Bitboard {
    bits: u64,
}

impl Bitboard {
    /// Constructs Bitboard from pre-calculated bits.
    #[must_use]
    pub const fn from_bits(bits: u64) -> Self {
        Self { bits }
    }

    /// Constructs a bitboard representing empty set of squares.
    #[must_use]
    pub const fn empty() -> Self {
        Self::from_bits(0)
    }

    /// Constructs a bitboard representing the universal set, it contains all
    /// squares by setting all bits to binary one.
    #[must_use]
    pub const fn full() -> Self {
        Self::from_bits(u64::MAX)
    }

    /// Returns raw bits.
    #[must_use]
    pub const fn bits(self) -> u64 {
        self.bits
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn from_squares(squares: &[Square]) -> Self {
        squares
            .iter()
            .fold(Self::empty(), |result, square| result | Self::from(*square))
    }

    /// Returns true if this bitboard contains given square.
    #[must_use]
    pub const fn contains(self, square: Square) -> bool {
        (self.bits & (1u64 << square as u8)) != 0
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.bits == 0
    }

    /// Returns true if the two sets have at least one square in common.
    #[must_use]
    pub const fn intersects(self, other: Self) -> bool {
        self.bits & other.bits != 0
    }

    /// Population count: the number of squares in the set.
    #[must_use]
    pub const fn count(self) -> u32 {
        self.bits.count_ones()
    }

    /// Least significant set bit or `None` for an empty set.
    ///
    /// ```
    /// use rookery::chess::bitboard::Bitboard;
    /// use rookery::chess::core::Square;
    ///
    /// assert_eq!(Bitboard::empty().lsb(), None);
    /// assert_eq!(
    ///     Bitboard::from_squares(&[Square::C3, Square::B7]).lsb(),
    ///     Some(Square::C3)
    /// );
    /// ```
    #[must_use]
    pub const fn lsb(self) -> Option<Square> {
        if self.bits == 0 {
            return None;
        }
        // trailing_zeros() is within 0..64 for a non-empty set.
        Some(unsafe { mem::transmute::<u8, Square>(self.bits.trailing_zeros() as u8) })
    }

    /// An efficient way to iterate over the set squares.
    #[must_use]
    pub const fn iter(self) -> BitboardIterator {
        BitboardIterator { bits: self.bits }
    }

    /// Moves every square of the set one step in given direction. Squares
    /// that would leave the board are dropped (no wrapping between A and H
    /// files).
    #[must_use]
    pub const fn shift(self, direction: Direction) -> Self {
        const NOT_A: u64 = !File::A.mask().bits();
        const NOT_H: u64 = !File::H.mask().bits();
        let bits = self.bits;
        Self::from_bits(match direction {
            Direction::Up => bits << BOARD_WIDTH,
            Direction::Down => bits >> BOARD_WIDTH,
            Direction::Right => (bits & NOT_H) << 1,
            Direction::Left => (bits & NOT_A) >> 1,
            Direction::UpRight => (bits & NOT_H) << (BOARD_WIDTH + 1),
            Direction::UpLeft => (bits & NOT_A) << (BOARD_WIDTH - 1),
            Direction::DownRight => (bits & NOT_H) >> (BOARD_WIDTH - 1),
            Direction::DownLeft => (bits & NOT_A) >> (BOARD_WIDTH + 1),
        })
    }
}

impl fmt::Debug for Bitboard {
    /// Prints the set as an 8x8 grid, rank 8 first.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let grid = Rank::iter()
            .rev()
            .map(|rank| {
                File::iter()
                    .map(|file| {
                        if self.contains(Square::new(file, rank)) {
                            '1'
                        } else {
                            '.'
                        }
                    })
                    .join(SQUARE_SEPARATOR)
            })
            .join(LINE_SEPARATOR);
        f.write_str(&grid)
    }
}

impl BitOr for Bitboard {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self::from_bits(self.bits.bitor(rhs.bits))
    }
}

impl BitOrAssign for Bitboard {
    fn bitor_assign(&mut self, rhs: Self) {
        self.bits.bitor_assign(rhs.bits);
    }
}

impl BitAnd for Bitboard {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Self::from_bits(self.bits.bitand(rhs.bits))
    }
}

impl BitAndAssign for Bitboard {
    fn bitand_assign(&mut self, rhs: Self) {
        self.bits.bitand_assign(rhs.bits);
    }
}

impl BitXor for Bitboard {
    type Output = Self;

    fn bitxor(self, rhs: Self) -> Self::Output {
        Self::from_bits(self.bits.bitxor(rhs.bits))
    }
}

impl BitXorAssign for Bitboard {
    fn bitxor_assign(&mut self, rhs: Self) {
        self.bits.bitxor_assign(rhs.bits);
    }
}

impl Sub for Bitboard {
    type Output = Self;

    /// [Relative component], i.e. Result = LHS \ RHS.
    ///
    /// [Relative component]: https://en.wikipedia.org/wiki/Complement_%28set_theory%29#Relative_complement
    fn sub(self, rhs: Self) -> Self::Output {
        self & !rhs
    }
}

impl SubAssign for Bitboard {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Not for Bitboard {
    type Output = Self;

    /// Returns [complement
    /// set](https://en.wikipedia.org/wiki/Complement_%28set_theory%29) of Self,
    /// i.e. flipping the set squares to unset and vice versa.
    fn not(self) -> Self::Output {
        Self::from_bits(!self.bits)
    }
}

impl Shl<u32> for Bitboard {
    type Output = Self;

    /// Shifts the bits to the left and ignores overflow.
    fn shl(self, rhs: u32) -> Self::Output {
        Self::from_bits(self.bits.checked_shl(rhs).unwrap_or(0))
    }
}

impl Shr<u32> for Bitboard {
    type Output = Self;

    /// Shifts the bits to the right and ignores overflow.
    fn shr(self, rhs: u32) -> Self::Output {
        Self::from_bits(self.bits.checked_shr(rhs).unwrap_or(0))
    }
}

impl From<Square> for Bitboard {
    fn from(square: Square) -> Self {
        Self::from_bits(1u64 << square as u8)
    }
}

impl IntoIterator for Bitboard {
    type IntoIter = BitboardIterator;
    type Item = Square;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<Square> for Bitboard {
    fn from_iter<T: IntoIterator<Item = Square>>(squares: T) -> Self {
        squares
            .into_iter()
            .fold(Self::empty(), |result, square| result | Self::from(square))
    }
}

/// Iterates over set squares in a given [Bitboard] from least significant 1
/// bits (LS1B) to most significant 1 bits (MS1B) through implementing
/// [`BitScan`] forward operation.
///
/// [`BitScan`]: https://www.chessprogramming.org/BitScan
#[derive(Clone, Debug)]
pub struct BitboardIterator {
    bits: u64,
}

impl Iterator for BitboardIterator {
    type Item = Square;

    fn next(&mut self) -> Option<Self::Item> {
        let square = Bitboard::from_bits(self.bits).lsb()?;
        // Consume the LS1B.
        self.bits &= self.bits - 1;
        Some(square)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.bits.count_ones() as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for BitboardIterator {}

/// Piece-centric representation of all material owned by one player. Uses
/// [Bitboard] to store a set of squares occupied by each piece. The main user
/// is [`crate::chess::position::Position`], [Bitboard] is not very useful on
/// its own.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Pieces {
    #[allow(missing_docs)]
    pub king: Bitboard,
    #[allow(missing_docs)]
    pub queens: Bitboard,
    #[allow(missing_docs)]
    pub rooks: Bitboard,
    #[allow(missing_docs)]
    pub bishops: Bitboard,
    #[allow(missing_docs)]
    pub knights: Bitboard,
    #[allow(missing_docs)]
    pub pawns: Bitboard,
}

impl Pieces {
    pub(super) const fn empty() -> Self {
        Self {
            king: Bitboard::empty(),
            queens: Bitboard::empty(),
            rooks: Bitboard::empty(),
            bishops: Bitboard::empty(),
            knights: Bitboard::empty(),
            pawns: Bitboard::empty(),
        }
    }

    /// Material of `color` in the starting position.
    pub(super) fn starting(color: Color) -> Self {
        let backrank = Rank::backrank(color);
        let at = |files: &[File]| -> Bitboard {
            files
                .iter()
                .map(|file| Square::new(*file, backrank))
                .collect()
        };
        Self {
            king: at(&[File::E]),
            queens: at(&[File::D]),
            rooks: at(&[File::A, File::H]),
            bishops: at(&[File::C, File::F]),
            knights: at(&[File::B, File::G]),
            pawns: Rank::pawns_starting(color).mask(),
        }
    }

    /// Every square occupied by this player.
    #[must_use]
    pub fn all(&self) -> Bitboard {
        self.king | self.queens | self.rooks | self.bishops | self.knights | self.pawns
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn bitboard_for(&self, kind: PieceKind) -> Bitboard {
        match kind {
            PieceKind::King => self.king,
            PieceKind::Queen => self.queens,
            PieceKind::Rook => self.rooks,
            PieceKind::Bishop => self.bishops,
            PieceKind::Knight => self.knights,
            PieceKind::Pawn => self.pawns,
        }
    }

    pub(super) fn bitboard_for_mut(&mut self, kind: PieceKind) -> &mut Bitboard {
        match kind {
            PieceKind::King => &mut self.king,
            PieceKind::Queen => &mut self.queens,
            PieceKind::Rook => &mut self.rooks,
            PieceKind::Bishop => &mut self.bishops,
            PieceKind::Knight => &mut self.knights,
            PieceKind::Pawn => &mut self.pawns,
        }
    }

    /// Kind of the piece standing on `square`, if any.
    #[must_use]
    pub fn at(&self, square: Square) -> Option<PieceKind> {
        PieceKind::iter().find(|kind| self.bitboard_for(*kind).contains(square))
    }
}

/// Piece-centric implementation of the chess board. This is the "back-end" of
/// the chess engine, an efficient board representation is crucial for
/// performance.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    pub(super) white_pieces: Pieces,
    pub(super) black_pieces: Pieces,
}

impl Board {
    #[must_use]
    pub(super) fn starting() -> Self {
        Self {
            white_pieces: Pieces::starting(Color::White),
            black_pieces: Pieces::starting(Color::Black),
        }
    }

    // Constructs an empty Board to be filled by the FEN parser.
    #[must_use]
    pub(super) const fn empty() -> Self {
        Self {
            white_pieces: Pieces::empty(),
            black_pieces: Pieces::empty(),
        }
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn pieces(&self, color: Color) -> &Pieces {
        match color {
            Color::White => &self.white_pieces,
            Color::Black => &self.black_pieces,
        }
    }

    pub(super) fn pieces_mut(&mut self, color: Color) -> &mut Pieces {
        match color {
            Color::White => &mut self.white_pieces,
            Color::Black => &mut self.black_pieces,
        }
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn occupied(&self) -> Bitboard {
        self.white_pieces.all() | self.black_pieces.all()
    }

    /// Slow for a piece-centric representation: probes up to 12 bitboards.
    #[must_use]
    pub fn at(&self, square: Square) -> Option<Piece> {
        Color::iter().find_map(|color| {
            self.pieces(color)
                .at(square)
                .map(|kind| Piece::new(color, kind))
        })
    }
}

impl fmt::Display for Board {
    /// Prints board representation in FEN format.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::iter().rev() {
            let mut empty_squares = 0i32;
            for file in File::iter() {
                let square = Square::new(file, rank);
                if let Some(piece) = self.at(square) {
                    if empty_squares != 0 {
                        write!(f, "{empty_squares}")?;
                        empty_squares = 0;
                    }
                    write!(f, "{piece}")?;
                } else {
                    empty_squares += 1;
                }
            }
            if empty_squares != 0 {
                write!(f, "{empty_squares}")?;
            }
            if rank != Rank::One {
                const RANK_SEPARATOR: char = '/';
                f.write_char(RANK_SEPARATOR)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    /// Dumps the board in a simple format ('.' for empty square, FEN algebraic
    /// symbol for piece) a-la Stockfish "debug" command in UCI mode.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::iter().rev() {
            for file in File::iter() {
                match self.at(Square::new(file, rank)) {
                    Some(piece) => write!(f, "{piece}"),
                    None => f.write_char('.'),
                }?;
                if file != File::H {
                    f.write_str(SQUARE_SEPARATOR)?;
                }
            }
            if rank != Rank::One {
                f.write_str(LINE_SEPARATOR)?;
            }
        }
        Ok(())
    }
}

const LINE_SEPARATOR: &str = "\n";
const SQUARE_SEPARATOR: &str = " ";
