//! Chess primitives commonly used within [`crate::chess`].

use std::fmt::{self, Write};
use std::mem;

use itertools::Itertools;

use crate::chess::bitboard::Bitboard;
use crate::chess::domain::{Enumerable, StrongValue};
use crate::error::{Error, FenField, Result};

#[allow(missing_docs)]
pub const BOARD_WIDTH: u8 = 8;
#[allow(missing_docs)]
pub const BOARD_SIZE: u8 = BOARD_WIDTH * BOARD_WIDTH;

/// Board squares: from left to right, from bottom to the top:
///
/// ```
/// use rookery::chess::core::Square;
///
/// assert_eq!(Square::A1 as u8, 0);
/// assert_eq!(Square::E1 as u8, 4);
/// assert_eq!(Square::H1 as u8, 7);
/// assert_eq!(Square::A4 as u8, 8 * 3);
/// assert_eq!(Square::H8 as u8, 63);
/// ```
///
/// Square is a compact representation using only one byte.
///
/// ```
/// use rookery::chess::core::Square;
/// use std::mem;
///
/// assert_eq!(std::mem::size_of::<Square>(), 1);
/// ```
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[rustfmt::skip]
#[allow(missing_docs)]
pub enum Square {
    A1, B1, C1, D1, E1, F1, G1, H1,
    A2, B2, C2, D2, E2, F2, G2, H2,
    A3, B3, C3, D3, E3, F3, G3, H3,
    A4, B4, C4, D4, E4, F4, G4, H4,
    A5, B5, C5, D5, E5, F5, G5, H5,
    A6, B6, C6, D6, E6, F6, G6, H6,
    A7, B7, C7, D7, E7, F7, G7, H7,
    A8, B8, C8, D8, E8, F8, G8, H8,
}

const SQUARES: [Square; BOARD_SIZE as usize] = {
    let mut squares = [Square::A1; BOARD_SIZE as usize];
    let mut index = 0;
    while index < BOARD_SIZE {
        squares[index as usize] = Square::from_index_unchecked(index);
        index += 1;
    }
    squares
};

impl Square {
    /// Connects file (column) and rank (row) to form a full square.
    #[must_use]
    pub const fn new(file: File, rank: Rank) -> Self {
        Self::from_index_unchecked(file as u8 + (rank as u8) * BOARD_WIDTH)
    }

    /// Returns file (column) on which the square is located.
    #[must_use]
    pub const fn file(self) -> File {
        unsafe { mem::transmute(self as u8 % BOARD_WIDTH) }
    }

    /// Returns rank (row) on which the square is located.
    #[must_use]
    pub const fn rank(self) -> Rank {
        unsafe { mem::transmute(self as u8 / BOARD_WIDTH) }
    }

    /// Returns the neighbouring square in given direction or `None` if it
    /// would leave the board.
    #[must_use]
    pub const fn shift(self, direction: Direction) -> Option<Self> {
        let (file_delta, rank_delta) = direction.deltas();
        let file = self.file() as i8 + file_delta;
        let rank = self.rank() as i8 + rank_delta;
        if file < 0 || file >= BOARD_WIDTH as i8 || rank < 0 || rank >= BOARD_WIDTH as i8 {
            return None;
        }
        Some(Self::from_index_unchecked(
            rank as u8 * BOARD_WIDTH + file as u8,
        ))
    }

    /// The square with the same file on the other side of the board (A1 <->
    /// A8).
    #[must_use]
    pub const fn flip(self) -> Self {
        Self::from_index_unchecked(self as u8 ^ 0b11_1000)
    }

    // Callers guarantee index < BOARD_SIZE.
    const fn from_index_unchecked(index: u8) -> Self {
        debug_assert!(index < BOARD_SIZE);
        unsafe { mem::transmute(index) }
    }
}

impl StrongValue for Square {
    type Raw = u8;

    const BITS: u32 = 6;
    const DOMAIN: &'static str = "square";

    fn raw(self) -> u8 {
        self as u8
    }

    fn try_from_raw(raw: u8) -> Result<Self> {
        SQUARES.get(raw as usize).copied().ok_or_else(|| Self::invalid(raw))
    }
}

impl Enumerable for Square {
    const ALL: &'static [Self] = &SQUARES;

    fn index(self) -> usize {
        self as usize
    }
}

impl TryFrom<u8> for Square {
    type Error = Error;

    /// Creates a square given its position on the board.
    ///
    /// # Errors
    ///
    /// If given square index is outside 0..[`BOARD_SIZE`] range.
    fn try_from(square_index: u8) -> Result<Self> {
        Self::try_from_raw(square_index)
    }
}

impl TryFrom<&str> for Square {
    type Error = Error;

    fn try_from(square: &str) -> Result<Self> {
        match square.chars().collect_tuple() {
            Some((file, rank)) => Ok(Self::new(file.try_into()?, rank.try_into()?)),
            None => Err(Error::encoding("square", format!("{square:?}"))),
        }
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

/// Represents a column (vertical row) of the chessboard. In chess notation, it
/// is normally represented with a lowercase letter.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum File {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
    F = 5,
    G = 6,
    H = 7,
}

impl File {
    /// Returns a pre-calculated bitboard mask with 1s set for squares of the
    /// given file.
    #[must_use]
    pub const fn mask(self) -> Bitboard {
        Bitboard::from_bits(0x0101_0101_0101_0101 << self as u8)
    }
}

impl StrongValue for File {
    type Raw = u8;

    const BITS: u32 = 3;
    const DOMAIN: &'static str = "file";

    fn raw(self) -> u8 {
        self as u8
    }

    fn try_from_raw(raw: u8) -> Result<Self> {
        Self::from_index(raw as usize).ok_or_else(|| Self::invalid(raw))
    }
}

impl Enumerable for File {
    const ALL: &'static [Self] = &[
        Self::A,
        Self::B,
        Self::C,
        Self::D,
        Self::E,
        Self::F,
        Self::G,
        Self::H,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char((b'a' + *self as u8) as char)
    }
}

impl TryFrom<char> for File {
    type Error = Error;

    fn try_from(file: char) -> Result<Self> {
        match file {
            'a'..='h' => Ok(Self::ALL[file as usize - 'a' as usize]),
            _ => Err(Error::encoding("file", format!("{file:?}"))),
        }
    }
}

/// Represents a horizontal row of the chessboard. In chess notation, it is
/// represented with a number. The implementation assumes zero-based values
/// (i.e. rank 1 would be 0).
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum Rank {
    One = 0,
    Two = 1,
    Three = 2,
    Four = 3,
    Five = 4,
    Six = 5,
    Seven = 6,
    Eight = 7,
}

impl Rank {
    /// Returns a pre-calculated bitboard mask with 1s set for squares of the
    /// given rank.
    #[must_use]
    pub const fn mask(self) -> Bitboard {
        Bitboard::from_bits(0xFF << (self as u8 * BOARD_WIDTH))
    }

    /// The rank where pieces of given color start.
    #[must_use]
    pub const fn backrank(color: Color) -> Self {
        match color {
            Color::White => Self::One,
            Color::Black => Self::Eight,
        }
    }

    #[must_use]
    pub(crate) const fn pawns_starting(color: Color) -> Self {
        match color {
            Color::White => Self::Two,
            Color::Black => Self::Seven,
        }
    }

    /// Rank of the en passant target square when `color` is to move.
    #[must_use]
    pub(crate) const fn en_passant_target(color: Color) -> Self {
        match color {
            Color::White => Self::Six,
            Color::Black => Self::Three,
        }
    }
}

impl StrongValue for Rank {
    type Raw = u8;

    const BITS: u32 = 3;
    const DOMAIN: &'static str = "rank";

    fn raw(self) -> u8 {
        self as u8
    }

    fn try_from_raw(raw: u8) -> Result<Self> {
        Self::from_index(raw as usize).ok_or_else(|| Self::invalid(raw))
    }
}

impl Enumerable for Rank {
    const ALL: &'static [Self] = &[
        Self::One,
        Self::Two,
        Self::Three,
        Self::Four,
        Self::Five,
        Self::Six,
        Self::Seven,
        Self::Eight,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

impl TryFrom<char> for Rank {
    type Error = Error;

    fn try_from(rank: char) -> Result<Self> {
        match rank {
            '1'..='8' => Ok(Self::ALL[rank as usize - '1' as usize]),
            _ => Err(Error::encoding("rank", format!("{rank:?}"))),
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", *self as u8 + 1)
    }
}

/// A standard game of chess is played between two players: White (having the
/// advantage of the first turn) and Black.
#[allow(missing_docs)]
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    /// "Flips" the color.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    /// Direction in which the pawns of this color advance.
    #[must_use]
    pub const fn push_direction(self) -> Direction {
        match self {
            Self::White => Direction::Up,
            Self::Black => Direction::Down,
        }
    }
}

impl StrongValue for Color {
    type Raw = u8;

    const BITS: u32 = 1;
    const DOMAIN: &'static str = "color";

    fn raw(self) -> u8 {
        self as u8
    }

    fn try_from_raw(raw: u8) -> Result<Self> {
        Self::from_index(raw as usize).ok_or_else(|| Self::invalid(raw))
    }
}

impl Enumerable for Color {
    const ALL: &'static [Self] = &[Self::White, Self::Black];

    fn index(self) -> usize {
        self as usize
    }
}

impl TryFrom<&str> for Color {
    type Error = Error;

    fn try_from(color: &str) -> Result<Self> {
        match color {
            "w" => Ok(Self::White),
            "b" => Ok(Self::Black),
            _ => Err(Error::fen(
                FenField::SideToMove,
                format!("expected 'w' or 'b', got {color:?}"),
            )),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(match &self {
            Self::White => 'w',
            Self::Black => 'b',
        })
    }
}

/// Standard [chess pieces].
///
/// [chess pieces]: https://en.wikipedia.org/wiki/Chess_piece
#[allow(missing_docs)]
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PieceKind {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

impl StrongValue for PieceKind {
    type Raw = u8;

    const BITS: u32 = 3;
    const DOMAIN: &'static str = "piece kind";

    fn raw(self) -> u8 {
        self as u8
    }

    fn try_from_raw(raw: u8) -> Result<Self> {
        Self::from_index(raw as usize).ok_or_else(|| Self::invalid(raw))
    }
}

impl Enumerable for PieceKind {
    const ALL: &'static [Self] = &[
        Self::Pawn,
        Self::Knight,
        Self::Bishop,
        Self::Rook,
        Self::Queen,
        Self::King,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

impl From<Promotion> for PieceKind {
    fn from(promotion: Promotion) -> Self {
        match promotion {
            Promotion::Queen => Self::Queen,
            Promotion::Rook => Self::Rook,
            Promotion::Bishop => Self::Bishop,
            Promotion::Knight => Self::Knight,
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(match &self {
            Self::King => 'k',
            Self::Queen => 'q',
            Self::Rook => 'r',
            Self::Bishop => 'b',
            Self::Knight => 'n',
            Self::Pawn => 'p',
        })
    }
}

/// A specific piece owned by a player, packed into 4 bits as
/// `color << 3 | kind`:
///
/// ```
/// use rookery::chess::core::{Color, Piece, PieceKind};
/// use rookery::chess::domain::StrongValue;
///
/// assert_eq!(Piece::new(Color::White, PieceKind::Pawn).raw(), 0);
/// assert_eq!(Piece::new(Color::Black, PieceKind::King).raw(), 0b1101);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece(u8);

impl Piece {
    const COLOR_SHIFT: u8 = 3;
    const KIND_MASK: u8 = 0b111;

    #[allow(missing_docs)]
    #[must_use]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self((color as u8) << Self::COLOR_SHIFT | kind as u8)
    }

    /// The owner of the piece.
    #[must_use]
    pub const fn color(self) -> Color {
        match self.0 >> Self::COLOR_SHIFT {
            0 => Color::White,
            _ => Color::Black,
        }
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn kind(self) -> PieceKind {
        PieceKind::ALL[(self.0 & Self::KIND_MASK) as usize]
    }
}

impl StrongValue for Piece {
    type Raw = u8;

    const BITS: u32 = 4;
    const DOMAIN: &'static str = "piece";

    fn raw(self) -> u8 {
        self.0
    }

    fn try_from_raw(raw: u8) -> Result<Self> {
        let color = Color::try_from_raw(raw >> Self::COLOR_SHIFT).map_err(|_| Self::invalid(raw))?;
        let kind = PieceKind::try_from_raw(raw & Self::KIND_MASK).map_err(|_| Self::invalid(raw))?;
        Ok(Self::new(color, kind))
    }
}

impl TryFrom<char> for Piece {
    type Error = Error;

    fn try_from(symbol: char) -> Result<Self> {
        let kind = match symbol.to_ascii_lowercase() {
            'k' => PieceKind::King,
            'q' => PieceKind::Queen,
            'r' => PieceKind::Rook,
            'b' => PieceKind::Bishop,
            'n' => PieceKind::Knight,
            'p' => PieceKind::Pawn,
            _ => return Err(Error::encoding("piece", format!("{symbol:?}"))),
        };
        let color = if symbol.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Ok(Self::new(color, kind))
    }
}

impl fmt::Display for Piece {
    /// White pieces are uppercase, black pieces are lowercase.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = self.kind().to_string();
        match self.color() {
            Color::White => f.write_str(&symbol.to_ascii_uppercase()),
            Color::Black => f.write_str(&symbol),
        }
    }
}

impl fmt::Debug for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Piece({self})")
    }
}

bitflags::bitflags! {
    /// Track the ability to [castle] each side (kingside is often referred to
    /// as O-O or h-side castle, queenside -- O-O-O or a-side castle). When the
    /// king moves, player loses ability to castle both sides. When the rook
    /// moves or is captured, player loses ability to castle its corresponding
    /// side. Once lost, a right never comes back.
    ///
    /// The rules are:
    ///
    /// - The king and the castling rook must not have previously moved.
    /// - The king can not be in check, pass through or land on an attacked
    ///   square.
    /// - All squares between the king and the castling rook must be vacant.
    ///
    /// [castle]: https://www.chessprogramming.org/Castling
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct CastleRights : u8 {
        #[allow(missing_docs)]
        const WHITE_SHORT = 0b0001;
        #[allow(missing_docs)]
        const WHITE_LONG = 0b0010;
        #[allow(missing_docs)]
        const WHITE_BOTH = Self::WHITE_SHORT.bits() | Self::WHITE_LONG.bits();
        #[allow(missing_docs)]
        const BLACK_SHORT = 0b0100;
        #[allow(missing_docs)]
        const BLACK_LONG = 0b1000;
        #[allow(missing_docs)]
        const BLACK_BOTH = Self::BLACK_SHORT.bits() | Self::BLACK_LONG.bits();
        #[allow(missing_docs)]
        const ALL = Self::WHITE_BOTH.bits() | Self::BLACK_BOTH.bits();
    }
}

impl CastleRights {
    /// Rights that are lost once a move starts or ends on `square`: moving
    /// the king, moving a rook or capturing it on its original square.
    #[must_use]
    pub const fn lost_by(square: Square) -> Self {
        match square {
            Square::E1 => Self::WHITE_BOTH,
            Square::A1 => Self::WHITE_LONG,
            Square::H1 => Self::WHITE_SHORT,
            Square::E8 => Self::BLACK_BOTH,
            Square::A8 => Self::BLACK_LONG,
            Square::H8 => Self::BLACK_SHORT,
            _ => Self::empty(),
        }
    }
}

impl StrongValue for CastleRights {
    type Raw = u8;

    const BITS: u32 = 4;
    const DOMAIN: &'static str = "castling rights";

    fn raw(self) -> u8 {
        self.bits()
    }

    fn try_from_raw(raw: u8) -> Result<Self> {
        Self::from_bits(raw).ok_or_else(|| Self::invalid(raw))
    }
}

impl TryFrom<&str> for CastleRights {
    type Error = Error;

    /// Parses [`CastleRights`] for both players from the FEN format. The
    /// accepted pattern is `-` or a non-empty subsequence of `KQkq` (the
    /// order is fixed).
    fn try_from(input: &str) -> Result<Self> {
        if input == "-" {
            return Ok(Self::empty());
        }
        let mut rights = Self::empty();
        let mut symbols = "KQkq".chars().zip([
            Self::WHITE_SHORT,
            Self::WHITE_LONG,
            Self::BLACK_SHORT,
            Self::BLACK_LONG,
        ]);
        for symbol in input.chars() {
            match symbols.find(|(expected, _)| *expected == symbol) {
                Some((_, right)) => rights |= right,
                None => {
                    return Err(Error::fen(
                        FenField::CastlingRights,
                        format!("expected '-' or a subsequence of \"KQkq\", got {input:?}"),
                    ))
                },
            }
        }
        if rights.is_empty() {
            return Err(Error::fen(FenField::CastlingRights, "empty castling rights"));
        }
        Ok(rights)
    }
}

impl fmt::Display for CastleRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_char('-');
        }
        for (right, symbol) in [
            (Self::WHITE_SHORT, 'K'),
            (Self::WHITE_LONG, 'Q'),
            (Self::BLACK_SHORT, 'k'),
            (Self::BLACK_LONG, 'q'),
        ] {
            if self.contains(right) {
                f.write_char(symbol)?;
            }
        }
        Ok(())
    }
}

/// The side of the board the king castles towards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CastlingSide {
    /// Kingside, towards the H file (O-O).
    Short,
    /// Queenside, towards the A file (O-O-O).
    Long,
}

impl CastlingSide {
    #[allow(missing_docs)]
    #[must_use]
    pub const fn right(self, color: Color) -> CastleRights {
        match (color, self) {
            (Color::White, Self::Short) => CastleRights::WHITE_SHORT,
            (Color::White, Self::Long) => CastleRights::WHITE_LONG,
            (Color::Black, Self::Short) => CastleRights::BLACK_SHORT,
            (Color::Black, Self::Long) => CastleRights::BLACK_LONG,
        }
    }

    /// Original king square.
    #[must_use]
    pub const fn king_from(color: Color) -> Square {
        Square::new(File::E, Rank::backrank(color))
    }

    /// Square the king lands on.
    #[must_use]
    pub const fn king_to(self, color: Color) -> Square {
        Square::new(
            match self {
                Self::Short => File::G,
                Self::Long => File::C,
            },
            Rank::backrank(color),
        )
    }

    /// Original square of the castling rook.
    #[must_use]
    pub const fn rook_from(self, color: Color) -> Square {
        Square::new(
            match self {
                Self::Short => File::H,
                Self::Long => File::A,
            },
            Rank::backrank(color),
        )
    }

    /// Square the castling rook lands on.
    #[must_use]
    pub const fn rook_to(self, color: Color) -> Square {
        Square::new(
            match self {
                Self::Short => File::F,
                Self::Long => File::D,
            },
            Rank::backrank(color),
        )
    }

    /// Squares between the king and the rook: all of them must be empty.
    #[must_use]
    pub const fn gap(self, color: Color) -> Bitboard {
        let backrank = Rank::backrank(color).mask();
        let files = match self {
            Self::Short => File::F.mask().bits() | File::G.mask().bits(),
            Self::Long => File::B.mask().bits() | File::C.mask().bits() | File::D.mask().bits(),
        };
        Bitboard::from_bits(backrank.bits() & files)
    }

    /// Squares the king passes over or lands on: none can be attacked.
    #[must_use]
    pub const fn king_walk(self, color: Color) -> Bitboard {
        let backrank = Rank::backrank(color).mask();
        let files = match self {
            Self::Short => File::F.mask().bits() | File::G.mask().bits(),
            Self::Long => File::C.mask().bits() | File::D.mask().bits(),
        };
        Bitboard::from_bits(backrank.bits() & files)
    }
}

/// A pawn can be promoted to a queen, rook, bishop or a knight. The
/// discriminants match the two low bits of promotion move flags.
#[allow(missing_docs)]
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Promotion {
    Knight = 0,
    Bishop = 1,
    Rook = 2,
    Queen = 3,
}

impl Enumerable for Promotion {
    const ALL: &'static [Self] = &[Self::Knight, Self::Bishop, Self::Rook, Self::Queen];

    fn index(self) -> usize {
        self as usize
    }
}

impl TryFrom<char> for Promotion {
    type Error = Error;

    fn try_from(symbol: char) -> Result<Self> {
        match symbol {
            'q' => Ok(Self::Queen),
            'r' => Ok(Self::Rook),
            'b' => Ok(Self::Bishop),
            'n' => Ok(Self::Knight),
            _ => Err(Error::encoding("promotion", format!("{symbol:?}"))),
        }
    }
}

impl fmt::Display for Promotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", PieceKind::from(*self))
    }
}

/// Directions on the board from a perspective of White player.
///
/// Traditionally those are North (Up), West (Left), East (Right), South (Down)
/// and their combinations. However, using cardinal directions is confusing,
/// hence they are replaced by relative directions.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Also known as NorthWest.
    UpLeft,
    /// Also known as North.
    Up,
    /// Also known as NorthEast.
    UpRight,
    /// Also known as East.
    Right,
    /// Also known as West.
    Left,
    /// Also known as SouthWest.
    DownLeft,
    /// Also known as South.
    Down,
    /// Also known as SouthEast.
    DownRight,
}

impl Direction {
    /// Orthogonal directions: the rook moves along them.
    pub const ORTHOGONAL: [Self; 4] = [Self::Up, Self::Right, Self::Down, Self::Left];
    /// Diagonal directions: the bishop moves along them.
    pub const DIAGONAL: [Self; 4] = [Self::UpLeft, Self::UpRight, Self::DownLeft, Self::DownRight];

    /// (file, rank) increments of a single step.
    #[must_use]
    pub const fn deltas(self) -> (i8, i8) {
        match self {
            Self::UpLeft => (-1, 1),
            Self::Up => (0, 1),
            Self::UpRight => (1, 1),
            Self::Right => (1, 0),
            Self::Left => (-1, 0),
            Self::DownLeft => (-1, -1),
            Self::Down => (0, -1),
            Self::DownRight => (1, -1),
        }
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::UpLeft => Self::DownRight,
            Self::Up => Self::Down,
            Self::UpRight => Self::DownLeft,
            Self::Right => Self::Left,
            Self::Left => Self::Right,
            Self::DownLeft => Self::UpRight,
            Self::Down => Self::Up,
            Self::DownRight => Self::UpLeft,
        }
    }
}
