//! Compact [`Move`] encoding and the fixed-capacity [`MoveList`].

use std::fmt;

use arrayvec::ArrayVec;

use crate::chess::core::{CastlingSide, Promotion, Square};
use crate::chess::domain::{Enumerable, StrongValue};
use crate::error::Result;

/// Kind of the move stored in the 4 high bits of [`Move`]. Bit 3 of the code
/// is set for promotions, bit 2 for captures.
#[allow(missing_docs)]
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveFlag {
    Quiet = 0,
    DoublePawnPush = 1,
    KingsideCastle = 2,
    QueensideCastle = 3,
    Capture = 4,
    EnPassant = 5,
    KnightPromotion = 8,
    BishopPromotion = 9,
    RookPromotion = 10,
    QueenPromotion = 11,
    KnightPromotionCapture = 12,
    BishopPromotionCapture = 13,
    RookPromotionCapture = 14,
    QueenPromotionCapture = 15,
}

impl MoveFlag {
    const CAPTURE_BIT: u8 = 0b0100;
    const PROMOTION_BIT: u8 = 0b1000;

    /// Flag of a promotion to `promotion`, optionally capturing.
    #[must_use]
    pub const fn promotion(promotion: Promotion, capture: bool) -> Self {
        match (promotion, capture) {
            (Promotion::Knight, false) => Self::KnightPromotion,
            (Promotion::Bishop, false) => Self::BishopPromotion,
            (Promotion::Rook, false) => Self::RookPromotion,
            (Promotion::Queen, false) => Self::QueenPromotion,
            (Promotion::Knight, true) => Self::KnightPromotionCapture,
            (Promotion::Bishop, true) => Self::BishopPromotionCapture,
            (Promotion::Rook, true) => Self::RookPromotionCapture,
            (Promotion::Queen, true) => Self::QueenPromotionCapture,
        }
    }

    /// Includes en passant and capturing promotions.
    #[must_use]
    pub const fn is_capture(self) -> bool {
        self as u8 & Self::CAPTURE_BIT != 0
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn is_promotion(self) -> bool {
        self as u8 & Self::PROMOTION_BIT != 0
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn is_castle(self) -> bool {
        matches!(self, Self::KingsideCastle | Self::QueensideCastle)
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn castling_side(self) -> Option<CastlingSide> {
        match self {
            Self::KingsideCastle => Some(CastlingSide::Short),
            Self::QueensideCastle => Some(CastlingSide::Long),
            _ => None,
        }
    }

    /// The piece a pawn turns into, derived from the two low bits.
    #[must_use]
    pub const fn promoted_to(self) -> Option<Promotion> {
        if !self.is_promotion() {
            return None;
        }
        Some(match self as u8 & 0b11 {
            0 => Promotion::Knight,
            1 => Promotion::Bishop,
            2 => Promotion::Rook,
            _ => Promotion::Queen,
        })
    }
}

impl StrongValue for MoveFlag {
    type Raw = u8;

    const BITS: u32 = 4;
    const DOMAIN: &'static str = "move flag";

    fn raw(self) -> u8 {
        self as u8
    }

    fn try_from_raw(raw: u8) -> Result<Self> {
        Ok(match raw {
            0 => Self::Quiet,
            1 => Self::DoublePawnPush,
            2 => Self::KingsideCastle,
            3 => Self::QueensideCastle,
            4 => Self::Capture,
            5 => Self::EnPassant,
            8 => Self::KnightPromotion,
            9 => Self::BishopPromotion,
            10 => Self::RookPromotion,
            11 => Self::QueenPromotion,
            12 => Self::KnightPromotionCapture,
            13 => Self::BishopPromotionCapture,
            14 => Self::RookPromotionCapture,
            15 => Self::QueenPromotionCapture,
            _ => return Err(Self::invalid(raw)),
        })
    }
}

/// A move packed into 16 bits: the source square in bits 0-5, the
/// destination in bits 6-11 and the [`MoveFlag`] in bits 12-15.
///
/// ```
/// use rookery::chess::core::Square;
/// use rookery::chess::domain::StrongValue;
/// use rookery::chess::moves::{Move, MoveFlag};
///
/// let m = Move::new(Square::E2, Square::E4, MoveFlag::DoublePawnPush);
/// assert_eq!(m.raw(), 12 | 28 << 6 | 1 << 12);
/// assert_eq!(m.to_string(), "e2e4");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move(u16);

impl Move {
    const SQUARE_MASK: u16 = 0b11_1111;
    const TO_SHIFT: u16 = 6;
    const FLAG_SHIFT: u16 = 12;

    #[allow(missing_docs)]
    #[must_use]
    pub const fn new(from: Square, to: Square, flag: MoveFlag) -> Self {
        Self(from as u16 | (to as u16) << Self::TO_SHIFT | (flag as u16) << Self::FLAG_SHIFT)
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn from(self) -> Square {
        Self::square(self.0 & Self::SQUARE_MASK)
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn to(self) -> Square {
        Self::square(self.0 >> Self::TO_SHIFT & Self::SQUARE_MASK)
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn flag(self) -> MoveFlag {
        // Move can only be constructed from a valid flag.
        MoveFlag::try_from_raw((self.0 >> Self::FLAG_SHIFT) as u8).unwrap_or(MoveFlag::Quiet)
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn promotion(self) -> Option<Promotion> {
        self.flag().promoted_to()
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn is_capture(self) -> bool {
        self.flag().is_capture()
    }

    fn square(index: u16) -> Square {
        Square::ALL[index as usize]
    }
}

impl StrongValue for Move {
    type Raw = u16;

    const BITS: u32 = 16;
    const DOMAIN: &'static str = "move";

    fn raw(self) -> u16 {
        self.0
    }

    /// Squares always fit into 6 bits, only the flag can be invalid.
    fn try_from_raw(raw: u16) -> Result<Self> {
        MoveFlag::try_from_raw((raw >> Self::FLAG_SHIFT) as u8)
            .map(|_| Self(raw))
            .map_err(|_| Self::invalid(raw))
    }
}

impl fmt::Display for Move {
    /// Long algebraic notation used by UCI: `e2e4`, `e7e8q`. Castling is the
    /// two-square king move (`e1g1`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from(), self.to())?;
        match self.promotion() {
            Some(promotion) => write!(f, "{promotion}"),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({self}, {:?})", self.flag())
    }
}

/// Upper bound for the number of legal moves in any reachable position is 218,
/// the pseudo-legal moves fit as well.
pub const MAX_MOVES: usize = 256;

/// Moves are stored inline, generating them does not allocate.
pub type MoveList = ArrayVec<Move, MAX_MOVES>;
