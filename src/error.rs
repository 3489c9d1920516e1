//! Error types shared by the chess core and the protocol layer.
//!
//! Domain code returns [`Error`]; the engine loop and binaries wrap it into
//! [`anyhow::Error`] at the I/O boundary.

use std::fmt;

use thiserror::Error;

use crate::chess::core::Square;

/// Failures surfaced by the chess core.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A primitive was constructed from a raw value (or its text form) that
    /// does not name any member of its domain.
    #[error("invalid {domain}: {value}")]
    InvalidEncoding {
        /// Name of the domain, e.g. "square" or "move flag".
        domain: &'static str,
        /// The rejected input.
        value: String,
    },

    /// Forsyth-Edwards Notation could not be parsed or describes an
    /// impossible position.
    #[error("malformed FEN ({field}): {reason}")]
    MalformedFen {
        /// The part of the FEN string that is wrong.
        field: FenField,
        #[allow(missing_docs)]
        reason: String,
    },

    /// The move can not be played in the current position.
    #[error("illegal move {uci}: {reason}")]
    IllegalMove {
        /// Long algebraic notation of the rejected move.
        uci: String,
        #[allow(missing_docs)]
        reason: String,
    },

    /// A line received by the protocol loop is not a recognized command.
    #[error("unrecognized UCI command: {0:?}")]
    ProtocolSyntax(String),

    /// No collision-free magic multiplier was found within the trial budget.
    #[error("no magic found for {slider} on {square} after {trials} trials")]
    MagicTableGeneration {
        #[allow(missing_docs)]
        slider: &'static str,
        #[allow(missing_docs)]
        square: Square,
        #[allow(missing_docs)]
        trials: u64,
    },
}

impl Error {
    pub(crate) fn encoding(domain: &'static str, value: impl fmt::Display) -> Self {
        Self::InvalidEncoding {
            domain,
            value: value.to_string(),
        }
    }

    pub(crate) fn fen(field: FenField, reason: impl Into<String>) -> Self {
        Self::MalformedFen {
            field,
            reason: reason.into(),
        }
    }

    pub(crate) fn illegal(uci: impl fmt::Display, reason: impl Into<String>) -> Self {
        Self::IllegalMove {
            uci: uci.to_string(),
            reason: reason.into(),
        }
    }
}

/// Fields of a FEN record, in the order they appear.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FenField {
    /// The number of whitespace-separated fields is neither 4 nor 6.
    FieldCount,
    PiecePlacement,
    SideToMove,
    CastlingRights,
    EnPassant,
    HalfmoveClock,
    FullmoveNumber,
}

impl fmt::Display for FenField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::FieldCount => "field count",
            Self::PiecePlacement => "piece placement",
            Self::SideToMove => "side to move",
            Self::CastlingRights => "castling rights",
            Self::EnPassant => "en passant square",
            Self::HalfmoveClock => "halfmove clock",
            Self::FullmoveNumber => "fullmove number",
        })
    }
}

/// Shorthand for results of the chess core.
pub type Result<T> = std::result::Result<T, Error>;
