//! Capabilities shared by the small fixed-width chess primitives.
//!
//! Every primitive in [`crate::chess::core`] (and the packed encodings built on
//! top of them) is its own type: a [`Square`] can not be passed where a
//! [`File`] is expected even though both are bytes. Two orthogonal traits
//! describe what these types have in common:
//!
//! - [`StrongValue`]: the type has a fixed-width raw encoding that can be
//!   produced and validated.
//! - [`Enumerable`]: the type is a bounded domain with a first and a last
//!   value and can be traversed in order.
//!
//! [`Square`]: crate::chess::core::Square
//! [`File`]: crate::chess::core::File

use std::iter::Copied;
use std::slice;

use crate::error::{Error, Result};

/// Scalar with a fixed bit width and a validated conversion from its raw
/// encoding.
///
/// Construction policy: [`StrongValue::try_from_raw`] rejects any raw value
/// that does not name a member of the domain with
/// [`Error::InvalidEncoding`]. This covers values that do not fit into
/// [`StrongValue::BITS`] and unused codes within the width (e.g. piece kind
/// `6`). Raw values are never truncated.
///
/// ```
/// use rookery::chess::core::Square;
/// use rookery::chess::domain::StrongValue;
///
/// assert_eq!(Square::try_from_raw(63), Ok(Square::H8));
/// assert!(Square::try_from_raw(64).is_err());
/// assert_eq!(Square::E4.raw(), 28);
/// ```
pub trait StrongValue: Copy + Sized {
    /// Underlying integer type.
    type Raw: Copy + Into<u64>;

    /// Human-readable name of the domain, used in error messages.
    const DOMAIN: &'static str;

    /// Number of significant bits in the raw encoding.
    const BITS: u32;

    /// Returns the raw encoding.
    #[must_use]
    fn raw(self) -> Self::Raw;

    /// Validates and converts the raw encoding.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEncoding`] if `raw` is not a valid encoding.
    fn try_from_raw(raw: Self::Raw) -> Result<Self>;

    /// Bit mask covering [`StrongValue::BITS`] low bits.
    #[must_use]
    fn mask() -> u64 {
        (1u64 << Self::BITS) - 1
    }

    /// Constructs the error for a rejected raw value.
    #[must_use]
    fn invalid(raw: Self::Raw) -> Error {
        Error::encoding(Self::DOMAIN, raw.into())
    }
}

/// Iterator over (a subrange of) an [`Enumerable`] domain.
pub type Values<T> = Copied<slice::Iter<'static, T>>;

/// Bounded, totally ordered domain.
///
/// ```
/// use rookery::chess::core::{File, Rank};
/// use rookery::chess::domain::Enumerable;
///
/// assert_eq!(File::count(), 8);
/// assert_eq!(Rank::first(), Rank::One);
/// assert_eq!(File::G.next(), Some(File::H));
/// assert_eq!(File::H.next(), None);
/// assert_eq!(File::range(File::C, File::E).collect::<Vec<_>>(), vec![File::C, File::D, File::E]);
/// ```
pub trait Enumerable: Copy + Sized + 'static {
    /// Every member of the domain in ascending order.
    const ALL: &'static [Self];

    /// Position of the value within [`Enumerable::ALL`].
    #[must_use]
    fn index(self) -> usize;

    /// Size of the domain.
    #[must_use]
    fn count() -> usize {
        Self::ALL.len()
    }

    #[allow(missing_docs)]
    #[must_use]
    fn first() -> Self {
        Self::ALL[0]
    }

    #[allow(missing_docs)]
    #[must_use]
    fn last() -> Self {
        Self::ALL[Self::ALL.len() - 1]
    }

    /// Returns the value at `index` or `None` past the end of the domain.
    #[must_use]
    fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Returns the successor, `None` for the last value.
    #[must_use]
    fn next(self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    /// Returns the predecessor, `None` for the first value.
    #[must_use]
    fn previous(self) -> Option<Self> {
        self.index().checked_sub(1).and_then(Self::from_index)
    }

    /// Iterates over the whole domain in ascending order. The iterator is
    /// double-ended and knows its exact length.
    #[must_use]
    fn iter() -> Values<Self> {
        Self::ALL.iter().copied()
    }

    /// Iterates over `from..=to`. Empty when `from` comes after `to`.
    #[must_use]
    fn range(from: Self, to: Self) -> Values<Self> {
        Self::ALL
            .get(from.index()..=to.index())
            .unwrap_or(&[])
            .iter()
            .copied()
    }
}
