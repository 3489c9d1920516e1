//! [Magic bitboards] for the sliding pieces.
//!
//! Attacks of a bishop or a rook only depend on the pieces standing on its
//! rays (the relevant occupancy). Each square gets a multiplier that hashes
//! every subset of the relevant occupancy into a dense index, the attack sets
//! are stored in one flat table. The multipliers are found by seeded random
//! trial the first time the tables are needed.
//!
//! [Magic bitboards]: https://www.chessprogramming.org/Magic_Bitboards

use std::sync::OnceLock;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::chess::bitboard::Bitboard;
use crate::chess::core::{Direction, Square, BOARD_SIZE};
use crate::chess::domain::Enumerable;
use crate::error::{Error, Result};

/// Number of rook attack sets stored in the table: the sum of
/// `2^popcount(relevant_occupancy)` over all squares.
pub const ROOK_TABLE_SIZE: usize = 102_400;
/// Same as [`ROOK_TABLE_SIZE`] for bishops.
pub const BISHOP_TABLE_SIZE: usize = 5_248;

const TRIALS_PER_SQUARE: u64 = 1 << 24;
// The largest relevant occupancy (rook in the corner) has 12 bits.
const MAX_SUBSETS: usize = 1 << 12;
// Per-slider RNG seeds, mixed with the square index.
const SEEDS: [u64; 2] = [0x9E37_79B9_7F4A_7C15, 0xD1B5_4A32_D192_ED03];

/// Pieces moving along rays until the first blocker. The queen is a union of
/// both.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Slider {
    #[allow(missing_docs)]
    Bishop,
    #[allow(missing_docs)]
    Rook,
}

impl Slider {
    #[must_use]
    const fn directions(self) -> [Direction; 4] {
        match self {
            Self::Bishop => Direction::DIAGONAL,
            Self::Rook => Direction::ORTHOGONAL,
        }
    }

    const fn name(self) -> &'static str {
        match self {
            Self::Bishop => "bishop",
            Self::Rook => "rook",
        }
    }
}

/// Traces the rays from `square` until they hit the edge of the board or the
/// first occupied square (which is included into the attacks). This is slow
/// and only used to fill the tables and as a reference in tests.
#[must_use]
pub fn sliding_attacks(slider: Slider, square: Square, occupancy: Bitboard) -> Bitboard {
    let mut attacks = Bitboard::empty();
    for direction in slider.directions() {
        let mut current = square;
        while let Some(next) = current.shift(direction) {
            attacks |= Bitboard::from(next);
            if occupancy.contains(next) {
                break;
            }
            current = next;
        }
    }
    attacks
}

/// Squares on the rays of the slider that can block it. The last square of
/// each ray is excluded: a piece there does not change the attack set.
#[must_use]
pub fn relevant_occupancy(slider: Slider, square: Square) -> Bitboard {
    let mut mask = Bitboard::empty();
    for direction in slider.directions() {
        let mut current = square;
        while let Some(next) = current.shift(direction) {
            if next.shift(direction).is_none() {
                break;
            }
            mask |= Bitboard::from(next);
            current = next;
        }
    }
    mask
}

/// Enumerates all subsets of `mask` via the Carry-Rippler trick, starting
/// with the empty set.
fn subsets(mask: Bitboard) -> impl Iterator<Item = Bitboard> {
    let mask = mask.bits();
    let mut subset = Some(0u64);
    std::iter::from_fn(move || {
        let current = subset?;
        let next = current.wrapping_sub(mask) & mask;
        subset = (next != 0).then_some(next);
        Some(Bitboard::from_bits(current))
    })
}

/// Perfect hash parameters for one square.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Magic {
    /// The magic number.
    pub multiplier: u64,
    /// Relevant occupancy of the square.
    pub mask: Bitboard,
    /// `64 - popcount(mask)`.
    pub shift: u32,
    /// Where the attack sets of this square start in the shared table.
    pub offset: usize,
}

impl Magic {
    const EMPTY: Self = Self {
        multiplier: 0,
        mask: Bitboard::empty(),
        shift: 0,
        offset: 0,
    };

    const fn local_index(multiplier: u64, occupancy: Bitboard, shift: u32) -> usize {
        (occupancy.bits().wrapping_mul(multiplier) >> shift) as usize
    }

    /// Position of the attack set for given occupancy in the shared table.
    #[must_use]
    pub const fn index(&self, occupancy: Bitboard) -> usize {
        let relevant = Bitboard::from_bits(occupancy.bits() & self.mask.bits());
        self.offset + Self::local_index(self.multiplier, relevant, self.shift)
    }
}

/// Occupancy subsets of a single square with their attack sets, and a table
/// reused across trials. A slot is considered empty unless it was written in
/// the current epoch, so the table never has to be cleared between
/// candidates.
struct Scratch {
    occupancies: Vec<Bitboard>,
    attacks: Vec<Bitboard>,
    epochs: Vec<u32>,
    slots: Vec<Bitboard>,
    epoch: u32,
}

impl Scratch {
    fn new() -> Self {
        Self {
            occupancies: Vec::with_capacity(MAX_SUBSETS),
            attacks: Vec::with_capacity(MAX_SUBSETS),
            epochs: vec![0; MAX_SUBSETS],
            slots: vec![Bitboard::empty(); MAX_SUBSETS],
            epoch: 0,
        }
    }

    fn load(&mut self, slider: Slider, square: Square, mask: Bitboard) {
        self.occupancies.clear();
        self.attacks.clear();
        for occupancy in subsets(mask) {
            self.occupancies.push(occupancy);
            self.attacks.push(sliding_attacks(slider, square, occupancy));
        }
    }

    /// Checks that `multiplier` never maps two occupancies with different
    /// attack sets to the same slot. Constructive collisions (same attacks)
    /// are fine.
    fn fits(&mut self, multiplier: u64, shift: u32) -> bool {
        self.epoch = self.epoch.wrapping_add(1);
        if self.epoch == 0 {
            self.epochs.fill(0);
            self.epoch = 1;
        }
        for (occupancy, attacks) in self.occupancies.iter().zip(&self.attacks) {
            let slot = Magic::local_index(multiplier, *occupancy, shift);
            if self.epochs[slot] != self.epoch {
                self.epochs[slot] = self.epoch;
                self.slots[slot] = *attacks;
            } else if self.slots[slot] != *attacks {
                return false;
            }
        }
        true
    }
}

fn find_magic(
    slider: Slider,
    square: Square,
    offset: usize,
    scratch: &mut Scratch,
) -> Result<Magic> {
    let mask = relevant_occupancy(slider, square);
    let shift = u64::BITS - mask.count();
    scratch.load(slider, square, mask);
    let mut rng = StdRng::seed_from_u64(SEEDS[slider as usize] ^ square as u64);
    for _ in 0..TRIALS_PER_SQUARE {
        // Sparse candidates are far more likely to work.
        let multiplier = rng.r#gen::<u64>() & rng.r#gen::<u64>() & rng.r#gen::<u64>();
        if (mask.bits().wrapping_mul(multiplier) >> 56).count_ones() < 6 {
            continue;
        }
        if scratch.fits(multiplier, shift) {
            return Ok(Magic {
                multiplier,
                mask,
                shift,
                offset,
            });
        }
    }
    Err(Error::MagicTableGeneration {
        slider: slider.name(),
        square,
        trials: TRIALS_PER_SQUARE,
    })
}

/// Magic entries for both sliders and the flat attack table: rook attack sets
/// come first, bishop attack sets follow them.
pub struct Magics {
    rooks: [Magic; BOARD_SIZE as usize],
    bishops: [Magic; BOARD_SIZE as usize],
    attacks: Vec<Bitboard>,
}

impl Magics {
    /// Searches for the multipliers and fills the attack table.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MagicTableGeneration`] if a square exhausts its trial
    /// budget.
    pub fn generate() -> Result<Self> {
        let start = Instant::now();
        let mut magics = Self {
            rooks: [Magic::EMPTY; BOARD_SIZE as usize],
            bishops: [Magic::EMPTY; BOARD_SIZE as usize],
            attacks: vec![Bitboard::empty(); ROOK_TABLE_SIZE + BISHOP_TABLE_SIZE],
        };
        let mut scratch = Scratch::new();
        let mut offset = 0;
        for slider in [Slider::Rook, Slider::Bishop] {
            for square in Square::iter() {
                let magic = find_magic(slider, square, offset, &mut scratch)?;
                for (occupancy, attacks) in scratch.occupancies.iter().zip(&scratch.attacks) {
                    magics.attacks[magic.index(*occupancy)] = *attacks;
                }
                offset += 1 << (u64::BITS - magic.shift);
                match slider {
                    Slider::Rook => magics.rooks[square as usize] = magic,
                    Slider::Bishop => magics.bishops[square as usize] = magic,
                }
            }
        }
        debug_assert_eq!(offset, ROOK_TABLE_SIZE + BISHOP_TABLE_SIZE);
        tracing::debug!(
            entries = offset,
            elapsed = ?start.elapsed(),
            "generated magic tables"
        );
        Ok(magics)
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn magic(&self, slider: Slider, square: Square) -> &Magic {
        match slider {
            Slider::Bishop => &self.bishops[square as usize],
            Slider::Rook => &self.rooks[square as usize],
        }
    }

    /// Table lookup equivalent to [`sliding_attacks`].
    #[must_use]
    pub fn attacks(&self, slider: Slider, square: Square, occupancy: Bitboard) -> Bitboard {
        self.attacks[self.magic(slider, square).index(occupancy)]
    }
}

static MAGICS: OnceLock<Magics> = OnceLock::new();

/// Process-wide tables, generated on first access.
///
/// # Panics
///
/// If the generation fails: the trial budget is large enough for any correct
/// mask and shift.
pub fn magics() -> &'static Magics {
    MAGICS.get_or_init(|| {
        Magics::generate().unwrap_or_else(|e| panic!("magic table generation failed: {e}"))
    })
}
