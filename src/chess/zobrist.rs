//! [Zobrist hashing] of positions and the repetition history built on top of
//! it.
//!
//! The keys are generated at compile time by a xorshift generator with a fixed
//! seed, so the hashes are stable across builds and platforms.
//!
//! [Zobrist hashing]: https://www.chessprogramming.org/Zobrist_Hashing

use std::collections::HashMap;

use crate::chess::attacks::pawn_attacks;
use crate::chess::core::{Color, PieceKind, BOARD_SIZE};
use crate::chess::domain::Enumerable;
use crate::chess::position::Position;

/// Zobrist keys are 64-bit unsigned integers computed from scratch for a
/// given position.
pub type Key = u64;

const SEED: u64 = 0x9E37_79B9_7F4A_7C15;

struct Keys {
    pieces: [[[Key; BOARD_SIZE as usize]; 6]; 2],
    black_to_move: Key,
    /// Indexed by the raw castling rights.
    castling: [Key; 16],
    en_passant_files: [Key; 8],
}

/// Marsaglia's xorshift64.
const fn xorshift(mut state: u64) -> u64 {
    state ^= state << 13;
    state ^= state >> 7;
    state ^= state << 17;
    state
}

const fn generate_keys() -> Keys {
    let mut keys = Keys {
        pieces: [[[0; BOARD_SIZE as usize]; 6]; 2],
        black_to_move: 0,
        castling: [0; 16],
        en_passant_files: [0; 8],
    };
    let mut state = SEED;
    let mut color = 0;
    while color < 2 {
        let mut kind = 0;
        while kind < 6 {
            let mut square = 0;
            while square < BOARD_SIZE as usize {
                state = xorshift(state);
                keys.pieces[color][kind][square] = state;
                square += 1;
            }
            kind += 1;
        }
        color += 1;
    }
    state = xorshift(state);
    keys.black_to_move = state;
    // Empty castling rights do not change the hash.
    let mut rights = 1;
    while rights < 16 {
        state = xorshift(state);
        keys.castling[rights] = state;
        rights += 1;
    }
    let mut file = 0;
    while file < 8 {
        state = xorshift(state);
        keys.en_passant_files[file] = state;
        file += 1;
    }
    keys
}

const KEYS: Keys = generate_keys();

impl Position {
    /// Computes the Zobrist hash of the position from scratch. Positions that
    /// only differ in the move counters have the same hash. The en passant
    /// target only counts when a pawn of the side to move can capture on it.
    #[must_use]
    pub fn hash(&self) -> Key {
        let mut key = 0;
        for color in Color::iter() {
            for kind in PieceKind::iter() {
                for square in self.pieces(color).bitboard_for(kind) {
                    key ^= KEYS.pieces[color as usize][kind as usize][square as usize];
                }
            }
        }
        if self.side_to_move() == Color::Black {
            key ^= KEYS.black_to_move;
        }
        key ^= KEYS.castling[self.castling().bits() as usize];
        if let Some(square) = self.en_passant_square() {
            let us = self.side_to_move();
            if !(pawn_attacks(us.opponent(), square) & self.pieces(us).pawns).is_empty() {
                key ^= KEYS.en_passant_files[square.file() as usize];
            }
        }
        key
    }
}

/// Counts the occurrences of positions in a game.
#[derive(Clone, Debug, Default)]
pub struct RepetitionTable {
    table: HashMap<Key, u8>,
}

impl RepetitionTable {
    /// Creates an empty repetition table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an occurrence of the position.
    pub fn record(&mut self, key: Key) {
        let count = self.table.entry(key).or_insert(0);
        *count = count.saturating_add(1);
    }

    /// Reverts one [`RepetitionTable::record`] of `key`.
    pub fn forget(&mut self, key: Key) {
        if let Some(count) = self.table.get_mut(&key) {
            *count -= 1;
            if *count == 0 {
                let _ = self.table.remove(&key);
            }
        }
    }

    /// Number of times the position was recorded.
    #[must_use]
    pub fn count(&self, key: Key) -> u8 {
        self.table.get(&key).copied().unwrap_or(0)
    }
}
