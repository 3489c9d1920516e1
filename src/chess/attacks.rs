//! Mappings of occupied squares to the attacked squares for each piece. The
//! leaper and pawn tables are computed at compile time, sliding pieces go
//! through [`crate::chess::magics`].

use crate::chess::bitboard::Bitboard;
use crate::chess::core::{Color, PieceKind, Square, BOARD_SIZE, BOARD_WIDTH};
use crate::chess::magics::{magics, Slider};

const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];
const KING_DELTAS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];
const WHITE_PAWN_DELTAS: [(i8, i8); 2] = [(-1, 1), (1, 1)];
const BLACK_PAWN_DELTAS: [(i8, i8); 2] = [(-1, -1), (1, -1)];

/// For each square, the set of squares reachable with one of the `(file,
/// rank)` jumps without leaving the board.
const fn leaper_table(deltas: &[(i8, i8)]) -> [Bitboard; BOARD_SIZE as usize] {
    let mut table = [Bitboard::empty(); BOARD_SIZE as usize];
    let mut square = 0;
    while square < BOARD_SIZE {
        let file = (square % BOARD_WIDTH) as i8;
        let rank = (square / BOARD_WIDTH) as i8;
        let mut bits = 0u64;
        let mut i = 0;
        while i < deltas.len() {
            let (file_delta, rank_delta) = deltas[i];
            let (target_file, target_rank) = (file + file_delta, rank + rank_delta);
            if target_file >= 0
                && target_file < BOARD_WIDTH as i8
                && target_rank >= 0
                && target_rank < BOARD_WIDTH as i8
            {
                bits |= 1 << (target_rank as u8 * BOARD_WIDTH + target_file as u8);
            }
            i += 1;
        }
        table[square as usize] = Bitboard::from_bits(bits);
        square += 1;
    }
    table
}

const KNIGHT_ATTACKS: [Bitboard; BOARD_SIZE as usize] = leaper_table(&KNIGHT_DELTAS);
const KING_ATTACKS: [Bitboard; BOARD_SIZE as usize] = leaper_table(&KING_DELTAS);
const WHITE_PAWN_ATTACKS: [Bitboard; BOARD_SIZE as usize] = leaper_table(&WHITE_PAWN_DELTAS);
const BLACK_PAWN_ATTACKS: [Bitboard; BOARD_SIZE as usize] = leaper_table(&BLACK_PAWN_DELTAS);

#[allow(missing_docs)]
#[must_use]
pub const fn knight_attacks(square: Square) -> Bitboard {
    KNIGHT_ATTACKS[square as usize]
}

#[allow(missing_docs)]
#[must_use]
pub const fn king_attacks(square: Square) -> Bitboard {
    KING_ATTACKS[square as usize]
}

/// Squares a pawn of given color standing on `square` captures on. Pushes are
/// not attacks and are handled by the move generator.
#[must_use]
pub const fn pawn_attacks(color: Color, square: Square) -> Bitboard {
    match color {
        Color::White => WHITE_PAWN_ATTACKS[square as usize],
        Color::Black => BLACK_PAWN_ATTACKS[square as usize],
    }
}

#[allow(missing_docs)]
#[must_use]
pub fn bishop_attacks(square: Square, occupancy: Bitboard) -> Bitboard {
    magics().attacks(Slider::Bishop, square, occupancy)
}

#[allow(missing_docs)]
#[must_use]
pub fn rook_attacks(square: Square, occupancy: Bitboard) -> Bitboard {
    magics().attacks(Slider::Rook, square, occupancy)
}

#[allow(missing_docs)]
#[must_use]
pub fn queen_attacks(square: Square, occupancy: Bitboard) -> Bitboard {
    bishop_attacks(square, occupancy) | rook_attacks(square, occupancy)
}

/// Squares strictly between `from` and `to` if they are on the same line,
/// empty set otherwise.
#[must_use]
pub fn between(from: Square, to: Square) -> Bitboard {
    let (from_bb, to_bb) = (Bitboard::from(from), Bitboard::from(to));
    if rook_attacks(from, Bitboard::empty()).contains(to) {
        rook_attacks(from, to_bb) & rook_attacks(to, from_bb)
    } else if bishop_attacks(from, Bitboard::empty()).contains(to) {
        bishop_attacks(from, to_bb) & bishop_attacks(to, from_bb)
    } else {
        Bitboard::empty()
    }
}

/// Squares attacked by a piece of given kind and color standing on `square`.
/// The color only matters for pawns, the occupancy only matters for sliders.
#[must_use]
pub fn attacks_for(kind: PieceKind, square: Square, color: Color, occupancy: Bitboard) -> Bitboard {
    match kind {
        PieceKind::Pawn => pawn_attacks(color, square),
        PieceKind::Knight => knight_attacks(square),
        PieceKind::Bishop => bishop_attacks(square, occupancy),
        PieceKind::Rook => rook_attacks(square, occupancy),
        PieceKind::Queen => queen_attacks(square, occupancy),
        PieceKind::King => king_attacks(square),
    }
}
