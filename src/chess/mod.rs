//! Chess rules: board representation, attack tables, move generation and the
//! game state built on top of them.

pub mod attacks;
pub mod bitboard;
pub mod core;
pub mod domain;
pub mod game;
pub mod magics;
pub mod movegen;
pub mod moves;
pub mod perft;
pub mod position;
pub mod zobrist;
