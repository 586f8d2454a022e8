//! Bitboard position representation, move generation, and the shared
//! transposition table. Everything a search needs to walk the game tree,
//! and nothing about how to walk it — that's the engine crate built on top.

pub mod board;
pub mod core;
pub mod error;
pub mod helper;
pub mod tools;

pub use crate::board::Board;
pub use crate::core::bitboard::BitBoard;
pub use crate::core::move_list::MoveList;
pub use crate::core::piece_move::BitMove;
pub use crate::core::score::{Score, Value};
pub use crate::core::sq::SQ;
pub use crate::core::{Piece, PieceType, Player};

/// Materialises every lazily-built lookup table. Call once, before the
/// first position is constructed off the main thread, so table generation
/// doesn't happen racily on first use.
pub fn init() {
    helper::init();
}
