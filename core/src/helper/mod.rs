//! Precomputed, read-only lookup tables: magic-bitboard sliding attacks,
//! non-sliding attack sets, square-pair geometry, and Zobrist keys. Each
//! table is built once, lazily, on first access and never mutated again.

pub mod boards;
pub mod magic;
pub mod prelude;
pub mod zobrist;

use lazy_static::lazy_static;

use self::boards::BoardTables;
use self::magic::MagicTables;

lazy_static! {
    pub static ref MAGICS: MagicTables = MagicTables::generate();
    pub static ref BOARDS: BoardTables = BoardTables::generate();
}

pub use self::zobrist::ZOBRIST;

/// Forces all lazily-built tables to materialise. Call once at process
/// start so the first search doesn't pay magic-number generation mid-game.
pub fn init() {
    lazy_static::initialize(&MAGICS);
    lazy_static::initialize(&BOARDS);
    lazy_static::initialize(&ZOBRIST);
}
