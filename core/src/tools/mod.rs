//! Shared infrastructure used by both the core position logic and the
//! engine crate built on top of it: the transposition table and a small
//! PRNG for table generation.

pub mod prng;
pub mod tt;

pub use self::tt::TranspositionTable;
