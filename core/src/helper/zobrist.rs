//! Incremental hash keys: a full position key, a pawn-only key, and a
//! material-only key, each maintained incrementally by the board on
//! `apply_move`/`undo_move` and periodically checked against a full
//! recompute in debug builds.

use lazy_static::lazy_static;

use crate::core::sq::SQ;
use crate::core::{Piece, PieceType};
use crate::tools::prng::PRNG;

const ZOBRIST_SEED: u64 = 23_081;
const PIECE_SLOTS: usize = 16;
const MAX_PIECE_COUNT: usize = 10;

pub struct Zobrist {
    /// Indexed `[piece as usize][square]`.
    psq: [[u64; 64]; PIECE_SLOTS],
    /// Indexed `[piece as usize][count]`, used for the material-only key.
    material: [[u64; MAX_PIECE_COUNT]; PIECE_SLOTS],
    ep_file: [u64; 8],
    castle: [u64; 16],
    side: u64,
}

impl Zobrist {
    fn generate() -> Zobrist {
        let mut rng = PRNG::new(ZOBRIST_SEED);
        let mut psq = [[0u64; 64]; PIECE_SLOTS];
        let mut material = [[0u64; MAX_PIECE_COUNT]; PIECE_SLOTS];
        for piece in psq.iter_mut() {
            for key in piece.iter_mut() {
                *key = rng.next_u64();
            }
        }
        for piece in material.iter_mut() {
            for key in piece.iter_mut() {
                *key = rng.next_u64();
            }
        }
        let mut ep_file = [0u64; 8];
        for key in ep_file.iter_mut() {
            *key = rng.next_u64();
        }
        let mut castle = [0u64; 16];
        for key in castle.iter_mut() {
            *key = rng.next_u64();
        }
        let side = rng.next_u64();

        Zobrist {
            psq,
            material,
            ep_file,
            castle,
            side,
        }
    }

    #[inline(always)]
    pub fn psq(&self, piece: Piece, sq: SQ) -> u64 {
        self.psq[piece as usize][sq.0 as usize]
    }

    /// Keyed the same way as `psq`, but callers restrict the iteration to
    /// pawns to build the pawn-only hash.
    #[inline(always)]
    pub fn pawn(&self, piece: Piece, sq: SQ) -> u64 {
        debug_assert!(piece.type_of() == PieceType::P);
        self.psq(piece, sq)
    }

    /// `count` is the piece count *after* the change the key is folding in
    /// (the material key is rebuilt as counts change, not toggled per square).
    #[inline(always)]
    pub fn material(&self, piece: Piece, count: usize) -> u64 {
        self.material[piece as usize][count.min(MAX_PIECE_COUNT - 1)]
    }

    #[inline(always)]
    pub fn en_passant(&self, file: usize) -> u64 {
        self.ep_file[file]
    }

    #[inline(always)]
    pub fn castle(&self, rights: u8) -> u64 {
        self.castle[rights as usize]
    }

    #[inline(always)]
    pub fn side(&self) -> u64 {
        self.side
    }
}

lazy_static! {
    pub static ref ZOBRIST: Zobrist = Zobrist::generate();
}
