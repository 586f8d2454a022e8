//! Capture history: same gravity update as the other tables, but indexed
//! by (moving piece, destination, captured piece type) instead of just
//! (moving piece, destination) — captures are ordered by MVV-LVA first and
//! this only breaks ties within a victim/attacker pair.

use corvid_core::{Piece, PieceType};

use super::{stat_bonus, update_stat};

const MAX_HISTORY: i32 = 10_692;

pub struct CapturePieceToHistory {
    table: Box<[[[i16; 8]; 64]; 16]>,
}

impl CapturePieceToHistory {
    pub fn new() -> CapturePieceToHistory {
        CapturePieceToHistory {
            table: Box::new([[[0i16; 8]; 64]; 16]),
        }
    }

    pub fn get(&self, piece: Piece, to: corvid_core::SQ, captured: PieceType) -> i16 {
        self.table[piece as usize][to.0 as usize][captured as usize]
    }

    pub fn update(&mut self, piece: Piece, to: corvid_core::SQ, captured: PieceType, depth: u8, good: bool) {
        let bonus = if good { stat_bonus(depth) } else { -stat_bonus(depth) };
        update_stat(
            &mut self.table[piece as usize][to.0 as usize][captured as usize],
            bonus,
            MAX_HISTORY,
        );
    }
}

impl Default for CapturePieceToHistory {
    fn default() -> Self {
        CapturePieceToHistory::new()
    }
}
