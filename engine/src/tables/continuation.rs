//! Continuation history: "given the move played one (or two, or four)
//! plies ago was (piece, to), how good has this move been here before?"
//! Indexed two levels deep — the outer index is the earlier move, the
//! inner table is a plain piece/to history for the current move.

use corvid_core::{BitMove, Piece};

use super::{stat_bonus, update_stat};

const MAX_HISTORY: i32 = 29_952;

#[derive(Clone)]
pub struct PieceToHistory {
    table: Box<[[i16; 64]; 16]>,
}

impl PieceToHistory {
    pub fn new() -> PieceToHistory {
        PieceToHistory {
            table: Box::new([[0i16; 64]; 16]),
        }
    }

    pub fn get(&self, piece: Piece, to: corvid_core::SQ) -> i16 {
        self.table[piece as usize][to.0 as usize]
    }

    pub fn update(&mut self, piece: Piece, to: corvid_core::SQ, depth: u8, good: bool) {
        let bonus = if good { stat_bonus(depth) } else { -stat_bonus(depth) };
        update_stat(&mut self.table[piece as usize][to.0 as usize], bonus, MAX_HISTORY);
    }
}

impl Default for PieceToHistory {
    fn default() -> Self {
        PieceToHistory::new()
    }
}

pub struct ContinuationHistory {
    table: Box<[[PieceToHistory; 64]; 16]>,
}

impl ContinuationHistory {
    pub fn new() -> ContinuationHistory {
        let row: [PieceToHistory; 64] = std::array::from_fn(|_| PieceToHistory::new());
        ContinuationHistory {
            table: Box::new(std::array::from_fn(|_| row.clone())),
        }
    }

    pub fn get(&self, prev_piece: Piece, prev_to: corvid_core::SQ) -> &PieceToHistory {
        &self.table[prev_piece as usize][prev_to.0 as usize]
    }

    pub fn get_mut(&mut self, prev_piece: Piece, prev_to: corvid_core::SQ) -> &mut PieceToHistory {
        &mut self.table[prev_piece as usize][prev_to.0 as usize]
    }

    pub fn update(
        &mut self,
        prev_piece: Piece,
        prev_to: corvid_core::SQ,
        mv: BitMove,
        depth: u8,
        good: bool,
    ) {
        self.get_mut(prev_piece, prev_to)
            .update(mv.moving_piece(), mv.get_dest(), depth, good);
    }
}

impl Default for ContinuationHistory {
    fn default() -> Self {
        ContinuationHistory::new()
    }
}
