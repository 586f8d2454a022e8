//! Counter-move table: for the piece/destination-square of the move just
//! played, what quiet move most often refuted it last time? Indexed by
//! (moving piece, to-square) of the *previous* move, not the current one.

use corvid_core::{BitMove, Piece};

pub struct CounterMoveHistory {
    table: Box<[[BitMove; 64]; 16]>,
}

impl CounterMoveHistory {
    pub fn new() -> CounterMoveHistory {
        CounterMoveHistory {
            table: Box::new([[BitMove::null(); 64]; 16]),
        }
    }

    pub fn get(&self, prev_piece: Piece, prev_to: corvid_core::SQ) -> BitMove {
        self.table[prev_piece as usize][prev_to.0 as usize]
    }

    pub fn set(&mut self, prev_piece: Piece, prev_to: corvid_core::SQ, refutation: BitMove) {
        self.table[prev_piece as usize][prev_to.0 as usize] = refutation;
    }
}

impl Default for CounterMoveHistory {
    fn default() -> Self {
        CounterMoveHistory::new()
    }
}
