//! The redundant square -> piece mailbox kept in lock-step with the
//! bitboards. Existing purely so callers can ask "what's on e4" in O(1)
//! without scanning twelve bitboards.

use crate::core::sq::SQ;
use crate::core::{Piece, PieceType, Player};

#[derive(Clone)]
pub struct PieceLocations {
    board: [Piece; 64],
}

impl PieceLocations {
    pub fn blank() -> PieceLocations {
        PieceLocations {
            board: [Piece::None; 64],
        }
    }

    #[inline(always)]
    pub fn piece_at(&self, sq: SQ) -> Piece {
        self.board[sq.0 as usize]
    }

    #[inline(always)]
    pub fn piece_type_at(&self, sq: SQ) -> PieceType {
        self.board[sq.0 as usize].type_of()
    }

    #[inline(always)]
    pub fn player_at(&self, sq: SQ) -> Option<Player> {
        self.board[sq.0 as usize].player()
    }

    #[inline(always)]
    pub fn place(&mut self, sq: SQ, piece: Piece) {
        self.board[sq.0 as usize] = piece;
    }

    #[inline(always)]
    pub fn remove(&mut self, sq: SQ) {
        self.board[sq.0 as usize] = Piece::None;
    }
}

impl Default for PieceLocations {
    fn default() -> Self {
        PieceLocations::blank()
    }
}
