//! One undo record per ply, pushed before a move is applied and popped on
//! unmake. Holds exactly what can't be recovered by inspecting the move
//! itself: irreversible state (castling rights, en-passant square, the
//! fifty-move counter) and the captured piece, if any.

use crate::board::castle_rights::CastlingRights;
use crate::core::sq::SQ;
use crate::core::PieceType;

#[derive(Clone, Copy)]
pub struct BoardState {
    pub castling: CastlingRights,
    pub ep_square: SQ,
    pub halfmove_clock: u16,
    pub captured: PieceType,
    pub zobrist: u64,
    pub pawn_key: u64,
    pub material_key: u64,
}
