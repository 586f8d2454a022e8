//! Castling rights, packed as four bits in a `bitflags` set so the position
//! state word stays a single byte-sized copy type.

use bitflags::bitflags;

use crate::core::masks::{
    CASTLE_RIGHTS_BLACK_K, CASTLE_RIGHTS_BLACK_Q, CASTLE_RIGHTS_WHITE_K, CASTLE_RIGHTS_WHITE_Q,
};
use crate::core::{CastleType, Player};

bitflags! {
    #[derive(Default)]
    pub struct CastlingRights: u8 {
        const WHITE_K = CASTLE_RIGHTS_WHITE_K;
        const WHITE_Q = CASTLE_RIGHTS_WHITE_Q;
        const BLACK_K = CASTLE_RIGHTS_BLACK_K;
        const BLACK_Q = CASTLE_RIGHTS_BLACK_Q;
    }
}

impl CastlingRights {
    #[inline]
    pub fn can_castle(self, player: Player, side: CastleType) -> bool {
        self.contains(Self::flag(player, side))
    }

    #[inline]
    pub fn flag(player: Player, side: CastleType) -> CastlingRights {
        match (player, side) {
            (Player::White, CastleType::KingSide) => CastlingRights::WHITE_K,
            (Player::White, CastleType::QueenSide) => CastlingRights::WHITE_Q,
            (Player::Black, CastleType::KingSide) => CastlingRights::BLACK_K,
            (Player::Black, CastleType::QueenSide) => CastlingRights::BLACK_Q,
        }
    }

    /// Rights lost when a move touches `sq` (its own square, or the square
    /// of a rook/king that starts the game there).
    pub fn lost_by_touching(sq: crate::core::sq::SQ) -> CastlingRights {
        match sq.0 {
            0 => CastlingRights::WHITE_Q,
            4 => CastlingRights::WHITE_K | CastlingRights::WHITE_Q,
            7 => CastlingRights::WHITE_K,
            56 => CastlingRights::BLACK_Q,
            60 => CastlingRights::BLACK_K | CastlingRights::BLACK_Q,
            63 => CastlingRights::BLACK_K,
            _ => CastlingRights::empty(),
        }
    }

    pub fn pretty_string(self) -> String {
        let mut s = String::new();
        if self.contains(Self::WHITE_K) {
            s.push('K');
        }
        if self.contains(Self::WHITE_Q) {
            s.push('Q');
        }
        if self.contains(Self::BLACK_K) {
            s.push('k');
        }
        if self.contains(Self::BLACK_Q) {
            s.push('q');
        }
        if s.is_empty() {
            s.push('-');
        }
        s
    }
}
