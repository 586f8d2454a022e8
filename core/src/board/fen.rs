//! Forsyth-Edwards Notation: the text format positions arrive in over UCI
//! (`position fen ...`) and the format `Board::fen()` serialises back to for
//! `info`/debug output.

use crate::board::castle_rights::CastlingRights;
use crate::board::Board;
use crate::core::sq::SQ;
use crate::core::{Piece, PieceType, Player};
use crate::error::FenError;
use crate::helper::ZOBRIST;

impl Board {
    /// Parses a full 6-field FEN, or a minimal 4-field one (placement, side
    /// to move, castling rights, en-passant square) with `halfmove_clock`
    /// defaulted to 0 and `fullmove_number` defaulted to 1.
    pub fn from_fen(fen: &str) -> Result<Board, FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() != 6 && fields.len() != 4 {
            return Err(FenError::WrongFieldCount(fields.len()));
        }

        let mut board = Board::blank();
        board.place_from_fen_ranks(fields[0])?;

        board.turn = match fields[1] {
            "w" => Player::White,
            "b" => Player::Black,
            other => return Err(FenError::BadSideToMove(other.to_string())),
        };

        let castling = parse_castling(fields[2])?;
        board.zobrist ^= ZOBRIST.castle(0);
        board.castling = castling;
        board.zobrist ^= ZOBRIST.castle(castling.bits());

        if fields[3] != "-" {
            let sq = SQ::from_string(fields[3]).ok_or_else(|| FenError::BadEnPassantSquare(fields[3].to_string()))?;
            board.ep_square = sq;
            board.zobrist ^= ZOBRIST.en_passant(sq.file() as usize);
        }

        board.halfmove_clock = if fields.len() == 6 {
            fields[4]
                .parse()
                .map_err(|_| FenError::BadHalfMoveClock(fields[4].to_string()))?
        } else {
            0
        };
        board.fullmove_number = if fields.len() == 6 {
            fields[5]
                .parse()
                .map_err(|_| FenError::BadFullMoveNumber(fields[5].to_string()))?
        } else {
            1
        };
        board.ply = board.fullmove_number.saturating_sub(1) * 2 + if board.turn == Player::Black { 1 } else { 0 };

        if board.turn == Player::Black {
            board.zobrist ^= ZOBRIST.side();
        }

        if board.piece_bb(Player::White, PieceType::K).is_empty() {
            return Err(FenError::MissingKing("white"));
        }
        if board.piece_bb(Player::Black, PieceType::K).is_empty() {
            return Err(FenError::MissingKing("black"));
        }
        if board.piece_bb(Player::White, PieceType::K).count_bits() > 1 {
            return Err(FenError::MultipleKings("white"));
        }
        if board.piece_bb(Player::Black, PieceType::K).count_bits() > 1 {
            return Err(FenError::MultipleKings("black"));
        }

        board.key_history.push(board.zobrist);
        Ok(board)
    }

    fn place_from_fen_ranks(&mut self, placement: &str) -> Result<(), FenError> {
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::WrongRankCount(ranks.len()));
        }

        for (rank_from_top, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - rank_from_top;
            let mut file = 0usize;
            for c in rank_str.chars() {
                if let Some(skip) = c.to_digit(10) {
                    file += skip as usize;
                } else {
                    if file >= 8 {
                        return Err(FenError::RankFileCountMismatch(rank as u8, rank_str.to_string()));
                    }
                    let pt = PieceType::from_char(c).ok_or(FenError::UnknownPieceChar(c))?;
                    let player = if c.is_ascii_uppercase() { Player::White } else { Player::Black };
                    let piece = Piece::make(player, pt);
                    let sq = SQ((rank * 8 + file) as u8);
                    self.place_piece(sq, piece, player, pt);
                    file += 1;
                }
            }
            if file != 8 {
                return Err(FenError::RankFileCountMismatch(rank as u8, rank_str.to_string()));
            }
        }
        Ok(())
    }

    pub fn fen(&self) -> String {
        let mut s = String::new();
        for rank in (0..8).rev() {
            let mut empty = 0;
            for file in 0..8 {
                let sq = SQ((rank * 8 + file) as u8);
                let piece = self.piece_at(sq);
                if piece == Piece::None {
                    empty += 1;
                } else {
                    if empty > 0 {
                        s.push_str(&empty.to_string());
                        empty = 0;
                    }
                    s.push(piece.character_lossy());
                }
            }
            if empty > 0 {
                s.push_str(&empty.to_string());
            }
            if rank != 0 {
                s.push('/');
            }
        }
        s.push(' ');
        s.push(if self.turn == Player::White { 'w' } else { 'b' });
        s.push(' ');
        s.push_str(&self.castling.pretty_string());
        s.push(' ');
        if self.ep_square.is_okay() {
            s.push_str(&self.ep_square.to_string());
        } else {
            s.push('-');
        }
        s.push(' ');
        s.push_str(&self.halfmove_clock.to_string());
        s.push(' ');
        s.push_str(&self.fullmove_number.to_string());
        s
    }
}

fn parse_castling(field: &str) -> Result<CastlingRights, FenError> {
    if field == "-" {
        return Ok(CastlingRights::empty());
    }
    let mut rights = CastlingRights::empty();
    for c in field.chars() {
        match c {
            'K' => rights |= CastlingRights::WHITE_K,
            'Q' => rights |= CastlingRights::WHITE_Q,
            'k' => rights |= CastlingRights::BLACK_K,
            'q' => rights |= CastlingRights::BLACK_Q,
            _ => return Err(FenError::BadCastlingRights(field.to_string())),
        }
    }
    Ok(rights)
}
