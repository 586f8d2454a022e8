//! Pseudo-legal move generation, templated by side to move and generation
//! phase so the hot path never branches on an enum at runtime, plus the
//! legality filter and the static-exchange evaluator used by ordering and
//! search-time pruning.

use crate::board::castle_rights::CastlingRights;
use crate::board::Board;
use crate::core::bitboard::BitBoard;
use crate::core::mono_traits::{
    AllGenType, BlackType, CapturesGenType, EvasionsGenType, GenTypeTrait, NonEvasionsGenType,
    PlayerTrait, QuietChecksGenType, QuietsGenType, WhiteType,
};
use crate::core::move_list::MoveList;
use crate::core::piece_move::BitMove;
use crate::core::score::{piecetype_value, Value};
use crate::core::sq::SQ;
use crate::core::{CastleType, GenTypes, Piece, PieceType, Player, ALL_PIECE_TYPES};
use crate::helper::{BOARDS, MAGICS};

const PROMO_PIECES: [PieceType; 4] = [PieceType::Q, PieceType::N, PieceType::R, PieceType::B];

/// All legal moves in the current position.
pub fn generate_legal(board: &Board) -> MoveList {
    let pseudo = if board.turn() == Player::White {
        generate_for::<WhiteType>(board, board.in_check())
    } else {
        generate_for::<BlackType>(board, board.in_check())
    };

    let mut legal = MoveList::new();
    for &mv in pseudo.iter() {
        if !board.leaves_own_king_in_check(mv) {
            legal.push(mv);
        }
    }
    legal
}

fn generate_for<PL: PlayerTrait>(board: &Board, in_check: bool) -> MoveList {
    if in_check {
        generate::<PL, EvasionsGenType>(board)
    } else {
        generate::<PL, NonEvasionsGenType>(board)
    }
}

/// Pseudo-legal generation for one (player, phase) pair. Pins are not
/// pre-filtered here: every pseudo-legal move is checked by
/// [`Board::leaves_own_king_in_check`] afterwards, which is simpler to get
/// right than threading pin masks through every piece loop.
pub fn generate<PL: PlayerTrait, G: GenTypeTrait>(board: &Board) -> MoveList {
    let mut list = MoveList::new();
    let us = PL::player();
    let them = PL::opp();
    let gen_type = G::gen_type();

    let checkers = if gen_type == GenTypes::Evasions {
        board.checkers()
    } else {
        BitBoard::EMPTY
    };

    let target_mask = match gen_type {
        GenTypes::Captures => board.occupied_by(them),
        GenTypes::Quiets | GenTypes::QuietChecks => !board.occupied(),
        GenTypes::Evasions => evasion_target_mask(board, us, checkers),
        GenTypes::All | GenTypes::NonEvasions => !board.occupied_by(us),
    };

    if gen_type == GenTypes::Evasions && checkers.count_bits() > 1 {
        generate_king_moves::<PL>(board, &mut list, !board.occupied_by(us));
        return list;
    }

    generate_pawn_moves::<PL>(board, &mut list, target_mask, gen_type);
    for &pt in &[PieceType::N, PieceType::B, PieceType::R, PieceType::Q] {
        generate_piece_moves(board, &mut list, us, pt, target_mask);
    }
    generate_king_moves::<PL>(board, &mut list, target_mask);

    if matches!(gen_type, GenTypes::All | GenTypes::Quiets | GenTypes::NonEvasions) {
        generate_castles::<PL>(board, &mut list);
    }

    list
}

fn evasion_target_mask(board: &Board, us: Player, checkers: BitBoard) -> BitBoard {
    let king = board.king_sq(us);
    let checker = checkers.lsb();
    (BOARDS.between(king, checker) | BitBoard::from(checker)) & !board.occupied_by(us)
}

fn push_move(list: &mut MoveList, board: &Board, src: SQ, dest: SQ, piece: Piece, promo: PieceType, ep: Option<SQ>) {
    let captured = if let Some(ep_sq) = ep {
        let _ = ep_sq;
        PieceType::P
    } else {
        board.piece_type_at(dest)
    };
    let mv = BitMove::build(src, dest, piece, captured, promo, ep, false);
    let checks = board.gives_check(mv);
    let mv = BitMove::build(src, dest, piece, captured, promo, ep, checks);
    list.push(mv);
}

fn generate_pawn_moves<PL: PlayerTrait>(board: &Board, list: &mut MoveList, target_mask: BitBoard, gen_type: GenTypes) {
    let us = PL::player();
    let them = PL::opp();
    let piece = Piece::make(us, PieceType::P);
    let pawns = board.piece_bb(us, PieceType::P);
    let push_delta = us.pawn_push();
    let start_rank = if us == Player::White { 1 } else { 6 };
    let promo_rank = if us == Player::White { 7 } else { 0 };

    for src in pawns.iter() {
        let one_step = SQ((src.0 as i8 + push_delta) as u8);
        if !board.occupied().contains(one_step) {
            if one_step.rank() as u8 == promo_rank {
                if !matches!(gen_type, GenTypes::Captures) && target_mask.contains(one_step) {
                    for &promo in &PROMO_PIECES {
                        push_move(list, board, src, one_step, piece, promo, None);
                    }
                }
            } else if target_mask.contains(one_step) {
                push_move(list, board, src, one_step, piece, PieceType::None, None);
            }

            if src.rank() as u8 == start_rank {
                let two_step = SQ((src.0 as i8 + 2 * push_delta) as u8);
                if !board.occupied().contains(two_step) && target_mask.contains(two_step) {
                    push_move(list, board, src, two_step, piece, PieceType::None, None);
                }
            }
        }

        let attacks = MAGICS.pawn_attacks(src, us == Player::White) & board.occupied_by(them);
        for dest in attacks.iter() {
            if dest.rank() as u8 == promo_rank {
                for &promo in &PROMO_PIECES {
                    push_move(list, board, src, dest, piece, promo, None);
                }
            } else {
                push_move(list, board, src, dest, piece, PieceType::None, None);
            }
        }

        let ep = board.ep_square();
        if ep.is_okay() && MAGICS.pawn_attacks(src, us == Player::White).contains(ep) {
            push_move(list, board, src, ep, piece, PieceType::None, Some(ep));
        }
    }
}

fn generate_piece_moves(board: &Board, list: &mut MoveList, us: Player, pt: PieceType, target_mask: BitBoard) {
    let piece = Piece::make(us, pt);
    for src in board.piece_bb(us, pt).iter() {
        let attacks = match pt {
            PieceType::N => MAGICS.knight_attacks(src),
            PieceType::B => MAGICS.bishop_attacks(src, board.occupied()),
            PieceType::R => MAGICS.rook_attacks(src, board.occupied()),
            PieceType::Q => MAGICS.queen_attacks(src, board.occupied()),
            _ => unreachable!(),
        } & target_mask;
        for dest in attacks.iter() {
            push_move(list, board, src, dest, piece, PieceType::None, None);
        }
    }
}

fn generate_king_moves<PL: PlayerTrait>(board: &Board, list: &mut MoveList, target_mask: BitBoard) {
    let us = PL::player();
    let piece = Piece::make(us, PieceType::K);
    let src = board.king_sq(us);
    let attacks = MAGICS.king_attacks(src) & target_mask;
    for dest in attacks.iter() {
        if !board.is_attacked(dest, PL::opp()) {
            push_move(list, board, src, dest, piece, PieceType::None, None);
        }
    }
}

fn generate_castles<PL: PlayerTrait>(board: &Board, list: &mut MoveList) {
    let us = PL::player();
    if board.in_check() {
        return;
    }
    let piece = Piece::make(us, PieceType::K);
    let king_src = board.king_sq(us);

    for &side in &[CastleType::KingSide, CastleType::QueenSide] {
        if !board.castling_rights().can_castle(us, side) {
            continue;
        }
        let (king_dest, path, safe_squares): (SQ, BitBoard, [SQ; 2]) = if side == CastleType::KingSide {
            (SQ(king_src.0 + 2), BitBoard(0x60u64 << (king_src.0 & 56)), [SQ(king_src.0 + 1), SQ(king_src.0 + 2)])
        } else {
            (SQ(king_src.0 - 2), BitBoard(0x0Eu64 << (king_src.0 & 56)), [SQ(king_src.0 - 1), SQ(king_src.0 - 2)])
        };
        if (board.occupied() & path).is_not_empty() {
            continue;
        }
        if safe_squares.iter().any(|&sq| board.is_attacked(sq, PL::opp())) {
            continue;
        }
        push_move(list, board, king_src, king_dest, piece, PieceType::None, None);
    }
}

/// Static exchange evaluation: does the capture sequence starting with `mv`
/// net at least `threshold` centipawns for the side to move, assuming both
/// sides recapture with their least valuable attacker each time?
pub fn see_ge(board: &Board, mv: BitMove, threshold: Value) -> bool {
    if mv.is_castle() || mv.is_en_passant() {
        return threshold <= 0;
    }

    let src = mv.get_src();
    let dest = mv.get_dest();
    let mut swap_list = [0 as Value; 32];
    let mut depth = 0;

    swap_list[0] = piecetype_value(mv.captured_piece(), false) - threshold;
    let mut next_victim = mv.moving_piece().type_of();
    let mut occ = board.occupied() & !BitBoard::from(src);
    let mut attackers = board.attackers_to(dest, occ);
    let mut side = mv.moving_piece().player_lossy().other_player();

    loop {
        let side_attackers = attackers & board.occupied_by(side) & occ;
        if side_attackers.is_empty() {
            break;
        }
        let (attacker_sq, attacker_pt) = least_valuable_attacker(board, side_attackers);
        depth += 1;
        if depth >= swap_list.len() {
            break;
        }
        swap_list[depth] = piecetype_value(next_victim, false) - swap_list[depth - 1];
        occ &= !BitBoard::from(attacker_sq);
        attackers |= recompute_sliders(board, dest, occ);
        attackers &= occ;
        next_victim = attacker_pt;
        side = side.other_player();
        if next_victim == PieceType::K && (attackers & board.occupied_by(side)).is_not_empty() {
            depth -= 1;
            break;
        }
    }

    while depth > 0 {
        swap_list[depth - 1] = -(-swap_list[depth - 1]).max(swap_list[depth]);
        depth -= 1;
    }
    swap_list[0] >= 0
}

fn least_valuable_attacker(board: &Board, attackers: BitBoard) -> (SQ, PieceType) {
    for &pt in &ALL_PIECE_TYPES {
        let of_type = attackers
            & (board.piece_bb(Player::White, pt) | board.piece_bb(Player::Black, pt));
        if of_type.is_not_empty() {
            return (of_type.lsb(), pt);
        }
    }
    unreachable!("attackers set is never empty here")
}

fn recompute_sliders(board: &Board, sq: SQ, occ: BitBoard) -> BitBoard {
    let bishops_queens = board.piece_bb(Player::White, PieceType::B)
        | board.piece_bb(Player::Black, PieceType::B)
        | board.piece_bb(Player::White, PieceType::Q)
        | board.piece_bb(Player::Black, PieceType::Q);
    let rooks_queens = board.piece_bb(Player::White, PieceType::R)
        | board.piece_bb(Player::Black, PieceType::R)
        | board.piece_bb(Player::White, PieceType::Q)
        | board.piece_bb(Player::Black, PieceType::Q);
    (MAGICS.bishop_attacks(sq, occ) & bishops_queens) | (MAGICS.rook_attacks(sq, occ) & rooks_queens)
}

/// Public helper for the castling-rights bit lookups the perft/test code
/// also wants without reaching into `castle_rights` directly.
pub fn castle_flag(player: Player, side: CastleType) -> CastlingRights {
    CastlingRights::flag(player, side)
}
