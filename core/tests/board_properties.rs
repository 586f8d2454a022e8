use corvid_core::board::movegen::generate_legal;
use corvid_core::Board;
use proptest::prelude::*;

/// Plays `path` half-moves (by index into the legal move list at each ply,
/// wrapping if the index is out of range) and returns the board plus the
/// stack of moves actually played, so the caller can undo them in reverse.
fn play_path(path: &[u32]) -> (Board, Vec<corvid_core::BitMove>) {
    let mut board = Board::start_pos();
    let mut played = Vec::new();
    for &choice in path {
        let legal = generate_legal(&board);
        if legal.is_empty() {
            break;
        }
        let mv = legal[(choice as usize) % legal.len()];
        board.apply_move(mv);
        played.push(mv);
    }
    (board, played)
}

proptest! {
    #[test]
    fn random_game_keeps_mailbox_and_bitboards_consistent(path in prop::collection::vec(0u32..40, 1..20)) {
        let (board, _) = play_path(&path);
        for sq_index in 0..64u8 {
            let sq = corvid_core::SQ(sq_index);
            let piece = board.piece_at(sq);
            if piece != corvid_core::Piece::None {
                let player = piece.player().unwrap();
                prop_assert!(board.piece_bb(player, piece.type_of()).contains(sq));
                prop_assert!(board.occupied_by(player).contains(sq));
                prop_assert!(board.occupied().contains(sq));
            }
        }
    }

    #[test]
    fn undo_move_restores_hash_and_board_exactly(path in prop::collection::vec(0u32..40, 1..15)) {
        let (mut board, played) = play_path(&path);
        let zobrist_before = board.zobrist();
        let fen_before = board.fen();
        if let Some(&last) = played.last() {
            board.undo_move(last);
            board.apply_move(last);
            prop_assert_eq!(board.zobrist(), zobrist_before);
            prop_assert_eq!(board.fen(), fen_before);
        }
    }

    #[test]
    fn opponent_king_is_never_left_in_check(path in prop::collection::vec(0u32..40, 1..25)) {
        let (board, _) = play_path(&path);
        // every move that reaches this position was legality-filtered, so the
        // side that just moved can never have left its own king attacked.
        let just_moved = !board.turn();
        prop_assert!(!board.is_attacked(board.king_sq(just_moved), board.turn()));
    }
}
