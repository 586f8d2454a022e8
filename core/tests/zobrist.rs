use corvid_core::board::movegen::generate_legal;
use corvid_core::Board;

#[test]
fn apply_and_undo_restores_zobrist() {
    let mut board = Board::start_pos();
    let original = board.zobrist();
    let original_pawn = board.pawn_key();
    let original_material = board.material_key();

    let moves = generate_legal(&board);
    for &mv in moves.iter() {
        board.apply_move(mv);
        assert_ne!(board.zobrist(), original, "hash should change after a move");
        board.undo_move(mv);
        assert_eq!(board.zobrist(), original);
        assert_eq!(board.pawn_key(), original_pawn);
        assert_eq!(board.material_key(), original_material);
    }
}

#[test]
fn same_position_reached_two_ways_hashes_equal() {
    let mut via_moves = Board::start_pos();
    let m1 = generate_legal(&via_moves)
        .iter()
        .find(|m| m.to_string() == "e2e4")
        .copied()
        .unwrap();
    via_moves.apply_move(m1);
    let m2 = generate_legal(&via_moves)
        .iter()
        .find(|m| m.to_string() == "e7e5")
        .copied()
        .unwrap();
    via_moves.apply_move(m2);

    let via_fen = Board::from_fen("rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e6 0 2").unwrap();

    assert_eq!(via_moves.zobrist(), via_fen.zobrist());
    assert_eq!(via_moves.pawn_key(), via_fen.pawn_key());
    assert_eq!(via_moves.material_key(), via_fen.material_key());
}
