use corvid_core::board::movegen::{generate_legal, see_ge};
use corvid_core::Board;

#[test]
fn starting_position_has_twenty_legal_moves() {
    let board = Board::start_pos();
    assert_eq!(generate_legal(&board).len(), 20);
}

#[test]
fn castling_is_offered_when_clear() {
    let fen = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1";
    let board = Board::from_fen(fen).unwrap();
    let moves = generate_legal(&board);
    let has_kingside = moves.iter().any(|m| m.to_string() == "e1g1");
    let has_queenside = moves.iter().any(|m| m.to_string() == "e1c1");
    assert!(has_kingside);
    assert!(has_queenside);
}

#[test]
fn castling_through_check_is_illegal() {
    let fen = "r3k2r/8/8/8/8/8/5r2/R3K2R w KQkq - 0 1";
    let board = Board::from_fen(fen).unwrap();
    let moves = generate_legal(&board);
    assert!(!moves.iter().any(|m| m.to_string() == "e1g1"));
}

#[test]
fn pinned_piece_cannot_move_off_the_pin_line() {
    // white rook pinned on the e-file by the black rook, can't step aside
    let fen = "4r3/8/8/8/8/8/4R3/4K3 w - - 0 1";
    let board = Board::from_fen(fen).unwrap();
    let moves = generate_legal(&board);
    assert!(!moves.iter().any(|m| m.to_string() == "e2d2"));
    assert!(moves.iter().any(|m| m.to_string() == "e2e8"));
}

#[test]
fn see_rejects_losing_queen_for_pawn_trade() {
    // white queen on e4 attacked by a defended black pawn on d5
    let fen = "4k3/8/8/3p4/4Q3/8/8/4K3 w - - 0 1";
    let board = Board::from_fen(fen).unwrap();
    let moves = generate_legal(&board);
    let capture = moves.iter().find(|m| m.to_string() == "e4d5").copied().unwrap();
    assert!(see_ge(&board, capture, 0));
}
