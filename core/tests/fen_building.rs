use corvid_core::board::STARTING_FEN;
use corvid_core::Board;

#[test]
fn starting_fen_round_trips() {
    let board = Board::from_fen(STARTING_FEN).unwrap();
    assert_eq!(board.fen(), STARTING_FEN);
}

#[test]
fn arbitrary_fen_round_trips() {
    let fen = "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3";
    let board = Board::from_fen(fen).unwrap();
    assert_eq!(board.fen(), fen);
}

#[test]
fn en_passant_square_is_parsed() {
    let fen = "rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 2";
    let board = Board::from_fen(fen).unwrap();
    assert_eq!(board.ep_square().to_string(), "d6");
}

#[test]
fn rejects_missing_king() {
    let fen = "8/8/8/8/8/8/8/4K3 w - - 0 1";
    assert!(corvid_core::Board::from_fen(fen).is_err());
}

#[test]
fn minimal_four_field_fen_defaults_clocks() {
    let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -";
    let board = Board::from_fen(fen).unwrap();
    assert_eq!(board.halfmove_clock(), 0);
    assert_eq!(board.fullmove_number(), 1);
}

#[test]
fn rejects_wrong_field_count() {
    let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0";
    assert!(Board::from_fen(fen).is_err());
}
