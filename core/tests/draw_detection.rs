use corvid_core::board::movegen::generate_legal;
use corvid_core::Board;

#[test]
fn long_non_capturing_shuffle_eventually_draws() {
    // King-and-rook vs king shuffle; neither side captures or moves a pawn,
    // so the halfmove clock only ever climbs. Whether the repetition check
    // or the fifty-move counter is what actually fires first, this position
    // must be a draw well before the shuffle runs out.
    let fen = "8/8/8/4k3/8/8/8/R3K3 w Q - 0 1";
    let mut board = Board::from_fen(fen).unwrap();
    assert!(!board.is_draw());

    let shuffle = ["a1b1", "e5d5", "b1a1", "d5e5"];
    for _ in 0..25 {
        for &mv_text in &shuffle {
            let mv = generate_legal(&board)
                .iter()
                .copied()
                .find(|m| m.stringify() == mv_text)
                .unwrap();
            board.apply_move(mv);
        }
    }
    assert!(board.is_draw());
}

#[test]
fn bare_kings_is_insufficient_material() {
    let board = Board::from_fen("8/8/4k3/8/8/3K4/8/8 w - - 0 1").unwrap();
    assert!(board.is_insufficient_material());
    assert!(board.is_draw());
}

#[test]
fn king_and_pawn_is_not_insufficient_material() {
    let board = Board::from_fen("8/8/4k3/8/8/3K4/4P3/8 w - - 0 1").unwrap();
    assert!(!board.is_insufficient_material());
}
