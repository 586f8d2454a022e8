use corvid_core::board::perft::perft;
use corvid_core::Board;

#[test]
fn startpos_perft_depth_1() {
    let mut board = Board::start_pos();
    assert_eq!(perft(&mut board, 1), 20);
}

#[test]
fn startpos_perft_depth_2() {
    let mut board = Board::start_pos();
    assert_eq!(perft(&mut board, 2), 400);
}

#[test]
fn startpos_perft_depth_3() {
    let mut board = Board::start_pos();
    assert_eq!(perft(&mut board, 3), 8_902);
}

#[test]
fn kiwipete_perft_depth_1() {
    // The classic "Kiwipete" stress position, exercising castling, en
    // passant and promotions in one FEN.
    let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    let mut board = Board::from_fen(fen).unwrap();
    assert_eq!(perft(&mut board, 1), 48);
}

#[test]
fn startpos_perft_depth_5() {
    let mut board = Board::start_pos();
    assert_eq!(perft(&mut board, 5), 4_865_609);
}

#[test]
fn startpos_perft_depth_6() {
    let mut board = Board::start_pos();
    assert_eq!(perft(&mut board, 6), 119_060_324);
}

#[test]
fn kiwipete_perft_depth_5() {
    let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    let mut board = Board::from_fen(fen).unwrap();
    assert_eq!(perft(&mut board, 5), 193_690_690);
}

#[test]
fn endgame_rook_pawn_perft_depth_6() {
    // Stresses pawn promotion choice, discovered check and a lone rook
    // endgame with kings on the edge.
    let fen = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - -";
    let mut board = Board::from_fen(fen).unwrap();
    assert_eq!(perft(&mut board, 6), 11_030_083);
}
