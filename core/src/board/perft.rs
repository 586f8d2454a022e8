//! Perft: a brute-force move-count to the given depth, the standard sanity
//! check for a move generator (compare against published node counts for
//! well-known positions).

use crate::board::movegen::generate_legal;
use crate::board::Board;

pub fn perft(board: &mut Board, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = generate_legal(board);
    if depth == 1 {
        return moves.len() as u64;
    }
    let mut nodes = 0;
    for &mv in moves.iter() {
        board.apply_move(mv);
        nodes += perft(board, depth - 1);
        board.undo_move(mv);
    }
    nodes
}

/// Per-root-move breakdown, as printed by `go perft` in UCI-style engines.
pub fn perft_divide(board: &mut Board, depth: u32) -> Vec<(String, u64)> {
    let moves = generate_legal(board);
    let mut out = Vec::with_capacity(moves.len());
    for &mv in moves.iter() {
        board.apply_move(mv);
        let nodes = perft(board, depth.saturating_sub(1));
        board.undo_move(mv);
        out.push((mv.to_string(), nodes));
    }
    out
}
