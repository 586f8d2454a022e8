//! Token-by-token parsing of the two variable-shaped UCI commands:
//! `position [startpos|fen ...] [moves ...]` and `go [...]`.

use corvid_core::board::movegen::generate_legal;
use corvid_core::error::{FenError, MoveParseError};
use corvid_core::{BitMove, Board};

use crate::time::{ClockState, UciGoLimits};

/// Matches `text` (long algebraic, e.g. `e2e4` or `e7e8q`) against the
/// position's legal moves rather than hand-parsing square/promotion
/// fields — a move either is one of these, or it's illegal.
pub fn parse_uci_move(board: &Board, text: &str) -> Result<BitMove, MoveParseError> {
    generate_legal(board)
        .iter()
        .copied()
        .find(|mv| mv.stringify() == text)
        .ok_or_else(|| MoveParseError::Illegal(text.to_string()))
}

/// `position startpos|fen <FEN> [moves m1 m2 ...]`. An illegal move in the
/// `moves` list stops the list there, keeping the position reached so far
/// rather than rejecting the whole command.
pub fn parse_position(args: &[&str]) -> Result<Board, FenError> {
    if args.is_empty() {
        return Ok(Board::start_pos());
    }

    let (mut board, rest) = if args[0] == "startpos" {
        (Board::start_pos(), &args[1..])
    } else if args[0] == "fen" {
        let moves_idx = args.iter().position(|&a| a == "moves").unwrap_or(args.len());
        let fen = args[1..moves_idx].join(" ");
        (Board::from_fen(&fen)?, &args[moves_idx..])
    } else {
        (Board::start_pos(), args)
    };

    if let Some(&"moves") = rest.first() {
        for &mv_text in &rest[1..] {
            match parse_uci_move(&board, mv_text) {
                Ok(mv) => board.apply_move(mv),
                Err(_) => break,
            }
        }
    }

    Ok(board)
}

/// `go [wtime N] [btime N] [winc N] [binc N] [movestogo N] [depth N]
/// [nodes N] [mate N] [movetime N] [infinite] [ponder] [searchmoves m1 m2 ...]`
pub fn parse_go(board: &Board, args: &[&str]) -> UciGoLimits {
    let mut limits = UciGoLimits::blank();
    let mut clock = ClockState::default();
    let mut has_clock = false;

    let mut i = 0;
    while i < args.len() {
        match args[i] {
            "infinite" => limits.infinite = true,
            "ponder" => limits.ponder = true,
            "wtime" => {
                has_clock = true;
                clock.time_msec[0] = next_i64(args, &mut i);
            }
            "btime" => {
                has_clock = true;
                clock.time_msec[1] = next_i64(args, &mut i);
            }
            "winc" => {
                has_clock = true;
                clock.inc_msec[0] = next_i64(args, &mut i);
            }
            "binc" => {
                has_clock = true;
                clock.inc_msec[1] = next_i64(args, &mut i);
            }
            "movestogo" => {
                has_clock = true;
                clock.moves_to_go = next_i64(args, &mut i).max(0) as u32;
            }
            "depth" => limits.depth = Some(next_i64(args, &mut i).max(0) as u16),
            "nodes" => limits.nodes = Some(next_i64(args, &mut i).max(0) as u64),
            "mate" => limits.mate = Some(next_i64(args, &mut i).max(0) as u16),
            "movetime" => limits.move_time_msec = Some(next_i64(args, &mut i).max(0) as u64),
            "searchmoves" => {
                i += 1;
                while i < args.len() && !is_keyword(args[i]) {
                    if let Ok(mv) = parse_uci_move(board, args[i]) {
                        limits.search_moves.push(mv);
                    }
                    i += 1;
                }
                continue;
            }
            _ => {}
        }
        i += 1;
    }

    if has_clock {
        limits.clock = Some(clock);
    }
    limits
}

fn next_i64(args: &[&str], i: &mut usize) -> i64 {
    *i += 1;
    args.get(*i).and_then(|s| s.parse().ok()).unwrap_or(0)
}

fn is_keyword(arg: &str) -> bool {
    matches!(
        arg,
        "searchmoves" | "ponder" | "wtime" | "btime" | "winc" | "binc" | "movestogo" | "depth" | "nodes" | "mate" | "movetime" | "infinite"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startpos_with_moves_applies_each() {
        let board = parse_position(&["startpos", "moves", "e2e4", "e7e5"]).unwrap();
        assert_eq!(board.turn(), corvid_core::Player::White);
    }

    #[test]
    fn illegal_move_stops_the_list_but_keeps_the_position() {
        let board = parse_position(&["startpos", "moves", "e2e4", "e7e4", "g1f3"]).unwrap();
        // e7e4 is illegal; the position should stop right after e2e4.
        assert_eq!(board.turn(), corvid_core::Player::Black);
    }

    #[test]
    fn go_parses_clock_and_depth_independently() {
        let board = Board::start_pos();
        let limits = parse_go(&board, &["wtime", "60000", "btime", "60000", "winc", "1000", "binc", "1000"]);
        assert!(limits.clock.is_some());
        assert!(limits.depth.is_none());

        let limits = parse_go(&board, &["depth", "10"]);
        assert_eq!(limits.depth, Some(10));
        assert!(limits.clock.is_none());
    }
}
