//! The move-picker proper. Six stages for normal nodes: hash move, good
//! tacticals (positive-SEE captures and promotions, ordered MVV-LVA then
//! capture history), killers, the counter move, quiets ordered by history,
//! then the deferred bad (negative-SEE) tacticals. In-check nodes use a
//! shorter evasion-only pipeline.

use corvid_core::board::movegen::{generate, see_ge};
use corvid_core::core::mono_traits::{AllGenType, BlackType, CapturesGenType, EvasionsGenType, QuietsGenType, WhiteType};
use corvid_core::core::score::piecetype_value;
use corvid_core::{BitMove, Board, Player};

use crate::tables::butterfly::ButterflyHistory;
use crate::tables::capture_piece_history::CapturePieceToHistory;
use crate::tables::continuation::PieceToHistory;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum PickStage {
    TTMove,
    GenerateCaptures,
    GoodCaptures,
    Killers,
    CounterMove,
    GenerateQuiets,
    Quiets,
    BadCaptures,
    GenerateEvasions,
    Evasions,
    Done,
}

pub struct MovePicker<'a> {
    board: &'a Board,
    butterfly: &'a ButterflyHistory,
    capture_hist: &'a CapturePieceToHistory,
    continuation: [Option<&'a PieceToHistory>; 2],
    tt_move: BitMove,
    killers: [BitMove; 2],
    counter_move: BitMove,
    excluded: BitMove,
    stage: PickStage,
    in_check: bool,
    captures: Vec<(BitMove, i32)>,
    quiets: Vec<(BitMove, i32)>,
    bad_captures: Vec<(BitMove, i32)>,
    cursor: usize,
    all_pseudo_legal: Option<corvid_core::MoveList>,
}

impl<'a> MovePicker<'a> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        board: &'a Board,
        tt_move: BitMove,
        killers: [BitMove; 2],
        counter_move: BitMove,
        excluded: BitMove,
        butterfly: &'a ButterflyHistory,
        capture_hist: &'a CapturePieceToHistory,
        continuation: [Option<&'a PieceToHistory>; 2],
    ) -> MovePicker<'a> {
        let in_check = board.in_check();
        let tt_move = if tt_move.is_okay() && is_pseudo_legal_guess(board, tt_move) {
            tt_move
        } else {
            BitMove::null()
        };
        MovePicker {
            board,
            butterfly,
            capture_hist,
            continuation,
            tt_move,
            killers,
            counter_move,
            excluded,
            stage: PickStage::TTMove,
            in_check,
            captures: Vec::new(),
            quiets: Vec::new(),
            bad_captures: Vec::new(),
            cursor: 0,
            all_pseudo_legal: None,
        }
    }

    /// Killers and the counter move are read from per-ply/per-(piece,to)
    /// storage that can go stale across a different move order or a
    /// transposition into the same ply: the squares they reference may now
    /// hold different pieces, or none at all. Re-derive pseudo-legality
    /// against the *current* board, the way `tt_move_from_packed` already
    /// does for the hash move, instead of trusting `is_okay()` alone.
    fn is_pseudo_legal_now(&mut self, mv: BitMove) -> bool {
        if self.all_pseudo_legal.is_none() {
            self.all_pseudo_legal = Some(match self.board.turn() {
                Player::White => generate::<WhiteType, AllGenType>(self.board),
                Player::Black => generate::<BlackType, AllGenType>(self.board),
            });
        }
        self.all_pseudo_legal.as_ref().unwrap().iter().any(|&m| m == mv)
    }

    fn generate_pseudo(&self, gen: GenKind) -> corvid_core::MoveList {
        match (self.board.turn(), gen) {
            (Player::White, GenKind::Captures) => generate::<WhiteType, CapturesGenType>(self.board),
            (Player::Black, GenKind::Captures) => generate::<BlackType, CapturesGenType>(self.board),
            (Player::White, GenKind::Quiets) => generate::<WhiteType, QuietsGenType>(self.board),
            (Player::Black, GenKind::Quiets) => generate::<BlackType, QuietsGenType>(self.board),
            (Player::White, GenKind::Evasions) => generate::<WhiteType, EvasionsGenType>(self.board),
            (Player::Black, GenKind::Evasions) => generate::<BlackType, EvasionsGenType>(self.board),
        }
    }

    fn score_captures(&mut self) {
        for &mv in self.generate_pseudo(GenKind::Captures).iter() {
            if mv == self.tt_move || mv == self.excluded {
                continue;
            }
            let mvv = piecetype_value(mv.captured_piece(), false) * 16;
            let hist = self.capture_hist.get(mv.moving_piece(), mv.get_dest(), mv.captured_piece()) as i32;
            self.captures.push((mv, mvv + hist));
        }
    }

    fn score_quiets(&mut self) {
        for &mv in self.generate_pseudo(GenKind::Quiets).iter() {
            if mv == self.tt_move || mv == self.excluded || mv == self.killers[0] || mv == self.killers[1] || mv == self.counter_move {
                continue;
            }
            let mut score = self.butterfly.get(self.board.turn(), mv) as i32;
            for cont in self.continuation.iter().flatten() {
                score += cont.get(mv.moving_piece(), mv.get_dest()) as i32;
            }
            self.quiets.push((mv, score));
        }
    }

    fn score_evasions(&mut self) {
        for &mv in self.generate_pseudo(GenKind::Evasions).iter() {
            if mv == self.excluded {
                continue;
            }
            let score = if mv.is_capture() {
                1_000_000 + piecetype_value(mv.captured_piece(), false) * 16
                    - piecetype_value(mv.moving_piece().type_of(), false)
            } else {
                self.butterfly.get(self.board.turn(), mv) as i32
            };
            self.captures.push((mv, score));
        }
    }

    fn pop_best(buf: &mut Vec<(BitMove, i32)>, cursor: &mut usize) -> Option<BitMove> {
        if *cursor >= buf.len() {
            return None;
        }
        let mut best = *cursor;
        for i in (*cursor + 1)..buf.len() {
            if buf[i].1 > buf[best].1 {
                best = i;
            }
        }
        buf.swap(*cursor, best);
        let mv = buf[*cursor].0;
        *cursor += 1;
        Some(mv)
    }
}

enum GenKind {
    Captures,
    Quiets,
    Evasions,
}

fn is_pseudo_legal_guess(board: &Board, mv: BitMove) -> bool {
    // a cheap sanity check; the caller still legality-filters via apply_move's
    // own bookkeeping, this just avoids wasting the TT move slot on garbage
    // left over from a hash collision.
    board.piece_at(mv.get_src()).player() == Some(board.turn())
}

impl<'a> Iterator for MovePicker<'a> {
    type Item = BitMove;

    fn next(&mut self) -> Option<BitMove> {
        loop {
            match self.stage {
                PickStage::TTMove => {
                    self.stage = if self.in_check { PickStage::GenerateEvasions } else { PickStage::GenerateCaptures };
                    if self.tt_move.is_okay() && self.tt_move != self.excluded {
                        return Some(self.tt_move);
                    }
                }
                PickStage::GenerateEvasions => {
                    self.score_evasions();
                    self.stage = PickStage::Evasions;
                }
                PickStage::Evasions => {
                    if let Some(mv) = Self::pop_best(&mut self.captures, &mut self.cursor) {
                        if mv != self.tt_move {
                            return Some(mv);
                        }
                    } else {
                        self.stage = PickStage::Done;
                    }
                }
                PickStage::GenerateCaptures => {
                    self.score_captures();
                    self.stage = PickStage::GoodCaptures;
                }
                PickStage::GoodCaptures => {
                    if self.cursor < self.captures.len() {
                        let peek_idx = {
                            let mut best = self.cursor;
                            for i in (self.cursor + 1)..self.captures.len() {
                                if self.captures[i].1 > self.captures[best].1 {
                                    best = i;
                                }
                            }
                            best
                        };
                        let (mv, _) = self.captures[peek_idx];
                        if see_ge(self.board, mv, -10) {
                            self.captures.swap(self.cursor, peek_idx);
                            self.cursor += 1;
                            return Some(mv);
                        } else {
                            // defer: losing captures are tried after quiets, not before
                            self.captures.swap(peek_idx, self.captures.len() - 1);
                            let bad = self.captures.pop().unwrap();
                            self.bad_captures.push(bad);
                        }
                    } else {
                        self.stage = PickStage::Killers;
                    }
                }
                PickStage::Killers => {
                    self.stage = PickStage::CounterMove;
                    for k in self.killers {
                        if k.is_okay()
                            && k != self.tt_move
                            && k != self.excluded
                            && !k.is_capture()
                            && self.is_pseudo_legal_now(k)
                        {
                            return Some(k);
                        }
                    }
                }
                PickStage::CounterMove => {
                    self.stage = PickStage::GenerateQuiets;
                    let c = self.counter_move;
                    if c.is_okay()
                        && c != self.tt_move
                        && c != self.killers[0]
                        && c != self.killers[1]
                        && c != self.excluded
                        && self.is_pseudo_legal_now(c)
                    {
                        return Some(c);
                    }
                }
                PickStage::GenerateQuiets => {
                    self.score_quiets();
                    self.cursor = 0;
                    self.stage = PickStage::Quiets;
                }
                PickStage::Quiets => {
                    if let Some(mv) = Self::pop_best(&mut self.quiets, &mut self.cursor) {
                        return Some(mv);
                    } else {
                        self.cursor = 0;
                        self.stage = PickStage::BadCaptures;
                    }
                }
                PickStage::BadCaptures => {
                    if let Some(mv) = Self::pop_best(&mut self.bad_captures, &mut self.cursor) {
                        return Some(mv);
                    } else {
                        self.stage = PickStage::Done;
                    }
                }
                PickStage::Done => return None,
            }
        }
    }
}
