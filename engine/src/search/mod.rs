//! Principal-variation search: iterative deepening with aspiration windows
//! at the root, alpha-beta with the full pruning suite at interior nodes,
//! and a capture-only quiescence search at the horizon. One [`Searcher`]
//! is owned by each worker thread; the transposition table and the
//! cooperative stop/time state are the only things shared between them.

pub mod eval;

use std::sync::atomic::{AtomicBool, AtomicI64, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use corvid_core::board::movegen::{generate, see_ge};
use corvid_core::core::mono_traits::{AllGenType, BlackType, WhiteType};
use corvid_core::core::score::{self, mate_in, mated_in, piecetype_value, Value};
use corvid_core::tools::tt::{self, Bound, TranspositionTable};
use corvid_core::{BitMove, Board, Piece, PieceType, Player};

use crate::consts::{NodeType, NonPV, MAX_MOVES_IN_STACK, PV};
use crate::endgame::tablebase::{TablebaseProber, WdlResult};
use crate::movepick::MovePicker;
use crate::root_moves::RootMoveList;
use crate::tables::butterfly::ButterflyHistory;
use crate::tables::capture_piece_history::CapturePieceToHistory;
use crate::tables::continuation::{ContinuationHistory, PieceToHistory};
use crate::tables::counter_move::CounterMoveHistory;
use crate::tables::material::MaterialTable;
use crate::tables::pawn_table::PawnTable;
use crate::time::uci_timer::UciGoLimits;

use self::eval::{evaluate, EvalContext};

const NODE_CHECK_MASK: u64 = 0xFFF; // check clocks/stop every 4096 nodes
const PROBCUT_MARGIN: Value = 200;

/// State shared by every thread in a single `go`: the stop flag the
/// driver and every searcher poll, and the node/time ceilings computed
/// once before the threads are released.
pub struct SharedLimits {
    pub start: Instant,
    pub stop: AtomicBool,
    pub hard_msec: AtomicI64,
    pub soft_msec: AtomicI64,
    pub node_limit: Option<u64>,
    pub depth_limit: Option<u16>,
    pub mate_limit: Option<u16>,
    pub infinite: bool,
}

impl SharedLimits {
    pub fn new(start: Instant) -> SharedLimits {
        SharedLimits {
            start,
            stop: AtomicBool::new(false),
            hard_msec: AtomicI64::new(i64::MAX),
            soft_msec: AtomicI64::new(i64::MAX),
            node_limit: None,
            depth_limit: None,
            mate_limit: None,
            infinite: false,
        }
    }

    pub fn elapsed_msec(&self) -> i64 {
        self.start.elapsed().as_millis() as i64
    }

    pub fn should_stop(&self) -> bool {
        self.stop.load(Ordering::Relaxed)
    }
}

#[derive(Clone, Default)]
struct Stack {
    pv: Vec<BitMove>,
    killers: [BitMove; 2],
    static_eval: Value,
    excluded: BitMove,
    moved_piece: Option<Piece>,
    moved_to: Option<corvid_core::SQ>,
}

/// One search worker. Everything here except `tt`/`shared`/`tb` is
/// private, per-thread state: its own position, its own move stack, its
/// own history tables, rebuilt fresh for every `go`.
pub struct Searcher {
    pub id: usize,
    pub board: Board,
    pub root_moves: RootMoveList,
    pub limits: UciGoLimits,
    pub nodes: AtomicU64,
    pub depth_completed: u16,
    pub sel_depth: u16,
    pub use_stdout: bool,

    tt: Arc<TranspositionTable>,
    tb: Arc<dyn TablebaseProber>,
    shared: Arc<SharedLimits>,

    stack: Vec<Stack>,
    butterfly: ButterflyHistory,
    capture_hist: CapturePieceToHistory,
    counter_moves: CounterMoveHistory,
    continuation: ContinuationHistory,
    pawn_table: PawnTable,
    material_table: MaterialTable,

    node_check_counter: u64,
    stable_iterations: u32,
    previous_best_move: BitMove,
}

impl Searcher {
    pub fn new(
        id: usize,
        tt: Arc<TranspositionTable>,
        tb: Arc<dyn TablebaseProber>,
        shared: Arc<SharedLimits>,
    ) -> Searcher {
        Searcher {
            id,
            board: Board::start_pos(),
            root_moves: RootMoveList::generate(&Board::start_pos(), None),
            limits: UciGoLimits::blank(),
            nodes: AtomicU64::new(0),
            depth_completed: 0,
            sel_depth: 0,
            use_stdout: id == 0,
            tt,
            tb,
            shared,
            stack: vec![Stack::default(); MAX_MOVES_IN_STACK],
            butterfly: ButterflyHistory::new(),
            capture_hist: CapturePieceToHistory::new(),
            counter_moves: CounterMoveHistory::new(),
            continuation: ContinuationHistory::new(),
            pawn_table: PawnTable::new(),
            material_table: MaterialTable::new(),
            node_check_counter: 0,
            stable_iterations: 0,
            previous_best_move: BitMove::null(),
        }
    }

    /// Drops every per-thread learned table; called on `ucinewgame`.
    pub fn clear(&mut self) {
        self.butterfly = ButterflyHistory::new();
        self.capture_hist = CapturePieceToHistory::new();
        self.counter_moves = CounterMoveHistory::new();
        self.continuation = ContinuationHistory::new();
        self.pawn_table = PawnTable::new();
        self.material_table = MaterialTable::new();
        self.previous_best_move = BitMove::null();
        self.stable_iterations = 0;
    }

    /// Rebinds this thread onto a freshly computed [`SharedLimits`] for the
    /// next `go`; `tt`/`tb` outlive many `go`s and get their own setters.
    pub fn set_shared(&mut self, shared: Arc<SharedLimits>) {
        self.shared = shared;
    }

    pub fn set_tt(&mut self, tt: Arc<TranspositionTable>) {
        self.tt = tt;
    }

    pub fn set_tb(&mut self, tb: Arc<dyn TablebaseProber>) {
        self.tb = tb;
    }

    fn should_stop(&self) -> bool {
        self.shared.should_stop()
    }

    /// Node-granularity cooperative poll: clocks, node ceiling, and the
    /// external stop flag are only ever checked here, never per-ply.
    fn check_time(&mut self) {
        self.node_check_counter += 1;
        if self.node_check_counter & NODE_CHECK_MASK != 0 {
            return;
        }
        if self.should_stop() {
            return;
        }
        if let Some(limit) = self.shared.node_limit {
            if self.nodes.load(Ordering::Relaxed) >= limit {
                self.shared.stop.store(true, Ordering::Relaxed);
                return;
            }
        }
        if self.id == 0 {
            let elapsed = self.shared.elapsed_msec();
            if elapsed >= self.shared.hard_msec.load(Ordering::Relaxed) {
                self.shared.stop.store(true, Ordering::Relaxed);
            }
        }
    }

    fn continuation_refs(&self, ply: u16) -> [Option<&PieceToHistory>; 2] {
        let mut out: [Option<&PieceToHistory>; 2] = [None, None];
        if ply >= 1 {
            let s = &self.stack[ply as usize - 1];
            if let (Some(piece), Some(to)) = (s.moved_piece, s.moved_to) {
                out[0] = Some(self.continuation.get(piece, to));
            }
        }
        if ply >= 2 {
            let s = &self.stack[ply as usize - 2];
            if let (Some(piece), Some(to)) = (s.moved_piece, s.moved_to) {
                out[1] = Some(self.continuation.get(piece, to));
            }
        }
        out
    }

    /// Every pseudo-legal move in the position, independent of in-check
    /// status; used only to turn a transposition-table packed move back
    /// into a fully-built [`BitMove`] (captured piece, check hint, ...).
    fn pseudo_legal_all(&self) -> corvid_core::MoveList {
        match self.board.turn() {
            Player::White => generate::<WhiteType, AllGenType>(&self.board),
            Player::Black => generate::<BlackType, AllGenType>(&self.board),
        }
    }

    fn tt_move_from_packed(&self, packed: u16) -> BitMove {
        if packed == 0 {
            return BitMove::null();
        }
        let (src, dest, promo) = tt::expand_move(packed);
        self.pseudo_legal_all()
            .iter()
            .copied()
            .find(|mv| mv.get_src() == src && mv.get_dest() == dest && mv.promotion() == promo)
            .unwrap_or(BitMove::null())
    }

    fn is_legal(&self, mv: BitMove) -> bool {
        mv.is_okay() && !self.board.leaves_own_king_in_check(mv)
    }

    // ---------------------------------------------------------------
    // Root driver
    // ---------------------------------------------------------------

    /// Diversifies helper threads' depth schedules so they don't all walk
    /// the identical tree as the main thread: thread `id` starts `id % 4`
    /// plies deep and occasionally skips an iteration, matching the
    /// grounding repo's Lazy-SMP perturbation.
    fn start_ply(&self) -> i16 {
        (self.id % 4) as i16
    }

    fn skips_this_depth(&self, depth: i16) -> bool {
        self.id != 0 && self.id % 2 == 1 && (depth as usize + self.id) % 3 == 0
    }

    pub fn search_root(&mut self) {
        self.stack = vec![Stack::default(); MAX_MOVES_IN_STACK];
        self.sel_depth = 0;
        self.node_check_counter = 0;

        if self.root_moves.is_empty() {
            self.depth_completed = 0;
            return;
        }

        let mut depth: i16 = self.start_ply();
        let mut best_value = score::NEG_INFINITE;

        while !self.should_stop() {
            depth += 1;
            if let Some(max_depth) = self.limits.depth {
                if depth as u16 > max_depth {
                    break;
                }
            }
            if depth as u16 >= crate::consts::MAX_PLY {
                break;
            }
            if self.skips_this_depth(depth) {
                continue;
            }

            for rm in self.root_moves.iter_mut() {
                rm.previous_score = rm.score;
            }

            let mut delta: Value = 18;
            let (mut alpha, mut beta) = if depth >= 5 {
                (
                    (best_value - delta).max(score::NEG_INFINITE),
                    (best_value + delta).min(score::INFINITE),
                )
            } else {
                (score::NEG_INFINITE, score::INFINITE)
            };

            loop {
                best_value = self.search_root_once(alpha, beta, depth);
                self.root_moves.sort();
                if self.should_stop() {
                    break;
                }
                if best_value <= alpha {
                    beta = (alpha + beta) / 2;
                    alpha = (best_value - delta).max(score::NEG_INFINITE);
                } else if best_value >= beta {
                    beta = (best_value + delta).min(score::INFINITE);
                } else {
                    break;
                }
                delta += delta / 2;
            }

            if self.should_stop() {
                break;
            }
            self.depth_completed = depth as u16;

            let current_best = self.root_moves.best().bit_move;
            if current_best == self.previous_best_move {
                self.stable_iterations += 1;
            } else {
                self.stable_iterations = 0;
            }
            self.previous_best_move = current_best;

            if self.use_stdout {
                self.report_iteration(depth, best_value);
            }

            if self.id == 0 && self.limits.use_time_management_active() {
                let soft = effective_soft_msec(self.shared.soft_msec.load(Ordering::Relaxed), self.stable_iterations);
                if self.shared.elapsed_msec() >= soft {
                    self.shared.stop.store(true, Ordering::Relaxed);
                    break;
                }
            }
        }

        // the main thread is the only one whose completion ends the `go`;
        // without this, a depth- or node-limited search that finishes
        // before any clock deadline would leave every thread (including
        // the pool's own coordinator loop) waiting on a stop flag nobody
        // ever sets.
        if self.id == 0 {
            self.shared.stop.store(true, Ordering::Relaxed);
        }
    }

    /// One full pass over the root move list at `depth`, PVS-ordered:
    /// the first move (already best-sorted from the previous iteration)
    /// gets the full window, every subsequent move a null-window probe
    /// with a full-window re-search on fail-high.
    fn search_root_once(&mut self, alpha: Value, beta: Value, depth: i16) -> Value {
        let mut alpha = alpha;
        let count = self.root_moves.len();
        let mut best_value = score::NEG_INFINITE;

        for idx in 0..count {
            if self.should_stop() {
                break;
            }
            let mv = self.root_moves[idx].bit_move;
            let gives_check = mv.gives_check_hint();

            self.stack[0].moved_piece = Some(mv.moving_piece());
            self.stack[0].moved_to = Some(mv.get_dest());
            self.board.apply_move(mv);
            self.nodes.fetch_add(1, Ordering::Relaxed);
            self.tt.prefetch(self.board.zobrist());

            let new_depth = depth - 1 + self.check_extension(gives_check, true);
            let value = if idx == 0 {
                -self.search::<PV>(-beta, -alpha, new_depth, 1, false)
            } else {
                let reduced = -self.search::<NonPV>(-alpha - 1, -alpha, new_depth, 1, true);
                if reduced > alpha && reduced < beta {
                    -self.search::<PV>(-beta, -alpha, new_depth, 1, false)
                } else {
                    reduced
                }
            };
            self.board.undo_move(mv);

            if self.should_stop() {
                break;
            }

            let rm = &mut self.root_moves[idx];
            rm.score = value;
            if idx == 0 || value > alpha {
                rm.pv.clear();
                rm.pv.push(mv);
                rm.pv.extend_from_slice(&self.stack[1].pv);
                rm.sel_depth = self.sel_depth;
            }
            if value > best_value {
                best_value = value;
            }
            if value > alpha {
                alpha = value;
            }
            if alpha >= beta {
                break;
            }
        }

        best_value
    }

    fn report_iteration(&self, depth: i16, value: Value) {
        let elapsed = self.shared.elapsed_msec().max(1);
        let nodes = self.nodes.load(Ordering::Relaxed);
        let nps = nodes * 1000 / elapsed as u64;
        let best = self.root_moves.best();
        let pv: String = best
            .pv
            .iter()
            .map(|m| m.stringify())
            .collect::<Vec<_>>()
            .join(" ");
        println!(
            "info depth {} seldepth {} score {} nodes {} nps {} time {} pv {}",
            depth,
            self.sel_depth.max(depth as u16),
            score_to_uci(value),
            nodes,
            nps,
            elapsed,
            pv
        );
    }

    fn check_extension(&self, gives_check: bool, see_nonneg: bool) -> i16 {
        if gives_check && see_nonneg {
            1
        } else {
            0
        }
    }

    // ---------------------------------------------------------------
    // Interior search
    // ---------------------------------------------------------------

    fn search<N: NodeType>(&mut self, alpha: Value, beta: Value, depth: i16, ply: u16, cut_node: bool) -> Value {
        if depth <= 0 {
            return self.qsearch::<N>(alpha, beta, ply);
        }

        self.check_time();
        if self.should_stop() {
            return score::ZERO;
        }

        if N::PV {
            self.sel_depth = self.sel_depth.max(ply + 1);
        }
        self.stack[ply as usize].pv.clear();

        if ply > 0 {
            if self.board.is_draw() {
                return score::DRAW;
            }
            // mate-distance pruning
            let alpha = alpha.max(mated_in(ply));
            let beta = beta.min(mate_in(ply + 1));
            if alpha >= beta {
                return alpha;
            }
        }
        let mut alpha = alpha;
        let beta = beta;

        let in_check = self.board.in_check();
        let key = self.board.zobrist();
        let (tt_hit, tt_entry_copy) = {
            let (hit, entry) = self.tt.probe(key);
            (hit, *entry)
        };
        let tt_value = if tt_hit {
            tt::value_from_tt(tt_entry_copy.value(), ply as i32)
        } else {
            score::NONE
        };
        let tt_move = if tt_hit {
            self.tt_move_from_packed(tt_entry_copy.packed_move())
        } else {
            BitMove::null()
        };

        if !N::PV
            && tt_hit
            && tt_entry_copy.depth() as i16 >= depth
            && tt_value != score::NONE
            && tt_bound_allows(tt_entry_copy.bound(), tt_value, beta)
        {
            return tt_value;
        }

        // tablebase probe: only at non-root, only when shallow enough and
        // the position can't zero out from under the stored result.
        if ply > 0
            && self.board.halfmove_clock() == 0
            && total_piece_count(&self.board) <= self.tb.max_pieces()
        {
            if let Some(wdl) = self.tb.probe_wdl(&self.board) {
                let value = match wdl {
                    WdlResult::Loss => mated_in(ply),
                    WdlResult::BlessedLoss => score::DRAW - 1,
                    WdlResult::Draw => score::DRAW,
                    WdlResult::CursedWin => score::DRAW + 1,
                    WdlResult::Win => mate_in(ply),
                };
                let bound = if value <= score::DRAW { Bound::Upper } else { Bound::Lower };
                if value == score::DRAW || tt_bound_allows(bound, value, beta) {
                    self.store_tt(key, value, bound, (depth.max(1)) as u8, BitMove::null(), value, ply);
                    return value;
                }
            }
        }

        let static_eval = if in_check {
            score::NONE
        } else if tt_hit && tt_entry_copy.eval() != score::NONE {
            tt_entry_copy.eval()
        } else {
            let mut ctx = EvalContext {
                pawn_table: &mut self.pawn_table,
                material_table: &mut self.material_table,
            };
            evaluate(&self.board, &mut ctx)
        };
        self.stack[ply as usize].static_eval = static_eval;

        let improving = ply >= 2 && !in_check && static_eval > self.stack[ply as usize - 2].static_eval;

        if !in_check && !N::PV {
            // razoring
            if depth <= 3 && static_eval + razor_margin(depth) <= alpha {
                let value = self.qsearch::<NonPV>(alpha, alpha + 1, ply);
                if value <= alpha {
                    return value;
                }
            }

            // reverse futility / static null move
            if depth <= 8 && static_eval - futility_margin(depth, improving) >= beta && static_eval < score::MATE_IN_MAX_PLY {
                return static_eval;
            }

            // null-move pruning
            if depth >= 3
                && static_eval >= beta
                && self.stack[ply as usize].excluded.is_null()
                && !self.is_pawn_only_endgame()
            {
                let r = 3 + depth / 4 + (((static_eval - beta) / 200).min(3) as i16);
                self.board.apply_null_move();
                let null_value = -self.search::<NonPV>(-beta, -beta + 1, depth - r - 1, ply + 1, !cut_node);
                self.board.undo_null_move();
                if self.should_stop() {
                    return score::ZERO;
                }
                if null_value >= beta {
                    if null_value >= score::MATE_IN_MAX_PLY {
                        return beta;
                    }
                    return null_value;
                }
            }

            // ProbCut: a handful of good captures get a cheap shallow look
            // with the window raised by a margin; if one still fails high
            // there, the full-depth search almost certainly would too.
            if depth >= 5 && beta < score::MATE_IN_MAX_PLY {
                let probcut_beta = beta + PROBCUT_MARGIN;
                let probcut_depth = depth - 4;
                let probcut_continuation = self.continuation_refs(ply);
                let probcut_candidates: Vec<BitMove> = MovePicker::new(
                    &self.board,
                    tt_move,
                    [BitMove::null(), BitMove::null()],
                    BitMove::null(),
                    self.stack[ply as usize].excluded,
                    &self.butterfly,
                    &self.capture_hist,
                    probcut_continuation,
                )
                .filter(|mv| mv.is_capture_or_promotion())
                .collect();

                for mv in probcut_candidates {
                    if !self.is_legal(mv) {
                        continue;
                    }
                    if !see_ge(&self.board, mv, probcut_beta - static_eval) {
                        continue;
                    }
                    self.board.apply_move(mv);
                    self.nodes.fetch_add(1, Ordering::Relaxed);
                    let value = -self.search::<NonPV>(-probcut_beta, -probcut_beta + 1, probcut_depth, ply + 1, !cut_node);
                    self.board.undo_move(mv);
                    if self.should_stop() {
                        return score::ZERO;
                    }
                    if value >= probcut_beta {
                        return value;
                    }
                }
            }
        }

        // internal iterative reduction: no hash move at a depth worth one
        // means this node was never the PV or never caused a cutoff before;
        // search it one ply shallower rather than spending full depth on a
        // move order we can't trust yet.
        let depth = if tt_move.is_null() && depth >= 6 && (N::PV || cut_node) { depth - 1 } else { depth };

        let continuation = self.continuation_refs(ply);
        let (killer0, killer1) = (self.stack[ply as usize].killers[0], self.stack[ply as usize].killers[1]);
        let counter_move = self.counter_move_for(ply);
        let excluded = self.stack[ply as usize].excluded;

        let picker = MovePicker::new(
            &self.board,
            tt_move,
            [killer0, killer1],
            counter_move,
            excluded,
            &self.butterfly,
            &self.capture_hist,
            continuation,
        );
        let candidates: Vec<BitMove> = picker.collect();

        let mut best_value = score::NEG_INFINITE;
        let mut best_move = BitMove::null();
        let orig_alpha = alpha;
        let mut move_count: u32 = 0;
        let mut quiets_tried: Vec<BitMove> = Vec::new();

        for mv in candidates {
            if mv == excluded || !self.is_legal(mv) {
                continue;
            }
            move_count += 1;

            let is_capture = mv.is_capture_or_promotion();
            let gives_check = mv.gives_check_hint();
            let is_quiet = !is_capture && !gives_check;

            if !in_check && !N::PV && best_value > score::MATED_IN_MAX_PLY {
                // late-move pruning of quiets
                if is_quiet && move_count as i32 > late_move_count(depth, improving) {
                    continue;
                }
                // futility pruning of quiets
                if is_quiet && depth <= 6 && static_eval + futility_move_margin(depth) <= alpha {
                    continue;
                }
                // SEE pruning near the horizon
                if depth <= 7 && !see_ge(&self.board, mv, see_prune_threshold(depth, is_quiet)) {
                    continue;
                }
            }

            // singular extension / multi-cut on the stored hash move
            let mut extension: i16 = self.check_extension(gives_check, see_ge(&self.board, mv, 0));
            if extension == 0
                && move_count == 1
                && mv == tt_move
                && !tt_move.is_null()
                && depth >= 8
                && tt_entry_copy.depth() as i16 >= depth - 3
                && matches!(tt_entry_copy.bound(), Bound::Lower | Bound::Exact)
                && excluded.is_null()
            {
                let singular_beta = tt_value - 2 * depth as Value;
                self.stack[ply as usize].excluded = mv;
                let value = self.search::<NonPV>(singular_beta - 1, singular_beta, depth / 2, ply, cut_node);
                self.stack[ply as usize].excluded = BitMove::null();
                if value < singular_beta {
                    extension = 1;
                } else if singular_beta >= beta {
                    // multi-cut: the reduced search says several moves beat rbeta
                    return singular_beta;
                }
            }

            self.stack[ply as usize].moved_piece = Some(mv.moving_piece());
            self.stack[ply as usize].moved_to = Some(mv.get_dest());
            self.board.apply_move(mv);
            self.nodes.fetch_add(1, Ordering::Relaxed);
            self.tt.prefetch(self.board.zobrist());

            let new_depth = depth - 1 + extension;
            let gives_check_now = self.board.in_check();

            let value = if move_count == 1 {
                -self.search::<N>(-beta, -alpha, new_depth, ply + 1, false)
            } else {
                let reduction = if is_quiet && depth >= 3 && move_count > 1 {
                    lmr_reduction(N::PV, improving, depth, move_count)
                } else {
                    0
                };
                let reduced_depth = (new_depth - reduction).max(1);
                let mut v = -self.search::<NonPV>(-alpha - 1, -alpha, reduced_depth, ply + 1, true);
                if v > alpha && reduction > 0 {
                    v = -self.search::<NonPV>(-alpha - 1, -alpha, new_depth, ply + 1, !cut_node);
                }
                if v > alpha && N::PV {
                    v = -self.search::<N>(-beta, -alpha, new_depth, ply + 1, false);
                }
                v
            };
            let _ = gives_check_now;

            self.board.undo_move(mv);

            if self.should_stop() {
                return score::ZERO;
            }

            if is_quiet {
                quiets_tried.push(mv);
            }

            if value > best_value {
                best_value = value;
                best_move = mv;
                if N::PV {
                    let child_pv = self.stack[ply as usize + 1].pv.clone();
                    let line = &mut self.stack[ply as usize].pv;
                    line.clear();
                    line.push(mv);
                    line.extend_from_slice(&child_pv);
                }
            }
            if value > alpha {
                alpha = value;
            }
            if alpha >= beta {
                self.update_stats_on_cutoff(mv, &quiets_tried, depth, ply, is_capture);
                break;
            }
        }

        if move_count == 0 {
            return if excluded.is_null() {
                if in_check {
                    mated_in(ply)
                } else {
                    score::DRAW
                }
            } else {
                alpha
            };
        }

        let bound = if best_value >= beta {
            Bound::Lower
        } else if N::PV && best_value > orig_alpha {
            Bound::Exact
        } else {
            Bound::Upper
        };
        if excluded.is_null() {
            self.store_tt(key, best_value, bound, depth as u8, best_move, static_eval, ply);
        }
        best_value
    }

    fn counter_move_for(&self, ply: u16) -> BitMove {
        if ply == 0 {
            return BitMove::null();
        }
        let prev = &self.stack[ply as usize - 1];
        match (prev.moved_piece, prev.moved_to) {
            (Some(piece), Some(to)) => self.counter_moves.get(piece, to),
            _ => BitMove::null(),
        }
    }

    fn update_stats_on_cutoff(&mut self, cutting_move: BitMove, quiets_tried: &[BitMove], depth: i16, ply: u16, is_capture: bool) {
        let depth_u8 = depth.clamp(1, 63) as u8;
        let us = self.board.turn();
        if !is_capture {
            let stack_entry = &mut self.stack[ply as usize];
            if stack_entry.killers[0] != cutting_move {
                stack_entry.killers[1] = stack_entry.killers[0];
                stack_entry.killers[0] = cutting_move;
            }
            self.butterfly.update(us, cutting_move, depth_u8, true);
            for q in quiets_tried {
                if *q != cutting_move {
                    self.butterfly.update(us, *q, depth_u8, false);
                }
            }
            if ply >= 1 {
                let prev = &self.stack[ply as usize - 1];
                if let (Some(piece), Some(to)) = (prev.moved_piece, prev.moved_to) {
                    self.counter_moves.set(piece, to, cutting_move);
                    self.continuation.update(piece, to, cutting_move, depth_u8, true);
                    for q in quiets_tried {
                        if *q != cutting_move {
                            self.continuation.update(piece, to, *q, depth_u8, false);
                        }
                    }
                }
            }
        } else {
            self.capture_hist.update(
                cutting_move.moving_piece(),
                cutting_move.get_dest(),
                cutting_move.captured_piece(),
                depth_u8,
                true,
            );
        }
    }

    fn store_tt(&self, key: u64, value: Value, bound: Bound, depth: u8, best_move: BitMove, eval: Value, ply: u16) {
        let key16 = (key >> 48) as u16;
        let packed = tt::compact_move(best_move);
        let stored_value = tt::value_to_tt(value, ply as i32);
        let (_, entry) = self.tt.probe(key);
        entry.place(key16, stored_value, bound, depth, packed, eval, self.tt.generation());
    }

    fn is_pawn_only_endgame(&self) -> bool {
        let us = self.board.turn();
        let non_pawn = corvid_core::core::ALL_PIECE_TYPES
            .iter()
            .filter(|&&pt| pt != PieceType::P && pt != PieceType::K)
            .map(|&pt| self.board.piece_count(us, pt))
            .sum::<u8>();
        non_pawn == 0
    }

    // ---------------------------------------------------------------
    // Quiescence search
    // ---------------------------------------------------------------

    fn qsearch<N: NodeType>(&mut self, alpha: Value, beta: Value, ply: u16) -> Value {
        self.check_time();
        if self.should_stop() {
            return score::ZERO;
        }
        if N::PV {
            self.sel_depth = self.sel_depth.max(ply + 1);
        }

        if self.board.is_draw() {
            return score::DRAW;
        }
        if ply as usize >= MAX_MOVES_IN_STACK - 1 {
            return self.quick_eval();
        }

        let mut alpha = alpha;
        let in_check = self.board.in_check();
        let key = self.board.zobrist();
        let (tt_hit, tt_copy) = {
            let (hit, entry) = self.tt.probe(key);
            (hit, *entry)
        };
        let tt_value = if tt_hit { tt::value_from_tt(tt_copy.value(), ply as i32) } else { score::NONE };
        if tt_hit && tt_value != score::NONE && tt_bound_allows(tt_copy.bound(), tt_value, beta) {
            return tt_value;
        }

        let static_eval = if in_check { score::NONE } else { self.quick_eval() };
        let mut best_value = if in_check { score::NEG_INFINITE } else { static_eval };
        if !in_check {
            if best_value >= beta {
                return best_value;
            }
            if best_value > alpha {
                alpha = best_value;
            }
        }

        let tt_move = if tt_hit { self.tt_move_from_packed(tt_copy.packed_move()) } else { BitMove::null() };
        let continuation = self.continuation_refs(ply);
        let picker = MovePicker::new(
            &self.board,
            tt_move,
            [BitMove::null(), BitMove::null()],
            BitMove::null(),
            BitMove::null(),
            &self.butterfly,
            &self.capture_hist,
            continuation,
        );

        let candidates: Vec<BitMove> = picker.collect();

        let mut best_move = BitMove::null();
        for mv in candidates {
            if !self.is_legal(mv) {
                continue;
            }
            if !in_check && !mv.is_capture_or_promotion() {
                continue;
            }
            if !in_check && !mv.gives_check_hint() {
                // delta pruning: even winning the captured piece outright can't reach alpha
                let gain = piecetype_value(mv.captured_piece(), false);
                if static_eval + gain + 200 <= alpha && !mv.is_promo() {
                    continue;
                }
                if !see_ge(&self.board, mv, 0) {
                    continue;
                }
            }

            self.board.apply_move(mv);
            self.nodes.fetch_add(1, Ordering::Relaxed);
            let value = -self.qsearch::<N>(-beta, -alpha, ply + 1);
            self.board.undo_move(mv);

            if self.should_stop() {
                return score::ZERO;
            }

            if value > best_value {
                best_value = value;
                best_move = mv;
                if value > alpha {
                    alpha = value;
                    if alpha >= beta {
                        break;
                    }
                }
            }
        }

        if in_check && best_move.is_null() && best_value == score::NEG_INFINITE {
            return mated_in(ply);
        }

        let bound = if best_value >= beta { Bound::Lower } else { Bound::Upper };
        self.store_tt(key, best_value, bound, 0, best_move, static_eval, ply);
        best_value
    }

    fn quick_eval(&mut self) -> Value {
        let mut ctx = EvalContext {
            pawn_table: &mut self.pawn_table,
            material_table: &mut self.material_table,
        };
        evaluate(&self.board, &mut ctx)
    }
}

fn tt_bound_allows(bound: Bound, tt_value: Value, beta: Value) -> bool {
    match bound {
        Bound::Exact => true,
        Bound::Lower => tt_value >= beta,
        Bound::Upper => tt_value < beta,
        Bound::None => false,
    }
}

fn total_piece_count(board: &Board) -> u32 {
    corvid_core::core::ALL_PIECE_TYPES
        .iter()
        .map(|&pt| board.piece_count(Player::White, pt) as u32 + board.piece_count(Player::Black, pt) as u32)
        .sum()
}

fn razor_margin(depth: i16) -> Value {
    200 + 180 * depth as Value
}

fn futility_margin(depth: i16, improving: bool) -> Value {
    let base = 150 * depth as Value;
    if improving {
        base - 50
    } else {
        base
    }
}

fn futility_move_margin(depth: i16) -> Value {
    100 + 90 * depth as Value
}

fn late_move_count(depth: i16, improving: bool) -> i32 {
    let d = depth as f64;
    if improving {
        (5.0 + 1.0 * d * d) as i32
    } else {
        (2.4 + 0.74 * d.powf(1.78)) as i32
    }
}

fn see_prune_threshold(depth: i16, is_quiet: bool) -> Value {
    if is_quiet {
        -80 * depth as Value
    } else {
        -20 * depth as Value * depth as Value
    }
}

/// Late-move reduction in plies: deeper, later, non-PV, non-improving
/// moves get reduced harder; never below zero.
fn lmr_reduction(is_pv: bool, improving: bool, depth: i16, move_count: u32) -> i16 {
    let d = (depth.max(1) as f64).ln();
    let m = (move_count.max(1) as f64).ln();
    let mut r = (0.5 + d * m / 2.25) as i16;
    if is_pv {
        r -= 1;
    }
    if !improving {
        r += 1;
    }
    r.clamp(0, depth.max(1) - 1)
}

/// Shrinks the broadcast soft deadline once the best move has held
/// steady for a few iterations in a row — mirrors
/// [`crate::time::TimeManager::ideal_with_stability`], applied here to
/// the deadline the thread pool already computed once for everyone.
fn effective_soft_msec(soft_msec: i64, stable_iterations: u32) -> i64 {
    if soft_msec == i64::MAX {
        return soft_msec;
    }
    let factor = (0.77_f64 + 0.03 * stable_iterations.min(10) as f64).min(1.0).max(0.5);
    (soft_msec as f64 * factor) as i64
}

fn score_to_uci(value: Value) -> String {
    if value >= score::MATE_IN_MAX_PLY {
        format!("mate {}", (score::MATE - value + 1) / 2)
    } else if value <= score::MATED_IN_MAX_PLY {
        format!("mate {}", -(score::MATE + value + 1) / 2)
    } else {
        format!("cp {}", value)
    }
}

impl UciGoLimits {
    /// Whether the clock-driven time manager is actually steering this
    /// search, as opposed to a fixed depth/nodes/movetime/infinite search.
    pub fn use_time_management_active(&self) -> bool {
        self.use_time_management().is_some()
    }
}
