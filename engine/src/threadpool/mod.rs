//! The Lazy-SMP search driver. One [`Searcher`] per thread, kept alive
//! for the life of the engine so its history tables keep learning across
//! moves in the same game; each `go` borrows them into a
//! [`std::thread::scope`] rather than the grounding repo's long-lived
//! threads-plus-raw-pointers pool, since scoped threads get the same
//! "wake N workers, join them, read back the result" shape without
//! `unsafe`.

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Instant;

use corvid_core::tools::tt::TranspositionTable;
use corvid_core::{BitMove, Board};

use crate::endgame::tablebase::{NullProber, TablebaseProber};
use crate::root_moves::RootMoveList;
use crate::search::{SharedLimits, Searcher};
use crate::time::{TimeManager, UciGoLimits};

pub struct ThreadPool {
    tt: Arc<TranspositionTable>,
    tb: Arc<dyn TablebaseProber>,
    move_overhead_msec: i64,
    time_manager: TimeManager,
    board: Board,
    searchers: Vec<Searcher>,
}

impl ThreadPool {
    pub fn new(hash_mb: usize, num_threads: usize, move_overhead_msec: i64) -> ThreadPool {
        let tt = Arc::new(TranspositionTable::new(hash_mb));
        let tb: Arc<dyn TablebaseProber> = Arc::new(NullProber);
        let mut pool = ThreadPool {
            tt,
            tb,
            move_overhead_msec,
            time_manager: TimeManager::new(move_overhead_msec),
            board: Board::start_pos(),
            searchers: Vec::new(),
        };
        pool.resize_threads(num_threads.max(1));
        pool
    }

    pub fn resize_threads(&mut self, num_threads: usize) {
        let num_threads = num_threads.clamp(1, crate::consts::MAX_THREADS);
        let shared = Arc::new(SharedLimits::new(Instant::now()));
        self.searchers = (0..num_threads)
            .map(|id| Searcher::new(id, self.tt.clone(), self.tb.clone(), shared.clone()))
            .collect();
    }

    pub fn thread_count(&self) -> usize {
        self.searchers.len()
    }

    pub fn resize_tt(&mut self, hash_mb: usize) {
        self.tt.resize_to_megabytes(hash_mb);
    }

    pub fn set_move_overhead(&mut self, msec: i64) {
        self.move_overhead_msec = msec;
        self.time_manager = TimeManager::new(msec);
    }

    pub fn set_tablebase(&mut self, tb: Arc<dyn TablebaseProber>) {
        self.tb = tb.clone();
        for s in &mut self.searchers {
            s.set_tb(tb.clone());
        }
    }

    /// Drops every thread's learned history and the shared hash table;
    /// called on `ucinewgame`.
    pub fn clear(&mut self) {
        self.tt.clear();
        for s in &mut self.searchers {
            s.clear();
        }
    }

    pub fn set_position(&mut self, board: Board) {
        self.board = board;
    }

    pub fn position(&self) -> &Board {
        &self.board
    }

    pub fn hash_percent(&self) -> usize {
        self.tt.hash_percent()
    }

    /// Runs one `go` to completion (or until stopped): computes the
    /// soft/hard deadlines once up front, releases every thread onto the
    /// shared position concurrently, and returns the main thread's
    /// chosen move together with its second PV move to ponder on, if it
    /// has one.
    pub fn go(&mut self, limits: UciGoLimits, stop: &Arc<std::sync::atomic::AtomicBool>) -> (BitMove, Option<BitMove>) {
        let start = Instant::now();
        self.tt.new_search();

        let mut shared = SharedLimits::new(start);
        shared.node_limit = limits.nodes;
        shared.depth_limit = limits.depth;
        shared.mate_limit = limits.mate;
        shared.infinite = limits.infinite || limits.ponder;

        if let Some(clock) = limits.use_time_management() {
            self.time_manager.init(start, &clock, self.board.turn(), self.board.ply());
            shared.soft_msec = std::sync::atomic::AtomicI64::new(self.time_manager.ideal_msec());
            shared.hard_msec = std::sync::atomic::AtomicI64::new(self.time_manager.maximum_msec());
        } else if let Some(msec) = limits.move_time_msec {
            shared.soft_msec = std::sync::atomic::AtomicI64::new(msec as i64);
            shared.hard_msec = std::sync::atomic::AtomicI64::new(msec as i64);
        }
        let shared = Arc::new(shared);

        let restrict = if limits.search_moves.is_empty() { None } else { Some(limits.search_moves.as_slice()) };
        let root_moves = RootMoveList::generate(&self.board, restrict);

        for s in &mut self.searchers {
            s.set_shared(shared.clone());
            s.board = self.board.clone();
            s.root_moves = root_moves.clone();
            s.limits = limits.clone();
            s.depth_completed = 0;
            s.nodes = std::sync::atomic::AtomicU64::new(0);
        }

        std::thread::scope(|scope| {
            for s in &mut self.searchers {
                scope.spawn(move || s.search_root());
            }
            // the external `stop` command (or a ponderhit timeout) sets the
            // shared flag; workers poll it themselves every few thousand
            // nodes, so this loop just forwards it in without blocking.
            while !shared.should_stop() {
                if stop.load(Ordering::Relaxed) {
                    shared.stop.store(true, Ordering::Relaxed);
                    break;
                }
                std::thread::sleep(std::time::Duration::from_millis(1));
            }
        });

        let main = &self.searchers[0];
        if main.root_moves.is_empty() {
            return (BitMove::null(), None);
        }
        let best = main.root_moves.best();
        let ponder = best.pv.get(1).copied();
        (best.bit_move, ponder)
    }

    pub fn total_nodes(&self) -> u64 {
        self.searchers.iter().map(|s| s.nodes.load(Ordering::Relaxed)).sum()
    }
}
