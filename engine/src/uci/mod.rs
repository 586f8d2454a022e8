//! The UCI command loop. Reads lines from stdin until `quit`; `go` hands
//! the actual search off to a background thread so `stop`/`ponderhit` can
//! still be read while a search is in flight, matching spec.md's "the
//! protocol never blocks on the engine" requirement.

pub mod parse;

use std::io::BufRead;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tracing::debug;

use corvid_core::Board;

use crate::config::EngineConfig;
use crate::search::eval::{evaluate, EvalContext};
use crate::tables::material::MaterialTable;
use crate::tables::pawn_table::PawnTable;
use crate::threadpool::ThreadPool;

use self::parse::{parse_go, parse_position};

const ENGINE_NAME: &str = "Corvid";
const ENGINE_AUTHOR: &str = "Corvid Contributors";

pub struct Uci {
    pool: Arc<Mutex<ThreadPool>>,
    config: EngineConfig,
    stop_flag: Arc<AtomicBool>,
    searching: Arc<AtomicBool>,
}

impl Uci {
    pub fn new(config: EngineConfig) -> Uci {
        let pool = ThreadPool::new(config.hash_mb, config.threads, config.move_overhead_ms);
        Uci {
            pool: Arc::new(Mutex::new(pool)),
            config,
            stop_flag: Arc::new(AtomicBool::new(false)),
            searching: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn run(&mut self) {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(l) => l,
                Err(_) => break,
            };
            if !self.dispatch(&line) {
                break;
            }
        }
    }

    /// Returns `false` only on `quit`; every other malformed or unknown
    /// command is logged at debug and otherwise swallowed, never written
    /// to stdout and never fatal.
    fn dispatch(&mut self, line: &str) -> bool {
        let line = line.trim();
        if line.is_empty() {
            return true;
        }
        if let Some(rest) = line.strip_prefix("setoption") {
            self.handle_setoption(rest.trim());
            return true;
        }

        let mut tokens = line.split_whitespace();
        let cmd = match tokens.next() {
            Some(c) => c,
            None => return true,
        };
        let args: Vec<&str> = tokens.collect();

        match cmd {
            "uci" => self.handle_uci(),
            "isready" => println!("readyok"),
            "ucinewgame" => self.pool.lock().unwrap().clear(),
            "position" => self.handle_position(&args),
            "go" => self.handle_go(&args),
            "stop" => self.stop_flag.store(true, Ordering::Relaxed),
            "ponderhit" => {} // an in-flight `go ponder` is already treated as infinite
            "debug" => {}     // accepted; verbosity is controlled by RUST_LOG instead
            "eval" => self.handle_eval(),
            "quit" => return false,
            other => debug!(command = other, "unrecognised UCI command"),
        }
        true
    }

    fn handle_uci(&self) {
        println!("id name {ENGINE_NAME}");
        println!("id author {ENGINE_AUTHOR}");
        println!("option name Hash type spin default {} min 1 max 33554432", self.config.hash_mb);
        println!("option name Threads type spin default {} min 1 max 256", self.config.threads);
        println!("option name MultiPV type spin default {} min 1 max 500", self.config.multi_pv);
        println!("option name Move Overhead type spin default {} min 0 max 5000", self.config.move_overhead_ms);
        println!("option name Ponder type check default {}", self.config.ponder);
        println!("option name SyzygyPath type string default {}", self.config.syzygy_path.clone().unwrap_or_default());
        println!("option name Syzygy50MoveRule type check default true");
        println!("option name SyzygyProbeLimit type spin default 7 min 0 max 7");
        println!("uciok");
    }

    /// `setoption name <words...> value <words...>`. The name can itself
    /// contain spaces ("Move Overhead"), so this is hand-parsed against
    /// the literal command text rather than split on whitespace first.
    fn handle_setoption(&mut self, rest: &str) {
        let name_start = match rest.find("name") {
            Some(i) => i + "name".len(),
            None => return,
        };
        let (name, value) = match rest[name_start..].find("value") {
            Some(vpos) => (rest[name_start..name_start + vpos].trim(), Some(rest[name_start + vpos + "value".len()..].trim())),
            None => (rest[name_start..].trim(), None),
        };

        let mut pool = self.pool.lock().unwrap();
        match name {
            "Hash" => {
                if let Some(mb) = value.and_then(|v| v.parse::<usize>().ok()) {
                    pool.resize_tt(mb);
                }
            }
            "Threads" => {
                if let Some(n) = value.and_then(|v| v.parse::<usize>().ok()) {
                    pool.resize_threads(n);
                }
            }
            "Move Overhead" => {
                if let Some(msec) = value.and_then(|v| v.parse::<i64>().ok()) {
                    pool.set_move_overhead(msec);
                }
            }
            "MultiPV" | "Ponder" | "SyzygyPath" | "Syzygy50MoveRule" | "SyzygyProbeLimit" => {
                // accepted for protocol completeness; no real tablebase or
                // multi-line PV reporting sits behind these yet.
                debug!(option = name, ?value, "option accepted, not yet wired to search");
            }
            other => debug!(option = other, "unknown UCI option"),
        }
    }

    fn handle_position(&mut self, args: &[&str]) {
        match parse_position(args) {
            Ok(board) => self.pool.lock().unwrap().set_position(board),
            Err(err) => debug!(%err, "bad position command"),
        }
    }

    fn handle_go(&mut self, args: &[&str]) {
        if self.searching.load(Ordering::Relaxed) {
            return;
        }
        let board = self.pool.lock().unwrap().position().clone();
        let limits = parse_go(&board, args);

        self.stop_flag.store(false, Ordering::Relaxed);
        self.searching.store(true, Ordering::Relaxed);

        let pool = self.pool.clone();
        let stop_flag = self.stop_flag.clone();
        let searching = self.searching.clone();
        std::thread::spawn(move || {
            let (best, ponder) = pool.lock().unwrap().go(limits, &stop_flag);
            searching.store(false, Ordering::Relaxed);
            match ponder {
                Some(p) if best.is_okay() => println!("bestmove {} ponder {}", best.stringify(), p.stringify()),
                _ if best.is_okay() => println!("bestmove {}", best.stringify()),
                _ => println!("bestmove 0000"),
            }
        });
    }

    fn handle_eval(&self) {
        let board = self.pool.lock().unwrap().position().clone();
        let mut ctx = EvalContext {
            pawn_table: &mut PawnTable::new(),
            material_table: &mut MaterialTable::new(),
        };
        let value = evaluate(&board, &mut ctx);
        println!("info string static eval {value}");
    }
}

/// One-shot, non-UCI invocation: search `board` to `depth` and print the
/// result, for the `corvid` binary's `--bench`/`--eval` flags.
pub fn bench(board: &Board, depth: u16, threads: usize, hash_mb: usize) {
    let mut pool = ThreadPool::new(hash_mb, threads, 10);
    pool.set_position(board.clone());
    let mut limits = crate::time::UciGoLimits::blank();
    limits.depth = Some(depth);
    let stop_flag = Arc::new(AtomicBool::new(false));
    let (best, _) = pool.go(limits, &stop_flag);
    println!("bestmove {}", best.stringify());
    println!("nodes {}", pool.total_nodes());
}
