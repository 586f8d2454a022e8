//! Entry point: parses a handful of startup flags, then either enters the
//! UCI command loop (the default and normal mode for any real GUI) or
//! runs a one-shot search for `--bench`, grounded in the sibling
//! `bot-arena` binary's `clap` derive entry point.

use clap::Parser;

use corvid_engine::config::EngineConfig;
use corvid_engine::uci::{bench, Uci};

#[derive(Parser)]
#[command(name = "corvid")]
#[command(about = "A UCI chess engine")]
struct Cli {
    /// Path to a TOML config file overriding the built-in defaults.
    #[arg(long)]
    config: Option<String>,

    /// Run one fixed-depth search on a FEN instead of entering the UCI
    /// loop; prints the best move and node count, then exits.
    #[arg(long)]
    bench: Option<String>,

    /// Search depth for `--bench`.
    #[arg(long, default_value_t = 10)]
    depth: u16,
}

fn main() {
    corvid_engine::logging::init();
    corvid_core::init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => EngineConfig::load(path).unwrap_or_else(|err| {
            tracing::warn!(%err, "falling back to default config");
            EngineConfig::default()
        }),
        None => EngineConfig::default(),
    };

    if let Some(fen) = cli.bench {
        let board = corvid_core::Board::from_fen(&fen).unwrap_or_else(|_| corvid_core::Board::start_pos());
        bench(&board, cli.depth, config.threads, config.hash_mb);
        return;
    }

    let mut uci = Uci::new(config);
    uci.run();
}
