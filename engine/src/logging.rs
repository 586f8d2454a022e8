//! `tracing` setup. UCI owns stdout — every byte written there must be a
//! protocol message the GUI can parse — so diagnostic logging goes to
//! stderr exclusively, at a level controlled by `RUST_LOG` (default `warn`).

use tracing_subscriber::EnvFilter;

pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
