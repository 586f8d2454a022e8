//! Errors surfaced while handling UCI input or loading configuration.
//! Search itself never returns `Result` — a position either searches or
//! the process has a bug.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("position setup failed: {0}")]
    Position(#[from] corvid_core::error::FenError),

    #[error("couldn't parse move text: {0}")]
    MoveParse(#[from] corvid_core::error::MoveParseError),

    #[error("unrecognised UCI command: {0}")]
    UnknownCommand(String),

    #[error("unknown UCI option: {0}")]
    UnknownOption(String),

    #[error("bad value \"{value}\" for option \"{name}\"")]
    BadOptionValue { name: String, value: String },

    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("couldn't read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("couldn't parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}
