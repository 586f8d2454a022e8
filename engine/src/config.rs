//! Engine configuration: defaults for the options UCI's `setoption` can
//! then override at runtime. Loaded once at startup from an optional TOML
//! file (`--config path/to/file.toml`), falling back to built-in defaults
//! when absent.

use serde::Deserialize;

use crate::consts::DEFAULT_TT_SIZE_MB;
use crate::error::ConfigError;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub threads: usize,
    pub hash_mb: usize,
    pub ponder: bool,
    pub multi_pv: usize,
    pub move_overhead_ms: i64,
    pub syzygy_path: Option<String>,
}

impl Default for EngineConfig {
    /// Thread count defaults to the number of logical CPUs, the same
    /// starting point the grounding repo's `Threads` UCI option uses,
    /// rather than a fixed constant that would leave most machines idle.
    fn default() -> Self {
        EngineConfig {
            threads: num_cpus::get(),
            hash_mb: DEFAULT_TT_SIZE_MB,
            ponder: false,
            multi_pv: 1,
            move_overhead_ms: 10,
            syzygy_path: None,
        }
    }
}

impl EngineConfig {
    pub fn load(path: &str) -> Result<EngineConfig, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_string(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_string(),
            source,
        })
    }
}
