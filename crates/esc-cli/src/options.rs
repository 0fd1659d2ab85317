//! `EngineOptions`: a single constructible, serializable configuration
//! object unifying the handful of named engine parameters, the
//! code-cache directory/threshold, and the recompile-logger toggle —
//! the one place a host embedder configures the pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `-doe` ("dump-on-error") is part of the default argv.
pub const DEFAULT_ARGV: &[&str] = &["-doe"];

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineOptions {
    pub code_cache_dir: Option<PathBuf>,
    pub code_cache_read_only: bool,
    pub code_cache_min_source_size: usize,
    pub recompile_logging: bool,
    pub default_argv: Vec<String>,
}

impl Default for EngineOptions {
    fn default() -> Self {
        EngineOptions {
            code_cache_dir: None,
            code_cache_read_only: false,
            code_cache_min_source_size: esc_cache::DEFAULT_MIN_SOURCE_SIZE,
            recompile_logging: false,
            default_argv: DEFAULT_ARGV.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_argv_includes_dump_on_error() {
        let opts = EngineOptions::default();
        assert_eq!(opts.default_argv, vec!["-doe".to_string()]);
    }

    #[test]
    fn round_trips_through_json() {
        let opts = EngineOptions { recompile_logging: true, ..EngineOptions::default() };
        let json = serde_json::to_string(&opts).unwrap();
        let back: EngineOptions = serde_json::from_str(&json).unwrap();
        assert!(back.recompile_logging);
    }
}
