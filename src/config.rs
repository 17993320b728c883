//! Hierarchical configuration: built-in defaults, overridden by
//! `config.toml`, overridden by `config.local.toml`, overridden by
//! `GRAPHMATCH_`-prefixed environment variables, overridden last by
//! explicit CLI flags (§6, §10).

use crate::error::ConfigError;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchingConfig {
    pub sigma: f64,
    pub delta: f64,
    pub k: usize,
    pub bfs_depth: u16,
    pub parallelism: i64,
    pub n_iter: u32,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        MatchingConfig {
            sigma: 0.8,
            delta: 0.9,
            k: 999_999,
            bfs_depth: 3,
            parallelism: -1,
            n_iter: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "info".to_string(),
            format: LogFormat::Text,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub matching: MatchingConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Layers built-in defaults < `config.toml` < `config.local.toml` <
    /// `GRAPHMATCH_*` env vars. CLI overrides are applied by the caller
    /// after this returns, via [`Config::merge_cli`].
    pub fn load() -> Result<Self, ConfigError> {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file("config.toml"))
            .merge(Toml::file("config.local.toml"))
            .merge(Env::prefixed("GRAPHMATCH_").split("_"))
            .extract()
            .map_err(ConfigError::Load)
    }

    /// Applies CLI-supplied overrides, which take precedence over every
    /// other layer. Only `Some` fields override.
    pub fn merge_cli(mut self, cli: &crate::cli::Cli) -> Self {
        if let Some(sigma) = cli.sigma {
            self.matching.sigma = sigma;
        }
        if let Some(delta) = cli.delta {
            self.matching.delta = delta;
        }
        if let Some(k) = cli.k {
            self.matching.k = k;
        }
        if let Some(bfs_depth) = cli.bfs_depth {
            self.matching.bfs_depth = bfs_depth;
        }
        if let Some(parallelism) = cli.parallelism {
            self.matching.parallelism = parallelism;
        }
        if let Some(n_iter) = cli.n_iter {
            self.matching.n_iter = n_iter;
        }
        self
    }

    /// Resolves `parallelism`'s `-1` sentinel into an actual thread
    /// count: `ceil(hw_threads / local_ranks)` (§6).
    pub fn resolve_parallelism(&self, local_ranks: usize) -> usize {
        if self.matching.parallelism >= 0 {
            return self.matching.parallelism as usize;
        }
        let hw_threads = num_cpus::get();
        hw_threads.div_ceil(local_ranks.max(1))
    }
}
