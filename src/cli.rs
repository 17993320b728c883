//! The crate's CLI surface (§6, §10): a `clap`-derived argument struct
//! using this ecosystem's idiomatic `--long-flag` spelling of the
//! original single-dash gflags names. Names and defaults are otherwise
//! unchanged — see DESIGN.md for the exact flag-by-flag mapping.

use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "snake_case")]
pub enum QueryType {
    Spair,
    SpairBenchmark,
    Vpair,
    VpairBenchmark,
    Apair,
}

#[derive(Debug, Parser)]
#[command(name = "graphmatch", about = "Semantic graph matching between a query graph and a target graph")]
pub struct Cli {
    #[arg(long, value_enum)]
    pub query_type: QueryType,

    /// Query graph (G_D) vertex file.
    #[arg(long)]
    pub gd_vfile: String,
    /// Query graph (G_D) edge file.
    #[arg(long)]
    pub gd_efile: String,
    /// Target graph (G) vertex file.
    #[arg(long)]
    pub g_vfile: String,
    /// Target graph (G) edge file.
    #[arg(long)]
    pub g_efile: String,
    /// Source labels allowed to start a match in G_D.
    #[arg(long)]
    pub gd_slabel_file: String,
    /// Source labels allowed to start a match in G.
    #[arg(long)]
    pub g_slabel_file: String,

    #[arg(long)]
    pub synonym_file: Option<String>,
    #[arg(long)]
    pub embedding_file: Option<String>,
    #[arg(long)]
    pub desc_file: Option<String>,
    #[arg(long)]
    pub path_file: Option<String>,
    #[arg(long)]
    pub vpair_sources_file: Option<String>,

    #[arg(long)]
    pub sigma: Option<f64>,
    #[arg(long)]
    pub delta: Option<f64>,
    #[arg(long)]
    pub k: Option<usize>,
    #[arg(long)]
    pub parallelism: Option<i64>,
    #[arg(long)]
    pub bfs_depth: Option<u16>,
    #[arg(long)]
    pub n_iter: Option<u32>,

    /// External vertex id in G_D, required by `spair`/`vpair`.
    #[arg(long)]
    pub vertex_u: Option<i64>,
    /// External vertex id in G, required by `spair`.
    #[arg(long)]
    pub vertex_v: Option<i64>,

    /// Output directory, required by `apair`.
    #[arg(long)]
    pub out_prefix: Option<String>,
}

impl Cli {
    /// Per-query-type required-flag validation that clap's static
    /// schema can't express (different query types need different
    /// flags; see §7 Configuration errors).
    pub fn validate(&self) -> Result<(), crate::error::ConfigError> {
        use crate::error::ConfigError::MissingFlag;
        match self.query_type {
            QueryType::Spair => {
                if self.vertex_u.is_none() {
                    return Err(MissingFlag("vertex-u"));
                }
                if self.vertex_v.is_none() {
                    return Err(MissingFlag("vertex-v"));
                }
            }
            QueryType::Vpair => {
                if self.vertex_u.is_none() {
                    return Err(MissingFlag("vertex-u"));
                }
            }
            QueryType::VpairBenchmark => {
                if self.vertex_u.is_none() && self.vpair_sources_file.is_none() {
                    return Err(MissingFlag("vertex-u"));
                }
            }
            QueryType::SpairBenchmark | QueryType::Apair => {
                if self.query_type == QueryType::Apair && self.out_prefix.is_none() {
                    return Err(MissingFlag("out-prefix"));
                }
            }
        }
        Ok(())
    }
}
