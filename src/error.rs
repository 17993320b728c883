//! Crate Error Types
//!
//! One `thiserror` variant family per failure concern: configuration,
//! parsing, lookup, and cache-invariant violations. Every kind is fatal —
//! there are no transient or retryable conditions in this batch job.

use thiserror::Error;

/// Top-level error type returned by every fallible operation in this crate.
#[derive(Error, Debug)]
pub enum GraphMatchError {
    /// Missing/invalid CLI flag or unreadable input file.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Malformed input line, mismatched embedding dimension, duplicate
    /// vertex id, or an edge referencing an unknown endpoint.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// An external id referenced at query time was not found.
    #[error("lookup error: {0}")]
    Lookup(#[from] LookupError),

    /// A cache-coherence assertion failed. This indicates a programmer
    /// error in the SPair engine, not a data problem.
    #[error("internal invariant violated: {0}")]
    Invariant(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GraphMatchError>;

/// Configuration-time errors: bad flags, missing required files.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("required flag --{0} was not provided")]
    MissingFlag(&'static str),

    #[error("file not found for --{flag}: {path}")]
    FileNotFound { flag: &'static str, path: String },

    #[error("failed to load configuration: {0}")]
    Load(#[from] figment::Error),

    #[error("invalid query type: {0} (expected spair, spair_benchmark, vpair, vpair_benchmark, or apair)")]
    InvalidQueryType(String),
}

/// Errors parsing a specific input file. Carries the file name and the
/// 1-based line number so operators can find the offending line quickly.
#[derive(Error, Debug)]
#[error("{file}:{line}: {message}")]
pub struct ParseError {
    pub file: String,
    pub line: usize,
    pub message: String,
}

impl ParseError {
    pub fn new(file: impl Into<String>, line: usize, message: impl Into<String>) -> Self {
        ParseError {
            file: file.into(),
            line,
            message: message.into(),
        }
    }
}

/// Errors resolving an external id to an internal vertex at query time.
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("vertex with external id {oid} not found in graph {graph}")]
    UnknownVertex { graph: &'static str, oid: i64 },
}
