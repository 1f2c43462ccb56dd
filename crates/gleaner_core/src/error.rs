//! # Error Types
//!
//! Errors surfaced by list handles and by configuration loading.

use std::path::PathBuf;

use thiserror::Error;

/// Usage errors on a pooled list handle.
///
/// These are contract violations detected synchronously. None of them leave
/// the pool in a corrupted state.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryError {
    /// Indexed read past the current element count.
    #[error("index {index} out of range for list of length {len}")]
    IndexOutOfRange {
        /// The requested position.
        index: usize,
        /// Number of elements in the list.
        len: usize,
    },

    /// The handle already gave its list back to the pool.
    #[error("list was already released to its pool")]
    Released,
}

/// Result type for list reads.
pub type QueryResult<T> = Result<T, QueryError>;

/// Errors that can occur while loading a [`PoolConfig`](crate::PoolConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The config file is not valid TOML for this schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The values parsed but are inconsistent.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;
