//! Error types for the ising crate.

use thiserror::Error;

/// Errors produced by QUBO/Ising model construction and normalization.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IsingError {
    /// Unrecognized normalization mode string.
    #[error("invalid normalize_ising mode: {0:?} (expected \"abs_max\" or \"rms\")")]
    InvalidNormalization(String),

    /// A spin index referenced by a coefficient has no index-map entry.
    #[error("spin index {spin} has no entry in the index map")]
    DanglingSpinIndex {
        /// The offending spin index.
        spin: u32,
    },
}

/// Result type for ising operations.
pub type IsingResult<T> = Result<T, IsingError>;
