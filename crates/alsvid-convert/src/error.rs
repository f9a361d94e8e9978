//! Error types for the convert crate.

use thiserror::Error;

/// Errors surfaced by encode and decode operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConvertError {
    /// QUBO reduction or sample evaluation failed.
    #[error(transparent)]
    Model(#[from] alsvid_model::ModelError),

    /// Ising model construction or normalization-mode parsing failed.
    #[error(transparent)]
    Ising(#[from] alsvid_ising::IsingError),

    /// Backend result normalization failed.
    #[error(transparent)]
    Hal(#[from] alsvid_hal::HalError),

    /// A measured bit position has no index-map entry. This means the
    /// result was decoded against a stale or mismatched Ising model and is
    /// a fatal logic error, never ignored.
    #[error("bit position {spin} has no index-map entry in the cached Ising model")]
    IndexMapMissing {
        /// The spin index of the unmapped bit.
        spin: u32,
    },

    /// A QUBO index in the index map has no decision-variable metadata.
    #[error("QUBO index {index} does not correspond to any decision variable")]
    UnknownVariable {
        /// The unmapped QUBO variable index.
        index: u32,
    },

    /// Internal invariant guard: the encode state machine was expected to
    /// be in `Encoded`.
    #[error("converter is not encoded")]
    NotEncoded,
}

/// Result type for conversion operations.
pub type ConvertResult<T> = Result<T, ConvertError>;
