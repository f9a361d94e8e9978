//! Error types for the HAL crate.

use thiserror::Error;

/// Errors that can occur while normalizing backend results.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HalError {
    /// The raw result cannot be interpreted.
    #[error("malformed backend result: {0}")]
    MalformedResult(String),

    /// A measured value does not fit in the declared qubit count.
    #[error("measured value {value} does not fit in {num_qubits} qubits")]
    ValueOutOfRange {
        /// The raw measured value.
        value: u64,
        /// Declared qubit count.
        num_qubits: u32,
    },

    /// The declared register width exceeds what a packed bitstring can
    /// carry.
    #[error("register width {num_qubits} exceeds the 64-bit packing limit")]
    RegisterTooWide {
        /// Declared qubit count.
        num_qubits: u32,
    },

    /// A backend feature required for conversion is not supported.
    #[error("unsupported: {0}")]
    Unsupported(String),
}

/// Result type for HAL operations.
pub type HalResult<T> = Result<T, HalError>;
