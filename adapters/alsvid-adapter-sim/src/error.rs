//! Error types for the local sampler.

use thiserror::Error;

/// Errors surfaced by the diagonal sampler.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SamplerError {
    /// The Hamiltonian contains X or Y terms; this sampler only handles
    /// cost Hamiltonians diagonal in the computational basis.
    #[error("Hamiltonian is not diagonal in the computational basis")]
    NonDiagonal,

    /// The full-enumeration sampler cannot handle this many qubits.
    #[error("{num_qubits} qubits exceeds the sampler limit of {max}")]
    TooManyQubits {
        /// Requested qubit count.
        num_qubits: u32,
        /// Sampler limit.
        max: u32,
    },

    /// A sampler must draw at least one shot.
    #[error("shot count must be at least 1")]
    NoShots,
}

/// Result type for sampler operations.
pub type SamplerResult<T> = Result<T, SamplerError>;
