//! `alsvid-adapter-sim` — local sampling backend for Alsvid.
//!
//! Provides a [`DiagonalSampler`] that draws measurement shots from a
//! Boltzmann distribution over the eigenvalues of a diagonal cost
//! Hamiltonian, and a [`SimTranspiler`] that feeds its raw counts into the
//! decode pipeline. Intended for testing converters end to end without a
//! quantum backend.

pub mod error;
pub mod sampler;
pub mod transpiler;

pub use error::{SamplerError, SamplerResult};
pub use sampler::{CounterResult, DiagonalSampler};
pub use transpiler::SimTranspiler;
