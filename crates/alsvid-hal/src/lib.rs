//! Alsvid backend abstraction layer.
//!
//! Every quantum SDK reports measurement results in its own shape. This
//! crate defines the canonical format the rest of Alsvid decodes from —
//! [`BitsSampleSet`], distinct bitstrings with shot counts — and the
//! [`QuantumTranspiler`] contract each backend adapter implements to
//! normalize its native result type into that format.
//!
//! ```text
//!   SDK-native result ──→ convert_result() ──→ BitsSampleSet ──→ decoder
//! ```
//!
//! # Contract
//!
//! - `convert_result()` MUST produce one [`BitsSample`] per distinct
//!   bitstring, and the set's `total_samples()` MUST equal the total shot
//!   count of the raw result.
//! - Bit order is little-endian with respect to spin indices: bit `i` of a
//!   sample is the measured value of spin `i`.
//! - Conversion is pure and synchronous; execution I/O belongs to the
//!   adapter, not to this boundary.

pub mod bits;
pub mod error;
pub mod transpiler;

pub use bits::{BitsSample, BitsSampleSet};
pub use error::{HalError, HalResult};
pub use transpiler::QuantumTranspiler;
