//! Canonical measurement-result format.

use serde::{Deserialize, Serialize};

use crate::error::{HalError, HalResult};

/// One distinct measured bitstring with its shot count.
///
/// `bits[i]` is the measured value of spin index `i` (little-endian).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BitsSample {
    /// Measured bits, one per spin index.
    pub bits: Vec<u8>,
    /// How many shots produced exactly this bitstring.
    pub num_occurrences: u64,
}

impl BitsSample {
    /// Create a sample.
    pub fn new(bits: Vec<u8>, num_occurrences: u64) -> Self {
        Self {
            bits,
            num_occurrences,
        }
    }

    /// Build a sample from a bitstring packed as an integer.
    ///
    /// Registers wider than 64 qubits cannot be represented by a packed
    /// `u64` and are rejected.
    pub fn from_int(value: u64, num_qubits: u32, num_occurrences: u64) -> HalResult<Self> {
        if num_qubits > 64 {
            return Err(HalError::RegisterTooWide { num_qubits });
        }
        if num_qubits < 64 && value >> num_qubits != 0 {
            return Err(HalError::ValueOutOfRange { value, num_qubits });
        }
        let bits = (0..num_qubits).map(|i| ((value >> i) & 1) as u8).collect();
        Ok(Self::new(bits, num_occurrences))
    }
}

/// An ordered collection of distinct measured bitstrings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BitsSampleSet {
    samples: Vec<BitsSample>,
}

impl BitsSampleSet {
    /// Wrap a list of samples.
    pub fn from_samples(samples: Vec<BitsSample>) -> Self {
        Self { samples }
    }

    /// Build from `(packed bitstring, shot count)` pairs.
    ///
    /// Pairs are sorted by bitstring value so the set is deterministic
    /// regardless of the source map's iteration order.
    pub fn from_int_counts(
        counts: impl IntoIterator<Item = (u64, u64)>,
        num_qubits: u32,
    ) -> HalResult<Self> {
        let mut pairs: Vec<(u64, u64)> = counts.into_iter().collect();
        pairs.sort_unstable_by_key(|&(value, _)| value);
        let samples = pairs
            .into_iter()
            .map(|(value, n)| BitsSample::from_int(value, num_qubits, n))
            .collect::<HalResult<Vec<_>>>()?;
        Ok(Self::from_samples(samples))
    }

    /// The samples in order.
    pub fn samples(&self) -> &[BitsSample] {
        &self.samples
    }

    /// Iterate over samples.
    pub fn iter(&self) -> impl Iterator<Item = &BitsSample> {
        self.samples.iter()
    }

    /// Number of distinct bitstrings.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True when the set holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Total shots: the sum of all occurrence counts.
    pub fn total_samples(&self) -> u64 {
        self.samples.iter().map(|s| s.num_occurrences).sum()
    }
}
