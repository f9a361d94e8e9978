//! Transpiler from sampler results to the canonical bit-sample format.

use alsvid_hal::{BitsSampleSet, HalResult, QuantumTranspiler};

use crate::sampler::CounterResult;

/// Normalizes [`CounterResult`]s into [`BitsSampleSet`]s.
///
/// Bit `i` of each packed bitstring is the measured value of spin index
/// `i`, matching the convention of the sampler and the decode pipeline.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimTranspiler;

impl SimTranspiler {
    /// Create a transpiler.
    pub fn new() -> Self {
        Self
    }
}

impl QuantumTranspiler for SimTranspiler {
    type RawResult = CounterResult;

    fn convert_result(&self, raw: &Self::RawResult) -> HalResult<BitsSampleSet> {
        BitsSampleSet::from_int_counts(
            raw.counts.iter().map(|(&value, &n)| (value, n)),
            raw.num_qubits,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashMap;

    #[test]
    fn test_counts_become_bit_samples() {
        let mut counts = FxHashMap::default();
        counts.insert(0b01u64, 30u64);
        counts.insert(0b10, 70);
        let raw = CounterResult {
            counts,
            num_qubits: 2,
        };

        let set = SimTranspiler::new().convert_result(&raw).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.total_samples(), 100);
        // Sorted by packed value; bit 0 is spin 0.
        assert_eq!(set.samples()[0].bits, vec![1, 0]);
        assert_eq!(set.samples()[1].bits, vec![0, 1]);
    }
}
