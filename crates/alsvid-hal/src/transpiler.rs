//! Backend transpiler contract.

use crate::bits::BitsSampleSet;
use crate::error::HalResult;

/// Capability interface implemented once per quantum SDK.
///
/// The associated [`RawResult`](Self::RawResult) type is the SDK-native
/// execution output (e.g. a counter of measured bitstring-as-integer →
/// shot count plus a qubit count). Adapters are selected by the caller at
/// construction time; the core never inspects backend types at runtime.
pub trait QuantumTranspiler {
    /// The SDK-native execution result type.
    type RawResult;

    /// Normalize a raw execution result into the canonical bit-sample set.
    ///
    /// The returned set's `total_samples()` must equal the total shot
    /// count of `raw`.
    fn convert_result(&self, raw: &Self::RawResult) -> HalResult<BitsSampleSet>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bits::BitsSampleSet;

    /// Minimal adapter over `(Vec<(value, count)>, num_qubits)`.
    struct CounterTranspiler;

    impl QuantumTranspiler for CounterTranspiler {
        type RawResult = (Vec<(u64, u64)>, u32);

        fn convert_result(&self, raw: &Self::RawResult) -> HalResult<BitsSampleSet> {
            BitsSampleSet::from_int_counts(raw.0.iter().copied(), raw.1)
        }
    }

    #[test]
    fn test_convert_result_preserves_shots() {
        let raw = (vec![(0u64, 500u64), (3, 500)], 2);
        let set = CounterTranspiler.convert_result(&raw).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.total_samples(), 1000);
    }
}
