//! Decoded states and evaluated sample sets.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// A binary assignment over QUBO variable indices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedState {
    entries: FxHashMap<u32, u8>,
}

impl DecodedState {
    /// Create an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign a bit value to a variable index.
    pub fn set(&mut self, index: u32, bit: u8) {
        self.entries.insert(index, bit);
    }

    /// The bit assigned to `index`, if any.
    pub fn get(&self, index: u32) -> Option<u8> {
        self.entries.get(&index).copied()
    }

    /// The bit assigned to `index`, defaulting to 0.
    pub fn bit(&self, index: u32) -> u8 {
        self.get(index).unwrap_or(0)
    }

    /// Number of assigned indices.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no indices are assigned.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(index, bit)` entries in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&u32, &u8)> {
        self.entries.iter()
    }
}

impl FromIterator<(u32, u8)> for DecodedState {
    fn from_iter<T: IntoIterator<Item = (u32, u8)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// One evaluated solution candidate.
///
/// `ids` holds one sample id per measurement occurrence, so a state seen in
/// 10 shots carries 10 distinct ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// The decoded binary assignment.
    pub state: DecodedState,
    /// Sample ids, strictly increasing within a decode call.
    pub ids: Vec<u64>,
    /// Objective value of the reconstructed original-space assignment.
    pub objective: f64,
    /// Per-constraint violation magnitudes, keyed by constraint label.
    pub violations: FxHashMap<String, f64>,
    /// True when every violation is within tolerance.
    pub feasible: bool,
}

impl Sample {
    /// How many measurement shots produced this state.
    pub fn num_occurrences(&self) -> u64 {
        self.ids.len() as u64
    }
}

/// An ordered collection of evaluated samples.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SampleSet {
    samples: Vec<Sample>,
}

impl SampleSet {
    /// Wrap a list of samples.
    pub fn from_samples(samples: Vec<Sample>) -> Self {
        Self { samples }
    }

    /// The samples in decode order.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Iterate over samples.
    pub fn iter(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter()
    }

    /// Number of distinct decoded states.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True when the set holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Total number of sample ids across all entries.
    pub fn total_samples(&self) -> u64 {
        self.samples.iter().map(Sample::num_occurrences).sum()
    }

    /// The lowest-objective sample, feasible or not.
    pub fn best(&self) -> Option<&Sample> {
        self.samples
            .iter()
            .min_by(|a, b| a.objective.total_cmp(&b.objective))
    }

    /// The lowest-objective feasible sample.
    pub fn best_feasible(&self) -> Option<&Sample> {
        self.samples
            .iter()
            .filter(|s| s.feasible)
            .min_by(|a, b| a.objective.total_cmp(&b.objective))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(objective: f64, feasible: bool, ids: Vec<u64>) -> Sample {
        Sample {
            state: DecodedState::new(),
            ids,
            objective,
            violations: FxHashMap::default(),
            feasible,
        }
    }

    #[test]
    fn test_total_samples() {
        let set = SampleSet::from_samples(vec![
            sample(1.0, true, vec![0, 1, 2]),
            sample(0.0, false, vec![3]),
        ]);
        assert_eq!(set.total_samples(), 4);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_best_feasible_skips_infeasible() {
        let set = SampleSet::from_samples(vec![
            sample(-5.0, false, vec![0]),
            sample(2.0, true, vec![1]),
            sample(1.0, true, vec![2]),
        ]);
        assert_eq!(set.best().unwrap().objective, -5.0);
        assert_eq!(set.best_feasible().unwrap().objective, 1.0);
    }

    #[test]
    fn test_decoded_state_defaults_to_zero() {
        let state: DecodedState = [(0, 1u8), (2, 0u8)].into_iter().collect();
        assert_eq!(state.bit(0), 1);
        assert_eq!(state.bit(2), 0);
        assert_eq!(state.bit(99), 0);
        assert_eq!(state.get(99), None);
    }
}
