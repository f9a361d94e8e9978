//! Sparse QUBO coefficient mapping.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// A sparse QUBO coefficient mapping.
///
/// Keys are unordered pairs of variable indices, stored as `(min, max)`.
/// A diagonal key `(i, i)` holds the linear coefficient of `x_i`; for
/// binary variables `x² = x`, so squared terms fold onto the diagonal.
/// The scalar constant of the quadratic form is carried separately by the
/// caller (see [`crate::qubo_to_ising`]).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuboCoefficients {
    coeffs: FxHashMap<(u32, u32), f64>,
}

impl QuboCoefficients {
    /// Create an empty coefficient mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `coeff` to the entry for the unordered pair `(i, j)`.
    ///
    /// The key is normalized to `(min, max)`, so `add(1, 0, c)` and
    /// `add(0, 1, c)` accumulate into the same entry.
    pub fn add(&mut self, i: u32, j: u32, coeff: f64) {
        let key = if i <= j { (i, j) } else { (j, i) };
        *self.coeffs.entry(key).or_insert(0.0) += coeff;
    }

    /// Get the coefficient for the unordered pair `(i, j)`, or 0.
    pub fn get(&self, i: u32, j: u32) -> f64 {
        let key = if i <= j { (i, j) } else { (j, i) };
        self.coeffs.get(&key).copied().unwrap_or(0.0)
    }

    /// Iterate over `((i, j), coeff)` entries in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&(u32, u32), &f64)> {
        self.coeffs.iter()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.coeffs.len()
    }

    /// True if no entries are stored.
    pub fn is_empty(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// All variable indices referenced by any key, sorted ascending.
    pub fn indices(&self) -> Vec<u32> {
        let mut v: Vec<u32> = self
            .coeffs
            .keys()
            .flat_map(|&(i, j)| [i, j])
            .collect();
        v.sort_unstable();
        v.dedup();
        v
    }
}

impl FromIterator<((u32, u32), f64)> for QuboCoefficients {
    fn from_iter<T: IntoIterator<Item = ((u32, u32), f64)>>(iter: T) -> Self {
        let mut qubo = Self::new();
        for ((i, j), c) in iter {
            qubo.add(i, j, c);
        }
        qubo
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_order_normalized() {
        let mut qubo = QuboCoefficients::new();
        qubo.add(1, 0, 2.0);
        qubo.add(0, 1, 3.0);
        assert_eq!(qubo.len(), 1);
        assert_eq!(qubo.get(0, 1), 5.0);
        assert_eq!(qubo.get(1, 0), 5.0);
    }

    #[test]
    fn test_indices_sorted_unique() {
        let qubo: QuboCoefficients =
            [((4, 4), 1.0), ((0, 4), -1.0), ((7, 2), 0.5)].into_iter().collect();
        assert_eq!(qubo.indices(), vec![0, 2, 4, 7]);
    }
}
