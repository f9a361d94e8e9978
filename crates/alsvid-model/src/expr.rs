//! Sparse polynomial expressions over decision variables.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// A sparse linear expression `Σ a_i·x_i + c`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinearExpr {
    terms: FxHashMap<u32, f64>,
    constant: f64,
}

impl LinearExpr {
    /// Create an empty (zero) expression.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `coeff · x_id` to the expression.
    pub fn add_term(&mut self, id: u32, coeff: f64) {
        *self.terms.entry(id).or_insert(0.0) += coeff;
    }

    /// Add a constant.
    pub fn add_constant(&mut self, c: f64) {
        self.constant += c;
    }

    /// Builder form of [`add_term`](Self::add_term).
    #[must_use]
    pub fn with_term(mut self, id: u32, coeff: f64) -> Self {
        self.add_term(id, coeff);
        self
    }

    /// Builder form of [`add_constant`](Self::add_constant).
    #[must_use]
    pub fn with_constant(mut self, c: f64) -> Self {
        self.add_constant(c);
        self
    }

    /// The coefficient map.
    pub fn terms(&self) -> &FxHashMap<u32, f64> {
        &self.terms
    }

    /// The constant part.
    pub fn constant(&self) -> f64 {
        self.constant
    }

    /// Variable ids referenced, sorted ascending.
    pub fn ids(&self) -> Vec<u32> {
        let mut v: Vec<u32> = self.terms.keys().copied().collect();
        v.sort_unstable();
        v
    }

    /// Evaluate against a variable-value assignment; missing values read 0.
    pub fn evaluate(&self, values: &FxHashMap<u32, f64>) -> f64 {
        self.constant
            + self
                .terms
                .iter()
                .map(|(id, c)| c * values.get(id).copied().unwrap_or(0.0))
                .sum::<f64>()
    }

    /// Range of the expression given per-variable bounds.
    pub fn value_bounds(&self, bounds_of: impl Fn(u32) -> (f64, f64)) -> (f64, f64) {
        let mut min = self.constant;
        let mut max = self.constant;
        for (&id, &a) in &self.terms {
            let (lo, hi) = bounds_of(id);
            if a >= 0.0 {
                min += a * lo;
                max += a * hi;
            } else {
                min += a * hi;
                max += a * lo;
            }
        }
        (min, max)
    }

    /// Divide all coefficients and the constant by the maximum absolute
    /// coefficient. No-op when there are no nonzero coefficients.
    pub fn normalize_by_abs_max(&mut self) {
        let max = self.terms.values().map(|c| c.abs()).fold(0.0f64, f64::max);
        if max > 0.0 {
            for c in self.terms.values_mut() {
                *c /= max;
            }
            self.constant /= max;
        }
    }
}

/// A sparse quadratic expression `Σ Q_ij·x_i·x_j + Σ a_i·x_i + c`.
///
/// Quadratic keys are normalized to `(min, max)`; a diagonal key `(i, i)`
/// represents `x_i²`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuadraticExpr {
    linear: FxHashMap<u32, f64>,
    quadratic: FxHashMap<(u32, u32), f64>,
    constant: f64,
}

impl QuadraticExpr {
    /// Create an empty (zero) expression.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `coeff · x_id`.
    pub fn add_linear(&mut self, id: u32, coeff: f64) {
        *self.linear.entry(id).or_insert(0.0) += coeff;
    }

    /// Add `coeff · x_i·x_j` (order-insensitive).
    pub fn add_quadratic(&mut self, i: u32, j: u32, coeff: f64) {
        let key = if i <= j { (i, j) } else { (j, i) };
        *self.quadratic.entry(key).or_insert(0.0) += coeff;
    }

    /// Add a constant.
    pub fn add_constant(&mut self, c: f64) {
        self.constant += c;
    }

    /// The linear coefficient map.
    pub fn linear(&self) -> &FxHashMap<u32, f64> {
        &self.linear
    }

    /// The quadratic coefficient map.
    pub fn quadratic(&self) -> &FxHashMap<(u32, u32), f64> {
        &self.quadratic
    }

    /// The constant part.
    pub fn constant(&self) -> f64 {
        self.constant
    }

    /// Variable ids referenced by any term, sorted ascending.
    pub fn ids(&self) -> Vec<u32> {
        let mut v: Vec<u32> = self
            .linear
            .keys()
            .copied()
            .chain(self.quadratic.keys().flat_map(|&(i, j)| [i, j]))
            .collect();
        v.sort_unstable();
        v.dedup();
        v
    }

    /// Evaluate against a variable-value assignment; missing values read 0.
    pub fn evaluate(&self, values: &FxHashMap<u32, f64>) -> f64 {
        let val = |id: &u32| values.get(id).copied().unwrap_or(0.0);
        let mut sum = self.constant;
        for (id, c) in &self.linear {
            sum += c * val(id);
        }
        for ((i, j), c) in &self.quadratic {
            sum += c * val(i) * val(j);
        }
        sum
    }

    /// Divide all coefficients and the constant by the maximum absolute
    /// coefficient (linear and quadratic). No-op when all-zero.
    pub fn normalize_by_abs_max(&mut self) {
        let max = self
            .linear
            .values()
            .chain(self.quadratic.values())
            .map(|c| c.abs())
            .fold(0.0f64, f64::max);
        if max > 0.0 {
            for c in self.linear.values_mut() {
                *c /= max;
            }
            for c in self.quadratic.values_mut() {
                *c /= max;
            }
            self.constant /= max;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(u32, f64)]) -> FxHashMap<u32, f64> {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_linear_evaluate() {
        let expr = LinearExpr::new()
            .with_term(0, 2.0)
            .with_term(3, -1.0)
            .with_constant(5.0);
        assert_eq!(expr.evaluate(&values(&[(0, 1.0), (3, 4.0)])), 3.0);
        // Missing variables read as zero.
        assert_eq!(expr.evaluate(&values(&[])), 5.0);
    }

    #[test]
    fn test_linear_value_bounds() {
        // 2·x0 - 3·x1 + 1 over binaries: min = 1 - 3, max = 1 + 2.
        let expr = LinearExpr::new()
            .with_term(0, 2.0)
            .with_term(1, -3.0)
            .with_constant(1.0);
        assert_eq!(expr.value_bounds(|_| (0.0, 1.0)), (-2.0, 3.0));
    }

    #[test]
    fn test_quadratic_evaluate() {
        let mut expr = QuadraticExpr::new();
        expr.add_linear(0, 1.0);
        expr.add_quadratic(0, 1, 2.0);
        expr.add_quadratic(2, 2, 1.0);
        expr.add_constant(-1.0);
        let v = values(&[(0, 1.0), (1, 1.0), (2, 3.0)]);
        // 1 + 2 + 9 - 1
        assert_eq!(expr.evaluate(&v), 11.0);
    }

    #[test]
    fn test_quadratic_key_order() {
        let mut expr = QuadraticExpr::new();
        expr.add_quadratic(5, 2, 1.0);
        expr.add_quadratic(2, 5, 1.0);
        assert_eq!(expr.quadratic()[&(2, 5)], 2.0);
    }

    #[test]
    fn test_normalize_by_abs_max() {
        let mut expr = QuadraticExpr::new();
        expr.add_linear(0, -4.0);
        expr.add_quadratic(0, 1, 2.0);
        expr.add_constant(8.0);
        expr.normalize_by_abs_max();
        assert_eq!(expr.linear()[&0], -1.0);
        assert_eq!(expr.quadratic()[&(0, 1)], 0.5);
        assert_eq!(expr.constant(), 2.0);
    }
}
