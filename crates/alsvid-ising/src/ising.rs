//! Ising model and the QUBO → Ising transform.

use std::str::FromStr;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{IsingError, IsingResult};
use crate::qubo::QuboCoefficients;

/// Normalization mode for an Ising model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IsingNormalize {
    /// Divide every coefficient and the constant by the maximum absolute
    /// coefficient value.
    AbsMax,
    /// Divide by the root-mean-square of the coefficient magnitudes.
    Rms,
}

impl FromStr for IsingNormalize {
    type Err = IsingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "abs_max" => Ok(IsingNormalize::AbsMax),
            "rms" => Ok(IsingNormalize::Rms),
            other => Err(IsingError::InvalidNormalization(other.to_string())),
        }
    }
}

/// An Ising model: `H(s) = Σ h_i·s_i + Σ J_ij·s_i·s_j + constant`.
///
/// Spin indices are compacted: they run over `0..num_spins()` regardless of
/// which QUBO variable indices were referenced. The [`index_map`] records,
/// for every spin index, the QUBO variable index it stands for. The map is
/// always present — it is the identity when the QUBO indices were already
/// contiguous from zero.
///
/// Invariant: every spin index appearing in `linear` or `quadratic` has an
/// entry in the index map.
///
/// [`index_map`]: IsingModel::index_map
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IsingModel {
    linear: FxHashMap<u32, f64>,
    quadratic: FxHashMap<(u32, u32), f64>,
    constant: f64,
    index_map: FxHashMap<u32, u32>,
}

impl IsingModel {
    /// Linear spin coefficients `h_i`.
    pub fn linear(&self) -> &FxHashMap<u32, f64> {
        &self.linear
    }

    /// Quadratic spin coefficients `J_ij`, keyed `(min, max)`.
    pub fn quadratic(&self) -> &FxHashMap<(u32, u32), f64> {
        &self.quadratic
    }

    /// The scalar constant.
    pub fn constant(&self) -> f64 {
        self.constant
    }

    /// The spin-index → QUBO-index correspondence.
    pub fn index_map(&self) -> &FxHashMap<u32, u32> {
        &self.index_map
    }

    /// Map a spin index back to its QUBO variable index.
    pub fn ising_to_qubo_index(&self, spin: u32) -> Option<u32> {
        self.index_map.get(&spin).copied()
    }

    /// Number of spins in the (compacted) spin space.
    pub fn num_spins(&self) -> u32 {
        self.index_map.len() as u32
    }

    /// Energy of a spin configuration, `spins[i] ∈ {-1, +1}`.
    ///
    /// # Panics
    ///
    /// Panics if `spins` has fewer than [`num_spins`](Self::num_spins)
    /// entries.
    pub fn energy(&self, spins: &[i8]) -> f64 {
        let mut e = self.constant;
        for (&i, &h) in &self.linear {
            e += h * f64::from(spins[i as usize]);
        }
        for (&(i, j), &jij) in &self.quadratic {
            e += jij * f64::from(spins[i as usize]) * f64::from(spins[j as usize]);
        }
        e
    }

    /// Check the index-map invariant: every referenced spin index is mapped.
    pub fn check_index_map(&self) -> IsingResult<()> {
        let referenced = self
            .linear
            .keys()
            .copied()
            .chain(self.quadratic.keys().flat_map(|&(i, j)| [i, j]));
        for spin in referenced {
            if !self.index_map.contains_key(&spin) {
                return Err(IsingError::DanglingSpinIndex { spin });
            }
        }
        Ok(())
    }

    /// Apply the given normalization mode in place.
    ///
    /// Only coefficient magnitudes change; the index map is untouched.
    pub fn normalize(&mut self, mode: IsingNormalize) {
        match mode {
            IsingNormalize::AbsMax => self.normalize_by_abs_max(),
            IsingNormalize::Rms => self.normalize_by_rms(),
        }
    }

    /// Divide all coefficients and the constant by the maximum absolute
    /// coefficient value. No-op for an empty or all-zero model.
    ///
    /// Idempotent: after one pass the maximum absolute coefficient is
    /// exactly 1.0, so a second pass divides by 1.0.
    pub fn normalize_by_abs_max(&mut self) {
        let max = self.coefficient_magnitudes().fold(0.0f64, f64::max);
        if max > 0.0 {
            self.scale(1.0 / max);
        }
    }

    /// Divide all coefficients and the constant by the root-mean-square of
    /// the coefficient magnitudes. No-op for an empty or all-zero model.
    pub fn normalize_by_rms(&mut self) {
        let (sum_sq, n) = self
            .coefficient_magnitudes()
            .fold((0.0f64, 0usize), |(s, n), c| (s + c * c, n + 1));
        if n > 0 && sum_sq > 0.0 {
            let rms = (sum_sq / n as f64).sqrt();
            self.scale(1.0 / rms);
        }
    }

    fn coefficient_magnitudes(&self) -> impl Iterator<Item = f64> + '_ {
        self.linear
            .values()
            .chain(self.quadratic.values())
            .map(|c| c.abs())
    }

    fn scale(&mut self, factor: f64) {
        for c in self.linear.values_mut() {
            *c *= factor;
        }
        for c in self.quadratic.values_mut() {
            *c *= factor;
        }
        self.constant *= factor;
    }
}

/// Convert a QUBO coefficient mapping (plus its constant) into an Ising
/// model using the substitution `x = (1 + s) / 2`.
///
/// Per QUBO entry the constant mass is distributed as:
///
/// - diagonal `Q_ii`:  `h_i += Q_ii/2`,  `const += Q_ii/2`
/// - off-diagonal `Q_ij`:  `J_ij += Q_ij/4`,  `h_i += Q_ij/4`,
///   `h_j += Q_ij/4`,  `const += Q_ij/4`
///
/// The spin space is compacted over the sorted set of referenced QUBO
/// indices and the spin → QUBO correspondence is recorded in the index map.
///
/// When `simplify` is set, coefficients that cancel to exactly zero are
/// dropped after accumulation. The index map is built before dropping, so
/// simplification never loses the variable correspondence.
pub fn qubo_to_ising(qubo: &QuboCoefficients, constant: f64, simplify: bool) -> IsingModel {
    let qubo_indices = qubo.indices();
    let qubo_to_spin: FxHashMap<u32, u32> = qubo_indices
        .iter()
        .enumerate()
        .map(|(spin, &q)| (q, spin as u32))
        .collect();
    let index_map: FxHashMap<u32, u32> = qubo_indices
        .iter()
        .enumerate()
        .map(|(spin, &q)| (spin as u32, q))
        .collect();

    let mut linear: FxHashMap<u32, f64> = FxHashMap::default();
    let mut quadratic: FxHashMap<(u32, u32), f64> = FxHashMap::default();
    let mut offset = constant;

    for (&(qi, qj), &c) in qubo.iter() {
        let si = qubo_to_spin[&qi];
        let sj = qubo_to_spin[&qj];
        if si == sj {
            *linear.entry(si).or_insert(0.0) += c / 2.0;
            offset += c / 2.0;
        } else {
            let key = if si <= sj { (si, sj) } else { (sj, si) };
            *quadratic.entry(key).or_insert(0.0) += c / 4.0;
            *linear.entry(si).or_insert(0.0) += c / 4.0;
            *linear.entry(sj).or_insert(0.0) += c / 4.0;
            offset += c / 4.0;
        }
    }

    if simplify {
        linear.retain(|_, c| *c != 0.0);
        quadratic.retain(|_, c| *c != 0.0);
    }

    debug!(
        spins = index_map.len(),
        linear = linear.len(),
        quadratic = quadratic.len(),
        "converted QUBO to Ising"
    );

    IsingModel {
        linear,
        quadratic,
        constant: offset,
        index_map,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn two_var_model() -> IsingModel {
        // f(x) = -x0 - x1 + 2·x0·x1
        let mut qubo = QuboCoefficients::new();
        qubo.add(0, 0, -1.0);
        qubo.add(1, 1, -1.0);
        qubo.add(0, 1, 2.0);
        qubo_to_ising(&qubo, 0.0, false)
    }

    #[test]
    fn test_two_var_coefficients() {
        let ising = two_var_model();
        assert_eq!(ising.linear()[&0], 0.0);
        assert_eq!(ising.linear()[&1], 0.0);
        assert_eq!(ising.quadratic()[&(0, 1)], 0.5);
        assert_eq!(ising.constant(), -0.5);
    }

    #[test]
    fn test_ising_energy_matches_qubo() {
        // Exhaustive check: H(2x-1) == f(x) for all four assignments.
        let ising = two_var_model();
        for (x0, x1) in [(0u8, 0u8), (0, 1), (1, 0), (1, 1)] {
            let f = -f64::from(x0) - f64::from(x1) + 2.0 * f64::from(x0) * f64::from(x1);
            let spins = [2 * x0 as i8 - 1, 2 * x1 as i8 - 1];
            assert!((ising.energy(&spins) - f).abs() < 1e-12);
        }
    }

    #[test]
    fn test_ground_state_of_antiferromagnetic_pair() {
        // The minimum of -x0 - x1 + 2·x0·x1 is -1, attained at the two
        // mixed assignments (1,0) and (0,1).
        let ising = two_var_model();
        assert_eq!(ising.energy(&[1, -1]), -1.0);
        assert_eq!(ising.energy(&[-1, 1]), -1.0);
        assert_eq!(ising.energy(&[1, 1]), 0.0);
        assert_eq!(ising.energy(&[-1, -1]), 0.0);
    }

    #[test]
    fn test_index_compaction() {
        let mut qubo = QuboCoefficients::new();
        qubo.add(3, 3, 1.0);
        qubo.add(3, 7, -2.0);
        qubo.add(10, 10, 0.5);
        let ising = qubo_to_ising(&qubo, 0.0, false);

        assert_eq!(ising.num_spins(), 3);
        assert_eq!(ising.ising_to_qubo_index(0), Some(3));
        assert_eq!(ising.ising_to_qubo_index(1), Some(7));
        assert_eq!(ising.ising_to_qubo_index(2), Some(10));
        assert_eq!(ising.ising_to_qubo_index(3), None);
        ising.check_index_map().unwrap();
    }

    #[test]
    fn test_identity_index_map_still_supplied() {
        let mut qubo = QuboCoefficients::new();
        qubo.add(0, 0, 1.0);
        qubo.add(0, 1, 1.0);
        let ising = qubo_to_ising(&qubo, 0.0, false);
        assert_eq!(ising.ising_to_qubo_index(0), Some(0));
        assert_eq!(ising.ising_to_qubo_index(1), Some(1));
    }

    #[test]
    fn test_simplify_drops_cancelled_terms() {
        let mut qubo = QuboCoefficients::new();
        qubo.add(0, 0, 2.0);
        qubo.add(0, 1, 4.0);
        qubo.add(1, 1, -2.0);
        // h_1 = -1 + 1 = 0 cancels exactly; h_0 = 1 + 1 = 2 survives.
        let ising = qubo_to_ising(&qubo, 0.0, true);
        assert!(ising.linear().contains_key(&0));
        assert!(!ising.linear().contains_key(&1));
        // Index map keeps both variables.
        assert_eq!(ising.num_spins(), 2);
    }

    #[test]
    fn test_normalize_abs_max() {
        let mut ising = two_var_model();
        ising.normalize(IsingNormalize::AbsMax);
        // max |coeff| was 0.5 → quadratic becomes 1.0, constant -1.0.
        assert_eq!(ising.quadratic()[&(0, 1)], 1.0);
        assert_eq!(ising.constant(), -1.0);
    }

    #[test]
    fn test_normalize_rms() {
        let mut qubo = QuboCoefficients::new();
        qubo.add(0, 0, 6.0);
        qubo.add(1, 1, -8.0);
        let mut ising = qubo_to_ising(&qubo, 0.0, false);
        // h = {3, -4}, rms = sqrt((9 + 16)/2) = 3.5355…
        ising.normalize(IsingNormalize::Rms);
        let rms = (25.0f64 / 2.0).sqrt();
        assert!((ising.linear()[&0] - 3.0 / rms).abs() < 1e-12);
        assert!((ising.linear()[&1] + 4.0 / rms).abs() < 1e-12);
    }

    #[test]
    fn test_normalize_empty_model_is_noop() {
        let mut ising = qubo_to_ising(&QuboCoefficients::new(), 3.0, false);
        ising.normalize(IsingNormalize::AbsMax);
        assert_eq!(ising.constant(), 3.0);
        ising.normalize(IsingNormalize::Rms);
        assert_eq!(ising.constant(), 3.0);
    }

    #[test]
    fn test_normalize_mode_parse() {
        assert_eq!("abs_max".parse::<IsingNormalize>().unwrap(), IsingNormalize::AbsMax);
        assert_eq!("rms".parse::<IsingNormalize>().unwrap(), IsingNormalize::Rms);
        assert!(matches!(
            "bogus".parse::<IsingNormalize>(),
            Err(IsingError::InvalidNormalization(s)) if s == "bogus"
        ));
    }

    fn arb_qubo() -> impl Strategy<Value = QuboCoefficients> {
        prop::collection::hash_map(
            (0u32..40, 0u32..40),
            prop_oneof![-10.0f64..10.0, Just(0.0)],
            0..24,
        )
        .prop_map(|m| m.into_iter().collect())
    }

    proptest! {
        #[test]
        fn prop_round_trip_index_set(qubo in arb_qubo(), constant in -5.0f64..5.0) {
            let ising = qubo_to_ising(&qubo, constant, false);
            let mut mapped: Vec<u32> = ising.index_map().values().copied().collect();
            mapped.sort_unstable();
            prop_assert_eq!(mapped, qubo.indices());
            prop_assert!(ising.check_index_map().is_ok());
        }

        #[test]
        fn prop_abs_max_idempotent(qubo in arb_qubo(), constant in -5.0f64..5.0) {
            let mut once = qubo_to_ising(&qubo, constant, false);
            once.normalize(IsingNormalize::AbsMax);
            let mut twice = once.clone();
            twice.normalize(IsingNormalize::AbsMax);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_normalization_preserves_index_map(qubo in arb_qubo()) {
            let ising = qubo_to_ising(&qubo, 0.0, false);
            let mut normed = ising.clone();
            normed.normalize(IsingNormalize::Rms);
            prop_assert_eq!(ising.index_map(), normed.index_map());
        }

        #[test]
        fn prop_energy_equivalence(qubo in arb_qubo(), constant in -5.0f64..5.0) {
            // For a random assignment, the Ising energy under s = 2x - 1
            // equals the QUBO objective value.
            let ising = qubo_to_ising(&qubo, constant, false);
            let n = ising.num_spins() as usize;
            if n > 16 { return Ok(()); }
            for pattern in [0u32, u32::MAX, 0b1010_1010_1010_1010] {
                let bits: Vec<u8> = (0..n).map(|i| ((pattern >> i) & 1) as u8).collect();
                let spins: Vec<i8> = bits.iter().map(|&b| 2 * b as i8 - 1).collect();
                let mut f = constant;
                for (&(qi, qj), &c) in qubo.iter() {
                    let xi = f64::from(bits[ising.index_map().iter()
                        .find(|&(_, &q)| q == qi).map(|(&s, _)| s).unwrap() as usize]);
                    let xj = f64::from(bits[ising.index_map().iter()
                        .find(|&(_, &q)| q == qj).map(|(&s, _)| s).unwrap() as usize]);
                    f += if qi == qj { c * xi } else { c * xi * xj };
                }
                prop_assert!((ising.energy(&spins) - f).abs() < 1e-9);
            }
        }
    }
}
