//! Cost-Hamiltonian data structures.
//!
//! A cost Hamiltonian is a weighted sum of Pauli products plus an identity
//! offset:
//!
//!   H = Σ_k c_k · P_k + const
//!
//! For Ising-derived cost functions every P_k is a Z or ZZ string over the
//! spin-index space of the source [`IsingModel`]. Measuring bit `b` of spin
//! `i` corresponds to the spin value `s = 2b - 1` under the `x = (1+s)/2`
//! substitution used at encode time.

use alsvid_ising::IsingModel;
use serde::{Deserialize, Serialize};

/// Single-qubit Pauli operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pauli {
    /// Identity.
    I,
    /// Pauli-X.
    X,
    /// Pauli-Y.
    Y,
    /// Pauli-Z.
    Z,
}

/// One weighted Pauli product term.
///
/// Operators are stored as `(spin index, Pauli)` pairs sorted by index,
/// with identities omitted; spins not listed are implicitly I.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PauliTerm {
    /// Real coefficient.
    pub coeff: f64,
    /// Non-identity operators, sorted by spin index.
    ops: Vec<(u32, Pauli)>,
}

impl PauliTerm {
    /// Create a term from `(spin, op)` pairs; identities are dropped and
    /// the rest sorted by spin index.
    pub fn new(coeff: f64, ops: impl IntoIterator<Item = (u32, Pauli)>) -> Self {
        let mut v: Vec<(u32, Pauli)> = ops.into_iter().filter(|(_, p)| *p != Pauli::I).collect();
        v.sort_by_key(|&(q, _)| q);
        Self { coeff, ops: v }
    }

    /// Shorthand: single-spin Z term.
    pub fn z(spin: u32, coeff: f64) -> Self {
        Self::new(coeff, [(spin, Pauli::Z)])
    }

    /// Shorthand: ZZ coupling term.
    pub fn zz(s0: u32, s1: u32, coeff: f64) -> Self {
        Self::new(coeff, [(s0, Pauli::Z), (s1, Pauli::Z)])
    }

    /// The non-identity `(spin, op)` pairs, sorted by spin index.
    pub fn ops(&self) -> &[(u32, Pauli)] {
        &self.ops
    }

    /// True if every operator is Z (diagonal in the computational basis).
    pub fn is_diagonal(&self) -> bool {
        self.ops.iter().all(|&(_, p)| p == Pauli::Z)
    }

    /// The highest spin index referenced, or `None` for an identity term.
    pub fn max_spin(&self) -> Option<u32> {
        self.ops.last().map(|&(q, _)| q)
    }
}

/// A sum-of-Pauli-products cost Hamiltonian with an identity offset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hamiltonian {
    terms: Vec<PauliTerm>,
    constant: f64,
}

impl Hamiltonian {
    /// Create from a list of terms and an identity offset.
    pub fn from_terms(terms: Vec<PauliTerm>, constant: f64) -> Self {
        Self { terms, constant }
    }

    /// Build the cost Hamiltonian equivalent to an Ising model.
    ///
    /// Linear coefficients become Z terms, quadratic coefficients ZZ
    /// terms, over the same spin-index space. Terms are emitted in
    /// ascending index order so the construction is deterministic.
    pub fn from_ising(ising: &IsingModel) -> Self {
        let mut linear: Vec<(u32, f64)> =
            ising.linear().iter().map(|(&i, &h)| (i, h)).collect();
        linear.sort_unstable_by_key(|&(i, _)| i);
        let mut quadratic: Vec<((u32, u32), f64)> =
            ising.quadratic().iter().map(|(&k, &j)| (k, j)).collect();
        quadratic.sort_unstable_by_key(|&(k, _)| k);

        let terms = linear
            .into_iter()
            .map(|(i, h)| PauliTerm::z(i, h))
            .chain(
                quadratic
                    .into_iter()
                    .map(|((i, j), c)| PauliTerm::zz(i, j, c)),
            )
            .collect();
        Self::from_terms(terms, ising.constant())
    }

    /// All terms.
    pub fn terms(&self) -> &[PauliTerm] {
        &self.terms
    }

    /// The identity offset.
    pub fn constant(&self) -> f64 {
        self.constant
    }

    /// Number of Pauli terms.
    pub fn n_terms(&self) -> usize {
        self.terms.len()
    }

    /// True if every term is diagonal (Z-only).
    pub fn is_diagonal(&self) -> bool {
        self.terms.iter().all(PauliTerm::is_diagonal)
    }

    /// Minimum number of qubits needed to represent this Hamiltonian.
    pub fn num_qubits(&self) -> u32 {
        self.terms
            .iter()
            .filter_map(PauliTerm::max_spin)
            .max()
            .map_or(0, |q| q + 1)
    }

    /// Eigenvalue of a diagonal Hamiltonian on the basis state given by
    /// measured bits, under `s = 2b - 1`. Returns `None` when any term is
    /// non-diagonal.
    pub fn diagonal_energy(&self, bits: &[u8]) -> Option<f64> {
        let mut e = self.constant;
        for term in &self.terms {
            let mut prod = term.coeff;
            for &(q, p) in &term.ops {
                if p != Pauli::Z {
                    return None;
                }
                let bit = bits.get(q as usize).copied().unwrap_or(0);
                prod *= f64::from(2 * i32::from(bit) - 1);
            }
            e += prod;
        }
        Some(e)
    }
}

impl FromIterator<PauliTerm> for Hamiltonian {
    fn from_iter<T: IntoIterator<Item = PauliTerm>>(iter: T) -> Self {
        Self {
            terms: iter.into_iter().collect(),
            constant: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alsvid_ising::{QuboCoefficients, qubo_to_ising};

    #[test]
    fn test_identity_dropped_and_sorted() {
        let term = PauliTerm::new(1.0, [(3, Pauli::Z), (0, Pauli::I), (1, Pauli::Z)]);
        assert_eq!(term.ops(), &[(1, Pauli::Z), (3, Pauli::Z)]);
        assert!(term.is_diagonal());
    }

    #[test]
    fn test_from_ising_term_shapes() {
        let mut qubo = QuboCoefficients::new();
        qubo.add(0, 0, -1.0);
        qubo.add(1, 1, -1.0);
        qubo.add(0, 1, 2.0);
        let ising = qubo_to_ising(&qubo, 0.0, false);
        let h = Hamiltonian::from_ising(&ising);

        assert!(h.is_diagonal());
        assert_eq!(h.num_qubits(), 2);
        assert_eq!(h.constant(), -0.5);
        // Two Z terms (coefficient 0) plus one ZZ term.
        assert_eq!(h.n_terms(), 3);
        assert_eq!(h.terms()[2].ops(), &[(0, Pauli::Z), (1, Pauli::Z)]);
        assert_eq!(h.terms()[2].coeff, 0.5);
    }

    #[test]
    fn test_diagonal_energy_matches_qubo_objective() {
        let mut qubo = QuboCoefficients::new();
        qubo.add(0, 0, -1.0);
        qubo.add(1, 1, -1.0);
        qubo.add(0, 1, 2.0);
        let h = Hamiltonian::from_ising(&qubo_to_ising(&qubo, 0.0, false));

        assert_eq!(h.diagonal_energy(&[0, 0]), Some(0.0));
        assert_eq!(h.diagonal_energy(&[1, 1]), Some(0.0));
        assert_eq!(h.diagonal_energy(&[1, 0]), Some(-1.0));
        assert_eq!(h.diagonal_energy(&[0, 1]), Some(-1.0));
    }

    #[test]
    fn test_diagonal_energy_rejects_off_diagonal() {
        let h = Hamiltonian::from_terms(vec![PauliTerm::new(1.0, [(0, Pauli::X)])], 0.0);
        assert!(!h.is_diagonal());
        assert_eq!(h.diagonal_energy(&[0]), None);
    }
}
