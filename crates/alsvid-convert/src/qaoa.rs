//! QAOA-flavored converter.

use crate::converter::{Converter, CostHamiltonianProvider};
use crate::error::ConvertResult;
use crate::operator::Hamiltonian;
use alsvid_model::ProblemInstance;

/// Wraps a [`Converter`] and exposes the cached Ising model as a Z / ZZ
/// cost Hamiltonian for QAOA circuit construction.
///
/// All encode and decode behavior is delegated to the inner converter,
/// reachable through [`converter`](Self::converter) and
/// [`converter_mut`](Self::converter_mut).
#[derive(Debug, Clone)]
pub struct QaoaConverter {
    converter: Converter,
}

impl QaoaConverter {
    /// Create a QAOA converter with default encode configuration.
    pub fn new(instance: ProblemInstance) -> Self {
        Self {
            converter: Converter::new(instance),
        }
    }

    /// Wrap an already-configured converter.
    pub fn from_converter(converter: Converter) -> Self {
        Self { converter }
    }

    /// The inner converter.
    pub fn converter(&self) -> &Converter {
        &self.converter
    }

    /// The inner converter, mutably (for encode and decode calls).
    pub fn converter_mut(&mut self) -> &mut Converter {
        &mut self.converter
    }
}

impl CostHamiltonianProvider for QaoaConverter {
    /// Cost Hamiltonian over the cached Ising model's spin space.
    ///
    /// Encodes first when no model is cached yet, so the Hamiltonian and
    /// later decodes always share one index map.
    fn cost_hamiltonian(&mut self) -> ConvertResult<Hamiltonian> {
        let ising = self.converter.get_ising()?;
        Ok(Hamiltonian::from_ising(ising))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alsvid_model::QuadraticExpr;

    fn pair_instance() -> ProblemInstance {
        let mut instance = ProblemInstance::new("pair");
        let x0 = instance.add_binary("x", vec![0]);
        let x1 = instance.add_binary("x", vec![1]);
        let mut obj = QuadraticExpr::new();
        obj.add_linear(x0, -1.0);
        obj.add_linear(x1, -1.0);
        obj.add_quadratic(x0, x1, 2.0);
        instance.set_objective(obj);
        instance
    }

    #[test]
    fn test_cost_hamiltonian_is_diagonal() {
        let mut qaoa = QaoaConverter::new(pair_instance());
        let h = qaoa.cost_hamiltonian().unwrap();
        assert!(h.is_diagonal());
        assert_eq!(h.num_qubits(), 2);
    }

    #[test]
    fn test_cost_hamiltonian_matches_cached_ising() {
        let mut qaoa = QaoaConverter::new(pair_instance());
        let h = qaoa.cost_hamiltonian().unwrap();
        let ising = qaoa.converter_mut().get_ising().unwrap();
        assert_eq!(h.constant(), ising.constant());
        assert_eq!(
            h.n_terms(),
            ising.linear().len() + ising.quadratic().len()
        );
    }

    #[test]
    fn test_cost_hamiltonian_energy_tracks_objective() {
        // Eigenvalues on measured basis states equal the QUBO objective
        // under s = 2b - 1.
        let mut qaoa = QaoaConverter::new(pair_instance());
        let h = qaoa.cost_hamiltonian().unwrap();
        assert_eq!(h.diagonal_energy(&[1, 0]), Some(-1.0));
        assert_eq!(h.diagonal_energy(&[0, 1]), Some(-1.0));
        assert_eq!(h.diagonal_energy(&[1, 1]), Some(0.0));
        assert_eq!(h.diagonal_energy(&[0, 0]), Some(0.0));
    }
}
