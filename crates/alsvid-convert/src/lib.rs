//! `alsvid-convert` — classical ⇄ quantum problem conversion.
//!
//! The [`Converter`] orchestrates the full pipeline: it reduces a
//! [`ProblemInstance`](alsvid_model::ProblemInstance) to QUBO, transforms
//! the QUBO to an Ising model (caching the result), keeps a spin-index →
//! variable-label registry for traceability, and decodes backend
//! measurement results back into evaluated
//! [`SampleSet`](alsvid_model::SampleSet)s.
//!
//! Algorithm-specific converters implement [`CostHamiltonianProvider`] on
//! top: [`QaoaConverter`] maps the cached Ising model onto Z / ZZ Pauli
//! terms for cost-Hamiltonian construction.
//!
//! ```text
//!   instance ──→ to_qubo ──→ qubo_to_ising ──→ [cache] ──→ Hamiltonian
//!                                                  │
//!   raw result ──→ convert_result ──→ BitsSampleSet ──→ SampleSet
//! ```
//!
//! # Example
//!
//! ```rust
//! use alsvid_convert::{CostHamiltonianProvider, QaoaConverter};
//! use alsvid_model::{ProblemInstance, QuadraticExpr};
//!
//! let mut instance = ProblemInstance::new("pair");
//! let x0 = instance.add_binary("x", vec![0]);
//! let x1 = instance.add_binary("x", vec![1]);
//! let mut obj = QuadraticExpr::new();
//! obj.add_linear(x0, -1.0);
//! obj.add_linear(x1, -1.0);
//! obj.add_quadratic(x0, x1, 2.0);
//! instance.set_objective(obj);
//!
//! let mut qaoa = QaoaConverter::new(instance);
//! let hamiltonian = qaoa.cost_hamiltonian().unwrap();
//! assert_eq!(hamiltonian.num_qubits(), 2);
//! ```

pub mod converter;
pub mod error;
pub mod operator;
pub mod qaoa;

pub use converter::{Converter, CostHamiltonianProvider, EncodeState};
pub use error::{ConvertError, ConvertResult};
pub use operator::{Hamiltonian, Pauli, PauliTerm};
pub use qaoa::QaoaConverter;
