//! `alsvid-ising` — QUBO and Ising model representations.
//!
//! A QUBO (Quadratic Unconstrained Binary Optimization) problem is a sparse
//! quadratic form over binary variables:
//!
//!   f(x) = Σ_i Q_ii·x_i + Σ_{i<j} Q_ij·x_i·x_j + c,   x_i ∈ {0, 1}
//!
//! The equivalent Ising model is obtained by the affine substitution
//! `x = (1 + s) / 2` with spins `s ∈ {-1, +1}`:
//!
//!   H(s) = Σ_i h_i·s_i + Σ_{i<j} J_ij·s_i·s_j + const
//!
//! The transform compacts the spin index space over the QUBO indices that
//! actually appear, and records the correspondence in an explicit
//! [`IsingModel::index_map`] so that measurement bits can be mapped back to
//! the original variable space during decoding.
//!
//! # Example
//!
//! ```rust
//! use alsvid_ising::{QuboCoefficients, qubo_to_ising};
//!
//! // f(x) = -x0 - x1 + 2·x0·x1
//! let mut qubo = QuboCoefficients::new();
//! qubo.add(0, 0, -1.0);
//! qubo.add(1, 1, -1.0);
//! qubo.add(0, 1, 2.0);
//!
//! let ising = qubo_to_ising(&qubo, 0.0, false);
//! assert_eq!(ising.num_spins(), 2);
//! assert_eq!(ising.ising_to_qubo_index(0), Some(0));
//! ```

pub mod error;
pub mod ising;
pub mod qubo;

pub use error::{IsingError, IsingResult};
pub use ising::{IsingModel, IsingNormalize, qubo_to_ising};
pub use qubo::QuboCoefficients;
