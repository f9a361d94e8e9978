//! `alsvid-model` — optimization problem modeling and QUBO reduction.
//!
//! This crate holds the classical side of the Alsvid pipeline: a
//! [`ProblemInstance`] describes an objective and named constraints over
//! binary and bounded-integer decision variables, and reduces itself to a
//! QUBO via a configurable relaxation method.
//!
//! # Reduction pipeline
//!
//! ```text
//!   ProblemInstance ──→ slack introduction (≤ → =)
//!                   ──→ log encoding (integers → bits)
//!                   ──→ penalty relaxation (constraints → quadratic terms)
//!                   ──→ (QuboCoefficients, constant)
//! ```
//!
//! Integer variables are bit-decomposed (`value = lower + Σ cₖ·bₖ` with the
//! top coefficient clamped so the range is exact). Every generated bit
//! variable keeps the source variable's name and gains the bit index as a
//! trailing subscript, so decoded solutions stay traceable.
//!
//! # Example
//!
//! ```rust
//! use alsvid_model::{Constraint, LinearExpr, ProblemInstance, QuadraticExpr, RelaxMethod, Sense};
//!
//! // minimize -x0 - x1 + 2·x0·x1
//! let mut instance = ProblemInstance::new("pair");
//! let x0 = instance.add_binary("x", vec![0]);
//! let x1 = instance.add_binary("x", vec![1]);
//!
//! let mut obj = QuadraticExpr::new();
//! obj.add_linear(x0, -1.0);
//! obj.add_linear(x1, -1.0);
//! obj.add_quadratic(x0, x1, 2.0);
//! instance.set_objective(obj);
//!
//! let (qubo, constant) = instance
//!     .to_qubo(RelaxMethod::SquaredPenalty, None, None, false)
//!     .unwrap();
//! assert_eq!(qubo.get(x0, x1), 2.0);
//! assert_eq!(constant, 0.0);
//! ```

pub mod error;
pub mod expr;
pub mod instance;
pub mod sample;
pub mod variable;

pub use error::{ModelError, ModelResult};
pub use expr::{LinearExpr, QuadraticExpr};
pub use instance::{
    BinaryProgram, Constraint, DetailParameters, EncodedConstraint, FEASIBILITY_TOL,
    ProblemInstance, RelaxMethod, Sense,
};
pub use sample::{DecodedState, Sample, SampleSet};
pub use variable::{DecisionVariable, VariableKind, format_label};
