//! Error types for the model crate.

use thiserror::Error;

/// Errors that can occur during modeling and QUBO reduction.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ModelError {
    /// An expression references a variable id that was never declared.
    #[error("expression references undeclared variable id {id}")]
    UnknownVariable {
        /// The undeclared variable id.
        id: u32,
    },

    /// Integer variable bounds are inverted.
    #[error("variable '{name}' has invalid bounds [{lower}, {upper}]")]
    InvalidBounds {
        /// Variable name.
        name: String,
        /// Declared lower bound.
        lower: i64,
        /// Declared upper bound.
        upper: i64,
    },

    /// Integer variable range needs more encoding bits than supported.
    #[error("variable '{name}' has range {range}, too large for log encoding")]
    RangeTooLarge {
        /// Variable name.
        name: String,
        /// Value range (`upper - lower`).
        range: i64,
    },

    /// A `≤` constraint cannot be satisfied for any assignment within the
    /// declared variable bounds.
    #[error("constraint '{name}' is infeasible: minimum of left-hand side is {min} > 0")]
    InfeasibleConstraint {
        /// Constraint name.
        name: String,
        /// Smallest attainable value of the constraint expression.
        min: f64,
    },
}

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;
