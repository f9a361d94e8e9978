//! Decision variable metadata.

use serde::{Deserialize, Serialize};

/// The kind of a decision variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VariableKind {
    /// Binary variable in {0, 1}.
    Binary,
    /// Bounded integer variable in `[lower, upper]`.
    Integer {
        /// Inclusive lower bound.
        lower: i64,
        /// Inclusive upper bound.
        upper: i64,
    },
}

/// A decision variable: an integer id plus human-readable metadata.
///
/// Tensor-shaped variables share a name and are distinguished by their
/// subscript tuple, e.g. `x[2][0]` is `name = "x"`, `subscripts = [2, 0]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionVariable {
    /// Unique variable id within an instance.
    pub id: u32,
    /// Variable name.
    pub name: String,
    /// Multi-dimensional subscripts.
    pub subscripts: Vec<i64>,
    /// Variable kind.
    pub kind: VariableKind,
}

impl DecisionVariable {
    /// Value range of this variable as floats.
    pub fn bounds(&self) -> (f64, f64) {
        match self.kind {
            VariableKind::Binary => (0.0, 1.0),
            VariableKind::Integer { lower, upper } => (lower as f64, upper as f64),
        }
    }

    /// Human-readable label of the form `name_{s0,s1,...}`.
    pub fn label(&self) -> String {
        format_label(&self.name, &self.subscripts)
    }
}

/// Format a name and subscript tuple as `name_{s0,s1,...}`.
pub fn format_label(name: &str, subscripts: &[i64]) -> String {
    let subs: Vec<String> = subscripts.iter().map(i64::to_string).collect();
    format!("{}_{{{}}}", name, subs.join(","))
}
