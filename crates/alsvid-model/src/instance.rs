//! Problem instances and QUBO reduction.

use alsvid_ising::QuboCoefficients;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ModelError, ModelResult};
use crate::expr::{LinearExpr, QuadraticExpr};
use crate::sample::{DecodedState, Sample, SampleSet};
use crate::variable::{DecisionVariable, VariableKind, format_label};

/// Tolerance below which a constraint violation counts as zero.
pub const FEASIBILITY_TOL: f64 = 1e-9;

/// Log encoding is refused beyond this many bits per integer variable.
const MAX_ENCODING_BITS: usize = 32;

/// Relaxation method for folding constraints into the objective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RelaxMethod {
    /// `μ·g + λ·g²` per constraint.
    AugmentedLagrangian,
    /// `λ·g²` per constraint.
    #[default]
    SquaredPenalty,
}

/// Per-constraint fine-grained penalty parameters `(λ, μ)`, keyed by
/// constraint name and subscript tuple.
pub type DetailParameters = FxHashMap<String, FxHashMap<Vec<i64>, (f64, f64)>>;

/// Constraint sense, with the right-hand side folded into the expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sense {
    /// `expr == 0`.
    Eq,
    /// `expr <= 0`.
    Le,
}

/// A named linear constraint `expr ⋈ 0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constraint {
    /// Constraint family name.
    pub name: String,
    /// Subscripts distinguishing instances within a family (e.g. `forall v`).
    pub subscripts: Vec<i64>,
    /// Left-hand side with the right-hand side already subtracted.
    pub expr: LinearExpr,
    /// Constraint sense.
    pub sense: Sense,
}

impl Constraint {
    /// Create a constraint with no subscripts.
    pub fn new(name: impl Into<String>, expr: LinearExpr, sense: Sense) -> Self {
        Self {
            name: name.into(),
            subscripts: Vec::new(),
            expr,
            sense,
        }
    }

    /// Attach subscripts.
    #[must_use]
    pub fn with_subscripts(mut self, subscripts: Vec<i64>) -> Self {
        self.subscripts = subscripts;
        self
    }

    /// Label of the form `name_{s0,s1,...}`.
    pub fn label(&self) -> String {
        format_label(&self.name, &self.subscripts)
    }
}

/// Log encoding of an integer variable: `value = offset + Σ wₖ·bₖ`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct IntEncoding {
    offset: f64,
    bits: Vec<(u32, f64)>,
}

/// An equality constraint over the binary-encoded variable space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodedConstraint {
    /// Source constraint name.
    pub name: String,
    /// Source constraint subscripts.
    pub subscripts: Vec<i64>,
    /// `expr == 0` over binary variable ids (slack included).
    pub expr: LinearExpr,
}

/// The all-binary form of a [`ProblemInstance`].
///
/// Inequalities have been converted to equalities via log-encoded slack
/// variables, and every integer variable has been bit-decomposed. QUBO
/// variable indices refer to ids in this program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinaryProgram {
    variables: Vec<DecisionVariable>,
    objective: QuadraticExpr,
    constraints: Vec<EncodedConstraint>,
    encodings: FxHashMap<u32, IntEncoding>,
}

impl BinaryProgram {
    /// The binary decision variables, sorted by id.
    pub fn variables(&self) -> &[DecisionVariable] {
        &self.variables
    }

    /// The objective over binary variable ids.
    pub fn objective(&self) -> &QuadraticExpr {
        &self.objective
    }

    /// The equality constraints over binary variable ids.
    pub fn constraints(&self) -> &[EncodedConstraint] {
        &self.constraints
    }
}

/// A classical optimization instance: objective plus named constraints over
/// binary and bounded-integer decision variables.
///
/// Instances are built up front and treated as immutable once handed to a
/// converter. All derived forms (binary program, QUBO) are recomputed
/// deterministically from the declared data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemInstance {
    name: String,
    variables: Vec<DecisionVariable>,
    objective: QuadraticExpr,
    constraints: Vec<Constraint>,
}

impl ProblemInstance {
    /// Create an empty instance.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variables: Vec::new(),
            objective: QuadraticExpr::new(),
            constraints: Vec::new(),
        }
    }

    /// Declare a binary decision variable; returns its id.
    pub fn add_binary(&mut self, name: impl Into<String>, subscripts: Vec<i64>) -> u32 {
        let id = self.variables.len() as u32;
        self.variables.push(DecisionVariable {
            id,
            name: name.into(),
            subscripts,
            kind: VariableKind::Binary,
        });
        id
    }

    /// Declare a bounded integer decision variable; returns its id.
    pub fn add_integer(
        &mut self,
        name: impl Into<String>,
        subscripts: Vec<i64>,
        lower: i64,
        upper: i64,
    ) -> u32 {
        let id = self.variables.len() as u32;
        self.variables.push(DecisionVariable {
            id,
            name: name.into(),
            subscripts,
            kind: VariableKind::Integer { lower, upper },
        });
        id
    }

    /// Set the objective to minimize.
    pub fn set_objective(&mut self, objective: QuadraticExpr) {
        self.objective = objective;
    }

    /// Add a constraint.
    pub fn add_constraint(&mut self, constraint: Constraint) {
        self.constraints.push(constraint);
    }

    /// Instance name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared (original-space) variables.
    pub fn variables(&self) -> &[DecisionVariable] {
        &self.variables
    }

    /// The objective over original variable ids.
    pub fn objective(&self) -> &QuadraticExpr {
        &self.objective
    }

    /// The declared constraints.
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// The decision variables of the binary-encoded program, sorted by id.
    ///
    /// Ids in this list are the QUBO variable indices. Bit variables from
    /// log encoding carry the source variable's name with the bit index
    /// appended to the subscript tuple.
    pub fn decision_variables(&self) -> ModelResult<Vec<DecisionVariable>> {
        Ok(self.binary_program()?.variables)
    }

    /// Build the all-binary form of this instance.
    ///
    /// Deterministic: slack variables are assigned ids after the highest
    /// declared id in constraint order, then bit variables in ascending
    /// integer-variable id order.
    pub fn binary_program(&self) -> ModelResult<BinaryProgram> {
        let var_map: FxHashMap<u32, &DecisionVariable> =
            self.variables.iter().map(|v| (v.id, v)).collect();

        for v in &self.variables {
            if let VariableKind::Integer { lower, upper } = v.kind {
                if lower > upper {
                    return Err(ModelError::InvalidBounds {
                        name: v.name.clone(),
                        lower,
                        upper,
                    });
                }
            }
        }
        let referenced = self.objective.ids().into_iter().chain(
            self.constraints
                .iter()
                .flat_map(|c| c.expr.ids().into_iter()),
        );
        for id in referenced {
            if !var_map.contains_key(&id) {
                return Err(ModelError::UnknownVariable { id });
            }
        }

        let mut next_id = self.variables.iter().map(|v| v.id).max().map_or(0, |m| m + 1);
        let mut work_vars: Vec<DecisionVariable> = self.variables.clone();
        let mut eq_constraints: Vec<EncodedConstraint> = Vec::new();

        // Inequalities become equalities with a nonnegative integer slack
        // sized to the attainable range of the left-hand side.
        let bounds_of = |id: u32| var_map[&id].bounds();
        for c in &self.constraints {
            let mut expr = c.expr.clone();
            if c.sense == Sense::Le {
                let (min, _) = c.expr.value_bounds(bounds_of);
                if min > FEASIBILITY_TOL {
                    return Err(ModelError::InfeasibleConstraint {
                        name: c.name.clone(),
                        min,
                    });
                }
                let slack_range = (-min).floor() as i64;
                if slack_range >= 1 {
                    let slack = DecisionVariable {
                        id: next_id,
                        name: format!("{}_slack", c.name),
                        subscripts: c.subscripts.clone(),
                        kind: VariableKind::Integer {
                            lower: 0,
                            upper: slack_range,
                        },
                    };
                    next_id += 1;
                    expr.add_term(slack.id, 1.0);
                    work_vars.push(slack);
                }
            }
            eq_constraints.push(EncodedConstraint {
                name: c.name.clone(),
                subscripts: c.subscripts.clone(),
                expr,
            });
        }

        // Bit-decompose every integer variable (originals, then slacks —
        // work_vars is already in ascending id order).
        let mut variables: Vec<DecisionVariable> = Vec::new();
        let mut encodings: FxHashMap<u32, IntEncoding> = FxHashMap::default();
        for v in &work_vars {
            match v.kind {
                VariableKind::Binary => variables.push(v.clone()),
                VariableKind::Integer { lower, upper } => {
                    // Saturate on overflow; the bit cap below rejects it.
                    let range = upper.checked_sub(lower).unwrap_or(i64::MAX);
                    let mut bits = Vec::new();
                    if range > 0 {
                        let coeffs = log_encode_coeffs(range);
                        if coeffs.len() > MAX_ENCODING_BITS {
                            return Err(ModelError::RangeTooLarge {
                                name: v.name.clone(),
                                range,
                            });
                        }
                        for (k, coeff) in coeffs.into_iter().enumerate() {
                            let mut subscripts = v.subscripts.clone();
                            subscripts.push(k as i64);
                            variables.push(DecisionVariable {
                                id: next_id,
                                name: v.name.clone(),
                                subscripts,
                                kind: VariableKind::Binary,
                            });
                            bits.push((next_id, coeff));
                            next_id += 1;
                        }
                    }
                    encodings.insert(
                        v.id,
                        IntEncoding {
                            offset: lower as f64,
                            bits,
                        },
                    );
                }
            }
        }
        variables.sort_by_key(|v| v.id);

        let objective = substitute_quadratic(&self.objective, &encodings);
        let constraints = eq_constraints
            .into_iter()
            .map(|ec| EncodedConstraint {
                expr: substitute_linear(&ec.expr, &encodings),
                ..ec
            })
            .collect();

        Ok(BinaryProgram {
            variables,
            objective,
            constraints,
            encodings,
        })
    }

    /// Reduce this instance to `(QuboCoefficients, constant)` under the
    /// given relaxation method.
    ///
    /// `multipliers` scale the penalty of the named constraint families;
    /// `detail_parameters` override `(λ, μ)` for specific `(name,
    /// subscripts)` entries. With `normalize_model` the objective and each
    /// constraint are divided by their own maximum absolute coefficient
    /// before combination.
    pub fn to_qubo(
        &self,
        relax_method: RelaxMethod,
        multipliers: Option<&FxHashMap<String, f64>>,
        detail_parameters: Option<&DetailParameters>,
        normalize_model: bool,
    ) -> ModelResult<(QuboCoefficients, f64)> {
        let bp = self.binary_program()?;

        let mut total = bp.objective.clone();
        if normalize_model {
            total.normalize_by_abs_max();
        }

        let default_mu = match relax_method {
            RelaxMethod::SquaredPenalty => 0.0,
            RelaxMethod::AugmentedLagrangian => 1.0,
        };
        for ec in &bp.constraints {
            let mut g = ec.expr.clone();
            if normalize_model {
                g.normalize_by_abs_max();
            }
            let (mut lambda, mut mu) = detail_parameters
                .and_then(|d| d.get(&ec.name))
                .and_then(|m| m.get(&ec.subscripts))
                .copied()
                .unwrap_or((1.0, default_mu));
            if let Some(&m) = multipliers.and_then(|m| m.get(&ec.name)) {
                lambda *= m;
                mu *= m;
            }

            add_scaled_square(&mut total, &g, lambda);
            for (&id, &a) in g.terms() {
                total.add_linear(id, mu * a);
            }
            total.add_constant(mu * g.constant());
        }

        let mut qubo = QuboCoefficients::new();
        for (&id, &c) in total.linear() {
            qubo.add(id, id, c);
        }
        for (&(i, j), &c) in total.quadratic() {
            qubo.add(i, j, c);
        }

        debug!(
            instance = %self.name,
            variables = bp.variables.len(),
            entries = qubo.len(),
            "reduced instance to QUBO"
        );
        Ok((qubo, total.constant()))
    }

    /// Evaluate decoded binary states against the original objective and
    /// constraints.
    ///
    /// Integer variables are reconstructed from their encoded bits before
    /// evaluation; bits missing from a state read as 0. Each entry carries
    /// the sample ids assigned to it by the decoder.
    pub fn evaluate_samples(
        &self,
        entries: Vec<(DecodedState, Vec<u64>)>,
    ) -> ModelResult<SampleSet> {
        let bp = self.binary_program()?;
        let mut samples = Vec::with_capacity(entries.len());
        for (state, ids) in entries {
            let values = self.reconstruct_values(&bp, &state);
            let objective = self.objective.evaluate(&values);
            let mut violations = FxHashMap::default();
            let mut feasible = true;
            for c in &self.constraints {
                let g = c.expr.evaluate(&values);
                let v = match c.sense {
                    Sense::Eq => g.abs(),
                    Sense::Le => g.max(0.0),
                };
                if v > FEASIBILITY_TOL {
                    feasible = false;
                }
                violations.insert(c.label(), v);
            }
            samples.push(Sample {
                state,
                ids,
                objective,
                violations,
                feasible,
            });
        }
        Ok(SampleSet::from_samples(samples))
    }

    /// Original-space variable values implied by a binary state.
    fn reconstruct_values(&self, bp: &BinaryProgram, state: &DecodedState) -> FxHashMap<u32, f64> {
        let mut values = FxHashMap::default();
        for v in &self.variables {
            let value = match bp.encodings.get(&v.id) {
                None => f64::from(state.bit(v.id)),
                Some(e) => {
                    e.offset
                        + e.bits
                            .iter()
                            .map(|&(b, w)| w * f64::from(state.bit(b)))
                            .sum::<f64>()
                }
            };
            values.insert(v.id, value);
        }
        values
    }
}

/// Coefficients for the log encoding of `[0, range]`: powers of two with
/// the top coefficient clamped so the covered range is exact.
fn log_encode_coeffs(range: i64) -> Vec<f64> {
    debug_assert!(range >= 1);
    let n_bits = (64 - (range as u64).leading_zeros()) as usize;
    let mut coeffs: Vec<f64> = (0..n_bits - 1).map(|k| (1i64 << k) as f64).collect();
    coeffs.push((range - ((1i64 << (n_bits - 1)) - 1)) as f64);
    coeffs
}

/// `(offset, bit terms)` view of a variable under the encoding map.
/// Unencoded variables are their own single "bit" with weight 1.
fn encoded_terms(id: u32, encodings: &FxHashMap<u32, IntEncoding>) -> (f64, Vec<(u32, f64)>) {
    match encodings.get(&id) {
        None => (0.0, vec![(id, 1.0)]),
        Some(e) => (e.offset, e.bits.clone()),
    }
}

fn substitute_linear(expr: &LinearExpr, encodings: &FxHashMap<u32, IntEncoding>) -> LinearExpr {
    let mut out = LinearExpr::new();
    out.add_constant(expr.constant());
    for (&id, &a) in expr.terms() {
        let (offset, bits) = encoded_terms(id, encodings);
        out.add_constant(a * offset);
        for (b, w) in bits {
            out.add_term(b, a * w);
        }
    }
    out
}

fn substitute_quadratic(
    expr: &QuadraticExpr,
    encodings: &FxHashMap<u32, IntEncoding>,
) -> QuadraticExpr {
    let mut out = QuadraticExpr::new();
    out.add_constant(expr.constant());
    for (&id, &a) in expr.linear() {
        let (offset, bits) = encoded_terms(id, encodings);
        out.add_constant(a * offset);
        for (b, w) in bits {
            out.add_linear(b, a * w);
        }
    }
    for (&(i, j), &c) in expr.quadratic() {
        let (off_i, bits_i) = encoded_terms(i, encodings);
        let (off_j, bits_j) = encoded_terms(j, encodings);
        out.add_constant(c * off_i * off_j);
        for &(bi, wi) in &bits_i {
            out.add_linear(bi, c * wi * off_j);
        }
        for &(bj, wj) in &bits_j {
            out.add_linear(bj, c * off_i * wj);
        }
        for &(bi, wi) in &bits_i {
            for &(bj, wj) in &bits_j {
                if bi == bj {
                    // b² = b for binary bits.
                    out.add_linear(bi, c * wi * wj);
                } else {
                    out.add_quadratic(bi, bj, c * wi * wj);
                }
            }
        }
    }
    out
}

/// Accumulate `λ·g²` into `out`, using `x² = x` for binary variables.
fn add_scaled_square(out: &mut QuadraticExpr, g: &LinearExpr, lambda: f64) {
    let mut terms: Vec<(u32, f64)> = g.terms().iter().map(|(&i, &a)| (i, a)).collect();
    terms.sort_by_key(|&(i, _)| i);
    let c = g.constant();
    for (n, &(i, a)) in terms.iter().enumerate() {
        out.add_linear(i, lambda * (a * a + 2.0 * c * a));
        for &(j, b) in &terms[n + 1..] {
            out.add_quadratic(i, j, lambda * 2.0 * a * b);
        }
    }
    out.add_constant(lambda * c * c);
}
