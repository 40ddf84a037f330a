//! Residual check of a claimed solution against an assembled problem.

use ef_components::{FlowRef, Term};
use tracing::{debug, warn};

use crate::error::{SolverError, SolverResult};
use crate::problem::ConstraintSet;
use crate::solution::SolvedValues;

/// A point where the solution contradicts the assembled problem.
#[derive(Debug, Clone, PartialEq)]
pub enum Violation {
    /// A linear relation does not hold at step `t`.
    Relation {
        label: String,
        t: usize,
        lhs: f64,
        rhs: f64,
    },
    /// A flow value escapes its bounds at step `t`.
    Bounds {
        flow: FlowRef,
        t: usize,
        value: f64,
        lower: f64,
        upper: Option<f64>,
    },
    /// A flow with a fixed profile deviates from it at step `t`.
    Fixed {
        flow: FlowRef,
        t: usize,
        value: f64,
        expected: f64,
    },
}

/// Check every relation, bound, and fixed profile at every time step.
///
/// Returns the violations found (empty means the solution is consistent with
/// the problem). A flow variable with no solved value at a referenced step
/// is an error, not a violation: the lookup is incomplete and nothing can be
/// said about it.
pub fn verify_solution(
    constraints: &ConstraintSet,
    values: &SolvedValues,
    tol: f64,
) -> SolverResult<Vec<Violation>> {
    let mut violations = Vec::new();

    for rel in &constraints.relations {
        for t in 0..constraints.horizon {
            let lhs = eval_side(&rel.lhs, values, t)?;
            let rhs = eval_side(&rel.rhs, values, t)?;
            if (lhs - rhs).abs() > tol {
                violations.push(Violation::Relation {
                    label: rel.label.clone(),
                    t,
                    lhs,
                    rhs,
                });
            }
        }
    }

    for var in &constraints.flow_vars {
        for t in 0..constraints.horizon {
            let value = values
                .edge_value(var.flow.from, var.flow.to, t)
                .ok_or(SolverError::MissingValue { flow: var.flow, t })?;

            if let Some(expected) = var.fixed_at(t) {
                if (value - expected).abs() > tol {
                    violations.push(Violation::Fixed {
                        flow: var.flow,
                        t,
                        value,
                        expected,
                    });
                }
                continue;
            }

            let lower = var.lower_at(t);
            let upper = var.upper_at(t);
            let below = value < lower - tol;
            let above = upper.is_some_and(|u| value > u + tol);
            if below || above {
                violations.push(Violation::Bounds {
                    flow: var.flow,
                    t,
                    value,
                    lower,
                    upper,
                });
            }
        }
    }

    if violations.is_empty() {
        debug!(
            relations = constraints.relations.len(),
            flows = constraints.flow_vars.len(),
            "solution verified clean"
        );
    } else {
        warn!(count = violations.len(), "solution violates the problem");
    }
    Ok(violations)
}

fn eval_side(terms: &[Term], values: &SolvedValues, t: usize) -> SolverResult<f64> {
    let mut sum = 0.0;
    for term in terms {
        let value = values
            .edge_value(term.flow.from, term.flow.to, t)
            .ok_or(SolverError::MissingValue { flow: term.flow, t })?;
        sum += term.coeff * value;
    }
    Ok(sum)
}
