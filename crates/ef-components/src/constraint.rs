//! The linear constraint vocabulary shared with the solver layer.
//!
//! Models speak to the external solver through these types only: a relation
//! says that two weighted sums of flow variables are equal at every time
//! step. The solver collaborator turns them into rows of its LP/MIP; this
//! crate never solves anything.

use core::fmt;

use ef_core::NodeId;

/// Names one directed flow variable by its endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FlowRef {
    pub from: NodeId,
    pub to: NodeId,
}

impl FlowRef {
    pub fn new(from: NodeId, to: NodeId) -> Self {
        Self { from, to }
    }
}

impl fmt::Display for FlowRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.from, self.to)
    }
}

/// One weighted flow variable inside a relation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Term {
    pub coeff: f64,
    pub flow: FlowRef,
}

impl Term {
    pub fn new(coeff: f64, flow: FlowRef) -> Self {
        Self { coeff, flow }
    }
}

/// Σ lhs == Σ rhs, holding at every time step of the horizon.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearRelation {
    /// Human-readable tag carried into solver logs and violation reports.
    pub label: String,
    pub lhs: Vec<Term>,
    pub rhs: Vec<Term>,
}

/// A node-internal decision variable (beyond the per-edge flow variables).
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDecl {
    pub name: String,
    pub lower: f64,
    pub upper: Option<f64>,
    pub binary: bool,
}

impl VariableDecl {
    /// Continuous variable bounded below by zero.
    pub fn non_negative(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lower: 0.0,
            upper: None,
            binary: false,
        }
    }

    /// On/off decision variable.
    pub fn binary(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lower: 0.0,
            upper: Some(1.0),
            binary: true,
        }
    }
}
