//! Solution types returned by the external solver.

use core::fmt;
use std::collections::{BTreeMap, HashMap};

use ef_core::NodeId;

/// Status of the external solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolutionStatus {
    /// Optimal solution found.
    Optimal,
    /// Problem is infeasible.
    Infeasible,
    /// Problem is unbounded.
    Unbounded,
    /// Solver timed out.
    Timeout,
    /// Solver hit iteration limit.
    IterationLimit,
    /// Numerical difficulties.
    NumericalError,
    /// Generic error occurred.
    Error,
    /// Solution status unknown.
    Unknown,
}

impl SolutionStatus {
    /// Check if this status represents a successful solve.
    pub fn is_success(&self) -> bool {
        matches!(self, SolutionStatus::Optimal)
    }

    /// Check if this status represents a failure.
    pub fn is_failure(&self) -> bool {
        !self.is_success() && !matches!(self, SolutionStatus::Unknown)
    }
}

impl fmt::Display for SolutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolutionStatus::Optimal => write!(f, "optimal"),
            SolutionStatus::Infeasible => write!(f, "infeasible"),
            SolutionStatus::Unbounded => write!(f, "unbounded"),
            SolutionStatus::Timeout => write!(f, "timeout"),
            SolutionStatus::IterationLimit => write!(f, "iteration_limit"),
            SolutionStatus::NumericalError => write!(f, "numerical_error"),
            SolutionStatus::Error => write!(f, "error"),
            SolutionStatus::Unknown => write!(f, "unknown"),
        }
    }
}

/// Solved numeric values, opaque to this crate beyond their key shape:
/// edge-flow series keyed by `(from, to)` and node-internal series keyed by
/// `(node, name)`, each indexed by time step.
#[derive(Debug, Clone, Default)]
pub struct SolvedValues {
    edges: HashMap<(NodeId, NodeId), Vec<f64>>,
    node_vars: HashMap<NodeId, BTreeMap<String, Vec<f64>>>,
}

impl SolvedValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_edge_series(&mut self, from: NodeId, to: NodeId, values: Vec<f64>) {
        self.edges.insert((from, to), values);
    }

    pub fn insert_node_series(
        &mut self,
        node: NodeId,
        name: impl Into<String>,
        values: Vec<f64>,
    ) {
        self.node_vars
            .entry(node)
            .or_default()
            .insert(name.into(), values);
    }

    pub fn edge_series(&self, from: NodeId, to: NodeId) -> Option<&[f64]> {
        self.edges.get(&(from, to)).map(Vec::as_slice)
    }

    /// Value of the edge flow `from -> to` at step `t`.
    pub fn edge_value(&self, from: NodeId, to: NodeId, t: usize) -> Option<f64> {
        self.edge_series(from, to)?.get(t).copied()
    }

    pub fn node_series(&self, node: NodeId, name: &str) -> Option<&[f64]> {
        self.node_vars.get(&node)?.get(name).map(Vec::as_slice)
    }

    pub fn node_value(&self, node: NodeId, name: &str, t: usize) -> Option<f64> {
        self.node_series(node, name)?.get(t).copied()
    }

    /// All node-internal series stored under `node`, in name order.
    pub fn node_vars(&self, node: NodeId) -> impl Iterator<Item = (&str, &[f64])> {
        self.node_vars
            .get(&node)
            .into_iter()
            .flat_map(|vars| vars.iter().map(|(k, v)| (k.as_str(), v.as_slice())))
    }
}

/// What the external solver hands back.
#[derive(Debug, Clone)]
pub struct Solution {
    pub status: SolutionStatus,
    pub objective: Option<f64>,
    pub values: SolvedValues,
}
