//! ef-solver: the boundary to the external optimization solver.
//!
//! This crate does not solve anything. It assembles the graph plus attached
//! node models into a [`ConstraintSet`] (flow variables with bounds,
//! node-internal variable declarations, linear relations), and it understands
//! the [`Solution`] the external solver hands back — including a residual
//! check that a claimed solution actually satisfies the assembled relations.

pub mod error;
pub mod problem;
pub mod solution;
pub mod verify;

// Re-exports for ergonomics
pub use error::{SolverError, SolverResult};
pub use problem::{ConstraintSet, FlowVariable, Problem};
pub use solution::{Solution, SolutionStatus, SolvedValues};
pub use verify::{verify_solution, Violation};
