//! Error types for problem assembly and solution handling.

use ef_components::{ComponentError, FlowRef};
use ef_graph::GraphError;
use thiserror::Error;

/// Errors that can occur while assembling a problem or checking a solution.
#[derive(Error, Debug)]
pub enum SolverError {
    #[error("Problem setup error: {what}")]
    ProblemSetup { what: String },

    #[error("node '{node}' already has a model attached")]
    DuplicateModel { node: String },

    #[error("no solved value for flow {flow} at step {t}")]
    MissingValue { flow: FlowRef, t: usize },

    #[error("Component error: {0}")]
    Component(#[from] ComponentError),

    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),
}

pub type SolverResult<T> = Result<T, SolverError>;
